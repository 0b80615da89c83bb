//! Byte framing for the 4-bit display bus
//!
//! A display byte travels as two nibbles, high half first. Each nibble is
//! latched twice by the shift register, once with the enable bit set and
//! once with it cleared, so the display sees a falling enable edge with the
//! payload already stable.

use embedded_hal::delay::DelayNs;
use zyyx_hal::{InputPin, OutputPin};

use crate::session::TransferSession;

/// Enable line position in the latched byte
pub const ENABLE: u8 = 0x08;

/// Minimum time the controller needs after each byte, in microseconds
pub const SETTLE_US: u32 = 37;

/// Display register a byte is written to
///
/// The discriminant is the tag ORed into every latched nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Instruction register (commands)
    #[default]
    Command = 0,
    /// Data register (character codes)
    Data = 2,
}

impl Register {
    /// Tag bits for this register
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

/// The two nibble transmissions for `value`, high half first
pub const fn nibbles(register: Register, value: u8) -> [u8; 2] {
    let tag = register.tag();
    [(value & 0xF0) | tag, ((value << 4) & 0xF0) | tag]
}

/// Write one byte and wait for the display to take it
pub fn send_byte<O, I, D>(
    session: &mut TransferSession<O, I>,
    delay: &mut D,
    register: Register,
    value: u8,
) where
    O: OutputPin,
    I: InputPin,
    D: DelayNs,
{
    session.write_byte(register, value);
    delay.delay_us(SETTLE_US);
}

/// [`send_byte`] with a cooperative settle delay
///
/// The bus writes are identical; only the wait yields to other tasks.
pub async fn send_byte_async<O, I, D>(
    session: &mut TransferSession<O, I>,
    delay: &mut D,
    register: Register,
    value: u8,
) where
    O: OutputPin,
    I: InputPin,
    D: embedded_hal_async::delay::DelayNs,
{
    session.write_byte(register, value);
    delay.delay_us(SETTLE_US).await;
}
