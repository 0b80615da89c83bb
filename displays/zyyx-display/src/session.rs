//! Transfer session: exclusive ownership of the display link
//!
//! The session is built once at the start of the boot sequence and passed by
//! reference to every framing call. Nothing else may drive the strobe, clock
//! or data lines while it exists, and after boot the lines move into
//! [`DisplayLines`] for the rest of the process lifetime.

use zyyx_hal::{InputPin, Level, Mode, OutputPin, PinBinding, PinError, SoftwareSpi};

use crate::config::{BoardPins, ConfigError, UNUSED_INPUT_PULL};
use crate::framing::{nibbles, Register, ENABLE};

/// Errors that can stop the boot banner before the first bus write
///
/// Once the lines are bound, the link is write-only and cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootError {
    /// Board pin assignment is inconsistent
    Config(ConfigError),
    /// A line could not be acquired
    Pin(PinError),
}

impl From<ConfigError> for BootError {
    fn from(e: ConfigError) -> Self {
        BootError::Config(e)
    }
}

impl From<PinError> for BootError {
    fn from(e: PinError) -> Self {
        BootError::Pin(e)
    }
}

/// Owned display lines plus the serial framing state
pub struct TransferSession<O, I> {
    strobe: O,
    spi: SoftwareSpi<O, I>,
}

impl<O: OutputPin, I: InputPin> TransferSession<O, I> {
    /// Build a session from lines the caller already owns
    ///
    /// The serial primitive always runs in mode 0 for this shift register.
    pub fn new(strobe: O, clock: O, data: O, unused_input: I) -> Self {
        Self {
            strobe,
            spi: SoftwareSpi::new(data, clock, unused_input, Mode::Mode0),
        }
    }

    /// Acquire the four lines named by `pins` and build a session
    ///
    /// Outputs start low; the unused input gets a pull-up.
    pub fn open<B>(binding: &mut B, pins: &BoardPins) -> Result<Self, BootError>
    where
        B: PinBinding<Output = O, Input = I>,
    {
        pins.validate()?;

        let strobe = binding.acquire_output(pins.strobe, Level::Low)?;
        let unused_input = binding.acquire_input(pins.unused_input, UNUSED_INPUT_PULL)?;
        let data = binding.acquire_output(pins.data, Level::Low)?;
        let clock = binding.acquire_output(pins.clock, Level::Low)?;

        Ok(Self::new(strobe, clock, data, unused_input))
    }

    /// Shift one byte into the register without latching it
    pub fn transmit(&mut self, value: u8) {
        self.spi.transfer(false, &mut [value]);
    }

    /// Shift one byte in and latch it onto the register outputs
    ///
    /// Strobe goes low, the clock is reset to low, the byte is shifted, and
    /// the rising strobe presents it on the parallel outputs.
    pub fn serial_out(&mut self, value: u8) {
        self.strobe.set_low();
        self.spi.clock_low();
        self.transmit(value);
        self.strobe.set_high();
    }

    /// Latch `value` with enable asserted, then with enable released
    ///
    /// `value` already carries the payload in its high half and the register
    /// tag; the two latches form one nibble write on the display bus.
    pub fn send_nibble(&mut self, value: u8) {
        self.serial_out(value | ENABLE);
        self.serial_out(value);
    }

    /// Write both nibbles of a display byte without the settle delay
    pub fn write_byte(&mut self, register: Register, value: u8) {
        let [high, low] = nibbles(register, value);
        self.send_nibble(high);
        self.send_nibble(low);
    }

    /// End the session, keeping the lines in their last driven state
    pub fn into_lines(self) -> DisplayLines<O, I> {
        let (data, clock, unused_input) = self.spi.into_parts();
        DisplayLines {
            strobe: self.strobe,
            clock,
            data,
            unused_input,
        }
    }
}

/// Display lines after boot
///
/// Holding this value is the ownership contract: the lines are never
/// released and no other component may drive them. The firmware parks it in
/// a static for the rest of the process lifetime.
pub struct DisplayLines<O, I> {
    /// Strobe/latch line
    pub strobe: O,
    /// Serial clock line
    pub clock: O,
    /// Serial data line
    pub data: O,
    /// Unused input line
    pub unused_input: I,
}
