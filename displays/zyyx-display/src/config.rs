//! Board wiring for the display link
//!
//! Line numbers come from the board configuration at build time; their
//! meaning belongs to the chip HAL that binds them.

use zyyx_hal::{PinId, Pull};

/// Bias applied to the unused input line
///
/// The serial primitive samples an input on every bit even though nothing
/// drives it back; the pull-up keeps it from floating.
pub const UNUSED_INPUT_PULL: Pull = Pull::Up;

/// Board configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The same line is assigned to two display signals
    DuplicatePin(PinId),
}

/// Physical lines wired to the display's shift register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardPins {
    /// Strobe/latch line (shift register storage clock)
    pub strobe: PinId,
    /// Serial clock line
    pub clock: PinId,
    /// Serial data line
    pub data: PinId,
    /// Input line required by the serial primitive, never read back
    pub unused_input: PinId,
}

impl BoardPins {
    /// Create a pin assignment
    pub const fn new(strobe: u8, clock: u8, data: u8, unused_input: u8) -> Self {
        Self {
            strobe: PinId(strobe),
            clock: PinId(clock),
            data: PinId(data),
            unused_input: PinId(unused_input),
        }
    }

    /// All four lines in acquisition order
    pub const fn all(&self) -> [PinId; 4] {
        [self.strobe, self.unused_input, self.data, self.clock]
    }

    /// Check that every signal has its own line
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pins = self.all();
        for (i, pin) in pins.iter().enumerate() {
            if pins[i + 1..].contains(pin) {
                return Err(ConfigError::DuplicatePin(*pin));
            }
        }
        Ok(())
    }
}
