//! Pin acquisition by physical line identifier
//!
//! Board configuration names lines by number; a [`PinBinding`] turns those
//! numbers into owned pin handles exactly once. There is no release
//! operation: lines acquired at boot stay owned for the process lifetime.

use crate::gpio::{InputPin, Level, OutputPin, Pull};

/// Physical line identifier supplied by board configuration
///
/// The value is opaque to the display driver; only the binding interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId(pub u8);

impl PinId {
    /// Raw line number
    pub const fn number(self) -> u8 {
        self.0
    }
}

/// Error when acquiring a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number does not exist on this chip
    InvalidPin,
    /// Pin already acquired by another owner
    AlreadyTaken,
}

/// Acquires digital lines by identifier
pub trait PinBinding {
    /// Output handle type
    type Output: OutputPin;
    /// Input handle type
    type Input: InputPin;

    /// Configure `pin` as an output driven to `initial`
    fn acquire_output(&mut self, pin: PinId, initial: Level) -> Result<Self::Output, PinError>;

    /// Configure `pin` as an input with the given bias
    fn acquire_input(&mut self, pin: PinId, pull: Pull) -> Result<Self::Input, PinError>;
}
