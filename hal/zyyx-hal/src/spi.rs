//! Bit-banged SPI
//!
//! [`SoftwareSpi`] shifts bytes over plain GPIO lines, most significant bit
//! first. It is the serial-bit-transfer primitive underneath the shift
//! register that feeds the character display.

use crate::gpio::{InputPin, OutputPin};

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    #[default]
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl Mode {
    /// Clock phase of this mode
    pub const fn phase(self) -> Phase {
        match self {
            Mode::Mode0 | Mode::Mode2 => Phase::CaptureOnFirstTransition,
            Mode::Mode1 | Mode::Mode3 => Phase::CaptureOnSecondTransition,
        }
    }

    /// Clock polarity of this mode
    pub const fn polarity(self) -> Polarity {
        match self {
            Mode::Mode0 | Mode::Mode1 => Polarity::IdleLow,
            Mode::Mode2 | Mode::Mode3 => Polarity::IdleHigh,
        }
    }
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        (mode.polarity(), mode.phase())
    }
}

/// Software SPI master over GPIO lines
///
/// The clock is toggled rather than driven to absolute levels, so the
/// polarity is whatever level the clock line holds when a transfer starts.
pub struct SoftwareSpi<O, I> {
    mosi: O,
    sclk: O,
    miso: I,
    mode: Mode,
}

impl<O: OutputPin, I: InputPin> SoftwareSpi<O, I> {
    /// Create a software SPI master from its three lines
    pub fn new(mosi: O, sclk: O, miso: I, mode: Mode) -> Self {
        Self {
            mosi,
            sclk,
            miso,
            mode,
        }
    }

    /// Configured mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Drive the clock line low
    pub fn clock_low(&mut self) {
        self.sclk.set_low();
    }

    /// Shift every byte of `data` out, most significant bit first
    ///
    /// When `receive` is set, each byte is replaced with the bits sampled
    /// from the input line during its transfer.
    pub fn transfer(&mut self, receive: bool, data: &mut [u8]) {
        for byte in data.iter_mut() {
            let received = self.shift(*byte);
            if receive {
                *byte = received;
            }
        }
    }

    fn shift(&mut self, byte: u8) -> u8 {
        let mut outbuf = byte;
        let mut inbuf = 0u8;

        for _ in 0..8 {
            match self.mode.phase() {
                Phase::CaptureOnSecondTransition => {
                    self.sclk.toggle();
                    self.mosi.set_level((outbuf & 0x80 != 0).into());
                    outbuf <<= 1;
                    self.sclk.toggle();
                    inbuf = (inbuf << 1) | self.miso.is_high() as u8;
                }
                Phase::CaptureOnFirstTransition => {
                    self.mosi.set_level((outbuf & 0x80 != 0).into());
                    outbuf <<= 1;
                    self.sclk.toggle();
                    inbuf = (inbuf << 1) | self.miso.is_high() as u8;
                    self.sclk.toggle();
                }
            }
        }

        inbuf
    }

    /// Release the lines as `(mosi, sclk, miso)`
    pub fn into_parts(self) -> (O, O, I) {
        (self.mosi, self.sclk, self.miso)
    }
}
