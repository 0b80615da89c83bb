//! Pin allocation by number for config-driven hardware setup
//!
//! Board configuration names display lines by GPIO number; the bank hands
//! each line out once as an owned, configured pin.

use embassy_rp::gpio::{AnyPin, Input, Output};
use embassy_rp::Peri;
use zyyx_hal::{EhInput, EhOutput, Level, PinBinding, PinError, PinId, Pull};

/// Number of user GPIO pins on RP2040
pub const GPIO_COUNT: usize = 30;

/// Build a [`PinBank`] from the `Peripherals` struct
///
/// Moves every `PIN_n` field out of `p`; the remaining peripherals stay
/// usable.
///
/// ```ignore
/// let p = embassy_rp::init(Default::default());
/// let mut bank = pin_bank!(p);
/// ```
#[macro_export]
macro_rules! pin_bank {
    ($p:expr) => {
        $crate::pins::PinBank::new([
            $p.PIN_0.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_1.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_2.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_3.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_4.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_5.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_6.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_7.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_8.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_9.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_10.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_11.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_12.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_13.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_14.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_15.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_16.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_17.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_18.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_19.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_20.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_21.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_22.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_23.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_24.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_25.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_26.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_27.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_28.into::<embassy_rp::gpio::AnyPin>(),
            $p.PIN_29.into::<embassy_rp::gpio::AnyPin>(),
        ])
    };
}

/// Output line handed out by the bank
pub type BankOutput = EhOutput<Output<'static>>;

/// Input line handed out by the bank
pub type BankInput = EhInput<Input<'static>>;

/// Pin bank that holds all GPIO pins and allows taking them by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
}

impl PinBank {
    /// Create a bank from every GPIO pin, indexed by pin number
    ///
    /// Prefer [`pin_bank!`] which builds the array from `Peripherals`.
    pub fn new(pins: [Peri<'static, AnyPin>; GPIO_COUNT]) -> Self {
        Self {
            pins: pins.map(Some),
        }
    }

    /// Take a pin by number
    ///
    /// Returns the pin if available, or an error if:
    /// - Pin number is invalid (>= 30)
    /// - Pin was already taken
    pub fn take(&mut self, pin: PinId) -> Result<Peri<'static, AnyPin>, PinError> {
        self.pins
            .get_mut(pin.number() as usize)
            .ok_or(PinError::InvalidPin)?
            .take()
            .ok_or(PinError::AlreadyTaken)
    }
}

fn rp_level(level: Level) -> embassy_rp::gpio::Level {
    match level {
        Level::Low => embassy_rp::gpio::Level::Low,
        Level::High => embassy_rp::gpio::Level::High,
    }
}

fn rp_pull(pull: Pull) -> embassy_rp::gpio::Pull {
    match pull {
        Pull::None => embassy_rp::gpio::Pull::None,
        Pull::Up => embassy_rp::gpio::Pull::Up,
        Pull::Down => embassy_rp::gpio::Pull::Down,
    }
}

impl PinBinding for PinBank {
    type Output = BankOutput;
    type Input = BankInput;

    fn acquire_output(&mut self, pin: PinId, initial: Level) -> Result<BankOutput, PinError> {
        let pin = self.take(pin)?;
        Ok(EhOutput::from_driven(Output::new(pin, rp_level(initial)), initial))
    }

    fn acquire_input(&mut self, pin: PinId, pull: Pull) -> Result<BankInput, PinError> {
        let pin = self.take(pin)?;
        Ok(EhInput::new(Input::new(pin, rp_pull(pull))))
    }
}
