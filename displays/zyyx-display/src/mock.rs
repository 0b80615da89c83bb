//! Recording board for host tests
//!
//! Pins and delays append to one shared trace so tests can check the order
//! of bus writes and delays, and decode what the shift register latched.

use std::cell::RefCell;
use std::rc::Rc;

use zyyx_hal::{InputPin, Level, OutputPin, PinBinding, PinError, PinId, Pull};

use crate::config::BoardPins;
use crate::framing::{Register, SETTLE_US};

/// Display signal a write went to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Strobe,
    Clock,
    Data,
    Other(PinId),
}

/// Raw trace entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    AcquiredOutput(PinId, Level),
    AcquiredInput(PinId, Pull),
    Write(Line, Level),
    Delay(u32),
}

pub type Trace = Rc<RefCell<Vec<Event>>>;

pub struct MockOutput {
    line: Line,
    high: bool,
    trace: Trace,
}

impl OutputPin for MockOutput {
    fn set_high(&mut self) {
        self.high = true;
        self.trace.borrow_mut().push(Event::Write(self.line, Level::High));
    }

    fn set_low(&mut self) {
        self.high = false;
        self.trace.borrow_mut().push(Event::Write(self.line, Level::Low));
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Input nothing drives: reads its pull level
pub struct MockInput {
    pull: Pull,
}

impl InputPin for MockInput {
    fn is_high(&mut self) -> bool {
        self.pull == Pull::Up
    }
}

pub struct MockBoard {
    pins: BoardPins,
    taken: Vec<PinId>,
    pub trace: Trace,
}

impl MockBoard {
    pub fn new(pins: BoardPins) -> Self {
        Self {
            pins,
            taken: Vec::new(),
            trace: Trace::default(),
        }
    }

    pub fn delay(&self) -> MockDelay {
        MockDelay {
            trace: self.trace.clone(),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.trace.borrow().clone()
    }

    pub fn clear(&self) {
        self.trace.borrow_mut().clear();
    }

    fn take(&mut self, pin: PinId) -> Result<(), PinError> {
        if pin.number() >= 30 {
            return Err(PinError::InvalidPin);
        }
        if self.taken.contains(&pin) {
            return Err(PinError::AlreadyTaken);
        }
        self.taken.push(pin);
        Ok(())
    }

    fn line(&self, pin: PinId) -> Line {
        if pin == self.pins.strobe {
            Line::Strobe
        } else if pin == self.pins.clock {
            Line::Clock
        } else if pin == self.pins.data {
            Line::Data
        } else {
            Line::Other(pin)
        }
    }
}

impl PinBinding for MockBoard {
    type Output = MockOutput;
    type Input = MockInput;

    fn acquire_output(&mut self, pin: PinId, initial: Level) -> Result<MockOutput, PinError> {
        self.take(pin)?;
        self.trace
            .borrow_mut()
            .push(Event::AcquiredOutput(pin, initial));
        Ok(MockOutput {
            line: self.line(pin),
            high: initial == Level::High,
            trace: self.trace.clone(),
        })
    }

    fn acquire_input(&mut self, pin: PinId, pull: Pull) -> Result<MockInput, PinError> {
        self.take(pin)?;
        self.trace.borrow_mut().push(Event::AcquiredInput(pin, pull));
        Ok(MockInput { pull })
    }
}

/// Delay that records instead of waiting
pub struct MockDelay {
    trace: Trace,
}

impl MockDelay {
    fn record(&mut self, us: u32) {
        self.trace.borrow_mut().push(Event::Delay(us));
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.record(ns.div_ceil(1000));
    }

    fn delay_us(&mut self, us: u32) {
        self.record(us);
    }
}

impl embedded_hal_async::delay::DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.record(ns.div_ceil(1000));
    }

    async fn delay_us(&mut self, us: u32) {
        self.record(us);
    }
}

/// What the shift register presented, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bus {
    Latch(u8),
    Delay(u32),
}

/// Replay the trace through a model of the shift register
///
/// Bits are shifted in on each rising clock edge; the register contents
/// appear on a rising strobe edge.
pub fn latches(events: &[Event]) -> Vec<Bus> {
    let mut out = Vec::new();
    let mut shift = 0u8;
    let mut data = false;
    let mut clock = false;
    let mut strobe = false;

    for event in events {
        match *event {
            Event::AcquiredOutput(..) | Event::AcquiredInput(..) => {}
            Event::Write(Line::Data, level) => data = level == Level::High,
            Event::Write(Line::Clock, level) => {
                let high = level == Level::High;
                if high && !clock {
                    shift = (shift << 1) | data as u8;
                }
                clock = high;
            }
            Event::Write(Line::Strobe, level) => {
                let high = level == Level::High;
                if high && !strobe {
                    out.push(Bus::Latch(shift));
                }
                strobe = high;
            }
            Event::Write(Line::Other(_), _) => {}
            Event::Delay(us) => out.push(Bus::Delay(us)),
        }
    }

    out
}

/// Display-level view of the latched values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Write {
    /// Latched value not part of an enable pulse
    Raw(u8),
    /// Enable pulse on its own: payload plus tag bits
    Nibble(u8),
    /// Two tagged nibbles followed by the settle delay
    Byte(Register, u8),
    Delay(u32),
}

pub fn writes(events: &[Event]) -> Vec<Write> {
    let bus = latches(events);

    #[derive(Clone, Copy)]
    enum Token {
        Raw(u8),
        Nibble(u8),
        Delay(u32),
    }

    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bus.len() {
        match (bus[i], bus.get(i + 1)) {
            (Bus::Latch(a), Some(&Bus::Latch(b))) if b & 0x08 == 0 && a == b | 0x08 => {
                tokens.push(Token::Nibble(b));
                i += 2;
            }
            (Bus::Latch(a), _) => {
                tokens.push(Token::Raw(a));
                i += 1;
            }
            (Bus::Delay(us), _) => {
                tokens.push(Token::Delay(us));
                i += 1;
            }
        }
    }

    let mut out = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        match (tokens[i], tokens.get(i + 1), tokens.get(i + 2)) {
            (Token::Nibble(hi), Some(&Token::Nibble(lo)), Some(&Token::Delay(SETTLE_US)))
                if hi & 0x0F == lo & 0x0F =>
            {
                let register = if hi & 0x0F == Register::Data.tag() {
                    Register::Data
                } else {
                    Register::Command
                };
                out.push(Write::Byte(register, (hi & 0xF0) | (lo >> 4)));
                i += 3;
            }
            (Token::Nibble(n), ..) => {
                out.push(Write::Nibble(n));
                i += 1;
            }
            (Token::Raw(v), ..) => {
                out.push(Write::Raw(v));
                i += 1;
            }
            (Token::Delay(us), ..) => {
                out.push(Write::Delay(us));
                i += 1;
            }
        }
    }

    out
}

/// Character bytes written after the last cursor command
pub fn chars_after_last_cursor(writes: &[Write]) -> Vec<u8> {
    let start = writes
        .iter()
        .rposition(|w| matches!(w, Write::Byte(Register::Command, v) if v & 0x80 != 0))
        .map_or(0, |i| i + 1);
    writes[start..]
        .iter()
        .filter_map(|w| match *w {
            Write::Byte(Register::Data, c) => Some(c),
            _ => None,
        })
        .collect()
}
