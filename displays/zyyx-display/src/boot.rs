//! Power-on sequence and boot banner
//!
//! The controller is reset into 4-bit mode, configured, and given two lines
//! of text: the product banner and the firmware version. The sequence is
//! fixed and write-only; nothing is read back and nothing is retried.
//!
//! The steps live in one table, [`BOOT_SEQUENCE`], interpreted either with
//! blocking delays before the scheduler starts ([`boot_message`]) or with
//! cooperative delays from a task ([`boot_message_async`]). Both produce the
//! same bus writes in the same order with the same minimum waits.

use embedded_hal::delay::DelayNs;
use zyyx_hal::{InputPin, OutputPin, PinBinding};

use crate::config::BoardPins;
use crate::framing::{send_byte, send_byte_async, Register};
use crate::session::{BootError, DisplayLines, TransferSession};
use crate::text::{Banner, VersionText, LINE_WIDTH};

/// Function set nibble for the 8-bit reset probe
pub const FUNCTION_SET_8BIT: u8 = 0x30;

/// Function set nibble that leaves the controller on the 4-bit bus
pub const FUNCTION_SET_4BIT: u8 = 0x20;

/// Configuration commands sent once the bus is 4 bits wide
pub const SETUP_COMMANDS: [u8; 4] = [0x28, 0x06, 0x0c, 0x01];

/// Set-cursor command base
pub const SET_CURSOR: u8 = 0x80;

/// Cursor command for the banner line
pub const CURSOR_LINE_1: u8 = SET_CURSOR;

/// Cursor command for the version line
pub const CURSOR_LINE_2: u8 = SET_CURSOR + LINE_WIDTH as u8;

/// Wait after the first reset probe, in microseconds
pub const RESET_WAIT_1_US: u32 = 4500;

/// Wait after the second reset probe, in microseconds
pub const RESET_WAIT_2_US: u32 = 150;

/// Wait after the configuration commands (clear needs it), in microseconds
pub const SETUP_WAIT_US: u32 = 2000;

/// One entry of the boot sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Latch a raw value with no enable pulse
    Latch(u8),
    /// One nibble write (enable asserted, then released)
    Nibble(u8),
    /// Command byte, followed by the settle delay
    Command(u8),
    /// Wait at least this many microseconds
    Wait(u32),
    /// Banner characters
    Banner,
    /// Version characters, stopping at the end of the version text
    Version,
}

impl Step {
    fn text<'m>(&self, message: &'m BootMessage<'_>) -> &'m [u8] {
        match self {
            Step::Banner => message.banner.as_bytes(),
            Step::Version => message.version.as_bytes(),
            _ => &[],
        }
    }
}

/// The fixed power-on sequence, in order
pub const BOOT_SEQUENCE: [Step; 16] = [
    // Idle the register outputs
    Step::Latch(0),
    // Reset idiom: three 8-bit probes, then switch to 4 bits
    Step::Nibble(FUNCTION_SET_8BIT),
    Step::Wait(RESET_WAIT_1_US),
    Step::Nibble(FUNCTION_SET_8BIT),
    Step::Wait(RESET_WAIT_2_US),
    Step::Nibble(FUNCTION_SET_8BIT),
    Step::Nibble(FUNCTION_SET_4BIT),
    Step::Command(SETUP_COMMANDS[0]),
    Step::Command(SETUP_COMMANDS[1]),
    Step::Command(SETUP_COMMANDS[2]),
    Step::Command(SETUP_COMMANDS[3]),
    Step::Wait(SETUP_WAIT_US),
    Step::Command(CURSOR_LINE_1),
    Step::Banner,
    Step::Command(CURSOR_LINE_2),
    Step::Version,
];

/// Text shown by the boot sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootMessage<'a> {
    /// First line
    pub banner: Banner,
    /// Second line
    pub version: VersionText<'a>,
}

impl<'a> BootMessage<'a> {
    /// Default banner with the given version
    pub fn new(version: VersionText<'a>) -> Self {
        Self {
            banner: Banner::default(),
            version,
        }
    }

    /// Replace the banner
    pub fn with_banner(mut self, banner: Banner) -> Self {
        self.banner = banner;
        self
    }
}

/// Run the boot sequence on an open session with blocking delays
///
/// Safe to repeat: each run produces the same writes and waits.
pub fn run<O, I, D>(session: &mut TransferSession<O, I>, delay: &mut D, message: &BootMessage<'_>)
where
    O: OutputPin,
    I: InputPin,
    D: DelayNs,
{
    for step in BOOT_SEQUENCE.iter() {
        match *step {
            Step::Latch(value) => session.serial_out(value),
            Step::Nibble(value) => session.send_nibble(value),
            Step::Command(value) => send_byte(session, delay, Register::Command, value),
            Step::Wait(us) => delay.delay_us(us),
            Step::Banner | Step::Version => {
                for &c in step.text(message) {
                    send_byte(session, delay, Register::Data, c);
                }
            }
        }
    }
}

/// Run the boot sequence on an open session, yielding during delays
pub async fn run_async<O, I, D>(
    session: &mut TransferSession<O, I>,
    delay: &mut D,
    message: &BootMessage<'_>,
) where
    O: OutputPin,
    I: InputPin,
    D: embedded_hal_async::delay::DelayNs,
{
    for step in BOOT_SEQUENCE.iter() {
        match *step {
            Step::Latch(value) => session.serial_out(value),
            Step::Nibble(value) => session.send_nibble(value),
            Step::Command(value) => send_byte_async(session, delay, Register::Command, value).await,
            Step::Wait(us) => delay.delay_us(us).await,
            Step::Banner | Step::Version => {
                for &c in step.text(message) {
                    send_byte_async(session, delay, Register::Data, c).await;
                }
            }
        }
    }
}

/// Bind the display lines and show the boot banner
///
/// Called once during startup, before the scheduler runs. The returned lines
/// stay owned by the caller for the rest of the process lifetime.
pub fn boot_message<B, D>(
    binding: &mut B,
    pins: &BoardPins,
    delay: &mut D,
    message: &BootMessage<'_>,
) -> Result<DisplayLines<B::Output, B::Input>, BootError>
where
    B: PinBinding,
    D: DelayNs,
{
    let mut session = TransferSession::open(binding, pins)?;
    run(&mut session, delay, message);
    Ok(session.into_lines())
}

/// [`boot_message`] for callers already running under the scheduler
pub async fn boot_message_async<B, D>(
    binding: &mut B,
    pins: &BoardPins,
    delay: &mut D,
    message: &BootMessage<'_>,
) -> Result<DisplayLines<B::Output, B::Input>, BootError>
where
    B: PinBinding,
    D: embedded_hal_async::delay::DelayNs,
{
    let mut session = TransferSession::open(binding, pins)?;
    run_async(&mut session, delay, message).await;
    Ok(session.into_lines())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framing::SETTLE_US;
    use crate::mock::{chars_after_last_cursor, writes, Event, MockBoard, Write};
    use crate::text::DEFAULT_BANNER;
    use zyyx_hal::PinError;

    const PINS: BoardPins = BoardPins::new(20, 18, 19, 21);

    fn boot(version: &[u8]) -> Vec<Write> {
        let mut board = MockBoard::new(PINS);
        let mut delay = board.delay();
        let message = BootMessage::new(VersionText::from_nul_terminated(version));
        boot_message(&mut board, &PINS, &mut delay, &message).unwrap();
        writes(&board.events())
    }

    fn command(value: u8) -> Write {
        Write::Byte(Register::Command, value)
    }

    fn chars(text: &[u8]) -> Vec<Write> {
        text.iter().map(|&c| Write::Byte(Register::Data, c)).collect()
    }

    #[test]
    fn test_cursor_commands() {
        assert_eq!(CURSOR_LINE_1, 0x80);
        assert_eq!(CURSOR_LINE_2, 0x94);
    }

    #[test]
    fn test_full_sequence() {
        let mut expected = vec![
            Write::Raw(0),
            Write::Nibble(0x30),
            Write::Delay(4500),
            Write::Nibble(0x30),
            Write::Delay(150),
            Write::Nibble(0x30),
            Write::Nibble(0x20),
            command(0x28),
            command(0x06),
            command(0x0c),
            command(0x01),
            Write::Delay(2000),
            command(0x80),
        ];
        expected.extend(chars(b"ZYYX klipper startup"));
        expected.push(command(0x94));
        expected.extend(chars(b"v0.12.0"));

        assert_eq!(boot(b"v0.12.0\0"), expected);
    }

    #[test]
    fn test_command_bytes_before_banner() {
        let sequence: Vec<u8> = boot(b"\0")
            .iter()
            .filter_map(|w| match *w {
                Write::Nibble(n) => Some(n),
                Write::Byte(Register::Command, v) => Some(v),
                _ => None,
            })
            .take(9)
            .collect();

        assert_eq!(
            sequence,
            [0x30, 0x30, 0x30, 0x20, 0x28, 0x06, 0x0c, 0x01, 0x80]
        );
    }

    #[test]
    fn test_long_delays_only_at_reset_points() {
        let mut board = MockBoard::new(PINS);
        let mut delay = board.delay();
        let message = BootMessage::new(VersionText::from_text("V1.2"));
        boot_message(&mut board, &PINS, &mut delay, &message).unwrap();

        let long: Vec<u32> = board
            .events()
            .iter()
            .filter_map(|e| match *e {
                Event::Delay(us) if us != SETTLE_US => Some(us),
                _ => None,
            })
            .collect();
        assert_eq!(long, [4500, 150, 2000]);

        // One settle per command and character byte
        let settles = board
            .events()
            .iter()
            .filter(|e| **e == Event::Delay(SETTLE_US))
            .count();
        assert_eq!(settles, 4 + 1 + 20 + 1 + 4);
    }

    #[test]
    fn test_banner_characters() {
        let out = boot(b"\0");
        let cursor = out.iter().position(|w| *w == command(0x80)).unwrap();
        assert_eq!(out[cursor + 1..cursor + 21], chars(b"ZYYX klipper startup")[..]);
        assert_eq!(out[cursor + 21], command(0x94));
    }

    #[test]
    fn test_custom_banner() {
        let mut board = MockBoard::new(PINS);
        let mut delay = board.delay();
        let banner = Banner::from_ascii("ZYYX pro3 boot...   ").unwrap();
        let message = BootMessage::new(VersionText::from_text("")).with_banner(banner);
        boot_message(&mut board, &PINS, &mut delay, &message).unwrap();

        let out = writes(&board.events());
        let cursor = out.iter().position(|w| *w == command(0x80)).unwrap();
        assert_eq!(out[cursor + 1..cursor + 21], chars(b"ZYYX pro3 boot...   ")[..]);
        assert_ne!(banner, DEFAULT_BANNER);
    }

    #[test]
    fn test_empty_version_sends_nothing() {
        let out = boot(b"\0");
        assert_eq!(out.last(), Some(&command(0x94)));
        assert!(chars_after_last_cursor(&out).is_empty());
    }

    #[test]
    fn test_long_version_truncated() {
        let out = boot(b"0123456789abcdefghijklmno\0");
        assert_eq!(chars_after_last_cursor(&out), b"0123456789abcdefghij");
    }

    #[test]
    fn test_version_stops_at_terminator() {
        let out = boot(b"v1.00\0v2.00");
        assert_eq!(chars_after_last_cursor(&out), b"v1.00");
    }

    #[test]
    fn test_version_line_end_to_end() {
        let out = boot(b"V1.2\0");
        let tail = &out[out.len() - 5..];
        assert_eq!(
            tail,
            [
                command(0x94),
                Write::Byte(Register::Data, b'V'),
                Write::Byte(Register::Data, b'1'),
                Write::Byte(Register::Data, b'.'),
                Write::Byte(Register::Data, b'2'),
            ]
        );
    }

    #[test]
    fn test_repeated_runs_identical() {
        let mut board = MockBoard::new(PINS);
        let mut delay = board.delay();
        let mut session = TransferSession::open(&mut board, &PINS).unwrap();
        let message = BootMessage::new(VersionText::from_text("V1.2"));

        board.clear();
        run(&mut session, &mut delay, &message);
        let first = board.events();

        board.clear();
        run(&mut session, &mut delay, &message);
        let second = board.events();

        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_async_matches_blocking() {
        let message = BootMessage::new(VersionText::from_text("V1.2"));

        let mut board = MockBoard::new(PINS);
        let mut delay = board.delay();
        boot_message(&mut board, &PINS, &mut delay, &message).unwrap();
        let blocking = board.events();

        let mut board = MockBoard::new(PINS);
        let mut delay = board.delay();
        embassy_futures::block_on(boot_message_async(&mut board, &PINS, &mut delay, &message))
            .unwrap();

        assert_eq!(board.events(), blocking);
    }

    #[test]
    fn test_binding_failure_writes_nothing() {
        let pins = BoardPins::new(20, 18, 19, 40);
        let mut board = MockBoard::new(pins);
        let mut delay = board.delay();
        let message = BootMessage::new(VersionText::from_text("V1.2"));

        let result = boot_message(&mut board, &pins, &mut delay, &message);

        assert_eq!(result.err(), Some(BootError::Pin(PinError::InvalidPin)));
        assert!(board
            .events()
            .iter()
            .all(|e| !matches!(e, Event::Write(..) | Event::Delay(_))));
    }

    #[test]
    fn test_lines_stay_owned_after_boot() {
        let mut board = MockBoard::new(PINS);
        let mut delay = board.delay();
        let message = BootMessage::new(VersionText::from_text("V1.2"));
        let lines = boot_message(&mut board, &PINS, &mut delay, &message).unwrap();

        // Last latch leaves the strobe high
        assert!(lines.strobe.is_set_high());

        // Lines cannot be bound a second time while owned
        let again = TransferSession::open(&mut board, &PINS);
        assert_eq!(again.err(), Some(BootError::Pin(PinError::AlreadyTaken)));
    }
}
