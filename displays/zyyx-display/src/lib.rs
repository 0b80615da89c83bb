//! Boot banner driver for the ZYYX front-panel LCD
//!
//! The panel is an HD44780-style character display on a 4-bit bus. Its bus
//! lines are not wired to the MCU directly: a serial-to-parallel shift
//! register sits in between, fed over three GPIO lines (strobe, clock, data).
//!
//! ```text
//! ┌──────────────┐ strobe ┌───────────────┐ D4-D7, E, RS ┌─────────┐
//! │     MCU      │───────▶│ shift register│─────────────▶│   LCD   │
//! │              │ clock  │ (latched on   │              │ 4-bit   │
//! │              │───────▶│  strobe rise) │              │  bus    │
//! │              │ data   │               │              │         │
//! │              │───────▶│               │              │         │
//! └──────────────┘        └───────────────┘              └─────────┘
//! ```
//!
//! Each latched byte carries a 4-bit payload in the high half, the enable
//! line in bit 3 and the register-select tag in bit 1.
//!
//! # Layers
//!
//! - [`session::TransferSession`] - owns the lines, transmits and latches bytes
//! - [`framing`] - splits command/character bytes into nibbles, settle delay
//! - [`boot`] - the fixed power-on sequence and the two text lines
//!
//! The link is write-only. A missing or miswired display cannot be detected
//! and simply stays blank.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod boot;
pub mod config;
pub mod framing;
pub mod session;
pub mod text;

#[cfg(test)]
mod mock;

pub use boot::{boot_message, boot_message_async, BootMessage, Step, BOOT_SEQUENCE};
pub use config::{BoardPins, ConfigError};
pub use framing::{send_byte, send_byte_async, Register};
pub use session::{BootError, DisplayLines, TransferSession};
pub use text::{Banner, VersionText, DEFAULT_BANNER, LINE_WIDTH};
