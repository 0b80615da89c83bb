//! Board configuration
//!
//! Constants generated by build.rs from board.toml, plus the firmware
//! version string shown on the second banner line.

use zyyx_display::{Banner, BoardPins};

include!(concat!(env!("OUT_DIR"), "/board_config.rs"));

/// Firmware version, NUL-terminated, populated at build time
pub static FIRMWARE_VERSION: &[u8] = concat!(env!("FIRMWARE_VERSION"), "\0").as_bytes();
