//! RP2040-specific HAL for the ZYYX boot banner firmware
//!
//! Provides the RP2040 implementation of the shared `zyyx-hal` pin binding:
//! GPIO lines are taken by number from a [`pins::PinBank`] so the board
//! configuration, not the code, decides which lines drive the display.

#![no_std]

pub mod pins;

// Re-export shared traits from zyyx-hal for convenience
pub use zyyx_hal::{PinBinding, PinError, PinId};
