//! ZYYX Hardware Abstraction Layer
//!
//! This crate defines the hardware contracts the boot banner driver needs
//! from a board: digital pins, pin acquisition by board line number and a
//! bit-banged serial transfer primitive. Chip-specific crates implement the
//! binding (RP2040 today), while host tests implement it with recorders.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  zyyx-firmware / zyyx-display           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  zyyx-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  zyyx-hal-    │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`pins::PinBinding`] - Acquire lines by physical identifier
//! - [`spi::SoftwareSpi`] - Serial byte transfer over two GPIO lines

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod pins;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::{EhInput, EhOutput, InputPin, Level, OutputPin, Pull};
pub use pins::{PinBinding, PinError, PinId};
pub use spi::{Mode, SoftwareSpi};
