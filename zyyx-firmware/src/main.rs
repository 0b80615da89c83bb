//! ZYYX - Boot Banner Firmware
//!
//! Main firmware binary for RP2040-based ZYYX controller boards. Shows the
//! product banner and firmware version on the front-panel LCD, then hands
//! the CPU to the task scheduler.
//!
//! The banner is written with blocking delays before any task is spawned,
//! so nothing competes for the display lines or the CPU while it runs.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use zyyx_display::{boot_message, BootMessage, DisplayLines, VersionText};
use zyyx_hal_rp2040::pin_bank;
use zyyx_hal_rp2040::pins::{BankInput, BankOutput};

mod board;
mod tasks;

/// Display lines stay owned here for the rest of the process lifetime;
/// nothing else may drive them after boot.
static DISPLAY_LINES: StaticCell<DisplayLines<BankOutput, BankInput>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("ZYYX firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    let mut bank = pin_bank!(p);
    info!("Peripherals initialized");

    let pins = board::DISPLAY_PINS;
    info!(
        "Display pins: strobe=gpio{} clock=gpio{} data=gpio{} input=gpio{}",
        pins.strobe.number(),
        pins.clock.number(),
        pins.data.number(),
        pins.unused_input.number()
    );

    let version = VersionText::from_nul_terminated(board::FIRMWARE_VERSION);
    let message = BootMessage::new(version).with_banner(board::BANNER);

    match boot_message(&mut bank, &pins, &mut Delay, &message) {
        Ok(lines) => {
            DISPLAY_LINES.init(lines);
            info!("Boot banner shown, version {=[u8]:a}", version.as_bytes());
        }
        Err(e) => {
            // The display is optional; keep booting without it
            error!("Boot banner failed: {:?}", e);
        }
    }

    spawner.spawn(tasks::heartbeat_task()).unwrap();

    info!("All tasks spawned");
}
