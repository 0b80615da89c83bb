//! Heartbeat task
//!
//! First task the scheduler runs after boot; logs uptime so a probe shows
//! the firmware made it past the banner.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

/// Heartbeat interval in seconds
pub const HEARTBEAT_INTERVAL_S: u64 = 10;

#[embassy_executor::task]
pub async fn heartbeat_task() {
    info!("Heartbeat task started");

    let mut ticker = Ticker::every(Duration::from_secs(HEARTBEAT_INTERVAL_S));
    let start = Instant::now();

    loop {
        ticker.next().await;
        debug!("Uptime {}s", start.elapsed().as_secs());
    }
}
