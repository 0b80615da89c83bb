//! Embassy async tasks
//!
//! Spawned once the boot banner is on the display.

pub mod heartbeat;

pub use heartbeat::heartbeat_task;
