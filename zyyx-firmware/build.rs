//! Build script for zyyx-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml and turns it into compile-time constants
//! - Exports the firmware version shown on the second banner line

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Characters per display line
const LINE_WIDTH: usize = 20;

/// Number of user GPIO pins on RP2040
const GPIO_COUNT: u8 = 30;

fn main() {
    setup_linker();
    let pins = validate_config();
    export_version();
    write_board_config(&pins);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Display wiring read from board.toml
struct DisplayConfig {
    strobe: u8,
    clock: u8,
    data: u8,
    unused_input: u8,
    banner: String,
}

/// Validate board.toml configuration at compile time
fn validate_config() -> DisplayConfig {
    // Re-run if board.toml changes
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    // Check if config file exists
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml configuration file.          ║\n\
            ║  Please create one in the zyyx-firmware directory.               ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    // Read the config file
    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let display = validate_display(&config);
    println!("cargo:warning=board.toml validated successfully");
    display
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse a Klipper-style pin name ("gpio20")
fn parse_pin(s: &str) -> Option<u8> {
    let pin: u8 = s.trim().strip_prefix("gpio")?.parse().ok()?;
    (pin < GPIO_COUNT).then_some(pin)
}

/// Validate the [display] section
fn validate_display(config: &toml::Value) -> DisplayConfig {
    let mut errors = Vec::new();

    let display = match config.get("display") {
        Some(toml::Value::Table(t)) => t.clone(),
        Some(_) => {
            errors.push("[display] must be a table".to_string());
            toml::map::Map::new()
        }
        None => {
            errors.push("Missing [display] section".to_string());
            toml::map::Map::new()
        }
    };

    let mut pin = |key: &str| -> u8 {
        match display.get(key) {
            Some(toml::Value::String(name)) => match parse_pin(name) {
                Some(pin) => pin,
                None => {
                    errors.push(format!("[display] {} '{}' is not gpio0-gpio29", key, name));
                    0
                }
            },
            Some(_) => {
                errors.push(format!("[display] {} must be a string like \"gpio20\"", key));
                0
            }
            None => {
                errors.push(format!("[display] missing '{}'", key));
                0
            }
        }
    };

    let strobe = pin("strobe_pin");
    let clock = pin("clock_pin");
    let data = pin("data_pin");
    let unused_input = pin("unused_input_pin");

    let banner = match display.get("banner") {
        None => "ZYYX klipper startup".to_string(),
        Some(toml::Value::String(text)) => {
            let printable = text.bytes().all(|b| (0x20..0x7f).contains(&b));
            if !printable || text.len() != LINE_WIDTH {
                errors.push(format!(
                    "[display] banner must be exactly {} printable ASCII characters",
                    LINE_WIDTH
                ));
            }
            text.clone()
        }
        Some(_) => {
            errors.push("[display] banner must be a string".to_string());
            String::new()
        }
    };

    if errors.is_empty() {
        let pins = [
            ("strobe_pin", strobe),
            ("clock_pin", clock),
            ("data_pin", data),
            ("unused_input_pin", unused_input),
        ];
        for (i, (name, num)) in pins.iter().enumerate() {
            for (other, other_num) in &pins[i + 1..] {
                if num == other_num {
                    errors.push(format!("[display] {} and {} both use gpio{}", name, other, num));
                }
            }
        }
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid display configuration                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    DisplayConfig {
        strobe,
        clock,
        data,
        unused_input,
        banner,
    }
}

/// Export FIRMWARE_VERSION from `git describe`, falling back to the crate version
fn export_version() {
    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-env-changed=FIRMWARE_VERSION");

    let version = env::var("FIRMWARE_VERSION")
        .ok()
        .or_else(|| {
            Command::new("git")
                .args(["describe", "--always", "--tags", "--long", "--dirty"])
                .output()
                .ok()
                .filter(|out| out.status.success())
                .and_then(|out| String::from_utf8(out.stdout).ok())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
        .unwrap_or_else(|| env::var("CARGO_PKG_VERSION").unwrap());

    // The version is NUL-terminated in the image; an embedded NUL would cut it
    let version: String = version.chars().filter(|&c| c != '\0').collect();
    println!("cargo:rustc-env=FIRMWARE_VERSION={}", version);
}

/// Generate board_config.rs in OUT_DIR
fn write_board_config(display: &DisplayConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("board_config.rs")).unwrap();

    writeln!(f, "// Generated from board.toml by build.rs").unwrap();
    writeln!(
        f,
        "pub const DISPLAY_PINS: BoardPins = BoardPins::new({}, {}, {}, {});",
        display.strobe, display.clock, display.data, display.unused_input
    )
    .unwrap();
    writeln!(
        f,
        "pub const BANNER: Banner = Banner::new(*b{:?});",
        display.banner
    )
    .unwrap();
}
