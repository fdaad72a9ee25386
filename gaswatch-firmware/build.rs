//! Build script for gaswatch-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates gaswatch.toml at compile time
//! - Emits the validated values as constants into `OUT_DIR/config.rs`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Largest SysTick reload value (24-bit counter)
const MAX_TICK_RELOAD: u64 = 0x00FF_FFFF;

/// Largest 12-bit conversion result
const MAX_READING: u64 = 4095;

/// SYSCLK the clock tree is hard-wired to (HSE 8 MHz, PLL 72 MHz)
const BOARD_SYSCLK_HZ: u64 = 72_000_000;

/// Sample-time tiers the converter supports, in ADC clock cycles
const SAMPLE_TIME_TIERS: [u64; 8] = [3, 15, 28, 56, 84, 112, 144, 480];

/// Visible columns on the 16x2 panel
const LCD_COLUMNS: usize = 16;

fn main() {
    setup_linker();
    let settings = validate_config();
    write_config(&settings);
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

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Values baked into the firmware
struct Settings {
    core_clock_hz: u64,
    tick_hz: u64,
    command_timing: &'static str,
    sample_time_cycles: u64,
    poll_budget: u64,
    threshold: u64,
    loop_period_ms: u64,
    actuator_hold_ms: u64,
    splash_text: String,
    splash_ms: u64,
    relay_active_low: bool,
}

/// Validate gaswatch.toml configuration at compile time
fn validate_config() -> Settings {
    println!("cargo:rerun-if-changed=gaswatch.toml");

    let config_path = Path::new("gaswatch.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: gaswatch.toml not found!                                 ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a gaswatch.toml configuration file.       ║\n\
            ║  Please create one in the gaswatch-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read gaswatch.toml                             ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in gaswatch.toml                     ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    let settings = Settings {
        core_clock_hz: integer(&config, "clock", "core_clock_hz", 72_000_000, &mut errors),
        tick_hz: integer(&config, "clock", "tick_hz", 1_000, &mut errors),
        command_timing: command_timing(&config, &mut errors),
        sample_time_cycles: integer(&config, "sampler", "sample_time_cycles", 56, &mut errors),
        poll_budget: integer(&config, "sampler", "poll_budget", 10_000, &mut errors),
        threshold: integer(&config, "monitor", "threshold", 2300, &mut errors),
        loop_period_ms: integer(&config, "monitor", "loop_period_ms", 500, &mut errors),
        actuator_hold_ms: integer(&config, "monitor", "actuator_hold_ms", 50, &mut errors),
        splash_text: text(&config, "monitor", "splash_text", "Merhaba Dunya!", &mut errors),
        splash_ms: integer(&config, "monitor", "splash_ms", 500, &mut errors),
        relay_active_low: boolean(&config, "relay", "active_low", true, &mut errors),
    };

    validate_clock(&settings, &mut errors);
    validate_sampler(&settings, &mut errors);
    validate_monitor(&settings, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid values in gaswatch.toml                          ║\n\
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

    println!("cargo:warning=gaswatch.toml validated successfully");
    settings
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn lookup<'a>(config: &'a toml::Value, section: &str, key: &str) -> Option<&'a toml::Value> {
    config.get(section).and_then(|s| s.get(key))
}

/// Non-negative integer that fits in 32 bits
fn integer(
    config: &toml::Value,
    section: &str,
    key: &str,
    default: u64,
    errors: &mut Vec<String>,
) -> u64 {
    match lookup(config, section, key) {
        None => default,
        Some(value) => match value.as_integer() {
            Some(n) if (0..=i64::from(u32::MAX)).contains(&n) => n as u64,
            Some(n) => {
                errors.push(format!("[{}] {} = {} is out of range", section, key, n));
                default
            }
            None => {
                errors.push(format!("[{}] {} must be an integer", section, key));
                default
            }
        },
    }
}

fn text(
    config: &toml::Value,
    section: &str,
    key: &str,
    default: &str,
    errors: &mut Vec<String>,
) -> String {
    match lookup(config, section, key) {
        None => default.to_string(),
        Some(value) => match value.as_str() {
            Some(s) => s.to_string(),
            None => {
                errors.push(format!("[{}] {} must be a string", section, key));
                default.to_string()
            }
        },
    }
}

fn boolean(
    config: &toml::Value,
    section: &str,
    key: &str,
    default: bool,
    errors: &mut Vec<String>,
) -> bool {
    match lookup(config, section, key) {
        None => default,
        Some(value) => match value.as_bool() {
            Some(b) => b,
            None => {
                errors.push(format!("[{}] {} must be true or false", section, key));
                default
            }
        },
    }
}

fn command_timing(config: &toml::Value, errors: &mut Vec<String>) -> &'static str {
    match text(config, "display", "command_timing", "conservative", errors).as_str() {
        "conservative" => "Conservative",
        "fast" => "Fast",
        other => {
            errors.push(format!(
                "[display] command_timing '{}' must be conservative or fast",
                other
            ));
            "Conservative"
        }
    }
}

fn validate_clock(settings: &Settings, errors: &mut Vec<String>) {
    if settings.tick_hz == 0 {
        errors.push("[clock] tick_hz must be non-zero".to_string());
        return;
    }
    if settings.core_clock_hz != BOARD_SYSCLK_HZ {
        errors.push(format!(
            "[clock] core_clock_hz must be {} (PLL setup is fixed)",
            BOARD_SYSCLK_HZ
        ));
        return;
    }
    if settings.core_clock_hz < settings.tick_hz {
        errors.push("[clock] tick_hz exceeds core_clock_hz".to_string());
        return;
    }
    let reload = settings.core_clock_hz / settings.tick_hz - 1;
    if reload > MAX_TICK_RELOAD {
        errors.push(format!(
            "[clock] tick reload {} exceeds 24 bits, raise tick_hz",
            reload
        ));
    }
}

fn validate_sampler(settings: &Settings, errors: &mut Vec<String>) {
    if !SAMPLE_TIME_TIERS.contains(&settings.sample_time_cycles) {
        errors.push(format!(
            "[sampler] sample_time_cycles {} is not a supported tier",
            settings.sample_time_cycles
        ));
    }
    if settings.poll_budget == 0 {
        errors.push("[sampler] poll_budget must be non-zero".to_string());
    }
}

fn validate_monitor(settings: &Settings, errors: &mut Vec<String>) {
    if settings.threshold > MAX_READING {
        errors.push(format!(
            "[monitor] threshold {} exceeds the 12-bit range",
            settings.threshold
        ));
    }
    if !settings.splash_text.is_ascii() {
        errors.push("[monitor] splash_text must be ASCII".to_string());
    }
    if settings.splash_text.len() > LCD_COLUMNS {
        errors.push(format!(
            "[monitor] splash_text longer than {} columns",
            LCD_COLUMNS
        ));
    }
}

/// Emit the validated settings as Rust constants
fn write_config(settings: &Settings) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("config.rs")).unwrap();

    write!(
        f,
        "// Generated from gaswatch.toml by build.rs\n\
         \n\
         pub const CLOCK: ClockConfig = ClockConfig {{\n    \
             core_clock_hz: {},\n    \
             tick_hz: {},\n\
         }};\n\
         \n\
         pub const DISPLAY: DisplayConfig = DisplayConfig {{\n    \
             command_timing: CommandTiming::{},\n\
         }};\n\
         \n\
         pub const SAMPLER: SamplerConfig = SamplerConfig {{\n    \
             poll_budget: {},\n    \
             ..SamplerConfig::DEFAULT\n\
         }};\n\
         \n\
         pub const SAMPLE_TIME_CYCLES: u16 = {};\n\
         \n\
         pub const MONITOR: MonitorConfig = MonitorConfig {{\n    \
             threshold: {},\n    \
             loop_period_ms: {},\n    \
             actuator_hold_ms: {},\n    \
             splash_text: {:?},\n    \
             splash_ms: {},\n\
         }};\n\
         \n\
         pub const RELAY_ACTIVE_LOW: bool = {};\n",
        settings.core_clock_hz,
        settings.tick_hz,
        settings.command_timing,
        settings.poll_budget,
        settings.sample_time_cycles,
        settings.threshold,
        settings.loop_period_ms,
        settings.actuator_hold_ms,
        settings.splash_text,
        settings.splash_ms,
        settings.relay_active_low,
    )
    .unwrap();
}
