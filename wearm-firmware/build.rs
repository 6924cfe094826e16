//! Build script for wearm-firmware
//!
//! - Passes the cortex-m-rt and defmt linker scripts (memory.x itself is
//!   generated by embassy-stm32's `memory-x` feature)
//! - Validates arm.toml at compile time
//! - Generates `arm_config.rs` in OUT_DIR from arm.toml

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Number of actuators the firmware drives
const ACTUATOR_COUNT: usize = 6;

/// Full mechanical sweep of the servos (degrees)
const BASE_ANGLE_MAX: u16 = 270;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ArmToml {
    motion: MotionToml,
    actuator: Vec<ActuatorToml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MotionToml {
    tick_us: u32,
    waypoint_pause_ms: u32,
    task_rate: u16,
    beep_ms: u32,
    settle_ms: u32,
    stop_policy: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ActuatorToml {
    name: String,
    angle_min: u16,
    angle_max: u16,
    initial_angle: u16,
}

fn main() {
    setup_linker();
    let config = load_config();
    validate_config(&config);
    generate_config(&config);
}

/// Linker scripts for the firmware binary
fn setup_linker() {
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read and parse arm.toml
fn load_config() -> ArmToml {
    println!("cargo:rerun-if-changed=arm.toml");

    let config_path = Path::new("arm.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: arm.toml not found!                                      ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires an arm.toml configuration file.           ║\n\
            ║  Please create one in the wearm-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read arm.toml                                  ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid arm.toml                                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    }
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

/// Check ranges and cross-field constraints serde cannot express
fn validate_config(config: &ArmToml) {
    let mut errors = Vec::new();

    if config.actuator.len() != ACTUATOR_COUNT {
        errors.push(format!(
            "expected {} [[actuator]] entries, found {}",
            ACTUATOR_COUNT,
            config.actuator.len()
        ));
    }

    for (id, actuator) in config.actuator.iter().enumerate() {
        let name = &actuator.name;
        if actuator.angle_max > BASE_ANGLE_MAX {
            errors.push(format!("[{}] {} angle_max must be <= {}", id, name, BASE_ANGLE_MAX));
        }
        if actuator.angle_min >= actuator.angle_max {
            errors.push(format!("[{}] {} angle_min must be < angle_max", id, name));
        }
        if actuator.initial_angle < actuator.angle_min
            || actuator.initial_angle > actuator.angle_max
        {
            errors.push(format!(
                "[{}] {} initial_angle must be within angle_min..angle_max",
                id, name
            ));
        }
    }

    let motion = &config.motion;
    if motion.tick_us == 0 {
        errors.push("[motion] tick_us must be >= 1".to_string());
    }
    if motion.task_rate == 0 {
        errors.push("[motion] task_rate must be >= 1".to_string());
    }
    if stop_policy_variant(&motion.stop_policy).is_none() {
        errors.push(
            "[motion] stop_policy must be 'finish_sequence' or 'abort_sequence'".to_string(),
        );
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid arm configuration                                ║\n\
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
}

fn stop_policy_variant(policy: &str) -> Option<&'static str> {
    match policy {
        "finish_sequence" => Some("FinishSequence"),
        "abort_sequence" => Some("AbortSequence"),
        _ => None,
    }
}

/// Write `ARM_CONFIG` as Rust source
fn generate_config(config: &ArmToml) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let actuators = config
        .actuator
        .iter()
        .map(|a| {
            format!(
                "        // {}\n        ActuatorCalibration::new({}, {}, {}),\n",
                a.name, a.angle_min, a.angle_max, a.initial_angle
            )
        })
        .collect::<String>();

    let motion = &config.motion;
    let policy = stop_policy_variant(&motion.stop_policy).unwrap_or("FinishSequence");

    let source = format!(
        "/// Arm configuration generated from arm.toml\n\
         pub const ARM_CONFIG: ArmConfig = ArmConfig {{\n    \
             actuators: [\n{actuators}    ],\n    \
             motion: MotionConfig {{\n        \
                 tick_us: {tick_us},\n        \
                 waypoint_pause_ms: {pause},\n        \
                 task_rate: {rate},\n        \
                 beep_ms: {beep},\n        \
                 settle_ms: {settle},\n        \
                 stop_policy: StopPolicy::{policy},\n    \
             }},\n\
         }};\n",
        actuators = actuators,
        tick_us = motion.tick_us,
        pause = motion.waypoint_pause_ms,
        rate = motion.task_rate,
        beep = motion.beep_ms,
        settle = motion.settle_ms,
        policy = policy,
    );

    fs::write(out_dir.join("arm_config.rs"), source).unwrap();
}
