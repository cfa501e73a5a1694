//! Build script for spotjig-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates jig.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Known keys per section, with whether the value may be a float
const SECTIONS: &[(&str, &[(&str, bool)])] = &[
    ("grid", &[("columns", false), ("rows", false)]),
    (
        "homing",
        &[
            ("seek_speed_y", false),
            ("seek_speed_x", false),
            ("backoff_x", false),
            ("backoff_y", false),
            ("timeout_ticks", false),
        ],
    ),
    (
        "motion",
        &[
            ("cruise_speed_x", false),
            ("cruise_speed_y", false),
            ("column_step", false),
            ("row_pitch", true),
        ],
    ),
    (
        "jog",
        &[
            ("steps_per_detent_x", false),
            ("steps_per_detent_y", false),
            ("neutral_z_deg", false),
        ],
    ),
    ("probe", &[("down_deg", false), ("up_deg", false)]),
];

fn main() {
    setup_linker();
    validate_config();
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

/// Validate jig.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=jig.toml");

    let config_path = Path::new("jig.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: jig.toml not found!                                      ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a jig.toml configuration file.              ║\n\
            ║  Please create one in the spotjig-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read jig.toml                                  ║\n\
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
                ║  ERROR: Invalid TOML syntax in jig.toml                          ║\n\
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
    validate_keys(&config, &mut errors);
    validate_values(&config, &mut errors);
    report("Invalid jig configuration", &errors);

    println!("cargo:warning=jig.toml validated successfully");
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

/// Panic with a boxed list of errors, if there are any
fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Reject unknown sections, unknown keys and wrongly typed values
fn validate_keys(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        errors.push("top level must be a table".to_string());
        return;
    };

    for (section, body) in root {
        let Some((_, keys)) = SECTIONS.iter().find(|(name, _)| name == section) else {
            errors.push(format!("unknown section [{}]", section));
            continue;
        };
        let Some(body) = body.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };

        for (key, value) in body {
            let Some((_, float_ok)) = keys.iter().find(|(name, _)| name == key) else {
                errors.push(format!("[{}] unknown key '{}'", section, key));
                continue;
            };
            let typed = match value {
                toml::Value::Integer(_) => true,
                toml::Value::Float(_) => *float_ok,
                _ => false,
            };
            if !typed {
                errors.push(format!("[{}] '{}' must be a number", section, key));
            }
        }
    }
}

fn int(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

/// Range checks the firmware would otherwise only catch at boot
fn validate_values(config: &toml::Value, errors: &mut Vec<String>) {
    for key in ["columns", "rows"] {
        if let Some(v) = int(config, "grid", key) {
            if !(1..=255).contains(&v) {
                errors.push(format!("[grid] {} must be 1-255", key));
            }
        }
    }

    for (section, key) in [
        ("jog", "neutral_z_deg"),
        ("probe", "down_deg"),
        ("probe", "up_deg"),
    ] {
        if let Some(v) = int(config, section, key) {
            if !(0..=180).contains(&v) {
                errors.push(format!("[{}] {} must be 0-180", section, key));
            }
        }
    }

    for (section, key) in [
        ("homing", "seek_speed_y"),
        ("homing", "seek_speed_x"),
        ("homing", "timeout_ticks"),
        ("motion", "cruise_speed_x"),
        ("motion", "cruise_speed_y"),
        ("motion", "column_step"),
        ("jog", "steps_per_detent_x"),
        ("jog", "steps_per_detent_y"),
    ] {
        if int(config, section, key) == Some(0) {
            errors.push(format!("[{}] {} must not be 0", section, key));
        }
    }

    for (seek, backoff) in [("seek_speed_x", "backoff_x"), ("seek_speed_y", "backoff_y")] {
        let (Some(s), Some(b)) = (int(config, "homing", seek), int(config, "homing", backoff))
        else {
            continue;
        };
        if b == 0 || s.signum() == b.signum() {
            errors.push(format!("[homing] {} must move away from the switch", backoff));
        }
    }

    if let Some(pitch) = config
        .get("motion")
        .and_then(|m| m.get("row_pitch"))
        .and_then(|v| v.as_float().or_else(|| v.as_integer().map(|i| i as f64)))
    {
        if pitch <= 0.0 {
            errors.push("[motion] row_pitch must be positive".to_string());
        }
    }
}
