//! Jig configuration embedded at build time

use defmt::*;

use spotjig_core::config::{parse_config, JigConfig};

/// Embedded configuration, validated by build.rs
/// Edit jig.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../jig.toml");

/// Parse the embedded configuration, falling back to the built-in defaults
pub fn load_config() -> JigConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config loaded: {}x{} grid, probe {}/{} deg",
                config.grid.columns, config.grid.rows, config.probe.down_deg, config.probe.up_deg
            );
            config
        }
        Err(e) => {
            // build.rs checks the file, so only the stricter runtime checks can land here
            error!("Failed to parse jig.toml: {:?}", e);
            error!("Using built-in defaults");
            JigConfig::default()
        }
    }
}
