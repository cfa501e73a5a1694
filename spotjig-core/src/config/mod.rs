//! Jig configuration
//!
//! Board-agnostic tuning values (grid shape, speeds, offsets, angles) with
//! defaults matching the reference rig, plus a small TOML loader.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;
