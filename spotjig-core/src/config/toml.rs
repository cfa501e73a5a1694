//! Simple TOML parser for jig configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the jig configuration. It does NOT support full TOML syntax.
//!
//! Supported features:
//! - [section] headers (`grid`, `homing`, `motion`, `jog`, `probe`)
//! - Key = integer pairs, with optional sign and `_` separators
//! - `row_pitch` as a decimal with at most one fractional digit
//! - Comments (# ...), whole-line or trailing
//!
//! Keys that are not present keep their default value. The result is
//! validated before it is returned.

use super::types::{ConfigError, JigConfig};

/// Parse error
///
/// Line numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection { line: usize },
    /// Line is neither a header nor `key = value`
    InvalidLine { line: usize },
    /// Key not known in its section (or outside any section)
    UnknownKey { line: usize },
    /// Value is not a number or doesn't fit its field
    InvalidValue { line: usize },
    /// Parsed configuration failed validation
    Invalid(ConfigError),
}

impl ParseError {
    /// Line the error was found on, if it came from a specific line
    pub fn line(&self) -> Option<usize> {
        match *self {
            ParseError::InvalidSection { line }
            | ParseError::InvalidLine { line }
            | ParseError::UnknownKey { line }
            | ParseError::InvalidValue { line } => Some(line),
            ParseError::Invalid(_) => None,
        }
    }
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Grid,
    Homing,
    Motion,
    Jog,
    Probe,
}

/// Parse TOML configuration into a validated [`JigConfig`]
pub fn parse_config(input: &str) -> Result<JigConfig, ParseError> {
    let mut config = JigConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        let text = strip_comment(raw).trim();

        // Skip empty lines and comments
        if text.is_empty() {
            continue;
        }

        // Check for section header
        if let Some(header) = text.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or(ParseError::InvalidSection { line })?;
            section = parse_section_header(name.trim()).ok_or(ParseError::InvalidSection { line })?;
            continue;
        }

        let (key, value) = text
            .split_once('=')
            .ok_or(ParseError::InvalidLine { line })?;
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            return Err(ParseError::InvalidLine { line });
        }

        apply_key(&mut config, section, key, value, line)?;
    }

    config.validate().map_err(|e| {
        warn!("config validation failed: {:?}", e);
        ParseError::from(e)
    })?;
    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(name: &str) -> Option<Section> {
    match name {
        "grid" => Some(Section::Grid),
        "homing" => Some(Section::Homing),
        "motion" => Some(Section::Motion),
        "jog" => Some(Section::Jog),
        "probe" => Some(Section::Probe),
        _ => None,
    }
}

/// Store one `key = value` pair in its field
fn apply_key(
    config: &mut JigConfig,
    section: Section,
    key: &str,
    value: &str,
    line: usize,
) -> Result<(), ParseError> {
    let int = |v: &str| parse_int(v).ok_or(ParseError::InvalidValue { line });
    let small = |v: &str| {
        parse_int(v)
            .and_then(|n| u8::try_from(n).ok())
            .ok_or(ParseError::InvalidValue { line })
    };
    let signed = |v: &str| {
        parse_int(v)
            .and_then(|n| i32::try_from(n).ok())
            .ok_or(ParseError::InvalidValue { line })
    };

    match (section, key) {
        (Section::Grid, "columns") => config.grid.columns = small(value)?,
        (Section::Grid, "rows") => config.grid.rows = small(value)?,

        (Section::Homing, "seek_speed_y") => config.homing.seek_speed_y = signed(value)?,
        (Section::Homing, "seek_speed_x") => config.homing.seek_speed_x = signed(value)?,
        (Section::Homing, "backoff_x") => config.homing.backoff_x = signed(value)?,
        (Section::Homing, "backoff_y") => config.homing.backoff_y = signed(value)?,
        (Section::Homing, "timeout_ticks") => {
            config.homing.timeout_ticks =
                u32::try_from(int(value)?).map_err(|_| ParseError::InvalidValue { line })?
        }

        (Section::Motion, "cruise_speed_x") => config.motion.cruise_speed_x = signed(value)?,
        (Section::Motion, "cruise_speed_y") => config.motion.cruise_speed_y = signed(value)?,
        (Section::Motion, "column_step") => config.motion.column_step = signed(value)?,
        (Section::Motion, "row_pitch") => {
            config.motion.row_pitch_x10 = parse_tenths(value)
                .and_then(|n| i32::try_from(n).ok())
                .ok_or(ParseError::InvalidValue { line })?
        }

        (Section::Jog, "steps_per_detent_x") => config.jog.steps_per_detent_x = signed(value)?,
        (Section::Jog, "steps_per_detent_y") => config.jog.steps_per_detent_y = signed(value)?,
        (Section::Jog, "neutral_z_deg") => config.jog.neutral_z_deg = small(value)?,

        (Section::Probe, "down_deg") => config.probe.down_deg = small(value)?,
        (Section::Probe, "up_deg") => config.probe.up_deg = small(value)?,

        _ => return Err(ParseError::UnknownKey { line }),
    }
    Ok(())
}

/// Parse an integer with optional sign and `_` separators
fn parse_int(value: &str) -> Option<i64> {
    let (negative, digits) = split_sign(value);
    let result = parse_digits(digits)?;
    Some(if negative { -result } else { result })
}

/// Unsigned digits with optional `_` separators
fn parse_digits(digits: &str) -> Option<i64> {
    let mut result: i64 = 0;
    let mut seen = false;

    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        let d = c.to_digit(10)?;
        result = result.checked_mul(10)?.checked_add(i64::from(d))?;
        seen = true;
    }

    if !seen {
        return None;
    }
    Some(result)
}

/// Parse a decimal with at most one fractional digit into tenths
fn parse_tenths(value: &str) -> Option<i64> {
    let (whole, frac) = match value.split_once('.') {
        Some((w, f)) => (w, f),
        None => (value, ""),
    };
    let (negative, whole_digits) = split_sign(whole);

    let whole = parse_digits(whole_digits)?;
    let tenths = match frac.len() {
        0 => 0,
        1 => i64::from(frac.chars().next()?.to_digit(10)?),
        _ => return None,
    };

    let magnitude = whole.checked_mul(10)?.checked_add(tenths)?;
    Some(if negative { -magnitude } else { magnitude })
}

fn split_sign(value: &str) -> (bool, &str) {
    if let Some(rest) = value.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = value.strip_prefix('+') {
        (false, rest)
    } else {
        (false, value)
    }
}
