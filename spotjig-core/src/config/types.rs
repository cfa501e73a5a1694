//! Configuration type definitions
//!
//! Every tuning constant of the jig lives here under a named field. Speeds
//! are in steps per second, positions and offsets in steps, angles in
//! degrees.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::traits::actuator::MAX_ANGLE_DEG;

/// Configuration validation errors
///
/// Each variant names the offending field group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Grid has zero columns or zero rows
    EmptyGrid,
    /// A homing seek speed is zero
    ZeroSeekSpeed,
    /// A homing back-off points towards its limit switch
    BackoffTowardsSwitch,
    /// Homing phase timeout is zero
    ZeroTimeout,
    /// An automatic-run cruise speed is zero
    ZeroCruiseSpeed,
    /// X column step is zero
    ZeroColumnStep,
    /// Y row pitch is zero
    ZeroRowPitch,
    /// A jog step per detent is zero
    ZeroJogStep,
    /// An angle is above 180 degrees
    AngleOutOfRange,
}

/// Grid shape for the automatic run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridConfig {
    /// Number of X columns (outer loop)
    pub columns: u8,
    /// Number of Y rows per column (inner loop)
    pub rows: u8,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 3,
            rows: 6,
        }
    }
}

/// Homing speeds, back-off offsets and the per-phase budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HomingConfig {
    /// Constant speed while seeking the Y switch
    pub seek_speed_y: i32,
    /// Constant speed of both X drivers while seeking the X switch
    pub seek_speed_x: i32,
    /// Relative X move after zeroing
    pub backoff_x: i32,
    /// Relative Y move after zeroing
    pub backoff_y: i32,
    /// Ticks a single phase may take before homing faults
    pub timeout_ticks: u32,
}

impl Default for HomingConfig {
    fn default() -> Self {
        Self {
            seek_speed_y: -500,
            seek_speed_x: 1000,
            backoff_x: -300,
            backoff_y: 250,
            timeout_ticks: 2_000_000,
        }
    }
}

/// Automatic-run motion parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionConfig {
    /// Cruise speed of the X drivers
    pub cruise_speed_x: i32,
    /// Cruise speed of the Y driver
    pub cruise_speed_y: i32,
    /// Relative X move at the start of every column
    pub column_step: i32,
    /// Distance between Y rows, in tenths of a step
    pub row_pitch_x10: i32,
}

impl MotionConfig {
    /// Absolute Y target of a grid row
    ///
    /// Row 0 sits one pitch away from the origin. Fractional steps are
    /// truncated towards zero.
    pub fn row_target(&self, row: u8) -> i32 {
        (i32::from(row) + 1).saturating_mul(self.row_pitch_x10) / 10
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            cruise_speed_x: 2000,
            cruise_speed_y: 1000,
            column_step: -500,
            row_pitch_x10: 1078,
        }
    }
}

/// Manual jog parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JogConfig {
    /// X steps per encoder detent
    pub steps_per_detent_x: i32,
    /// Y steps per encoder detent
    pub steps_per_detent_y: i32,
    /// Probe angle the Z jog starts from
    pub neutral_z_deg: u8,
}

impl Default for JogConfig {
    fn default() -> Self {
        Self {
            steps_per_detent_x: 50,
            steps_per_detent_y: 50,
            neutral_z_deg: 90,
        }
    }
}

/// Probe servo angles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProbeConfig {
    /// Angle with the probe on the workpiece
    pub down_deg: u8,
    /// Angle with the probe clear of the workpiece
    pub up_deg: u8,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            down_deg: 135,
            up_deg: 90,
        }
    }
}

/// Complete jig configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JigConfig {
    pub grid: GridConfig,
    pub homing: HomingConfig,
    pub motion: MotionConfig,
    pub jog: JogConfig,
    pub probe: ProbeConfig,
}

impl JigConfig {
    /// Check the configuration for values the sequencers can't work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.columns == 0 || self.grid.rows == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        let homing = &self.homing;
        if homing.seek_speed_x == 0 || homing.seek_speed_y == 0 {
            return Err(ConfigError::ZeroSeekSpeed);
        }
        if !opposes(homing.backoff_x, homing.seek_speed_x)
            || !opposes(homing.backoff_y, homing.seek_speed_y)
        {
            return Err(ConfigError::BackoffTowardsSwitch);
        }
        if homing.timeout_ticks == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let motion = &self.motion;
        if motion.cruise_speed_x == 0 || motion.cruise_speed_y == 0 {
            return Err(ConfigError::ZeroCruiseSpeed);
        }
        if motion.column_step == 0 {
            return Err(ConfigError::ZeroColumnStep);
        }
        if motion.row_pitch_x10 == 0 {
            return Err(ConfigError::ZeroRowPitch);
        }

        if self.jog.steps_per_detent_x == 0 || self.jog.steps_per_detent_y == 0 {
            return Err(ConfigError::ZeroJogStep);
        }

        let angles = [
            self.jog.neutral_z_deg,
            self.probe.down_deg,
            self.probe.up_deg,
        ];
        if angles.iter().any(|&a| a > MAX_ANGLE_DEG) {
            return Err(ConfigError::AngleOutOfRange);
        }

        Ok(())
    }
}

/// Check that a back-off moves away from the switch the seek ran into
fn opposes(backoff: i32, seek_speed: i32) -> bool {
    backoff != 0 && backoff.signum() == -seek_speed.signum()
}
