//! Angle actuator trait (probe / weld head servo)

/// Lowest commandable angle in degrees
pub const MIN_ANGLE_DEG: u8 = 0;

/// Highest commandable angle in degrees
pub const MAX_ANGLE_DEG: u8 = 180;

/// Trait for angle-positioned actuators
pub trait Actuator {
    /// Command an angle in degrees (0-180)
    ///
    /// Values above [`MAX_ANGLE_DEG`] are clamped by the implementation.
    fn set_angle(&mut self, degrees: u8);
}
