//! Hobby servo on a PWM channel
//!
//! The angle maps linearly onto the pulse width between `min_pulse_us`
//! (0 degrees) and `max_pulse_us` (180 degrees). The PWM slice must be
//! configured for `period_us` by the board code.

use embedded_hal::pwm::SetDutyCycle;

use spotjig_core::traits::actuator::{Actuator, MAX_ANGLE_DEG};

/// Servo pulse timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoConfig {
    /// Pulse width at 0 degrees
    pub min_pulse_us: u16,
    /// Pulse width at 180 degrees
    pub max_pulse_us: u16,
    /// PWM period (50 Hz = 20000)
    pub period_us: u16,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            min_pulse_us: 544,
            max_pulse_us: 2400,
            period_us: 20_000,
        }
    }
}

impl ServoConfig {
    /// Pulse width for an angle, clamped to 0-180 degrees
    pub fn pulse_us(&self, degrees: u8) -> u16 {
        let degrees = degrees.min(MAX_ANGLE_DEG) as u32;
        let span = self.max_pulse_us.saturating_sub(self.min_pulse_us) as u32;
        self.min_pulse_us + (span * degrees / MAX_ANGLE_DEG as u32) as u16
    }
}

/// Servo driver
pub struct Servo<P> {
    pwm: P,
    config: ServoConfig,
    angle: Option<u8>,
}

impl<P: SetDutyCycle> Servo<P> {
    pub fn new(pwm: P, config: ServoConfig) -> Self {
        Self {
            pwm,
            config,
            angle: None,
        }
    }

    /// Last commanded angle, `None` before the first command
    pub fn angle(&self) -> Option<u8> {
        self.angle
    }

    pub fn release(self) -> P {
        self.pwm
    }
}

impl<P: SetDutyCycle> Actuator for Servo<P> {
    fn set_angle(&mut self, degrees: u8) {
        let degrees = degrees.min(MAX_ANGLE_DEG);
        let pulse = self.config.pulse_us(degrees);
        self.pwm
            .set_duty_cycle_fraction(pulse, self.config.period_us)
            .ok();
        self.angle = Some(degrees);
    }
}
