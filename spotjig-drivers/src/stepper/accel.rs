//! Step/dir stepper with trapezoidal acceleration
//!
//! Polled driver in the style of the AccelStepper library: nothing moves
//! unless `run()` or `run_speed()` is called, and each call emits at most
//! one step when the step interval has elapsed.
//!
//! # Speed profile
//!
//! Queued moves use David Austin's step-interval recurrence
//! ("Generate stepper-motor speed profiles in real time", 2005):
//!
//! - `c0 = 0.676 * sqrt(2 / accel)` for the first step
//! - `cn = cn-1 - 2 * cn-1 / (4n + 1)`, with `n` negative while decelerating
//! - `cn` never drops below the interval of the cruise speed
//!
//! # Usage
//!
//! ```ignore
//! let mut x = AccelStepper::new(step_pin, dir_pin, clock, StepperConfig::default());
//! x.set_speed(2000);
//! x.move_to(-500);
//!
//! // In the polling loop:
//! x.run();
//! ```

use embedded_hal::digital::OutputPin;

use spotjig_core::traits::MotionDriver;

/// Microsecond time source
///
/// The count may wrap; only differences are used.
pub trait Clock {
    fn now_us(&mut self) -> u32;
}

/// Stepper configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepperConfig {
    /// Upper speed limit in steps per second
    pub max_speed: f32,
    /// Acceleration for queued moves in steps per second squared
    pub acceleration: f32,
    /// Minimum high time of a step pulse in microseconds
    pub min_pulse_us: u32,
    /// Swap the meaning of the direction pin
    pub invert_dir: bool,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            max_speed: 4000.0,
            acceleration: 8000.0,
            min_pulse_us: 2,
            invert_dir: false,
        }
    }
}

/// Step/dir stepper driver
pub struct AccelStepper<S, D, C> {
    step: S,
    dir: D,
    clock: C,
    config: StepperConfig,
    /// Position in steps
    current: i32,
    /// Queued target in steps
    target: i32,
    /// Signed speed in steps per second (constant speed or current profile speed)
    speed: f32,
    /// Speed cap for queued moves
    cruise: f32,
    /// Current step interval, 0 when stopped
    interval_us: u32,
    last_step_us: u32,
    /// Step counter of the acceleration recurrence
    n: i32,
    c0: f32,
    cn: f32,
    cmin: f32,
    /// Direction of the queued move
    forward: bool,
}

impl<S, D, C> AccelStepper<S, D, C>
where
    S: OutputPin,
    D: OutputPin,
    C: Clock,
{
    /// Create a stepper at position 0
    pub fn new(step: S, dir: D, clock: C, config: StepperConfig) -> Self {
        let mut stepper = Self {
            step,
            dir,
            clock,
            config,
            current: 0,
            target: 0,
            speed: 0.0,
            cruise: config.max_speed,
            interval_us: 0,
            last_step_us: 0,
            n: 0,
            c0: first_interval_us(config.acceleration),
            cn: 0.0,
            cmin: 0.0,
            forward: true,
        };
        stepper.set_cruise(config.max_speed);
        let _ = stepper.step.set_low();
        stepper
    }

    /// Current signed speed in steps per second
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Current step interval in microseconds, 0 when stopped
    pub fn step_interval_us(&self) -> u32 {
        self.interval_us
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Release the pins and the clock
    pub fn release(self) -> (S, D, C) {
        (self.step, self.dir, self.clock)
    }

    fn set_cruise(&mut self, speed: f32) {
        let speed = speed.min(self.config.max_speed);
        if speed > 0.0 {
            self.cruise = speed;
            self.cmin = 1_000_000.0 / speed;
        }
    }

    /// Emit one step in the direction of `speed` if the interval has elapsed
    fn step_if_due(&mut self) -> bool {
        if self.interval_us == 0 {
            return false;
        }

        let now = self.clock.now_us();
        if now.wrapping_sub(self.last_step_us) < self.interval_us {
            return false;
        }

        let forward = self.speed > 0.0;
        if forward {
            self.current = self.current.wrapping_add(1);
        } else {
            self.current = self.current.wrapping_sub(1);
        }
        self.pulse(forward);
        self.last_step_us = now;
        true
    }

    fn pulse(&mut self, forward: bool) {
        if forward != self.config.invert_dir {
            let _ = self.dir.set_high();
        } else {
            let _ = self.dir.set_low();
        }

        let _ = self.step.set_high();
        let start = self.clock.now_us();
        while self.clock.now_us().wrapping_sub(start) < self.config.min_pulse_us {}
        let _ = self.step.set_low();
    }

    /// Recompute speed and interval after a step or a new target
    fn compute_new_speed(&mut self) {
        let distance = self.distance_to_go();
        let steps_to_stop = ((self.speed * self.speed) / (2.0 * self.config.acceleration)) as i32;

        if distance == 0 && steps_to_stop <= 1 {
            // At the target and slow enough to stop dead
            self.interval_us = 0;
            self.speed = 0.0;
            self.n = 0;
            return;
        }

        if distance > 0 {
            if self.n > 0 {
                // Accelerating: start braking if we'd overshoot or are heading away
                if steps_to_stop >= distance || !self.forward {
                    self.n = -steps_to_stop;
                }
            } else if self.n < 0 && steps_to_stop < distance && self.forward {
                // Braking but there's room again
                self.n = -self.n;
            }
        } else if distance < 0 {
            if self.n > 0 {
                if steps_to_stop >= distance.saturating_neg() || self.forward {
                    self.n = -steps_to_stop;
                }
            } else if self.n < 0 && steps_to_stop < distance.saturating_neg() && !self.forward {
                self.n = -self.n;
            }
        }

        if self.n == 0 {
            // First step from standstill
            self.cn = self.c0;
            self.forward = distance > 0;
        } else {
            self.cn -= (2.0 * self.cn) / (4.0 * self.n as f32 + 1.0);
            if self.cn < self.cmin {
                self.cn = self.cmin;
            }
        }
        self.n += 1;
        self.interval_us = self.cn as u32;
        self.speed = 1_000_000.0 / self.cn;
        if !self.forward {
            self.speed = -self.speed;
        }
    }
}

impl<S, D, C> MotionDriver for AccelStepper<S, D, C>
where
    S: OutputPin,
    D: OutputPin,
    C: Clock,
{
    fn move_to(&mut self, position: i32) {
        if self.target != position {
            self.target = position;
            self.compute_new_speed();
        }
    }

    fn set_speed(&mut self, steps_per_sec: i32) {
        let max = self.config.max_speed;
        let speed = (steps_per_sec as f32).clamp(-max, max);

        self.speed = speed;
        self.interval_us = if speed == 0.0 {
            0
        } else {
            (1_000_000.0 / speed.abs()) as u32
        };
        self.set_cruise(speed.abs());
    }

    fn run(&mut self) -> bool {
        if self.step_if_due() {
            self.compute_new_speed();
        }
        self.speed != 0.0 || self.distance_to_go() != 0
    }

    fn run_speed(&mut self) -> bool {
        self.step_if_due()
    }

    fn distance_to_go(&self) -> i32 {
        self.target.wrapping_sub(self.current)
    }

    fn current_position(&self) -> i32 {
        self.current
    }

    fn set_current_position(&mut self, position: i32) {
        self.current = position;
        self.stop();
    }

    fn stop(&mut self) {
        self.target = self.current;
        self.n = 0;
        self.interval_us = 0;
        self.speed = 0.0;
    }
}

/// First step interval from standstill, in microseconds
///
/// `0.676 * sqrt(2 / accel)` seconds, with the square root taken in
/// integers so no float math library is needed.
fn first_interval_us(acceleration: f32) -> f32 {
    if acceleration <= 0.0 {
        return 0.0;
    }
    // sqrt(2 / a) s == sqrt(2e12 / a) us
    let radicand = (2.0e12 / acceleration) as u64;
    0.676 * isqrt(radicand) as f32
}

/// Integer square root (floor)
fn isqrt(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    let mut x = n;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}
