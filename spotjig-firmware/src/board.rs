//! Board wiring and the glue between embassy peripherals and the drivers
//!
//! Pin map (RP2040 GPIO numbers):
//!
//! | Signal            | GPIO |
//! |-------------------|------|
//! | X1 step / dir     | 2 / 5 |
//! | X2 step / dir     | 4 / 7 |
//! | Y step / dir      | 3 / 6 |
//! | Stepper enable    | 8 (active low) |
//! | Limit X / Y       | 9 / 10 |
//! | Probe servo (PWM) | 11 (slice 5 B) |
//! | Button            | 14 |
//! | Encoder A / B     | 15 / 16 |
//! | LCD SDA / SCL     | 20 / 21 (I2C0) |

use embassy_rp::gpio::{Input, Output};
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_rp::pwm::PwmOutput;
use embassy_time::{Delay, Instant};
use portable_atomic::{AtomicI32, Ordering};

use spotjig_core::traits::Encoder;
use spotjig_core::Controller;
use spotjig_drivers::actuator::Servo;
use spotjig_drivers::display::Hd44780;
use spotjig_drivers::input::ActiveLow;
use spotjig_drivers::stepper::{AccelStepper, Clock, StepperConfig};

/// Step/dir stepper on plain GPIO outputs
pub type Stepper = AccelStepper<Output<'static>, Output<'static>, EmbassyClock>;

/// Button and limit switches, wired to ground with pull-ups
pub type Switch = ActiveLow<Input<'static>>;

pub type Lcd = Hd44780<I2c<'static, I2C0, Blocking>, Delay>;

pub type ProbeServo = Servo<PwmOutput<'static>>;

pub type JigController = Controller<Stepper, SharedEncoder, Lcd, ProbeServo, Switch>;

/// Stepper limits shared by all three axes
pub const STEPPER_CONFIG: StepperConfig = StepperConfig {
    max_speed: 4000.0,
    acceleration: 4000.0,
    min_pulse_us: 2,
    invert_dir: false,
};

/// Raw encoder count published by the encoder task
pub static ENCODER_TICKS: AtomicI32 = AtomicI32::new(0);

/// Microsecond clock backed by the embassy time driver
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_us(&mut self) -> u32 {
        // Wraps after ~71 minutes; the stepper only uses differences
        Instant::now().as_micros() as u32
    }
}

/// Reads the count published by the encoder task
pub struct SharedEncoder;

impl Encoder for SharedEncoder {
    fn read_raw_ticks(&mut self) -> i32 {
        ENCODER_TICKS.load(Ordering::Relaxed)
    }
}

pub fn stepper(step: Output<'static>, dir: Output<'static>) -> Stepper {
    AccelStepper::new(step, dir, EmbassyClock, STEPPER_CONFIG)
}
