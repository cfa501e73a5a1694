//! spotjig - Spot-Weld / Probe Jig Firmware
//!
//! Main firmware binary for the RP2040 jig controller. Brings up the
//! peripherals, wraps them in the spotjig drivers and hands everything to
//! the board-agnostic controller, which then runs from a polling task.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::pwm::{self, Pwm};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use spotjig_core::motion::Gantry;
use spotjig_core::{Controller, Rig};
use spotjig_drivers::actuator::{Servo, ServoConfig};
use spotjig_drivers::display::{Hd44780, DEFAULT_ADDRESS};
use spotjig_drivers::input::{ActiveLow, Quadrature};

use crate::board::{stepper, JigController, SharedEncoder};

mod board;
mod config;
mod tasks;

/// PWM divider for a 1 MHz counter at the default 125 MHz system clock
const SERVO_PWM_DIVIDER: u8 = 125;

// Controller lives in a static so the task future stays small
static CONTROLLER: StaticCell<JigController> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("spotjig firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config();

    // Stepper drivers share one active-low enable line; energize at boot
    let _enable = Output::new(p.PIN_8, Level::Low);

    let gantry = Gantry {
        x1: stepper(
            Output::new(p.PIN_2, Level::Low),
            Output::new(p.PIN_5, Level::Low),
        ),
        x2: stepper(
            Output::new(p.PIN_4, Level::Low),
            Output::new(p.PIN_7, Level::Low),
        ),
        y: stepper(
            Output::new(p.PIN_3, Level::Low),
            Output::new(p.PIN_6, Level::Low),
        ),
    };
    info!("Steppers initialized");

    let button = ActiveLow(Input::new(p.PIN_14, Pull::Up));
    let limit_x = ActiveLow(Input::new(p.PIN_9, Pull::Up));
    let limit_y = ActiveLow(Input::new(p.PIN_10, Pull::Up));

    let encoder = Quadrature::new(
        Input::new(p.PIN_15, Pull::Up),
        Input::new(p.PIN_16, Pull::Up),
    );

    // 20x4 LCD on I2C0 (SCL=GPIO21, SDA=GPIO20)
    let bus = I2c::new_blocking(p.I2C0, p.PIN_21, p.PIN_20, i2c::Config::default());
    let mut lcd = Hd44780::new(bus, Delay, DEFAULT_ADDRESS);
    unwrap!(lcd.init());
    info!("LCD initialized at {=u8:#x}", DEFAULT_ADDRESS);

    // Probe servo on PWM slice 5 channel B, 50 Hz frame
    let servo_config = ServoConfig::default();
    let mut pwm_config = pwm::Config::default();
    pwm_config.divider = SERVO_PWM_DIVIDER.into();
    pwm_config.top = servo_config.period_us - 1;
    let pwm = Pwm::new_output_b(p.PWM_SLICE5, p.PIN_11, pwm_config);
    let (_, servo_output) = pwm.split();
    let probe = Servo::new(unwrap!(servo_output), servo_config);
    info!("Servo initialized");

    let rig = Rig {
        gantry,
        encoder: SharedEncoder,
        display: lcd,
        probe,
        button,
        limit_x,
        limit_y,
    };
    let controller = CONTROLLER.init(Controller::new(rig, config));

    unwrap!(spawner.spawn(tasks::encoder_task(encoder)));
    unwrap!(spawner.spawn(tasks::controller_task(controller)));

    info!("All tasks spawned, firmware running");

    // The enable pin must stay driven, so main never returns
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
