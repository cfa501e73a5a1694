//! Encoder sampling task
//!
//! Decodes the panel encoder in the background so the controller can read
//! a plain count whenever it ticks. The controller loop yields between
//! ticks, which gives this task its turn.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};
use portable_atomic::Ordering;

use spotjig_drivers::input::Quadrature;

use crate::board::ENCODER_TICKS;

/// Sampling interval, short enough for a hand-turned knob
const SAMPLE_INTERVAL_US: u64 = 500;

#[embassy_executor::task]
pub async fn encoder_task(mut encoder: Quadrature<Input<'static>, Input<'static>>) {
    info!("Encoder task started");

    let mut ticker = Ticker::every(Duration::from_micros(SAMPLE_INTERVAL_US));

    loop {
        ticker.next().await;

        if encoder.poll() != 0 {
            ENCODER_TICKS.store(encoder.count(), Ordering::Relaxed);
            trace!("Encoder: {}", encoder.count());
        }
    }
}
