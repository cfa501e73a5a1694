//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in spotjig-core on top of `embedded-hal` 1.0:
//!
//! - Step/dir stepper with acceleration (AccelStepper-style)
//! - Quadrature encoder decoding
//! - Active-low / active-high digital inputs
//! - HD44780 character LCD behind a PCF8574 I2C backpack
//! - PWM hobby servo

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod actuator;
pub mod display;
pub mod input;
pub mod stepper;

#[cfg(test)]
pub(crate) mod mock;
