//! Stepper driver implementations

pub mod accel;

pub use accel::{AccelStepper, Clock, StepperConfig};
