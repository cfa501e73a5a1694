//! Embassy async tasks

pub mod controller;
pub mod encoder;

pub use controller::controller_task;
pub use encoder::encoder_task;
