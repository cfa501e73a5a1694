//! Collaborator traits
//!
//! These traits define the interface between the sequencing logic and
//! the hardware-specific drivers (see `spotjig-drivers`).

pub mod actuator;
pub mod display;
pub mod encoder;
pub mod input;
pub mod motion;

pub use actuator::Actuator;
pub use display::{DisplayDriver, DisplayError, DisplayExt, DISPLAY_COLS, DISPLAY_ROWS};
pub use encoder::Encoder;
pub use input::DigitalInput;
pub use motion::MotionDriver;
