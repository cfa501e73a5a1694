//! Gantry motion and homing
//!
//! The gantry groups the three motion drivers of the table: two X drivers
//! that always move in lockstep, and one Y driver. Homing finds the origin
//! using the limit switches and is advanced one step per controller tick.

pub mod gantry;
pub mod homing;

pub use gantry::{Axis, Gantry};
pub use homing::{Homing, HomingFault, HomingPhase};
