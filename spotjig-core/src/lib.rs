//! Board-agnostic core logic for the spot-weld / probe jig
//!
//! This crate contains all sequencing logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (motion, encoder, display, actuator, digital input)
//! - Input edge tracking and encoder detent deltas
//! - Menus and the row selector
//! - Homing sequencer
//! - Automatic grid run and manual jog sequencers
//! - Top-level mode state machine and the controller that drives it
//! - Configuration types, validation and the TOML loader
//!
//! The host program only needs [`Controller::initialize`] once and
//! [`Controller::tick`] from its polling loop.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod controller;
pub mod input;
pub mod menu;
pub mod motion;
pub mod sequencer;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod sim;

pub use controller::{Controller, Rig};
pub use state::{Event, Mode};
