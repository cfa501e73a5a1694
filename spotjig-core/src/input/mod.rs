//! Operator input tracking
//!
//! Turns raw polling of the pushbutton into single-shot press events and
//! raw encoder ticks into detent deltas against a stored baseline.

pub mod button;
pub mod detent;

pub use button::ButtonEdge;
pub use detent::{detents, tick_delta, EncoderBaseline, TICKS_PER_DETENT};
