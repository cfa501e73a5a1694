//! Sub-sequencers owned by the controller
//!
//! Each sequencer is advanced once per tick while its mode is active and
//! reports a mode change by returning an [`Event`](crate::state::Event).

pub mod auto_run;
pub mod jog;

pub use auto_run::{AutoPhase, AutoRun, Decision, GridCursor};
pub use jog::{Jog, JogAxis};
