//! Top-level operating modes
//!
//! Defines which handler owns the panel and the axes. The mode machine is
//! explicit, finite, and deterministic; sub-sequencers request transitions
//! by returning an [`Event`].

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::Mode;
