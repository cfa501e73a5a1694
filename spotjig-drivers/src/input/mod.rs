//! Operator inputs: quadrature encoder and switches

pub mod quadrature;
pub mod switch;

pub use quadrature::Quadrature;
pub use switch::ActiveLow;
