//! Digital input trait

/// Logical digital input (button, limit switch)
///
/// Implementations resolve the electrical polarity: `is_active()` is `true`
/// when the button is pressed or the switch is triggered, whatever the
/// wiring. The jig wires everything active-low.
pub trait DigitalInput {
    /// Sample the input
    fn is_active(&mut self) -> bool;
}
