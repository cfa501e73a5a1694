//! Pushbutton rising-edge detection

use crate::traits::DigitalInput;

/// Rising-edge tracker for the pushbutton
///
/// Reports exactly one press per contiguous run of "pressed" samples, on
/// the first sample of the run. Holding the button reports nothing more.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEdge {
    /// Last sampled level
    last: bool,
}

impl ButtonEdge {
    /// Create a tracker that assumes the button starts released
    pub const fn new() -> Self {
        Self { last: false }
    }

    /// Feed one sample, returning `true` on a not-pressed -> pressed edge
    pub fn update(&mut self, pressed: bool) -> bool {
        let edge = !self.last && pressed;
        self.last = pressed;
        edge
    }

    /// Sample the button input and report a press edge
    pub fn poll<I: DigitalInput>(&mut self, button: &mut I) -> bool {
        self.update(button.is_active())
    }
}
