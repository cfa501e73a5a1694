//! Active-low switch inputs
//!
//! The button and limit switches are wired to ground with pull-ups, so
//! they read low when active. A failed pin read counts as inactive.

use embedded_hal::digital::InputPin;

use spotjig_core::traits::DigitalInput;

/// Input that is active when the pin reads low
pub struct ActiveLow<P>(pub P);

impl<P: InputPin> DigitalInput for ActiveLow<P> {
    fn is_active(&mut self) -> bool {
        self.0.is_low().unwrap_or(false)
    }
}
