//! Mode machine definition
//!
//! All panel and motion behavior is a function of the current mode and the
//! handler it selects.

use super::events::Event;

/// Top-level operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Choose automatic or manual operation
    #[default]
    MainMenu,
    /// Homing, then choose to start the grid run
    AutoMenu,
    /// Grid run in progress
    AutoRun,
    /// Choose an axis to jog
    ManualMenu,
    /// Jogging the X gantry
    JogX,
    /// Jogging the Y carriage
    JogY,
    /// Jogging the probe servo
    JogZ,
}

impl Mode {
    /// Process an event and return the next mode
    ///
    /// Pairs that are not listed keep the current mode.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;

        match (self, event) {
            // Main menu
            (Mode::MainMenu, EnterAuto) => Mode::AutoMenu,
            (Mode::MainMenu, EnterManual) => Mode::ManualMenu,

            // Automatic path
            (Mode::AutoMenu, StartRun) => Mode::AutoRun,
            (Mode::AutoMenu, Back) => Mode::MainMenu,
            (Mode::AutoRun, RunComplete) => Mode::MainMenu,
            (Mode::AutoRun, RunAborted) => Mode::MainMenu,

            // Manual path
            (Mode::ManualMenu, Event::JogX) => Mode::JogX,
            (Mode::ManualMenu, Event::JogY) => Mode::JogY,
            (Mode::ManualMenu, Event::JogZ) => Mode::JogZ,
            (Mode::ManualMenu, Back) => Mode::MainMenu,
            (Mode::JogX | Mode::JogY | Mode::JogZ, Back) => Mode::ManualMenu,

            // Default: stay in current mode
            _ => self,
        }
    }
}
