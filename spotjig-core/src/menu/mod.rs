//! Operator menus
//!
//! Every menu follows the same protocol: on entry render the labels, put
//! the caret on row 0 and capture an encoder baseline; on every tick move
//! at most one row per encoder delta; on a button press report the
//! highlighted entry. Leaving a menu hides the caret.

pub mod list;
pub mod selector;

pub use list::{Menu, MenuEntry};
pub use selector::select_row;

use crate::sequencer::Decision;
use crate::state::Event;

/// Main menu: choose automatic or manual operation
pub static MAIN_MENU: [MenuEntry<Event>; 2] = [
    MenuEntry::new("1. Automatic Mode", Event::EnterAuto),
    MenuEntry::new("2. Manual Mode", Event::EnterManual),
];

/// Automatic menu, shown once homing has finished
pub static AUTO_MENU: [MenuEntry<Event>; 2] = [
    MenuEntry::new("1. Start", Event::StartRun),
    MenuEntry::new("2. Go Back", Event::Back),
];

/// Manual menu: pick an axis to jog
pub static MANUAL_MENU: [MenuEntry<Event>; 4] = [
    MenuEntry::new("1. X-Axis", Event::JogX),
    MenuEntry::new("2. Y-Axis", Event::JogY),
    MenuEntry::new("3. Z-Axis", Event::JogZ),
    MenuEntry::new("4. Go Back", Event::Back),
];

/// Decision gate shown at every grid cell
pub static DECISION_MENU: [MenuEntry<Decision>; 3] = [
    MenuEntry::new("1. Continue", Decision::Continue),
    MenuEntry::new("2. Back", Decision::Back),
    MenuEntry::new("3. Exit", Decision::Exit),
];
