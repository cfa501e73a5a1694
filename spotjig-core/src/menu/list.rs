//! Menu list with encoder selection and caret rendering

use crate::input::EncoderBaseline;
use crate::traits::display::report;
use crate::traits::{DisplayDriver, DisplayExt, Encoder};

use super::selector::select_row;

/// One selectable menu row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry<T> {
    /// Label as shown on the panel (numbered by hand, e.g. "1. Start")
    pub label: &'static str,
    /// Value reported when the row is chosen
    pub action: T,
}

impl<T> MenuEntry<T> {
    /// Create a menu entry
    pub const fn new(label: &'static str, action: T) -> Self {
        Self { label, action }
    }
}

/// Live state of one on-screen menu
///
/// Only exists in a meaningful state between [`Menu::enter`] and
/// [`Menu::leave`]; entering again starts from row 0 with a fresh baseline.
#[derive(Debug, Clone)]
pub struct Menu<T: 'static> {
    entries: &'static [MenuEntry<T>],
    row: usize,
    baseline: EncoderBaseline,
}

impl<T: Copy> Menu<T> {
    /// Create a menu over a static entry list
    pub const fn new(entries: &'static [MenuEntry<T>]) -> Self {
        Self {
            entries,
            row: 0,
            baseline: EncoderBaseline::new(),
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the menu has no rows
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highlighted row
    pub fn row(&self) -> usize {
        self.row
    }

    /// Action of the highlighted row
    pub fn selected(&self) -> Option<T> {
        self.entries.get(self.row).map(|e| e.action)
    }

    /// Render the menu and start selection at row 0
    pub fn enter<E: Encoder, D: DisplayDriver>(&mut self, encoder: &mut E, display: &mut D) {
        self.row = 0;
        self.baseline.reset(encoder);

        report(display.clear());
        for (row, entry) in self.entries.iter().enumerate() {
            report(display.print_row(row as u8, entry.label));
        }
        report(display.set_caret(0, 0));
        report(display.show_caret());
    }

    /// Apply encoder movement and check for a selection
    ///
    /// The caret is only redrawn when the row actually changes. Returns the
    /// highlighted row's action when `pressed` is set.
    pub fn update<E: Encoder, D: DisplayDriver>(
        &mut self,
        encoder: &mut E,
        display: &mut D,
        pressed: bool,
    ) -> Option<T> {
        let delta = self.baseline.delta(encoder);
        let row = select_row(self.row, delta, self.len());
        if row != self.row {
            self.row = row;
            report(display.set_caret(row as u8, 0));
        }

        if pressed {
            self.selected()
        } else {
            None
        }
    }

    /// Hide the caret on the way out
    pub fn leave<D: DisplayDriver>(&mut self, display: &mut D) {
        report(display.hide_caret());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{MAIN_MENU, MANUAL_MENU};
    use crate::sim::{Screen, SimEncoder};
    use crate::state::Event;

    #[test]
    fn test_enter_renders_labels() {
        let mut enc = SimEncoder::default();
        let mut screen = Screen::new();
        let mut menu = Menu::new(&MANUAL_MENU);

        menu.enter(&mut enc, &mut screen);

        assert_eq!(screen.row(0).trim_end(), "1. X-Axis");
        assert_eq!(screen.row(3).trim_end(), "4. Go Back");
        assert_eq!(screen.caret, (0, 0));
        assert!(screen.caret_visible);
        assert_eq!(menu.row(), 0);
    }

    #[test]
    fn test_update_moves_caret() {
        let mut enc = SimEncoder::default();
        let mut screen = Screen::new();
        let mut menu = Menu::new(&MANUAL_MENU);
        menu.enter(&mut enc, &mut screen);

        enc.turn(1);
        assert_eq!(menu.update(&mut enc, &mut screen, false), None);
        assert_eq!(menu.row(), 1);
        assert_eq!(screen.caret, (1, 0));

        // Three detents in one go still move one row
        enc.turn(3);
        menu.update(&mut enc, &mut screen, false);
        assert_eq!(menu.row(), 2);
    }

    #[test]
    fn test_update_without_input_is_quiet() {
        let mut enc = SimEncoder::default();
        let mut screen = Screen::new();
        let mut menu = Menu::new(&MAIN_MENU);
        menu.enter(&mut enc, &mut screen);

        let writes = screen.writes;
        for _ in 0..10 {
            menu.update(&mut enc, &mut screen, false);
        }
        assert_eq!(screen.writes, writes);
    }

    #[test]
    fn test_press_reports_selection() {
        let mut enc = SimEncoder::default();
        let mut screen = Screen::new();
        let mut menu = Menu::new(&MAIN_MENU);
        menu.enter(&mut enc, &mut screen);

        enc.turn(1);
        assert_eq!(
            menu.update(&mut enc, &mut screen, true),
            Some(Event::EnterManual)
        );
    }

    #[test]
    fn test_reenter_resets_row() {
        let mut enc = SimEncoder::default();
        let mut screen = Screen::new();
        let mut menu = Menu::new(&MAIN_MENU);
        menu.enter(&mut enc, &mut screen);
        enc.turn(1);
        menu.update(&mut enc, &mut screen, false);
        menu.leave(&mut screen);
        assert!(!screen.caret_visible);

        menu.enter(&mut enc, &mut screen);
        assert_eq!(menu.row(), 0);
        assert_eq!(menu.selected(), Some(Event::EnterAuto));
    }
}
