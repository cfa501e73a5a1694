//! Automatic grid run
//!
//! Walks the grid column by column (X outer, Y inner). At every cell the
//! probe is lowered and the operator has to pick Continue, Back or Exit
//! before anything moves again.

use core::fmt::Write;

use heapless::String;

use crate::config::JigConfig;
use crate::controller::Rig;
use crate::menu::{Menu, DECISION_MENU};
use crate::motion::Axis;
use crate::state::Event;
use crate::traits::display::report;
use crate::traits::{
    Actuator, DigitalInput, DisplayDriver, DisplayExt, Encoder, MotionDriver, DISPLAY_COLS,
};

/// Phases of the grid run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AutoPhase {
    /// Not started; the next step sets speeds and resets the cursor
    #[default]
    Idle,
    /// Start of a column
    MoveX,
    /// Waiting for both X drivers
    WaitX,
    /// Queue the Y move for the current row
    MoveY,
    /// Waiting for the head to settle on the cell
    WaitY,
    /// Probe down, waiting for the operator
    DecisionMenu,
}

/// Operator choice at a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Decision {
    /// Next cell
    Continue,
    /// Previous cell
    Back,
    /// Abandon the run
    Exit,
}

/// Cell currently being probed
///
/// `x == columns` momentarily marks a finished grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GridCursor {
    pub x: u8,
    pub y: u8,
}

/// Grid run sequencer
#[derive(Debug, Clone)]
pub struct AutoRun {
    phase: AutoPhase,
    cursor: GridCursor,
    menu: Menu<Decision>,
}

impl Default for AutoRun {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoRun {
    pub fn new() -> Self {
        Self {
            phase: AutoPhase::Idle,
            cursor: GridCursor::default(),
            menu: Menu::new(&DECISION_MENU),
        }
    }

    /// Current phase
    pub fn phase(&self) -> AutoPhase {
        self.phase
    }

    /// Current cell
    pub fn cursor(&self) -> GridCursor {
        self.cursor
    }

    /// Highlighted decision row (only meaningful in [`AutoPhase::DecisionMenu`])
    pub fn decision_row(&self) -> usize {
        self.menu.row()
    }

    /// Forget any run in progress
    pub fn reset(&mut self) {
        self.phase = AutoPhase::Idle;
    }

    /// Advance the run by one tick
    ///
    /// Returns [`Event::RunComplete`] after the last column and
    /// [`Event::RunAborted`] when the operator exits.
    pub fn step<M, E, D, A, I>(
        &mut self,
        rig: &mut Rig<M, E, D, A, I>,
        config: &JigConfig,
        pressed: bool,
    ) -> Option<Event>
    where
        M: MotionDriver,
        E: Encoder,
        D: DisplayDriver,
        A: Actuator,
        I: DigitalInput,
    {
        if self.phase == AutoPhase::Idle {
            self.start(rig, config);
        }

        match self.phase {
            // Handled above
            AutoPhase::Idle => None,

            AutoPhase::MoveX => {
                if self.cursor.x >= config.grid.columns {
                    info!("grid complete");
                    report(rig.display.show_lines(&["Auto Complete"]));
                    self.phase = AutoPhase::Idle;
                    return Some(Event::RunComplete);
                }
                rig.gantry.move_by(Axis::X, config.motion.column_step);
                self.phase = AutoPhase::WaitX;
                None
            }

            AutoPhase::WaitX => {
                rig.gantry.run(Axis::X);
                if rig.gantry.is_idle(Axis::X) {
                    self.cursor.y = 0;
                    self.phase = AutoPhase::MoveY;
                }
                None
            }

            AutoPhase::MoveY => {
                if self.cursor.y >= config.grid.rows {
                    self.cursor.x += 1;
                    self.phase = AutoPhase::MoveX;
                    return None;
                }

                let mut coords: String<DISPLAY_COLS> = String::new();
                let _ = write!(coords, "X={} Y={}", self.cursor.x, self.cursor.y);
                report(rig.display.show_lines(&["Moving to Position", coords.as_str()]));

                let target = config.motion.row_target(self.cursor.y);
                rig.gantry.move_to(Axis::Y, target);
                self.phase = AutoPhase::WaitY;
                None
            }

            AutoPhase::WaitY => {
                // X may still be returning to the previous column
                rig.gantry.run_all();
                if rig.gantry.all_idle() {
                    info!("at cell ({}, {})", self.cursor.x, self.cursor.y);
                    rig.probe.set_angle(config.probe.down_deg);
                    self.menu.enter(&mut rig.encoder, &mut rig.display);
                    self.phase = AutoPhase::DecisionMenu;
                }
                None
            }

            AutoPhase::DecisionMenu => {
                let decision = self
                    .menu
                    .update(&mut rig.encoder, &mut rig.display, pressed)?;
                self.menu.leave(&mut rig.display);
                rig.probe.set_angle(config.probe.up_deg);
                self.decide(rig, config, decision)
            }
        }
    }

    fn start<M, E, D, A, I>(&mut self, rig: &mut Rig<M, E, D, A, I>, config: &JigConfig)
    where
        M: MotionDriver,
        E: Encoder,
        D: DisplayDriver,
        A: Actuator,
        I: DigitalInput,
    {
        info!(
            "auto run: {}x{} grid",
            config.grid.columns,
            config.grid.rows
        );
        rig.gantry
            .set_speeds(config.motion.cruise_speed_x, config.motion.cruise_speed_y);
        self.cursor = GridCursor::default();
        report(rig.display.show_lines(&["Starting Auto Mode"]));
        self.phase = AutoPhase::MoveX;
    }

    fn decide<M, E, D, A, I>(
        &mut self,
        rig: &mut Rig<M, E, D, A, I>,
        config: &JigConfig,
        decision: Decision,
    ) -> Option<Event>
    where
        M: MotionDriver,
        E: Encoder,
        D: DisplayDriver,
        A: Actuator,
        I: DigitalInput,
    {
        info!(
            "decision {:?} at ({}, {})",
            decision,
            self.cursor.x,
            self.cursor.y
        );

        match decision {
            Decision::Continue => {
                self.cursor.y += 1;
                self.phase = AutoPhase::MoveY;
                None
            }
            Decision::Back => {
                if self.cursor.y > 0 {
                    self.cursor.y -= 1;
                } else if self.cursor.x > 0 {
                    self.cursor.x -= 1;
                    self.cursor.y = config.grid.rows.saturating_sub(1);
                    // Physically return to the previous column as well
                    rig.gantry
                        .move_by(Axis::X, config.motion.column_step.saturating_neg());
                }
                self.phase = AutoPhase::MoveY;
                None
            }
            Decision::Exit => {
                self.phase = AutoPhase::Idle;
                Some(Event::RunAborted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{rig, SimRig};

    fn config() -> JigConfig {
        let mut config = JigConfig::default();
        config.motion.column_step = -5;
        config.motion.row_pitch_x10 = 30;
        config
    }

    /// Step until the decision gate shows up, returning the cell
    fn run_to_gate(run: &mut AutoRun, rig: &mut SimRig, config: &JigConfig) -> Option<GridCursor> {
        for _ in 0..500 {
            if let Some(event) = run.step(rig, config, false) {
                panic!("unexpected {:?}", event);
            }
            if run.phase() == AutoPhase::DecisionMenu {
                return Some(run.cursor());
            }
        }
        None
    }

    /// Pick a decision row and press
    fn choose(run: &mut AutoRun, rig: &mut SimRig, config: &JigConfig, row: i32) -> Option<Event> {
        // One detent per tick, the menu moves a single row per update
        for _ in 0..row {
            rig.encoder.turn(1);
            run.step(rig, config, false);
        }
        let event = run.step(rig, config, true);
        // Leave the encoder where it was for the next gate
        rig.encoder.turn(-row);
        event
    }

    #[test]
    fn test_start_sets_speeds_and_message() {
        let config = config();
        let mut rig = rig();
        let mut run = AutoRun::new();

        run.step(&mut rig, &config, false);
        assert_eq!(rig.gantry.x1.speed, 2000);
        assert_eq!(rig.gantry.x2.speed, 2000);
        assert_eq!(rig.gantry.y.speed, 1000);
        assert!(rig.display.shows("Starting Auto Mode"));
        // MoveX ran in the same tick
        assert_eq!(run.phase(), AutoPhase::WaitX);
        assert_eq!(rig.gantry.x1.target, -5);
    }

    #[test]
    fn test_gate_lowers_probe_and_shows_menu() {
        let config = config();
        let mut rig = rig();
        let mut run = AutoRun::new();

        let cell = run_to_gate(&mut run, &mut rig, &config);
        assert_eq!(cell, Some(GridCursor { x: 0, y: 0 }));
        assert_eq!(rig.probe.last(), Some(135));
        assert_eq!(rig.gantry.y.position, 3);
        assert_eq!(rig.gantry.x1.position, -5);
        assert_eq!(rig.display.row(0).trim_end(), "1. Continue");
        assert_eq!(rig.display.row(2).trim_end(), "3. Exit");
        assert!(rig.display.caret_visible);
    }

    #[test]
    fn test_traversal_order() {
        let mut config = config();
        config.grid.columns = 3;
        config.grid.rows = 6;
        let mut rig = rig();
        let mut run = AutoRun::new();

        let mut visited = Vec::new();
        let finished = loop {
            let cell = run_to_gate(&mut run, &mut rig, &config);
            visited.push(cell.unwrap());

            if let Some(event) = choose(&mut run, &mut rig, &config, 0) {
                panic!("unexpected {:?}", event);
            }
            // The raised probe is commanded on every Continue
            assert_eq!(rig.probe.last(), Some(90));

            // Drive through to the next gate or the end
            let mut event = None;
            for _ in 0..500 {
                event = run.step(&mut rig, &config, false);
                if event.is_some() || run.phase() == AutoPhase::DecisionMenu {
                    break;
                }
            }
            if event.is_some() {
                break event;
            }
        };

        let expected: Vec<GridCursor> = (0..3)
            .flat_map(|x| (0..6).map(move |y| GridCursor { x, y }))
            .collect();
        assert_eq!(visited, expected);
        assert_eq!(finished, Some(Event::RunComplete));
        assert_eq!(run.phase(), AutoPhase::Idle);
        assert!(rig.display.shows("Auto Complete"));
    }

    #[test]
    fn test_back_wraps_to_previous_column() {
        let config = config();
        let mut rig = rig();
        let mut run = AutoRun::new();

        // Continue through column 0 to (1, 0)
        for _ in 0..config.grid.rows {
            run_to_gate(&mut run, &mut rig, &config);
            choose(&mut run, &mut rig, &config, 0);
        }
        let cell = run_to_gate(&mut run, &mut rig, &config);
        assert_eq!(cell, Some(GridCursor { x: 1, y: 0 }));
        assert_eq!(rig.gantry.x1.position, -10);

        assert_eq!(choose(&mut run, &mut rig, &config, 1), None);
        let cell = run_to_gate(&mut run, &mut rig, &config);
        assert_eq!(cell, Some(GridCursor { x: 0, y: 5 }));

        // Head is back over column 0, on the last row
        assert_eq!(rig.gantry.x1.position, -5);
        assert_eq!(rig.gantry.x2.position, -5);
        assert_eq!(rig.gantry.y.position, config.motion.row_target(5));
    }

    #[test]
    fn test_back_at_origin_stays() {
        let config = config();
        let mut rig = rig();
        let mut run = AutoRun::new();

        run_to_gate(&mut run, &mut rig, &config);
        choose(&mut run, &mut rig, &config, 1);
        let cell = run_to_gate(&mut run, &mut rig, &config);
        assert_eq!(cell, Some(GridCursor { x: 0, y: 0 }));
        assert_eq!(rig.gantry.x1.position, -5);
    }

    #[test]
    fn test_back_steps_one_row() {
        let config = config();
        let mut rig = rig();
        let mut run = AutoRun::new();

        run_to_gate(&mut run, &mut rig, &config);
        choose(&mut run, &mut rig, &config, 0);
        run_to_gate(&mut run, &mut rig, &config);
        choose(&mut run, &mut rig, &config, 0);
        assert_eq!(
            run_to_gate(&mut run, &mut rig, &config),
            Some(GridCursor { x: 0, y: 2 })
        );

        choose(&mut run, &mut rig, &config, 1);
        assert_eq!(
            run_to_gate(&mut run, &mut rig, &config),
            Some(GridCursor { x: 0, y: 1 })
        );
    }

    #[test]
    fn test_exit_aborts() {
        let config = config();
        let mut rig = rig();
        let mut run = AutoRun::new();

        run_to_gate(&mut run, &mut rig, &config);
        assert_eq!(
            choose(&mut run, &mut rig, &config, 2),
            Some(Event::RunAborted)
        );
        assert_eq!(run.phase(), AutoPhase::Idle);
        assert_eq!(rig.probe.last(), Some(90));
        assert!(!rig.display.caret_visible);
    }

    #[test]
    fn test_gate_waits_for_press() {
        let config = config();
        let mut rig = rig();
        let mut run = AutoRun::new();

        run_to_gate(&mut run, &mut rig, &config);
        rig.encoder.turn(5);
        for _ in 0..20 {
            assert_eq!(run.step(&mut rig, &config, false), None);
        }
        assert_eq!(run.phase(), AutoPhase::DecisionMenu);
        // Several detents at once still move a single row
        assert_eq!(run.decision_row(), 1);
        rig.encoder.turn(1);
        run.step(&mut rig, &config, false);
        rig.encoder.turn(1);
        run.step(&mut rig, &config, false);
        // No wraparound past the last row
        assert_eq!(run.decision_row(), 2);
        assert_eq!(rig.display.caret, (2, 0));
    }
}
