//! Simulated collaborators for host tests
//!
//! Steppers move one step per `run()` call, the encoder count is set by the
//! test, and the screen keeps the 20x4 character grid in memory.

use std::string::String;
use std::vec::Vec;

use crate::controller::Rig;
use crate::motion::Gantry;
use crate::traits::{
    Actuator, DigitalInput, DisplayDriver, DisplayError, Encoder, MotionDriver, DISPLAY_COLS,
    DISPLAY_ROWS,
};

/// Stepper that moves one step per call
#[derive(Debug, Default)]
pub struct SimStepper {
    pub position: i32,
    pub target: i32,
    pub speed: i32,
    /// Number of commands received (moves, speed changes, re-zeroing)
    pub commands: usize,
}

impl MotionDriver for SimStepper {
    fn move_to(&mut self, position: i32) {
        self.target = position;
        self.commands += 1;
    }

    fn set_speed(&mut self, steps_per_sec: i32) {
        self.speed = steps_per_sec;
        self.commands += 1;
    }

    fn run(&mut self) -> bool {
        if self.position != self.target {
            self.position += (self.target - self.position).signum();
        }
        self.position != self.target
    }

    fn run_speed(&mut self) -> bool {
        if self.speed == 0 {
            return false;
        }
        self.position += self.speed.signum();
        true
    }

    fn distance_to_go(&self) -> i32 {
        self.target - self.position
    }

    fn current_position(&self) -> i32 {
        self.position
    }

    fn set_current_position(&mut self, position: i32) {
        self.position = position;
        self.target = position;
        self.commands += 1;
    }
}

/// Encoder whose raw count is driven by the test
#[derive(Debug, Default)]
pub struct SimEncoder {
    pub ticks: i32,
}

impl SimEncoder {
    /// Turn by whole detents
    pub fn turn(&mut self, detents: i32) {
        self.ticks += detents * crate::input::TICKS_PER_DETENT;
    }
}

impl Encoder for SimEncoder {
    fn read_raw_ticks(&mut self) -> i32 {
        self.ticks
    }
}

/// In-memory 20x4 character screen
#[derive(Debug)]
pub struct Screen {
    rows: [String; DISPLAY_ROWS],
    pub caret: (u8, u8),
    pub caret_visible: bool,
    /// Number of calls that changed the screen or the caret
    pub writes: usize,
    /// Fail every call with a bus error, leaving the screen untouched
    pub fail: bool,
    /// Number of calls rejected while `fail` is set
    pub failures: usize,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            rows: core::array::from_fn(|_| " ".repeat(DISPLAY_COLS)),
            caret: (0, 0),
            caret_visible: false,
            writes: 0,
            fail: false,
            failures: 0,
        }
    }

    fn check_bus(&mut self) -> Result<(), DisplayError> {
        if self.fail {
            self.failures += 1;
            return Err(DisplayError::Bus);
        }
        Ok(())
    }

    pub fn row(&self, row: usize) -> &str {
        &self.rows[row]
    }

    /// Check whether any row starts with `text`
    pub fn shows(&self, text: &str) -> bool {
        self.rows.iter().any(|r| r.starts_with(text))
    }
}

impl DisplayDriver for Screen {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.check_bus()?;
        for row in &mut self.rows {
            *row = " ".repeat(DISPLAY_COLS);
        }
        self.caret = (0, 0);
        self.writes += 1;
        Ok(())
    }

    fn write_row(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
        self.check_bus()?;
        let row = row as usize;
        if row >= DISPLAY_ROWS || text.len() > DISPLAY_COLS {
            return Err(DisplayError::InvalidPosition);
        }
        let rest = self.rows[row][text.len()..].to_string();
        self.rows[row] = format!("{text}{rest}");
        self.writes += 1;
        Ok(())
    }

    fn set_caret(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        self.check_bus()?;
        if row as usize >= DISPLAY_ROWS || col as usize >= DISPLAY_COLS {
            return Err(DisplayError::InvalidPosition);
        }
        self.caret = (row, col);
        self.writes += 1;
        Ok(())
    }

    fn show_caret(&mut self) -> Result<(), DisplayError> {
        self.check_bus()?;
        self.caret_visible = true;
        self.writes += 1;
        Ok(())
    }

    fn hide_caret(&mut self) -> Result<(), DisplayError> {
        self.check_bus()?;
        self.caret_visible = false;
        self.writes += 1;
        Ok(())
    }
}

/// Actuator that records every commanded angle
#[derive(Debug, Default)]
pub struct SimProbe {
    pub angles: Vec<u8>,
}

impl SimProbe {
    pub fn last(&self) -> Option<u8> {
        self.angles.last().copied()
    }
}

impl Actuator for SimProbe {
    fn set_angle(&mut self, degrees: u8) {
        self.angles.push(degrees.min(crate::traits::actuator::MAX_ANGLE_DEG));
    }
}

/// Digital input whose level is set by the test
#[derive(Debug, Default)]
pub struct SimInput {
    pub active: bool,
}

impl DigitalInput for SimInput {
    fn is_active(&mut self) -> bool {
        self.active
    }
}

pub type SimRig = Rig<SimStepper, SimEncoder, Screen, SimProbe, SimInput>;

/// Build a rig of simulated collaborators
pub fn rig() -> SimRig {
    Rig {
        gantry: Gantry {
            x1: SimStepper::default(),
            x2: SimStepper::default(),
            y: SimStepper::default(),
        },
        encoder: SimEncoder::default(),
        display: Screen::new(),
        probe: SimProbe::default(),
        button: SimInput::default(),
        limit_x: SimInput::default(),
        limit_y: SimInput::default(),
    }
}

/// Total number of outward commands issued so far
///
/// Covers motion commands, actuator commands and screen writes, but not
/// `run()` polling, which is how motion advances.
pub fn commands(rig: &SimRig) -> usize {
    rig.gantry.x1.commands
        + rig.gantry.x2.commands
        + rig.gantry.y.commands
        + rig.probe.angles.len()
        + rig.display.writes
}
