//! Two-column gantry with a Y carriage

use crate::traits::MotionDriver;

/// Linear axis of the gantry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Both X drivers together
    X,
    /// The Y driver
    Y,
}

/// The table's motion drivers
///
/// X1 and X2 drive the two sides of the gantry and are always commanded
/// together. Position reads for X come from X1.
#[derive(Debug)]
pub struct Gantry<M> {
    pub x1: M,
    pub x2: M,
    pub y: M,
}

impl<M: MotionDriver> Gantry<M> {
    /// Set the constant/cruise speed of each axis
    pub fn set_speeds(&mut self, x: i32, y: i32) {
        self.x1.set_speed(x);
        self.x2.set_speed(x);
        self.y.set_speed(y);
    }

    /// Queue an absolute move on one axis
    pub fn move_to(&mut self, axis: Axis, target: i32) {
        match axis {
            Axis::X => {
                self.x1.move_to(target);
                self.x2.move_to(target);
            }
            Axis::Y => self.y.move_to(target),
        }
    }

    /// Queue a relative move on one axis
    pub fn move_by(&mut self, axis: Axis, offset: i32) {
        match axis {
            Axis::X => {
                self.x1.move_by(offset);
                self.x2.move_by(offset);
            }
            Axis::Y => self.y.move_by(offset),
        }
    }

    /// Advance one axis toward its queued target
    ///
    /// Returns true while the axis is still moving.
    pub fn run(&mut self, axis: Axis) -> bool {
        match axis {
            Axis::X => {
                // Both drivers must be polled every time
                let x1 = self.x1.run();
                let x2 = self.x2.run();
                x1 || x2
            }
            Axis::Y => self.y.run(),
        }
    }

    /// Advance one axis at its constant speed
    pub fn run_speed(&mut self, axis: Axis) {
        match axis {
            Axis::X => {
                self.x1.run_speed();
                self.x2.run_speed();
            }
            Axis::Y => {
                self.y.run_speed();
            }
        }
    }

    /// Advance every driver toward its queued target
    pub fn run_all(&mut self) -> bool {
        let x = self.run(Axis::X);
        let y = self.run(Axis::Y);
        x || y
    }

    /// Check if an axis has reached its queued target
    pub fn is_idle(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.x1.is_idle() && self.x2.is_idle(),
            Axis::Y => self.y.is_idle(),
        }
    }

    /// Check if every driver has reached its queued target
    pub fn all_idle(&self) -> bool {
        self.is_idle(Axis::X) && self.is_idle(Axis::Y)
    }

    /// Reported position of an axis
    pub fn position(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x1.current_position(),
            Axis::Y => self.y.current_position(),
        }
    }

    /// Make the current position the origin of every driver
    pub fn zero_all(&mut self) {
        self.x1.set_current_position(0);
        self.x2.set_current_position(0);
        self.y.set_current_position(0);
    }

    /// Drop any queued motion, holding every driver where it is
    pub fn stop_all(&mut self) {
        self.x1.stop();
        self.x2.stop();
        self.y.stop();
    }
}
