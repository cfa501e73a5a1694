//! Motion driver trait
//!
//! This trait abstracts over step/direction stepper drivers that keep
//! their own position bookkeeping and are advanced by polling.

/// Trait for polled stepper motion drivers
///
/// Nothing moves on its own: `run()` or `run_speed()` must be called
/// frequently (once per controller tick) to emit steps. Positions are in
/// steps, speeds in steps per second.
pub trait MotionDriver {
    /// Queue a move to an absolute position
    fn move_to(&mut self, position: i32);

    /// Queue a move relative to the current position
    fn move_by(&mut self, offset: i32) {
        let target = self.current_position().saturating_add(offset);
        self.move_to(target);
    }

    /// Set the speed in steps per second
    ///
    /// The sign selects the direction for constant-speed stepping
    /// (`run_speed`). The magnitude also caps the cruise speed of queued
    /// moves driven by `run`.
    fn set_speed(&mut self, steps_per_sec: i32);

    /// Advance at most one step toward the queued target
    ///
    /// Returns `true` while the target has not been reached.
    fn run(&mut self) -> bool;

    /// Advance at most one step at the constant speed, ignoring the target
    ///
    /// Returns `true` if a step was emitted.
    fn run_speed(&mut self) -> bool;

    /// Signed number of steps left to the queued target
    fn distance_to_go(&self) -> i32;

    /// Current position in steps
    fn current_position(&self) -> i32;

    /// Redefine the current position (the target follows it)
    fn set_current_position(&mut self, position: i32);

    /// Stop dead where the driver is, dropping any queued target and speed
    ///
    /// Unlike `move_to(current_position())`, no deceleration ramp follows.
    fn stop(&mut self) {
        let here = self.current_position();
        self.set_current_position(here);
    }

    /// Check if the queued target has been reached
    fn is_idle(&self) -> bool {
        self.distance_to_go() == 0
    }
}
