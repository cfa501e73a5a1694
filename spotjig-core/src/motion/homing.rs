//! Limit-switch homing
//!
//! Drives Y, then X, into their limit switches at constant speed, makes
//! that point the origin and backs both axes off the switches. Each call to
//! [`Homing::step`] does one tick of work so the controller keeps polling.

use crate::config::HomingConfig;
use crate::traits::{DigitalInput, MotionDriver};

use super::gantry::{Axis, Gantry};

/// Homing phases, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingPhase {
    /// Not started
    #[default]
    Idle,
    /// Y moving toward its switch at constant speed
    SeekY,
    /// Both X drivers moving toward the X switch at constant speed
    SeekX,
    /// Switch positions become the origin
    ZeroAxes,
    /// X backing off its switch
    BackoffX,
    /// Y backing off its switch
    BackoffY,
    /// Homed; absolute positions are trustworthy
    Done,
    /// A phase ran out of ticks
    Fault,
}

impl HomingPhase {
    /// Short name for the operator panel
    pub fn label(&self) -> &'static str {
        match self {
            HomingPhase::Idle => "Idle",
            HomingPhase::SeekY => "Seek Y",
            HomingPhase::SeekX => "Seek X",
            HomingPhase::ZeroAxes => "Zero axes",
            HomingPhase::BackoffX => "Backoff X",
            HomingPhase::BackoffY => "Backoff Y",
            HomingPhase::Done => "Done",
            HomingPhase::Fault => "Fault",
        }
    }
}

/// Homing fault: the named phase exceeded its tick budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HomingFault {
    pub phase: HomingPhase,
}

/// Homing sequencer
#[derive(Debug, Clone, Default)]
pub struct Homing {
    phase: HomingPhase,
    /// Ticks spent in the current phase
    phase_ticks: u32,
    fault: Option<HomingFault>,
}

impl Homing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase
    pub fn phase(&self) -> HomingPhase {
        self.phase
    }

    /// Check if homing finished successfully
    pub fn is_done(&self) -> bool {
        self.phase == HomingPhase::Done
    }

    /// Check if homing is still moving
    pub fn is_active(&self) -> bool {
        !matches!(
            self.phase,
            HomingPhase::Idle | HomingPhase::Done | HomingPhase::Fault
        )
    }

    /// Fault of the last run, if it failed
    pub fn fault(&self) -> Option<HomingFault> {
        self.fault
    }

    /// Start homing from the Y seek
    pub fn start<M: MotionDriver>(&mut self, gantry: &mut Gantry<M>, config: &HomingConfig) {
        info!("homing started");
        self.fault = None;
        gantry.stop_all();
        gantry.y.set_speed(config.seek_speed_y);
        self.enter(HomingPhase::SeekY);
    }

    /// Do one tick of homing work
    ///
    /// Returns the phase after the step. Does nothing once homing is done
    /// or has faulted.
    pub fn step<M, X, Y>(
        &mut self,
        gantry: &mut Gantry<M>,
        limit_x: &mut X,
        limit_y: &mut Y,
        config: &HomingConfig,
    ) -> HomingPhase
    where
        M: MotionDriver,
        X: DigitalInput,
        Y: DigitalInput,
    {
        match self.phase {
            HomingPhase::Idle | HomingPhase::Done | HomingPhase::Fault => return self.phase,

            HomingPhase::SeekY => {
                if limit_y.is_active() {
                    debug!("Y limit reached");
                    gantry.x1.set_speed(config.seek_speed_x);
                    gantry.x2.set_speed(config.seek_speed_x);
                    self.enter(HomingPhase::SeekX);
                    return self.phase;
                }
                gantry.run_speed(Axis::Y);
            }

            HomingPhase::SeekX => {
                if limit_x.is_active() {
                    debug!("X limit reached");
                    self.enter(HomingPhase::ZeroAxes);
                    return self.phase;
                }
                gantry.run_speed(Axis::X);
            }

            HomingPhase::ZeroAxes => {
                gantry.zero_all();
                gantry.move_by(Axis::X, config.backoff_x);
                self.enter(HomingPhase::BackoffX);
                return self.phase;
            }

            HomingPhase::BackoffX => {
                if !gantry.run(Axis::X) && gantry.is_idle(Axis::X) {
                    gantry.move_by(Axis::Y, config.backoff_y);
                    self.enter(HomingPhase::BackoffY);
                    return self.phase;
                }
            }

            HomingPhase::BackoffY => {
                if !gantry.run(Axis::Y) && gantry.is_idle(Axis::Y) {
                    info!("homing complete");
                    self.enter(HomingPhase::Done);
                    return self.phase;
                }
            }
        }

        self.phase_ticks = self.phase_ticks.saturating_add(1);
        if self.phase_ticks >= config.timeout_ticks {
            let fault = HomingFault { phase: self.phase };
            error!("homing fault in phase {:?}", self.phase);
            gantry.stop_all();
            self.fault = Some(fault);
            self.enter(HomingPhase::Fault);
        }
        self.phase
    }

    fn enter(&mut self, phase: HomingPhase) {
        debug!("homing phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.phase_ticks = 0;
    }
}
