//! Manual jog controller
//!
//! One controller serves all three axes. X and Y accumulate an absolute
//! step target from encoder detents and chase it with the motion drivers;
//! Z drives the probe servo directly, one degree per detent.

use crate::config::JogConfig;
use crate::controller::Rig;
use crate::input::EncoderBaseline;
use crate::motion::Axis;
use crate::state::Event;
use crate::traits::actuator::{MAX_ANGLE_DEG, MIN_ANGLE_DEG};
use crate::traits::display::report;
use crate::traits::{Actuator, DigitalInput, DisplayDriver, DisplayExt, Encoder, MotionDriver};

/// Axis selected for jogging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JogAxis {
    X,
    Y,
    /// Probe servo
    Z,
}

impl JogAxis {
    /// Gantry axis behind this jog axis, `None` for the servo
    pub fn linear(&self) -> Option<Axis> {
        match self {
            JogAxis::X => Some(Axis::X),
            JogAxis::Y => Some(Axis::Y),
            JogAxis::Z => None,
        }
    }

    /// Panel text shown while jogging
    fn screen(&self) -> &'static [&'static str] {
        match self {
            JogAxis::X => &["Jog X (enc)", "Button = Back"],
            JogAxis::Y => &["Jog Y (enc)", "Button = Back"],
            JogAxis::Z => &["Jog Z (Servo)", "Rotate encoder", "Button = Back"],
        }
    }

    fn steps_per_detent(&self, config: &JogConfig) -> i32 {
        match self {
            JogAxis::X => config.steps_per_detent_x,
            JogAxis::Y => config.steps_per_detent_y,
            JogAxis::Z => 1,
        }
    }
}

/// Clamp an accumulated angle to what the servo accepts
pub fn clamp_angle(accumulated: i32) -> u8 {
    accumulated.clamp(i32::from(MIN_ANGLE_DEG), i32::from(MAX_ANGLE_DEG)) as u8
}

/// Jog controller for one axis
///
/// The target keeps accumulating past the servo limits so turning back
/// retraces the same path; only the commanded angle is clamped.
#[derive(Debug, Clone)]
pub struct Jog {
    axis: JogAxis,
    /// Steps (X, Y) or degrees (Z)
    target: i32,
    baseline: EncoderBaseline,
}

impl Jog {
    pub fn new(axis: JogAxis) -> Self {
        Self {
            axis,
            target: 0,
            baseline: EncoderBaseline::new(),
        }
    }

    /// Accumulated target in steps, or in degrees for Z
    pub fn target(&self) -> i32 {
        self.target
    }

    /// Seed the target, draw the panel and capture the encoder
    pub fn enter<M, E, D, A, I>(&mut self, rig: &mut Rig<M, E, D, A, I>, config: &JogConfig)
    where
        M: MotionDriver,
        E: Encoder,
        D: DisplayDriver,
        A: Actuator,
        I: DigitalInput,
    {
        self.target = match self.axis.linear() {
            Some(axis) => rig.gantry.position(axis),
            None => i32::from(config.neutral_z_deg),
        };
        self.baseline.reset(&mut rig.encoder);
        report(rig.display.show_lines(self.axis.screen()));
        debug!("jog {:?} from {}", self.axis, self.target);
    }

    /// Apply encoder movement and advance the axis by one tick
    ///
    /// Returns [`Event::Back`] on a button press.
    pub fn step<M, E, D, A, I>(
        &mut self,
        rig: &mut Rig<M, E, D, A, I>,
        config: &JogConfig,
        pressed: bool,
    ) -> Option<Event>
    where
        M: MotionDriver,
        E: Encoder,
        D: DisplayDriver,
        A: Actuator,
        I: DigitalInput,
    {
        let delta = self.baseline.delta(&mut rig.encoder);
        if delta != 0 {
            let step = delta.saturating_mul(self.axis.steps_per_detent(config));
            self.target = self.target.saturating_add(step);
        }

        match self.axis.linear() {
            Some(axis) => {
                if delta != 0 {
                    rig.gantry.move_to(axis, self.target);
                }
                rig.gantry.run(axis);
            }
            None => {
                if delta != 0 {
                    rig.probe.set_angle(clamp_angle(self.target));
                }
            }
        }

        if pressed {
            Some(Event::Back)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{commands, rig};
    use proptest::prelude::*;

    #[test]
    fn test_enter_seeds_from_position() {
        let mut rig = rig();
        rig.gantry.y.position = 120;
        let config = JogConfig::default();

        let mut jog = Jog::new(JogAxis::Y);
        jog.enter(&mut rig, &config);
        assert_eq!(jog.target(), 120);
        assert_eq!(rig.display.row(0).trim_end(), "Jog Y (enc)");
        assert_eq!(rig.display.row(1).trim_end(), "Button = Back");
    }

    #[test]
    fn test_x_moves_both_drivers() {
        let mut rig = rig();
        let config = JogConfig::default();
        let mut jog = Jog::new(JogAxis::X);
        jog.enter(&mut rig, &config);

        rig.encoder.turn(2);
        jog.step(&mut rig, &config, false);
        assert_eq!(rig.gantry.x1.target, 100);
        assert_eq!(rig.gantry.x2.target, 100);
        assert_eq!(rig.gantry.x1.position, 1);
        assert_eq!(rig.gantry.y.target, 0);
    }

    #[test]
    fn test_z_starts_at_neutral() {
        let mut rig = rig();
        let config = JogConfig::default();
        let mut jog = Jog::new(JogAxis::Z);
        jog.enter(&mut rig, &config);
        assert!(rig.display.shows("Rotate encoder"));
        assert_eq!(rig.probe.last(), None);

        rig.encoder.turn(-3);
        jog.step(&mut rig, &config, false);
        assert_eq!(rig.probe.last(), Some(87));
    }

    #[test]
    fn test_z_clamps_and_retraces() {
        let mut rig = rig();
        let config = JogConfig::default();
        let mut jog = Jog::new(JogAxis::Z);
        jog.enter(&mut rig, &config);

        rig.encoder.turn(100);
        jog.step(&mut rig, &config, false);
        assert_eq!(rig.probe.last(), Some(180));

        rig.encoder.turn(-5);
        jog.step(&mut rig, &config, false);
        assert_eq!(rig.probe.last(), Some(180));

        rig.encoder.turn(-10);
        jog.step(&mut rig, &config, false);
        assert_eq!(rig.probe.last(), Some(175));
    }

    #[test]
    fn test_idle_ticks_issue_nothing() {
        let mut rig = rig();
        let config = JogConfig::default();
        let mut jog = Jog::new(JogAxis::Y);
        jog.enter(&mut rig, &config);

        let before = commands(&rig);
        for _ in 0..10 {
            assert_eq!(jog.step(&mut rig, &config, false), None);
        }
        assert_eq!(commands(&rig), before);
    }

    #[test]
    fn test_press_goes_back() {
        let mut rig = rig();
        let config = JogConfig::default();
        let mut jog = Jog::new(JogAxis::X);
        jog.enter(&mut rig, &config);
        assert_eq!(jog.step(&mut rig, &config, true), Some(Event::Back));
    }

    proptest! {
        #[test]
        fn prop_jog_target_is_exact(
            start in -10_000i32..10_000,
            deltas in prop::collection::vec(-20i32..20, 0..40),
            batch in 1usize..5,
        ) {
            let config = JogConfig::default();
            let mut rig = rig();
            rig.gantry.y.position = start;
            rig.gantry.y.target = start;
            let mut jog = Jog::new(JogAxis::Y);
            jog.enter(&mut rig, &config);

            for chunk in deltas.chunks(batch) {
                rig.encoder.turn(chunk.iter().sum());
                jog.step(&mut rig, &config, false);
            }

            let total: i32 = deltas.iter().sum();
            let expected = start + config.steps_per_detent_y * total;
            prop_assert_eq!(jog.target(), expected);
            prop_assert_eq!(rig.gantry.y.target, expected);
        }

        #[test]
        fn prop_z_angle_stays_in_range(deltas in prop::collection::vec(-60i32..60, 1..40)) {
            let config = JogConfig::default();
            let mut rig = rig();
            let mut jog = Jog::new(JogAxis::Z);
            jog.enter(&mut rig, &config);

            let mut accumulated = i32::from(config.neutral_z_deg);
            for d in deltas {
                rig.encoder.turn(d);
                jog.step(&mut rig, &config, false);
                accumulated += d;

                prop_assert_eq!(jog.target(), accumulated);
                if d != 0 {
                    let angle = rig.probe.last().unwrap();
                    prop_assert!(angle <= 180);
                    prop_assert_eq!(i32::from(angle), accumulated.clamp(0, 180));
                }
            }
        }
    }
}
