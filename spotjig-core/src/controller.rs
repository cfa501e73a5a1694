//! Main controller coordinating modes, menus and sequencers
//!
//! The controller is the central brain that:
//! - Samples the button once per tick
//! - Runs the handler of the active mode
//! - Applies mode transitions through exit/enter actions
//! - Keeps the operator panel in step with the mode

use crate::config::JigConfig;
use crate::input::ButtonEdge;
use crate::menu::{Menu, AUTO_MENU, MAIN_MENU, MANUAL_MENU};
use crate::motion::{Gantry, Homing, HomingPhase};
use crate::sequencer::{AutoRun, Jog, JogAxis};
use crate::state::{Event, Mode};
use crate::traits::display::report;
use crate::traits::{
    Actuator, DigitalInput, DisplayDriver, DisplayExt, Encoder, MotionDriver, DISPLAY_ROWS,
};

/// Hardware the controller drives
///
/// `I` is shared by the button and both limit switches; all three report
/// "pressed/triggered" as active.
pub struct Rig<M, E, D, A, I> {
    pub gantry: Gantry<M>,
    pub encoder: E,
    pub display: D,
    pub probe: A,
    pub button: I,
    pub limit_x: I,
    pub limit_y: I,
}

/// One-shot status shown under the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notice {
    AutoComplete,
    AutoAborted,
    HomingFault,
}

impl Notice {
    pub fn text(&self) -> &'static str {
        match self {
            Notice::AutoComplete => "Auto complete",
            Notice::AutoAborted => "Auto aborted",
            Notice::HomingFault => "Homing fault",
        }
    }
}

/// Controller state for coordinating modes and sequencers
pub struct Controller<M, E, D, A, I> {
    rig: Rig<M, E, D, A, I>,
    config: JigConfig,
    /// Current top-level mode
    mode: Mode,
    button: ButtonEdge,
    main_menu: Menu<Event>,
    auto_menu: Menu<Event>,
    manual_menu: Menu<Event>,
    homing: Homing,
    auto_run: AutoRun,
    jog: Jog,
    /// Shown the next time the main menu is entered
    notice: Option<Notice>,
}

impl<M, E, D, A, I> Controller<M, E, D, A, I>
where
    M: MotionDriver,
    E: Encoder,
    D: DisplayDriver,
    A: Actuator,
    I: DigitalInput,
{
    /// Create a controller over a rig
    ///
    /// Nothing is drawn or moved until [`Controller::initialize`].
    pub fn new(rig: Rig<M, E, D, A, I>, config: JigConfig) -> Self {
        Self {
            rig,
            config,
            mode: Mode::MainMenu,
            button: ButtonEdge::new(),
            main_menu: Menu::new(&MAIN_MENU),
            auto_menu: Menu::new(&AUTO_MENU),
            manual_menu: Menu::new(&MANUAL_MENU),
            homing: Homing::new(),
            auto_run: AutoRun::new(),
            jog: Jog::new(JogAxis::X),
            notice: None,
        }
    }

    /// Start at the main menu
    pub fn initialize(&mut self) {
        info!("controller initialized");
        self.mode = Mode::MainMenu;
        self.auto_run.reset();
        self.enter(Mode::MainMenu);
    }

    /// One non-blocking advance of the active handler
    pub fn tick(&mut self) {
        let pressed = self.button.poll(&mut self.rig.button);

        let event = match self.mode {
            Mode::MainMenu => {
                self.main_menu
                    .update(&mut self.rig.encoder, &mut self.rig.display, pressed)
            }
            Mode::AutoMenu => self.auto_menu_tick(pressed),
            Mode::AutoRun => self.auto_run.step(&mut self.rig, &self.config, pressed),
            Mode::ManualMenu => {
                self.manual_menu
                    .update(&mut self.rig.encoder, &mut self.rig.display, pressed)
            }
            Mode::JogX | Mode::JogY | Mode::JogZ => {
                self.jog.step(&mut self.rig, &self.config.jog, pressed)
            }
        };

        if let Some(event) = event {
            self.dispatch(event);
        }
    }

    /// Get current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Get the configuration in use
    pub fn config(&self) -> &JigConfig {
        &self.config
    }

    pub fn rig(&self) -> &Rig<M, E, D, A, I> {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut Rig<M, E, D, A, I> {
        &mut self.rig
    }

    pub fn homing(&self) -> &Homing {
        &self.homing
    }

    pub fn auto_run(&self) -> &AutoRun {
        &self.auto_run
    }

    /// Pending main-menu notice
    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    /// Give the rig back
    pub fn release(self) -> Rig<M, E, D, A, I> {
        self.rig
    }

    /// Homing first, then the two-row menu
    fn auto_menu_tick(&mut self, pressed: bool) -> Option<Event> {
        if self.homing.is_active() {
            let phase = self.homing.step(
                &mut self.rig.gantry,
                &mut self.rig.limit_x,
                &mut self.rig.limit_y,
                &self.config.homing,
            );
            match phase {
                HomingPhase::Done => {
                    self.auto_menu
                        .enter(&mut self.rig.encoder, &mut self.rig.display);
                }
                HomingPhase::Fault => {
                    let label = self.homing.fault().map_or("", |f| f.phase.label());
                    report(
                        self.rig
                            .display
                            .show_lines(&["Homing fault", label, "Button = Back"]),
                    );
                    self.notice = Some(Notice::HomingFault);
                }
                _ => {}
            }
            // Presses during homing are ignored
            return None;
        }

        if self.homing.is_done() {
            self.auto_menu
                .update(&mut self.rig.encoder, &mut self.rig.display, pressed)
        } else if pressed {
            Some(Event::Back)
        } else {
            None
        }
    }

    fn dispatch(&mut self, event: Event) {
        let next = self.mode.transition(event);
        if next == self.mode {
            debug!("event {:?} ignored in {:?}", event, self.mode);
            return;
        }

        info!("mode {:?} -> {:?} on {:?}", self.mode, next, event);
        match event {
            Event::RunComplete => self.notice = Some(Notice::AutoComplete),
            Event::RunAborted => self.notice = Some(Notice::AutoAborted),
            _ => {}
        }

        self.exit(self.mode);
        self.mode = next;
        self.enter(next);
    }

    fn exit(&mut self, mode: Mode) {
        let display = &mut self.rig.display;
        match mode {
            Mode::MainMenu => self.main_menu.leave(display),
            Mode::AutoMenu => self.auto_menu.leave(display),
            Mode::ManualMenu => self.manual_menu.leave(display),
            Mode::AutoRun => self.auto_run.reset(),
            Mode::JogX | Mode::JogY | Mode::JogZ => {
                // Remaining jog motion is dropped
                self.rig.gantry.stop_all();
            }
        }
    }

    fn enter(&mut self, mode: Mode) {
        match mode {
            Mode::MainMenu => {
                self.main_menu
                    .enter(&mut self.rig.encoder, &mut self.rig.display);
                if let Some(notice) = self.notice.take() {
                    let display = &mut self.rig.display;
                    report(display.print_row(DISPLAY_ROWS as u8 - 1, notice.text()));
                    report(display.set_caret(self.main_menu.row() as u8, 0));
                }
            }
            Mode::AutoMenu => {
                report(self.rig.display.show_lines(&["Homing..."]));
                self.homing.start(&mut self.rig.gantry, &self.config.homing);
            }
            Mode::AutoRun => self.auto_run.reset(),
            Mode::ManualMenu => {
                self.manual_menu
                    .enter(&mut self.rig.encoder, &mut self.rig.display);
            }
            Mode::JogX | Mode::JogY | Mode::JogZ => {
                let axis = match mode {
                    Mode::JogX => JogAxis::X,
                    Mode::JogY => JogAxis::Y,
                    _ => JogAxis::Z,
                };
                self.jog = Jog::new(axis);
                self.jog.enter(&mut self.rig, &self.config.jog);
            }
        }
    }
}
