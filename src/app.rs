//! Core application state and main loop of the game.

use std::time::Instant;

use color_eyre::eyre::Result;
use log::debug;
use ratatui::{
    layout::{Position, Rect},
    DefaultTerminal,
};

use crate::{
    config::Config,
    course::PathGraph,
    engine::{Advance, TraversalController},
    events, ui,
    viewport::Viewport,
};

/// Application state container for the game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui renders the board and to which Crossterm events are dispatched.
pub struct App {
    /// Application exit flag.
    ///
    /// Set to `true` when the user asks to quit; the main loop returns once it is.
    pub(crate) exit: bool,
    /// Runtime settings from the command line.
    pub(crate) config: Config,
    /// Traversal state of the current session.
    ///
    /// This field owns the course, the token's motion state, the visited waypoints and the
    /// completion flag. Nothing else in the application writes to them.
    pub(crate) controller: TraversalController,
    /// Terminal area the board was drawn into during the last frame.
    ///
    /// Mouse positions are translated into course units through it, so clicks always refer to
    /// what is on screen.
    pub(crate) viewport: Viewport,
    /// Cells of the restart button, while the completion overlay is on screen.
    pub(crate) restart_button: Option<Rect>,
    /// When the animation was last advanced.
    pub(crate) last_tick: Instant,
}

impl App {
    /// Creates a new instance of the App structure on the built-in course.
    ///
    /// # Errors
    ///
    /// This function may return an error if the built-in course fails validation.
    pub fn new(config: Config) -> Result<Self> {
        let controller = TraversalController::new(PathGraph::builtin()?);

        Ok(Self {
            exit: false,
            config,
            controller,
            viewport: Viewport::default(),
            restart_button: None,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main loop of the application.
    ///
    /// This function draws a frame, then waits for input until the next animation tick is due.
    /// The loop continues until the exit flag is set, after which the function returns to the
    /// call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ =
                terminal.try_draw(|frame| ui::draw(self, frame).map_err(std::io::Error::other))?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Advances the animation if a tick interval has passed since the last one.
    ///
    /// With `--speed` the step is derived from the wall time elapsed since the previous tick;
    /// otherwise the fixed `--step` is used.
    ///
    /// # Errors
    ///
    /// This function may return errors if the traversal engine refers to a missing waypoint.
    pub(crate) fn tick(&mut self) -> Result<()> {
        let elapsed = self.last_tick.elapsed();
        if elapsed < self.config.tick_interval() {
            return Ok(());
        }
        self.last_tick = Instant::now();

        let advance = match self.config.speed {
            Some(speed) => self.controller.advance_for(elapsed, speed)?,
            None => self.controller.advance(self.config.step)?,
        };
        if let Advance::Arrived(index) = advance {
            debug!("tick landed on waypoint index {index}");
        }

        Ok(())
    }

    /// Handles a mouse press on the terminal cell at `position`.
    ///
    /// While the completion overlay is shown, a press on its restart button resets the session.
    /// Any other press is translated onto the board and, if it lands on a waypoint, requested as
    /// a move.
    pub(crate) fn click(&mut self, position: Position) {
        if self.controller.is_completed()
            && self
                .restart_button
                .is_some_and(|button| button.contains(position))
        {
            self.reset();
            return;
        }

        let Some(point) = self.viewport.to_board(position) else {
            return;
        };
        if let Some(index) = self
            .controller
            .path()
            .hit_test(point, self.config.hit_radius)
        {
            let _ = self.controller.try_move(index);
        }
    }

    /// Requests a move to the waypoint labelled `display_number`.
    pub(crate) fn select(&mut self, display_number: usize) {
        if let Some(index) = display_number.checked_sub(1) {
            let _ = self.controller.try_move(index);
        }
    }

    /// Starts the session over.
    pub(crate) fn reset(&mut self) {
        self.controller.reset();
        self.restart_button = None;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::transition::Phase;

    /// Creates an app with default settings.
    fn create_test_app() -> App {
        App::new(Config::default()).expect("built-in course should be valid")
    }

    /// Pretends the previous tick happened long enough ago for the next one to run.
    fn backdate_tick(app: &mut App) {
        app.last_tick = Instant::now()
            .checked_sub(Duration::from_secs(1))
            .expect("clock should be past one second");
    }

    #[test]
    fn test_new_app() {
        let app = create_test_app();

        assert!(!app.exit);
        assert_eq!(app.controller.motion().phase(), Phase::Idle { at: 0 });
        assert_eq!(app.restart_button, None);
    }

    #[test]
    fn test_tick_waits_for_interval() {
        let mut app = create_test_app();
        app.config.tick_rate = 60_000;
        app.select(2);
        app.last_tick = Instant::now();

        app.tick().expect("tick should succeed");

        assert!(app.controller.motion().progress().abs() < f64::EPSILON);
    }

    #[test]
    fn test_tick_advances_by_step() {
        let mut app = create_test_app();
        app.select(2);
        backdate_tick(&mut app);

        app.tick().expect("tick should succeed");

        assert!((app.controller.motion().progress() - app.config.step).abs() < 1e-12);
    }

    #[test]
    fn test_tick_with_speed_uses_elapsed_time() {
        let mut app = create_test_app();
        app.config.speed = Some(2.);
        app.select(2);
        backdate_tick(&mut app);

        app.tick().expect("tick should succeed");

        assert_eq!(app.controller.motion().phase(), Phase::Idle { at: 1 });
    }

    #[test]
    fn test_select_uses_display_numbers() {
        let mut app = create_test_app();

        app.select(0);
        assert!(!app.controller.motion().is_moving());

        app.select(3);
        assert!(!app.controller.motion().is_moving());

        app.select(2);
        assert_eq!(app.controller.motion().target_index(), Some(1));
    }

    #[test]
    fn test_click_outside_board_is_ignored() {
        let mut app = create_test_app();
        app.viewport = Viewport {
            area: Rect::new(10, 0, 35, 45),
        };

        app.click(Position::new(0, 0));

        assert_eq!(app.controller.motion().phase(), Phase::Idle { at: 0 });
    }

    #[test]
    fn test_click_on_waypoint_moves() {
        let mut app = create_test_app();
        app.viewport = Viewport {
            area: Rect::new(0, 0, 35, 45),
        };

        // Cell (25, 4) covers board point (255, 45), next to waypoint 2 at (250, 50).
        app.click(Position::new(25, 4));

        assert_eq!(app.controller.motion().target_index(), Some(1));
    }

    #[test]
    fn test_reset_clears_restart_button() {
        let mut app = create_test_app();
        app.restart_button = Some(Rect::new(0, 0, 5, 1));
        app.select(2);

        app.reset();

        assert_eq!(app.restart_button, None);
        assert_eq!(app.controller.motion().phase(), Phase::Idle { at: 0 });
    }
}
