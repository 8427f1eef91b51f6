//! Event handling functions for user input and animation ticks.

use color_eyre::eyre::Result;
use ratatui::{
    crossterm::event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
    },
    layout::Position,
};

use crate::App;

/// Waits for input until the next tick is due, dispatches it, then advances the animation.
///
/// This function polls for terminal events with a timeout equal to the time left before the next
/// animation tick, so the loop neither blocks the animation nor spins while idle.
///
/// # Errors
///
/// This function may return errors from reading terminal events or from the traversal engine.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    let timeout = app
        .config
        .tick_interval()
        .saturating_sub(app.last_tick.elapsed());

    if event::poll(timeout)? {
        dispatch(app, &event::read()?);
    }

    app.tick()
}

/// Routes a single terminal event to the matching handler.
pub(crate) fn dispatch(app: &mut App, event: &Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        _ => {}
    }
}

/// Handles key presses.
///
/// - `q` and `Esc` quit
/// - `r` restarts the session at any time, `Enter` restarts it once the course is complete
/// - digits `1` to `9` select the waypoint with that number, as a click on it would
pub(crate) fn handle_key(app: &mut App, key: &KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.exit = true,
        KeyCode::Char('r') => app.reset(),
        KeyCode::Enter if app.controller.is_completed() => app.reset(),
        KeyCode::Char(digit) => {
            if let Some(number) = digit
                .to_digit(10)
                .and_then(|number| usize::try_from(number).ok())
            {
                app.select(number);
            }
        }
        _ => {}
    }
}

/// Handles mouse input; only left button presses count as clicks.
pub(crate) fn handle_mouse(app: &mut App, mouse: &MouseEvent) {
    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
        app.click(Position::new(mouse.column, mouse.row));
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, crossterm::event::KeyModifiers, Terminal};

    use super::*;
    use crate::{
        config::Config,
        engine::DEFAULT_STEP,
        geometry::Point,
        transition::Phase,
        ui,
        viewport::{BOARD_HEIGHT, BOARD_WIDTH},
    };

    /// Creates an app with default settings.
    fn create_test_app() -> App {
        App::new(Config::default()).expect("built-in course should be valid")
    }

    /// Draws one frame so the app knows where the board is on screen.
    fn draw_once(app: &mut App) {
        let mut terminal =
            Terminal::new(TestBackend::new(80, 24)).expect("failed to create test terminal");
        let _ = terminal
            .draw(|frame| ui::draw(app, frame).expect("drawing should succeed in test"))
            .expect("terminal draw should succeed");
    }

    /// Key press event for `code`.
    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    /// Left mouse button press at `position`.
    fn left_click(position: Position) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: position.x,
            row: position.y,
            modifiers: KeyModifiers::NONE,
        })
    }

    /// Terminal cell whose center is closest to a board point.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Board points lie inside the board, so the cell offsets are small and positive."
    )]
    fn cell_of(app: &App, point: Point) -> Position {
        let area = app.viewport.area;
        let column = (point.x / f64::from(BOARD_WIDTH) * f64::from(area.width)).floor() as u16;
        let row = (point.y / f64::from(BOARD_HEIGHT) * f64::from(area.height)).floor() as u16;

        Position::new(
            area.x + column.min(area.width - 1),
            area.y + row.min(area.height - 1),
        )
    }

    /// Ticks the animation until the token rests again.
    fn drain(app: &mut App) {
        while app.controller.motion().is_moving() {
            let _ = app
                .controller
                .advance(DEFAULT_STEP)
                .expect("tick should succeed");
        }
    }

    /// Clicks the waypoint at `index` on screen.
    fn click_waypoint(app: &mut App, index: usize) {
        let anchor = app
            .controller
            .path()
            .waypoint_at(index)
            .expect("waypoint should exist")
            .anchor();
        let position = cell_of(app, anchor);
        dispatch(app, &left_click(position));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = create_test_app();
        dispatch(&mut app, &press(KeyCode::Char('q')));
        assert!(app.exit);

        let mut app = create_test_app();
        dispatch(&mut app, &press(KeyCode::Esc));
        assert!(app.exit);
    }

    #[test]
    fn test_digit_keys_select_waypoints() {
        let mut app = create_test_app();

        dispatch(&mut app, &press(KeyCode::Char('3')));
        assert!(!app.controller.motion().is_moving());

        dispatch(&mut app, &press(KeyCode::Char('0')));
        assert!(!app.controller.motion().is_moving());

        dispatch(&mut app, &press(KeyCode::Char('2')));
        assert_eq!(app.controller.motion().target_index(), Some(1));
    }

    #[test]
    fn test_reset_key() {
        let mut app = create_test_app();
        dispatch(&mut app, &press(KeyCode::Char('2')));
        drain(&mut app);

        dispatch(&mut app, &press(KeyCode::Char('r')));

        assert_eq!(app.controller.motion().phase(), Phase::Idle { at: 0 });
        assert_eq!(app.controller.visited().len(), 1);
    }

    #[test]
    fn test_enter_only_resets_completed_course() {
        let mut app = create_test_app();
        dispatch(&mut app, &press(KeyCode::Char('2')));
        drain(&mut app);

        dispatch(&mut app, &press(KeyCode::Enter));
        assert_eq!(app.controller.motion().phase(), Phase::Idle { at: 1 });

        for number in ['3', '4', '5'] {
            dispatch(&mut app, &press(KeyCode::Char(number)));
            drain(&mut app);
        }
        assert!(app.controller.is_completed());

        dispatch(&mut app, &press(KeyCode::Enter));
        assert!(!app.controller.is_completed());
        assert_eq!(app.controller.motion().phase(), Phase::Idle { at: 0 });
    }

    #[test]
    fn test_click_waypoints_through_course() {
        let mut app = create_test_app();
        draw_once(&mut app);

        click_waypoint(&mut app, 2);
        assert!(!app.controller.motion().is_moving(), "skipping ahead");

        for index in 1..=4 {
            click_waypoint(&mut app, index);
            assert_eq!(app.controller.motion().target_index(), Some(index));
            drain(&mut app);
        }
        assert!(app.controller.is_completed());

        click_waypoint(&mut app, 1);
        assert_eq!(app.controller.motion().target_index(), Some(1));
    }

    #[test]
    fn test_click_restart_button() {
        let mut app = create_test_app();
        for number in ['2', '3', '4', '5'] {
            dispatch(&mut app, &press(KeyCode::Char(number)));
            drain(&mut app);
        }
        draw_once(&mut app);

        let button = app.restart_button.expect("overlay should show a restart button");
        dispatch(&mut app, &left_click(Position::new(button.x, button.y)));

        assert!(!app.controller.is_completed());
        assert_eq!(app.controller.visited().len(), 1);
    }

    #[test]
    fn test_right_click_is_ignored() {
        let mut app = create_test_app();
        draw_once(&mut app);
        let anchor = app
            .controller
            .path()
            .waypoint_at(1)
            .expect("waypoint should exist")
            .anchor();
        let position = cell_of(&app, anchor);

        dispatch(
            &mut app,
            &Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Right),
                column: position.x,
                row: position.y,
                modifiers: KeyModifiers::NONE,
            }),
        );

        assert!(!app.controller.motion().is_moving());
    }
}
