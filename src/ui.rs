//! User interface rendering functions for the board, the status line and the completion overlay.

use color_eyre::eyre::Result;
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::{Marker, DOT},
    text::Line,
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{engine::TraversalController, types::WaypointClass, viewport::Viewport, App};

/// Radius of a waypoint circle, in course units.
const WAYPOINT_RADIUS: f64 = 25.;

/// Radius of the token circle, in course units.
const TOKEN_RADIUS: f64 = 10.;

/// Label of the restart button, padded so the highlight extends past the text.
const RESTART_LABEL: &str = " Restart ";

/// Hint shown while the player can still move.
const PLAYING_HINT: &str = "click a red waypoint to advance, a blue one to rewind";

/// Updates the application UI based on the persistent state.
///
/// This function draws the board with the course and the token, the status line under it, and the
/// completion overlay once every waypoint has been visited. It also records where the board and
/// the restart button ended up, so mouse input can be mapped back onto them.
///
/// # Errors
///
/// This function may return errors if the token rests on a waypoint missing from the course.
pub(crate) fn draw(app: &mut App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let [board_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(2)]).areas(frame.area());

    board(app, frame, board_area);
    status(app, frame, status_area)?;

    app.restart_button = app
        .controller
        .is_completed()
        .then(|| completion_overlay(frame));

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Color of a waypoint circle for its classification.
const fn class_color(class: WaypointClass) -> Color {
    match class {
        WaypointClass::Current => Color::LightGreen,
        WaypointClass::Visited => Color::LightBlue,
        WaypointClass::Unvisited => Color::Red,
    }
}

/// Canvas shapes for a whole frame, computed before painting.
struct Scene {
    /// Straight pieces of every segment, in canvas coordinates.
    lines: Vec<CanvasLine>,
    /// Waypoint circles with their labels.
    waypoints: Vec<(Circle, String)>,
    /// The token.
    token: Circle,
}

impl Scene {
    /// Collects the shapes describing the controller's current state.
    fn new(controller: &TraversalController) -> Self {
        let lines = controller
            .path()
            .waypoints()
            .iter()
            .flat_map(|waypoint| waypoint.segment_to_next().windows(2))
            .filter_map(|pair| pair.first().zip(pair.last()))
            .map(|(start, end)| {
                let (x1, y1) = Viewport::to_canvas(*start);
                let (x2, y2) = Viewport::to_canvas(*end);
                CanvasLine::new(x1, y1, x2, y2, Color::DarkGray)
            })
            .collect();

        let waypoints = controller
            .path()
            .waypoints()
            .iter()
            .map(|waypoint| {
                let (x, y) = Viewport::to_canvas(waypoint.anchor());
                let circle = Circle {
                    x,
                    y,
                    radius: WAYPOINT_RADIUS,
                    color: class_color(controller.classify(waypoint.index())),
                };
                (circle, waypoint.display_number().to_string())
            })
            .collect();

        let (x, y) = Viewport::to_canvas(controller.position());
        let token = Circle {
            x,
            y,
            radius: TOKEN_RADIUS,
            color: Color::Blue,
        };

        Self {
            lines,
            waypoints,
            token,
        }
    }
}

/// Renders the board block and the course canvas inside it.
///
/// The canvas keeps the board's proportions; the area it lands on is stored as the app's viewport.
fn board(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::bordered()
        .title("Waypointer")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(area);
    frame.render_widget(block, area);

    app.viewport = Viewport::fit(inner_space);

    let scene = Scene::new(&app.controller);
    let canvas = Canvas::default()
        .x_bounds(Viewport::x_bounds())
        .y_bounds(Viewport::y_bounds())
        .marker(Marker::Braille)
        .paint(|ctx| {
            for line in &scene.lines {
                ctx.draw(line);
            }
            ctx.layer();

            for (circle, label) in &scene.waypoints {
                ctx.draw(circle);
                ctx.print(
                    circle.x,
                    circle.y,
                    Line::styled(label.clone(), Style::default().fg(circle.color)),
                );
            }
            ctx.layer();

            ctx.draw(&scene.token);
        });

    frame.render_widget(canvas, app.viewport.area);
}

/// Renders the status line with the current position and a hint.
///
/// # Errors
///
/// This function may return errors if the token rests on a waypoint missing from the course.
fn status(app: &App, frame: &mut Frame, area: Rect) -> Result<()> {
    let block = Block::bordered()
        .title("(1-9) waypoint / (r) restart / (q) quit")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    let controller = &app.controller;
    let current = controller
        .path()
        .waypoint_at(controller.motion().current_index())?;

    let hint = if controller.is_completed() {
        "course complete"
    } else if controller.motion().is_moving() {
        "moving"
    } else {
        PLAYING_HINT
    };

    let text = Line::raw(format!(
        "Current position: {} {DOT} {hint}",
        current.display_number()
    ))
    .centered();

    let inner_space = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(text, inner_space);

    Ok(())
}

/// Renders the completion popup and returns the cells of its restart button.
fn completion_overlay(frame: &mut Frame) -> Rect {
    let [popup] = Layout::vertical([Constraint::Length(5)])
        .flex(Flex::Center)
        .areas(frame.area());
    let [popup] = Layout::horizontal([Constraint::Length(36)])
        .flex(Flex::Center)
        .areas(popup);

    let block = Block::bordered()
        .title("Course complete")
        .title_bottom("(enter) restart")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let [message, _, button_row] = Layout::vertical([Constraint::Length(1); 3]).areas(inner_space);
    let [button] = Layout::horizontal([Constraint::Length(9)])
        .flex(Flex::Center)
        .areas(button_row);

    frame.render_widget(Line::raw("Every waypoint visited!").centered(), message);
    frame.render_widget(
        Line::raw(RESTART_LABEL).style(Style::default().fg(Color::White).bg(Color::Green)),
        button,
    );

    button
}
