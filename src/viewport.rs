//! Coordinate mapping between the board and the terminal.
//!
//! The board is authored in course units with the origin in the top-left corner and y growing
//! downward. Ratatui's canvas puts the origin in the bottom-left corner with y growing upward, and
//! mouse events report terminal cells, so both directions of the mapping live here.

use ratatui::layout::{Position, Rect};

use crate::geometry::Point;

/// Board width in course units.
pub(crate) const BOARD_WIDTH: u16 = 350;

/// Board height in course units.
pub(crate) const BOARD_HEIGHT: u16 = 450;

/// Ratio of a terminal cell's height to its width.
const CELL_ASPECT: i32 = 2;

/// Terminal area the board was last drawn into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Viewport {
    /// Cells covered by the board canvas.
    pub(crate) area: Rect,
}

impl Viewport {
    /// Fits the board into `available`, keeping its proportions and centering it.
    ///
    /// Cells are roughly twice as tall as they are wide, so the board gets about twice as many
    /// columns per course unit as it gets rows.
    pub(crate) fn fit(available: Rect) -> Self {
        let board_width = i32::from(BOARD_WIDTH) * CELL_ASPECT;
        let board_height = i32::from(BOARD_HEIGHT);

        let mut height = available.height;
        let width = clamp_cells(
            rounded_div::i32(i32::from(height) * board_width, board_height),
            available.width,
        );
        if width == available.width {
            height = clamp_cells(
                rounded_div::i32(i32::from(width) * board_height, board_width),
                available.height,
            );
        }

        Self {
            area: Rect {
                x: available.x + (available.width - width) / 2,
                y: available.y + (available.height - height) / 2,
                width,
                height,
            },
        }
    }

    /// Canvas x bounds covering the whole board.
    pub(crate) fn x_bounds() -> [f64; 2] {
        [0., f64::from(BOARD_WIDTH)]
    }

    /// Canvas y bounds covering the whole board.
    pub(crate) fn y_bounds() -> [f64; 2] {
        [0., f64::from(BOARD_HEIGHT)]
    }

    /// Canvas coordinates of a board point, flipping the y axis.
    pub(crate) fn to_canvas(point: Point) -> (f64, f64) {
        (point.x, f64::from(BOARD_HEIGHT) - point.y)
    }

    /// Board point under the center of the terminal cell at `position`.
    ///
    /// Returns `None` for cells outside the board area.
    pub(crate) fn to_board(&self, position: Position) -> Option<Point> {
        if !self.area.contains(position) {
            return None;
        }

        let column = f64::from(position.x - self.area.x) + 0.5;
        let row = f64::from(position.y - self.area.y) + 0.5;

        Some(Point::new(
            column * f64::from(BOARD_WIDTH) / f64::from(self.area.width),
            row * f64::from(BOARD_HEIGHT) / f64::from(self.area.height),
        ))
    }
}

/// Converts a cell count to `u16`, capped at `limit`.
fn clamp_cells(cells: i32, limit: u16) -> u16 {
    u16::try_from(cells.max(0)).map_or(limit, |cells| cells.min(limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_limited_by_height() {
        let viewport = Viewport::fit(Rect::new(0, 0, 80, 24));

        assert_eq!(viewport.area, Rect::new(21, 0, 37, 24));
    }

    #[test]
    fn test_fit_limited_by_width() {
        let viewport = Viewport::fit(Rect::new(2, 3, 14, 40));

        assert_eq!(viewport.area.width, 14);
        assert_eq!(viewport.area.height, 9);
        assert_eq!(viewport.area.x, 2);
        assert_eq!(viewport.area.y, 3 + (40 - 9) / 2);
    }

    #[test]
    fn test_fit_empty_area() {
        let viewport = Viewport::fit(Rect::new(5, 5, 0, 0));

        assert_eq!(viewport.area.width, 0);
        assert_eq!(viewport.area.height, 0);
        assert_eq!(viewport.to_board(Position::new(5, 5)), None);
    }

    #[test]
    fn test_to_canvas_flips_y() {
        assert_eq!(Viewport::to_canvas(Point::new(100., 50.)), (100., 400.));
        assert_eq!(Viewport::to_canvas(Point::new(0., 450.)), (0., 0.));
    }

    #[test]
    fn test_to_board_corners() {
        let viewport = Viewport {
            area: Rect::new(10, 4, 35, 45),
        };

        assert_eq!(
            viewport.to_board(Position::new(10, 4)),
            Some(Point::new(5., 5.))
        );
        assert_eq!(
            viewport.to_board(Position::new(44, 48)),
            Some(Point::new(345., 445.))
        );
        assert_eq!(viewport.to_board(Position::new(9, 4)), None);
        assert_eq!(viewport.to_board(Position::new(45, 4)), None);
        assert_eq!(viewport.to_board(Position::new(10, 49)), None);
    }
}
