//! Movement state machine of the token.
//!
//! The token is either resting on a waypoint or transitioning between two of them. This module
//! holds that two-state machine and the progress arithmetic; deciding which moves are legal and
//! where the token is drawn mid-flight is the job of [`crate::engine`].

use crate::{geometry::Point, types::Direction};

/// Distance from a progress bound under which progress is snapped onto the bound.
///
/// Repeatedly adding a step such as `0.02` accumulates rounding error; snapping keeps the number
/// of ticks per transition at exactly `ceil(1 / step)`.
pub const PROGRESS_EPSILON: f64 = 1e-9;

/// An in-flight move between two waypoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Waypoint being left. Its segment is the one the token travels along.
    pub from: usize,
    /// Waypoint being approached.
    pub to: usize,
    /// Progress in `[0, 1]`, counting up going forward and down going backward.
    pub progress: f64,
    /// Which way progress runs.
    pub direction: Direction,
}

impl Transition {
    /// Whether progress has reached the bound for its direction.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        match self.direction {
            Direction::Forward => self.progress >= 1.,
            Direction::Backward => self.progress <= 0.,
        }
    }
}

/// The two states of the token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    /// Resting on a waypoint.
    Idle {
        /// The occupied waypoint.
        at: usize,
    },
    /// Moving between two waypoints.
    Transitioning(Transition),
}

/// Mutable traversal state: the current [`Phase`] and the token's render position.
///
/// While idle the position equals the anchor of the occupied waypoint; while transitioning it is
/// recomputed every tick by the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionState {
    /// Idle or transitioning.
    phase: Phase,
    /// Where the token is drawn.
    position: Point,
}

impl MotionState {
    /// Creates a state resting on waypoint `index` whose anchor is `anchor`.
    #[must_use]
    pub const fn at_rest(index: usize, anchor: Point) -> Self {
        Self {
            phase: Phase::Idle { at: index },
            position: anchor,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Render position of the token.
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    /// The last waypoint the token fully occupies.
    ///
    /// While transitioning this is the waypoint being left.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        match self.phase {
            Phase::Idle { at } => at,
            Phase::Transitioning(transition) => transition.from,
        }
    }

    /// The waypoint being approached, if a transition is in flight.
    #[must_use]
    pub const fn target_index(&self) -> Option<usize> {
        match self.phase {
            Phase::Idle { .. } => None,
            Phase::Transitioning(transition) => Some(transition.to),
        }
    }

    /// Progress of the in-flight transition, `0` while idle.
    #[must_use]
    pub const fn progress(&self) -> f64 {
        match self.phase {
            Phase::Idle { .. } => 0.,
            Phase::Transitioning(transition) => transition.progress,
        }
    }

    /// Direction of the in-flight transition.
    #[must_use]
    pub const fn direction(&self) -> Option<Direction> {
        match self.phase {
            Phase::Idle { .. } => None,
            Phase::Transitioning(transition) => Some(transition.direction),
        }
    }

    /// Whether a transition is in flight.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        matches!(self.phase, Phase::Transitioning(_))
    }

    /// Starts a transition from the current waypoint towards `to`.
    ///
    /// Progress starts at `0` going forward and at `1` going backward. Ignored while a transition
    /// is already in flight.
    pub(crate) fn begin(&mut self, to: usize, direction: Direction) {
        if let Phase::Idle { at } = self.phase {
            self.phase = Phase::Transitioning(Transition {
                from: at,
                to,
                progress: direction.initial_progress(),
                direction,
            });
        }
    }

    /// Moves progress by `step` in the transition's direction and returns the updated transition.
    ///
    /// Progress is clamped to `[0, 1]` and snapped onto the bound once within
    /// [`PROGRESS_EPSILON`] of it. Returns `None` while idle.
    pub(crate) fn step(&mut self, step: f64) -> Option<Transition> {
        let Phase::Transitioning(mut transition) = self.phase else {
            return None;
        };

        transition.progress = match transition.direction {
            Direction::Forward => {
                let progress = (transition.progress + step).min(1.);
                if 1. - progress < PROGRESS_EPSILON {
                    1.
                } else {
                    progress
                }
            }
            Direction::Backward => {
                let progress = (transition.progress - step).max(0.);
                if progress < PROGRESS_EPSILON {
                    0.
                } else {
                    progress
                }
            }
        };

        self.phase = Phase::Transitioning(transition);
        Some(transition)
    }

    /// Moves the token to `position` without touching the phase.
    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Ends the in-flight transition, resting the token at `anchor` of the target waypoint.
    ///
    /// Returns the waypoint landed on, or `None` if no transition was in flight.
    pub(crate) fn settle(&mut self, anchor: Point) -> Option<usize> {
        let Phase::Transitioning(transition) = self.phase else {
            return None;
        };

        self.phase = Phase::Idle { at: transition.to };
        self.position = anchor;
        Some(transition.to)
    }
}
