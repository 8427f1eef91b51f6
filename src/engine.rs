//! Traversal engine module.
//!
//! This module contains the [`TraversalController`], which owns the motion state and the visited
//! set of one game session. It validates move requests against the visiting rules, advances the
//! token along the course on every animation tick, and raises the completion flag.

use std::time::Duration;

use log::{debug, info};

use crate::{
    course::{PathError, PathGraph},
    geometry::Point,
    tracking::VisitedSet,
    transition::{MotionState, Phase},
    types::{Direction, WaypointClass},
};

/// Default per-tick progress delta.
///
/// At sixty ticks per second a transition takes fifty ticks, a little under a second.
pub const DEFAULT_STEP: f64 = 0.02;

/// Why a move request was turned down.
///
/// Rejections are ordinary, unsuccessful player input rather than failures; they exist so callers
/// can log them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// A transition is in flight; the request is dropped, not queued.
    InTransition,
    /// The target is the waypoint the token already rests on.
    AlreadyThere,
    /// The target is not a waypoint of the course.
    OutOfRange,
    /// The target lies more than one waypoint ahead.
    SkipsAhead,
    /// The target lies behind but has never been visited.
    ///
    /// Forward moves are single steps, so a session driven through [`TraversalController`] has
    /// visited every waypoint below the current one; this guards motion states restored from
    /// elsewhere.
    NotVisited,
}

/// Result of a move request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// A transition in the given direction has begun.
    Started(Direction),
    /// Nothing changed.
    Rejected(Rejection),
}

/// What a tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// No transition was in flight; nothing changed.
    Idle,
    /// The token moved along its segment and is still travelling.
    Moving,
    /// The token reached the given waypoint and is now resting on it.
    Arrived(usize),
}

/// Owner of the mutable state of one game session.
///
/// The course is injected at construction and never changes. Motion state, visited set and the
/// completion flag are written only through [`try_move`](TraversalController::try_move),
/// [`advance`](TraversalController::advance) and [`reset`](TraversalController::reset), each of
/// which runs to completion before the next call.
#[derive(Clone, Debug, PartialEq)]
pub struct TraversalController {
    /// The immutable course.
    path: PathGraph,
    /// Idle/transitioning state and the token position.
    motion: MotionState,
    /// Waypoints occupied so far.
    visited: VisitedSet,
    /// Raised once every waypoint is visited and the token rests on the last one.
    completed: bool,
}

impl TraversalController {
    /// Starts a session on `path`, with the token resting on the first waypoint.
    #[must_use]
    pub fn new(path: PathGraph) -> Self {
        let motion = MotionState::at_rest(0, path.start().anchor());

        Self {
            path,
            motion,
            visited: VisitedSet::new(),
            completed: false,
        }
    }

    /// The course being travelled.
    #[must_use]
    pub const fn path(&self) -> &PathGraph {
        &self.path
    }

    /// Current motion state.
    #[must_use]
    pub const fn motion(&self) -> &MotionState {
        &self.motion
    }

    /// Waypoints visited this session.
    #[must_use]
    pub const fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Where the token is drawn.
    #[must_use]
    pub const fn position(&self) -> Point {
        self.motion.position()
    }

    /// Whether the course has been completed this session.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Visual class of the waypoint at `index`.
    #[must_use]
    pub fn classify(&self, index: usize) -> WaypointClass {
        if index == self.motion.current_index() {
            WaypointClass::Current
        } else if self.visited.contains(index) {
            WaypointClass::Visited
        } else {
            WaypointClass::Unvisited
        }
    }

    /// Requests a move of the token to the waypoint at `target`.
    ///
    /// While idle on waypoint `k`, a move starts if `target == k + 1` (forward, progress from
    /// `0`), or if `target < k` and `target` has been visited (backward, progress from `1`).
    /// Every other request, and every request while a transition is in flight, leaves the state
    /// untouched and is reported as [`MoveOutcome::Rejected`].
    pub fn try_move(&mut self, target: usize) -> MoveOutcome {
        let outcome = self.judge_move(target);

        match outcome {
            MoveOutcome::Started(direction) => {
                info!(
                    "moving {direction:?} from waypoint {} to waypoint {}",
                    self.motion.current_index() + 1,
                    target + 1
                );
                self.motion.begin(target, direction);
            }
            MoveOutcome::Rejected(reason) => {
                debug!("move to waypoint index {target} rejected: {reason:?}");
            }
        }

        outcome
    }

    /// Applies the visiting rules to a move request without changing anything.
    fn judge_move(&self, target: usize) -> MoveOutcome {
        let Phase::Idle { at } = self.motion.phase() else {
            return MoveOutcome::Rejected(Rejection::InTransition);
        };

        if target == at {
            MoveOutcome::Rejected(Rejection::AlreadyThere)
        } else if target >= self.path.waypoint_count() {
            MoveOutcome::Rejected(Rejection::OutOfRange)
        } else if target == at + 1 {
            MoveOutcome::Started(Direction::Forward)
        } else if target > at {
            MoveOutcome::Rejected(Rejection::SkipsAhead)
        } else if self.visited.contains(target) {
            MoveOutcome::Started(Direction::Backward)
        } else {
            MoveOutcome::Rejected(Rejection::NotVisited)
        }
    }

    /// Advances the in-flight transition by `step` units of progress.
    ///
    /// The token is placed on the interpolated point of the departing waypoint's segment. Once
    /// progress reaches its bound the token snaps onto the target anchor, the target is marked
    /// visited, and the completion flag is raised if every waypoint has been visited and the token
    /// rests on the last one. A tick while idle, or with a step that is not a positive number,
    /// changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::IndexOutOfRange`] only if the motion state refers to a waypoint the
    /// course does not have, which the controller never produces.
    pub fn advance(&mut self, step: f64) -> Result<Advance, PathError> {
        if step.is_nan() || step <= 0. {
            debug!("ignoring non-positive step {step}");
            return Ok(if self.motion.is_moving() {
                Advance::Moving
            } else {
                Advance::Idle
            });
        }

        let Some(transition) = self.motion.step(step) else {
            return Ok(Advance::Idle);
        };

        let position = self.path.interpolate_along_segment(
            transition.from,
            transition.progress,
            transition.direction.is_reverse(),
        )?;
        self.motion.set_position(position);

        if !transition.is_finished() {
            return Ok(Advance::Moving);
        }

        let anchor = self.path.waypoint_at(transition.to)?.anchor();
        let _ = self.motion.settle(anchor);
        if self.visited.insert(transition.to) {
            debug!("waypoint {} visited for the first time", transition.to + 1);
        }
        info!("token arrived at waypoint {}", transition.to + 1);

        if !self.completed
            && self.visited.covers(self.path.waypoint_count())
            && self.motion.current_index() == self.path.last_index()
        {
            self.completed = true;
            info!("course completed");
        }

        Ok(Advance::Arrived(transition.to))
    }

    /// Advances by the progress `speed` units per second covers in `elapsed`.
    ///
    /// This is the frame-rate independent counterpart of [`advance`](TraversalController::advance).
    ///
    /// # Errors
    ///
    /// Same as [`advance`](TraversalController::advance).
    pub fn advance_for(&mut self, elapsed: Duration, speed: f64) -> Result<Advance, PathError> {
        self.advance(speed * elapsed.as_secs_f64())
    }

    /// Returns the session to its starting state: resting on waypoint `0`, only waypoint `0`
    /// visited, completion flag cleared.
    pub fn reset(&mut self) {
        self.motion = MotionState::at_rest(0, self.path.start().anchor());
        self.visited.reset();
        self.completed = false;
        info!("session reset");
    }
}
