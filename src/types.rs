//! Small shared enumerations for traversal and rendering.

/// Direction of an in-flight transition.
///
/// The direction decides how transition progress is read: forward progress counts up from `0` to
/// `1`, backward progress counts down from `1` to `0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards the next waypoint in visiting order.
    Forward,
    /// Back towards an already visited waypoint.
    Backward,
}

impl Direction {
    /// Returns `true` for [`Direction::Backward`], the flag segment interpolation expects.
    #[must_use]
    pub const fn is_reverse(self) -> bool {
        matches!(self, Self::Backward)
    }

    /// Progress value a transition in this direction starts from.
    #[must_use]
    pub const fn initial_progress(self) -> f64 {
        match self {
            Self::Forward => 0.,
            Self::Backward => 1.,
        }
    }
}

/// Visual class of a waypoint.
///
/// Every waypoint is drawn in exactly one of these classes, derived from the current waypoint and
/// the set of visited waypoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaypointClass {
    /// The waypoint the token currently occupies or is leaving.
    Current,
    /// A waypoint reached earlier in the session, other than the current one.
    Visited,
    /// A waypoint not yet reached.
    Unvisited,
}
