//! Visited-waypoint bookkeeping.

use std::collections::BTreeSet;

/// Set of waypoint indices the token has occupied during the session.
///
/// The set always contains the starting waypoint `0`. It only grows while a session lasts and is
/// returned to `{0}` by [`reset`](VisitedSet::reset).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisitedSet {
    /// Visited indices, kept ordered for stable iteration.
    indices: BTreeSet<usize>,
}

impl Default for VisitedSet {
    fn default() -> Self {
        Self::new()
    }
}

impl VisitedSet {
    /// Creates the session-start set `{0}`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            indices: BTreeSet::from([0]),
        }
    }

    /// Whether `index` has been visited.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Records `index` as visited, returning `true` if it was not visited before.
    pub fn insert(&mut self, index: usize) -> bool {
        self.indices.insert(index)
    }

    /// Number of visited waypoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Always `false`: the starting waypoint is visited from the outset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Whether every index in `0..waypoint_count` has been visited.
    #[must_use]
    pub fn covers(&self, waypoint_count: usize) -> bool {
        self.indices.len() == waypoint_count
            && (0..waypoint_count).all(|index| self.indices.contains(&index))
    }

    /// Visited indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Returns the set to `{0}`.
    pub fn reset(&mut self) {
        self.indices.clear();
        let _ = self.indices.insert(0);
    }
}
