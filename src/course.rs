//! Course data and geometry module.
//!
//! This module contains the [`PathGraph`] and [`Waypoint`] types describing the fixed, ordered
//! sequence of numbered waypoints the token travels, the construction-time validation of their
//! segment geometry, and the interpolation of a position along a segment.

use thiserror::Error;

use crate::geometry::{lerp, Point};

/// Smallest number of waypoints a course may have.
pub const MIN_WAYPOINTS: usize = 2;

/// Upper bound for the effective fraction used to locate a sub-segment.
///
/// Keeping the fraction strictly below one keeps the sub-segment index inside the poly-line.
pub const MAX_FRACTION: f64 = 0.999;

/// Failures raised by course construction and waypoint lookup.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// A waypoint index outside `0..len` was requested.
    ///
    /// This is a contract violation on the caller's side; correct use of the engine never
    /// produces it.
    #[error("waypoint index {index} is out of range for a course of {len} waypoints")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of waypoints in the course.
        len: usize,
    },
    /// The course definition handed to [`PathGraph::new`] is malformed.
    #[error("invalid path definition: {0}")]
    InvalidPathDefinition(DefinitionFault),
}

/// Reasons a course definition is refused.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DefinitionFault {
    /// The course has fewer than [`MIN_WAYPOINTS`] waypoints.
    #[error("a course needs at least two waypoints, found {0}")]
    TooFewWaypoints(usize),
    /// A waypoint carries a segment without any point.
    #[error("waypoint {0} has an empty segment")]
    EmptySegment(usize),
    /// A waypoint's anchor or one of its segment points is NaN or infinite.
    #[error("waypoint {0} has a non-finite coordinate")]
    NonFiniteCoordinate(usize),
    /// A waypoint's segment does not begin at its anchor.
    #[error("the segment of waypoint {0} does not start at its anchor")]
    DetachedStart(usize),
    /// A non-final waypoint's segment does not end at the next waypoint's anchor.
    #[error("the segment of waypoint {0} does not end at the next anchor")]
    DetachedEnd(usize),
    /// The final waypoint's segment moves away from its anchor.
    #[error("the segment of final waypoint {0} leaves its anchor")]
    WanderingFinalSegment(usize),
}

impl From<DefinitionFault> for PathError {
    fn from(fault: DefinitionFault) -> Self {
        Self::InvalidPathDefinition(fault)
    }
}

/// A numbered, fixed-position stop on the course.
///
/// Waypoints are immutable once the owning [`PathGraph`] is built. Each one carries the poly-line
/// leading from its own anchor to the next waypoint's anchor; the final waypoint's poly-line never
/// leaves its anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct Waypoint {
    /// Zero-based position in the course, which is also its rank in the visiting order.
    index: usize,
    /// Where the waypoint is drawn and where the token rests on it.
    anchor: Point,
    /// Poly-line from [`anchor`](Waypoint::anchor) to the next waypoint's anchor.
    segment_to_next: Vec<Point>,
}

impl Waypoint {
    /// Zero-based index of the waypoint.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// One-based label shown to the player.
    #[must_use]
    pub const fn display_number(&self) -> usize {
        self.index + 1
    }

    /// Resting point of the waypoint.
    #[must_use]
    pub const fn anchor(&self) -> Point {
        self.anchor
    }

    /// The non-empty poly-line leading to the next waypoint.
    #[must_use]
    pub fn segment_to_next(&self) -> &[Point] {
        &self.segment_to_next
    }
}

/// Course of waypoints used as the board of one game session.
///
/// Segment geometry is built once from a hand-written table of poly-lines, mirroring the board
/// the game has always shipped with. The first point of each poly-line is the waypoint's anchor.
const BUILTIN_COURSE: [&[(f64, f64)]; 5] = [
    &[(100., 50.), (150., 30.), (200., 50.), (250., 50.)],
    &[(250., 50.), (280., 100.), (250., 150.), (250., 200.)],
    &[(250., 200.), (200., 250.), (150., 200.), (100., 200.)],
    &[(100., 200.), (80., 250.), (100., 300.), (100., 350.)],
    &[(100., 350.), (100., 350.)],
];

/// Ordered, immutable collection of waypoints.
///
/// This structure is the static half of the game: once built it is never mutated, and every
/// operation on it is a pure query. Construction validates the segment geometry so that queries
/// can rely on it without fallbacks.
#[derive(Clone, Debug, PartialEq)]
pub struct PathGraph {
    /// Waypoints in visiting order; `waypoints[i].index == i`.
    waypoints: Vec<Waypoint>,
}

impl PathGraph {
    /// Builds a course from `(anchor, segment)` pairs given in visiting order.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidPathDefinition`] when:
    /// - fewer than [`MIN_WAYPOINTS`] pairs are given
    /// - a segment is empty
    /// - an anchor or segment point is not finite
    /// - a segment does not start at its own anchor
    /// - a non-final segment does not end at the next anchor
    /// - the final segment contains any point other than its anchor
    pub fn new<I>(definition: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = (Point, Vec<Point>)>,
    {
        let definition: Vec<(Point, Vec<Point>)> = definition.into_iter().collect();
        if definition.len() < MIN_WAYPOINTS {
            return Err(DefinitionFault::TooFewWaypoints(definition.len()).into());
        }

        let next_anchors: Vec<Option<Point>> = definition
            .iter()
            .skip(1)
            .map(|&(anchor, _)| Some(anchor))
            .chain([None])
            .collect();

        let mut waypoints = Vec::with_capacity(definition.len());
        for ((index, (anchor, segment_to_next)), next_anchor) in
            definition.into_iter().enumerate().zip(next_anchors)
        {
            validate_segment(index, anchor, &segment_to_next, next_anchor)?;
            waypoints.push(Waypoint {
                index,
                anchor,
                segment_to_next,
            });
        }

        Ok(Self { waypoints })
    }

    /// Builds a course from poly-lines alone, taking each poly-line's first point as the anchor.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionFault::EmptySegment`] for a poly-line without points, and otherwise
    /// the same failures as [`PathGraph::new`].
    pub fn from_segments<I>(segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = Vec<Point>>,
    {
        let definition = segments
            .into_iter()
            .enumerate()
            .map(|(index, segment)| {
                segment
                    .first()
                    .copied()
                    .map(|anchor| (anchor, segment))
                    .ok_or(DefinitionFault::EmptySegment(index))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(definition)
    }

    /// Builds the five-waypoint course the game ships with.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in table is edited into an invalid course.
    pub fn builtin() -> Result<Self, PathError> {
        Self::from_segments(
            BUILTIN_COURSE
                .iter()
                .map(|segment| segment.iter().copied().map(Point::from).collect()),
        )
    }

    /// The starting waypoint, index `0`.
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "Construction refuses courses with fewer than two waypoints."
    )]
    pub fn start(&self) -> &Waypoint {
        &self.waypoints[0]
    }

    /// Number of waypoints in the course.
    #[must_use]
    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    /// Index of the final waypoint.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }

    /// All waypoints in visiting order.
    #[must_use]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Looks up the waypoint at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::IndexOutOfRange`] if `index` is not below
    /// [`waypoint_count`](PathGraph::waypoint_count).
    pub fn waypoint_at(&self, index: usize) -> Result<&Waypoint, PathError> {
        self.waypoints.get(index).ok_or(PathError::IndexOutOfRange {
            index,
            len: self.waypoints.len(),
        })
    }

    /// Finds the waypoint under `point`.
    ///
    /// Returns the lowest index whose anchor lies strictly closer than `radius` to `point`, so
    /// overlapping hit circles always resolve the same way.
    #[must_use]
    pub fn hit_test(&self, point: Point, radius: f64) -> Option<usize> {
        self.waypoints
            .iter()
            .position(|waypoint| waypoint.anchor.distance(point) < radius)
    }

    /// Position along the segment of the waypoint at `index` for the given `progress`.
    ///
    /// The poly-line is split into equal slices of progress, one per sub-segment, regardless of
    /// their physical length. Going forward, progress `0` is the first point and `1` the last.
    /// With `reverse`, progress counts down: `1` is the first point and `0` the last.
    /// Out-of-range `progress` is clamped.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::IndexOutOfRange`] for an unknown waypoint index.
    #[expect(
        clippy::indexing_slicing,
        reason = "Segments are non-empty and the sub-segment index stays below the last point."
    )]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "The scaled fraction is non-negative and below the sub-segment count."
    )]
    pub fn interpolate_along_segment(
        &self,
        index: usize,
        progress: f64,
        reverse: bool,
    ) -> Result<Point, PathError> {
        let points = self.waypoint_at(index)?.segment_to_next();
        let last = points.len() - 1;

        if last == 0 {
            return Ok(points[0]);
        }
        if (!reverse && progress >= 1.) || (reverse && progress <= 0.) {
            return Ok(points[last]);
        }

        let clamped = progress.clamp(0., 1.);
        let fraction = (if reverse { 1. - clamped } else { clamped }).min(MAX_FRACTION);

        let scaled = fraction * last as f64;
        let segment_index = (scaled.floor() as usize).min(last - 1);
        let local_t = scaled.fract();

        Ok(lerp(points[segment_index], points[segment_index + 1], local_t))
    }
}

/// Checks one waypoint's segment against the course invariants.
fn validate_segment(
    index: usize,
    anchor: Point,
    segment: &[Point],
    next_anchor: Option<Point>,
) -> Result<(), DefinitionFault> {
    let (Some(&first), Some(&last)) = (segment.first(), segment.last()) else {
        return Err(DefinitionFault::EmptySegment(index));
    };

    if !anchor.is_finite() || !segment.iter().all(|point| point.is_finite()) {
        return Err(DefinitionFault::NonFiniteCoordinate(index));
    }
    if first != anchor {
        return Err(DefinitionFault::DetachedStart(index));
    }

    match next_anchor {
        Some(next) if last != next => Err(DefinitionFault::DetachedEnd(index)),
        None if segment.iter().any(|&point| point != anchor) => {
            Err(DefinitionFault::WanderingFinalSegment(index))
        }
        _ => Ok(()),
    }
}
