use std::fmt;

use super::{ApproxEq, Point, Rectangle, Vector};
use crate::error::{GeomError, Result};
use crate::scalar::{Scalar, Tolerance};

/// Closed segment between two distinct points.
///
/// Invariants:
/// - Both endpoints finite.
/// - `start` and `end` differ by more than the tolerance. The only way to hold a
///   degenerate segment is as the output of a collapsing transform, which flags it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "(Point, Point)", into = "(Point, Point)")
)]
pub struct LineSegment {
    start: Point,
    end: Point,
}

impl LineSegment {
    #[track_caller]
    pub fn new(start: Point, end: Point) -> Result<Self> {
        Self::with_tolerance(start, end, Tolerance::default())
    }

    #[track_caller]
    pub fn with_tolerance(start: Point, end: Point, tol: Tolerance) -> Result<Self> {
        start.ensure_finite()?;
        end.ensure_finite()?;
        if start.approx_eq(&end, tol) {
            return Err(GeomError::invalid(format!(
                "degenerate segment {start} -> {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Skips the degeneracy check; used by transforms and intersection results.
    #[inline]
    pub(crate) fn from_points_unchecked(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    #[track_caller]
    pub fn set_start(&mut self, start: Point) -> Result<()> {
        *self = Self::new(start, self.end)?;
        Ok(())
    }

    #[track_caller]
    pub fn set_end(&mut self, end: Point) -> Result<()> {
        *self = Self::new(self.start, end)?;
        Ok(())
    }

    /// `end - start`.
    #[inline]
    pub fn direction(&self) -> Vector {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> Scalar {
        self.direction().magnitude()
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        self.start.midpoint(&self.end)
    }

    /// `start + t (end - start)`; `t` in `[0, 1]` stays on the segment.
    #[inline]
    pub fn point_at(&self, t: Scalar) -> Point {
        self.start.lerp(&self.end, t)
    }

    #[inline]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    pub fn is_degenerate(&self, tol: Tolerance) -> bool {
        self.start.approx_eq(&self.end, tol)
    }

    /// Closest point of the segment to `p`.
    pub fn closest_point(&self, p: &Point) -> Point {
        crate::query::segment::closest_point(p, &self.start, &self.end)
    }

    pub fn distance_to_point(&self, p: &Point) -> Scalar {
        crate::query::segment::point_segment_distance(p, &self.start, &self.end)
    }

    /// Fails with `DegenerateOperation` when the extent overflows `f64`.
    #[track_caller]
    pub fn bounding_box(&self) -> Result<Rectangle> {
        Rectangle::bounding(&[self.start, self.end])
    }

    #[inline]
    pub fn magnitude(&self) -> Scalar {
        self.start.magnitude().max(self.end.magnitude())
    }
}

impl TryFrom<(Point, Point)> for LineSegment {
    type Error = GeomError;

    fn try_from((start, end): (Point, Point)) -> Result<Self> {
        Self::new(start, end)
    }
}

impl From<LineSegment> for (Point, Point) {
    fn from(s: LineSegment) -> Self {
        (s.start, s.end)
    }
}

impl ApproxEq for LineSegment {
    /// Orientation matters: a segment is not approximately equal to its reverse.
    fn approx_eq(&self, other: &Self, tol: Tolerance) -> bool {
        self.start.approx_eq(&other.start, tol) && self.end.approx_eq(&other.end, tol)
    }
}

impl fmt::Display for LineSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} -> {}]", self.start, self.end)
    }
}
