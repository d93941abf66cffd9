//! Pairwise query engine.
//!
//! Purpose
//! - `intersects`, `contains`, `distance`, `intersection`, `overlap_area` for
//!   every pair of {point, segment, rectangle, circle, polygon}.
//! - Polygon kernels: point-in-polygon, segment/segment intersection, convex
//!   hull, Sutherland–Hodgman clipping.
//!
//! Policy
//! - Shapes are lowered to four internal forms before dispatch: a point, a
//!   segment, a closed vertex ring (rectangles and polygons), or a disk. Each
//!   unordered pair of forms has one implementation.
//! - One epsilon per query: `tol.eps(scale)` with `scale` the largest coordinate
//!   magnitude of the operands.
//! - `intersects(a, b)` is defined as `distance(a, b) <= eps`, so the two
//!   never disagree.
//!
//! Code cross-refs: `primitives::ShapeRef`, `scalar::Tolerance`.

use std::borrow::Cow;
use std::fmt;

use crate::error::{GeomError, Result};
use crate::primitives::{LineSegment, Point, Polygon, Shape, ShapeRef};
use crate::scalar::{Scalar, Tolerance};

pub(crate) mod circle;
mod clip;
mod hull;
mod intersection;
mod predicates;
pub(crate) mod ring;
pub(crate) mod segment;

pub use clip::clip;
pub use hull::{convex_hull, convex_hull_polygon};

/// Where a point lies relative to a closed region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointLocation {
    Inside,
    Boundary,
    Outside,
}

/// Result of [`segment_intersection`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SegmentIntersection {
    NoIntersection,
    Point(Point),
    /// Shared sub-segment, oriented along the first operand.
    CollinearOverlap(LineSegment),
}

/// Result of [`intersection`].
#[derive(Clone, Debug, PartialEq)]
pub enum Intersection {
    NoIntersection,
    Point(Point),
    Points(Vec<Point>),
    Segment(LineSegment),
    Segments(Vec<LineSegment>),
    /// Two-dimensional overlap: the contained operand, or the clipped polygon.
    Region(Shape),
    /// The operands cover the same point set.
    Identical,
}

impl Intersection {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Intersection::NoIntersection)
    }
}

impl fmt::Display for Intersection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intersection::NoIntersection => f.write_str("no intersection"),
            Intersection::Point(p) => write!(f, "point {p}"),
            Intersection::Points(ps) => {
                f.write_str("points")?;
                for p in ps {
                    write!(f, " {p}")?;
                }
                Ok(())
            }
            Intersection::Segment(s) => write!(f, "segment {s}"),
            Intersection::Segments(ss) => {
                f.write_str("segments")?;
                for s in ss {
                    write!(f, " {s}")?;
                }
                Ok(())
            }
            Intersection::Region(shape) => write!(f, "region {shape}"),
            Intersection::Identical => f.write_str("identical"),
        }
    }
}

/// Internal lowering of a shape for pairwise dispatch.
#[derive(Clone, Debug)]
pub(crate) enum Geom<'a> {
    Point(Point),
    Segment(Point, Point),
    /// Closed ring; rectangle corners or polygon vertices.
    Ring(Cow<'a, [Point]>),
    Disk(Point, Scalar),
}

impl<'a> From<ShapeRef<'a>> for Geom<'a> {
    fn from(shape: ShapeRef<'a>) -> Self {
        match shape {
            ShapeRef::Point(p) => Geom::Point(*p),
            ShapeRef::Segment(s) => Geom::Segment(s.start(), s.end()),
            ShapeRef::Rectangle(r) => Geom::Ring(Cow::Owned(r.corners().to_vec())),
            ShapeRef::Circle(c) => Geom::Disk(c.center(), c.radius()),
            ShapeRef::Polygon(p) => Geom::Ring(Cow::Borrowed(p.vertices())),
        }
    }
}

/// Shared epsilon for a pair of operands.
#[inline]
fn pair_eps(a: &ShapeRef<'_>, b: &ShapeRef<'_>, tol: Tolerance) -> Scalar {
    tol.eps(a.magnitude().max(b.magnitude()))
}

/// Closed-set intersection test (touching counts).
pub fn intersects<'a, 'b>(
    a: impl Into<ShapeRef<'a>>,
    b: impl Into<ShapeRef<'b>>,
    tol: Tolerance,
) -> bool {
    let (a, b) = (a.into(), b.into());
    let eps = pair_eps(&a, &b, tol);
    if !boxes_within(a.extent(), b.extent(), eps) {
        return false;
    }
    predicates::distance(&Geom::from(a), &Geom::from(b)) <= eps
}

/// Minimum Euclidean distance; 0 when the shapes overlap.
pub fn distance<'a, 'b>(a: impl Into<ShapeRef<'a>>, b: impl Into<ShapeRef<'b>>) -> Scalar {
    predicates::distance(&Geom::from(a.into()), &Geom::from(b.into()))
}

/// `inner ⊆ outer` with closed-set semantics; every shape contains itself.
pub fn contains<'a, 'b>(
    outer: impl Into<ShapeRef<'a>>,
    inner: impl Into<ShapeRef<'b>>,
    tol: Tolerance,
) -> bool {
    let (outer, inner) = (outer.into(), inner.into());
    let eps = pair_eps(&outer, &inner, tol);
    predicates::contains(&Geom::from(outer), &Geom::from(inner), eps)
}

/// Geometry shared by `a` and `b`.
///
/// Fails with `UnsupportedOperation` when two overlapping polygons are both
/// non-convex or self-intersecting (see [`clip`]).
#[track_caller]
pub fn intersection<'a, 'b>(
    a: impl Into<ShapeRef<'a>>,
    b: impl Into<ShapeRef<'b>>,
    tol: Tolerance,
) -> Result<Intersection> {
    intersection::intersection(a.into(), b.into(), tol)
}

/// Area of `a ∩ b`; 0 when either operand has no interior (points, segments,
/// rectangles of zero width or height).
///
/// Circle/polygon and polygon/polygon pairs require simple rings; polygon
/// pairs additionally need one convex operand.
#[track_caller]
pub fn overlap_area<'a, 'b>(
    a: impl Into<ShapeRef<'a>>,
    b: impl Into<ShapeRef<'b>>,
    tol: Tolerance,
) -> Result<Scalar> {
    let (a, b) = (a.into(), b.into());
    let eps = pair_eps(&a, &b, tol);
    match (Geom::from(a), Geom::from(b)) {
        (Geom::Point(_) | Geom::Segment(..), _) | (_, Geom::Point(_) | Geom::Segment(..)) => {
            Ok(0.0)
        }
        (Geom::Disk(c1, r1), Geom::Disk(c2, r2)) => {
            Ok(circle::lens_area(c1.distance_to(&c2), r1, r2))
        }
        (Geom::Disk(c, r), Geom::Ring(ring)) | (Geom::Ring(ring), Geom::Disk(c, r)) => {
            if ring::flat_span(&ring, eps).is_some() {
                return Ok(0.0);
            }
            if !ring::is_simple(&ring, tol) {
                return Err(GeomError::unsupported(
                    "overlap area with a self-intersecting polygon is not supported",
                ));
            }
            Ok(circle::disk_ring_area(&c, r, &ring))
        }
        (Geom::Ring(r1), Geom::Ring(r2)) => {
            if !boxes_within(a.extent(), b.extent(), eps) {
                return Ok(0.0);
            }
            Ok(clip::clip_rings(&r1, &r2, tol)?.map_or(0.0, |p| p.area()))
        }
    }
}

/// Classify `[a, b] ∩ [c, d]`. Near-parallel pairs are resolved to
/// `NoIntersection` or `CollinearOverlap` (or a touching `Point`), never an error.
pub fn segment_intersection(
    a: &LineSegment,
    b: &LineSegment,
    tol: Tolerance,
) -> SegmentIntersection {
    let eps = tol.eps(a.magnitude().max(b.magnitude()));
    segment::intersect_segments(&a.start(), &a.end(), &b.start(), &b.end(), eps)
}

/// Even-odd point-in-polygon with a boundary band of width `eps`.
pub fn point_in_polygon(p: &Point, polygon: &Polygon, tol: Tolerance) -> PointLocation {
    polygon.locate(p, tol)
}

/// Axis-aligned extents `(min, max)` are no further than `eps` apart on either axis.
///
/// Compares corners directly, so extents wider than `f64::MAX` still filter correctly.
fn boxes_within(a: (Point, Point), b: (Point, Point), eps: Scalar) -> bool {
    let ((a_lo, a_hi), (b_lo, b_hi)) = (a, b);
    a_lo.x <= b_hi.x + eps
        && b_lo.x <= a_hi.x + eps
        && a_lo.y <= b_hi.y + eps
        && b_lo.y <= a_hi.y + eps
}

#[cfg(test)]
mod tests;
