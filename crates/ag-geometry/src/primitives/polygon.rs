use std::fmt;

use super::{cyclic_approx_eq, ApproxEq, LineSegment, Point, Rectangle};
use crate::error::{GeomError, Result};
use crate::query::ring;
use crate::query::PointLocation;
use crate::scalar::{Scalar, Tolerance};

/// Rotational direction of a vertex ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

impl Winding {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Winding::Clockwise => Winding::CounterClockwise,
            Winding::CounterClockwise => Winding::Clockwise,
        }
    }

    /// Winding of a ring with the given signed area (`> 0` is counter-clockwise).
    #[inline]
    pub fn from_signed_area(area: Scalar) -> Self {
        if area >= 0.0 {
            Winding::CounterClockwise
        } else {
            Winding::Clockwise
        }
    }
}

impl fmt::Display for Winding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Winding::Clockwise => "cw",
            Winding::CounterClockwise => "ccw",
        })
    }
}

/// Closed polygon over an owned vertex ring.
///
/// Invariants:
/// - At least 3 finite vertices.
/// - No two consecutive vertices (including last → first) coincide within tolerance.
/// - Non-zero signed area; `winding` is computed from it at construction and
///   kept in sync by every mutation.
///
/// Self-intersecting rings are allowed; their region follows the even-odd rule.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Point>", into = "Vec<Point>")
)]
pub struct Polygon {
    vertices: Vec<Point>,
    winding: Winding,
}

impl Polygon {
    #[track_caller]
    pub fn new(vertices: Vec<Point>) -> Result<Self> {
        Self::with_tolerance(vertices, Tolerance::default())
    }

    #[track_caller]
    pub fn with_tolerance(vertices: Vec<Point>, tol: Tolerance) -> Result<Self> {
        let winding = validate(&vertices, tol)?;
        Ok(Self { vertices, winding })
    }

    /// No validation; the caller supplies the winding. Used for transform and clip output.
    #[inline]
    pub(crate) fn from_raw(vertices: Vec<Point>, winding: Winding) -> Self {
        Self { vertices, winding }
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn into_vertices(self) -> Vec<Point> {
        self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false for a validated polygon; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn vertex(&self, index: usize) -> Option<Point> {
        self.vertices.get(index).copied()
    }

    #[inline]
    pub fn winding(&self) -> Winding {
        self.winding
    }

    /// Replace one vertex, re-validating the whole ring. On failure the polygon is unchanged.
    #[track_caller]
    pub fn set_vertex(&mut self, index: usize, p: Point) -> Result<()> {
        if index >= self.vertices.len() {
            return Err(GeomError::invalid(format!(
                "vertex index {index} out of range for {} vertices",
                self.vertices.len()
            )));
        }
        let mut candidate = self.vertices.clone();
        candidate[index] = p;
        *self = Self::new(candidate)?;
        Ok(())
    }

    /// Reverse the vertex order in place; flips the recorded winding.
    pub fn reverse(&mut self) {
        self.vertices.reverse();
        self.winding = self.winding.opposite();
    }

    pub fn reversed(&self) -> Self {
        let mut out = self.clone();
        out.reverse();
        out
    }

    /// Same region with the requested winding.
    pub fn with_winding(mut self, winding: Winding) -> Self {
        if self.winding != winding {
            self.reverse();
        }
        self
    }

    /// Edges `v[i] → v[i+1]`, closing back to `v[0]`.
    pub fn edges(&self) -> impl Iterator<Item = LineSegment> + '_ {
        ring::edges(&self.vertices).map(|(a, b)| LineSegment::from_points_unchecked(a, b))
    }

    /// Shoelace area; positive for counter-clockwise rings.
    #[inline]
    pub fn signed_area(&self) -> Scalar {
        ring::signed_area(&self.vertices)
    }

    #[inline]
    pub fn area(&self) -> Scalar {
        self.signed_area().abs()
    }

    pub fn perimeter(&self) -> Scalar {
        ring::perimeter(&self.vertices)
    }

    /// Area centroid.
    pub fn centroid(&self) -> Point {
        ring::area_centroid(&self.vertices).unwrap_or_else(|| ring::vertex_mean(&self.vertices))
    }

    pub fn is_convex(&self, tol: Tolerance) -> bool {
        ring::is_convex(&self.vertices, tol)
    }

    /// No two non-adjacent edges touch.
    pub fn is_simple(&self, tol: Tolerance) -> bool {
        ring::is_simple(&self.vertices, tol)
    }

    pub fn locate(&self, p: &Point, tol: Tolerance) -> PointLocation {
        let eps = tol.eps(self.magnitude().max(p.magnitude()));
        ring::locate(p, &self.vertices, eps)
    }

    /// Closed-set membership (boundary counts as inside).
    pub fn contains_point(&self, p: &Point, tol: Tolerance) -> bool {
        self.locate(p, tol) != PointLocation::Outside
    }

    #[track_caller]
    pub fn bounding_box(&self) -> Result<Rectangle> {
        Rectangle::bounding(&self.vertices)
    }

    pub fn magnitude(&self) -> Scalar {
        self.vertices
            .iter()
            .map(Point::magnitude)
            .fold(0.0, Scalar::max)
    }
}

#[track_caller]
fn validate(vertices: &[Point], tol: Tolerance) -> Result<Winding> {
    if vertices.len() < 3 {
        return Err(GeomError::invalid(format!(
            "polygon needs at least 3 vertices, got {}",
            vertices.len()
        )));
    }
    for p in vertices {
        p.ensure_finite()?;
    }
    for (i, (a, b)) in ring::edges(vertices).enumerate() {
        if a.approx_eq(&b, tol) {
            return Err(GeomError::invalid(format!(
                "polygon vertices {i} and {} coincide at {a}",
                (i + 1) % vertices.len()
            )));
        }
    }
    let scale = vertices
        .iter()
        .map(Point::magnitude)
        .fold(0.0, Scalar::max);
    let area = ring::signed_area(vertices);
    if area.abs() <= tol.eps(scale) * ring::perimeter(vertices) {
        return Err(GeomError::invalid(format!(
            "polygon has zero area ({area}); winding is undefined"
        )));
    }
    Ok(Winding::from_signed_area(area))
}

impl TryFrom<Vec<Point>> for Polygon {
    type Error = GeomError;

    #[track_caller]
    fn try_from(vertices: Vec<Point>) -> Result<Self> {
        Self::new(vertices)
    }
}

impl From<Polygon> for Vec<Point> {
    fn from(p: Polygon) -> Self {
        p.vertices
    }
}

impl ApproxEq for Polygon {
    /// Same vertex ring up to the choice of starting vertex.
    fn approx_eq(&self, other: &Self, tol: Tolerance) -> bool {
        self.winding == other.winding && cyclic_approx_eq(&self.vertices, &other.vertices, tol)
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon[{}", self.winding)?;
        for (i, v) in self.vertices.iter().enumerate() {
            let sep = if i == 0 { "; " } else { ", " };
            write!(f, "{sep}{v}")?;
        }
        f.write_str("]")
    }
}
