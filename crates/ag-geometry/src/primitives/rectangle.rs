use std::fmt;

use super::{cyclic_approx_eq, ApproxEq, Point, Polygon, Size, Vector};
use crate::error::{GeomError, Result};
use crate::scalar::{normalize_angle, Scalar, Tolerance};

/// Possibly rotated rectangle.
///
/// The region is `origin + s·u + t·v` for `s ∈ [0, width]`, `t ∈ [0, height]`,
/// with `u = (cos θ, sin θ)` and `v = (−sin θ, cos θ)`. `θ` is kept in `[0, 2π)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "(Point, Size, Scalar)", into = "(Point, Size, Scalar)")
)]
pub struct Rectangle {
    origin: Point,
    size: Size,
    rotation: Scalar,
}

impl Rectangle {
    /// Axis-aligned rectangle.
    #[track_caller]
    pub fn new(origin: Point, size: Size) -> Result<Self> {
        Self::with_rotation(origin, size, 0.0)
    }

    #[track_caller]
    pub fn with_rotation(origin: Point, size: Size, rotation: Scalar) -> Result<Self> {
        origin.ensure_finite()?;
        if !rotation.is_finite() {
            return Err(GeomError::invalid(format!(
                "rectangle rotation must be finite (got {rotation})"
            )));
        }
        Ok(Self {
            origin,
            size,
            rotation: normalize_angle(rotation),
        })
    }

    /// Axis-aligned rectangle spanned by two opposite corners.
    #[track_caller]
    pub fn from_corners(a: Point, b: Point) -> Result<Self> {
        a.ensure_finite()?;
        b.ensure_finite()?;
        let size = Size::new((b.x - a.x).abs(), (b.y - a.y).abs())?;
        Ok(Self {
            origin: Point::new(a.x.min(b.x), a.y.min(b.y)),
            size,
            rotation: 0.0,
        })
    }

    /// Axis-aligned `(min, max)` corners of `points`; the origin for empty input.
    pub(crate) fn extent(points: &[Point]) -> (Point, Point) {
        let Some(first) = points.first() else {
            return (Point::ORIGIN, Point::ORIGIN);
        };
        points.iter().skip(1).fold((*first, *first), |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        })
    }

    /// Axis-aligned bounding box of finite points.
    ///
    /// Fails with `DegenerateOperation` when the width or height overflows `f64`.
    #[track_caller]
    pub(crate) fn bounding(points: &[Point]) -> Result<Self> {
        let (min, max) = Self::extent(points);
        let (w, h) = (max.x - min.x, max.y - min.y);
        if !(w.is_finite() && h.is_finite()) {
            return Err(GeomError::degenerate(format!(
                "bounding box from {min} to {max} has no finite size"
            )));
        }
        Ok(Self {
            origin: min,
            size: Size::new(w, h)?,
            rotation: 0.0,
        })
    }

    /// Rebuild from validated parts without re-normalizing; used by transforms.
    #[inline]
    pub(crate) fn from_parts_unchecked(origin: Point, size: Size, rotation: Scalar) -> Self {
        Self {
            origin,
            size,
            rotation: normalize_angle(rotation),
        }
    }

    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn width(&self) -> Scalar {
        self.size.width()
    }

    #[inline]
    pub fn height(&self) -> Scalar {
        self.size.height()
    }

    /// Rotation in `[0, 2π)`.
    #[inline]
    pub fn rotation(&self) -> Scalar {
        self.rotation
    }

    #[track_caller]
    pub fn set_origin(&mut self, origin: Point) -> Result<()> {
        origin.ensure_finite()?;
        self.origin = origin;
        Ok(())
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    #[track_caller]
    pub fn set_rotation(&mut self, rotation: Scalar) -> Result<()> {
        *self = Self::with_rotation(self.origin, self.size, rotation)?;
        Ok(())
    }

    /// Unit edge directions `(u, v)`.
    #[inline]
    pub fn axes(&self) -> (Vector, Vector) {
        let u = Vector::from_angle(self.rotation);
        (u, u.perp())
    }

    /// Corners counter-clockwise, starting at `origin`.
    pub fn corners(&self) -> [Point; 4] {
        let (u, v) = self.axes();
        let a = u * self.width();
        let b = v * self.height();
        let o = self.origin;
        [o, o + a, o + a + b, o + b]
    }

    pub fn center(&self) -> Point {
        let (u, v) = self.axes();
        self.origin + u * (0.5 * self.width()) + v * (0.5 * self.height())
    }

    #[inline]
    pub fn area(&self) -> Scalar {
        self.size.area()
    }

    #[inline]
    pub fn perimeter(&self) -> Scalar {
        2.0 * (self.width() + self.height())
    }

    /// Rotation is a multiple of π/2 within tolerance.
    pub fn is_axis_aligned(&self, tol: Tolerance) -> bool {
        tol.is_zero((2.0 * self.rotation).sin(), 1.0)
    }

    /// Coordinates of `p` in the rectangle frame: `(s, t)` along `(u, v)`.
    pub fn to_local(&self, p: &Point) -> (Scalar, Scalar) {
        let (u, v) = self.axes();
        let d = *p - self.origin;
        (d.dot(&u), d.dot(&v))
    }

    /// Closed-set membership with tolerance.
    pub fn contains_point(&self, p: &Point, tol: Tolerance) -> bool {
        let eps = tol.eps(self.magnitude().max(p.magnitude()));
        let (s, t) = self.to_local(p);
        s >= -eps && s <= self.width() + eps && t >= -eps && t <= self.height() + eps
    }

    /// Counter-clockwise polygon over the corners; fails for zero-area rectangles.
    #[track_caller]
    pub fn to_polygon(&self) -> Result<Polygon> {
        Polygon::new(self.corners().to_vec())
    }

    #[track_caller]
    pub fn bounding_box(&self) -> Result<Rectangle> {
        Rectangle::bounding(&self.corners())
    }

    pub fn magnitude(&self) -> Scalar {
        self.corners()
            .iter()
            .map(Point::magnitude)
            .fold(0.0, Scalar::max)
    }
}

impl TryFrom<(Point, Size, Scalar)> for Rectangle {
    type Error = GeomError;

    fn try_from((origin, size, rotation): (Point, Size, Scalar)) -> Result<Self> {
        Self::with_rotation(origin, size, rotation)
    }
}

impl From<Rectangle> for (Point, Size, Scalar) {
    fn from(r: Rectangle) -> Self {
        (r.origin, r.size, r.rotation)
    }
}

impl ApproxEq for Rectangle {
    /// Compares the corner rings, so equal regions with different origin choices match.
    fn approx_eq(&self, other: &Self, tol: Tolerance) -> bool {
        cyclic_approx_eq(&self.corners(), &other.corners(), tol)
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rect(origin={}, size={}, rot={})",
            self.origin, self.size, self.rotation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn size(w: f64, h: f64) -> Size {
        Size::new(w, h).unwrap()
    }

    #[test]
    fn boundary_is_inclusive() {
        let r = Rectangle::new(Point::new(0.0, 0.0), size(10.0, 10.0)).unwrap();
        let tol = Tolerance::default();
        assert!(r.contains_point(&Point::new(10.0, 10.0), tol));
        assert!(r.contains_point(&Point::new(0.0, 5.0), tol));
        assert!(!r.contains_point(&Point::new(10.0 + 1e-6, 5.0), tol));
    }

    #[test]
    fn rotation_is_normalized_and_corners_follow() {
        let r = Rectangle::with_rotation(Point::new(1.0, 1.0), size(2.0, 1.0), -1.5 * PI).unwrap();
        assert!((r.rotation() - FRAC_PI_2).abs() < 1e-12);
        let c = r.corners();
        let tol = Tolerance::absolute(1e-12);
        assert!(c[1].approx_eq(&Point::new(1.0, 3.0), tol));
        assert!(c[2].approx_eq(&Point::new(0.0, 3.0), tol));
        assert!(c[3].approx_eq(&Point::new(0.0, 1.0), tol));
        assert!(r.center().approx_eq(&Point::new(0.5, 2.0), tol));
        assert!(r.is_axis_aligned(Tolerance::default()));
    }

    #[test]
    fn equal_regions_with_different_parameters_compare_equal() {
        // Same square, described from two different corners.
        let a = Rectangle::new(Point::new(0.0, 0.0), size(1.0, 1.0)).unwrap();
        let b = Rectangle::with_rotation(Point::new(1.0, 0.0), size(1.0, 1.0), FRAC_PI_2).unwrap();
        assert!(a.approx_eq(&b, Tolerance::absolute(1e-12)));
        assert_ne!(a, b);
    }

    #[test]
    fn from_corners_orders_extents() {
        let r = Rectangle::from_corners(Point::new(3.0, -1.0), Point::new(1.0, 2.0)).unwrap();
        assert_eq!(r.origin(), Point::new(1.0, -1.0));
        assert_eq!(r.size(), size(2.0, 3.0));
        assert!((r.to_polygon().unwrap().area() - 6.0).abs() < 1e-12);
        let flat = Rectangle::new(Point::ORIGIN, size(2.0, 0.0)).unwrap();
        assert!(flat.to_polygon().is_err());
    }

    #[test]
    fn setters_validate() {
        let mut r = Rectangle::new(Point::ORIGIN, size(1.0, 1.0)).unwrap();
        assert!(r.set_rotation(f64::NAN).is_err());
        assert_eq!(r.rotation(), 0.0);
        assert!(r.set_origin(Point::new(f64::INFINITY, 0.0)).is_err());
        r.set_rotation(3.0 * PI).unwrap();
        assert!((r.rotation() - PI).abs() < 1e-12);
    }
}
