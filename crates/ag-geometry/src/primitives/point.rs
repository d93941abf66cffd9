//! `Point` (location) and `Vector` (displacement) with their algebra.
//!
//! Both convert losslessly to `nalgebra::Vector2<f64>`, which the transform
//! layer uses for its matrix arithmetic.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use nalgebra::Vector2;

use super::ApproxEq;
use crate::error::{GeomError, Result};
use crate::scalar::{Scalar, Tolerance};

/// A location in the plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: Scalar,
    pub y: Scalar,
}

/// A displacement in the plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    pub dx: Scalar,
    pub dy: Scalar,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: Scalar, y: Scalar) -> Self {
        Self { x, y }
    }

    /// Constructor that rejects NaN/Inf coordinates.
    #[track_caller]
    pub fn try_new(x: Scalar, y: Scalar) -> Result<Self> {
        let p = Self { x, y };
        p.ensure_finite()?;
        Ok(p)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[track_caller]
    pub(crate) fn ensure_finite(&self) -> Result<()> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(GeomError::invalid(format!("non-finite point {self}")))
        }
    }

    /// Displacement from the origin to this point.
    #[inline]
    pub fn to_vector(self) -> Vector {
        Vector::new(self.x, self.y)
    }

    #[inline]
    pub fn distance_to(&self, other: &Point) -> Scalar {
        (*other - *self).magnitude()
    }

    #[inline]
    pub fn distance_squared_to(&self, other: &Point) -> Scalar {
        (*other - *self).magnitude_squared()
    }

    #[inline]
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }

    /// Linear interpolation `self + t (other - self)`.
    #[inline]
    pub fn lerp(&self, other: &Point, t: Scalar) -> Point {
        *self + (*other - *self) * t
    }

    /// Largest absolute coordinate; feeds the relative tolerance.
    #[inline]
    pub fn magnitude(&self) -> Scalar {
        self.x.abs().max(self.y.abs())
    }
}

impl Vector {
    pub const ZERO: Vector = Vector { dx: 0.0, dy: 0.0 };

    #[inline]
    pub const fn new(dx: Scalar, dy: Scalar) -> Self {
        Self { dx, dy }
    }

    #[track_caller]
    pub fn try_new(dx: Scalar, dy: Scalar) -> Result<Self> {
        if dx.is_finite() && dy.is_finite() {
            Ok(Self { dx, dy })
        } else {
            Err(GeomError::invalid(format!("non-finite vector <{dx}, {dy}>")))
        }
    }

    /// Unit vector at `angle` radians from the +x axis.
    #[inline]
    pub fn from_angle(angle: Scalar) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(c, s)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }

    #[inline]
    pub fn dot(&self, other: &Vector) -> Scalar {
        self.dx * other.dx + self.dy * other.dy
    }

    /// z-component of the 3D cross product; positive when `other` is
    /// counter-clockwise from `self`.
    #[inline]
    pub fn cross(&self, other: &Vector) -> Scalar {
        self.dx * other.dy - self.dy * other.dx
    }

    #[inline]
    pub fn magnitude(&self) -> Scalar {
        self.dx.hypot(self.dy)
    }

    #[inline]
    pub fn magnitude_squared(&self) -> Scalar {
        self.dot(self)
    }

    /// Unit vector in the same direction.
    ///
    /// Fails with `DegenerateOperation` when the magnitude is within `tol.abs_eps` of zero.
    #[track_caller]
    pub fn normalize(&self, tol: Tolerance) -> Result<Vector> {
        let m = self.magnitude();
        if !m.is_finite() || m <= tol.abs_eps {
            return Err(GeomError::degenerate(format!(
                "cannot normalize vector {self} of magnitude {m}"
            )));
        }
        Ok(*self / m)
    }

    /// Counter-clockwise perpendicular `(-dy, dx)`.
    #[inline]
    pub fn perp(&self) -> Vector {
        Vector::new(-self.dy, self.dx)
    }

    /// Angle from the +x axis in `(-π, π]`.
    #[inline]
    pub fn angle(&self) -> Scalar {
        self.dy.atan2(self.dx)
    }

    #[inline]
    pub fn to_point(self) -> Point {
        Point::new(self.dx, self.dy)
    }
}

impl Add<Vector> for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl AddAssign<Vector> for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Vector) {
        self.x += rhs.dx;
        self.y += rhs.dy;
    }
}

impl Sub<Vector> for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Vector) -> Point {
        Point::new(self.x - rhs.dx, self.y - rhs.dy)
    }
}

impl SubAssign<Vector> for Point {
    #[inline]
    fn sub_assign(&mut self, rhs: Vector) {
        self.x -= rhs.dx;
        self.y -= rhs.dy;
    }
}

impl Sub for Point {
    type Output = Vector;
    #[inline]
    fn sub(self, rhs: Point) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for Vector {
    type Output = Vector;
    #[inline]
    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl AddAssign for Vector {
    #[inline]
    fn add_assign(&mut self, rhs: Vector) {
        self.dx += rhs.dx;
        self.dy += rhs.dy;
    }
}

impl Sub for Vector {
    type Output = Vector;
    #[inline]
    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.dx - rhs.dx, self.dy - rhs.dy)
    }
}

impl Neg for Vector {
    type Output = Vector;
    #[inline]
    fn neg(self) -> Vector {
        Vector::new(-self.dx, -self.dy)
    }
}

impl Mul<Scalar> for Vector {
    type Output = Vector;
    #[inline]
    fn mul(self, rhs: Scalar) -> Vector {
        Vector::new(self.dx * rhs, self.dy * rhs)
    }
}

impl Mul<Vector> for Scalar {
    type Output = Vector;
    #[inline]
    fn mul(self, rhs: Vector) -> Vector {
        rhs * self
    }
}

impl Div<Scalar> for Vector {
    type Output = Vector;
    #[inline]
    fn div(self, rhs: Scalar) -> Vector {
        Vector::new(self.dx / rhs, self.dy / rhs)
    }
}

impl From<Point> for Vector2<Scalar> {
    #[inline]
    fn from(p: Point) -> Self {
        Vector2::new(p.x, p.y)
    }
}

impl From<Vector2<Scalar>> for Point {
    #[inline]
    fn from(v: Vector2<Scalar>) -> Self {
        Point::new(v.x, v.y)
    }
}

impl From<Vector> for Vector2<Scalar> {
    #[inline]
    fn from(v: Vector) -> Self {
        Vector2::new(v.dx, v.dy)
    }
}

impl From<Vector2<Scalar>> for Vector {
    #[inline]
    fn from(v: Vector2<Scalar>) -> Self {
        Vector::new(v.x, v.y)
    }
}

impl From<(Scalar, Scalar)> for Point {
    #[inline]
    fn from((x, y): (Scalar, Scalar)) -> Self {
        Point::new(x, y)
    }
}

impl ApproxEq for Point {
    fn approx_eq(&self, other: &Self, tol: Tolerance) -> bool {
        let eps = tol.eps(self.magnitude().max(other.magnitude()));
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

impl ApproxEq for Vector {
    fn approx_eq(&self, other: &Self, tol: Tolerance) -> bool {
        let scale = self
            .dx
            .abs()
            .max(self.dy.abs())
            .max(other.dx.abs())
            .max(other.dy.abs());
        let eps = tol.eps(scale);
        (self.dx - other.dx).abs() <= eps && (self.dy - other.dy).abs() <= eps
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.dx, self.dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn point_vector_algebra() {
        let p = Point::new(1.0, 2.0);
        let q = Point::new(4.0, 6.0);
        let d = q - p;
        assert_eq!(d, Vector::new(3.0, 4.0));
        assert_eq!(d.magnitude(), 5.0);
        assert_eq!(p + d, q);
        assert_eq!(q - d, p);
        assert_eq!(2.0 * d, Vector::new(6.0, 8.0));
        assert_eq!(-d / 2.0, Vector::new(-1.5, -2.0));
        assert_eq!(p.midpoint(&q), Point::new(2.5, 4.0));
        assert_eq!(p.lerp(&q, 0.5), p.midpoint(&q));
    }

    #[test]
    fn dot_cross_perp() {
        let a = Vector::new(1.0, 0.0);
        let b = Vector::new(0.0, 2.0);
        assert_eq!(a.dot(&b), 0.0);
        assert_eq!(a.cross(&b), 2.0);
        assert_eq!(b.cross(&a), -2.0);
        assert_eq!(a.perp(), Vector::new(0.0, 1.0));
        assert!((b.angle() - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
    }

    #[test]
    fn normalize_fails_on_zero_vector() {
        let tol = Tolerance::default();
        let n = Vector::new(3.0, 4.0).normalize(tol).unwrap();
        assert!((n.magnitude() - 1.0).abs() < 1e-15);
        let err = Vector::ZERO.normalize(tol).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DegenerateOperation);
        assert!(Vector::new(1e-12, 0.0).normalize(tol).is_err());
    }

    #[test]
    fn try_new_rejects_non_finite() {
        assert!(Point::try_new(f64::NAN, 0.0).is_err());
        assert!(Point::try_new(0.0, f64::INFINITY).is_err());
        assert!(Vector::try_new(f64::NEG_INFINITY, 0.0).is_err());
        assert!(Point::try_new(1.0, -1.0).is_ok());
    }

    #[test]
    fn approximate_equality_is_explicit() {
        let tol = Tolerance::default();
        let p = Point::new(1.0, 1.0);
        let q = Point::new(1.0 + 5e-10, 1.0 - 5e-10);
        assert!(p.approx_eq(&q, tol));
        assert_ne!(p, q);
        assert!(!p.approx_eq(&Point::new(1.0 + 2e-9, 1.0), tol));
        // Relative part kicks in for large coordinates.
        let big = Point::new(1e8, 0.0);
        assert!(big.approx_eq(&Point::new(1e8 + 1e-5, 0.0), tol));
    }

    #[test]
    fn nalgebra_round_trip() {
        let p = Point::new(-2.0, 0.5);
        let v: Vector2<f64> = p.into();
        assert_eq!(Point::from(v), p);
        assert_eq!(p.to_string(), "(-2, 0.5)");
        assert_eq!(Vector::new(1.0, -1.0).to_string(), "<1, -1>");
    }
}
