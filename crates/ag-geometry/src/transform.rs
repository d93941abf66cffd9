//! Affine transforms over the primitive shapes.
//!
//! Purpose
//! - `Transform` is the affine map `x ↦ M x + t` with `M` a 2×2 `nalgebra` matrix.
//! - Composition is left-to-right: `a.then(&b)` applies `a` first.
//! - `apply` returns a primitive of the same kind. A map whose image is not of
//!   that kind (sheared rectangle, non-uniformly scaled circle) is rejected with
//!   `UnsupportedOperation`; a map that collapses area succeeds and attaches
//!   `Notice::Collapsed`.
//!
//! Code cross-refs: `primitives::*`, `query` (rectangles lower to rings only after
//! transforms have kept them rectangular).

use std::f64::consts::FRAC_PI_2;
use std::fmt;

use nalgebra::{Matrix2, Vector2};
use tracing::debug;

use crate::error::{GeomError, Result};
use crate::primitives::{
    ApproxEq, Circle, LineSegment, Point, Polygon, Rectangle, Shape, Size, Vector,
};
use crate::scalar::{normalize_angle, Scalar, Tolerance};

/// 2D affine map: `x ↦ M x + t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    m: Matrix2<Scalar>,
    t: Vector2<Scalar>,
}

/// Translation / rotation / axis scale triple; `M = R(rotation) · diag(scale)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decomposition {
    pub translation: Vector,
    /// In `[0, 2π)`.
    pub rotation: Scalar,
    /// `scale.dy < 0` encodes a reflection.
    pub scale: Vector,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vector2::zeros(),
        }
    }

    /// Raw constructor from matrix and translation.
    #[inline]
    pub fn from_parts(m: Matrix2<Scalar>, t: Vector) -> Self {
        Self { m, t: t.into() }
    }

    #[inline]
    pub fn translate(v: Vector) -> Self {
        Self {
            m: Matrix2::identity(),
            t: v.into(),
        }
    }

    /// Counter-clockwise rotation about the origin; `angle` is normalized to `[0, 2π)`.
    pub fn rotate(angle: Scalar) -> Self {
        let (s, c) = normalize_angle(angle).sin_cos();
        Self {
            m: Matrix2::new(c, -s, s, c),
            t: Vector2::zeros(),
        }
    }

    pub fn rotate_about(angle: Scalar, pivot: Point) -> Self {
        Self::about(Self::rotate(angle), pivot)
    }

    /// Axis-aligned scale by `(factors.dx, factors.dy)`; zero factors are allowed.
    pub fn scale(factors: Vector) -> Self {
        Self {
            m: Matrix2::new(factors.dx, 0.0, 0.0, factors.dy),
            t: Vector2::zeros(),
        }
    }

    pub fn scale_uniform(factor: Scalar) -> Self {
        Self::scale(Vector::new(factor, factor))
    }

    pub fn scale_about(factors: Vector, pivot: Point) -> Self {
        Self::about(Self::scale(factors), pivot)
    }

    /// `translate(translation) ∘ rotate(rotation) ∘ scale(scale)`.
    pub fn from_components(translation: Vector, rotation: Scalar, scale: Vector) -> Self {
        Self::scale(scale)
            .then(&Self::rotate(rotation))
            .then(&Self::translate(translation))
    }

    /// Conjugate a linear map so it fixes `pivot`.
    fn about(linear: Self, pivot: Point) -> Self {
        let p: Vector2<Scalar> = pivot.into();
        Self {
            m: linear.m,
            t: p - linear.m * p,
        }
    }

    #[inline]
    pub fn matrix(&self) -> Matrix2<Scalar> {
        self.m
    }

    #[inline]
    pub fn translation(&self) -> Vector {
        self.t.into()
    }

    #[inline]
    pub fn determinant(&self) -> Scalar {
        self.m.determinant()
    }

    #[inline]
    pub fn is_orientation_preserving(&self) -> bool {
        self.determinant() > 0.0
    }

    /// Largest absolute matrix entry.
    fn linear_scale(&self) -> Scalar {
        self.m.iter().fold(0.0, |acc: Scalar, v| acc.max(v.abs()))
    }

    /// True when the map collapses area: the geometric-mean scale factor
    /// `sqrt(|det|)` is within tolerance of zero.
    pub fn is_degenerate(&self, tol: Tolerance) -> bool {
        let det = self.determinant();
        !det.is_finite() || tol.is_zero(det.abs().sqrt(), self.linear_scale())
    }

    /// `self` first, then `next`.
    pub fn then(&self, next: &Transform) -> Transform {
        Transform {
            m: next.m * self.m,
            t: next.m * self.t + next.t,
        }
    }

    #[track_caller]
    pub fn inverse(&self) -> Result<Transform> {
        self.inverse_with(Tolerance::default())
    }

    #[track_caller]
    pub fn inverse_with(&self, tol: Tolerance) -> Result<Transform> {
        if self.is_degenerate(tol) {
            return Err(GeomError::degenerate(format!(
                "transform is not invertible (det = {})",
                self.determinant()
            )));
        }
        let minv = self.m.try_inverse().ok_or_else(|| {
            GeomError::degenerate(format!(
                "transform is not invertible (det = {})",
                self.determinant()
            ))
        })?;
        Ok(Transform {
            m: minv,
            t: -minv * self.t,
        })
    }

    /// Recover `(translation, rotation, scale)`.
    ///
    /// Fails with `DegenerateOperation` when the first column vanishes and with
    /// `UnsupportedOperation` when the linear part contains shear.
    #[track_caller]
    pub fn decompose(&self, tol: Tolerance) -> Result<Decomposition> {
        let c0 = Vector::new(self.m[(0, 0)], self.m[(1, 0)]);
        let c1 = Vector::new(self.m[(0, 1)], self.m[(1, 1)]);
        let sx = c0.magnitude();
        if tol.is_zero(sx, self.linear_scale()) {
            return Err(GeomError::degenerate(
                "cannot decompose a transform whose x axis collapses",
            ));
        }
        let scale2 = self.linear_scale() * self.linear_scale();
        if !tol.is_zero(c0.dot(&c1), scale2) {
            return Err(GeomError::unsupported(format!(
                "transform has shear (column dot = {})",
                c0.dot(&c1)
            )));
        }
        Ok(Decomposition {
            translation: self.translation(),
            rotation: normalize_angle(c0.angle()),
            scale: Vector::new(sx, c0.cross(&c1) / sx),
        })
    }

    #[inline]
    pub fn apply_point(&self, p: &Point) -> Point {
        (self.m * Vector2::from(*p) + self.t).into()
    }

    /// Linear part only; translation does not move displacements.
    #[inline]
    pub fn apply_vector(&self, v: &Vector) -> Vector {
        (self.m * Vector2::from(*v)).into()
    }

    #[track_caller]
    pub fn apply<T: Transformable>(&self, shape: &T) -> Result<Applied<T>> {
        apply_with(self, shape, Tolerance::default())
    }

    /// True when the linear part maps orthogonal unit vectors to orthogonal
    /// vectors of equal length (rotation, uniform scale, reflection).
    pub fn is_similarity(&self, tol: Tolerance) -> bool {
        let c0 = Vector::new(self.m[(0, 0)], self.m[(1, 0)]);
        let c1 = Vector::new(self.m[(0, 1)], self.m[(1, 1)]);
        let s = self.linear_scale();
        tol.is_zero(c0.dot(&c1), s * s) && tol.is_zero(c0.magnitude() - c1.magnitude(), s)
    }
}

/// `a` first, then `b`.
#[inline]
pub fn compose(a: &Transform, b: &Transform) -> Transform {
    a.then(b)
}

/// Side-information attached to a transform result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Notice {
    /// The map has (near-)zero determinant; the image may be degenerate.
    Collapsed { determinant: Scalar },
}

/// Transform output plus an optional notice.
#[derive(Clone, Debug, PartialEq)]
pub struct Applied<T> {
    pub value: T,
    pub notice: Option<Notice>,
}

impl<T> Applied<T> {
    #[inline]
    pub fn into_value(self) -> T {
        self.value
    }

    #[inline]
    pub fn is_collapsed(&self) -> bool {
        matches!(self.notice, Some(Notice::Collapsed { .. }))
    }
}

/// Shapes that map to a shape of the same kind under an affine transform.
pub trait Transformable: Sized {
    fn transformed(&self, t: &Transform, tol: Tolerance) -> Result<Self>;
}

#[track_caller]
pub fn apply<T: Transformable>(t: &Transform, shape: &T) -> Result<Applied<T>> {
    apply_with(t, shape, Tolerance::default())
}

#[track_caller]
pub fn apply_with<T: Transformable>(
    t: &Transform,
    shape: &T,
    tol: Tolerance,
) -> Result<Applied<T>> {
    let value = shape.transformed(t, tol)?;
    let notice = if t.is_degenerate(tol) {
        let determinant = t.determinant();
        debug!(determinant, "transform collapses area");
        Some(Notice::Collapsed { determinant })
    } else {
        None
    };
    Ok(Applied { value, notice })
}

impl Transformable for Point {
    fn transformed(&self, t: &Transform, _tol: Tolerance) -> Result<Self> {
        Ok(t.apply_point(self))
    }
}

impl Transformable for Vector {
    fn transformed(&self, t: &Transform, _tol: Tolerance) -> Result<Self> {
        Ok(t.apply_vector(self))
    }
}

impl Transformable for LineSegment {
    fn transformed(&self, t: &Transform, _tol: Tolerance) -> Result<Self> {
        Ok(LineSegment::from_points_unchecked(
            t.apply_point(&self.start()),
            t.apply_point(&self.end()),
        ))
    }
}

impl Transformable for Rectangle {
    #[track_caller]
    fn transformed(&self, t: &Transform, tol: Tolerance) -> Result<Self> {
        let (u, v) = self.axes();
        let au = t.apply_vector(&u);
        let bv = t.apply_vector(&v);
        let (la, lb) = (au.magnitude(), bv.magnitude());
        let scale = t.linear_scale();
        if !tol.is_zero(au.dot(&bv), scale * scale) {
            return Err(GeomError::unsupported(format!(
                "transform does not keep {self} rectangular"
            )));
        }
        let origin = t.apply_point(&self.origin());
        let size = Size::new(self.width() * la, self.height() * lb)?;
        let (rotation, flipped) = if !tol.is_zero(la, scale) {
            (au.angle(), au.cross(&bv) < 0.0)
        } else if !tol.is_zero(lb, scale) {
            (bv.angle() - FRAC_PI_2, false)
        } else {
            (0.0, false)
        };
        if flipped {
            // Reflection: start from the far end of the first edge so (u, v) stay CCW.
            let a = au * self.width();
            return Ok(Rectangle::from_parts_unchecked(
                origin + a,
                size,
                rotation + std::f64::consts::PI,
            ));
        }
        Ok(Rectangle::from_parts_unchecked(origin, size, rotation))
    }
}

impl Transformable for Circle {
    #[track_caller]
    fn transformed(&self, t: &Transform, tol: Tolerance) -> Result<Self> {
        if !t.is_similarity(tol) {
            return Err(GeomError::unsupported(format!(
                "non-uniform transform maps {self} to an ellipse"
            )));
        }
        let factor = t.apply_vector(&Vector::new(1.0, 0.0)).magnitude();
        Ok(Circle::from_parts_unchecked(
            t.apply_point(&self.center()),
            self.radius() * factor,
        ))
    }
}

impl Transformable for Polygon {
    fn transformed(&self, t: &Transform, _tol: Tolerance) -> Result<Self> {
        let vertices = self.vertices().iter().map(|p| t.apply_point(p)).collect();
        let winding = if t.determinant() < 0.0 {
            self.winding().opposite()
        } else {
            self.winding()
        };
        Ok(Polygon::from_raw(vertices, winding))
    }
}

impl Transformable for Shape {
    #[track_caller]
    fn transformed(&self, t: &Transform, tol: Tolerance) -> Result<Self> {
        Ok(match self {
            Shape::Point(p) => Shape::Point(p.transformed(t, tol)?),
            Shape::Segment(s) => Shape::Segment(s.transformed(t, tol)?),
            Shape::Rectangle(r) => Shape::Rectangle(r.transformed(t, tol)?),
            Shape::Circle(c) => Shape::Circle(c.transformed(t, tol)?),
            Shape::Polygon(p) => Shape::Polygon(p.transformed(t, tol)?),
        })
    }
}

impl ApproxEq for Transform {
    fn approx_eq(&self, other: &Self, tol: Tolerance) -> bool {
        let eps = tol.eps(self.linear_scale().max(other.linear_scale()));
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| (a - b).abs() <= eps)
            && self.translation().approx_eq(&other.translation(), tol)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transform([[{}, {}], [{}, {}]] + {})",
            self.m[(0, 0)],
            self.m[(0, 1)],
            self.m[(1, 0)],
            self.m[(1, 1)],
            self.translation()
        )
    }
}
