use std::f64::consts::PI;
use std::fmt;

use super::{ApproxEq, Point, Rectangle, Vector};
use crate::error::{GeomError, Result};
use crate::scalar::{Scalar, Tolerance};

/// Closed disk. Radius 0 is an allowed point-circle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "(Point, Scalar)", into = "(Point, Scalar)")
)]
pub struct Circle {
    center: Point,
    radius: Scalar,
}

impl Circle {
    #[track_caller]
    pub fn new(center: Point, radius: Scalar) -> Result<Self> {
        center.ensure_finite()?;
        check_radius(radius)?;
        Ok(Self { center, radius })
    }

    #[inline]
    pub(crate) fn from_parts_unchecked(center: Point, radius: Scalar) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> Scalar {
        self.radius
    }

    #[track_caller]
    pub fn set_center(&mut self, center: Point) -> Result<()> {
        center.ensure_finite()?;
        self.center = center;
        Ok(())
    }

    #[track_caller]
    pub fn set_radius(&mut self, radius: Scalar) -> Result<()> {
        check_radius(radius)?;
        self.radius = radius;
        Ok(())
    }

    #[inline]
    pub fn area(&self) -> Scalar {
        PI * self.radius * self.radius
    }

    #[inline]
    pub fn circumference(&self) -> Scalar {
        2.0 * PI * self.radius
    }

    pub fn is_degenerate(&self, tol: Tolerance) -> bool {
        tol.is_zero(self.radius, self.magnitude())
    }

    /// Point on the boundary at `angle` radians.
    pub fn point_at_angle(&self, angle: Scalar) -> Point {
        self.center + Vector::from_angle(angle) * self.radius
    }

    pub fn contains_point(&self, p: &Point, tol: Tolerance) -> bool {
        let eps = tol.eps(self.magnitude().max(p.magnitude()));
        self.center.distance_to(p) <= self.radius + eps
    }

    #[track_caller]
    pub fn bounding_box(&self) -> Result<Rectangle> {
        let r = Vector::new(self.radius, self.radius);
        Rectangle::bounding(&[self.center - r, self.center + r])
    }

    #[inline]
    pub fn magnitude(&self) -> Scalar {
        self.center.magnitude() + self.radius
    }
}

#[track_caller]
fn check_radius(radius: Scalar) -> Result<()> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(GeomError::invalid(format!(
            "circle radius must be finite and >= 0 (got {radius})"
        )));
    }
    Ok(())
}

impl TryFrom<(Point, Scalar)> for Circle {
    type Error = GeomError;

    fn try_from((center, radius): (Point, Scalar)) -> Result<Self> {
        Self::new(center, radius)
    }
}

impl From<Circle> for (Point, Scalar) {
    fn from(c: Circle) -> Self {
        (c.center, c.radius)
    }
}

impl ApproxEq for Circle {
    fn approx_eq(&self, other: &Self, tol: Tolerance) -> bool {
        let eps = tol.eps(self.magnitude().max(other.magnitude()));
        self.center.approx_eq(&other.center, tol) && (self.radius - other.radius).abs() <= eps
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Circle(center={}, r={})", self.center, self.radius)
    }
}
