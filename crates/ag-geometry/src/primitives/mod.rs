//! Primitive value types.
//!
//! Purpose
//! - Plain, validated values: every constructor and setter checks its type's
//!   invariants and fails with `InvalidGeometry` instead of coercing.
//! - Exact `PartialEq` is derived; approximate comparison is the explicit
//!   [`ApproxEq`] trait so tolerance never leaks into hashing or `==`.
//!
//! Code cross-refs: `crate::query` (pairwise predicates), `crate::transform`.

mod circle;
mod point;
mod polygon;
mod rectangle;
mod segment;
mod shape;
mod size;

pub use circle::Circle;
pub use point::{Point, Vector};
pub use polygon::{Polygon, Winding};
pub use rectangle::Rectangle;
pub use segment::LineSegment;
pub use shape::{Shape, ShapeKind, ShapeRef};
pub use size::Size;

use crate::scalar::Tolerance;

/// Tolerance-aware equality.
///
/// Symmetric but not transitive: `a ≈ b` and `b ≈ c` do not imply `a ≈ c`.
pub trait ApproxEq {
    fn approx_eq(&self, other: &Self, tol: Tolerance) -> bool;

    #[inline]
    fn approx_eq_default(&self, other: &Self) -> bool {
        self.approx_eq(other, Tolerance::default())
    }
}

/// Ring equality up to a cyclic shift of the starting vertex (direction preserved).
pub(crate) fn cyclic_approx_eq(a: &[Point], b: &[Point], tol: Tolerance) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let n = a.len();
    if n == 0 {
        return true;
    }
    (0..n).any(|shift| (0..n).all(|i| a[i].approx_eq(&b[(i + shift) % n], tol)))
}
