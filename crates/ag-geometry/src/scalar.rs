//! Scalar type and the shared tolerance policy.
//!
//! Policy
//! - One `Tolerance` is threaded through every predicate. It combines an
//!   absolute epsilon (small shapes) with a relative one (large coordinates):
//!   `eps(scale) = max(abs_eps, rel_eps * scale)`.
//! - Queries pick `scale` as the largest coordinate magnitude of their operands,
//!   so the same value decides `intersects` and `distance`.
//! - Angles are normalized to `[0, 2π)`.

use std::f64::consts::{PI, TAU};

use crate::error::{GeomError, Result};

/// Floating-point type used by every primitive.
pub type Scalar = f64;

/// Absolute/relative epsilon pair.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerance {
    pub abs_eps: Scalar,
    pub rel_eps: Scalar,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            abs_eps: 1e-9,
            rel_eps: 1e-12,
        }
    }
}

impl Tolerance {
    /// Validated constructor: both epsilons finite and non-negative, `abs_eps > 0`.
    #[track_caller]
    pub fn new(abs_eps: Scalar, rel_eps: Scalar) -> Result<Self> {
        if !(abs_eps.is_finite() && rel_eps.is_finite()) {
            return Err(GeomError::invalid("tolerance epsilons must be finite"));
        }
        if abs_eps <= 0.0 || rel_eps < 0.0 {
            return Err(GeomError::invalid(format!(
                "tolerance needs abs_eps > 0 and rel_eps >= 0 (got {abs_eps}, {rel_eps})"
            )));
        }
        Ok(Self { abs_eps, rel_eps })
    }

    /// Purely absolute tolerance (no growth with magnitude).
    #[inline]
    pub fn absolute(abs_eps: Scalar) -> Self {
        Self {
            abs_eps,
            rel_eps: 0.0,
        }
    }

    /// Effective epsilon for values of magnitude `scale`.
    #[inline]
    pub fn eps(&self, scale: Scalar) -> Scalar {
        self.abs_eps.max(self.rel_eps * scale.abs())
    }

    /// `|a - b| <= eps(max(|a|, |b|))`.
    #[inline]
    pub fn approx_eq(&self, a: Scalar, b: Scalar) -> bool {
        (a - b).abs() <= self.eps(a.abs().max(b.abs()))
    }

    /// `|x| <= eps(scale)`.
    #[inline]
    pub fn is_zero(&self, x: Scalar, scale: Scalar) -> bool {
        x.abs() <= self.eps(scale)
    }
}

/// Map any finite angle into `[0, 2π)`.
#[inline]
pub fn normalize_angle(angle: Scalar) -> Scalar {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs.
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Signed difference `a - b` wrapped into `(-π, π]`.
#[inline]
pub fn angle_diff(a: Scalar, b: Scalar) -> Scalar {
    let d = normalize_angle(a - b);
    if d > PI {
        d - TAU
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eps_switches_from_absolute_to_relative() {
        let tol = Tolerance::default();
        assert_eq!(tol.eps(1.0), 1e-9);
        assert_eq!(tol.eps(0.0), 1e-9);
        assert!((tol.eps(1e6) - 1e-6).abs() < 1e-18);
        assert!(tol.approx_eq(1e9, 1e9 + 1e-4));
        assert!(!tol.approx_eq(1.0, 1.0 + 1e-6));
    }

    #[test]
    fn tolerance_rejects_bad_epsilons() {
        assert!(Tolerance::new(0.0, 1e-12).is_err());
        assert!(Tolerance::new(1e-9, -1.0).is_err());
        assert!(Tolerance::new(f64::NAN, 0.0).is_err());
        assert!(Tolerance::new(1e-6, 0.0).is_ok());
    }

    #[test]
    fn angles_normalize_into_half_open_range() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert!((normalize_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
        assert!((normalize_angle(5.0 * PI) - PI).abs() < 1e-12);
        assert_eq!(normalize_angle(TAU), 0.0);
        assert!(normalize_angle(-1e-300) < TAU);
        assert!((angle_diff(0.1, TAU - 0.1) - 0.2).abs() < 1e-12);
        assert!((angle_diff(TAU - 0.1, 0.1) + 0.2).abs() < 1e-12);
    }
}
