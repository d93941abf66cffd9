use std::fmt;

use super::ApproxEq;
use crate::error::{GeomError, Result};
use crate::scalar::{Scalar, Tolerance};

/// Width/height pair; both finite and non-negative.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "(Scalar, Scalar)", into = "(Scalar, Scalar)")
)]
pub struct Size {
    width: Scalar,
    height: Scalar,
}

impl Size {
    /// Fails with `InvalidGeometry` on negative or non-finite extents; never clamps.
    #[track_caller]
    pub fn new(width: Scalar, height: Scalar) -> Result<Self> {
        if !(width.is_finite() && height.is_finite()) {
            return Err(GeomError::invalid(format!(
                "size must be finite (got {width} x {height})"
            )));
        }
        if width < 0.0 || height < 0.0 {
            return Err(GeomError::invalid(format!(
                "size must be non-negative (got {width} x {height})"
            )));
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> Scalar {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Scalar {
        self.height
    }

    #[track_caller]
    pub fn set_width(&mut self, width: Scalar) -> Result<()> {
        *self = Self::new(width, self.height)?;
        Ok(())
    }

    #[track_caller]
    pub fn set_height(&mut self, height: Scalar) -> Result<()> {
        *self = Self::new(self.width, height)?;
        Ok(())
    }

    #[inline]
    pub fn area(&self) -> Scalar {
        self.width * self.height
    }

    /// True when either extent is within tolerance of zero.
    pub fn is_degenerate(&self, tol: Tolerance) -> bool {
        let scale = self.width.max(self.height);
        tol.is_zero(self.width, scale) || tol.is_zero(self.height, scale)
    }
}

impl TryFrom<(Scalar, Scalar)> for Size {
    type Error = GeomError;

    fn try_from((width, height): (Scalar, Scalar)) -> Result<Self> {
        Self::new(width, height)
    }
}

impl From<Size> for (Scalar, Scalar) {
    fn from(s: Size) -> Self {
        (s.width, s.height)
    }
}

impl ApproxEq for Size {
    fn approx_eq(&self, other: &Self, tol: Tolerance) -> bool {
        tol.approx_eq(self.width, other.width) && tol.approx_eq(self.height, other.height)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn negative_extents_are_rejected_not_clamped() {
        let err = Size::new(-1.0, 2.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidGeometry);
        assert!(Size::new(1.0, f64::NAN).is_err());
        assert!(Size::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn setters_recheck_and_keep_old_value_on_failure() {
        let mut s = Size::new(2.0, 3.0).unwrap();
        assert_eq!(s.area(), 6.0);
        assert!(s.set_width(-0.5).is_err());
        assert_eq!(s.width(), 2.0);
        s.set_height(0.0).unwrap();
        assert!(s.is_degenerate(Tolerance::default()));
        assert_eq!(s.to_string(), "2x0");
    }
}
