//! Error type shared by constructors, transforms, and queries.
//!
//! Every error records its kind, a message, and the source location that
//! raised it. Errors are local to the failing call; nothing is retried.

use std::fmt;
use std::panic::Location;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = GeomError> = std::result::Result<T, E>;

/// Coarse classification of a [`GeomError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A construction or mutation invariant is violated.
    InvalidGeometry,
    /// A mathematical precondition fails at evaluation time.
    DegenerateOperation,
    /// The requested combination is out of scope.
    UnsupportedOperation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::InvalidGeometry => "invalid geometry",
            ErrorKind::DegenerateOperation => "degenerate operation",
            ErrorKind::UnsupportedOperation => "unsupported operation",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum GeomError {
    #[error("invalid geometry: {message} (at {location})")]
    InvalidGeometry {
        message: String,
        location: &'static Location<'static>,
    },
    #[error("degenerate operation: {message} (at {location})")]
    DegenerateOperation {
        message: String,
        location: &'static Location<'static>,
    },
    #[error("unsupported operation: {message} (at {location})")]
    UnsupportedOperation {
        message: String,
        location: &'static Location<'static>,
    },
}

impl GeomError {
    #[track_caller]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            message: message.into(),
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateOperation {
            message: message.into(),
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            message: message.into(),
            location: Location::caller(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidGeometry { .. } => ErrorKind::InvalidGeometry,
            Self::DegenerateOperation { .. } => ErrorKind::DegenerateOperation,
            Self::UnsupportedOperation { .. } => ErrorKind::UnsupportedOperation,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidGeometry { message, .. }
            | Self::DegenerateOperation { message, .. }
            | Self::UnsupportedOperation { message, .. } => message,
        }
    }

    /// Source location that raised the error.
    pub fn location(&self) -> &'static Location<'static> {
        match self {
            Self::InvalidGeometry { location, .. }
            | Self::DegenerateOperation { location, .. }
            | Self::UnsupportedOperation { location, .. } => *location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_message_and_location_round_out_the_report() {
        let line = line!() + 1;
        let err = GeomError::invalid("negative width");
        assert_eq!(err.kind(), ErrorKind::InvalidGeometry);
        assert_eq!(err.message(), "negative width");
        assert_eq!(err.location().line(), line);
        assert!(err.location().file().ends_with("error.rs"));
        let text = err.to_string();
        assert!(text.starts_with("invalid geometry: negative width (at "));
    }

    #[test]
    fn each_constructor_maps_to_its_kind() {
        assert_eq!(
            GeomError::degenerate("zero vector").kind(),
            ErrorKind::DegenerateOperation
        );
        assert_eq!(
            GeomError::unsupported("non-convex clip").kind(),
            ErrorKind::UnsupportedOperation
        );
        assert_eq!(ErrorKind::UnsupportedOperation.to_string(), "unsupported operation");
    }
}
