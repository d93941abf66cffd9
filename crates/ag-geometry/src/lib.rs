//! 2D geometry primitives, affine transforms, and tolerance-aware queries.
//!
//! Layout
//! - `scalar`: the `f64` scalar and the shared [`Tolerance`] policy.
//! - `primitives`: validated value types and the closed [`Shape`] sum type.
//! - `transform`: affine [`Transform`] and its application to every primitive.
//! - `query`: pairwise predicates, intersection geometry, hull, and clipping.
//! - `random`: seeded, replayable shape sampler.
//!
//! API Policy
//! - Values are immutable once built except through validating setters.
//! - Approximate equality is opt-in via [`ApproxEq`]; `==` is exact.
//! - The library emits `tracing` events but never installs a subscriber.

pub mod error;
pub mod primitives;
pub mod query;
pub mod random;
pub mod scalar;
pub mod transform;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{ErrorKind, GeomError, Result};
pub use primitives::{
    ApproxEq, Circle, LineSegment, Point, Polygon, Rectangle, Shape, ShapeKind, ShapeRef, Size,
    Vector, Winding,
};
pub use scalar::{Scalar, Tolerance};
pub use transform::{compose, Applied, Decomposition, Notice, Transform, Transformable};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::{ErrorKind, GeomError};
    pub use crate::primitives::{
        ApproxEq, Circle, LineSegment, Point, Polygon, Rectangle, Shape, ShapeKind, ShapeRef,
        Size, Vector, Winding,
    };
    pub use crate::query::{
        clip, contains, convex_hull, convex_hull_polygon, distance, intersection, intersects,
        overlap_area, point_in_polygon, segment_intersection, Intersection, PointLocation,
        SegmentIntersection,
    };
    pub use crate::random::{
        PolygonMode, ReplayToken, SamplerCfg, ShapeSample, ShapeSampler, VertexCount,
    };
    pub use crate::scalar::{Scalar, Tolerance};
    pub use crate::transform::{compose, Applied, Decomposition, Notice, Transform, Transformable};
}
