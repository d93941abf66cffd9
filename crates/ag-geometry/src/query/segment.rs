//! Point/segment and segment/segment kernels.

use tracing::trace;

use super::SegmentIntersection;
use crate::primitives::{LineSegment, Point};
use crate::scalar::Scalar;

/// Closest point on `[a, b]` to `p`; a zero-length segment answers `a`.
pub(crate) fn closest_point(p: &Point, a: &Point, b: &Point) -> Point {
    let ab = *b - *a;
    let len2 = ab.magnitude_squared();
    if len2 == 0.0 {
        return *a;
    }
    if !len2.is_finite() {
        return closest_point_rescaled(p, a, b);
    }
    let t = ((*p - *a).dot(&ab) / len2).clamp(0.0, 1.0);
    *a + ab * t
}

/// Projection for coordinates whose differences overflow `f64`: the parameter
/// is found in a frame shrunk to unit magnitude, and the result is blended from
/// the endpoints so no difference is ever formed at full scale.
fn closest_point_rescaled(p: &Point, a: &Point, b: &Point) -> Point {
    let m = p.magnitude().max(a.magnitude()).max(b.magnitude());
    let shrink = |q: &Point| Point::new(q.x / m, q.y / m);
    let (ps, as_, bs) = (shrink(p), shrink(a), shrink(b));
    let ab = bs - as_;
    let len2 = ab.magnitude_squared();
    if len2 == 0.0 {
        return *a;
    }
    let t = ((ps - as_).dot(&ab) / len2).clamp(0.0, 1.0);
    Point::new(a.x * (1.0 - t) + b.x * t, a.y * (1.0 - t) + b.y * t)
}

pub(crate) fn point_segment_distance(p: &Point, a: &Point, b: &Point) -> Scalar {
    p.distance_to(&closest_point(p, a, b))
}

/// `cross(b - a, c - a)`; positive when `c` lies left of `a → b`.
#[inline]
pub(crate) fn orient(a: &Point, b: &Point, c: &Point) -> Scalar {
    (*b - *a).cross(&(*c - *a))
}

/// Proper crossing: each segment's endpoints lie strictly on opposite sides of the other.
pub(crate) fn crosses_properly(a: &Point, b: &Point, c: &Point, d: &Point) -> bool {
    let o1 = orient(a, b, c);
    let o2 = orient(a, b, d);
    let o3 = orient(c, d, a);
    let o4 = orient(c, d, b);
    o1 * o2 < 0.0 && o3 * o4 < 0.0
}

/// Minimum distance between `[a, b]` and `[c, d]`; 0 when they cross.
pub(crate) fn segment_segment_distance(a: &Point, b: &Point, c: &Point, d: &Point) -> Scalar {
    if crosses_properly(a, b, c, d) {
        return 0.0;
    }
    point_segment_distance(a, c, d)
        .min(point_segment_distance(b, c, d))
        .min(point_segment_distance(c, a, b))
        .min(point_segment_distance(d, a, b))
}

/// Classify `[a, b] ∩ [c, d]` with absolute slack `eps`.
///
/// Near-parallel pairs (`|r × s| <= eps · max(|r|, |s|)`) never divide by the
/// determinant; they are split into collinear overlap / touching point /
/// disjoint by projection onto `a → b`.
pub(crate) fn intersect_segments(
    a: &Point,
    b: &Point,
    c: &Point,
    d: &Point,
    eps: Scalar,
) -> SegmentIntersection {
    let r = *b - *a;
    let s = *d - *c;
    let (lr, ls) = (r.magnitude(), s.magnitude());

    if lr <= eps || ls <= eps {
        // At least one operand is a point.
        let (p, q0, q1) = if lr <= eps { (a, c, d) } else { (c, a, b) };
        return if point_segment_distance(p, q0, q1) <= eps {
            SegmentIntersection::Point(*p)
        } else {
            SegmentIntersection::NoIntersection
        };
    }

    let denom = r.cross(&s);
    if denom.abs() <= eps * lr.max(ls) {
        let off_c = r.cross(&(*c - *a)).abs() / lr;
        let off_d = r.cross(&(*d - *a)).abs() / lr;
        if off_c <= eps && off_d <= eps {
            let tc = (*c - *a).dot(&r) / (lr * lr);
            let td = (*d - *a).dot(&r) / (lr * lr);
            let lo = tc.min(td).max(0.0);
            let hi = tc.max(td).min(1.0);
            let overlap = (hi - lo) * lr;
            trace!(overlap, lo, hi, "near-parallel segments classified as collinear");
            if overlap > eps {
                return SegmentIntersection::CollinearOverlap(LineSegment::from_points_unchecked(
                    *a + r * lo,
                    *a + r * hi,
                ));
            }
            if overlap >= -eps {
                let t = (0.5 * (lo + hi)).clamp(0.0, 1.0);
                return SegmentIntersection::Point(*a + r * t);
            }
            return SegmentIntersection::NoIntersection;
        }
        trace!(off_c, off_d, "near-parallel segments on distinct lines");
    } else {
        let qp = *c - *a;
        let t = qp.cross(&s) / denom;
        let u = qp.cross(&r) / denom;
        let (et, eu) = (eps / lr, eps / ls);
        if (-et..=1.0 + et).contains(&t) && (-eu..=1.0 + eu).contains(&u) {
            return SegmentIntersection::Point(*a + r * t.clamp(0.0, 1.0));
        }
    }

    // Touching within slack that the parametric test rejected (grazing endpoints).
    for (p, q0, q1) in [(c, a, b), (d, a, b), (a, c, d), (b, c, d)] {
        if point_segment_distance(p, q0, q1) <= eps {
            return SegmentIntersection::Point(*p);
        }
    }
    SegmentIntersection::NoIntersection
}
