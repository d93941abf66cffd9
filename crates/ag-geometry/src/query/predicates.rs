//! Distance and containment over lowered shapes.

use super::ring::{self, boundary_distance, locate, ray_cast_inside, segment_boundary_distance};
use super::segment::{intersect_segments, point_segment_distance, segment_segment_distance};
use super::{Geom, Geom as G, PointLocation, SegmentIntersection};
use crate::primitives::Point;
use crate::scalar::Scalar;

pub(crate) fn distance(a: &Geom<'_>, b: &Geom<'_>) -> Scalar {
    match (a, b) {
        (G::Point(p), G::Point(q)) => p.distance_to(q),
        (G::Point(p), G::Segment(c, d)) | (G::Segment(c, d), G::Point(p)) => {
            point_segment_distance(p, c, d)
        }
        (G::Point(p), G::Ring(r)) | (G::Ring(r), G::Point(p)) => point_ring_distance(p, r),
        (G::Point(p), G::Disk(c, rad)) | (G::Disk(c, rad), G::Point(p)) => {
            (p.distance_to(c) - rad).max(0.0)
        }
        (G::Segment(a, b), G::Segment(c, d)) => segment_segment_distance(a, b, c, d),
        (G::Segment(a, b), G::Ring(r)) | (G::Ring(r), G::Segment(a, b)) => {
            if ray_cast_inside(a, r) {
                0.0
            } else {
                segment_boundary_distance(a, b, r)
            }
        }
        (G::Segment(a, b), G::Disk(c, rad)) | (G::Disk(c, rad), G::Segment(a, b)) => {
            (point_segment_distance(c, a, b) - rad).max(0.0)
        }
        (G::Ring(r1), G::Ring(r2)) => ring_ring_distance(r1, r2),
        (G::Ring(r), G::Disk(c, rad)) | (G::Disk(c, rad), G::Ring(r)) => {
            if ray_cast_inside(c, r) {
                0.0
            } else {
                (boundary_distance(c, r) - rad).max(0.0)
            }
        }
        (G::Disk(c1, r1), G::Disk(c2, r2)) => (c1.distance_to(c2) - r1 - r2).max(0.0),
    }
}

fn point_ring_distance(p: &Point, r: &[Point]) -> Scalar {
    if ray_cast_inside(p, r) {
        0.0
    } else {
        boundary_distance(p, r)
    }
}

fn ring_ring_distance(r1: &[Point], r2: &[Point]) -> Scalar {
    let nested = r1.first().is_some_and(|p| ray_cast_inside(p, r2))
        || r2.first().is_some_and(|p| ray_cast_inside(p, r1));
    if nested {
        return 0.0;
    }
    ring::edges(r1)
        .map(|(a, b)| segment_boundary_distance(&a, &b, r2))
        .fold(Scalar::INFINITY, Scalar::min)
}

/// `inner ⊆ outer` with slack `eps`.
pub(crate) fn contains(outer: &Geom<'_>, inner: &Geom<'_>, eps: Scalar) -> bool {
    match (outer, inner) {
        // Convex outers: checking the inner shape's extreme points is enough.
        (G::Point(_) | G::Segment(..) | G::Disk(..), G::Point(q)) => covers_point(outer, q, eps),
        (G::Point(_) | G::Segment(..) | G::Disk(..), G::Segment(c, d)) => {
            covers_point(outer, c, eps) && covers_point(outer, d, eps)
        }
        (G::Point(_) | G::Segment(..) | G::Disk(..), G::Ring(r)) => {
            r.iter().all(|v| covers_point(outer, v, eps))
        }
        (G::Point(p), G::Disk(c, rad)) => p.distance_to(c) + rad <= eps,
        (G::Segment(a, b), G::Disk(c, rad)) => point_segment_distance(c, a, b) + rad <= eps,
        (G::Disk(c1, r1), G::Disk(c2, r2)) => c1.distance_to(c2) + r2 <= r1 + eps,

        (G::Ring(r), G::Point(p)) => locate(p, r, eps) != PointLocation::Outside,
        (G::Ring(r), G::Segment(a, b)) => segment_within_ring(a, b, r, eps),
        (G::Ring(outer), G::Ring(inner)) => {
            ring::edges(inner).all(|(a, b)| segment_within_ring(&a, &b, outer, eps))
                && !ring::edges(outer).any(|(a, b)| segment_enters_ring(&a, &b, inner, eps))
        }
        (G::Ring(r), G::Disk(c, rad)) => match locate(c, r, eps) {
            PointLocation::Outside => false,
            PointLocation::Boundary => *rad <= eps,
            PointLocation::Inside => boundary_distance(c, r) + eps >= *rad,
        },
    }
}

fn covers_point(outer: &Geom<'_>, p: &Point, eps: Scalar) -> bool {
    distance(outer, &Geom::Point(*p)) <= eps
}

/// Sorted parameters along `a → b` that split it at every ring-edge contact.
pub(crate) fn split_params(a: &Point, b: &Point, r: &[Point], eps: Scalar) -> Vec<Scalar> {
    let dir = *b - *a;
    let len2 = dir.magnitude_squared();
    let mut ts = vec![0.0, 1.0];
    if len2 == 0.0 {
        return ts;
    }
    let param = |p: &Point| ((*p - *a).dot(&dir) / len2).clamp(0.0, 1.0);
    for (c, d) in ring::edges(r) {
        match intersect_segments(a, b, &c, &d, eps) {
            SegmentIntersection::NoIntersection => {}
            SegmentIntersection::Point(p) => ts.push(param(&p)),
            SegmentIntersection::CollinearOverlap(s) => {
                ts.push(param(&s.start()));
                ts.push(param(&s.end()));
            }
        }
    }
    ts.sort_by(|x, y| x.total_cmp(y));
    ts.dedup_by(|x, y| (*x - *y).abs() <= f64::EPSILON);
    ts
}

/// Piece midpoints of `a → b` after splitting at ring contacts.
pub(crate) fn piece_midpoints(
    a: &Point,
    b: &Point,
    r: &[Point],
    eps: Scalar,
) -> Vec<(Scalar, Scalar, Point)> {
    split_params(a, b, r, eps)
        .windows(2)
        .map(|w| (w[0], w[1], a.lerp(b, 0.5 * (w[0] + w[1]))))
        .collect()
}

fn segment_within_ring(a: &Point, b: &Point, r: &[Point], eps: Scalar) -> bool {
    locate(a, r, eps) != PointLocation::Outside
        && locate(b, r, eps) != PointLocation::Outside
        && piece_midpoints(a, b, r, eps)
            .iter()
            .all(|(_, _, m)| locate(m, r, eps) != PointLocation::Outside)
}

/// Some piece of `a → b` lies strictly inside the ring.
fn segment_enters_ring(a: &Point, b: &Point, r: &[Point], eps: Scalar) -> bool {
    locate(a, r, eps) == PointLocation::Inside
        || piece_midpoints(a, b, r, eps)
            .iter()
            .any(|(_, _, m)| locate(m, r, eps) == PointLocation::Inside)
}
