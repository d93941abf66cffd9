//! Construction of the shared geometry of two shapes.

use tracing::trace;

use super::circle::{circle_circle_points, line_circle_params, push_unique, segment_circle_points};
use super::clip::clip_rings;
use super::predicates::{self, split_params};
use super::ring::{self, locate};
use super::segment::{closest_point, intersect_segments};
use super::{intersects, pair_eps, Geom, Intersection, PointLocation, SegmentIntersection};
use crate::error::Result;
use crate::primitives::{ApproxEq, LineSegment, Point, Shape, ShapeRef};
use crate::scalar::{Scalar, Tolerance};

impl From<SegmentIntersection> for Intersection {
    fn from(s: SegmentIntersection) -> Self {
        match s {
            SegmentIntersection::NoIntersection => Intersection::NoIntersection,
            SegmentIntersection::Point(p) => Intersection::Point(p),
            SegmentIntersection::CollinearOverlap(seg) => Intersection::Segment(seg),
        }
    }
}

#[track_caller]
pub(crate) fn intersection(
    a: ShapeRef<'_>,
    b: ShapeRef<'_>,
    tol: Tolerance,
) -> Result<Intersection> {
    if !intersects(a, b, tol) {
        return Ok(Intersection::NoIntersection);
    }
    let eps = pair_eps(&a, &b, tol);
    let (ga, gb) = (Geom::from(a), Geom::from(b));
    let a_in_b = predicates::contains(&gb, &ga, eps);
    let b_in_a = predicates::contains(&ga, &gb, eps);
    match (a_in_b, b_in_a) {
        (true, true) => return Ok(Intersection::Identical),
        (true, false) => return Ok(whole(a)),
        (false, true) => return Ok(whole(b)),
        (false, false) => {}
    }
    trace!(a = %a.kind(), b = %b.kind(), eps, "partial overlap");

    Ok(match (&ga, &gb) {
        // A point that touches anything is contained in it; kept for exhaustiveness.
        (Geom::Point(p), _) | (_, Geom::Point(p)) => Intersection::Point(*p),
        (Geom::Segment(s0, s1), Geom::Segment(t0, t1)) => {
            intersect_segments(s0, s1, t0, t1, eps).into()
        }
        (Geom::Segment(s0, s1), Geom::Ring(r)) | (Geom::Ring(r), Geom::Segment(s0, s1)) => {
            match ring::flat_span(r, eps) {
                Some((t0, t1)) => intersect_segments(s0, s1, &t0, &t1, eps).into(),
                None => segment_ring(s0, s1, r, eps),
            }
        }
        (Geom::Segment(s0, s1), Geom::Disk(c, rad))
        | (Geom::Disk(c, rad), Geom::Segment(s0, s1)) => segment_disk(s0, s1, c, *rad, eps),
        (Geom::Ring(r1), Geom::Ring(r2)) => {
            match (ring::flat_span(r1, eps), ring::flat_span(r2, eps)) {
                (Some((s0, s1)), Some((t0, t1))) => {
                    intersect_segments(&s0, &s1, &t0, &t1, eps).into()
                }
                (Some((s0, s1)), None) => segment_ring(&s0, &s1, r2, eps),
                (None, Some((t0, t1))) => segment_ring(&t0, &t1, r1, eps),
                (None, None) => match clip_rings(r1, r2, tol)? {
                    Some(poly) => Intersection::Region(Shape::Polygon(poly)),
                    None => ring_contacts(r1, r2, eps),
                },
            }
        }
        (Geom::Ring(r), Geom::Disk(c, rad)) | (Geom::Disk(c, rad), Geom::Ring(r)) => {
            if let Some((s0, s1)) = ring::flat_span(r, eps) {
                return Ok(segment_disk(&s0, &s1, c, *rad, eps));
            }
            let mut pts = Vec::new();
            for (p, q) in ring::edges(r) {
                for x in segment_circle_points(&p, &q, c, *rad, eps) {
                    push_unique(&mut pts, x, eps);
                }
            }
            assemble(pts, Vec::new())
        }
        (Geom::Disk(c1, r1), Geom::Disk(c2, r2)) => {
            assemble(circle_circle_points(c1, *r1, c2, *r2, eps), Vec::new())
        }
    })
}

/// The whole operand, as the matching variant.
fn whole(s: ShapeRef<'_>) -> Intersection {
    match s {
        ShapeRef::Point(p) => Intersection::Point(*p),
        ShapeRef::Segment(seg) => Intersection::Segment(*seg),
        other => Intersection::Region(other.to_shape()),
    }
}

/// Segments take precedence; isolated touch points are reported only when
/// there is no one-dimensional piece.
fn assemble(points: Vec<Point>, mut segments: Vec<LineSegment>) -> Intersection {
    match segments.len() {
        0 => {}
        1 => return Intersection::Segment(segments.remove(0)),
        _ => return Intersection::Segments(segments),
    }
    let mut points = points;
    match points.len() {
        0 => Intersection::NoIntersection,
        1 => Intersection::Point(points.remove(0)),
        _ => Intersection::Points(points),
    }
}

/// Pieces of `s0 → s1` inside or on the ring, merged, plus isolated contacts.
fn segment_ring(s0: &Point, s1: &Point, r: &[Point], eps: Scalar) -> Intersection {
    let len = s0.distance_to(s1);
    let ts = split_params(s0, s1, r, eps);
    let mut spans: Vec<(Scalar, Scalar)> = Vec::new();
    for w in ts.windows(2) {
        let mid = s0.lerp(s1, 0.5 * (w[0] + w[1]));
        if locate(&mid, r, eps) == PointLocation::Outside {
            continue;
        }
        match spans.last_mut() {
            Some(last) if last.1 == w[0] => last.1 = w[1],
            _ => spans.push((w[0], w[1])),
        }
    }
    let mut segments = Vec::new();
    let mut points = Vec::new();
    for &(t0, t1) in &spans {
        let (p, q) = (s0.lerp(s1, t0), s0.lerp(s1, t1));
        if (t1 - t0) * len > eps {
            segments.push(LineSegment::from_points_unchecked(p, q));
        } else {
            push_unique(&mut points, p.midpoint(&q), eps);
        }
    }
    for &t in &ts {
        if spans.iter().any(|&(t0, t1)| t >= t0 && t <= t1) {
            continue;
        }
        let p = s0.lerp(s1, t);
        if locate(&p, r, eps) != PointLocation::Outside {
            push_unique(&mut points, p, eps);
        }
    }
    assemble(points, segments)
}

fn segment_disk(s0: &Point, s1: &Point, c: &Point, r: Scalar, eps: Scalar) -> Intersection {
    let dir = *s1 - *s0;
    let tangent = || Intersection::Point(closest_point(c, s0, s1));
    let Some((t0, t1)) = line_circle_params(*s0 - *c, dir, r) else {
        return tangent();
    };
    let (t0, t1) = (t0.max(0.0), t1.min(1.0));
    if t0 > t1 {
        return tangent();
    }
    if (t1 - t0) * dir.magnitude() <= eps {
        return Intersection::Point(s0.lerp(s1, 0.5 * (t0 + t1)));
    }
    Intersection::Segment(LineSegment::from_points_unchecked(
        s0.lerp(s1, t0),
        s0.lerp(s1, t1),
    ))
}

/// Boundary contacts of two rings whose overlap has no area.
fn ring_contacts(r1: &[Point], r2: &[Point], eps: Scalar) -> Intersection {
    let tol = Tolerance::absolute(eps);
    let mut points = Vec::new();
    let mut segments: Vec<LineSegment> = Vec::new();
    for (a, b) in ring::edges(r1) {
        for (c, d) in ring::edges(r2) {
            match intersect_segments(&a, &b, &c, &d, eps) {
                SegmentIntersection::NoIntersection => {}
                SegmentIntersection::Point(p) => push_unique(&mut points, p, eps),
                SegmentIntersection::CollinearOverlap(s) => {
                    let seen = segments
                        .iter()
                        .any(|q| q.approx_eq(&s, tol) || q.approx_eq(&s.reversed(), tol));
                    if !seen {
                        segments.push(s);
                    }
                }
            }
        }
    }
    assemble(points, segments)
}
