//! Closed vertex-ring kernels shared by rectangles and polygons.
//!
//! A ring is a slice of vertices with an implicit closing edge. Membership
//! follows the even-odd rule, so self-intersecting rings are handled too.

use super::segment::{orient, point_segment_distance, segment_segment_distance};
use super::PointLocation;
use crate::primitives::{ApproxEq, Point};
use crate::scalar::{Scalar, Tolerance};

/// Edges `(v[i], v[i+1])`, closing back to `v[0]`.
pub(crate) fn edges(ring: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let n = ring.len();
    (0..n).map(move |i| (ring[i], ring[(i + 1) % n]))
}

/// Shoelace area; positive for counter-clockwise rings.
pub(crate) fn signed_area(ring: &[Point]) -> Scalar {
    0.5 * edges(ring)
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum::<Scalar>()
}

pub(crate) fn perimeter(ring: &[Point]) -> Scalar {
    edges(ring).map(|(a, b)| a.distance_to(&b)).sum()
}

pub(crate) fn vertex_mean(ring: &[Point]) -> Point {
    if ring.is_empty() {
        return Point::ORIGIN;
    }
    let n = ring.len() as Scalar;
    let (sx, sy) = ring
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

/// Area centroid; `None` for zero-area rings. Coordinates are taken relative
/// to the first vertex to limit cancellation.
pub(crate) fn area_centroid(ring: &[Point]) -> Option<Point> {
    let o = *ring.first()?;
    let mut a2 = 0.0;
    let (mut cx, mut cy) = (0.0, 0.0);
    for (p, q) in edges(ring) {
        let (p, q) = (p - o, q - o);
        let w = p.cross(&q);
        a2 += w;
        cx += (p.dx + q.dx) * w;
        cy += (p.dy + q.dy) * w;
    }
    if a2 == 0.0 || !a2.is_finite() {
        return None;
    }
    Some(Point::new(o.x + cx / (3.0 * a2), o.y + cy / (3.0 * a2)))
}

/// Even-odd ray cast towards +x with the half-open rule `(yi > py) != (yj > py)`,
/// so a vertex lying on the ray is counted once. No tolerance: boundary points
/// may land either way and must be caught by [`locate`] first.
pub(crate) fn ray_cast_inside(p: &Point, ring: &[Point]) -> bool {
    let mut inside = false;
    for (a, b) in edges(ring) {
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

/// Distance from `p` to the nearest edge.
pub(crate) fn boundary_distance(p: &Point, ring: &[Point]) -> Scalar {
    edges(ring)
        .map(|(a, b)| point_segment_distance(p, &a, &b))
        .fold(Scalar::INFINITY, Scalar::min)
}

/// `Boundary` within `eps` of an edge, else ray-cast classification.
pub(crate) fn locate(p: &Point, ring: &[Point], eps: Scalar) -> PointLocation {
    if boundary_distance(p, ring) <= eps {
        PointLocation::Boundary
    } else if ray_cast_inside(p, ring) {
        PointLocation::Inside
    } else {
        PointLocation::Outside
    }
}

/// Distance from the segment `[a, b]` to the ring boundary.
pub(crate) fn segment_boundary_distance(a: &Point, b: &Point, ring: &[Point]) -> Scalar {
    edges(ring)
        .map(|(c, d)| segment_segment_distance(a, b, &c, &d))
        .fold(Scalar::INFINITY, Scalar::min)
}

/// Endpoints of a ring without interior, such as a zero-width rectangle:
/// its area is within `eps` per unit of perimeter and every vertex lies within
/// `eps` of the chord between its two farthest vertices.
pub(crate) fn flat_span(ring: &[Point], eps: Scalar) -> Option<(Point, Point)> {
    let first = *ring.first()?;
    if signed_area(ring).abs() > eps * perimeter(ring) {
        return None;
    }
    let mut span = (first, first);
    let mut widest = 0.0;
    for (i, p) in ring.iter().enumerate() {
        for q in &ring[i + 1..] {
            let d = p.distance_squared_to(q);
            if d > widest {
                widest = d;
                span = (*p, *q);
            }
        }
    }
    let (a, b) = span;
    ring.iter()
        .all(|v| point_segment_distance(v, &a, &b) <= eps)
        .then_some(span)
}

/// Drop consecutive near-equal vertices, including across the wrap.
pub(crate) fn dedup(mut ring: Vec<Point>, tol: Tolerance) -> Vec<Point> {
    ring.dedup_by(|a, b| a.approx_eq(b, tol));
    while ring.len() > 1 && ring[0].approx_eq(&ring[ring.len() - 1], tol) {
        ring.pop();
    }
    ring
}

pub(crate) fn magnitude(ring: &[Point]) -> Scalar {
    ring.iter().map(Point::magnitude).fold(0.0, Scalar::max)
}

/// Every turn has the same sign (collinear turns ignored) and the ring winds once.
pub(crate) fn is_convex(ring: &[Point], tol: Tolerance) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let eps = tol.eps(magnitude(ring));
    let mut sign = 0.0;
    let mut turning = 0.0;
    for i in 0..n {
        let prev = ring[(i + n - 1) % n];
        let cur = ring[i];
        let next = ring[(i + 1) % n];
        let e0 = cur - prev;
        let e1 = next - cur;
        let c = e0.cross(&e1);
        turning += e0.cross(&e1).atan2(e0.dot(&e1));
        if c.abs() <= eps * e0.magnitude().max(e1.magnitude()) {
            if e0.dot(&e1) < 0.0 {
                // Spike: the ring doubles back on itself.
                return false;
            }
            continue;
        }
        if sign == 0.0 {
            sign = c.signum();
        } else if c.signum() != sign {
            return false;
        }
    }
    (turning.abs() - std::f64::consts::TAU).abs() < 1e-6
}

/// No two non-adjacent edges come within tolerance, and no adjacent pair folds back.
pub(crate) fn is_simple(ring: &[Point], tol: Tolerance) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let eps = tol.eps(magnitude(ring));
    for i in 0..n {
        let (a, b) = (ring[i], ring[(i + 1) % n]);
        let c = ring[(i + 2) % n];
        // Adjacent edges a→b, b→c overlap when c folds back along a→b.
        if orient(&a, &b, &c).abs() <= eps * a.distance_to(&b).max(b.distance_to(&c))
            && (b - a).dot(&(c - b)) < 0.0
        {
            return false;
        }
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (c, d) = (ring[j], ring[(j + 1) % n]);
            if segment_segment_distance(&a, &b, &c, &d) <= eps {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn vertex_on_ray_counts_once() {
        // Diamond: the ray from (0, 0) passes exactly through vertex (2, 0).
        let d = ring(&[(2.0, 0.0), (0.0, 2.0), (-2.0, 0.0), (0.0, -2.0)]);
        assert!(ray_cast_inside(&Point::new(0.0, 0.0), &d));
        assert!(!ray_cast_inside(&Point::new(-3.0, 0.0), &d));
        assert_eq!(locate(&Point::new(1.0, 1.0), &d, 1e-9), PointLocation::Boundary);
        assert_eq!(locate(&Point::new(5.0, 0.0), &d, 1e-9), PointLocation::Outside);
    }

    #[test]
    fn even_odd_for_self_intersecting_rings() {
        let star = ring(&[
            (0.0, 3.0),
            (1.8, -2.5),
            (-2.9, 1.0),
            (2.9, 1.0),
            (-1.8, -2.5),
        ]);
        // The pentagon in the middle is covered twice: even-odd says outside.
        assert!(!ray_cast_inside(&Point::new(0.0, 0.0), &star));
        // A point tip is covered once.
        assert!(ray_cast_inside(&Point::new(0.0, 2.0), &star));
        assert!(!is_simple(&star, Tolerance::default()));
        assert!(!is_convex(&star, Tolerance::default()));
    }

    #[test]
    fn flat_rings_reduce_to_their_span() {
        let flat = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 0.0), (0.0, 0.0)]);
        assert_eq!(
            flat_span(&flat, 1e-9),
            Some((Point::new(0.0, 0.0), Point::new(4.0, 0.0)))
        );
        let dot = ring(&[(1.0, 1.0), (1.0, 1.0), (1.0, 1.0), (1.0, 1.0)]);
        assert_eq!(flat_span(&dot, 1e-9), Some((Point::new(1.0, 1.0), Point::new(1.0, 1.0))));
        let square = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        assert_eq!(flat_span(&square, 1e-9), None);
    }

    #[test]
    fn area_and_centroid() {
        let tri = ring(&[(0.0, 0.0), (3.0, 0.0), (0.0, 3.0)]);
        assert_eq!(signed_area(&tri), 4.5);
        let c = area_centroid(&tri).unwrap();
        assert!((c.x - 1.0).abs() < 1e-12 && (c.y - 1.0).abs() < 1e-12);
        let flat = ring(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert!(area_centroid(&flat).is_none());
        assert_eq!(vertex_mean(&flat), Point::new(1.0, 0.0));
    }

    #[test]
    fn convexity_ignores_collinear_vertices_but_not_spikes() {
        let tol = Tolerance::default();
        let sq_mid = ring(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        assert!(is_convex(&sq_mid, tol));
        assert!(is_simple(&sq_mid, tol));
        let spike = ring(&[(0.0, 0.0), (2.0, 0.0), (3.0, 0.0), (2.5, 0.0), (2.0, 2.0)]);
        assert!(!is_convex(&spike, tol));
        assert!(!is_simple(&spike, tol));
    }
}
