//! Disk kernels: line/circle parameters, boundary crossings, overlap areas.

use std::f64::consts::PI;

use super::ring::edges;
use super::segment::closest_point;
use crate::primitives::{Point, Vector};
use crate::scalar::Scalar;

/// Parameters `t0 <= t1` where `start + t·dir` meets the circle of radius `r`
/// centred at the origin; `None` when the line misses or `dir` is zero.
pub(crate) fn line_circle_params(
    start: Vector,
    dir: Vector,
    r: Scalar,
) -> Option<(Scalar, Scalar)> {
    let a = dir.magnitude_squared();
    if a == 0.0 {
        return None;
    }
    let b = 2.0 * start.dot(&dir);
    let c = start.magnitude_squared() - r * r;
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    Some(((-b - sq) / (2.0 * a), (-b + sq) / (2.0 * a)))
}

/// Points where `[a, b]` meets the circle boundary, with slack `eps`.
/// A near-tangent segment reports its closest point once.
pub(crate) fn segment_circle_points(
    a: &Point,
    b: &Point,
    center: &Point,
    r: Scalar,
    eps: Scalar,
) -> Vec<Point> {
    let dir = *b - *a;
    let len = dir.magnitude();
    let mut out = Vec::with_capacity(2);
    if let Some((t0, t1)) = line_circle_params(*a - *center, dir, r) {
        let slack = if len > 0.0 { eps / len } else { 0.0 };
        for t in [t0, t1] {
            if (-slack..=1.0 + slack).contains(&t) {
                push_unique(&mut out, *a + dir * t.clamp(0.0, 1.0), eps);
            }
        }
    }
    if out.is_empty() {
        let q = closest_point(center, a, b);
        if (q.distance_to(center) - r).abs() <= eps {
            out.push(q);
        }
    }
    out
}

/// Boundary crossing points of two circles; one point when tangent within `eps`.
/// Concentric circles report nothing (their relation is containment).
pub(crate) fn circle_circle_points(
    c1: &Point,
    r1: Scalar,
    c2: &Point,
    r2: Scalar,
    eps: Scalar,
) -> Vec<Point> {
    let axis = *c2 - *c1;
    let d = axis.magnitude();
    if d <= eps {
        return Vec::new();
    }
    let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    let base = *c1 + axis * (a / d);
    let h2 = r1 * r1 - a * a;
    if h2 <= 0.0 {
        return vec![base];
    }
    let h = h2.sqrt();
    if h <= eps {
        return vec![base];
    }
    let off = axis.perp() * (h / d);
    vec![base + off, base - off]
}

/// Area of the intersection of two disks at centre distance `d`.
pub(crate) fn lens_area(d: Scalar, r1: Scalar, r2: Scalar) -> Scalar {
    if d >= r1 + r2 {
        return 0.0;
    }
    if d <= (r1 - r2).abs() {
        let r = r1.min(r2);
        return PI * r * r;
    }
    let alpha = ((d * d + r1 * r1 - r2 * r2) / (2.0 * d * r1)).clamp(-1.0, 1.0).acos();
    let beta = ((d * d + r2 * r2 - r1 * r1) / (2.0 * d * r2)).clamp(-1.0, 1.0).acos();
    let kite = (-d + r1 + r2) * (d + r1 - r2) * (d - r1 + r2) * (d + r1 + r2);
    r1 * r1 * alpha + r2 * r2 * beta - 0.5 * kite.max(0.0).sqrt()
}

/// Area of `disk ∩ ring` for a simple ring of either winding.
///
/// Sums, per edge, the signed area of the triangle (centre, p, q) clipped to
/// the disk: pieces inside the disk contribute a triangle, pieces outside a
/// circular sector.
pub(crate) fn disk_ring_area(center: &Point, r: Scalar, ring: &[Point]) -> Scalar {
    let mut total = 0.0;
    for (p, q) in edges(ring) {
        let (p, q) = (p - *center, q - *center);
        let dir = q - p;
        let mut ts = vec![0.0];
        if let Some((t0, t1)) = line_circle_params(p, dir, r) {
            ts.extend([t0, t1].into_iter().filter(|t| *t > 0.0 && *t < 1.0));
        }
        ts.push(1.0);
        for w in ts.windows(2) {
            let u = p + dir * w[0];
            let v = p + dir * w[1];
            let mid = p + dir * (0.5 * (w[0] + w[1]));
            total += if mid.magnitude() <= r {
                0.5 * u.cross(&v)
            } else {
                0.5 * r * r * u.cross(&v).atan2(u.dot(&v))
            };
        }
    }
    total.abs()
}

pub(crate) fn push_unique(out: &mut Vec<Point>, p: Point, eps: Scalar) {
    if !out.iter().any(|q| q.distance_to(&p) <= eps) {
        out.push(p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_circles_meet_at_two_points() {
        let pts =
            circle_circle_points(&Point::new(0.0, 0.0), 5.0, &Point::new(8.0, 0.0), 5.0, 1e-9);
        assert_eq!(pts, vec![Point::new(4.0, 3.0), Point::new(4.0, -3.0)]);
        let tangent =
            circle_circle_points(&Point::new(0.0, 0.0), 1.0, &Point::new(2.0, 0.0), 1.0, 1e-9);
        assert_eq!(tangent, vec![Point::new(1.0, 0.0)]);
    }

    #[test]
    fn lens_limits() {
        assert_eq!(lens_area(3.0, 1.0, 1.0), 0.0);
        assert!((lens_area(0.5, 1.0, 3.0) - PI).abs() < 1e-12);
        // Two unit disks at distance 1: 2π/3 - √3/2.
        let want = 2.0 * PI / 3.0 - 3f64.sqrt() / 2.0;
        assert!((lens_area(1.0, 1.0, 1.0) - want).abs() < 1e-12);
    }

    #[test]
    fn disk_area_against_squares() {
        let sq = [
            Point::new(-10.0, -10.0),
            Point::new(10.0, -10.0),
            Point::new(10.0, 10.0),
            Point::new(-10.0, 10.0),
        ];
        // Disk fully inside the square.
        assert!((disk_ring_area(&Point::ORIGIN, 2.0, &sq) - 4.0 * PI).abs() < 1e-9);
        // Square fully inside the disk.
        assert!((disk_ring_area(&Point::ORIGIN, 20.0, &sq) - 400.0).abs() < 1e-9);
        // Disk centred on a corner: a quarter of it, regardless of winding.
        let mut cw = sq;
        cw.reverse();
        let quarter = disk_ring_area(&Point::new(10.0, 10.0), 1.0, &cw);
        assert!((quarter - PI / 4.0).abs() < 1e-9);
    }

    #[test]
    fn segment_crossings_and_tangent() {
        let c = Point::ORIGIN;
        let pts =
            segment_circle_points(&Point::new(-2.0, 0.0), &Point::new(2.0, 0.0), &c, 1.0, 1e-9);
        assert_eq!(pts, vec![Point::new(-1.0, 0.0), Point::new(1.0, 0.0)]);
        let touch =
            segment_circle_points(&Point::new(-2.0, 1.0), &Point::new(2.0, 1.0), &c, 1.0, 1e-9);
        assert_eq!(touch.len(), 1);
        assert!(touch[0].distance_to(&Point::new(0.0, 1.0)) < 1e-9);
        let inside =
            segment_circle_points(&Point::new(-0.5, 0.0), &Point::new(0.5, 0.0), &c, 1.0, 1e-9);
        assert!(inside.is_empty());
    }
}
