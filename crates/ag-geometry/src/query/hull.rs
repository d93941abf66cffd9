use std::cmp::Ordering;

use super::ring;
use super::segment::orient;
use crate::error::{GeomError, Result};
use crate::primitives::{ApproxEq, Point, Polygon};
use crate::scalar::Tolerance;

/// Andrew's monotone chain convex hull, counter-clockwise, starting at the
/// lowest-x (then lowest-y) point.
///
/// Duplicates and points within tolerance of a hull edge are dropped, so
/// collinear inputs produce two points and a single distinct input one point.
#[track_caller]
pub fn convex_hull(points: &[Point], tol: Tolerance) -> Result<Vec<Point>> {
    for p in points {
        p.ensure_finite()?;
    }
    let mut pts = points.to_vec();
    pts.sort_by(|a, b| match a.x.total_cmp(&b.x) {
        Ordering::Equal => a.y.total_cmp(&b.y),
        o => o,
    });
    pts.dedup_by(|a, b| a.approx_eq(b, tol));
    if pts.len() < 3 {
        return Ok(pts);
    }
    let eps = tol.eps(pts.iter().map(Point::magnitude).fold(0.0, f64::max));
    // Pop while `mid` is right of, or within eps of, the chord `prev → p`.
    let keeps_turn = |prev: &Point, mid: &Point, p: &Point| {
        orient(prev, mid, p) > eps * prev.distance_to(p)
    };

    let mut lower: Vec<Point> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && !keeps_turn(&lower[lower.len() - 2], &lower[lower.len() - 1], p) {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Point> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && !keeps_turn(&upper[upper.len() - 2], &upper[upper.len() - 1], p) {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    // Near-duplicates need not be sort neighbours; they meet again on the hull.
    Ok(ring::dedup(hull, tol))
}

/// Hull as a counter-clockwise polygon; fails with `InvalidGeometry` when the
/// points span fewer than 3 hull vertices.
#[track_caller]
pub fn convex_hull_polygon(points: &[Point], tol: Tolerance) -> Result<Polygon> {
    let hull = convex_hull(points, tol)?;
    if hull.len() < 3 {
        return Err(GeomError::invalid(format!(
            "convex hull of {} points has only {} vertices",
            points.len(),
            hull.len()
        )));
    }
    Polygon::with_tolerance(hull, tol)
}
