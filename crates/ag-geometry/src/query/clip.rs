//! Sutherland–Hodgman clipping of one ring against a convex ring.

use tracing::debug;

use super::ring;
use super::segment::orient;
use super::Geom;
use crate::error::{GeomError, Result};
use crate::primitives::{Point, Polygon, ShapeRef, Winding};
use crate::scalar::{Scalar, Tolerance};

/// Intersection region of two polygonal shapes (rectangles or polygons).
///
/// The convex operand is used as the clipper; when neither is convex, or
/// either ring self-intersects, the request fails with `UnsupportedOperation`.
/// Returns `None` when the overlap is empty or has zero area, which includes
/// any operand without interior (a rectangle of zero width or height). The result is
/// counter-clockwise.
#[track_caller]
pub fn clip<'a, 'b>(
    subject: impl Into<ShapeRef<'a>>,
    clipper: impl Into<ShapeRef<'b>>,
    tol: Tolerance,
) -> Result<Option<Polygon>> {
    let (subject, clipper) = (subject.into(), clipper.into());
    match (Geom::from(subject), Geom::from(clipper)) {
        (Geom::Ring(s), Geom::Ring(c)) => clip_rings(&s, &c, tol),
        _ => Err(GeomError::unsupported(format!(
            "clipping needs two polygonal shapes, got {} and {}",
            subject.kind(),
            clipper.kind()
        ))),
    }
}

#[track_caller]
pub(crate) fn clip_rings(
    subject: &[Point],
    clipper: &[Point],
    tol: Tolerance,
) -> Result<Option<Polygon>> {
    let eps = tol.eps(ring::magnitude(subject).max(ring::magnitude(clipper)));
    if ring::flat_span(subject, eps).is_some() || ring::flat_span(clipper, eps).is_some() {
        return Ok(None);
    }
    if !ring::is_simple(subject, tol) || !ring::is_simple(clipper, tol) {
        debug!(
            subject_len = subject.len(),
            clipper_len = clipper.len(),
            "clip rejected: self-intersecting operand"
        );
        return Err(GeomError::unsupported(
            "clipping a self-intersecting ring is not supported",
        ));
    }
    let (subject, clipper) = if ring::is_convex(clipper, tol) {
        (subject, clipper)
    } else if ring::is_convex(subject, tol) {
        (clipper, subject)
    } else {
        debug!(
            subject_len = subject.len(),
            clipper_len = clipper.len(),
            "clip rejected: neither operand is convex"
        );
        return Err(GeomError::unsupported(
            "clipping two non-convex polygons is not supported",
        ));
    };

    let mut window: Vec<Point> = clipper.to_vec();
    if ring::signed_area(&window) < 0.0 {
        window.reverse();
    }

    let mut output: Vec<Point> = subject.to_vec();
    for (c0, c1) in ring::edges(&window) {
        if output.is_empty() {
            break;
        }
        let slack = eps * c0.distance_to(&c1);
        let side = |p: &Point| orient(&c0, &c1, p);
        let input = std::mem::take(&mut output);
        let mut s = input[input.len() - 1];
        for e in &input {
            let (ds, de) = (side(&s), side(e));
            let (s_in, e_in) = (ds >= -slack, de >= -slack);
            if e_in {
                if !s_in {
                    output.push(cut(&s, e, ds, de));
                }
                output.push(*e);
            } else if s_in {
                output.push(cut(&s, e, ds, de));
            }
            s = *e;
        }
    }

    let output = ring::dedup(output, tol);
    if output.len() < 3 {
        return Ok(None);
    }
    let area = ring::signed_area(&output);
    if area.abs() <= eps * ring::perimeter(&output) {
        return Ok(None);
    }
    let mut poly = Polygon::from_raw(output, Winding::from_signed_area(area));
    if poly.winding() == Winding::Clockwise {
        poly.reverse();
    }
    Ok(Some(poly))
}

/// Point on `s → e` where the signed side value crosses zero.
fn cut(s: &Point, e: &Point, ds: Scalar, de: Scalar) -> Point {
    let denom = ds - de;
    if denom == 0.0 {
        return *s;
    }
    s.lerp(e, ds / denom)
}
