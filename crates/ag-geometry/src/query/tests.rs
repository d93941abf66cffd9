use super::*;
use crate::error::ErrorKind;
use crate::primitives::{ApproxEq, Circle, Rectangle, Size};
use std::f64::consts::PI;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn rect(x: f64, y: f64, w: f64, h: f64) -> Rectangle {
    Rectangle::new(p(x, y), Size::new(w, h).unwrap()).unwrap()
}

fn seg(a: (f64, f64), b: (f64, f64)) -> LineSegment {
    LineSegment::new(p(a.0, a.1), p(b.0, b.1)).unwrap()
}

fn poly(coords: &[(f64, f64)]) -> Polygon {
    Polygon::new(coords.iter().map(|&(x, y)| p(x, y)).collect()).unwrap()
}

fn has_point(points: &[Point], want: Point) -> bool {
    points.iter().any(|q| q.approx_eq(&want, Tolerance::absolute(1e-9)))
}

#[test]
fn crossing_diagonals_meet_in_the_middle() {
    let tol = Tolerance::default();
    let a = seg((0.0, 0.0), (4.0, 4.0));
    let b = seg((0.0, 4.0), (4.0, 0.0));
    match segment_intersection(&a, &b, tol) {
        SegmentIntersection::Point(q) => assert!(q.approx_eq(&p(2.0, 2.0), tol), "{q}"),
        other => panic!("expected a point, got {other:?}"),
    }
    match intersection(&a, &b, tol).unwrap() {
        Intersection::Point(q) => assert!(q.approx_eq(&p(2.0, 2.0), tol)),
        other => panic!("expected a point, got {other}"),
    }
}

#[test]
fn parallel_and_collinear_segments() {
    let tol = Tolerance::default();
    let base = seg((0.0, 0.0), (2.0, 0.0));
    assert_eq!(
        segment_intersection(&base, &seg((0.0, 1.0), (2.0, 1.0)), tol),
        SegmentIntersection::NoIntersection
    );
    match segment_intersection(&base, &seg((1.0, 0.0), (3.0, 0.0)), tol) {
        SegmentIntersection::CollinearOverlap(s) => {
            assert!(s.start().approx_eq(&p(1.0, 0.0), tol));
            assert!(s.end().approx_eq(&p(2.0, 0.0), tol));
        }
        other => panic!("expected overlap, got {other:?}"),
    }
    // Collinear, end-to-end.
    match segment_intersection(&base, &seg((2.0, 0.0), (3.0, 0.0)), tol) {
        SegmentIntersection::Point(q) => assert!(q.approx_eq(&p(2.0, 0.0), tol)),
        other => panic!("expected a touch point, got {other:?}"),
    }
    assert_eq!(
        segment_intersection(&base, &seg((3.0, 0.0), (4.0, 0.0)), tol),
        SegmentIntersection::NoIntersection
    );
}

#[test]
fn equal_circles_cross_at_two_points() {
    let tol = Tolerance::default();
    let a = Circle::new(p(0.0, 0.0), 5.0).unwrap();
    let b = Circle::new(p(8.0, 0.0), 5.0).unwrap();
    assert!(intersects(&a, &b, tol));
    assert_eq!(distance(&a, &b), 0.0);
    match intersection(&a, &b, tol).unwrap() {
        Intersection::Points(pts) => {
            assert_eq!(pts.len(), 2);
            assert!(has_point(&pts, p(4.0, 3.0)));
            assert!(has_point(&pts, p(4.0, -3.0)));
        }
        other => panic!("expected two points, got {other}"),
    }
}

#[test]
fn rectangle_boundary_is_inclusive() {
    let tol = Tolerance::default();
    let r = rect(0.0, 0.0, 10.0, 10.0);
    assert!(contains(&r, &p(10.0, 10.0), tol));
    assert!(contains(&r, &p(5.0, 0.0), tol));
    assert!(!contains(&r, &p(10.1, 10.0), tol));
    assert!(intersects(&r, &p(10.0, 10.0), tol));
}

#[test]
fn two_vertex_polygon_is_rejected() {
    let err = Polygon::new(vec![p(0.0, 0.0), p(1.0, 1.0)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidGeometry);
}

#[test]
fn every_shape_contains_itself() {
    let tol = Tolerance::default();
    let shapes: Vec<Shape> = vec![
        p(1.0, 2.0).into(),
        seg((0.0, 0.0), (3.0, 1.0)).into(),
        rect(-1.0, -1.0, 2.0, 3.0).into(),
        Rectangle::with_rotation(p(1.0, 1.0), Size::new(2.0, 1.0).unwrap(), 0.7)
            .unwrap()
            .into(),
        Circle::new(p(0.5, 0.5), 2.0).unwrap().into(),
        poly(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (2.0, 1.0), (0.0, 4.0)]).into(),
    ];
    for s in &shapes {
        assert!(contains(s, s, tol), "{s}");
        assert!(intersects(s, s, tol), "{s}");
        assert_eq!(intersection(s, s, tol).unwrap(), Intersection::Identical, "{s}");
    }
}

#[test]
fn rectangle_and_matching_polygon_are_identical() {
    let tol = Tolerance::default();
    let r = rect(0.0, 0.0, 2.0, 1.0);
    let q = poly(&[(2.0, 1.0), (0.0, 1.0), (0.0, 0.0), (2.0, 0.0)]);
    assert_eq!(intersection(&r, &q, tol).unwrap(), Intersection::Identical);
}

#[test]
fn containment_short_circuits_to_the_inner_shape() {
    let tol = Tolerance::default();
    let outer = rect(0.0, 0.0, 10.0, 10.0);
    let inner = Circle::new(p(5.0, 5.0), 2.0).unwrap();
    assert_eq!(
        intersection(&outer, &inner, tol).unwrap(),
        Intersection::Region(Shape::Circle(inner))
    );
    assert_eq!(
        intersection(&inner, &outer, tol).unwrap(),
        Intersection::Region(Shape::Circle(inner))
    );
    let chord = seg((1.0, 1.0), (9.0, 2.0));
    assert_eq!(
        intersection(&outer, &chord, tol).unwrap(),
        Intersection::Segment(chord)
    );
}

#[test]
fn overlapping_regions_are_clipped() {
    let tol = Tolerance::default();
    let a = rect(0.0, 0.0, 2.0, 2.0);
    let b = poly(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
    match intersection(&a, &b, tol).unwrap() {
        Intersection::Region(Shape::Polygon(out)) => {
            assert!((out.area() - 1.0).abs() < 1e-12);
            let want = poly(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)]);
            assert!(out.approx_eq(&want, tol), "{out}");
        }
        other => panic!("expected a region, got {other}"),
    }
    assert!((overlap_area(&a, &b, tol).unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn segment_crossing_a_rectangle_is_clipped_to_it() {
    let tol = Tolerance::default();
    let r = rect(0.0, 0.0, 2.0, 2.0);
    match intersection(&seg((-1.0, 1.0), (3.0, 1.0)), &r, tol).unwrap() {
        Intersection::Segment(s) => {
            assert!(s.start().approx_eq(&p(0.0, 1.0), tol));
            assert!(s.end().approx_eq(&p(2.0, 1.0), tol));
        }
        other => panic!("expected a segment, got {other}"),
    }
}

#[test]
fn circle_and_rectangle_contacts() {
    let tol = Tolerance::default();
    let r = rect(0.0, 0.0, 2.0, 2.0);
    let far = Circle::new(p(5.0, 1.0), 1.0).unwrap();
    assert_eq!(distance(&r, &far), 2.0);
    assert!(!intersects(&r, &far, tol));
    assert_eq!(intersection(&r, &far, tol).unwrap(), Intersection::NoIntersection);

    let tangent = Circle::new(p(3.0, 1.0), 1.0).unwrap();
    assert!(intersects(&r, &tangent, tol));
    assert_eq!(
        intersection(&r, &tangent, tol).unwrap(),
        Intersection::Point(p(2.0, 1.0))
    );

    let across = Circle::new(p(0.0, 1.0), 0.5).unwrap();
    match intersection(&r, &across, tol).unwrap() {
        Intersection::Points(pts) => {
            assert!(has_point(&pts, p(0.0, 1.5)));
            assert!(has_point(&pts, p(0.0, 0.5)));
        }
        other => panic!("expected crossing points, got {other}"),
    }
}

#[test]
fn overlap_areas() {
    let tol = Tolerance::default();
    let unit = Circle::new(Point::ORIGIN, 1.0).unwrap();
    let big = Circle::new(p(0.5, 0.0), 3.0).unwrap();
    assert!((overlap_area(&unit, &big, tol).unwrap() - PI).abs() < 1e-12);
    let apart = Circle::new(p(3.0, 0.0), 1.0).unwrap();
    assert_eq!(overlap_area(&unit, &apart, tol).unwrap(), 0.0);

    // Disk centred on a corner: a quarter lies inside.
    let r = rect(0.0, 0.0, 10.0, 10.0);
    assert!((overlap_area(&r, &unit, tol).unwrap() - PI / 4.0).abs() < 1e-9);
    assert!((overlap_area(&unit, &r, tol).unwrap() - PI / 4.0).abs() < 1e-9);

    assert_eq!(overlap_area(&r, &p(1.0, 1.0), tol).unwrap(), 0.0);
    assert_eq!(overlap_area(&seg((0.0, 0.0), (1.0, 1.0)), &r, tol).unwrap(), 0.0);
}

#[test]
fn point_in_polygon_classification() {
    let tol = Tolerance::default();
    let square = poly(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
    assert_eq!(point_in_polygon(&p(1.0, 1.0), &square, tol), PointLocation::Inside);
    assert_eq!(point_in_polygon(&p(2.0, 1.0), &square, tol), PointLocation::Boundary);
    assert_eq!(point_in_polygon(&p(0.0, 0.0), &square, tol), PointLocation::Boundary);
    assert_eq!(point_in_polygon(&p(3.0, 1.0), &square, tol), PointLocation::Outside);
    // The ray from this point passes exactly through the vertex (2, 2).
    assert_eq!(point_in_polygon(&p(-1.0, 2.0), &square, tol), PointLocation::Outside);
}

#[test]
fn rotated_rectangle_queries() {
    let tol = Tolerance::default();
    let diamond = Rectangle::with_rotation(p(0.0, 0.0), Size::new(2.0, 2.0).unwrap(), PI / 4.0)
        .unwrap();
    assert!(contains(&diamond, &diamond.center(), tol));
    assert!(!contains(&diamond, &p(1.9, 0.1), tol));
    assert!(intersects(&diamond, &seg((-1.0, 1.0), (1.0, 1.0)), tol));
}

#[test]
fn two_non_convex_polygons_are_unsupported() {
    let tol = Tolerance::default();
    let l = poly(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0)]);
    let shifted = poly(&[(0.5, 0.5), (2.5, 0.5), (2.5, 1.5), (1.5, 1.5), (1.5, 2.5), (0.5, 2.5)]);
    let err = intersection(&l, &shifted, tol).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
    assert!(overlap_area(&l, &shifted, tol).is_err());
    // Predicates still answer.
    assert!(intersects(&l, &shifted, tol));
    assert!(!contains(&l, &shifted, tol));
}

#[test]
fn intersects_agrees_with_distance() {
    let tol = Tolerance::default();
    let shapes: Vec<Shape> = vec![
        p(3.0, 3.0).into(),
        seg((2.0, -1.0), (2.0, 5.0)).into(),
        rect(0.0, 0.0, 2.0, 2.0).into(),
        Circle::new(p(4.0, 4.0), 1.0).unwrap().into(),
        poly(&[(5.0, 0.0), (7.0, 0.0), (6.0, 2.0)]).into(),
    ];
    for a in &shapes {
        for b in &shapes {
            let eps = tol.eps(a.magnitude().max(b.magnitude()));
            assert_eq!(intersects(a, b, tol), distance(a, b) <= eps, "{a} vs {b}");
            assert!((distance(a, b) - distance(b, a)).abs() < 1e-12, "{a} vs {b}");
        }
    }
}

#[test]
fn flat_rectangles_meet_like_segments() {
    let tol = Tolerance::default();
    let flat = rect(0.0, 0.0, 4.0, 0.0);
    let square = rect(1.0, -1.0, 2.0, 2.0);
    assert!(intersects(&flat, &square, tol));
    match intersection(&flat, &square, tol).unwrap() {
        Intersection::Segment(s) => {
            assert!(s.start().approx_eq(&p(1.0, 0.0), tol), "{s}");
            assert!(s.end().approx_eq(&p(3.0, 0.0), tol), "{s}");
        }
        other => panic!("expected the piece inside the square, got {other}"),
    }
    assert_eq!(overlap_area(&flat, &square, tol).unwrap(), 0.0);
    assert!(clip(&flat, &square, tol).unwrap().is_none());

    // Lying along the square's top edge.
    let along = rect(-1.0, 1.0, 3.0, 0.0);
    match intersection(&along, &square, tol).unwrap() {
        Intersection::Segment(s) => {
            assert!(s.start().approx_eq(&p(1.0, 1.0), tol), "{s}");
            assert!(s.end().approx_eq(&p(2.0, 1.0), tol), "{s}");
        }
        other => panic!("expected a shared edge piece, got {other}"),
    }
}

#[test]
fn crossing_flat_rectangles_meet_in_a_point() {
    let tol = Tolerance::default();
    let across = rect(0.0, 0.0, 4.0, 0.0);
    let upright = rect(2.0, -2.0, 0.0, 4.0);
    match intersection(&across, &upright, tol).unwrap() {
        Intersection::Point(q) => assert!(q.approx_eq(&p(2.0, 0.0), tol), "{q}"),
        other => panic!("expected a crossing point, got {other}"),
    }
    assert_eq!(overlap_area(&across, &upright, tol).unwrap(), 0.0);
    assert!(clip(&across, &upright, tol).unwrap().is_none());
}

#[test]
fn flat_rectangle_through_a_disk_is_a_chord() {
    let tol = Tolerance::default();
    let flat = rect(0.0, 0.0, 4.0, 0.0);
    let disk = Circle::new(p(2.0, 0.0), 1.0).unwrap();
    match intersection(&flat, &disk, tol).unwrap() {
        Intersection::Segment(s) => {
            assert!(s.start().approx_eq(&p(1.0, 0.0), tol), "{s}");
            assert!(s.end().approx_eq(&p(3.0, 0.0), tol), "{s}");
        }
        other => panic!("expected a chord, got {other}"),
    }
    assert_eq!(overlap_area(&disk, &flat, tol).unwrap(), 0.0);
    let dot = Circle::new(p(2.0, 0.0), 0.0).unwrap();
    assert!(contains(&flat, &dot, tol));
    assert_eq!(overlap_area(&dot, &square_poly(), tol).unwrap(), 0.0);
}

fn square_poly() -> Polygon {
    poly(&[(0.0, -1.0), (4.0, -1.0), (4.0, 1.0), (0.0, 1.0)])
}

#[test]
fn segment_spanning_most_of_the_f64_range() {
    let tol = Tolerance::default();
    let wide = seg((-1e308, 0.0), (1e308, 0.0));
    let origin = p(0.0, 0.0);
    assert_eq!(distance(&wide, &origin), 0.0);
    assert!(intersects(&wide, &origin, tol));
    assert!(contains(&wide, &origin, tol));
    assert_eq!(distance(&wide, &p(0.0, 5.0)), 5.0);
    let err = wide.bounding_box().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DegenerateOperation);
}
