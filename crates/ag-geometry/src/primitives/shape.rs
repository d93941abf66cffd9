use std::fmt;

use super::{ApproxEq, Circle, LineSegment, Point, Polygon, Rectangle, Vector};
use crate::error::Result;
use crate::scalar::{Scalar, Tolerance};

/// Discriminant of [`Shape`] / [`ShapeRef`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeKind {
    Point,
    Segment,
    Rectangle,
    Circle,
    Polygon,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Point,
        ShapeKind::Segment,
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::Polygon,
    ];

    /// Shapes with a 2D interior.
    #[inline]
    pub fn is_region(self) -> bool {
        matches!(
            self,
            ShapeKind::Rectangle | ShapeKind::Circle | ShapeKind::Polygon
        )
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShapeKind::Point => "point",
            ShapeKind::Segment => "segment",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Polygon => "polygon",
        })
    }
}

/// Owned closed sum over the primitive shapes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    Point(Point),
    Segment(LineSegment),
    Rectangle(Rectangle),
    Circle(Circle),
    Polygon(Polygon),
}

/// Borrowed view of a shape; what the query functions take.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeRef<'a> {
    Point(&'a Point),
    Segment(&'a LineSegment),
    Rectangle(&'a Rectangle),
    Circle(&'a Circle),
    Polygon(&'a Polygon),
}

impl Shape {
    #[inline]
    pub fn as_shape_ref(&self) -> ShapeRef<'_> {
        ShapeRef::from(self)
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        self.as_shape_ref().kind()
    }

    /// Largest absolute coordinate reached by the shape.
    #[inline]
    pub fn magnitude(&self) -> Scalar {
        self.as_shape_ref().magnitude()
    }

    #[inline]
    pub fn area(&self) -> Scalar {
        self.as_shape_ref().area()
    }

    #[inline]
    #[track_caller]
    pub fn bounding_box(&self) -> Result<Rectangle> {
        self.as_shape_ref().bounding_box()
    }
}

impl<'a> ShapeRef<'a> {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeRef::Point(_) => ShapeKind::Point,
            ShapeRef::Segment(_) => ShapeKind::Segment,
            ShapeRef::Rectangle(_) => ShapeKind::Rectangle,
            ShapeRef::Circle(_) => ShapeKind::Circle,
            ShapeRef::Polygon(_) => ShapeKind::Polygon,
        }
    }

    pub fn magnitude(&self) -> Scalar {
        match self {
            ShapeRef::Point(p) => p.magnitude(),
            ShapeRef::Segment(s) => s.magnitude(),
            ShapeRef::Rectangle(r) => r.magnitude(),
            ShapeRef::Circle(c) => c.magnitude(),
            ShapeRef::Polygon(p) => p.magnitude(),
        }
    }

    /// Enclosed area; 0 for points and segments.
    pub fn area(&self) -> Scalar {
        match self {
            ShapeRef::Point(_) | ShapeRef::Segment(_) => 0.0,
            ShapeRef::Rectangle(r) => r.area(),
            ShapeRef::Circle(c) => c.area(),
            ShapeRef::Polygon(p) => p.area(),
        }
    }

    /// Axis-aligned bounding box; fails with `DegenerateOperation` when its
    /// size overflows `f64`.
    #[track_caller]
    pub fn bounding_box(&self) -> Result<Rectangle> {
        match self {
            ShapeRef::Point(p) => Rectangle::bounding(std::slice::from_ref(*p)),
            ShapeRef::Segment(s) => s.bounding_box(),
            ShapeRef::Rectangle(r) => r.bounding_box(),
            ShapeRef::Circle(c) => c.bounding_box(),
            ShapeRef::Polygon(p) => p.bounding_box(),
        }
    }

    /// Axis-aligned `(min, max)` corners. Unlike [`Self::bounding_box`] this
    /// never fails; the query prefilter compares corners directly.
    pub(crate) fn extent(&self) -> (Point, Point) {
        match self {
            ShapeRef::Point(p) => (**p, **p),
            ShapeRef::Segment(s) => Rectangle::extent(&[s.start(), s.end()]),
            ShapeRef::Rectangle(r) => Rectangle::extent(&r.corners()),
            ShapeRef::Circle(c) => {
                let r = Vector::new(c.radius(), c.radius());
                (c.center() - r, c.center() + r)
            }
            ShapeRef::Polygon(p) => Rectangle::extent(p.vertices()),
        }
    }

    pub fn to_shape(&self) -> Shape {
        match *self {
            ShapeRef::Point(p) => Shape::Point(*p),
            ShapeRef::Segment(s) => Shape::Segment(*s),
            ShapeRef::Rectangle(r) => Shape::Rectangle(*r),
            ShapeRef::Circle(c) => Shape::Circle(*c),
            ShapeRef::Polygon(p) => Shape::Polygon(p.clone()),
        }
    }
}

impl<'a> From<&'a Shape> for ShapeRef<'a> {
    fn from(s: &'a Shape) -> Self {
        match s {
            Shape::Point(p) => ShapeRef::Point(p),
            Shape::Segment(s) => ShapeRef::Segment(s),
            Shape::Rectangle(r) => ShapeRef::Rectangle(r),
            Shape::Circle(c) => ShapeRef::Circle(c),
            Shape::Polygon(p) => ShapeRef::Polygon(p),
        }
    }
}

macro_rules! shape_conversions {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Shape {
                #[inline]
                fn from(v: $ty) -> Self {
                    Shape::$variant(v)
                }
            }

            impl<'a> From<&'a $ty> for ShapeRef<'a> {
                #[inline]
                fn from(v: &'a $ty) -> Self {
                    ShapeRef::$variant(v)
                }
            }
        )*
    };
}

shape_conversions! {
    Point => Point,
    LineSegment => Segment,
    Rectangle => Rectangle,
    Circle => Circle,
    Polygon => Polygon,
}

impl ApproxEq for Shape {
    /// Same kind and approximately equal payloads; no cross-kind equality.
    fn approx_eq(&self, other: &Self, tol: Tolerance) -> bool {
        match (self, other) {
            (Shape::Point(a), Shape::Point(b)) => a.approx_eq(b, tol),
            (Shape::Segment(a), Shape::Segment(b)) => a.approx_eq(b, tol),
            (Shape::Rectangle(a), Shape::Rectangle(b)) => a.approx_eq(b, tol),
            (Shape::Circle(a), Shape::Circle(b)) => a.approx_eq(b, tol),
            (Shape::Polygon(a), Shape::Polygon(b)) => a.approx_eq(b, tol),
            _ => false,
        }
    }
}

impl fmt::Display for ShapeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeRef::Point(p) => fmt::Display::fmt(p, f),
            ShapeRef::Segment(s) => fmt::Display::fmt(s, f),
            ShapeRef::Rectangle(r) => fmt::Display::fmt(r, f),
            ShapeRef::Circle(c) => fmt::Display::fmt(c, f),
            ShapeRef::Polygon(p) => fmt::Display::fmt(p, f),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_shape_ref(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Size;

    #[test]
    fn kinds_and_areas() {
        let rect = Rectangle::new(Point::ORIGIN, Size::new(2.0, 3.0).unwrap()).unwrap();
        let shapes: Vec<Shape> = vec![
            Point::new(1.0, 1.0).into(),
            LineSegment::new(Point::ORIGIN, Point::new(1.0, 0.0))
                .unwrap()
                .into(),
            rect.into(),
            Circle::new(Point::ORIGIN, 1.0).unwrap().into(),
        ];
        let kinds: Vec<_> = shapes.iter().map(Shape::kind).collect();
        assert_eq!(&kinds[..], &ShapeKind::ALL[..4]);
        assert_eq!(shapes[0].area(), 0.0);
        assert_eq!(shapes[2].area(), 6.0);
        assert!(!ShapeKind::Segment.is_region());
        assert!(ShapeKind::Circle.is_region());
    }

    #[test]
    fn cross_kind_shapes_are_never_approx_equal() {
        let p = Shape::from(Point::ORIGIN);
        let c = Shape::from(Circle::new(Point::ORIGIN, 0.0).unwrap());
        let tol = Tolerance::default();
        assert!(!p.approx_eq(&c, tol));
        assert!(c.approx_eq(&c.clone(), tol));
        assert_eq!(ShapeRef::from(&p).to_shape(), p);
        assert_eq!(p.to_string(), "(0, 0)");
    }
}
