//! Seeded random shapes inside a rectangular region.
//!
//! Purpose
//! - Reproducible streams of valid primitives for property tests and benches.
//!   Every draw carries a replay token `(seed, index)`; `regenerate` rebuilds
//!   the same shape without replaying the stream.
//!
//! Model
//! - Shapes are drawn in the region's local frame `[0, w] × [0, h]` and mapped
//!   through its rigid placement (rotation about the origin corner, then
//!   translation), so rotated regions need no special casing.
//! - Simple polygons: random points sorted angularly around their mean.
//!   Convex polygons: hull of random points. Self-intersecting mode keeps the
//!   draw order.
//! - A draw that violates its kind's invariants is redrawn from the same RNG,
//!   up to `max_attempts`; then the sampler gives up with `DegenerateOperation`.
//!
//! Code cross-refs: `query::convex_hull_polygon`, `transform::Transformable`.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::error::{GeomError, Result};
use crate::primitives::{
    Circle, LineSegment, Point, Polygon, Rectangle, Shape, ShapeKind, Size, Vector,
};
use crate::query::convex_hull_polygon;
use crate::scalar::{Scalar, Tolerance};
use crate::transform::{Transform, Transformable};

/// Vertex count distribution. Counts below 3 are rejected by [`ShapeSampler::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn bounds(&self) -> (usize, usize) {
        match *self {
            VertexCount::Fixed(n) => (n, n),
            VertexCount::Uniform { min, max } => (min, max),
        }
    }

    #[track_caller]
    fn validate(&self) -> Result<()> {
        let (lo, hi) = self.bounds();
        if lo < 3 {
            return Err(GeomError::invalid(format!(
                "polygons need at least 3 vertices (got {:?})",
                self
            )));
        }
        if lo > hi {
            return Err(GeomError::invalid(format!(
                "vertex count range is empty ({lo} > {hi})"
            )));
        }
        Ok(())
    }

    fn draw<R: Rng>(&self, rng: &mut R) -> usize {
        let (lo, hi) = self.bounds();
        if lo == hi {
            lo
        } else {
            rng.gen_range(lo..=hi)
        }
    }
}

/// Which polygons the sampler may emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolygonMode {
    /// Non-self-intersecting rings (angular sort around the point mean).
    Simple,
    /// Convex hull of the drawn points; may have fewer vertices than drawn.
    Convex,
    /// Points in draw order; edges may cross.
    SelfIntersecting,
}

/// Sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct SamplerCfg {
    pub vertex_count: VertexCount,
    pub polygon_mode: PolygonMode,
    /// Draw rectangles at a random rotation relative to the region.
    pub rotated_rectangles: bool,
    /// Segments shorter than this are redrawn.
    pub min_segment_len: Scalar,
    /// Draws per shape before giving up. At least 1.
    pub max_attempts: u32,
    pub tolerance: Tolerance,
}

impl Default for SamplerCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Uniform { min: 3, max: 10 },
            polygon_mode: PolygonMode::Simple,
            rotated_rectangles: true,
            min_segment_len: 0.0,
            max_attempts: 32,
            tolerance: Tolerance::default(),
        }
    }
}

/// Position of a draw in a seeded stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// SplitMix64 output function.
const fn splitmix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

impl ReplayToken {
    /// Generator for this draw; depends only on `(seed, index)`.
    fn rng(&self) -> StdRng {
        let index_key = splitmix64(self.index.wrapping_add(GOLDEN_GAMMA));
        StdRng::seed_from_u64(splitmix64(self.seed ^ index_key))
    }
}

/// A drawn shape plus the token that regenerates it.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeSample {
    pub shape: Shape,
    pub replay: ReplayToken,
}

/// Seeded generator of shapes inside `region`.
///
/// Owns its stream position; share across threads only behind a lock.
#[derive(Clone, Debug)]
pub struct ShapeSampler {
    region: Rectangle,
    cfg: SamplerCfg,
    seed: u64,
    next_index: u64,
    frame: Transform,
}

impl ShapeSampler {
    #[track_caller]
    pub fn new(region: Rectangle, cfg: SamplerCfg, seed: u64) -> Result<Self> {
        let (w, h) = (region.width(), region.height());
        if w <= 0.0 || h <= 0.0 {
            return Err(GeomError::invalid(format!(
                "sampling region needs positive width and height (got {w} x {h})"
            )));
        }
        if !(cfg.min_segment_len.is_finite() && cfg.min_segment_len >= 0.0) {
            return Err(GeomError::invalid(format!(
                "min_segment_len must be finite and >= 0 (got {})",
                cfg.min_segment_len
            )));
        }
        if cfg.min_segment_len > w.hypot(h) {
            return Err(GeomError::invalid(format!(
                "min_segment_len {} exceeds the region diagonal {}",
                cfg.min_segment_len,
                w.hypot(h)
            )));
        }
        if cfg.max_attempts == 0 {
            return Err(GeomError::invalid("max_attempts must be at least 1"));
        }
        cfg.vertex_count.validate()?;
        let frame = Transform::rotate(region.rotation())
            .then(&Transform::translate(region.origin().to_vector()));
        Ok(Self {
            region,
            cfg,
            seed,
            next_index: 0,
            frame,
        })
    }

    #[inline]
    pub fn region(&self) -> &Rectangle {
        &self.region
    }

    #[inline]
    pub fn cfg(&self) -> &SamplerCfg {
        &self.cfg
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Next shape of `kind` in the stream.
    #[track_caller]
    pub fn sample(&mut self, kind: ShapeKind) -> Result<ShapeSample> {
        let replay = ReplayToken {
            seed: self.seed,
            index: self.next_index,
        };
        self.next_index = self.next_index.wrapping_add(1);
        let shape = self.regenerate(kind, replay)?;
        Ok(ShapeSample { shape, replay })
    }

    /// Rebuild the shape a token stands for. Independent of the stream position.
    #[track_caller]
    pub fn regenerate(&self, kind: ShapeKind, replay: ReplayToken) -> Result<Shape> {
        let mut rng = replay.rng();
        for attempt in 0..self.cfg.max_attempts {
            match self.draw_local(kind, &mut rng) {
                Ok(local) => return local.transformed(&self.frame, self.cfg.tolerance),
                Err(e) => trace!(kind = %kind, attempt, reason = e.message(), "redraw"),
            }
        }
        debug!(
            kind = %kind,
            seed = replay.seed,
            index = replay.index,
            attempts = self.cfg.max_attempts,
            "sampler gave up"
        );
        Err(GeomError::degenerate(format!(
            "no valid {kind} after {} attempts (seed {}, index {})",
            self.cfg.max_attempts, replay.seed, replay.index
        )))
    }

    fn draw_local(&self, kind: ShapeKind, rng: &mut StdRng) -> Result<Shape> {
        let tol = self.cfg.tolerance;
        Ok(match kind {
            ShapeKind::Point => Shape::Point(self.local_point(rng)),
            ShapeKind::Segment => {
                let (a, b) = (self.local_point(rng), self.local_point(rng));
                let len = a.distance_to(&b);
                if len < self.cfg.min_segment_len {
                    return Err(GeomError::invalid(format!(
                        "segment length {len} below {}",
                        self.cfg.min_segment_len
                    )));
                }
                Shape::Segment(LineSegment::with_tolerance(a, b, tol)?)
            }
            ShapeKind::Rectangle => Shape::Rectangle(self.local_rectangle(rng)?),
            ShapeKind::Circle => {
                let c = self.local_point(rng);
                let room = self.room(&c);
                Shape::Circle(Circle::new(c, rng.gen::<f64>() * room)?)
            }
            ShapeKind::Polygon => Shape::Polygon(self.local_polygon(rng)?),
        })
    }

    fn local_point(&self, rng: &mut StdRng) -> Point {
        Point::new(
            rng.gen::<f64>() * self.region.width(),
            rng.gen::<f64>() * self.region.height(),
        )
    }

    /// Distance from `c` to the nearest side of the local box.
    fn room(&self, c: &Point) -> Scalar {
        let (w, h) = (self.region.width(), self.region.height());
        c.x.min(w - c.x).min(c.y).min(h - c.y).max(0.0)
    }

    fn local_rectangle(&self, rng: &mut StdRng) -> Result<Rectangle> {
        let tol = self.cfg.tolerance;
        let rect = if self.cfg.rotated_rectangles {
            // Random centre and rotation; sides shrunk until the corners fit.
            let c = self.local_point(rng);
            let theta = rng.gen::<f64>() * TAU;
            let (w, h) = (self.region.width(), self.region.height());
            let (mut rw, mut rh) = (rng.gen::<f64>() * w, rng.gen::<f64>() * h);
            let (cos, sin) = (theta.cos().abs(), theta.sin().abs());
            let half_x = 0.5 * (rw * cos + rh * sin);
            let half_y = 0.5 * (rw * sin + rh * cos);
            let (room_x, room_y) = (c.x.min(w - c.x), c.y.min(h - c.y));
            let mut fit: Scalar = 1.0;
            if half_x > room_x {
                fit = fit.min(room_x / half_x);
            }
            if half_y > room_y {
                fit = fit.min(room_y / half_y);
            }
            rw *= fit;
            rh *= fit;
            let u = Vector::from_angle(theta);
            let origin = c - u * (0.5 * rw) - u.perp() * (0.5 * rh);
            Rectangle::with_rotation(origin, Size::new(rw, rh)?, theta)?
        } else {
            Rectangle::from_corners(self.local_point(rng), self.local_point(rng))?
        };
        if rect.size().is_degenerate(tol) {
            return Err(GeomError::invalid(format!("rectangle too thin: {rect}")));
        }
        Ok(rect)
    }

    fn local_polygon(&self, rng: &mut StdRng) -> Result<Polygon> {
        let tol = self.cfg.tolerance;
        let n = self.cfg.vertex_count.draw(rng);
        let mut pts: Vec<Point> = (0..n).map(|_| self.local_point(rng)).collect();
        match self.cfg.polygon_mode {
            PolygonMode::Convex => convex_hull_polygon(&pts, tol),
            PolygonMode::SelfIntersecting => Polygon::with_tolerance(pts, tol),
            PolygonMode::Simple => {
                let inv = 1.0 / n as Scalar;
                let mean = pts.iter().fold(Point::ORIGIN, |acc, p| {
                    Point::new(acc.x + p.x * inv, acc.y + p.y * inv)
                });
                pts.sort_by(|a, b| (*a - mean).angle().total_cmp(&(*b - mean).angle()));
                let poly = Polygon::with_tolerance(pts, tol)?;
                // Equal angles can still fold an edge back on itself.
                if !poly.is_simple(tol) {
                    return Err(GeomError::invalid("angular sort produced a folded ring"));
                }
                Ok(poly)
            }
        }
    }
}
