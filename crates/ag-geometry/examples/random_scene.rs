//! Draw a small random scene and print pairwise query results.
//!
//! Usage:
//!   cargo run -p ag-geometry --example random_scene -- [seed] [--verbose]
//!
//! `--verbose` enables trace-level events (sampler redraws, classification decisions).

use ag_geometry::prelude::*;
use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let seed: u64 = match args.next() {
        Some(s) => s.parse().with_context(|| format!("seed must be an integer, got {s:?}"))?,
        None => 2025,
    };
    let level = if args.next().as_deref() == Some("--verbose") {
        Level::TRACE
    } else {
        Level::INFO
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();

    let region = Rectangle::with_rotation(Point::new(0.0, 0.0), Size::new(40.0, 25.0)?, 0.3)?;
    let mut sampler = ShapeSampler::new(region, SamplerCfg::default(), seed)?;
    let mut scene = Vec::new();
    for kind in ShapeKind::ALL {
        let sample = sampler.sample(kind)?;
        tracing::info!(index = sample.replay.index, shape = %sample.shape, "drawn");
        scene.push(sample.shape);
    }

    let tol = Tolerance::default();
    for (i, a) in scene.iter().enumerate() {
        for b in &scene[i + 1..] {
            let d = distance(a, b);
            match intersection(a, b, tol) {
                Ok(x) => println!("{} / {}: distance {d:.3}, {x}", a.kind(), b.kind()),
                Err(e) => println!("{} / {}: distance {d:.3}, {e}", a.kind(), b.kind()),
            }
            if a.kind().is_region() && b.kind().is_region() {
                if let Ok(area) = overlap_area(a, b, tol) {
                    println!("  overlap area {area:.3}");
                }
            }
        }
    }
    Ok(())
}
