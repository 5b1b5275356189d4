//! Seeded point sets in general position.
//!
//! Purpose
//! - Feed the engines inputs their exact predicates can classify: no two
//!   points share (or nearly share) an x or y coordinate, and no three points
//!   are (nearly) collinear.
//!
//! Model
//! - Candidates are drawn uniformly from `[0, extent_per_point * count)²`.
//! - A candidate is rejected when `|Δx|` or `|Δy|` to any accepted point is
//!   below `spacing`, or when `|det(q - p, r - p)|` for any accepted pair
//!   `(q, r)` is below `collinear_threshold`.
//! - Determinism: one `StdRng` seeded from the caller's `u64`.
//!
//! Code cross-refs: `engine::*` property tests, `benches/engines_bench.rs`

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{determinant, Point};

/// Rejection-sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct PointsCfg {
    pub count: usize,
    /// Side of the sampling square per requested point.
    pub extent_per_point: f64,
    /// Minimum axis separation between any two points.
    pub spacing: f64,
    /// Minimum `|det|` for any triple.
    pub collinear_threshold: f64,
    /// Rejection budget per accepted point before giving up.
    pub attempts_per_point: usize,
}

impl Default for PointsCfg {
    fn default() -> Self {
        Self {
            count: 10,
            extent_per_point: 10.0,
            spacing: 1.0,
            collinear_threshold: 1.0,
            attempts_per_point: 10_000,
        }
    }
}

impl PointsCfg {
    pub fn with_count(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }
}

/// Draw `cfg.count` points in general position.
///
/// Returns `None` if the rejection budget runs out, which only happens for
/// configurations too dense to satisfy (e.g. a large `spacing` on a small extent).
pub fn general_position(cfg: PointsCfg, seed: u64) -> Option<Vec<Point>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let side = cfg.extent_per_point * cfg.count as f64;
    let mut points: Vec<Point> = Vec::with_capacity(cfg.count);
    let mut budget = cfg.attempts_per_point.saturating_mul(cfg.count.max(1));

    while points.len() < cfg.count {
        if budget == 0 {
            tracing::warn!(
                count = cfg.count,
                accepted = points.len(),
                "general_position: rejection budget exhausted"
            );
            return None;
        }
        budget -= 1;
        let p = Vector2::new(rng.gen::<f64>() * side, rng.gen::<f64>() * side);
        if accepts(&points, p, &cfg) {
            points.push(p);
        }
    }
    Some(points)
}

fn accepts(points: &[Point], p: Point, cfg: &PointsCfg) -> bool {
    let spaced = points
        .iter()
        .all(|q| (p.x - q.x).abs() >= cfg.spacing && (p.y - q.y).abs() >= cfg.spacing);
    if !spaced {
        return false;
    }
    for (i, q) in points.iter().enumerate() {
        for r in &points[i + 1..] {
            if determinant(q - p, r - p).abs() < cfg.collinear_threshold {
                return false;
            }
        }
    }
    true
}
