//! Hull comparison helpers for tests, benches and the CLI `compare` command.
//!
//! All comparisons use exact point equality: engines never synthesize
//! coordinates, so matching hulls share bit-identical vertices.

use super::Point;

/// `hull` is the cycle `truth` up to rotation, and up to reflection when allowed.
pub fn same_cycle(truth: &[Point], hull: &[Point], allow_reflection: bool) -> bool {
    if truth.len() != hull.len() {
        return false;
    }
    let Some(first) = truth.first() else {
        return true;
    };
    let Some(offset) = hull.iter().position(|p| p == first) else {
        return false;
    };
    let n = hull.len();
    let forward = (0..n).all(|k| truth[k] == hull[(offset + k) % n]);
    if forward || !allow_reflection {
        return forward;
    }
    (0..n).all(|k| truth[k] == hull[(offset + n - k) % n])
}

/// Same vertices regardless of order; both sides must be duplicate-free.
pub fn same_vertex_set(a: &[Point], b: &[Point]) -> bool {
    a.len() == b.len() && a.iter().all(|p| b.contains(p))
}

/// Every sampled point is an input point and every approximate-hull vertex was sampled.
pub fn is_sample_subset(points: &[Point], sample: &[Point], approx_hull: &[Point]) -> bool {
    sample.iter().all(|p| points.contains(p)) && approx_hull.iter().all(|p| sample.contains(p))
}
