//! Akl–Toussaint: discard points inside the quadrilateral of axis extremes.
//!
//! The kill zone is built from the min-x, max-y, max-x and min-y points in
//! that order, keeping the first occurrence of each distinct point. On ties
//! the first minimum and the last maximum in input order are taken. A point
//! strictly inside all kill-zone edges (negative half-plane test on each) can
//! never be a hull vertex and is dropped; the rest survive.
//!
//! Two finishers:
//! - [`AklToussaintEngine`] runs the naive engine on the survivors.
//! - [`AklPathEngine`] builds, per kill-zone edge, the chain of survivors
//!   strictly outside that edge, sorted along it, and deletes concave vertices
//!   one triplet per step, repeating full passes until a pass deletes nothing.
//!   The chains are concatenated into the hull.

use super::naive::naive_hull;
use super::{engine_states, log_transition, Engine};
use crate::error::{DegenerateInputError, EngineError};
use crate::geom2::{by_x, determinant, side_of, Point};

/// Distinct axis extremes in kill-zone order: min x, max y, max x, min y.
pub fn build_kill_zone(points: &[Point]) -> Vec<Point> {
    let Some(first) = points.first() else {
        return Vec::new();
    };
    let (mut xmin, mut xmax, mut ymin, mut ymax) = (*first, *first, *first, *first);
    for p in points {
        if p.x < xmin.x {
            xmin = *p;
        }
        if p.x >= xmax.x {
            xmax = *p;
        }
        if p.y < ymin.y {
            ymin = *p;
        }
        if p.y >= ymax.y {
            ymax = *p;
        }
    }
    let mut zone: Vec<Point> = Vec::with_capacity(4);
    for p in [xmin, ymax, xmax, ymin] {
        if !zone.contains(&p) {
            zone.push(p);
        }
    }
    zone
}

/// Strictly inside every kill-zone edge.
pub fn falls_within_kill_zone(p: Point, zone: &[Point]) -> bool {
    if zone.is_empty() {
        return false;
    }
    (0..zone.len()).all(|i| {
        let from = zone[i];
        let to = zone[(i + 1) % zone.len()];
        side_of(from, to, p) < 0.0
    })
}

/// Strictly outside the kill-zone edge `from -> to`.
pub fn falls_within_region(p: Point, from: Point, to: Point) -> bool {
    side_of(from, to, p) > 0.0
}

/// Points of `points` not inside `zone`, in input order.
pub fn survivors(points: &[Point], zone: &[Point]) -> Vec<Point> {
    points
        .iter()
        .copied()
        .filter(|p| !falls_within_kill_zone(*p, zone))
        .collect()
}

engine_states! {
    /// States of [`AklToussaintEngine`].
    pub enum AklState {
        Start => "start",
        KillZone => "kill-zone",
        Survivors => "survivors",
        /// Naive hull of the survivors drawn over the kill zone.
        Hull => "hull",
        Done => "done",
    }
}

#[derive(Clone, Debug)]
pub struct AklToussaintEngine {
    points: Vec<Point>,
    state: AklState,
    kill_zone: Vec<Point>,
    survivors: Vec<Point>,
    hull: Vec<Point>,
}

impl AklToussaintEngine {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            state: AklState::Start,
            kill_zone: Vec::new(),
            survivors: Vec::new(),
            hull: Vec::new(),
        }
    }

    pub fn kill_zone(&self) -> &[Point] {
        &self.kill_zone
    }

    pub fn survivors(&self) -> &[Point] {
        &self.survivors
    }

    pub fn hull(&self) -> &[Point] {
        &self.hull
    }

    fn set_state(&mut self, next: AklState) {
        log_transition(Self::NAME, self.state, next);
        self.state = next;
    }
}

impl Engine for AklToussaintEngine {
    type State = AklState;
    const NAME: &'static str = "akl-toussaint";

    fn state(&self) -> AklState {
        self.state
    }

    fn is_done(&self) -> bool {
        self.state == AklState::Done
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn step(&mut self) -> Result<(), EngineError> {
        match self.state {
            AklState::Start => {
                self.kill_zone = build_kill_zone(&self.points);
                self.set_state(AklState::KillZone);
            }
            AklState::KillZone => {
                self.survivors = survivors(&self.points, &self.kill_zone);
                tracing::debug!(
                    engine = Self::NAME,
                    points = self.points.len(),
                    survivors = self.survivors.len(),
                    "kill zone applied"
                );
                self.set_state(AklState::Survivors);
            }
            AklState::Survivors => {
                self.hull = naive_hull(&self.survivors)?;
                self.set_state(AklState::Hull);
            }
            AklState::Hull => self.set_state(AklState::Done),
            AklState::Done => {}
        }
        Ok(())
    }
}

engine_states! {
    /// States of [`AklPathEngine`].
    pub enum AklPathState {
        Start => "start",
        KillZone => "kill-zone",
        /// Survivors known and an edge selected.
        KillZoneEdge => "kill-zone-edge",
        /// Region chain collected and sorted.
        Region => "region",
        /// Deleting concave vertices, one triplet per step.
        ConvexPath => "convex-path",
        Done => "done",
    }
}

#[derive(Clone, Debug)]
pub struct AklPathEngine {
    points: Vec<Point>,
    state: AklPathState,
    kill_zone: Vec<Point>,
    survivors: Vec<Point>,
    edge: usize,
    region: Vec<Point>,
    /// Triplet cursor; a pass ends when it leaves `0..region.len() - 2`.
    k: isize,
    deleted: bool,
    hull: Vec<Point>,
}

impl AklPathEngine {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            state: AklPathState::Start,
            kill_zone: Vec::new(),
            survivors: Vec::new(),
            edge: 0,
            region: Vec::new(),
            k: 0,
            deleted: false,
            hull: Vec::new(),
        }
    }

    pub fn kill_zone(&self) -> &[Point] {
        &self.kill_zone
    }

    pub fn survivors(&self) -> &[Point] {
        &self.survivors
    }

    /// Kill-zone edge being processed.
    pub fn current_edge(&self) -> Option<(Point, Point)> {
        if self.kill_zone.is_empty() || self.edge >= self.kill_zone.len() {
            return None;
        }
        let from = self.kill_zone[self.edge];
        let to = self.kill_zone[(self.edge + 1) % self.kill_zone.len()];
        Some((from, to))
    }

    /// Chain for the current edge, including both edge endpoints.
    pub fn region(&self) -> &[Point] {
        &self.region
    }

    /// Index of the first vertex of the triplet under test.
    pub fn triplet_cursor(&self) -> isize {
        self.k
    }

    /// Hull assembled so far, one finished region at a time.
    pub fn hull(&self) -> &[Point] {
        &self.hull
    }

    fn set_state(&mut self, next: AklPathState) {
        log_transition(Self::NAME, self.state, next);
        self.state = next;
    }

    fn collect_region(&self) -> Result<Vec<Point>, DegenerateInputError> {
        let Some((from, to)) = self.current_edge() else {
            unreachable!("region requested without a current edge");
        };
        let mut region = vec![from, to];
        region.extend(
            self.survivors
                .iter()
                .copied()
                .filter(|p| falls_within_region(*p, from, to)),
        );
        let dx = (to - from).x;
        if dx > 0.0 {
            region.sort_by(by_x);
        } else if dx < 0.0 {
            region.sort_by(|a, b| by_x(b, a));
        } else {
            return Err(DegenerateInputError::VerticalRegionEdge { from, to });
        }
        Ok(region)
    }

    fn pass_active(&self) -> bool {
        self.k >= 0 && (self.k as usize) + 2 < self.region.len()
    }

    /// One triplet test: keep a convex triplet, delete the middle of a concave one.
    fn test_triplet(&mut self) {
        let k = self.k as usize;
        let p = self.region[k];
        let pn = self.region[k + 1];
        let pnn = self.region[k + 2];
        if determinant(pnn - pn, pn - p) >= 0.0 {
            self.k += 1;
        } else {
            tracing::trace!(engine = Self::NAME, x = pn.x, y = pn.y, "concave vertex removed");
            self.region.remove(k + 1);
            self.deleted = true;
            self.k -= 1;
        }
    }

    fn close_region(&mut self) {
        for p in self.region.drain(..) {
            // Edge endpoints are shared with the neighbouring region.
            if !self.hull.contains(&p) {
                self.hull.push(p);
            }
        }
        self.edge += 1;
    }
}

impl Engine for AklPathEngine {
    type State = AklPathState;
    const NAME: &'static str = "akl-toussaint-path";

    fn state(&self) -> AklPathState {
        self.state
    }

    fn is_done(&self) -> bool {
        self.state == AklPathState::Done
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn step(&mut self) -> Result<(), EngineError> {
        match self.state {
            AklPathState::Start => {
                self.kill_zone = build_kill_zone(&self.points);
                self.set_state(AklPathState::KillZone);
            }
            AklPathState::KillZone => {
                self.survivors = survivors(&self.points, &self.kill_zone);
                self.edge = 0;
                if self.kill_zone.is_empty() {
                    self.set_state(AklPathState::Done);
                } else {
                    self.set_state(AklPathState::KillZoneEdge);
                }
            }
            AklPathState::KillZoneEdge => {
                self.region = self.collect_region()?;
                self.set_state(AklPathState::Region);
            }
            AklPathState::Region => {
                self.k = 0;
                self.deleted = false;
                self.set_state(AklPathState::ConvexPath);
            }
            AklPathState::ConvexPath => {
                if self.pass_active() {
                    self.test_triplet();
                } else if self.deleted {
                    self.k = 0;
                    self.deleted = false;
                } else {
                    self.close_region();
                    if self.edge < self.kill_zone.len() {
                        self.set_state(AklPathState::KillZoneEdge);
                    } else {
                        tracing::debug!(engine = Self::NAME, hull = self.hull.len(), "hull built");
                        self.set_state(AklPathState::Done);
                    }
                }
            }
            AklPathState::Done => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::validate::{same_cycle, same_vertex_set};
    use nalgebra::vector;

    /// Diamond of extremes with extra hull points on two sides, one concave
    /// survivor (3, 9.1) and one interior point (5, 5).
    fn scene() -> Vec<Point> {
        vec![
            vector![0.0, 5.0],
            vector![5.0, 10.0],
            vector![10.0, 5.0],
            vector![5.0, 0.0],
            vector![1.0, 7.5],
            vector![2.5, 9.0],
            vector![3.0, 9.1],
            vector![8.0, 1.5],
            vector![5.0, 5.0],
        ]
    }

    fn expected_hull() -> Vec<Point> {
        vec![
            vector![0.0, 5.0],
            vector![1.0, 7.5],
            vector![2.5, 9.0],
            vector![5.0, 10.0],
            vector![10.0, 5.0],
            vector![8.0, 1.5],
            vector![5.0, 0.0],
        ]
    }

    #[test]
    fn kill_zone_is_diamond_and_drops_interior() {
        let pts = scene();
        let zone = build_kill_zone(&pts);
        assert_eq!(
            zone,
            vec![
                vector![0.0, 5.0],
                vector![5.0, 10.0],
                vector![10.0, 5.0],
                vector![5.0, 0.0]
            ]
        );
        let s = survivors(&pts, &zone);
        assert_eq!(s.len(), pts.len() - 1);
        assert!(!s.contains(&vector![5.0, 5.0]));
        for z in &zone {
            assert!(s.contains(z));
        }
    }

    #[test]
    fn kill_zone_dedups_shared_extremes() {
        let zone = build_kill_zone(&[vector![0.0, 0.0], vector![4.0, 1.0], vector![1.0, 4.0]]);
        assert_eq!(zone.len(), 3);
    }

    #[test]
    fn kill_zone_ties_take_first_min_and_last_max() {
        let zone = build_kill_zone(&[
            vector![0.0, 2.0],
            vector![0.0, 1.0],
            vector![3.0, 5.0],
            vector![5.0, 5.0],
            vector![5.0, 0.0],
            vector![2.0, 0.0],
        ]);
        // Max x and min y coincide at (5, 0).
        assert_eq!(
            zone,
            vec![vector![0.0, 2.0], vector![5.0, 5.0], vector![5.0, 0.0]]
        );
    }

    #[test]
    fn naive_finisher_matches_expected_vertices() {
        let mut e = AklToussaintEngine::new(scene());
        e.finish().unwrap();
        assert!(same_vertex_set(e.hull(), &expected_hull()));
        assert_eq!(e.kill_zone().len(), 4);
    }

    #[test]
    fn path_finisher_produces_clockwise_cycle() {
        let mut e = AklPathEngine::new(scene());
        e.finish().unwrap();
        assert!(same_cycle(e.hull(), &expected_hull(), false));
    }

    #[test]
    fn path_finisher_deletes_concave_vertex_stepwise() {
        let mut e = AklPathEngine::new(scene());
        e.step().unwrap(); // kill zone
        e.step().unwrap(); // survivors, first edge
        assert_eq!(e.state(), AklPathState::KillZoneEdge);
        e.step().unwrap(); // region
        assert_eq!(e.state(), AklPathState::Region);
        assert_eq!(
            e.region(),
            &[
                vector![0.0, 5.0],
                vector![1.0, 7.5],
                vector![2.5, 9.0],
                vector![3.0, 9.1],
                vector![5.0, 10.0]
            ]
        );
        let mut guard = 0;
        while e.state() != AklPathState::KillZoneEdge {
            e.step().unwrap();
            guard += 1;
            assert!(guard < 100);
        }
        assert!(!e.hull().contains(&vector![3.0, 9.1]));
        assert_eq!(e.hull().len(), 4);
    }

    #[test]
    fn survivors_superset_of_hull() {
        let mut e = AklToussaintEngine::new(scene());
        e.finish().unwrap();
        for v in e.hull() {
            assert!(e.survivors().contains(v));
        }
        for s in e.survivors() {
            assert!(e.points().contains(s));
        }
    }
}
