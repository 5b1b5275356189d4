//! TORCH: hull from four monotone lateral chains.
//!
//! Points are sorted by x, so west and east are the sequence ends; north and
//! south are the min-y and max-y points (canvas frame, y grows downward).
//! Each lateral chain starts at west or east and scans toward north or south,
//! keeping only points that extend its monotone run:
//! - south-west: x increasing, y non-decreasing, west to south;
//! - south-east: x decreasing, y non-decreasing, east to south;
//! - north-west: x increasing, y non-increasing, west to north;
//! - north-east: x decreasing, y non-increasing, east to north.
//!
//! [`TorchEngine`] then merges by running the naive engine over the whole
//! input point set, not just the chains. This finisher ignores the chains
//! and is kept as a simplification. The following `Inflate` state shows the
//! chain-based alternative next to it: the staircase polygon formed by the
//! four chains, with reflex vertices deleted until none remain.
//!
//! [`TorchSouthWestEngine`] isolates the south-west scan, one candidate per step.

use super::naive::naive_hull;
use super::{engine_states, log_transition, Engine};
use crate::error::EngineError;
use crate::geom2::{by_x, determinant, Point};

/// The four monotone chains, each starting at its west/east extreme.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LateralChains {
    pub north_west: Vec<Point>,
    pub north_east: Vec<Point>,
    pub south_east: Vec<Point>,
    pub south_west: Vec<Point>,
}

impl LateralChains {
    /// Build all four chains over x-sorted points with the given extreme indices.
    pub fn build(sorted: &[Point], north: usize, south: usize) -> Self {
        if sorted.is_empty() {
            return Self::default();
        }
        let west = 0;
        let east = sorted.len() - 1;
        Self {
            north_west: chain(sorted, west, (west + 1)..=north, |y, best| y <= best),
            north_east: chain(sorted, east, (north..east).rev(), |y, best| y <= best),
            south_east: chain(sorted, east, (south..east).rev(), |y, best| y >= best),
            south_west: chain(sorted, west, (west + 1)..=south, |y, best| y >= best),
        }
    }

    /// Closed staircase: NW, then NE, SE and SW, dropping each shared endpoint once.
    pub fn staircase(&self) -> Vec<Point> {
        let mut ring = Vec::new();
        ring.extend(but_last(&self.north_west));
        ring.extend(self.north_east.iter().skip(1).rev());
        ring.extend(but_last(&self.south_east));
        ring.extend(self.south_west.iter().skip(1).rev());
        ring
    }
}

fn but_last(chain: &[Point]) -> impl Iterator<Item = &Point> {
    chain.iter().take(chain.len().saturating_sub(1))
}

/// Scan `indices` from `start`, keeping each point whose y extends the run.
fn chain(
    sorted: &[Point],
    start: usize,
    indices: impl Iterator<Item = usize>,
    extends: impl Fn(f64, f64) -> bool,
) -> Vec<Point> {
    let mut best = sorted[start].y;
    let mut out = vec![sorted[start]];
    for i in indices {
        if extends(sorted[i].y, best) {
            best = sorted[i].y;
            out.push(sorted[i]);
        }
    }
    out
}

/// Indices of the first min-y (north) and first max-y (south) points.
fn north_south(sorted: &[Point]) -> (usize, usize) {
    let mut north = 0;
    let mut south = 0;
    for (i, p) in sorted.iter().enumerate() {
        if p.y < sorted[north].y {
            north = i;
        }
        if p.y > sorted[south].y {
            south = i;
        }
    }
    (north, south)
}

/// Delete reflex vertices of a closed ring until a full pass deletes none.
///
/// The ring runs west, north, east, south, so convex corners turn with a
/// non-negative determinant.
pub fn inflate(mut ring: Vec<Point>) -> Vec<Point> {
    loop {
        let mut deleted = false;
        let mut k: isize = 0;
        while ring.len() >= 3 && k >= 0 && (k as usize) < ring.len() {
            let n = ring.len();
            let ku = k as usize;
            let p = ring[ku];
            let pn = ring[(ku + 1) % n];
            let pnn = ring[(ku + 2) % n];
            if determinant(pn - p, pnn - pn) >= 0.0 {
                k += 1;
            } else {
                let removed = (ku + 1) % n;
                ring.remove(removed);
                deleted = true;
                if removed < ku {
                    k -= 1;
                }
                k -= 1;
            }
        }
        if !deleted || ring.len() < 3 {
            return ring;
        }
    }
}

engine_states! {
    /// States of [`TorchEngine`].
    pub enum TorchState {
        Start => "start",
        /// Sorted; west and east known.
        XMinXMax => "x-min-x-max",
        /// North and south known.
        YMinYMax => "y-min-y-max",
        /// Four chains built.
        LateralHulls => "lateral-hulls",
        /// Naive hull of the input points.
        Merge => "merge",
        /// Staircase inflated from the chains.
        Inflate => "inflate",
        Done => "done",
    }
}

#[derive(Clone, Debug)]
pub struct TorchEngine {
    points: Vec<Point>,
    state: TorchState,
    sorted: Vec<Point>,
    north: usize,
    south: usize,
    chains: LateralChains,
    hull: Vec<Point>,
    inflated: Vec<Point>,
}

impl TorchEngine {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            state: TorchState::Start,
            sorted: Vec::new(),
            north: 0,
            south: 0,
            chains: LateralChains::default(),
            hull: Vec::new(),
            inflated: Vec::new(),
        }
    }

    pub fn sorted(&self) -> &[Point] {
        &self.sorted
    }

    pub fn west(&self) -> Option<Point> {
        self.sorted.first().copied()
    }

    pub fn east(&self) -> Option<Point> {
        self.sorted.last().copied()
    }

    /// Min-y point, once located.
    pub fn north(&self) -> Option<Point> {
        self.extremes_known().then(|| self.sorted[self.north])
    }

    /// Max-y point, once located.
    pub fn south(&self) -> Option<Point> {
        self.extremes_known().then(|| self.sorted[self.south])
    }

    pub fn chains(&self) -> &LateralChains {
        &self.chains
    }

    /// Final hull (naive over the input point set).
    pub fn hull(&self) -> &[Point] {
        &self.hull
    }

    /// Staircase of the chains with reflex vertices removed.
    pub fn inflated(&self) -> &[Point] {
        &self.inflated
    }

    fn extremes_known(&self) -> bool {
        !self.sorted.is_empty()
            && !matches!(self.state, TorchState::Start | TorchState::XMinXMax)
    }

    fn set_state(&mut self, next: TorchState) {
        log_transition(Self::NAME, self.state, next);
        self.state = next;
    }
}

impl Engine for TorchEngine {
    type State = TorchState;
    const NAME: &'static str = "torch";

    fn state(&self) -> TorchState {
        self.state
    }

    fn is_done(&self) -> bool {
        self.state == TorchState::Done
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn step(&mut self) -> Result<(), EngineError> {
        match self.state {
            TorchState::Start => {
                let mut sorted = self.points.clone();
                sorted.sort_by(by_x);
                self.sorted = sorted;
                if self.sorted.is_empty() {
                    self.set_state(TorchState::Done);
                } else {
                    self.set_state(TorchState::XMinXMax);
                }
            }
            TorchState::XMinXMax => {
                (self.north, self.south) = north_south(&self.sorted);
                self.set_state(TorchState::YMinYMax);
            }
            TorchState::YMinYMax => {
                self.chains = LateralChains::build(&self.sorted, self.north, self.south);
                self.set_state(TorchState::LateralHulls);
            }
            TorchState::LateralHulls => {
                self.hull = naive_hull(&self.points)?;
                self.set_state(TorchState::Merge);
            }
            TorchState::Merge => {
                self.inflated = inflate(self.chains.staircase());
                tracing::debug!(
                    engine = Self::NAME,
                    hull = self.hull.len(),
                    inflated = self.inflated.len(),
                    "hull built"
                );
                self.set_state(TorchState::Inflate);
            }
            TorchState::Inflate => self.set_state(TorchState::Done),
            TorchState::Done => {}
        }
        Ok(())
    }
}

engine_states! {
    /// States of [`TorchSouthWestEngine`].
    pub enum TorchSwState {
        Start => "start",
        XMinXMax => "x-min-x-max",
        YMinYMax => "y-min-y-max",
        /// Candidate under the cursor tested.
        Scan => "scan",
        Done => "done",
    }
}

#[derive(Clone, Debug)]
pub struct TorchSouthWestEngine {
    points: Vec<Point>,
    state: TorchSwState,
    sorted: Vec<Point>,
    south: usize,
    cursor: usize,
    max_y: f64,
    chain: Vec<Point>,
}

impl TorchSouthWestEngine {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            state: TorchSwState::Start,
            sorted: Vec::new(),
            south: 0,
            cursor: 0,
            max_y: f64::NEG_INFINITY,
            chain: Vec::new(),
        }
    }

    pub fn sorted(&self) -> &[Point] {
        &self.sorted
    }

    pub fn west(&self) -> Option<Point> {
        self.sorted.first().copied()
    }

    /// Max-y point, once located.
    pub fn south(&self) -> Option<Point> {
        matches!(self.state, TorchSwState::YMinYMax | TorchSwState::Scan | TorchSwState::Done)
            .then(|| self.sorted.get(self.south).copied())
            .flatten()
    }

    /// Next point the scan will test.
    pub fn candidate(&self) -> Option<Point> {
        match self.state {
            TorchSwState::YMinYMax | TorchSwState::Scan if self.cursor <= self.south => {
                self.sorted.get(self.cursor).copied()
            }
            _ => None,
        }
    }

    /// South-west chain built so far.
    pub fn chain(&self) -> &[Point] {
        &self.chain
    }

    fn set_state(&mut self, next: TorchSwState) {
        log_transition(Self::NAME, self.state, next);
        self.state = next;
    }
}

impl Engine for TorchSouthWestEngine {
    type State = TorchSwState;
    const NAME: &'static str = "torch-south-west";

    fn state(&self) -> TorchSwState {
        self.state
    }

    fn is_done(&self) -> bool {
        self.state == TorchSwState::Done
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn step(&mut self) -> Result<(), EngineError> {
        match self.state {
            TorchSwState::Start => {
                let mut sorted = self.points.clone();
                sorted.sort_by(by_x);
                self.sorted = sorted;
                if self.sorted.is_empty() {
                    self.set_state(TorchSwState::Done);
                } else {
                    self.set_state(TorchSwState::XMinXMax);
                }
            }
            TorchSwState::XMinXMax => {
                self.south = north_south(&self.sorted).1;
                let west = self.sorted[0];
                self.chain = vec![west];
                self.max_y = west.y;
                self.cursor = 1;
                self.set_state(TorchSwState::YMinYMax);
            }
            TorchSwState::YMinYMax | TorchSwState::Scan => {
                if self.cursor > self.south {
                    tracing::debug!(engine = Self::NAME, chain = self.chain.len(), "chain built");
                    self.set_state(TorchSwState::Done);
                    return Ok(());
                }
                let p = self.sorted[self.cursor];
                if p.y >= self.max_y {
                    self.max_y = p.y;
                    self.chain.push(p);
                }
                self.cursor += 1;
                if self.state != TorchSwState::Scan {
                    self.set_state(TorchSwState::Scan);
                }
            }
            TorchSwState::Done => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::validate::same_vertex_set;
    use nalgebra::vector;

    fn diamond() -> Vec<Point> {
        vec![
            vector![0.0, 2.0],
            vector![2.0, 0.0],
            vector![4.0, 2.0],
            vector![2.0, 4.0],
        ]
    }

    #[test]
    fn diamond_chains_hold_two_extremes_each() {
        let mut e = TorchEngine::new(diamond());
        e.step().unwrap();
        e.step().unwrap();
        e.step().unwrap();
        assert_eq!(e.state(), TorchState::LateralHulls);
        let c = e.chains();
        assert_eq!(c.north_west, vec![vector![0.0, 2.0], vector![2.0, 0.0]]);
        assert_eq!(c.north_east, vec![vector![4.0, 2.0], vector![2.0, 0.0]]);
        assert_eq!(c.south_east, vec![vector![4.0, 2.0], vector![2.0, 4.0]]);
        assert_eq!(c.south_west, vec![vector![0.0, 2.0], vector![2.0, 4.0]]);
        assert_eq!(e.north(), Some(vector![2.0, 0.0]));
        assert_eq!(e.south(), Some(vector![2.0, 4.0]));
    }

    #[test]
    fn diamond_merge_reproduces_hull() {
        let mut e = TorchEngine::new(diamond());
        e.finish().unwrap();
        assert_eq!(e.hull().len(), 4);
        assert!(same_vertex_set(e.hull(), &diamond()));
        assert!(same_vertex_set(e.inflated(), &diamond()));
    }

    #[test]
    fn state_sequence() {
        let mut e = TorchEngine::new(diamond());
        let mut seen = vec![e.state()];
        while !e.is_done() {
            e.step().unwrap();
            seen.push(e.state());
        }
        use TorchState::*;
        assert_eq!(
            seen,
            vec![Start, XMinXMax, YMinYMax, LateralHulls, Merge, Inflate, Done]
        );
    }

    #[test]
    fn inflate_removes_reflex_corner() {
        // West, north, east, then a dent at (3, 2.5) before south.
        let ring = vec![
            vector![0.0, 2.0],
            vector![2.0, 0.0],
            vector![4.0, 2.0],
            vector![3.0, 2.5],
            vector![2.0, 4.0],
        ];
        let out = inflate(ring);
        assert_eq!(
            out,
            vec![
                vector![0.0, 2.0],
                vector![2.0, 0.0],
                vector![4.0, 2.0],
                vector![2.0, 4.0]
            ]
        );
    }

    #[test]
    fn south_west_scan_one_candidate_per_step() {
        let pts = vec![
            vector![0.0, 1.0],
            vector![1.0, 3.0],
            vector![2.0, 2.0],
            vector![3.0, 5.0],
            vector![4.0, 0.0],
            vector![5.0, 2.0],
        ];
        let mut e = TorchSouthWestEngine::new(pts);
        e.step().unwrap();
        e.step().unwrap();
        assert_eq!(e.state(), TorchSwState::YMinYMax);
        assert_eq!(e.south(), Some(vector![3.0, 5.0]));
        assert_eq!(e.candidate(), Some(vector![1.0, 3.0]));
        e.step().unwrap();
        assert_eq!(e.state(), TorchSwState::Scan);
        assert_eq!(e.chain(), &[vector![0.0, 1.0], vector![1.0, 3.0]]);
        e.finish().unwrap();
        assert_eq!(
            e.chain(),
            &[vector![0.0, 1.0], vector![1.0, 3.0], vector![3.0, 5.0]]
        );
    }
}
