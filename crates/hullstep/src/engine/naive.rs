//! Naive hull: test every unordered pair as a candidate boundary edge.
//!
//! For the pair `(i, j)`, every other point is classified by the sign of its
//! dot product with the normal of `points[i] -> points[j]`. A pair whose other
//! points all fall on one side is a hull edge and is recorded in both
//! directions. Once all pairs are classified the directed-edge graph is walked
//! from the first edge back to its start, yielding the hull polygon. The
//! orientation of that polygon is whatever the walk produces.
//!
//! A point exactly on a candidate line is reported as degenerate input when it
//! decides the classification, i.e. when the remaining points do not already
//! straddle the line.

use super::{engine_states, log_transition, Engine};
use crate::error::{DegenerateInputError, EngineError};
use crate::geom2::{side_of, Edge, Point};

engine_states! {
    /// States of [`NaiveEngine`].
    pub enum NaiveState {
        /// Classify the pair under the cursor.
        CheckSegment => "check-segment",
        /// Move the cursor to the next pair.
        NextSegment => "next-segment",
        /// Walk the directed-edge graph into a polygon.
        BuildHull => "build-hull",
        Done => "done",
    }
}

#[derive(Clone, Debug)]
pub struct NaiveEngine {
    points: Vec<Point>,
    state: NaiveState,
    edges: Vec<Edge>,
    hull: Vec<Point>,
    i: usize,
    j: usize,
}

impl NaiveEngine {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            state: NaiveState::CheckSegment,
            edges: Vec::new(),
            hull: Vec::new(),
            i: 0,
            j: 1,
        }
    }

    /// Directed hull edges found so far (two per boundary edge).
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Hull polygon; empty until `BuildHull` has run.
    pub fn hull(&self) -> &[Point] {
        &self.hull
    }

    pub fn into_hull(self) -> Vec<Point> {
        self.hull
    }

    /// Pair indices `(i, j)` under test.
    pub fn cursor(&self) -> (usize, usize) {
        (self.i, self.j)
    }

    /// Segment currently being classified, if the pair scan is still running.
    pub fn current_segment(&self) -> Option<(Point, Point)> {
        match self.state {
            NaiveState::CheckSegment | NaiveState::NextSegment => {
                let u = self.points.get(self.i)?;
                let v = self.points.get(self.j)?;
                Some((*u, *v))
            }
            NaiveState::BuildHull | NaiveState::Done => None,
        }
    }

    fn set_state(&mut self, next: NaiveState) {
        log_transition(Self::NAME, self.state, next);
        self.state = next;
    }

    fn check_segment(&mut self) -> Result<(), DegenerateInputError> {
        if self.j >= self.points.len() {
            // Fewer than two points: nothing to pair.
            self.set_state(NaiveState::BuildHull);
            return Ok(());
        }
        let u = self.points[self.i];
        let v = self.points[self.j];

        let mut positive = 0usize;
        let mut negative = 0usize;
        let mut on_line = None;
        for (k, p) in self.points.iter().enumerate() {
            if k == self.i || k == self.j {
                continue;
            }
            let d = side_of(u, v, *p);
            if d > 0.0 {
                positive += 1;
            } else if d < 0.0 {
                negative += 1;
            } else if on_line.is_none() {
                on_line = Some(*p);
            }
        }

        let straddles = positive > 0 && negative > 0;
        if !straddles {
            if let Some(point) = on_line {
                return Err(DegenerateInputError::Collinear {
                    from: u,
                    to: v,
                    point,
                });
            }
            self.edges.push(Edge::new(v, u));
            self.edges.push(Edge::new(u, v));
        }
        self.set_state(NaiveState::NextSegment);
        Ok(())
    }

    fn next_segment(&mut self) {
        self.j += 1;
        if self.j >= self.points.len() {
            self.i += 1;
            self.j = self.i + 1;
        }
        if self.i + 1 >= self.points.len() {
            self.set_state(NaiveState::BuildHull);
        } else {
            self.set_state(NaiveState::CheckSegment);
        }
    }

    fn build_hull(&mut self) -> Result<(), DegenerateInputError> {
        let Some(first) = self.edges.first().copied() else {
            self.hull.clear();
            self.set_state(NaiveState::Done);
            return Ok(());
        };

        let start = first.from;
        let mut hull = vec![start];
        let mut prev = start;
        let mut cur = Some(first.to);
        let mut steps = 0usize;
        while let Some(c) = cur {
            if c == start {
                break;
            }
            if steps > self.edges.len() {
                return Err(DegenerateInputError::OpenHullWalk { steps });
            }
            hull.push(c);
            // Leave `c` by any edge other than the one we arrived on; the last match wins.
            let next = self
                .edges
                .iter()
                .filter(|e| e.to != prev && e.from == c)
                .last()
                .map(|e| e.to);
            prev = c;
            cur = next;
            steps += 1;
        }

        tracing::debug!(
            engine = Self::NAME,
            edges = self.edges.len(),
            hull = hull.len(),
            "hull built"
        );
        self.hull = hull;
        self.set_state(NaiveState::Done);
        Ok(())
    }
}

impl Engine for NaiveEngine {
    type State = NaiveState;
    const NAME: &'static str = "naive";

    fn state(&self) -> NaiveState {
        self.state
    }

    fn is_done(&self) -> bool {
        self.state == NaiveState::Done
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn step(&mut self) -> Result<(), EngineError> {
        match self.state {
            NaiveState::CheckSegment => self.check_segment()?,
            NaiveState::NextSegment => self.next_segment(),
            NaiveState::BuildHull => self.build_hull()?,
            NaiveState::Done => {}
        }
        Ok(())
    }
}

/// Run a fresh naive engine over `points` to completion and return its hull.
pub fn naive_hull(points: &[Point]) -> Result<Vec<Point>, EngineError> {
    let mut engine = NaiveEngine::new(points.to_vec());
    engine.finish()?;
    Ok(engine.into_hull())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn square_with_center() -> Vec<Point> {
        vec![
            vector![0.0, 0.0],
            vector![4.0, 0.0],
            vector![4.0, 4.0],
            vector![0.0, 4.0],
            vector![2.0, 2.0],
        ]
    }

    #[test]
    fn square_hull_skips_interior_point() {
        let mut e = NaiveEngine::new(square_with_center());
        e.finish().unwrap();
        assert!(e.is_done());
        let hull = e.hull();
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&vector![2.0, 2.0]));
        for corner in &square_with_center()[..4] {
            assert!(hull.contains(corner));
        }
        // Consecutive hull vertices are joined by recorded edges.
        for k in 0..hull.len() {
            let e2 = Edge::new(hull[k], hull[(k + 1) % hull.len()]);
            assert!(e.edges().contains(&e2));
        }
    }

    #[test]
    fn edges_are_recorded_in_both_directions() {
        let mut e = NaiveEngine::new(square_with_center());
        e.finish().unwrap();
        assert_eq!(e.edges().len(), 2 * e.hull().len());
        for edge in e.edges() {
            assert!(e.edges().contains(&edge.reversed()));
        }
    }

    #[test]
    fn collinear_points_are_degenerate() {
        let mut e = NaiveEngine::new(vec![
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![2.0, 0.0],
        ]);
        let err = e.finish().unwrap_err();
        assert!(matches!(
            err,
            EngineError::DegenerateInput(DegenerateInputError::Collinear { .. })
        ));
        // Failed step leaves the state untouched.
        assert_eq!(e.state(), NaiveState::CheckSegment);
    }

    #[test]
    fn triangle_state_sequence() {
        let mut e = NaiveEngine::new(vec![
            vector![0.0, 0.0],
            vector![3.0, 1.0],
            vector![1.0, 2.0],
        ]);
        let mut seen = vec![e.state()];
        while !e.is_done() {
            e.step().unwrap();
            seen.push(e.state());
        }
        use NaiveState::*;
        assert_eq!(
            seen,
            vec![
                CheckSegment,
                NextSegment,
                CheckSegment,
                NextSegment,
                CheckSegment,
                NextSegment,
                BuildHull,
                Done
            ]
        );
        assert_eq!(e.hull().len(), 3);
        assert_eq!(e.edges().len(), 6);
    }

    #[test]
    fn tiny_inputs_terminate() {
        let mut empty = NaiveEngine::new(Vec::new());
        empty.finish().unwrap();
        assert!(empty.hull().is_empty());

        let mut single = NaiveEngine::new(vec![vector![1.0, 1.0]]);
        single.finish().unwrap();
        assert!(single.hull().is_empty());

        let mut pair = NaiveEngine::new(vec![vector![0.0, 0.0], vector![1.0, 1.0]]);
        pair.finish().unwrap();
        assert_eq!(pair.hull().len(), 2);
    }

    #[test]
    fn finish_is_idempotent() {
        let mut e = NaiveEngine::new(square_with_center());
        e.finish().unwrap();
        let hull = e.hull().to_vec();
        e.finish().unwrap();
        e.step().unwrap();
        assert_eq!(e.state(), NaiveState::Done);
        assert_eq!(e.hull(), hull.as_slice());
    }
}
