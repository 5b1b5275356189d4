//! Divide and conquer over an explicit frame stack, generic in the merge rule.
//!
//! The recursion tree lives in an explicit stack of frames with a cursor on
//! the active one, so a single `step` never runs more than one frame action.
//! A frame sorts a private copy of its points by x, splits at the midpoint,
//! waits for its left child, then its right child, and finally merges the two
//! child hulls with its [`MergeRule`]:
//! - [`Rehull`] runs the naive engine over the concatenated child hulls (not
//!   the raw points). Correct but redundant: a naive pass over the boundary
//!   points instead of a linear merge.
//! - [`TangentMerge`] walks the upper and lower tangents between the two
//!   clockwise child hulls and joins them clockwise between the tangents.
//!
//! Invariants
//! - The root frame is never popped; the stack is non-empty for the engine's lifetime.
//! - Only a `Done` child is popped, and its hull moves into the waiting parent.

use std::marker::PhantomData;

use super::dac_tangent::{facing_extremes, Tangent};
use super::naive::naive_hull;
use super::{engine_states, log_transition, Engine};
use crate::error::EngineError;
use crate::geom2::{by_x, next_cw, Point};

/// How a frame joins its two child hulls.
pub trait MergeRule {
    /// Engine name under this rule.
    const NAME: &'static str;

    /// Hull of `left ∪ right`, where every point of `left` lies left of `right`.
    fn merge(left: &[Point], right: &[Point]) -> Result<Vec<Point>, EngineError>;
}

/// Naive hull over the concatenated child hulls.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rehull;

impl MergeRule for Rehull {
    const NAME: &'static str = "divide-and-conquer";

    fn merge(left: &[Point], right: &[Point]) -> Result<Vec<Point>, EngineError> {
        let joined: Vec<Point> = left.iter().chain(right).copied().collect();
        if joined.len() <= 3 {
            return Ok(joined);
        }
        naive_hull(&joined)
    }
}

/// Upper and lower tangent walks, then a clockwise join.
///
/// Child hulls come out of this rule clockwise, which is what the walks
/// assume of their inputs. Leaves of one point are trivially clockwise.
#[derive(Clone, Copy, Debug, Default)]
pub struct TangentMerge;

impl MergeRule for TangentMerge {
    const NAME: &'static str = "divide-and-conquer-tangent-merge";

    fn merge(left: &[Point], right: &[Point]) -> Result<Vec<Point>, EngineError> {
        if left.is_empty() || right.is_empty() {
            return Ok(left.iter().chain(right).copied().collect());
        }
        let start = facing_extremes(left, right);
        let middle_x = (left[start.0].x + right[start.1].x) / 2.0;
        let (upper_l, upper_r) = Tangent::Upper.walk(left, right, middle_x, start)?;
        let (lower_l, lower_r) = Tangent::Lower.walk(left, right, middle_x, start)?;

        let mut hull = Vec::with_capacity(left.len() + right.len());
        let mut i = lower_l;
        while i != upper_l {
            hull.push(left[i]);
            i = next_cw(i, left.len());
        }
        hull.push(left[upper_l]);
        let mut j = upper_r;
        while j != lower_r {
            hull.push(right[j]);
            j = next_cw(j, right.len());
        }
        hull.push(right[lower_r]);
        Ok(hull)
    }
}

engine_states! {
    /// Per-frame states of [`DacEngine`].
    pub enum DacState {
        Start => "start",
        Divide => "divide",
        /// Left child on the stack above this frame.
        HullLeft => "hull-left",
        /// Right child on the stack above this frame.
        HullRight => "hull-right",
        Merge => "merge",
        Done => "done",
    }
}

/// One node of the recursion tree.
#[derive(Clone, Debug)]
pub struct DacFrame {
    /// Private copy of the sub-range, sorted by x.
    pub points: Vec<Point>,
    pub state: DacState,
    /// Split index: left child takes `points[..half]`.
    pub half: usize,
    pub left_hull: Vec<Point>,
    pub right_hull: Vec<Point>,
    pub hull: Vec<Point>,
}

impl DacFrame {
    fn new(mut points: Vec<Point>, initial: DacState) -> Self {
        points.sort_by(by_x);
        let half = points.len() / 2;
        let (state, hull) = if points.len() > 1 {
            (initial, Vec::new())
        } else {
            (DacState::Done, points.clone())
        };
        Self {
            points,
            state,
            half,
            left_hull: Vec::new(),
            right_hull: Vec::new(),
            hull,
        }
    }

    /// x of the vertical line between the two halves.
    pub fn split_x(&self) -> Option<f64> {
        if self.points.len() < 2 {
            return None;
        }
        Some((self.points[self.half - 1].x + self.points[self.half].x) / 2.0)
    }
}

#[derive(Clone, Debug)]
pub struct DacEngine<M = Rehull> {
    points: Vec<Point>,
    stack: Vec<DacFrame>,
    cursor: usize,
    rule: PhantomData<M>,
}

/// Divide and conquer joining child hulls along their tangents.
pub type DacTangentMergeEngine = DacEngine<TangentMerge>;

impl DacEngine {
    pub fn new(points: Vec<Point>) -> Self {
        Self::with_rule(points)
    }
}

impl<M: MergeRule> DacEngine<M> {
    pub fn with_rule(points: Vec<Point>) -> Self {
        let root = DacFrame::new(points.clone(), DacState::Start);
        Self {
            points,
            stack: vec![root],
            cursor: 0,
            rule: PhantomData,
        }
    }

    /// Frames from root (index 0) to the deepest live child.
    pub fn frames(&self) -> &[DacFrame] {
        &self.stack
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_frame(&self) -> &DacFrame {
        &self.stack[self.cursor]
    }

    /// Hull of the full point set; empty until the root frame is done.
    pub fn hull(&self) -> &[Point] {
        &self.stack[0].hull
    }

    fn set_frame_state(&mut self, next: DacState) {
        let frame = &mut self.stack[self.cursor];
        log_transition(Self::NAME, frame.state, next);
        frame.state = next;
    }

    fn push_child(&mut self, points: Vec<Point>) {
        self.stack.push(DacFrame::new(points, DacState::Divide));
        self.cursor += 1;
        tracing::trace!(engine = Self::NAME, depth = self.cursor, "push frame");
    }

    fn pop_child(&mut self) {
        let Some(child) = self.stack.pop() else {
            unreachable!("frame stack is never empty");
        };
        self.cursor -= 1;
        tracing::trace!(engine = Self::NAME, depth = self.cursor, "pop frame");
        let parent = &mut self.stack[self.cursor];
        match parent.state {
            DacState::HullLeft => parent.left_hull = child.hull,
            DacState::HullRight => parent.right_hull = child.hull,
            other => unreachable!("child finished under a parent in state {other}"),
        }
    }
}

impl<M: MergeRule> Engine for DacEngine<M> {
    type State = DacState;
    const NAME: &'static str = M::NAME;

    /// State of the active frame.
    fn state(&self) -> DacState {
        self.current_frame().state
    }

    fn is_done(&self) -> bool {
        self.stack[0].state == DacState::Done
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn step(&mut self) -> Result<(), EngineError> {
        match self.current_frame().state {
            DacState::Start => self.set_frame_state(DacState::Divide),
            DacState::Divide => {
                let frame = &mut self.stack[self.cursor];
                if frame.points.len() <= 1 {
                    frame.hull = frame.points.clone();
                    self.set_frame_state(DacState::Done);
                } else {
                    let left = frame.points[..frame.half].to_vec();
                    self.set_frame_state(DacState::HullLeft);
                    self.push_child(left);
                }
            }
            DacState::HullLeft => {
                let frame = &self.stack[self.cursor];
                let right = frame.points[frame.half..].to_vec();
                self.set_frame_state(DacState::HullRight);
                self.push_child(right);
            }
            DacState::HullRight => self.set_frame_state(DacState::Merge),
            DacState::Merge => {
                let frame = &self.stack[self.cursor];
                let hull = M::merge(&frame.left_hull, &frame.right_hull)?;
                self.stack[self.cursor].hull = hull;
                self.set_frame_state(DacState::Done);
                if self.cursor == 0 {
                    tracing::debug!(engine = Self::NAME, hull = self.hull().len(), "hull built");
                }
            }
            DacState::Done => {
                if self.cursor > 0 {
                    self.pop_child();
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::is_clockwise;
    use crate::geom2::validate::{same_cycle, same_vertex_set};
    use nalgebra::vector;

    fn pentagon_with_inner() -> Vec<Point> {
        vec![
            vector![0.0, 3.0],
            vector![2.0, 0.5],
            vector![5.0, 0.0],
            vector![7.0, 3.5],
            vector![3.5, 6.0],
            vector![3.0, 3.0],
            vector![4.5, 2.5],
        ]
    }

    #[test]
    fn matches_naive_vertex_set() {
        let pts = pentagon_with_inner();
        let mut e = DacEngine::new(pts.clone());
        e.finish().unwrap();
        let reference = naive_hull(&pts).unwrap();
        assert!(same_vertex_set(e.hull(), &reference));
        assert_eq!(e.hull().len(), 5);
    }

    #[test]
    fn stack_stays_consistent_while_stepping() {
        let mut e = DacEngine::new(pentagon_with_inner());
        let mut max_depth = 0;
        let mut steps = 0;
        while !e.is_done() {
            e.step().unwrap();
            steps += 1;
            assert!(!e.frames().is_empty());
            assert!(e.cursor() < e.frames().len());
            assert_eq!(e.frames().len(), e.cursor() + 1);
            max_depth = max_depth.max(e.cursor());
        }
        // 7 points: 7 -> 3 -> 1 gives three levels below the root at most.
        assert!(max_depth >= 2 && max_depth <= 3);
        assert!(steps > 10);
        assert_eq!(e.cursor(), 0);
    }

    #[test]
    fn root_starts_then_divides() {
        let mut e = DacEngine::new(pentagon_with_inner());
        assert_eq!(e.state(), DacState::Start);
        e.step().unwrap();
        assert_eq!(e.state(), DacState::Divide);
        let split = e.current_frame().split_x().unwrap();
        assert!(split > 3.0 && split < 3.5);
        e.step().unwrap();
        // Now inside the left child.
        assert_eq!(e.cursor(), 1);
        assert_eq!(e.frames()[0].state, DacState::HullLeft);
        assert_eq!(e.current_frame().points.len(), 3);
    }

    #[test]
    fn single_point_root_is_done_immediately() {
        let e = DacEngine::new(vec![vector![1.0, 2.0]]);
        assert!(e.is_done());
        assert_eq!(e.hull(), &[vector![1.0, 2.0]]);
    }

    #[test]
    fn finish_twice_is_noop() {
        let mut e = DacEngine::new(pentagon_with_inner());
        e.finish().unwrap();
        let hull = e.hull().to_vec();
        e.finish().unwrap();
        assert_eq!(e.hull(), hull.as_slice());
    }

    #[test]
    fn tangent_merge_joins_clockwise() {
        let mut e = DacTangentMergeEngine::with_rule(pentagon_with_inner());
        e.finish().unwrap();
        let expected = vec![
            vector![2.0, 0.5],
            vector![0.0, 3.0],
            vector![3.5, 6.0],
            vector![7.0, 3.5],
            vector![5.0, 0.0],
        ];
        assert!(same_cycle(e.hull(), &expected, false));
        assert!(is_clockwise(e.hull()));
        assert_eq!(DacTangentMergeEngine::NAME, "divide-and-conquer-tangent-merge");
    }

    #[test]
    fn tangent_merge_of_two_points_and_a_pair() {
        let left = [vector![0.0, 0.0]];
        let right = [vector![2.0, 1.0], vector![3.0, -1.0]];
        let hull = TangentMerge::merge(&left, &right).unwrap();
        assert_eq!(hull.len(), 3);
        assert!(same_vertex_set(&hull, &[left[0], right[0], right[1]]));
        assert!(is_clockwise(&hull));
    }

    #[test]
    fn tangent_merge_passes_through_an_empty_side() {
        let right = [vector![2.0, 1.0], vector![3.0, -1.0]];
        assert_eq!(TangentMerge::merge(&[], &right).unwrap(), right.to_vec());
    }
}
