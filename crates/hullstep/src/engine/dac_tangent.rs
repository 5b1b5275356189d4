//! Divide and conquer with a direct tangent search, one split level deep.
//!
//! The x-sorted points are split at the midpoint and each half is hulled by
//! the naive engine, then both hulls are normalized to clockwise order (see
//! `geom2::is_clockwise`). Starting from the rightmost vertex of the left hull
//! and the leftmost vertex of the right hull, the walk advances the left
//! endpoint counter-clockwise or the right endpoint clockwise whenever that
//! raises the y-intercept of the candidate line at the vertical line midway
//! between the two extremes. It stops at the first local optimum.
//!
//! The result is the tangent endpoint pair maximizing that intercept (the
//! upper tangent in raw y). No merged polygon is assembled here; the
//! tangent-merge rule of the `dac` engine walks both tangents with
//! [`Tangent::walk`] and joins the hulls.
//!
//! With fewer than four points one half hulls to nothing, and the engine
//! finishes without a tangent.

use super::naive::naive_hull;
use super::{engine_states, log_transition, Engine};
use crate::error::{DegenerateInputError, EngineError};
use crate::geom2::{by_x, intercept_y, is_clockwise, next_ccw, next_cw, Point};

/// Supporting line sought by a tangent walk between two clockwise hulls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tangent {
    /// Maximizes the intercept: left endpoint moves counter-clockwise, right clockwise.
    Upper,
    /// Minimizes the intercept: left endpoint moves clockwise, right counter-clockwise.
    Lower,
}

impl Tangent {
    fn improves(self, candidate: f64, current: f64) -> bool {
        match self {
            Tangent::Upper => candidate > current,
            Tangent::Lower => candidate < current,
        }
    }

    /// One walk move from `(i, j)`, or `None` at a local optimum.
    ///
    /// The left endpoint is tried first.
    pub fn advance(
        self,
        left: &[Point],
        right: &[Point],
        middle_x: f64,
        (i, j): (usize, usize),
    ) -> Result<Option<(usize, usize)>, DegenerateInputError> {
        let (next_i, next_j) = match self {
            Tangent::Upper => (next_ccw(i, left.len()), next_cw(j, right.len())),
            Tangent::Lower => (next_cw(i, left.len()), next_ccw(j, right.len())),
        };
        let current = intercept_y(middle_x, left[i], right[j])?;
        if self.improves(intercept_y(middle_x, left[next_i], right[j])?, current) {
            return Ok(Some((next_i, j)));
        }
        if self.improves(intercept_y(middle_x, left[i], right[next_j])?, current) {
            return Ok(Some((i, next_j)));
        }
        Ok(None)
    }

    /// Advance from `start` until no move improves the intercept.
    ///
    /// Terminates because every move strictly improves it.
    pub fn walk(
        self,
        left: &[Point],
        right: &[Point],
        middle_x: f64,
        start: (usize, usize),
    ) -> Result<(usize, usize), DegenerateInputError> {
        let mut at = start;
        while let Some(next) = self.advance(left, right, middle_x, at)? {
            at = next;
        }
        Ok(at)
    }
}

/// Index of the rightmost vertex of `left` and the leftmost of `right`.
///
/// First occurrence wins on ties. Both hulls must be non-empty.
pub fn facing_extremes(left: &[Point], right: &[Point]) -> (usize, usize) {
    let mut rightmost = 0;
    for (k, p) in left.iter().enumerate() {
        if p.x > left[rightmost].x {
            rightmost = k;
        }
    }
    let mut leftmost = 0;
    for (k, p) in right.iter().enumerate() {
        if p.x < right[leftmost].x {
            leftmost = k;
        }
    }
    (rightmost, leftmost)
}

engine_states! {
    /// States of [`DacTangentEngine`].
    pub enum DacTangentState {
        Start => "start",
        /// Points sorted and split.
        Divide => "divide",
        /// Both halves hulled and normalized.
        Hulls => "hulls",
        /// Walk endpoints placed on the facing extremes.
        RightmostAndLeftmost => "rightmost-and-leftmost",
        /// Intercept of the current candidate known.
        Intersect => "intersect",
        /// One endpoint just moved.
        Advance => "advance",
        Done => "done",
    }
}

#[derive(Clone, Debug)]
pub struct DacTangentEngine {
    points: Vec<Point>,
    state: DacTangentState,
    sorted: Vec<Point>,
    half: usize,
    left_hull: Vec<Point>,
    right_hull: Vec<Point>,
    middle_x: f64,
    i: usize,
    j: usize,
    intercept: f64,
}

impl DacTangentEngine {
    pub const MIN_POINTS: usize = 6;

    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            state: DacTangentState::Start,
            sorted: Vec::new(),
            half: 0,
            left_hull: Vec::new(),
            right_hull: Vec::new(),
            middle_x: f64::NAN,
            i: 0,
            j: 0,
            intercept: f64::NAN,
        }
    }

    /// Sorted copy of the input; empty before the first step.
    pub fn sorted(&self) -> &[Point] {
        &self.sorted
    }

    /// x of the vertical line between the two halves.
    pub fn split_x(&self) -> Option<f64> {
        if self.half == 0 || self.half >= self.sorted.len() {
            return None;
        }
        Some((self.sorted[self.half - 1].x + self.sorted[self.half].x) / 2.0)
    }

    /// Clockwise hull of the left half.
    pub fn left_hull(&self) -> &[Point] {
        &self.left_hull
    }

    /// Clockwise hull of the right half.
    pub fn right_hull(&self) -> &[Point] {
        &self.right_hull
    }

    /// Abscissa where intercepts are measured, once the extremes are known.
    pub fn middle_x(&self) -> Option<f64> {
        self.walking().then_some(self.middle_x)
    }

    /// Intercept of the current candidate, once computed.
    pub fn intercept(&self) -> Option<f64> {
        let computed = matches!(
            self.state,
            DacTangentState::Intersect | DacTangentState::Advance | DacTangentState::Done
        );
        (computed && self.has_halves()).then_some(self.intercept)
    }

    /// Current candidate `(left endpoint, right endpoint)`; final once done.
    pub fn tangent(&self) -> Option<(Point, Point)> {
        self.walking()
            .then(|| (self.left_hull[self.i], self.right_hull[self.j]))
    }

    fn walking(&self) -> bool {
        let placed = matches!(
            self.state,
            DacTangentState::RightmostAndLeftmost
                | DacTangentState::Intersect
                | DacTangentState::Advance
                | DacTangentState::Done
        );
        placed && self.has_halves()
    }

    fn has_halves(&self) -> bool {
        !self.left_hull.is_empty() && !self.right_hull.is_empty()
    }

    fn set_state(&mut self, next: DacTangentState) {
        log_transition(Self::NAME, self.state, next);
        self.state = next;
    }

    fn clockwise(mut hull: Vec<Point>) -> Vec<Point> {
        if !is_clockwise(&hull) {
            hull.reverse();
        }
        hull
    }

    fn hull_halves(&mut self) -> Result<(), EngineError> {
        let left = Self::clockwise(naive_hull(&self.sorted[..self.half])?);
        let right = Self::clockwise(naive_hull(&self.sorted[self.half..])?);
        self.left_hull = left;
        self.right_hull = right;
        Ok(())
    }

    fn place_extremes(&mut self) {
        let (rightmost, leftmost) = facing_extremes(&self.left_hull, &self.right_hull);
        self.i = rightmost;
        self.j = leftmost;
        self.middle_x = (self.left_hull[rightmost].x + self.right_hull[leftmost].x) / 2.0;
    }

    /// Move one endpoint if that raises the intercept. Returns whether one moved.
    fn try_advance(&mut self) -> Result<bool, EngineError> {
        let next = Tangent::Upper.advance(
            &self.left_hull,
            &self.right_hull,
            self.middle_x,
            (self.i, self.j),
        )?;
        if let Some((i, j)) = next {
            self.i = i;
            self.j = j;
        }
        Ok(next.is_some())
    }
}

impl Engine for DacTangentEngine {
    type State = DacTangentState;
    const NAME: &'static str = "divide-and-conquer-tangent";

    fn state(&self) -> DacTangentState {
        self.state
    }

    fn is_done(&self) -> bool {
        self.state == DacTangentState::Done
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn step(&mut self) -> Result<(), EngineError> {
        match self.state {
            DacTangentState::Start => {
                let mut sorted = self.points.clone();
                sorted.sort_by(by_x);
                self.half = sorted.len() / 2;
                self.sorted = sorted;
                self.set_state(DacTangentState::Divide);
            }
            DacTangentState::Divide => {
                self.hull_halves()?;
                self.set_state(DacTangentState::Hulls);
            }
            DacTangentState::Hulls => {
                if self.has_halves() {
                    self.place_extremes();
                    self.set_state(DacTangentState::RightmostAndLeftmost);
                } else {
                    tracing::debug!(engine = Self::NAME, "a half has no hull, no tangent");
                    self.set_state(DacTangentState::Done);
                }
            }
            DacTangentState::RightmostAndLeftmost | DacTangentState::Advance => {
                self.intercept = intercept_y(
                    self.middle_x,
                    self.left_hull[self.i],
                    self.right_hull[self.j],
                )?;
                self.set_state(DacTangentState::Intersect);
            }
            DacTangentState::Intersect => {
                if self.try_advance()? {
                    self.set_state(DacTangentState::Advance);
                } else {
                    tracing::debug!(
                        engine = Self::NAME,
                        intercept = self.intercept,
                        "tangent found"
                    );
                    self.set_state(DacTangentState::Done);
                }
            }
            DacTangentState::Done => {}
        }
        Ok(())
    }

    fn min_required_points(&self) -> usize {
        Self::MIN_POINTS
    }
}
