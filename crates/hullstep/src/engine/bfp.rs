//! Bentley–Faust–Preparata approximate hull by strip sampling.
//!
//! The x-range between the two x-extremes is cut into `k` equal vertical
//! strips. Each strip keeps only its min-y and max-y point; those plus the two
//! x-extremes (deduplicated by index) form the sample, which the naive engine
//! hulls into the approximate hull. The exact hull of all points is computed
//! afterwards for comparison. Larger `k` approaches the exact hull; `k = 1`
//! samples only the axis extremes. `k` is capped at [`BfpEngine::MAX_STRIPS`]
//! since one bucket is allocated per strip.

use std::collections::BTreeSet;
use std::num::NonZeroUsize;

use super::naive::naive_hull;
use super::{engine_states, log_transition, Engine};
use crate::error::{DegenerateInputError, EngineError};
use crate::geom2::Point;

/// Extremes of one strip, as indices into the input points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Strip {
    pub min_y: Option<usize>,
    pub max_y: Option<usize>,
}

engine_states! {
    /// States of [`BfpEngine`].
    pub enum BfpState {
        Start => "start",
        /// x-extremes and strip width known.
        MinXMaxX => "min-x-max-x",
        /// Points bucketed into strips.
        Strips => "strips",
        /// Sample assembled.
        Sample => "sample",
        /// Approximate hull of the sample.
        SampleHull => "sample-hull",
        /// Exact hull of all points.
        PointsHull => "points-hull",
        Done => "done",
    }
}

#[derive(Clone, Debug)]
pub struct BfpEngine {
    points: Vec<Point>,
    state: BfpState,
    k: NonZeroUsize,
    min_x: usize,
    max_x: usize,
    strip_width: f64,
    strips: Vec<Strip>,
    sample: Vec<Point>,
    sample_hull: Vec<Point>,
    hull: Vec<Point>,
}

impl BfpEngine {
    pub const MAX_STRIPS: NonZeroUsize = match NonZeroUsize::new(1 << 16) {
        Some(k) => k,
        None => panic!("strip cap literal is zero"),
    };

    pub fn new(points: Vec<Point>, strips: NonZeroUsize) -> Self {
        if strips > Self::MAX_STRIPS {
            tracing::warn!(
                engine = Self::NAME,
                requested = strips.get(),
                cap = Self::MAX_STRIPS.get(),
                "strip count capped"
            );
        }
        Self {
            points,
            state: BfpState::Start,
            k: strips.min(Self::MAX_STRIPS),
            min_x: 0,
            max_x: 0,
            strip_width: f64::NAN,
            strips: Vec::new(),
            sample: Vec::new(),
            sample_hull: Vec::new(),
            hull: Vec::new(),
        }
    }

    pub fn strip_count(&self) -> NonZeroUsize {
        self.k
    }

    /// The min-x and max-x points, once located.
    pub fn x_extremes(&self) -> Option<(Point, Point)> {
        (self.state != BfpState::Start && !self.points.is_empty())
            .then(|| (self.points[self.min_x], self.points[self.max_x]))
    }

    /// The `k + 1` vertical strip boundaries, once the width is known.
    pub fn strip_bounds(&self) -> Vec<f64> {
        let Some((lo, _)) = self.x_extremes() else {
            return Vec::new();
        };
        (0..=self.k.get())
            .map(|i| lo.x + self.strip_width * i as f64)
            .collect()
    }

    pub fn strips(&self) -> &[Strip] {
        &self.strips
    }

    /// Sampled points in input order.
    pub fn sample(&self) -> &[Point] {
        &self.sample
    }

    /// Approximate hull over the sample.
    pub fn sample_hull(&self) -> &[Point] {
        &self.sample_hull
    }

    /// Exact hull over all points.
    pub fn hull(&self) -> &[Point] {
        &self.hull
    }

    fn set_state(&mut self, next: BfpState) {
        log_transition(Self::NAME, self.state, next);
        self.state = next;
    }

    fn locate_extremes(&mut self) -> Result<(), DegenerateInputError> {
        let mut min_x = 0;
        let mut max_x = 0;
        for (i, p) in self.points.iter().enumerate() {
            if p.x < self.points[min_x].x {
                min_x = i;
            }
            if p.x > self.points[max_x].x {
                max_x = i;
            }
        }
        let dx = self.points[max_x].x - self.points[min_x].x;
        if !(dx > 0.0) {
            return Err(DegenerateInputError::ZeroWidth {
                x: self.points[min_x].x,
            });
        }
        self.min_x = min_x;
        self.max_x = max_x;
        self.strip_width = dx / self.k.get() as f64;
        Ok(())
    }

    fn fill_strips(&mut self) {
        let k = self.k.get();
        let origin = self.points[self.min_x].x;
        let mut strips = vec![Strip::default(); k];
        for (i, p) in self.points.iter().enumerate() {
            if i == self.min_x || i == self.max_x {
                continue;
            }
            // Rounding can land a point just left of max x in bucket k.
            let idx = (((p.x - origin) / self.strip_width).floor() as usize).min(k - 1);
            let strip = &mut strips[idx];
            if strip.min_y.map_or(true, |m| p.y < self.points[m].y) {
                strip.min_y = Some(i);
            }
            if strip.max_y.map_or(true, |m| p.y > self.points[m].y) {
                strip.max_y = Some(i);
            }
        }
        self.strips = strips;
    }

    fn collect_sample(&mut self) {
        let mut indices = BTreeSet::new();
        indices.insert(self.min_x);
        indices.insert(self.max_x);
        for strip in &self.strips {
            indices.extend(strip.min_y);
            indices.extend(strip.max_y);
        }
        self.sample = indices.into_iter().map(|i| self.points[i]).collect();
    }
}

impl Engine for BfpEngine {
    type State = BfpState;
    const NAME: &'static str = "bfp";

    fn state(&self) -> BfpState {
        self.state
    }

    fn is_done(&self) -> bool {
        self.state == BfpState::Done
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn step(&mut self) -> Result<(), EngineError> {
        match self.state {
            BfpState::Start => {
                if self.points.is_empty() {
                    self.set_state(BfpState::Done);
                    return Ok(());
                }
                self.locate_extremes()?;
                self.set_state(BfpState::MinXMaxX);
            }
            BfpState::MinXMaxX => {
                self.fill_strips();
                self.set_state(BfpState::Strips);
            }
            BfpState::Strips => {
                self.collect_sample();
                tracing::debug!(
                    engine = Self::NAME,
                    strips = self.k.get(),
                    sample = self.sample.len(),
                    "sample collected"
                );
                self.set_state(BfpState::Sample);
            }
            BfpState::Sample => {
                self.sample_hull = naive_hull(&self.sample)?;
                self.set_state(BfpState::SampleHull);
            }
            BfpState::SampleHull => {
                self.hull = naive_hull(&self.points)?;
                self.set_state(BfpState::PointsHull);
            }
            BfpState::PointsHull => self.set_state(BfpState::Done),
            BfpState::Done => {}
        }
        Ok(())
    }
}
