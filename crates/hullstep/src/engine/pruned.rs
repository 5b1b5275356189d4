//! Akl–Toussaint pruning in front of another engine.
//!
//! The kill zone of the input is built and applied exactly as in the `akl`
//! module. A fresh inner engine is then built over the survivors and advanced
//! one of its own steps per outer step. The naive pipeline of this shape is
//! [`AklToussaintEngine`](super::AklToussaintEngine); this module covers the
//! divide-and-conquer and TORCH finishers.

use super::akl::{build_kill_zone, survivors};
use super::dac::DacTangentMergeEngine;
use super::torch::TorchEngine;
use super::{engine_states, log_transition, Engine};
use crate::error::EngineError;
use crate::geom2::Point;

/// An engine that can finish the survivors of a kill zone.
pub trait Prunable: Engine + Sized {
    /// Name of the pruned pipeline.
    const PRUNED_NAME: &'static str;

    fn over_survivors(survivors: Vec<Point>) -> Self;

    /// Hull once the engine is done.
    fn final_hull(&self) -> &[Point];
}

impl Prunable for DacTangentMergeEngine {
    const PRUNED_NAME: &'static str = "divide-and-conquer-akl-toussaint";

    fn over_survivors(survivors: Vec<Point>) -> Self {
        Self::with_rule(survivors)
    }

    fn final_hull(&self) -> &[Point] {
        self.hull()
    }
}

impl Prunable for TorchEngine {
    const PRUNED_NAME: &'static str = "torch-akl-toussaint";

    fn over_survivors(survivors: Vec<Point>) -> Self {
        Self::new(survivors)
    }

    fn final_hull(&self) -> &[Point] {
        self.hull()
    }
}

engine_states! {
    /// States of [`PrunedEngine`].
    pub enum PrunedState {
        Start => "start",
        KillZone => "kill-zone",
        /// Survivors known and the inner engine built.
        Survivors => "survivors",
        /// Inner engine part-way through.
        Inner => "inner",
        Done => "done",
    }
}

#[derive(Clone, Debug)]
pub struct PrunedEngine<E> {
    points: Vec<Point>,
    state: PrunedState,
    kill_zone: Vec<Point>,
    survivors: Vec<Point>,
    inner: Option<E>,
}

pub type DacAklEngine = PrunedEngine<DacTangentMergeEngine>;
pub type TorchAklEngine = PrunedEngine<TorchEngine>;

impl<E: Prunable> PrunedEngine<E> {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            state: PrunedState::Start,
            kill_zone: Vec::new(),
            survivors: Vec::new(),
            inner: None,
        }
    }

    pub fn kill_zone(&self) -> &[Point] {
        &self.kill_zone
    }

    pub fn survivors(&self) -> &[Point] {
        &self.survivors
    }

    /// The finisher over the survivors, once built.
    pub fn inner(&self) -> Option<&E> {
        self.inner.as_ref()
    }

    /// Hull of the survivors; empty until the inner engine is done.
    pub fn hull(&self) -> &[Point] {
        match &self.inner {
            Some(e) if e.is_done() => e.final_hull(),
            _ => &[],
        }
    }

    fn set_state(&mut self, next: PrunedState) {
        log_transition(Self::NAME, self.state, next);
        self.state = next;
    }
}

impl<E: Prunable> Engine for PrunedEngine<E> {
    type State = PrunedState;
    const NAME: &'static str = E::PRUNED_NAME;

    fn state(&self) -> PrunedState {
        self.state
    }

    fn is_done(&self) -> bool {
        self.state == PrunedState::Done
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn step(&mut self) -> Result<(), EngineError> {
        match self.state {
            PrunedState::Start => {
                self.kill_zone = build_kill_zone(&self.points);
                self.set_state(PrunedState::KillZone);
            }
            PrunedState::KillZone => {
                self.survivors = survivors(&self.points, &self.kill_zone);
                tracing::debug!(
                    engine = Self::NAME,
                    points = self.points.len(),
                    survivors = self.survivors.len(),
                    "kill zone applied"
                );
                self.inner = Some(E::over_survivors(self.survivors.clone()));
                self.set_state(PrunedState::Survivors);
            }
            PrunedState::Survivors | PrunedState::Inner => {
                let Some(inner) = self.inner.as_mut() else {
                    unreachable!("inner engine is built when leaving kill-zone");
                };
                inner.step()?;
                if inner.is_done() {
                    self.set_state(PrunedState::Done);
                } else if self.state == PrunedState::Survivors {
                    self.set_state(PrunedState::Inner);
                }
            }
            PrunedState::Done => {}
        }
        Ok(())
    }
}
