//! Owner of the point set and the single live engine bound to it.
//!
//! Any input change (a new point, another algorithm, another strip count,
//! a reset) drops the engine and builds a fresh one over the current points.
//! Partial progress never carries over. The driver is also where the
//! minimum-size precondition is enforced, since engines do not check it.

use std::num::NonZeroUsize;

use crate::algorithm::{Algorithm, AlgorithmKind, EngineCfg};
use crate::error::{EngineError, InsufficientPointsError};
use crate::geom2::Point;

#[derive(Clone, Debug)]
pub struct Driver {
    points: Vec<Point>,
    kind: AlgorithmKind,
    cfg: EngineCfg,
    engine: Algorithm,
}

impl Driver {
    pub fn new(kind: AlgorithmKind, cfg: EngineCfg) -> Self {
        Self::with_points(kind, cfg, Vec::new())
    }

    pub fn with_points(kind: AlgorithmKind, cfg: EngineCfg, points: Vec<Point>) -> Self {
        let engine = Algorithm::new(kind, points.clone(), cfg);
        Self {
            points,
            kind,
            cfg,
            engine,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn kind(&self) -> AlgorithmKind {
        self.kind
    }

    pub fn cfg(&self) -> EngineCfg {
        self.cfg
    }

    /// The live engine, read-only, for rendering.
    pub fn engine(&self) -> &Algorithm {
        &self.engine
    }

    pub fn add_point(&mut self, p: Point) {
        self.points.push(p);
        self.rebuild();
    }

    pub fn select(&mut self, kind: AlgorithmKind) {
        self.kind = kind;
        self.rebuild();
    }

    pub fn set_strips(&mut self, strips: NonZeroUsize) {
        self.cfg.strips = strips;
        self.rebuild();
    }

    /// Clear all points.
    pub fn reset(&mut self) {
        self.points.clear();
        self.rebuild();
    }

    /// Advance the engine once. On failure the engine is rebuilt from scratch.
    pub fn step(&mut self) -> Result<(), EngineError> {
        self.check_size()?;
        let result = self.engine.step();
        self.recover(result)
    }

    /// Drain the engine to its terminal state. On failure the engine is rebuilt.
    pub fn finish(&mut self) -> Result<(), EngineError> {
        self.check_size()?;
        let result = self.engine.finish();
        self.recover(result)
    }

    fn check_size(&self) -> Result<(), InsufficientPointsError> {
        let required = self.engine.min_required_points();
        if self.points.len() < required {
            return Err(InsufficientPointsError {
                algorithm: self.kind,
                required,
                actual: self.points.len(),
            });
        }
        Ok(())
    }

    fn recover(&mut self, result: Result<(), EngineError>) -> Result<(), EngineError> {
        if let Err(err) = &result {
            tracing::warn!(algorithm = %self.kind, error = %err, "engine failed; rebuilding");
            self.rebuild();
        }
        result
    }

    fn rebuild(&mut self) {
        self.engine = Algorithm::new(self.kind, self.points.clone(), self.cfg);
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new(AlgorithmKind::Naive, EngineCfg::default())
    }
}
