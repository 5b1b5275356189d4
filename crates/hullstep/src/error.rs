//! Typed failures surfaced by engines and the driver.
//!
//! All failures are local to one engine instance: a failed engine is dropped
//! and rebuilt by its owner, never repaired in place.

use thiserror::Error;

use crate::algorithm::AlgorithmKind;
use crate::geom2::Point;

/// Any failure an engine step can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("degenerate input: {0}")]
    DegenerateInput(#[from] DegenerateInputError),
    #[error(transparent)]
    InsufficientPoints(#[from] InsufficientPointsError),
}

/// Input configurations the predicates cannot classify.
///
/// The triggering conditions are exact: a zero that comes out of a
/// determinant or dot product is reported, nothing near zero is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DegenerateInputError {
    #[error(
        "point ({}, {}) lies on the line through ({}, {}) and ({}, {})",
        .point.x, .point.y, .from.x, .from.y, .to.x, .to.y
    )]
    Collinear { from: Point, to: Point, point: Point },
    #[error("hull walk did not close after {steps} edges")]
    OpenHullWalk { steps: usize },
    #[error("line through ({}, {}) and ({}, {}) is vertical", .p.x, .p.y, .q.x, .q.y)]
    VerticalLine { p: Point, q: Point },
    #[error(
        "kill-zone edge ({}, {}) -> ({}, {}) has no x extent",
        .from.x, .from.y, .to.x, .to.y
    )]
    VerticalRegionEdge { from: Point, to: Point },
    #[error("all points lie on the vertical line x = {x}")]
    ZeroWidth { x: f64 },
}

/// Raised by the driver before stepping an engine with too few points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{algorithm} needs at least {required} points, got {actual}")]
pub struct InsufficientPointsError {
    pub algorithm: AlgorithmKind,
    pub required: usize,
    pub actual: usize,
}

/// Name that does not match any `AlgorithmKind`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm `{0}` (expected one of: {list})", list = AlgorithmKind::names().join(", "))]
pub struct UnknownAlgorithm(pub String);
