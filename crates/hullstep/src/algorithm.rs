//! The closed set of engines and the factory keyed on [`AlgorithmKind`].
//!
//! Callers that only need "step, finish, render" hold an [`Algorithm`] and
//! never name a concrete engine type. Matching on the enum gives full access
//! to engine-specific artifacts (kill zones, strips, frames) for display.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::engine::{
    AklPathEngine, AklToussaintEngine, BfpEngine, DacAklEngine, DacEngine, DacTangentEngine,
    DacTangentMergeEngine, Engine, NaiveEngine, TorchAklEngine, TorchEngine,
    TorchSouthWestEngine,
};
use crate::error::{EngineError, UnknownAlgorithm};
use crate::geom2::Point;

/// Discriminant selecting one engine variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    Naive,
    DivideAndConquer,
    DivideAndConquerTangentMerge,
    DivideAndConquerTangent,
    AklToussaint,
    AklToussaintPath,
    DivideAndConquerAklToussaint,
    Torch,
    TorchAklToussaint,
    TorchSouthWest,
    Bfp,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 11] = [
        AlgorithmKind::Naive,
        AlgorithmKind::DivideAndConquer,
        AlgorithmKind::DivideAndConquerTangentMerge,
        AlgorithmKind::DivideAndConquerTangent,
        AlgorithmKind::AklToussaint,
        AlgorithmKind::AklToussaintPath,
        AlgorithmKind::DivideAndConquerAklToussaint,
        AlgorithmKind::Torch,
        AlgorithmKind::TorchAklToussaint,
        AlgorithmKind::TorchSouthWest,
        AlgorithmKind::Bfp,
    ];

    /// Stable name, shared with the engine's `Engine::NAME`.
    pub const fn name(self) -> &'static str {
        match self {
            AlgorithmKind::Naive => NaiveEngine::NAME,
            AlgorithmKind::DivideAndConquer => <DacEngine>::NAME,
            AlgorithmKind::DivideAndConquerTangentMerge => DacTangentMergeEngine::NAME,
            AlgorithmKind::DivideAndConquerTangent => DacTangentEngine::NAME,
            AlgorithmKind::AklToussaint => AklToussaintEngine::NAME,
            AlgorithmKind::AklToussaintPath => AklPathEngine::NAME,
            AlgorithmKind::DivideAndConquerAklToussaint => DacAklEngine::NAME,
            AlgorithmKind::Torch => TorchEngine::NAME,
            AlgorithmKind::TorchAklToussaint => TorchAklEngine::NAME,
            AlgorithmKind::TorchSouthWest => TorchSouthWestEngine::NAME,
            AlgorithmKind::Bfp => BfpEngine::NAME,
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|k| k.name()).collect()
    }

    pub const fn min_required_points(self) -> usize {
        match self {
            AlgorithmKind::DivideAndConquerTangent => DacTangentEngine::MIN_POINTS,
            _ => 3,
        }
    }

    /// Whether the terminal state carries a full hull of the input.
    ///
    /// The tangent variant stops at the tangent pair and the south-west
    /// variant at a single chain.
    pub const fn produces_hull(self) -> bool {
        !matches!(
            self,
            AlgorithmKind::DivideAndConquerTangent | AlgorithmKind::TorchSouthWest
        )
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| UnknownAlgorithm(s.to_owned()))
    }
}

/// Per-engine configuration. Only the strip sampler reads anything today.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineCfg {
    /// Strip count `k` for the Bentley–Faust–Preparata sampler.
    pub strips: NonZeroUsize,
}

impl EngineCfg {
    pub const DEFAULT_STRIPS: NonZeroUsize = match NonZeroUsize::new(8) {
        Some(k) => k,
        None => panic!("strip count literal is zero"),
    };
}

impl Default for EngineCfg {
    fn default() -> Self {
        Self {
            strips: Self::DEFAULT_STRIPS,
        }
    }
}

/// One engine of any kind, bound to its point set.
#[derive(Clone, Debug)]
pub enum Algorithm {
    Naive(NaiveEngine),
    DivideAndConquer(DacEngine),
    DivideAndConquerTangentMerge(DacTangentMergeEngine),
    DivideAndConquerTangent(DacTangentEngine),
    AklToussaint(AklToussaintEngine),
    AklToussaintPath(AklPathEngine),
    DivideAndConquerAklToussaint(DacAklEngine),
    Torch(TorchEngine),
    TorchAklToussaint(TorchAklEngine),
    TorchSouthWest(TorchSouthWestEngine),
    Bfp(BfpEngine),
}

macro_rules! dispatch {
    ($value:expr, $engine:ident => $body:expr) => {
        match $value {
            Algorithm::Naive($engine) => $body,
            Algorithm::DivideAndConquer($engine) => $body,
            Algorithm::DivideAndConquerTangentMerge($engine) => $body,
            Algorithm::DivideAndConquerTangent($engine) => $body,
            Algorithm::AklToussaint($engine) => $body,
            Algorithm::AklToussaintPath($engine) => $body,
            Algorithm::DivideAndConquerAklToussaint($engine) => $body,
            Algorithm::Torch($engine) => $body,
            Algorithm::TorchAklToussaint($engine) => $body,
            Algorithm::TorchSouthWest($engine) => $body,
            Algorithm::Bfp($engine) => $body,
        }
    };
}

impl Algorithm {
    /// Build a fresh engine of `kind` over `points`.
    pub fn new(kind: AlgorithmKind, points: Vec<Point>, cfg: EngineCfg) -> Self {
        tracing::debug!(algorithm = %kind, points = points.len(), "engine constructed");
        match kind {
            AlgorithmKind::Naive => Self::Naive(NaiveEngine::new(points)),
            AlgorithmKind::DivideAndConquer => Self::DivideAndConquer(DacEngine::new(points)),
            AlgorithmKind::DivideAndConquerTangentMerge => {
                Self::DivideAndConquerTangentMerge(DacTangentMergeEngine::with_rule(points))
            }
            AlgorithmKind::DivideAndConquerTangent => {
                Self::DivideAndConquerTangent(DacTangentEngine::new(points))
            }
            AlgorithmKind::AklToussaint => Self::AklToussaint(AklToussaintEngine::new(points)),
            AlgorithmKind::AklToussaintPath => Self::AklToussaintPath(AklPathEngine::new(points)),
            AlgorithmKind::DivideAndConquerAklToussaint => {
                Self::DivideAndConquerAklToussaint(DacAklEngine::new(points))
            }
            AlgorithmKind::Torch => Self::Torch(TorchEngine::new(points)),
            AlgorithmKind::TorchAklToussaint => Self::TorchAklToussaint(TorchAklEngine::new(points)),
            AlgorithmKind::TorchSouthWest => Self::TorchSouthWest(TorchSouthWestEngine::new(points)),
            AlgorithmKind::Bfp => Self::Bfp(BfpEngine::new(points, cfg.strips)),
        }
    }

    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Self::Naive(_) => AlgorithmKind::Naive,
            Self::DivideAndConquer(_) => AlgorithmKind::DivideAndConquer,
            Self::DivideAndConquerTangentMerge(_) => AlgorithmKind::DivideAndConquerTangentMerge,
            Self::DivideAndConquerTangent(_) => AlgorithmKind::DivideAndConquerTangent,
            Self::AklToussaint(_) => AlgorithmKind::AklToussaint,
            Self::AklToussaintPath(_) => AlgorithmKind::AklToussaintPath,
            Self::DivideAndConquerAklToussaint(_) => AlgorithmKind::DivideAndConquerAklToussaint,
            Self::Torch(_) => AlgorithmKind::Torch,
            Self::TorchAklToussaint(_) => AlgorithmKind::TorchAklToussaint,
            Self::TorchSouthWest(_) => AlgorithmKind::TorchSouthWest,
            Self::Bfp(_) => AlgorithmKind::Bfp,
        }
    }

    /// Kebab-case label of the current state.
    pub fn state_label(&self) -> &'static str {
        dispatch!(self, e => e.state().as_str())
    }

    pub fn is_done(&self) -> bool {
        dispatch!(self, e => e.is_done())
    }

    pub fn points(&self) -> &[Point] {
        dispatch!(self, e => e.points())
    }

    pub fn min_required_points(&self) -> usize {
        dispatch!(self, e => e.min_required_points())
    }

    pub fn step(&mut self) -> Result<(), EngineError> {
        dispatch!(self, e => e.step())
    }

    pub fn finish(&mut self) -> Result<(), EngineError> {
        dispatch!(self, e => e.finish())
    }

    /// The engine's hull so far, or `None` for variants that never build one.
    pub fn hull(&self) -> Option<&[Point]> {
        match self {
            Self::Naive(e) => Some(e.hull()),
            Self::DivideAndConquer(e) => Some(e.hull()),
            Self::DivideAndConquerTangentMerge(e) => Some(e.hull()),
            Self::AklToussaint(e) => Some(e.hull()),
            Self::AklToussaintPath(e) => Some(e.hull()),
            Self::DivideAndConquerAklToussaint(e) => Some(e.hull()),
            Self::Torch(e) => Some(e.hull()),
            Self::TorchAklToussaint(e) => Some(e.hull()),
            Self::Bfp(e) => Some(e.hull()),
            Self::DivideAndConquerTangent(_) | Self::TorchSouthWest(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::validate::same_vertex_set;
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
    fn names_round_trip_through_from_str() {
        for kind in AlgorithmKind::ALL {
            assert_eq!(kind.to_string().parse::<AlgorithmKind>().unwrap(), kind);
        }
        assert_eq!(
            "akl-toussaint-path".parse::<AlgorithmKind>().unwrap(),
            AlgorithmKind::AklToussaintPath
        );
    }

    #[test]
    fn unknown_name_lists_choices() {
        let err = "quickhull".parse::<AlgorithmKind>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("quickhull"));
        assert!(msg.contains("divide-and-conquer-tangent"));
    }

    #[test]
    fn factory_builds_requested_kind() {
        for kind in AlgorithmKind::ALL {
            let alg = Algorithm::new(kind, pentagon_with_inner(), EngineCfg::default());
            assert_eq!(alg.kind(), kind);
            assert_eq!(alg.points().len(), 7);
            assert_eq!(alg.min_required_points(), kind.min_required_points());
            assert!(!alg.is_done());
        }
    }

    #[test]
    fn hull_kinds_agree_on_pentagon() {
        for kind in AlgorithmKind::ALL.into_iter().filter(|k| k.produces_hull()) {
            let mut alg = Algorithm::new(kind, pentagon_with_inner(), EngineCfg::default());
            alg.finish().unwrap();
            assert_eq!(alg.state_label(), "done", "{kind}");
            let hull = alg.hull().unwrap();
            assert_eq!(hull.len(), 5, "{kind}");
            assert!(!hull.contains(&vector![3.0, 3.0]), "{kind}");
            assert!(!hull.contains(&vector![4.5, 2.5]), "{kind}");
        }
    }

    #[test]
    fn partial_kinds_expose_no_hull() {
        let mut alg = Algorithm::new(
            AlgorithmKind::TorchSouthWest,
            pentagon_with_inner(),
            EngineCfg::default(),
        );
        alg.finish().unwrap();
        assert!(alg.hull().is_none());
        assert!(!AlgorithmKind::DivideAndConquerTangent.produces_hull());
    }

    #[test]
    fn pruned_pipelines_agree_with_their_base() {
        let pairs = [
            (
                AlgorithmKind::DivideAndConquerAklToussaint,
                AlgorithmKind::DivideAndConquerTangentMerge,
            ),
            (AlgorithmKind::TorchAklToussaint, AlgorithmKind::Torch),
        ];
        for (pruned, base) in pairs {
            let mut a = Algorithm::new(pruned, pentagon_with_inner(), EngineCfg::default());
            let mut b = Algorithm::new(base, pentagon_with_inner(), EngineCfg::default());
            a.finish().unwrap();
            b.finish().unwrap();
            assert!(same_vertex_set(a.hull().unwrap(), b.hull().unwrap()), "{pruned}");
        }
    }

    #[test]
    fn every_kind_finishes_on_empty_input() {
        for kind in AlgorithmKind::ALL {
            let mut alg = Algorithm::new(kind, Vec::new(), EngineCfg::default());
            alg.finish().unwrap();
            assert!(alg.is_done(), "{kind}");
            assert!(alg.hull().map_or(true, <[Point]>::is_empty), "{kind}");
        }
    }

    #[test]
    fn default_strip_count() {
        assert_eq!(EngineCfg::default().strips.get(), 8);
    }
}
