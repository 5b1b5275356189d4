//! Curated surface for front ends (the CLI, benches, examples).
//!
//! Important
//! - Not a stability promise. It exists so callers import from one place
//!   instead of reaching into individual engine modules.

// Selection and driving
pub use crate::algorithm::{Algorithm, AlgorithmKind, EngineCfg};
pub use crate::driver::Driver;
pub use crate::engine::Engine;
// Engines and their display artifacts
pub use crate::engine::{
    naive_hull, AklPathEngine, AklToussaintEngine, BfpEngine, DacAklEngine, DacEngine, DacFrame,
    DacTangentEngine, DacTangentMergeEngine, LateralChains, NaiveEngine, Strip, TorchAklEngine,
    TorchEngine, TorchSouthWestEngine,
};
// Errors
pub use crate::error::{DegenerateInputError, EngineError, InsufficientPointsError, UnknownAlgorithm};
// Geometry, generation and validation
pub use crate::geom2::rand::{general_position, PointsCfg};
pub use crate::geom2::validate::{is_sample_subset, same_cycle, same_vertex_set};
pub use crate::geom2::{Edge, Point};
