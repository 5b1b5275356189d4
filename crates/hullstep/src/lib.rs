//! Step-through convex-hull engines for planar point sets.
//!
//! Every algorithm is an explicit, resumable state machine: `step()` performs
//! one discrete unit of work, `finish()` drains to the terminal state, and the
//! intermediate artifacts (candidate edges, kill zones, chains, strips) stay
//! readable between steps for display.
//!
//! Layout
//! - `geom2`: point type, primitives, seeded generators, hull validation.
//! - `engine`: the `Engine` trait and one module per algorithm.
//! - `algorithm`: the closed set of engines, selected by `AlgorithmKind`.
//! - `driver`: holds the point set and exactly one engine bound to it.
//!
//! Conventions
//! - Compass names use the canvas frame (y grows downward): north is min y.
//! - Orientation predicates use raw coordinates; see `geom2::is_clockwise`.

pub mod algorithm;
pub mod api;
pub mod driver;
pub mod engine;
pub mod error;
pub mod geom2;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use algorithm::{Algorithm, AlgorithmKind, EngineCfg};
pub use driver::Driver;
pub use engine::Engine;
pub use error::{DegenerateInputError, EngineError, InsufficientPointsError, UnknownAlgorithm};
pub use geom2::{Edge, Point};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::algorithm::{Algorithm, AlgorithmKind, EngineCfg};
    pub use crate::driver::Driver;
    pub use crate::engine::Engine;
    pub use crate::error::EngineError;
    pub use crate::geom2::rand::{general_position, PointsCfg};
    pub use crate::geom2::{determinant, is_clockwise, normal, Edge, Point};
    pub use nalgebra::Vector2 as Vec2;
}
