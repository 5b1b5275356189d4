//! Planar geometry shared by every engine.
//!
//! Purpose
//! - One point type (`Point`, an `f64` column vector) with exact equality.
//! - The handful of primitives the engines need: subtraction and dot product
//!   (from nalgebra), the perpendicular normal, the 2x2 determinant, and the
//!   orientation and intercept helpers built on them.
//!
//! Numerics
//! - No epsilons anywhere in the predicates. Zero results are reported to the
//!   caller (see `error::DegenerateInputError`) rather than absorbed.
//!
//! Code cross-refs: `engine::*`, `rand::general_position`, `validate::same_cycle`

pub mod rand;
mod types;
mod util;
pub mod validate;

pub use types::{Edge, Point};
pub use util::{
    by_x, determinant, intercept_y, is_clockwise, next_ccw, next_cw, normal, side_of,
};

#[cfg(test)]
mod tests;
