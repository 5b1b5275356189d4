//! Resumable convex-hull engines.
//!
//! Each engine owns its point set for its whole lifetime and exposes a closed
//! state enum. `step` performs one bounded unit of work; `finish` calls `step`
//! until the terminal state and is a no-op once there. No engine leaves its
//! terminal state.
//!
//! Modules
//! - `naive`: O(n²) edge test; the finisher used by every other engine.
//! - `dac`: divide and conquer over an explicit frame stack, merging by
//!   re-hulling or along the upper and lower tangents.
//! - `dac_tangent`: one split level, then a stepwise upper-tangent walk.
//! - `akl`: Akl–Toussaint kill zone, finished naively or by convex paths.
//! - `pruned`: the kill zone in front of the tangent-merge or TORCH engine.
//! - `torch`: four monotone lateral chains, and the south-west chain alone.
//! - `bfp`: Bentley–Faust–Preparata strip sampling.

use std::fmt;

use crate::error::EngineError;
use crate::geom2::Point;

/// Declares a state enum with its kebab-case labels.
macro_rules! engine_states {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}
pub(crate) use engine_states;

pub mod akl;
pub mod bfp;
pub mod dac;
pub mod dac_tangent;
pub mod naive;
pub mod pruned;
pub mod torch;

pub use akl::{AklPathEngine, AklPathState, AklState, AklToussaintEngine};
pub use bfp::{BfpEngine, BfpState, Strip};
pub use dac::{
    DacEngine, DacFrame, DacState, DacTangentMergeEngine, MergeRule, Rehull, TangentMerge,
};
pub use dac_tangent::{DacTangentEngine, DacTangentState, Tangent};
pub use naive::{naive_hull, NaiveEngine, NaiveState};
pub use pruned::{DacAklEngine, Prunable, PrunedEngine, PrunedState, TorchAklEngine};
pub use torch::{LateralChains, TorchEngine, TorchSouthWestEngine, TorchState, TorchSwState};

/// A convex-hull algorithm expressed as an explicit state machine.
pub trait Engine {
    /// Closed set of states; `Display` yields a stable kebab-case label.
    type State: Copy + Eq + fmt::Debug + fmt::Display;

    /// Short engine name used in log events.
    const NAME: &'static str;

    fn state(&self) -> Self::State;

    fn is_done(&self) -> bool;

    /// The input point set, fixed at construction.
    fn points(&self) -> &[Point];

    /// Advance by one discrete unit of work. Idempotent once done.
    ///
    /// On error the engine keeps its pre-step state; callers drop it.
    fn step(&mut self) -> Result<(), EngineError>;

    /// Step until done. Safe to call on a finished engine.
    fn finish(&mut self) -> Result<(), EngineError> {
        while !self.is_done() {
            self.step()?;
        }
        Ok(())
    }

    /// Input size the owner must guarantee before stepping. Not enforced here.
    fn min_required_points(&self) -> usize {
        3
    }
}

#[inline]
pub(crate) fn log_transition(engine: &'static str, from: impl fmt::Display, to: impl fmt::Display) {
    tracing::trace!(engine, %from, %to, "transition");
}
