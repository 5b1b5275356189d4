//! Point and directed-edge types.

use nalgebra::Vector2;

/// A point in the plane. Equality is exact coordinate equality.
pub type Point = Vector2<f64>;

/// Directed segment produced by the naive engine.
///
/// A hull boundary edge is recorded twice, once per orientation, so the hull
/// walk can move forward without remembering which way it came.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub from: Point,
    pub to: Point,
}

impl Edge {
    #[inline]
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// The same segment walked the other way.
    #[inline]
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}
