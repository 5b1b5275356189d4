use std::cmp::Ordering;

use nalgebra::Vector2;

use super::types::Point;
use crate::error::DegenerateInputError;

/// Perpendicular of `v`, rotated a quarter turn: `(-v.y, v.x)`.
#[inline]
pub fn normal(v: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(-v.y, v.x)
}

/// Determinant of the 2x2 matrix with columns `u` and `v`.
#[inline]
pub fn determinant(u: Vector2<f64>, v: Vector2<f64>) -> f64 {
    u.x * v.y - u.y * v.x
}

/// Half-plane test: signed dot product of `p - from` with the normal of `from -> to`.
///
/// Positive on the left of the directed line (raw coordinates), negative on the
/// right, exactly zero on the line.
#[inline]
pub fn side_of(from: Point, to: Point, p: Point) -> f64 {
    normal(to - from).dot(&(p - from))
}

/// Clockwise test on the first three vertices: `det(b - a, c - b) <= 0`.
///
/// Polygons with fewer than three vertices carry no orientation and report `true`.
pub fn is_clockwise(hull: &[Point]) -> bool {
    if hull.len() < 3 {
        return true;
    }
    let (a, b, c) = (hull[0], hull[1], hull[2]);
    determinant(b - a, c - b) <= 0.0
}

/// y-coordinate where the line through `p` and `q` crosses the vertical `x = middle_x`.
pub fn intercept_y(middle_x: f64, p: Point, q: Point) -> Result<f64, DegenerateInputError> {
    if p.x == q.x {
        return Err(DegenerateInputError::VerticalLine { p, q });
    }
    let m = (p.y - q.y) / (p.x - q.x);
    let b = p.y - m * p.x;
    Ok(m * middle_x + b)
}

/// Next index in stored (clockwise after normalization) order.
#[inline]
pub fn next_cw(i: usize, len: usize) -> usize {
    (i + 1) % len
}

/// Previous index in stored order, wrapping at zero.
#[inline]
pub fn next_ccw(i: usize, len: usize) -> usize {
    (i + len - 1) % len
}

/// Ordering by x only; ties keep their relative order under a stable sort.
#[inline]
pub fn by_x(a: &Point, b: &Point) -> Ordering {
    a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal)
}
