//! Vector helpers for circle-on-table geometry
//!
//! Vector arithmetic itself is `glam::Vec2`. The helpers here carry the
//! guards the stepper relies on instead of dividing by zero.

pub use glam::Vec2;

use crate::consts::COINCIDENT_DISTANCE;

/// Displacement `a - b` and its length.
///
/// A zero length is replaced by [`COINCIDENT_DISTANCE`] so the caller can
/// always divide by it.
#[inline]
pub fn separation(a: Vec2, b: Vec2) -> (Vec2, f32) {
    let delta = a - b;
    let mut distance = delta.length();
    if distance == 0.0 {
        distance = COINCIDENT_DISTANCE;
    }
    (delta, distance)
}

/// Unit vector pointing from `from` toward `to`, or `None` if the points coincide
#[inline]
pub fn aim_direction(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

/// Tangent of a unit normal (normal rotated +90°)
#[inline]
pub fn tangent_of(normal: Vec2) -> Vec2 {
    Vec2::new(-normal.y, normal.x)
}
