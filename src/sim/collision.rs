//! Ball/ball and ball/cushion collision response
//!
//! Collisions are resolved discretely once per frame. Overlap is undone by
//! backing both balls along their travel directions by a correction factor,
//! exchanging normal velocity, then moving them forward along the new
//! directions by the same factor.

use glam::Vec2;

use super::state::{BallSlot, Wall};
use crate::consts::MAX_CORRECTION;
use crate::geometry::{separation, tangent_of};
use crate::layout::TableLayout;

/// Velocity of a ball split onto a normal/tangent basis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisComponents {
    pub normal: f32,
    pub tangent: f32,
}

impl AxisComponents {
    #[inline]
    pub fn project(direction: Vec2, normal: Vec2, tangent: Vec2) -> Self {
        Self {
            normal: normal.dot(direction),
            tangent: tangent.dot(direction),
        }
    }
}

/// Penetration correction factor for two touching balls.
///
/// `(contact - distance) / (vn_b - vn_a)`, bounded to `±MAX_CORRECTION`.
/// A `0 / 0` ratio (balls exactly touching with equal normal speeds) counts
/// as no correction.
pub fn correction_factor(contact: f32, distance: f32, vn_a: f32, vn_b: f32) -> f32 {
    let dt = (contact - distance) / (vn_b - vn_a);
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(-MAX_CORRECTION, MAX_CORRECTION)
}

/// Resolve a possible collision between two balls.
///
/// Returns `true` if the balls were touching and have been resolved.
/// Equal masses are assumed: the normal components of the two directions
/// are swapped, tangential components are kept.
pub fn resolve_ball_pair(
    a: &mut BallSlot,
    b: &mut BallSlot,
    contact: f32,
    collision_loss: f32,
) -> bool {
    let (delta, distance) = separation(a.position, b.position);
    if distance > contact {
        return false;
    }

    let normal = delta / distance;
    let tangent = tangent_of(normal);

    let va = AxisComponents::project(a.direction, normal, tangent);
    let vb = AxisComponents::project(b.direction, normal, tangent);

    let dt = correction_factor(contact, distance, va.normal, vb.normal);

    // Back both balls off along where they came from
    a.position -= a.direction * dt;
    b.position -= b.direction * dt;

    // Normal is refreshed at the corrected positions, the tangent is not
    let (delta, distance) = separation(a.position, b.position);
    let normal = delta / distance;
    let vb = AxisComponents::project(b.direction, normal, tangent);

    a.direction = normal * vb.normal + tangent * va.tangent;
    b.direction = normal * va.normal + tangent * vb.tangent;

    a.position += a.direction * dt;
    b.position += b.direction * dt;

    // A resting ball takes the striker's speed
    if a.impulse == 0.0 {
        a.impulse = b.impulse;
    } else {
        b.impulse = a.impulse;
    }
    a.impulse *= collision_loss;
    b.impulse *= collision_loss;

    true
}

/// Bounce a moving ball off the first cushion it crosses.
///
/// Cushions are tested right, left, top, bottom; only the first hit is
/// handled this frame.
pub fn reflect_off_walls(ball: &mut BallSlot, layout: &TableLayout, edge_loss: f32) -> Option<Wall> {
    if !ball.is_moving() {
        return None;
    }

    let r = layout.ball_radius;
    let hw = layout.half_width();
    let hh = layout.half_height();
    let pos = &mut ball.position;

    let wall = if pos.x + r >= hw {
        pos.x = hw - r;
        ball.direction.x = -ball.direction.x;
        Wall::Right
    } else if pos.x - r <= -hw {
        pos.x = -hw + r;
        ball.direction.x = -ball.direction.x;
        Wall::Left
    } else if pos.y + r >= hh {
        pos.y = hh - r;
        ball.direction.y = -ball.direction.y;
        Wall::Top
    } else if pos.y - r <= -hh {
        pos.y = -hh + r;
        ball.direction.y = -ball.direction.y;
        Wall::Bottom
    } else {
        return None;
    };

    ball.impulse *= edge_loss;
    Some(wall)
}
