//! Deterministic table simulation
//!
//! All physics lives here. This module must stay pure and deterministic:
//! - One step per frame, positions advance by impulse per frame
//! - Stable iteration order (by ball slot, pockets in layout order)
//! - No presentation dependencies

pub mod collision;
pub mod shot;
pub mod state;
pub mod tick;

pub use collision::{AxisComponents, correction_factor, reflect_off_walls, resolve_ball_pair};
pub use shot::ShotController;
pub use state::{BallSlot, BallStore, SimEvent, Wall};
pub use tick::{StepOutcome, step};
