//! Pocket Table - a frame-driven billiards table simulation
//!
//! Core modules:
//! - `geometry`: Vector helpers with the degenerate-distance guards
//! - `layout`: Fixed table dimensions, pockets and the rack
//! - `tuning`: Data-driven physics coefficients
//! - `sim`: Deterministic per-frame physics (balls, shot charging, collisions)
//! - `scene`: Presentation boundary the simulation reports into
//! - `session`: The simulation session tying state, physics and scene together
//! - `autoplay`: Seeded idle shooter for headless runs

pub mod autoplay;
pub mod geometry;
pub mod layout;
pub mod scene;
pub mod session;
pub mod sim;
pub mod tuning;

pub use layout::TableLayout;
pub use scene::{RecordingScene, Scene};
pub use session::SimulationSession;
pub use tuning::Tuning;

/// Simulation constants
pub mod consts {
    /// Number of ball slots on the table (player ball + six object balls)
    pub const BALL_COUNT: usize = 7;
    /// Number of pockets on the table
    pub const POCKET_COUNT: usize = 6;
    /// Slot index of the player (cue) ball
    pub const PLAYER_BALL: usize = 0;

    /// Frame rate requested from the presentation layer
    pub const TARGET_FPS: u32 = 60;

    /// Substitute for a zero distance between coincident balls.
    /// Numerical-stability hack, not physically derived.
    pub const COINCIDENT_DISTANCE: f32 = 0.01;
    /// Bound on the penetration correction factor applied during a ball/ball hit.
    /// Hand-tuned to stop overshoot, not physically derived.
    pub const MAX_CORRECTION: f32 = 0.6;
    /// Pocket radius is divided by this before adding the ball radius,
    /// so a ball that merely touches the pocket rim stays on the table.
    pub const CAPTURE_RADIUS_DIVISOR: f32 = 1.5;
}
