//! Table layout: dimensions, pockets and the starting rack
//!
//! Table space is centered on the origin, x along the long side.

use glam::Vec2;

use crate::consts::{BALL_COUNT, CAPTURE_RADIUS_DIVISOR, POCKET_COUNT};

const WIDTH: f32 = 15.0;
const HEIGHT: f32 = 8.0;

/// Immutable table geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableLayout {
    /// Full table width (x extent)
    pub width: f32,
    /// Full table height (y extent)
    pub height: f32,
    pub ball_radius: f32,
    pub pocket_radius: f32,
    /// Corner and side pockets
    pub pockets: [Vec2; POCKET_COUNT],
    /// Starting positions, player ball first
    pub ball_starts: [Vec2; BALL_COUNT],
}

impl TableLayout {
    /// The standard 15 x 8 table with a six-ball rack
    pub const CLASSIC: TableLayout = TableLayout {
        width: WIDTH,
        height: HEIGHT,
        ball_radius: 0.3,
        pocket_radius: 0.4,
        pockets: [
            Vec2::new(-0.5 * WIDTH, -0.5 * HEIGHT),
            Vec2::new(0.0, -0.5 * HEIGHT),
            Vec2::new(0.5 * WIDTH, -0.5 * HEIGHT),
            Vec2::new(-0.5 * WIDTH, 0.5 * HEIGHT),
            Vec2::new(0.0, 0.5 * HEIGHT),
            Vec2::new(0.5 * WIDTH, 0.5 * HEIGHT),
        ],
        ball_starts: [
            // Player ball
            Vec2::new(-0.3 * WIDTH, 0.0),
            // Rack
            Vec2::new(0.2 * WIDTH, 0.0),
            Vec2::new(0.25 * WIDTH, 0.05 * HEIGHT),
            Vec2::new(0.25 * WIDTH, -0.05 * HEIGHT),
            Vec2::new(0.3 * WIDTH, 0.1 * HEIGHT),
            Vec2::new(0.3 * WIDTH, 0.0),
            Vec2::new(0.3 * WIDTH, -0.1 * HEIGHT),
        ],
    };

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }

    /// Center-to-center distance at which two balls touch
    #[inline]
    pub fn contact_distance(&self) -> f32 {
        self.ball_radius * 2.0
    }

    /// Distance from a pocket center below which a ball drops
    #[inline]
    pub fn capture_radius(&self) -> f32 {
        self.ball_radius + self.pocket_radius / CAPTURE_RADIUS_DIVISOR
    }

    /// Whether a ball centered at `pos` drops into the pocket at `pocket`
    #[inline]
    pub fn captures(&self, pocket: Vec2, pos: Vec2) -> bool {
        pos.distance(pocket) < self.capture_radius()
    }
}

impl Default for TableLayout {
    fn default() -> Self {
        Self::CLASSIC
    }
}
