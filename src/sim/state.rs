//! Ball state and simulation events
//!
//! All mutable per-ball state lives in one fixed array of slots.

use std::ops::{Index, IndexMut};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BALL_COUNT, PLAYER_BALL};
use crate::layout::TableLayout;

/// One ball on the table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSlot {
    /// Table-space position
    pub position: Vec2,
    /// Travel direction, `Vec2::ZERO` at rest
    pub direction: Vec2,
    /// Scalar speed, distance travelled per frame
    pub impulse: f32,
    /// False once the ball has dropped into a pocket
    pub alive: bool,
}

impl BallSlot {
    /// A ball resting at `position`
    pub fn at_rest(position: Vec2) -> Self {
        Self {
            position,
            direction: Vec2::ZERO,
            impulse: 0.0,
            alive: true,
        }
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.impulse != 0.0
    }

    /// Bring the ball to rest in place
    #[inline]
    pub fn stop(&mut self) {
        self.impulse = 0.0;
        self.direction = Vec2::ZERO;
    }

    /// Take the ball off the table
    pub fn remove(&mut self) {
        self.stop();
        self.alive = false;
        self.position = Vec2::ZERO;
    }
}

/// All ball slots, indexed by ball number (player ball first)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallStore {
    slots: [BallSlot; BALL_COUNT],
}

impl BallStore {
    /// Rack the balls at the layout's starting positions
    pub fn racked(layout: &TableLayout) -> Self {
        Self {
            slots: layout.ball_starts.map(BallSlot::at_rest),
        }
    }

    /// True if any ball has a nonzero impulse
    pub fn any_moving(&self) -> bool {
        self.slots.iter().any(BallSlot::is_moving)
    }

    pub fn player(&self) -> &BallSlot {
        &self.slots[PLAYER_BALL]
    }

    pub fn player_mut(&mut self) -> &mut BallSlot {
        &mut self.slots[PLAYER_BALL]
    }

    pub fn iter(&self) -> impl Iterator<Item = &BallSlot> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut BallSlot> {
        self.slots.iter_mut()
    }

    /// Number of balls still on the table
    pub fn alive_count(&self) -> usize {
        self.slots.iter().filter(|b| b.alive).count()
    }

    /// Mutable access to two distinct slots at once
    pub fn pair_mut(&mut self, i: usize, j: usize) -> (&mut BallSlot, &mut BallSlot) {
        assert!(i < j, "pair_mut expects i < j");
        let (head, tail) = self.slots.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Index<usize> for BallStore {
    type Output = BallSlot;

    fn index(&self, index: usize) -> &BallSlot {
        &self.slots[index]
    }
}

impl IndexMut<usize> for BallStore {
    fn index_mut(&mut self, index: usize) -> &mut BallSlot {
        &mut self.slots[index]
    }
}

/// Table cushion identifiers, in the order they are tested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Right,
    Left,
    Top,
    Bottom,
}

/// Things that happened during a frame, for the driver to observe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Player ball was given an impulse toward `target`
    ShotTaken { impulse: f32, target: Vec2 },
    /// Two balls touched and exchanged normal velocity
    BallsCollided { a: usize, b: usize },
    /// Ball bounced off a cushion
    WallHit { ball: usize, wall: Wall },
    /// Object ball dropped into a pocket
    BallPocketed { ball: usize, pocket: usize },
    /// Player ball dropped; the session was reset
    PlayerPocketed { pocket: usize },
    /// Every ball came to rest this frame
    TableAtRest,
}
