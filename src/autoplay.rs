//! Idle/demo shooter
//!
//! Waits for the table to settle, holds the shot for a random charge, then
//! releases toward a random object ball. Seeded, so a run is reproducible.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::PLAYER_BALL;
use crate::scene::Scene;
use crate::session::SimulationSession;
use crate::sim::BallStore;

/// Frames to wait after the table settles before pressing
const SETTLE_FRAMES: u32 = 30;
/// Range of frames to hold the press (charge)
const HOLD_FRAMES: std::ops::Range<u32> = 12..72;
/// Maximum aim offset from the target ball center
const AIM_JITTER: f32 = 0.15;

/// Input the autoplayer wants to send this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AutoAction {
    Idle,
    Press(Vec2),
    Release(Vec2),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Waiting { frames: u32 },
    Charging { frames: u32 },
}

/// Seeded idle player
#[derive(Debug, Clone)]
pub struct AutoPlayer {
    rng: Pcg32,
    phase: Phase,
    shots: u32,
}

impl AutoPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            phase: Phase::Waiting {
                frames: SETTLE_FRAMES,
            },
            shots: 0,
        }
    }

    /// Number of releases issued so far
    pub fn shots(&self) -> u32 {
        self.shots
    }

    /// Decide this frame's input from the current table
    pub fn next_action(&mut self, balls: &BallStore, table_moving: bool) -> AutoAction {
        if table_moving {
            self.phase = Phase::Waiting {
                frames: SETTLE_FRAMES,
            };
            return AutoAction::Idle;
        }

        match self.phase {
            Phase::Waiting { frames } if frames > 0 => {
                self.phase = Phase::Waiting { frames: frames - 1 };
                AutoAction::Idle
            }
            Phase::Waiting { .. } => {
                let hold = self.rng.random_range(HOLD_FRAMES);
                self.phase = Phase::Charging { frames: hold };
                AutoAction::Press(balls.player().position)
            }
            Phase::Charging { frames } if frames > 0 => {
                self.phase = Phase::Charging { frames: frames - 1 };
                AutoAction::Idle
            }
            Phase::Charging { .. } => {
                self.phase = Phase::Waiting {
                    frames: SETTLE_FRAMES,
                };
                self.shots += 1;
                AutoAction::Release(self.pick_target(balls))
            }
        }
    }

    /// Apply one frame of autoplay input to a session
    pub fn drive<S: Scene>(&mut self, session: &mut SimulationSession<S>) -> AutoAction {
        let action = self.next_action(session.balls(), session.is_moving());
        match action {
            AutoAction::Idle => {}
            AutoAction::Press(at) => session.on_press_start(at.x, at.y),
            AutoAction::Release(at) => {
                log::debug!("Autoplay shot #{} toward {at}", self.shots);
                session.on_press_released(at.x, at.y);
            }
        }
        action
    }

    /// Aim near a random object ball; a release sharing an axis with the
    /// player ball would be ignored, so nudge off it
    fn pick_target(&mut self, balls: &BallStore) -> Vec2 {
        let player = balls.player().position;
        let candidates: Vec<Vec2> = balls
            .iter()
            .enumerate()
            .filter(|(i, b)| *i != PLAYER_BALL && b.alive)
            .map(|(_, b)| b.position)
            .collect();

        let base = if candidates.is_empty() {
            Vec2::ZERO
        } else {
            candidates[self.rng.random_range(0..candidates.len())]
        };

        let jitter = Vec2::new(
            self.rng.random_range(-AIM_JITTER..AIM_JITTER),
            self.rng.random_range(-AIM_JITTER..AIM_JITTER),
        );
        let mut target = base + jitter;
        if target.x == player.x {
            target.x += AIM_JITTER;
        }
        if target.y == player.y {
            target.y += AIM_JITTER;
        }
        target
    }
}
