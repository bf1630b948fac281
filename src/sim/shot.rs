//! Shot charging
//!
//! Holding the press charges the shot; releasing stages an aim target and
//! hands the player ball an impulse proportional to the charge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Charge state machine: Idle -> Charging -> Idle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShotController {
    charging: bool,
    /// Charge fraction in [0, 1]
    progress: f32,
    /// Release point awaiting conversion into a direction
    pending_aim: Option<Vec2>,
}

impl ShotController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_charging(&self) -> bool {
        self.charging
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn pending_aim(&self) -> Option<Vec2> {
        self.pending_aim
    }

    /// Consume the staged aim target
    pub fn take_aim(&mut self) -> Option<Vec2> {
        self.pending_aim.take()
    }

    /// Start (or keep) charging. Progress is not reset.
    pub fn press_start(&mut self) {
        self.charging = true;
    }

    /// Finish charging.
    ///
    /// Returns the impulse for the player ball when the shot is accepted:
    /// the table must be at rest and the release point must differ from the
    /// player ball's position on both axes. The charge is reset either way.
    pub fn press_end(
        &mut self,
        release: Vec2,
        player_position: Vec2,
        table_moving: bool,
        max_shot_impulse: f32,
    ) -> Option<f32> {
        let accepted = !table_moving
            && player_position.x != release.x
            && player_position.y != release.y;

        let impulse = accepted.then(|| {
            self.pending_aim = Some(release);
            self.progress * max_shot_impulse
        });

        self.charging = false;
        self.progress = 0.0;
        impulse
    }

    /// Advance the charge while held and nothing on the table moves
    pub fn tick(&mut self, dt: f32, table_moving: bool, charge_time: f32) {
        if self.charging && !table_moving {
            self.progress = (self.progress + dt / charge_time).min(1.0);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
