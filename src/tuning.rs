//! Physics tuning
//!
//! Loss coefficients and shot timing, loadable from a JSON file so the
//! table feel can be adjusted without rebuilding.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::TARGET_FPS;

/// Data-driven physics coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Rolling friction, applied to the impulse once per frame
    pub friction: f32,
    /// Impulse kept after bouncing off a cushion
    pub edge_loss: f32,
    /// Impulse kept by both balls after a ball/ball hit
    pub collision_loss: f32,
    /// Impulse below which a ball is snapped to rest
    pub rest_threshold: f32,
    /// Seconds of holding needed for a full-power shot
    pub charge_time: f32,
    /// Impulse given to the player ball by a full-power shot
    pub max_shot_impulse: f32,
    /// Frame rate requested from the presentation layer
    pub target_fps: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            friction: 0.995,
            edge_loss: 0.89,
            collision_loss: 0.997,
            rest_threshold: 0.01,
            charge_time: 1.0,
            max_shot_impulse: 0.5,
            target_fps: TARGET_FPS,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load tuning from a JSON file, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Clamp coefficients into ranges that keep the simulation settling
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        for (name, value, default) in [
            ("friction", &mut self.friction, defaults.friction),
            ("edge_loss", &mut self.edge_loss, defaults.edge_loss),
            ("collision_loss", &mut self.collision_loss, defaults.collision_loss),
        ] {
            if !(value.is_finite() && *value > 0.0 && *value <= 1.0) {
                log::warn!("Tuning {name}={value} out of (0, 1]; using {default}");
                *value = default;
            }
        }

        // Friction of exactly 1.0 would never bring a ball to rest
        if self.friction >= 1.0 {
            log::warn!("Tuning friction must be below 1; using {}", defaults.friction);
            self.friction = defaults.friction;
        }

        for (name, value, default) in [
            ("rest_threshold", &mut self.rest_threshold, defaults.rest_threshold),
            ("charge_time", &mut self.charge_time, defaults.charge_time),
            ("max_shot_impulse", &mut self.max_shot_impulse, defaults.max_shot_impulse),
        ] {
            if !(value.is_finite() && *value > 0.0) {
                log::warn!("Tuning {name}={value} must be positive; using {default}");
                *value = default;
            }
        }

        if self.target_fps == 0 {
            log::warn!("Tuning target_fps=0; using {}", defaults.target_fps);
            self.target_fps = defaults.target_fps;
        }

        self
    }
}
