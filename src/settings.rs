//! Cartridge tuning
//!
//! Paddle feel, ball serve and persistence filter parameters. Defaults are the
//! values the cartridge ships with; a JSON document can override any subset.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::BLOCK_SIZE;

/// Paddle kinematics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleTuning {
    /// Velocity added per frame while a direction is held
    pub accel: f32,
    /// Velocity multiplier applied every frame (must be < 1)
    pub drag: f32,
    /// Speed cap in pixels per frame
    pub max_speed: f32,
    /// Closest the paddle gets to the left screen edge
    pub margin_left: f32,
    /// Closest the paddle's right side gets to the right screen edge
    pub margin_right: f32,
}

impl Default for PaddleTuning {
    fn default() -> Self {
        Self {
            accel: 2.0,
            drag: 0.8,
            max_speed: 3.0,
            margin_left: BLOCK_SIZE as f32,
            margin_right: BLOCK_SIZE as f32,
        }
    }
}

/// Ball serve and walls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallTuning {
    /// Spawn position
    pub start: Vec2,
    /// Spawn velocity in pixels per frame
    pub velocity: Vec2,
    /// Inset of the bounce walls from the screen edges
    pub wall_margin: f32,
}

impl Default for BallTuning {
    fn default() -> Self {
        Self {
            start: Vec2::new(60.0, 96.0),
            velocity: Vec2::new(1.1, 1.3),
            wall_margin: BLOCK_SIZE as f32,
        }
    }
}

/// Persistence filter parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositorSettings {
    /// Initial value of the blur toggle
    pub enabled: bool,
    /// Neighbor coupling per pass
    pub rate: f32,
    /// Per-channel (R, G, B, A) multipliers on `rate`; negative values sharpen
    pub channel_weights: [f32; 4],
    /// Passes per frame, 1 or 2
    pub passes: u8,
    /// The second pass only runs when `timer % second_pass_every == 0`
    pub second_pass_every: u32,
}

impl Default for CompositorSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            rate: 0.02,
            channel_weights: [-0.6, -0.4, -0.8, 0.98],
            passes: 2,
            second_pass_every: 2,
        }
    }
}

impl CompositorSettings {
    /// Number of passes to run on the frame with the given timer value
    pub fn passes_for(&self, timer: u32) -> u8 {
        let second = self.passes >= 2 && timer % self.second_pass_every.max(1) == 0;
        1 + second as u8
    }
}

/// Complete cartridge tuning
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub paddle: PaddleTuning,
    pub ball: BallTuning,
    pub compositor: CompositorSettings,
}

/// Rejected configuration
#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    /// Compositor pass count outside 1..=2
    PassCount(u8),
    /// Drag must lie in (0, 1)
    Drag(f32),
    /// Speed cap must be positive
    SpeedCap(f32),
    /// Margins leave no room for the paddle
    PaddleTrack,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "invalid settings JSON: {e}"),
            ConfigError::PassCount(n) => write!(f, "compositor passes must be 1 or 2, got {n}"),
            ConfigError::Drag(d) => write!(f, "paddle drag must be in (0, 1), got {d}"),
            ConfigError::SpeedCap(v) => write!(f, "paddle max_speed must be positive, got {v}"),
            ConfigError::PaddleTrack => write!(f, "paddle margins leave no room to move"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl Settings {
    /// Parse and validate a JSON settings document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings, falling back to defaults on any error
    pub fn load_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.compositor;
        if !(1..=2).contains(&c.passes) {
            return Err(ConfigError::PassCount(c.passes));
        }

        let p = &self.paddle;
        if !(p.drag > 0.0 && p.drag < 1.0) {
            return Err(ConfigError::Drag(p.drag));
        }
        if !(p.max_speed > 0.0) {
            return Err(ConfigError::SpeedCap(p.max_speed));
        }
        let track = crate::consts::SCREEN_WIDTH as f32
            - crate::renderer::sprites::PADDLE.size().x
            - p.margin_right;
        if track < p.margin_left {
            return Err(ConfigError::PaddleTrack);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"paddle": {"accel": 1.5}}"#).unwrap();
        assert_eq!(settings.paddle.accel, 1.5);
        assert_eq!(settings.paddle.drag, 0.8);
        assert_eq!(settings.compositor, CompositorSettings::default());
    }

    #[test]
    fn test_rejects_bad_pass_count() {
        let err = Settings::from_json(r#"{"compositor": {"passes": 3}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::PassCount(3)));
    }

    #[test]
    fn test_rejects_drag_of_one() {
        let err = Settings::from_json(r#"{"paddle": {"drag": 1.0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Drag(_)));
    }

    #[test]
    fn test_rejects_overlapping_margins() {
        let err =
            Settings::from_json(r#"{"paddle": {"margin_left": 60.0, "margin_right": 60.0}}"#)
                .unwrap_err();
        assert!(matches!(err, ConfigError::PaddleTrack));
    }

    #[test]
    fn test_load_or_default_on_garbage() {
        assert_eq!(Settings::load_or_default("not json"), Settings::default());
    }

    #[test]
    fn test_second_pass_follows_timer_phase() {
        let c = CompositorSettings::default();
        assert_eq!(c.passes_for(1), 1);
        assert_eq!(c.passes_for(2), 2);

        let single = CompositorSettings { passes: 1, ..c };
        assert_eq!(single.passes_for(2), 1);
    }
}
