//! Game state and core simulation types
//!
//! Everything that changes from frame to frame lives in [`GameState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::renderer::sprites::PADDLE;
use crate::settings::Settings;

/// Which way the player wants the paddle to go this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Movement {
    Left,
    Right,
    #[default]
    None,
}

impl Movement {
    /// -1, 0 or +1 along x
    #[inline]
    pub fn direction(self) -> f32 {
        match self {
            Movement::Left => -1.0,
            Movement::Right => 1.0,
            Movement::None => 0.0,
        }
    }
}

/// Input source currently driving the paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputMode {
    #[default]
    Keyboard,
    Touch,
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub movement: Movement,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            // Centered horizontally, three quarters of the way down
            pos: Vec2::new(
                ((SCREEN_WIDTH as f32 - PADDLE.size().x) / 2.0).floor(),
                (SCREEN_HEIGHT * 3 / 4) as f32,
            ),
            vel: Vec2::ZERO,
            movement: Movement::None,
        }
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Complete simulation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    pub ball: Ball,
    pub input_mode: InputMode,
    /// Frames since start; never reset
    pub timer: u32,
    /// Whether the persistence filter runs this frame
    pub blur_mode: bool,
    /// Key bitmask seen on the previous frame
    #[serde(default)]
    pub keys_last: u32,
}

impl GameState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            player: Player::default(),
            ball: Ball {
                pos: settings.ball.start,
                vel: settings.ball.velocity,
            },
            input_mode: InputMode::Keyboard,
            timer: 0,
            blur_mode: settings.compositor.enabled,
            keys_last: 0,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_starts_centered() {
        let state = GameState::default();
        assert_eq!(state.player.pos, Vec2::new(53.0, 144.0));
        assert_eq!(state.player.movement, Movement::None);
        assert_eq!(state.input_mode, InputMode::Keyboard);
    }

    #[test]
    fn test_state_json_roundtrip() {
        let mut state = GameState::default();
        state.timer = 77;
        state.input_mode = InputMode::Touch;
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
