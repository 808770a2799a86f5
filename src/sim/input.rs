//! Input arbitration
//!
//! Reduces one client's touches and key bitmask to a single [`Movement`],
//! latching which source ([`InputMode`]) is in control:
//!
//! - any live touch steers by screen half and switches to touch mode
//! - a held Left/Right key always wins and switches back to keyboard mode
//! - releasing the source that is in control stops the paddle

use super::state::{GameState, InputMode, Movement};
use crate::platform::abi::{ClientInput, KEY_BLUR, KEY_LEFT, KEY_RIGHT};

/// What changed while arbitrating one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Arbitration {
    pub mode_changed: bool,
    pub blur_toggled: bool,
}

/// Movement requested by the touches, if any. The last live touch in slot order wins.
pub fn touch_movement(input: &ClientInput, screen_width: u16) -> Option<Movement> {
    input.active_touches().last().map(|t| {
        if t.x < screen_width / 2 {
            Movement::Left
        } else {
            Movement::Right
        }
    })
}

/// Movement requested by the keys, if any. Left wins when both are held.
pub fn key_movement(keys: u32) -> Option<Movement> {
    if keys & KEY_LEFT != 0 {
        Some(Movement::Left)
    } else if keys & KEY_RIGHT != 0 {
        Some(Movement::Right)
    } else {
        None
    }
}

/// Update `movement`, `input_mode`, `blur_mode` and `keys_last` from this frame's input
pub fn arbitrate(state: &mut GameState, input: &ClientInput, screen_width: u16) -> Arbitration {
    let mode_before = state.input_mode;
    let player = &mut state.player;

    match touch_movement(input, screen_width) {
        Some(movement) => {
            player.movement = movement;
            state.input_mode = InputMode::Touch;
        }
        None if state.input_mode == InputMode::Touch => player.movement = Movement::None,
        None => {}
    }

    match key_movement(input.keys) {
        Some(movement) => {
            player.movement = movement;
            state.input_mode = InputMode::Keyboard;
        }
        None if state.input_mode == InputMode::Keyboard => player.movement = Movement::None,
        None => {}
    }

    let blur_toggled = input.keys & KEY_BLUR != 0 && state.keys_last & KEY_BLUR == 0;
    if blur_toggled {
        state.blur_mode = !state.blur_mode;
        log::debug!("Blur {}", if state.blur_mode { "on" } else { "off" });
    }
    state.keys_last = input.keys;

    let mode_changed = state.input_mode != mode_before;
    if mode_changed {
        log::debug!("Input mode {:?} -> {:?}", mode_before, state.input_mode);
    }

    Arbitration {
        mode_changed,
        blur_toggled,
    }
}
