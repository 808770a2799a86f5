//! Scene renderer
//!
//! Issues the frame's sprite draws to the host. Nothing here touches pixels
//! directly; the runtime copies out of the sprite sheet.

use super::framebuffer::Framebuffer;
use super::sprites::{BALL, BLOCK, BUTTON, LOGO, PADDLE, Sprite};
use crate::consts::{BLOCK_ANIM_PERIOD, BLOCK_SIZE, BUTTON_BOTTOM_OFFSET, BUTTON_SIZE, LOGO_TOP};
use crate::platform::host::{FLIP_X, Host};
use crate::sim::{GameState, InputMode, Movement};

/// Draw `frame_index` (wrapped) of `sprite` at `(x, y)`. The frame's own
/// mirroring is XORed with `extra_flags`.
pub fn draw_sprite<H: Host + ?Sized>(
    host: &mut H,
    sprite: &Sprite,
    x: i16,
    y: i16,
    frame_index: u32,
    extra_flags: u8,
) {
    let frame = sprite.frame(frame_index);
    host.draw_sprite_sheet(frame.rect(), x, y, frame.flags ^ extra_flags);
}

/// Draws one frame of the scene
pub struct SceneRenderer<'a> {
    pub sheet: &'a Framebuffer,
    pub screen: &'a Framebuffer,
}

impl SceneRenderer<'_> {
    pub fn draw<H: Host + ?Sized>(&self, host: &mut H, state: &GameState) {
        let player = &state.player;
        draw_sprite(host, &PADDLE, player.pos.x as i16, player.pos.y as i16, 0, 0);

        self.draw_border(host, state.timer / BLOCK_ANIM_PERIOD);

        let ball = &state.ball;
        draw_sprite(host, &BALL, ball.pos.x as i16, ball.pos.y as i16, 0, 0);

        self.draw_logo(host);

        if state.input_mode == InputMode::Touch {
            self.draw_touch_controls(host, player.movement);
        }
    }

    /// A continuous ring of blocks around the screen edge
    fn draw_border<H: Host + ?Sized>(&self, host: &mut H, frame_index: u32) {
        let width = self.screen.width() as i16;
        let height = self.screen.height() as i16;
        let block = BLOCK_SIZE as i16;

        for x in (0..width).step_by(BLOCK_SIZE as usize) {
            draw_sprite(host, &BLOCK, x, 0, frame_index, 0);
            draw_sprite(host, &BLOCK, x, height - block, frame_index, 0);
        }
        for y in (block..height - block).step_by(BLOCK_SIZE as usize) {
            draw_sprite(host, &BLOCK, 0, y, frame_index, 0);
            draw_sprite(host, &BLOCK, width - block, y, frame_index, 0);
        }
    }

    /// The logo goes through the general blit, sheet to screen
    fn draw_logo<H: Host + ?Sized>(&self, host: &mut H) {
        let frame = LOGO.frame(0);
        let x = (self.screen.width() as i16 - frame.w as i16) / 2;
        host.blit(
            self.sheet.surface(),
            frame.rect(),
            self.screen.surface(),
            x,
            LOGO_TOP as i16,
            frame.flags,
        );
    }

    /// Left and right buttons in the bottom corners; the right one is the left one mirrored
    fn draw_touch_controls<H: Host + ?Sized>(&self, host: &mut H, movement: Movement) {
        let width = self.screen.width() as i16;
        let y = (self.screen.height() - BLOCK_SIZE - BUTTON_BOTTOM_OFFSET - BUTTON_SIZE) as i16;
        let left_x = BLOCK_SIZE as i16 + 2;
        let right_x = width - BLOCK_SIZE as i16 - 2 - BUTTON_SIZE as i16;

        let left_pressed = (movement == Movement::Left) as u32;
        let right_pressed = (movement == Movement::Right) as u32;
        draw_sprite(host, &BUTTON, left_x, y, left_pressed, 0);
        draw_sprite(host, &BUTTON, right_x, y, right_pressed, FLIP_X);
    }
}
