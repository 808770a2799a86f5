//! Sprite frame table for the bundled sprite sheet
//!
//! Sheet layout (128x32):
//! - row 0: two block frames, ball, two button frames
//! - row 8: paddle
//! - row 16: logo

use glam::Vec2;

use crate::platform::host::SheetRect;

/// A rectangle of the sprite sheet plus its intrinsic mirroring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteFrame {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
    pub flags: u8,
}

impl SpriteFrame {
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h, flags: 0 }
    }

    pub fn rect(&self) -> SheetRect {
        SheetRect {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        }
    }
}

/// An immutable, non-empty sequence of frames
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    frames: &'static [SpriteFrame],
}

impl Sprite {
    pub const fn new(frames: &'static [SpriteFrame]) -> Self {
        assert!(!frames.is_empty(), "sprite needs at least one frame");
        Self { frames }
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Frame for an arbitrary index, wrapping modulo the frame count
    #[inline]
    pub fn frame(&self, index: u32) -> &SpriteFrame {
        &self.frames[index as usize % self.frames.len()]
    }

    /// Size of the first frame, used as the collision box
    pub fn size(&self) -> Vec2 {
        let f = &self.frames[0];
        Vec2::new(f.w as f32, f.h as f32)
    }
}

const BLOCK_FRAMES: [SpriteFrame; 2] = [SpriteFrame::new(0, 0, 8, 8), SpriteFrame::new(8, 0, 8, 8)];
const BALL_FRAMES: [SpriteFrame; 1] = [SpriteFrame::new(16, 0, 5, 5)];
const BUTTON_FRAMES: [SpriteFrame; 2] = [
    SpriteFrame::new(24, 0, 15, 15),
    SpriteFrame::new(39, 0, 15, 15),
];
const PADDLE_FRAMES: [SpriteFrame; 1] = [SpriteFrame::new(0, 8, 22, 7)];
const LOGO_FRAMES: [SpriteFrame; 1] = [SpriteFrame::new(0, 16, 89, 16)];

pub const BLOCK: Sprite = Sprite::new(&BLOCK_FRAMES);
pub const BALL: Sprite = Sprite::new(&BALL_FRAMES);
/// Frame 0 unpressed, frame 1 pressed. Drawn facing left.
pub const BUTTON: Sprite = Sprite::new(&BUTTON_FRAMES);
pub const PADDLE: Sprite = Sprite::new(&PADDLE_FRAMES);
pub const LOGO: Sprite = Sprite::new(&LOGO_FRAMES);
