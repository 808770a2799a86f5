//! Drawing primitives provided by the console runtime
//!
//! The cartridge never rasterizes sprites itself: it asks the host to copy
//! rectangles out of the sprite sheet. [`Host`] is that call contract.
//! On wasm32 it is backed by the runtime's imports; everywhere else
//! [`RecordingHost`] captures the calls so they can be checked or replayed.

use crate::cartridge::MemoryRegion;
use crate::renderer::framebuffer::Framebuffer;

/// Mirror the copied rectangle horizontally
pub const FLIP_X: u8 = 0b01;
/// Mirror the copied rectangle vertically
pub const FLIP_Y: u8 = 0b10;

/// A rectangle in source (sheet) pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetRect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

/// A strided RGBA pixel buffer in cartridge memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub region: MemoryRegion,
    /// Row length in pixels
    pub stride: u16,
}

/// Primitives the runtime exposes to the cartridge
pub trait Host {
    /// Copy `src_rect` out of `src` into `dst` at signed `(dx, dy)`.
    /// The host clips against `dst`.
    fn blit(
        &mut self,
        src: Surface,
        src_rect: SheetRect,
        dst: Surface,
        dx: i16,
        dy: i16,
        flags: u8,
    );

    /// Shortcut for blitting from the cartridge's sprite sheet to its framebuffer
    fn draw_sprite_sheet(&mut self, src_rect: SheetRect, dx: i16, dy: i16, flags: u8);

    /// Fill the whole framebuffer with a packed RGBA color
    fn fill_screen(&mut self, color: u32);

    /// Debug output
    fn trace(&mut self, message: &str);
}

/// One recorded host call
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Blit {
        src: Surface,
        src_rect: SheetRect,
        dst: Surface,
        dx: i16,
        dy: i16,
        flags: u8,
    },
    DrawSpriteSheet {
        src_rect: SheetRect,
        dx: i16,
        dy: i16,
        flags: u8,
    },
    FillScreen(u32),
    Trace(String),
}

/// Host double that records every call in order
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the calls recorded so far
    pub fn take(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    /// Sprite-sheet draws only, in issue order
    pub fn sheet_draws(&self) -> impl Iterator<Item = (SheetRect, i16, i16, u8)> + '_ {
        self.calls.iter().filter_map(|c| match *c {
            HostCall::DrawSpriteSheet {
                src_rect,
                dx,
                dy,
                flags,
            } => Some((src_rect, dx, dy, flags)),
            _ => None,
        })
    }

    pub fn traces(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|c| match c {
            HostCall::Trace(msg) => Some(msg.as_str()),
            _ => None,
        })
    }

    /// Execute the recorded calls the way the runtime would, drawing into `screen`
    /// from `sheet`. `Blit` calls are assumed to target the framebuffer from the sheet.
    pub fn replay(&self, sheet: &Framebuffer, screen: &mut Framebuffer) {
        for call in &self.calls {
            match *call {
                HostCall::Blit { src_rect, dx, dy, flags, .. }
                | HostCall::DrawSpriteSheet { src_rect, dx, dy, flags } => {
                    screen.blit_from(sheet, src_rect, dx, dy, flags);
                }
                HostCall::FillScreen(color) => screen.fill(color.to_be_bytes()),
                HostCall::Trace(_) => {}
            }
        }
    }
}

impl Host for RecordingHost {
    fn blit(
        &mut self,
        src: Surface,
        src_rect: SheetRect,
        dst: Surface,
        dx: i16,
        dy: i16,
        flags: u8,
    ) {
        self.calls.push(HostCall::Blit {
            src,
            src_rect,
            dst,
            dx,
            dy,
            flags,
        });
    }

    fn draw_sprite_sheet(&mut self, src_rect: SheetRect, dx: i16, dy: i16, flags: u8) {
        self.calls.push(HostCall::DrawSpriteSheet { src_rect, dx, dy, flags });
    }

    fn fill_screen(&mut self, color: u32) {
        self.calls.push(HostCall::FillScreen(color));
    }

    fn trace(&mut self, message: &str) {
        self.calls.push(HostCall::Trace(message.to_owned()));
    }
}
