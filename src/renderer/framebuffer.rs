//! RGBA pixel buffers
//!
//! Used both for the screen and for the sprite sheet. Row-major, 4 interleaved
//! 8-bit channels per pixel.

use crate::cartridge::MemoryRegion;
use crate::consts::FRAMEBUFFER_BYPP;
use crate::platform::host::{FLIP_X, FLIP_Y, SheetRect, Surface};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u16,
    height: u16,
    pixels: Vec<u8>,
}

impl Framebuffer {
    /// A zeroed (transparent black) buffer
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * FRAMEBUFFER_BYPP],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Handle to the pixel storage, for the console descriptor
    pub fn region(&self) -> MemoryRegion {
        MemoryRegion::of(&self.pixels)
    }

    /// This buffer as a blit source or destination
    pub fn surface(&self) -> Surface {
        Surface {
            region: self.region(),
            stride: self.width,
        }
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width as usize + x) * FRAMEBUFFER_BYPP
    }

    pub fn pixel(&self, x: u16, y: u16) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x as usize, y as usize);
        let mut out = [0; 4];
        out.copy_from_slice(&self.pixels[i..i + FRAMEBUFFER_BYPP]);
        Some(out)
    }

    pub fn set_pixel(&mut self, x: u16, y: u16, color: [u8; 4]) {
        if x < self.width && y < self.height {
            let i = self.offset(x as usize, y as usize);
            self.pixels[i..i + FRAMEBUFFER_BYPP].copy_from_slice(&color);
        }
    }

    pub fn fill(&mut self, color: [u8; 4]) {
        for px in self.pixels.chunks_exact_mut(FRAMEBUFFER_BYPP) {
            px.copy_from_slice(&color);
        }
    }

    /// Fill a rectangle, clipped to the buffer.
    ///
    /// The start is clipped to 0 and the exclusive end to `width - 1` /
    /// `height - 1`, so the last column and row are never written. A rectangle
    /// entirely off-screen or of zero area writes nothing.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u16, h: u16, color: [u8; 4]) {
        let sx = x.max(0);
        let sy = y.max(0);
        let ex = x.saturating_add(w as i32).min(self.width as i32 - 1);
        let ey = y.saturating_add(h as i32).min(self.height as i32 - 1);

        for row in sy..ey {
            for col in sx..ex {
                let i = self.offset(col as usize, row as usize);
                self.pixels[i..i + FRAMEBUFFER_BYPP].copy_from_slice(&color);
            }
        }
    }

    /// Reference implementation of the runtime's blit: copy `src_rect` of `src`
    /// to `(dx, dy)`, mirrored by `flags`, skipping fully transparent source
    /// pixels and anything outside either buffer.
    pub fn blit_from(
        &mut self,
        src: &Framebuffer,
        src_rect: SheetRect,
        dx: i16,
        dy: i16,
        flags: u8,
    ) {
        let SheetRect { x, y, w, h } = src_rect;
        for row in 0..h {
            for col in 0..w {
                let sx = if flags & FLIP_X != 0 { x + w - 1 - col } else { x + col };
                let sy = if flags & FLIP_Y != 0 { y + h - 1 - row } else { y + row };
                let Some(color) = src.pixel(sx, sy) else { continue };
                if color[3] == 0 {
                    continue;
                }

                let tx = dx as i32 + col as i32;
                let ty = dy as i32 + row as i32;
                if tx < 0 || ty < 0 {
                    continue;
                }
                self.set_pixel(tx as u16, ty as u16, color);
            }
        }
    }
}
