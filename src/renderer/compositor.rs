//! Persistence compositor
//!
//! Instead of clearing the screen every frame, the previous frame is run through
//! a 5-tap linear filter over a toroidal grid. Sprites drawn last frame smear
//! into trails that decay (or, with negative channel weights, ring) over time.
//!
//! The filter updates the buffer in place while scanning row-major, so the up
//! and left neighbors a pixel sees have already been filtered this pass. That
//! read-after-write is what gives the smear its down-right direction; a
//! double-buffered convolution produces a different image.

use crate::consts::FRAMEBUFFER_BYPP;
use crate::settings::CompositorSettings;

use super::framebuffer::Framebuffer;

/// Filter parameters for a single pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersistenceFilter {
    pub rate: f32,
    pub channel_weights: [f32; 4],
}

impl From<&CompositorSettings> for PersistenceFilter {
    fn from(settings: &CompositorSettings) -> Self {
        Self {
            rate: settings.rate,
            channel_weights: settings.channel_weights,
        }
    }
}

/// Convert a filtered value back to a channel byte: truncate toward zero, then
/// wrap modulo 256. Deliberately not saturating.
#[inline]
fn wrap_channel(value: f32) -> u8 {
    value as i32 as u8
}

impl PersistenceFilter {
    /// Run one in-place pass over the whole buffer
    pub fn apply(&self, fb: &mut Framebuffer) {
        let width = fb.width() as usize;
        let height = fb.height() as usize;
        let taps: [(f32, f32); 4] = std::array::from_fn(|c| {
            let k = self.rate * self.channel_weights[c];
            (1.0 - 4.0 * k, k)
        });

        let px = fb.as_bytes_mut();
        let at = |x: usize, y: usize, c: usize| (y * width + x) * FRAMEBUFFER_BYPP + c;

        for y in 0..height {
            let up = (y + height - 1) % height;
            let down = (y + 1) % height;
            for x in 0..width {
                let left = (x + width - 1) % width;
                let right = (x + 1) % width;
                for (c, &(keep, k)) in taps.iter().enumerate() {
                    let neighbors = px[at(x, up, c)] as f32
                        + px[at(x, down, c)] as f32
                        + px[at(left, y, c)] as f32
                        + px[at(right, y, c)] as f32;
                    let i = at(x, y, c);
                    px[i] = wrap_channel(keep * px[i] as f32 + k * neighbors);
                }
            }
        }
    }

    /// Run `passes` consecutive passes
    pub fn apply_passes(&self, fb: &mut Framebuffer, passes: u8) {
        for _ in 0..passes {
            self.apply(fb);
        }
    }
}
