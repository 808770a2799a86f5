//! awsm Breakout - a cartridge for the awsm fantasy console
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input arbitration, physics, game state)
//! - `renderer`: Framebuffer, persistence compositor and sprite draw calls
//! - `platform`: Host ABI, host primitives and the wasm32 entry points
//! - `settings`: Data-driven tuning
//! - `cartridge`: The `configure`/`update` context that ties it together

pub mod cartridge;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use cartridge::{Cartridge, ConsoleDescriptor, MemoryRegion};
pub use settings::{ConfigError, Settings};

/// Console configuration constants
pub mod consts {
    /// Logical screen size in pixels
    pub const SCREEN_WIDTH: u16 = 128;
    pub const SCREEN_HEIGHT: u16 = 192;

    /// The framebuffer is 4 bytes per pixel - R, G, B, A
    pub const FRAMEBUFFER_BYPP: usize = 4;

    /// Bundled sprite sheet size in pixels
    pub const SPRITESHEET_WIDTH: u16 = 128;
    pub const SPRITESHEET_HEIGHT: u16 = 32;

    /// Simultaneous touches per client
    pub const TOUCH_BUFFER_SIZE: usize = 10;
    /// Client slots in the input snapshot
    pub const N_CLIENTS: usize = 10;
    /// Players this cartridge declares
    pub const MAX_PLAYERS: u16 = 1;

    /// Border block edge length; also the paddle and ball wall margin
    pub const BLOCK_SIZE: u16 = 8;
    /// Frames each border block animation frame is held for
    pub const BLOCK_ANIM_PERIOD: u32 = 16;

    /// On-screen touch button edge length
    pub const BUTTON_SIZE: u16 = 15;
    /// Gap between the touch buttons and the bottom border
    pub const BUTTON_BOTTOM_OFFSET: u16 = 6;

    /// Logo distance from the top of the screen
    pub const LOGO_TOP: u16 = 16;

    /// Hard-clear color used when the persistence filter is off (packed RGBA)
    pub const BG_COLOR: u32 = 0x67a3_c000;
}

/// Width/height of the logical screen as `f32`, for physics bounds
#[inline]
pub fn screen_size() -> glam::Vec2 {
    glam::Vec2::new(consts::SCREEN_WIDTH as f32, consts::SCREEN_HEIGHT as f32)
}
