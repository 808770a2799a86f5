//! Rendering module
//!
//! The cartridge owns the framebuffer and filters it in place every frame;
//! sprites are drawn by the host from draw calls issued here.

pub mod compositor;
pub mod framebuffer;
pub mod scene;
pub mod sprites;

pub use compositor::PersistenceFilter;
pub use framebuffer::Framebuffer;
pub use scene::{SceneRenderer, draw_sprite};
pub use sprites::{Sprite, SpriteFrame};
