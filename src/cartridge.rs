//! The cartridge context
//!
//! [`Cartridge`] owns every piece of memory the console shares with the
//! runtime (framebuffer, input snapshot, sprite sheet) together with the game
//! state, and implements the `configure`/`update` contract on top of them.

use crate::consts::{
    BG_COLOR, MAX_PLAYERS, SCREEN_HEIGHT, SCREEN_WIDTH, SPRITESHEET_HEIGHT, SPRITESHEET_WIDTH,
};
use crate::platform::abi::{InputSnapshot, RawDescriptor};
use crate::platform::host::Host;
use crate::renderer::{Framebuffer, PersistenceFilter, SceneRenderer};
use crate::settings::{ConfigError, Settings};
use crate::sim::{GameState, InputMode, tick};

/// Location and byte length of a buffer the runtime reads or writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryRegion {
    pub addr: usize,
    pub len: usize,
}

impl MemoryRegion {
    pub fn of<T>(items: &[T]) -> Self {
        Self {
            addr: items.as_ptr() as usize,
            len: std::mem::size_of_val(items),
        }
    }

    pub fn of_value<T>(value: &T) -> Self {
        Self {
            addr: value as *const T as usize,
            len: std::mem::size_of::<T>(),
        }
    }
}

/// What `configure` tells the runtime. Fixed for the life of the cartridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleDescriptor {
    pub framebuffer: MemoryRegion,
    pub input: MemoryRegion,
    pub spritesheet: MemoryRegion,
    pub logical_width: u16,
    pub logical_height: u16,
    pub max_players: u16,
}

impl ConsoleDescriptor {
    /// Lower to the runtime's layout. Addresses are only meaningful on wasm32,
    /// where they fit in 32 bits.
    pub fn to_raw(&self) -> RawDescriptor {
        RawDescriptor {
            framebuffer_addr: self.framebuffer.addr as u32,
            info_addr: self.input.addr as u32,
            spritesheet_addr: self.spritesheet.addr as u32,
            logical_width_px: self.logical_width,
            logical_height_px: self.logical_height,
            max_n_players: self.max_players,
            reserved: 0,
        }
    }
}

pub struct Cartridge {
    settings: Settings,
    state: GameState,
    framebuffer: Framebuffer,
    spritesheet: Framebuffer,
    /// Written by the runtime between frames
    input: Box<InputSnapshot>,
    descriptor: ConsoleDescriptor,
}

impl Default for Cartridge {
    fn default() -> Self {
        Self::with_valid_settings(Settings::default())
    }
}

impl Cartridge {
    /// Build a cartridge, rejecting settings that fail [`Settings::validate`]
    pub fn try_new(settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self::with_valid_settings(settings))
    }

    /// Build a cartridge, falling back to the default settings if `settings` is rejected
    pub fn new(settings: Settings) -> Self {
        match Self::try_new(settings) {
            Ok(cart) => cart,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    fn with_valid_settings(settings: Settings) -> Self {
        let framebuffer = Framebuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        let spritesheet = Framebuffer::new(SPRITESHEET_WIDTH, SPRITESHEET_HEIGHT);
        let input = Box::new(InputSnapshot::default());

        // Heap storage does not move with the struct, so these stay valid
        let descriptor = ConsoleDescriptor {
            framebuffer: framebuffer.region(),
            input: MemoryRegion::of_value(&*input),
            spritesheet: spritesheet.region(),
            logical_width: SCREEN_WIDTH,
            logical_height: SCREEN_HEIGHT,
            max_players: MAX_PLAYERS,
        };

        log::info!(
            "Cartridge ready: {}x{} screen, blur {}",
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            if settings.compositor.enabled { "on" } else { "off" }
        );

        Self {
            state: GameState::new(&settings),
            settings,
            framebuffer,
            spritesheet,
            input,
            descriptor,
        }
    }

    /// The console descriptor. Calling this again returns the same record.
    pub fn configure(&self) -> &ConsoleDescriptor {
        &self.descriptor
    }

    /// Copy the host-written input once so the whole frame sees one snapshot
    fn latch_input(&self) -> InputSnapshot {
        // SAFETY: `self.input` is a valid, aligned, initialized box. The volatile
        // read stops the compiler from assuming nothing wrote it since last frame.
        unsafe { std::ptr::read_volatile(&*self.input) }
    }

    /// Run one frame: input, physics, persistence filter (or clear), draw calls
    pub fn update<H: Host + ?Sized>(&mut self, host: &mut H) {
        let snapshot = self.latch_input();
        let arbitration = tick(&mut self.state, snapshot.local(), &self.settings);

        if arbitration.mode_changed {
            host.trace(match self.state.input_mode {
                InputMode::Touch => "input: touch",
                InputMode::Keyboard => "input: keyboard",
            });
        }
        if arbitration.blur_toggled {
            host.trace(if self.state.blur_mode { "blur: on" } else { "blur: off" });
        }

        if self.state.blur_mode {
            let compositor = &self.settings.compositor;
            let passes = compositor.passes_for(self.state.timer);
            PersistenceFilter::from(compositor).apply_passes(&mut self.framebuffer, passes);
        } else {
            host.fill_screen(BG_COLOR);
        }

        SceneRenderer {
            sheet: &self.spritesheet,
            screen: &self.framebuffer,
        }
        .draw(host, &self.state);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    pub fn spritesheet(&self) -> &Framebuffer {
        &self.spritesheet
    }

    /// Where the runtime (or a test) loads the sprite sheet
    pub fn spritesheet_mut(&mut self) -> &mut Framebuffer {
        &mut self.spritesheet
    }

    /// Where the runtime (or a test) writes input
    pub fn input_mut(&mut self) -> &mut InputSnapshot {
        &mut self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAMEBUFFER_BYPP;
    use crate::platform::abi::{KEY_BLUR, KEY_LEFT, Touch};
    use crate::platform::host::{HostCall, RecordingHost};

    #[test]
    fn test_configure_is_idempotent() {
        let cart = Cartridge::default();
        let first = *cart.configure();
        let second = *cart.configure();
        assert_eq!(first, second);
    }

    #[test]
    fn test_descriptor_regions_match_buffers() {
        let cart = Cartridge::default();
        let d = cart.configure();
        assert_eq!(
            d.framebuffer.len,
            SCREEN_WIDTH as usize * SCREEN_HEIGHT as usize * FRAMEBUFFER_BYPP
        );
        assert_eq!(d.framebuffer, cart.framebuffer().region());
        assert_eq!(d.input.len, std::mem::size_of::<InputSnapshot>());
        assert_eq!(d.spritesheet, cart.spritesheet().region());

        let raw = d.to_raw();
        assert_eq!(raw.logical_width_px, 128);
        assert_eq!(raw.logical_height_px, 192);
        assert_eq!(raw.max_n_players, 1);
    }

    #[test]
    fn test_descriptor_survives_move() {
        let cart = Cartridge::default();
        let before = *cart.configure();
        let moved = Box::new(cart);
        assert_eq!(*moved.configure(), before);
        assert_eq!(moved.framebuffer().region(), before.framebuffer);
    }

    #[test]
    fn test_update_reads_host_written_input() {
        let mut cart = Cartridge::default();
        cart.input_mut().inputs[0].touches[4] = Touch::new(100, 40, 12);
        let mut host = RecordingHost::new();
        cart.update(&mut host);

        assert_eq!(cart.state().input_mode, InputMode::Touch);
        assert_eq!(host.traces().collect::<Vec<_>>(), ["input: touch"]);
    }

    #[test]
    fn test_blur_off_hard_clears() {
        let mut cart = Cartridge::default();
        cart.input_mut().inputs[0].keys = KEY_BLUR;
        let mut host = RecordingHost::new();
        cart.update(&mut host);

        assert!(!cart.state().blur_mode);
        assert_eq!(host.calls.first(), Some(&HostCall::FillScreen(BG_COLOR)));
        assert_eq!(host.traces().collect::<Vec<_>>(), ["blur: off"]);
    }

    #[test]
    fn test_try_new_rejects_invalid_settings() {
        let mut settings = Settings::default();
        settings.paddle.max_speed = -1.0;
        assert!(matches!(
            Cartridge::try_new(settings),
            Err(ConfigError::SpeedCap(_))
        ));
    }

    #[test]
    fn test_new_falls_back_to_defaults_on_invalid_settings() {
        let mut settings = Settings::default();
        settings.paddle.max_speed = -1.0;
        let mut cart = Cartridge::new(settings);
        assert_eq!(*cart.settings(), Settings::default());

        cart.input_mut().inputs[0].keys = KEY_LEFT;
        cart.update(&mut RecordingHost::new());
        assert!(cart.state().player.vel.x >= -Settings::default().paddle.max_speed);
    }

    #[test]
    fn test_blur_on_filters_instead_of_clearing() {
        let mut cart = Cartridge::default();
        cart.framebuffer_mut().set_pixel(64, 64, [255, 255, 255, 255]);
        let before = cart.framebuffer().clone();
        let mut host = RecordingHost::new();
        cart.update(&mut host);

        assert!(!host.calls.iter().any(|c| matches!(c, HostCall::FillScreen(_))));
        assert_ne!(*cart.framebuffer(), before);
    }
}
