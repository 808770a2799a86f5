//! Memory layout shared with the console runtime
//!
//! These structs are written by the host byte-for-byte, so they are `#[repr(C)]`
//! with no padding and implement `bytemuck::Pod`.

use bytemuck::{Pod, Zeroable};

use crate::consts::{N_CLIENTS, TOUCH_BUFFER_SIZE};

/// Order of the keys in the packed key bitmask, most significant bit first
pub const KEYS_VALUES: &str = "LRUDabcdefghijklmnopqrstuvwxyz 1";

/// Bit for a key in [`KEYS_VALUES`], or 0 for a key the console does not pass through
pub const fn key_bit(key: u8) -> u32 {
    let keys = KEYS_VALUES.as_bytes();
    let mut i = 0;
    while i < keys.len() {
        if keys[i] == key {
            return 0x8000_0000 >> i;
        }
        i += 1;
    }
    0
}

pub const KEY_LEFT: u32 = key_bit(b'L');
pub const KEY_RIGHT: u32 = key_bit(b'R');
/// Toggles the persistence filter
pub const KEY_BLUR: u32 = key_bit(b'b');

/// A single touch on the screen. `generation == 0` marks an empty slot.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Touch {
    pub x: u16,
    pub y: u16,
    pub generation: u16,
}

impl Touch {
    pub const fn new(x: u16, y: u16, generation: u16) -> Self {
        Self { x, y, generation }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.generation != 0
    }
}

/// The input from one client
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct ClientInput {
    pub touches: [Touch; TOUCH_BUFFER_SIZE],
    pub keys: u32,
}

impl ClientInput {
    /// Touches that are not tombstones, in slot order
    pub fn active_touches(&self) -> impl Iterator<Item = &Touch> {
        self.touches.iter().filter(|t| t.is_active())
    }

    #[inline]
    pub fn is_pressed(&self, key: u32) -> bool {
        self.keys & key != 0
    }
}

/// Information flowing from the runtime to the cartridge
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct InputSnapshot {
    pub device_width: u32,
    pub device_height: u32,
    /// Which slot of `inputs` belongs to this client
    pub netplay_client_number: u16,
    /// Incremented by the host every frame
    pub touch_generation: u16,
    pub inputs: [ClientInput; N_CLIENTS],
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self::zeroed()
    }
}

static NO_INPUT: ClientInput = ClientInput {
    touches: [Touch::new(0, 0, 0); TOUCH_BUFFER_SIZE],
    keys: 0,
};

impl InputSnapshot {
    /// This client's slot. An out-of-range client number reads as no input.
    pub fn local(&self) -> &ClientInput {
        self.inputs
            .get(self.netplay_client_number as usize)
            .unwrap_or(&NO_INPUT)
    }

    pub fn local_mut(&mut self) -> Option<&mut ClientInput> {
        self.inputs.get_mut(self.netplay_client_number as usize)
    }

    /// View host-written bytes as a snapshot. `None` on a size or alignment mismatch.
    pub fn from_bytes(bytes: &[u8]) -> Option<&Self> {
        bytemuck::try_from_bytes(bytes).ok()
    }
}

/// The configuration record the runtime reads at the address `configure` returns
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct RawDescriptor {
    pub framebuffer_addr: u32,
    pub info_addr: u32,
    pub spritesheet_addr: u32,
    pub logical_width_px: u16,
    pub logical_height_px: u16,
    pub max_n_players: u16,
    pub reserved: u16,
}
