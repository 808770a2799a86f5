//! Native headless runner
//!
//! Plays a scripted session against the cartridge with a recording host that
//! renders the draw calls back into the framebuffer, then prints the final
//! game state and a framebuffer checksum. The console itself loads the wasm32
//! build and never runs this binary.
//!
//! Usage: `awsm-breakout [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
use awsm_breakout::{
    Cartridge, Settings,
    platform::{
        Touch,
        abi::{KEY_BLUR, KEY_LEFT, KEY_RIGHT},
        host::RecordingHost,
    },
    renderer::{Framebuffer, sprites},
};

#[cfg(not(target_arch = "wasm32"))]
const SESSION_FRAMES: u32 = 240;

/// Paint every sprite frame as a solid block so replayed draws are visible
#[cfg(not(target_arch = "wasm32"))]
fn placeholder_sheet(sheet: &mut Framebuffer) {
    let palette: [(&sprites::Sprite, [u8; 4]); 5] = [
        (&sprites::BLOCK, [0xd0, 0x60, 0x40, 0xff]),
        (&sprites::BALL, [0xff, 0xff, 0xff, 0xff]),
        (&sprites::BUTTON, [0x40, 0x40, 0x40, 0xff]),
        (&sprites::PADDLE, [0xf0, 0xc0, 0x30, 0xff]),
        (&sprites::LOGO, [0x20, 0x20, 0x80, 0xff]),
    ];
    for (sprite, color) in palette {
        for index in 0..sprite.frame_count() {
            let f = sprite.frame(index as u32);
            sheet.fill_rect(f.x as i32, f.y as i32, f.w, f.h, color);
        }
    }
}

/// Input for one frame of the scripted session
#[cfg(not(target_arch = "wasm32"))]
fn scripted_input(frame: u32) -> (u32, Option<Touch>) {
    match frame {
        0..60 => (KEY_LEFT, None),
        60..120 => (0, Some(Touch::new(100, 150, frame as u16 + 1))),
        150 => (KEY_BLUR, None),
        151.. => (KEY_RIGHT, None),
        _ => (0, None),
    }
}

/// FNV-1a over the framebuffer bytes
#[cfg(not(target_arch = "wasm32"))]
fn checksum(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, &b| {
        (hash ^ b as u64).wrapping_mul(0x0100_0000_01b3)
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("awsm-breakout (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Settings::load_or_default(&json),
            Err(e) => {
                log::warn!("Could not read {path}: {e}; using default settings");
                Settings::default()
            }
        },
        None => Settings::default(),
    };

    let mut cart = Cartridge::new(settings);
    placeholder_sheet(cart.spritesheet_mut());
    let sheet = cart.spritesheet().clone();
    let descriptor = *cart.configure();
    log::debug!("Descriptor: {descriptor:?}");

    let mut host = RecordingHost::new();
    for frame in 0..SESSION_FRAMES {
        let (keys, touch) = scripted_input(frame);
        let local = &mut cart.input_mut().inputs[0];
        local.keys = keys;
        local.touches = Default::default();
        if let Some(touch) = touch {
            local.touches[0] = touch;
        }

        cart.update(&mut host);
        for message in host.traces() {
            log::info!("frame {frame}: {message}");
        }
        host.replay(&sheet, cart.framebuffer_mut());
        host.take();
    }

    println!("{}", serde_json::to_string_pretty(cart.state())?);
    println!("framebuffer checksum: {:016x}", checksum(cart.framebuffer().as_bytes()));
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The console calls the exported `configure`/`update`, this is just to satisfy the compiler
}
