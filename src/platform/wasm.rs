//! wasm32 entry points
//!
//! The runtime instantiates the module, calls `configure` once and `update`
//! once per frame. The single [`Cartridge`] lives in a thread-local slot; the
//! console is single-threaded so there is never a second borrower.

use std::cell::RefCell;

use log::LevelFilter;

use super::abi::RawDescriptor;
use super::host::{Host, SheetRect, Surface};
use super::logger;
use crate::cartridge::Cartridge;
use crate::settings::Settings;

#[link(wasm_import_module = "env")]
unsafe extern "C" {
    #[link_name = "blit"]
    fn host_blit(
        src_addr: *const u8,
        sx: u16,
        sy: u16,
        s_stride: u16,
        dest_addr: *mut u8,
        dx: i16,
        dy: i16,
        d_stride: u16,
        w: u16,
        h: u16,
        flags: u8,
    );

    #[link_name = "draw_ss"]
    fn host_draw_ss(sx: u16, sy: u16, dx: i16, dy: i16, w: u16, h: u16, flags: u8);

    #[link_name = "fill_screen"]
    fn host_fill_screen(color: u32);

    #[link_name = "trace"]
    fn host_trace(ptr: *const u8, len: usize);
}

pub fn trace_str(message: &str) {
    // SAFETY: the host only reads `len` bytes starting at `ptr`
    unsafe { host_trace(message.as_ptr(), message.len()) }
}

/// [`Host`] backed by the runtime's imports
pub struct ImportedHost;

impl Host for ImportedHost {
    fn blit(
        &mut self,
        src: Surface,
        src_rect: SheetRect,
        dst: Surface,
        dx: i16,
        dy: i16,
        flags: u8,
    ) {
        // SAFETY: both regions come from buffers the cartridge owns for its whole lifetime
        unsafe {
            host_blit(
                src.region.addr as *const u8,
                src_rect.x,
                src_rect.y,
                src.stride,
                dst.region.addr as *mut u8,
                dx,
                dy,
                dst.stride,
                src_rect.w,
                src_rect.h,
                flags,
            )
        }
    }

    fn draw_sprite_sheet(&mut self, src_rect: SheetRect, dx: i16, dy: i16, flags: u8) {
        // SAFETY: plain values only
        unsafe { host_draw_ss(src_rect.x, src_rect.y, dx, dy, src_rect.w, src_rect.h, flags) }
    }

    fn fill_screen(&mut self, color: u32) {
        // SAFETY: plain values only
        unsafe { host_fill_screen(color) }
    }

    fn trace(&mut self, message: &str) {
        trace_str(message);
    }
}

struct Console {
    cart: Cartridge,
    /// The record `configure` points the runtime at
    raw: Box<RawDescriptor>,
}

impl Console {
    fn boot() -> Self {
        std::panic::set_hook(Box::new(|info| trace_str(&info.to_string())));
        if logger::init(trace_str, LevelFilter::Info).is_err() {
            trace_str("logger already installed");
        }

        let cart = Cartridge::new(Settings::default());
        let raw = Box::new(cart.configure().to_raw());
        log::info!("Configured: framebuffer at {:#x}", raw.framebuffer_addr);
        Self { cart, raw }
    }
}

thread_local! {
    static CONSOLE: RefCell<Option<Console>> = const { RefCell::new(None) };
}

fn with_console<R>(f: impl FnOnce(&mut Console) -> R) -> R {
    CONSOLE.with(|slot| {
        let mut slot = slot.borrow_mut();
        f(slot.get_or_insert_with(Console::boot))
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn configure() -> *const RawDescriptor {
    with_console(|console| &*console.raw as *const RawDescriptor)
}

#[unsafe(no_mangle)]
pub extern "C" fn update() {
    with_console(|console| console.cart.update(&mut ImportedHost));
}
