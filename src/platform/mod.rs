//! Platform abstraction layer
//!
//! Everything the cartridge shares with the console runtime:
//! - `abi`: byte layouts the runtime reads and writes
//! - `host`: drawing and trace primitives the runtime provides
//! - `logger`: `log` output routed through `trace`
//! - `wasm`: the exported `configure`/`update` entry points (wasm32 only)

pub mod abi;
pub mod host;
pub mod logger;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use abi::{ClientInput, InputSnapshot, RawDescriptor, Touch};
pub use host::{Host, HostCall, RecordingHost, SheetRect, Surface};
