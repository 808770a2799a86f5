//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - One step per host frame, no wall-clock time
//! - Input arrives as a fixed snapshot for the whole step
//! - No rendering or platform dependencies beyond sprite sizes

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{Aabb, boxes_overlap};
pub use input::{Arbitration, arbitrate};
pub use state::{Ball, GameState, InputMode, Movement, Player};
pub use tick::tick;
