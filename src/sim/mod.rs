//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` per scheduled update, no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (vector order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod dodge;
pub mod platformer;
pub mod rect;

pub use collision::{grabs, overlaps};
pub use dodge::DodgeState;
pub use platformer::{Key, PlatformerState};
pub use rect::{Color, Field, Rect};
