//! Canvas Arcade - Dodge and Platform, two small canvas games
//!
//! Core modules:
//! - `sim`: Deterministic simulation (object model, generators, update steps)
//! - `render`: Paints a frame through the `Surface` collaborator
//! - `session`: Loop driver owning the scheduled tick handles
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod games;
pub mod platform;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use games::{DodgeGame, PlatformerGame};
pub use session::{Game, InputEvent, Key, ManualScheduler, Scheduler, Session, TimerId};
pub use settings::Settings;

use rand::Rng;

/// Game configuration constants
pub mod consts {
    use crate::sim::Color;

    /// Height of both play fields (the width follows the container)
    pub const FIELD_HEIGHT: f32 = 500.0;
    /// Field width used when no container is available (native demo, tests)
    pub const DEFAULT_FIELD_WIDTH: f32 = 500.0;

    pub const BACKGROUND: Color = Color(0x000000);
    pub const DODGE_PLAYER: Color = Color(0xff0000);
    pub const DODGE_ENEMY: Color = Color(0x596095);
    pub const TIMER_BOX: Color = Color(0xffffff);
    pub const TIMER_TEXT: Color = Color(0x0000ff);

    pub const PLATFORMER_PLAYER: Color = Color(0xff0000);
    pub const FLOOR: Color = Color(0x878282);
    pub const GOAL: Color = Color(0xf1d826);
    pub const STATUS_BG: Color = Color(0xffffff);
    pub const STATUS_TEXT: Color = Color(0x000000);
}

/// Uniform integer in `[min, max]`; collapses to `min` when the range is empty
#[inline]
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max <= min {
        min
    } else {
        rng.random_range(min..=max)
    }
}
