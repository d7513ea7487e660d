//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (seeds, leaderboard timestamps)
//! - Input events (DOM key names)
//! - Drawing surface, interval timers, listeners and storage (`web`, wasm32 only)

use crate::sim::Key;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Current wall-clock time in milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Current wall-clock time in milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Fresh RNG seed for a new session
pub fn new_seed() -> u64 {
    now_ms() as u64
}

/// Map a DOM `KeyboardEvent.key` value to a platformer key
pub fn key_from_dom(key: &str) -> Option<Key> {
    match key {
        "ArrowUp" => Some(Key::Up),
        "ArrowDown" => Some(Key::Down),
        "ArrowLeft" => Some(Key::Left),
        "ArrowRight" => Some(Key::Right),
        "Enter" => Some(Key::Restart),
        _ => None,
    }
}
