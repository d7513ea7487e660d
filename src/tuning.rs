//! Data-driven game balance
//!
//! Every number the simulations read lives here so it can be overridden from
//! persisted settings without touching the update steps.

use serde::{Deserialize, Serialize};

use crate::consts::FIELD_HEIGHT;

/// Inclusive integer range `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i32,
    pub max: i32,
}

impl IntRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Dodge game balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DodgeTuning {
    /// Update/render interval (ms)
    pub tick_interval_ms: u32,
    /// Session clock interval (ms); the clock counts whole seconds
    pub clock_interval_ms: u32,
    pub field_height: f32,
    pub player_size: f32,
    /// Enemy side length
    pub enemy_size: IntRange,
    /// Largest per-axis enemy speed (velocity drawn from `[-speed, speed]`)
    pub enemy_speed: i32,
    /// One enemy per this many units of field width
    pub enemies_per_width: f32,
    /// Grab tolerance before the player's near edges
    pub grab_margin: f32,
    /// Grab reach past the origin, as a multiple of player size
    pub grab_reach: f32,
    /// Random events only fire after this many seconds of play
    pub random_event_after_secs: u32,
    /// Chance per tick (per mille) of spawning an extra enemy
    pub spawn_per_mille: i32,
    /// Chance per tick (per mille) of mutating an existing enemy
    pub mutate_per_mille: i32,
    /// Vertical bounce reuses the horizontal speed magnitude (legacy behavior)
    pub coupled_vertical_bounce: bool,
}

impl Default for DodgeTuning {
    fn default() -> Self {
        Self {
            tick_interval_ms: 15,
            clock_interval_ms: 1000,
            field_height: FIELD_HEIGHT,
            player_size: 15.0,
            enemy_size: IntRange::new(15, 20),
            enemy_speed: 4,
            enemies_per_width: 100.0,
            grab_margin: 10.0,
            grab_reach: 1.5,
            random_event_after_secs: 10,
            spawn_per_mille: 2,
            mutate_per_mille: 100,
            coupled_vertical_bounce: true,
        }
    }
}

/// Platformer game balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformerTuning {
    /// Update/render interval (ms)
    pub tick_interval_ms: u32,
    pub field_height: f32,
    /// Status bar height; the player cannot rise into it
    pub status_height: f32,
    pub status_padding: f32,
    /// Apex height of a jump (also sets jump distance and level gaps)
    pub max_jump_height: f32,
    pub player_size: f32,
    /// Width multiplier while crouched (height is halved)
    pub crouch_width_factor: f32,
    pub level_count: usize,
    pub floors_per_level: IntRange,
    pub min_floor_width: i32,
    pub floor_height: f32,
    pub goal_width: f32,
    pub goal_height: f32,
    /// Distance above the first floor the player spawns at
    pub spawn_drop: f32,
    /// Number of debris pieces on death
    pub debris_count: IntRange,
    /// Debris size is player size divided by a value in this range
    pub debris_divisor: IntRange,
}

impl Default for PlatformerTuning {
    fn default() -> Self {
        Self {
            tick_interval_ms: 16,
            field_height: FIELD_HEIGHT,
            status_height: 25.0,
            status_padding: 5.0,
            max_jump_height: 30.0,
            player_size: 10.0,
            crouch_width_factor: 1.2,
            level_count: 20,
            floors_per_level: IntRange::new(3, 10),
            min_floor_width: 50,
            floor_height: 5.0,
            goal_width: 5.0,
            goal_height: 50.0,
            spawn_drop: 20.0,
            debris_count: IntRange::new(10, 14),
            debris_divisor: IntRange::new(3, 4),
        }
    }
}

impl PlatformerTuning {
    /// Smallest gap between consecutive floors
    pub fn min_gap(&self) -> i32 {
        self.max_jump_height as i32
    }

    /// Largest gap a full-distance jump still clears
    pub fn max_gap(&self) -> i32 {
        (self.max_jump_height * 2.0 + self.player_size) as i32
    }

    /// Horizontal distance covered by a directional jump
    pub fn jump_distance(&self) -> f32 {
        self.max_jump_height * 2.0
    }
}
