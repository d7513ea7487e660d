//! Platformer state and object model

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::PLATFORMER_PLAYER;
use crate::random_int;
use crate::sim::rect::{Field, Rect};
use crate::tuning::PlatformerTuning;

use super::level::{Level, generate_levels};

/// An in-progress jump arc
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Jump {
    /// Horizontal target once the jump completes
    pub landing_x: f32,
    /// Apex (smallest y reached)
    pub min_y: f32,
    /// Still rising toward the apex
    pub ascending: bool,
}

/// The player square
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Rect,
    pub jump: Option<Jump>,
    pub dead: bool,
    /// Debris left behind on death
    pub pieces: Option<Vec<Rect>>,
}

/// Directional keys currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inputs {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Complete platformer session state
#[derive(Debug, Clone)]
pub struct PlatformerState {
    pub tuning: PlatformerTuning,
    pub field: Field,
    pub levels: Vec<Level>,
    pub active_level: usize,
    pub player: Player,
    pub inputs: Inputs,
    pub(crate) rng: Pcg32,
}

impl PlatformerState {
    /// Create a session with `tuning.level_count` freshly generated levels
    pub fn new(seed: u64, field_width: f32, tuning: PlatformerTuning) -> Self {
        let field = Field::new(field_width, tuning.field_height);
        let mut rng = Pcg32::seed_from_u64(seed);
        let levels = generate_levels(&mut rng, &field, &tuning, tuning.level_count.max(1));
        Self::with_levels(rng, field, tuning, levels)
    }

    /// Create a session over a fixed set of levels
    ///
    /// Levels without floors have nowhere to put the player and are dropped.
    /// Returns `None` if no playable level is left.
    pub fn from_levels(
        seed: u64,
        field_width: f32,
        tuning: PlatformerTuning,
        levels: Vec<Level>,
    ) -> Option<Self> {
        let given = levels.len();
        let levels: Vec<Level> = levels.into_iter().filter(|l| !l.floors.is_empty()).collect();
        if levels.len() < given {
            log::warn!("Dropped {} level(s) without floors", given - levels.len());
        }
        if levels.is_empty() {
            return None;
        }
        let field = Field::new(field_width, tuning.field_height);
        Some(Self::with_levels(Pcg32::seed_from_u64(seed), field, tuning, levels))
    }

    /// `levels` must be non-empty and every level must have a floor
    fn with_levels(rng: Pcg32, field: Field, tuning: PlatformerTuning, levels: Vec<Level>) -> Self {
        let size = tuning.player_size;
        let mut state = Self {
            field,
            levels,
            active_level: 0,
            player: Player {
                body: Rect::new(0.0, 0.0, size, size, PLATFORMER_PLAYER),
                jump: None,
                dead: false,
                pieces: None,
            },
            inputs: Inputs::default(),
            rng,
            tuning,
        };
        state.enter_level();
        state
    }

    pub fn level(&self) -> &Level {
        &self.levels[self.active_level]
    }

    /// Put the player just above and right of the first floor of the active level
    pub fn enter_level(&mut self) {
        let first = self.levels[self.active_level].floors[0];
        let body = &mut self.player.body;
        body.pos.x = first.pos.x + body.width();
        body.pos.y = first.pos.y - body.height() - self.tuning.spawn_drop;
        self.player.jump = None;
        self.player.dead = false;
        self.player.pieces = None;
    }

    /// Move to the next level, wrapping to the first after the last
    pub fn advance_level(&mut self) {
        self.active_level = (self.active_level + 1) % self.levels.len();
        log::debug!("Entering level {}/{}", self.active_level + 1, self.levels.len());
        self.enter_level();
    }

    /// Start the current level over without changing the level index
    pub fn restart(&mut self) {
        self.enter_level();
    }

    /// Change the field width: levels are regenerated and the current index re-entered
    pub fn resize(&mut self, field_width: f32) {
        self.field.width = field_width;
        let count = self.tuning.level_count.max(1);
        self.levels = generate_levels(&mut self.rng, &self.field, &self.tuning, count);
        self.active_level = self.active_level.min(self.levels.len() - 1);
        self.enter_level();
    }

    /// Smallest y the player may rise to (just below the status bar)
    pub fn ceiling(&self) -> f32 {
        self.tuning.status_height + self.tuning.status_padding + self.player.body.height() / 2.0
    }

    pub(crate) fn allows_x(&self, x: f32) -> bool {
        self.field.allows_x(x, self.player.body.width())
    }

    pub(crate) fn allows_y(&self, y: f32) -> bool {
        y >= self.ceiling() && y <= self.field.max_y(self.player.body.height())
    }

    /// Crouching (down held)
    pub fn crouching(&self) -> bool {
        self.inputs.down
    }
}

/// Scatter debris pieces around `body`
pub fn generate_debris<R: Rng + ?Sized>(rng: &mut R, body: &Rect, tuning: &PlatformerTuning) -> Vec<Rect> {
    let count = random_int(rng, tuning.debris_count.min, tuning.debris_count.max).max(0);
    let (w, h) = (body.width() as i32, body.height() as i32);
    (0..count)
        .map(|_| {
            let x = body.pos.x + random_int(rng, -w, w) as f32;
            let y = body.pos.y + random_int(rng, -h, h) as f32;
            let dw = random_int(rng, tuning.debris_divisor.min, tuning.debris_divisor.max) as f32;
            let dh = random_int(rng, tuning.debris_divisor.min, tuning.debris_divisor.max) as f32;
            Rect::new(x, y, body.width() / dw, body.height() / dh, body.color)
        })
        .collect()
}
