//! Procedural level generation
//!
//! A level is a row of floors laid out left to right at mid-height, with
//! gaps a jump can always clear, and a goal post on the last floor.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{FLOOR, GOAL};
use crate::random_int;
use crate::sim::rect::{Field, Rect};
use crate::tuning::PlatformerTuning;

/// One level: floors sorted by x plus the goal rectangle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub floors: Vec<Rect>,
    pub goal: Rect,
}

impl Level {
    /// Lowest floor surface (largest y), or 0 for a level without floors
    pub fn max_floor_y(&self) -> f32 {
        self.floors.iter().map(|f| f.pos.y).fold(0.0, f32::max)
    }
}

/// Generate a single level
///
/// Floors are placed until the requested count is reached or the next one
/// would run off the right edge, so a level can have fewer floors than
/// rolled. The first floor is always placed (narrowed to the field if needed).
pub fn generate_level<R: Rng + ?Sized>(
    rng: &mut R,
    field: &Field,
    tuning: &PlatformerTuning,
) -> Level {
    let floor_count = random_int(rng, tuning.floors_per_level.min, tuning.floors_per_level.max);
    let floor_y = field.height / 2.0;
    let mut floors: Vec<Rect> = Vec::with_capacity(floor_count.max(1) as usize);
    let mut used = 0.0;

    for i in 0..floor_count.max(1) {
        let widest = ((field.width - used) / 4.0).floor() as i32;
        let width = random_int(rng, tuning.min_floor_width, widest) as f32;

        let Some(prev) = floors.last() else {
            let width = width.min(field.width);
            floors.push(Rect::new(0.0, floor_y, width, tuning.floor_height, FLOOR));
            used = width;
            continue;
        };

        let gap = random_int(rng, tuning.min_gap(), tuning.max_gap()) as f32;
        if used + gap + width >= field.width {
            log::trace!("Level stopped at {} of {} floors", i, floor_count);
            break;
        }
        let x = prev.right() + gap;
        floors.push(Rect::new(x, floor_y, width, tuning.floor_height, FLOOR));
        used += gap + width;
    }

    // First floor is unconditional, so `floors` is never empty here
    let last = floors[floors.len() - 1];
    let goal = Rect::new(
        last.right() - tuning.goal_width,
        last.pos.y - tuning.goal_height + tuning.floor_height,
        tuning.goal_width,
        tuning.goal_height,
        GOAL,
    );

    Level { floors, goal }
}

/// Generate `count` independent levels
pub fn generate_levels<R: Rng + ?Sized>(
    rng: &mut R,
    field: &Field,
    tuning: &PlatformerTuning,
    count: usize,
) -> Vec<Level> {
    (0..count).map(|_| generate_level(rng, field, tuning)).collect()
}
