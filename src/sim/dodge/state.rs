//! Dodge state, object model and enemy generation

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{DODGE_ENEMY, DODGE_PLAYER};
use crate::random_int;
use crate::sim::rect::{Field, Rect};
use crate::tuning::DodgeTuning;

/// The dragged square
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Rect,
    pub dragging: bool,
}

/// A bouncing square
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Rect,
    /// Per-tick velocity; both components are whole numbers and never zero
    pub vel: Vec2,
    /// Where the enemy spawned
    pub start: Vec2,
}

impl Enemy {
    /// Roll a new enemy anywhere inside the field
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, field: &Field, tuning: &DodgeTuning) -> Self {
        let size = random_int(rng, tuning.enemy_size.min, tuning.enemy_size.max);
        let x = random_int(rng, 0, field.max_x(size as f32) as i32);
        let y = random_int(rng, 0, field.max_y(size as f32) as i32);
        let speed_x = random_int(rng, -tuning.enemy_speed, tuning.enemy_speed);
        let speed_y = random_int(rng, -tuning.enemy_speed, tuning.enemy_speed);

        let pos = Vec2::new(x as f32, y as f32);
        Self {
            body: Rect::new(pos.x, pos.y, size as f32, size as f32, DODGE_ENEMY),
            // A zero roll would park the enemy on that axis forever
            vel: Vec2::new(
                if speed_x == 0 { 1.0 } else { speed_x as f32 },
                if speed_y == 0 { -1.0 } else { speed_y as f32 },
            ),
            start: pos,
        }
    }
}

/// Generate `count` enemies with random position, size and velocity
///
/// Enemies may overlap each other or the player's spawn point.
pub fn generate_enemies<R: Rng + ?Sized>(
    rng: &mut R,
    field: &Field,
    tuning: &DodgeTuning,
    count: usize,
) -> Vec<Enemy> {
    (0..count).map(|_| Enemy::spawn(rng, field, tuning)).collect()
}

/// Complete Dodge session state
#[derive(Debug, Clone)]
pub struct DodgeState {
    pub tuning: DodgeTuning,
    pub field: Field,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// The player has grabbed the square and the clock is counting
    pub running: bool,
    /// Seconds survived in the current (or last) run
    pub clock_secs: u32,
    /// Seconds survived by a run that ended since the last `take_finished_run`
    finished_run: Option<u32>,
    pub(crate) rng: Pcg32,
}

impl DodgeState {
    /// Create a session on a field `field_width` wide
    pub fn new(seed: u64, field_width: f32, tuning: DodgeTuning) -> Self {
        let field = Field::new(field_width, tuning.field_height);
        let size = tuning.player_size;
        let mut state = Self {
            field,
            player: Player {
                body: Rect::new(0.0, 0.0, size, size, DODGE_PLAYER),
                dragging: false,
            },
            enemies: Vec::new(),
            running: false,
            clock_secs: 0,
            finished_run: None,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        };
        state.reset();
        state
    }

    /// Stop the run, re-centre the player and roll a fresh set of enemies
    ///
    /// The clock keeps its value so the last run's time stays on screen.
    pub fn reset(&mut self) {
        self.running = false;
        self.player.dragging = false;
        self.player.body.pos = self.player_start();
        let count = self.initial_enemy_count();
        self.enemies = generate_enemies(&mut self.rng, &self.field, &self.tuning, count);
    }

    /// Player spawn position, just up-left of the field centre
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(
            self.field.width / 2.0 - self.player.body.width(),
            self.field.height / 2.0 - self.player.body.height(),
        )
    }

    /// Enemies a run starts with (one per `enemies_per_width` units, at least one)
    pub fn initial_enemy_count(&self) -> usize {
        ((self.field.width / self.tuning.enemies_per_width).ceil() as usize).max(1)
    }

    /// Change the field width and start over
    pub fn resize(&mut self, field_width: f32) {
        self.field.width = field_width;
        self.reset();
    }

    /// Roll one enemy with the session RNG
    pub fn spawn_enemy(&mut self) -> Enemy {
        Enemy::spawn(&mut self.rng, &self.field, &self.tuning)
    }

    pub(crate) fn finish_run(&mut self) {
        if self.running {
            log::info!("Dodge run ended after {}s", self.clock_secs);
            self.finished_run = Some(self.clock_secs);
        }
        self.reset();
    }

    /// Seconds survived by the most recently ended run, if not yet taken
    pub fn take_finished_run(&mut self) -> Option<u32> {
        self.finished_run.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_centres_player() {
        let state = DodgeState::new(1, 500.0, DodgeTuning::default());
        assert_eq!(state.player.body.pos, Vec2::new(235.0, 235.0));
        assert!(!state.running);
        assert!(!state.player.dragging);
        assert_eq!(state.enemies.len(), 5);
    }

    #[test]
    fn test_enemy_count_follows_width() {
        let state = DodgeState::new(1, 1234.0, DodgeTuning::default());
        assert_eq!(state.initial_enemy_count(), 13);

        let narrow = DodgeState::new(1, 40.0, DodgeTuning::default());
        assert_eq!(narrow.initial_enemy_count(), 1);
    }

    #[test]
    fn test_finish_run_reports_only_running_sessions() {
        let mut state = DodgeState::new(3, 500.0, DodgeTuning::default());
        state.clock_secs = 4;
        state.finish_run();
        assert_eq!(state.take_finished_run(), None);

        state.running = true;
        state.clock_secs = 12;
        state.finish_run();
        assert!(!state.running);
        assert_eq!(state.take_finished_run(), Some(12));
        assert_eq!(state.take_finished_run(), None);
        // Last time stays visible until the next grab
        assert_eq!(state.clock_secs, 12);
    }

    proptest! {
        #[test]
        fn generated_enemies_are_valid(seed in any::<u64>(), width in 100u32..1600, count in 1usize..40) {
            let tuning = DodgeTuning::default();
            let field = Field::new(width as f32, tuning.field_height);
            let mut rng = Pcg32::seed_from_u64(seed);
            let enemies = generate_enemies(&mut rng, &field, &tuning, count);

            prop_assert_eq!(enemies.len(), count);
            for e in &enemies {
                prop_assert!(e.vel.x != 0.0 && e.vel.y != 0.0);
                prop_assert!(e.vel.x.abs() <= tuning.enemy_speed as f32);
                prop_assert!(e.vel.y.abs() <= tuning.enemy_speed as f32);
                prop_assert!(tuning.enemy_size.contains(e.body.width() as i32));
                prop_assert_eq!(e.body.width(), e.body.height());
                prop_assert!(e.body.pos.x >= 0.0 && e.body.right() <= field.width);
                prop_assert!(e.body.pos.y >= 0.0 && e.body.bottom() <= field.height);
                prop_assert_eq!(e.start, e.body.pos);
            }
        }
    }
}
