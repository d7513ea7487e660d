//! Keyboard handling for the platformer
//!
//! Crouch and jump react to press edges, not to held keys: holding a key
//! down (and the browser's key repeat) changes nothing after the first press.

use serde::{Deserialize, Serialize};

use super::state::{Jump, PlatformerState};

/// Keys the platformer listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Start the current level over
    Restart,
}

impl PlatformerState {
    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Restart => self.restart(),
            Key::Up => {
                if !self.inputs.up && self.player.jump.is_none() {
                    self.player.jump = Some(self.plan_jump());
                }
                self.inputs.up = true;
            }
            Key::Down => {
                if !self.inputs.down {
                    let factor = self.tuning.crouch_width_factor;
                    let body = &mut self.player.body;
                    body.size.y /= 2.0;
                    body.size.x *= factor;
                }
                self.inputs.down = true;
            }
            Key::Left => self.inputs.left = true,
            Key::Right => self.inputs.right = true,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Restart => {}
            Key::Up => self.inputs.up = false,
            Key::Down => {
                if self.inputs.down {
                    let factor = self.tuning.crouch_width_factor;
                    let body = &mut self.player.body;
                    body.size.y *= 2.0;
                    body.size.x /= factor;
                    // Keep the feet where they were
                    body.pos.y -= body.size.y / 2.0;
                }
                self.inputs.down = false;
            }
            Key::Left => self.inputs.left = false,
            Key::Right => self.inputs.right = false,
        }
    }

    /// Release every held key, as if each key-up had been seen
    ///
    /// Key-ups that happen while the page is unfocused never arrive, which
    /// would otherwise leave a direction (or crouch) held forever.
    pub fn focus_lost(&mut self) {
        for key in [Key::Up, Key::Down, Key::Left, Key::Right] {
            self.key_up(key);
        }
    }

    /// Jump arc for an up press at the current position
    ///
    /// Right sets a forward landing point, then left is applied last, so with
    /// both held the jump goes left.
    fn plan_jump(&self) -> Jump {
        let reach = self.tuning.jump_distance();
        let mut offset = 0.0;
        if self.inputs.right {
            offset = reach;
        }
        if self.inputs.left {
            offset = -reach;
        }
        let pos = self.player.body.pos;
        Jump {
            landing_x: pos.x + offset,
            min_y: pos.y - self.tuning.max_jump_height,
            ascending: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::PlatformerTuning;

    fn state() -> PlatformerState {
        PlatformerState::new(42, 600.0, PlatformerTuning::default())
    }

    #[test]
    fn test_jump_straight_up() {
        let mut s = state();
        let pos = s.player.body.pos;
        s.key_down(Key::Up);
        let jump = s.player.jump.unwrap();
        assert_eq!(jump.landing_x, pos.x);
        assert_eq!(jump.min_y, pos.y - 30.0);
        assert!(jump.ascending);
    }

    #[test]
    fn test_jump_right() {
        let mut s = state();
        let x = s.player.body.pos.x;
        s.key_down(Key::Right);
        s.key_down(Key::Up);
        assert_eq!(s.player.jump.unwrap().landing_x, x + 60.0);
    }

    #[test]
    fn test_jump_left_wins_over_right() {
        let mut s = state();
        let x = s.player.body.pos.x;
        s.key_down(Key::Right);
        s.key_down(Key::Left);
        s.key_down(Key::Up);
        assert_eq!(s.player.jump.unwrap().landing_x, x - 60.0);
    }

    #[test]
    fn test_held_up_does_not_rejump() {
        let mut s = state();
        s.key_down(Key::Up);
        s.player.jump = None;
        // Key repeat while still held
        s.key_down(Key::Up);
        assert!(s.player.jump.is_none());

        s.key_up(Key::Up);
        s.key_down(Key::Up);
        assert!(s.player.jump.is_some());
    }

    #[test]
    fn test_no_new_jump_mid_air() {
        let mut s = state();
        s.key_down(Key::Up);
        let first = s.player.jump;
        s.key_up(Key::Up);
        s.key_down(Key::Right);
        s.key_down(Key::Up);
        assert_eq!(s.player.jump, first);
    }

    #[test]
    fn test_crouch_round_trip_keeps_feet() {
        let mut s = state();
        let before = s.player.body;

        s.key_down(Key::Down);
        s.key_down(Key::Down);
        assert!((s.player.body.height() - 5.0).abs() < 1e-4);
        assert!((s.player.body.width() - 12.0).abs() < 1e-4);

        s.key_up(Key::Down);
        assert!((s.player.body.height() - 10.0).abs() < 1e-4);
        assert!((s.player.body.width() - 10.0).abs() < 1e-4);
        assert!((s.player.body.pos.y - (before.pos.y - 5.0)).abs() < 1e-4);

        // A stray release without a press changes nothing
        s.key_up(Key::Down);
        assert!((s.player.body.height() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_focus_lost_releases_everything() {
        let mut s = state();
        s.key_down(Key::Left);
        s.key_down(Key::Down);
        s.focus_lost();
        assert_eq!(s.inputs, Default::default());
        assert!((s.player.body.height() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_restart_keeps_level() {
        let mut s = state();
        s.active_level = 4;
        s.enter_level();
        s.player.body.pos.x += 100.0;
        s.player.dead = true;
        s.key_down(Key::Restart);
        assert_eq!(s.active_level, 4);
        assert!(!s.player.dead);
        assert_eq!(s.player.body.pos.x, s.level().floors[0].pos.x + 10.0);
    }
}
