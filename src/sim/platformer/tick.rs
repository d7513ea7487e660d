//! Platformer update step
//!
//! Movement is one unit per tick on each axis: no velocities, no
//! acceleration. A jump rises toward its apex while drifting toward its
//! landing x; everything else falls until it touches a floor.

use crate::random_int;
use crate::sim::collision::overlaps;

use super::state::{PlatformerState, generate_debris};

/// Advance the platformer by one tick
pub fn tick(state: &mut PlatformerState) {
    let level = &state.levels[state.active_level];
    let floor_contact = level
        .floors
        .iter()
        .any(|floor| overlaps(&state.player.body, floor));
    let max_floor_y = level.max_floor_y();

    step_jump_x(state);

    let rising = state.player.jump.is_some_and(|j| j.ascending);
    if rising {
        rise(state, floor_contact);
    } else if !floor_contact {
        state.player.body.pos.y += 1.0;
    } else if !state.crouching() {
        land_and_walk(state);
    }

    let y = state.player.body.pos.y;
    let h = state.player.body.height();
    if y >= max_floor_y + h * 2.0 && y < max_floor_y + h * 8.0 {
        fall_to_death(state);
    } else if state.player.dead {
        log::debug!("Player died on level {}", state.active_level + 1);
        state.active_level = 0;
        state.enter_level();
    } else if overlaps(&state.player.body, &state.level().goal) {
        state.advance_level();
    }
}

/// Drift one unit toward the landing point while a jump is active
fn step_jump_x(state: &mut PlatformerState) {
    let Some(jump) = state.player.jump else {
        return;
    };
    let x = state.player.body.pos.x;
    if x < jump.landing_x && state.allows_x(x + 1.0) {
        state.player.body.pos.x += 1.0;
    } else if x > jump.landing_x && state.allows_x(x - 1.0) {
        state.player.body.pos.x -= 1.0;
    }
}

/// Climb toward the apex; turn around at the apex, the ceiling or a floor
fn rise(state: &mut PlatformerState, floor_contact: bool) {
    let y = state.player.body.pos.y;
    let can_rise = state.allows_y(y - 1.0);
    let Some(jump) = state.player.jump.as_mut() else {
        return;
    };
    if jump.min_y < y && can_rise {
        state.player.body.pos.y -= 1.0;
    } else if jump.min_y >= y || !can_rise || floor_contact {
        jump.ascending = false;
    }
}

/// Standing on a floor: end any jump and walk with the held direction
fn land_and_walk(state: &mut PlatformerState) {
    state.player.jump = None;
    let x = state.player.body.pos.x;
    if state.inputs.right && state.allows_x(x + 1.0) {
        state.player.body.pos.x += 1.0;
    }
    let x = state.player.body.pos.x;
    if state.inputs.left && state.allows_x(x - 1.0) {
        state.player.body.pos.x -= 1.0;
    }
}

/// Inside the death band: burst into debris, then let it drift down
fn fall_to_death(state: &mut PlatformerState) {
    let player = &mut state.player;
    player.dead = true;
    match player.pieces.as_mut() {
        None => {
            player.pieces = Some(generate_debris(&mut state.rng, &player.body, &state.tuning));
        }
        Some(pieces) => {
            for piece in pieces.iter_mut() {
                piece.pos.y += 1.0;
                let drift = random_int(&mut state.rng, 0, 1) as f32;
                if piece.pos.x > player.body.pos.x {
                    piece.pos.x += drift;
                } else {
                    piece.pos.x -= drift;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FLOOR, GOAL};
    use crate::sim::Rect;
    use crate::sim::platformer::{Key, Level};
    use crate::tuning::PlatformerTuning;

    /// Two single-floor levels 500 wide with the floor at y = 250
    fn two_levels() -> Vec<Level> {
        let make = |goal_x: f32| Level {
            floors: vec![Rect::new(0.0, 250.0, 300.0, 5.0, FLOOR)],
            goal: Rect::new(goal_x, 205.0, 5.0, 50.0, GOAL),
        };
        vec![make(295.0), make(200.0)]
    }

    fn state() -> PlatformerState {
        PlatformerState::from_levels(9, 500.0, PlatformerTuning::default(), two_levels()).unwrap()
    }

    /// Tick until the player rests on the floor
    fn settle(s: &mut PlatformerState) {
        for _ in 0..100 {
            tick(s);
        }
    }

    #[test]
    fn test_falls_onto_floor() {
        let mut s = state();
        // Spawned 20 above the floor surface
        assert_eq!(s.player.body.pos.y, 220.0);
        settle(&mut s);
        // Rests sunk one unit into the floor
        assert_eq!(s.player.body.pos.y, 241.0);
        assert!(!s.player.dead);
    }

    #[test]
    fn test_walks_on_floor_but_not_while_crouched() {
        let mut s = state();
        settle(&mut s);
        let x = s.player.body.pos.x;

        s.key_down(Key::Right);
        tick(&mut s);
        assert_eq!(s.player.body.pos.x, x + 1.0);

        s.key_down(Key::Down);
        tick(&mut s);
        tick(&mut s);
        tick(&mut s);
        assert_eq!(s.player.body.pos.x, x + 1.0);
    }

    #[test]
    fn test_jump_arc_rises_then_lands() {
        let mut s = state();
        settle(&mut s);
        let start = s.player.body.pos;

        s.key_down(Key::Right);
        s.key_down(Key::Up);
        // Rising ignores floor contact while the apex is still above
        let mut apex = start.y;
        for _ in 0..200 {
            tick(&mut s);
            apex = apex.min(s.player.body.pos.y);
            if s.player.jump.is_none() {
                break;
            }
        }
        assert!(s.player.jump.is_none());
        assert!(apex < start.y - 20.0);
        assert!(apex >= start.y - 30.0);
        assert!(s.player.body.pos.x > start.x + 50.0);
        assert_eq!(s.player.body.pos.y, 241.0);
    }

    #[test]
    fn test_rise_stops_at_ceiling() {
        let mut s = state();
        s.player.body.pos.y = 36.0;
        s.key_down(Key::Up);
        tick(&mut s);
        assert_eq!(s.player.body.pos.y, 35.0);
        tick(&mut s);
        assert!(!s.player.jump.unwrap().ascending);
    }

    #[test]
    fn test_goal_advances_level() {
        let mut s = state();
        s.player.body.pos = s.level().goal.pos;
        tick(&mut s);
        assert_eq!(s.active_level, 1);
        let first = s.level().floors[0];
        assert_eq!(s.player.body.pos.x, first.pos.x + 10.0);
        assert_eq!(s.player.body.pos.y, first.pos.y - 30.0);
    }

    #[test]
    fn test_goal_wraps_to_first_level() {
        let mut s = state();
        s.advance_level();
        s.player.body.pos = s.level().goal.pos;
        tick(&mut s);
        assert_eq!(s.active_level, 0);
    }

    #[test]
    fn test_death_band_spawns_debris() {
        let mut s = state();
        s.advance_level();
        let max_floor_y = s.level().max_floor_y();
        s.player.body.pos.x = 400.0;
        s.player.body.pos.y = max_floor_y + 4.0 * 10.0;

        tick(&mut s);
        assert!(s.player.dead);
        let pieces = s.player.pieces.clone().unwrap();
        assert!(s.tuning.debris_count.contains(pieces.len() as i32));

        // Debris drifts down while the player keeps falling through the band
        tick(&mut s);
        let moved = s.player.pieces.as_ref().unwrap();
        for (before, after) in pieces.iter().zip(moved) {
            assert_eq!(after.pos.y, before.pos.y + 1.0);
            assert!((after.pos.x - before.pos.x).abs() <= 1.0);
        }
        assert_eq!(s.active_level, 1);
    }

    #[test]
    fn test_leaving_death_band_resets_to_first_level() {
        let mut s = state();
        s.advance_level();
        let max_floor_y = s.level().max_floor_y();
        s.player.body.pos.x = 400.0;
        s.player.body.pos.y = max_floor_y + 20.0;

        tick(&mut s);
        assert!(s.player.dead);

        for _ in 0..200 {
            tick(&mut s);
            if !s.player.dead {
                break;
            }
        }
        assert!(!s.player.dead);
        assert!(s.player.pieces.is_none());
        assert_eq!(s.active_level, 0);
        assert_eq!(s.player.body.pos.y, 220.0);
    }

    #[test]
    fn test_jump_x_blocked_by_wall() {
        let mut s = state();
        settle(&mut s);
        s.player.body.pos.x = 0.0;
        s.key_down(Key::Left);
        s.key_down(Key::Up);
        assert_eq!(s.player.jump.unwrap().landing_x, -60.0);
        for _ in 0..10 {
            tick(&mut s);
        }
        assert_eq!(s.player.body.pos.x, 0.0);
    }
}
