//! Dodge update step

use crate::random_int;
use crate::sim::collision::overlaps;
use crate::sim::rect::Field;

use super::state::{DodgeState, Enemy};

/// Bounce an enemy off the far walls, then move it by its velocity
///
/// Bouncing forces the sign away from the wall and keeps the magnitude. With
/// `coupled_vertical` the vertical bounce takes its magnitude from the
/// horizontal speed, matching the classic game.
pub fn move_enemy(enemy: &mut Enemy, field: &Field, coupled_vertical: bool) {
    let body = &enemy.body;
    if body.pos.x >= field.max_x(body.width()) {
        enemy.vel.x = -enemy.vel.x.abs();
    } else if body.pos.x <= 0.0 {
        enemy.vel.x = enemy.vel.x.abs();
    }

    let vertical_speed = if coupled_vertical {
        enemy.vel.x.abs()
    } else {
        enemy.vel.y.abs()
    };
    if body.pos.y >= field.max_y(body.height()) {
        enemy.vel.y = -vertical_speed;
    } else if body.pos.y <= 0.0 {
        enemy.vel.y = vertical_speed;
    }

    enemy.body.pos += enemy.vel;
}

/// Advance the Dodge session by one tick
///
/// Enemies move whether or not a run is in progress; the player only moves
/// through dragging. Touching any enemy ends the run.
pub fn tick(state: &mut DodgeState) {
    let coupled = state.tuning.coupled_vertical_bounce;
    for enemy in &mut state.enemies {
        move_enemy(enemy, &state.field, coupled);
    }

    let hit = state
        .enemies
        .iter()
        .any(|enemy| overlaps(&enemy.body, &state.player.body));
    if hit {
        state.finish_run();
        return;
    }

    random_event(state);
}

/// Advance the session clock by one second (while a run is in progress)
pub fn clock(state: &mut DodgeState) {
    if state.running {
        state.clock_secs += 1;
    }
}

/// Occasionally add an enemy or tweak an existing one
///
/// Only fires once a run has lasted past `random_event_after_secs`.
pub fn random_event(state: &mut DodgeState) {
    if !state.running || state.clock_secs <= state.tuning.random_event_after_secs {
        return;
    }

    let roll = random_int(&mut state.rng, 0, 999);

    if roll >= 1000 - state.tuning.spawn_per_mille {
        let enemy = state.spawn_enemy();
        log::debug!("Spawned extra enemy at {:?}", enemy.body.pos);
        state.enemies.push(enemy);
    }

    let band = state.tuning.mutate_per_mille;
    if roll < band && !state.enemies.is_empty() {
        let idx = random_int(&mut state.rng, 0, state.enemies.len() as i32 - 1) as usize;
        if roll >= band / 2 {
            // New shape and velocity, same place
            let pos = state.enemies[idx].body.pos;
            let mut replacement = state.spawn_enemy();
            replacement.body.pos = pos;
            replacement.start = pos;
            state.enemies[idx] = replacement;
        } else {
            accelerate(&mut state.enemies[idx]);
        }
    }
}

/// Speed an enemy up by one unit per axis, keeping its direction
fn accelerate(enemy: &mut Enemy) {
    enemy.vel.x += if enemy.vel.x > 0.0 { 1.0 } else { -1.0 };
    enemy.vel.y += if enemy.vel.y > 0.0 { 1.0 } else { -1.0 };
}
