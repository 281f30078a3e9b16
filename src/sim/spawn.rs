//! Enemy and boss spawning
//!
//! Spawn policy is mutually exclusive: ordinary enemies only while no boss
//! is alive, the boss exactly once per round at the kill threshold.

use glam::Vec2;

use super::state::{Boss, Enemy, GameState};
use crate::consts::*;
use crate::rand_range;

/// Append a new enemy just beyond the right edge, at a random height inside
/// the safe vertical band.
pub fn spawn_enemy(state: &mut GameState) {
    let y_lo = ENEMY_BAND_TOP;
    let y_hi = (state.playfield.y - ENEMY_BAND_BOTTOM_MARGIN).max(y_lo + 1.0);
    let y = rand_range(&mut state.rng, y_lo, y_hi);
    let speed = rand_range(&mut state.rng, ENEMY_SPEED_MIN, ENEMY_SPEED_MAX);
    let fire_timer_ms = rand_range(&mut state.rng, ENEMY_FIRE_MIN_MS, ENEMY_FIRE_MAX_MS);

    state.enemies.push(Enemy {
        pos: Vec2::new(state.playfield.x + ENEMY_SPAWN_LEAD, y),
        size: Vec2::splat(ENEMY_SIZE),
        speed,
        hp: 1,
        fire_timer_ms,
    });
}

/// Place the boss near the right edge, vertically centered.
///
/// Callers must ensure no boss is already alive; the tick only invokes this
/// when `state.boss` is `None` and `kills` has reached the threshold.
pub fn spawn_boss(state: &mut GameState) {
    state.boss = Some(Boss {
        pos: Vec2::new(
            state.playfield.x - BOSS_X_OFFSET,
            state.playfield.y / 2.0 - BOSS_START_Y_OFFSET,
        ),
        size: Vec2::new(BOSS_SIZE.0, BOSS_SIZE.1),
        hp: BOSS_HP,
        vy: BOSS_VERTICAL_SPEED,
        fire_timer_ms: BOSS_FIRE_INTERVAL_MS,
    });
}
