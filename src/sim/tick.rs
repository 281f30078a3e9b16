//! Fixed timestep simulation tick
//!
//! Advances the round by one nominal 16 ms frame. Step order matters and is
//! load-bearing: movement, auto-fire, spawning, bullet/enemy/boss advance,
//! then collision resolution, then particle decay.

use glam::Vec2;

use super::spawn::{spawn_boss, spawn_enemy};
use super::state::{EnemyBullet, GameEvent, GamePhase, GameState, PlayerBullet};
use crate::consts::*;
use crate::{angle_to, rand_range};

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Held movement keys
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Pointer position in canvas coordinates; auto-fire aims here
    pub pointer: Vec2,
}

/// Advance the game state by one frame and report what happened.
///
/// A no-op unless the round is in `Playing` phase, so UI overlays pause the
/// simulation by setting the phase rather than by being scanned for.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase != GamePhase::Playing {
        return events;
    }

    // Decay screen shake from last frame's bursts
    state.screen_shake = (state.screen_shake - SHAKE_DECAY).max(0.0);

    // --- PLAYER MOVEMENT ---
    let p = &mut state.player;
    if input.left {
        p.pos.x -= p.speed;
    }
    if input.right {
        p.pos.x += p.speed;
    }
    if input.up {
        p.pos.y -= p.speed;
    }
    if input.down {
        p.pos.y += p.speed;
    }
    let max_x = (state.playfield.x - p.size.x - PLAYFIELD_MARGIN).max(PLAYFIELD_MARGIN);
    let max_y = (state.playfield.y - p.size.y - PLAYFIELD_MARGIN).max(PLAYFIELD_MARGIN);
    p.pos.x = p.pos.x.clamp(PLAYFIELD_MARGIN, max_x);
    p.pos.y = p.pos.y.clamp(PLAYFIELD_MARGIN, max_y);

    let player_center = state.player.bounds().center();

    // --- AUTO-FIRE ---
    state.since_last_shot_ms += FRAME_DT_MS;
    if state.since_last_shot_ms >= SHOT_COOLDOWN_MS {
        state.since_last_shot_ms = 0.0;
        let ang = angle_to(player_center, input.pointer);
        state.bullets.push(PlayerBullet {
            pos: player_center,
            vel: Vec2::from_angle(ang) * PLAYER_BULLET_SPEED,
            color: state.character.bullet_color(),
        });
    }

    // --- ENEMY SPAWN ---
    // Suspended for the whole boss phase
    state.since_last_spawn_ms += FRAME_DT_MS;
    if state.boss.is_none() && state.since_last_spawn_ms > SPAWN_INTERVAL_MS {
        spawn_enemy(state);
        state.since_last_spawn_ms = 0.0;
    }

    // --- PLAYER BULLETS ---
    for b in &mut state.bullets {
        b.pos += b.vel;
    }
    let width = state.playfield.x;
    state
        .bullets
        .retain(|b| b.pos.x > -PLAYER_BULLET_BOUND && b.pos.x < width + PLAYER_BULLET_BOUND);

    // --- ENEMIES: advance and fire ---
    for e in state.enemies.iter_mut() {
        e.pos.x -= e.speed;

        e.fire_timer_ms -= FRAME_DT_MS;
        if e.fire_timer_ms <= 0.0 {
            let from = e.bounds().center();
            let ang = angle_to(from, player_center);
            state.enemy_bullets.push(EnemyBullet {
                pos: from,
                vel: Vec2::from_angle(ang) * ENEMY_BULLET_SPEED,
                radius: ENEMY_BULLET_RADIUS,
            });
            e.fire_timer_ms = rand_range(&mut state.rng, ENEMY_REFIRE_MIN_MS, ENEMY_REFIRE_MAX_MS);
        }
    }
    state.enemies.retain(|e| e.pos.x > ENEMY_EXIT_BOUND);

    // --- BOSS SPAWN ---
    if state.boss.is_none() && state.kills >= BOSS_KILL_THRESHOLD {
        spawn_boss(state);
        events.push(GameEvent::BossSpawned);
    }

    // --- BOSS BEHAVIOR ---
    if let Some(boss) = state.boss.as_mut() {
        boss.pos.y += boss.vy;
        if boss.pos.y < BOSS_BAND_TOP
            || boss.pos.y > state.playfield.y - BOSS_BAND_BOTTOM_MARGIN
        {
            boss.vy = -boss.vy;
        }

        boss.fire_timer_ms -= FRAME_DT_MS;
        if boss.fire_timer_ms <= 0.0 {
            let from = boss.bounds().center();
            let ang = angle_to(from, player_center);
            for step in -2i32..=2 {
                let a = ang + step as f32 * BOSS_FAN_STEP;
                state.enemy_bullets.push(EnemyBullet {
                    pos: from,
                    vel: Vec2::from_angle(a) * BOSS_BULLET_SPEED,
                    radius: BOSS_BULLET_RADIUS,
                });
            }
            boss.fire_timer_ms = BOSS_FIRE_INTERVAL_MS;
        }
    }

    // --- ENEMY BULLETS: advance, hit player, cull ---
    let player_rect = state.player.bounds();
    let bounds = state.playfield;
    let mut player_hits = 0u32;
    state.enemy_bullets.retain_mut(|b| {
        b.pos += b.vel;
        if player_rect.contains(b.pos) {
            player_hits += 1;
            return false;
        }
        b.pos.x > -ENEMY_BULLET_BOUND
            && b.pos.x < bounds.x + ENEMY_BULLET_BOUND
            && b.pos.y > -ENEMY_BULLET_BOUND
            && b.pos.y < bounds.y + ENEMY_BULLET_BOUND
    });
    for _ in 0..player_hits {
        let at = state.player.pos + state.player.size * 0.5;
        state.spawn_burst(at, EXPLOSION_LARGE);
        if state.lives > 0 {
            state.lives -= 1;
            events.push(GameEvent::PlayerHit {
                lives_left: state.lives,
            });
            if state.lives == 0 {
                state.phase = GamePhase::GameOver;
                events.push(GameEvent::GameOver { score: state.score });
            }
        }
    }

    // --- PLAYER BULLET COLLISIONS ---
    // Single pass, first match wins: enemies in reverse index order, then the
    // boss. Unmatched bullets survive to the next frame.
    let bullets = std::mem::take(&mut state.bullets);
    let mut surviving = Vec::with_capacity(bullets.len());
    for b in bullets {
        let mut hit = false;

        for i in (0..state.enemies.len()).rev() {
            if state.enemies[i].bounds().contains(b.pos) {
                hit = true;
                state.enemies[i].hp = state.enemies[i].hp.saturating_sub(1);
                if state.enemies[i].hp == 0 {
                    state.enemies.remove(i);
                    state.kills += 1;
                    state.score += KILL_SCORE;
                }
                state.spawn_burst(b.pos, EXPLOSION_SMALL);
                break;
            }
        }

        if !hit {
            let mut boss_down_at = None;
            if let Some(boss) = state.boss.as_mut() {
                if boss.bounds().contains(b.pos) {
                    hit = true;
                    boss.hp = boss.hp.saturating_sub(1);
                    if boss.hp == 0 {
                        boss_down_at = Some(boss.bounds().center());
                    }
                }
            }
            if hit {
                state.spawn_burst(b.pos, EXPLOSION_MEDIUM);
            }
            if let Some(center) = boss_down_at {
                state.spawn_burst(center, EXPLOSION_BOSS);
                state.boss = None;
                state.phase = GamePhase::Victory;
                events.push(GameEvent::Victory { score: state.score });
            }
        }

        if !hit {
            surviving.push(b);
        }
    }
    state.bullets = surviving;

    // --- EXPLOSION PARTICLES ---
    for particle in &mut state.explosions {
        particle.pos += particle.vel;
        particle.life -= PARTICLE_DECAY;
    }
    state.explosions.retain(|p| p.life > 0.0);

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Character;

    fn playing_state() -> GameState {
        GameState::new(3, Character::Sunny, Vec2::new(1280.0, 720.0))
    }

    #[test]
    fn test_tick_noop_outside_playing() {
        let mut state = playing_state();
        state.phase = GamePhase::Menu;
        let before = state.player.pos;
        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.player.pos, before);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_first_frame_fires_and_spawns() {
        let mut state = playing_state();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_bullet_aimed_at_pointer() {
        let mut state = playing_state();
        let input = TickInput {
            pointer: Vec2::new(2000.0, state.player.bounds().center().y),
            ..Default::default()
        };
        tick(&mut state, &input);
        let b = &state.bullets[0];
        // Pointer dead right of the player: pure horizontal velocity
        assert!((b.vel.x - PLAYER_BULLET_SPEED).abs() < 1e-4);
        assert!(b.vel.y.abs() < 1e-4);
        assert_eq!(b.color, "#FFA500");
    }

    #[test]
    fn test_screen_shake_decays_to_zero() {
        let mut state = playing_state();
        state.screen_shake = SHAKE_KICK;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.screen_shake, SHAKE_KICK - SHAKE_DECAY);
        for _ in 0..20 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.screen_shake, 0.0);
    }
}
