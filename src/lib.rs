//! Reef Rush - a top-down arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, the per-frame tick)
//! - `renderer`: Canvas 2D rendering (wasm only)
//! - `assets`: Image loading with an explicit ready point (wasm only)
//! - `settings`: User preferences persisted to LocalStorage

pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod assets;
#[cfg(target_arch = "wasm32")]
pub mod renderer;

pub use settings::Settings;

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Nominal frame delta; all timers advance by this per tick
    pub const FRAME_DT_MS: f32 = 16.0;

    /// Playfield edge margin the player is clamped inside
    pub const PLAYFIELD_MARGIN: f32 = 10.0;
    /// Height of the ground strip along the bottom of the playfield
    pub const GROUND_HEIGHT: f32 = 80.0;

    /// Player defaults
    pub const PLAYER_SIZE: (f32, f32) = (60.0, 72.0);
    pub const PLAYER_SPEED: f32 = 6.0;
    pub const PLAYER_START_X: f32 = 120.0;
    /// Player spawns this far above the bottom edge
    pub const PLAYER_START_BOTTOM_OFFSET: f32 = 150.0;
    pub const START_LIVES: u32 = 3;

    /// Auto-fire cadence and bullet kinematics
    pub const SHOT_COOLDOWN_MS: f32 = 220.0;
    pub const PLAYER_BULLET_SPEED: f32 = 20.0;
    /// Player bullets are culled this far beyond the horizontal bounds
    pub const PLAYER_BULLET_BOUND: f32 = 200.0;
    pub const PLAYER_BULLET_HALF: f32 = 5.0;

    /// Enemy spawning and behavior
    pub const SPAWN_INTERVAL_MS: f32 = 900.0;
    pub const ENEMY_SIZE: f32 = 55.0;
    /// Enemies enter this far beyond the right edge
    pub const ENEMY_SPAWN_LEAD: f32 = 80.0;
    pub const ENEMY_BAND_TOP: f32 = 120.0;
    pub const ENEMY_BAND_BOTTOM_MARGIN: f32 = 200.0;
    pub const ENEMY_SPEED_MIN: f32 = 2.0;
    pub const ENEMY_SPEED_MAX: f32 = 3.0;
    pub const ENEMY_FIRE_MIN_MS: f32 = 700.0;
    pub const ENEMY_FIRE_MAX_MS: f32 = 2000.0;
    pub const ENEMY_REFIRE_MIN_MS: f32 = 900.0;
    pub const ENEMY_REFIRE_MAX_MS: f32 = 1700.0;
    pub const ENEMY_BULLET_SPEED: f32 = 5.0;
    pub const ENEMY_BULLET_RADIUS: f32 = 7.0;
    /// Enemies leaving the playfield are dropped past this x
    pub const ENEMY_EXIT_BOUND: f32 = -200.0;
    /// Enemy bullets are culled outside bounds expanded by this margin
    pub const ENEMY_BULLET_BOUND: f32 = 80.0;

    /// Boss phase
    pub const BOSS_KILL_THRESHOLD: u32 = 20;
    pub const BOSS_SIZE: (f32, f32) = (130.0, 210.0);
    pub const BOSS_HP: u32 = 50;
    pub const BOSS_VERTICAL_SPEED: f32 = 2.0;
    /// Boss spawns this far left of the right edge
    pub const BOSS_X_OFFSET: f32 = 280.0;
    /// Boss spawns this far above the vertical midpoint
    pub const BOSS_START_Y_OFFSET: f32 = 130.0;
    pub const BOSS_BAND_TOP: f32 = 60.0;
    pub const BOSS_BAND_BOTTOM_MARGIN: f32 = 280.0;
    pub const BOSS_FIRE_INTERVAL_MS: f32 = 1500.0;
    /// Angular step between fan bullets (5 bullets, offsets -2..=2)
    pub const BOSS_FAN_STEP: f32 = 0.18;
    pub const BOSS_BULLET_SPEED: f32 = 6.0;
    pub const BOSS_BULLET_RADIUS: f32 = 12.0;

    /// Explosion bursts
    pub const BURST_PARTICLES: u32 = 20;
    pub const PARTICLE_SPEED_MIN: f32 = 3.0;
    pub const PARTICLE_SPEED_MAX: f32 = 9.0;
    /// Particle life decay per frame (life runs 1 -> 0)
    pub const PARTICLE_DECAY: f32 = 0.03;
    pub const EXPLOSION_SMALL: f32 = 20.0;
    pub const EXPLOSION_MEDIUM: f32 = 26.0;
    pub const EXPLOSION_LARGE: f32 = 40.0;
    pub const EXPLOSION_BOSS: f32 = 120.0;
    /// Screen shake magnitude set by a burst, decayed per frame
    pub const SHAKE_KICK: f32 = 8.0;
    pub const SHAKE_DECAY: f32 = 0.7;

    pub const KILL_SCORE: u64 = 10;
}

/// Angle (radians) of the ray from `from` toward `to`
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Uniform random f32 in [lo, hi)
#[inline]
pub fn rand_range<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    rng.random_range(lo..hi)
}
