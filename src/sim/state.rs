//! Game state and core simulation types
//!
//! Every entity lives in exactly one container on `GameState`; the renderer
//! only ever borrows the whole state immutably.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::consts::*;
use crate::rand_range;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// A UI overlay is visible; the simulation is held
    Menu,
    /// Active gameplay
    Playing,
    /// Lives reached zero
    GameOver,
    /// Boss defeated
    Victory,
}

/// Playable character, chosen on the character-select screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Character {
    #[default]
    Sunny,
    Coral,
}

impl Character {
    /// CSS color of this character's bullets
    pub fn bullet_color(&self) -> &'static str {
        match self {
            Character::Sunny => "#FFA500",
            Character::Coral => "#FF69B4",
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Player {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A bullet fired by the player's auto-fire
#[derive(Debug, Clone, Copy)]
pub struct PlayerBullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: &'static str,
}

/// An ordinary enemy, drifting in from the right
#[derive(Debug, Clone, Copy)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub hp: u32,
    /// Counts down each frame; firing resets it to a random interval
    pub fire_timer_ms: f32,
}

impl Enemy {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A bullet fired by an enemy or the boss
#[derive(Debug, Clone, Copy)]
pub struct EnemyBullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// The boss, spawned once per round at the kill threshold
#[derive(Debug, Clone, Copy)]
pub struct Boss {
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: u32,
    /// Vertical velocity; sign flips at the band edges
    pub vy: f32,
    pub fire_timer_ms: f32,
}

impl Boss {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// One particle of an explosion burst; life runs 1 -> 0
#[derive(Debug, Clone, Copy)]
pub struct ExplosionParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub life: f32,
}

/// Notable happenings within a tick, consumed by the UI glue
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    BossSpawned,
    /// An enemy bullet struck the player
    PlayerHit { lives_left: u32 },
    /// Lives reached zero; score is frozen at this value
    GameOver { score: u64 },
    /// Boss defeated
    Victory { score: u64 },
}

/// Complete round state, owned by the simulation
#[derive(Debug, Clone)]
pub struct GameState {
    /// Round seed for reproducibility
    pub seed: u64,
    /// Playfield dimensions (canvas pixels)
    pub playfield: Vec2,
    pub phase: GamePhase,
    pub character: Character,

    pub player: Player,
    pub bullets: Vec<PlayerBullet>,
    pub enemies: Vec<Enemy>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub explosions: Vec<ExplosionParticle>,
    pub boss: Option<Boss>,

    pub lives: u32,
    pub score: u64,
    pub kills: u32,

    /// Elapsed since the last player shot; primed so the first frame fires
    pub since_last_shot_ms: f32,
    /// Elapsed since the last enemy spawn; primed so the first frame spawns
    pub since_last_spawn_ms: f32,
    /// Render-only camera offset magnitude, decayed each tick
    pub screen_shake: f32,

    pub rng: Pcg32,
}

impl GameState {
    /// Start a fresh round
    pub fn new(seed: u64, character: Character, playfield: Vec2) -> Self {
        Self {
            seed,
            playfield,
            phase: GamePhase::Playing,
            character,
            player: Player {
                pos: Vec2::new(PLAYER_START_X, playfield.y - PLAYER_START_BOTTOM_OFFSET),
                size: Vec2::new(PLAYER_SIZE.0, PLAYER_SIZE.1),
                speed: PLAYER_SPEED,
            },
            bullets: Vec::new(),
            enemies: Vec::new(),
            enemy_bullets: Vec::new(),
            explosions: Vec::new(),
            boss: None,
            lives: START_LIVES,
            score: 0,
            kills: 0,
            since_last_shot_ms: SHOT_COOLDOWN_MS,
            since_last_spawn_ms: SPAWN_INTERVAL_MS,
            screen_shake: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Spawn a ring of explosion particles at `at` and kick the screen shake
    pub fn spawn_burst(&mut self, at: Vec2, size: f32) {
        for i in 0..BURST_PARTICLES {
            let ang = std::f32::consts::TAU * (i as f32 / BURST_PARTICLES as f32);
            let speed = rand_range(&mut self.rng, PARTICLE_SPEED_MIN, PARTICLE_SPEED_MAX);
            self.explosions.push(ExplosionParticle {
                pos: at,
                vel: Vec2::from_angle(ang) * speed,
                size,
                life: 1.0,
            });
        }
        self.screen_shake = SHAKE_KICK;
    }
}
