//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (16 ms nominal frame)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use spawn::{spawn_boss, spawn_enemy};
pub use state::{
    Boss, Character, Enemy, EnemyBullet, ExplosionParticle, GameEvent, GamePhase, GameState,
    Player, PlayerBullet,
};
pub use tick::{TickInput, tick};
