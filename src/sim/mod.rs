//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - One tick per frame, no delta time
//! - Seeded RNG only
//! - Stable iteration order (entities kept in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{BurstKind, Rect, Resolution};
pub use entity::{Collectible, Enemy, EnemyKind, Entity, EntityKind, Eviction, Obstacle, ObstacleKind};
pub use player::{Player, PlayerStep};
pub use spawn::SpawnCategory;
pub use state::{Banner, BurstStyle, GameEvent, GamePhase, GameState, Particle, MAX_PARTICLES};
pub use tick::{FrameInput, autopilot, tick};
