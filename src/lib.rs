//! Owl Dash - A side-scrolling wizard owl runner
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (player, entities, collisions, progression)
//! - `session`: Run lifecycle and leaderboard hand-off
//! - `renderer`: Projection of game state to coloured quads
//! - `platform`: Browser/native input and storage abstraction
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScores, LeaderboardRow};
pub use session::{Hud, RunSummary, Session};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (canvas pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 400.0;
    /// Y of the floor surface; everything standing on the floor has its bottom here
    pub const GROUND_LINE: f32 = 320.0;

    /// Player (wizard owl) defaults
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;

    /// New entities appear this far past the right edge
    pub const SPAWN_MARGIN: f32 = 50.0;

    /// Obstacle dimensions
    pub const BOOK_WIDTH: f32 = 30.0;
    pub const BOOK_HEIGHT: f32 = 20.0;
    pub const FLOATING_BOOK_WIDTH: f32 = 70.0;
    pub const FLOATING_BOOK_HEIGHT: f32 = 15.0;
    pub const TABLE_WIDTH: f32 = 60.0;
    pub const TABLE_HEIGHT: f32 = 50.0;
    pub const FIREPLACE_WIDTH: f32 = 40.0;
    pub const FIREPLACE_HEIGHT: f32 = 70.0;

    /// Armoured tiger
    pub const TIGER_WIDTH: f32 = 50.0;
    pub const TIGER_HEIGHT: f32 = 60.0;

    /// Collectibles
    pub const CHIP_WIDTH: f32 = 20.0;
    pub const CHIP_HEIGHT: f32 = 15.0;
    pub const CARD_WIDTH: f32 = 20.0;
    pub const CARD_HEIGHT: f32 = 30.0;
    /// Number of distinct tarot symbols
    pub const CARD_SYMBOLS: u8 = 5;

    /// Particle gravity (pixels per frame²)
    pub const PARTICLE_GRAVITY: f32 = 0.1;
}

/// Advance a looping animation phase, wrapping back into `[0, period)`
#[inline]
pub fn advance_phase(phase: f32, step: f32, period: f32) -> f32 {
    let next = phase + step;
    if next >= period { next - period } else { next }
}
