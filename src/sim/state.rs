//! Game state and core simulation types
//!
//! One [`GameState`] is the whole session context: no globals, so any number
//! of runs (or tests) can exist side by side.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::BurstKind;
use super::entity::Entity;
use super::player::Player;
use crate::consts::PARTICLE_GRAVITY;
use crate::tuning::Tuning;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to press start
    Idle,
    /// Active gameplay
    Running,
    /// Lives exhausted; final score frozen
    GameOver,
}

/// Things that happened during a tick, for host-side hooks (HUD, sound, logs)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped { long: bool },
    Collected { points: u64 },
    EnemyCleared { points: u64 },
    Damaged { lives_left: u8 },
    Landed { entity_id: u32 },
    Evicted { entity_id: u32 },
    LevelUp { level: u32 },
    GameOver { score: u64, level: u32 },
}

/// Particle colours (0xRRGGBB)
pub mod palette {
    pub const GOLD: u32 = 0xFFD700;
    pub const RED: u32 = 0xFF0000;
    pub const ORANGE: u32 = 0xFFA500;
    pub const PURPLE: u32 = 0x9B59B6;
    pub const CYAN: u32 = 0x00E5FF;
    pub const WHITE: u32 = 0xFFFFFF;
    pub const EMBER: u32 = 0xFF4500;
    pub const MAGIC: [u32; 4] = [PURPLE, CYAN, GOLD, WHITE];
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    /// Frames left; removed at zero
    pub life: u32,
    pub max_life: u32,
    pub size: f32,
}

impl Particle {
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.life = self.life.saturating_sub(1);
    }

    /// Fade-out alpha in `[0, 1]`
    pub fn opacity(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.life as f32 / self.max_life as f32
    }
}

/// Default particle ceiling when no settings are applied
pub const MAX_PARTICLES: usize = 512;

/// Shape of a particle burst
#[derive(Debug, Clone, Copy)]
pub struct BurstStyle {
    pub colors: &'static [u32],
    /// Max absolute initial speed on each axis
    pub spread: f32,
    /// Extra upward kick
    pub lift: f32,
    /// Lifetime multiplier over the tuning's base life
    pub life_scale: f32,
    pub size: f32,
}

impl BurstStyle {
    pub const CHIP: Self = Self::plain(&[palette::GOLD]);
    pub const DAMAGE: Self = Self::plain(&[palette::RED]);
    pub const WARNING: Self = Self::plain(&[palette::EMBER]);
    pub const CARD: Self = Self {
        colors: &palette::MAGIC,
        spread: 4.0,
        lift: 1.0,
        life_scale: 1.5,
        size: 3.0,
    };
    pub const ENEMY_CLEARED: Self = Self {
        colors: &[palette::ORANGE, palette::WHITE],
        spread: 3.0,
        lift: 1.5,
        life_scale: 1.0,
        size: 3.0,
    };
    pub const LONG_JUMP: Self = Self {
        colors: &[palette::CYAN, palette::WHITE],
        spread: 1.5,
        lift: -1.0,
        life_scale: 0.6,
        size: 2.0,
    };
    pub const LEVEL_UP: Self = Self {
        colors: &palette::MAGIC,
        spread: 5.0,
        lift: 2.0,
        life_scale: 2.0,
        size: 3.0,
    };
    pub const RECORD: Self = Self {
        colors: &[palette::GOLD, palette::ORANGE, palette::WHITE],
        spread: 6.0,
        lift: 3.0,
        life_scale: 3.0,
        size: 4.0,
    };

    const fn plain(colors: &'static [u32]) -> Self {
        Self {
            colors,
            spread: 2.0,
            lift: 0.0,
            life_scale: 1.0,
            size: 2.0,
        }
    }

    pub fn for_kind(kind: BurstKind) -> Self {
        match kind {
            BurstKind::Chip => Self::CHIP,
            BurstKind::Card => Self::CARD,
            BurstKind::Damage => Self::DAMAGE,
            BurstKind::EnemyCleared => Self::ENEMY_CLEARED,
        }
    }
}

/// On-screen "Level N" banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub level: u32,
    pub ticks_left: u32,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    pub level: u32,
    pub lives: u8,
    /// Current scroll speed (derived from level)
    pub speed: f32,
    pub player: Player,
    /// Live entities, oldest first
    pub entities: Vec<Entity>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub particle_cap: usize,
    pub banner: Option<Banner>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised during the most recent tick
    pub events: Vec<GameEvent>,
    pub(super) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create an idle session with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.validated();
        Self {
            seed,
            phase: GamePhase::Idle,
            score: 0,
            level: 1,
            lives: tuning.start_lives,
            speed: tuning.base_speed,
            player: Player::default(),
            entities: Vec::new(),
            particles: Vec::new(),
            particle_cap: MAX_PARTICLES,
            banner: None,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        }
    }

    /// Enter `Running` with a fresh run
    pub fn start(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.score = 0;
        self.level = 1;
        self.lives = self.tuning.start_lives;
        self.speed = self.tuning.base_speed;
        self.player = Player::default();
        self.entities.clear();
        self.particles.clear();
        self.banner = None;
        self.time_ticks = 0;
        self.events.clear();
        self.next_id = 1;
        self.phase = GamePhase::Running;
        log::info!("Run started (seed {seed})");
    }

    /// Back to `Idle`, dropping everything from the last run
    pub fn reset(&mut self) {
        let seed = self.seed;
        let tuning = self.tuning.clone();
        let cap = self.particle_cap;
        *self = Self::new(seed, tuning);
        self.particle_cap = cap;
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an entity, assigning it an ID
    pub fn add_entity(&mut self, mut entity: Entity) -> u32 {
        entity.id = self.next_entity_id();
        let id = entity.id;
        self.entities.push(entity);
        id
    }

    pub fn entity(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Level for a score: `floor(score / threshold) + 1`
    pub fn level_for_score(&self, score: u64) -> u32 {
        (score / self.tuning.level_threshold) as u32 + 1
    }

    /// Scroll speed for a level
    pub fn speed_for_level(&self, level: u32) -> f32 {
        self.tuning.base_speed + (level.saturating_sub(1)) as f32 * self.tuning.speed_per_level
    }

    /// Add points and handle any level-ups they cause
    pub fn award(&mut self, points: u64) {
        self.score += points;
        let new_level = self.level_for_score(self.score);
        if new_level <= self.level {
            return;
        }

        let gained = new_level - self.level;
        let lives = self.lives as u32 + gained;
        self.lives = lives.min(self.tuning.max_lives as u32) as u8;
        self.level = new_level;
        self.speed = self.speed_for_level(new_level);
        self.banner = Some(Banner {
            level: new_level,
            ticks_left: self.tuning.banner_ticks,
        });
        let at = self.player.bounds().center();
        self.burst(at, self.tuning.level_up_burst, BurstStyle::LEVEL_UP);
        self.events.push(GameEvent::LevelUp { level: new_level });
        log::info!("Level up! level {} (lives {}, speed {})", self.level, self.lives, self.speed);
    }

    /// Remove a life. Returns true if that was the last one.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::Damaged { lives_left: self.lives });
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver {
                score: self.score,
                level: self.level,
            });
            log::info!("Game over: score {}, level {}", self.score, self.level);
            return true;
        }
        false
    }

    /// Emit `count` particles at `at`, respecting the particle cap
    pub fn burst(&mut self, at: Vec2, count: usize, style: BurstStyle) {
        let base_life = self.tuning.particle_life;
        for i in 0..count {
            if self.particles.len() >= self.particle_cap {
                break;
            }
            let vel = Vec2::new(
                self.rng.random_range(-style.spread..=style.spread),
                self.rng.random_range(-style.spread..=style.spread) - style.lift,
            );
            let life = ((base_life as f32 * style.life_scale) as u32).max(1);
            self.particles.push(Particle {
                pos: at,
                vel,
                color: style.colors[i % style.colors.len()],
                life,
                max_life: life,
                size: style.size,
            });
        }
    }
}
