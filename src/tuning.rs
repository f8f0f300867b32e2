//! Data-driven game balance
//!
//! Every numeric policy the simulation uses lives here so a run can be
//! re-balanced from JSON without touching code. Missing fields fall back
//! to the defaults below.

use serde::{Deserialize, Serialize};

/// Gameplay tuning knobs (per-frame units, the loop has no delta time)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player physics ===
    pub gravity: f32,
    pub jump_power: f32,
    pub long_jump_power: f32,
    pub move_speed: f32,
    /// Frames of invincibility after taking damage
    pub invincibility_ticks: u32,
    /// Flicker period while invincible (frames per on/off half)
    pub flicker_ticks: u32,
    /// Vertical slack when deciding whether the owl stands on a platform
    pub platform_tolerance: f32,

    // === Progression ===
    pub base_speed: f32,
    pub speed_per_level: f32,
    pub level_threshold: u64,
    pub start_lives: u8,
    pub max_lives: u8,
    pub banner_ticks: u32,

    // === Scoring ===
    pub chip_points: u64,
    pub card_points: u64,
    pub enemy_clear_points: u64,

    // === Enemy clearance ===
    /// Horizontal slack around the tiger for a long-jump clear
    pub enemy_clear_tolerance: f32,
    /// How far above the tiger's back the feet may be and still count
    pub enemy_clear_height: f32,
    /// Gap left between owl and tiger after a knockback
    pub knockback_gap: f32,

    // === Platform eviction ===
    pub eviction_ticks: u32,
    pub eviction_warning_ticks: u32,
    pub warning_particle_interval: u32,

    // === Spawning ===
    /// Per-frame chance of a spawn attempt
    pub spawn_chance: f32,
    /// Live entity ceiling
    pub max_entities: usize,
    pub enemy_weight_base: f32,
    pub enemy_weight_per_level: f32,
    pub enemy_weight_cap: f32,
    pub book_weight: f32,
    pub table_weight: f32,
    pub fireplace_weight: f32,
    pub floating_book_weight: f32,
    pub jump_sequence_weight: f32,
    pub card_weight: f32,
    /// Number of floating books in a jump sequence
    pub jump_sequence_len: usize,

    // === Particles ===
    pub particle_life: u32,
    pub chip_burst: usize,
    pub card_burst: usize,
    pub damage_burst: usize,
    pub enemy_clear_burst: usize,
    pub long_jump_burst: usize,
    pub level_up_burst: usize,
    pub warning_burst: usize,
    pub record_burst: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.8,
            jump_power: 15.0,
            long_jump_power: 19.0,
            move_speed: 3.0,
            invincibility_ticks: 60,
            flicker_ticks: 5,
            platform_tolerance: 5.0,

            base_speed: 2.0,
            speed_per_level: 0.5,
            level_threshold: 200,
            start_lives: 3,
            max_lives: 5,
            banner_ticks: 120,

            chip_points: 10,
            card_points: 50,
            enemy_clear_points: 25,

            enemy_clear_tolerance: 15.0,
            enemy_clear_height: 60.0,
            knockback_gap: 5.0,

            eviction_ticks: 180,
            eviction_warning_ticks: 60,
            warning_particle_interval: 10,

            spawn_chance: 0.015,
            max_entities: 10,
            enemy_weight_base: 0.10,
            enemy_weight_per_level: 0.02,
            enemy_weight_cap: 0.30,
            book_weight: 0.15,
            table_weight: 0.10,
            fireplace_weight: 0.10,
            floating_book_weight: 0.08,
            jump_sequence_weight: 0.04,
            card_weight: 0.05,
            jump_sequence_len: 3,

            particle_life: 30,
            chip_burst: 5,
            card_burst: 15,
            damage_burst: 5,
            enemy_clear_burst: 10,
            long_jump_burst: 6,
            level_up_burst: 20,
            warning_burst: 3,
            record_burst: 40,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON, falling back to defaults if it is malformed
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Tuning>(json) {
            Ok(tuning) => tuning.validated(),
            Err(e) => {
                log::warn!("Ignoring malformed tuning ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Sum of the level-independent spawn shares
    pub fn fixed_spawn_weight(&self) -> f32 {
        self.book_weight
            + self.table_weight
            + self.fireplace_weight
            + self.floating_book_weight
            + self.jump_sequence_weight
            + self.card_weight
    }

    /// Clamp values into a playable range.
    ///
    /// Fixed spawn shares plus the enemy cap must leave room in `[0, 1]`;
    /// if they overflow, the fixed shares are scaled down proportionally.
    pub fn validated(mut self) -> Self {
        self.enemy_weight_cap = self.enemy_weight_cap.clamp(0.0, 1.0);
        for w in [
            &mut self.book_weight,
            &mut self.table_weight,
            &mut self.fireplace_weight,
            &mut self.floating_book_weight,
            &mut self.jump_sequence_weight,
            &mut self.card_weight,
        ] {
            *w = w.max(0.0);
        }

        let fixed = self.fixed_spawn_weight();
        let room = 1.0 - self.enemy_weight_cap;
        if fixed > room && fixed > 0.0 {
            let scale = room / fixed;
            log::warn!("Spawn weights exceed 1.0, scaling fixed shares by {scale:.3}");
            self.book_weight *= scale;
            self.table_weight *= scale;
            self.fireplace_weight *= scale;
            self.floating_book_weight *= scale;
            self.jump_sequence_weight *= scale;
            self.card_weight *= scale;
        }

        self.level_threshold = self.level_threshold.max(1);
        self.max_lives = self.max_lives.max(1);
        self.start_lives = self.start_lives.clamp(1, self.max_lives);
        self.spawn_chance = self.spawn_chance.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_leave_room_for_chips() {
        let tuning = Tuning::default();
        assert!(tuning.fixed_spawn_weight() + tuning.enemy_weight_cap <= 1.0);
    }

    #[test]
    fn test_partial_json_overrides() {
        let tuning = Tuning::from_json(r#"{ "chip_points": 15, "max_lives": 7 }"#);
        assert_eq!(tuning.chip_points, 15);
        assert_eq!(tuning.max_lives, 7);
        assert_eq!(tuning.level_threshold, 200);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        let tuning = Tuning::from_json("{ not json");
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_overflowing_weights_are_scaled() {
        let tuning = Tuning::from_json(r#"{ "book_weight": 0.9, "enemy_weight_cap": 0.5 }"#);
        assert!(tuning.fixed_spawn_weight() + tuning.enemy_weight_cap <= 1.0 + 1e-5);
        assert!(tuning.book_weight > tuning.table_weight);
    }
}
