//! Run lifecycle
//!
//! `Idle -> Running -> GameOver -> Idle`. The session owns the simulation
//! state, the held-key set, and the leaderboard hand-off at game over.

use crate::highscores::{HighScores, LeaderboardRow};
use crate::platform::{HeldKeys, KeyValueStore};
use crate::settings::{QualityPreset, Settings};
use crate::sim::{BurstStyle, GameEvent, GamePhase, GameState, tick};
use crate::tuning::Tuning;

/// Values shown in the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u64,
    pub lives: u8,
    pub level: u32,
}

/// Frozen result of a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub name: String,
    pub score: u64,
    pub level: u32,
    pub new_record: bool,
    /// Leaderboard position, if the run made the board
    pub rank: Option<usize>,
}

/// A player's sessions against one storage backend
pub struct Session<S: KeyValueStore> {
    pub state: GameState,
    pub settings: Settings,
    pub high_scores: HighScores,
    pub keys: HeldKeys,
    /// Result of the last finished run
    pub summary: Option<RunSummary>,
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    /// Load settings and leaderboard from `store`
    pub fn new(store: S, tuning: Tuning) -> Self {
        let settings = Settings::load(&store);
        let high_scores = HighScores::load(&store);
        let mut state = GameState::new(0, tuning);
        state.particle_cap = settings.max_particles();
        Self {
            state,
            settings,
            high_scores,
            keys: HeldKeys::new(),
            summary: None,
            store,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Start a run (from Idle or straight from GameOver)
    pub fn start(&mut self, name: &str, seed: u64) {
        if self.state.phase == GamePhase::GameOver {
            self.reset();
        }
        self.settings.player_name = name.trim().to_string();
        self.settings.save(&mut self.store);

        self.keys.clear();
        self.summary = None;
        self.state.particle_cap = self.settings.max_particles();
        self.state.start(seed);
        log::info!("{} takes flight", self.settings.display_name());
    }

    /// Back to Idle
    pub fn reset(&mut self) {
        self.state.reset();
        self.state.particle_cap = self.settings.max_particles();
        self.keys.clear();
    }

    /// Keys only register while a run is live
    pub fn key_down(&mut self, code: &str) {
        if self.is_running() {
            self.keys.key_down(code);
        }
    }

    pub fn key_up(&mut self, code: &str) {
        if self.is_running() {
            self.keys.key_up(code);
        }
    }

    /// Advance one frame using the current held keys. `now_ms` stamps the
    /// leaderboard entry if the run ends this frame.
    pub fn frame(&mut self, now_ms: f64) {
        let input = self.keys.sample();
        tick(&mut self.state, &input);

        let ended = self
            .state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. }));
        if ended {
            self.finish(now_ms);
        }
    }

    /// Freeze the result and hand it to the leaderboard
    fn finish(&mut self, now_ms: f64) {
        let name = self.settings.display_name().to_string();
        let score = self.state.score;
        let level = self.state.level;

        let new_record = self.high_scores.is_new_record(score);
        let rank = self.high_scores.save_score(&name, score, level, now_ms);
        self.high_scores.save(&mut self.store);

        if new_record {
            log::info!("New record by {name}: {score} (level {level})");
            let at = self.state.player.bounds().center();
            let count = self.state.tuning.record_burst;
            self.state.burst(at, count, BurstStyle::RECORD);
        }

        self.summary = Some(RunSummary {
            name,
            score,
            level,
            new_record,
            rank,
        });
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.state.score,
            lives: self.state.lives,
            level: self.state.level,
        }
    }

    /// Leaderboard position the current run would take if it ended now
    pub fn pace_rank(&self) -> Option<usize> {
        self.high_scores
            .potential_rank(self.state.score, self.state.level)
    }

    pub fn leaderboard(&self, now_ms: f64) -> Vec<LeaderboardRow> {
        self.high_scores.rows(now_ms)
    }

    /// Switch quality preset; takes effect on the particle cap immediately
    pub fn set_quality(&mut self, preset: QualityPreset) {
        self.settings.quality = preset;
        self.state.particle_cap = self.settings.max_particles();
        self.state.particles.truncate(self.state.particle_cap);
        self.settings.save(&mut self.store);
        log::info!("Quality set to {}", preset.as_str());
    }

    /// Wipe the stored leaderboard
    pub fn clear_leaderboard(&mut self) {
        self.high_scores.clear_stored(&mut self.store);
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;
    use crate::sim::spawn::fireplace;

    fn session() -> Session<MemoryStore> {
        let tuning = Tuning {
            spawn_chance: 0.0,
            ..Tuning::default()
        };
        Session::new(MemoryStore::new(), tuning)
    }

    /// Put a fireplace on the owl and run until the last life is gone
    fn lose_run(session: &mut Session<MemoryStore>) {
        for _ in 0..500 {
            if !session.is_running() {
                return;
            }
            session.state.player.invincible_ticks = 0;
            let x = session.state.player.pos.x + 10.0;
            session.state.add_entity(fireplace(x));
            session.frame(1000.0);
        }
    }

    #[test]
    fn test_starts_idle() {
        let session = session();
        assert_eq!(session.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_start_resets_and_clears_keys() {
        let mut session = session();
        session.start("Hedwig", 1);
        session.key_down("Space");
        session.state.award(300);
        session.start("Hedwig", 2);
        assert_eq!(session.phase(), GamePhase::Running);
        assert_eq!(session.hud(), Hud { score: 0, lives: 3, level: 1 });
        assert!(!session.keys.sample().jump);
    }

    #[test]
    fn test_keys_ignored_when_not_running() {
        let mut session = session();
        session.key_down("Space");
        assert!(!session.keys.is_held("Space"));
    }

    #[test]
    fn test_game_over_submits_record() {
        let mut session = session();
        session.start("Hedwig", 7);
        session.state.award(120);
        lose_run(&mut session);

        assert_eq!(session.phase(), GamePhase::GameOver);
        let summary = session.summary.clone().expect("run should be summarised");
        assert_eq!(summary.score, 120);
        assert_eq!(summary.name, "Hedwig");
        assert!(summary.new_record);
        assert_eq!(summary.rank, Some(1));
        assert!(!session.state.particles.is_empty());

        // Persisted
        let stored = HighScores::load(session.store());
        assert_eq!(stored.top_score(), Some(120));
    }

    #[test]
    fn test_lower_score_is_not_a_record() {
        let mut session = session();
        session.start("A", 1);
        session.state.award(150);
        lose_run(&mut session);

        session.start("B", 2);
        session.state.award(40);
        lose_run(&mut session);

        let summary = session.summary.clone();
        assert_eq!(summary.as_ref().map(|s| s.new_record), Some(false));
        assert_eq!(summary.and_then(|s| s.rank), Some(2));
        assert_eq!(session.high_scores.entries.len(), 2);
    }

    #[test]
    fn test_blank_name_is_anonymous() {
        let mut session = session();
        session.start("   ", 3);
        session.state.award(10);
        lose_run(&mut session);
        assert_eq!(session.high_scores.entries[0].name, "Anonymous");
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut session = session();
        session.start("A", 1);
        lose_run(&mut session);
        session.reset();
        assert_eq!(session.phase(), GamePhase::Idle);
        assert!(session.state.entities.is_empty());
    }

    #[test]
    fn test_pace_rank_tracks_score() {
        let mut session = session();
        session.start("A", 1);
        session.state.award(150);
        lose_run(&mut session);

        session.start("B", 2);
        assert_eq!(session.pace_rank(), None);
        session.state.award(40);
        assert_eq!(session.pace_rank(), Some(2));
        session.state.award(150);
        assert_eq!(session.pace_rank(), Some(1));
    }

    #[test]
    fn test_set_quality_caps_particles_and_persists() {
        let mut session = session();
        session.start("A", 1);
        session.state.burst(glam::Vec2::ZERO, 200, BurstStyle::CHIP);
        assert_eq!(session.state.particles.len(), 200);

        session.set_quality(QualityPreset::Low);
        assert_eq!(session.state.particles.len(), 64);
        assert_eq!(session.state.particle_cap, 64);
        assert_eq!(Settings::load(session.store()).quality, QualityPreset::Low);
    }

    #[test]
    fn test_leaderboard_rows() {
        let mut session = session();
        session.start("Hedwig", 1);
        session.state.award(30);
        lose_run(&mut session);

        let rows = session.leaderboard(1000.0);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Hedwig");
        assert_eq!(rows[0].when, "Just now");
    }

    #[test]
    fn test_clear_leaderboard() {
        let mut session = session();
        session.start("A", 1);
        session.state.award(10);
        lose_run(&mut session);
        session.clear_leaderboard();
        assert!(session.high_scores.is_empty());
        assert!(HighScores::load(session.store()).is_empty());
    }
}
