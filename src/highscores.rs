//! High score leaderboard system
//!
//! Persisted as JSON through a [`KeyValueStore`], tracks the top 10 runs
//! ordered by score, then level.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::platform::KeyValueStore;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
    /// Level reached
    pub level: u32,
    /// Unix timestamp (ms) when achieved
    pub date: f64,
}

impl HighScoreEntry {
    /// Leaderboard order: higher score first, then higher level
    fn rank_cmp(&self, score: u64, level: u32) -> Ordering {
        (score, level).cmp(&(self.score, self.level))
    }
}

/// One display line of the leaderboard
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub name: String,
    pub score: u64,
    pub level: u32,
    /// Relative date, e.g. "3 mins ago"
    pub when: String,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "owl_dash_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Would this score be the best on the board?
    pub fn is_new_record(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        self.top_score().is_none_or(|top| score > top)
    }

    /// Check if a score would make it onto the leaderboard
    pub fn qualifies(&self, score: u64, level: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries
            .last()
            .is_none_or(|e| e.rank_cmp(score, level) == Ordering::Greater)
    }

    /// Get the rank a run would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u64, level: u32) -> Option<usize> {
        if !self.qualifies(score, level) {
            return None;
        }
        Some(self.insertion_index(score, level) + 1)
    }

    /// Insert a run, keep the list sorted and trimmed.
    /// Returns the rank achieved (1-indexed) or None if it fell off the end.
    pub fn save_score(&mut self, name: &str, score: u64, level: u32, date: f64) -> Option<usize> {
        let index = self.insertion_index(score, level);
        self.entries.insert(
            index,
            HighScoreEntry {
                name: name.to_string(),
                score,
                level,
                date,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);

        (index < MAX_HIGH_SCORES).then_some(index + 1)
    }

    /// Index after every entry that ranks at least as high (ties keep age order)
    fn insertion_index(&self, score: u64, level: u32) -> usize {
        self.entries
            .iter()
            .position(|e| e.rank_cmp(score, level) == Ordering::Greater)
            .unwrap_or(self.entries.len())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Display rows, best first, dated relative to `now`
    pub fn rows(&self, now: f64) -> Vec<LeaderboardRow> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| LeaderboardRow {
                rank: i + 1,
                name: e.name.clone(),
                score: e.score,
                level: e.level,
                when: format_date(e.date, now),
            })
            .collect()
    }

    /// Load from storage. Missing or malformed data means an empty board.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let Some(json) = store.get(Self::STORAGE_KEY) else {
            log::info!("No high scores found, starting fresh");
            return Self::new();
        };

        match serde_json::from_str::<HighScores>(&json) {
            Ok(mut scores) => {
                // Never trust stored order or length
                scores
                    .entries
                    .sort_by(|a, b| b.score.cmp(&a.score).then(b.level.cmp(&a.level)));
                scores.entries.truncate(MAX_HIGH_SCORES);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) => {
                log::warn!("Discarding malformed high scores: {e}");
                Self::new()
            }
        }
    }

    /// Save to storage
    pub fn save(&self, store: &mut impl KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => {
                store.set(Self::STORAGE_KEY, &json);
                log::info!("High scores saved ({} entries)", self.entries.len());
            }
            Err(e) => log::warn!("Could not encode high scores: {e}"),
        }
    }

    /// Wipe the board, in memory and in storage
    pub fn clear_stored(&mut self, store: &mut impl KeyValueStore) {
        self.clear();
        store.remove(Self::STORAGE_KEY);
    }
}

/// Format a timestamp as a relative date string
pub fn format_date(timestamp: f64, now: f64) -> String {
    let diff_mins = (now - timestamp) / 60_000.0;
    let diff_hours = diff_mins / 60.0;
    let diff_days = diff_hours / 24.0;

    if diff_days >= 1.0 {
        let days = diff_days.floor() as i64;
        match days {
            1 => "Yesterday".to_string(),
            2..=6 => format!("{days} days ago"),
            _ => format!("{} weeks ago", days / 7),
        }
    } else if diff_hours >= 1.0 {
        let hours = diff_hours.floor() as i64;
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{hours} hours ago")
        }
    } else if diff_mins >= 1.0 {
        let mins = diff_mins.floor() as i64;
        if mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{mins} mins ago")
        }
    } else {
        "Just now".to_string()
    }
}
