//! Game settings and preferences
//!
//! Persisted separately from the leaderboard under their own storage key.

use serde::{Deserialize, Serialize};

use crate::platform::KeyValueStore;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => 256,
            QualityPreset::High => 1024,
        }
    }

    /// Whether to draw the castle brick pattern
    pub fn backdrop_detail(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (pickups, damage, level-ups)
    pub particles: bool,
    /// Level-up banner
    pub banner: bool,
    /// Show FPS counter
    pub show_fps: bool,
    /// Reduced motion (no invincibility flicker or platform flashing)
    pub reduced_motion: bool,
    /// Name entered on the last run
    pub player_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            banner: true,
            show_fps: false,
            reduced_motion: false,
            player_name: String::new(),
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "owl_dash_settings";

    /// Effective flicker/flash (respects reduced_motion)
    pub fn effective_flicker(&self) -> bool {
        !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Name to record on the leaderboard
    pub fn display_name(&self) -> &str {
        let name = self.player_name.trim();
        if name.is_empty() { "Anonymous" } else { name }
    }

    /// Load settings from storage, defaults if missing or malformed
    pub fn load(store: &impl KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Discarding malformed settings: {e}"),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to storage
    pub fn save(&self, store: &mut impl KeyValueStore) {
        if let Ok(json) = serde_json::to_string(self) {
            store.set(Self::STORAGE_KEY, &json);
            log::info!("Settings saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_particles_off_caps_to_zero() {
        let mut settings = Settings {
            quality: QualityPreset::High,
            ..Settings::default()
        };
        assert_eq!(settings.max_particles(), 1024);
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!(QualityPreset::parse("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("ultra"), None);
        assert_eq!(QualityPreset::Low.as_str(), "Low");
    }

    #[test]
    fn test_display_name_defaults() {
        let mut settings = Settings::default();
        assert_eq!(settings.display_name(), "Anonymous");
        settings.player_name = "  Hedwig ".to_string();
        assert_eq!(settings.display_name(), "Hedwig");
    }

    #[test]
    fn test_load_save() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), settings);

        store.set(Settings::STORAGE_KEY, "nope");
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
