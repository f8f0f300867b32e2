//! Render projection
//!
//! Turns a [`GameState`] into a flat list of coloured quads. The host draws
//! them in order (canvas `fillRect` on the web); no game logic lives here.

pub mod quad;
pub mod shapes;

pub use quad::{Quad, as_bytes, colors};

use crate::settings::Settings;
use crate::sim::GameState;

/// Text overlays the host draws on top of the quads
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub alpha: f32,
}

/// Build the frame's quads back-to-front
pub fn build_frame(state: &GameState, settings: &Settings) -> Vec<Quad> {
    let mut quads = Vec::with_capacity(512 + state.particles.len());
    let flicker = settings.effective_flicker();
    let warning = state.tuning.eviction_warning_ticks;

    shapes::backdrop(&mut quads, settings.quality.backdrop_detail());

    for entity in &state.entities {
        let flash = flicker && entity.obstacle().is_some_and(|o| o.is_flashing(warning));
        shapes::entity(&mut quads, entity, flash);
    }

    let visible = !flicker || state.player.is_visible(state.tuning.flicker_ticks);
    shapes::owl(&mut quads, &state.player, if visible { 1.0 } else { 0.5 });

    for particle in &state.particles {
        shapes::particle(&mut quads, particle);
    }

    if let Some(alpha) = banner_alpha(state, settings) {
        shapes::banner_backing(&mut quads, alpha);
    }

    quads
}

/// Level-up banner text, if one is showing
pub fn banner_text(state: &GameState, settings: &Settings) -> Option<TextOverlay> {
    let banner = state.banner?;
    let alpha = banner_alpha(state, settings)?;
    Some(TextOverlay {
        text: format!("Level {}!", banner.level),
        x: crate::consts::SCREEN_WIDTH / 2.0,
        y: 180.0,
        alpha,
    })
}

/// Banner fades over its last 30 frames
fn banner_alpha(state: &GameState, settings: &Settings) -> Option<f32> {
    if !settings.banner {
        return None;
    }
    state
        .banner
        .map(|b| (b.ticks_left as f32 / 30.0).min(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::{table, tiger};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn running() -> GameState {
        let mut state = GameState::new(1, Tuning::default());
        state.start(1);
        state
    }

    #[test]
    fn test_more_entities_more_quads() {
        let settings = Settings::default();
        let mut state = running();
        let base = build_frame(&state, &settings).len();
        state.add_entity(tiger(400.0));
        assert!(build_frame(&state, &settings).len() > base);
    }

    #[test]
    fn test_particle_alpha_tracks_life() {
        let settings = Settings::default();
        let mut state = running();
        state.burst(Vec2::new(10.0, 10.0), 1, crate::sim::BurstStyle::CHIP);
        state.particles[0].life = state.particles[0].max_life / 2;
        let quads = build_frame(&state, &settings);
        let last = quads.last().map(|q| q.color[3]);
        assert_eq!(last, Some(0.5));
    }

    #[test]
    fn test_flashing_platform_uses_warning_color() {
        let settings = Settings::default();
        let mut state = running();
        let id = state.add_entity(table(400.0));
        if let Some(o) = state.entities[0].obstacle_mut() {
            o.eviction = crate::sim::Eviction::Expired;
        }
        let quads = build_frame(&state, &settings);
        assert!(quads.iter().any(|q| q.color == colors::WARNING));
        assert!(state.entity(id).is_some());

        let calm = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let quads = build_frame(&state, &calm);
        assert!(!quads.iter().any(|q| q.color == colors::WARNING));
    }

    #[test]
    fn test_banner_overlay() {
        let settings = Settings::default();
        let mut state = running();
        assert!(banner_text(&state, &settings).is_none());
        state.award(200);
        let overlay = banner_text(&state, &settings);
        assert_eq!(overlay.map(|o| o.text), Some("Level 2!".to_string()));
    }
}
