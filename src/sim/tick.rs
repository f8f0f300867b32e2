//! Per-frame simulation step
//!
//! Order within a frame is fixed: player, entities, collisions, platform
//! eviction, spawning, particles, banner. Collision resolution reads the
//! positions both sides reached earlier in the same frame.

use super::collision::{BurstKind, Rect, Resolution, side_push_x};
use super::entity::{EntityKind, Eviction};
use super::spawn;
use super::state::{BurstStyle, GameEvent, GameState};

/// Held-key snapshot for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub jump: bool,
    pub left: bool,
    pub right: bool,
    /// Turns a jump into a long-jump
    pub modifier: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &FrameInput) {
    state.events.clear();

    // Effects keep playing after the run ends so the final burst is visible
    if !state.is_running() {
        update_effects(state);
        return;
    }

    state.time_ticks += 1;

    update_player(state, input);

    let speed = state.speed;
    for entity in &mut state.entities {
        entity.update(speed);
    }
    state.entities.retain(|e| !e.is_off_screen());

    resolve_collisions(state);
    update_evictions(state);

    if state.is_running() {
        spawn_entities(state);
    }

    update_effects(state);
}

fn update_player(state: &mut GameState, input: &FrameInput) {
    let platforms: Vec<Rect> = state
        .entities
        .iter()
        .filter(|e| e.is_platform())
        .map(|e| e.bounds())
        .collect();

    let step = state.player.update(input, &state.tuning, &platforms);
    if step.jumped {
        state.events.push(GameEvent::Jumped {
            long: step.long_jump,
        });
    }
    if step.long_jump {
        let b = state.player.bounds();
        let feet = glam::Vec2::new(b.center().x, b.bottom());
        state.burst(feet, state.tuning.long_jump_burst, BurstStyle::LONG_JUMP);
    }
}

/// Apply each entity's resolution. Iterates in reverse so removals are
/// index-safe and every entity is visited exactly once.
fn resolve_collisions(state: &mut GameState) {
    let mut i = state.entities.len();
    while i > 0 {
        i -= 1;
        if !state.is_running() {
            break;
        }

        let resolution = state.entities[i].interact(&state.player, &state.tuning);
        match resolution {
            Resolution::None => {}
            Resolution::Collect { points, burst } => {
                let entity = state.entities.remove(i);
                let count = match burst {
                    BurstKind::Card => state.tuning.card_burst,
                    _ => state.tuning.chip_burst,
                };
                state.burst(entity.bounds().center(), count, BurstStyle::for_kind(burst));
                state.events.push(GameEvent::Collected { points });
                state.award(points);
            }
            Resolution::Defeat { points } => {
                let entity = state.entities.remove(i);
                state.burst(
                    entity.bounds().center(),
                    state.tuning.enemy_clear_burst,
                    BurstStyle::ENEMY_CLEARED,
                );
                state.events.push(GameEvent::EnemyCleared { points });
                state.award(points);
            }
            Resolution::Land { top } => {
                state.player.land_on(top);
                let duration = state.tuning.eviction_ticks;
                let entity = &mut state.entities[i];
                let entity_id = entity.id;
                if let Some(obstacle) = entity.obstacle_mut() {
                    // Re-landing mid-countdown keeps the running timer
                    if obstacle.eviction == Eviction::Idle {
                        obstacle.eviction = Eviction::Counting {
                            remaining: duration,
                        };
                    }
                }
                state.events.push(GameEvent::Landed { entity_id });
            }
            Resolution::Hit { push_x } => {
                state.player.pos.x = push_x;
                if state.player.take_damage(state.tuning.invincibility_ticks) {
                    let at = state.player.bounds().center();
                    state.burst(at, state.tuning.damage_burst, BurstStyle::for_kind(BurstKind::Damage));
                    state.lose_life();
                }
            }
        }
    }
}

/// Count down platforms the owl is resting on and throw it off when time is up
fn update_evictions(state: &mut GameState) {
    if !state.is_running() {
        return;
    }

    let warning = state.tuning.eviction_warning_ticks;
    let interval = state.tuning.warning_particle_interval.max(1);
    let tolerance = state.tuning.platform_tolerance;

    for i in 0..state.entities.len() {
        let bounds = state.entities[i].bounds();
        let entity_id = state.entities[i].id;
        let Some(eviction) = state.entities[i].obstacle().map(|o| o.eviction) else {
            continue;
        };
        if eviction == Eviction::Idle {
            continue;
        }

        let player = &state.player;
        let over = bounds.spans_x(player.center_x());
        let feet = player.feet();
        let resting = over && player.grounded && (feet - bounds.top()).abs() <= tolerance;
        let left_platform = !over || feet > bounds.top() + tolerance;

        if left_platform {
            set_eviction(state, i, Eviction::Idle);
            continue;
        }
        if !resting {
            // Airborne above the platform: timer holds
            continue;
        }

        let remaining = match eviction {
            Eviction::Counting { remaining } => remaining.saturating_sub(1),
            _ => 0,
        };

        if remaining == 0 {
            set_eviction(state, i, Eviction::Expired);
            let pb = state.player.bounds();
            state.player.pos.x = side_push_x(&pb, &bounds);
            state.player.grounded = false;
            state.events.push(GameEvent::Evicted { entity_id });
            log::debug!("Owl evicted from platform {entity_id}");
            continue;
        }

        set_eviction(state, i, Eviction::Counting { remaining });
        if remaining < warning && remaining % interval == 0 {
            let at = glam::Vec2::new(bounds.center().x, bounds.top());
            state.burst(at, state.tuning.warning_burst, BurstStyle::WARNING);
        }
    }
}

fn set_eviction(state: &mut GameState, index: usize, eviction: Eviction) {
    if let Some(obstacle) = state.entities[index].obstacle_mut() {
        obstacle.eviction = eviction;
    }
}

fn spawn_entities(state: &mut GameState) {
    let live = state.entities.len();
    if !spawn::should_spawn(&mut state.rng, live, &state.tuning) {
        return;
    }
    let capacity = state.tuning.max_entities.saturating_sub(live);
    let spawned = spawn::spawn(&mut state.rng, state.level, &state.tuning);
    for entity in spawned.into_iter().take(capacity) {
        state.add_entity(entity);
    }
}

fn update_effects(state: &mut GameState) {
    for particle in &mut state.particles {
        particle.update();
    }
    state.particles.retain(|p| p.life > 0);

    if let Some(banner) = &mut state.banner {
        banner.ticks_left = banner.ticks_left.saturating_sub(1);
        if banner.ticks_left == 0 {
            state.banner = None;
        }
    }
}

/// Simple demo driver: jump over whatever hazard is about to reach the owl,
/// long-jumping tigers, and walk toward nearby collectibles.
pub fn autopilot(state: &GameState) -> FrameInput {
    let player = state.player.bounds();
    let mut input = FrameInput::default();

    let lookahead = 40.0 + state.speed * 12.0;
    for entity in &state.entities {
        let b = entity.bounds();
        let distance = b.left() - player.right();
        match &entity.kind {
            EntityKind::Enemy(_) => {
                if distance > 0.0 && distance < lookahead + 20.0 {
                    input.jump = true;
                    input.modifier = true;
                }
            }
            EntityKind::Obstacle(_) => {
                let at_feet = b.top() < player.bottom() && b.bottom() > player.top();
                if at_feet && distance > 0.0 && distance < lookahead {
                    input.jump = true;
                }
            }
            EntityKind::Collectible(_) => {
                if distance.abs() < 120.0 && b.center().x < player.center().x - 10.0 {
                    input.left = true;
                }
            }
        }
    }

    // Drift back toward the start column when idle
    if !input.left && player.left() < crate::consts::PLAYER_START_X - 10.0 {
        input.right = true;
    }
    input
}
