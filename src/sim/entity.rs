//! Scrolling entities: obstacles, enemies and collectibles
//!
//! Each kind moves left with the game speed, animates, and decides what
//! touching the player means via [`Entity::interact`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{BurstKind, Rect, Resolution, side_push_x};
use super::player::Player;
use crate::advance_phase;
use crate::tuning::Tuning;

const TAU: f32 = std::f32::consts::TAU;

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// A pile of 2-4 books standing on the floor
    Book { stack: u8 },
    /// A single book hovering in the air
    FloatingBook,
    Table,
    Fireplace,
}

impl ObstacleKind {
    /// Whether the owl can land on top of it
    pub fn is_platform(&self) -> bool {
        !matches!(self, ObstacleKind::Fireplace)
    }
}

/// Countdown that throws the owl off a platform it has stood on too long
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Eviction {
    #[default]
    Idle,
    Counting { remaining: u32 },
    /// Timer ran out; stays here until the owl is off the platform
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub platform: bool,
    pub eviction: Eviction,
    /// Fire flicker phase (fireplace only)
    pub anim: f32,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind) -> Self {
        Self {
            kind,
            platform: kind.is_platform(),
            eviction: Eviction::Idle,
            anim: 0.0,
        }
    }

    /// Platform is in the warning window and should blink this frame
    pub fn is_flashing(&self, warning_ticks: u32) -> bool {
        match self.eviction {
            Eviction::Counting { remaining } => remaining < warning_ticks && (remaining / 5) % 2 == 0,
            Eviction::Expired => true,
            Eviction::Idle => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Tiger,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Leg animation phase
    pub anim: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Collectible {
    /// Potato chip, bobs up and down
    Chip { bob: f32 },
    /// Tarot card with one of several symbols; hovers and glows
    TarotCard { symbol: u8, hover: f32, spin: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EntityKind {
    Obstacle(Obstacle),
    Enemy(Enemy),
    Collectible(Collectible),
}

/// A scrolling entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Assigned when the entity joins a game state (0 until then)
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(kind: EntityKind, pos: Vec2, size: Vec2) -> Self {
        Self { id: 0, pos, size, kind }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn obstacle(&self) -> Option<&Obstacle> {
        match &self.kind {
            EntityKind::Obstacle(o) => Some(o),
            _ => None,
        }
    }

    pub fn obstacle_mut(&mut self) -> Option<&mut Obstacle> {
        match &mut self.kind {
            EntityKind::Obstacle(o) => Some(o),
            _ => None,
        }
    }

    pub fn is_platform(&self) -> bool {
        self.obstacle().is_some_and(|o| o.platform)
    }

    pub fn is_enemy(&self) -> bool {
        matches!(self.kind, EntityKind::Enemy(_))
    }

    /// Horizontal distance moved per frame at the given game speed
    pub fn scroll_speed(&self, speed: f32) -> f32 {
        match self.kind {
            EntityKind::Enemy(_) => speed + 1.0,
            _ => speed,
        }
    }

    /// Scroll left and animate
    pub fn update(&mut self, speed: f32) {
        self.pos.x -= self.scroll_speed(speed);

        match &mut self.kind {
            EntityKind::Obstacle(o) => {
                if o.kind == ObstacleKind::Fireplace {
                    o.anim = advance_phase(o.anim, 0.2, TAU);
                }
            }
            EntityKind::Enemy(e) => {
                e.anim = advance_phase(e.anim, 0.15, TAU);
            }
            EntityKind::Collectible(Collectible::Chip { bob }) => {
                *bob = advance_phase(*bob, 0.1, TAU);
                self.pos.y += bob.sin() * 0.5;
            }
            EntityKind::Collectible(Collectible::TarotCard { hover, spin, .. }) => {
                *hover = advance_phase(*hover, 0.05, TAU);
                *spin = advance_phase(*spin, 0.03, TAU);
                self.pos.y += hover.sin() * 0.3;
            }
        }
    }

    /// Right edge has passed the left side of the screen
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }

    /// Decide what the player touching (or clearing) this entity means
    pub fn interact(&self, player: &Player, tuning: &Tuning) -> Resolution {
        let me = self.bounds();
        let pb = player.bounds();

        match &self.kind {
            EntityKind::Collectible(c) => {
                if !pb.overlaps(&me) {
                    return Resolution::None;
                }
                match c {
                    Collectible::Chip { .. } => Resolution::Collect {
                        points: tuning.chip_points,
                        burst: BurstKind::Chip,
                    },
                    Collectible::TarotCard { .. } => Resolution::Collect {
                        points: tuning.card_points,
                        burst: BurstKind::Card,
                    },
                }
            }
            EntityKind::Enemy(_) => {
                if clears_enemy(player, &me, tuning) {
                    return Resolution::Defeat {
                        points: tuning.enemy_clear_points,
                    };
                }
                if !pb.overlaps(&me) {
                    return Resolution::None;
                }
                // Knock the owl back behind the tiger, or past it near the left edge
                let behind = me.left() - pb.w - tuning.knockback_gap;
                let push_x = if behind >= 0.0 {
                    behind
                } else {
                    side_push_x(&pb, &me)
                };
                Resolution::Hit { push_x }
            }
            EntityKind::Obstacle(o) => {
                if !pb.overlaps(&me) {
                    return Resolution::None;
                }
                // One-way: only a descending owl whose feet were above the top lands
                let prev_feet = pb.bottom() - player.vel_y;
                if o.platform && player.vel_y > 0.0 && prev_feet <= me.top() {
                    Resolution::Land { top: me.top() }
                } else {
                    Resolution::Hit {
                        push_x: side_push_x(&pb, &me),
                    }
                }
            }
        }
    }
}

/// A long-jumping owl passing over the tiger, level or descending, with its
/// feet just above the tiger's back and its centre within the widened span.
fn clears_enemy(player: &Player, enemy: &Rect, tuning: &Tuning) -> bool {
    if !player.long_jumping || player.vel_y < 0.0 {
        return false;
    }
    let feet = player.feet();
    let above = feet <= enemy.top() && feet >= enemy.top() - tuning.enemy_clear_height;
    let center = player.center_x();
    let within = center >= enemy.left() - tuning.enemy_clear_tolerance
        && center <= enemy.right() + tuning.enemy_clear_tolerance;
    above && within
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn tiger_at(x: f32) -> Entity {
        Entity::new(
            EntityKind::Enemy(Enemy {
                kind: EnemyKind::Tiger,
                anim: 0.0,
            }),
            Vec2::new(x, GROUND_LINE - TIGER_HEIGHT),
            Vec2::new(TIGER_WIDTH, TIGER_HEIGHT),
        )
    }

    fn table_at(x: f32) -> Entity {
        Entity::new(
            EntityKind::Obstacle(Obstacle::new(ObstacleKind::Table)),
            Vec2::new(x, GROUND_LINE - TABLE_HEIGHT),
            Vec2::new(TABLE_WIDTH, TABLE_HEIGHT),
        )
    }

    #[test]
    fn test_scroll_speeds() {
        let mut table = table_at(400.0);
        let mut tiger = tiger_at(400.0);
        table.update(2.0);
        tiger.update(2.0);
        assert_eq!(table.pos.x, 398.0);
        assert_eq!(tiger.pos.x, 397.0);
    }

    #[test]
    fn test_off_screen_only_after_right_edge_passes() {
        let mut table = table_at(-TABLE_WIDTH);
        assert!(!table.is_off_screen());
        table.update(0.5);
        assert!(table.is_off_screen());
    }

    #[test]
    fn test_fireplace_is_not_a_platform() {
        assert!(!ObstacleKind::Fireplace.is_platform());
        assert!(ObstacleKind::Table.is_platform());
        assert!(ObstacleKind::Book { stack: 3 }.is_platform());
        assert!(ObstacleKind::FloatingBook.is_platform());
    }

    #[test]
    fn test_landing_from_above() {
        let tuning = Tuning::default();
        let table = table_at(90.0);
        let mut player = Player::default();
        player.grounded = false;
        player.vel_y = 4.0;
        // Feet 2px into the table top, 2px above it last frame
        player.pos.y = table.pos.y - PLAYER_HEIGHT + 2.0;

        assert_eq!(
            table.interact(&player, &tuning),
            Resolution::Land { top: table.pos.y }
        );
    }

    #[test]
    fn test_rising_into_platform_is_a_side_hit() {
        let tuning = Tuning::default();
        let table = table_at(120.0);
        let player = Player::default();

        match table.interact(&player, &tuning) {
            Resolution::Hit { push_x } => assert_eq!(push_x, 120.0 - PLAYER_WIDTH),
            other => panic!("expected hit, got {other:?}"),
        }
    }

    #[test]
    fn test_tiger_contact_knocks_back() {
        let tuning = Tuning::default();
        let tiger = tiger_at(120.0);
        let player = Player::default();

        match tiger.interact(&player, &tuning) {
            Resolution::Hit { push_x } => {
                assert_eq!(push_x, 120.0 - PLAYER_WIDTH - tuning.knockback_gap);
            }
            other => panic!("expected hit, got {other:?}"),
        }
    }

    #[test]
    fn test_tiger_at_left_edge_knocks_owl_past_it() {
        let tuning = Tuning::default();
        let tiger = tiger_at(20.0);
        let mut player = Player::default();
        player.pos.x = 0.0;

        assert_eq!(
            tiger.interact(&player, &tuning),
            Resolution::Hit {
                push_x: 20.0 + TIGER_WIDTH
            }
        );
    }

    #[test]
    fn test_normal_jump_over_tiger_does_not_clear() {
        let tuning = Tuning::default();
        let tiger = tiger_at(100.0);
        let mut player = Player::default();
        player.grounded = false;
        player.vel_y = 1.0;
        player.pos.y = tiger.pos.y - PLAYER_HEIGHT - 10.0;

        assert_eq!(tiger.interact(&player, &tuning), Resolution::None);

        player.long_jumping = true;
        assert_eq!(
            tiger.interact(&player, &tuning),
            Resolution::Defeat {
                points: tuning.enemy_clear_points
            }
        );
    }

    #[test]
    fn test_rising_long_jump_does_not_clear() {
        let tuning = Tuning::default();
        let tiger = tiger_at(100.0);
        let mut player = Player::default();
        player.long_jumping = true;
        player.vel_y = -3.0;
        player.pos.y = tiger.pos.y - PLAYER_HEIGHT - 10.0;
        assert_eq!(tiger.interact(&player, &tuning), Resolution::None);
    }

    #[test]
    fn test_chip_collect() {
        let tuning = Tuning::default();
        let chip = Entity::new(
            EntityKind::Collectible(Collectible::Chip { bob: 0.0 }),
            Vec2::new(110.0, 290.0),
            Vec2::new(CHIP_WIDTH, CHIP_HEIGHT),
        );
        assert_eq!(
            chip.interact(&Player::default(), &tuning),
            Resolution::Collect {
                points: 10,
                burst: BurstKind::Chip
            }
        );
    }

    #[test]
    fn test_flashing_window() {
        let mut obstacle = Obstacle::new(ObstacleKind::Table);
        assert!(!obstacle.is_flashing(60));
        obstacle.eviction = Eviction::Counting { remaining: 100 };
        assert!(!obstacle.is_flashing(60));
        obstacle.eviction = Eviction::Counting { remaining: 50 };
        assert!(obstacle.is_flashing(60));
    }
}
