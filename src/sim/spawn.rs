//! Entity spawning
//!
//! A weighted draw over categories whose enemy share grows with the level.
//! All randomness goes through the caller's RNG so runs are reproducible.

use glam::Vec2;
use rand::Rng;

use super::entity::{Collectible, Enemy, EnemyKind, Entity, EntityKind, Obstacle, ObstacleKind};
use crate::consts::*;
use crate::tuning::Tuning;

/// Horizontal gap between books in a jump sequence
const SEQUENCE_SPACING: f32 = 140.0;
/// Each book in a jump sequence sits this much higher than the previous
const SEQUENCE_RISE: f32 = 35.0;
/// Top of the first book in a jump sequence
const SEQUENCE_FIRST_TOP: f32 = 250.0;

/// What a spawn roll produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnCategory {
    Enemy,
    Book,
    Table,
    Fireplace,
    FloatingBook,
    JumpSequence,
    TarotCard,
    /// Leftover probability mass
    Chip,
}

/// Category weights for a level, in draw order. Chip is not listed: it
/// receives whatever mass is left.
pub fn spawn_weights(level: u32, tuning: &Tuning) -> [(SpawnCategory, f32); 7] {
    let enemy = (tuning.enemy_weight_base
        + tuning.enemy_weight_per_level * level.saturating_sub(1) as f32)
        .min(tuning.enemy_weight_cap);
    [
        (SpawnCategory::Enemy, enemy),
        (SpawnCategory::Book, tuning.book_weight),
        (SpawnCategory::Table, tuning.table_weight),
        (SpawnCategory::Fireplace, tuning.fireplace_weight),
        (SpawnCategory::FloatingBook, tuning.floating_book_weight),
        (SpawnCategory::JumpSequence, tuning.jump_sequence_weight),
        (SpawnCategory::TarotCard, tuning.card_weight),
    ]
}

/// Map a uniform roll in `[0, 1)` onto a category
pub fn category_for_roll(roll: f32, level: u32, tuning: &Tuning) -> SpawnCategory {
    let mut acc = 0.0;
    for (category, weight) in spawn_weights(level, tuning) {
        acc += weight;
        if roll < acc {
            return category;
        }
    }
    SpawnCategory::Chip
}

/// Both the trigger roll and the live-entity ceiling must allow a spawn
pub fn should_spawn<R: Rng>(rng: &mut R, live: usize, tuning: &Tuning) -> bool {
    let roll: f32 = rng.random();
    roll < tuning.spawn_chance && live < tuning.max_entities
}

/// Draw a category and build its entities just past the right edge
pub fn spawn<R: Rng>(rng: &mut R, level: u32, tuning: &Tuning) -> Vec<Entity> {
    let x = SCREEN_WIDTH + SPAWN_MARGIN;
    let category = category_for_roll(rng.random(), level, tuning);
    log::debug!("Spawning {category:?} at level {level}");

    match category {
        SpawnCategory::Enemy => vec![tiger(x)],
        SpawnCategory::Book => vec![book_stack(rng, x)],
        SpawnCategory::Table => vec![table(x)],
        SpawnCategory::Fireplace => vec![fireplace(x)],
        SpawnCategory::FloatingBook => vec![floating_book(rng, x)],
        SpawnCategory::JumpSequence => jump_sequence(rng, x, tuning.jump_sequence_len),
        SpawnCategory::TarotCard => vec![tarot_card(rng, x)],
        SpawnCategory::Chip => vec![chip(rng, x)],
    }
}

fn obstacle(kind: ObstacleKind, pos: Vec2, size: Vec2) -> Entity {
    Entity::new(EntityKind::Obstacle(Obstacle::new(kind)), pos, size)
}

pub fn tiger(x: f32) -> Entity {
    Entity::new(
        EntityKind::Enemy(Enemy {
            kind: EnemyKind::Tiger,
            anim: 0.0,
        }),
        Vec2::new(x, GROUND_LINE - TIGER_HEIGHT),
        Vec2::new(TIGER_WIDTH, TIGER_HEIGHT),
    )
}

/// 2-4 books piled on the floor
pub fn book_stack<R: Rng>(rng: &mut R, x: f32) -> Entity {
    let stack: u8 = rng.random_range(2..=4);
    let height = BOOK_HEIGHT * stack as f32;
    obstacle(
        ObstacleKind::Book { stack },
        Vec2::new(x, GROUND_LINE - height),
        Vec2::new(BOOK_WIDTH, height),
    )
}

pub fn table(x: f32) -> Entity {
    obstacle(
        ObstacleKind::Table,
        Vec2::new(x, GROUND_LINE - TABLE_HEIGHT),
        Vec2::new(TABLE_WIDTH, TABLE_HEIGHT),
    )
}

pub fn fireplace(x: f32) -> Entity {
    obstacle(
        ObstacleKind::Fireplace,
        Vec2::new(x, GROUND_LINE - FIREPLACE_HEIGHT),
        Vec2::new(FIREPLACE_WIDTH, FIREPLACE_HEIGHT),
    )
}

/// A book hovering within jump reach
pub fn floating_book<R: Rng>(rng: &mut R, x: f32) -> Entity {
    let top = rng.random_range(200.0..250.0);
    floating_book_at(x, top)
}

fn floating_book_at(x: f32, top: f32) -> Entity {
    obstacle(
        ObstacleKind::FloatingBook,
        Vec2::new(x, top),
        Vec2::new(FLOATING_BOOK_WIDTH, FLOATING_BOOK_HEIGHT),
    )
}

/// Staircase of floating books, each a little higher and further right
pub fn jump_sequence<R: Rng>(rng: &mut R, x: f32, len: usize) -> Vec<Entity> {
    (0..len)
        .map(|i| {
            let jitter: f32 = rng.random_range(-5.0..=5.0);
            let top = SEQUENCE_FIRST_TOP - SEQUENCE_RISE * i as f32 + jitter;
            floating_book_at(x + SEQUENCE_SPACING * i as f32, top)
        })
        .collect()
}

pub fn chip<R: Rng>(rng: &mut R, x: f32) -> Entity {
    let y = 200.0 + rng.random::<f32>() * 80.0;
    let bob = rng.random::<f32>() * std::f32::consts::TAU;
    Entity::new(
        EntityKind::Collectible(Collectible::Chip { bob }),
        Vec2::new(x, y),
        Vec2::new(CHIP_WIDTH, CHIP_HEIGHT),
    )
}

pub fn tarot_card<R: Rng>(rng: &mut R, x: f32) -> Entity {
    let symbol = rng.random_range(0..CARD_SYMBOLS);
    let y = rng.random_range(150.0..230.0);
    let hover = rng.random::<f32>() * std::f32::consts::TAU;
    Entity::new(
        EntityKind::Collectible(Collectible::TarotCard {
            symbol,
            hover,
            spin: 0.0,
        }),
        Vec2::new(x, y),
        Vec2::new(CARD_WIDTH, CARD_HEIGHT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_enemy_share_grows_and_caps() {
        let tuning = Tuning::default();
        let share = |level| spawn_weights(level, &tuning)[0].1;
        assert!((share(1) - 0.10).abs() < 1e-6);
        assert!(share(5) > share(1));
        assert!((share(50) - tuning.enemy_weight_cap).abs() < 1e-6);
    }

    #[test]
    fn test_weights_never_exceed_one() {
        let tuning = Tuning::default();
        for level in 1..100 {
            let total: f32 = spawn_weights(level, &tuning).iter().map(|(_, w)| w).sum();
            assert!(total <= 1.0, "level {level} total {total}");
        }
    }

    #[test]
    fn test_roll_mapping() {
        let tuning = Tuning::default();
        assert_eq!(category_for_roll(0.0, 1, &tuning), SpawnCategory::Enemy);
        assert_eq!(category_for_roll(0.12, 1, &tuning), SpawnCategory::Book);
        assert_eq!(category_for_roll(0.999, 1, &tuning), SpawnCategory::Chip);
    }

    #[test]
    fn test_book_stack_heights() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            let book = book_stack(&mut rng, 100.0);
            match book.obstacle().map(|o| o.kind) {
                Some(ObstacleKind::Book { stack }) => {
                    assert!((2..=4).contains(&stack));
                    assert_eq!(book.size.y, BOOK_HEIGHT * stack as f32);
                    assert_eq!(book.pos.y + book.size.y, GROUND_LINE);
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_jump_sequence_fans_out() {
        let mut rng = Pcg32::seed_from_u64(3);
        let books = jump_sequence(&mut rng, 850.0, 3);
        assert_eq!(books.len(), 3);
        assert!(books.iter().all(|b| b.is_platform()));
        assert!(books[0].pos.x < books[1].pos.x && books[1].pos.x < books[2].pos.x);
        assert!(books[0].pos.y > books[2].pos.y);
    }

    #[test]
    fn test_spawn_is_reproducible() {
        let tuning = Tuning::default();
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for _ in 0..20 {
            let ea = spawn(&mut a, 3, &tuning);
            let eb = spawn(&mut b, 3, &tuning);
            assert_eq!(ea.len(), eb.len());
            for (x, y) in ea.iter().zip(&eb) {
                assert_eq!(x.pos, y.pos);
                assert_eq!(x.size, y.size);
            }
        }
    }

    #[test]
    fn test_ceiling_blocks_spawn() {
        let tuning = Tuning {
            spawn_chance: 1.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(should_spawn(&mut rng, 0, &tuning));
        assert!(!should_spawn(&mut rng, tuning.max_entities, &tuning));
    }

    #[test]
    fn test_card_symbol_in_range() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..50 {
            if let EntityKind::Collectible(Collectible::TarotCard { symbol, .. }) =
                tarot_card(&mut rng, 0.0).kind
            {
                assert!(symbol < CARD_SYMBOLS);
            }
        }
    }
}
