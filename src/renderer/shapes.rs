//! Pixel-art sprites built from quads

use super::quad::{Quad, colors};
use crate::consts::*;
use crate::sim::{Collectible, Entity, EntityKind, ObstacleKind, Particle, Player};

/// Castle wall, brick rows and floor
pub fn backdrop(out: &mut Vec<Quad>, detailed: bool) {
    out.push(Quad::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT, colors::BACKGROUND));
    out.push(Quad::new(0.0, 0.0, SCREEN_WIDTH, 100.0, colors::CASTLE_WALL));
    out.push(Quad::new(
        0.0,
        GROUND_LINE,
        SCREEN_WIDTH,
        SCREEN_HEIGHT - GROUND_LINE,
        colors::CASTLE_WALL,
    ));

    if !detailed {
        return;
    }
    for col in 0..(SCREEN_WIDTH as u32 / 20) {
        for row in 0..10 {
            if (col + row) % 2 == 0 {
                out.push(Quad::new(col as f32 * 20.0, row as f32 * 10.0, 18.0, 8.0, colors::BRICK));
            }
        }
    }
    for col in 0..(SCREEN_WIDTH as u32 / 10) {
        out.push(Quad::new(col as f32 * 10.0, GROUND_LINE, 8.0, SCREEN_HEIGHT - GROUND_LINE, colors::BRICK));
    }
}

/// The wizard owl; `alpha` carries the invincibility flicker
pub fn owl(out: &mut Vec<Quad>, player: &Player, alpha: f32) {
    let (x, y) = (player.pos.x, player.pos.y);
    let wing = player.wing_offset();
    let parts = [
        Quad::new(x, y, player.size.x, player.size.y, colors::ROBE),
        Quad::new(x + 8.0, y + 5.0, 24.0, 20.0, colors::OWL_FACE),
        Quad::new(x + 12.0, y + 8.0, 6.0, 6.0, colors::OWL_EYE),
        Quad::new(x + 22.0, y + 8.0, 6.0, 6.0, colors::OWL_EYE),
        Quad::new(x + 14.0, y + 10.0, 2.0, 2.0, colors::PUPIL),
        Quad::new(x + 24.0, y + 10.0, 2.0, 2.0, colors::PUPIL),
        Quad::new(x + 18.0, y + 16.0, 4.0, 3.0, colors::BEAK),
        Quad::new(x + 10.0, y - 5.0, 20.0, 8.0, colors::HAT),
        Quad::new(x + 15.0, y - 15.0, 10.0, 12.0, colors::HAT),
        Quad::new(x + 18.0, y - 10.0, 4.0, 2.0, colors::OWL_EYE),
        Quad::new(x + 19.0, y - 12.0, 2.0, 4.0, colors::OWL_EYE),
        Quad::new(x + 5.0, y + 15.0 + wing, 8.0, 12.0, colors::WING),
        Quad::new(x + 27.0, y + 15.0 - wing, 8.0, 12.0, colors::WING),
    ];
    out.extend(parts.into_iter().map(|q| q.faded(alpha)));
}

/// Any scrolling entity. `flash` tints a platform in its eviction warning.
pub fn entity(out: &mut Vec<Quad>, entity: &Entity, flash: bool) {
    let (x, y) = (entity.pos.x, entity.pos.y);
    let (w, h) = (entity.size.x, entity.size.y);

    match &entity.kind {
        EntityKind::Obstacle(o) => {
            let wood = if flash { colors::WARNING } else { colors::WOOD };
            match o.kind {
                ObstacleKind::Book { stack } => {
                    for i in 0..stack {
                        let by = y + i as f32 * BOOK_HEIGHT;
                        out.push(Quad::new(x, by, w, BOOK_HEIGHT, wood));
                        out.push(Quad::new(x + 2.0, by + 2.0, w - 4.0, 3.0, colors::PAGE_EDGE));
                        out.push(Quad::new(x + 5.0, by + 8.0, w - 10.0, 2.0, colors::PUPIL));
                    }
                }
                ObstacleKind::FloatingBook => {
                    out.push(Quad::new(x, y, w, h, wood));
                    out.push(Quad::new(x + 2.0, y + 2.0, w - 4.0, 3.0, colors::PAGE_EDGE));
                }
                ObstacleKind::Table => {
                    out.push(Quad::new(x, y, w, 10.0, wood));
                    out.push(Quad::new(x + 5.0, y + 10.0, 8.0, h - 10.0, wood));
                    out.push(Quad::new(x + w - 13.0, y + 10.0, 8.0, h - 10.0, wood));
                }
                ObstacleKind::Fireplace => {
                    let fire = 20.0 + o.anim.sin() * 5.0;
                    out.push(Quad::new(x, y + 50.0, w, 20.0, colors::STONE));
                    out.push(Quad::new(x + 8.0, y + 30.0, 24.0, fire, colors::FIRE));
                    out.push(Quad::new(x + 12.0, y + 35.0, 16.0, fire - 10.0, colors::FIRE_CORE));
                }
            }
        }
        EntityKind::Enemy(e) => {
            let leg = e.anim.sin() * 2.0;
            out.push(Quad::new(x, y + 20.0, w, 30.0, colors::TIGER));
            for i in 0..3 {
                out.push(Quad::new(x + 10.0 + i as f32 * 10.0, y + 20.0, 3.0, 30.0, colors::STRIPE));
            }
            out.push(Quad::new(x + 30.0, y, 20.0, 25.0, colors::TIGER));
            out.push(Quad::new(x + 5.0, y + 15.0, 40.0, 10.0, colors::ARMOR));
            out.push(Quad::new(x + 32.0, y - 5.0, 16.0, 8.0, colors::ARMOR));
            out.push(Quad::new(x + 35.0, y + 5.0, 3.0, 3.0, colors::TIGER_EYE));
            out.push(Quad::new(x + 42.0, y + 5.0, 3.0, 3.0, colors::TIGER_EYE));
            out.push(Quad::new(x + 8.0, y + 50.0 + leg, 8.0, 10.0, colors::TIGER));
            out.push(Quad::new(x + 34.0, y + 50.0 - leg, 8.0, 10.0, colors::TIGER));
        }
        EntityKind::Collectible(Collectible::Chip { .. }) => {
            out.push(Quad::new(x, y, w, h, colors::CHIP));
            out.push(Quad::new(x + 2.0, y + 2.0, 4.0, 3.0, colors::CHIP_SPOT));
            out.push(Quad::new(x + 10.0, y + 6.0, 3.0, 2.0, colors::CHIP_SPOT));
            out.push(Quad::new(x + 14.0, y + 10.0, 4.0, 3.0, colors::CHIP_SPOT));
            out.push(Quad::new(x + 8.0, y + 1.0, 1.0, 1.0, colors::SPARKLE));
            out.push(Quad::new(x + 16.0, y + 5.0, 1.0, 1.0, colors::SPARKLE));
        }
        EntityKind::Collectible(Collectible::TarotCard { symbol, hover, spin }) => {
            // Spin is faked by squashing the card horizontally
            let squash = spin.cos().abs().max(0.15);
            let cw = w * squash;
            let cx = x + (w - cw) / 2.0;
            let glow = 4.0 + hover.sin() * 2.0;
            out.push(Quad::new(cx - glow, y - glow, cw + glow * 2.0, h + glow * 2.0, colors::CARD_GLOW));
            out.push(Quad::new(cx, y, cw, h, colors::CARD_BORDER));
            out.push(Quad::new(cx + 2.0 * squash, y + 2.0, cw - 4.0 * squash, h - 4.0, colors::CARD_BACK));
            let symbol_color = colors::CARD_SYMBOLS[*symbol as usize % colors::CARD_SYMBOLS.len()];
            out.push(Quad::new(cx + cw / 2.0 - 3.0 * squash, y + h / 2.0 - 4.0, 6.0 * squash, 8.0, symbol_color));
        }
    }
}

pub fn particle(out: &mut Vec<Quad>, p: &Particle) {
    let color = super::quad::hex(p.color, p.opacity());
    out.push(Quad::new(p.pos.x, p.pos.y, p.size, p.size, color));
}

/// Dark strip behind the level-up text
pub fn banner_backing(out: &mut Vec<Quad>, alpha: f32) {
    out.push(Quad::new(0.0, 140.0, SCREEN_WIDTH, 60.0, colors::BANNER).faded(alpha));
}
