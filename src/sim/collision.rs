//! Collision detection and resolution effects
//!
//! Everything in the playfield is an axis-aligned rectangle. Detection is a
//! plain overlap test; what an overlap *means* is decided per entity kind and
//! returned as a [`Resolution`] for the tick to apply.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::SCREEN_WIDTH;

/// Axis-aligned rectangle, origin at the top-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Open-interval overlap: rectangles that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    /// Whether `x` lies strictly between the left and right edges
    #[inline]
    pub fn spans_x(&self, x: f32) -> bool {
        x > self.left() && x < self.right()
    }
}

/// Particle effect requested by a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstKind {
    Chip,
    Card,
    Damage,
    EnemyCleared,
}

/// Outcome of the player touching an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// No interaction this frame
    None,
    /// Pick the entity up: score it, burst, remove it
    Collect { points: u64, burst: BurstKind },
    /// Enemy cleared by a long-jump: score it, burst, remove it
    Defeat { points: u64 },
    /// One-way platform landing: snap the player's feet to `top`
    Land { top: f32 },
    /// Harmful contact: damage (if not invincible) and move the player to `push_x`
    Hit { push_x: f32 },
}

/// Horizontal position that puts a `width`-wide player just outside `obstacle`,
/// on whichever side its centre is nearer. Falls back to the other side when
/// the preferred side would leave the screen.
pub fn side_push_x(player: &Rect, obstacle: &Rect) -> f32 {
    let left = obstacle.left() - player.w;
    let right = obstacle.right();
    let max_x = SCREEN_WIDTH - player.w;

    let prefer_left = player.center().x < obstacle.center().x;
    if prefer_left && left >= 0.0 {
        left
    } else if !prefer_left && right <= max_x {
        right
    } else if left >= 0.0 {
        left
    } else {
        right.min(max_x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_spans_x_is_open() {
        let r = Rect::new(10.0, 0.0, 20.0, 5.0);
        assert!(r.spans_x(20.0));
        assert!(!r.spans_x(10.0));
        assert!(!r.spans_x(30.0));
    }

    #[test]
    fn test_side_push_nearer_side() {
        let obstacle = Rect::new(200.0, 270.0, 60.0, 50.0);

        let from_left = Rect::new(170.0, 280.0, 40.0, 40.0);
        let x = side_push_x(&from_left, &obstacle);
        assert_eq!(x, 160.0);
        assert!(!Rect::new(x, 280.0, 40.0, 40.0).overlaps(&obstacle));

        let from_right = Rect::new(240.0, 280.0, 40.0, 40.0);
        assert_eq!(side_push_x(&from_right, &obstacle), 260.0);
    }

    #[test]
    fn test_side_push_respects_left_edge() {
        let obstacle = Rect::new(10.0, 270.0, 60.0, 50.0);
        let player = Rect::new(5.0, 280.0, 40.0, 40.0);
        // Left side would be off-screen, so the player goes right
        assert_eq!(side_push_x(&player, &obstacle), 70.0);
    }
}
