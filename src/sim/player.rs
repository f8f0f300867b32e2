//! The wizard owl
//!
//! Input-driven physics: jump / long-jump, left-right movement, gravity,
//! ground and platform support, and the post-damage invincibility window.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::tick::FrameInput;
use crate::advance_phase;
use crate::consts::*;
use crate::tuning::Tuning;

/// Wing-flap animation period
const ANIM_PERIOD: f32 = 4.0;
const ANIM_SPEED: f32 = 0.1;

/// What happened during a player update that the caller may react to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStep {
    pub jumped: bool,
    pub long_jump: bool,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel_y: f32,
    pub size: Vec2,
    pub grounded: bool,
    /// Frames of invincibility left (0 = vulnerable)
    pub invincible_ticks: u32,
    pub long_jumping: bool,
    pub anim: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, GROUND_LINE - PLAYER_HEIGHT),
            vel_y: 0.0,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            grounded: true,
            invincible_ticks: 0,
            long_jumping: false,
            anim: 0.0,
        }
    }
}

impl Player {
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Y the owl rests at when standing on the floor
    #[inline]
    pub fn ground_y(&self) -> f32 {
        GROUND_LINE - self.size.y
    }

    #[inline]
    pub fn feet(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    /// Advance one frame.
    ///
    /// `platforms` are the tops the owl may currently be standing on; they
    /// are only consulted while grounded above the floor.
    pub fn update(&mut self, input: &FrameInput, tuning: &Tuning, platforms: &[Rect]) -> PlayerStep {
        let mut step = PlayerStep::default();

        if self.invincible_ticks > 0 {
            self.invincible_ticks -= 1;
        }

        if input.jump && self.grounded {
            if input.modifier {
                self.vel_y = -tuning.long_jump_power;
                self.long_jumping = true;
                step.long_jump = true;
            } else {
                self.vel_y = -tuning.jump_power;
            }
            self.grounded = false;
            step.jumped = true;
        }

        if input.left {
            self.pos.x -= tuning.move_speed;
        }
        if input.right {
            self.pos.x += tuning.move_speed;
        }
        self.pos.x = self.pos.x.clamp(0.0, SCREEN_WIDTH - self.size.x);

        self.vel_y += tuning.gravity;
        self.pos.y += self.vel_y;

        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel_y = self.vel_y.max(0.0);
        }

        let ground_y = self.ground_y();
        if self.pos.y >= ground_y {
            self.pos.y = ground_y;
            self.vel_y = 0.0;
            self.grounded = true;
            self.long_jumping = false;
        }

        // Walking off the edge of a platform starts a fall
        if self.grounded && self.pos.y < ground_y && !self.is_supported(platforms, tuning) {
            self.grounded = false;
        }

        self.anim = advance_phase(self.anim, ANIM_SPEED, ANIM_PERIOD);

        step
    }

    /// Whether some platform top sits under the owl's centre, within tolerance of its feet
    pub fn is_supported(&self, platforms: &[Rect], tuning: &Tuning) -> bool {
        let center = self.center_x();
        let feet = self.feet();
        platforms
            .iter()
            .any(|p| p.spans_x(center) && (feet - p.top()).abs() <= tuning.platform_tolerance)
    }

    /// Snap the owl's feet onto a surface at `top`
    pub fn land_on(&mut self, top: f32) {
        self.pos.y = top - self.size.y;
        self.vel_y = 0.0;
        self.grounded = true;
        self.long_jumping = false;
    }

    /// Start the invincibility window. Returns false (and does nothing) if
    /// already invincible; the caller only costs a life on `true`.
    pub fn take_damage(&mut self, ticks: u32) -> bool {
        if self.is_invincible() {
            return false;
        }
        self.invincible_ticks = ticks;
        true
    }

    /// Flicker while invincible (render only)
    pub fn is_visible(&self, flicker_ticks: u32) -> bool {
        if !self.is_invincible() || flicker_ticks == 0 {
            return true;
        }
        (self.invincible_ticks / flicker_ticks) % 2 != 0
    }

    /// Wing offset for the flap animation
    pub fn wing_offset(&self) -> f32 {
        self.anim.sin() * 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jump() -> FrameInput {
        FrameInput {
            jump: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_rest_on_ground() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        for _ in 0..10 {
            player.update(&FrameInput::default(), &tuning, &[]);
        }
        assert!(player.grounded);
        assert_eq!(player.pos.y, player.ground_y());
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn test_standard_jump() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        let step = player.update(&jump(), &tuning, &[]);

        assert!(step.jumped);
        assert!(!step.long_jump);
        assert!(!player.grounded);
        assert!(!player.long_jumping);
        assert_eq!(player.vel_y, -tuning.jump_power + tuning.gravity);
    }

    #[test]
    fn test_long_jump_sets_flag_until_landing() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        let input = FrameInput {
            jump: true,
            modifier: true,
            ..Default::default()
        };
        let step = player.update(&input, &tuning, &[]);
        assert!(step.long_jump);
        assert!(player.long_jumping);
        assert_eq!(player.vel_y, -tuning.long_jump_power + tuning.gravity);

        // Fall back down without input
        for _ in 0..200 {
            player.update(&FrameInput::default(), &tuning, &[]);
            if player.grounded {
                break;
            }
        }
        assert!(player.grounded);
        assert!(!player.long_jumping);
    }

    #[test]
    fn test_cannot_jump_midair() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        player.update(&jump(), &tuning, &[]);
        let vel = player.vel_y;
        let step = player.update(&jump(), &tuning, &[]);
        assert!(!step.jumped);
        assert_eq!(player.vel_y, vel + tuning.gravity);
    }

    #[test]
    fn test_horizontal_clamp() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        player.pos.x = 1.0;
        let left = FrameInput {
            left: true,
            ..Default::default()
        };
        player.update(&left, &tuning, &[]);
        assert_eq!(player.pos.x, 0.0);

        player.pos.x = SCREEN_WIDTH - PLAYER_WIDTH - 1.0;
        let right = FrameInput {
            right: true,
            ..Default::default()
        };
        player.update(&right, &tuning, &[]);
        assert_eq!(player.pos.x, SCREEN_WIDTH - PLAYER_WIDTH);
    }

    #[test]
    fn test_take_damage_is_gated() {
        let mut player = Player::default();
        assert!(player.take_damage(60));
        assert!(!player.take_damage(60));
        assert_eq!(player.invincible_ticks, 60);
    }

    #[test]
    fn test_invincibility_expires() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        player.take_damage(3);
        for _ in 0..3 {
            player.update(&FrameInput::default(), &tuning, &[]);
        }
        assert!(!player.is_invincible());
        assert!(player.take_damage(3));
    }

    #[test]
    fn test_stays_grounded_on_platform() {
        let tuning = Tuning::default();
        let platform = Rect::new(80.0, 250.0, 70.0, 15.0);
        let mut player = Player::default();
        player.land_on(platform.top());

        player.update(&FrameInput::default(), &tuning, &[platform]);
        assert!(player.grounded);
    }

    #[test]
    fn test_walking_off_platform_starts_fall() {
        let tuning = Tuning::default();
        // Platform entirely left of the owl's centre
        let platform = Rect::new(20.0, 250.0, 60.0, 15.0);
        let mut player = Player::default();
        player.land_on(platform.top());

        player.update(&FrameInput::default(), &tuning, &[platform]);
        assert!(!player.grounded);
    }

    #[test]
    fn test_flicker_only_while_invincible() {
        let mut player = Player::default();
        assert!(player.is_visible(5));
        player.take_damage(60);
        let visible: Vec<bool> = (0..20)
            .map(|t| {
                player.invincible_ticks = 60 - t;
                player.is_visible(5)
            })
            .collect();
        assert!(visible.contains(&true));
        assert!(visible.contains(&false));
    }
}
