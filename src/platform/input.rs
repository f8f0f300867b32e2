//! Keyboard state tracking
//!
//! Key events arrive asynchronously from the host; the simulation only ever
//! sees an immutable [`FrameInput`] sampled once at the top of each frame.

use std::collections::HashSet;

use crate::sim::FrameInput;

/// Key codes (`KeyboardEvent.code`) the game reacts to
pub mod keys {
    pub const JUMP: &str = "Space";
    pub const LEFT: &str = "ArrowLeft";
    pub const RIGHT: &str = "ArrowRight";
    pub const MODIFIER_LEFT: &str = "ShiftLeft";
    pub const MODIFIER_RIGHT: &str = "ShiftRight";
}

/// Set of currently held keys
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    held: HashSet<String>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, code: &str) {
        self.held.insert(code.to_string());
    }

    pub fn key_up(&mut self, code: &str) {
        self.held.remove(code);
    }

    pub fn is_held(&self, code: &str) -> bool {
        self.held.contains(code)
    }

    /// Release everything (run start, window blur)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Snapshot the keys relevant to the simulation
    pub fn sample(&self) -> FrameInput {
        FrameInput {
            jump: self.is_held(keys::JUMP),
            left: self.is_held(keys::LEFT),
            right: self.is_held(keys::RIGHT),
            modifier: self.is_held(keys::MODIFIER_LEFT) || self.is_held(keys::MODIFIER_RIGHT),
        }
    }
}
