//! Keyboard input mapping
//!
//! Arrow keys and WASD nudge the ball; each press adds a fixed velocity step
//! in that direction.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One key press worth of push on the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nudge {
    Up,
    Right,
    Down,
    Left,
}

impl Nudge {
    /// Map a legacy DOM `keyCode`
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            87 | 38 => Some(Nudge::Up),
            68 | 39 => Some(Nudge::Right),
            83 | 40 => Some(Nudge::Down),
            65 | 37 => Some(Nudge::Left),
            _ => None,
        }
    }

    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Nudge::Up),
            "ArrowRight" => Some(Nudge::Right),
            "ArrowDown" => Some(Nudge::Down),
            "ArrowLeft" => Some(Nudge::Left),
            _ => match key.to_ascii_lowercase().as_str() {
                "w" => Some(Nudge::Up),
                "d" => Some(Nudge::Right),
                "s" => Some(Nudge::Down),
                "a" => Some(Nudge::Left),
                _ => None,
            },
        }
    }

    /// Velocity change for one nudge (screen space, y grows downward)
    pub fn velocity_delta(self, step: f32) -> Vec2 {
        match self {
            Nudge::Up => Vec2::new(0.0, -step),
            Nudge::Right => Vec2::new(step, 0.0),
            Nudge::Down => Vec2::new(0.0, step),
            Nudge::Left => Vec2::new(-step, 0.0),
        }
    }
}

/// Everything a key press can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Nudge(Nudge),
    /// Toggle pause
    Pause,
    /// New maze with a fresh seed
    Restart,
}

impl KeyAction {
    pub fn from_key(key: &str) -> Option<Self> {
        if let Some(nudge) = Nudge::from_key(key) {
            return Some(KeyAction::Nudge(nudge));
        }
        match key {
            "Escape" | "p" | "P" => Some(KeyAction::Pause),
            "r" | "R" => Some(KeyAction::Restart),
            _ => None,
        }
    }
}
