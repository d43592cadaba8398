//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web; natively the defaults are used.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{ArenaLayout, MazeError};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Maze ===
    /// Cell rows
    pub rows: usize,
    /// Cell columns
    pub cols: usize,

    // === Arena ===
    /// Arena width in pixels
    pub width: f32,
    /// Arena height in pixels
    pub height: f32,
    /// Maze wall thickness in pixels
    pub wall_thickness: f32,

    // === Physics ===
    /// Velocity change per key press (pixels/s)
    pub velocity_step: f32,
    /// Gravity after winning (pixels/s²)
    pub win_gravity: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: DEFAULT_CELLS,
            cols: DEFAULT_CELLS,

            width: DEFAULT_ARENA_WIDTH,
            height: DEFAULT_ARENA_HEIGHT,
            wall_thickness: WALL_THICKNESS,

            velocity_step: VELOCITY_STEP,
            win_gravity: WIN_GRAVITY,
        }
    }
}

impl Settings {
    /// Check the settings describe a playable maze
    pub fn validate(&self) -> Result<(), MazeError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(MazeError::InvalidDimension {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.width) || !positive(self.height) {
            return Err(MazeError::InvalidArena {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Arena geometry for these settings
    pub fn arena(&self) -> ArenaLayout {
        ArenaLayout {
            width: self.width,
            height: self.height,
            wall_thickness: self.wall_thickness,
        }
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "ball_maze_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<Settings>(&json) {
                    Ok(settings) if settings.validate().is_ok() => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Ok(_) => log::warn!("Stored settings are invalid, ignoring"),
                    Err(e) => log::warn!("Could not parse stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No {} storage natively, using defaults", Self::STORAGE_KEY);
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
