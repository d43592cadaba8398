//! Ball Maze - roll a ball through a randomly generated perfect maze
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze generation, layout, physics, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `input`: Keyboard to nudge mapping
//! - `settings`: Persisted game configuration

pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use input::Nudge;
pub use settings::Settings;
pub use sim::MazeError;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one nudge step per frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default grid size (cells per side)
    pub const DEFAULT_CELLS: usize = 10;
    /// Default arena dimensions in pixels
    pub const DEFAULT_ARENA_WIDTH: f32 = 1000.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 1000.0;

    /// Maze wall thickness (also the overhang added to each wall's length)
    pub const WALL_THICKNESS: f32 = 20.0;
    /// Arena border thickness
    pub const BORDER_THICKNESS: f32 = 2.0;
    /// Goal square size as a fraction of a cell
    pub const GOAL_SCALE: f32 = 0.6;
    /// Ball radius as a fraction of the smaller cell side
    pub const BALL_SCALE: f32 = 0.25;

    /// Velocity change per key press (pixels/s)
    pub const VELOCITY_STEP: f32 = 300.0;
    /// Downward gravity switched on after the goal is reached (pixels/s²)
    pub const WIN_GRAVITY: f32 = 1000.0;
    /// Fraction of velocity lost to air drag each tick
    pub const AIR_FRICTION: f32 = 0.01;
    /// Bounciness of ball contacts (0 = no bounce)
    pub const RESTITUTION: f32 = 0.0;
}
