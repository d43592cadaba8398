//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod error;
pub mod layout;
pub mod maze;
pub mod state;
pub mod tick;

pub use collision::{Contact, circle_rect, rect_rect, resolve_velocity};
pub use error::MazeError;
pub use layout::{ArenaLayout, build_bodies};
pub use maze::{Cell, Direction, Maze, WallOrientation, generate};
pub use state::{Body, BodyLabel, GameEvent, GamePhase, GameState, Shape};
pub use tick::{TickInput, tick};
