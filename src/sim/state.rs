//! Game state and core simulation types
//!
//! Everything needed to replay a run deterministically lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::error::MazeError;
use super::layout::{ArenaLayout, build_bodies};
use super::maze::{Maze, generate};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball rolling through the maze
    Playing,
    /// Goal reached; gravity on and walls collapsing
    Won,
    /// Game is paused
    Paused,
}

/// What a body represents in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyLabel {
    /// Arena edge
    Border,
    /// Maze wall (released on win)
    Wall,
    Goal,
    Ball,
}

/// Collision shape, centred on the body position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rect { half_extents: Vec2 },
    Circle { radius: f32 },
}

/// A physical body in the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    pub label: BodyLabel,
    pub shape: Shape,
    /// Centre position (pixels, y grows downward)
    pub pos: Vec2,
    /// Velocity (pixels/s)
    pub vel: Vec2,
    /// Static bodies never move
    pub is_static: bool,
}

impl Body {
    /// A static rectangle of the given full size
    pub fn rect(id: u32, label: BodyLabel, center: Vec2, size: Vec2) -> Self {
        Self {
            id,
            label,
            shape: Shape::Rect {
                half_extents: size / 2.0,
            },
            pos: center,
            vel: Vec2::ZERO,
            is_static: true,
        }
    }

    /// A dynamic circle
    pub fn circle(id: u32, label: BodyLabel, center: Vec2, radius: f32) -> Self {
        Self {
            id,
            label,
            shape: Shape::Circle { radius },
            pos: center,
            vel: Vec2::ZERO,
            is_static: false,
        }
    }

    pub fn half_extents(&self) -> Option<Vec2> {
        match self.shape {
            Shape::Rect { half_extents } => Some(half_extents),
            Shape::Circle { .. } => None,
        }
    }

    pub fn radius(&self) -> Option<f32> {
        match self.shape {
            Shape::Circle { radius } => Some(radius),
            Shape::Rect { .. } => None,
        }
    }
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The ball touched the goal
    GoalReached { tick: u64 },
    /// Maze walls became dynamic
    WallsReleased { count: usize },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Arena geometry
    pub arena: ArenaLayout,
    /// The generated maze
    pub maze: Maze,
    /// All bodies (sorted by id for determinism)
    pub bodies: Vec<Body>,
    /// World gravity (pixels/s²)
    pub gravity: Vec2,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Tick on which the goal was first reached
    pub goal_reached_tick: Option<u64>,
    /// Velocity change per nudge (pixels/s)
    pub velocity_step: f32,
    /// Gravity switched on by the win (pixels/s²)
    pub win_gravity: f32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game: generate a maze from `seed` and lay out the arena
    pub fn new(settings: &Settings, seed: u64) -> Result<Self, MazeError> {
        settings.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let maze = generate(settings.rows, settings.cols, &mut rng)?;
        let arena = settings.arena();
        let bodies = build_bodies(&maze, &arena, 1);
        let next_id = 1 + bodies.len() as u32;

        log::info!(
            "New {}x{} maze (seed {}): {} passages, {} bodies",
            maze.rows(),
            maze.cols(),
            seed,
            maze.passage_count(),
            bodies.len()
        );

        Ok(Self {
            seed,
            arena,
            maze,
            bodies,
            gravity: Vec2::ZERO,
            phase: GamePhase::Playing,
            time_ticks: 0,
            goal_reached_tick: None,
            velocity_step: settings.velocity_step,
            win_gravity: settings.win_gravity,
            next_id,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn ball(&self) -> Option<&Body> {
        self.bodies.iter().find(|b| b.label == BodyLabel::Ball)
    }

    pub fn ball_mut(&mut self) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.label == BodyLabel::Ball)
    }

    pub fn goal(&self) -> Option<&Body> {
        self.bodies.iter().find(|b| b.label == BodyLabel::Goal)
    }

    /// Maze walls, in id order
    pub fn walls(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| b.label == BodyLabel::Wall)
    }

    /// Turn every maze wall into a dynamic body, returning how many changed
    pub fn release_walls(&mut self) -> usize {
        let mut count = 0;
        for body in self.bodies.iter_mut() {
            if body.label == BodyLabel::Wall && body.is_static {
                body.is_static = false;
                count += 1;
            }
        }
        count
    }

    pub fn has_won(&self) -> bool {
        self.goal_reached_tick.is_some()
    }

    /// Ensure bodies are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.bodies.sort_by_key(|b| b.id);
    }
}
