//! Arena layout: turning a maze into bodies
//!
//! Every wall still standing in the maze becomes a static rectangle. Walls are
//! `wall_thickness` wide and overhang each end by half that, so neighbouring
//! walls meet without gaps at the corners.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::maze::{Maze, WallOrientation};
use super::state::{Body, BodyLabel};
use crate::consts::{BALL_SCALE, BORDER_THICKNESS, GOAL_SCALE};

/// Arena geometry in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaLayout {
    pub width: f32,
    pub height: f32,
    pub wall_thickness: f32,
}

impl ArenaLayout {
    /// Size of one maze cell
    pub fn unit(&self, maze: &Maze) -> Vec2 {
        Vec2::new(
            self.width / maze.cols() as f32,
            self.height / maze.rows() as f32,
        )
    }

    /// Centre of a cell
    pub fn cell_center(&self, maze: &Maze, row: usize, col: usize) -> Vec2 {
        let unit = self.unit(maze);
        Vec2::new(
            col as f32 * unit.x + unit.x / 2.0,
            row as f32 * unit.y + unit.y / 2.0,
        )
    }

    /// Inner edges of the border walls as (min, max) corners
    pub fn interior(&self) -> (Vec2, Vec2) {
        let half = BORDER_THICKNESS / 2.0;
        (
            Vec2::splat(half),
            Vec2::new(self.width - half, self.height - half),
        )
    }
}

/// Build every body for `maze`, numbering ids from `first_id`
///
/// Order: borders (top, right, bottom, left), maze walls as listed by
/// [`Maze::closed_walls`], goal, ball.
pub fn build_bodies(maze: &Maze, arena: &ArenaLayout, first_id: u32) -> Vec<Body> {
    let mut next_id = first_id;
    let mut alloc = || {
        let id = next_id;
        next_id += 1;
        id
    };

    let (w, h) = (arena.width, arena.height);
    let t = arena.wall_thickness;
    let unit = arena.unit(maze);
    let mut bodies = Vec::new();

    let borders = [
        (Vec2::new(w / 2.0, 0.0), Vec2::new(w, BORDER_THICKNESS)),
        (Vec2::new(w, h / 2.0), Vec2::new(BORDER_THICKNESS, h)),
        (Vec2::new(w / 2.0, h), Vec2::new(w, BORDER_THICKNESS)),
        (Vec2::new(0.0, h / 2.0), Vec2::new(BORDER_THICKNESS, h)),
    ];
    for (center, size) in borders {
        bodies.push(Body::rect(alloc(), BodyLabel::Border, center, size));
    }

    for (orientation, row, col) in maze.closed_walls() {
        let (r, c) = (row as f32, col as f32);
        let (center, size) = match orientation {
            // Below cell (row, col)
            WallOrientation::Horizontal => (
                Vec2::new(c * unit.x + unit.x / 2.0, r * unit.y + unit.y),
                Vec2::new(unit.x + t, t),
            ),
            // Right of cell (row, col)
            WallOrientation::Vertical => (
                Vec2::new(c * unit.x + unit.x, r * unit.y + unit.y / 2.0),
                Vec2::new(t, unit.y + t),
            ),
        };
        bodies.push(Body::rect(alloc(), BodyLabel::Wall, center, size));
    }

    let goal_center = Vec2::new(w - unit.x / 2.0, h - unit.y / 2.0);
    bodies.push(Body::rect(
        alloc(),
        BodyLabel::Goal,
        goal_center,
        unit * GOAL_SCALE,
    ));

    let ball_center = arena.cell_center(maze, 0, 0);
    bodies.push(Body::circle(
        alloc(),
        BodyLabel::Ball,
        ball_center,
        unit.min_element() * BALL_SCALE,
    ));

    bodies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::maze::generate;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn arena() -> ArenaLayout {
        ArenaLayout {
            width: 1000.0,
            height: 1000.0,
            wall_thickness: 20.0,
        }
    }

    #[test]
    fn test_body_counts() {
        let maze = generate(10, 10, &mut Pcg32::seed_from_u64(1)).unwrap();
        let bodies = build_bodies(&maze, &arena(), 1);

        let count = |label: BodyLabel| bodies.iter().filter(|b| b.label == label).count();
        assert_eq!(count(BodyLabel::Border), 4);
        assert_eq!(count(BodyLabel::Goal), 1);
        assert_eq!(count(BodyLabel::Ball), 1);
        // 180 internal walls, 99 of them removed
        assert_eq!(count(BodyLabel::Wall), 180 - 99);
        assert_eq!(bodies.first().map(|b| b.id), Some(1));
        assert_eq!(bodies.last().map(|b| b.id), Some(bodies.len() as u32));
    }

    #[test]
    fn test_corridor_has_no_walls() {
        let maze = generate(1, 4, &mut Pcg32::seed_from_u64(2)).unwrap();
        let bodies = build_bodies(&maze, &arena(), 1);
        assert!(bodies.iter().all(|b| b.label != BodyLabel::Wall));
    }

    #[test]
    fn test_wall_placement() {
        let maze = generate(10, 10, &mut Pcg32::seed_from_u64(3)).unwrap();
        let bodies = build_bodies(&maze, &arena(), 1);
        let walls: Vec<_> = bodies.iter().filter(|b| b.label == BodyLabel::Wall).collect();

        for ((orientation, r, c), wall) in maze.closed_walls().zip(walls) {
            let half = wall.half_extents().unwrap();
            match orientation {
                WallOrientation::Horizontal => {
                    assert_eq!(wall.pos, Vec2::new(c as f32 * 100.0 + 50.0, r as f32 * 100.0 + 100.0));
                    assert_eq!(half, Vec2::new(60.0, 10.0));
                }
                WallOrientation::Vertical => {
                    assert_eq!(wall.pos, Vec2::new(c as f32 * 100.0 + 100.0, r as f32 * 100.0 + 50.0));
                    assert_eq!(half, Vec2::new(10.0, 60.0));
                }
            }
        }
    }

    #[test]
    fn test_goal_and_ball_positions() {
        let maze = generate(10, 10, &mut Pcg32::seed_from_u64(4)).unwrap();
        let bodies = build_bodies(&maze, &arena(), 1);

        let goal = bodies.iter().find(|b| b.label == BodyLabel::Goal).unwrap();
        assert_eq!(goal.pos, Vec2::new(950.0, 950.0));
        let half = goal.half_extents().unwrap();
        assert!((half - Vec2::splat(30.0)).length() < 0.001);
        assert!(goal.is_static);

        let ball = bodies.iter().find(|b| b.label == BodyLabel::Ball).unwrap();
        assert_eq!(ball.pos, Vec2::new(50.0, 50.0));
        assert_eq!(ball.radius(), Some(25.0));
        assert!(!ball.is_static);
    }

    #[test]
    fn test_non_square_cells() {
        let maze = generate(4, 8, &mut Pcg32::seed_from_u64(9)).unwrap();
        let layout = ArenaLayout {
            width: 800.0,
            height: 200.0,
            wall_thickness: 10.0,
        };
        assert_eq!(layout.unit(&maze), Vec2::new(100.0, 50.0));
        let bodies = build_bodies(&maze, &layout, 10);
        let ball = bodies.iter().find(|b| b.label == BodyLabel::Ball).unwrap();
        assert_eq!(ball.radius(), Some(12.5));
        assert_eq!(bodies[0].id, 10);
    }
}
