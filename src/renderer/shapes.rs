//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::sim::{Body, BodyLabel, GameState, Shape};

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(center: Vec2, half_extents: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let min = center - half_extents;
    let max = center + half_extents;

    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

fn body_color(body: &Body) -> [f32; 4] {
    match body.label {
        BodyLabel::Border => colors::BORDER,
        BodyLabel::Wall if body.is_static => colors::WALL,
        BodyLabel::Wall => colors::WALL_FALLING,
        BodyLabel::Goal => colors::GOAL,
        BodyLabel::Ball => colors::BALL,
    }
}

/// Vertices for a whole frame, in arena pixel coordinates
pub fn scene(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    for body in &state.bodies {
        let color = body_color(body);
        match body.shape {
            Shape::Rect { half_extents } => vertices.extend(rect(body.pos, half_extents, color)),
            Shape::Circle { radius } => vertices.extend(circle(body.pos, radius, color, 32)),
        }
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_rect_covers_bounds() {
        let vertices = rect(Vec2::new(10.0, 20.0), Vec2::new(5.0, 2.0), colors::WALL);
        assert_eq!(vertices.len(), 6);
        for v in &vertices {
            assert!(v.position[0] == 5.0 || v.position[0] == 15.0);
            assert!(v.position[1] == 18.0 || v.position[1] == 22.0);
        }
    }

    #[test]
    fn test_circle_vertex_count() {
        let vertices = circle(Vec2::ZERO, 10.0, colors::BALL, 16);
        assert_eq!(vertices.len(), 48);
        for v in vertices.iter().skip(1).step_by(3) {
            let r = Vec2::from(v.position).length();
            assert!((r - 10.0).abs() < 0.001);
        }
    }

    #[test]
    fn test_scene_draws_every_body() {
        let state = GameState::new(&Settings::default(), 3).unwrap();
        let rects = state.bodies.len() - 1;
        assert_eq!(scene(&state).len(), rects * 6 + 32 * 3);
    }
}
