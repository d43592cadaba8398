//! Collision detection and response for axis-aligned walls
//!
//! The maze only contains two shapes: rectangles (borders, walls, goal) and a
//! single circular ball. Walls never rotate, so every test is against an
//! axis-aligned box.

use glam::Vec2;

/// Result of an overlap check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Whether the shapes overlap
    pub hit: bool,
    /// Separation direction for the first shape (unit length when hit)
    pub normal: Vec2,
    /// Overlap depth along `normal`
    pub penetration: f32,
}

impl Contact {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check a circle against an axis-aligned rectangle
///
/// The normal points from the rectangle toward the circle. When the circle's
/// centre is inside the rectangle it is pushed out through the nearest face.
pub fn circle_rect(center: Vec2, radius: f32, rect_center: Vec2, half_extents: Vec2) -> Contact {
    let offset = center - rect_center;
    let closest = offset.clamp(-half_extents, half_extents);
    let delta = offset - closest;
    let dist_sq = delta.length_squared();

    if dist_sq > 0.0 {
        if dist_sq >= radius * radius {
            return Contact::miss();
        }
        let dist = dist_sq.sqrt();
        return Contact {
            hit: true,
            normal: delta / dist,
            penetration: radius - dist,
        };
    }

    // Centre inside the box: leave through the face with the least overlap
    let overlap = half_extents - offset.abs();
    if overlap.x < overlap.y {
        Contact {
            hit: true,
            normal: Vec2::new(sign(offset.x), 0.0),
            penetration: overlap.x + radius,
        }
    } else {
        Contact {
            hit: true,
            normal: Vec2::new(0.0, sign(offset.y)),
            penetration: overlap.y + radius,
        }
    }
}

/// Check two axis-aligned rectangles, separating along the shallower axis
///
/// The normal points from `b` toward `a`.
pub fn rect_rect(a_center: Vec2, a_half: Vec2, b_center: Vec2, b_half: Vec2) -> Contact {
    let offset = a_center - b_center;
    let overlap = (a_half + b_half) - offset.abs();

    if overlap.x <= 0.0 || overlap.y <= 0.0 {
        return Contact::miss();
    }

    if overlap.x < overlap.y {
        Contact {
            hit: true,
            normal: Vec2::new(sign(offset.x), 0.0),
            penetration: overlap.x,
        }
    } else {
        Contact {
            hit: true,
            normal: Vec2::new(0.0, sign(offset.y)),
            penetration: overlap.y,
        }
    }
}

/// Zero counts as positive so a perfectly centred overlap still separates
#[inline]
fn sign(v: f32) -> f32 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

/// Cancel the part of `velocity` heading into a surface
///
/// Velocity already moving away from the surface is left alone. With
/// `restitution` 0 the body slides along the surface; 1 is a perfect bounce.
pub fn resolve_velocity(velocity: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    let approach = velocity.dot(normal);
    if approach >= 0.0 {
        return velocity;
    }
    velocity - (1.0 + restitution) * approach * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_rect_miss() {
        let result = circle_rect(
            Vec2::new(100.0, 0.0),
            10.0,
            Vec2::ZERO,
            Vec2::new(50.0, 10.0),
        );
        assert!(!result.hit);
    }

    #[test]
    fn test_circle_rect_face_hit() {
        // Circle just right of the box's right face
        let result = circle_rect(
            Vec2::new(55.0, 0.0),
            10.0,
            Vec2::ZERO,
            Vec2::new(50.0, 10.0),
        );
        assert!(result.hit);
        assert!((result.normal - Vec2::X).length() < 0.001);
        assert!((result.penetration - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_circle_rect_corner_hit() {
        let result = circle_rect(
            Vec2::new(53.0, 14.0),
            6.0,
            Vec2::ZERO,
            Vec2::new(50.0, 10.0),
        );
        assert!(result.hit);
        assert!((result.normal - Vec2::new(0.6, 0.8)).length() < 0.001);
        assert!((result.penetration - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_circle_center_inside_rect() {
        // Centre inside, closer to the top face (y = -10)
        let result = circle_rect(
            Vec2::new(0.0, -8.0),
            4.0,
            Vec2::ZERO,
            Vec2::new(50.0, 10.0),
        );
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::new(0.0, -1.0));
        assert!((result.penetration - 6.0).abs() < 0.001);
    }

    #[test]
    fn test_rect_rect() {
        let half = Vec2::new(10.0, 10.0);
        assert!(!rect_rect(Vec2::new(25.0, 0.0), half, Vec2::ZERO, half).hit);

        // Resting slightly into a floor below
        let result = rect_rect(
            Vec2::new(0.0, -18.0),
            half,
            Vec2::ZERO,
            Vec2::new(100.0, 10.0),
        );
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::new(0.0, -1.0));
        assert!((result.penetration - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_resolve_velocity() {
        // Moving right into a wall whose normal points left
        let v = resolve_velocity(Vec2::new(100.0, 30.0), Vec2::new(-1.0, 0.0), 0.0);
        assert!(v.x.abs() < 0.001);
        assert!((v.y - 30.0).abs() < 0.001);

        let bounced = resolve_velocity(Vec2::new(100.0, 0.0), Vec2::new(-1.0, 0.0), 1.0);
        assert!((bounced.x + 100.0).abs() < 0.001);

        // Already separating
        let away = resolve_velocity(Vec2::new(-100.0, 0.0), Vec2::new(-1.0, 0.0), 0.0);
        assert_eq!(away, Vec2::new(-100.0, 0.0));
    }
}
