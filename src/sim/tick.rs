//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::collision::{circle_rect, rect_rect, resolve_velocity};
use super::state::{BodyLabel, GameEvent, GamePhase, GameState, Shape};
use crate::consts::*;
use crate::input::Nudge;

/// Upper bound on motion substeps within one tick
const MAX_MOTION_SUBSTEPS: u32 = 64;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Key presses since the last tick, in order
    pub nudges: Vec<Nudge>,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing | GamePhase::Won => {
                state.phase = GamePhase::Paused;
                return events;
            }
            GamePhase::Paused => {
                state.phase = if state.has_won() {
                    GamePhase::Won
                } else {
                    GamePhase::Playing
                };
            }
        }
    }

    if state.phase == GamePhase::Paused {
        return events;
    }

    state.time_ticks += 1;

    let step = state.velocity_step;
    if let Some(ball) = state.ball_mut() {
        for nudge in &input.nudges {
            ball.vel += nudge.velocity_delta(step);
        }
    }

    // Gravity and air drag
    let gravity = state.gravity;
    let drag = (1.0 - AIR_FRICTION).powf(dt / SIM_DT);
    for body in state.bodies.iter_mut().filter(|b| !b.is_static) {
        body.vel += gravity * dt;
        body.vel *= drag;
    }

    // Split fast motion so nothing skips through a wall
    let substeps = motion_substeps(state, dt);
    let sub_dt = dt / substeps as f32;
    let mut touched_goal = false;

    for _ in 0..substeps {
        for body in state.bodies.iter_mut().filter(|b| !b.is_static) {
            body.pos += body.vel * sub_dt;
        }
        touched_goal |= resolve_ball_contacts(state);
        settle_released_walls(state);
    }

    if touched_goal && state.phase == GamePhase::Playing {
        let tick = state.time_ticks;
        state.goal_reached_tick = Some(tick);
        state.phase = GamePhase::Won;
        state.gravity = Vec2::new(0.0, state.win_gravity);
        let count = state.release_walls();

        log::info!("Goal reached on tick {}, releasing {} walls", tick, count);

        events.push(GameEvent::GoalReached { tick });
        events.push(GameEvent::WallsReleased { count });
    }

    state.normalize_order();
    events
}

/// Substeps needed so no moving body travels more than half its thinnest extent per step
fn motion_substeps(state: &GameState, dt: f32) -> u32 {
    let mut feature = f32::INFINITY;
    let mut travel: f32 = 0.0;

    for body in state.bodies.iter().filter(|b| !b.is_static) {
        let extent = match body.shape {
            Shape::Circle { radius } => radius,
            Shape::Rect { half_extents } => half_extents.min_element(),
        };
        feature = feature.min(extent);
        travel = travel.max(body.vel.length() * dt);
    }

    if !feature.is_finite() || feature <= 0.0 || !travel.is_finite() {
        return 1;
    }

    ((travel / (feature * 0.5)).ceil() as u32).clamp(1, MAX_MOTION_SUBSTEPS)
}

/// Push the ball out of everything it overlaps
///
/// Returns true if one of the contacts was the goal.
fn resolve_ball_contacts(state: &mut GameState) -> bool {
    let Some(ball_idx) = state.bodies.iter().position(|b| b.label == BodyLabel::Ball) else {
        return false;
    };
    let ball = &state.bodies[ball_idx];
    let Some(radius) = ball.radius() else {
        return false;
    };

    let (mut pos, mut vel) = (ball.pos, ball.vel);
    let mut touched_goal = false;

    for (i, body) in state.bodies.iter().enumerate() {
        if i == ball_idx {
            continue;
        }
        let Some(half) = body.half_extents() else {
            continue;
        };

        let contact = circle_rect(pos, radius, body.pos, half);
        if !contact.hit {
            continue;
        }

        pos += contact.normal * contact.penetration;
        // Work relative to the other body so falling walls carry the ball
        vel = body.vel + resolve_velocity(vel - body.vel, contact.normal, RESTITUTION);

        if body.label == BodyLabel::Goal {
            touched_goal = true;
        }
    }

    let ball = &mut state.bodies[ball_idx];
    ball.pos = pos;
    ball.vel = vel;
    touched_goal
}

/// Keep released walls inside the arena and off the goal
///
/// Walls do not collide with each other.
fn settle_released_walls(state: &mut GameState) {
    let (min, max) = state.arena.interior();
    let goal = state
        .goal()
        .and_then(|g| g.half_extents().map(|half| (g.pos, half)));

    for wall in state
        .bodies
        .iter_mut()
        .filter(|b| b.label == BodyLabel::Wall && !b.is_static)
    {
        let Some(half) = wall.half_extents() else {
            continue;
        };

        if let Some((goal_pos, goal_half)) = goal {
            let contact = rect_rect(wall.pos, half, goal_pos, goal_half);
            if contact.hit {
                wall.pos += contact.normal * contact.penetration;
                wall.vel = resolve_velocity(wall.vel, contact.normal, 0.0);
            }
        }

        contain_axis(&mut wall.pos.x, &mut wall.vel.x, half.x, min.x, max.x);
        contain_axis(&mut wall.pos.y, &mut wall.vel.y, half.y, min.y, max.y);
    }
}

/// Clamp a span of `half` around `pos` into [min, max], stopping motion into the edge
fn contain_axis(pos: &mut f32, vel: &mut f32, half: f32, min: f32, max: f32) {
    if max - min <= 2.0 * half {
        // Wider than the arena: pin to the middle
        *pos = (min + max) / 2.0;
        *vel = 0.0;
    } else if *pos - half < min {
        *pos = min + half;
        *vel = vel.max(0.0);
    } else if *pos + half > max {
        *pos = max - half;
        *vel = vel.min(0.0);
    }
}
