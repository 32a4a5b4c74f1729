//! Collision queries and the player movement resolver
//!
//! Queries here are pure: they read geometry and return answers. Damage and
//! events are applied by the caller from the returned outcome.

use glam::Vec2;

use super::rect::Rect;
use crate::clamp_to_bounds;
use crate::tuning::GoalHitbox;

/// Directional keys held this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MoveIntent {
    /// Per-axis direction in {-1, 0, 1}; opposite keys cancel
    pub fn axis(&self) -> Vec2 {
        let x = (self.right as i8 - self.left as i8) as f32;
        let y = (self.down as i8 - self.up as i8) as f32;
        Vec2::new(x, y)
    }
}

/// Result of resolving one movement step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    pub pos: Vec2,
    /// A wall blocked at least one probe this step
    pub wall_contact: bool,
}

/// Whether `rect` overlaps any of `walls`
#[inline]
pub fn hits_wall(rect: &Rect, walls: &[Rect]) -> bool {
    walls.iter().any(|wall| wall.intersects(rect))
}

/// Resolve a movement step against world bounds and walls
///
/// Each axis is tried on its own so the player slides along walls. If both
/// axes are blocked, a half step is tried on each axis so corners don't pin
/// the player in place.
pub fn resolve_move(
    pos: Vec2,
    intent: MoveIntent,
    speed: f32,
    dt: f32,
    size: f32,
    bounds: Vec2,
    walls: &[Rect],
) -> MoveOutcome {
    let half = size / 2.0;
    let target = clamp_to_bounds(pos + intent.axis() * speed * dt, half, bounds);
    let mut contact = false;
    let mut blocked = |p: Vec2| {
        let hit = hits_wall(&Rect::centered(p, size), walls);
        contact |= hit;
        hit
    };

    let mut new_pos = pos;
    if !blocked(Vec2::new(target.x, new_pos.y)) {
        new_pos.x = target.x;
    }
    if !blocked(Vec2::new(new_pos.x, target.y)) {
        new_pos.y = target.y;
    }

    if new_pos == pos && target != pos {
        let half_y = new_pos.y + (target.y - new_pos.y) * 0.5;
        if !blocked(Vec2::new(target.x, half_y)) {
            new_pos.y = half_y;
        }
        let half_x = new_pos.x + (target.x - new_pos.x) * 0.5;
        if !blocked(Vec2::new(half_x, target.y)) {
            new_pos.x = half_x;
        }
    }

    MoveOutcome {
        pos: clamp_to_bounds(new_pos, half, bounds),
        wall_contact: contact,
    }
}

/// Whether the player box has reached the security node
pub fn reaches_goal(player: &Rect, node_pos: Vec2, node_radius: f32, hitbox: GoalHitbox) -> bool {
    match hitbox {
        GoalHitbox::Square => player.intersects(&Rect::centered(node_pos, node_radius * 2.0)),
        GoalHitbox::Circle => player.center().distance(node_pos) < player.w / 2.0 + node_radius,
    }
}

/// Circle contact test: centres closer than the sum of radii
#[inline]
pub fn circles_touch(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}
