//! Procedural maze placement
//!
//! Best-effort rejection sampling: walls are dropped at random and kept only
//! if they clear every safe area and every wall already placed. The attempt
//! budget bounds the work, so a crowded world simply ends up with fewer walls.

use glam::Vec2;
use rand::Rng;

use super::rect::Rect;
use crate::tuning::MazeTuning;

/// Number of walls a world of this size asks for
pub fn target_wall_count(maze: &MazeTuning, world: Vec2) -> usize {
    let area_scale = (world.x * world.y) / (maze.baseline_width * maze.baseline_height);
    (maze.baseline_walls as f32 * area_scale) as usize
}

/// Place walls inside `world`, keeping clear of `safe_areas`
pub fn generate_walls(
    rng: &mut impl Rng,
    maze: &MazeTuning,
    world: Vec2,
    safe_areas: &[Rect],
) -> Vec<Rect> {
    let target = target_wall_count(maze, world);
    // Every wall costs at least one attempt
    let mut walls: Vec<Rect> = Vec::with_capacity(target.min(maze.max_attempts as usize));

    // Sampling range for the top-left corner; collapses to the margin when
    // the world is too small to fit a wall.
    let max_x = (world.x - maze.wall_thickness - maze.edge_margin).max(maze.edge_margin);
    let max_y = (world.y - maze.wall_length - maze.edge_margin).max(maze.edge_margin);

    let mut attempts = 0;
    while walls.len() < target && attempts < maze.max_attempts {
        attempts += 1;
        let x = rng.random_range(maze.edge_margin..=max_x).floor();
        let y = rng.random_range(maze.edge_margin..=max_y).floor();

        let mut candidate = Rect::new(x, y, maze.wall_thickness, maze.wall_length);
        if rng.random_bool(0.5) {
            candidate = candidate.rotated();
        }

        let blocked = safe_areas.iter().any(|area| area.intersects(&candidate))
            || walls.iter().any(|wall| wall.intersects(&candidate));
        if !blocked {
            walls.push(candidate);
        }
    }

    if walls.len() < target {
        log::debug!(
            "Maze placed {}/{} walls in {} attempts",
            walls.len(),
            target,
            attempts
        );
    }
    walls
}
