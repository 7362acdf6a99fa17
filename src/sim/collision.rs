//! Player collision tests
//!
//! The player is a circle; obstacles are axis-aligned boxes and the walls
//! are vertical planes at x = ±WALL_X. Contacts report the touch point so
//! the game-over path can snap the player onto the obstacle.

use glam::Vec2;

use super::pool::ObstacleSlot;

/// Which side boundary was struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Right,
}

/// Check the player circle against the side walls.
/// Returns the wall and the contact point on it.
pub fn player_wall_collision(pos: Vec2, radius: f32, wall_x: f32) -> Option<(WallSide, Vec2)> {
    if pos.x - radius <= -wall_x {
        Some((WallSide::Left, Vec2::new(-wall_x, pos.y)))
    } else if pos.x + radius >= wall_x {
        Some((WallSide::Right, Vec2::new(wall_x, pos.y)))
    } else {
        None
    }
}

/// Check the player circle against one obstacle box.
/// Returns the contact point (closest point on the box) on overlap.
pub fn player_obstacle_collision(pos: Vec2, radius: f32, slot: &ObstacleSlot) -> Option<Vec2> {
    let half = slot.kind.half_extents();
    let min = slot.pos - half;
    let max = slot.pos + half;

    let closest = pos.clamp(min, max);
    if pos.distance_squared(closest) <= radius * radius {
        Some(closest)
    } else {
        None
    }
}
