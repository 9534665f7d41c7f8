//! Collision detection between the player circle and obstacle boxes
//!
//! The test is intentionally approximate: it compares per-axis gaps against
//! the radius, which treats the rounded corners of the Minkowski sum as if
//! they were square, so hits register slightly early near corners.

use glam::Vec2;

use super::state::Obstacle;

/// Per-axis gap between a circle center and a box edge
///
/// Negative components mean the center is inside the box along that axis.
#[inline]
pub fn edge_gap(center: Vec2, box_center: Vec2, half_extents: Vec2) -> Vec2 {
    (center - box_center).abs() - half_extents
}

/// Check whether a circle overlaps an obstacle
pub fn circle_hits_obstacle(center: Vec2, radius: f32, obstacle: &Obstacle) -> bool {
    let gap = edge_gap(center, obstacle.pos, obstacle.half_extents());
    gap.x < radius && gap.y < radius
}

/// Index of the first obstacle the circle overlaps, if any
pub fn first_hit(center: Vec2, radius: f32, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles
        .iter()
        .position(|o| circle_hits_obstacle(center, radius, o))
}
