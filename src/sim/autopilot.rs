//! Demo-mode steering
//!
//! Picks a `TickInput` that sidesteps whatever is about to land on the
//! player. Good enough for attract mode and headless runs, not a solver.

use glam::Vec2;

use super::state::{Obstacle, World};
use super::tick::TickInput;
use crate::consts::PLAYER_START_Y;

/// How far ahead (seconds of fall) an obstacle counts as a threat
const LOOKAHEAD_SECS: f32 = 1.2;
/// Dead zone around the target column/row before thrust engages
const DEAD_ZONE: f32 = 6.0;

/// Choose input for the current frame
pub fn steer(world: &World) -> TickInput {
    let player = &world.player;
    let arena = &world.arena;

    let target_x = match most_urgent_threat(world) {
        Some(threat) => {
            let danger = threat.half_extents().x + player.radius * 3.0;
            let left_gap = threat.pos.x - danger;
            let right_gap = threat.pos.x + danger;
            // Prefer the side with room; fall back to the wider side
            let left_ok = left_gap >= player.radius;
            let right_ok = right_gap <= arena.width - player.radius;
            match (left_ok, right_ok) {
                (true, true) => {
                    if player.pos.x < threat.pos.x {
                        left_gap
                    } else {
                        right_gap
                    }
                }
                (true, false) => left_gap,
                (false, true) => right_gap,
                (false, false) => {
                    if threat.pos.x > arena.width / 2.0 {
                        player.radius
                    } else {
                        arena.width - player.radius
                    }
                }
            }
        }
        None => arena.width / 2.0,
    };
    let target_y = arena.height * PLAYER_START_Y;

    let dx = target_x - player.pos.x;
    let dy = target_y - player.pos.y;
    TickInput {
        left: dx < -DEAD_ZONE,
        right: dx > DEAD_ZONE,
        up: dy < -DEAD_ZONE,
        down: dy > DEAD_ZONE,
        pointer: None,
    }
}

/// The obstacle above the player, in its lane, that will arrive soonest
fn most_urgent_threat(world: &World) -> Option<&Obstacle> {
    let player = &world.player;
    world
        .obstacles
        .iter()
        .filter(|o| is_threat(o, player.pos, player.radius))
        .min_by(|a, b| {
            time_to_reach(a, player.pos.y)
                .partial_cmp(&time_to_reach(b, player.pos.y))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

fn is_threat(obstacle: &Obstacle, player_pos: Vec2, radius: f32) -> bool {
    let half = obstacle.half_extents();
    let lane = half.x + radius * 3.0;
    let above = obstacle.pos.y - half.y < player_pos.y + radius;
    above
        && (obstacle.pos.x - player_pos.x).abs() < lane
        && time_to_reach(obstacle, player_pos.y) < LOOKAHEAD_SECS
}

fn time_to_reach(obstacle: &Obstacle, y: f32) -> f32 {
    if obstacle.fall_speed <= 0.0 {
        return f32::INFINITY;
    }
    ((y - obstacle.pos.y) / obstacle.fall_speed).max(0.0)
}
