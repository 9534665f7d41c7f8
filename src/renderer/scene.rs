//! Frame assembly: turns a world snapshot into one vertex list
//!
//! Draw order is grid, player glow, player, obstacles, particles.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors, tint_color};
use crate::settings::Settings;
use crate::sim::{Arena, World};

/// Grid cell size before arena scaling
const GRID_SPACING: f32 = 32.0;
/// Glow gradient runs from 0.2r to 2.2r, clipped at 2.1r
const GLOW_INNER: f32 = 0.2;
const GLOW_OUTER: f32 = 2.2;
const GLOW_CLIP: f32 = 2.1;
/// Obstacle sway: sin(y * FREQ) * AMPLITUDE radians
const SWAY_FREQ: f32 = 0.01;
const SWAY_AMPLITUDE: f32 = 0.08;
const CORNER_RADIUS: f32 = 10.0;
const CORNER_SEGMENTS: u32 = 3;
const PARTICLE_SEGMENTS: u32 = 8;

/// Build every vertex for the current frame
pub fn build_frame(world: &World, settings: &Settings) -> Vec<Vertex> {
    let segments = settings.quality.circle_segments();
    let mut vertices = Vec::new();

    if settings.grid {
        grid(&world.arena, &mut vertices);
    }

    let player = &world.player;
    if settings.player_glow {
        let inner = player.radius * GLOW_INNER;
        let clip = player.radius * GLOW_CLIP;
        let t = (clip - inner) / (player.radius * GLOW_OUTER - inner);
        let mut edge = colors::PLAYER_GLOW;
        edge[3] *= 1.0 - t;
        vertices.extend(shapes::radial_glow(
            player.pos,
            inner,
            clip,
            colors::PLAYER_GLOW,
            edge,
            segments,
        ));
    }
    vertices.extend(shapes::circle(
        player.pos,
        player.radius,
        tint_color(player.tint, 1.0),
        segments,
    ));

    let scale = world.arena.scale;
    for obstacle in &world.obstacles {
        let half = obstacle.half_extents();
        let angle = if settings.effective_sway() {
            (obstacle.pos.y * SWAY_FREQ).sin() * SWAY_AMPLITUDE
        } else {
            0.0
        };
        let corner = (CORNER_RADIUS * scale).min(obstacle.size.y * 0.25);
        vertices.extend(shapes::rounded_rect(
            obstacle.pos,
            half,
            corner,
            angle,
            tint_color(obstacle.tint, 1.0),
            CORNER_SEGMENTS,
        ));
    }

    if settings.particles {
        for particle in world.particles.iter().take(settings.max_particles()) {
            let alpha = 1.0 - particle.progress();
            vertices.extend(shapes::circle(
                particle.pos,
                particle.radius,
                tint_color(particle.tint, alpha),
                PARTICLE_SEGMENTS,
            ));
        }
    }

    vertices
}

/// One-pixel grid lines, offset so the pattern hugs the bottom-right edge
fn grid(arena: &Arena, vertices: &mut Vec<Vertex>) {
    let spacing = GRID_SPACING * arena.scale;
    if spacing <= 0.0 {
        return;
    }

    let mut x = arena.width % spacing;
    while x < arena.width {
        vertices.extend(shapes::line(
            Vec2::new(x, 0.0),
            Vec2::new(x, arena.height),
            1.0,
            colors::GRID,
        ));
        x += spacing;
    }

    let mut y = arena.height % spacing;
    while y < arena.height {
        vertices.extend(shapes::line(
            Vec2::new(0.0, y),
            Vec2::new(arena.width, y),
            1.0,
            colors::GRID,
        ));
        y += spacing;
    }
}
