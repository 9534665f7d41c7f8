//! Cosmetic particle effects
//!
//! Nothing in gameplay reads particles; they only feed the renderer.

use glam::Vec2;
use rand::Rng;

use super::state::{Arena, Particle, Tint, World};
use crate::consts::*;
use crate::rand_range;

/// Pick a random obstacle palette hue
pub fn random_hue<R: Rng>(rng: &mut R) -> Tint {
    let idx = rng.random_range(0..OBSTACLE_HUES.len());
    Tint::Hue(OBSTACLE_HUES[idx])
}

/// Spawn an upward-biased burst of falling sparks at `origin`
///
/// Stops early once the world's particle cap is reached.
pub fn burst(world: &mut World, origin: Vec2, tint: Tint) {
    let scale = world.arena.scale;
    for _ in 0..BURST_COUNT {
        if world.particles.len() >= world.particle_cap {
            break;
        }
        let rng = &mut world.rng;
        let life = rand_range(rng, 0.4, 0.9);
        let radius = rand_range(rng, 1.0, 3.0) * scale;
        let vel = Vec2::new(
            rand_range(rng, -140.0, 140.0) * scale,
            rand_range(rng, -60.0, -160.0) * scale,
        );
        world.particles.push(Particle {
            pos: origin,
            vel,
            gravity: BURST_GRAVITY * scale,
            age: 0.0,
            life,
            radius,
            tint,
        });
    }
}

/// Scatter slow, weightless particles over the middle of the arena
pub fn seed_ambient(world: &mut World) {
    let Arena {
        width,
        height,
        scale,
    } = world.arena;
    for _ in 0..AMBIENT_COUNT {
        if world.particles.len() >= world.particle_cap {
            break;
        }
        let rng = &mut world.rng;
        let pos = Vec2::new(
            rand_range(rng, width * 0.2, width * 0.8),
            rand_range(rng, height * 0.2, height * 0.8),
        );
        let life = rand_range(rng, 1.2, 2.0);
        let age = rand_range(rng, 0.0, 0.9);
        let radius = rand_range(rng, 1.0, 2.0) * scale;
        let vel = Vec2::new(
            rand_range(rng, -20.0, 20.0) * scale,
            rand_range(rng, -30.0, 30.0) * scale,
        );
        let tint = random_hue(rng);
        world.particles.push(Particle {
            pos,
            vel,
            gravity: 0.0,
            age,
            life,
            radius,
            tint,
        });
    }
}

/// Age, expire and integrate particles
pub fn update(particles: &mut Vec<Particle>, dt: f32) {
    particles.retain_mut(|p| {
        p.age += dt;
        if p.age > p.life {
            return false;
        }
        p.vel.y += p.gravity * dt;
        p.pos += p.vel * dt;
        true
    });
}
