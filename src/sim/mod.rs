//! Simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform dependencies:
//! - Variable timestep, clamped by the frame driver
//! - Seeded RNG owned by the world
//! - Events returned to the caller instead of side effects

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod particles;
pub mod state;
pub mod tick;

pub use collision::{circle_hits_obstacle, first_hit};
pub use state::{Arena, GameEvent, GameMode, Obstacle, Particle, Player, Tint, World};
pub use tick::{TickInput, spawn_obstacle, start, tick};
