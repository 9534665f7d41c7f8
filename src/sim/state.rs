//! Game state and core simulation types
//!
//! Everything a simulation step reads or writes lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::clamp;

/// Current mode of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    /// Title screen, waiting for the first start
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for a restart
    Over,
}

/// Things that happened during a step, for the session and UI to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A new run began
    Started,
    /// The player collided with an obstacle; `score` is the floored final score
    GameOver { score: u64 },
    ObstacleSpawned,
    /// An obstacle fell past the bottom of the arena
    ObstacleCleared,
}

/// Color tag for sim entities (resolved to RGBA by the renderer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    /// HSL hue in degrees at 80% saturation, 60% lightness
    Hue(u16),
    /// Packed 0xRRGGBB
    Rgb(u32),
}

impl Tint {
    pub const PLAYER: Tint = Tint::Rgb(PLAYER_COLOR);
    pub const IMPACT: Tint = Tint::Rgb(IMPACT_COLOR);
}

/// Play area in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    /// Size multiplier for obstacles and particles
    pub scale: f32,
}

impl Arena {
    /// Build an arena from a viewport size, enforcing the minimum play area
    pub fn from_viewport(width: f32, height: f32) -> Self {
        let width = width.max(MIN_ARENA_WIDTH);
        let height = height.max(MIN_ARENA_HEIGHT);
        Self {
            width,
            height,
            scale: width.min(height) / SCALE_REFERENCE,
        }
    }

    /// Clamp a point into the arena, keeping `margin` from every edge
    pub fn clamp_point(&self, p: Vec2, margin: f32) -> Vec2 {
        Vec2::new(
            clamp(p.x, margin, self.width - margin),
            clamp(p.y, margin, self.height - margin),
        )
    }

    /// Whether a circle lies fully inside the arena
    #[cfg(test)]
    pub fn contains_circle(&self, center: Vec2, radius: f32) -> bool {
        center.x >= radius
            && center.x <= self.width - radius
            && center.y >= radius
            && center.y <= self.height - radius
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::from_viewport(MIN_ARENA_WIDTH, MIN_ARENA_HEIGHT)
    }
}

/// The player's circle
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Base movement speed; keyboard acceleration is a multiple of this
    pub speed: f32,
    pub tint: Tint,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            tint: Tint::PLAYER,
        }
    }
}

impl Player {
    /// Put the player back on the start row, at rest
    pub fn reset(&mut self, arena: &Arena) {
        self.pos = Vec2::new(arena.width / 2.0, arena.height * PLAYER_START_Y);
        self.vel = Vec2::ZERO;
    }

    /// Apply one frame of steering: keyboard thrust plus pointer seek,
    /// friction damping, integration and arena clamping.
    pub fn steer(&mut self, dir: Vec2, target: Option<Vec2>, arena: &Arena, dt: f32) {
        let mut acc = dir * self.speed * PLAYER_ACCEL_FACTOR;

        if let Some(target) = target {
            let target = arena.clamp_point(target, 0.0);
            acc += (target - self.pos) * POINTER_SEEK_GAIN;
        }

        self.vel += acc * dt;
        self.vel -= self.vel * PLAYER_FRICTION * dt;
        self.pos += self.vel * dt;
        self.pos = arena.clamp_point(self.pos, self.radius);
    }
}

/// A falling rectangular hazard
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// Center position
    pub pos: Vec2,
    /// Full width and height
    pub size: Vec2,
    /// Fall speed (pixels/s, positive is down)
    pub fall_speed: f32,
    /// Horizontal drift (pixels/s)
    pub drift: f32,
    pub tint: Tint,
}

impl Obstacle {
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Move by one frame and bounce the drift off the side walls
    pub fn advance(&mut self, arena: &Arena, dt: f32) {
        self.pos.y += self.fall_speed * dt;
        self.pos.x += self.drift * dt;

        let half_w = self.size.x * 0.5;
        if self.pos.x < half_w {
            self.drift = self.drift.abs();
        } else if self.pos.x > arena.width - half_w {
            self.drift = -self.drift.abs();
        }
    }

    /// Whether the obstacle has fallen far enough below the arena to be removed
    pub fn is_past(&self, arena: &Arena) -> bool {
        self.pos.y - self.size.y > arena.height + DESPAWN_MARGIN
    }
}

/// A purely cosmetic particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Seconds since spawn
    pub age: f32,
    /// Seconds until removal
    pub life: f32,
    pub radius: f32,
    pub tint: Tint,
}

impl Particle {
    /// Fraction of life used, 0 at spawn and 1 at expiry
    pub fn progress(&self) -> f32 {
        if self.life <= 0.0 {
            1.0
        } else {
            (self.age / self.life).clamp(0.0, 1.0)
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub arena: Arena,
    pub mode: GameMode,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub particles: Vec<Particle>,
    /// Survival score (seconds × 10)
    pub score: f32,
    /// Seconds until the next spawn
    pub spawn_timer: f32,
    /// Particles beyond this count are not spawned
    pub particle_cap: usize,
    pub rng: Pcg32,
}

impl World {
    /// Create a world in menu mode with the given RNG seed
    pub fn new(arena: Arena, seed: u64) -> Self {
        let mut player = Player::default();
        player.reset(&arena);
        Self {
            arena,
            mode: GameMode::Menu,
            player,
            obstacles: Vec::new(),
            particles: Vec::new(),
            score: 0.0,
            spawn_timer: 0.0,
            particle_cap: MAX_PARTICLES,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Clear the run: player to start, empty collections, zero score and timer
    pub fn reset(&mut self) {
        self.player.reset(&self.arena);
        self.obstacles.clear();
        self.particles.clear();
        self.score = 0.0;
        self.spawn_timer = 0.0;
    }

    /// Adopt a new viewport size, keeping the player inside it
    pub fn resize(&mut self, arena: Arena) {
        self.arena = arena;
        self.player.pos = arena.clamp_point(self.player.pos, self.player.radius);
    }

    pub fn is_playing(&self) -> bool {
        self.mode == GameMode::Playing
    }

    /// Score as shown to the player
    pub fn display_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_minimums() {
        let arena = Arena::from_viewport(100.0, 100.0);
        assert_eq!(arena.width, 320.0);
        assert_eq!(arena.height, 480.0);
        assert!((arena.scale - 320.0 / 600.0).abs() < 1e-6);

        let arena = Arena::from_viewport(1200.0, 900.0);
        assert_eq!(arena.width, 1200.0);
        assert!((arena.scale - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_player_reset_position() {
        let arena = Arena::from_viewport(800.0, 600.0);
        let world = World::new(arena, 1);
        assert_eq!(world.player.pos, Vec2::new(400.0, 480.0));
        assert_eq!(world.player.vel, Vec2::ZERO);
        assert_eq!(world.mode, GameMode::Menu);
    }

    #[test]
    fn test_player_keyboard_thrust() {
        let arena = Arena::from_viewport(800.0, 600.0);
        let mut player = Player::default();
        player.reset(&arena);
        let start = player.pos;

        player.steer(Vec2::new(1.0, 0.0), None, &arena, 0.016);
        assert!(player.pos.x > start.x);
        assert_eq!(player.pos.y, start.y);

        // Opposing thrust cancels, friction bleeds off velocity
        let vel = player.vel;
        player.steer(Vec2::ZERO, None, &arena, 0.016);
        assert!(player.vel.length() < vel.length());
    }

    #[test]
    fn test_player_pointer_seek() {
        let arena = Arena::from_viewport(800.0, 600.0);
        let mut player = Player::default();
        player.reset(&arena);

        // Target off-arena gets clamped, but the seek still pulls up-left
        for _ in 0..30 {
            player.steer(Vec2::ZERO, Some(Vec2::new(-500.0, -500.0)), &arena, 0.016);
        }
        assert!(player.pos.x < 400.0);
        assert!(player.pos.y < 480.0);
        assert!(arena.contains_circle(player.pos, player.radius));
    }

    #[test]
    fn test_player_clamped_to_arena() {
        let arena = Arena::from_viewport(800.0, 600.0);
        let mut player = Player::default();
        player.reset(&arena);
        for _ in 0..200 {
            player.steer(Vec2::new(1.0, 1.0), None, &arena, 0.033);
        }
        assert_eq!(player.pos, Vec2::new(800.0 - 14.0, 600.0 - 14.0));
    }

    #[test]
    fn test_obstacle_wall_bounce() {
        let arena = Arena::from_viewport(800.0, 600.0);
        let mut obstacle = Obstacle {
            pos: Vec2::new(12.0, 0.0),
            size: Vec2::new(30.0, 20.0),
            fall_speed: 140.0,
            drift: -20.0,
            tint: Tint::Hue(190),
        };
        obstacle.advance(&arena, 0.016);
        assert!(obstacle.drift > 0.0);

        obstacle.pos.x = 790.0;
        obstacle.advance(&arena, 0.016);
        assert!(obstacle.drift < 0.0);

        // Already heading inward: drift sign is kept
        obstacle.pos.x = 790.0;
        obstacle.advance(&arena, 0.016);
        assert!(obstacle.drift < 0.0);
    }

    #[test]
    fn test_obstacle_is_past() {
        let arena = Arena::from_viewport(800.0, 600.0);
        let mut obstacle = Obstacle {
            pos: Vec2::new(400.0, 660.0),
            size: Vec2::new(30.0, 20.0),
            fall_speed: 140.0,
            drift: 0.0,
            tint: Tint::Hue(0),
        };
        assert!(!obstacle.is_past(&arena));
        obstacle.pos.y = 661.0;
        assert!(obstacle.is_past(&arena));
    }

    #[test]
    fn test_particle_progress() {
        let particle = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            gravity: 0.0,
            age: 0.25,
            life: 0.5,
            radius: 1.0,
            tint: Tint::IMPACT,
        };
        assert!((particle.progress() - 0.5).abs() < 1e-6);
    }
}
