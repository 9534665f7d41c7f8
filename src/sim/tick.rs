//! Per-frame simulation step
//!
//! Advances the world by one variable timestep. Outside `Playing` the step
//! does nothing, so menu and game-over particles stay frozen on screen.

use glam::Vec2;

use super::collision::first_hit;
use super::difficulty::{fall_speed, size_factor, spawn_interval};
use super::particles::{self, burst, random_hue};
use super::state::{GameEvent, GameMode, Obstacle, Tint, World};
use crate::consts::*;
use crate::rand_range;

/// Input sampled once per frame (consistent for the whole step)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Pointer/touch seek target while a press is held
    pub pointer: Option<Vec2>,
}

impl TickInput {
    /// Directional intent; opposing flags cancel
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Begin a new run from any mode
pub fn start(world: &mut World, events: &mut Vec<GameEvent>) {
    world.reset();
    world.mode = GameMode::Playing;
    events.push(GameEvent::Started);
    log::info!("Run started");
}

/// Advance the world by `dt` seconds
pub fn tick(world: &mut World, input: &TickInput, dt: f32, events: &mut Vec<GameEvent>) {
    if world.mode != GameMode::Playing {
        return;
    }

    world.score += dt * SCORE_RATE;

    let arena = world.arena;
    world
        .player
        .steer(input.direction(), input.pointer, &arena, dt);

    // Spawn
    world.spawn_timer -= dt;
    if world.spawn_timer <= 0.0 {
        let jitter = rand_range(&mut world.rng, SPAWN_JITTER_MIN, SPAWN_JITTER_MAX);
        world.spawn_timer = spawn_interval(world.score) * jitter;
        spawn_obstacle(world);
        events.push(GameEvent::ObstacleSpawned);
    }

    // Obstacles
    for obstacle in &mut world.obstacles {
        obstacle.advance(&arena, dt);
    }

    if let Some(idx) = first_hit(world.player.pos, world.player.radius, &world.obstacles) {
        log::debug!("Hit obstacle {} at {:?}", idx, world.obstacles[idx].pos);
        game_over(world, events);
    }

    let mut cleared = Vec::new();
    world.obstacles.retain(|o| {
        if o.is_past(&arena) {
            cleared.push((o.pos.x, o.tint));
            false
        } else {
            true
        }
    });
    for (x, tint) in cleared {
        burst(world, Vec2::new(x, arena.height), tint);
        events.push(GameEvent::ObstacleCleared);
    }

    // Particles
    particles::update(&mut world.particles, dt);
}

/// Create one obstacle above the arena, sized and paced by the current score
pub fn spawn_obstacle(world: &mut World) {
    let arena = world.arena;
    let base = size_factor(world.score);
    let speed = fall_speed(world.score);

    let rng = &mut world.rng;
    let w = rand_range(rng, OBSTACLE_WIDTH_MIN, OBSTACLE_WIDTH_MAX) * arena.scale * base;
    let h = rand_range(rng, OBSTACLE_HEIGHT_MIN, OBSTACLE_HEIGHT_MAX) * arena.scale * base;
    let x = rand_range(rng, w, arena.width - w);
    let drift = rand_range(rng, -OBSTACLE_DRIFT, OBSTACLE_DRIFT) * arena.scale;
    let tint = random_hue(rng);

    world.obstacles.push(Obstacle {
        pos: Vec2::new(x, -h),
        size: Vec2::new(w, h),
        fall_speed: speed,
        drift,
        tint,
    });
}

/// End the run: impact burst, freeze, report the final score
fn game_over(world: &mut World, events: &mut Vec<GameEvent>) {
    world.mode = GameMode::Over;
    let origin = world.player.pos;
    burst(world, origin, Tint::IMPACT);
    let score = world.display_score();
    events.push(GameEvent::GameOver { score });
    log::info!("Game over at score {}", score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Arena;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn playing_world(seed: u64) -> World {
        let mut world = World::new(Arena::from_viewport(800.0, 600.0), seed);
        start(&mut world, &mut Vec::new());
        world
    }

    fn blocker_on_player(world: &World) -> Obstacle {
        Obstacle {
            pos: world.player.pos,
            size: Vec2::new(20.0, 20.0),
            fall_speed: 0.0,
            drift: 0.0,
            tint: Tint::Hue(0),
        }
    }

    #[test]
    fn test_direction_cancels() {
        let input = TickInput {
            left: true,
            right: true,
            up: true,
            ..Default::default()
        };
        assert_eq!(input.direction(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_tick_noop_outside_playing() {
        let mut world = World::new(Arena::from_viewport(800.0, 600.0), 5);
        let mut events = Vec::new();
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        let before = world.player.pos;
        tick(&mut world, &input, DT, &mut events);
        assert_eq!(world.score, 0.0);
        assert_eq!(world.player.pos, before);
        assert!(world.obstacles.is_empty());
        assert!(events.is_empty());

        world.mode = GameMode::Over;
        tick(&mut world, &input, DT, &mut events);
        assert_eq!(world.score, 0.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_first_step_spawns() {
        let mut world = playing_world(9);
        let mut events = Vec::new();
        tick(&mut world, &TickInput::default(), DT, &mut events);
        assert_eq!(world.obstacles.len(), 1);
        assert!(events.contains(&GameEvent::ObstacleSpawned));
        assert!(world.spawn_timer > 0.0);
    }

    #[test]
    fn test_spawn_timer_jitter_band() {
        let mut world = playing_world(11);
        let mut events = Vec::new();
        tick(&mut world, &TickInput::default(), DT, &mut events);
        // Score is tiny after one step, so the base interval is ~0.75
        let base = spawn_interval(world.score);
        assert!(world.spawn_timer >= base * SPAWN_JITTER_MIN - 1e-5);
        assert!(world.spawn_timer <= base * SPAWN_JITTER_MAX + 1e-5);
    }

    #[test]
    fn test_spawned_obstacle_bounds() {
        let mut world = playing_world(3);
        for score in [0.0, 60.0, 120.0, 500.0] {
            world.score = score;
            world.obstacles.clear();
            for _ in 0..50 {
                spawn_obstacle(&mut world);
            }
            for o in &world.obstacles {
                assert!(o.pos.x >= o.size.x && o.pos.x <= world.arena.width - o.size.x);
                assert_eq!(o.pos.y, -o.size.y);
                assert!(o.fall_speed <= FALL_SPEED_END);
                assert!(o.drift.abs() <= OBSTACLE_DRIFT * world.arena.scale);
            }
        }
    }

    #[test]
    fn test_collision_ends_run() {
        let mut world = playing_world(21);
        world.spawn_timer = 10.0;
        let blocker = blocker_on_player(&world);
        world.obstacles.push(blocker);
        world.score = 74.9;

        let mut events = Vec::new();
        tick(&mut world, &TickInput::default(), DT, &mut events);

        assert_eq!(world.mode, GameMode::Over);
        assert!(events.contains(&GameEvent::GameOver { score: 75 }));
        assert_eq!(world.particles.len(), BURST_COUNT);
        assert!(world.particles.iter().all(|p| p.tint == Tint::IMPACT));

        // Frozen afterwards
        let score = world.score;
        tick(&mut world, &TickInput::default(), DT, &mut events);
        assert_eq!(world.score, score);
    }

    #[test]
    fn test_restart_from_over_resets() {
        let mut world = playing_world(8);
        world.spawn_timer = 10.0;
        let blocker = blocker_on_player(&world);
        world.obstacles.push(blocker);
        let mut events = Vec::new();
        for _ in 0..10 {
            tick(&mut world, &TickInput::default(), DT, &mut events);
        }
        assert_eq!(world.mode, GameMode::Over);
        assert!(!world.obstacles.is_empty());
        assert!(!world.particles.is_empty());

        events.clear();
        start(&mut world, &mut events);
        assert_eq!(world.mode, GameMode::Playing);
        assert!(world.obstacles.is_empty());
        assert!(world.particles.is_empty());
        assert_eq!(world.score, 0.0);
        assert_eq!(world.spawn_timer, 0.0);
        assert_eq!(events, vec![GameEvent::Started]);
    }

    #[test]
    fn test_obstacle_despawn_bursts() {
        let mut world = playing_world(4);
        world.spawn_timer = 10.0;
        // Far from the player, already past the despawn line
        world.obstacles.push(Obstacle {
            pos: Vec2::new(50.0, 600.0 + 40.0 + 30.0),
            size: Vec2::new(20.0, 20.0),
            fall_speed: 140.0,
            drift: 0.0,
            tint: Tint::Hue(45),
        });
        let mut events = Vec::new();
        tick(&mut world, &TickInput::default(), DT, &mut events);

        assert!(world.obstacles.is_empty());
        assert!(events.contains(&GameEvent::ObstacleCleared));
        assert_eq!(world.particles.len(), BURST_COUNT);
        assert!(world.particles.iter().all(|p| p.tint == Tint::Hue(45)));
    }

    #[test]
    fn test_particles_hold_still_outside_playing() {
        let mut world = World::new(Arena::from_viewport(800.0, 600.0), 2);
        particles::seed_ambient(&mut world);
        let before: Vec<Vec2> = world.particles.iter().map(|p| p.pos).collect();

        let mut events = Vec::new();
        for _ in 0..120 {
            tick(&mut world, &TickInput::default(), MAX_FRAME_DT, &mut events);
        }
        assert_eq!(world.particles.len(), AMBIENT_COUNT);
        let after: Vec<Vec2> = world.particles.iter().map(|p| p.pos).collect();
        assert_eq!(after, before);
    }

    #[test]
    fn test_impact_burst_stays_after_game_over() {
        let mut world = playing_world(13);
        world.spawn_timer = 10.0;
        let blocker = blocker_on_player(&world);
        world.obstacles.push(blocker);

        let mut events = Vec::new();
        tick(&mut world, &TickInput::default(), DT, &mut events);
        assert_eq!(world.mode, GameMode::Over);

        for _ in 0..120 {
            tick(&mut world, &TickInput::default(), DT, &mut events);
        }
        assert_eq!(world.particles.len(), BURST_COUNT);
    }

    #[test]
    fn test_start_from_menu_zeroes_score() {
        let mut world = World::new(Arena::from_viewport(800.0, 600.0), 6);
        world.score = 42.5;
        world.spawn_timer = 3.0;
        let blocker = blocker_on_player(&world);
        world.obstacles.push(blocker);
        assert_eq!(world.mode, GameMode::Menu);

        let mut events = Vec::new();
        start(&mut world, &mut events);
        assert_eq!(world.mode, GameMode::Playing);
        assert_eq!(world.score, 0.0);
        assert_eq!(world.spawn_timer, 0.0);
        assert!(world.obstacles.is_empty());
        assert_eq!(events, vec![GameEvent::Started]);
    }

    proptest! {
        #[test]
        fn player_stays_in_arena(
            seed in any::<u64>(),
            steps in proptest::collection::vec(
                (0.001f32..=0.033, any::<[bool; 4]>(), proptest::option::of((-200.0f32..1200.0, -200.0f32..900.0))),
                1..120,
            ),
        ) {
            let mut world = playing_world(seed);
            let mut events = Vec::new();
            for (dt, [left, right, up, down], pointer) in steps {
                world.mode = GameMode::Playing;
                world.obstacles.clear();
                let input = TickInput {
                    left,
                    right,
                    up,
                    down,
                    pointer: pointer.map(|(x, y)| Vec2::new(x, y)),
                };
                tick(&mut world, &input, dt, &mut events);
                prop_assert!(world.arena.contains_circle(world.player.pos, world.player.radius));
            }
        }

        #[test]
        fn score_never_decreases(seed in any::<u64>(), dts in proptest::collection::vec(0.001f32..=0.033, 1..200)) {
            let mut world = playing_world(seed);
            let mut events = Vec::new();
            let mut last = world.score;
            for dt in dts {
                tick(&mut world, &TickInput::default(), dt, &mut events);
                prop_assert!(world.score >= last);
                last = world.score;
            }
        }
    }
}
