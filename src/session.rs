//! Game session
//!
//! The one context object the frame driver and input callbacks talk to. It
//! owns the world, input flags, settings, best score and the store they
//! persist to.

use glam::Vec2;

use crate::best_score::BestScore;
use crate::platform::{InputState, KeyAction, KeyValueStore};
use crate::settings::Settings;
use crate::sim::{self, Arena, GameEvent, GameMode, World, autopilot, particles};

pub struct Session<S: KeyValueStore> {
    pub world: World,
    pub input: InputState,
    pub best: BestScore,
    pub settings: Settings,
    /// Demo steering replaces player input while set
    pub autopilot: bool,
    /// Final score of the most recent finished run
    pub last_score: Option<u64>,
    store: S,
    events: Vec<GameEvent>,
}

impl<S: KeyValueStore> Session<S> {
    /// Build a session in menu mode, reading persisted state from `store`
    pub fn new(arena: Arena, seed: u64, store: S) -> Self {
        let best = BestScore::load(&store);
        let settings = Settings::load(&store);
        let mut world = World::new(arena, seed);
        world.particle_cap = settings.max_particles();
        particles::seed_ambient(&mut world);

        Self {
            world,
            input: InputState::new(),
            best,
            settings,
            autopilot: false,
            last_score: None,
            store,
            events: Vec::new(),
        }
    }

    pub fn mode(&self) -> GameMode {
        self.world.mode
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start (or restart) a run
    pub fn start(&mut self) {
        sim::start(&mut self.world, &mut self.events);
    }

    /// Key press; returns true when it started a run. Settings keys apply
    /// and persist immediately.
    pub fn key_down(&mut self, key: &str, repeat: bool) -> bool {
        match self.input.key_down(key, repeat) {
            KeyAction::Start if !self.world.is_playing() => {
                self.start();
                true
            }
            KeyAction::ToggleAutopilot => {
                self.autopilot = !self.autopilot;
                log::info!("Autopilot: {}", self.autopilot);
                false
            }
            KeyAction::CycleQuality => {
                let mut settings = self.settings.clone();
                settings.apply_preset(settings.quality.next());
                log::info!("Quality: {}", settings.quality.as_str());
                self.set_settings(settings);
                false
            }
            KeyAction::Toggle(which) => {
                let mut settings = self.settings.clone();
                let on = settings.toggle(which);
                log::info!("{:?}: {}", which, on);
                self.set_settings(settings);
                false
            }
            KeyAction::Start | KeyAction::None => false,
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    /// Pointer press at `pos`; starts a run when not playing
    pub fn pointer_down(&mut self, pos: Vec2) -> bool {
        self.input.pointer_down(pos);
        if self.world.is_playing() {
            return false;
        }
        self.start();
        true
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        self.input.pointer_move(pos);
    }

    pub fn pointer_up(&mut self) {
        self.input.pointer_up();
    }

    /// Run one frame of simulation and drain everything that happened since
    /// the previous frame (including starts triggered by input callbacks)
    pub fn frame(&mut self, dt: f32) -> Vec<GameEvent> {
        let input = if self.autopilot {
            autopilot::steer(&self.world)
        } else {
            self.input.snapshot()
        };

        sim::tick(&mut self.world, &input, dt, &mut self.events);

        for event in &self.events {
            if let GameEvent::GameOver { score } = *event {
                self.last_score = Some(score);
                self.best.record(score, &mut self.store);
            }
        }

        std::mem::take(&mut self.events)
    }

    /// Adopt a new viewport size
    pub fn resize(&mut self, arena: Arena) {
        self.world.resize(arena);
    }

    /// Replace settings, applying and persisting them
    pub fn set_settings(&mut self, settings: Settings) {
        self.world.particle_cap = settings.max_particles();
        let cap = self.world.particle_cap;
        self.world.particles.truncate(cap);
        settings.save(&mut self.store);
        self.settings = settings;
    }
}
