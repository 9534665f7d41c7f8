//! Input edge accumulation
//!
//! Key and pointer callbacks only flip flags here. Once per frame the game
//! takes a `TickInput` snapshot, so a whole step sees one consistent input.

use glam::Vec2;

use crate::settings::Toggle;
use crate::sim::TickInput;

/// A movement direction bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Arrow keys and WASD (either case)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            "ArrowUp" | "w" | "W" => Some(Direction::Up),
            "ArrowDown" | "s" | "S" => Some(Direction::Down),
            _ => None,
        }
    }
}

/// What a key press asks the game to do beyond movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    None,
    /// Space: start a run (only honored when not playing)
    Start,
    /// Toggle demo-mode steering
    ToggleAutopilot,
    /// Q: step to the next quality preset
    CycleQuality,
    /// Flip one display setting
    Toggle(Toggle),
}

/// Live input flags, mutated by event callbacks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    pointer_active: bool,
    pointer: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key pressed; auto-repeat events are ignored entirely
    pub fn key_down(&mut self, key: &str, repeat: bool) -> KeyAction {
        if repeat {
            return KeyAction::None;
        }
        if let Some(dir) = Direction::from_key(key) {
            self.set(dir, true);
        }
        match key {
            " " => KeyAction::Start,
            "i" | "I" => KeyAction::ToggleAutopilot,
            "q" | "Q" => KeyAction::CycleQuality,
            "g" | "G" => KeyAction::Toggle(Toggle::Grid),
            "p" | "P" => KeyAction::Toggle(Toggle::Particles),
            "f" | "F" => KeyAction::Toggle(Toggle::Fps),
            "m" | "M" => KeyAction::Toggle(Toggle::ReducedMotion),
            _ => KeyAction::None,
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(dir) = Direction::from_key(key) {
            self.set(dir, false);
        }
    }

    /// Press begins seek targeting at `pos` (arena coordinates)
    pub fn pointer_down(&mut self, pos: Vec2) {
        self.pointer_active = true;
        self.pointer = pos;
    }

    /// Moves only matter while a press is held
    pub fn pointer_move(&mut self, pos: Vec2) {
        if self.pointer_active {
            self.pointer = pos;
        }
    }

    pub fn pointer_up(&mut self) {
        self.pointer_active = false;
    }

    /// Drop everything held (e.g. on window blur)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Freeze the current flags into a per-frame input
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            up: self.up,
            down: self.down,
            pointer: self.pointer_active.then_some(self.pointer),
        }
    }

    fn set(&mut self, dir: Direction, held: bool) {
        match dir {
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
        }
    }
}
