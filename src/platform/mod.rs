//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events, folded into per-frame snapshots
//! - Storage (LocalStorage on web, in-memory elsewhere)
//! - Frame timing

pub mod input;
pub mod storage;
pub mod time;

pub use input::{InputState, KeyAction};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
pub use time::FrameClock;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
