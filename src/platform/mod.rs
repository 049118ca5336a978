//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key codes to game actions)
//! - Storage (LocalStorage on web, in-memory elsewhere)

pub mod input;
pub mod storage;

pub use input::{Action, action_for_code};
pub use storage::{KeyValueStore, MemoryStore, StorageError};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
