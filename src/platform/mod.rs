//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input (held keys sampled once per frame)
//! - Storage (LocalStorage on web, in-memory elsewhere)
//! - Wall-clock time

pub mod input;
pub mod storage;
pub mod time;

pub use input::{HeldKeys, keys};
pub use storage::{KeyValueStore, MemoryStore};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
pub use time::now_ms;
