//! CIPREL Compétences cache - ephemeral memoization of database reads
//!
//! Provides a bounded in-memory TTL cache, a get-or-compute helper for
//! request handlers, key naming conventions, and an admin HTTP surface for
//! stats and invalidation.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod keys;
pub mod models;
pub mod tasks;

pub use api::{AdminGate, AppState};
pub use cache::{CacheStore, SharedCache};
pub use config::Config;
pub use tasks::spawn_cleanup_task;
