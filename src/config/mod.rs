//! Persisted CLI configuration.
//!
//! Settings live in a single JSON document at `~/.flowstate/config.json`.
//! The store is constructed explicitly and passed down to collaborators;
//! a corrupted file resets to defaults rather than failing the caller.

mod settings;
mod store;

#[cfg(test)]
mod store_test;

pub use settings::{Mode, Settings, DEFAULT_BLOCKED_SITES};
pub use store::{ConfigError, ConfigStore};
