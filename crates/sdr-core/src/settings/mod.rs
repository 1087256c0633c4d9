//! Persisted user settings.
//!
//! Settings live in an async key-value store (the host's extension storage,
//! or a JSON file for the CLI). The rule set is read fresh on every download
//! event, so a saved change applies to the next download.

mod edit;
mod file;
mod rule_set;
mod store;

pub use edit::RuleEditSession;
pub use file::JsonFileStore;
pub use rule_set::{RuleSet, RULES_ENABLED_KEY, RULES_KEY};
pub use store::{KeyValueStore, MemoryStore, StoreError};
