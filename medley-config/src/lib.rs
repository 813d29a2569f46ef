//! Configuration system for the Medley media player shell.
//!
//! This crate provides the pieces of configuration the keybinding engine
//! depends on:
//!
//! - The action catalog types (`KeybindingAction`, `CatalogEntry`) and the
//!   shell's built-in catalog of bindable actions
//! - Persistence for user shortcut overrides (YAML file under the config
//!   directory, written atomically)
//! - Typed error variants for config I/O

pub mod catalog;
pub mod error;
pub mod overrides;

// Re-export main types for convenience
pub use catalog::{CatalogEntry, KeybindingAction, default_catalog};
pub use error::ConfigError;
pub use overrides::ShortcutOverrides;
