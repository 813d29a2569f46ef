//! Keybinding capture and conflict resolution for the Medley media player
//! shell.
//!
//! This crate turns raw keyboard input into canonical shortcut identities,
//! tracks which action owns which shortcut, and drives the recording state
//! machine behind the shortcut-editing control.
//!
//! Features:
//! - Canonical shortcut identities (fixed modifier order, normalized keys)
//! - A registry with defaults, user overrides and reverse (owner) lookup
//! - Advisory conflict checks that never mutate state
//! - Per-edit-control recording sessions with commit/cancel/reset semantics

pub mod codec;
mod error;
pub mod recorder;
pub mod registry;
pub mod resolver;

pub use codec::{
    KeyPress, Modifiers, ParseError, Shortcut, ShortcutKey, event_to_shortcut,
    format_shortcut_display, parse_shortcut,
};
pub use error::BindingError;
pub use recorder::{CaptureOutcome, Conflict, RecordingController};
pub use registry::{Binding, BindingRegistry};

/// Localized action-name lookup, provided by the hosting shell.
///
/// The engine consults this only when formatting text for presentation; a
/// `None` falls back to the action's built-in label.
pub trait LabelResolver {
    fn resolve(&self, action_id: &str) -> Option<String>;
}

/// No localization: always fall back to built-in labels.
impl LabelResolver for () {
    fn resolve(&self, _action_id: &str) -> Option<String> {
        None
    }
}
