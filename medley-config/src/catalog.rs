//! Action catalog types and the shell's built-in bindable actions.
//!
//! The catalog is the fixed list of actions a user can attach a shortcut to.
//! It is loaded once at startup; the keybinding engine builds its registry
//! from it and never adds or removes actions afterwards.

use serde::{Deserialize, Serialize};

/// An action that can be bound to a keyboard shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeybindingAction {
    /// Dot-namespaced action id, e.g. "playback.next"
    pub id: String,
    /// Built-in display label, used when no localized name is available
    pub label: String,
}

/// A catalog entry: an action plus its factory-default shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Dot-namespaced action id, e.g. "playback.next"
    pub id: String,
    /// Built-in display label
    pub label: String,
    /// Default shortcut string, e.g. "CmdOrCtrl+Right".
    ///
    /// `CmdOrCtrl` resolves to Cmd on macOS and Ctrl elsewhere when the
    /// string is parsed by the keybinding engine.
    pub default_shortcut: String,
}

impl CatalogEntry {
    /// The action record for this entry (id + label, without the default).
    pub fn action(&self) -> KeybindingAction {
        KeybindingAction {
            id: self.id.clone(),
            label: self.label.clone(),
        }
    }
}

/// All built-in bindable actions with their display labels and default
/// shortcuts.
///
/// Plain single-key defaults (Space, arrows, letters) are safe here because
/// the player shell routes key events to text inputs first; only unclaimed
/// presses reach the action dispatcher.
const BUILT_IN_ACTIONS: &[(&str, &str, &str)] = &[
    ("playback.toggle", "Play/Pause", "Space"),
    ("playback.next", "Next Track", "Ctrl+Right"),
    ("playback.previous", "Previous Track", "Ctrl+Left"),
    ("playback.stop", "Stop", "Ctrl+Period"),
    ("seek.forward", "Seek Forward", "Right"),
    ("seek.backward", "Seek Backward", "Left"),
    ("volume.up", "Volume Up", "Up"),
    ("volume.down", "Volume Down", "Down"),
    ("volume.mute", "Toggle Mute", "M"),
    ("playlist.shuffle", "Toggle Shuffle", "S"),
    ("playlist.repeat", "Cycle Repeat Mode", "R"),
    ("playlist.show", "Show Playlist", "CmdOrCtrl+L"),
    ("library.search", "Search Library", "CmdOrCtrl+F"),
    ("window.fullscreen", "Toggle Fullscreen", "F11"),
    ("window.miniplayer", "Toggle Mini Player", "CmdOrCtrl+Shift+M"),
    ("window.preferences", "Open Preferences", "CmdOrCtrl+Comma"),
];

/// The Medley shell's built-in action catalog, in display order.
pub fn default_catalog() -> Vec<CatalogEntry> {
    BUILT_IN_ACTIONS
        .iter()
        .map(|(id, label, default_shortcut)| CatalogEntry {
            id: (*id).to_string(),
            label: (*label).to_string(),
            default_shortcut: (*default_shortcut).to_string(),
        })
        .collect()
}
