//! Binding registry.
//!
//! Owns the mapping from action id to its current and default shortcuts,
//! plus a reverse index from shortcut to owning action so conflict lookups
//! stay cheap as the catalog grows.
//!
//! The registry is an explicitly owned, lifecycle-scoped object: construct
//! one at startup (or per test), never a process-wide singleton. Its
//! one-owner-per-shortcut invariant is enforced by callers routing every
//! commit through the conflict resolver, not by the registry overwriting
//! silently.

use crate::codec::{self, Shortcut};
use crate::error::BindingError;
use medley_config::{CatalogEntry, KeybindingAction};
use std::collections::{BTreeMap, HashMap};

/// The association between an action and its shortcuts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Dot-namespaced action id, e.g. "playback.next"
    pub action_id: String,
    /// The currently effective shortcut
    pub current: Shortcut,
    /// The factory default from the catalog
    pub default: Shortcut,
}

impl Binding {
    /// True if the user has changed this binding from its default.
    pub fn is_modified(&self) -> bool {
        self.current != self.default
    }
}

/// Registry of bindings for the full action catalog.
#[derive(Debug, Default)]
pub struct BindingRegistry {
    /// Action records by id
    actions: HashMap<String, KeybindingAction>,
    /// Catalog display order
    order: Vec<String>,
    /// Bindings by action id
    bindings: HashMap<String, Binding>,
    /// Reverse index: shortcut → owning action id
    owners: HashMap<Shortcut, String>,
}

impl BindingRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from the action catalog, with every binding at its
    /// default.
    ///
    /// Entries with unparsable default shortcuts, duplicate action ids, or
    /// default shortcuts already owned by an earlier entry are logged and
    /// skipped.
    pub fn from_catalog(catalog: &[CatalogEntry]) -> Self {
        let mut registry = Self::new();

        log::info!(
            "Building binding registry from {} catalog entries",
            catalog.len()
        );
        for entry in catalog {
            let default = match codec::parse_shortcut(&entry.default_shortcut) {
                Ok(shortcut) => shortcut,
                Err(e) => {
                    log::warn!(
                        "Invalid default shortcut '{}' for action '{}': {}",
                        entry.default_shortcut,
                        entry.id,
                        e
                    );
                    continue;
                }
            };

            if registry.bindings.contains_key(&entry.id) {
                log::warn!(
                    "Duplicate catalog entry for action '{}', keeping the first",
                    entry.id
                );
                continue;
            }

            if let Some(owner) = registry.owners.get(&default) {
                log::warn!(
                    "Default shortcut {} for action '{}' already taken by '{}', skipping entry",
                    default,
                    entry.id,
                    owner
                );
                continue;
            }

            registry.owners.insert(default.clone(), entry.id.clone());
            registry.bindings.insert(
                entry.id.clone(),
                Binding {
                    action_id: entry.id.clone(),
                    current: default.clone(),
                    default,
                },
            );
            registry.actions.insert(entry.id.clone(), entry.action());
            registry.order.push(entry.id.clone());
        }

        log::info!(
            "Binding registry initialized with {} bindings",
            registry.bindings.len()
        );
        registry
    }

    /// Look up the binding for an action.
    ///
    /// An unknown id is a programmer error: the catalog is fixed at load
    /// time and actions are never removed.
    pub fn get(&self, action_id: &str) -> Result<&Binding, BindingError> {
        self.bindings
            .get(action_id)
            .ok_or_else(|| BindingError::UnknownAction(action_id.to_string()))
    }

    /// Look up the action record (id + label) for an action.
    pub fn action(&self, action_id: &str) -> Option<&KeybindingAction> {
        self.actions.get(action_id)
    }

    /// Unconditional low-level mutation of an action's current shortcut.
    ///
    /// Callers must have cleared conflicts through the resolver first;
    /// committing a shortcut owned by another action corrupts the
    /// one-owner invariant.
    pub fn set_current(&mut self, action_id: &str, shortcut: Shortcut) -> Result<(), BindingError> {
        let binding = self
            .bindings
            .get_mut(action_id)
            .ok_or_else(|| BindingError::UnknownAction(action_id.to_string()))?;

        if binding.current == shortcut {
            return Ok(());
        }

        self.owners.remove(&binding.current);
        self.owners.insert(shortcut.clone(), action_id.to_string());
        log::debug!("Binding for '{}' set to {}", action_id, shortcut);
        binding.current = shortcut;
        Ok(())
    }

    /// Restore an action's default shortcut. Idempotent.
    pub fn reset_to_default(&mut self, action_id: &str) -> Result<(), BindingError> {
        let default = self.get(action_id)?.default.clone();
        self.set_current(action_id, default)
    }

    /// Reverse lookup: which action currently owns `shortcut`?
    ///
    /// The action being edited is excluded so it never conflicts with
    /// itself.
    pub fn find_owner(&self, shortcut: &Shortcut, excluding_action_id: &str) -> Option<&str> {
        self.owners
            .get(shortcut)
            .map(String::as_str)
            .filter(|owner| *owner != excluding_action_id)
    }

    /// The current shortcut for every action, keyed by action id, in
    /// canonical string form for the persistence collaborator.
    pub fn current_bindings(&self) -> BTreeMap<String, String> {
        self.bindings
            .iter()
            .map(|(id, binding)| (id.clone(), binding.current.to_string()))
            .collect()
    }

    /// Only the bindings the user has changed from their defaults.
    pub fn overrides(&self) -> BTreeMap<String, String> {
        self.bindings
            .iter()
            .filter(|(_, binding)| binding.is_modified())
            .map(|(id, binding)| (id.clone(), binding.current.to_string()))
            .collect()
    }

    /// Seed non-default current values from persisted overrides, before any
    /// user interaction.
    ///
    /// Unknown action ids, malformed shortcut strings, and overrides that
    /// would collide with an already-applied binding are logged and
    /// skipped; a bad entry never aborts the load.
    pub fn load_overrides(&mut self, overrides: &BTreeMap<String, String>) {
        for (action_id, shortcut_str) in overrides {
            if !self.bindings.contains_key(action_id) {
                log::warn!("Ignoring override for unknown action '{}'", action_id);
                continue;
            }

            let shortcut = match codec::parse_shortcut(shortcut_str) {
                Ok(shortcut) => shortcut,
                Err(e) => {
                    log::warn!(
                        "Ignoring invalid override '{}' for action '{}': {}",
                        shortcut_str,
                        action_id,
                        e
                    );
                    continue;
                }
            };

            if let Some(owner) = self.find_owner(&shortcut, action_id) {
                log::warn!(
                    "Ignoring override {} for action '{}': already assigned to '{}'",
                    shortcut,
                    action_id,
                    owner
                );
                continue;
            }

            if let Err(e) = self.set_current(action_id, shortcut) {
                log::warn!("Failed to apply override for '{}': {}", action_id, e);
            }
        }
    }

    /// Iterate bindings in catalog display order.
    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.order.iter().filter_map(|id| self.bindings.get(id))
    }

    /// Check if the registry has any bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Get the number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, label: &str, shortcut: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            label: label.to_string(),
            default_shortcut: shortcut.to_string(),
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = BindingRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_from_catalog() {
        let catalog = vec![
            entry("playback.toggle", "Play/Pause", "Space"),
            entry("playback.next", "Next Track", "Ctrl+Right"),
        ];

        let registry = BindingRegistry::from_catalog(&catalog);
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get("playback.toggle").unwrap().current.to_string(),
            "Space"
        );
    }

    #[test]
    fn test_invalid_default_skipped() {
        let catalog = vec![
            entry("bad.action", "Broken", "NotAKey"),
            entry("good.action", "Works", "Ctrl+A"),
        ];

        let registry = BindingRegistry::from_catalog(&catalog);
        assert_eq!(registry.len(), 1);
        assert!(registry.get("bad.action").is_err());
    }

    #[test]
    fn test_duplicate_default_skipped() {
        let catalog = vec![
            entry("first.action", "First", "Ctrl+A"),
            entry("second.action", "Second", "Ctrl+A"),
        ];

        let registry = BindingRegistry::from_catalog(&catalog);
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.find_owner(&codec::parse_shortcut("Ctrl+A").unwrap(), ""),
            Some("first.action")
        );
    }

    #[test]
    fn test_get_unknown_action() {
        let registry = BindingRegistry::new();
        assert_eq!(
            registry.get("nope"),
            Err(BindingError::UnknownAction("nope".to_string()))
        );
    }

    #[test]
    fn test_set_current_updates_reverse_index() {
        let catalog = vec![entry("playback.toggle", "Play/Pause", "Space")];
        let mut registry = BindingRegistry::from_catalog(&catalog);

        let enter = codec::parse_shortcut("Enter").unwrap();
        registry.set_current("playback.toggle", enter.clone()).unwrap();

        let space = codec::parse_shortcut("Space").unwrap();
        assert_eq!(registry.find_owner(&space, ""), None);
        assert_eq!(registry.find_owner(&enter, ""), Some("playback.toggle"));
        assert!(registry.get("playback.toggle").unwrap().is_modified());
    }

    #[test]
    fn test_reset_to_default_is_idempotent() {
        let catalog = vec![entry("playback.toggle", "Play/Pause", "Space")];
        let mut registry = BindingRegistry::from_catalog(&catalog);

        let enter = codec::parse_shortcut("Enter").unwrap();
        registry.set_current("playback.toggle", enter).unwrap();

        registry.reset_to_default("playback.toggle").unwrap();
        registry.reset_to_default("playback.toggle").unwrap();

        let binding = registry.get("playback.toggle").unwrap();
        assert_eq!(binding.current, binding.default);
        assert!(!binding.is_modified());
    }

    #[test]
    fn test_find_owner_excludes_editing_action() {
        let catalog = vec![entry("playback.toggle", "Play/Pause", "Space")];
        let registry = BindingRegistry::from_catalog(&catalog);

        let space = codec::parse_shortcut("Space").unwrap();
        assert_eq!(registry.find_owner(&space, "playback.toggle"), None);
        assert_eq!(registry.find_owner(&space, "other.action"), Some("playback.toggle"));
    }

    #[test]
    fn test_overrides_only_reports_modified() {
        let catalog = vec![
            entry("playback.toggle", "Play/Pause", "Space"),
            entry("playback.next", "Next Track", "Ctrl+Right"),
        ];
        let mut registry = BindingRegistry::from_catalog(&catalog);

        let enter = codec::parse_shortcut("Enter").unwrap();
        registry.set_current("playback.toggle", enter).unwrap();

        let overrides = registry.overrides();
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides.get("playback.toggle").map(String::as_str), Some("Enter"));

        let current = registry.current_bindings();
        assert_eq!(current.len(), 2);
        assert_eq!(current.get("playback.next").map(String::as_str), Some("Ctrl+Right"));
    }

    #[test]
    fn test_load_overrides_applies_known_and_skips_unknown() {
        let catalog = vec![
            entry("playback.toggle", "Play/Pause", "Space"),
            entry("playback.next", "Next Track", "Ctrl+Right"),
        ];
        let mut registry = BindingRegistry::from_catalog(&catalog);

        let mut overrides = BTreeMap::new();
        overrides.insert("playback.toggle".to_string(), "Enter".to_string());
        overrides.insert("unknown.action".to_string(), "X".to_string());
        registry.load_overrides(&overrides);

        assert_eq!(
            registry.get("playback.toggle").unwrap().current.to_string(),
            "Enter"
        );
        assert_eq!(registry.len(), 2);
        assert!(registry.get("unknown.action").is_err());
    }

    #[test]
    fn test_load_overrides_skips_malformed_shortcut() {
        let catalog = vec![entry("playback.toggle", "Play/Pause", "Space")];
        let mut registry = BindingRegistry::from_catalog(&catalog);

        let mut overrides = BTreeMap::new();
        overrides.insert("playback.toggle".to_string(), "Ctrl+Shift".to_string());
        registry.load_overrides(&overrides);

        assert_eq!(
            registry.get("playback.toggle").unwrap().current.to_string(),
            "Space"
        );
    }

    #[test]
    fn test_load_overrides_skips_colliding_entry() {
        let catalog = vec![
            entry("playback.toggle", "Play/Pause", "Space"),
            entry("playback.next", "Next Track", "Ctrl+Right"),
        ];
        let mut registry = BindingRegistry::from_catalog(&catalog);

        // Tries to move toggle onto next's shortcut; must be skipped
        let mut overrides = BTreeMap::new();
        overrides.insert("playback.toggle".to_string(), "Ctrl+Right".to_string());
        registry.load_overrides(&overrides);

        assert_eq!(
            registry.get("playback.toggle").unwrap().current.to_string(),
            "Space"
        );

        // Uniqueness holds afterwards
        let ctrl_right = codec::parse_shortcut("Ctrl+Right").unwrap();
        assert_eq!(registry.find_owner(&ctrl_right, ""), Some("playback.next"));
    }

    #[test]
    fn test_iter_preserves_catalog_order() {
        let catalog = vec![
            entry("b.second", "Second", "Ctrl+B"),
            entry("a.first", "First", "Ctrl+A"),
        ];
        let registry = BindingRegistry::from_catalog(&catalog);

        let ids: Vec<&str> = registry.iter().map(|b| b.action_id.as_str()).collect();
        assert_eq!(ids, vec!["b.second", "a.first"]);
    }
}
