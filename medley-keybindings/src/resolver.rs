//! Conflict resolution.
//!
//! Advisory reverse lookup: would committing a candidate shortcut collide
//! with another action's current binding? Performs no mutation, so it may
//! be called repeatedly while a recording session is live.

use crate::codec::Shortcut;
use crate::registry::BindingRegistry;
use medley_config::KeybindingAction;

/// Find the action that already owns `candidate`, if any.
///
/// The action being edited is excluded so it never conflicts with itself.
/// Returns the full action record so callers can show the owner's label
/// alongside the rejected shortcut.
pub fn check<'r>(
    registry: &'r BindingRegistry,
    candidate: &Shortcut,
    editing_action_id: &str,
) -> Option<&'r KeybindingAction> {
    registry
        .find_owner(candidate, editing_action_id)
        .and_then(|owner_id| registry.action(owner_id))
}
