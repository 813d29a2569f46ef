//! Recording controller.
//!
//! The per-edit-control state machine that coordinates the codec and the
//! conflict resolver while the user captures a new shortcut. One instance
//! exists per shortcut edit control; sessions are cheap, transient state.
//!
//! Check-then-commit runs synchronously inside a single call on the event
//! thread, so no other session's commit can interleave between the
//! conflict query and the registry mutation. When several controllers
//! race over the same free shortcut across ticks, the first committer
//! wins and the second sees a conflict.

use crate::LabelResolver;
use crate::codec::{self, KeyPress, Modifiers, Shortcut};
use crate::error::BindingError;
use crate::registry::BindingRegistry;
use crate::resolver;
use medley_config::KeybindingAction;

/// What happened when a key press was fed to a recording session.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// The controller is idle; the press was not consumed.
    NotRecording,
    /// Only modifiers are held so far; recording continues. `held` carries
    /// the live preview of the currently held modifiers.
    AwaitingKey { held: Modifiers },
    /// The captured shortcut is already owned by another action. The
    /// registry is untouched and recording continues until the user tries
    /// another combination or abandons.
    Conflict(Conflict),
    /// The shortcut was committed and the session ended.
    Committed { shortcut: Shortcut },
}

/// A rejected capture: the shortcut and the action that already owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub shortcut: Shortcut,
    pub owner: KeybindingAction,
}

impl Conflict {
    /// Human-facing description for the inline warning under the edit
    /// control. Localized owner names come from the label resolver; the
    /// owner's built-in label is the fallback.
    pub fn message(&self, labels: &dyn LabelResolver) -> String {
        let owner_label = labels
            .resolve(&self.owner.id)
            .unwrap_or_else(|| self.owner.label.clone());
        format!(
            "{} is already assigned to {}",
            codec::format_shortcut_display(&self.shortcut),
            owner_label
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Recording,
}

/// State machine for one shortcut edit control.
#[derive(Debug)]
pub struct RecordingController {
    action_id: String,
    state: State,
    held: Modifiers,
    last_conflict: Option<Conflict>,
}

impl RecordingController {
    /// Create an idle controller for the given action.
    pub fn new(action_id: impl Into<String>) -> Self {
        Self {
            action_id: action_id.into(),
            state: State::Idle,
            held: Modifiers::default(),
            last_conflict: None,
        }
    }

    /// The action this controller edits.
    pub fn action_id(&self) -> &str {
        &self.action_id
    }

    pub fn is_recording(&self) -> bool {
        self.state == State::Recording
    }

    /// Currently held modifiers, for the live preview while recording.
    ///
    /// Derived state, recomputed from the latest key press; never part of
    /// a committed binding.
    pub fn held_modifiers(&self) -> Modifiers {
        self.held
    }

    /// The most recent conflict, until cleared by a commit, cancel, start
    /// or reset.
    pub fn conflict(&self) -> Option<&Conflict> {
        self.last_conflict.as_ref()
    }

    /// Begin a recording session, discarding any previous partial capture
    /// and any stale conflict indicator.
    pub fn start(&mut self) {
        log::debug!("Recording started for '{}'", self.action_id);
        self.state = State::Recording;
        self.held = Modifiers::default();
        self.last_conflict = None;
    }

    /// Abandon the session without touching the registry. Invoked on focus
    /// loss or an explicit Escape press in the hosting shell.
    pub fn cancel(&mut self) {
        if self.is_recording() {
            log::debug!("Recording cancelled for '{}'", self.action_id);
        }
        self.state = State::Idle;
        self.held = Modifiers::default();
        self.last_conflict = None;
    }

    /// Restore the action's default shortcut and clear any stale conflict
    /// indicator.
    ///
    /// Callable from idle only; a live recording session is left untouched
    /// and must be cancelled first.
    pub fn reset(&mut self, registry: &mut BindingRegistry) -> Result<(), BindingError> {
        if self.is_recording() {
            log::warn!("Ignoring reset for '{}' while recording", self.action_id);
            return Ok(());
        }
        registry.reset_to_default(&self.action_id)?;
        self.last_conflict = None;
        Ok(())
    }

    /// Feed one raw key press into the session.
    ///
    /// A modifier-only press keeps the session waiting. A capturable press
    /// is checked against the registry: a conflict is surfaced without any
    /// mutation (the session stays live); a free shortcut is committed and
    /// the session ends.
    pub fn handle_key_press(
        &mut self,
        press: &KeyPress,
        registry: &mut BindingRegistry,
    ) -> Result<CaptureOutcome, BindingError> {
        if !self.is_recording() {
            return Ok(CaptureOutcome::NotRecording);
        }

        self.held = Modifiers::from_state(press.modifiers);

        let Some(shortcut) = codec::event_to_shortcut(press) else {
            return Ok(CaptureOutcome::AwaitingKey { held: self.held });
        };

        if let Some(owner) = resolver::check(registry, &shortcut, &self.action_id) {
            let conflict = Conflict {
                shortcut,
                owner: owner.clone(),
            };
            log::debug!(
                "Capture {} for '{}' conflicts with '{}'",
                conflict.shortcut,
                self.action_id,
                conflict.owner.id
            );
            self.last_conflict = Some(conflict.clone());
            return Ok(CaptureOutcome::Conflict(conflict));
        }

        registry.set_current(&self.action_id, shortcut.clone())?;
        log::debug!("Committed {} for '{}'", shortcut, self.action_id);
        self.state = State::Idle;
        self.held = Modifiers::default();
        self.last_conflict = None;
        Ok(CaptureOutcome::Committed { shortcut })
    }
}
