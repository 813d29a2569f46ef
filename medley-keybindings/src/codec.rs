//! Shortcut codec.
//!
//! Turns raw key presses into canonical [`Shortcut`] values, renders
//! shortcuts for display, and parses shortcut strings like "Ctrl+Shift+B"
//! so catalog defaults and persisted overrides round-trip through text.
//!
//! The canonical form is the identity the rest of the engine relies on:
//! modifiers in a fixed order (Ctrl, Alt, Shift, Meta), exactly one
//! non-modifier key, letters upper-cased, named keys mapped to fixed tokens.
//! Two presses that differ only in incidental representation (e.g. a Space
//! bar reported as the character `" "` versus the named Space key) must
//! normalize to the same value.

use std::fmt;
use winit::event::{KeyEvent, Modifiers as WinitModifiers};
use winit::keyboard::{Key, ModifiersState, NamedKey};

/// Error type for shortcut parsing failures.
#[derive(Debug, Clone)]
pub struct ParseError(String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseError {}

/// Set of active modifiers for a shortcut.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    /// Cmd on macOS, Super/Win elsewhere
    pub meta: bool,
}

impl Modifiers {
    /// Snapshot the modifier flags from a winit modifier state.
    pub fn from_state(state: ModifiersState) -> Self {
        Self {
            ctrl: state.control_key(),
            alt: state.alt_key(),
            shift: state.shift_key(),
            meta: state.super_key(),
        }
    }

    /// True if at least one modifier is held.
    pub fn any(&self) -> bool {
        self.ctrl || self.alt || self.shift || self.meta
    }
}

/// The non-modifier key of a shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShortcutKey {
    /// A character key: letters (stored upper-cased), digits, punctuation
    Character(char),
    /// A named key (e.g. F1, Enter, ArrowRight)
    Named(NamedKey),
}

/// A canonical shortcut: modifiers plus exactly one non-modifier key.
///
/// The `Display` form is the canonical identifier string; equality and
/// hashing over the struct agree with it. Modifier-only combinations are
/// not representable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shortcut {
    pub modifiers: Modifiers,
    pub key: ShortcutKey,
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if self.modifiers.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.alt {
            parts.push("Alt".to_string());
        }
        if self.modifiers.shift {
            parts.push("Shift".to_string());
        }
        if self.modifiers.meta {
            parts.push("Meta".to_string());
        }

        match &self.key {
            ShortcutKey::Character(c) => match char_token(*c) {
                Some(token) => parts.push(token.to_string()),
                None => parts.push(c.to_string()),
            },
            ShortcutKey::Named(n) => match named_key_token(*n) {
                Some(token) => parts.push(token.to_string()),
                None => parts.push(format!("{:?}", n)),
            },
        }

        write!(f, "{}", parts.join("+"))
    }
}

/// A raw key press as fed by the hosting UI layer.
///
/// The engine is agnostic to the capture mechanism: hosts driving a winit
/// event loop use [`KeyPress::from_event`]; anything else (or a test) can
/// construct the fields directly.
#[derive(Debug, Clone)]
pub struct KeyPress {
    /// The logical key of the press
    pub key: Key,
    /// Modifier state at the time of the press
    pub modifiers: ModifiersState,
}

impl KeyPress {
    pub fn new(key: Key, modifiers: ModifiersState) -> Self {
        Self { key, modifiers }
    }

    /// Snapshot a winit key event and the current modifier state.
    pub fn from_event(event: &KeyEvent, modifiers: &WinitModifiers) -> Self {
        Self {
            key: event.logical_key.clone(),
            modifiers: modifiers.state(),
        }
    }
}

/// Encode a raw key press as a canonical shortcut.
///
/// Returns `None` while only modifiers are held (recording keeps waiting),
/// for Escape (reserved by the shell to cancel recording), and for keys the
/// codec has no stable token for.
pub fn event_to_shortcut(press: &KeyPress) -> Option<Shortcut> {
    let modifiers = Modifiers::from_state(press.modifiers);

    let key = match &press.key {
        Key::Named(named) if is_modifier_key(*named) => return None,
        // Escape cancels recording and is therefore never itself bindable
        Key::Named(NamedKey::Escape) => return None,
        Key::Named(named) => {
            named_key_token(*named)?;
            ShortcutKey::Named(*named)
        }
        Key::Character(text) => normalize_char(text.chars().next()?)?,
        _ => return None,
    };

    Some(Shortcut { modifiers, key })
}

/// Normalize a character produced by a key press into its canonical key.
///
/// Text spellings of non-text keys (space, enter, tab) fold into their
/// named form so both representations share one identity.
fn normalize_char(ch: char) -> Option<ShortcutKey> {
    match ch {
        ' ' => Some(ShortcutKey::Named(NamedKey::Space)),
        '\r' | '\n' => Some(ShortcutKey::Named(NamedKey::Enter)),
        '\t' => Some(ShortcutKey::Named(NamedKey::Tab)),
        c if c.is_ascii_alphanumeric() => Some(ShortcutKey::Character(c.to_ascii_uppercase())),
        c if char_token(c).is_some() => Some(ShortcutKey::Character(c)),
        _ => None,
    }
}

/// Render a shortcut for humans.
///
/// macOS gets the conventional modifier glyphs; other platforms get
/// "+"-joined names with Meta shown as Super. Arrow keys render as arrows
/// everywhere. One-directional: the canonical form is never parsed back
/// from this output.
pub fn format_shortcut_display(shortcut: &Shortcut) -> String {
    #[cfg(target_os = "macos")]
    {
        let mut out = String::new();
        if shortcut.modifiers.ctrl {
            out.push('\u{2303}'); // ⌃
        }
        if shortcut.modifiers.alt {
            out.push('\u{2325}'); // ⌥
        }
        if shortcut.modifiers.shift {
            out.push('\u{21e7}'); // ⇧
        }
        if shortcut.modifiers.meta {
            out.push('\u{2318}'); // ⌘
        }
        out.push_str(&display_key_token(&shortcut.key));
        out
    }
    #[cfg(not(target_os = "macos"))]
    {
        let mut parts = Vec::new();
        if shortcut.modifiers.ctrl {
            parts.push("Ctrl".to_string());
        }
        if shortcut.modifiers.alt {
            parts.push("Alt".to_string());
        }
        if shortcut.modifiers.shift {
            parts.push("Shift".to_string());
        }
        if shortcut.modifiers.meta {
            parts.push("Super".to_string());
        }
        parts.push(display_key_token(&shortcut.key));
        parts.join("+")
    }
}

fn display_key_token(key: &ShortcutKey) -> String {
    match key {
        ShortcutKey::Named(NamedKey::ArrowUp) => "\u{2191}".to_string(),
        ShortcutKey::Named(NamedKey::ArrowDown) => "\u{2193}".to_string(),
        ShortcutKey::Named(NamedKey::ArrowLeft) => "\u{2190}".to_string(),
        ShortcutKey::Named(NamedKey::ArrowRight) => "\u{2192}".to_string(),
        ShortcutKey::Named(n) => match named_key_token(*n) {
            Some(token) => token.to_string(),
            None => format!("{:?}", n),
        },
        ShortcutKey::Character(c) => match char_token(*c) {
            Some(token) => token.to_string(),
            None => c.to_string(),
        },
    }
}

/// Parse a shortcut string into a [`Shortcut`].
///
/// Supported format: "Modifier+Modifier+Key"
///
/// Modifiers:
/// - `Ctrl`, `Control` - Control key
/// - `Alt`, `Option` - Alt/Option key
/// - `Shift` - Shift key
/// - `Meta`, `Super`, `Cmd`, `Command`, `Win` - Cmd/Super/Windows key
/// - `CmdOrCtrl` - Cmd on macOS, Ctrl on other platforms
///
/// Keys:
/// - Single characters: `A`, `B`, `1`, etc.
/// - Named keys: `F1`-`F12`, `Enter`, `Space`, `Right`, `PageUp`, etc.
/// - Punctuation tokens: `Minus`, `Comma`, `Period`, `BracketLeft`, etc.
///
/// Matching is case-insensitive. Modifier-only strings are rejected, as is
/// Escape (reserved for cancelling recording).
pub fn parse_shortcut(s: &str) -> Result<Shortcut, ParseError> {
    let parts: Vec<&str> = s.split('+').map(str::trim).collect();

    let mut modifiers = Modifiers::default();
    let mut key_part = None;

    for (i, part) in parts.iter().enumerate() {
        let is_last = i == parts.len() - 1;
        let part_lower = part.to_lowercase();

        let is_modifier = match part_lower.as_str() {
            "ctrl" | "control" => {
                modifiers.ctrl = true;
                true
            }
            "alt" | "option" => {
                modifiers.alt = true;
                true
            }
            "shift" => {
                modifiers.shift = true;
                true
            }
            "meta" | "super" | "cmd" | "command" | "win" => {
                modifiers.meta = true;
                true
            }
            "cmdorctrl" => {
                // Resolved at parse time so the canonical form stays four-flag
                #[cfg(target_os = "macos")]
                {
                    modifiers.meta = true;
                }
                #[cfg(not(target_os = "macos"))]
                {
                    modifiers.ctrl = true;
                }
                true
            }
            _ => false,
        };

        if !is_modifier {
            if key_part.is_some() {
                return Err(ParseError(format!(
                    "Multiple keys specified: already have key, found '{}'",
                    part
                )));
            }
            key_part = Some(*part);
        } else if is_last {
            // Last part is a modifier with no key - invalid
            return Err(ParseError(
                "Shortcut ends with modifier, no key specified".to_string(),
            ));
        }
    }

    let key_str = key_part.ok_or_else(|| ParseError("No key specified".to_string()))?;
    let key = parse_key(key_str)?;

    Ok(Shortcut { modifiers, key })
}

/// Parse a key string into a ShortcutKey.
fn parse_key(s: &str) -> Result<ShortcutKey, ParseError> {
    if s.is_empty() {
        return Err(ParseError("No key specified".to_string()));
    }

    // Named keys first (case-insensitive)
    if let Some(named) = parse_named_key(s) {
        if named == NamedKey::Escape {
            return Err(ParseError(
                "Escape is reserved for cancelling recording and cannot be bound".to_string(),
            ));
        }
        return Ok(ShortcutKey::Named(named));
    }

    // Punctuation word tokens (Minus, Comma, ...)
    if let Some(ch) = parse_char_token(s) {
        return Ok(ShortcutKey::Character(ch));
    }

    // Single character
    let chars: Vec<char> = s.chars().collect();
    if chars.len() == 1 {
        let c = chars[0];
        if c.is_ascii_alphanumeric() {
            return Ok(ShortcutKey::Character(c.to_ascii_uppercase()));
        }
        if char_token(c).is_some() {
            return Ok(ShortcutKey::Character(c));
        }
    }

    Err(ParseError(format!("Unknown key: '{}'", s)))
}

/// Named keys that act as modifiers. While one of these is the pressed key
/// itself, recording has nothing to capture yet.
fn is_modifier_key(named: NamedKey) -> bool {
    matches!(
        named,
        NamedKey::Alt
            | NamedKey::AltGraph
            | NamedKey::Control
            | NamedKey::Shift
            | NamedKey::Super
            | NamedKey::Meta
            | NamedKey::Hyper
            | NamedKey::Fn
    )
}

/// Canonical token for a named key. Returns `None` for keys the codec does
/// not support as shortcuts.
fn named_key_token(named: NamedKey) -> Option<&'static str> {
    match named {
        // Function keys
        NamedKey::F1 => Some("F1"),
        NamedKey::F2 => Some("F2"),
        NamedKey::F3 => Some("F3"),
        NamedKey::F4 => Some("F4"),
        NamedKey::F5 => Some("F5"),
        NamedKey::F6 => Some("F6"),
        NamedKey::F7 => Some("F7"),
        NamedKey::F8 => Some("F8"),
        NamedKey::F9 => Some("F9"),
        NamedKey::F10 => Some("F10"),
        NamedKey::F11 => Some("F11"),
        NamedKey::F12 => Some("F12"),

        // Common named keys
        NamedKey::Enter => Some("Enter"),
        NamedKey::Space => Some("Space"),
        NamedKey::Tab => Some("Tab"),
        NamedKey::Backspace => Some("Backspace"),
        NamedKey::Delete => Some("Delete"),
        NamedKey::Insert => Some("Insert"),
        NamedKey::Home => Some("Home"),
        NamedKey::End => Some("End"),
        NamedKey::PageUp => Some("PageUp"),
        NamedKey::PageDown => Some("PageDown"),

        // Arrow keys
        NamedKey::ArrowUp => Some("Up"),
        NamedKey::ArrowDown => Some("Down"),
        NamedKey::ArrowLeft => Some("Left"),
        NamedKey::ArrowRight => Some("Right"),

        _ => None,
    }
}

/// Parse a named key string into a NamedKey.
fn parse_named_key(s: &str) -> Option<NamedKey> {
    match s.to_lowercase().as_str() {
        // Function keys
        "f1" => Some(NamedKey::F1),
        "f2" => Some(NamedKey::F2),
        "f3" => Some(NamedKey::F3),
        "f4" => Some(NamedKey::F4),
        "f5" => Some(NamedKey::F5),
        "f6" => Some(NamedKey::F6),
        "f7" => Some(NamedKey::F7),
        "f8" => Some(NamedKey::F8),
        "f9" => Some(NamedKey::F9),
        "f10" => Some(NamedKey::F10),
        "f11" => Some(NamedKey::F11),
        "f12" => Some(NamedKey::F12),

        // Common named keys
        "enter" | "return" => Some(NamedKey::Enter),
        "escape" | "esc" => Some(NamedKey::Escape),
        "space" => Some(NamedKey::Space),
        "tab" => Some(NamedKey::Tab),
        "backspace" => Some(NamedKey::Backspace),
        "delete" | "del" => Some(NamedKey::Delete),
        "insert" | "ins" => Some(NamedKey::Insert),
        "home" => Some(NamedKey::Home),
        "end" => Some(NamedKey::End),
        "pageup" | "pgup" => Some(NamedKey::PageUp),
        "pagedown" | "pgdn" => Some(NamedKey::PageDown),

        // Arrow keys
        "up" | "arrowup" => Some(NamedKey::ArrowUp),
        "down" | "arrowdown" => Some(NamedKey::ArrowDown),
        "left" | "arrowleft" => Some(NamedKey::ArrowLeft),
        "right" | "arrowright" => Some(NamedKey::ArrowRight),

        _ => None,
    }
}

/// Canonical word token for a punctuation character, if it has one.
///
/// Punctuation is tokenized so the canonical string never contains a bare
/// "+" or other character that would confuse the "+"-separated format.
fn char_token(c: char) -> Option<&'static str> {
    match c {
        '-' => Some("Minus"),
        '+' => Some("Plus"),
        '=' => Some("Equal"),
        ',' => Some("Comma"),
        '.' => Some("Period"),
        '/' => Some("Slash"),
        '\\' => Some("Backslash"),
        ';' => Some("Semicolon"),
        '\'' => Some("Quote"),
        '`' => Some("Backquote"),
        '[' => Some("BracketLeft"),
        ']' => Some("BracketRight"),
        _ => None,
    }
}

/// Parse a punctuation word token back into its character.
fn parse_char_token(s: &str) -> Option<char> {
    match s.to_lowercase().as_str() {
        "minus" => Some('-'),
        "plus" => Some('+'),
        "equal" | "equals" => Some('='),
        "comma" => Some(','),
        "period" | "dot" => Some('.'),
        "slash" => Some('/'),
        "backslash" => Some('\\'),
        "semicolon" => Some(';'),
        "quote" | "apostrophe" => Some('\''),
        "backquote" | "grave" => Some('`'),
        "bracketleft" => Some('['),
        "bracketright" => Some(']'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: Key, modifiers: ModifiersState) -> KeyPress {
        KeyPress::new(key, modifiers)
    }

    fn char_key(s: &str) -> Key {
        Key::Character(s.into())
    }

    #[test]
    fn test_simple_key() {
        let shortcut = parse_shortcut("A").unwrap();
        assert!(!shortcut.modifiers.ctrl);
        assert!(!shortcut.modifiers.shift);
        assert_eq!(shortcut.key, ShortcutKey::Character('A'));
    }

    #[test]
    fn test_ctrl_key() {
        let shortcut = parse_shortcut("Ctrl+A").unwrap();
        assert!(shortcut.modifiers.ctrl);
        assert_eq!(shortcut.key, ShortcutKey::Character('A'));
    }

    #[test]
    fn test_case_insensitive() {
        let shortcut = parse_shortcut("ctrl+shift+a").unwrap();
        assert!(shortcut.modifiers.ctrl);
        assert!(shortcut.modifiers.shift);
        assert_eq!(shortcut.key, ShortcutKey::Character('A'));
    }

    #[test]
    fn test_modifier_aliases() {
        let shortcut = parse_shortcut("Control+A").unwrap();
        assert!(shortcut.modifiers.ctrl);

        let shortcut = parse_shortcut("Option+A").unwrap();
        assert!(shortcut.modifiers.alt);

        for alias in ["Cmd+A", "Command+A", "Super+A", "Meta+A", "Win+A"] {
            let shortcut = parse_shortcut(alias).unwrap();
            assert!(shortcut.modifiers.meta, "alias {alias} did not set meta");
        }
    }

    #[test]
    fn test_cmd_or_ctrl_resolves_per_platform() {
        let shortcut = parse_shortcut("CmdOrCtrl+B").unwrap();
        #[cfg(target_os = "macos")]
        {
            assert!(shortcut.modifiers.meta);
            assert!(!shortcut.modifiers.ctrl);
        }
        #[cfg(not(target_os = "macos"))]
        {
            assert!(shortcut.modifiers.ctrl);
            assert!(!shortcut.modifiers.meta);
        }
    }

    #[test]
    fn test_named_key_aliases() {
        let shortcut = parse_shortcut("Return").unwrap();
        assert_eq!(shortcut.key, ShortcutKey::Named(NamedKey::Enter));

        let shortcut = parse_shortcut("ArrowRight").unwrap();
        assert_eq!(shortcut.key, ShortcutKey::Named(NamedKey::ArrowRight));

        let shortcut = parse_shortcut("PgUp").unwrap();
        assert_eq!(shortcut.key, ShortcutKey::Named(NamedKey::PageUp));
    }

    #[test]
    fn test_punctuation_tokens() {
        let shortcut = parse_shortcut("Ctrl+Comma").unwrap();
        assert_eq!(shortcut.key, ShortcutKey::Character(','));

        let shortcut = parse_shortcut("Ctrl+Minus").unwrap();
        assert_eq!(shortcut.key, ShortcutKey::Character('-'));
    }

    #[test]
    fn test_invalid_empty() {
        assert!(parse_shortcut("").is_err());
    }

    #[test]
    fn test_invalid_modifier_only() {
        assert!(parse_shortcut("Ctrl").is_err());
        assert!(parse_shortcut("Ctrl+Shift").is_err());
        assert!(parse_shortcut("Shift").is_err());
    }

    #[test]
    fn test_invalid_unknown_key() {
        assert!(parse_shortcut("Ctrl+NotAKey").is_err());
    }

    #[test]
    fn test_escape_is_not_bindable() {
        assert!(parse_shortcut("Escape").is_err());
        assert!(parse_shortcut("Ctrl+Esc").is_err());
    }

    #[test]
    fn test_canonical_modifier_order() {
        // Aliases in any order come out in the fixed canonical order
        let shortcut = parse_shortcut("shift+meta+alt+ctrl+x").unwrap();
        assert_eq!(shortcut.to_string(), "Ctrl+Alt+Shift+Meta+X");
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for s in [
            "Ctrl+Shift+B",
            "Space",
            "Ctrl+Right",
            "Alt+F4",
            "Ctrl+Alt+Shift+Meta+Z",
            "Ctrl+Comma",
            "Meta+BracketLeft",
            "F11",
        ] {
            let shortcut = parse_shortcut(s).unwrap();
            let reparsed = parse_shortcut(&shortcut.to_string()).unwrap();
            assert_eq!(shortcut, reparsed, "round trip failed for {s}");
        }
    }

    #[test]
    fn test_event_plain_letter() {
        let shortcut = event_to_shortcut(&press(char_key("a"), ModifiersState::empty())).unwrap();
        assert_eq!(shortcut.to_string(), "A");
    }

    #[test]
    fn test_event_letter_case_normalizes() {
        // "a" and "A" (shift variants aside) are the same logical key
        let lower = event_to_shortcut(&press(char_key("a"), ModifiersState::CONTROL)).unwrap();
        let upper = event_to_shortcut(&press(char_key("A"), ModifiersState::CONTROL)).unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_event_modifier_flags() {
        let shortcut = event_to_shortcut(&press(
            char_key("b"),
            ModifiersState::CONTROL | ModifiersState::SHIFT,
        ))
        .unwrap();
        assert_eq!(shortcut.to_string(), "Ctrl+Shift+B");
    }

    #[test]
    fn test_event_modifier_only_yields_none() {
        for named in [
            NamedKey::Shift,
            NamedKey::Control,
            NamedKey::Alt,
            NamedKey::Super,
            NamedKey::Meta,
        ] {
            let result = event_to_shortcut(&press(Key::Named(named), ModifiersState::SHIFT));
            assert!(result.is_none(), "{named:?} should not capture");
        }
    }

    #[test]
    fn test_event_escape_yields_none() {
        let result = event_to_shortcut(&press(Key::Named(NamedKey::Escape), ModifiersState::empty()));
        assert!(result.is_none());
    }

    #[test]
    fn test_event_space_representations_normalize_identically() {
        // Space arrives as either the named key or the literal character
        // depending on the host; both must share one identity.
        let named = event_to_shortcut(&press(Key::Named(NamedKey::Space), ModifiersState::empty()));
        let character = event_to_shortcut(&press(char_key(" "), ModifiersState::empty()));
        assert_eq!(named, character);
        assert_eq!(named.unwrap().to_string(), "Space");
    }

    #[test]
    fn test_event_named_arrow() {
        let shortcut = event_to_shortcut(&press(
            Key::Named(NamedKey::ArrowRight),
            ModifiersState::CONTROL,
        ))
        .unwrap();
        assert_eq!(shortcut.to_string(), "Ctrl+Right");
    }

    #[test]
    fn test_event_is_deterministic() {
        let a = event_to_shortcut(&press(char_key("k"), ModifiersState::ALT));
        let b = event_to_shortcut(&press(char_key("k"), ModifiersState::ALT));
        assert_eq!(a, b);
    }

    #[test]
    fn test_format_display_is_stable() {
        let shortcut = parse_shortcut("Ctrl+Shift+B").unwrap();
        let first = format_shortcut_display(&shortcut);
        let second = format_shortcut_display(&shortcut);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_format_display_arrows() {
        let shortcut = parse_shortcut("Ctrl+Right").unwrap();
        let display = format_shortcut_display(&shortcut);
        assert!(display.contains('\u{2192}'));
    }
}
