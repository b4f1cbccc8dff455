//! Host keyboard surface for the history shortcuts.
//!
//! The host environment forwards raw key events; this module decodes the
//! primary-modifier combinations for undo/redo. A decoded shortcut means the
//! host must also prevent its own default handling of the combination.

/// A key event as reported by the host environment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyEvent {
    /// The pressed key, lowercased.
    pub key: char,
    /// Control key held.
    pub ctrl: bool,
    /// Command key held (macOS).
    pub meta: bool,
    pub shift: bool,
}

impl KeyEvent {
    /// Whether the platform's primary modifier is held (Ctrl, or Cmd on
    /// macOS).
    pub fn primary_modifier(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A decoded history shortcut.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryShortcut {
    Undo,
    Redo,
}

/// Decode a key event into a history shortcut.
///
/// Primary+Z undoes; primary+Shift+Z and primary+Y redo. Returns `None` for
/// anything else. When this returns `Some`, the host must prevent its
/// default handling of the combination.
pub fn shortcut_for(event: KeyEvent) -> Option<HistoryShortcut> {
    if !event.primary_modifier() {
        return None;
    }
    match event.key.to_ascii_lowercase() {
        'z' if event.shift => Some(HistoryShortcut::Redo),
        'z' => Some(HistoryShortcut::Undo),
        'y' => Some(HistoryShortcut::Redo),
        _ => None,
    }
}
