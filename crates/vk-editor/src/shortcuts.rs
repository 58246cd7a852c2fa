//! Keyboard shortcut mapping.
//!
//! Maps keys to semantic `ShortcutAction`s. A focused text field takes
//! editing keys first, so the map needs to know whether one has focus.

use crate::input::Key;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Persist and leave the editor.
    Close,
    /// Hide every selected unit.
    DeleteSelection,
    /// Drop focus from the active text field.
    BlurField,
    /// Remove the last character of the active text field.
    FieldBackspace,
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key press. Returns `None` if the key has no binding.
    pub fn resolve(key: Key, field_focused: bool) -> Option<ShortcutAction> {
        if field_focused {
            return match key {
                Key::Escape | Key::Enter => Some(ShortcutAction::BlurField),
                Key::Backspace => Some(ShortcutAction::FieldBackspace),
                _ => None,
            };
        }

        match key {
            Key::Escape => Some(ShortcutAction::Close),
            Key::Delete | Key::Backspace => Some(ShortcutAction::DeleteSelection),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_bindings() {
        assert_eq!(ShortcutMap::resolve(Key::Escape, false), Some(ShortcutAction::Close));
        assert_eq!(ShortcutMap::resolve(Key::Delete, false), Some(ShortcutAction::DeleteSelection));
        assert_eq!(ShortcutMap::resolve(Key::Backspace, false), Some(ShortcutAction::DeleteSelection));
        assert_eq!(ShortcutMap::resolve(Key::Other(65), false), None);
    }

    #[test]
    fn focused_field_takes_editing_keys() {
        assert_eq!(ShortcutMap::resolve(Key::Escape, true), Some(ShortcutAction::BlurField));
        assert_eq!(ShortcutMap::resolve(Key::Backspace, true), Some(ShortcutAction::FieldBackspace));
        assert_eq!(ShortcutMap::resolve(Key::Delete, true), None);
    }
}
