// ============================================================================
// KEYBOARD SHORTCUTS
// ============================================================================

use super::types::FocusTarget;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Delete,
    Backspace,
    Escape,
    Enter,
    Other,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub control: bool,
    /// Cmd on macOS, Super elsewhere
    pub platform: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn control() -> Self {
        Self {
            control: true,
            ..Self::default()
        }
    }

    pub fn platform() -> Self {
        Self {
            platform: true,
            ..Self::default()
        }
    }

    /// Ctrl or Cmd, without Alt
    fn is_primary(&self) -> bool {
        (self.control || self.platform) && !self.alt
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::none())
    }

    /// Ctrl+<c>
    pub fn ctrl(c: char) -> Self {
        Self::new(Key::Char(c), Modifiers::control())
    }

    /// Cmd+<c>
    pub fn cmd(c: char) -> Self {
        Self::new(Key::Char(c), Modifiers::platform())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShortcutAction {
    SelectAll,
    Cut,
    Copy,
    Paste,
    Delete,
    Escape,
}

pub struct KeyboardShortcutRouter;

impl KeyboardShortcutRouter {
    /// Map a key press to a browser action. Nothing resolves unless the
    /// browser itself holds focus.
    pub fn resolve(press: &KeyPress, focus: FocusTarget) -> Option<ShortcutAction> {
        if focus != FocusTarget::Browser {
            return None;
        }

        match press.key {
            Key::Char(c) if press.modifiers.is_primary() => match c.to_ascii_lowercase() {
                'a' => Some(ShortcutAction::SelectAll),
                'x' => Some(ShortcutAction::Cut),
                'c' => Some(ShortcutAction::Copy),
                'v' => Some(ShortcutAction::Paste),
                _ => None,
            },
            Key::Delete | Key::Backspace => Some(ShortcutAction::Delete),
            Key::Escape => Some(ShortcutAction::Escape),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings_resolve_with_ctrl_or_cmd() {
        let focus = FocusTarget::Browser;
        assert_eq!(
            KeyboardShortcutRouter::resolve(&KeyPress::ctrl('a'), focus),
            Some(ShortcutAction::SelectAll)
        );
        assert_eq!(
            KeyboardShortcutRouter::resolve(&KeyPress::cmd('X'), focus),
            Some(ShortcutAction::Cut)
        );
        assert_eq!(
            KeyboardShortcutRouter::resolve(&KeyPress::ctrl('c'), focus),
            Some(ShortcutAction::Copy)
        );
        assert_eq!(
            KeyboardShortcutRouter::resolve(&KeyPress::cmd('v'), focus),
            Some(ShortcutAction::Paste)
        );
        assert_eq!(
            KeyboardShortcutRouter::resolve(&KeyPress::plain(Key::Backspace), focus),
            Some(ShortcutAction::Delete)
        );
        assert_eq!(
            KeyboardShortcutRouter::resolve(&KeyPress::plain(Key::Escape), focus),
            Some(ShortcutAction::Escape)
        );
    }

    #[test]
    fn test_plain_letters_do_nothing() {
        let press = KeyPress::plain(Key::Char('a'));
        assert_eq!(KeyboardShortcutRouter::resolve(&press, FocusTarget::Browser), None);
    }

    #[test]
    fn test_text_input_focus_swallows_everything() {
        for press in [
            KeyPress::ctrl('a'),
            KeyPress::plain(Key::Delete),
            KeyPress::plain(Key::Escape),
        ] {
            assert_eq!(KeyboardShortcutRouter::resolve(&press, FocusTarget::TextInput), None);
            assert_eq!(KeyboardShortcutRouter::resolve(&press, FocusTarget::Outside), None);
        }
    }
}
