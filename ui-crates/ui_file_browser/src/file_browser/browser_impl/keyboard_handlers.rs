use tracing::{debug, error, warn};

use crate::browser::{FocusTarget, KeyPress, KeyboardShortcutRouter, ShortcutAction};
use crate::file_browser::FileBrowser;

/// What a key press ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not a browser shortcut, focus elsewhere, or nothing to act on
    Ignored,
    Handled(ShortcutAction),
    /// Recognised but not permitted right now
    Blocked(ShortcutAction),
}

impl FileBrowser {
    /// Single entry point for keyboard input.
    pub async fn handle_key(&self, press: KeyPress, focus: FocusTarget) -> KeyOutcome {
        // The inline rename field owns the keyboard while it is open
        let focus = if focus == FocusTarget::Browser && self.rename_session().is_some() {
            FocusTarget::TextInput
        } else {
            focus
        };

        let Some(action) = KeyboardShortcutRouter::resolve(&press, focus) else {
            return KeyOutcome::Ignored;
        };
        debug!(action = ?action, "Shortcut");

        let handled = match action {
            ShortcutAction::SelectAll => {
                self.select_all();
                true
            }
            ShortcutAction::Cut => self.cut(),
            ShortcutAction::Copy => self.copy(),
            ShortcutAction::Paste => {
                if self.clipboard().is_empty() {
                    false
                } else {
                    if let Err(e) = self.paste().await {
                        error!("Paste from keyboard failed: {}", e);
                    }
                    true
                }
            }
            ShortcutAction::Delete => {
                if !self.can_delete_selection() {
                    warn!("Delete shortcut blocked for the current selection");
                    return KeyOutcome::Blocked(action);
                }
                self.request_delete_selected().is_ok()
            }
            ShortcutAction::Escape => self.escape(),
        };

        if handled {
            KeyOutcome::Handled(action)
        } else {
            KeyOutcome::Ignored
        }
    }

    /// Undo exactly one thing, in priority order: clipboard, then selected
    /// items, then select mode.
    pub fn escape(&self) -> bool {
        let mut state = self.inner.state.write();

        if state.clipboard.cancel() {
            debug!("Escape cleared clipboard");
            return true;
        }
        if !state.selection.is_empty() {
            state.selection.deselect_all();
            debug!("Escape cleared selection");
            return true;
        }
        if state.selection.is_active() {
            state.selection.exit_select_mode();
            debug!("Escape left select mode");
            return true;
        }
        false
    }
}
