// ============================================================================
// CLIPBOARD - Cut/copy snapshot that survives navigation
// ============================================================================

use space_fs::FileId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipboardMode {
    Cut,
    Copy,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ClipboardState {
    #[default]
    Empty,
    Holding {
        item_ids: Vec<FileId>,
        mode: ClipboardMode,
    },
}

impl ClipboardState {
    pub fn is_empty(&self) -> bool {
        matches!(self, ClipboardState::Empty)
    }

    pub fn mode(&self) -> Option<ClipboardMode> {
        match self {
            ClipboardState::Empty => None,
            ClipboardState::Holding { mode, .. } => Some(*mode),
        }
    }

    pub fn item_ids(&self) -> &[FileId] {
        match self {
            ClipboardState::Empty => &[],
            ClipboardState::Holding { item_ids, .. } => item_ids,
        }
    }

    /// Whether a file is waiting to be moved away (hosts dim these).
    pub fn is_cut(&self, id: FileId) -> bool {
        self.mode() == Some(ClipboardMode::Cut) && self.item_ids().contains(&id)
    }

    /// Replace the contents. An empty snapshot leaves the clipboard alone.
    pub fn hold(&mut self, item_ids: Vec<FileId>, mode: ClipboardMode) -> bool {
        if item_ids.is_empty() {
            return false;
        }
        *self = ClipboardState::Holding { item_ids, mode };
        true
    }

    /// Take the contents for a paste, leaving the clipboard empty.
    pub fn take(&mut self) -> Option<(Vec<FileId>, ClipboardMode)> {
        match std::mem::take(self) {
            ClipboardState::Empty => None,
            ClipboardState::Holding { item_ids, mode } => Some((item_ids, mode)),
        }
    }

    pub fn cancel(&mut self) -> bool {
        !std::mem::take(self).is_empty()
    }
}
