// ============================================================================
// SELECTION - Multi-select over the files of the current listing
// ============================================================================

use space_fs::{FileId, ItemKey, Listing};
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionMode {
    #[default]
    Inert,
    Selecting,
}

/// Selected file ids. Folders are never part of a bulk selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    item_ids: HashSet<FileId>,
    mode: SelectionMode,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.mode == SelectionMode::Selecting
    }

    pub fn contains(&self, id: FileId) -> bool {
        self.item_ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.item_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_ids.is_empty()
    }

    /// Selected ids in the order they appear in `listing`.
    pub fn ids_in(&self, listing: &Listing) -> Vec<FileId> {
        listing
            .files
            .iter()
            .map(|file| file.id)
            .filter(|id| self.item_ids.contains(id))
            .collect()
    }

    pub fn enter_select_mode(&mut self) {
        self.mode = SelectionMode::Selecting;
    }

    /// Flip one file. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: FileId) -> bool {
        self.enter_select_mode();
        if self.item_ids.remove(&id) {
            false
        } else {
            self.item_ids.insert(id);
            true
        }
    }

    pub fn select(&mut self, id: FileId) {
        self.enter_select_mode();
        self.item_ids.insert(id);
    }

    /// Every file of the listing. Folders are skipped by construction.
    pub fn select_all(&mut self, listing: &Listing) {
        self.item_ids = listing.files.iter().map(|file| file.id).collect();
        if !self.item_ids.is_empty() {
            self.enter_select_mode();
        }
    }

    /// Empty the set and leave select mode.
    pub fn clear(&mut self) {
        self.item_ids.clear();
        self.mode = SelectionMode::Inert;
    }

    /// Empty the set but stay in select mode.
    pub fn deselect_all(&mut self) {
        self.item_ids.clear();
    }

    pub fn exit_select_mode(&mut self) {
        self.mode = SelectionMode::Inert;
    }

    /// Drop ids that no longer exist in a freshly fetched listing.
    pub fn retain_listed(&mut self, listing: &Listing) {
        self.item_ids
            .retain(|id| listing.files.iter().any(|file| file.id == *id));
    }
}

// ============================================================================
// LONG PRESS - Press-and-hold enters select mode
// ============================================================================

/// Gesture state for press-and-hold on a file.
///
/// `Triggered` survives the release so the click generated by that release
/// can be recognised and swallowed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LongPress {
    #[default]
    Idle,
    Pressing { item: FileId, started_at: Instant },
    Triggered { item: FileId },
}

impl LongPress {
    /// Begin a press. Only files take part in the gesture.
    pub fn press_start(&mut self, key: ItemKey, now: Instant) -> bool {
        match key {
            ItemKey::File(item) => {
                *self = LongPress::Pressing {
                    item,
                    started_at: now,
                };
                true
            }
            ItemKey::Folder(_) => {
                *self = LongPress::Idle;
                false
            }
        }
    }

    /// Fire once the press has been held for `threshold`. Returns the item
    /// that should become selected.
    pub fn poll(&mut self, now: Instant, threshold: Duration) -> Option<FileId> {
        match *self {
            LongPress::Pressing { item, started_at }
                if now.saturating_duration_since(started_at) >= threshold =>
            {
                *self = LongPress::Triggered { item };
                Some(item)
            }
            _ => None,
        }
    }

    /// Button or touch released. A press that reached the threshold without
    /// the timer having fired still counts.
    pub fn press_end(&mut self, now: Instant, threshold: Duration) -> Option<FileId> {
        match *self {
            LongPress::Pressing { .. } => {
                let fired = self.poll(now, threshold);
                if fired.is_none() {
                    *self = LongPress::Idle;
                }
                fired
            }
            _ => None,
        }
    }

    /// Pointer left the item or the gesture was interrupted.
    pub fn cancel(&mut self) {
        if matches!(self, LongPress::Pressing { .. }) {
            *self = LongPress::Idle;
        }
    }

    /// Consume a click. Returns true when it is the tail of a long-press on
    /// the same item and must be ignored.
    pub fn click(&mut self, key: ItemKey) -> bool {
        let swallowed = matches!(
            (*self, key),
            (LongPress::Triggered { item }, ItemKey::File(clicked)) if item == clicked
        );
        *self = LongPress::Idle;
        swallowed
    }

    pub fn reset(&mut self) {
        *self = LongPress::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use space_fs::{FileEntry, FileKind, Folder, FolderId, SpaceId, UserId};

    const THRESHOLD: Duration = Duration::from_millis(500);

    fn listing_with(file_names: &[&str]) -> Listing {
        let space_id = SpaceId::new();
        let folders = vec![Folder {
            id: FolderId::new(),
            name: "Nested".to_string(),
            parent_id: None,
            space_id,
        }];
        let files = file_names
            .iter()
            .map(|name| FileEntry {
                id: FileId::new(),
                space_id,
                name: name.to_string(),
                kind: FileKind::from_name(name),
                size_bytes: 1,
                uploader_id: UserId::new(),
                folder_id: None,
                created_at: Utc::now(),
                url: None,
                content_ref: None,
            })
            .collect();
        Listing::new(folders, files)
    }

    #[test]
    fn test_toggle_enters_select_mode() {
        let mut selection = SelectionState::new();
        let id = FileId::new();

        assert!(selection.toggle(id));
        assert!(selection.is_active());
        assert!(!selection.toggle(id));
        assert!(selection.is_empty());
        assert!(selection.is_active());
    }

    #[test]
    fn test_select_all_skips_folders() {
        let listing = listing_with(&["a.pdf", "b.png"]);
        let mut selection = SelectionState::new();

        selection.select_all(&listing);

        assert_eq!(selection.len(), 2);
        assert_eq!(selection.ids_in(&listing), listing.file_ids());
    }

    #[test]
    fn test_clear_returns_to_inert() {
        let listing = listing_with(&["a.pdf"]);
        let mut selection = SelectionState::new();
        selection.select_all(&listing);

        selection.deselect_all();
        assert!(selection.is_active());

        selection.clear();
        assert_eq!(selection.mode(), SelectionMode::Inert);
    }

    #[test]
    fn test_retain_drops_vanished_ids() {
        let listing = listing_with(&["a.pdf", "b.png"]);
        let mut selection = SelectionState::new();
        selection.select_all(&listing);

        let shrunk = Listing::new(vec![], vec![listing.files[0].clone()]);
        selection.retain_listed(&shrunk);

        assert_eq!(selection.ids_in(&listing), vec![listing.files[0].id]);
    }

    #[test]
    fn test_long_press_fires_after_threshold_and_swallows_click() {
        let item = FileId::new();
        let start = Instant::now();
        let mut press = LongPress::default();

        assert!(press.press_start(ItemKey::File(item), start));
        assert_eq!(press.poll(start + Duration::from_millis(100), THRESHOLD), None);
        assert_eq!(press.poll(start + THRESHOLD, THRESHOLD), Some(item));
        assert_eq!(press, LongPress::Triggered { item });

        assert_eq!(press.press_end(start + Duration::from_millis(700), THRESHOLD), None);
        assert!(press.click(ItemKey::File(item)));
        assert_eq!(press, LongPress::Idle);

        // The next click is an ordinary one
        assert!(!press.click(ItemKey::File(item)));
    }

    #[test]
    fn test_short_press_is_plain_click() {
        let item = FileId::new();
        let start = Instant::now();
        let mut press = LongPress::default();

        press.press_start(ItemKey::File(item), start);
        assert_eq!(press.press_end(start + Duration::from_millis(120), THRESHOLD), None);
        assert_eq!(press, LongPress::Idle);
        assert!(!press.click(ItemKey::File(item)));
    }

    #[test]
    fn test_release_past_threshold_triggers_without_timer() {
        let item = FileId::new();
        let start = Instant::now();
        let mut press = LongPress::default();

        press.press_start(ItemKey::File(item), start);
        assert_eq!(press.press_end(start + Duration::from_millis(800), THRESHOLD), Some(item));
        assert!(press.click(ItemKey::File(item)));
    }

    #[test]
    fn test_folders_do_not_long_press() {
        let mut press = LongPress::default();
        assert!(!press.press_start(ItemKey::Folder(FolderId::new()), Instant::now()));
        assert_eq!(press, LongPress::Idle);
    }
}
