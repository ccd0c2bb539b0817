use parking_lot::RwLock;
use space_fs::{FileEntry, FileId, Folder, FolderId, Listing};
use std::sync::Arc;
use tokio::sync::watch;

use crate::browser::{
    BrowserSettings, ClipboardState, ConfirmationPrompt, ContentFetcher, FetchStatus,
    FilePreview, LongPress, MutationOps, NavigationState, RenameSession, SelectionMode,
    SelectionState, SortBy, SortOrder, SpaceContext, UploadState, UploadTracker,
};

mod browser_impl;

pub use browser_impl::constructors::FileBrowserBuilder;
pub use browser_impl::keyboard_handlers::KeyOutcome;

// ============================================================================
// FILE BROWSER
// ============================================================================

/// One space's file browser. Cheap to clone; clones share state.
///
/// Locks on the state container are only ever taken between awaits, never
/// across one.
#[derive(Clone)]
pub struct FileBrowser {
    inner: Arc<BrowserInner>,
}

struct BrowserInner {
    space: SpaceContext,
    settings: BrowserSettings,

    fetcher: ContentFetcher,
    operations: MutationOps,
    upload: UploadTracker,

    state: RwLock<BrowserState>,

    // Host collaborators
    confirmations: Option<Arc<dyn ConfirmationPrompt>>,
    preview: Option<Arc<dyn FilePreview>>,
}

struct BrowserState {
    navigation: NavigationState,
    listing: Listing,
    fetch_status: FetchStatus,

    selection: SelectionState,
    long_press: LongPress,
    clipboard: ClipboardState,

    // Rename state
    rename: Option<RenameSession>,

    // Presentation
    sort_by: SortBy,
    sort_order: SortOrder,
    filter_query: String,
    show_hidden_files: bool,
}

impl BrowserState {
    fn new(settings: &BrowserSettings) -> Self {
        Self {
            navigation: NavigationState::new(),
            listing: Listing::default(),
            fetch_status: FetchStatus::Idle,
            selection: SelectionState::new(),
            long_press: LongPress::Idle,
            clipboard: ClipboardState::Empty,
            rename: None,
            sort_by: settings.default_sort_by,
            sort_order: settings.default_sort_order,
            filter_query: String::new(),
            show_hidden_files: settings.show_hidden_files,
        }
    }

    /// Everything scoped to the folder being left
    fn reset_for_navigation(&mut self) {
        self.selection.clear();
        self.long_press.reset();
        self.rename = None;
    }

    fn selected_files(&self) -> Vec<FileEntry> {
        self.selection
            .ids_in(&self.listing)
            .into_iter()
            .filter_map(|id| self.listing.file(id).cloned())
            .collect()
    }
}

// ============================================================================
// ACCESSORS
// ============================================================================

impl FileBrowser {
    pub fn space(&self) -> &SpaceContext {
        &self.inner.space
    }

    pub fn settings(&self) -> &BrowserSettings {
        &self.inner.settings
    }

    pub fn current_folder_id(&self) -> Option<FolderId> {
        self.inner.state.read().navigation.current_folder_id()
    }

    /// Breadcrumb path from the root to the current folder
    pub fn path(&self) -> Vec<Folder> {
        self.inner.state.read().navigation.path().to_vec()
    }

    pub fn listing(&self) -> Listing {
        self.inner.state.read().listing.clone()
    }

    pub fn fetch_status(&self) -> FetchStatus {
        self.inner.state.read().fetch_status.clone()
    }

    /// Selected file ids in listing order
    pub fn selected_ids(&self) -> Vec<FileId> {
        let state = self.inner.state.read();
        state.selection.ids_in(&state.listing)
    }

    pub fn is_selected(&self, id: FileId) -> bool {
        self.inner.state.read().selection.contains(id)
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.inner.state.read().selection.mode()
    }

    pub fn long_press(&self) -> LongPress {
        self.inner.state.read().long_press
    }

    pub fn clipboard(&self) -> ClipboardState {
        self.inner.state.read().clipboard.clone()
    }

    pub fn rename_session(&self) -> Option<RenameSession> {
        self.inner.state.read().rename.clone()
    }

    pub fn upload_state(&self) -> UploadState {
        self.inner.upload.state()
    }

    pub fn subscribe_upload(&self) -> watch::Receiver<UploadState> {
        self.inner.upload.subscribe()
    }
}
