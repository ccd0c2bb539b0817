use space_fs::{FileEntry, FileId, Folder, FolderId};
use tracing::{debug, error, info, warn};

use crate::browser::permissions::{can_delete_all, check_delete_all};
use crate::browser::{
    BrowserResult, ClipboardMode, ConfirmAction, ConfirmationRequest, ValidationError,
};
use crate::file_browser::FileBrowser;

impl FileBrowser {
    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    /// Flip one listed file. Returns whether it is selected afterwards.
    pub fn toggle_selection(&self, id: FileId) -> bool {
        let mut state = self.inner.state.write();
        if state.listing.file(id).is_none() {
            return false;
        }
        state.selection.toggle(id)
    }

    pub fn enter_select_mode(&self) {
        self.inner.state.write().selection.enter_select_mode();
    }

    pub fn select_all(&self) {
        let mut guard = self.inner.state.write();
        let state = &mut *guard;
        state.selection.select_all(&state.listing);
        debug!(count = state.selection.len(), "Selected all files");
    }

    pub fn clear_selection(&self) {
        self.inner.state.write().selection.clear();
    }

    // ------------------------------------------------------------------------
    // Clipboard
    // ------------------------------------------------------------------------

    pub fn cut(&self) -> bool {
        self.hold_selection(ClipboardMode::Cut)
    }

    pub fn copy(&self) -> bool {
        self.hold_selection(ClipboardMode::Copy)
    }

    fn hold_selection(&self, mode: ClipboardMode) -> bool {
        let mut guard = self.inner.state.write();
        let state = &mut *guard;

        let ids = state.selection.ids_in(&state.listing);
        let count = ids.len();
        if !state.clipboard.hold(ids, mode) {
            return false;
        }
        state.selection.clear();
        debug!(count, mode = ?mode, "Selection moved to clipboard");
        true
    }

    pub fn cancel_clipboard(&self) -> bool {
        self.inner.state.write().clipboard.cancel()
    }

    /// Paste into the current folder. Cut moves, copy duplicates. The
    /// clipboard is emptied whether or not the store call succeeds.
    pub async fn paste(&self) -> BrowserResult<usize> {
        let (held, target) = {
            let mut state = self.inner.state.write();
            (
                state.clipboard.take(),
                state.navigation.current_folder_id(),
            )
        };
        let Some((ids, mode)) = held else {
            return Ok(0);
        };

        let result = match mode {
            ClipboardMode::Cut => self
                .inner
                .operations
                .move_files(&ids, target)
                .await
                .map(|_| ids.len()),
            ClipboardMode::Copy => self
                .inner
                .operations
                .copy_files(&ids, target)
                .await
                .map(|copies| copies.len()),
        };

        match result {
            Ok(count) => {
                self.refresh_after_mutation().await;
                Ok(count)
            }
            Err(e) => {
                error!(mode = ?mode, "Paste failed: {}", e);
                Err(e)
            }
        }
    }

    // ------------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------------

    pub async fn create_folder(&self, name: &str) -> BrowserResult<Folder> {
        let parent_id = self.current_folder_id();
        let folder = self.inner.operations.create_folder(name, parent_id).await?;
        self.refresh_after_mutation().await;
        Ok(folder)
    }

    pub async fn create_link(&self, name: &str, url: &str) -> BrowserResult<FileEntry> {
        let parent_id = self.current_folder_id();
        let file = self
            .inner
            .operations
            .create_link(name, url, parent_id)
            .await?;
        self.refresh_after_mutation().await;
        Ok(file)
    }

    // ------------------------------------------------------------------------
    // Deletion - always goes through the confirmation prompt
    // ------------------------------------------------------------------------

    /// Whether the delete affordance should be enabled for the selection.
    pub fn can_delete_selection(&self) -> bool {
        let state = self.inner.state.read();
        can_delete_all(&state.selected_files(), &self.inner.space)
    }

    /// Ask the host to confirm deleting the selected files.
    pub fn request_delete_selected(&self) -> BrowserResult<ConfirmationRequest> {
        let files = self.inner.state.read().selected_files();
        if let Err(e) = check_delete_all(&files, &self.inner.space) {
            warn!("Delete refused: {}", e);
            return Err(e.into());
        }

        let message = match files.as_slice() {
            [file] => format!("\"{}\" will be permanently deleted.", file.name),
            _ => format!("{} files will be permanently deleted.", files.len()),
        };
        let request = ConfirmationRequest {
            title: "Delete files".to_string(),
            message,
            action: ConfirmAction::DeleteFiles(files.iter().map(|file| file.id).collect()),
        };
        self.open_confirmation(&request);
        Ok(request)
    }

    /// Ask the host to confirm deleting a folder. Its contents move up a level.
    pub fn request_delete_folder(&self, folder_id: FolderId) -> BrowserResult<ConfirmationRequest> {
        let Some(folder) = self.inner.state.read().listing.folder(folder_id).cloned() else {
            return Err(ValidationError::MissingItem.into());
        };

        let request = ConfirmationRequest {
            title: "Delete folder".to_string(),
            message: format!(
                "\"{}\" will be deleted. Its contents will move to the parent folder.",
                folder.name
            ),
            action: ConfirmAction::DeleteFolder(folder_id),
        };
        self.open_confirmation(&request);
        Ok(request)
    }

    fn open_confirmation(&self, request: &ConfirmationRequest) {
        match &self.inner.confirmations {
            Some(prompt) => prompt.open_confirmation(request.clone()),
            None => debug!(title = %request.title, "No confirmation prompt attached"),
        }
    }

    /// Carry out a confirmed action. Everything is checked again against the
    /// current listing, since it may have changed while the dialog was open.
    pub async fn confirm(&self, action: ConfirmAction) -> BrowserResult<()> {
        match action {
            ConfirmAction::DeleteFiles(ids) => {
                let files: Vec<FileEntry> = {
                    let state = self.inner.state.read();
                    ids.iter()
                        .filter_map(|id| state.listing.file(*id).cloned())
                        .collect()
                };
                if files.is_empty() {
                    return Err(ValidationError::MissingItem.into());
                }
                if files.len() < ids.len() {
                    debug!(
                        dropped = ids.len() - files.len(),
                        "Some files left the listing before the delete was confirmed"
                    );
                }

                let result = self.inner.operations.delete_files(&files).await;
                if result.is_ok() {
                    self.inner.state.write().selection.clear();
                }
                // Partial batches still changed the folder
                self.refresh_after_mutation().await;
                result.map(|_| ())
            }
            ConfirmAction::DeleteFolder(folder_id) => {
                if self.inner.state.read().listing.folder(folder_id).is_none() {
                    return Err(ValidationError::MissingItem.into());
                }
                self.inner.operations.delete_folder(folder_id).await?;
                info!(folder_id = %folder_id, "Folder deleted, contents moved up");
                self.refresh_after_mutation().await;
                Ok(())
            }
        }
    }
}
