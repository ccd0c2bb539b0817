// ============================================================================
// MUTATION OPS - Validated, permission-checked calls into the remote store
// ============================================================================

use space_fs::{
    FileEntry, FileId, Folder, FolderId, NewLink, ProgressFn, RemoteFileStore, UploadRequest,
};
use std::sync::Arc;
use tracing::{error, info};

use super::error::{BrowserError, BrowserResult, ValidationError};
use super::permissions::{check_delete_all, check_rename_file};
use super::types::SpaceContext;

/// Trim a user-supplied name, rejecting empty and whitespace-only input.
pub fn validate_name(name: &str, what: &'static str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty(what));
    }
    Ok(trimmed.to_string())
}

/// Store-facing half of every mutation. Refreshing the listing afterwards is
/// the caller's job.
pub struct MutationOps {
    store: Arc<dyn RemoteFileStore>,
    space: SpaceContext,
}

impl MutationOps {
    pub fn new(store: Arc<dyn RemoteFileStore>, space: SpaceContext) -> Self {
        Self { store, space }
    }

    pub async fn create_folder(
        &self,
        name: &str,
        parent_id: Option<FolderId>,
    ) -> BrowserResult<Folder> {
        let name = validate_name(name, "folder name")?;
        let folder = self
            .store
            .create_folder(self.space.space_id, &name, parent_id)
            .await?;
        info!(folder_id = %folder.id, name = %folder.name, "Created folder");
        Ok(folder)
    }

    pub async fn rename_folder(&self, folder_id: FolderId, name: &str) -> BrowserResult<Folder> {
        let name = validate_name(name, "folder name")?;
        let folder = self.store.rename_folder(folder_id, &name).await?;
        info!(folder_id = %folder_id, name = %folder.name, "Renamed folder");
        Ok(folder)
    }

    /// Non-recursive: the store moves the folder's children up one level.
    pub async fn delete_folder(&self, folder_id: FolderId) -> BrowserResult<()> {
        self.store.delete_folder(folder_id).await?;
        info!(folder_id = %folder_id, "Deleted folder");
        Ok(())
    }

    pub async fn rename_file(&self, file: &FileEntry, name: &str) -> BrowserResult<FileEntry> {
        let name = validate_name(name, "file name")?;
        check_rename_file(file, &self.space)?;
        let renamed = self.store.rename_file(file.id, &name).await?;
        info!(file_id = %file.id, name = %renamed.name, "Renamed file");
        Ok(renamed)
    }

    /// Delete one file at a time. Nothing is sent unless every file passes
    /// the permission gate; a failure part-way keeps what was already deleted.
    pub async fn delete_files(&self, files: &[FileEntry]) -> BrowserResult<usize> {
        check_delete_all(files, &self.space)?;

        let total = files.len();
        for (completed, file) in files.iter().enumerate() {
            if let Err(e) = self.store.delete_file(file.id).await {
                error!(file_id = %file.id, completed, total, "Batch delete interrupted: {}", e);
                return Err(BrowserError::BatchInterrupted {
                    completed,
                    total,
                    source: e,
                });
            }
        }
        info!(count = total, "Deleted files");
        Ok(total)
    }

    pub async fn move_files(&self, ids: &[FileId], target: Option<FolderId>) -> BrowserResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        self.store.move_files(ids, target).await?;
        info!(count = ids.len(), target = ?target, "Moved files");
        Ok(())
    }

    pub async fn copy_files(
        &self,
        ids: &[FileId],
        target: Option<FolderId>,
    ) -> BrowserResult<Vec<FileEntry>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let copies = self.store.copy_files(ids, target).await?;
        info!(count = copies.len(), target = ?target, "Copied files");
        Ok(copies)
    }

    pub async fn create_link(
        &self,
        name: &str,
        url: &str,
        parent_id: Option<FolderId>,
    ) -> BrowserResult<FileEntry> {
        let name = validate_name(name, "link name")?;
        let url = validate_name(url, "link url")?;
        let link = NewLink {
            name,
            url,
            creator_id: self.space.user_id,
        };
        let file = self
            .store
            .create_link(self.space.space_id, parent_id, link)
            .await?;
        info!(file_id = %file.id, "Created link");
        Ok(file)
    }

    pub async fn upload_file(
        &self,
        folder_id: Option<FolderId>,
        name: &str,
        bytes: Vec<u8>,
        on_progress: &ProgressFn<'_>,
    ) -> BrowserResult<FileEntry> {
        let request = UploadRequest {
            name: validate_name(name, "file name")?,
            bytes,
            uploader_id: self.space.user_id,
        };
        let file = self
            .store
            .upload_file(self.space.space_id, folder_id, request, on_progress)
            .await?;
        info!(file_id = %file.id, size = file.size_bytes, "Uploaded file");
        Ok(file)
    }
}
