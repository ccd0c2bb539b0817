//! Remote File Store
//!
//! The asynchronous API the browser consumes. Every call may reject; none of
//! them is retried or timed out at this layer.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{FileEntry, FileId, Folder, FolderId, SpaceId, UserId};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("request rejected: {0}")]
    Rejected(String),
}

impl StoreError {
    pub fn folder_not_found(id: FolderId) -> Self {
        StoreError::NotFound {
            kind: "folder",
            id: id.to_string(),
        }
    }

    pub fn file_not_found(id: FileId) -> Self {
        StoreError::NotFound {
            kind: "file",
            id: id.to_string(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Bytes sent so far for one upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub bytes_transferred: u64,
    pub total_bytes: u64,
}

impl UploadProgress {
    pub fn new(bytes_transferred: u64, total_bytes: u64) -> Self {
        Self {
            bytes_transferred,
            total_bytes,
        }
    }

    /// Whole percent, clamped to 0..=100. An empty upload counts as complete.
    pub fn percent(&self) -> u8 {
        if self.total_bytes == 0 {
            return 100;
        }
        (self.bytes_transferred.saturating_mul(100) / self.total_bytes).min(100) as u8
    }
}

/// Progress callback handed to [`RemoteFileStore::upload_file`].
pub type ProgressFn<'a> = dyn Fn(UploadProgress) + Send + Sync + 'a;

#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub name: String,
    pub bytes: Vec<u8>,
    pub uploader_id: UserId,
}

#[derive(Debug, Clone)]
pub struct NewLink {
    pub name: String,
    pub url: String,
    pub creator_id: UserId,
}

#[async_trait]
pub trait RemoteFileStore: Send + Sync {
    /// Folders whose parent is `parent_id` (`None` = space root)
    async fn list_folders(
        &self,
        space_id: SpaceId,
        parent_id: Option<FolderId>,
    ) -> StoreResult<Vec<Folder>>;

    /// Files directly inside `folder_id` (`None` = space root)
    async fn list_files(
        &self,
        space_id: SpaceId,
        folder_id: Option<FolderId>,
    ) -> StoreResult<Vec<FileEntry>>;

    async fn create_folder(
        &self,
        space_id: SpaceId,
        name: &str,
        parent_id: Option<FolderId>,
    ) -> StoreResult<Folder>;

    async fn rename_folder(&self, folder_id: FolderId, name: &str) -> StoreResult<Folder>;

    /// Removes the folder only. Its files and sub-folders move to the folder's parent.
    async fn delete_folder(&self, folder_id: FolderId) -> StoreResult<()>;

    async fn upload_file(
        &self,
        space_id: SpaceId,
        folder_id: Option<FolderId>,
        request: UploadRequest,
        on_progress: &ProgressFn<'_>,
    ) -> StoreResult<FileEntry>;

    async fn rename_file(&self, file_id: FileId, name: &str) -> StoreResult<FileEntry>;

    async fn delete_file(&self, file_id: FileId) -> StoreResult<()>;

    async fn move_files(&self, file_ids: &[FileId], target: Option<FolderId>) -> StoreResult<()>;

    /// Duplicates metadata under new ids; the content reference is shared.
    async fn copy_files(
        &self,
        file_ids: &[FileId],
        target: Option<FolderId>,
    ) -> StoreResult<Vec<FileEntry>>;

    async fn create_link(
        &self,
        space_id: SpaceId,
        parent_id: Option<FolderId>,
        link: NewLink,
    ) -> StoreResult<FileEntry>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent() {
        assert_eq!(UploadProgress::new(0, 200).percent(), 0);
        assert_eq!(UploadProgress::new(50, 200).percent(), 25);
        assert_eq!(UploadProgress::new(200, 200).percent(), 100);
        assert_eq!(UploadProgress::new(0, 0).percent(), 100);
    }
}
