//! In-process store
//!
//! Holds a whole space tree in memory and honours every [`RemoteFileStore`]
//! contract. Latency and one-shot failures can be injected so callers can
//! exercise race and error paths without a network.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use crate::model::{FileEntry, FileId, FileKind, Folder, FolderId, SpaceId, UserId};
use crate::store::{
    NewLink, ProgressFn, RemoteFileStore, StoreError, StoreResult, UploadProgress, UploadRequest,
};

const DEFAULT_UPLOAD_CHUNK: usize = 64 * 1024;

/// Store call that should reject the next time it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePoint {
    ListFolders,
    ListFiles,
    CreateFolder,
    RenameFolder,
    DeleteFolder,
    /// Fires after the first chunk has been reported
    Upload,
    RenameFile,
    DeleteFile(FileId),
    MoveFiles,
    CopyFiles,
    CreateLink,
}

#[derive(Default)]
struct StoreData {
    folders: HashMap<FolderId, Folder>,
    files: HashMap<FileId, FileEntry>,
    listing_delays: HashMap<Option<FolderId>, Duration>,
    upload_chunk_delay: Duration,
    pending_failures: Vec<FailurePoint>,
}

impl StoreData {
    fn ensure_folder(&self, folder_id: Option<FolderId>) -> StoreResult<()> {
        match folder_id {
            Some(id) if !self.folders.contains_key(&id) => Err(StoreError::folder_not_found(id)),
            _ => Ok(()),
        }
    }

    fn ensure_files(&self, file_ids: &[FileId]) -> StoreResult<()> {
        match file_ids.iter().find(|id| !self.files.contains_key(*id)) {
            Some(missing) => Err(StoreError::file_not_found(*missing)),
            None => Ok(()),
        }
    }

    fn folders_in(&self, space_id: SpaceId, parent_id: Option<FolderId>) -> Vec<Folder> {
        let mut folders: Vec<Folder> = self
            .folders
            .values()
            .filter(|folder| folder.space_id == space_id && folder.parent_id == parent_id)
            .cloned()
            .collect();
        folders.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        folders
    }

    fn files_in(&self, space_id: SpaceId, folder_id: Option<FolderId>) -> Vec<FileEntry> {
        let mut files: Vec<FileEntry> = self
            .files
            .values()
            .filter(|file| file.space_id == space_id && file.folder_id == folder_id)
            .cloned()
            .collect();
        files.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        files
    }
}

pub struct MemoryFileStore {
    data: RwLock<StoreData>,
    upload_chunk_size: usize,
}

impl Default for MemoryFileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(StoreData::default()),
            upload_chunk_size: DEFAULT_UPLOAD_CHUNK,
        }
    }

    pub fn with_upload_chunk_size(mut self, chunk_size: usize) -> Self {
        self.upload_chunk_size = chunk_size.max(1);
        self
    }

    /// Insert a folder directly, bypassing validation.
    pub fn seed_folder(
        &self,
        space_id: SpaceId,
        name: &str,
        parent_id: Option<FolderId>,
    ) -> Folder {
        let folder = Folder {
            id: FolderId::new(),
            name: name.to_string(),
            parent_id,
            space_id,
        };
        self.data.write().folders.insert(folder.id, folder.clone());
        folder
    }

    /// Insert a file directly, bypassing validation.
    pub fn seed_file(
        &self,
        space_id: SpaceId,
        folder_id: Option<FolderId>,
        name: &str,
        size_bytes: u64,
        uploader_id: UserId,
    ) -> FileEntry {
        let file = FileEntry {
            id: FileId::new(),
            space_id,
            name: name.to_string(),
            kind: FileKind::from_name(name),
            size_bytes,
            uploader_id,
            folder_id,
            created_at: Utc::now(),
            url: None,
            content_ref: Some(new_content_ref()),
        };
        self.data.write().files.insert(file.id, file.clone());
        file
    }

    pub fn folder(&self, folder_id: FolderId) -> Option<Folder> {
        self.data.read().folders.get(&folder_id).cloned()
    }

    pub fn file(&self, file_id: FileId) -> Option<FileEntry> {
        self.data.read().files.get(&file_id).cloned()
    }

    pub fn files_in(&self, space_id: SpaceId, folder_id: Option<FolderId>) -> Vec<FileEntry> {
        self.data.read().files_in(space_id, folder_id)
    }

    pub fn folders_in(&self, space_id: SpaceId, parent_id: Option<FolderId>) -> Vec<Folder> {
        self.data.read().folders_in(space_id, parent_id)
    }

    /// Delay both listing calls for one folder.
    pub fn set_listing_delay(&self, folder_id: Option<FolderId>, delay: Duration) {
        self.data.write().listing_delays.insert(folder_id, delay);
    }

    pub fn set_upload_chunk_delay(&self, delay: Duration) {
        self.data.write().upload_chunk_delay = delay;
    }

    /// Make the next call matching `point` reject with a transport error.
    pub fn fail_next(&self, point: FailurePoint) {
        self.data.write().pending_failures.push(point);
    }

    fn take_failure(&self, point: FailurePoint) -> StoreResult<()> {
        let mut data = self.data.write();
        if let Some(pos) = data.pending_failures.iter().position(|p| *p == point) {
            data.pending_failures.remove(pos);
            debug!(?point, "Injected store failure");
            return Err(StoreError::Transport(format!("injected failure at {:?}", point)));
        }
        Ok(())
    }

    fn listing_delay(&self, folder_id: Option<FolderId>) -> Duration {
        self.data
            .read()
            .listing_delays
            .get(&folder_id)
            .copied()
            .unwrap_or_default()
    }
}

fn new_content_ref() -> String {
    format!("blob:{}", Uuid::new_v4())
}

fn require_text(value: &str, what: &str) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::Rejected(format!("{} must not be empty", what)));
    }
    Ok(())
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[async_trait]
impl RemoteFileStore for MemoryFileStore {
    async fn list_folders(
        &self,
        space_id: SpaceId,
        parent_id: Option<FolderId>,
    ) -> StoreResult<Vec<Folder>> {
        pause(self.listing_delay(parent_id)).await;
        self.take_failure(FailurePoint::ListFolders)?;

        let data = self.data.read();
        data.ensure_folder(parent_id)?;
        Ok(data.folders_in(space_id, parent_id))
    }

    async fn list_files(
        &self,
        space_id: SpaceId,
        folder_id: Option<FolderId>,
    ) -> StoreResult<Vec<FileEntry>> {
        pause(self.listing_delay(folder_id)).await;
        self.take_failure(FailurePoint::ListFiles)?;

        let data = self.data.read();
        data.ensure_folder(folder_id)?;
        Ok(data.files_in(space_id, folder_id))
    }

    async fn create_folder(
        &self,
        space_id: SpaceId,
        name: &str,
        parent_id: Option<FolderId>,
    ) -> StoreResult<Folder> {
        self.take_failure(FailurePoint::CreateFolder)?;
        require_text(name, "folder name")?;

        let mut data = self.data.write();
        data.ensure_folder(parent_id)?;
        let folder = Folder {
            id: FolderId::new(),
            name: name.to_string(),
            parent_id,
            space_id,
        };
        data.folders.insert(folder.id, folder.clone());
        Ok(folder)
    }

    async fn rename_folder(&self, folder_id: FolderId, name: &str) -> StoreResult<Folder> {
        self.take_failure(FailurePoint::RenameFolder)?;
        require_text(name, "folder name")?;

        let mut data = self.data.write();
        let folder = data
            .folders
            .get_mut(&folder_id)
            .ok_or_else(|| StoreError::folder_not_found(folder_id))?;
        folder.name = name.to_string();
        Ok(folder.clone())
    }

    async fn delete_folder(&self, folder_id: FolderId) -> StoreResult<()> {
        self.take_failure(FailurePoint::DeleteFolder)?;

        let mut data = self.data.write();
        let removed = data
            .folders
            .remove(&folder_id)
            .ok_or_else(|| StoreError::folder_not_found(folder_id))?;

        // Children climb one level instead of being deleted
        for folder in data.folders.values_mut() {
            if folder.parent_id == Some(folder_id) {
                folder.parent_id = removed.parent_id;
            }
        }
        for file in data.files.values_mut() {
            if file.folder_id == Some(folder_id) {
                file.folder_id = removed.parent_id;
            }
        }
        Ok(())
    }

    async fn upload_file(
        &self,
        space_id: SpaceId,
        folder_id: Option<FolderId>,
        request: UploadRequest,
        on_progress: &ProgressFn<'_>,
    ) -> StoreResult<FileEntry> {
        require_text(&request.name, "file name")?;
        let chunk_delay = {
            let data = self.data.read();
            data.ensure_folder(folder_id)?;
            data.upload_chunk_delay
        };

        let total = request.bytes.len() as u64;
        if total == 0 {
            on_progress(UploadProgress::new(0, 0));
            self.take_failure(FailurePoint::Upload)?;
        }

        let mut sent = 0u64;
        for chunk in request.bytes.chunks(self.upload_chunk_size) {
            pause(chunk_delay).await;
            sent += chunk.len() as u64;
            on_progress(UploadProgress::new(sent, total));
            self.take_failure(FailurePoint::Upload)?;
        }

        let file = FileEntry {
            id: FileId::new(),
            space_id,
            kind: FileKind::from_name(&request.name),
            name: request.name,
            size_bytes: total,
            uploader_id: request.uploader_id,
            folder_id,
            created_at: Utc::now(),
            url: None,
            content_ref: Some(new_content_ref()),
        };

        let mut data = self.data.write();
        // The target may have vanished while bytes were in flight
        data.ensure_folder(folder_id)?;
        data.files.insert(file.id, file.clone());
        Ok(file)
    }

    async fn rename_file(&self, file_id: FileId, name: &str) -> StoreResult<FileEntry> {
        self.take_failure(FailurePoint::RenameFile)?;
        require_text(name, "file name")?;

        let mut data = self.data.write();
        let file = data
            .files
            .get_mut(&file_id)
            .ok_or_else(|| StoreError::file_not_found(file_id))?;
        file.name = name.to_string();
        if !file.kind.is_link() {
            file.kind = FileKind::from_name(name);
        }
        Ok(file.clone())
    }

    async fn delete_file(&self, file_id: FileId) -> StoreResult<()> {
        self.take_failure(FailurePoint::DeleteFile(file_id))?;

        self.data
            .write()
            .files
            .remove(&file_id)
            .map(|_| ())
            .ok_or_else(|| StoreError::file_not_found(file_id))
    }

    async fn move_files(&self, file_ids: &[FileId], target: Option<FolderId>) -> StoreResult<()> {
        self.take_failure(FailurePoint::MoveFiles)?;

        let mut data = self.data.write();
        data.ensure_folder(target)?;
        data.ensure_files(file_ids)?;
        for id in file_ids {
            if let Some(file) = data.files.get_mut(id) {
                file.folder_id = target;
            }
        }
        Ok(())
    }

    async fn copy_files(
        &self,
        file_ids: &[FileId],
        target: Option<FolderId>,
    ) -> StoreResult<Vec<FileEntry>> {
        self.take_failure(FailurePoint::CopyFiles)?;

        let mut data = self.data.write();
        data.ensure_folder(target)?;
        data.ensure_files(file_ids)?;

        let now = Utc::now();
        let copies: Vec<FileEntry> = file_ids
            .iter()
            .filter_map(|id| data.files.get(id))
            .map(|source| FileEntry {
                id: FileId::new(),
                folder_id: target,
                created_at: now,
                ..source.clone()
            })
            .collect();
        for copy in &copies {
            data.files.insert(copy.id, copy.clone());
        }
        Ok(copies)
    }

    async fn create_link(
        &self,
        space_id: SpaceId,
        parent_id: Option<FolderId>,
        link: NewLink,
    ) -> StoreResult<FileEntry> {
        self.take_failure(FailurePoint::CreateLink)?;
        require_text(&link.name, "link name")?;
        require_text(&link.url, "link url")?;

        let mut data = self.data.write();
        data.ensure_folder(parent_id)?;
        let file = FileEntry {
            id: FileId::new(),
            space_id,
            name: link.name,
            kind: FileKind::Link,
            size_bytes: 0,
            uploader_id: link.creator_id,
            folder_id: parent_id,
            created_at: Utc::now(),
            url: Some(link.url),
            content_ref: None,
        };
        data.files.insert(file.id, file.clone());
        Ok(file)
    }
}
