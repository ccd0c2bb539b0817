//! Space Filesystem Layer
//!
//! Folder/file model for a collaborative space and the asynchronous seam to
//! the remote store that owns it. The browser core never talks to a
//! transport directly; everything goes through [`RemoteFileStore`].

pub mod memory;
pub mod model;
pub mod store;
pub mod utils;

pub use memory::{FailurePoint, MemoryFileStore};
pub use model::{
    FileCategory, FileEntry, FileId, FileKind, Folder, FolderId, ItemKey, Listing, ListingItem,
    SpaceId, UserId,
};
pub use store::{
    NewLink, ProgressFn, RemoteFileStore, StoreError, StoreResult, UploadProgress, UploadRequest,
};
pub use utils::{format_created_at, format_file_size};
