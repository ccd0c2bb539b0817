use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::utils::format_file_size;

// ============================================================================
// IDS - Opaque identifiers handed out by the remote store
// ============================================================================

macro_rules! store_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

store_id!(
    /// A collaborative workspace owning its own folder/file hierarchy
    SpaceId
);
store_id!(FolderId);
store_id!(FileId);
store_id!(UserId);

// ============================================================================
// FOLDER
// ============================================================================

/// A named tree node. `parent_id == None` means the folder sits at the space root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    pub parent_id: Option<FolderId>,
    pub space_id: SpaceId,
}

// ============================================================================
// FILE ENTRY
// ============================================================================

/// Either the lowercase extension of an uploaded file or an external link.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "extension")]
pub enum FileKind {
    Extension(String),
    Link,
}

impl FileKind {
    /// Derive the kind from a file name. Names without a dot get an empty extension.
    pub fn from_name(name: &str) -> Self {
        let extension = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext.to_lowercase(),
            _ => String::new(),
        };
        FileKind::Extension(extension)
    }

    pub fn as_str(&self) -> &str {
        match self {
            FileKind::Extension(ext) => ext,
            FileKind::Link => "link",
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self, FileKind::Link)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse grouping used by hosts to pick a preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileCategory {
    Image,    // .png, .jpg, .jpeg, .gif, .bmp, .svg, .webp
    Video,    // .mp4, .webm, .avi, .mov
    Audio,    // .wav, .mp3, .ogg, .flac
    Document, // .txt, .md, .pdf, .doc(x), .xls(x), .ppt(x)
    Archive,  // .zip, .tar, .gz, .7z
    Link,
    Other,
}

impl FileCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            FileCategory::Image => "Image",
            FileCategory::Video => "Video",
            FileCategory::Audio => "Audio",
            FileCategory::Document => "Document",
            FileCategory::Archive => "Archive",
            FileCategory::Link => "Link",
            FileCategory::Other => "File",
        }
    }
}

impl From<&FileKind> for FileCategory {
    fn from(kind: &FileKind) -> Self {
        match kind {
            FileKind::Link => FileCategory::Link,
            FileKind::Extension(ext) => match ext.as_str() {
                "png" | "jpg" | "jpeg" | "gif" | "bmp" | "svg" | "webp" => FileCategory::Image,
                "mp4" | "webm" | "avi" | "mov" => FileCategory::Video,
                "wav" | "mp3" | "ogg" | "flac" => FileCategory::Audio,
                "txt" | "md" | "pdf" | "doc" | "docx" | "xls" | "xlsx" | "ppt" | "pptx" => {
                    FileCategory::Document
                }
                "zip" | "tar" | "gz" | "7z" => FileCategory::Archive,
                _ => FileCategory::Other,
            },
        }
    }
}

/// A leaf node: an uploaded document/image/video, or a zero-byte link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub id: FileId,
    pub space_id: SpaceId,
    pub name: String,
    pub kind: FileKind,
    pub size_bytes: u64,
    pub uploader_id: UserId,
    pub folder_id: Option<FolderId>,
    pub created_at: DateTime<Utc>,
    /// Only set for `FileKind::Link` entries
    pub url: Option<String>,
    /// Handle to the stored bytes. Copies share it with their source.
    pub content_ref: Option<String>,
}

impl FileEntry {
    pub fn category(&self) -> FileCategory {
        FileCategory::from(&self.kind)
    }

    pub fn display_size(&self) -> String {
        format_file_size(self.size_bytes)
    }

    pub fn is_link(&self) -> bool {
        self.kind.is_link()
    }
}

// ============================================================================
// LISTING - What a single folder currently contains
// ============================================================================

/// Identity of a row in the listing, without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKey {
    Folder(FolderId),
    File(FileId),
}

/// A row of the listing. Folders and files share one list but never one shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListingItem {
    Folder(Folder),
    File(FileEntry),
}

impl ListingItem {
    pub fn name(&self) -> &str {
        match self {
            ListingItem::Folder(folder) => &folder.name,
            ListingItem::File(file) => &file.name,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Listing {
    pub folders: Vec<Folder>,
    pub files: Vec<FileEntry>,
}

impl Listing {
    pub fn new(folders: Vec<Folder>, files: Vec<FileEntry>) -> Self {
        Self { folders, files }
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.folders.len() + self.files.len()
    }

    pub fn folder(&self, id: FolderId) -> Option<&Folder> {
        self.folders.iter().find(|folder| folder.id == id)
    }

    pub fn file(&self, id: FileId) -> Option<&FileEntry> {
        self.files.iter().find(|file| file.id == id)
    }

    pub fn contains(&self, key: ItemKey) -> bool {
        match key {
            ItemKey::Folder(id) => self.folder(id).is_some(),
            ItemKey::File(id) => self.file(id).is_some(),
        }
    }

    /// File ids in listing order. Folders are never part of this.
    pub fn file_ids(&self) -> Vec<FileId> {
        self.files.iter().map(|file| file.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_name() {
        assert_eq!(FileKind::from_name("a.PDF"), FileKind::Extension("pdf".to_string()));
        assert_eq!(FileKind::from_name("archive.tar.gz"), FileKind::Extension("gz".to_string()));
        assert_eq!(FileKind::from_name("README"), FileKind::Extension(String::new()));
        assert_eq!(FileKind::from_name(".env"), FileKind::Extension(String::new()));
        assert_eq!(FileKind::Link.as_str(), "link");
    }

    #[test]
    fn test_category_mapping() {
        assert_eq!(FileCategory::from(&FileKind::from_name("x.png")), FileCategory::Image);
        assert_eq!(FileCategory::from(&FileKind::from_name("x.mp4")), FileCategory::Video);
        assert_eq!(FileCategory::from(&FileKind::from_name("x.pdf")), FileCategory::Document);
        assert_eq!(FileCategory::from(&FileKind::Link), FileCategory::Link);
        assert_eq!(FileCategory::from(&FileKind::from_name("x.bin")), FileCategory::Other);
    }

    #[test]
    fn test_listing_file_ids_exclude_folders() {
        let space_id = SpaceId::new();
        let folder = Folder {
            id: FolderId::new(),
            name: "Specs".to_string(),
            parent_id: None,
            space_id,
        };
        let file = FileEntry {
            id: FileId::new(),
            space_id,
            name: "a.pdf".to_string(),
            kind: FileKind::from_name("a.pdf"),
            size_bytes: 10,
            uploader_id: UserId::new(),
            folder_id: None,
            created_at: Utc::now(),
            url: None,
            content_ref: None,
        };
        let listing = Listing::new(vec![folder.clone()], vec![file.clone()]);

        assert_eq!(listing.file_ids(), vec![file.id]);
        assert_eq!(listing.len(), 2);
        assert!(listing.contains(ItemKey::Folder(folder.id)));
    }

    #[test]
    fn test_ids_serialize_as_plain_uuid() {
        let id = FileId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
    }
}
