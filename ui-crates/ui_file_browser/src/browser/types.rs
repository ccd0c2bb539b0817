use serde::{Deserialize, Serialize};
use space_fs::{FileEntry, FileId, FolderId, ItemKey, SpaceId, UserId};

// ============================================================================
// SPACE CONTEXT - Who is browsing, and with which role
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceRole {
    Owner,
    Admin,
    Member,
}

impl SpaceRole {
    /// Owners and admins may touch any file in the space
    pub fn is_privileged(&self) -> bool {
        matches!(self, SpaceRole::Owner | SpaceRole::Admin)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpaceContext {
    pub space_id: SpaceId,
    pub user_id: UserId,
    pub role: SpaceRole,
}

impl SpaceContext {
    pub fn new(space_id: SpaceId, user_id: UserId, role: SpaceRole) -> Self {
        Self {
            space_id,
            user_id,
            role,
        }
    }
}

// ============================================================================
// ENUMS - Sort options, focus, fetch status
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Name,
    Created,
    Size,
    Type,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Where keyboard input is currently going.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusTarget {
    Browser,
    /// A text input or textarea, including the inline rename field
    TextInput,
    Outside,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Failed(String),
}

// ============================================================================
// RENAME - Inline rename session
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenameSession {
    pub target: ItemKey,
    pub original_name: String,
}

// ============================================================================
// COLLABORATORS - Confirmation dialog and preview pane owned by the host
// ============================================================================

/// What a confirmed dialog should do. Plain data so hosts can hold on to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteFiles(Vec<FileId>),
    DeleteFolder(FolderId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub title: String,
    pub message: String,
    pub action: ConfirmAction,
}

/// Shows a confirmation dialog. The host answers with `FileBrowser::confirm`.
pub trait ConfirmationPrompt: Send + Sync {
    fn open_confirmation(&self, request: ConfirmationRequest);
}

/// Read-only detail view for a single file.
pub trait FilePreview: Send + Sync {
    fn set_viewing_file(&self, file: &FileEntry);
}

// ============================================================================
// OUTCOMES - What an input event ended up doing
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Release of a long-press; nothing else happens
    Swallowed,
    Toggled { file_id: FileId, selected: bool },
    Previewed(FileId),
    Navigated(FolderId),
    Ignored,
}
