use space_fs::{FileId, StoreError};
use std::path::PathBuf;
use thiserror::Error;

/// Input rejected before any remote call is made.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("the item is no longer in the current folder")]
    MissingItem,
}

/// Mutation refused by the permission gate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PermissionError {
    #[error("not allowed to {action} \"{name}\"")]
    Denied {
        action: &'static str,
        file_id: FileId,
        name: String,
    },

    #[error("no files selected")]
    NothingSelected,
}

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Permission(#[from] PermissionError),

    #[error(transparent)]
    Transport(#[from] StoreError),

    /// Earlier deletions in the batch stay committed
    #[error("deleted {completed} of {total} files before failing: {source}")]
    BatchInterrupted {
        completed: usize,
        total: usize,
        #[source]
        source: StoreError,
    },

    #[error("an upload is already in progress")]
    UploadInProgress,
}

pub type BrowserResult<T> = Result<T, BrowserError>;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}
