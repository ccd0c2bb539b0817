//! File Browser UI
//!
//! Folder navigation, selection, clipboard and uploads for one space,
//! kept in sync with the remote store

pub mod browser;
mod file_browser;

// Re-export main types
pub use browser::*;
pub use file_browser::{FileBrowser, FileBrowserBuilder, KeyOutcome};
