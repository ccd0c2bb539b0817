// File Browser - Controllers behind the space file browser
//
// Organized structure:
// - types: Space context, sort/focus enums, collaborator traits
// - actions: Keyboard shortcuts and their routing
// - permissions: Who may delete or rename a file
// - navigation: Current folder and breadcrumb path
// - fetcher: Generation-stamped listing loads
// - selection: Multi-select and the long-press gesture
// - clipboard: Cut/copy snapshot
// - mutations: Store calls behind validation and permission checks
// - upload: Upload progress state machine
// - settings: browser.toml
// - error: Validation/permission/transport errors

pub mod actions;
pub mod clipboard;
pub mod error;
pub mod fetcher;
pub mod mutations;
pub mod navigation;
pub mod permissions;
pub mod selection;
pub mod settings;
pub mod types;
pub mod upload;

// Re-export commonly used types
pub use actions::{Key, KeyPress, KeyboardShortcutRouter, Modifiers, ShortcutAction};
pub use clipboard::{ClipboardMode, ClipboardState};
pub use error::{
    BrowserError, BrowserResult, PermissionError, SettingsError, ValidationError,
};
pub use fetcher::{ContentFetcher, FetchOutcome, FetchTicket};
pub use mutations::{validate_name, MutationOps};
pub use navigation::{Breadcrumb, NavigationState};
pub use selection::{LongPress, SelectionMode, SelectionState};
pub use settings::BrowserSettings;
pub use types::{
    ClickOutcome, ConfirmAction, ConfirmationPrompt, ConfirmationRequest, FetchStatus,
    FilePreview, FocusTarget, RenameSession, SortBy, SortOrder, SpaceContext, SpaceRole,
};
pub use upload::{UploadState, UploadTracker};
