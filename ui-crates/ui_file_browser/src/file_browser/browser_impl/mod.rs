// Modular implementation of FileBrowser
// Each module contains a separate impl block for FileBrowser

pub mod action_handlers;
pub mod constructors;
pub mod item_management;
pub mod keyboard_handlers;
pub mod navigation_handlers;
pub mod rename_operations;
pub mod upload_handlers;
