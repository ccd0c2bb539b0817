// ============================================================================
// FOLDER TREE NAVIGATION - Current folder and breadcrumb path
// ============================================================================

use space_fs::{Folder, FolderId};

/// A breadcrumb target. `Root` sits before the first path element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Breadcrumb {
    Root,
    Index(usize),
}

impl Breadcrumb {
    /// Any negative index means the space root.
    pub fn from_index(index: isize) -> Self {
        usize::try_from(index).map_or(Breadcrumb::Root, Breadcrumb::Index)
    }
}

/// Ancestor chain from the root down to the current folder.
///
/// The current folder is always the last path element, or the root when the
/// path is empty. There is no separate field that could drift from it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationState {
    path: Vec<Folder>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_folder_id(&self) -> Option<FolderId> {
        self.path.last().map(|folder| folder.id)
    }

    pub fn path(&self) -> &[Folder] {
        &self.path
    }

    /// Descend into a direct child of the current folder.
    pub fn navigate_into(&mut self, folder: Folder) -> bool {
        if folder.parent_id != self.current_folder_id() {
            tracing::warn!(
                folder_id = %folder.id,
                "Refusing to navigate into a folder that is not a child of the current one"
            );
            return false;
        }
        self.path.push(folder);
        true
    }

    pub fn navigate_back(&mut self) -> bool {
        self.path.pop().is_some()
    }

    /// Truncate the path so the chosen crumb becomes current. Out-of-range
    /// indices and the crumb that is already current change nothing.
    pub fn navigate_to_breadcrumb(&mut self, crumb: Breadcrumb) -> bool {
        let keep = match crumb {
            Breadcrumb::Root => 0,
            Breadcrumb::Index(index) if index < self.path.len() => index + 1,
            Breadcrumb::Index(_) => return false,
        };
        if keep == self.path.len() {
            return false;
        }
        self.path.truncate(keep);
        true
    }
}
