//! Permission gate
//!
//! Pure checks. The UI disables actions these refuse; the mutation layer
//! asks again before calling the store.

use space_fs::{FileEntry, UserId};

use super::error::PermissionError;
use super::types::{SpaceContext, SpaceRole};

/// Owners and admins may delete anything; everyone else only their own uploads.
pub fn can_delete(file: &FileEntry, acting_user: UserId, role: SpaceRole) -> bool {
    role.is_privileged() || file.uploader_id == acting_user
}

pub fn can_rename_file(file: &FileEntry, acting_user: UserId, role: SpaceRole) -> bool {
    can_delete(file, acting_user, role)
}

/// Bulk form of [`can_delete`]. One refused file blocks the whole set, and
/// an empty set is never deletable.
pub fn can_delete_all<'a>(
    files: impl IntoIterator<Item = &'a FileEntry>,
    space: &SpaceContext,
) -> bool {
    check_delete_all(files, space).is_ok()
}

/// Like [`can_delete_all`] but names the first file that blocks the batch.
pub fn check_delete_all<'a>(
    files: impl IntoIterator<Item = &'a FileEntry>,
    space: &SpaceContext,
) -> Result<(), PermissionError> {
    let mut seen_any = false;
    for file in files {
        seen_any = true;
        if !can_delete(file, space.user_id, space.role) {
            return Err(PermissionError::Denied {
                action: "delete",
                file_id: file.id,
                name: file.name.clone(),
            });
        }
    }

    if seen_any {
        Ok(())
    } else {
        Err(PermissionError::NothingSelected)
    }
}

pub fn check_rename_file(file: &FileEntry, space: &SpaceContext) -> Result<(), PermissionError> {
    if can_rename_file(file, space.user_id, space.role) {
        Ok(())
    } else {
        Err(PermissionError::Denied {
            action: "rename",
            file_id: file.id,
            name: file.name.clone(),
        })
    }
}
