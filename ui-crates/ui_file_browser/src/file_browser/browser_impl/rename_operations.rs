use space_fs::ItemKey;
use tracing::{debug, warn};

use crate::browser::permissions::check_rename_file;
use crate::browser::{validate_name, BrowserResult, RenameSession, ValidationError};
use crate::file_browser::FileBrowser;

impl FileBrowser {
    /// Open the inline rename field for a listed item. Files the user may not
    /// rename are refused up front.
    pub fn start_rename(&self, target: ItemKey) -> bool {
        let mut state = self.inner.state.write();

        let original_name = match target {
            ItemKey::Folder(id) => state.listing.folder(id).map(|folder| folder.name.clone()),
            ItemKey::File(id) => match state.listing.file(id) {
                Some(file) => match check_rename_file(file, &self.inner.space) {
                    Ok(()) => Some(file.name.clone()),
                    Err(e) => {
                        warn!("Rename refused: {}", e);
                        return false;
                    }
                },
                None => None,
            },
        };
        let Some(original_name) = original_name else {
            return false;
        };

        state.rename = Some(RenameSession {
            target,
            original_name,
        });
        true
    }

    /// Close the rename field and apply the new name. Returns false when
    /// nothing was renamed (no open session, or the name did not change).
    /// A blank name is rejected and the field stays open.
    pub async fn commit_rename(&self, text: &str) -> BrowserResult<bool> {
        let (session, new_name) = {
            let mut state = self.inner.state.write();
            let Some(session) = state.rename.clone() else {
                return Ok(false);
            };
            let new_name = validate_name(text, "name")?;
            state.rename = None;
            (session, new_name)
        };

        if new_name == session.original_name {
            debug!("Rename left the name unchanged");
            return Ok(false);
        }

        match session.target {
            ItemKey::Folder(folder_id) => {
                self.inner
                    .operations
                    .rename_folder(folder_id, &new_name)
                    .await?;
            }
            ItemKey::File(file_id) => {
                let Some(file) = self.inner.state.read().listing.file(file_id).cloned() else {
                    return Err(ValidationError::MissingItem.into());
                };
                self.inner.operations.rename_file(&file, &new_name).await?;
            }
        }

        self.refresh_after_mutation().await;
        Ok(true)
    }

    pub fn cancel_rename(&self) -> bool {
        self.inner.state.write().rename.take().is_some()
    }
}
