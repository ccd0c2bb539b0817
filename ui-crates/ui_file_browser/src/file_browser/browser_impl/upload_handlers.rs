use space_fs::{FileEntry, UploadProgress};
use tracing::error;

use crate::browser::{validate_name, BrowserResult};
use crate::file_browser::FileBrowser;

impl FileBrowser {
    /// Upload into the current folder. Refused while another upload runs.
    pub async fn upload(&self, name: &str, bytes: Vec<u8>) -> BrowserResult<FileEntry> {
        let name = validate_name(name, "file name")?;
        let folder_id = self.current_folder_id();

        let tracker = self.inner.upload.clone();
        tracker.begin(bytes.len() as u64)?;

        let on_progress = {
            let tracker = tracker.clone();
            move |progress: UploadProgress| tracker.report(progress)
        };

        match self
            .inner
            .operations
            .upload_file(folder_id, &name, bytes, &on_progress)
            .await
        {
            Ok(file) => {
                tracker.complete();
                self.refresh_after_mutation().await;
                Ok(file)
            }
            Err(e) => {
                error!(name = %name, "Upload failed: {}", e);
                tracker.fail();
                Err(e)
            }
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.inner.upload.is_uploading()
    }
}
