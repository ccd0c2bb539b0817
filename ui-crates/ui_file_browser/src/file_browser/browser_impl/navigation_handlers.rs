use space_fs::FolderId;
use tracing::{debug, error, warn};

use crate::browser::{Breadcrumb, BrowserResult, FetchOutcome, FetchStatus};
use crate::file_browser::FileBrowser;

impl FileBrowser {
    /// Enter a folder from the current listing. Returns false when the folder
    /// is not listed here.
    pub async fn navigate_into(&self, folder_id: FolderId) -> BrowserResult<bool> {
        {
            let mut state = self.inner.state.write();
            let Some(folder) = state.listing.folder(folder_id).cloned() else {
                warn!(folder_id = %folder_id, "Folder is not in the current listing");
                return Ok(false);
            };
            if !state.navigation.navigate_into(folder) {
                return Ok(false);
            }
            state.reset_for_navigation();
        }
        debug!(folder_id = %folder_id, "Navigated into folder");

        self.refresh().await?;
        Ok(true)
    }

    /// Go up one level. At the root this does nothing.
    pub async fn navigate_back(&self) -> BrowserResult<bool> {
        {
            let mut state = self.inner.state.write();
            if !state.navigation.navigate_back() {
                return Ok(false);
            }
            state.reset_for_navigation();
        }
        debug!(folder_id = ?self.current_folder_id(), "Navigated back");

        self.refresh().await?;
        Ok(true)
    }

    pub async fn navigate_to_breadcrumb(&self, crumb: Breadcrumb) -> BrowserResult<bool> {
        {
            let mut state = self.inner.state.write();
            if !state.navigation.navigate_to_breadcrumb(crumb) {
                return Ok(false);
            }
            state.reset_for_navigation();
        }
        debug!(crumb = ?crumb, folder_id = ?self.current_folder_id(), "Navigated to breadcrumb");

        self.refresh().await?;
        Ok(true)
    }

    /// Reload the current folder. A response that was overtaken by a newer
    /// request is dropped and reported as `Stale`.
    pub async fn refresh(&self) -> BrowserResult<FetchOutcome> {
        let ticket = {
            let mut state = self.inner.state.write();
            state.fetch_status = FetchStatus::Loading;
            self.inner
                .fetcher
                .issue(self.inner.space.space_id, state.navigation.current_folder_id())
        };

        let result = self.inner.fetcher.load(&ticket).await;

        let mut state = self.inner.state.write();
        if !self.inner.fetcher.is_current(&ticket) {
            debug!(
                generation = ticket.generation(),
                folder_id = ?ticket.folder_id,
                "Discarding stale listing"
            );
            return Ok(FetchOutcome::Stale);
        }

        match result {
            Ok(listing) => {
                state.selection.retain_listed(&listing);
                let rename_gone = state
                    .rename
                    .as_ref()
                    .is_some_and(|session| !listing.contains(session.target));
                if rename_gone {
                    state.rename = None;
                }
                state.listing = listing;
                state.fetch_status = FetchStatus::Idle;
                Ok(FetchOutcome::Applied)
            }
            Err(e) => {
                error!(folder_id = ?ticket.folder_id, "Failed to load listing: {}", e);
                state.fetch_status = FetchStatus::Failed(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Refresh after a successful mutation. The mutation already succeeded,
    /// so a failed reload is only logged.
    pub(crate) async fn refresh_after_mutation(&self) {
        if let Err(e) = self.refresh().await {
            warn!("Listing refresh after mutation failed: {}", e);
        }
    }
}
