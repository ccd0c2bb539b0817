use space_fs::{FileEntry, FileId, Folder, FolderId, ItemKey, ListingItem};
use std::cmp::Ordering;
use tokio::runtime::Handle;
use tokio::time::Instant;
use tracing::debug;

use crate::browser::{BrowserResult, ClickOutcome, SortBy, SortOrder};
use crate::file_browser::FileBrowser;

impl FileBrowser {
    /// The listing as it should be shown: folders first, each group sorted,
    /// hidden and filtered-out names removed.
    pub fn visible_items(&self) -> Vec<ListingItem> {
        let state = self.inner.state.read();
        let query = state.filter_query.to_lowercase();

        let keep = |name: &str| {
            // Filter hidden files
            if !state.show_hidden_files && name.starts_with('.') {
                return false;
            }
            // Apply search filter
            query.is_empty() || name.to_lowercase().contains(&query)
        };

        let mut folders: Vec<&Folder> = state
            .listing
            .folders
            .iter()
            .filter(|folder| keep(&folder.name))
            .collect();
        let mut files: Vec<&FileEntry> = state
            .listing
            .files
            .iter()
            .filter(|file| keep(&file.name))
            .collect();

        let order = |cmp: Ordering| match state.sort_order {
            SortOrder::Ascending => cmp,
            SortOrder::Descending => cmp.reverse(),
        };

        // Folders carry no size or timestamp, so they always go by name
        folders.sort_by(|a, b| order(compare_names(&a.name, &b.name)));
        files.sort_by(|a, b| {
            let cmp = match state.sort_by {
                SortBy::Name => compare_names(&a.name, &b.name),
                SortBy::Created => a.created_at.cmp(&b.created_at),
                SortBy::Size => a.size_bytes.cmp(&b.size_bytes),
                SortBy::Type => a.kind.as_str().cmp(b.kind.as_str()),
            };
            order(cmp.then_with(|| compare_names(&a.name, &b.name)))
        });

        folders
            .into_iter()
            .cloned()
            .map(ListingItem::Folder)
            .chain(files.into_iter().cloned().map(ListingItem::File))
            .collect()
    }

    pub fn set_sort(&self, sort_by: SortBy, sort_order: SortOrder) {
        let mut state = self.inner.state.write();
        state.sort_by = sort_by;
        state.sort_order = sort_order;
    }

    pub fn sort(&self) -> (SortBy, SortOrder) {
        let state = self.inner.state.read();
        (state.sort_by, state.sort_order)
    }

    pub fn set_filter(&self, query: &str) {
        self.inner.state.write().filter_query = query.trim().to_string();
    }

    pub fn filter_query(&self) -> String {
        self.inner.state.read().filter_query.clone()
    }

    pub fn toggle_hidden_files(&self) -> bool {
        let mut state = self.inner.state.write();
        state.show_hidden_files = !state.show_hidden_files;
        state.show_hidden_files
    }

    /// Route a click on a listed item.
    pub async fn click(&self, key: ItemKey) -> BrowserResult<ClickOutcome> {
        enum Route {
            Done(ClickOutcome),
            Preview(FileEntry),
            Navigate(FolderId),
        }

        let route = {
            let mut guard = self.inner.state.write();
            let state = &mut *guard;

            if state.long_press.click(key) {
                debug!("Click swallowed after long-press");
                Route::Done(ClickOutcome::Swallowed)
            } else {
                match key {
                    ItemKey::File(file_id) => match state.listing.file(file_id) {
                        None => Route::Done(ClickOutcome::Ignored),
                        Some(_) if state.selection.is_active() => {
                            let selected = state.selection.toggle(file_id);
                            Route::Done(ClickOutcome::Toggled { file_id, selected })
                        }
                        Some(file) => Route::Preview(file.clone()),
                    },
                    ItemKey::Folder(folder_id) => Route::Navigate(folder_id),
                }
            }
        };

        match route {
            Route::Done(outcome) => Ok(outcome),
            Route::Preview(file) => {
                if let Some(preview) = &self.inner.preview {
                    preview.set_viewing_file(&file);
                }
                Ok(ClickOutcome::Previewed(file.id))
            }
            Route::Navigate(folder_id) => {
                if self.navigate_into(folder_id).await? {
                    Ok(ClickOutcome::Navigated(folder_id))
                } else {
                    Ok(ClickOutcome::Ignored)
                }
            }
        }
    }

    /// Pointer or touch went down on an item. Schedules the long-press check
    /// when a runtime is available.
    pub fn press_start(&self, key: ItemKey) -> bool {
        let started = {
            let mut state = self.inner.state.write();
            state.listing.contains(key) && state.long_press.press_start(key, Instant::now())
        };

        if started {
            if let Ok(handle) = Handle::try_current() {
                let browser = self.clone();
                let threshold = self.inner.settings.long_press_threshold();
                handle.spawn(async move {
                    tokio::time::sleep(threshold).await;
                    browser.poll_long_press();
                });
            }
        }
        started
    }

    /// Fire the long-press if it has been held long enough.
    pub fn poll_long_press(&self) -> Option<FileId> {
        let threshold = self.inner.settings.long_press_threshold();
        let mut guard = self.inner.state.write();
        let state = &mut *guard;

        let fired = state.long_press.poll(Instant::now(), threshold)?;
        state.selection.select(fired);
        debug!(file_id = %fired, "Long-press entered select mode");
        Some(fired)
    }

    pub fn press_end(&self) -> Option<FileId> {
        let threshold = self.inner.settings.long_press_threshold();
        let mut guard = self.inner.state.write();
        let state = &mut *guard;

        let fired = state.long_press.press_end(Instant::now(), threshold)?;
        state.selection.select(fired);
        debug!(file_id = %fired, "Long-press entered select mode on release");
        Some(fired)
    }

    pub fn press_cancel(&self) {
        self.inner.state.write().long_press.cancel();
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
