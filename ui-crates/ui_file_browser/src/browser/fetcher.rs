//! Content fetcher
//!
//! Loads a folder's listing and stamps every request with a generation.
//! Only the newest generation may be applied; anything older is dropped by
//! the caller without being treated as an error.

use space_fs::{FolderId, Listing, RemoteFileStore, SpaceId, StoreResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Identifies one listing request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    pub space_id: SpaceId,
    pub folder_id: Option<FolderId>,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// A newer request was issued before this one resolved
    Stale,
}

pub struct ContentFetcher {
    store: Arc<dyn RemoteFileStore>,
    generation: AtomicU64,
}

impl ContentFetcher {
    pub fn new(store: Arc<dyn RemoteFileStore>) -> Self {
        Self {
            store,
            generation: AtomicU64::new(0),
        }
    }

    /// Start a new generation. Every earlier ticket becomes stale.
    pub fn issue(&self, space_id: SpaceId, folder_id: Option<FolderId>) -> FetchTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        FetchTicket {
            generation,
            space_id,
            folder_id,
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }

    /// Both listings are requested together; either failing fails the load.
    pub async fn load(&self, ticket: &FetchTicket) -> StoreResult<Listing> {
        let (folders, files) = futures::try_join!(
            self.store.list_folders(ticket.space_id, ticket.folder_id),
            self.store.list_files(ticket.space_id, ticket.folder_id),
        )?;
        Ok(Listing::new(folders, files))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use space_fs::{FailurePoint, MemoryFileStore, UserId};
    use std::time::Duration;

    #[tokio::test]
    async fn test_load_returns_folders_and_files() {
        let store = Arc::new(MemoryFileStore::new());
        let space = SpaceId::new();
        store.seed_folder(space, "Specs", None);
        store.seed_file(space, None, "a.pdf", 3, UserId::new());

        let fetcher = ContentFetcher::new(store);
        let ticket = fetcher.issue(space, None);
        let listing = fetcher.load(&ticket).await.unwrap();

        assert_eq!(listing.folders.len(), 1);
        assert_eq!(listing.files.len(), 1);
        assert!(fetcher.is_current(&ticket));
    }

    #[tokio::test]
    async fn test_either_listing_failing_fails_the_load() {
        let store = Arc::new(MemoryFileStore::new());
        let space = SpaceId::new();
        store.fail_next(FailurePoint::ListFiles);

        let fetcher = ContentFetcher::new(store);
        let ticket = fetcher.issue(space, None);

        assert!(fetcher.load(&ticket).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_response_goes_stale() {
        let store = Arc::new(MemoryFileStore::new());
        let space = SpaceId::new();
        let slow = store.seed_folder(space, "Slow", None);
        store.set_listing_delay(Some(slow.id), Duration::from_secs(1));

        let fetcher = ContentFetcher::new(store);
        let slow_ticket = fetcher.issue(space, Some(slow.id));
        let root_ticket = fetcher.issue(space, None);

        let (slow_result, root_result) =
            tokio::join!(fetcher.load(&slow_ticket), fetcher.load(&root_ticket));

        assert!(slow_result.is_ok());
        assert!(root_result.is_ok());
        assert!(!fetcher.is_current(&slow_ticket));
        assert!(fetcher.is_current(&root_ticket));
        assert!(root_ticket.generation() > slow_ticket.generation());
    }
}
