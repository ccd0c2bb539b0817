//! Upload progress
//!
//! `Idle -> Uploading -> Success -> Idle`, with the last edge taken by a
//! timer. A failed transfer goes straight back to `Idle`. State is
//! published on a watch channel so hosts can render progress.

use space_fs::UploadProgress;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::debug;

use super::error::{BrowserError, BrowserResult};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum UploadState {
    #[default]
    Idle,
    Uploading {
        progress_pct: u8,
        bytes_transferred: u64,
        total_bytes: u64,
    },
    Success,
}

impl UploadState {
    pub fn is_uploading(&self) -> bool {
        matches!(self, UploadState::Uploading { .. })
    }
}

#[derive(Clone)]
pub struct UploadTracker {
    state: Arc<watch::Sender<UploadState>>,
    /// Bumped on every begin/complete so a pending auto-reset can tell it is outdated
    epoch: Arc<AtomicU64>,
    reset_delay: Duration,
}

impl UploadTracker {
    pub fn new(reset_delay: Duration) -> Self {
        let (state, _) = watch::channel(UploadState::Idle);
        Self {
            state: Arc::new(state),
            epoch: Arc::new(AtomicU64::new(0)),
            reset_delay,
        }
    }

    pub fn state(&self) -> UploadState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UploadState> {
        self.state.subscribe()
    }

    pub fn is_uploading(&self) -> bool {
        self.state.borrow().is_uploading()
    }

    /// Enter `Uploading`. Refused while another transfer is running.
    pub fn begin(&self, total_bytes: u64) -> BrowserResult<()> {
        // A lingering Success is cut short rather than skipped over
        self.state.send_if_modified(|state| {
            if *state == UploadState::Success {
                *state = UploadState::Idle;
                true
            } else {
                false
            }
        });

        // Check and claim under the same borrow
        let started = self.state.send_if_modified(|state| {
            if state.is_uploading() {
                return false;
            }
            *state = UploadState::Uploading {
                progress_pct: 0,
                bytes_transferred: 0,
                total_bytes,
            };
            true
        });
        if !started {
            return Err(BrowserError::UploadInProgress);
        }
        self.epoch.fetch_add(1, Ordering::SeqCst);

        debug!(total_bytes, "Upload started");
        Ok(())
    }

    pub fn report(&self, progress: UploadProgress) {
        self.state.send_if_modified(|state| match state {
            UploadState::Uploading {
                progress_pct,
                bytes_transferred,
                total_bytes,
            } => {
                *progress_pct = progress.percent();
                *bytes_transferred = progress.bytes_transferred;
                *total_bytes = progress.total_bytes;
                true
            }
            _ => false,
        });
    }

    /// `Uploading -> Success`, then back to `Idle` after the reset delay.
    pub fn complete(&self) {
        let completed = self.state.send_if_modified(|state| {
            if state.is_uploading() {
                *state = UploadState::Success;
                true
            } else {
                false
            }
        });
        if !completed {
            return;
        }

        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let Ok(handle) = Handle::try_current() else {
            debug!("No runtime to schedule the upload reset, staying in Success");
            return;
        };
        let tracker = self.clone();
        handle.spawn(async move {
            tokio::time::sleep(tracker.reset_delay).await;
            tracker.reset_if_current(epoch);
        });
    }

    /// `Uploading -> Idle`. `Success` is never entered on failure.
    pub fn fail(&self) {
        self.state.send_if_modified(|state| {
            if state.is_uploading() {
                *state = UploadState::Idle;
                true
            } else {
                false
            }
        });
    }

    fn reset_if_current(&self, epoch: u64) {
        self.state.send_if_modified(|state| {
            if *state == UploadState::Success && self.epoch.load(Ordering::SeqCst) == epoch {
                *state = UploadState::Idle;
                true
            } else {
                false
            }
        });
    }
}
