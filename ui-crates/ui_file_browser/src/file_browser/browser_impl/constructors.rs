use parking_lot::RwLock;
use space_fs::RemoteFileStore;
use std::sync::Arc;

use crate::browser::{
    BrowserSettings, ConfirmationPrompt, ContentFetcher, FilePreview, MutationOps, SpaceContext,
    UploadTracker,
};
use crate::file_browser::{BrowserInner, BrowserState, FileBrowser};

pub struct FileBrowserBuilder {
    store: Arc<dyn RemoteFileStore>,
    space: SpaceContext,
    settings: BrowserSettings,
    confirmations: Option<Arc<dyn ConfirmationPrompt>>,
    preview: Option<Arc<dyn FilePreview>>,
}

impl FileBrowserBuilder {
    pub fn settings(mut self, settings: BrowserSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn confirmation_prompt(mut self, prompt: Arc<dyn ConfirmationPrompt>) -> Self {
        self.confirmations = Some(prompt);
        self
    }

    pub fn preview(mut self, preview: Arc<dyn FilePreview>) -> Self {
        self.preview = Some(preview);
        self
    }

    /// The listing starts empty; call `refresh` to load the root.
    pub fn build(self) -> FileBrowser {
        let state = BrowserState::new(&self.settings);

        FileBrowser {
            inner: Arc::new(BrowserInner {
                fetcher: ContentFetcher::new(self.store.clone()),
                operations: MutationOps::new(self.store, self.space),
                upload: UploadTracker::new(self.settings.upload_reset_delay()),
                space: self.space,
                settings: self.settings,
                state: RwLock::new(state),
                confirmations: self.confirmations,
                preview: self.preview,
            }),
        }
    }
}

impl FileBrowser {
    pub fn builder(store: Arc<dyn RemoteFileStore>, space: SpaceContext) -> FileBrowserBuilder {
        FileBrowserBuilder {
            store,
            space,
            settings: BrowserSettings::default(),
            confirmations: None,
            preview: None,
        }
    }

    pub fn new(store: Arc<dyn RemoteFileStore>, space: SpaceContext) -> Self {
        Self::builder(store, space).build()
    }
}
