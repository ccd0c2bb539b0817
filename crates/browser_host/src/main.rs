//! Browser Host
//
// Headless driver for the space file browser. Seeds an in-memory store and
// walks a FileBrowser through a scripted session, printing the listing after
// each step.

use anyhow::{bail, Context, Result};
use clap::Parser;
use parking_lot::Mutex;
use space_fs::{
    format_created_at, FileEntry, ItemKey, ListingItem, MemoryFileStore, SpaceId, UserId,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use ui_file_browser::{
    Breadcrumb, BrowserSettings, ConfirmationPrompt, ConfirmationRequest, FileBrowser,
    FilePreview, FocusTarget, Key, KeyOutcome, KeyPress, SpaceContext, SpaceRole, UploadState,
};

mod logging;

#[derive(Parser, Debug)]
#[command(name = "browser_host")]
#[command(about = "Drive the space file browser through a scripted session", long_about = None)]
struct Args {
    /// Path to browser.toml (defaults apply when the file is missing)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also log to the console
    #[arg(short, long)]
    verbose: bool,
}

/// Holds confirmation requests until the script answers them.
#[derive(Default)]
struct PendingConfirmations {
    requests: Mutex<Vec<ConfirmationRequest>>,
}

impl PendingConfirmations {
    fn take(&self) -> Option<ConfirmationRequest> {
        self.requests.lock().pop()
    }
}

impl ConfirmationPrompt for PendingConfirmations {
    fn open_confirmation(&self, request: ConfirmationRequest) {
        println!("? {}: {}", request.title, request.message);
        self.requests.lock().push(request);
    }
}

struct ConsolePreview;

impl FilePreview for ConsolePreview {
    fn set_viewing_file(&self, file: &FileEntry) {
        println!(
            "> preview {} ({}, {})",
            file.name,
            file.category().display_name(),
            file.display_size()
        );
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = logging::init(args.verbose)?;

    let settings = match &args.config {
        Some(path) => BrowserSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => BrowserSettings::default(),
    };
    info!(settings = ?settings, "Starting browser host");

    let store = Arc::new(MemoryFileStore::new().with_upload_chunk_size(1024));
    store.set_upload_chunk_delay(Duration::from_millis(20));

    let space = SpaceContext::new(SpaceId::new(), UserId::new(), SpaceRole::Member);
    let confirmations = Arc::new(PendingConfirmations::default());
    let browser = FileBrowser::builder(store.clone(), space)
        .settings(settings)
        .confirmation_prompt(confirmations.clone())
        .preview(Arc::new(ConsolePreview))
        .build();

    // Someone else's file, so the permission gate has something to refuse
    store.seed_file(space.space_id, None, "team-notes.md", 2048, UserId::new());

    run_session(&browser, &confirmations).await
}

async fn run_session(browser: &FileBrowser, confirmations: &PendingConfirmations) -> Result<()> {
    browser.refresh().await?;
    print_listing(browser, "Space root");

    let specs = browser.create_folder("Specs").await?;
    browser.navigate_into(specs.id).await?;
    print_listing(browser, "Inside Specs");

    watch_upload(browser);
    let file = browser.upload("a.pdf", vec![0u8; 4096]).await?;
    print_listing(browser, "Uploaded a.pdf");

    browser.click(ItemKey::File(file.id)).await?;
    browser.toggle_selection(file.id);
    if browser.handle_key(KeyPress::ctrl('x'), FocusTarget::Browser).await == KeyOutcome::Ignored {
        bail!("Cut shortcut was not handled");
    }
    print_listing(browser, "Cut a.pdf");
    browser.navigate_to_breadcrumb(Breadcrumb::Root).await?;
    browser.paste().await?;
    print_listing(browser, "Pasted a.pdf at the root");

    browser.create_link("Design board", "https://example.com/board").await?;
    print_listing(browser, "Added a link");

    // Mixed ownership: refused before any dialog opens
    browser.select_all();
    let delete = KeyPress::plain(Key::Delete);
    match browser.handle_key(delete, FocusTarget::Browser).await {
        KeyOutcome::Blocked(_) => println!("! delete blocked: selection has someone else's file"),
        other => println!("! unexpected delete outcome: {:?}", other),
    }
    browser.clear_selection();

    browser.toggle_selection(file.id);
    browser.request_delete_selected()?;
    if let Some(request) = confirmations.take() {
        browser.confirm(request.action).await?;
    }
    print_listing(browser, "Deleted a.pdf");

    browser.request_delete_folder(specs.id)?;
    if let Some(request) = confirmations.take() {
        browser.confirm(request.action).await?;
    }
    print_listing(browser, "Deleted Specs");

    info!("Session finished");
    Ok(())
}

/// Print upload progress as it is published.
fn watch_upload(browser: &FileBrowser) {
    let mut rx = browser.subscribe_upload();
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            match state {
                UploadState::Idle => println!("  upload idle"),
                UploadState::Uploading {
                    progress_pct,
                    bytes_transferred,
                    total_bytes,
                } => println!(
                    "  uploading {:>3}% ({}/{} bytes)",
                    progress_pct, bytes_transferred, total_bytes
                ),
                UploadState::Success => println!("  upload complete"),
            }
        }
    });
}

fn print_listing(browser: &FileBrowser, step: &str) {
    let path: Vec<String> = browser.path().iter().map(|folder| folder.name.clone()).collect();
    println!("\n== {} ==", step);
    println!("/{}", path.join("/"));

    let clipboard = browser.clipboard();
    let items = browser.visible_items();
    if items.is_empty() {
        println!("  (empty)");
    }
    for item in items {
        match item {
            ListingItem::Folder(folder) => println!("  [{}]", folder.name),
            ListingItem::File(file) => println!(
                "  {:<24} {:>10}  {:<8}  {}{}",
                file.name,
                file.display_size(),
                file.category().display_name(),
                format_created_at(file.created_at),
                if clipboard.is_cut(file.id) { "  (cut)" } else { "" }
            ),
        }
    }
}
