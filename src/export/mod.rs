//! Getting the buffer out of the app: clipboard, file, browser.
//!
//! Every operation is one-shot. Failures come back as values for the caller
//! to report; nothing is retried.

mod browser;
mod clipboard;
mod file;

use std::path::PathBuf;

use thiserror::Error;

pub use browser::{build_page, open_in_browser};
pub use clipboard::{
    Clipboard, ClipboardError, ClipboardTransport, CopyRoute, Osc52Clipboard, SystemClipboard,
    copy_to_clipboard,
};
pub use file::{download_as_file, export_file_name};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export")]
    EmptyBuffer,
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to launch browser: {0}")]
    Launch(#[source] std::io::Error),
}
