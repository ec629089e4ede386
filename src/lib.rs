// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. client::ClientError)
    clippy::module_name_repetitions
)]

//! # readme-studio
//!
//! A terminal studio for GitHub profile READMEs.
//!
//! - Post a username to a generation service and receive markdown
//! - Edit the markdown with a live, sanitized preview
//! - Export to the clipboard, a `<user>-README.md` file or the browser
//!
//! ## Architecture
//!
//! readme-studio uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`client`]: Generation service client and background worker
//! - [`config`]: Persistent flag defaults
//! - [`coordinator`]: Keeps the editor buffer and preview in sync
//! - [`editor`]: Rope-backed text area
//! - [`export`]: Clipboard, file and browser export
//! - [`markdown`]: Rendering and HTML sanitizing
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod client;
pub mod config;
pub mod coordinator;
pub mod editor;
pub mod export;
pub mod markdown;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::coordinator::{Coordinator, Tab};
    pub use crate::markdown::{ComrakRenderer, MarkdownRenderer, Sanitizer};
}
