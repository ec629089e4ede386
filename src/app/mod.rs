//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Focus, Model, ServiceStatus, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempPath;

use crate::client::{GenerationClient, GenerationWorker};
use crate::coordinator::Coordinator;
use crate::export::Clipboard;
use crate::ui::style::Background;

/// Main application struct: owns the services effects run against and the
/// terminal session.
pub struct App {
    worker: GenerationWorker,
    clipboard: Clipboard,
    out_dir: PathBuf,
    health_check: bool,
    initial_username: Option<String>,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
    background: Background,
    /// Pages handed to the browser; deleted when the app exits
    browser_pages: Vec<TempPath>,
}

impl App {
    /// Create an application talking to `client`.
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self {
            worker: GenerationWorker::new(client),
            clipboard: Clipboard::system(),
            out_dir: PathBuf::from("."),
            health_check: true,
            initial_username: None,
            config_global_path: None,
            config_local_path: None,
            background: Background::default(),
            browser_pages: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_clipboard(mut self, clipboard: Clipboard) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// Directory markdown exports are written to.
    #[must_use]
    pub fn with_out_dir(mut self, out_dir: PathBuf) -> Self {
        self.out_dir = out_dir;
        self
    }

    /// Enable or disable the startup health check.
    #[must_use]
    pub const fn with_health_check(mut self, enabled: bool) -> Self {
        self.health_check = enabled;
        self
    }

    /// Pre-fill the username field.
    #[must_use]
    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.initial_username = username;
        self
    }

    /// Set config paths to show in help.
    #[must_use]
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    /// Terminal background to pick colors for.
    #[must_use]
    pub const fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// Initial model for a terminal of `terminal_size`.
    pub fn initial_model(&self, terminal_size: (u16, u16)) -> Model {
        let mut model = Model::new(Coordinator::default(), terminal_size)
            .with_endpoint(self.worker.endpoint())
            .with_username(self.initial_username.clone().unwrap_or_default());
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        model.background = self.background;
        model
    }

    /// Kick off startup work (the health check, when enabled).
    pub fn start(&self) {
        if self.health_check {
            self.worker.spawn_health();
        }
    }
}
