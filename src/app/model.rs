use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::client::Username;
use crate::coordinator::{Coordinator, Tab};
use crate::ui::style::Background;

const TOAST_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Which widget receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Username,
    Body,
}

impl Focus {
    pub const fn next(self) -> Self {
        match self {
            Self::Username => Self::Body,
            Self::Body => Self::Username,
        }
    }
}

/// Result of the startup health check of the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ServiceStatus {
    #[default]
    Unknown,
    /// Reachable; carries the server's cached profile count when reported
    Healthy(Option<u64>),
    Unreachable(String),
}

/// The complete application state.
pub struct Model {
    /// Buffer, rendered view and active tab
    pub coordinator: Coordinator,
    /// Contents of the username field
    pub username_input: String,
    /// Username of the last successful generation, used to name exports
    pub username_label: Option<String>,
    pub focus: Focus,
    /// True while a generation request is in flight
    pub generating: bool,
    /// Request queued by `update`, taken by the effect runner
    pub(super) pending_request: Option<Username>,
    /// First visible preview line
    pub preview_scroll: usize,
    /// Terminal size (columns, rows)
    pub terminal_size: (u16, u16),
    /// Generation endpoint, shown in the status bar
    pub endpoint: String,
    pub service_status: ServiceStatus,
    /// Seconds reported for the last successful generation
    pub last_generation_secs: Option<f64>,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Terminal background the theme is picked for
    pub background: Background,
    pub help_visible: bool,
    pub should_quit: bool,
    toast: Option<Toast>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("coordinator", &self.coordinator)
            .field("username_input", &self.username_input)
            .field("focus", &self.focus)
            .field("generating", &self.generating)
            .finish_non_exhaustive()
    }
}

impl Model {
    pub fn new(coordinator: Coordinator, terminal_size: (u16, u16)) -> Self {
        Self {
            coordinator,
            terminal_size,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username_input = username.into();
        self
    }

    pub const fn active_tab(&self) -> Tab {
        self.coordinator.active_tab()
    }

    /// Rows available to the editor or preview pane.
    pub const fn body_height(&self) -> usize {
        crate::ui::body_height(self.terminal_size.1) as usize
    }

    pub fn max_preview_scroll(&self) -> usize {
        self.coordinator
            .view()
            .lines()
            .len()
            .saturating_sub(self.body_height())
    }

    pub(super) fn clamp_preview_scroll(&mut self) {
        self.preview_scroll = self.preview_scroll.min(self.max_preview_scroll());
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self {
            coordinator: Coordinator::default(),
            username_input: String::new(),
            username_label: None,
            focus: Focus::default(),
            generating: false,
            pending_request: None,
            preview_scroll: 0,
            terminal_size: (80, 24),
            endpoint: String::new(),
            service_status: ServiceStatus::default(),
            last_generation_secs: None,
            config_global_path: None,
            config_local_path: None,
            background: Background::default(),
            help_visible: false,
            should_quit: false,
            toast: None,
        }
    }
}
