//! Clipboard export with a primary transport and one fallback.

use std::cell::RefCell;
use std::io::{Write, stdout};

use base64::Engine;
use thiserror::Error;

/// A way of putting text on the user's clipboard.
pub trait ClipboardTransport {
    fn name(&self) -> &'static str;

    /// Place `text` on the clipboard.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the transport is unavailable or refuses.
    fn set_text(&self, text: &str) -> std::io::Result<()>;
}

/// Native clipboard through `arboard`.
///
/// The handle is created on first use and kept alive afterwards: on X11 the
/// contents are served by the process that owns the selection.
#[derive(Default)]
pub struct SystemClipboard {
    handle: RefCell<Option<arboard::Clipboard>>,
}

impl ClipboardTransport for SystemClipboard {
    fn name(&self) -> &'static str {
        "system clipboard"
    }

    fn set_text(&self, text: &str) -> std::io::Result<()> {
        let mut handle = self.handle.borrow_mut();
        if handle.is_none() {
            *handle = Some(arboard::Clipboard::new().map_err(std::io::Error::other)?);
        }
        match handle.as_mut() {
            Some(clipboard) => clipboard.set_text(text).map_err(std::io::Error::other),
            None => Err(std::io::Error::other("clipboard handle missing")),
        }
    }
}

/// Terminal clipboard through the OSC 52 escape sequence.
#[derive(Debug, Default)]
pub struct Osc52Clipboard;

impl ClipboardTransport for Osc52Clipboard {
    fn name(&self) -> &'static str {
        "terminal (OSC 52)"
    }

    fn set_text(&self, text: &str) -> std::io::Result<()> {
        let mut out = stdout();
        out.write_all(osc52_sequence(text).as_bytes())?;
        out.flush()
    }
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}

/// Primary transport plus the fallback tried once when it fails.
pub struct Clipboard {
    primary: Box<dyn ClipboardTransport>,
    fallback: Box<dyn ClipboardTransport>,
}

impl Clipboard {
    pub fn new(primary: Box<dyn ClipboardTransport>, fallback: Box<dyn ClipboardTransport>) -> Self {
        Self { primary, fallback }
    }

    /// System clipboard first, OSC 52 as the fallback.
    pub fn system() -> Self {
        Self::new(
            Box::new(SystemClipboard::default()),
            Box::new(Osc52Clipboard),
        )
    }
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::system()
    }
}

impl std::fmt::Debug for Clipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clipboard")
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

/// Which transport accepted the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyRoute {
    Primary,
    Fallback,
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("nothing to copy")]
    Empty,
    #[error("clipboard unavailable ({primary}; fallback: {fallback})")]
    Unavailable { primary: String, fallback: String },
}

/// Copy `text` verbatim, falling back once when the primary transport fails.
///
/// # Errors
///
/// [`ClipboardError::Empty`] for empty text, [`ClipboardError::Unavailable`]
/// when both transports fail.
pub fn copy_to_clipboard(text: &str, clipboard: &Clipboard) -> Result<CopyRoute, ClipboardError> {
    if text.is_empty() {
        return Err(ClipboardError::Empty);
    }

    let primary_err = match clipboard.primary.set_text(text) {
        Ok(()) => return Ok(CopyRoute::Primary),
        Err(err) => err,
    };
    tracing::info!(
        transport = clipboard.primary.name(),
        error = %primary_err,
        "clipboard transport failed, trying fallback"
    );

    clipboard
        .fallback
        .set_text(text)
        .map(|()| CopyRoute::Fallback)
        .map_err(|fallback_err| ClipboardError::Unavailable {
            primary: format!("{}: {primary_err}", clipboard.primary.name()),
            fallback: format!("{}: {fallback_err}", clipboard.fallback.name()),
        })
}
