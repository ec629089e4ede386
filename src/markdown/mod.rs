//! Markdown to sanitized HTML, plus a styled terminal preview.

mod render;
mod sanitize;
mod types;

pub use render::{
    ComrakRenderer, MarkdownRenderer, RenderError, RenderOutput, RenderSettings,
    install_render_panic_hook,
};
pub use sanitize::Sanitizer;
pub use types::{InlineSpan, InlineStyle, LineKind, PreviewLine};
