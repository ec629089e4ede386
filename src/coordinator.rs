//! Keeps the editor buffer and the rendered preview consistent.
//!
//! The buffer is the single source of truth. [`Coordinator::set_buffer`]
//! re-renders synchronously; keystrokes in the editor only mark the view
//! stale, and [`Coordinator::switch_tab`] brings it up to date before the
//! preview is shown.

use std::hash::{DefaultHasher, Hash, Hasher};

use crate::editor::TextArea;
use crate::markdown::{
    ComrakRenderer, LineKind, MarkdownRenderer, PreviewLine, RenderSettings, Sanitizer,
};

/// Which pane is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Editor,
    Preview,
}

impl Tab {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Editor => Self::Preview,
            Self::Preview => Self::Editor,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Editor => "Editor",
            Self::Preview => "Preview",
        }
    }
}

/// How the current view was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Buffer is empty; nothing was rendered.
    Placeholder,
    /// Normal sanitized render.
    Rendered,
    /// Rendering failed; the raw buffer is shown instead.
    RawFallback { reason: String },
}

/// Sanitized HTML plus the lines shown in the preview pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    html: String,
    lines: Vec<PreviewLine>,
    state: ViewState,
}

impl RenderedView {
    pub fn placeholder() -> Self {
        Self {
            html: String::new(),
            lines: vec![PreviewLine::new(
                "Nothing to preview yet. Generate a README or start typing in the editor.",
                LineKind::Placeholder,
            )],
            state: ViewState::Placeholder,
        }
    }

    fn raw_fallback(buffer: &str, reason: String) -> Self {
        Self {
            html: Sanitizer::escape_preformatted(buffer),
            lines: buffer
                .lines()
                .map(|line| PreviewLine::new(line, LineKind::Raw))
                .collect(),
            state: ViewState::RawFallback { reason },
        }
    }

    /// Sanitized HTML. Empty for the placeholder view.
    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn lines(&self) -> &[PreviewLine] {
        &self.lines
    }

    pub const fn state(&self) -> &ViewState {
        &self.state
    }
}

/// Owns the buffer, the rendered view and the active tab.
pub struct Coordinator {
    editor: TextArea,
    view: RenderedView,
    active_tab: Tab,
    renderer: Box<dyn MarkdownRenderer>,
    sanitizer: Sanitizer,
    rendered_hash: Option<u64>,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(Box::new(ComrakRenderer::new(RenderSettings::default())))
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("editor", &self.editor)
            .field("state", &self.view.state)
            .field("active_tab", &self.active_tab)
            .finish_non_exhaustive()
    }
}

impl Coordinator {
    pub fn new(renderer: Box<dyn MarkdownRenderer>) -> Self {
        Self {
            editor: TextArea::default(),
            view: RenderedView::placeholder(),
            active_tab: Tab::default(),
            renderer,
            sanitizer: Sanitizer::new(),
            rendered_hash: Some(hash_text("")),
        }
    }

    /// Replace the buffer and re-render immediately.
    pub fn set_buffer(&mut self, text: &str) {
        self.editor.set_text(text);
        self.refresh();
    }

    /// Current buffer text, verbatim.
    pub fn buffer(&self) -> String {
        self.editor.text()
    }

    pub fn is_empty(&self) -> bool {
        self.editor.is_empty()
    }

    /// Editor access. Edits made here leave the view stale until the next
    /// [`Coordinator::switch_tab`] to the preview or [`Coordinator::refresh`].
    pub const fn editor_mut(&mut self) -> &mut TextArea {
        &mut self.editor
    }

    pub const fn editor(&self) -> &TextArea {
        &self.editor
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        if tab == Tab::Preview && self.is_stale() {
            self.refresh();
        }
    }

    pub const fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub const fn view(&self) -> &RenderedView {
        &self.view
    }

    /// Whether the view was rendered from something other than the buffer.
    pub fn is_stale(&self) -> bool {
        self.rendered_hash != Some(hash_text(&self.editor.text()))
    }

    /// Re-render the view from the current buffer.
    pub fn refresh(&mut self) {
        let text = self.editor.text();
        self.view = self.render_view(&text);
        self.rendered_hash = Some(hash_text(&text));
    }

    fn render_view(&self, text: &str) -> RenderedView {
        if text.is_empty() {
            return RenderedView::placeholder();
        }
        match self.renderer.render(text) {
            Ok(output) => RenderedView {
                html: self.sanitizer.sanitize(&output.html),
                lines: output.lines,
                state: ViewState::Rendered,
            },
            Err(err) => {
                tracing::warn!(error = %err, "render failed, showing raw buffer");
                RenderedView::raw_fallback(text, err.to_string())
            }
        }
    }
}

fn hash_text(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::markdown::{RenderError, RenderOutput};

    struct FailingRenderer;

    impl MarkdownRenderer for FailingRenderer {
        fn render(&self, _markdown: &str) -> Result<RenderOutput, RenderError> {
            Err(RenderError::Panicked("boom".to_string()))
        }
    }

    struct CountingRenderer {
        calls: Arc<AtomicUsize>,
    }

    impl MarkdownRenderer for CountingRenderer {
        fn render(&self, markdown: &str) -> Result<RenderOutput, RenderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ComrakRenderer::default().render(markdown)
        }
    }

    fn counting() -> (Coordinator, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let coordinator = Coordinator::new(Box::new(CountingRenderer {
            calls: Arc::clone(&calls),
        }));
        (coordinator, calls)
    }

    #[test]
    fn test_set_buffer_renders_heading_and_paragraph() {
        let mut c = Coordinator::default();
        c.set_buffer("# Hello\nWorld");
        assert_eq!(c.view().state(), &ViewState::Rendered);
        assert!(c.view().html().contains("<h1>Hello</h1>"));
        assert!(c.view().html().contains("<p>World</p>"));
    }

    #[test]
    fn test_buffer_is_returned_unchanged() {
        let mut c = Coordinator::default();
        let text = "  # Title\r\n\n<script>x</script>\n";
        c.set_buffer(text);
        assert_eq!(c.buffer(), text);
    }

    #[test]
    fn test_empty_buffer_shows_placeholder_without_rendering() {
        let (mut c, calls) = counting();
        c.set_buffer("");
        assert_eq!(c.view().state(), &ViewState::Placeholder);
        assert!(c.view().html().is_empty());
        assert_eq!(c.view().lines()[0].kind(), LineKind::Placeholder);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_view_is_sanitized() {
        let mut c = Coordinator::default();
        c.set_buffer("hi <img src=x onerror=alert(1)>\n\n<script>alert(1)</script>");
        let html = c.view().html();
        assert!(!html.contains("<script"), "{html}");
        assert!(!html.contains("onerror"), "{html}");
    }

    #[test]
    fn test_render_failure_falls_back_to_escaped_raw_text() {
        let mut c = Coordinator::new(Box::new(FailingRenderer));
        c.set_buffer("# keep <b>me</b>\nline two");
        assert!(matches!(c.view().state(), ViewState::RawFallback { .. }));
        let html = c.view().html();
        assert!(html.starts_with("<pre>") && html.ends_with("</pre>"), "{html}");
        assert!(html.contains("&lt;b&gt;me&lt;&#47;b&gt;"), "{html}");
        assert!(!html.contains("<b>"), "{html}");
        let lines: Vec<String> = c.view().lines().iter().map(PreviewLine::content).collect();
        assert_eq!(lines, vec!["# keep <b>me</b>", "line two"]);
        assert_eq!(c.buffer(), "# keep <b>me</b>\nline two");
    }

    #[test]
    fn test_editor_edits_defer_render_until_preview() {
        let (mut c, calls) = counting();
        c.set_buffer("# A");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        c.editor_mut().move_cursor(crate::editor::Motion::LineEnd);
        c.editor_mut().insert_char('B');
        assert!(c.is_stale());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        c.switch_tab(Tab::Preview);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(c.view().html().contains("<h1>AB</h1>"));
        assert!(!c.is_stale());
    }

    #[test]
    fn test_switch_to_preview_skips_render_when_current() {
        let (mut c, calls) = counting();
        c.set_buffer("text");
        c.switch_tab(Tab::Preview);
        c.switch_tab(Tab::Editor);
        c.switch_tab(Tab::Preview);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(c.active_tab(), Tab::Preview);
    }

    #[test]
    fn test_clearing_buffer_in_editor_shows_placeholder_in_preview() {
        let (mut c, calls) = counting();
        c.set_buffer("x");
        c.editor_mut().move_cursor(crate::editor::Motion::LineEnd);
        c.editor_mut().backspace();
        c.switch_tab(Tab::Preview);
        assert_eq!(c.view().state(), &ViewState::Placeholder);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_tab_toggle() {
        assert_eq!(Tab::Editor.toggled(), Tab::Preview);
        assert_eq!(Tab::Preview.toggled(), Tab::Editor);
    }
}
