//! Preview line types produced alongside the HTML view.

/// Semantic kind of a preview line, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Heading with level (1-6)
    Heading(u8),
    /// Regular paragraph text
    Paragraph,
    /// Framed code block row
    CodeBlock,
    /// Block quote row
    BlockQuote,
    /// List item row with nesting depth (1-based)
    ListItem(usize),
    /// Table row or border
    Table,
    /// Thematic break
    Rule,
    /// Image placeholder
    Image,
    /// Hint for a raw HTML block
    Html,
    /// Blank separator
    Empty,
    /// Shown when there is nothing to preview
    Placeholder,
    /// Raw buffer text shown after a render failure
    Raw,
}

/// Inline styling flags for a run of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub emphasis: bool,
    pub strong: bool,
    pub code: bool,
    pub strikethrough: bool,
    pub link: bool,
}

/// A run of text with a single inline style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    text: String,
    style: InlineStyle,
}

impl InlineSpan {
    pub fn new(text: impl Into<String>, style: InlineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, InlineStyle::default())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn style(&self) -> InlineStyle {
        self.style
    }
}

/// One logical line of the terminal preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLine {
    kind: LineKind,
    spans: Vec<InlineSpan>,
}

impl PreviewLine {
    /// Create a line holding unstyled text.
    pub fn new(content: impl Into<String>, kind: LineKind) -> Self {
        let content = content.into();
        let spans = if content.is_empty() {
            Vec::new()
        } else {
            vec![InlineSpan::plain(content)]
        };
        Self { kind, spans }
    }

    /// Create a line from pre-styled spans.
    pub const fn with_spans(kind: LineKind, spans: Vec<InlineSpan>) -> Self {
        Self { kind, spans }
    }

    pub const fn empty() -> Self {
        Self {
            kind: LineKind::Empty,
            spans: Vec::new(),
        }
    }

    pub const fn kind(&self) -> LineKind {
        self.kind
    }

    pub fn spans(&self) -> &[InlineSpan] {
        &self.spans
    }

    /// Plain text of the whole line.
    pub fn content(&self) -> String {
        self.spans.iter().map(InlineSpan::text).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_joins_spans() {
        let line = PreviewLine::with_spans(
            LineKind::Paragraph,
            vec![
                InlineSpan::plain("hello "),
                InlineSpan::new(
                    "world",
                    InlineStyle {
                        strong: true,
                        ..InlineStyle::default()
                    },
                ),
            ],
        );
        assert_eq!(line.content(), "hello world");
        assert!(line.spans()[1].style().strong);
    }

    #[test]
    fn test_new_with_empty_text_has_no_spans() {
        let line = PreviewLine::new("", LineKind::Empty);
        assert!(line.spans().is_empty());
        assert_eq!(line, PreviewLine::empty());
    }
}
