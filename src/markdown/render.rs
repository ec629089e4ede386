//! Markdown rendering with comrak.
//!
//! A single parse produces both the HTML handed to the sanitizer and the
//! styled lines shown in the terminal preview pane.

use std::any::Any;
use std::cell::Cell;
use std::panic::{AssertUnwindSafe, catch_unwind};

use comrak::nodes::{AstNode, ListDelimType, ListType, NodeValue, TableAlignment};
use comrak::{Arena, Options, format_html, parse_document};
use thiserror::Error;
use unicode_width::UnicodeWidthStr;

use super::types::{InlineSpan, InlineStyle, LineKind, PreviewLine};

/// Failure while turning markdown into HTML.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("markdown renderer panicked: {0}")]
    Panicked(String),
    #[error("failed to produce HTML: {0}")]
    Output(String),
}

/// Unsanitized HTML plus the terminal preview of the same document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOutput {
    pub html: String,
    pub lines: Vec<PreviewLine>,
}

/// Converts markdown text into HTML and preview lines.
pub trait MarkdownRenderer: Send {
    /// Render `markdown`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the renderer cannot produce output.
    fn render(&self, markdown: &str) -> Result<RenderOutput, RenderError>;
}

/// Renderer configuration, fixed when the renderer is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    /// Treat single newlines as line breaks
    pub hard_breaks: bool,
    /// Enable GitHub-flavored extensions
    pub gfm: bool,
    /// Resolve `:emoji:` shortcodes
    pub shortcodes: bool,
    /// Pass raw HTML through to the sanitizer instead of dropping it
    pub raw_html: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            hard_breaks: true,
            gfm: true,
            shortcodes: true,
            raw_html: true,
        }
    }
}

/// Comrak-backed [`MarkdownRenderer`].
#[derive(Debug, Clone, Default)]
pub struct ComrakRenderer {
    settings: RenderSettings,
}

impl ComrakRenderer {
    pub const fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    pub const fn settings(&self) -> RenderSettings {
        self.settings
    }

    fn render_unguarded(&self, markdown: &str) -> Result<RenderOutput, RenderError> {
        let arena = Arena::new();
        let options = create_options(&self.settings);
        let root = parse_document(&arena, markdown, &options);

        let mut html = Vec::new();
        format_html(root, &options, &mut html)
            .map_err(|err| RenderError::Output(err.to_string()))?;
        let html = String::from_utf8(html).map_err(|err| RenderError::Output(err.to_string()))?;

        let mut builder = PreviewBuilder::new(self.settings.hard_breaks);
        builder.process_node(root, 0, None);

        Ok(RenderOutput {
            html,
            lines: builder.finish(),
        })
    }
}

impl MarkdownRenderer for ComrakRenderer {
    fn render(&self, markdown: &str) -> Result<RenderOutput, RenderError> {
        guarded(|| self.render_unguarded(markdown))
    }
}

thread_local! {
    /// Set while a render runs under [`guarded`].
    static GUARDED: Cell<bool> = const { Cell::new(false) };
}

/// Route panics caught by the render guard to the log instead of the
/// previous hook, which would print over the terminal UI. Panics anywhere
/// else still reach the previous hook.
///
/// Install after the terminal is set up so this hook wraps the restoring one.
pub fn install_render_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if GUARDED.with(Cell::get) {
            tracing::error!(panic = %info, "markdown renderer panicked");
        } else {
            previous(info);
        }
    }));
}

fn guarded(
    render: impl FnOnce() -> Result<RenderOutput, RenderError>,
) -> Result<RenderOutput, RenderError> {
    GUARDED.with(|flag| flag.set(true));
    let result = catch_unwind(AssertUnwindSafe(render))
        .unwrap_or_else(|payload| Err(RenderError::Panicked(panic_message(&*payload))));
    GUARDED.with(|flag| flag.set(false));
    result
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

fn create_options(settings: &RenderSettings) -> Options {
    let mut options = Options::default();

    if settings.gfm {
        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.footnotes = true;
    }
    options.extension.shortcodes = settings.shortcodes;

    options.render.hardbreaks = settings.hard_breaks;
    options.render.github_pre_lang = true;
    options.render.unsafe_ = settings.raw_html;

    options
}

const CODE_RIGHT_PADDING: usize = 1;
const RULE_WIDTH: usize = 32;

struct PreviewBuilder {
    lines: Vec<PreviewLine>,
    hard_breaks: bool,
}

impl PreviewBuilder {
    const fn new(hard_breaks: bool) -> Self {
        Self {
            lines: Vec::new(),
            hard_breaks,
        }
    }

    fn finish(mut self) -> Vec<PreviewLine> {
        while self
            .lines
            .last()
            .is_some_and(|line| line.kind() == LineKind::Empty)
        {
            self.lines.pop();
        }
        self.lines
    }

    fn process_node<'a>(&mut self, node: &'a AstNode<'a>, depth: usize, marker: Option<String>) {
        match &node.data.borrow().value {
            NodeValue::Heading(heading) => {
                self.ensure_separator();
                let mut spans = vec![InlineSpan::plain(format!(
                    "{} ",
                    "#".repeat(usize::from(heading.level))
                ))];
                spans.extend(self.collect_inline_rows(node).into_iter().flatten());
                self.lines
                    .push(PreviewLine::with_spans(LineKind::Heading(heading.level), spans));
                self.lines.push(PreviewLine::empty());
            }

            NodeValue::Paragraph => {
                let kind = if is_image_only(node) {
                    LineKind::Image
                } else {
                    LineKind::Paragraph
                };
                self.push_inline_rows(node, kind, "", "");
                self.lines.push(PreviewLine::empty());
            }

            NodeValue::CodeBlock(block) => {
                let language = block
                    .info
                    .split_whitespace()
                    .next()
                    .filter(|s| !s.is_empty())
                    .unwrap_or("code");
                self.push_code_block(language, &block.literal);
                self.lines.push(PreviewLine::empty());
            }

            NodeValue::List(list) => {
                let delimiter = match list.delimiter {
                    ListDelimType::Paren => ')',
                    ListDelimType::Period => '.',
                };
                for (index, child) in node.children().enumerate() {
                    let item_marker = match list.list_type {
                        ListType::Bullet => "• ".to_string(),
                        ListType::Ordered => format!("{}{delimiter} ", list.start + index),
                    };
                    self.process_node(child, depth + 1, Some(item_marker));
                }
                if depth == 0 {
                    self.lines.push(PreviewLine::empty());
                }
            }

            NodeValue::Item(_) => {
                let marker = marker.unwrap_or_else(|| "• ".to_string());
                self.process_item(node, depth.max(1), &marker);
            }

            NodeValue::TaskItem(symbol) => {
                let marker = if symbol.is_some() { "✓ " } else { "□ " };
                self.process_item(node, depth.max(1), marker);
            }

            NodeValue::BlockQuote => {
                self.process_block_quote(node, 1);
                self.lines.push(PreviewLine::empty());
            }

            NodeValue::ThematicBreak => {
                self.lines
                    .push(PreviewLine::new("─".repeat(RULE_WIDTH), LineKind::Rule));
                self.lines.push(PreviewLine::empty());
            }

            NodeValue::Table(_) => {
                for row in render_table(node) {
                    self.lines.push(PreviewLine::new(row, LineKind::Table));
                }
                self.lines.push(PreviewLine::empty());
            }

            NodeValue::FootnoteDefinition(def) => {
                let label = format!("[^{}]: ", def.name);
                let continuation = " ".repeat(label.width());
                for child in node.children() {
                    self.push_inline_rows(child, LineKind::Paragraph, &label, &continuation);
                }
                self.lines.push(PreviewLine::empty());
            }

            NodeValue::HtmlBlock(_) => {
                self.lines.push(PreviewLine::new(
                    "(html block, Ctrl+O shows it in the browser)",
                    LineKind::Html,
                ));
            }

            _ => {
                for child in node.children() {
                    self.process_node(child, depth, marker.clone());
                }
            }
        }
    }

    fn process_item<'a>(&mut self, node: &'a AstNode<'a>, depth: usize, marker: &str) {
        let indent = "  ".repeat(depth.saturating_sub(1));
        let first_prefix = format!("{indent}{marker}");
        let next_prefix = " ".repeat(first_prefix.width());
        let mut rendered_any = false;

        for child in node.children() {
            let is_paragraph = matches!(child.data.borrow().value, NodeValue::Paragraph);
            if is_paragraph {
                let prefix = if rendered_any {
                    next_prefix.as_str()
                } else {
                    first_prefix.as_str()
                };
                self.push_inline_rows(child, LineKind::ListItem(depth), prefix, &next_prefix);
                rendered_any = true;
            } else {
                self.process_node(child, depth, None);
            }
        }

        if !rendered_any {
            self.lines.push(PreviewLine::new(
                first_prefix.trim_end(),
                LineKind::ListItem(depth),
            ));
        }
    }

    fn process_block_quote<'a>(&mut self, node: &'a AstNode<'a>, quote_depth: usize) {
        let prefix = "│ ".repeat(quote_depth);
        for child in node.children() {
            let is_nested = matches!(child.data.borrow().value, NodeValue::BlockQuote);
            let is_paragraph = matches!(child.data.borrow().value, NodeValue::Paragraph);
            if is_nested {
                self.process_block_quote(child, quote_depth + 1);
            } else if is_paragraph {
                self.push_inline_rows(child, LineKind::BlockQuote, &prefix, &prefix);
            } else {
                for raw_line in extract_text(child).lines() {
                    self.lines.push(PreviewLine::new(
                        format!("{prefix}{raw_line}"),
                        LineKind::BlockQuote,
                    ));
                }
            }
        }
    }

    fn push_code_block(&mut self, language: &str, literal: &str) {
        let body: Vec<&str> = literal.lines().collect();
        let label = format!(" {language} ");
        let inner_width = body
            .iter()
            .map(|line| line.width())
            .max()
            .unwrap_or(0)
            .max(label.width());
        let frame_width = inner_width + 1 + CODE_RIGHT_PADDING;

        self.lines.push(PreviewLine::new(
            format!(
                "┌{label}{}┐",
                "─".repeat(frame_width.saturating_sub(label.width()))
            ),
            LineKind::CodeBlock,
        ));

        let code_style = InlineStyle {
            code: true,
            ..InlineStyle::default()
        };
        for line in body {
            let padding = " ".repeat(inner_width.saturating_sub(line.width()) + CODE_RIGHT_PADDING);
            self.lines.push(PreviewLine::with_spans(
                LineKind::CodeBlock,
                vec![
                    InlineSpan::plain("│ "),
                    InlineSpan::new(line, code_style),
                    InlineSpan::plain(format!("{padding}│")),
                ],
            ));
        }

        self.lines.push(PreviewLine::new(
            format!("└{}┘", "─".repeat(frame_width)),
            LineKind::CodeBlock,
        ));
    }

    fn push_inline_rows<'a>(
        &mut self,
        node: &'a AstNode<'a>,
        kind: LineKind,
        prefix_first: &str,
        prefix_next: &str,
    ) {
        for (index, row) in self.collect_inline_rows(node).into_iter().enumerate() {
            let prefix = if index == 0 { prefix_first } else { prefix_next };
            let mut spans = Vec::with_capacity(row.len() + 1);
            if !prefix.is_empty() {
                spans.push(InlineSpan::plain(prefix));
            }
            spans.extend(row);
            self.lines.push(PreviewLine::with_spans(kind, spans));
        }
    }

    fn collect_inline_rows<'a>(&self, node: &'a AstNode<'a>) -> Vec<Vec<InlineSpan>> {
        let mut rows = vec![Vec::new()];
        for child in node.children() {
            self.collect_inline(child, InlineStyle::default(), &mut rows);
        }
        rows
    }

    fn collect_inline<'a>(
        &self,
        node: &'a AstNode<'a>,
        style: InlineStyle,
        rows: &mut Vec<Vec<InlineSpan>>,
    ) {
        match &node.data.borrow().value {
            NodeValue::List(_) | NodeValue::Item(_) | NodeValue::HtmlInline(_) => {}
            NodeValue::Text(text) => push_span(rows, InlineSpan::new(text.clone(), style)),
            NodeValue::Code(code) => {
                let code_style = InlineStyle {
                    code: true,
                    ..InlineStyle::default()
                };
                push_span(rows, InlineSpan::new(code.literal.clone(), code_style));
            }
            NodeValue::ShortCode(shortcode) => {
                push_span(rows, InlineSpan::new(shortcode.emoji.clone(), style));
            }
            NodeValue::Emph => self.collect_children(
                node,
                InlineStyle {
                    emphasis: true,
                    ..style
                },
                rows,
            ),
            NodeValue::Strong => self.collect_children(
                node,
                InlineStyle {
                    strong: true,
                    ..style
                },
                rows,
            ),
            NodeValue::Strikethrough => self.collect_children(
                node,
                InlineStyle {
                    strikethrough: true,
                    ..style
                },
                rows,
            ),
            NodeValue::Link(_) => {
                self.collect_children(node, InlineStyle { link: true, ..style }, rows);
            }
            NodeValue::Image(image) => {
                let alt = extract_text(node);
                let label = if alt.trim().is_empty() {
                    image.url.as_str()
                } else {
                    alt.as_str()
                };
                push_span(
                    rows,
                    InlineSpan::new(format!("[image: {label}]"), InlineStyle { link: true, ..style }),
                );
            }
            NodeValue::FootnoteReference(reference) => {
                push_span(rows, InlineSpan::new(format!("[^{}]", reference.name), style));
            }
            NodeValue::SoftBreak => {
                if self.hard_breaks {
                    rows.push(Vec::new());
                } else {
                    push_span(rows, InlineSpan::new(" ", style));
                }
            }
            NodeValue::LineBreak => rows.push(Vec::new()),
            _ => self.collect_children(node, style, rows),
        }
    }

    fn collect_children<'a>(
        &self,
        node: &'a AstNode<'a>,
        style: InlineStyle,
        rows: &mut Vec<Vec<InlineSpan>>,
    ) {
        for child in node.children() {
            self.collect_inline(child, style, rows);
        }
    }

    fn ensure_separator(&mut self) {
        if self
            .lines
            .last()
            .is_some_and(|line| line.kind() != LineKind::Empty)
        {
            self.lines.push(PreviewLine::empty());
        }
    }
}

fn push_span(rows: &mut Vec<Vec<InlineSpan>>, span: InlineSpan) {
    if let Some(row) = rows.last_mut() {
        row.push(span);
    } else {
        rows.push(vec![span]);
    }
}

fn is_image_only<'a>(node: &'a AstNode<'a>) -> bool {
    let mut saw_image = false;
    for child in node.children() {
        match &child.data.borrow().value {
            NodeValue::Image(_) => saw_image = true,
            NodeValue::Link(_) => {
                // Badges are usually images wrapped in links.
                if !is_image_only(child) {
                    return false;
                }
                saw_image = true;
            }
            NodeValue::Text(text) if text.trim().is_empty() => {}
            NodeValue::SoftBreak | NodeValue::LineBreak => {}
            _ => return false,
        }
    }
    saw_image
}

fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    extract_text_recursive(node, &mut text);
    text
}

fn extract_text_recursive<'a>(node: &'a AstNode<'a>, text: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(t) => text.push_str(t),
        NodeValue::Code(code) => text.push_str(&code.literal),
        NodeValue::CodeBlock(block) => text.push_str(&block.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => text.push('\n'),
        _ => {
            for child in node.children() {
                extract_text_recursive(child, text);
            }
        }
    }
}

fn render_table<'a>(table_node: &'a AstNode<'a>) -> Vec<String> {
    let (alignments, mut rows, has_header) = collect_table_rows(table_node);
    let num_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    if num_cols == 0 {
        return Vec::new();
    }
    for row in &mut rows {
        row.resize(num_cols, String::new());
    }

    let mut widths = vec![1_usize; num_cols];
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.width());
        }
    }

    let mut out = vec![table_border(&widths, '┌', '┬', '┐')];
    for (idx, row) in rows.iter().enumerate() {
        out.push(table_row(row, &widths, &alignments));
        if has_header && idx == 0 {
            out.push(table_border(&widths, '├', '┼', '┤'));
        }
    }
    out.push(table_border(&widths, '└', '┴', '┘'));
    out
}

fn collect_table_rows<'a>(
    table_node: &'a AstNode<'a>,
) -> (Vec<TableAlignment>, Vec<Vec<String>>, bool) {
    let alignments = match &table_node.data.borrow().value {
        NodeValue::Table(table) => table.alignments.clone(),
        _ => Vec::new(),
    };

    let mut rows = Vec::new();
    let mut has_header = false;
    for row_node in table_node.children() {
        match row_node.data.borrow().value {
            NodeValue::TableRow(header) => has_header |= header,
            _ => continue,
        }
        let cells = row_node
            .children()
            .filter(|cell| matches!(cell.data.borrow().value, NodeValue::TableCell))
            .map(|cell| {
                extract_text(cell)
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        rows.push(cells);
    }

    (alignments, rows, has_header)
}

fn table_border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}", segments.join(&middle.to_string()))
}

fn table_row(cells: &[String], widths: &[usize], alignments: &[TableAlignment]) -> String {
    let mut out = String::from("│");
    for (idx, width) in widths.iter().enumerate() {
        let content = cells.get(idx).map_or("", String::as_str);
        let padding = width.saturating_sub(content.width());
        let (left, right) = match alignments.get(idx).copied().unwrap_or(TableAlignment::None) {
            TableAlignment::Right => (padding, 0),
            TableAlignment::Center => (padding / 2, padding - padding / 2),
            TableAlignment::Left | TableAlignment::None => (0, padding),
        };
        out.push(' ');
        out.push_str(&" ".repeat(left));
        out.push_str(content);
        out.push_str(&" ".repeat(right));
        out.push_str(" │");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(md: &str) -> RenderOutput {
        ComrakRenderer::default().render(md).unwrap()
    }

    fn contents(output: &RenderOutput) -> Vec<String> {
        output.lines.iter().map(PreviewLine::content).collect()
    }

    #[test]
    fn test_heading_and_paragraph_html() {
        let output = render("# Hello\nWorld");
        assert!(output.html.contains("<h1>Hello</h1>"), "{}", output.html);
        assert!(output.html.contains("<p>World</p>"), "{}", output.html);
    }

    #[test]
    fn test_single_newline_is_line_break() {
        let output = render("first\nsecond");
        assert!(output.html.contains("first<br />"), "{}", output.html);

        let lines = contents(&output);
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn test_soft_break_without_hard_breaks_is_space() {
        let renderer = ComrakRenderer::new(RenderSettings {
            hard_breaks: false,
            ..RenderSettings::default()
        });
        let output = renderer.render("first\nsecond").unwrap();
        assert_eq!(contents(&output), vec!["first second"]);
    }

    #[test]
    fn test_gfm_table_strikethrough_and_autolink() {
        let output = render("| a | b |\n|---|--:|\n| 1 | 2 |\n\n~~gone~~ https://example.com");
        assert!(output.html.contains("<table>"));
        assert!(output.html.contains("<del>gone</del>"));
        assert!(output.html.contains("<a href=\"https://example.com\">"));
    }

    #[test]
    fn test_fenced_code_block_keeps_language() {
        let output = render("```rust\nfn main() {}\n```");
        assert!(output.html.contains("<pre lang=\"rust\">"), "{}", output.html);

        let lines = contents(&output);
        assert!(lines[0].starts_with("┌ rust "));
        assert!(lines[1].contains("fn main() {}"));
        assert!(lines[2].starts_with('└'));
        assert!(output.lines[1].spans()[1].style().code);
    }

    #[test]
    fn test_empty_input_renders_nothing() {
        let output = render("");
        assert!(output.html.is_empty());
        assert!(output.lines.is_empty());
    }

    #[test]
    fn test_unbalanced_markup_degrades_to_text() {
        let output = render("**bold without end\n[link](\n```\nunterminated");
        assert!(output.html.contains("**bold without end"));
        assert!(!output.lines.is_empty());
    }

    #[test]
    fn test_raw_html_passes_through_to_sanitizer() {
        let output = render("<p align=\"center\">hi</p>");
        assert!(output.html.contains("<p align=\"center\">hi</p>"));
        assert_eq!(output.lines[0].kind(), LineKind::Html);
    }

    #[test]
    fn test_nested_lists_indent_by_depth() {
        let output = render("- one\n  - two\n1. first");
        let lines = contents(&output);
        assert!(lines.contains(&"• one".to_string()), "{lines:?}");
        assert!(lines.contains(&"  • two".to_string()), "{lines:?}");
        assert!(lines.contains(&"1. first".to_string()), "{lines:?}");
        assert!(
            output
                .lines
                .iter()
                .any(|line| line.kind() == LineKind::ListItem(2))
        );
    }

    #[test]
    fn test_task_list_markers() {
        let output = render("- [x] done\n- [ ] todo");
        let lines = contents(&output);
        assert!(lines.contains(&"✓ done".to_string()), "{lines:?}");
        assert!(lines.contains(&"□ todo".to_string()), "{lines:?}");
    }

    #[test]
    fn test_table_rows_are_aligned() {
        let output = render("| name | n |\n|:----:|--:|\n| ab | 1 |");
        let lines = contents(&output);
        assert_eq!(lines[0], "┌──────┬───┐");
        assert_eq!(lines[1], "│ name │ n │");
        assert_eq!(lines[2], "├──────┼───┤");
        assert_eq!(lines[3], "│  ab  │ 1 │");
        assert_eq!(lines[4], "└──────┴───┘");
    }

    #[test]
    fn test_badge_paragraph_is_image_line() {
        let output = render("[![stars](https://img.shields.io/x.svg)](https://github.com)");
        assert_eq!(output.lines[0].kind(), LineKind::Image);
        assert_eq!(output.lines[0].content(), "[image: stars]");
    }

    #[test]
    fn test_inline_styles_are_tracked() {
        let output = render("*em* **strong** `code` ~~del~~");
        let spans = output.lines[0].spans();
        assert!(spans.iter().any(|s| s.text() == "em" && s.style().emphasis));
        assert!(spans.iter().any(|s| s.text() == "strong" && s.style().strong));
        assert!(spans.iter().any(|s| s.text() == "code" && s.style().code));
        assert!(spans.iter().any(|s| s.text() == "del" && s.style().strikethrough));
    }

    #[test]
    fn test_shortcodes_resolve_to_emoji() {
        let output = render("ship it :rocket:");
        assert!(output.html.contains('🚀'), "{}", output.html);
        assert!(output.lines[0].content().contains('🚀'));
    }

    #[test]
    fn test_block_quote_prefix() {
        let output = render("> quoted\n>> deeper");
        let lines = contents(&output);
        assert_eq!(lines[0], "│ quoted");
        assert!(lines.iter().any(|l| l == "│ │ deeper"), "{lines:?}");
    }

    #[test]
    fn test_guarded_panic_becomes_error() {
        install_render_panic_hook();
        let result = guarded(|| -> Result<RenderOutput, RenderError> {
            assert!(GUARDED.with(Cell::get));
            panic!("boom")
        });
        assert_eq!(result, Err(RenderError::Panicked("boom".to_string())));
        assert!(!GUARDED.with(Cell::get));
    }
}
