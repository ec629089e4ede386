use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs};

use crate::app::{Focus, Model};
use crate::coordinator::Tab;
use crate::markdown::PreviewLine;

use super::style::Theme;
use super::{BODY_LEFT_PADDING, FOOTER_ROWS, HEADER_ROWS, TAB_ROWS, overlays, status};

/// Screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub tabs: Rect,
    pub body: Rect,
    pub toast: Rect,
    pub status: Rect,
}

/// Split `area` into the fixed screen regions.
pub fn layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_ROWS),
            Constraint::Length(TAB_ROWS),
            Constraint::Min(0),
            Constraint::Length(FOOTER_ROWS / 2),
            Constraint::Length(FOOTER_ROWS / 2),
        ])
        .split(area);
    ScreenLayout {
        header: chunks[0],
        tabs: chunks[1],
        body: chunks[2],
        toast: chunks[3],
        status: chunks[4],
    }
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let theme = Theme::for_background(model.background);
    let area = frame.area();
    let regions = layout(area);

    render_username_field(model, &theme, frame, regions.header);
    render_tabs(model, &theme, frame, regions.tabs);
    match model.active_tab() {
        Tab::Editor => render_editor(model, &theme, frame, regions.body),
        Tab::Preview => render_preview(model, &theme, frame, regions.body),
    }
    status::render_toast_bar(model, &theme, frame, regions.toast);
    status::render_status_bar(model, &theme, frame, regions.status);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_username_field(model: &Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let focused = model.focus == Focus::Username;
    let border_style = if focused {
        theme.focused_border
    } else {
        theme.muted
    };
    let block = Block::default()
        .title(" GitHub username ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut spans = Vec::new();
    if model.username_input.is_empty() && !focused {
        spans.push(Span::styled("e.g. octocat", theme.muted));
    } else {
        spans.push(Span::raw(model.username_input.clone()));
    }
    if focused && !model.generating {
        spans.push(Span::styled(" ", theme.cursor));
    }
    if model.generating {
        spans.push(Span::styled("  generating...", theme.muted));
    } else if focused {
        spans.push(Span::styled("  Enter to generate", theme.muted));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_tabs(model: &Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let titles = [Tab::Editor, Tab::Preview]
        .map(|tab| format!(" {} {} ", tab.label(), tab_key(tab)));
    let selected = match model.active_tab() {
        Tab::Editor => 0,
        Tab::Preview => 1,
    };
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(theme.active_tab)
        .divider(" ");
    frame.render_widget(tabs, area);
}

const fn tab_key(tab: Tab) -> &'static str {
    match tab {
        Tab::Editor => "F2",
        Tab::Preview => "F3",
    }
}

fn render_editor(model: &Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let editor = model.coordinator.editor();
    let show_cursor = model.focus == Focus::Body;

    if editor.is_empty() && !show_cursor {
        let hint = Paragraph::new(Line::styled(
            " Generate a README above, or press Tab and start typing.",
            theme.muted.add_modifier(Modifier::ITALIC),
        ));
        frame.render_widget(hint, area);
        return;
    }

    let total_lines = editor.line_count();
    let gutter_width = line_number_width(total_lines);
    let visible_height = area.height as usize;
    let start = editor.scroll();
    let end = (start + visible_height).min(total_lines);
    let cursor = editor.cursor();
    let text_width = (area.width as usize).saturating_sub(gutter_width + 1);
    let offset = if show_cursor {
        horizontal_offset(cursor.col, text_width)
    } else {
        0
    };

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let full_line = editor.line(line_idx).unwrap_or_default();
        let line_text = skip_chars(&full_line, offset);
        let line_num = format!("{:>width$} ", line_idx + 1, width = gutter_width);
        let mut spans = vec![Span::styled(line_num, theme.muted)];

        if show_cursor && line_idx == cursor.line {
            // Cursor column counts chars, not bytes
            let split = line_text
                .char_indices()
                .nth(cursor.col - offset)
                .map_or(line_text.len(), |(byte, _)| byte);
            let (before, rest) = line_text.split_at(split);
            let mut rest_chars = rest.chars();
            let cursor_char = rest_chars.next().map_or_else(|| " ".to_string(), String::from);
            let after = rest_chars.as_str();

            if !before.is_empty() {
                spans.push(Span::raw(before.to_string()));
            }
            spans.push(Span::styled(cursor_char, theme.cursor));
            if !after.is_empty() {
                spans.push(Span::raw(after.to_string()));
            }
        } else {
            spans.push(Span::raw(line_text.to_string()));
        }
        content.push(Line::from(spans));
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), area);
}

fn render_preview(model: &Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let lines = model.coordinator.view().lines();
    let visible_height = area.height as usize;
    let start = model.preview_scroll.min(lines.len());
    let end = (start + visible_height).min(lines.len());

    let content: Vec<Line> = lines[start..end]
        .iter()
        .map(|line| preview_line(line, theme))
        .collect();

    let padded = Rect {
        x: area.x + BODY_LEFT_PADDING.min(area.width),
        width: area.width.saturating_sub(BODY_LEFT_PADDING),
        ..area
    };
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), padded);
}

fn preview_line<'a>(line: &'a PreviewLine, theme: &Theme) -> Line<'a> {
    let base = theme.line_style(line.kind());
    let spans: Vec<Span> = line
        .spans()
        .iter()
        .map(|span| Span::styled(span.text(), theme.inline_style(base, span.style())))
        .collect();
    Line::from(spans).style(base)
}

/// Columns the editor is shifted left by so the cursor stays on screen.
const fn horizontal_offset(cursor_col: usize, text_width: usize) -> usize {
    if text_width == 0 {
        cursor_col
    } else {
        cursor_col.saturating_sub(text_width - 1)
    }
}

fn skip_chars(text: &str, count: usize) -> &str {
    text.char_indices()
        .nth(count)
        .map_or("", |(byte, _)| &text[byte..])
}

fn line_number_width(total_lines: usize) -> usize {
    total_lines.max(1).to_string().len().max(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_reserves_fixed_rows() {
        let regions = layout(Rect::new(0, 0, 80, 24));
        assert_eq!(regions.header.height, HEADER_ROWS);
        assert_eq!(regions.tabs.height, TAB_ROWS);
        assert_eq!(regions.body.height, super::super::body_height(24));
        assert_eq!(regions.status.y, 23);
        assert_eq!(regions.toast.y, 22);
    }

    #[test]
    fn test_line_number_width_minimum() {
        assert_eq!(line_number_width(0), 3);
        assert_eq!(line_number_width(12_345), 5);
    }
}
