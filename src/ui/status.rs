use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ServiceStatus};
use crate::coordinator::{Tab, ViewState};

use super::style::Theme;

const KEY_HINTS: &str = " Ctrl+G generate  Ctrl+T tab  Ctrl+Y copy  Ctrl+S save  Ctrl+O browser  F1 help  Ctrl+Q quit";

pub fn render_toast_bar(model: &Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        frame.render_widget(Paragraph::new(KEY_HINTS).style(theme.muted), area);
        return;
    };
    let (prefix, style) = theme.toast(level);
    let toast = Paragraph::new(format!(" {prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}

pub fn render_status_bar(model: &Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let status = status_text(model);
    let status_bar =
        Paragraph::new(status).style(Style::default().bg(theme.status_bg).fg(theme.status_fg));
    frame.render_widget(status_bar, area);
}

pub(super) fn status_text(model: &Model) -> String {
    let service = match &model.service_status {
        ServiceStatus::Unknown => "api: ?".to_string(),
        ServiceStatus::Healthy(None) => "api: ok".to_string(),
        ServiceStatus::Healthy(Some(cached)) => format!("api: ok ({cached} cached)"),
        ServiceStatus::Unreachable(_) => "api: offline".to_string(),
    };

    let activity = if model.generating {
        "  [generating]".to_string()
    } else {
        model
            .last_generation_secs
            .map_or_else(String::new, |secs| format!("  [last: {secs:.2}s]"))
    };

    let position = match model.active_tab() {
        Tab::Editor => {
            let cursor = model.coordinator.editor().cursor();
            format!("Ln {}, Col {}", cursor.line + 1, cursor.col + 1)
        }
        Tab::Preview => format!("[{}%]", scroll_percent(model)),
    };

    let fallback = match model.coordinator.view().state() {
        ViewState::RawFallback { .. } => "  [raw]",
        ViewState::Placeholder | ViewState::Rendered => "",
    };

    let size = format!("{} chars", model.coordinator.editor().len_chars());

    let target = model
        .username_label
        .as_deref()
        .map_or_else(String::new, |name| format!("  @{name}"));

    format!(
        " {}{target}  {position}{fallback}  {size}  {}  {service}{activity}",
        model.active_tab().label(),
        model.endpoint,
    )
}

fn scroll_percent(model: &Model) -> usize {
    let max = model.max_preview_scroll();
    if max == 0 {
        100
    } else {
        (model.preview_scroll.min(max) * 100) / max
    }
}
