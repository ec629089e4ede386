use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let mut all_lines: Vec<Line> = Vec::new();

    all_lines.push(Line::styled("Generate", section_style));
    all_lines.push(Line::raw("  Enter (username)    Generate README"));
    all_lines.push(Line::raw("  Ctrl-g              Generate README"));
    all_lines.push(Line::raw("  Ctrl-u (username)   Clear field"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Panes", section_style));
    all_lines.push(Line::raw("  Tab                 Switch focus"));
    all_lines.push(Line::raw("  Esc                 Focus username"));
    all_lines.push(Line::raw("  Ctrl-t              Toggle Editor / Preview"));
    all_lines.push(Line::raw("  F2 / F3             Editor / Preview"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Editor", section_style));
    all_lines.push(Line::raw("  Arrows, Home/End    Navigate"));
    all_lines.push(Line::raw("  Ctrl+Left/Right     Word movement"));
    all_lines.push(Line::raw("  Ctrl+Home/End       Buffer start / end"));
    all_lines.push(Line::raw("  PageUp/PageDown     Scroll editor"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Preview", section_style));
    all_lines.push(Line::raw("  j/k or Up/Down      Scroll"));
    all_lines.push(Line::raw("  Space/PageDown      Page down"));
    all_lines.push(Line::raw("  b/PageUp            Page up"));
    all_lines.push(Line::raw("  g / G               Top / bottom"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Export", section_style));
    all_lines.push(Line::raw("  Ctrl-y              Copy markdown"));
    all_lines.push(Line::raw("  Ctrl-s              Save <user>-README.md"));
    all_lines.push(Line::raw("  Ctrl-o              Open preview in browser"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Other", section_style));
    all_lines.push(Line::raw("  Ctrl-l              Redraw"));
    all_lines.push(Line::raw("  Ctrl-q / Ctrl-c     Quit"));
    all_lines.push(Line::raw("  F1                  Toggle help"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Config", section_style));
    all_lines.push(Line::raw(format!("  Global: {global_cfg}")));
    all_lines.push(Line::raw(format!("  Local override: {local_cfg}")));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Inner area: border(1) + padding(1) on each side = 4
    let inner = Rect::new(
        popup.x + 2,
        popup.y + 2,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(4),
    );

    // Reserve 1 row at bottom for footer hint
    let content_height_u16 = inner.height.saturating_sub(1);
    let content_height = content_height_u16 as usize;
    let visible: Vec<Line> = all_lines.into_iter().take(content_height).collect();

    let content_area = Rect::new(inner.x, inner.y, inner.width, content_height_u16);
    frame.render_widget(Paragraph::new(visible), content_area);

    let footer_area = Rect::new(inner.x, inner.y + content_height_u16, inner.width, 1);
    let footer = Line::styled("any key closes", dim_style);
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
