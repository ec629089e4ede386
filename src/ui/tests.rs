use super::*;
use crate::app::{Focus, Message, Model, ServiceStatus, update};
use crate::coordinator::Tab;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    Terminal::new(backend).unwrap()
}

fn draw(model: &Model) -> Vec<String> {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect()
}

fn screen_contains(rows: &[String], needle: &str) -> bool {
    rows.iter().any(|row| row.contains(needle))
}

fn model_with(markdown: &str, tab: Tab) -> Model {
    let mut model = Model::default();
    model.coordinator.set_buffer(markdown);
    model.coordinator.switch_tab(tab);
    model
}

#[test]
fn test_body_height_subtracts_chrome() {
    assert_eq!(body_height(24), 18);
    assert_eq!(body_height(3), 0);
}

#[test]
fn test_empty_preview_shows_placeholder() {
    let model = model_with("", Tab::Preview);
    let rows = draw(&model);
    assert!(screen_contains(&rows, "Nothing to preview yet"));
}

#[test]
fn test_preview_renders_markdown_structure() {
    let model = model_with("# Hello\n\n- one\n- two\n\n> quoted", Tab::Preview);
    let rows = draw(&model);
    assert!(screen_contains(&rows, "# Hello"));
    assert!(screen_contains(&rows, "• one"));
    assert!(screen_contains(&rows, "• two"));
    assert!(screen_contains(&rows, "│ quoted"));
}

#[test]
fn test_preview_respects_scroll_offset() {
    let markdown: String = (1..=40).map(|i| format!("para {i}\n\n")).collect();
    let mut model = model_with(&markdown, Tab::Preview);
    model = update(model, Message::ScrollDown(10));
    let rows = draw(&model);
    assert!(!screen_contains(&rows, "para 1 "));
    assert!(screen_contains(&rows, "para 6"));
}

#[test]
fn test_editor_shows_line_numbers_and_text() {
    let model = model_with("# Title\nsecond line", Tab::Editor);
    let rows = draw(&model);
    assert!(screen_contains(&rows, "  1 # Title"));
    assert!(screen_contains(&rows, "  2 second line"));
}

#[test]
fn test_empty_editor_without_focus_shows_hint() {
    let model = Model::default();
    let rows = draw(&model);
    assert!(screen_contains(&rows, "Generate a README above"));
}

#[test]
fn test_editor_cursor_cell_is_highlighted() {
    let mut model = model_with("abc", Tab::Editor);
    model.focus = Focus::Body;
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let body = layout(terminal.backend().buffer().area).body;
    let theme = style::Theme::for_background(model.background);
    // Gutter "  1 " is four columns wide
    let cell = &terminal.backend().buffer()[(body.x + 4, body.y)];
    assert_eq!(cell.symbol(), "a");
    assert_eq!(cell.bg, theme.cursor.bg.unwrap());
}

#[test]
fn test_editor_scrolls_horizontally_to_cursor() {
    let long_line = format!("{}END", "a".repeat(100));
    let mut model = model_with(&long_line, Tab::Editor);
    model.focus = Focus::Body;
    model = update(model, Message::EditorMove(crate::editor::Motion::LineEnd));

    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();
    let buffer = terminal.backend().buffer();
    let body = layout(buffer.area).body;
    let theme = style::Theme::for_background(model.background);

    let row: String = (body.x..body.x + body.width)
        .map(|x| buffer[(x, body.y)].symbol())
        .collect();
    assert!(row.starts_with("  1 a"), "{row}");
    assert!(row.contains("aEND"), "{row}");
    let cursor = &buffer[(body.x + body.width - 1, body.y)];
    assert_eq!(cursor.bg, theme.cursor.bg.unwrap());

    model = update(model, Message::EditorMove(crate::editor::Motion::LineStart));
    let rows = draw(&model);
    assert!(!screen_contains(&rows, "END"));
}

#[test]
fn test_username_field_shows_input() {
    let model = Model::default().with_username("octocat");
    let rows = draw(&model);
    assert!(screen_contains(&rows, "GitHub username"));
    assert!(screen_contains(&rows, "octocat"));
    assert!(screen_contains(&rows, "Enter to generate"));
}

#[test]
fn test_generating_indicator() {
    let model = update(Model::default().with_username("octocat"), Message::Generate);
    let rows = draw(&model);
    assert!(screen_contains(&rows, "generating..."));
    assert!(screen_contains(&rows, "[generating]"));
}

#[test]
fn test_tabs_are_labelled() {
    let rows = draw(&Model::default());
    assert!(screen_contains(&rows, "Editor F2"));
    assert!(screen_contains(&rows, "Preview F3"));
}

#[test]
fn test_status_bar_shows_endpoint_and_service() {
    let mut model = Model::default().with_endpoint("http://127.0.0.1:5000/generate");
    model.service_status = ServiceStatus::Unreachable("refused".to_string());
    let rows = draw(&model);
    let status = rows.last().unwrap();
    assert!(status.contains("http://127.0.0.1:5000/generate"));
    assert!(status.contains("api: offline"));
}

#[test]
fn test_status_bar_shows_cache_size_when_reported() {
    let mut model = Model::default();
    model.service_status = ServiceStatus::Healthy(Some(4));
    let rows = draw(&model);
    assert!(rows.last().unwrap().contains("api: ok (4 cached)"));
}

#[test]
fn test_toast_replaces_key_hints() {
    let rows = draw(&Model::default());
    assert!(screen_contains(&rows, "Ctrl+G generate"));

    let model = update(Model::default(), Message::Generate);
    let rows = draw(&model);
    assert!(screen_contains(&rows, "[warn] Please enter a GitHub username"));
}

#[test]
fn test_help_overlay_lists_config_paths() {
    let mut model = Model::default();
    model.help_visible = true;
    model.config_global_path = Some(std::path::PathBuf::from("/tmp/cfg/config"));
    let mut terminal = Terminal::new(TestBackend::new(80, 60)).unwrap();
    terminal.draw(|frame| render(&model, frame)).unwrap();
    let buffer = terminal.backend().buffer();
    let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
    assert!(text.contains("Help"));
    assert!(text.contains("Ctrl-y"));
    assert!(text.contains("Global: /tmp/cfg/config"));
}

#[test]
fn test_render_survives_tiny_terminal() {
    let model = model_with("# tiny", Tab::Preview);
    let mut terminal = Terminal::new(TestBackend::new(10, 3)).unwrap();
    terminal.draw(|frame| render(&model, frame)).unwrap();
}
