use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Focus, Message, Model};
use crate::coordinator::Tab;
use crate::editor::Motion;

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Paste(text) => Self::handle_paste(text, model),
            Event::Resize(w, h) => {
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        if let Some(msg) = Self::handle_global_key(key) {
            return Some(msg);
        }

        match (model.focus, model.active_tab()) {
            (Focus::Username, _) => Self::handle_username_key(key),
            (Focus::Body, Tab::Editor) => Self::handle_editor_key(key, model),
            (Focus::Body, Tab::Preview) => Self::handle_preview_key(key),
        }
    }

    fn handle_global_key(key: KeyEvent) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q' | 'c') if ctrl => Some(Message::Quit),
            KeyCode::Char('g') if ctrl => Some(Message::Generate),
            KeyCode::Char('t') if ctrl => Some(Message::ToggleTab),
            KeyCode::Char('y') if ctrl => Some(Message::CopyToClipboard),
            KeyCode::Char('s') if ctrl => Some(Message::DownloadFile),
            KeyCode::Char('o') if ctrl => Some(Message::OpenInBrowser),
            KeyCode::Char('l') if ctrl => Some(Message::Redraw),
            KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::F(2) => Some(Message::ShowTab(Tab::Editor)),
            KeyCode::F(3) => Some(Message::ShowTab(Tab::Preview)),
            KeyCode::Tab | KeyCode::BackTab => Some(Message::FocusNext),
            KeyCode::Esc => Some(Message::FocusUsername),
            _ => None,
        }
    }

    fn handle_username_key(key: KeyEvent) -> Option<Message> {
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key.code {
            KeyCode::Enter => Some(Message::Generate),
            KeyCode::Backspace => Some(Message::UsernameBackspace),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::UsernameClear)
            }
            KeyCode::Char(c) if plain => Some(Message::UsernameInput(c)),
            KeyCode::Down => Some(Message::FocusNext),
            _ => None,
        }
    }

    fn handle_editor_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let page = model.body_height().max(1);
        let motion = match key.code {
            KeyCode::Left if ctrl => Motion::WordLeft,
            KeyCode::Right if ctrl => Motion::WordRight,
            KeyCode::Home if ctrl => Motion::BufferStart,
            KeyCode::End if ctrl => Motion::BufferEnd,
            KeyCode::Left => Motion::Left,
            KeyCode::Right => Motion::Right,
            KeyCode::Up => Motion::Up,
            KeyCode::Down => Motion::Down,
            KeyCode::Home => Motion::LineStart,
            KeyCode::End => Motion::LineEnd,
            KeyCode::PageUp => Motion::PageUp(page),
            KeyCode::PageDown => Motion::PageDown(page),
            KeyCode::Enter => return Some(Message::EditorNewline),
            KeyCode::Backspace => return Some(Message::EditorBackspace),
            KeyCode::Delete => return Some(Message::EditorDelete),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                return Some(Message::EditorInsert(c));
            }
            _ => return None,
        };
        Some(Message::EditorMove(motion))
    }

    fn handle_preview_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Message::ScrollDown(1)),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::ScrollUp(1)),
            KeyCode::PageDown | KeyCode::Char(' ') => Some(Message::PageDown),
            KeyCode::PageUp | KeyCode::Char('b') => Some(Message::PageUp),
            KeyCode::Home | KeyCode::Char('g') => Some(Message::GoToTop),
            KeyCode::End | KeyCode::Char('G') => Some(Message::GoToBottom),
            _ => None,
        }
    }

    fn handle_paste(text: &str, model: &Model) -> Option<Message> {
        if text.is_empty() || model.help_visible {
            return None;
        }
        match (model.focus, model.active_tab()) {
            (Focus::Username, _) => Some(Message::UsernamePaste(text.to_string())),
            (Focus::Body, Tab::Editor) => Some(Message::EditorInsertText(text.to_string())),
            (Focus::Body, Tab::Preview) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn body_model(tab: Tab) -> Model {
        let mut model = Model::default();
        model.focus = Focus::Body;
        model.coordinator.switch_tab(tab);
        model
    }

    #[test]
    fn test_global_shortcuts() {
        let model = Model::default();
        assert_eq!(App::handle_key(ctrl('g'), &model), Some(Message::Generate));
        assert_eq!(App::handle_key(ctrl('y'), &model), Some(Message::CopyToClipboard));
        assert_eq!(App::handle_key(ctrl('s'), &model), Some(Message::DownloadFile));
        assert_eq!(App::handle_key(ctrl('q'), &model), Some(Message::Quit));
        assert_eq!(App::handle_key(ctrl('c'), &model), Some(Message::Quit));
        assert_eq!(
            App::handle_key(key(KeyCode::F(3)), &model),
            Some(Message::ShowTab(Tab::Preview))
        );
    }

    #[test]
    fn test_username_field_typing_and_submit() {
        let model = Model::default();
        assert_eq!(
            App::handle_key(key(KeyCode::Char('q')), &model),
            Some(Message::UsernameInput('q'))
        );
        assert_eq!(App::handle_key(key(KeyCode::Enter), &model), Some(Message::Generate));
        assert_eq!(
            App::handle_key(key(KeyCode::Backspace), &model),
            Some(Message::UsernameBackspace)
        );
    }

    #[test]
    fn test_editor_keys() {
        let model = body_model(Tab::Editor);
        assert_eq!(
            App::handle_key(key(KeyCode::Char('#')), &model),
            Some(Message::EditorInsert('#'))
        );
        assert_eq!(App::handle_key(key(KeyCode::Enter), &model), Some(Message::EditorNewline));
        assert_eq!(
            App::handle_key(KeyEvent::new(KeyCode::Left, KeyModifiers::CONTROL), &model),
            Some(Message::EditorMove(Motion::WordLeft))
        );
    }

    #[test]
    fn test_preview_keys_scroll() {
        let model = body_model(Tab::Preview);
        assert_eq!(
            App::handle_key(key(KeyCode::Char('j')), &model),
            Some(Message::ScrollDown(1))
        );
        assert_eq!(App::handle_key(key(KeyCode::End), &model), Some(Message::GoToBottom));
    }

    #[test]
    fn test_any_key_closes_help() {
        let mut model = Model::default();
        model.help_visible = true;
        assert_eq!(App::handle_key(ctrl('g'), &model), Some(Message::HideHelp));
    }

    #[test]
    fn test_paste_routes_to_focused_widget() {
        let model = Model::default();
        assert_eq!(
            App::handle_paste("octocat", &model),
            Some(Message::UsernamePaste("octocat".to_string()))
        );
        let model = body_model(Tab::Editor);
        assert_eq!(
            App::handle_paste("a\nb", &model),
            Some(Message::EditorInsertText("a\nb".to_string()))
        );
        assert_eq!(App::handle_paste("x", &body_model(Tab::Preview)), None);
    }
}
