use crate::app::Model;
use crate::app::model::{Focus, ServiceStatus, ToastLevel};
use crate::client::{GenerateError, GeneratedReadme, HealthStatus, Username};
use crate::coordinator::Tab;
use crate::editor::Motion;

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Generation
    /// Submit the username to the generation service
    Generate,
    /// The in-flight generation finished
    GenerationFinished(Result<GeneratedReadme, GenerateError>),
    /// The startup health check finished
    HealthChecked(Result<HealthStatus, GenerateError>),

    // Username field
    UsernameInput(char),
    /// Pasted text; line breaks and control characters are dropped
    UsernamePaste(String),
    UsernameBackspace,
    UsernameClear,

    // Focus and tabs
    /// Cycle focus between the username field and the body pane
    FocusNext,
    FocusUsername,
    ToggleTab,
    ShowTab(Tab),

    // Editor
    EditorInsert(char),
    EditorInsertText(String),
    EditorNewline,
    EditorBackspace,
    EditorDelete,
    EditorMove(Motion),

    // Preview
    ScrollUp(usize),
    ScrollDown(usize),
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,

    // Export
    CopyToClipboard,
    DownloadFile,
    OpenInBrowser,

    // Window
    ToggleHelp,
    HideHelp,
    /// Terminal resized
    Resize(u16, u16),
    Redraw,

    Quit,
}

/// Pure function that updates the model based on a message.
///
/// Requests, clipboard access and file writes happen afterwards in
/// `App::handle_message_side_effects`.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::Generate => request_generation(&mut model),
        Message::GenerationFinished(result) => finish_generation(&mut model, result),
        Message::HealthChecked(Ok(health)) => {
            tracing::debug!(status = %health.status, "generation service reachable");
            model.service_status = ServiceStatus::Healthy(health.cache_size);
        }
        Message::HealthChecked(Err(err)) => {
            model.service_status = ServiceStatus::Unreachable(err.to_string());
            model.show_toast(
                ToastLevel::Warning,
                "API connection failed. Please check if the backend is running.",
            );
        }

        Message::UsernameInput(ch) => {
            if !model.generating && !ch.is_control() {
                model.username_input.push(ch);
            }
        }
        Message::UsernamePaste(text) => {
            if !model.generating {
                model
                    .username_input
                    .extend(text.chars().filter(|ch| !ch.is_control()));
            }
        }
        Message::UsernameBackspace => {
            if !model.generating {
                model.username_input.pop();
            }
        }
        Message::UsernameClear => {
            if !model.generating {
                model.username_input.clear();
            }
        }

        Message::FocusNext => model.focus = model.focus.next(),
        Message::FocusUsername => model.focus = Focus::Username,
        Message::ToggleTab => {
            let next = model.active_tab().toggled();
            model.coordinator.switch_tab(next);
            model.clamp_preview_scroll();
        }
        Message::ShowTab(tab) => {
            model.coordinator.switch_tab(tab);
            model.clamp_preview_scroll();
        }

        Message::EditorInsert(ch) => edit(&mut model, |editor| editor.insert_char(ch)),
        Message::EditorInsertText(text) => edit(&mut model, |editor| editor.insert_str(&text)),
        Message::EditorNewline => edit(&mut model, crate::editor::TextArea::newline),
        Message::EditorBackspace => edit(&mut model, |editor| {
            editor.backspace();
        }),
        Message::EditorDelete => edit(&mut model, |editor| {
            editor.delete();
        }),
        Message::EditorMove(motion) => edit(&mut model, |editor| editor.move_cursor(motion)),

        Message::ScrollUp(n) => model.preview_scroll = model.preview_scroll.saturating_sub(n),
        Message::ScrollDown(n) => {
            model.preview_scroll = model.preview_scroll.saturating_add(n);
            model.clamp_preview_scroll();
        }
        Message::PageUp => {
            model.preview_scroll = model.preview_scroll.saturating_sub(model.body_height());
        }
        Message::PageDown => {
            model.preview_scroll = model.preview_scroll.saturating_add(model.body_height());
            model.clamp_preview_scroll();
        }
        Message::GoToTop => model.preview_scroll = 0,
        Message::GoToBottom => model.preview_scroll = model.max_preview_scroll(),

        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,
        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
            model.clamp_preview_scroll();
            let rows = model.body_height();
            model.coordinator.editor_mut().scroll_to_cursor(rows);
        }

        // Export: handled in effects
        // Redraw: no state change needed
        Message::CopyToClipboard
        | Message::DownloadFile
        | Message::OpenInBrowser
        | Message::Redraw => {}

        Message::Quit => model.should_quit = true,
    }

    model
}

fn request_generation(model: &mut Model) {
    if model.generating {
        return;
    }
    match Username::parse(&model.username_input) {
        Ok(username) => {
            model.show_toast(ToastLevel::Info, format!("Generating README for {username}..."));
            model.generating = true;
            model.username_label = Some(username.to_string());
            model.pending_request = Some(username);
        }
        Err(err) => {
            model.focus = Focus::Username;
            model.show_toast(ToastLevel::Warning, capitalize(&err.to_string()));
        }
    }
}

fn finish_generation(model: &mut Model, result: Result<GeneratedReadme, GenerateError>) {
    model.generating = false;

    match result {
        Ok(readme) => {
            model.coordinator.set_buffer(&readme.markdown);
            model.coordinator.switch_tab(Tab::Editor);
            model.preview_scroll = 0;
            model.focus = Focus::Body;
            let secs = readme.display_seconds();
            model.last_generation_secs = Some(secs);
            let mut message = if readme.generation_time.is_some() {
                format!("README generated in {secs:.2}s!")
            } else {
                "README generated successfully!".to_string()
            };
            if readme.cached {
                message.push_str(" (built on your existing profile README)");
            }
            model.show_toast(ToastLevel::Success, message);
        }
        Err(err) => {
            model.show_toast(ToastLevel::Error, format!("Error: {err}"));
        }
    }
}

fn edit(model: &mut Model, apply: impl FnOnce(&mut crate::editor::TextArea)) {
    let rows = model.body_height();
    let editor = model.coordinator.editor_mut();
    apply(editor);
    editor.scroll_to_cursor(rows);
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
