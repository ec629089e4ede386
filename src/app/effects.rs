use crate::app::{App, Message, Model, ToastLevel, update};
use crate::client::WorkerEvent;
use crate::export::{self, ClipboardError, CopyRoute, ExportError};

impl App {
    /// Run `msg` through `update`, then perform its side effects.
    pub fn dispatch(&mut self, model: &mut Model, msg: Message) {
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        self.handle_message_side_effects(model, &side_msg);
    }

    /// Feed finished background calls back into the model.
    ///
    /// Returns `true` when anything arrived.
    pub fn poll_worker(&mut self, model: &mut Model) -> bool {
        let mut received = false;
        while let Some(event) = self.worker.try_recv() {
            received = true;
            let msg = match event {
                WorkerEvent::Generated(result) => Message::GenerationFinished(result),
                WorkerEvent::Health(result) => Message::HealthChecked(result),
            };
            self.dispatch(model, msg);
        }
        received
    }

    pub(super) fn handle_message_side_effects(&mut self, model: &mut Model, msg: &Message) {
        match msg {
            Message::Generate => {
                if let Some(username) = model.pending_request.take()
                    && !self.worker.spawn_generate(username)
                {
                    tracing::warn!("generation requested while another is in flight");
                }
            }
            Message::CopyToClipboard => self.copy_buffer(model),
            Message::DownloadFile => self.download_buffer(model),
            Message::OpenInBrowser => self.open_preview(model),
            _ => {}
        }
    }

    fn copy_buffer(&self, model: &mut Model) {
        let text = model.coordinator.buffer();
        match export::copy_to_clipboard(&text, &self.clipboard) {
            Ok(CopyRoute::Primary) => model.show_toast(ToastLevel::Success, "Copied to clipboard!"),
            Ok(CopyRoute::Fallback) => model.show_toast(
                ToastLevel::Success,
                "Copied to clipboard via terminal (OSC 52)",
            ),
            Err(ClipboardError::Empty) => model.show_toast(ToastLevel::Warning, "No content to copy"),
            Err(err) => {
                tracing::warn!(error = %err, "copy failed");
                model.show_toast(ToastLevel::Error, format!("Copy failed: {err}"));
            }
        }
    }

    fn download_buffer(&self, model: &mut Model) {
        let text = model.coordinator.buffer();
        match export::download_as_file(&text, model.username_label.as_deref(), &self.out_dir) {
            Ok(path) => {
                model.show_toast(ToastLevel::Success, format!("Saved {}", path.display()));
            }
            Err(ExportError::EmptyBuffer) => {
                model.show_toast(ToastLevel::Warning, "No content to download");
            }
            Err(err) => {
                tracing::warn!(error = %err, "download failed");
                model.show_toast(ToastLevel::Error, format!("Download failed: {err}"));
            }
        }
    }

    fn open_preview(&mut self, model: &mut Model) {
        if model.coordinator.is_stale() {
            model.coordinator.refresh();
        }
        let title = export::export_file_name(model.username_label.as_deref());
        match export::open_in_browser(model.coordinator.view().html(), &title) {
            Ok(page) => {
                self.browser_pages.push(page);
                model.show_toast(ToastLevel::Info, "Opened preview in browser");
            }
            Err(ExportError::EmptyBuffer) => {
                model.show_toast(ToastLevel::Warning, "No content to preview");
            }
            Err(err) => {
                tracing::warn!(error = %err, "browser preview failed");
                model.show_toast(ToastLevel::Error, format!("Preview failed: {err}"));
            }
        }
    }
}
