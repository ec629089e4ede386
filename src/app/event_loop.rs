use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model};

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; readme-studio requires an interactive terminal")?;
        let size = terminal.size()?;
        execute!(stdout(), EnableBracketedPaste)?;
        crate::markdown::install_render_panic_hook();

        let mut model = self.initial_model((size.width, size.height));
        self.start();
        tracing::info!(endpoint = %model.endpoint, "session started");

        let result = self.event_loop(&mut terminal, &mut model);

        let _ = execute!(stdout(), DisableBracketedPaste);
        ratatui::restore();
        tracing::info!("session ended");
        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            if self.poll_worker(model) {
                needs_render = true;
            }

            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                self.dispatch(model, Message::Resize(width, height));
                needs_render = true;
            }

            // Poll faster while a request is in flight so its result shows promptly.
            let poll_ms = if needs_render {
                0
            } else if resize_debouncer.is_pending() {
                10
            } else if model.generating {
                50
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                if let Some(msg) =
                    Self::handle_event(&event::read()?, model, event_ms, &mut resize_debouncer)
                {
                    tracing::trace!(?msg, "event");
                    self.dispatch(model, msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts and pastes into a single render.
                while event::poll(Duration::from_millis(0))? {
                    let drain_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    if let Some(msg) =
                        Self::handle_event(&event::read()?, model, drain_ms, &mut resize_debouncer)
                    {
                        self.dispatch(model, msg);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ResizeDebouncer;

    #[test]
    fn test_resize_debouncer_waits_for_delay() {
        let mut debouncer = ResizeDebouncer::new(100);
        debouncer.queue(120, 40, 1_000);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.take_ready(1_050), None);
        assert_eq!(debouncer.take_ready(1_100), Some((120, 40)));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_resize_debouncer_keeps_latest_size() {
        let mut debouncer = ResizeDebouncer::new(100);
        debouncer.queue(100, 30, 0);
        debouncer.queue(90, 20, 50);
        assert_eq!(debouncer.take_ready(120), None);
        assert_eq!(debouncer.take_ready(150), Some((90, 20)));
    }
}
