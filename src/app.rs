//! Application state and the request dispatch lifecycle.
//!
//! The event loop stays synchronous; generation calls run on the tokio
//! runtime and report back over a channel. Every outcome carries the id it
//! was dispatched with, and only the outcome matching the latest id is
//! applied. Mode switches and resubmits bump the id, so an orphaned call can
//! still finish but can never overwrite newer state.

use std::sync::mpsc::{self, Receiver, Sender};

use tokio::runtime::Handle;

use crate::agent::{AgentClient, AgentError, GENERIC_ERROR};
use crate::clipboard::ClipboardService;
use crate::config::Config;
use crate::form::FormState;
use crate::mode::{build_payload, FieldDescriptor, FieldKind, Mode};
use crate::ui_state::{ResultView, UIState};

/// What a finished generation call sends back to the UI loop.
pub struct DispatchOutcome {
    pub id: u64,
    pub result: Result<String, AgentError>,
}

pub struct App {
    pub mode: Mode,
    pub form: FormState,
    pub ui: UIState,
    /// Index into the current mode's field schema.
    pub focus: usize,
    pub scroll_offset: u16,
    /// F2 toggle: show the agent's markdown verbatim instead of rendered.
    pub show_raw_markdown: bool,
    pub status_message: Option<String>,
    status_set_at: u64,
    status_timeout_ticks: u64,
    pub clipboard: ClipboardService,
    pub animation_tick: u64,
    /// Id of the most recent dispatch; outcomes with any other id are stale.
    latest_request: u64,
    client: AgentClient,
    runtime: Handle,
    tx: Sender<DispatchOutcome>,
    rx: Receiver<DispatchOutcome>,
    scroll_step: u16,
}

impl App {
    pub fn new(config: &Config, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            mode: Mode::default(),
            form: FormState::new(),
            ui: UIState::default(),
            focus: 0,
            scroll_offset: 0,
            show_raw_markdown: false,
            status_message: None,
            status_set_at: 0,
            status_timeout_ticks: config.status_timeout_ticks,
            clipboard: ClipboardService::default(),
            animation_tick: 0,
            latest_request: 0,
            client: AgentClient::new(&config.base_url),
            runtime,
            tx,
            rx,
            scroll_step: config.scroll_step,
        }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn focused_field(&self) -> &'static FieldDescriptor {
        &self.mode.spec().fields[self.focus]
    }

    // --- mode switching ---

    pub fn select_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.focus = 0;
        self.scroll_offset = 0;
        // Any in-flight call now answers to an old id and will be dropped
        // when it lands. The form keeps its values.
        self.latest_request += 1;
        self.ui = UIState::Idle;
    }

    pub fn next_mode(&mut self) {
        self.select_mode(self.mode.next());
    }

    pub fn prev_mode(&mut self) {
        self.select_mode(self.mode.prev());
    }

    // --- form editing ---

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.mode.spec().fields.len();
    }

    pub fn focus_prev(&mut self) {
        let len = self.mode.spec().fields.len();
        self.focus = (self.focus + len - 1) % len;
    }

    /// Type into the focused field. Integer fields accept digits only; select
    /// fields are not typed into at all.
    pub fn input_char(&mut self, c: char) {
        let field = self.focused_field();
        match field.kind {
            FieldKind::Text | FieldKind::CommaList => self.form.push_char(field.name, c),
            FieldKind::Integer { .. } => {
                if c.is_ascii_digit() {
                    self.form.push_char(field.name, c);
                }
            }
            FieldKind::Select { .. } => {}
        }
    }

    pub fn backspace(&mut self) {
        let field = self.focused_field();
        if !matches!(field.kind, FieldKind::Select { .. }) {
            self.form.pop_char(field.name);
        }
    }

    /// Paste goes through `input_char` so per-field filtering still applies.
    /// Newlines become spaces; these are single-line fields.
    pub fn paste(&mut self, text: &str) {
        for c in text.chars() {
            match c {
                '\r' => {}
                '\n' => self.input_char(' '),
                c => self.input_char(c),
            }
        }
    }

    pub fn cycle_option(&mut self, step: i64) {
        let field = self.focused_field();
        if let Some(next) = field.cycle_option(self.form.value(field.name), step) {
            self.form.set(field.name, next);
        }
    }

    // --- dispatch lifecycle ---

    /// Validate, build the payload and fire the generation call. Refused
    /// while a call is already loading; the submit control is disabled then.
    pub fn submit(&mut self) {
        if self.ui.is_loading() {
            return;
        }
        if let Err(msg) = self.form.validate(self.mode) {
            self.set_status(msg);
            return;
        }
        let Some(payload) = build_payload(self.mode, &self.form) else {
            // Unreachable after validate, but never forward a bad payload.
            tracing::error!("payload build failed after validation passed");
            return;
        };

        let id = self.begin_request();
        let client = self.client.clone();
        let mode = self.mode;
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = client.generate(mode, payload).await;
            let _ = tx.send(DispatchOutcome { id, result });
        });
    }

    fn begin_request(&mut self) -> u64 {
        self.latest_request += 1;
        self.ui = UIState::Loading;
        self.scroll_offset = 0;
        self.latest_request
    }

    /// Apply any finished calls. Called once per tick from the event loop.
    pub fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: DispatchOutcome) {
        if outcome.id != self.latest_request {
            tracing::debug!(
                "dropping stale response (id {}, latest {})",
                outcome.id,
                self.latest_request
            );
            return;
        }
        match outcome.result {
            Ok(text) => self.ui = UIState::Success(text),
            Err(e) => {
                tracing::warn!("generation failed: {e}");
                self.ui = UIState::Error(GENERIC_ERROR.to_string());
            }
        }
    }

    // --- output panel ---

    /// Copy the current result to the clipboard. Does nothing unless the
    /// panel is showing output.
    pub fn copy_result(&mut self) {
        let text = match self.ui.result_view() {
            ResultView::Output(text) => text.to_string(),
            _ => return,
        };
        if !self.clipboard.copy(&text) {
            self.set_status("Clipboard unavailable".to_string());
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(self.scroll_step);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(self.scroll_step);
    }

    // --- status line ---

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_set_at = self.animation_tick;
    }

    pub fn tick(&mut self) {
        self.animation_tick = self.animation_tick.wrapping_add(1);
        if self.status_message.is_some()
            && self.animation_tick.saturating_sub(self.status_set_at) >= self.status_timeout_ticks
        {
            self.status_message = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> (tokio::runtime::Runtime, App) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let app = App::new(&Config::default(), rt.handle().clone());
        (rt, app)
    }

    #[test]
    fn test_form_values_survive_mode_switch() {
        let (_rt, mut app) = test_app();
        app.input_char('A');
        app.input_char('I');
        assert_eq!(app.form.value("topic"), "AI");

        app.select_mode(Mode::Ideas);
        app.select_mode(Mode::Post);
        assert_eq!(app.form.value("topic"), "AI");
    }

    #[test]
    fn test_mode_switch_resets_to_idle() {
        let (_rt, mut app) = test_app();
        app.ui = UIState::Success("old post".to_string());
        app.scroll_offset = 12;

        app.select_mode(Mode::Plan);

        assert_eq!(app.ui, UIState::Idle);
        assert_eq!(app.scroll_offset, 0);
        assert_eq!(app.focus, 0);
    }

    #[test]
    fn test_stale_outcome_discarded() {
        let (_rt, mut app) = test_app();
        let first = app.begin_request();
        let second = app.begin_request();
        assert!(second > first);

        app.apply_outcome(DispatchOutcome {
            id: first,
            result: Ok("too late".to_string()),
        });
        assert_eq!(app.ui, UIState::Loading);

        app.apply_outcome(DispatchOutcome {
            id: second,
            result: Ok("fresh".to_string()),
        });
        assert_eq!(app.ui, UIState::Success("fresh".to_string()));
    }

    #[test]
    fn test_outcome_after_mode_switch_discarded() {
        let (_rt, mut app) = test_app();
        let id = app.begin_request();
        app.select_mode(Mode::Ideas);

        app.apply_outcome(DispatchOutcome {
            id,
            result: Ok("post content".to_string()),
        });

        assert_eq!(app.ui, UIState::Idle);
    }

    #[test]
    fn test_error_outcome_shows_generic_message() {
        let (_rt, mut app) = test_app();
        let id = app.begin_request();

        app.apply_outcome(DispatchOutcome {
            id,
            result: Err(AgentError::Http(500)),
        });

        assert_eq!(app.ui, UIState::Error(GENERIC_ERROR.to_string()));
        assert_eq!(app.ui.result_view(), ResultView::Error(GENERIC_ERROR));
    }

    #[test]
    fn test_submit_blocked_by_validation() {
        let (_rt, mut app) = test_app();
        // Default topic is empty, so Post cannot be submitted.
        app.submit();

        assert_eq!(app.ui, UIState::Idle);
        assert!(app.status_message.as_deref().unwrap().contains("Topic"));
    }

    #[test]
    fn test_submit_refused_while_loading() {
        let (_rt, mut app) = test_app();
        app.form.set("topic", "x");
        let before = app.begin_request();

        app.submit();

        assert_eq!(app.latest_request, before);
        assert_eq!(app.ui, UIState::Loading);
    }

    #[test]
    fn test_integer_field_accepts_digits_only() {
        let (_rt, mut app) = test_app();
        app.select_mode(Mode::Ideas);
        app.focus_next(); // niche -> count
        assert_eq!(app.focused_field().name, "count");

        app.backspace(); // clear the "5" default
        app.paste("1a0\n");
        assert_eq!(app.form.value("count"), "10");
    }

    #[test]
    fn test_typing_into_select_ignored() {
        let (_rt, mut app) = test_app();
        app.focus_next(); // topic -> platform
        app.input_char('z');
        app.backspace();
        assert_eq!(app.form.value("platform"), "LinkedIn");

        app.cycle_option(1);
        assert_eq!(app.form.value("platform"), "Twitter / X");
        app.cycle_option(-1);
        assert_eq!(app.form.value("platform"), "LinkedIn");
    }

    #[test]
    fn test_copy_does_nothing_without_output() {
        let (_rt, mut app) = test_app();
        app.ui = UIState::Error("e".to_string());
        app.copy_result();
        assert!(!app.clipboard.copied());
    }

    #[test]
    fn test_status_message_expires() {
        let (_rt, mut app) = test_app();
        app.set_status("hello".to_string());
        for _ in 0..Config::default().status_timeout_ticks {
            app.tick();
        }
        assert!(app.status_message.is_none());
    }
}
