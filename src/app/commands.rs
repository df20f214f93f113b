//! Command handlers - business logic for processing UI events

use crate::app::submit::{accumulate, build_outgoing};
use crate::app::state::{AppState, PendingRequest};
use crate::error::SubmitError;
use crate::messages::render::{ClipboardRequest, Notice};
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{HistoryRecord, HttpMethod, RequestPatch};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        self.input_mode = InputMode::Normal;
        self.active_panel = self.active_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.input_mode = InputMode::Normal;
        self.active_panel = self.active_panel.prev();
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        if !self.can_edit_active() {
            if self.active_panel == Panel::Body {
                self.notice = Some(Notice::info("GET requests have no body"));
            }
            return;
        }
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.current_input().len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if self.input_mode != InputMode::Editing || !self.can_edit_active() {
            return;
        }
        let Some(field) = self.active_panel.field() else {
            return;
        };
        let cursor_pos = self.cursor_position;
        let mut input = self.request().field(field).to_string();
        if cursor_pos <= input.len() {
            input.insert(cursor_pos, c);
            self.cursor_position = cursor_pos + c.len_utf8();
            self.update_form(RequestPatch::field(field, input));
        }
    }

    pub fn delete_char(&mut self) {
        if self.input_mode != InputMode::Editing || !self.can_edit_active() {
            return;
        }
        let Some(field) = self.active_panel.field() else {
            return;
        };
        if self.cursor_position > 0 {
            let cursor_pos = self.cursor_position;
            let mut input = self.request().field(field).to_string();
            let prev_pos = input[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor_position = prev_pos;
            self.update_form(RequestPatch::field(field, input));
        }
    }

    // ========================
    // HTTP Method
    // ========================

    pub fn cycle_method(&mut self) {
        let next = self.request().method.next();
        self.update_form(RequestPatch::method(next));
        if self.active_panel == Panel::Body && !next.body_editable() {
            self.input_mode = InputMode::Normal;
        }
    }

    // ========================
    // Output and history panels
    // ========================

    pub fn scroll_up(&mut self) {
        match self.active_panel {
            Panel::History => self.selected_history = self.selected_history.saturating_sub(1),
            _ => self.output_scroll = self.output_scroll.saturating_sub(1),
        }
    }

    pub fn scroll_down(&mut self) {
        match self.active_panel {
            Panel::History => {
                if self.selected_history + 1 < self.history.len() {
                    self.selected_history += 1;
                }
            }
            _ => self.output_scroll = self.output_scroll.saturating_add(1),
        }
    }

    pub fn copy_output(&mut self) {
        let text = self.request().response.clone();
        self.copy_to_clipboard(text);
    }

    pub fn copy_history(&mut self) {
        match self.history.get(self.selected_history) {
            Some(record) => {
                let text = record.response.clone();
                self.copy_to_clipboard(text);
            }
            None => self.notice = Some(Notice::info("History is empty")),
        }
    }

    fn copy_to_clipboard(&mut self, text: String) {
        let seq = self.next_copy_seq;
        self.next_copy_seq += 1;
        self.clipboard = Some(ClipboardRequest { seq, text });
        self.notice = Some(Notice::success("Copied"));
    }

    /// Load the selected history entry's method and URL back into the form
    pub fn recall_history(&mut self) {
        let Some(record) = self.history.get(self.selected_history) else {
            self.notice = Some(Notice::info("History is empty"));
            return;
        };
        let method = HttpMethod::parse(&record.method).unwrap_or_default();
        let url = record.url.clone();
        self.cursor_position = url.len();
        self.update_form(RequestPatch {
            url: Some(url),
            method: Some(method),
            ..Default::default()
        });
        self.active_panel = Panel::Url;
        self.notice = Some(Notice::info("Request recalled from history"));
    }

    // ========================
    // Popups and notices
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // ========================
    // Request sending
    // ========================

    /// Start a submission; `None` if nothing should go on the wire
    pub fn prepare_request(&mut self) -> Option<NetworkCommand> {
        if self.is_loading {
            self.notice = Some(Notice::info("A request is already in flight"));
            return None;
        }

        let request = match build_outgoing(self.request()) {
            Ok(request) => request,
            Err(SubmitError::EmptyUrl) => {
                self.notice = Some(Notice::error(SubmitError::EmptyUrl.to_string()));
                self.active_panel = Panel::Url;
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Rejected submission");
                self.notice = Some(Notice::error(e.to_string()));
                self.update_form(RequestPatch::failure(e.to_string()));
                self.output_scroll = 0;
                return None;
            }
        };

        // Failure text is replaced, never built upon
        let prior_response = if self.request().response_is_error {
            String::new()
        } else {
            self.request().response.clone()
        };
        self.update_form(RequestPatch::response(""));
        self.output_scroll = 0;

        let id = self.next_id();
        self.is_loading = true;
        self.pending = Some(PendingRequest {
            id,
            method: request.method,
            url: request.url.clone(),
            prior_response,
        });
        self.notice = Some(Notice::info("Sending..."));

        Some(NetworkCommand::Execute { id, request })
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        let pending = match self.pending.take() {
            Some(p) if p.id == response.id() => p,
            other => {
                tracing::debug!(id = response.id(), "Ignoring response for a stale request");
                self.pending = other;
                return;
            }
        };
        self.is_loading = false;

        match response {
            NetworkResponse::Success { data, time_ms, .. } => {
                let declarations = self.inferrer.infer(&data);
                let text = accumulate(&pending.prior_response, &declarations);
                self.update_form(RequestPatch::response(text.clone()));

                let record = HistoryRecord::new(pending.method, pending.url, text);
                if let Err(e) = self.history.append(record) {
                    tracing::warn!(error = %e, "Failed to persist history");
                }
                self.selected_history = self.history.len().saturating_sub(1);
                self.notice = Some(Notice::success(format!(
                    "Inferred {} declaration(s) in {} ms",
                    declarations.len(),
                    time_ms
                )));
            }
            NetworkResponse::Failure { error, time_ms, .. } => {
                self.update_form(RequestPatch::failure(error.failure_text()));
                self.notice = Some(Notice::error(format!(
                    "Request failed after {} ms: {}",
                    time_ms, error
                )));
            }
        }
    }
}
