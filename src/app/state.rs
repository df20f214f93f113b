//! App state - the form, history and UI bookkeeping owned by the app actor

use crate::config::Config;
use crate::inference::{JsonToTs, TypeInferrer};
use crate::messages::render::{ClipboardRequest, Notice};
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::RenderState;
use crate::models::{HttpMethod, RequestPatch, RequestState};
use crate::storage::{FormStore, HistoryStore, KvStore};

/// The submission currently on the wire
#[derive(Clone, Debug)]
pub struct PendingRequest {
    pub id: u64,
    pub method: HttpMethod,
    pub url: String,
    /// Output text from before the submission cleared it
    pub prior_response: String,
}

/// Main application state
pub struct AppState {
    // Persisted data
    pub form: FormStore,
    pub history: HistoryStore,

    // Orchestration
    pub inferrer: Box<dyn TypeInferrer>,
    pub is_loading: bool,
    pub next_request_id: u64,
    pub pending: Option<PendingRequest>,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub output_scroll: u16,
    pub selected_history: usize,
    pub notice: Option<Notice>,
    pub clipboard: Option<ClipboardRequest>,
    pub next_copy_seq: u64,
    pub show_help: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let kv = KvStore::new(&config.data_dir);
        Self::with_stores(
            FormStore::load(kv.clone()),
            HistoryStore::with_capacity(kv, config.history_capacity),
        )
    }

    pub fn with_stores(form: FormStore, history: HistoryStore) -> Self {
        let selected_history = history.len().saturating_sub(1);
        AppState {
            form,
            history,
            inferrer: Box::new(JsonToTs),
            is_loading: false,
            next_request_id: 1,
            pending: None,
            active_panel: Panel::Url,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            output_scroll: 0,
            selected_history,
            notice: None,
            clipboard: None,
            next_copy_seq: 1,
            show_help: false,
        }
    }

    /// Swap the type inference adapter
    pub fn with_inferrer(mut self, inferrer: impl TypeInferrer + 'static) -> Self {
        self.inferrer = Box::new(inferrer);
        self
    }

    /// Current request form
    pub fn request(&self) -> &RequestState {
        self.form.get()
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Merge a patch into the form; a failed write is logged, not fatal
    pub fn update_form(&mut self, patch: RequestPatch) {
        if let Err(e) = self.form.set(patch) {
            tracing::warn!(error = %e, "Failed to persist request form");
        }
    }

    /// Get the current input field content
    pub fn current_input(&self) -> &str {
        match self.active_panel.field() {
            Some(field) => self.request().field(field),
            None => "",
        }
    }

    /// Whether the focused panel accepts edits right now
    pub fn can_edit_active(&self) -> bool {
        match self.active_panel {
            Panel::Url | Panel::Authorization | Panel::Header => true,
            Panel::Body => self.request().method.body_editable(),
            Panel::Output | Panel::History => false,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            form: self.request().clone(),
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            output_scroll: self.output_scroll,
            is_loading: self.is_loading,
            history: self.history.records().cloned().collect(),
            selected_history: self.selected_history,
            notice: self.notice.clone(),
            clipboard: self.clipboard.clone(),
            show_help: self.show_help,
        }
    }
}
