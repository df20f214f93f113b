//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::{InputMode, Panel};
use crate::models::{HistoryRecord, RequestState};

/// Severity of a status-line notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Short message shown in the status bar until replaced or dismissed
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Info, text: text.into() }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Error, text: text.into() }
    }
}

/// Text the UI layer should place on the clipboard.
///
/// `seq` increases with every copy so the UI writes each request once.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardRequest {
    pub seq: u64,
    pub text: String,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Form data
    pub form: RequestState,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub output_scroll: u16,
    pub is_loading: bool,

    // History, oldest first
    pub history: Vec<HistoryRecord>,
    pub selected_history: usize,

    pub notice: Option<Notice>,
    pub clipboard: Option<ClipboardRequest>,
    pub show_help: bool,
}
