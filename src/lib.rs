//! # Typeshot
//!
//! A terminal form for sending one HTTP request and turning the JSON it
//! returns into TypeScript declarations.
//!
//! ## Features
//! - HTTP methods: GET, POST, PUT, PATCH, DELETE
//! - Authorization field plus a JSON object of extra headers
//! - JSON request body (read-only for GET)
//! - Declarations accumulate across submissions in one session
//! - Last 10 responses kept in a persisted history
//! - Form and history survive restarts
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod clipboard;
pub mod config;
pub mod constants;
pub mod error;
pub mod inference;
pub mod messages;
pub mod models;
pub mod network;
pub mod storage;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use config::Config;
pub use error::{AdapterError, SubmitError};
pub use inference::{json_to_ts, JsonToTs, TypeInferrer};
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{HistoryRecord, HttpMethod, RequestPatch, RequestState};
pub use network::{HttpAdapter, NetworkActor, ReqwestAdapter};
pub use storage::{FormStore, HistoryStore, KvStore};
