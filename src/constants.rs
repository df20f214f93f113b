//! Application constants
//!
//! Centralized location for storage keys and configuration defaults.

/// Storage key for the persisted request form
pub const FORM_STATE_KEY: &str = "request-state";

/// Storage key for the persisted response history
pub const HISTORY_KEY: &str = "response-history";

/// Number of history records kept before the oldest is evicted
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// HTTP client timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Directory under the home directory holding persisted state and logs
pub const DATA_DIR_NAME: &str = ".typeshot";

/// Log file written inside the data directory
pub const LOG_FILE_NAME: &str = "typeshot.log";

/// Name given to the top-level inferred declaration
pub const ROOT_TYPE_NAME: &str = "RootObject";

/// Application name
pub const APP_NAME: &str = "Typeshot";
