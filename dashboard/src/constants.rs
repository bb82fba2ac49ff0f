//! Central Configuration Constants
//!
//! Single source of truth for all dashboard defaults.
//! Runtime overrides are read in `logic::config`.

/// Default detection service URL (the vision web server)
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Status resource path, relative to the server URL
pub const STATUS_PATH: &str = "/api/status";

/// Default poll interval (milliseconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Default clock refresh interval (milliseconds)
pub const DEFAULT_CLOCK_INTERVAL_MS: u64 = 1000;

/// Animation frame interval for the terminal UI (milliseconds)
pub const FRAME_INTERVAL_MS: u64 = 33;

/// Maximum number of log lines kept in the log tail
pub const MAX_LOG_ENTRIES: usize = 30;

/// Default log file used while the terminal UI owns the screen
pub const DEFAULT_LOG_FILE: &str = "dashboard.log";

// ============================================
// Display strings
// ============================================

/// Indicator text before the first poll completes
pub const STATUS_CONNECTING: &str = "Connecting...";

/// Indicator text when the service reports no status of its own
pub const STATUS_CONNECTED: &str = "Connected";

/// Indicator text after a failed poll
pub const STATUS_DISCONNECTED: &str = "Disconnected";

pub const DETECTIONS_PLACEHOLDER: &str = "No objects detected";

pub const GUIDANCE_PLACEHOLDER: &str = "AI reasoning will appear here...";

pub const LOGS_PLACEHOLDER: &str = "No logs available.";

pub const DANGER_TAG: &str = "DANGER";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Vision Dashboard";
