//! Dashboard Configuration
//!
//! Defaults come from `crate::constants`; every field can be overridden
//! through `DASHBOARD_*` environment variables (a `.env` file is loaded
//! by `main` before this runs).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::constants;

/// Feature set of the engine.
///
/// `Basic` is the plain dashboard: every successful poll re-renders the
/// detection list and the log tail is not shown at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    #[default]
    Full,
    Basic,
}

impl Profile {
    pub fn change_detection(self) -> bool {
        matches!(self, Profile::Full)
    }

    pub fn log_tail(self) -> bool {
        matches!(self, Profile::Full)
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(Profile::Full),
            "basic" | "simple" => Ok(Profile::Basic),
            other => Err(format!("unknown profile '{}'", other)),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Full => write!(f, "full"),
            Profile::Basic => write!(f, "basic"),
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL of the detection service
    pub server_url: String,
    /// Status poll period
    pub poll_interval: Duration,
    /// Clock display refresh period
    pub clock_interval: Duration,
    /// Per-request timeout; `None` lets a hung fetch hang
    pub request_timeout: Option<Duration>,
    pub profile: Profile,
    /// Drop completions older than the newest applied one
    pub discard_stale: bool,
    /// Log region changes instead of drawing the terminal UI
    pub headless: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            server_url: constants::DEFAULT_SERVER_URL.to_string(),
            poll_interval: Duration::from_millis(constants::DEFAULT_POLL_INTERVAL_MS),
            clock_interval: Duration::from_millis(constants::DEFAULT_CLOCK_INTERVAL_MS),
            request_timeout: None,
            profile: Profile::Full,
            discard_stale: false,
            headless: false,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Malformed values are reported and replaced by their default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let server_url = lookup("DASHBOARD_SERVER_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.server_url);

        let poll_interval = lookup("DASHBOARD_POLL_INTERVAL_MS")
            .and_then(|s| parse_millis("DASHBOARD_POLL_INTERVAL_MS", &s))
            .unwrap_or(defaults.poll_interval);

        let clock_interval = lookup("DASHBOARD_CLOCK_INTERVAL_MS")
            .and_then(|s| parse_millis("DASHBOARD_CLOCK_INTERVAL_MS", &s))
            .unwrap_or(defaults.clock_interval);

        let request_timeout = lookup("DASHBOARD_REQUEST_TIMEOUT_MS")
            .and_then(|s| parse_millis("DASHBOARD_REQUEST_TIMEOUT_MS", &s));

        let profile = match lookup("DASHBOARD_PROFILE") {
            Some(s) => s.parse().unwrap_or_else(|e| {
                log::warn!("DASHBOARD_PROFILE: {}, using {}", e, defaults.profile);
                defaults.profile
            }),
            None => defaults.profile,
        };

        let discard_stale = lookup("DASHBOARD_DISCARD_STALE")
            .map(|s| parse_flag(&s))
            .unwrap_or(defaults.discard_stale);

        // same rule `main` uses to pick the log sink
        let headless = LogSink::from_lookup(&lookup) == LogSink::Stderr;

        Self {
            server_url,
            poll_interval,
            clock_interval,
            request_timeout,
            profile,
            discard_stale,
            headless,
        }
    }

    /// Full URL of the status resource
    pub fn status_url(&self) -> String {
        format!("{}{}", self.server_url.trim_end_matches('/'), constants::STATUS_PATH)
    }
}

/// Destination of the console log channel.
///
/// Resolved from the environment before the logger exists, so parsing
/// here never logs. The log file only matters outside headless mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    /// Headless mode
    Stderr,
    /// The terminal UI owns stdout
    File(PathBuf),
}

impl LogSink {
    pub fn from_env() -> Self {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let headless = lookup("DASHBOARD_HEADLESS")
            .map(|s| parse_flag(&s))
            .unwrap_or(false);

        if headless {
            LogSink::Stderr
        } else {
            LogSink::File(log_file_from(lookup))
        }
    }
}

fn log_file_from<F>(lookup: &F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    lookup("DASHBOARD_LOG_FILE")
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_LOG_FILE))
}

fn parse_millis(key: &str, raw: &str) -> Option<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) => {
            log::warn!("{}: interval must be positive, using default", key);
            None
        }
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(e) => {
            log::warn!("{}: invalid value '{}' ({}), using default", key, raw, e);
            None
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
