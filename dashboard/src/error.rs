//! Error handling

use thiserror::Error;

pub type DashboardResult<T> = Result<T, DashboardError>;

/// Startup and frontend failures. Poll failures never surface here;
/// they are recovered inside the tick (see `logic::client::FetchError`).
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
