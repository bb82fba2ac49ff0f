//! Status API Client
//!
//! HTTP client for the detection service's status resource.

use std::future::Future;

use thiserror::Error;

use super::config::DashboardConfig;
use super::payload::{DecodeError, StatusPayload};
use crate::error::DashboardError;

/// Fetch failures. The operator only ever sees "Disconnected";
/// the variants exist for the console log.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server error: HTTP {0}")]
    Status(u16),
    #[error("Parse error: {0}")]
    Decode(#[from] DecodeError),
}

/// Anything the poll loop can fetch a status document from
pub trait StatusSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<StatusPayload, FetchError>> + Send;
}

/// Status API client
pub struct StatusClient {
    status_url: String,
    http_client: reqwest::Client,
}

impl StatusClient {
    /// Create new status client
    pub fn new(config: &DashboardConfig) -> Result<Self, DashboardError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| DashboardError::HttpClient(e.to_string()))?;

        Ok(Self {
            status_url: config.status_url(),
            http_client,
        })
    }

    pub fn status_url(&self) -> &str {
        &self.status_url
    }

    /// GET the status resource and decode it
    pub async fn fetch_status(&self) -> Result<StatusPayload, FetchError> {
        let response = self
            .http_client
            .get(&self.status_url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(StatusPayload::from_slice(&body)?)
    }
}

impl StatusSource for StatusClient {
    fn fetch(&self) -> impl Future<Output = Result<StatusPayload, FetchError>> + Send {
        self.fetch_status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    async fn spawn_server(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(server_url: String) -> StatusClient {
        let config = DashboardConfig {
            server_url,
            ..Default::default()
        };
        StatusClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_ok() {
        let app = Router::new().route(
            "/api/status",
            get(|| async {
                Json(json!({
                    "status": "Running",
                    "detections": [{"label": "knife", "confidence": 0.87, "is_dangerous": true}],
                    "guidance": "Stop"
                }))
            }),
        );
        let client = client_for(spawn_server(app).await);

        let payload = client.fetch_status().await.unwrap();

        assert_eq!(payload.status.as_deref(), Some("Running"));
        assert_eq!(payload.detections[0].label, "knife");
        assert_eq!(payload.guidance.as_deref(), Some("Stop"));
    }

    #[tokio::test]
    async fn test_fetch_non_ok_status() {
        let app = Router::new().route(
            "/api/status",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "warming up") }),
        );
        let client = client_for(spawn_server(app).await);

        let err = client.fetch_status().await.unwrap_err();
        assert!(matches!(err, FetchError::Status(503)));
    }

    #[tokio::test]
    async fn test_fetch_unknown_route_is_status_error() {
        let client = client_for(spawn_server(Router::new()).await);

        let err = client.fetch_status().await.unwrap_err();
        assert!(matches!(err, FetchError::Status(404)));
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let app = Router::new().route("/api/status", get(|| async { "definitely not json" }));
        let client = client_for(spawn_server(app).await);

        let err = client.fetch_status().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(DecodeError::Json(_))));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{}", addr));

        let err = client.fetch_status().await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }

    #[test]
    fn test_status_url_from_config() {
        let client = client_for("http://vision.local:8000/".to_string());
        assert_eq!(client.status_url(), "http://vision.local:8000/api/status");
    }
}
