//! Remote README generation service.
//!
//! The service takes `{"username": ...}` on `POST <endpoint>` and answers with
//! either `{"readme": ...}` or `{"error": ...}`. Any failure is reported as a
//! single [`GenerateError`]; callers never see partial content.

mod http;
mod worker;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use http::{ClientError, HttpGenerationClient, health_url};
pub use worker::{GenerationWorker, WorkerEvent};

/// Default generation endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/generate";

/// A trimmed, non-empty username.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UsernameError {
    #[error("please enter a GitHub username")]
    Empty,
}

impl Username {
    /// Trim `input` and reject it if nothing is left.
    ///
    /// # Errors
    ///
    /// Returns [`UsernameError::Empty`] for empty or whitespace-only input.
    pub fn parse(input: &str) -> Result<Self, UsernameError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(UsernameError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest<'a> {
    pub username: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub readme: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub generation_time: Option<f64>,
    #[serde(default)]
    pub cached: Option<bool>,
}

/// Generation failure, phrased for display.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    #[error("HTTP {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("{0}")]
    Remote(String),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("response did not contain a README")]
    MissingReadme,
    #[error("network error: {0}")]
    Network(String),
}

/// A successful generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedReadme {
    pub markdown: String,
    /// Server-reported generation time in seconds
    pub generation_time: Option<f64>,
    /// Whether the server started from an existing profile README
    pub cached: bool,
    /// Round trip measured by the client
    pub elapsed: Duration,
}

impl GeneratedReadme {
    /// Seconds to show the user: the server's figure, else the round trip.
    pub fn display_seconds(&self) -> f64 {
        self.generation_time
            .unwrap_or_else(|| self.elapsed.as_secs_f64())
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub cache_size: Option<u64>,
}

/// Something that can turn a username into README markdown.
pub trait GenerationClient: Send + Sync {
    /// Generate a README for `username`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] for transport failures, non-success statuses,
    /// error bodies and responses without README content.
    fn generate(&self, username: &Username) -> Result<GeneratedReadme, GenerateError>;

    /// Probe the service.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] when the service is unreachable or unhealthy.
    fn health(&self) -> Result<HealthStatus, GenerateError>;

    /// Endpoint shown in the status bar.
    fn endpoint(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_is_trimmed() {
        let name = Username::parse("  octocat \n").unwrap();
        assert_eq!(name.as_str(), "octocat");
        assert_eq!(name.to_string(), "octocat");
    }

    #[test]
    fn test_blank_username_is_rejected() {
        assert_eq!(Username::parse(""), Err(UsernameError::Empty));
        assert_eq!(Username::parse("   \t"), Err(UsernameError::Empty));
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GenerateRequest { username: "octocat" }).unwrap();
        assert_eq!(body, serde_json::json!({ "username": "octocat" }));
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let resp: GenerateResponse = serde_json::from_str(r#"{"readme": "hi"}"#).unwrap();
        assert_eq!(resp.readme.as_deref(), Some("hi"));
        assert!(resp.error.is_none());
        assert!(resp.generation_time.is_none());
    }

    #[test]
    fn test_display_seconds_prefers_server_time() {
        let mut readme = GeneratedReadme {
            markdown: "x".to_string(),
            generation_time: Some(1.25),
            cached: false,
            elapsed: Duration::from_millis(3000),
        };
        assert!((readme.display_seconds() - 1.25).abs() < f64::EPSILON);
        readme.generation_time = None;
        assert!((readme.display_seconds() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_error_messages_are_human_readable() {
        let err = GenerateError::Status {
            status: 400,
            detail: "Invalid GitHub username format".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 400: Invalid GitHub username format");
        assert_eq!(
            GenerateError::Remote("Username is required".to_string()).to_string(),
            "Username is required"
        );
    }
}
