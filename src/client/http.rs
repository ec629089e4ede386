use std::time::{Duration, Instant};

use reqwest::Url;
use reqwest::blocking::{Client, Response};
use thiserror::Error;

use super::{
    GenerateError, GenerateRequest, GenerateResponse, GeneratedReadme, GenerationClient,
    HealthStatus, Username,
};

/// Failure while setting up the HTTP client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid endpoint URL {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// [`GenerationClient`] over blocking `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpGenerationClient {
    client: Client,
    endpoint: Url,
    endpoint_text: String,
    health: Url,
}

impl HttpGenerationClient {
    /// Build a client for `endpoint`. `timeout` of `None` waits indefinitely.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the endpoint is not a URL or the TLS
    /// backend cannot be initialized.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let parse = |url: &str| {
            Url::parse(url).map_err(|err| ClientError::InvalidEndpoint {
                url: url.to_string(),
                reason: err.to_string(),
            })
        };
        let endpoint_url = parse(endpoint)?;
        let health = parse(&health_url(endpoint))?;

        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint_url,
            endpoint_text: endpoint.to_string(),
            health,
        })
    }

    pub const fn user_agent() -> &'static str {
        concat!("readme-studio/", env!("CARGO_PKG_VERSION"))
    }

    fn read_body(response: Response) -> Result<(u16, bool, Vec<u8>), GenerateError> {
        let status = response.status();
        let bytes = response.bytes().map_err(network_error)?;
        Ok((status.as_u16(), status.is_success(), bytes.to_vec()))
    }
}

impl GenerationClient for HttpGenerationClient {
    fn generate(&self, username: &Username) -> Result<GeneratedReadme, GenerateError> {
        let started = Instant::now();
        tracing::debug!(endpoint = %self.endpoint, %username, "requesting README");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&GenerateRequest {
                username: username.as_str(),
            })
            .send()
            .map_err(network_error)?;
        let (status, success, body) = Self::read_body(response)?;
        let elapsed = started.elapsed();

        let result = interpret_generate(status, success, &body, elapsed);
        match &result {
            Ok(readme) => tracing::info!(
                %username,
                bytes = readme.markdown.len(),
                elapsed_ms = elapsed.as_millis(),
                "README generated"
            ),
            Err(err) => tracing::warn!(%username, status, error = %err, "generation failed"),
        }
        result
    }

    fn health(&self) -> Result<HealthStatus, GenerateError> {
        let response = self
            .client
            .get(self.health.clone())
            .send()
            .map_err(network_error)?;
        let (status, success, body) = Self::read_body(response)?;
        if !success {
            return Err(GenerateError::Status {
                status,
                detail: error_detail(status, &body),
            });
        }
        serde_json::from_slice(&body).map_err(|err| GenerateError::Malformed(err.to_string()))
    }

    fn endpoint(&self) -> &str {
        &self.endpoint_text
    }
}

/// Health URL for a generation endpoint: a trailing `/generate` becomes
/// `/health`, anything else gets `/health` appended.
pub fn health_url(endpoint: &str) -> String {
    let trimmed = endpoint.trim_end_matches('/');
    trimmed.strip_suffix("/generate").map_or_else(
        || format!("{trimmed}/health"),
        |base| format!("{base}/health"),
    )
}

fn network_error(err: reqwest::Error) -> GenerateError {
    let detail = if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        "could not connect to the generation service".to_string()
    } else {
        err.to_string()
    };
    GenerateError::Network(detail)
}

fn error_detail(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<GenerateResponse>(body)
        .ok()
        .and_then(|resp| resp.error)
        .filter(|msg| !msg.trim().is_empty())
        .or_else(|| {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|code| code.canonical_reason())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "request failed".to_string())
}

fn interpret_generate(
    status: u16,
    success: bool,
    body: &[u8],
    elapsed: Duration,
) -> Result<GeneratedReadme, GenerateError> {
    if !success {
        return Err(GenerateError::Status {
            status,
            detail: error_detail(status, body),
        });
    }

    let response: GenerateResponse =
        serde_json::from_slice(body).map_err(|err| GenerateError::Malformed(err.to_string()))?;

    if let Some(message) = response.error {
        return Err(GenerateError::Remote(message));
    }

    let markdown = response
        .readme
        .filter(|readme| !readme.trim().is_empty())
        .ok_or(GenerateError::MissingReadme)?;

    Ok(GeneratedReadme {
        markdown,
        generation_time: response.generation_time,
        cached: response.cached.unwrap_or(false),
        elapsed,
    })
}
