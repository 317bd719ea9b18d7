//! Piston HTTP client
//!
//! Posts execution requests to a Piston v2 `/execute` endpoint.
//! Defaults to the public instance at emkc.org.

use async_trait::async_trait;
use url::Url;

use super::{ExecutionRequest, ExecutionResponse, Executor};
use crate::error::{PlaygroundError, Result};

/// Public Piston endpoint
pub const PISTON_API_URL: &str = "https://emkc.org/api/v2/piston/execute";

/// Executor backed by a Piston HTTP endpoint
pub struct PistonClient {
    /// HTTP client
    client: reqwest::Client,
    /// Full URL of the execute route
    endpoint: Url,
}

impl PistonClient {
    /// Create a client for `endpoint` (must be an absolute http(s) URL)
    pub fn new(endpoint: &str) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: parse_endpoint(endpoint)?,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

/// Validate an endpoint string
pub(crate) fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint).map_err(|e| PlaygroundError::InvalidEndpoint {
        url: endpoint.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(PlaygroundError::InvalidEndpoint {
            url: endpoint.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

#[async_trait]
impl Executor for PistonClient {
    fn name(&self) -> &str {
        "piston"
    }

    async fn execute(&self, request: ExecutionRequest) -> Result<ExecutionResponse> {
        tracing::debug!(
            executor = "piston",
            endpoint = %self.endpoint,
            language = %request.language,
            file = request.file_name().unwrap_or_default(),
            bytes = request.files.iter().map(|f| f.content.len()).sum::<usize>(),
            "Sending execution request"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                executor = "piston",
                status = %status,
                body = %body,
                "Execution service returned an error status"
            );
            return Err(PlaygroundError::Http {
                status: status.as_u16(),
                body,
            });
        }

        // Read as text first so a bad body reports a parse error, not a transport one
        let body = response.text().await?;
        let parsed: ExecutionResponse = serde_json::from_str(&body)?;

        tracing::debug!(
            executor = "piston",
            exit_code = ?parsed.exit_code(),
            has_output = parsed.run.as_ref().and_then(|r| r.output.as_ref()).is_some(),
            "Execution response received"
        );

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_endpoint() {
        let client = PistonClient::new(PISTON_API_URL).unwrap();
        assert_eq!(client.name(), "piston");
        assert_eq!(client.endpoint(), PISTON_API_URL);
    }

    #[test]
    fn test_custom_endpoint() {
        let client = PistonClient::new("http://localhost:2000/api/v2/execute").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:2000/api/v2/execute");
    }

    #[test]
    fn test_rejects_relative_url() {
        let err = PistonClient::new("/api/v2/execute").err().unwrap();
        assert!(matches!(err, PlaygroundError::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = parse_endpoint("ftp://example.com/execute").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    }
}
