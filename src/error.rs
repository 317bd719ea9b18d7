//! Error types with fix suggestions

use std::time::Duration;

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

pub type Result<T> = std::result::Result<T, PlaygroundError>;

/// Every failure the playground can surface.
///
/// Execution failures (network, status, body, timeout) are all rendered the
/// same way in the output panel; the variants only exist so the CLI can
/// print a useful fix hint.
#[derive(Error, Debug)]
pub enum PlaygroundError {
    // ─────────────────────────────────────────────────────────────
    // Execution errors
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Network(String),

    #[error("Request failed with status code {status}{}", format_body(.body))]
    Http { status: u16, body: String },

    #[error("Malformed response from execution service: {0}")]
    InvalidResponse(String),

    #[error("Execution timed out after {after:?}")]
    Timeout { after: Duration },

    // ─────────────────────────────────────────────────────────────
    // Setup errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    #[error("Invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Cannot infer language for '{path}'")]
    UnknownLanguage { path: String },

    #[error("Unknown executor: '{name}'. Available: piston, mock")]
    UnknownExecutor { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_body(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        format!(": {}", body)
    }
}

impl From<reqwest::Error> for PlaygroundError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Http {
                status: status.as_u16(),
                body: String::new(),
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PlaygroundError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}

impl FixSuggestion for PlaygroundError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            PlaygroundError::Network(_) => Some("Check your network connection and the --endpoint URL"),
            PlaygroundError::Http { status, .. } if *status == 429 => {
                Some("The public Piston API is rate limited, wait a moment and retry")
            }
            PlaygroundError::Http { .. } => Some("Check the endpoint points at a Piston /execute route"),
            PlaygroundError::InvalidResponse(_) => {
                Some("The endpoint did not answer with Piston JSON, check --endpoint")
            }
            PlaygroundError::Timeout { .. } => Some("Raise the limit with --timeout or RUNPAD_TIMEOUT_SECS"),
            PlaygroundError::Config { .. } => Some("Fix or remove ~/.config/runpad/config.toml"),
            PlaygroundError::InvalidEndpoint { .. } => Some("Use an absolute http:// or https:// URL"),
            PlaygroundError::UnknownLanguage { .. } => {
                Some("Pass --language explicitly (see `runpad languages`)")
            }
            PlaygroundError::UnknownExecutor { .. } => Some("Use --executor piston or --executor mock"),
            PlaygroundError::Io(_) => Some("Check file path and permissions"),
        }
    }
}
