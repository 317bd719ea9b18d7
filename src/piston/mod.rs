//! # Execution Service Layer
//!
//! Trait and implementations for the remote code-execution API.
//!
//! ## Overview
//!
//! - [`Executor`] - Core trait for running one source file remotely
//! - [`PistonClient`] - Production executor speaking the Piston v2 API
//! - [`MockExecutor`] - Test executor with scripted responses
//!
//! ## Wire format
//!
//! ```text
//! POST /api/v2/piston/execute
//! { "language": "python3", "version": "*",
//!   "files": [ { "name": "Main.python", "content": "print(1)" } ] }
//!
//! 200 OK
//! { "language": "python", "version": "3.10.0",
//!   "run": { "stdout": "1\n", "stderr": "", "output": "1\n", "code": 0, "signal": null } }
//! ```
//!
//! ## Creating Executors
//!
//! ```rust
//! use runpad::config::PlaygroundConfig;
//! use runpad::piston::create_executor;
//!
//! let config = PlaygroundConfig::default();
//! assert!(create_executor("piston", &config).is_ok());
//! assert!(create_executor("mock", &config).is_ok());
//! assert!(create_executor("invalid", &config).is_err());
//! ```

mod client;
mod mock;

pub(crate) use client::parse_endpoint;
pub use client::{PistonClient, PISTON_API_URL};
pub use mock::MockExecutor;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::PlaygroundConfig;
use crate::error::{PlaygroundError, Result};
use crate::language;

/// Version wildcard meaning "latest available"
pub const ANY_VERSION: &str = "*";

/// Shown when the service reports no output
pub const NO_OUTPUT: &str = "No output";

/// Names accepted by [`create_executor`]
pub const EXECUTOR_NAMES: &[&str] = &["piston", "mock"];

// ============================================================================
// EXECUTOR TRAIT (ASYNC)
// ============================================================================

/// Runs an [`ExecutionRequest`] somewhere and reports what happened.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Short name (e.g. "piston", "mock")
    fn name(&self) -> &str;

    /// Execute one request. Every failure maps to a [`PlaygroundError`].
    async fn execute(&self, request: ExecutionRequest) -> Result<ExecutionResponse>;
}

// ============================================================================
// REQUEST/RESPONSE TYPES
// ============================================================================

/// Request body for the execute endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub language: String,
    pub version: String,
    pub files: Vec<SourceFile>,
}

/// One file of an execution request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

impl ExecutionRequest {
    /// Build the request for `code` written in playground language `language_id`.
    ///
    /// The API name comes from the registry (falling back to the identifier),
    /// the single file is named `Main.<language_id>`.
    pub fn for_source(language_id: &str, code: impl Into<String>) -> Self {
        Self {
            language: language::api_name(language_id).to_string(),
            version: ANY_VERSION.to_string(),
            files: vec![SourceFile {
                name: format!("Main.{}", language_id),
                content: code.into(),
            }],
        }
    }

    /// Name of the first (main) file
    pub fn file_name(&self) -> Option<&str> {
        self.files.first().map(|f| f.name.as_str())
    }
}

/// Response body of the execute endpoint.
///
/// Every field is optional so unexpected shapes still deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResponse {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub compile: Option<StageResult>,
    #[serde(default)]
    pub run: Option<StageResult>,
    /// Set by Piston instead of `run` when it rejects the request
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of the compile or run stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageResult {
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    /// Interleaved stdout + stderr
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub code: Option<i32>,
    #[serde(default)]
    pub signal: Option<String>,
}

impl ExecutionResponse {
    /// Response carrying only a run stage with `output`
    pub fn with_output(output: impl Into<String>) -> Self {
        Self {
            run: Some(StageResult {
                output: Some(output.into()),
                code: Some(0),
                ..StageResult::default()
            }),
            ..Self::default()
        }
    }

    /// The run stage's output, or [`NO_OUTPUT`] when absent or empty
    pub fn output_text(&self) -> &str {
        self.run
            .as_ref()
            .and_then(|run| run.output.as_deref())
            .filter(|out| !out.is_empty())
            .unwrap_or(NO_OUTPUT)
    }

    /// Exit code of the run stage, if reported
    pub fn exit_code(&self) -> Option<i32> {
        self.run.as_ref().and_then(|run| run.code)
    }
}

// ============================================================================
// EXECUTOR FACTORY
// ============================================================================

/// Create an executor by name
///
/// | Name | Description |
/// |------|-------------|
/// | `piston` | HTTP client for the configured endpoint |
/// | `mock` | Offline executor echoing a fixed output |
pub fn create_executor(name: &str, config: &PlaygroundConfig) -> Result<Arc<dyn Executor>> {
    match name.to_lowercase().as_str() {
        "piston" => Ok(Arc::new(PistonClient::new(&config.endpoint)?)),
        "mock" => Ok(Arc::new(MockExecutor::new())),
        _ => Err(PlaygroundError::UnknownExecutor {
            name: name.to_string(),
        }),
    }
}

// ============================================================================
// TESTS
// ============================================================================
