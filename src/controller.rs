//! Run Controller
//!
//! Sends one execution request, bounds it with a timeout, and reduces the
//! response or failure into the text shown in the output panel.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::PlaygroundConfig;
use crate::error::{PlaygroundError, Result};
use crate::piston::{create_executor, ExecutionRequest, ExecutionResponse, Executor};
use crate::session::Session;

/// Prefix of every failed run's output
pub const ERROR_PREFIX: &str = "Error: ";

/// How a run settled
#[derive(Debug)]
pub enum RunOutcome {
    Completed(ExecutionResponse),
    Failed(PlaygroundError),
}

impl RunOutcome {
    /// Execution Result text: the run output, `No output`, or `Error: <message>`
    pub fn display_text(&self) -> String {
        match self {
            Self::Completed(response) => response.output_text().to_string(),
            Self::Failed(err) => format!("{}{}", ERROR_PREFIX, err),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Issues execution requests against an [`Executor`]
#[derive(Clone)]
pub struct RunController {
    executor: Arc<dyn Executor>,
    timeout: Duration,
}

impl RunController {
    pub fn new(executor: Arc<dyn Executor>, timeout: Duration) -> Self {
        Self { executor, timeout }
    }

    /// Build the executor named in `config` and use its timeout
    pub fn from_config(config: &PlaygroundConfig) -> Result<Self> {
        let executor = create_executor(&config.executor, config)?;
        Ok(Self::new(executor, config.timeout()))
    }

    pub fn executor_name(&self) -> &str {
        self.executor.name()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Execute one request. Never retries.
    pub async fn execute(&self, request: ExecutionRequest) -> RunOutcome {
        let language = request.language.clone();
        let started = Instant::now();

        let result = match tokio::time::timeout(self.timeout, self.executor.execute(request)).await {
            Ok(result) => result,
            Err(_) => Err(PlaygroundError::Timeout {
                after: self.timeout,
            }),
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match result {
            Ok(response) => {
                tracing::info!(
                    executor = self.executor.name(),
                    language = %language,
                    elapsed_ms,
                    exit_code = ?response.exit_code(),
                    "Run completed"
                );
                RunOutcome::Completed(response)
            }
            Err(err) => {
                tracing::warn!(
                    executor = self.executor.name(),
                    language = %language,
                    elapsed_ms,
                    error = %err,
                    "Run failed"
                );
                RunOutcome::Failed(err)
            }
        }
    }

    /// Start, await and settle a run on `session` in one step.
    ///
    /// Returns `None` without sending anything when the session is busy.
    pub async fn run_session(&self, session: &mut Session) -> Option<RunOutcome> {
        let (ticket, request) = session.begin_run()?;
        let outcome = self.execute(request).await;
        session.finish_run(ticket, &outcome);
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piston::MockExecutor;

    fn controller_with(mock: Arc<MockExecutor>, timeout: Duration) -> RunController {
        RunController::new(mock, timeout)
    }

    #[tokio::test]
    async fn test_successful_run_sets_output() {
        let mock = Arc::new(MockExecutor::new());
        mock.queue_response(ExecutionResponse::with_output("Hello, World!\n"));
        let controller = controller_with(mock.clone(), Duration::from_secs(5));

        let mut session = Session::new("python");
        session.edit_code("print(\"Hello, World!\")");

        let outcome = controller.run_session(&mut session).await.unwrap();

        assert!(outcome.is_success());
        assert_eq!(session.output(), "Hello, World!\n");
        assert!(!session.is_busy());

        let request = mock.last_request().unwrap();
        assert_eq!(request.language, "python3");
        assert_eq!(request.file_name(), Some("Main.python"));
        assert_eq!(request.version, "*");
    }

    #[tokio::test]
    async fn test_missing_run_gives_no_output() {
        let mock = Arc::new(MockExecutor::new().with_default(ExecutionResponse::default()));
        let controller = controller_with(mock, Duration::from_secs(5));
        let mut session = Session::new("ruby");

        controller.run_session(&mut session).await.unwrap();
        assert_eq!(session.output(), "No output");
    }

    #[tokio::test]
    async fn test_network_failure_is_prefixed() {
        let mock = Arc::new(MockExecutor::new());
        mock.queue_failure("timeout");
        let controller = controller_with(mock, Duration::from_secs(5));
        let mut session = Session::new("javascript");

        let outcome = controller.run_session(&mut session).await.unwrap();

        assert!(!outcome.is_success());
        assert_eq!(session.output(), "Error: timeout");
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_javascript_and_other_languages_share_error_format() {
        for lang in ["javascript", "go"] {
            let mock = Arc::new(MockExecutor::new());
            mock.queue_failure("connection refused");
            let controller = controller_with(mock, Duration::from_secs(5));
            let mut session = Session::new(lang);

            controller.run_session(&mut session).await.unwrap();
            assert_eq!(session.output(), "Error: connection refused");
        }
    }

    #[tokio::test]
    async fn test_slow_executor_times_out() {
        let mock = Arc::new(MockExecutor::new().with_delay(Duration::from_millis(500)));
        let controller = controller_with(mock, Duration::from_millis(20));
        let mut session = Session::new("c");

        let outcome = controller.run_session(&mut session).await.unwrap();

        assert!(matches!(
            outcome,
            RunOutcome::Failed(PlaygroundError::Timeout { .. })
        ));
        assert_eq!(session.output(), "Error: Execution timed out after 20ms");
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_busy_session_is_not_run() {
        let mock = Arc::new(MockExecutor::new());
        let controller = controller_with(mock.clone(), Duration::from_secs(5));
        let mut session = Session::new("python");
        let _pending = session.begin_run().unwrap();

        assert!(controller.run_session(&mut session).await.is_none());
        assert!(mock.get_requests().is_empty());
        assert!(session.is_busy());
    }

    #[test]
    fn test_from_config_uses_configured_executor() {
        let config = PlaygroundConfig {
            executor: "mock".to_string(),
            timeout_secs: 7,
            ..PlaygroundConfig::default()
        };
        let controller = RunController::from_config(&config).unwrap();
        assert_eq!(controller.executor_name(), "mock");
        assert_eq!(controller.timeout(), Duration::from_secs(7));
    }
}
