//! Code execution adapter.
//!
//! Each language is delegated to an [`Evaluator`]. None of them is a security
//! boundary: code runs as a plain child process with the server's privileges.

mod decline;
mod node;
mod python;

pub use decline::{DeclineEvaluator, DECLINE_MESSAGE};
pub use node::NodeEvaluator;
pub use python::PythonEvaluator;

use async_trait::async_trait;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

use interview_system::{ExecuteCodeRequest, ExecutionResult, Language};

use crate::config::{ExecutionConfig, JavaScriptStrategy};

pub const NO_OUTPUT_MESSAGE: &str = "Code executed successfully (no output)";

/// What an evaluator captured from one run. Errors raised by the submitted
/// code land in `error`; they are not evaluator failures.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub output: String,
    pub error: Option<String>,
}

impl Evaluation {
    pub fn new(output: String, error: Option<String>) -> Self {
        let output = if output.is_empty() {
            NO_OUTPUT_MESSAGE.to_string()
        } else {
            output
        };
        Self { output, error }
    }

    pub fn timed_out(message: String) -> Self {
        Self {
            output: String::new(),
            error: Some(message),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("{runtime} is not available: {source}")]
    RuntimeUnavailable {
        runtime: String,
        #[source]
        source: io::Error,
    },
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    MalformedOutput(String),
}

impl ExecutionError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RuntimeUnavailable { .. } => "RuntimeUnavailable",
            Self::Io(_) => "IOError",
            Self::MalformedOutput(_) => "MalformedOutput",
        }
    }

    /// Failures of the execution machinery itself, as opposed to problems
    /// with a single run.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::RuntimeUnavailable { .. })
    }
}

#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(&self, code: &str, timeout: Duration) -> Result<Evaluation, ExecutionError>;
}

pub struct ExecutionService {
    python: Arc<dyn Evaluator>,
    javascript: Arc<dyn Evaluator>,
}

impl ExecutionService {
    pub fn new(python: Arc<dyn Evaluator>, javascript: Arc<dyn Evaluator>) -> Self {
        Self { python, javascript }
    }

    pub fn from_config(config: &ExecutionConfig) -> Self {
        let javascript: Arc<dyn Evaluator> = match config.javascript {
            JavaScriptStrategy::Node => Arc::new(NodeEvaluator::new(config.node_binary.clone())),
            JavaScriptStrategy::Decline => Arc::new(DeclineEvaluator),
        };
        Self::new(
            Arc::new(PythonEvaluator::new(config.python_binary.clone())),
            javascript,
        )
    }

    /// Runs the request's code. Only infrastructure failures come back as
    /// `Err`; everything else is reported inside the result.
    pub async fn execute(
        &self,
        request: &ExecuteCodeRequest,
    ) -> Result<ExecutionResult, ExecutionError> {
        let started = Instant::now();

        let language = match request.language.parse::<Language>() {
            Ok(language) => language,
            Err(_) => return Ok(ExecutionResult::unsupported(&request.language)),
        };
        let evaluator = match language {
            Language::Python => &self.python,
            Language::JavaScript | Language::TypeScript => &self.javascript,
        };

        log::debug!("Executing {} bytes of {}", request.code.len(), language);
        let timeout = Duration::from_millis(request.timeout_ms());
        match evaluator.evaluate(&request.code, timeout).await {
            Ok(evaluation) => Ok(ExecutionResult {
                output: evaluation.output,
                error: evaluation.error,
                execution_time: elapsed_ms(started),
            }),
            Err(err) if err.is_infrastructure() => {
                log::error!("Cannot execute {} code: {}", language, err);
                Err(err)
            }
            Err(err) => {
                log::warn!("Execution of {} code failed: {}", language, err);
                Ok(ExecutionResult::failed(
                    format!("{}: {}", err.kind(), err),
                    elapsed_ms(started),
                ))
            }
        }
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(fn() -> Result<Evaluation, ExecutionError>);

    #[async_trait]
    impl Evaluator for Fixed {
        async fn evaluate(&self, _: &str, _: Duration) -> Result<Evaluation, ExecutionError> {
            (self.0)()
        }
    }

    fn service(python: Fixed) -> ExecutionService {
        ExecutionService::new(Arc::new(python), Arc::new(DeclineEvaluator))
    }

    fn request(language: &str) -> ExecuteCodeRequest {
        ExecuteCodeRequest {
            code: "print(1)".into(),
            language: language.into(),
            timeout: 1000,
        }
    }

    #[tokio::test]
    async fn it_should_answer_unknown_language_with_error_result() {
        let service = service(Fixed(|| Ok(Evaluation::new("1".into(), None))));
        let result = service.execute(&request("cobol")).await.expect("");
        assert_eq!(result.output, "");
        assert_eq!(result.error.as_deref(), Some("Unsupported language: cobol"));
        assert_eq!(result.execution_time, 0.0);
    }

    #[tokio::test]
    async fn it_should_report_run_failures_as_data() {
        let service = service(Fixed(|| {
            Err(ExecutionError::MalformedOutput("no report".into()))
        }));
        let result = service.execute(&request("python")).await.expect("");
        assert_eq!(result.output, "");
        assert_eq!(result.error.as_deref(), Some("MalformedOutput: no report"));
    }

    #[tokio::test]
    async fn it_should_propagate_missing_runtime() {
        let service = service(Fixed(|| {
            Err(ExecutionError::RuntimeUnavailable {
                runtime: "python3".into(),
                source: io::Error::new(io::ErrorKind::NotFound, "not found"),
            })
        }));
        let err = service.execute(&request("python")).await.unwrap_err();
        assert!(err.is_infrastructure());
    }

    #[test]
    fn empty_output_is_replaced_by_notice() {
        assert_eq!(Evaluation::new(String::new(), None).output, NO_OUTPUT_MESSAGE);
    }
}
