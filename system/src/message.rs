//! Request and response bodies of the HTTP surface.

use crate::types::{Language, SessionUpdate, User, DEFAULT_CODE};
use serde::{Deserialize, Serialize};

pub const DEFAULT_EXECUTION_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub language: Language,
    #[serde(default = "default_code")]
    pub code: String,
}

impl Default for CreateSessionRequest {
    fn default() -> Self {
        Self {
            language: Language::default(),
            code: default_code(),
        }
    }
}

fn default_code() -> String {
    DEFAULT_CODE.to_string()
}

pub type UpdateSessionRequest = SessionUpdate;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoinSessionRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// `language` stays a free-form tag: unknown languages are answered with an
/// error result rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecuteCodeRequest {
    pub code: String,
    pub language: String,
    /// Milliseconds. Zero or negative means no caller limit.
    #[serde(default = "default_timeout")]
    pub timeout: i64,
}

impl ExecuteCodeRequest {
    /// Kill deadline for the run. A non-positive `timeout` gets the default.
    pub fn timeout_ms(&self) -> u64 {
        if self.timeout > 0 {
            self.timeout as u64
        } else {
            DEFAULT_EXECUTION_TIMEOUT_MS
        }
    }
}

fn default_timeout() -> i64 {
    DEFAULT_EXECUTION_TIMEOUT_MS as i64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_should_fill_create_request_defaults() {
        let request: CreateSessionRequest = serde_json::from_str("{}").expect("");
        assert_eq!(request, CreateSessionRequest::default());
        assert_eq!(request.language, Language::JavaScript);
        assert_eq!(request.code, DEFAULT_CODE);
    }

    #[test]
    fn it_should_default_execution_timeout() {
        let request: ExecuteCodeRequest =
            serde_json::from_str(r#"{"code":"print(1)","language":"python"}"#).expect("");
        assert_eq!(request.timeout_ms(), DEFAULT_EXECUTION_TIMEOUT_MS);
    }

    #[test]
    fn it_should_fall_back_to_default_for_non_positive_timeout() {
        for raw in &["0", "-1"] {
            let request: ExecuteCodeRequest = serde_json::from_str(&format!(
                r#"{{"code":"print(1)","language":"python","timeout":{}}}"#,
                raw
            ))
            .expect("");
            assert_eq!(request.timeout_ms(), DEFAULT_EXECUTION_TIMEOUT_MS);
        }

        let request: ExecuteCodeRequest =
            serde_json::from_str(r#"{"code":"","language":"python","timeout":250}"#).expect("");
        assert_eq!(request.timeout_ms(), 250);
    }

    #[test]
    fn it_should_reject_unknown_language_in_create_request() {
        assert!(serde_json::from_str::<CreateSessionRequest>(r#"{"language":"cobol"}"#).is_err());
    }

    #[test]
    fn error_body_uses_status_code_key() {
        let body = ErrorBody {
            error: "SESSION_NOT_FOUND".into(),
            message: "gone".into(),
            status_code: 404,
        };
        let value = serde_json::to_value(&body).expect("");
        assert_eq!(value["statusCode"], 404);
    }
}
