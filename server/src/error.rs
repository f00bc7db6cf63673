use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use interview_system::{ErrorBody, StoreError};
use thiserror::Error;

/// Failures surfaced to HTTP clients as `{error, message, statusCode}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("Session with ID '{0}' not found")]
    SessionNotFound(String),
    #[error("User with ID '{0}' not found in session")]
    UserNotFound(String),
    #[error("Session has reached maximum of {0} users")]
    SessionAtCapacity(usize),
    #[error("Failed to execute code: {0}")]
    ExecutionFailed(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::SessionNotFound(_) => "SESSION_NOT_FOUND",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::SessionAtCapacity(_) => "SESSION_AT_CAPACITY",
            Self::ExecutionFailed(_) => "EXECUTION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.code().to_string(),
            message: self.to_string(),
            status_code: self.status_code().as_u16(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SessionNotFound(id) => Self::SessionNotFound(id),
            StoreError::UserNotFound(id) => Self::UserNotFound(id),
            StoreError::SessionAtCapacity(max) => Self::SessionAtCapacity(max),
            err @ StoreError::IdSpaceExhausted => Self::Internal(err.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::SessionNotFound(_) | Self::UserNotFound(_) => StatusCode::NOT_FOUND,
            Self::SessionAtCapacity(_) => StatusCode::CONFLICT,
            Self::ExecutionFailed(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_should_map_store_errors_to_client_codes() {
        let err = ApiError::from(StoreError::SessionAtCapacity(10));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.body().error, "SESSION_AT_CAPACITY");
        assert_eq!(err.body().message, "Session has reached maximum of 10 users");

        let err = ApiError::from(StoreError::UserNotFound("u1234567".into()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.body().error, "USER_NOT_FOUND");
    }

    #[test]
    fn execution_failure_is_a_server_error() {
        let err = ApiError::ExecutionFailed("python3 is not available".into());
        let body = err.body();
        assert_eq!(body.status_code, 500);
        assert_eq!(body.error, "EXECUTION_ERROR");
        assert!(body.message.starts_with("Failed to execute code: "));
    }
}
