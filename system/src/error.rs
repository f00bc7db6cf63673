use crate::types::{SessionId, UserId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Session with ID '{0}' not found")]
    SessionNotFound(SessionId),
    #[error("User with ID '{0}' not found in session")]
    UserNotFound(UserId),
    #[error("Session has reached maximum of {0} users")]
    SessionAtCapacity(usize),
    #[error("could not allocate a unique identifier")]
    IdSpaceExhausted,
}
