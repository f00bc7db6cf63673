use actix_web::web;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::handlers::execute::configure_execute_handlers;
use crate::handlers::health::configure_health_handlers;
use crate::handlers::sessions::configure_session_handlers;
use crate::handlers::users::configure_user_handlers;

mod execute;
mod health;
mod sessions;
mod users;

pub const API_PREFIX: &str = "/api/v1";

pub fn root(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope(API_PREFIX)
            .configure(configure_session_handlers)
            .configure(configure_user_handlers)
            .configure(configure_execute_handlers)
            .configure(configure_health_handlers),
    );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _| ApiError::InvalidRequest(err.to_string()).into())
}

/// Parses a body that clients may leave out entirely. An empty body and a
/// literal `null` both mean all defaults.
fn optional_json<T: DeserializeOwned + Default>(body: &web::Bytes) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice::<Option<T>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|err| ApiError::InvalidRequest(err.to_string()))
}
