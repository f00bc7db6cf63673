use actix_web::{web, HttpResponse};

use interview_system::ExecuteCodeRequest;

use crate::error::ApiError;
use crate::execution::ExecutionService;

pub fn configure_execute_handlers(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/execute").route(web::post().to(execute)));
}

async fn execute(
    service: web::Data<ExecutionService>,
    request: web::Json<ExecuteCodeRequest>,
) -> Result<HttpResponse, ApiError> {
    let result = service
        .execute(&request)
        .await
        .map_err(|err| ApiError::ExecutionFailed(err.to_string()))?;
    Ok(HttpResponse::Ok().json(result))
}
