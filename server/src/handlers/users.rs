use actix_web::{web, HttpResponse};

use interview_system::{JoinSessionRequest, SessionId, UserId, UsersResponse};

use crate::error::ApiError;
use crate::handlers::optional_json;
use crate::server::{ask, ServerTx, StoreCommand};

pub fn configure_user_handlers(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/sessions/{session_id}/users")
            .route(web::post().to(join))
            .route(web::get().to(list)),
    )
    .service(
        web::resource("/sessions/{session_id}/users/{user_id}").route(web::delete().to(leave)),
    );
}

async fn join(
    srv_tx: web::Data<ServerTx>,
    session_id: web::Path<SessionId>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let request: JoinSessionRequest = optional_json(&body)?;
    let user = ask(&srv_tx, |tx| StoreCommand::JoinSession {
        session_id: session_id.into_inner(),
        name: request.name,
        tx,
    })
    .await??;
    Ok(HttpResponse::Created().json(user))
}

async fn list(
    srv_tx: web::Data<ServerTx>,
    session_id: web::Path<SessionId>,
) -> Result<HttpResponse, ApiError> {
    let session_id = session_id.into_inner();
    let users = ask(&srv_tx, |tx| StoreCommand::ListUsers {
        session_id: session_id.clone(),
        tx,
    })
    .await?
    .ok_or(ApiError::SessionNotFound(session_id))?;
    Ok(HttpResponse::Ok().json(UsersResponse { users }))
}

async fn leave(
    srv_tx: web::Data<ServerTx>,
    path: web::Path<(SessionId, UserId)>,
) -> Result<HttpResponse, ApiError> {
    let (session_id, user_id) = path.into_inner();
    ask(&srv_tx, |tx| StoreCommand::LeaveSession {
        session_id,
        user_id,
        tx,
    })
    .await??;
    Ok(HttpResponse::NoContent().finish())
}
