use actix_web::{web, HttpResponse};

use interview_system::{CreateSessionRequest, SessionId, UpdateSessionRequest};

use crate::error::ApiError;
use crate::handlers::optional_json;
use crate::server::{ask, ServerTx, StoreCommand};

pub fn configure_session_handlers(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/sessions").route(web::post().to(create)))
        .service(
            web::resource("/sessions/{session_id}")
                .route(web::get().to(get))
                .route(web::patch().to(update))
                .route(web::delete().to(delete)),
        );
}

async fn create(
    srv_tx: web::Data<ServerTx>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let request: CreateSessionRequest = optional_json(&body)?;
    let session = ask(&srv_tx, |tx| StoreCommand::CreateSession {
        language: request.language,
        code: request.code,
        tx,
    })
    .await??;
    Ok(HttpResponse::Created().json(session))
}

async fn get(
    srv_tx: web::Data<ServerTx>,
    session_id: web::Path<SessionId>,
) -> Result<HttpResponse, ApiError> {
    let session_id = session_id.into_inner();
    let session = ask(&srv_tx, |tx| StoreCommand::GetSession {
        session_id: session_id.clone(),
        tx,
    })
    .await?
    .ok_or(ApiError::SessionNotFound(session_id))?;
    Ok(HttpResponse::Ok().json(session))
}

async fn update(
    srv_tx: web::Data<ServerTx>,
    session_id: web::Path<SessionId>,
    update: web::Json<UpdateSessionRequest>,
) -> Result<HttpResponse, ApiError> {
    let session_id = session_id.into_inner();
    let update = update.into_inner();

    if update.is_empty() {
        let exists = ask(&srv_tx, |tx| StoreCommand::GetSession {
            session_id: session_id.clone(),
            tx,
        })
        .await?
        .is_some();
        return Err(if exists {
            ApiError::InvalidRequest(
                "At least one field (code, language, or status) must be provided".into(),
            )
        } else {
            ApiError::SessionNotFound(session_id)
        });
    }

    let session = ask(&srv_tx, |tx| StoreCommand::UpdateSession {
        session_id: session_id.clone(),
        update,
        tx,
    })
    .await?
    .ok_or(ApiError::SessionNotFound(session_id))?;
    Ok(HttpResponse::Ok().json(session))
}

async fn delete(
    srv_tx: web::Data<ServerTx>,
    session_id: web::Path<SessionId>,
) -> Result<HttpResponse, ApiError> {
    let session_id = session_id.into_inner();
    let deleted = ask(&srv_tx, |tx| StoreCommand::DeleteSession {
        session_id: session_id.clone(),
        tx,
    })
    .await?;
    if deleted {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(ApiError::SessionNotFound(session_id))
    }
}
