use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::modules::session::models::SelectedConnection;
use crate::modules::session::services::SessionService;

#[derive(Debug, Deserialize)]
pub struct SelectConnectionRequest {
    pub client_id: String,
    #[serde(default)]
    pub nickname: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConnectionResponse {
    pub connection: Option<SelectedConnection>,
}

/// GET /api/session/connection
pub async fn get_connection(session: web::Data<SessionService>) -> Result<HttpResponse> {
    let connection = session.selected_connection()?;
    Ok(HttpResponse::Ok().json(ConnectionResponse { connection }))
}

/// PUT /api/session/connection
pub async fn put_connection(
    session: web::Data<SessionService>,
    body: web::Json<SelectConnectionRequest>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    let connection = session.select_connection(&body.client_id, body.nickname)?;
    Ok(HttpResponse::Ok().json(ConnectionResponse {
        connection: Some(connection),
    }))
}

/// DELETE /api/session/connection
pub async fn delete_connection(session: web::Data<SessionService>) -> Result<HttpResponse> {
    session.clear_connection()?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/session
///
/// Logout: drops every session entry, not just the selected connection
pub async fn delete_session(session: web::Data<SessionService>) -> Result<HttpResponse> {
    session.clear()?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/session").route(web::delete().to(delete_session)));
    cfg.service(
        web::resource("/api/session/connection")
            .route(web::get().to(get_connection))
            .route(web::put().to(put_connection))
            .route(web::delete().to(delete_connection)),
    );
}
