use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::modules::backend::BackendClient;

/// Health check response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}

/// Readiness probe response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: ReadinessChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessChecks {
    pub backend: bool,
    pub application: bool,
}

/// GET /health - Liveness probe
/// Does not check the backend
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /ready - Readiness probe
/// Ready once the reporting backend answers at all
pub async fn readiness_check(backend: web::Data<BackendClient>) -> impl Responder {
    let backend_ok = backend.ping().await;
    let response = ReadinessResponse {
        ready: backend_ok,
        checks: ReadinessChecks {
            backend: backend_ok,
            application: true,
        },
    };

    if response.ready {
        HttpResponse::Ok().json(response)
    } else {
        tracing::warn!(backend = backend.base_url(), "Readiness check failed");
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(readiness_check));
}
