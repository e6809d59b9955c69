use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    web, HttpRequest,
};

use crate::core::AppError;

/// Malformed query strings (e.g. `year=abc`) answer with the usual error
/// envelope instead of actix's plain-text 400
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(path = %req.path(), error = %err, "Rejected query string");
    AppError::validation(err.to_string()).into()
}

/// Same for JSON bodies
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(path = %req.path(), error = %err, "Rejected JSON body");
    AppError::validation(err.to_string()).into()
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}
