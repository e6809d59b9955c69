pub mod backend;
pub mod exports;
pub mod health;
pub mod reports;
pub mod sales;
pub mod session;

use actix_web::web;

use crate::middleware::{json_config, query_config};

/// Register every route plus the extractor configs that keep error
/// responses in the JSON envelope. Application data is registered by the
/// caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(query_config()).app_data(json_config());
    health::configure(cfg);
    reports::controllers::configure(cfg);
    session::controllers::configure(cfg);
}
