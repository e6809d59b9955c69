use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use multistock_reports::config::Config;
use multistock_reports::core::traits::KeyValueStore;
use multistock_reports::middleware::RequestId;
use multistock_reports::modules::{self, session};
use multistock_reports::{BackendClient, ReportExporter, ReportService, ReportViews, SessionService};

fn init_tracing(default_filter: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(
        &config.log_filter(),
        config.app.log_format.eq_ignore_ascii_case("json"),
    );
    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::info!("Starting Multi Stock Sync reporting service");
    tracing::info!(env = %config.app.env, backend = %config.backend.base_url, "Configuration loaded");

    let store_mapping = config
        .load_store_mapping()
        .context("Failed to load store mapping")?;
    tracing::info!(connections = store_mapping.len(), "Store mapping loaded");

    let backend = Arc::new(BackendClient::new(&config.backend).context("Failed to build backend client")?);
    let service = Arc::new(ReportService::new(
        backend.clone(),
        Arc::new(store_mapping),
        config.reports.top_limit,
    ));
    let views = web::Data::new(ReportViews::with_capacity(service, config.reports.max_views));
    let exporter = web::Data::new(ReportExporter::new(
        config.reports.currency,
        config.reports.rows_per_page,
        Some(config.reports.footer.clone()),
    ));

    let store: Arc<dyn KeyValueStore> = match &config.reports.session_store_path {
        Some(path) => Arc::new(
            session::JsonFileStore::open(path).context("Failed to open session store")?,
        ),
        None => Arc::new(session::MemoryStore::new()),
    };
    let session = web::Data::new(SessionService::new(store));
    let backend = web::Data::from(backend);

    let bind_address = config.server.bind_address();
    let allowed_origin = config.server.allowed_origin.clone();
    let workers = config.server.workers;

    let server = HttpServer::new(move || {
        let cors = match &allowed_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header()
                .expose_headers(["content-disposition", "x-request-id"]),
            None => Cors::permissive(),
        };

        App::new()
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(views.clone())
            .app_data(exporter.clone())
            .app_data(session.clone())
            .app_data(backend.clone())
            .configure(modules::configure)
    })
    .workers(workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}
