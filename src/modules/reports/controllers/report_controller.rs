use actix_web::{http::header, web, HttpResponse};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::core::{AppError, Result};
use crate::modules::exports::{ExportFormat, ReportExporter};
use crate::modules::reports::models::{
    AggregateGroup, PeriodComparison, PeriodFilter, ReportKind, ReportQuery, ReportTotals,
    ReportView,
};
use crate::modules::reports::services::ReportViews;
use crate::modules::session::SessionService;

/// Query parameters of a report fetch
#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    /// Falls back to the selected connection when absent
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
    /// Format: YYYY-MM-DD
    #[serde(default)]
    pub week_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub week_end_date: Option<NaiveDate>,
    /// Any day of the wanted week; expands to its Monday-Sunday bounds
    #[serde(default)]
    pub week_of: Option<NaiveDate>,
}

impl ReportParams {
    fn period(&self) -> PeriodFilter {
        if let Some(day) = self.week_of {
            return PeriodFilter {
                year: self.year,
                ..PeriodFilter::week_of(day)
            };
        }
        PeriodFilter {
            year: self.year,
            month: self.month,
            week_start_date: self.week_start_date,
            week_end_date: self.week_end_date,
        }
    }
}

/// Query parameters of the period comparison
#[derive(Debug, Deserialize)]
pub struct ComparisonParams {
    #[serde(default)]
    pub client_id: Option<String>,
    pub year_a: i32,
    #[serde(default)]
    pub month_a: Option<u32>,
    pub year_b: i32,
    #[serde(default)]
    pub month_b: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ExportParams {
    #[serde(default)]
    pub client_id: Option<String>,
    /// `xlsx` (default) or `pdf`
    #[serde(default)]
    pub format: Option<String>,
}

/// One row of a report response
#[derive(Debug, Serialize, Deserialize)]
pub struct GroupResponse {
    pub key: String,
    pub total_amount: Decimal,
    pub total_quantity: u64,
    pub item_count: usize,
    /// Percentage of the report's total amount
    pub share: Decimal,
}

/// Report view-model as returned by the API; contributing line items are
/// left out
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportResponse {
    pub kind: ReportKind,
    pub title: String,
    pub client_id: Option<String>,
    pub period: Option<String>,
    pub groups: Vec<GroupResponse>,
    pub totals: ReportTotals,
    pub comparison: Option<PeriodComparison>,
    pub generated_at: DateTime<Utc>,
}

impl GroupResponse {
    fn from_group(group: &AggregateGroup, grand_total: Decimal) -> Self {
        Self {
            key: group.key.clone(),
            total_amount: group.total_amount,
            total_quantity: group.total_quantity,
            item_count: group.item_count(),
            share: group
                .share_of(grand_total)
                .round_dp_with_strategy(1, rust_decimal::RoundingStrategy::MidpointAwayFromZero),
        }
    }
}

impl From<ReportView> for ReportResponse {
    fn from(view: ReportView) -> Self {
        let grand_total = view.totals.total_amount;
        Self {
            kind: view.kind,
            title: view.title,
            client_id: view.query.as_ref().map(|q| q.client_id.clone()),
            period: view.query.as_ref().map(|q| match &q.compare_to {
                Some(compared) => format!("{} vs {}", q.period.label(), compared.label()),
                None => q.period.label(),
            }),
            groups: view
                .groups
                .iter()
                .map(|g| GroupResponse::from_group(g, grand_total))
                .collect(),
            totals: view.totals,
            comparison: view.comparison,
            generated_at: view.generated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportKindResponse {
    pub kind: ReportKind,
    pub title: String,
}

fn parse_kind(raw: &str) -> Result<ReportKind> {
    raw.parse()
        .map_err(|_| AppError::not_found(format!("report '{}'", raw)))
}

/// GET /api/reports
pub async fn list_reports() -> HttpResponse {
    let kinds: Vec<ReportKindResponse> = ReportKind::ALL
        .iter()
        .map(|kind| ReportKindResponse {
            kind: *kind,
            title: kind.title().to_string(),
        })
        .collect();
    HttpResponse::Ok().json(kinds)
}

/// GET /api/reports/{kind}
///
/// Fetches the report from the backend and publishes it as the view-model
/// of (connection, kind). Answers 409 while the same query is loading.
pub async fn get_report(
    path: web::Path<String>,
    params: web::Query<ReportParams>,
    views: web::Data<ReportViews>,
    session: web::Data<SessionService>,
) -> Result<HttpResponse> {
    let kind = parse_kind(&path.into_inner())?;
    if kind == ReportKind::PeriodComparison {
        return Err(AppError::validation(
            "period-comparison takes year_a/month_a and year_b/month_b",
        ));
    }

    let client_id = session.resolve_client_id(params.client_id.as_deref())?;
    let query = ReportQuery::new(client_id.clone(), kind, params.period());

    let view = views
        .controller(&client_id, kind)?
        .refresh(query)
        .await
        .map_err(|e| {
            error!(kind = %kind, client_id = %client_id, error = %e, "Report request failed");
            e
        })?;

    Ok(HttpResponse::Ok().json(ReportResponse::from(view)))
}

/// GET /api/reports/period-comparison
pub async fn get_period_comparison(
    params: web::Query<ComparisonParams>,
    views: web::Data<ReportViews>,
    session: web::Data<SessionService>,
) -> Result<HttpResponse> {
    let params = params.into_inner();
    let client_id = session.resolve_client_id(params.client_id.as_deref())?;

    let baseline = PeriodFilter {
        year: Some(params.year_a),
        month: params.month_a,
        ..PeriodFilter::default()
    };
    let compared = PeriodFilter {
        year: Some(params.year_b),
        month: params.month_b,
        ..PeriodFilter::default()
    };
    let query = ReportQuery::comparison(client_id.clone(), baseline, compared);

    let view = views
        .controller(&client_id, ReportKind::PeriodComparison)?
        .refresh(query)
        .await?;

    Ok(HttpResponse::Ok().json(ReportResponse::from(view)))
}

/// GET /api/reports/{kind}/export
///
/// Renders the current view-model of (connection, kind); never triggers a
/// fetch. An empty view exports as a header-only or placeholder file.
pub async fn export_report(
    path: web::Path<String>,
    params: web::Query<ExportParams>,
    views: web::Data<ReportViews>,
    exporter: web::Data<ReportExporter>,
    session: web::Data<SessionService>,
) -> Result<HttpResponse> {
    let kind = parse_kind(&path.into_inner())?;
    let format: ExportFormat = params
        .format
        .as_deref()
        .unwrap_or("xlsx")
        .parse()
        .map_err(AppError::Validation)?;
    let client_id = session.resolve_client_id(params.client_id.as_deref())?;
    // Exporting a report that was never fetched must not register a view
    let controller = views.existing(&client_id, kind)?;

    // Rendering is CPU-bound
    let artifact = web::block(move || match controller {
        Some(controller) => controller.export(format, &exporter),
        None => exporter.export_view(&ReportView::empty(kind), format),
    })
        .await
        .map_err(|e| AppError::internal(format!("export task failed: {}", e)))??;

    Ok(HttpResponse::Ok()
        .content_type(artifact.content_type())
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.file_name),
        ))
        .body(artifact.bytes))
}

/// Configure report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/reports")
            .route("", web::get().to(list_reports))
            // Must precede the `{kind}` route
            .route("/period-comparison", web::get().to(get_period_comparison))
            .route("/{kind}", web::get().to(get_report))
            .route("/{kind}/export", web::get().to(export_report)),
    );
}
