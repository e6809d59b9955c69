//! Report view controller lifecycle against a stubbed sales source
//!
//! Covers the in-flight guard, the stale-response guard and the reset of
//! the view-model on failure.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;
use std::time::Duration;

use helpers::{sample_items, StubSource, CLIENT_ID};
use multistock_reports::config::StoreMapping;
use multistock_reports::modules::reports::models::PeriodFilter;
use multistock_reports::modules::reports::services::{FetchState, ReportViewController};
use multistock_reports::{AppError, ReportKind, ReportQuery, ReportService};
use rust_decimal_macros::dec;

fn controller(source: Arc<StubSource>, kind: ReportKind) -> Arc<ReportViewController> {
    let service = ReportService::new(source, Arc::new(StoreMapping::default()), 10);
    Arc::new(ReportViewController::new(kind, Arc::new(service)))
}

fn query(kind: ReportKind, year: i32) -> ReportQuery {
    ReportQuery::new(CLIENT_ID, kind, PeriodFilter::year(year))
}

/// Wait until the controller has entered `Loading`
async fn wait_for_loading(controller: &ReportViewController) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while controller.state().unwrap() != FetchState::Loading {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("controller never started loading");
}

/// A successful fetch replaces the view-model
#[tokio::test]
async fn test_refresh_publishes_view() {
    let source = Arc::new(StubSource::with_items(sample_items()));
    let controller = controller(source, ReportKind::SalesByCategory);

    let view = controller
        .refresh(query(ReportKind::SalesByCategory, 2024))
        .await
        .expect("refresh");

    let keys: Vec<&str> = view.groups.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec!["A", "B"]);
    assert_eq!(view.groups[0].total_amount, dec!(2500));
    assert_eq!(view.groups[1].total_amount, dec!(600));

    let snapshot = controller.snapshot().unwrap();
    assert_eq!(snapshot.state, FetchState::Ready);
    assert_eq!(snapshot.view.groups.len(), 2);
}

/// A fetch dropped before it completes (client gone, timeout) does not
/// leave the view stuck in `Loading`
#[tokio::test]
async fn test_dropped_fetch_releases_loading() {
    let source = Arc::new(StubSource::with_items(sample_items()));
    let gate = source.block_year(2024);
    let controller = controller(source.clone(), ReportKind::SalesByMonth);

    let timed_out = tokio::time::timeout(
        Duration::from_millis(50),
        controller.refresh(query(ReportKind::SalesByMonth, 2024)),
    )
    .await;
    assert!(timed_out.is_err());
    assert_eq!(controller.state().unwrap(), FetchState::Idle);

    gate.notify_one();
    let view = controller
        .refresh(query(ReportKind::SalesByMonth, 2024))
        .await
        .expect("retry after dropped fetch");
    assert_eq!(view.groups.len(), 1);
    assert_eq!(source.calls(), 2);
    assert_eq!(controller.state().unwrap(), FetchState::Ready);
}

/// A second identical fetch while the first is in flight is rejected
#[tokio::test]
async fn test_duplicate_fetch_is_rejected() {
    let source = Arc::new(StubSource::with_items(sample_items()));
    let gate = source.block_year(2024);
    let controller = controller(source.clone(), ReportKind::SalesByMonth);

    let first = tokio::spawn({
        let controller = controller.clone();
        async move { controller.refresh(query(ReportKind::SalesByMonth, 2024)).await }
    });
    wait_for_loading(&controller).await;

    let second = controller
        .refresh(query(ReportKind::SalesByMonth, 2024))
        .await;
    assert!(matches!(second, Err(AppError::Conflict(_))));

    gate.notify_one();
    let first = first.await.unwrap().expect("first fetch");
    assert_eq!(first.groups.len(), 1);
    assert_eq!(source.calls(), 1, "rejected fetch must not reach the backend");
}

/// A slow response for old filters never overwrites a newer view
#[tokio::test]
async fn test_stale_response_is_discarded() {
    let source = Arc::new(StubSource::new());
    source.set_items(Some(2023), sample_items()[..1].to_vec());
    source.set_items(Some(2024), sample_items());
    let gate = source.block_year(2023);
    let controller = controller(source, ReportKind::SalesByCategory);

    let slow = tokio::spawn({
        let controller = controller.clone();
        async move { controller.refresh(query(ReportKind::SalesByCategory, 2023)).await }
    });
    wait_for_loading(&controller).await;

    let fresh = controller
        .refresh(query(ReportKind::SalesByCategory, 2024))
        .await
        .expect("newer fetch");
    assert_eq!(fresh.groups.len(), 2);

    gate.notify_one();
    let stale = slow.await.unwrap();
    assert!(matches!(stale, Err(AppError::Conflict(_))));

    let snapshot = controller.snapshot().unwrap();
    assert_eq!(snapshot.state, FetchState::Ready);
    assert_eq!(
        snapshot.view.query.map(|q| q.period.year),
        Some(Some(2024)),
        "view must still belong to the newer query"
    );
    assert_eq!(snapshot.view.groups.len(), 2);
}

/// A failure records the message and resets the view-model
#[tokio::test]
async fn test_failure_resets_view() {
    let source = Arc::new(StubSource::with_items(sample_items()));
    let controller = controller(source.clone(), ReportKind::SalesByCategory);

    controller
        .refresh(query(ReportKind::SalesByCategory, 2024))
        .await
        .expect("first fetch");

    source.fail_with("Token expirado");
    let result = controller
        .refresh(query(ReportKind::SalesByCategory, 2023))
        .await;
    assert!(matches!(result, Err(AppError::Backend(_))));

    let snapshot = controller.snapshot().unwrap();
    assert_eq!(snapshot.state, FetchState::Error);
    assert!(snapshot.view.groups.is_empty());
    assert!(snapshot.error.unwrap().contains("Token expirado"));
}

/// Period comparison fetches both periods and compares their totals
#[tokio::test]
async fn test_period_comparison() {
    let source = Arc::new(StubSource::new());
    source.set_items(Some(2023), sample_items()[2..3].to_vec());
    source.set_items(Some(2024), sample_items()[..2].to_vec());
    let controller = controller(source, ReportKind::PeriodComparison);

    let view = controller
        .refresh(ReportQuery::comparison(
            CLIENT_ID,
            PeriodFilter::year(2023),
            PeriodFilter::year(2024),
        ))
        .await
        .expect("comparison");

    let comparison = view.comparison.expect("comparison result");
    assert_eq!(comparison.period_a.total_amount, dec!(600));
    assert_eq!(comparison.period_b.total_amount, dec!(2500));
    assert_eq!(comparison.difference, dec!(1900));
    assert_eq!(comparison.percentage_change, dec!(316.7));
}
