//! Backend client against a mock Multi Stock Sync API

use std::time::Duration;

use multistock_reports::config::BackendConfig;
use multistock_reports::modules::reports::models::PeriodFilter;
use multistock_reports::{AppError, BackendClient, ReportKind, SalesSource};
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> BackendClient {
    let mut config = BackendConfig::new(format!("{}/api/", server.uri()));
    config.api_token = Some("secret".to_string());
    BackendClient::new(&config).expect("client")
}

/// Success envelope: records are parsed and the period goes out as query params
#[tokio::test]
async fn test_fetch_line_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/mercadolibre/sales-by-category/42"))
        .and(query_param("year", "2024"))
        .and(query_param("month", "03"))
        .and(query_param("client_id", "42"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": [
                { "title": "Polera", "quantity": 2, "unit_price": "1500", "category": "Ropa" },
                { "title": "Gorro", "quantity": "1", "price": 990 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let items = client(&server)
        .fetch_line_items("42", ReportKind::SalesByCategory, &PeriodFilter::month(2024, 3))
        .await
        .expect("fetch");

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].subtotal(), dec!(3000));
    assert_eq!(items[0].category.as_deref(), Some("Ropa"));
    assert_eq!(items[1].unit_price, dec!(990));
}

/// Grouped `data` objects are flattened into one record list
#[tokio::test]
async fn test_grouped_data_is_flattened() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/mercadolibre/sales-by-month/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {
                "2024-01": [{ "title": "A", "quantity": 1, "unit_price": 10 }],
                "2024-02": [{ "title": "B", "quantity": 1, "unit_price": 20 }]
            }
        })))
        .mount(&server)
        .await;

    let items = client(&server)
        .fetch_line_items("42", ReportKind::SalesByMonth, &PeriodFilter::year(2024))
        .await
        .expect("fetch");

    assert_eq!(items.len(), 2);
}

/// An error envelope surfaces the backend's message
#[tokio::test]
async fn test_error_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "message": "Conexión no encontrada"
        })))
        .mount(&server)
        .await;

    let result = client(&server)
        .fetch_line_items("42", ReportKind::TopProducts, &PeriodFilter::default())
        .await;

    match result {
        Err(AppError::Backend(message)) => assert_eq!(message, "Conexión no encontrada"),
        other => panic!("expected backend error, got {:?}", other),
    }
}

/// Non-2xx statuses become backend errors, with the body message when present
#[tokio::test]
async fn test_http_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/mercadolibre/daily-sales/42"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": "error",
            "message": "Token expirado"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/mercadolibre/annual-sales/42"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let backend = client(&server);

    let unauthorized = backend
        .fetch_line_items("42", ReportKind::SalesByDay, &PeriodFilter::default())
        .await;
    assert!(matches!(unauthorized, Err(AppError::Backend(ref m)) if m == "Token expirado"));

    let server_error = backend
        .fetch_line_items("42", ReportKind::SalesByYear, &PeriodFilter::default())
        .await;
    assert!(matches!(server_error, Err(AppError::Backend(ref m)) if m.contains("500")));
}

/// Connection ids that could escape the report path never reach the backend
#[tokio::test]
async fn test_path_traversal_client_id_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": [{ "title": "LEAK" }]
        })))
        .expect(0)
        .mount(&server)
        .await;

    let backend = client(&server);
    for id in ["../../admin/secret", "42/../../admin", "..", "42?admin=1"] {
        let result = backend
            .fetch_line_items(id, ReportKind::SalesByMonth, &PeriodFilter::default())
            .await;
        assert!(
            matches!(result, Err(AppError::Validation(_))),
            "{} was not rejected",
            id
        );
    }
}

/// Requests that exceed the configured timeout fail instead of hanging
#[tokio::test]
async fn test_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "success", "data": [] }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut config = BackendConfig::new(server.uri());
    config.timeout_secs = 1;
    let backend = BackendClient::new(&config).expect("client");

    let result = backend
        .fetch_line_items("42", ReportKind::SalesByDay, &PeriodFilter::default())
        .await;
    assert!(matches!(result, Err(AppError::HttpClient(_))));
}

/// Any HTTP answer counts as reachable
#[tokio::test]
async fn test_ping() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(client(&server).ping().await);
}
