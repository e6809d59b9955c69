use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::BackendConfig;
use crate::core::{AppError, Result};
use crate::modules::backend::models::{extract_records, ApiEnvelope};
use crate::modules::reports::models::{validate_client_id, PeriodFilter, ReportKind};
use crate::modules::sales::LineItem;

use super::sales_source::SalesSource;

/// Client for the Multi Stock Sync REST backend
pub struct BackendClient {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl BackendClient {
    /// Build a client with the configured request timeout
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base_url}/{segments...}`, each segment percent-encoded on its own
    pub fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| AppError::Configuration(format!("backend base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Configuration("backend base URL cannot take a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `url` and unwrap the response envelope into its `data`
    pub async fn get_data(&self, url: Url, query: &[(&str, String)]) -> Result<Value> {
        debug!(url = %url, params = ?query, "Backend request");

        let mut request = self.client.get(url.clone()).query(query);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            error!(url = %url, error = %e, "Backend request failed");
            AppError::HttpClient(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        // Error envelopes often come with 4xx/5xx, so parse before checking status
        let parsed: Option<Value> = serde_json::from_str(&body).ok();

        if !status.is_success() {
            let message = parsed
                .as_ref()
                .and_then(|v| v.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status));
            error!(url = %url, status = %status, message = %message, "Backend returned an error status");
            return Err(AppError::backend(message));
        }

        let body = parsed.ok_or_else(|| AppError::backend("response body is not valid JSON"))?;
        ApiEnvelope::from_body(body).into_data()
    }

    /// Reachability probe for the readiness endpoint: any HTTP answer counts
    pub async fn ping(&self) -> bool {
        match self.client.get(&self.base_url).send().await {
            Ok(_) => true,
            Err(e) => {
                error!(error = %e, "Backend unreachable");
                false
            }
        }
    }
}

#[async_trait]
impl SalesSource for BackendClient {
    async fn fetch_line_items(
        &self,
        client_id: &str,
        kind: ReportKind,
        period: &PeriodFilter,
    ) -> Result<Vec<LineItem>> {
        validate_client_id(client_id)?;

        let mut segments: Vec<&str> = kind.endpoint().split('/').collect();
        segments.push(client_id);
        let url = self.endpoint_url(&segments)?;

        let mut query = period.query_pairs();
        query.push(("client_id", client_id.to_string()));

        let data = self.get_data(url, &query).await?;
        let items: Vec<LineItem> = extract_records(data)
            .iter()
            .map(LineItem::from_json)
            .collect();

        info!(
            client_id = %client_id,
            kind = %kind,
            period = %period.label(),
            count = items.len(),
            "Fetched line items"
        );

        Ok(items)
    }

    fn name(&self) -> &str {
        "backend"
    }
}
