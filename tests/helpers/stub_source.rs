use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use multistock_reports::modules::reports::models::{PeriodFilter, ReportKind};
use multistock_reports::{AppError, LineItem, Result, SalesSource};

/// In-memory [`SalesSource`] with per-year responses, failures and gates
/// that hold a fetch until released
#[derive(Default)]
pub struct StubSource {
    items: Mutex<HashMap<Option<i32>, Vec<LineItem>>>,
    failure: Mutex<Option<String>>,
    gates: Mutex<HashMap<i32, Arc<Notify>>>,
    calls: AtomicUsize,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items returned for any period
    pub fn with_items(items: Vec<LineItem>) -> Self {
        let source = Self::new();
        source.set_items(None, items);
        source
    }

    /// Items returned for periods of `year`; `None` is the fallback
    pub fn set_items(&self, year: Option<i32>, items: Vec<LineItem>) {
        self.items.lock().unwrap().insert(year, items);
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    /// Fetches for `year` wait until the returned handle is notified
    pub fn block_year(&self, year: i32) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(year, gate.clone());
        gate
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SalesSource for StubSource {
    async fn fetch_line_items(
        &self,
        _client_id: &str,
        _kind: ReportKind,
        period: &PeriodFilter,
    ) -> Result<Vec<LineItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let gate = period
            .year
            .and_then(|year| self.gates.lock().unwrap().get(&year).cloned());
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(AppError::backend(message));
        }

        let items = self.items.lock().unwrap();
        Ok(items
            .get(&period.year)
            .or_else(|| items.get(&None))
            .cloned()
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "stub"
    }
}
