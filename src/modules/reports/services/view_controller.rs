use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

use crate::core::{AppError, Result};
use crate::modules::exports::{ExportArtifact, ExportFormat, ReportExporter};
use crate::modules::reports::models::{ReportKind, ReportQuery, ReportView};

use super::report_service::ReportService;

/// Lifecycle of one report view: `Idle → Loading → (Ready | Error)`, with
/// `Ready`/`Error` re-entering `Loading` on the next fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchState {
    Idle,
    Loading,
    Ready,
    Error,
}

/// Identifies one fetch; only the latest issued token may apply its result
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// What happened to a finished fetch
#[derive(Debug)]
pub enum Completion {
    /// The view-model was replaced
    Applied(ReportView),
    /// The view-model was reset to empty and the error recorded
    Failed(AppError),
    /// A newer fetch was started meanwhile; the result was dropped
    Stale,
}

/// Point-in-time copy of a controller's state
#[derive(Debug, Clone, Serialize)]
pub struct ControllerSnapshot {
    pub state: FetchState,
    pub view: ReportView,
    pub error: Option<String>,
}

struct ControllerState {
    state: FetchState,
    view: ReportView,
    error: Option<String>,
    /// Last issued token
    current: u64,
    in_flight: Option<ReportQuery>,
    /// State to fall back to when the in-flight fetch is abandoned
    settled: FetchState,
}

/// Issued token of a running [`ReportViewController::refresh`]. Dropping it
/// before the fetch completes (client disconnect, timeout) releases the
/// `Loading` state.
struct PendingFetch<'a> {
    controller: &'a ReportViewController,
    token: RequestToken,
    completed: bool,
}

impl PendingFetch<'_> {
    fn complete(mut self, outcome: Result<ReportView>) -> Result<Completion> {
        self.completed = true;
        self.controller.complete(self.token, outcome)
    }
}

impl Drop for PendingFetch<'_> {
    fn drop(&mut self) {
        if !self.completed {
            self.controller.abandon(self.token);
        }
    }
}

/// Owns the view-model of one report for one connection.
///
/// The mutex only guards state transitions and is never held while the
/// backend is being called.
pub struct ReportViewController {
    kind: ReportKind,
    service: Arc<ReportService>,
    state: Mutex<ControllerState>,
}

impl ReportViewController {
    pub fn new(kind: ReportKind, service: Arc<ReportService>) -> Self {
        Self {
            kind,
            service,
            state: Mutex::new(ControllerState {
                state: FetchState::Idle,
                view: ReportView::empty(kind),
                error: None,
                current: 0,
                in_flight: None,
                settled: FetchState::Idle,
            }),
        }
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    fn lock(&self) -> Result<MutexGuard<'_, ControllerState>> {
        self.state
            .lock()
            .map_err(|_| AppError::internal("report controller state poisoned"))
    }

    /// Enter `Loading` for `query` and issue its token.
    ///
    /// Fails with `Conflict` while the same query is already loading; a
    /// different query supersedes the in-flight one.
    pub fn begin(&self, query: &ReportQuery) -> Result<RequestToken> {
        let mut state = self.lock()?;

        if state.state == FetchState::Loading && state.in_flight.as_ref() == Some(query) {
            return Err(AppError::conflict(format!(
                "{} is already loading for connection {}",
                self.kind, query.client_id
            )));
        }

        if let Some(previous) = &state.in_flight {
            debug!(kind = %self.kind, superseded = %previous.period.label(), "Superseding in-flight fetch");
        }

        if state.state != FetchState::Loading {
            state.settled = state.state;
        }
        state.current += 1;
        state.state = FetchState::Loading;
        state.in_flight = Some(query.clone());

        Ok(RequestToken(state.current))
    }

    /// Apply the outcome of the fetch identified by `token`
    pub fn complete(&self, token: RequestToken, outcome: Result<ReportView>) -> Result<Completion> {
        let mut state = self.lock()?;

        if token.0 != state.current {
            debug!(
                kind = %self.kind,
                token = token.0,
                current = state.current,
                "Discarding stale report response"
            );
            return Ok(Completion::Stale);
        }

        state.in_flight = None;
        match outcome {
            Ok(view) => {
                state.state = FetchState::Ready;
                state.error = None;
                state.view = view.clone();
                Ok(Completion::Applied(view))
            }
            Err(err) => {
                error!(kind = %self.kind, error = %err, "Report fetch failed");
                state.state = FetchState::Error;
                state.error = Some(err.to_string());
                state.view = ReportView::empty(self.kind);
                Ok(Completion::Failed(err))
            }
        }
    }

    /// Release `Loading` for a fetch that will never complete. The view-model
    /// is left as it was; a newer fetch is not disturbed.
    pub fn abandon(&self, token: RequestToken) {
        // Also runs while unwinding, so a poisoned lock is still recovered
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };

        if token.0 != state.current || state.state != FetchState::Loading {
            return;
        }

        warn!(kind = %self.kind, token = token.0, "Report fetch abandoned before completion");
        state.in_flight = None;
        state.state = state.settled;
    }

    /// Fetch, aggregate and publish a new view-model for `query`
    pub async fn refresh(&self, query: ReportQuery) -> Result<ReportView> {
        if query.kind != self.kind {
            return Err(AppError::validation(format!(
                "query for {} sent to the {} controller",
                query.kind, self.kind
            )));
        }
        query.validate()?;

        let pending = PendingFetch {
            controller: self,
            token: self.begin(&query)?,
            completed: false,
        };
        let outcome = self.service.generate(&query).await;

        match pending.complete(outcome)? {
            Completion::Applied(view) => {
                info!(kind = %self.kind, groups = view.groups.len(), "Report view updated");
                Ok(view)
            }
            Completion::Failed(err) => Err(err),
            Completion::Stale => {
                warn!(kind = %self.kind, "Response superseded by a newer request");
                Err(AppError::conflict("superseded by a newer request"))
            }
        }
    }

    pub fn snapshot(&self) -> Result<ControllerSnapshot> {
        let state = self.lock()?;
        Ok(ControllerSnapshot {
            state: state.state,
            view: state.view.clone(),
            error: state.error.clone(),
        })
    }

    pub fn state(&self) -> Result<FetchState> {
        Ok(self.lock()?.state)
    }

    /// Export whatever the current view-model holds; an empty view yields a
    /// header-only workbook or a placeholder document
    pub fn export(&self, format: ExportFormat, exporter: &ReportExporter) -> Result<ExportArtifact> {
        let view = self.lock()?.view.clone();
        exporter.export_view(&view, format)
    }
}
