use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use crate::core::{AppError, Result};
use crate::modules::reports::models::ReportKind;

use super::report_service::ReportService;
use super::view_controller::ReportViewController;

/// Views kept when no limit is configured
pub const DEFAULT_MAX_VIEWS: usize = 256;

type ViewKey = (String, ReportKind);

struct ViewEntry {
    controller: Arc<ReportViewController>,
    /// Registry tick of the last lookup
    last_used: u64,
}

struct Registry {
    entries: HashMap<ViewKey, ViewEntry>,
    tick: u64,
}

/// One [`ReportViewController`] per (connection id, report kind), so a
/// failing report never disturbs another.
///
/// Holds at most `max_views` controllers; the least recently used one is
/// dropped to make room. A dropped controller that is still loading finishes
/// for its caller, only its view-model is forgotten.
pub struct ReportViews {
    service: Arc<ReportService>,
    max_views: usize,
    registry: Mutex<Registry>,
}

impl ReportViews {
    pub fn new(service: Arc<ReportService>) -> Self {
        Self::with_capacity(service, DEFAULT_MAX_VIEWS)
    }

    pub fn with_capacity(service: Arc<ReportService>, max_views: usize) -> Self {
        Self {
            service,
            max_views: max_views.max(1),
            registry: Mutex::new(Registry {
                entries: HashMap::new(),
                tick: 0,
            }),
        }
    }

    pub fn service(&self) -> &Arc<ReportService> {
        &self.service
    }

    fn lock(&self) -> Result<MutexGuard<'_, Registry>> {
        self.registry
            .lock()
            .map_err(|_| AppError::internal("report registry poisoned"))
    }

    /// Controller for `client_id` and `kind`, created on first use
    pub fn controller(&self, client_id: &str, kind: ReportKind) -> Result<Arc<ReportViewController>> {
        let mut registry = self.lock()?;
        registry.tick += 1;
        let tick = registry.tick;
        let key = (client_id.to_string(), kind);

        if let Some(entry) = registry.entries.get_mut(&key) {
            entry.last_used = tick;
            return Ok(Arc::clone(&entry.controller));
        }

        if registry.entries.len() >= self.max_views {
            let oldest = registry
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| key.clone());
            if let Some(evicted) = oldest {
                debug!(client_id = %evicted.0, kind = %evicted.1, "Evicting report controller");
                registry.entries.remove(&evicted);
            }
        }

        debug!(client_id, kind = %kind, "Creating report controller");
        let controller = Arc::new(ReportViewController::new(kind, Arc::clone(&self.service)));
        registry.entries.insert(
            key,
            ViewEntry {
                controller: Arc::clone(&controller),
                last_used: tick,
            },
        );
        Ok(controller)
    }

    /// Controller for `client_id` and `kind` if one exists; never creates one
    pub fn existing(&self, client_id: &str, kind: ReportKind) -> Result<Option<Arc<ReportViewController>>> {
        let mut registry = self.lock()?;
        registry.tick += 1;
        let tick = registry.tick;
        Ok(registry
            .entries
            .get_mut(&(client_id.to_string(), kind))
            .map(|entry| {
                entry.last_used = tick;
                Arc::clone(&entry.controller)
            }))
    }

    pub fn len(&self) -> usize {
        self.lock().map(|r| r.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
