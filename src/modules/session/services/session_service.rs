use std::sync::Arc;
use tracing::info;

use crate::core::traits::{get_json, set_json, KeyValueStore};
use crate::core::{AppError, Result};
use crate::modules::reports::models::validate_client_id;
use crate::modules::session::models::SelectedConnection;

const SELECTED_CONNECTION_KEY: &str = "selected_connection";

/// Dashboard session state on top of an injected [`KeyValueStore`]
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn KeyValueStore>,
}

impl SessionService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn selected_connection(&self) -> Result<Option<SelectedConnection>> {
        get_json(self.store.as_ref(), SELECTED_CONNECTION_KEY)
    }

    pub fn select_connection(
        &self,
        client_id: &str,
        nickname: Option<String>,
    ) -> Result<SelectedConnection> {
        let client_id = client_id.trim();
        validate_client_id(client_id)?;

        let connection = SelectedConnection::new(client_id, nickname);
        set_json(self.store.as_ref(), SELECTED_CONNECTION_KEY, &connection)?;
        info!(client_id = %connection.client_id, "Connection selected");
        Ok(connection)
    }

    pub fn clear_connection(&self) -> Result<()> {
        self.store.remove(SELECTED_CONNECTION_KEY)
    }

    /// Drop every session entry (logout)
    pub fn clear(&self) -> Result<()> {
        self.store.clear()
    }

    /// `explicit` when given and non-blank, else the selected connection
    pub fn resolve_client_id(&self, explicit: Option<&str>) -> Result<String> {
        if let Some(id) = explicit.map(str::trim).filter(|id| !id.is_empty()) {
            validate_client_id(id)?;
            return Ok(id.to_string());
        }
        self.selected_connection()?
            .map(|c| c.client_id)
            .ok_or_else(|| {
                AppError::validation("client_id is required when no connection is selected")
            })
    }
}
