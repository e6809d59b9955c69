use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::core::{AppError, Result};

/// Internal store a marketplace connection maps to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreEntry {
    /// e.g. "mercadolibre", "woocommerce"
    #[serde(default)]
    pub marketplace: Option<String>,
    /// Internal (WooCommerce) store identifier
    #[serde(default)]
    pub store_id: Option<String>,
    /// Company label used by company-level reports
    #[serde(default)]
    pub company: Option<String>,
}

/// Connection id → store mapping, loaded from YAML:
///
/// ```yaml
/// connections:
///   "1234567890":
///     marketplace: mercadolibre
///     store_id: "3"
///     company: Ofertas Ya
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreMapping {
    #[serde(default)]
    pub connections: HashMap<String, StoreEntry>,
}

impl StoreMapping {
    pub fn from_yaml(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw)
            .map_err(|e| AppError::Configuration(format!("Invalid store mapping: {}", e)))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            AppError::Configuration(format!(
                "Cannot read store mapping {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_yaml(&raw)
    }

    pub fn entry(&self, client_id: &str) -> Option<&StoreEntry> {
        self.connections.get(client_id)
    }

    pub fn company_for(&self, client_id: &str) -> Option<&str> {
        self.entry(client_id).and_then(|e| e.company.as_deref())
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
