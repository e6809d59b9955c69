use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Marketplace connection the dashboard is currently working with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedConnection {
    pub client_id: String,
    /// Seller nickname shown next to the connection
    #[serde(default)]
    pub nickname: Option<String>,
    pub selected_at: DateTime<Utc>,
}

impl SelectedConnection {
    pub fn new(client_id: impl Into<String>, nickname: Option<String>) -> Self {
        Self {
            client_id: client_id.into(),
            nickname,
            selected_at: Utc::now(),
        }
    }
}
