use serde::{Deserialize, Serialize};

use crate::{DashboardError, Result};

/// Backend address baked in at build time. Override with
/// `DASHBOARD_API_BASE_URL=... cargo build`.
pub const DEFAULT_API_BASE_URL: &str = match option_env!("DASHBOARD_API_BASE_URL") {
    Some(url) => url,
    None => "https://whatsapp-ai-realestate-production.up.railway.app",
};

/// Top-level client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub request_timeout_ms: u64,
    /// How many recent messages a sync fetches
    pub message_page_size: usize,
    pub notification_dismiss_ms: u64,
    pub storage_keys: StorageKeys,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_ms: 10_000,
            message_page_size: 5,
            notification_dismiss_ms: 4_000,
            storage_keys: StorageKeys::default(),
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(DashboardError::Config("api_base_url is empty".to_string()));
        }
        if self.request_timeout_ms == 0 {
            return Err(DashboardError::Config("request_timeout_ms must be positive".to_string()));
        }
        if self.message_page_size == 0 {
            return Err(DashboardError::Config("message_page_size must be positive".to_string()));
        }
        Ok(())
    }

    /// Absolute URL for an API path
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Names of the persisted session entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageKeys {
    pub token: String,
    pub user: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            token: "whatsapp_saas_token".to_string(),
            user: "whatsapp_saas_user".to_string(),
        }
    }
}
