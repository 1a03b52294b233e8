//! `window.localStorage` backend.
//! Persistent across page reloads, string values only.

use async_trait::async_trait;
use web_sys::Storage;

use dashboard_core::ports::StoragePort;
use dashboard_types::{DashboardError, Result};

pub struct LocalStorageBackend {
    storage: Storage,
}

impl LocalStorageBackend {
    /// Bind to the window's localStorage.
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| DashboardError::Storage("No window object".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| DashboardError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| DashboardError::Storage("localStorage not available".to_string()))?;
        Ok(Self { storage })
    }

    /// Write and remove a scratch entry. Some browsers expose localStorage
    /// but throw on write (private browsing, exhausted quota).
    pub fn probe(&self) -> Result<()> {
        const PROBE_KEY: &str = "__dashboard_probe__";
        self.storage
            .set_item(PROBE_KEY, "1")
            .map_err(|e| DashboardError::Storage(format!("{:?}", e)))?;
        self.storage
            .remove_item(PROBE_KEY)
            .map_err(|e| DashboardError::Storage(format!("{:?}", e)))
    }
}

#[async_trait(?Send)]
impl StoragePort for LocalStorageBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self
            .storage
            .get_item(key)
            .map_err(|e| DashboardError::Storage(format!("{:?}", e)))?;
        Ok(value.map(String::into_bytes))
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let text = std::str::from_utf8(value)
            .map_err(|e| DashboardError::Storage(format!("{}: value is not UTF-8: {}", key, e)))?;
        self.storage
            .set_item(key, text)
            .map_err(|e| DashboardError::Storage(format!("{:?}", e)))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| DashboardError::Storage(format!("{:?}", e)))
    }

    fn backend_name(&self) -> &str {
        "localstorage"
    }
}
