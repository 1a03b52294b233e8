//! Auto-detect the best available storage backend.
//!
//! Priority: localStorage → Memory (fallback)

use std::rc::Rc;
use dashboard_core::ports::StoragePort;
use super::{LocalStorageBackend, MemoryStorage};

/// Pick the best usable storage backend.
/// Returns a trait object so callers are backend-agnostic.
pub fn auto_detect_storage() -> Rc<dyn StoragePort> {
    match LocalStorageBackend::open().and_then(|local| local.probe().map(|_| local)) {
        Ok(local) => {
            log::info!("Storage backend: localStorage");
            Rc::new(local)
        }
        Err(e) => {
            log::warn!("localStorage unavailable ({}), sessions will not survive a reload", e);
            Rc::new(MemoryStorage::new())
        }
    }
}
