//! Dashboard client core: session lifecycle, API orchestration,
//! notifications, background sync and the send workflow.
//!
//! Platform capabilities come in through the traits in [`ports`].

pub mod ports;
pub mod event_bus;
pub mod session_store;
pub mod api;
pub mod notifications;
pub mod sync;
pub mod session;
pub mod composer;
pub mod dashboard;


pub use dashboard::Dashboard;
