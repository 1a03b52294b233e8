pub mod message;
pub mod analytics;
pub mod event;
pub mod notification;
pub mod config;
pub mod error;
pub mod session;
mod lenient;

#[cfg(test)]
mod tests;

pub use error::DashboardError;
pub type Result<T> = std::result::Result<T, DashboardError>;
