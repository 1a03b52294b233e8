//! Port traits: the hexagonal architecture boundary.
//!
//! These traits are defined here in `dashboard-core` (pure Rust).
//! Implementations live in `dashboard-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use serde_json::Value;
use dashboard_types::Result;

// ─── HTTP Port ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved outbound request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    pub timeout_ms: u64,
}

impl HttpRequest {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A response that made it back from the service, whatever its status.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    /// Parsed JSON body, `Value::Null` when the body was empty or not JSON
    pub body: Value,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait(?Send)]
pub trait HttpPort {
    /// Perform the request.
    ///
    /// Any status code is an `Ok` response. `Err` means no response was
    /// received: `Network` for transport failures, `Timeout` when
    /// `req.timeout_ms` elapsed first.
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse>;
}

// ─── Storage Port ────────────────────────────────────────────

/// Key-value persistence for the session entries
#[async_trait(?Send)]
pub trait StoragePort {
    /// Get a value by key
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Set a value
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Delete a value
    async fn delete(&self, key: &str) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── Timer Port ──────────────────────────────────────────────

/// A task registered with a `TimerPort` that has not necessarily run yet.
pub trait ScheduledTask {
    /// Prevent the task from running. A no-op if it already ran.
    fn cancel(self: Box<Self>);
}

/// Owning handle to a scheduled task. Dropping the handle cancels the task.
pub struct TimerHandle {
    task: Option<Box<dyn ScheduledTask>>,
}

impl TimerHandle {
    pub fn new(task: impl ScheduledTask + 'static) -> Self {
        Self {
            task: Some(Box::new(task)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
        }
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("armed", &self.task.is_some())
            .finish()
    }
}

pub trait TimerPort {
    /// Milliseconds on this timer's clock
    fn now_ms(&self) -> u64;

    /// Run `task` once after `delay_ms`, unless the returned handle is
    /// cancelled or dropped first.
    fn schedule(&self, delay_ms: u64, task: Box<dyn FnOnce()>) -> TimerHandle;
}
