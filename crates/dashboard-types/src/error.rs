use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    /// Client-side precondition failure; never reaches the network.
    #[error("{0}")]
    Validation(String),

    /// The service answered with a non-success status or a failure envelope.
    #[error("Server error (HTTP {status}): {}", message.as_deref().unwrap_or("no details"))]
    Server { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    /// Authorization denied. The session has already been reset by the
    /// time a caller sees this.
    #[error("Session expired")]
    Auth,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),
}

impl DashboardError {
    /// The session was rejected and has already been torn down
    pub fn is_auth(&self) -> bool {
        matches!(self, DashboardError::Auth)
    }

    /// Text to show the user for a failed action: the server-supplied
    /// message when there is one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            DashboardError::Server { message: Some(m), .. } if !m.is_empty() => m.clone(),
            DashboardError::Validation(m) => m.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(e: serde_json::Error) -> Self {
        DashboardError::Serialization(e.to_string())
    }
}
