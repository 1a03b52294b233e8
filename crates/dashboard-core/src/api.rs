//! Client for the dashboard backend.
//!
//! Every call goes through `dispatch`, which:
//! 1. resolves the path against the configured base URL
//! 2. attaches `Authorization: Bearer <token>` from the session store
//! 3. applies the configured timeout
//! 4. unwraps the `{ success, error }` envelope
//!
//! A 401 on a request that carried a token is an expired session: the
//! registered `UnauthorizedHandler` runs before the caller gets
//! `DashboardError::Auth`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use dashboard_types::{
    DashboardError, Result,
    analytics::AnalyticsSnapshot,
    config::ClientConfig,
    message::Message,
    session::{Credentials, RegisterProfile, User},
};
use crate::ports::{HttpMethod, HttpPort, HttpRequest, HttpResponse};
use crate::session_store::SessionStore;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";
pub const MESSAGES_PATH: &str = "/api/messages";
pub const ANALYTICS_PATH: &str = "/api/analytics/overview";
pub const SEND_MESSAGE_PATH: &str = "/api/whatsapp/send-message";

const UNAUTHORIZED: u16 = 401;

/// Reacts to the backend rejecting the current session.
#[async_trait(?Send)]
pub trait UnauthorizedHandler {
    /// `epoch` is the session epoch the failed request was dispatched under.
    async fn on_unauthorized(&self, epoch: u64);
}

/// Token and user returned by login and register
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

#[derive(Deserialize)]
struct MessagesEnvelope {
    #[serde(default)]
    messages: Option<Vec<Message>>,
}

#[derive(Deserialize)]
struct AnalyticsEnvelope {
    #[serde(default)]
    analytics: Option<AnalyticsSnapshot>,
}

pub struct ApiClient {
    config: ClientConfig,
    http: Rc<dyn HttpPort>,
    session: Rc<SessionStore>,
    unauthorized: RefCell<Option<Weak<dyn UnauthorizedHandler>>>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, http: Rc<dyn HttpPort>, session: Rc<SessionStore>) -> Self {
        Self {
            config,
            http,
            session,
            unauthorized: RefCell::new(None),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Install the interceptor for authorization failures. Held weakly so
    /// the handler can own this client.
    pub fn set_unauthorized_handler(&self, handler: Weak<dyn UnauthorizedHandler>) {
        *self.unauthorized.borrow_mut() = Some(handler);
    }

    /// Issue a request, authorized if a session exists.
    /// Returns the response body of a successful envelope.
    pub async fn request(&self, method: HttpMethod, path: &str, body: Option<Value>) -> Result<Value> {
        let epoch = self.session.epoch();
        let token = self.session.token();
        self.dispatch(method, path, body, token, epoch).await
    }

    /// Like `request`, but refuses to touch the network without a session.
    pub async fn protected_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value> {
        let epoch = self.session.epoch();
        let Some(token) = self.session.token() else {
            log::debug!("{} {} refused: not signed in", method, path);
            return Err(DashboardError::Auth);
        };
        self.dispatch(method, path, body, Some(token), epoch).await
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthPayload> {
        let body = serde_json::to_value(credentials)?;
        let value = self.request(HttpMethod::Post, LOGIN_PATH, Some(body)).await?;
        parse_auth_payload(value)
    }

    pub async fn register(&self, profile: &RegisterProfile) -> Result<AuthPayload> {
        let body = serde_json::to_value(profile)?;
        let value = self.request(HttpMethod::Post, REGISTER_PATH, Some(body)).await?;
        parse_auth_payload(value)
    }

    pub async fn list_messages(&self, limit: usize) -> Result<Vec<Message>> {
        let path = format!("{}?limit={}", MESSAGES_PATH, limit);
        let value = self.protected_request(HttpMethod::Get, &path, None).await?;
        let envelope: MessagesEnvelope = serde_json::from_value(value)?;
        Ok(envelope.messages.unwrap_or_default())
    }

    pub async fn analytics_overview(&self) -> Result<AnalyticsSnapshot> {
        let value = self
            .protected_request(HttpMethod::Get, ANALYTICS_PATH, None)
            .await?;
        let envelope: AnalyticsEnvelope = serde_json::from_value(value)?;
        Ok(envelope.analytics.unwrap_or_default())
    }

    /// Dispatch a text message. The backend's acknowledgement carries no
    /// message id.
    pub async fn send_message(&self, to: &str, body: &str) -> Result<()> {
        let payload = json!({
            "to": to,
            "message": body,
            "type": "text",
        });
        self.protected_request(HttpMethod::Post, SEND_MESSAGE_PATH, Some(payload))
            .await?;
        Ok(())
    }

    async fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        token: Option<String>,
        epoch: u64,
    ) -> Result<Value> {
        let authorized = token.is_some();
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if let Some(token) = token {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        let req = HttpRequest {
            method,
            url: self.config.endpoint(path),
            headers,
            body,
            timeout_ms: self.config.request_timeout_ms,
        };

        log::debug!("{} {}", method, path);
        let response = self.http.send(req).await.map_err(|e| {
            log::warn!("{} {} failed: {}", method, path, e);
            e
        })?;

        if response.status == UNAUTHORIZED && authorized {
            log::warn!("{} {} rejected: session no longer authorized", method, path);
            self.notify_unauthorized(epoch).await;
            return Err(DashboardError::Auth);
        }

        unwrap_envelope(response).map_err(|e| {
            log::warn!("{} {} failed: {}", method, path, e);
            e
        })
    }

    async fn notify_unauthorized(&self, epoch: u64) {
        let handler = self.unauthorized.borrow().as_ref().and_then(Weak::upgrade);
        match handler {
            Some(handler) => handler.on_unauthorized(epoch).await,
            None => log::warn!("No unauthorized handler registered"),
        }
    }
}

/// Non-2xx statuses and `success: false` envelopes both become
/// `DashboardError::Server` carrying the envelope's `error` text.
fn unwrap_envelope(response: HttpResponse) -> Result<Value> {
    let succeeded = response.body.get("success").and_then(Value::as_bool) == Some(true);
    if response.is_success() && succeeded {
        return Ok(response.body);
    }
    let message = response
        .body
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string);
    Err(DashboardError::Server {
        status: response.status,
        message,
    })
}

fn parse_auth_payload(value: Value) -> Result<AuthPayload> {
    let payload: AuthPayload = serde_json::from_value(value)?;
    if payload.token.is_empty() {
        return Err(DashboardError::Serialization(
            "auth response carried an empty token".to_string(),
        ));
    }
    Ok(payload)
}
