//! HTTP transport over the browser's `fetch()`.
//!
//! Uses gloo-net for the request itself and races it against a gloo-timers
//! deadline. A request that misses the deadline is aborted through its
//! `AbortController`.

use async_trait::async_trait;
use futures::future::{select, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde_json::Value;
use web_sys::AbortController;

use dashboard_core::ports::{HttpMethod, HttpPort, HttpRequest, HttpResponse};
use dashboard_types::{DashboardError, Result};

pub struct FetchTransport;

impl FetchTransport {
    pub fn new() -> Self {
        Self
    }

    fn build(req: &HttpRequest, controller: &AbortController) -> Result<Request> {
        let mut builder = match req.method {
            HttpMethod::Get => Request::get(&req.url),
            HttpMethod::Post => Request::post(&req.url),
        };
        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }
        let signal = controller.signal();
        builder = builder.abort_signal(Some(&signal));

        let request = match &req.body {
            Some(body) => builder.json(body),
            None => builder.build(),
        };
        request.map_err(|e| DashboardError::Network(e.to_string()))
    }
}

impl Default for FetchTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl HttpPort for FetchTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse> {
        let controller = AbortController::new()
            .map_err(|e| DashboardError::JsInterop(format!("{:?}", e)))?;
        let request = Self::build(&req, &controller)?;

        let millis = u32::try_from(req.timeout_ms).unwrap_or(u32::MAX);
        let send = Box::pin(request.send());
        let deadline = Box::pin(TimeoutFuture::new(millis));

        let response = match select(send, deadline).await {
            Either::Left((result, _)) => {
                result.map_err(|e| DashboardError::Network(e.to_string()))?
            }
            Either::Right(_) => {
                controller.abort();
                log::warn!("{} {} timed out after {}ms", req.method, req.url, req.timeout_ms);
                return Err(DashboardError::Timeout(req.timeout_ms));
            }
        };

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| DashboardError::Network(e.to_string()))?;

        Ok(HttpResponse {
            status,
            body: decode_body(&text),
        })
    }
}

/// Parse a response body as JSON. Empty or non-JSON bodies (proxy error
/// pages, for instance) come back as `Value::Null`.
pub fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|e| {
        log::debug!("Response body is not JSON: {}", e);
        Value::Null
    })
}
