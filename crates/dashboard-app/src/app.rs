//! JavaScript-facing handle over the dashboard core.
//!
//! The view layer calls the async actions (they return Promises), reads
//! state through the getters and polls `drainEvents` to know what to
//! re-render.

use std::cell::Cell;
use std::rc::Rc;

use gloo_utils::format::JsValueSerdeExt;
use js_sys::Promise;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};

use dashboard_core::Dashboard;
use dashboard_platform::{
    http::FetchTransport,
    storage::auto_detect_storage,
    timer::BrowserTimer,
};
use dashboard_types::{
    DashboardError,
    config::ClientConfig,
    session::{AuthMode, RegisterProfile},
};

#[wasm_bindgen]
pub struct DashboardHandle {
    dashboard: Rc<Dashboard>,
    auth_mode: Cell<AuthMode>,
}

#[wasm_bindgen]
impl DashboardHandle {
    /// Wire the browser adapters into the core and start restoring any
    /// persisted session in the background.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<DashboardHandle, JsValue> {
        let dashboard = Dashboard::new(
            ClientConfig::default(),
            Rc::new(FetchTransport::new()),
            auto_detect_storage(),
            Rc::new(BrowserTimer::new()),
        )
        .map_err(to_js_error)?;
        let dashboard = Rc::new(dashboard);

        let restoring = dashboard.clone();
        spawn_local(async move {
            match restoring.session.restore_session().await {
                Ok(true) => log::info!("Persisted session restored"),
                Ok(false) => log::debug!("Starting signed out"),
                Err(e) => log::error!("Session restore failed: {}", e),
            }
        });

        Ok(Self {
            dashboard,
            auth_mode: Cell::new(AuthMode::Login),
        })
    }

    // ─── Auth ────────────────────────────────────────────────

    /// "login" or "register"
    #[wasm_bindgen(js_name = authMode)]
    pub fn auth_mode(&self) -> String {
        self.auth_mode.get().label().to_string()
    }

    #[wasm_bindgen(js_name = toggleAuthMode)]
    pub fn toggle_auth_mode(&self) -> String {
        let mode = self.auth_mode.get().toggled();
        self.auth_mode.set(mode);
        mode.label().to_string()
    }

    /// Submit the auth form in the current mode. Resolves to the user.
    #[wasm_bindgen(js_name = submitAuth)]
    pub fn submit_auth(&self, name: String, email: String, password: String) -> Promise {
        let dashboard = self.dashboard.clone();
        let mode = self.auth_mode.get();
        future_to_promise(async move {
            let form = RegisterProfile {
                name,
                email,
                password,
            };
            let user = dashboard
                .session
                .authenticate(mode, &form)
                .await
                .map_err(to_js_error)?;
            to_js(&user)
        })
    }

    /// Resolves to whether a session was actually ended.
    pub fn logout(&self) -> Promise {
        let dashboard = self.dashboard.clone();
        future_to_promise(async move {
            let ended = dashboard.session.logout().await;
            Ok(JsValue::from_bool(ended))
        })
    }

    #[wasm_bindgen(js_name = isAuthBusy)]
    pub fn is_auth_busy(&self) -> bool {
        self.dashboard.session.is_busy()
    }

    #[wasm_bindgen(js_name = authError)]
    pub fn auth_error(&self) -> Option<String> {
        self.dashboard.session.auth_error()
    }

    /// `{ authenticated, user }`, never the token
    pub fn session(&self) -> Result<JsValue, JsValue> {
        to_js(&self.dashboard.store.snapshot().summary())
    }

    // ─── Dashboard data ──────────────────────────────────────

    /// Re-fetch messages and analytics.
    pub fn refresh(&self) -> Promise {
        let dashboard = self.dashboard.clone();
        future_to_promise(async move {
            let report = dashboard.sync.sync().await;
            log::debug!("Manual refresh: {:?}", report);
            Ok(JsValue::UNDEFINED)
        })
    }

    pub fn messages(&self) -> Result<JsValue, JsValue> {
        to_js(&self.dashboard.sync.messages())
    }

    /// The four stat cards; zeros until the first analytics fetch lands.
    pub fn stats(&self) -> Result<JsValue, JsValue> {
        let snapshot = self.dashboard.sync.analytics().unwrap_or_default();
        to_js(&snapshot.stats())
    }

    // ─── Composer ────────────────────────────────────────────

    #[wasm_bindgen(js_name = setRecipient)]
    pub fn set_recipient(&self, to: String) {
        self.dashboard.composer.set_recipient(to);
    }

    #[wasm_bindgen(js_name = setBody)]
    pub fn set_body(&self, body: String) {
        self.dashboard.composer.set_body(body);
    }

    pub fn draft(&self) -> Result<JsValue, JsValue> {
        to_js(&self.dashboard.composer.draft())
    }

    #[wasm_bindgen(js_name = isSending)]
    pub fn is_sending(&self) -> bool {
        self.dashboard.composer.is_sending()
    }

    /// Send the current draft. Resolves to the recorded message.
    pub fn send(&self) -> Promise {
        let dashboard = self.dashboard.clone();
        future_to_promise(async move {
            let message = dashboard.composer.submit().await.map_err(to_js_error)?;
            to_js(&message)
        })
    }

    // ─── Notifications & events ──────────────────────────────

    /// The visible notification, or `null`
    pub fn notification(&self) -> Result<JsValue, JsValue> {
        to_js(&self.dashboard.notifications.current())
    }

    #[wasm_bindgen(js_name = dismissNotification)]
    pub fn dismiss_notification(&self) {
        self.dashboard.notifications.clear();
    }

    /// Events since the last call, oldest first.
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&self) -> Result<JsValue, JsValue> {
        to_js(&self.dashboard.event_bus.drain())
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    JsValue::from_serde(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js_error(e: DashboardError) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}
