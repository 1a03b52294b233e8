//! Session lifecycle: login, register, logout, restore.
//!
//! Anonymous → (login/register succeeds) → Authenticated → (logout or a
//! 401 on an authorized request) → Anonymous.
//!
//! The in-memory transition always happens before the first await of an
//! operation, so concurrent triggers observe it and become no-ops.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use dashboard_types::{
    DashboardError, Result,
    event::DashboardEvent,
    session::{AuthMode, Credentials, RegisterProfile, User},
};
use crate::api::{ApiClient, AuthPayload, UnauthorizedHandler};
use crate::event_bus::EventBus;
use crate::notifications::NotificationQueue;
use crate::ports::StoragePort;
use crate::session_store::SessionStore;
use crate::sync::DashboardSyncController;

pub const LOGGED_OUT_TEXT: &str = "Logged out successfully";

pub struct SessionManager {
    store: Rc<SessionStore>,
    api: Rc<ApiClient>,
    storage: Rc<dyn StoragePort>,
    notifications: Rc<NotificationQueue>,
    sync: Rc<DashboardSyncController>,
    event_bus: EventBus,
    busy: Cell<bool>,
    auth_error: RefCell<Option<String>>,
}

impl SessionManager {
    /// Build the manager and register it as the client's handler for
    /// authorization failures.
    pub fn new(
        store: Rc<SessionStore>,
        api: Rc<ApiClient>,
        storage: Rc<dyn StoragePort>,
        notifications: Rc<NotificationQueue>,
        sync: Rc<DashboardSyncController>,
        event_bus: EventBus,
    ) -> Rc<Self> {
        let manager = Rc::new(Self {
            store,
            api: api.clone(),
            storage,
            notifications,
            sync,
            event_bus,
            busy: Cell::new(false),
            auth_error: RefCell::new(None),
        });
        let handler: Rc<dyn UnauthorizedHandler> = manager.clone();
        api.set_unauthorized_handler(Rc::downgrade(&handler));
        manager
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    pub fn user(&self) -> Option<User> {
        self.store.user()
    }

    /// True while a login or register request is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Text of the last failed authentication attempt
    pub fn auth_error(&self) -> Option<String> {
        self.auth_error.borrow().clone()
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<User> {
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(self.reject(AuthMode::Login, "Please enter email and password"));
        }
        self.begin_attempt()?;
        let result = self.api.login(credentials).await;
        self.finish_attempt(AuthMode::Login, result).await
    }

    pub async fn register(&self, profile: &RegisterProfile) -> Result<User> {
        if profile.name.trim().is_empty() {
            return Err(self.reject(AuthMode::Register, "Please enter your full name"));
        }
        if profile.email.trim().is_empty() || profile.password.is_empty() {
            return Err(self.reject(AuthMode::Register, "Please enter email and password"));
        }
        self.begin_attempt()?;
        let result = self.api.register(profile).await;
        self.finish_attempt(AuthMode::Register, result).await
    }

    /// Submit the auth form in the given mode. Login ignores `form.name`.
    pub async fn authenticate(&self, mode: AuthMode, form: &RegisterProfile) -> Result<User> {
        match mode {
            AuthMode::Login => self.login(&form.credentials()).await,
            AuthMode::Register => self.register(form).await,
        }
    }

    /// End the session and forget the persisted credentials.
    ///
    /// Safe to call when already anonymous: storage is cleared again but no
    /// notification is shown. Returns whether a session was ended.
    pub async fn logout(&self) -> bool {
        let ended = self.end_session();
        if ended {
            self.notifications.info(LOGGED_OUT_TEXT);
        }
        self.clear_persisted().await;
        ended
    }

    /// Re-establish a persisted session without contacting the backend,
    /// then run the initial sync. Returns whether a session was restored.
    pub async fn restore_session(&self) -> Result<bool> {
        if self.store.is_authenticated() {
            return Ok(true);
        }
        let keys = &self.api.config().storage_keys;
        let token = self.read_entry(&keys.token).await?;
        let user = self.read_entry(&keys.user).await?;

        let (Some(token), Some(user)) = (token, user) else {
            log::debug!("No persisted session");
            return Ok(false);
        };
        if token.is_empty() {
            return Ok(false);
        }
        let user: User = match serde_json::from_str(&user) {
            Ok(user) => user,
            Err(e) => {
                log::warn!("Discarding unreadable persisted user record: {}", e);
                self.clear_persisted().await;
                return Ok(false);
            }
        };

        log::info!("Restored session for {}", user.email);
        self.store.establish(token, user);
        self.event_bus
            .emit(DashboardEvent::SessionChanged { authenticated: true });
        self.sync.sync().await;
        Ok(true)
    }

    fn reject(&self, mode: AuthMode, text: &str) -> DashboardError {
        log::debug!("{} rejected before dispatch: {}", mode.label(), text);
        *self.auth_error.borrow_mut() = Some(text.to_string());
        self.notifications.error(text);
        DashboardError::Validation(text.to_string())
    }

    fn begin_attempt(&self) -> Result<()> {
        if self.busy.get() {
            return Err(DashboardError::Validation(
                "Authentication already in progress".to_string(),
            ));
        }
        self.set_busy(true);
        *self.auth_error.borrow_mut() = None;
        Ok(())
    }

    async fn finish_attempt(&self, mode: AuthMode, result: Result<AuthPayload>) -> Result<User> {
        self.set_busy(false);
        match result {
            Ok(AuthPayload { token, user }) => {
                self.establish(token, user.clone()).await;
                self.notifications.info(mode.welcome(&user.name));
                self.sync.sync().await;
                Ok(user)
            }
            Err(e) => {
                log::warn!("{} failed: {}", mode.label(), e);
                let text = e.user_message(&mode.failure_fallback());
                *self.auth_error.borrow_mut() = Some(text.clone());
                self.notifications.error(text);
                Err(e)
            }
        }
    }

    async fn establish(&self, token: String, user: User) {
        log::info!("Signed in as {}", user.email);
        self.store.establish(token.clone(), user.clone());
        self.event_bus
            .emit(DashboardEvent::SessionChanged { authenticated: true });

        let keys = &self.api.config().storage_keys;
        if let Err(e) = self.storage.set(&keys.token, token.as_bytes()).await {
            log::warn!("Failed to persist session token: {}", e);
        }
        match serde_json::to_vec(&user) {
            Ok(json) => {
                if let Err(e) = self.storage.set(&keys.user, &json).await {
                    log::warn!("Failed to persist user record: {}", e);
                }
            }
            Err(e) => log::warn!("Failed to encode user record: {}", e),
        }
    }

    // Synchronous half of logout.
    fn end_session(&self) -> bool {
        if !self.store.clear() {
            return false;
        }
        log::info!("Session ended");
        self.sync.reset();
        self.event_bus
            .emit(DashboardEvent::SessionChanged { authenticated: false });
        true
    }

    async fn clear_persisted(&self) {
        let keys = &self.api.config().storage_keys;
        for key in [&keys.token, &keys.user] {
            if let Err(e) = self.storage.delete(key).await {
                log::warn!("Failed to remove persisted entry {}: {}", key, e);
            }
        }
    }

    async fn read_entry(&self, key: &str) -> Result<Option<String>> {
        match self.storage.get(key).await? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| DashboardError::Storage(format!("{}: {}", key, e))),
            None => Ok(None),
        }
    }

    fn set_busy(&self, busy: bool) {
        self.busy.set(busy);
        self.event_bus.emit(DashboardEvent::AuthBusy { busy });
    }
}

#[async_trait(?Send)]
impl UnauthorizedHandler for SessionManager {
    async fn on_unauthorized(&self, epoch: u64) {
        if !self.store.is_current(epoch) {
            log::debug!("Ignoring authorization failure from an earlier session");
            return;
        }
        self.logout().await;
    }
}
