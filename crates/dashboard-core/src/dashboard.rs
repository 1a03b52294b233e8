//! Wires the core components together around one session store.

use std::rc::Rc;

use dashboard_types::{Result, config::ClientConfig};
use crate::api::ApiClient;
use crate::composer::MessageComposer;
use crate::event_bus::EventBus;
use crate::notifications::NotificationQueue;
use crate::ports::{HttpPort, StoragePort, TimerPort};
use crate::session::SessionManager;
use crate::session_store::SessionStore;
use crate::sync::DashboardSyncController;

pub struct Dashboard {
    pub event_bus: EventBus,
    pub store: Rc<SessionStore>,
    pub api: Rc<ApiClient>,
    pub notifications: Rc<NotificationQueue>,
    pub sync: Rc<DashboardSyncController>,
    pub session: Rc<SessionManager>,
    pub composer: Rc<MessageComposer>,
}

impl Dashboard {
    pub fn new(
        config: ClientConfig,
        http: Rc<dyn HttpPort>,
        storage: Rc<dyn StoragePort>,
        timer: Rc<dyn TimerPort>,
    ) -> Result<Self> {
        config.validate()?;
        log::info!(
            "Dashboard core for {} (storage: {})",
            config.api_base_url,
            storage.backend_name()
        );

        let event_bus = EventBus::new();
        let store = Rc::new(SessionStore::new());
        let notifications = Rc::new(NotificationQueue::new(
            timer,
            event_bus.clone(),
            config.notification_dismiss_ms,
        ));
        let api = Rc::new(ApiClient::new(config, http, store.clone()));
        let sync = Rc::new(DashboardSyncController::new(
            api.clone(),
            store.clone(),
            event_bus.clone(),
        ));
        let session = SessionManager::new(
            store.clone(),
            api.clone(),
            storage,
            notifications.clone(),
            sync.clone(),
            event_bus.clone(),
        );
        let composer = Rc::new(MessageComposer::new(
            api.clone(),
            store.clone(),
            sync.clone(),
            notifications.clone(),
            event_bus.clone(),
        ));

        Ok(Self {
            event_bus,
            store,
            api,
            notifications,
            sync,
            session,
            composer,
        })
    }
}
