//! Background refresh of the recent-message list and the analytics overview.
//!
//! The two fetches run concurrently and are applied independently: one
//! failing never blocks the other, and failures are only logged. Results
//! that come back after the session changed are dropped.

use std::cell::RefCell;
use std::rc::Rc;

use dashboard_types::{
    Result,
    analytics::AnalyticsSnapshot,
    event::DashboardEvent,
    message::Message,
};
use crate::api::ApiClient;
use crate::event_bus::EventBus;
use crate::session_store::SessionStore;

/// What happened to one slot during a sync
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Fresh data replaced the slot
    Applied,
    /// The fetch failed; the slot kept its previous value
    Failed(String),
    /// The session changed while the fetch was in flight
    Discarded,
    /// Nobody is signed in
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub messages: SyncOutcome,
    pub analytics: SyncOutcome,
}

pub struct DashboardSyncController {
    api: Rc<ApiClient>,
    session: Rc<SessionStore>,
    event_bus: EventBus,
    page_size: usize,
    messages: RefCell<Vec<Message>>,
    analytics: RefCell<Option<AnalyticsSnapshot>>,
}

impl DashboardSyncController {
    pub fn new(api: Rc<ApiClient>, session: Rc<SessionStore>, event_bus: EventBus) -> Self {
        let page_size = api.config().message_page_size;
        Self {
            api,
            session,
            event_bus,
            page_size,
            messages: RefCell::new(Vec::new()),
            analytics: RefCell::new(None),
        }
    }

    /// Refresh both slots.
    pub async fn sync(&self) -> SyncReport {
        if !self.session.is_authenticated() {
            return SyncReport {
                messages: SyncOutcome::Skipped,
                analytics: SyncOutcome::Skipped,
            };
        }
        let epoch = self.session.epoch();

        let messages = async {
            let result = self.api.list_messages(self.page_size).await;
            self.apply_messages(epoch, result)
        };
        let analytics = async {
            let result = self.api.analytics_overview().await;
            self.apply_analytics(epoch, result)
        };
        let (messages, analytics) = futures::join!(messages, analytics);

        log::debug!("Sync finished: messages {:?}, analytics {:?}", messages, analytics);
        SyncReport { messages, analytics }
    }

    /// Refresh only the analytics slot.
    pub async fn sync_analytics(&self) -> SyncOutcome {
        if !self.session.is_authenticated() {
            return SyncOutcome::Skipped;
        }
        let epoch = self.session.epoch();
        let result = self.api.analytics_overview().await;
        self.apply_analytics(epoch, result)
    }

    /// Put a locally originated message at the head of the list.
    pub fn prepend_message(&self, message: Message) {
        let count = {
            let mut messages = self.messages.borrow_mut();
            messages.insert(0, message);
            messages.len()
        };
        self.event_bus.emit(DashboardEvent::MessagesUpdated { count });
    }

    /// Forget all server-derived data.
    pub fn reset(&self) {
        self.messages.borrow_mut().clear();
        *self.analytics.borrow_mut() = None;
        self.event_bus.emit(DashboardEvent::MessagesUpdated { count: 0 });
        self.event_bus.emit(DashboardEvent::AnalyticsUpdated);
    }

    /// Most recent first
    pub fn messages(&self) -> Vec<Message> {
        self.messages.borrow().clone()
    }

    pub fn analytics(&self) -> Option<AnalyticsSnapshot> {
        self.analytics.borrow().clone()
    }

    fn apply_messages(&self, epoch: u64, result: Result<Vec<Message>>) -> SyncOutcome {
        match result {
            Ok(_) if !self.session.is_current(epoch) => {
                log::debug!("Dropping message list fetched for an ended session");
                SyncOutcome::Discarded
            }
            Ok(list) => {
                let count = list.len();
                *self.messages.borrow_mut() = list;
                self.event_bus.emit(DashboardEvent::MessagesUpdated { count });
                SyncOutcome::Applied
            }
            Err(e) => {
                log::warn!("Failed to load recent messages: {}", e);
                SyncOutcome::Failed(e.to_string())
            }
        }
    }

    fn apply_analytics(&self, epoch: u64, result: Result<AnalyticsSnapshot>) -> SyncOutcome {
        match result {
            Ok(_) if !self.session.is_current(epoch) => {
                log::debug!("Dropping analytics fetched for an ended session");
                SyncOutcome::Discarded
            }
            Ok(snapshot) => {
                *self.analytics.borrow_mut() = Some(snapshot);
                self.event_bus.emit(DashboardEvent::AnalyticsUpdated);
                SyncOutcome::Applied
            }
            Err(e) => {
                log::warn!("Failed to load analytics overview: {}", e);
                SyncOutcome::Failed(e.to_string())
            }
        }
    }
}
