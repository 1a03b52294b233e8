//! Outbound message workflow.
//!
//! A send is validated locally, dispatched once, and on success shown
//! immediately at the head of the message list (optimistic, never
//! reconciled with the server). Analytics are refreshed afterwards; the
//! message list is not re-fetched.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dashboard_types::{
    DashboardError, Result,
    event::DashboardEvent,
    message::{ComposerDraft, Message},
};
use crate::api::ApiClient;
use crate::event_bus::EventBus;
use crate::notifications::NotificationQueue;
use crate::session_store::SessionStore;
use crate::sync::DashboardSyncController;

pub const MISSING_FIELDS_TEXT: &str = "Please enter phone number and message";
pub const SENT_TEXT: &str = "Message sent successfully!";
pub const SEND_FAILED_TEXT: &str = "Failed to send message";

pub struct MessageComposer {
    api: Rc<ApiClient>,
    session: Rc<SessionStore>,
    sync: Rc<DashboardSyncController>,
    notifications: Rc<NotificationQueue>,
    event_bus: EventBus,
    draft: RefCell<ComposerDraft>,
    sending: Cell<bool>,
}

impl MessageComposer {
    pub fn new(
        api: Rc<ApiClient>,
        session: Rc<SessionStore>,
        sync: Rc<DashboardSyncController>,
        notifications: Rc<NotificationQueue>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            api,
            session,
            sync,
            notifications,
            event_bus,
            draft: RefCell::new(ComposerDraft::default()),
            sending: Cell::new(false),
        }
    }

    pub fn draft(&self) -> ComposerDraft {
        self.draft.borrow().clone()
    }

    pub fn set_recipient(&self, to: impl Into<String>) {
        self.draft.borrow_mut().to = to.into();
        self.event_bus.emit(DashboardEvent::DraftChanged);
    }

    pub fn set_body(&self, body: impl Into<String>) {
        self.draft.borrow_mut().body = body.into();
        self.event_bus.emit(DashboardEvent::DraftChanged);
    }

    pub fn is_sending(&self) -> bool {
        self.sending.get()
    }

    /// Send the current draft.
    pub async fn submit(&self) -> Result<Message> {
        let ComposerDraft { to, body } = self.draft();
        self.send(&to, &body).await
    }

    /// Send a text message to `to`.
    ///
    /// On success the draft is cleared; on failure it is left as is so the
    /// user can resubmit. There is no automatic retry.
    pub async fn send(&self, to: &str, body: &str) -> Result<Message> {
        if !ComposerDraft::new(to, body).is_complete() {
            self.notifications.error(MISSING_FIELDS_TEXT);
            return Err(DashboardError::Validation(MISSING_FIELDS_TEXT.to_string()));
        }
        if self.sending.get() {
            return Err(DashboardError::Validation(
                "A message is already being sent".to_string(),
            ));
        }

        let epoch = self.session.epoch();
        self.set_sending(true);
        let result = self.api.send_message(to, body).await;
        self.set_sending(false);

        match result {
            Ok(()) if !self.session.is_current(epoch) => {
                log::info!("Message to {} accepted after the session ended; not recording it", to);
                Err(DashboardError::Auth)
            }
            Ok(()) => {
                let message = Message::outgoing(to, body);
                log::info!("Message {} sent to {}", message.id, to);
                self.sync.prepend_message(message.clone());
                self.draft.borrow_mut().clear();
                self.event_bus.emit(DashboardEvent::DraftChanged);
                self.notifications.info(SENT_TEXT);
                self.sync.sync_analytics().await;
                Ok(message)
            }
            // The forced logout already told the user.
            Err(e) if e.is_auth() => Err(e),
            Err(e) => {
                log::warn!("Sending to {} failed: {}", to, e);
                self.notifications.error(e.user_message(SEND_FAILED_TEXT));
                Err(e)
            }
        }
    }

    fn set_sending(&self, sending: bool) {
        self.sending.set(sending);
        self.event_bus.emit(DashboardEvent::SendBusy { busy: sending });
    }
}
