//! Single-slot notification display with timed auto-dismiss.
//!
//! Each `show` supersedes whatever is visible and cancels the previous
//! dismissal timer, so an old timer can never clear a newer notification.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use dashboard_types::{
    event::DashboardEvent,
    notification::{Notification, NotificationKind},
};
use crate::event_bus::EventBus;
use crate::ports::{TimerHandle, TimerPort};

#[derive(Default)]
struct Slot {
    current: Option<Notification>,
    dismissal: Option<TimerHandle>,
    last_id: u64,
}

pub struct NotificationQueue {
    timer: Rc<dyn TimerPort>,
    event_bus: EventBus,
    dismiss_after_ms: u64,
    slot: Rc<RefCell<Slot>>,
}

impl NotificationQueue {
    pub fn new(timer: Rc<dyn TimerPort>, event_bus: EventBus, dismiss_after_ms: u64) -> Self {
        Self {
            timer,
            event_bus,
            dismiss_after_ms,
            slot: Rc::new(RefCell::new(Slot::default())),
        }
    }

    /// Display `text`, replacing any visible notification. Returns the new
    /// notification's id.
    pub fn show(&self, text: impl Into<String>, kind: NotificationKind) -> u64 {
        let previous = self.slot.borrow_mut().dismissal.take();
        if let Some(handle) = previous {
            handle.cancel();
        }

        let id = {
            let mut slot = self.slot.borrow_mut();
            slot.last_id += 1;
            slot.last_id
        };
        let notification = Notification {
            id,
            text: text.into(),
            kind,
            expires_at: self.timer.now_ms() + self.dismiss_after_ms,
        };

        let slot = Rc::downgrade(&self.slot);
        let bus = self.event_bus.clone();
        let handle = self.timer.schedule(
            self.dismiss_after_ms,
            Box::new(move || dismiss_if_current(&slot, &bus, id)),
        );

        {
            let mut slot = self.slot.borrow_mut();
            slot.current = Some(notification.clone());
            slot.dismissal = Some(handle);
        }
        log::debug!("Notification {} shown: {}", id, notification.text);
        self.event_bus.emit(DashboardEvent::NotificationShown { notification });
        id
    }

    pub fn info(&self, text: impl Into<String>) -> u64 {
        self.show(text, NotificationKind::Info)
    }

    pub fn error(&self, text: impl Into<String>) -> u64 {
        self.show(text, NotificationKind::Error)
    }

    /// Hide the visible notification now and cancel its timer.
    pub fn clear(&self) {
        let (dismissal, current) = {
            let mut slot = self.slot.borrow_mut();
            (slot.dismissal.take(), slot.current.take())
        };
        if let Some(handle) = dismissal {
            handle.cancel();
        }
        if let Some(notification) = current {
            self.event_bus
                .emit(DashboardEvent::NotificationCleared { id: notification.id });
        }
    }

    pub fn current(&self) -> Option<Notification> {
        self.slot.borrow().current.clone()
    }
}

// Runs inside the timer callback. The handle stays in the slot until the
// next show/clear replaces it.
fn dismiss_if_current(slot: &Weak<RefCell<Slot>>, bus: &EventBus, id: u64) {
    let Some(slot) = slot.upgrade() else {
        return;
    };
    let cleared = {
        let mut slot = slot.borrow_mut();
        if slot.current.as_ref().map(|n| n.id) == Some(id) {
            slot.current = None;
            true
        } else {
            false
        }
    };
    if cleared {
        log::debug!("Notification {} dismissed", id);
        bus.emit(DashboardEvent::NotificationCleared { id });
    }
}
