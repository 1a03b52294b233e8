//! Change notifications from the core to the JavaScript view.
//!
//! The view polls: it calls `drain` from its render loop and re-reads the
//! parts of the state named by the events. Single-threaded (WASM), so the
//! queue sits behind `Rc<RefCell>`.
//!
//! The queue is bounded. A hidden tab may stop polling for a long time, and
//! every event only says "re-read X", so dropping the oldest is harmless.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use dashboard_types::event::DashboardEvent;

pub const MAX_PENDING_EVENTS: usize = 256;

/// Cloning shares the queue.
#[derive(Clone)]
pub struct EventBus {
    queue: Rc<RefCell<VecDeque<DashboardEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    pub fn emit(&self, event: DashboardEvent) {
        let mut queue = self.queue.borrow_mut();
        if queue.len() == MAX_PENDING_EVENTS {
            if let Some(dropped) = queue.pop_front() {
                log::debug!("Event queue full, dropping {:?}", dropped);
            }
        }
        queue.push_back(event);
    }

    /// Take every pending event, oldest first.
    pub fn drain(&self) -> Vec<DashboardEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
