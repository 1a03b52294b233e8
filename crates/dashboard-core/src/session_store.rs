//! The one session record of the client.
//!
//! Everything reads it; only the session manager writes it (the mutators
//! are crate-private). Every transition bumps `epoch`, so a result can be
//! checked against the session it was requested under.

use std::cell::{Cell, RefCell};
use dashboard_types::session::{Session, User};

#[derive(Debug, Default)]
pub struct SessionStore {
    session: RefCell<Session>,
    epoch: Cell<u64>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Session {
        self.session.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        self.session.borrow().token().map(str::to_string)
    }

    pub fn user(&self) -> Option<User> {
        self.session.borrow().user().cloned()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.get()
    }

    /// True if no transition happened since `epoch` was read
    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch.get() == epoch
    }

    pub(crate) fn establish(&self, token: String, user: User) -> u64 {
        *self.session.borrow_mut() = Session::authenticated(token, user);
        self.bump()
    }

    /// Reset to anonymous. Returns false (and leaves the epoch alone) if
    /// there was no session to end.
    pub(crate) fn clear(&self) -> bool {
        if !self.is_authenticated() {
            return false;
        }
        *self.session.borrow_mut() = Session::Anonymous;
        self.bump();
        true
    }

    fn bump(&self) -> u64 {
        let next = self.epoch.get() + 1;
        self.epoch.set(next);
        next
    }
}
