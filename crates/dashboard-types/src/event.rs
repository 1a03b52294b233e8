use serde::{Deserialize, Serialize};

use crate::notification::Notification;

/// Events emitted by the dashboard core.
/// The view layer drains these to know what to re-render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DashboardEvent {
    /// The session was established or torn down
    SessionChanged { authenticated: bool },

    /// An authentication request started or finished
    AuthBusy { busy: bool },

    /// The recent-message list was replaced or a message was prepended
    MessagesUpdated { count: usize },

    /// A new analytics snapshot was applied
    AnalyticsUpdated,

    /// A notification became visible, replacing any previous one
    NotificationShown { notification: Notification },

    /// The visible notification was dismissed
    NotificationCleared { id: u64 },

    /// The composer started or finished a submission
    SendBusy { busy: bool },

    /// The composer draft changed (including being cleared after a send)
    DraftChanged,
}
