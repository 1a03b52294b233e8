use serde::{Deserialize, Serialize};

/// Direction of a message relative to the business account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Incoming,
    #[default]
    Outgoing,
}

/// Delivery state reported for a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    Sent,
    Delivered,
    Read,
    Failed,
    #[serde(other)]
    Unknown,
}

/// A single message in the recent-activity list.
///
/// The wire name of the text field is `message`. Every field decodes
/// leniently: one odd row must not cost the rest of the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, deserialize_with = "crate::lenient::string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "crate::lenient::string_or_number")]
    pub to: String,
    #[serde(
        rename = "message",
        alias = "body",
        default,
        deserialize_with = "crate::lenient::string_or_number"
    )]
    pub body: String,
    #[serde(default, deserialize_with = "crate::lenient::string_or_number")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub direction: Direction,
    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub status: MessageStatus,
}

impl Message {
    /// A locally originated message, recorded as sent the moment the
    /// backend accepts it. Never reconciled with a server-side id.
    pub fn outgoing(to: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            to: to.into(),
            body: body.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            direction: Direction::Outgoing,
            status: MessageStatus::Sent,
        }
    }
}

/// Editable fields of the composer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerDraft {
    pub to: String,
    #[serde(rename = "message")]
    pub body: String,
}

impl ComposerDraft {
    pub fn new(to: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            body: body.into(),
        }
    }

    /// Both fields hold something other than whitespace
    pub fn is_complete(&self) -> bool {
        !self.to.trim().is_empty() && !self.body.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.to.clear();
        self.body.clear();
    }
}
