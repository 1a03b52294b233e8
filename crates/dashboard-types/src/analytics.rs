use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lenient::display_value;

/// Usage figures shown on the dashboard, refreshed wholesale on each sync.
///
/// Values are kept as display strings: the backend sends some of them as
/// numbers and some as preformatted text (`"87%"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AnalyticsOverview", rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub messages_total: String,
    pub active_contacts: String,
    pub bot_rules_active: String,
    pub response_rate: String,
}

impl Default for AnalyticsSnapshot {
    fn default() -> Self {
        Self {
            messages_total: "0".to_string(),
            active_contacts: "0".to_string(),
            bot_rules_active: "0".to_string(),
            response_rate: "0%".to_string(),
        }
    }
}

/// A labelled figure for the stats grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatFigure {
    pub label: &'static str,
    pub value: String,
}

impl AnalyticsSnapshot {
    pub fn stats(&self) -> [StatFigure; 4] {
        [
            StatFigure { label: "Messages Sent", value: self.messages_total.clone() },
            StatFigure { label: "Active Contacts", value: self.active_contacts.clone() },
            StatFigure { label: "Bot Rules", value: self.bot_rules_active.clone() },
            StatFigure { label: "Response Rate", value: self.response_rate.clone() },
        ]
    }
}

/// Wire shape of `/api/analytics/overview`.
///
/// The overview is grouped (`messages.total`, `contacts.active`, ...); the
/// flat field names are accepted as well.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AnalyticsOverview {
    messages: Option<Value>,
    contacts: Option<Value>,
    bot_rules: Option<Value>,
    engagement: Option<Value>,
    messages_total: Option<Value>,
    active_contacts: Option<Value>,
    bot_rules_active: Option<Value>,
    response_rate: Option<Value>,
}

impl From<AnalyticsOverview> for AnalyticsSnapshot {
    fn from(wire: AnalyticsOverview) -> Self {
        let pick = |flat: &Option<Value>, group: &Option<Value>, key: &str, default: &str| {
            let nested = group.as_ref().and_then(|g| g.get(key));
            display_value(flat.as_ref().or(nested), default)
        };
        Self {
            messages_total: pick(&wire.messages_total, &wire.messages, "total", "0"),
            active_contacts: pick(&wire.active_contacts, &wire.contacts, "active", "0"),
            bot_rules_active: pick(&wire.bot_rules_active, &wire.bot_rules, "active", "0"),
            response_rate: pick(&wire.response_rate, &wire.engagement, "responseRate", "0%"),
        }
    }
}
