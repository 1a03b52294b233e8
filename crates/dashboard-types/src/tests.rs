#[cfg(test)]
mod tests {
    use crate::analytics::*;
    use crate::config::*;
    use crate::error::*;
    use crate::event::*;
    use crate::message::*;
    use crate::notification::*;
    use crate::session::*;

    fn alice() -> User {
        User {
            id: "u1".to_string(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    // ─── Session Tests ───────────────────────────────────────

    #[test]
    fn test_session_default_is_anonymous() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_session_authenticated_has_token() {
        let session = Session::authenticated("tok", alice());
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok"));
        assert_eq!(session.user().unwrap().name, "Alice");
    }

    #[test]
    fn test_session_summary_hides_token() {
        let summary = Session::authenticated("secret-token", alice()).summary();
        assert!(summary.authenticated);
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("secret-token"));
        assert!(json.contains("Alice"));

        let anon = Session::Anonymous.summary();
        assert!(!anon.authenticated);
        assert!(anon.user.is_none());
    }

    #[test]
    fn test_user_numeric_id() {
        let user: User =
            serde_json::from_str(r#"{"id": 42, "name": "Bob", "email": "bob@example.com"}"#).unwrap();
        assert_eq!(user.id, "42");
    }

    #[test]
    fn test_user_persisted_form_reads_back() {
        let json = serde_json::to_string(&alice()).unwrap();
        let user: User = serde_json::from_str(&json).unwrap();
        assert_eq!(user, alice());
    }

    #[test]
    fn test_auth_mode_wording() {
        assert_eq!(AuthMode::Login.welcome("Alice"), "Welcome Alice! Logged in successfully.");
        assert_eq!(
            AuthMode::Register.welcome("Alice"),
            "Welcome Alice! Account created successfully."
        );
        assert_eq!(AuthMode::Login.failure_fallback(), "login failed. Please try again.");
        assert_eq!(AuthMode::Register.failure_fallback(), "register failed. Please try again.");
        assert_eq!(AuthMode::Login.toggled(), AuthMode::Register);
        assert_eq!(AuthMode::default(), AuthMode::Login);
    }

    #[test]
    fn test_register_profile_wire_shape() {
        let profile = RegisterProfile {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "pw".to_string(),
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["name"], "Alice");
        assert_eq!(value["email"], "alice@example.com");
        assert_eq!(value["password"], "pw");
        assert_eq!(profile.credentials().email, "alice@example.com");
    }

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_outgoing() {
        let msg = Message::outgoing("+15550001", "hello");
        assert_eq!(msg.to, "+15550001");
        assert_eq!(msg.body, "hello");
        assert_eq!(msg.direction, Direction::Outgoing);
        assert_eq!(msg.status, MessageStatus::Sent);
        assert!(!msg.id.is_empty());
        assert!(chrono::DateTime::parse_from_rfc3339(&msg.timestamp).is_ok());
    }

    #[test]
    fn test_message_outgoing_ids_are_unique() {
        let a = Message::outgoing("+1", "a");
        let b = Message::outgoing("+1", "a");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_message_from_server_json() {
        let json = r#"{
            "id": 1700000000000,
            "to": "+15550001",
            "message": "Your viewing is confirmed",
            "timestamp": "10:42:00",
            "direction": "incoming",
            "status": "delivered"
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, "1700000000000");
        assert_eq!(msg.body, "Your viewing is confirmed");
        assert_eq!(msg.direction, Direction::Incoming);
        assert_eq!(msg.status, MessageStatus::Delivered);
    }

    #[test]
    fn test_message_unknown_status_and_missing_fields() {
        let msg: Message = serde_json::from_str(r#"{"id": "m1", "status": "queued"}"#).unwrap();
        assert_eq!(msg.status, MessageStatus::Unknown);
        assert_eq!(msg.direction, Direction::Outgoing);
        assert!(msg.body.is_empty());
    }

    #[test]
    fn test_message_rows_of_mixed_shape_all_decode() {
        let json = r#"[
            { "id": 1, "to": "+15550001", "message": "Hi", "timestamp": "10:00", "direction": "outgoing" },
            { "id": 2, "to": 15550002, "message": "Numbers", "timestamp": 1700000000000, "direction": null, "status": null },
            { "id": "3", "to": null, "message": 42, "timestamp": null, "direction": "sideways", "status": 7 }
        ]"#;
        let rows: Vec<Message> = serde_json::from_str(json).unwrap();
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].timestamp, "10:00");

        assert_eq!(rows[1].to, "15550002");
        assert_eq!(rows[1].timestamp, "1700000000000");
        assert_eq!(rows[1].direction, Direction::Outgoing);
        assert_eq!(rows[1].status, MessageStatus::Sent);

        assert!(rows[2].to.is_empty());
        assert_eq!(rows[2].body, "42");
        assert!(rows[2].timestamp.is_empty());
        assert_eq!(rows[2].direction, Direction::Outgoing);
        assert_eq!(rows[2].status, MessageStatus::Sent);
    }

    #[test]
    fn test_message_serializes_body_as_message() {
        let value = serde_json::to_value(Message::outgoing("+1", "hi")).unwrap();
        assert_eq!(value["message"], "hi");
        assert_eq!(value["direction"], "outgoing");
        assert_eq!(value["status"], "sent");
        assert!(value.get("body").is_none());
    }

    #[test]
    fn test_composer_draft() {
        let mut draft = ComposerDraft::new("+1555", "hello");
        assert!(draft.is_complete());
        draft.clear();
        assert_eq!(draft, ComposerDraft::default());
        assert!(!draft.is_complete());
        assert!(!ComposerDraft::new("", "hello").is_complete());
        assert!(!ComposerDraft::new("+1555", "").is_complete());
        assert!(!ComposerDraft::new("  ", "hello").is_complete());
        assert!(!ComposerDraft::new("+1555", "\n\t").is_complete());
    }

    // ─── Analytics Tests ─────────────────────────────────────

    #[test]
    fn test_analytics_from_grouped_overview() {
        let json = r#"{
            "messages": {"total": 1284, "today": 12},
            "contacts": {"active": "312"},
            "botRules": {"active": 7},
            "engagement": {"responseRate": "87%"}
        }"#;
        let snapshot: AnalyticsSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.messages_total, "1284");
        assert_eq!(snapshot.active_contacts, "312");
        assert_eq!(snapshot.bot_rules_active, "7");
        assert_eq!(snapshot.response_rate, "87%");
    }

    #[test]
    fn test_analytics_missing_groups_use_defaults() {
        let snapshot: AnalyticsSnapshot = serde_json::from_str(r#"{"messages": {}}"#).unwrap();
        assert_eq!(snapshot, AnalyticsSnapshot::default());
        assert_eq!(snapshot.response_rate, "0%");
    }

    #[test]
    fn test_analytics_flat_form_reads_back() {
        let snapshot = AnalyticsSnapshot {
            messages_total: "10".to_string(),
            active_contacts: "4".to_string(),
            bot_rules_active: "2".to_string(),
            response_rate: "50%".to_string(),
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("messagesTotal"));
        let back: AnalyticsSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_analytics_stats_labels() {
        let stats = AnalyticsSnapshot::default().stats();
        let labels: Vec<&str> = stats.iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["Messages Sent", "Active Contacts", "Bot Rules", "Response Rate"]);
        assert_eq!(stats[3].value, "0%");
    }

    // ─── Notification / Event Tests ──────────────────────────

    #[test]
    fn test_notification_kind_serialization() {
        assert_eq!(serde_json::to_string(&NotificationKind::Info).unwrap(), r#""info""#);
        assert_eq!(serde_json::to_string(&NotificationKind::Error).unwrap(), r#""error""#);
    }

    #[test]
    fn test_event_tagged_serialization() {
        let event = DashboardEvent::SessionChanged { authenticated: true };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"SessionChanged""#));
        assert!(json.contains(r#""authenticated":true"#));

        let shown = DashboardEvent::NotificationShown {
            notification: Notification {
                id: 3,
                text: "Saved".to_string(),
                kind: NotificationKind::Info,
                expires_at: 4000,
            },
        };
        let back: DashboardEvent = serde_json::from_str(&serde_json::to_string(&shown).unwrap()).unwrap();
        assert_eq!(back, shown);
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.request_timeout_ms, 10_000);
        assert_eq!(config.message_page_size, 5);
        assert_eq!(config.notification_dismiss_ms, 4_000);
        assert_eq!(config.storage_keys.token, "whatsapp_saas_token");
        assert_eq!(config.storage_keys.user, "whatsapp_saas_user");
        assert!(!config.api_base_url.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_endpoint_joins_without_double_slash() {
        let config = ClientConfig {
            api_base_url: "https://api.example.com/".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(config.endpoint("/api/auth/login"), "https://api.example.com/api/auth/login");
        assert_eq!(config.endpoint("api/messages?limit=5"), "https://api.example.com/api/messages?limit=5");
    }

    #[test]
    fn test_config_validate_rejects_bad_values() {
        let empty_base = ClientConfig {
            api_base_url: "  ".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(empty_base.validate(), Err(DashboardError::Config(_))));

        let zero_timeout = ClientConfig {
            request_timeout_ms: 0,
            ..ClientConfig::default()
        };
        assert!(zero_timeout.validate().is_err());

        let zero_page = ClientConfig {
            message_page_size: 0,
            ..ClientConfig::default()
        };
        assert!(zero_page.validate().is_err());
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        assert_eq!(DashboardError::Timeout(10_000).to_string(), "Timeout after 10000ms");
        assert_eq!(DashboardError::Auth.to_string(), "Session expired");
        assert_eq!(
            DashboardError::Server { status: 500, message: Some("boom".to_string()) }.to_string(),
            "Server error (HTTP 500): boom"
        );
        assert_eq!(
            DashboardError::Server { status: 502, message: None }.to_string(),
            "Server error (HTTP 502): no details"
        );
        assert_eq!(DashboardError::Network("offline".to_string()).to_string(), "Network error: offline");
    }

    #[test]
    fn test_error_user_message() {
        let server = DashboardError::Server {
            status: 400,
            message: Some("Invalid phone number".to_string()),
        };
        assert_eq!(server.user_message("Failed to send message"), "Invalid phone number");

        let bare = DashboardError::Server { status: 500, message: None };
        assert_eq!(bare.user_message("Failed to send message"), "Failed to send message");

        let empty = DashboardError::Server { status: 500, message: Some(String::new()) };
        assert_eq!(empty.user_message("fallback"), "fallback");

        let network = DashboardError::Network("offline".to_string());
        assert_eq!(network.user_message("fallback"), "fallback");

        let validation = DashboardError::Validation("Please enter phone number and message".to_string());
        assert_eq!(validation.user_message("fallback"), "Please enter phone number and message");
    }

    #[test]
    fn test_error_classification() {
        assert!(DashboardError::Auth.is_auth());
        assert!(!DashboardError::Server { status: 401, message: None }.is_auth());
        assert!(!DashboardError::Network("x".to_string()).is_auth());
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{{invalid}}").unwrap_err();
        let err: DashboardError = serde_err.into();
        assert!(matches!(err, DashboardError::Serialization(_)));
    }
}
