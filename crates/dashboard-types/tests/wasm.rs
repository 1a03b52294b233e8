//! WASM-target tests for dashboard-types.
//!
//! Covers the parts that touch wasm-specific code paths (uuid's js RNG,
//! chrono's wasmbind clock) under wasm32-unknown-unknown via
//! `wasm-pack test --node`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use dashboard_types::analytics::AnalyticsSnapshot;
use dashboard_types::message::*;
use dashboard_types::session::*;

#[wasm_bindgen_test]
fn outgoing_message_has_id_and_timestamp() {
    let msg = Message::outgoing("+15550001", "hello");
    assert!(!msg.id.is_empty());
    assert!(!msg.timestamp.is_empty());
    assert_eq!(msg.direction, Direction::Outgoing);
    assert_eq!(msg.status, MessageStatus::Sent);
}

#[wasm_bindgen_test]
fn outgoing_message_ids_differ() {
    assert_ne!(Message::outgoing("+1", "a").id, Message::outgoing("+1", "a").id);
}

#[wasm_bindgen_test]
fn user_record_reads_back() {
    let user = User {
        id: "7".to_string(),
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
    };
    let json = serde_json::to_string(&user).unwrap();
    let back: User = serde_json::from_str(&json).unwrap();
    assert_eq!(back, user);
}

#[wasm_bindgen_test]
fn analytics_defaults_when_empty() {
    let snapshot: AnalyticsSnapshot = serde_json::from_str("{}").unwrap();
    assert_eq!(snapshot, AnalyticsSnapshot::default());
}
