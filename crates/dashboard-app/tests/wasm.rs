//! WASM-target tests for the JavaScript handle (Node.js runtime).
//!
//! Runs under wasm32-unknown-unknown via `wasm-pack test --node`. Without a
//! window the handle falls back to memory storage, so every test starts
//! signed out.

#![cfg(target_arch = "wasm32")]

use gloo_utils::format::JsValueSerdeExt;
use serde::Deserialize;
use wasm_bindgen_test::*;

use dashboard_app::DashboardHandle;

#[derive(Deserialize)]
struct Summary {
    authenticated: bool,
}

#[derive(Deserialize)]
struct Stat {
    label: String,
    value: String,
}

#[wasm_bindgen_test]
fn handle_starts_signed_out() {
    let handle = DashboardHandle::new().unwrap();
    let summary: Summary = handle.session().unwrap().into_serde().unwrap();
    assert!(!summary.authenticated);
    assert!(!handle.is_auth_busy());
    assert!(handle.auth_error().is_none());
}

#[wasm_bindgen_test]
fn auth_mode_toggles() {
    let handle = DashboardHandle::new().unwrap();
    assert_eq!(handle.auth_mode(), "login");
    assert_eq!(handle.toggle_auth_mode(), "register");
    assert_eq!(handle.toggle_auth_mode(), "login");
}

#[wasm_bindgen_test]
fn stats_default_to_zero() {
    let handle = DashboardHandle::new().unwrap();
    let stats: Vec<Stat> = handle.stats().unwrap().into_serde().unwrap();
    assert_eq!(stats.len(), 4);
    assert_eq!(stats[0].label, "Messages Sent");
    assert_eq!(stats[0].value, "0");
    assert_eq!(stats[3].value, "0%");
}

#[wasm_bindgen_test]
fn draft_edits_are_visible_and_announced() {
    let handle = DashboardHandle::new().unwrap();
    handle.set_recipient("+15550001".to_string());
    handle.set_body("Hello".to_string());

    let draft: serde_json::Value = handle.draft().unwrap().into_serde().unwrap();
    assert_eq!(draft["to"], "+15550001");
    assert_eq!(draft["message"], "Hello");

    let events: Vec<serde_json::Value> = handle.drain_events().unwrap().into_serde().unwrap();
    assert!(events.iter().any(|e| e["type"] == "DraftChanged"));
}

#[wasm_bindgen_test]
fn notification_is_null_until_shown() {
    let handle = DashboardHandle::new().unwrap();
    assert!(handle.notification().unwrap().is_null());
    handle.dismiss_notification();
}
