//! Browser implementations of the `dashboard-core` ports.
//!
//! - [`http::FetchTransport`]: `fetch()` via gloo-net, with a deadline
//! - [`storage`]: `localStorage`, falling back to memory
//! - [`timer::BrowserTimer`]: `setTimeout` via gloo-timers

pub mod http;
pub mod storage;
pub mod timer;
