//! Dashboard App: WASM entry point.
//!
//! This crate is the composition root (DI wiring layer).
//! It assembles the browser adapters around the dashboard core and hands the
//! result to the JavaScript view layer as a [`DashboardHandle`].

mod app;

pub use app::DashboardHandle;

use wasm_bindgen::prelude::*;

/// WASM entry point, runs when the module is instantiated
#[wasm_bindgen(start)]
pub fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Dashboard WASM starting...");
}
