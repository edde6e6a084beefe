use leptos::*;
use wasm_bindgen::prelude::*;

use super::overview::OverviewApp;
use crate::app::TerminalApp;
use crate::config::{OverviewConfig, TerminalConfig};
use crate::domain::logging::{LogComponent, get_logger};

/// Mounts the live market terminal into `<body>`.
///
/// `config` is an optional plain object; see `TerminalConfig` for the keys.
#[wasm_bindgen(js_name = mountTerminal)]
pub fn mount_terminal(config: JsValue) {
    let config = TerminalConfig::from_js(&config);
    get_logger().info(
        LogComponent::Presentation("WasmApi"),
        &format!("Mounting terminal for {}", config.default_asset.symbol),
    );
    mount_to_body(move || view! { <TerminalApp config=config /> });
}

/// Mounts the portfolio overview into `<body>`.
#[wasm_bindgen(js_name = mountOverview)]
pub fn mount_overview(config: JsValue) {
    let config = OverviewConfig::from_js(&config);
    get_logger().info(LogComponent::Presentation("WasmApi"), "Mounting overview");
    mount_to_body(move || view! { <OverviewApp config=config /> });
}
