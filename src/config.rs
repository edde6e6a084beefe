use crate::domain::{
    logging::LogComponent,
    market_data::{Asset, PeriodId, Price},
    wallet::Wallet,
};
use crate::time_utils::LabelClock;
use gloo::utils::format::JsValueSerdeExt;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

/// Settings for the live market terminal, passed from JS as a plain object.
///
/// Every field is optional on the JS side; missing ones take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TerminalConfig {
    /// Prefix for `/api/market/...`; empty means same origin.
    pub api_base_url: String,
    pub full_refresh_ms: u32,
    pub price_refresh_ms: u32,
    pub ohlcv_limit: u32,
    pub ohlcv_period: PeriodId,
    pub default_asset: Asset,
    pub quote_asset: String,
    pub initial_quote_balance: f64,
    pub initial_base_balance: f64,
    /// Price used for trades until the first live tick lands.
    pub initial_price: f64,
    pub clock: LabelClock,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            full_refresh_ms: 60_000,
            price_refresh_ms: 10_000,
            ohlcv_limit: 90,
            ohlcv_period: PeriodId::OneMinute,
            default_asset: Asset::default_pair(),
            quote_asset: "USDT".to_string(),
            initial_quote_balance: 50.0,
            initial_base_balance: 0.0,
            initial_price: 64_321.0,
            clock: LabelClock::Local,
        }
    }
}

impl TerminalConfig {
    pub fn from_js(value: &JsValue) -> Self {
        decode_or_default(value, "TerminalConfig")
    }

    pub fn initial_wallet(&self) -> Wallet {
        Wallet::new(
            self.quote_asset.clone(),
            self.default_asset.symbol.clone(),
            self.initial_quote_balance,
            self.initial_base_balance,
            Price::new(self.initial_price),
        )
    }
}

/// Settings for the portfolio overview page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverviewConfig {
    pub api_base_url: String,
    pub clock: LabelClock,
}

impl OverviewConfig {
    pub fn from_js(value: &JsValue) -> Self {
        decode_or_default(value, "OverviewConfig")
    }
}

fn decode_or_default<T>(value: &JsValue, what: &str) -> T
where
    T: Default + for<'de> Deserialize<'de>,
{
    if value.is_undefined() || value.is_null() {
        return T::default();
    }
    match value.into_serde::<T>() {
        Ok(config) => config,
        Err(e) => {
            crate::log_warn!(LogComponent::Presentation("Config"), "Invalid {} ({}), using defaults", what, e);
            T::default()
        }
    }
}
