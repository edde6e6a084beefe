use super::dto::{AssetDto, OhlcvBody, OhlcvRowDto, PriceBody, TopAssetsBody, decode_payload};
use crate::domain::{
    errors::{TerminalError, TerminalResult},
    logging::{LogComponent, LogLevel, get_logger},
    market_data::{Asset, Candle, MarketDataSource, PeriodId, Price, Symbol},
};
use gloo::net::http::Request;
use serde::de::DeserializeOwned;

/// Quote currency for spot prices.
pub const PRICE_QUOTE: &str = "USD";
/// Quote currency for candles.
pub const OHLCV_QUOTE: &str = "USDT";

/// The three read-only routes of the market API.
#[derive(Debug, Clone, PartialEq)]
pub enum MarketEndpoint {
    TopAssets,
    Price { base: Symbol },
    Ohlcv { base: Symbol, period: PeriodId, limit: u32 },
}

impl MarketEndpoint {
    pub fn url(&self, base_url: &str) -> String {
        let root = base_url.trim_end_matches('/');
        match self {
            Self::TopAssets => format!("{}/api/market/top-assets/", root),
            Self::Price { base } => format!(
                "{}/api/market/price/?base={}&quote={}",
                root,
                urlencoding::encode(base.value()),
                PRICE_QUOTE
            ),
            Self::Ohlcv { base, period, limit } => format!(
                "{}/api/market/ohlcv/?base={}&quote={}&period_id={}&limit={}",
                root,
                urlencoding::encode(base.value()),
                OHLCV_QUOTE,
                period.as_query(),
                limit
            ),
        }
    }

    /// Subject used in the default failure message.
    pub fn subject(&self) -> &'static str {
        match self {
            Self::TopAssets => "top assets",
            Self::Price { .. } => "price",
            Self::Ohlcv { .. } => "ohlcv",
        }
    }
}

/// `MarketDataSource` over `gloo::net` fetch.
#[derive(Debug, Clone, Default)]
pub struct MarketApiClient {
    base_url: String,
}

impl MarketApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &MarketEndpoint) -> TerminalResult<T> {
        let url = endpoint.url(&self.base_url);
        get_logger().debug(LogComponent::Infrastructure("MarketApi"), &format!("GET {}", url));

        let response = Request::get(&url).send().await.map_err(|e| {
            TerminalError::Fetch(format!("{} fetch failed: {}", endpoint.subject(), e))
        })?;
        let status_ok = response.ok();
        let text = response.text().await.unwrap_or_default();

        decode_payload(status_ok, &text, endpoint.subject()).inspect_err(|e| {
            get_logger().log_with_metadata(
                LogLevel::Warn,
                LogComponent::Infrastructure("MarketApi"),
                &format!("{} ({}): {}", endpoint.subject(), response.status(), e),
                &url,
            );
        })
    }
}

impl MarketDataSource for MarketApiClient {
    async fn fetch_top_assets(&self) -> TerminalResult<Vec<Asset>> {
        let body: TopAssetsBody = self.get(&MarketEndpoint::TopAssets).await?;
        Ok(body.assets.into_iter().filter_map(AssetDto::into_domain).collect())
    }

    async fn fetch_price(&self, base: &Symbol) -> TerminalResult<Price> {
        let body: PriceBody = self.get(&MarketEndpoint::Price { base: base.clone() }).await?;
        body.rate()
    }

    async fn fetch_ohlcv(&self, base: &Symbol, period: PeriodId, limit: u32) -> TerminalResult<Vec<Candle>> {
        let endpoint = MarketEndpoint::Ohlcv { base: base.clone(), period, limit };
        let body: OhlcvBody = self.get(&endpoint).await?;
        let received = body.rows.len();
        let candles: Vec<Candle> = body.rows.into_iter().filter_map(OhlcvRowDto::into_candle).collect();
        if candles.len() < received {
            get_logger().debug(
                LogComponent::Infrastructure("MarketApi"),
                &format!("Dropped {} OHLCV rows without a close for {}", received - candles.len(), base),
            );
        }
        Ok(candles)
    }
}
