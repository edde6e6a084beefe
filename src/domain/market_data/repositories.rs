use crate::domain::errors::TerminalResult;
use crate::domain::market_data::{Asset, Candle, PeriodId, Price, Symbol, change_percent};

/// Read-only access to the market price API.
///
/// Implementations do not retry; polling cadence and error display belong
/// to the caller.
#[allow(async_fn_in_trait)]
pub trait MarketDataSource {
    /// Listed assets for the search box.
    async fn fetch_top_assets(&self) -> TerminalResult<Vec<Asset>>;

    /// Spot price of `base` in USD.
    async fn fetch_price(&self, base: &Symbol) -> TerminalResult<Price>;

    /// Candles of `base` against USDT, oldest first. May be empty.
    async fn fetch_ohlcv(&self, base: &Symbol, period: PeriodId, limit: u32) -> TerminalResult<Vec<Candle>>;

    /// Daily change over the last two daily candles; `0` on any failure.
    async fn fetch_24h_change(&self, base: &Symbol) -> f64 {
        match self.fetch_ohlcv(base, PeriodId::OneDay, 2).await {
            Ok(rows) if rows.len() >= 2 => {
                let first = rows[0].close.value();
                let last = rows[rows.len() - 1].close.value();
                change_percent(first, last)
            }
            _ => 0.0,
        }
    }
}
