use crate::domain::{
    chart::sparkline::{FALLBACK_SERIES, SparklinePath, build_path},
    errors::{TerminalError, TerminalResult},
    logging::{LogComponent, get_logger},
    market_data::{MarketDataSource, PeriodId, Symbol},
    portfolio::{Holding, HoldingRow, PortfolioSummary, SummaryTexts},
};
use futures::future::try_join_all;

/// Days of BTC history behind the overview sparkline.
pub const SERIES_DAYS: u32 = 30;

/// Everything the overview page renders after hydration.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewSnapshot {
    /// Empty when prices could not be loaded.
    pub rows: Vec<HoldingRow>,
    pub texts: SummaryTexts,
    pub sparkline: SparklinePath,
}

impl OverviewSnapshot {
    pub fn is_live(&self) -> bool {
        !self.rows.is_empty()
    }
}

/// Prices every holding concurrently; any failed price fails the whole set.
pub async fn load_holdings<S: MarketDataSource>(source: &S, holdings: &[Holding]) -> TerminalResult<Vec<HoldingRow>> {
    try_join_all(holdings.iter().map(|holding| async move {
        let price = source
            .fetch_price(&holding.symbol)
            .await
            .map_err(|e| TerminalError::Fetch(format!("Price fetch failed for {}: {}", holding.symbol, e)))?;
        let change = source.fetch_24h_change(&holding.symbol).await;
        Ok::<_, TerminalError>(HoldingRow::new(holding.clone(), price, change))
    }))
    .await
}

/// Daily BTC closes for the sparkline; empty series is an error.
pub async fn load_btc_series<S: MarketDataSource>(source: &S) -> TerminalResult<Vec<f64>> {
    let rows = source.fetch_ohlcv(&Symbol::from("BTC"), PeriodId::OneDay, SERIES_DAYS).await?;
    if rows.is_empty() {
        return Err(TerminalError::EmptyData("BTC series"));
    }
    Ok(rows.iter().map(|c| c.close.value()).collect())
}

/// Builds the overview, falling back to fixed figures and a fixed sparkline.
pub async fn hydrate_overview<S: MarketDataSource>(source: &S, holdings: &[Holding]) -> OverviewSnapshot {
    let (rows, texts) = match load_holdings(source, holdings).await {
        Ok(rows) => {
            let texts = SummaryTexts::from_summary(&PortfolioSummary::from_rows(&rows));
            (rows, texts)
        }
        Err(e) => {
            get_logger().warn(LogComponent::Application("Overview"), &format!("Using fallback balance: {}", e));
            (Vec::new(), SummaryTexts::fallback())
        }
    };

    let series = load_btc_series(source).await.unwrap_or_else(|e| {
        get_logger().warn(LogComponent::Application("Overview"), &format!("Using fallback sparkline: {}", e));
        FALLBACK_SERIES.to_vec()
    });
    let sparkline = build_path(&series).or_else(|| build_path(&FALLBACK_SERIES)).unwrap_or(SparklinePath {
        line: String::new(),
        fill: String::new(),
    });

    OverviewSnapshot { rows, texts, sparkline }
}
