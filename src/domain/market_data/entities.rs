pub use super::value_objects::{Price, Symbol, Timestamp, Volume};
use crate::domain::errors::{TerminalError, TerminalResult};
use serde::{Deserialize, Serialize};

const DEFAULT_LOGO_URL: &str = "https://cryptologos.cc/logos/bitcoin-btc-logo.png";

/// Reference data for one listed asset; immutable for the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub symbol: Symbol,
    pub name: String,
    #[serde(default, alias = "image")]
    pub image_url: String,
}

impl Asset {
    pub fn new(symbol: impl Into<Symbol>, name: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self { symbol: symbol.into(), name: name.into(), image_url: image_url.into() }
    }

    /// The pair shown before the user picks anything.
    pub fn default_pair() -> Self {
        Self::new("BTC", "Bitcoin", DEFAULT_LOGO_URL)
    }

    /// Logo URL, falling back to a generated avatar when the feed has none.
    pub fn logo_url(&self) -> String {
        if self.image_url.is_empty() {
            format!(
                "https://ui-avatars.com/api/?name={}&background=9b51e0&color=fff",
                urlencoding::encode(self.symbol.value())
            )
        } else {
            self.image_url.clone()
        }
    }

    pub fn logo_alt(&self) -> &str {
        if self.name.is_empty() { self.symbol.value() } else { &self.name }
    }

    /// Text placed in the search box once the asset is selected.
    pub fn search_label(&self) -> String {
        format!("{} - {}", self.symbol, self.name)
    }
}

impl Default for Asset {
    fn default() -> Self {
        Self::default_pair()
    }
}

/// One OHLCV row reduced to what the line chart needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Period start; `None` when the upstream row had no parseable time.
    pub timestamp: Option<Timestamp>,
    pub close: Price,
    pub volume: Volume,
}

impl Candle {
    pub fn new(timestamp: Option<Timestamp>, close: Price, volume: Volume) -> Self {
        Self { timestamp, close, volume }
    }
}

/// Percentage move from `first` to `last`; `0` when `first` is zero.
pub fn change_percent(first: f64, last: f64) -> f64 {
    if first == 0.0 {
        return 0.0;
    }
    (last - first) / first * 100.0
}

/// Non-empty candle series in the order the feed delivered it, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Fails with `EmptyData` for an empty row set; a chart needs one point.
    ///
    /// Rows keep the feed order; the last row is the latest close even when
    /// its time did not parse.
    pub fn from_candles(candles: Vec<Candle>) -> TerminalResult<Self> {
        if candles.is_empty() {
            return Err(TerminalError::EmptyData("OHLCV"));
        }
        Ok(Self { candles })
    }

    pub fn get_candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.candles.get(index)
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close.value()).collect()
    }

    pub fn first_close(&self) -> Price {
        self.candles.first().map(|c| c.close).unwrap_or_default()
    }

    pub fn latest_close(&self) -> Price {
        self.candles.last().map(|c| c.close).unwrap_or_default()
    }

    pub fn change_pct(&self) -> f64 {
        change_percent(self.first_close().value(), self.latest_close().value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(ts: u64, close: f64) -> Candle {
        Candle::new(Some(Timestamp::from_millis(ts)), Price::new(close), Volume::new(1.0))
    }

    #[test]
    fn change_of_two_rows() {
        let series = CandleSeries::from_candles(vec![candle(0, 100.0), candle(60_000, 110.0)]).unwrap();
        assert!((series.change_pct() - 10.0).abs() < 1e-9);
        assert_eq!(format!("{:.2}", series.change_pct()), "10.00");
    }

    #[test]
    fn zero_first_close_gives_zero_change() {
        assert_eq!(change_percent(0.0, 50.0), 0.0);
    }

    #[test]
    fn empty_rows_are_rejected() {
        assert_eq!(CandleSeries::from_candles(Vec::new()), Err(TerminalError::EmptyData("OHLCV")));
    }

    #[test]
    fn undated_newest_row_stays_last() {
        let undated = Candle::new(None, Price::new(120.0), Volume::new(1.0));
        let series = CandleSeries::from_candles(vec![candle(0, 100.0), candle(60_000, 110.0), undated]).unwrap();
        assert_eq!(series.closes(), vec![100.0, 110.0, 120.0]);
        assert_eq!(series.latest_close(), Price::new(120.0));
        assert!((series.change_pct() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn logo_falls_back_to_avatar() {
        let asset = Asset::new("doge", "Dogecoin", "");
        assert_eq!(
            asset.logo_url(),
            "https://ui-avatars.com/api/?name=DOGE&background=9b51e0&color=fff"
        );
        assert_eq!(asset.search_label(), "DOGE - Dogecoin");
        assert_eq!(Asset::default_pair().logo_url(), DEFAULT_LOGO_URL);
    }
}
