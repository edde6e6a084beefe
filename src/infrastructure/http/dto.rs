use crate::domain::{
    errors::{TerminalError, TerminalResult},
    market_data::{Asset, Candle, Price, Symbol, Volume},
};
use crate::time_utils::parse_period_start;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Common response shape: `{ok, error?, ...body}`.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub body: T,
}

/// Numbers arrive either as JSON numbers or as numeric strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FlexibleNumber {
    Number(f64),
    Text(String),
}

impl FlexibleNumber {
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TopAssetsBody {
    #[serde(default)]
    pub assets: Vec<AssetDto>,
}

#[derive(Debug, Deserialize)]
pub struct AssetDto {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl AssetDto {
    /// `None` for rows without a ticker.
    pub fn into_domain(self) -> Option<Asset> {
        let symbol = Symbol::from(self.symbol);
        if symbol.is_empty() {
            return None;
        }
        Some(Asset { symbol, name: self.name, image_url: self.image.unwrap_or_default() })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PriceBody {
    #[serde(default)]
    pub data: Option<RateDto>,
}

#[derive(Debug, Deserialize)]
pub struct RateDto {
    #[serde(default)]
    pub rate: Option<FlexibleNumber>,
}

impl PriceBody {
    /// The quoted rate; missing, zero or negative rates are errors.
    pub fn rate(&self) -> TerminalResult<Price> {
        self.data
            .as_ref()
            .and_then(|d| d.rate.as_ref())
            .and_then(FlexibleNumber::as_f64)
            .map(Price::new)
            .filter(Price::is_tradable)
            .ok_or_else(|| TerminalError::fetch("price rate missing"))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OhlcvBody {
    #[serde(default)]
    pub rows: Vec<OhlcvRowDto>,
}

#[derive(Debug, Deserialize)]
pub struct OhlcvRowDto {
    #[serde(default)]
    pub time_period_start: Option<String>,
    #[serde(default)]
    pub price_close: Option<FlexibleNumber>,
    #[serde(default)]
    pub volume_traded: Option<FlexibleNumber>,
}

impl OhlcvRowDto {
    /// Rows without a usable close are dropped; missing volume reads as 0.
    pub fn into_candle(self) -> Option<Candle> {
        let close = self.price_close.as_ref().and_then(FlexibleNumber::as_f64)?;
        let volume = self.volume_traded.as_ref().and_then(FlexibleNumber::as_f64).unwrap_or(0.0);
        let timestamp = self.time_period_start.as_deref().and_then(parse_period_start);
        Some(Candle::new(timestamp, Price::new(close), Volume::new(volume)))
    }
}

/// Checks the HTTP status and the `ok` flag, then hands back the body.
///
/// The failure message is the payload's `error` when it carries one,
/// otherwise `"<what> fetch failed"`.
pub fn decode_payload<T>(status_ok: bool, text: &str, what: &str) -> TerminalResult<T>
where
    T: DeserializeOwned,
{
    let default_message = || format!("{} fetch failed", what);
    let envelope: ApiEnvelope<T> = match serde_json::from_str(text) {
        Ok(envelope) => envelope,
        Err(_) if !status_ok => return Err(TerminalError::Fetch(default_message())),
        Err(e) => return Err(TerminalError::Fetch(format!("{}: {}", default_message(), e))),
    };
    if !status_ok || !envelope.ok {
        let message = envelope.error.filter(|m| !m.trim().is_empty()).unwrap_or_else(default_message);
        return Err(TerminalError::Fetch(message));
    }
    Ok(envelope.body)
}
