use derive_more::{Constructor, Display, From, Into};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

/// Value Object - price in the quote currency
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, From, Into, Constructor, Serialize, Deserialize)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Usable as a trade/display price: finite and strictly positive.
    pub fn is_tradable(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

/// Value Object - traded volume
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, From, Into, Constructor, Serialize, Deserialize)]
pub struct Volume(f64);

impl Volume {
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Value Object - milliseconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Constructor, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    pub fn from_millis(value: u64) -> Self {
        Self(value)
    }
}

/// Value Object - upper-cased ticker, e.g. `BTC`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
#[serde(from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.trim().to_uppercase())
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

/// OHLCV aggregation period understood by the market API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr, Serialize, Deserialize)]
pub enum PeriodId {
    #[default]
    #[display(fmt = "1MIN")]
    #[strum(serialize = "1MIN")]
    #[serde(rename = "1MIN")]
    OneMinute,

    #[display(fmt = "1DAY")]
    #[strum(serialize = "1DAY")]
    #[serde(rename = "1DAY")]
    OneDay,
}

impl PeriodId {
    pub fn as_query(&self) -> &str {
        self.as_ref()
    }
}
