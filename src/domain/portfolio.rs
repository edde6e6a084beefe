//! Portfolio overview: fixed demo holdings valued against live prices.

use crate::domain::market_data::{Price, Symbol};
use crate::number_format::{format_currency, format_pct};
use crate::time_utils::next_month_day;
use chrono::NaiveDate;

/// Share of the total shown as unrealized PnL.
pub const PNL_RATE: f64 = 0.042;
/// Share of the total shown as monthly profit.
pub const MONTHLY_RATE: f64 = 0.087;
pub const PAYOUT_DAY: u32 = 12;
pub const HIDDEN_BALANCE: &str = "********";

#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub name: &'static str,
    pub symbol: Symbol,
    pub amount: f64,
    pub color: &'static str,
}

pub fn default_holdings() -> Vec<Holding> {
    [
        ("Bitcoin", "BTC", 0.52, "#F7931A"),
        ("Ethereum", "ETH", 6.1, "#627EEA"),
        ("Solana", "SOL", 42.5, "#14F195"),
        ("Binance Coin", "BNB", 15.0, "#F3BA2F"),
    ]
    .into_iter()
    .map(|(name, symbol, amount, color)| Holding { name, symbol: Symbol::from(symbol), amount, color })
    .collect()
}

/// One table row: a holding valued at the current price.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingRow {
    pub holding: Holding,
    pub price: Price,
    pub value: f64,
    /// 24h change in percent.
    pub change: f64,
}

impl HoldingRow {
    pub fn new(holding: Holding, price: Price, change: f64) -> Self {
        let value = holding.amount * price.value();
        Self { holding, price, value, change }
    }

    /// First letter of the symbol, used as the icon glyph.
    pub fn icon(&self) -> String {
        self.holding.symbol.value().chars().next().map(String::from).unwrap_or_default()
    }

    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortfolioSummary {
    pub total: f64,
    pub pnl: f64,
    pub monthly: f64,
    pub pnl_pct: f64,
}

impl PortfolioSummary {
    pub fn from_rows(rows: &[HoldingRow]) -> Self {
        let total: f64 = rows.iter().map(|r| r.value).sum();
        let pnl = total * PNL_RATE;
        let pnl_pct = if total != 0.0 { pnl / total * 100.0 } else { 0.0 };
        Self { total, pnl, monthly: total * MONTHLY_RATE, pnl_pct }
    }
}

/// Strings rendered on the overview cards.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTexts {
    pub balance: String,
    pub pnl: String,
    pub monthly: String,
}

impl SummaryTexts {
    pub fn from_summary(summary: &PortfolioSummary) -> Self {
        Self {
            balance: format_currency(summary.total),
            pnl: format!("+ {} ({})", format_currency(summary.pnl), format_pct(summary.pnl_pct)),
            monthly: format_currency(summary.monthly),
        }
    }

    /// Static figures shown when live prices are unavailable.
    pub fn fallback() -> Self {
        Self {
            balance: "$142,502.84".to_string(),
            pnl: "+ +$5,240.12 (4.2%)".to_string(),
            monthly: "$12,400.00".to_string(),
        }
    }
}

pub fn balance_display(balance: &str, hidden: bool) -> String {
    if hidden { HIDDEN_BALANCE.to_string() } else { balance.to_string() }
}

/// `Next payout: Feb 12` for the 12th of the month after `today`.
pub fn next_payout_text(today: NaiveDate) -> String {
    match next_month_day(today, PAYOUT_DAY) {
        Some(date) => format!("Next payout: {}", date.format("%b %-d")),
        None => "Next payout: --".to_string(),
    }
}
