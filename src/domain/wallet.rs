//! Tab-local trading simulation: a quote/base balance pair and the last
//! known price. Nothing here leaves the browser.

use crate::domain::errors::ValidationError;
use crate::domain::market_data::{Price, Symbol};
use crate::number_format::format_fixed;
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

/// Result of an accepted simulated order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeFill {
    pub side: TradeSide,
    pub amount: f64,
    /// Quote spent (buy) or received (sell).
    pub notional: f64,
    pub price: Price,
}

impl TradeFill {
    pub fn confirmation(&self) -> &'static str {
        match self.side {
            TradeSide::Buy => "Buy order executed (simulation).",
            TradeSide::Sell => "Sell order executed (simulation).",
        }
    }
}

/// Balances never go negative: orders that would overdraw are rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct Wallet {
    quote_asset: String,
    base_asset: Symbol,
    quote_balance: f64,
    base_balance: f64,
    last_price: Price,
}

impl Wallet {
    pub fn new(quote_asset: impl Into<String>, base_asset: Symbol, quote_balance: f64, base_balance: f64, last_price: Price) -> Self {
        Self {
            quote_asset: quote_asset.into(),
            base_asset,
            quote_balance: quote_balance.max(0.0),
            base_balance: base_balance.max(0.0),
            last_price,
        }
    }

    pub fn quote_balance(&self) -> f64 {
        self.quote_balance
    }

    pub fn base_balance(&self) -> f64 {
        self.base_balance
    }

    pub fn last_price(&self) -> Price {
        self.last_price
    }

    pub fn quote_asset(&self) -> &str {
        &self.quote_asset
    }

    pub fn base_asset(&self) -> &Symbol {
        &self.base_asset
    }

    /// Relabels the base slot after a pair switch; the balance carries over.
    pub fn set_base_asset(&mut self, base: Symbol) {
        self.base_asset = base;
    }

    /// Returns `false` and keeps the old price for non-finite or non-positive input.
    pub fn set_last_price(&mut self, price: Price) -> bool {
        if !price.is_tradable() {
            return false;
        }
        self.last_price = price;
        true
    }

    pub fn buy(&mut self, amount: f64) -> Result<TradeFill, ValidationError> {
        if !is_valid_amount(amount) {
            return Err(ValidationError::InvalidAmount { side: TradeSide::Buy });
        }
        let cost = amount * self.last_price.value();
        if !cost.is_finite() || cost > self.quote_balance {
            return Err(ValidationError::InsufficientQuote { asset: self.quote_asset.clone() });
        }
        // float residue must not push the balance below zero
        self.quote_balance = (self.quote_balance - cost).max(0.0);
        self.base_balance += amount;
        Ok(TradeFill { side: TradeSide::Buy, amount, notional: cost, price: self.last_price })
    }

    pub fn sell(&mut self, amount: f64) -> Result<TradeFill, ValidationError> {
        if !is_valid_amount(amount) {
            return Err(ValidationError::InvalidAmount { side: TradeSide::Sell });
        }
        if amount > self.base_balance {
            return Err(ValidationError::InsufficientBase { asset: self.base_asset.to_string() });
        }
        let revenue = amount * self.last_price.value();
        self.base_balance = (self.base_balance - amount).max(0.0);
        self.quote_balance += revenue;
        Ok(TradeFill { side: TradeSide::Sell, amount, notional: revenue, price: self.last_price })
    }

    /// Base amount affordable with `percent` (0..=100) of the quote balance.
    pub fn amount_for_fraction(&self, percent: f64) -> f64 {
        let pct = if percent.is_finite() { percent.clamp(0.0, 100.0) / 100.0 } else { 0.0 };
        let price = self.last_price.value();
        if price <= 0.0 {
            return 0.0;
        }
        self.quote_balance * pct / price
    }
}

fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

/// Text for the amount input: six decimals, or empty when nothing is affordable.
pub fn format_amount_input(amount: f64) -> String {
    if amount > 0.0 { format_fixed(amount, 6) } else { String::new() }
}

/// Parses the amount input; blank or garbage reads as zero.
pub fn parse_amount_input(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet() -> Wallet {
        Wallet::new("USDT", Symbol::from("BTC"), 50.0, 0.0, Price::new(64321.0))
    }

    #[test]
    fn buy_moves_quote_into_base() {
        let mut w = wallet();
        let fill = w.buy(0.0005).unwrap();
        assert!((fill.notional - 32.1605).abs() < 1e-9);
        assert!((w.quote_balance() - 17.8395).abs() < 1e-9);
        assert!((w.base_balance() - 0.0005).abs() < 1e-12);
        assert_eq!(fill.confirmation(), "Buy order executed (simulation).");
    }

    #[test]
    fn buy_rejects_overdraw_without_clamping() {
        let mut w = wallet();
        let err = w.buy(1.0).unwrap_err();
        assert_eq!(err.to_string(), "Not enough USDT for this buy.");
        assert_eq!(w.quote_balance(), 50.0);
        assert_eq!(w.base_balance(), 0.0);
    }

    #[test]
    fn invalid_amounts_are_rejected() {
        let mut w = wallet();
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(w.buy(bad), Err(ValidationError::InvalidAmount { side: TradeSide::Buy }));
            assert_eq!(w.sell(bad), Err(ValidationError::InvalidAmount { side: TradeSide::Sell }));
        }
    }

    #[test]
    fn sell_requires_base_balance() {
        let mut w = wallet();
        assert_eq!(w.sell(0.1).unwrap_err().to_string(), "Not enough BTC for this sell.");
        w.buy(0.0005).unwrap();
        let fill = w.sell(0.0005).unwrap();
        assert_eq!(fill.side, TradeSide::Sell);
        assert_eq!(w.base_balance(), 0.0);
        assert!((w.quote_balance() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn fraction_to_amount() {
        let w = wallet();
        assert_eq!(format_amount_input(w.amount_for_fraction(0.0)), "");
        assert_eq!(format_amount_input(w.amount_for_fraction(100.0)), "0.000777");
        assert_eq!(w.amount_for_fraction(250.0), w.amount_for_fraction(100.0));
    }

    #[test]
    fn last_price_ignores_garbage() {
        let mut w = wallet();
        assert!(!w.set_last_price(Price::new(0.0)));
        assert!(!w.set_last_price(Price::new(f64::NAN)));
        assert!(w.set_last_price(Price::new(70000.0)));
        assert_eq!(w.last_price().value(), 70000.0);
    }

    #[test]
    fn amount_input_parsing() {
        assert_eq!(parse_amount_input(" 0.25 "), 0.25);
        assert_eq!(parse_amount_input(""), 0.0);
        assert_eq!(parse_amount_input("abc"), 0.0);
    }
}
