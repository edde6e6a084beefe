mod common;

use common::FakeSource;
use futures::executor::block_on;
use market_terminal_wasm::application::hydrate_overview;
use market_terminal_wasm::domain::chart::sparkline::{FALLBACK_SERIES, build_path};
use market_terminal_wasm::domain::market_data::PeriodId;
use market_terminal_wasm::domain::portfolio::{SummaryTexts, default_holdings};

fn priced() -> FakeSource {
    FakeSource::new()
        .with_price("BTC", 50_000.0)
        .with_price("ETH", 2_000.0)
        .with_price("SOL", 100.0)
        .with_price("BNB", 300.0)
}

#[test]
fn live_prices_fill_cards_and_table() {
    let snapshot = block_on(hydrate_overview(&priced(), &default_holdings()));

    assert!(snapshot.is_live());
    assert_eq!(snapshot.rows.len(), 4);
    assert_eq!(snapshot.texts.balance, "$46,950.00");
    assert_eq!(snapshot.texts.pnl, "+ $1,971.90 (+4.20%)");
    assert_eq!(snapshot.texts.monthly, "$4,084.65");
    assert_eq!(snapshot.rows[1].value, 12_200.0);
}

#[test]
fn btc_daily_series_drives_change_and_sparkline() {
    let source = priced().with_ohlcv("BTC", PeriodId::OneDay, &[100.0, 110.0]);
    let snapshot = block_on(hydrate_overview(&source, &default_holdings()));

    let btc = &snapshot.rows[0];
    assert!((btc.change - 10.0).abs() < 1e-9);
    assert!(btc.is_up());
    assert_eq!(snapshot.rows[2].change, 0.0);
    assert_eq!(snapshot.sparkline.line, "M0,170 L1000,50");
    assert_eq!(snapshot.sparkline.fill, "M0,170 L1000,50 L1000,200 L0,200 Z");
}

#[test]
fn one_missing_price_falls_back_to_static_figures() {
    let source = FakeSource::new().with_price("BTC", 50_000.0).with_price("ETH", 2_000.0).with_price("SOL", 100.0);
    let snapshot = block_on(hydrate_overview(&source, &default_holdings()));

    assert!(!snapshot.is_live());
    assert!(snapshot.rows.is_empty());
    assert_eq!(snapshot.texts, SummaryTexts::fallback());
}

#[test]
fn nothing_reachable_uses_fallback_sparkline() {
    let snapshot = block_on(hydrate_overview(&FakeSource::new(), &default_holdings()));
    assert_eq!(Some(snapshot.sparkline), build_path(&FALLBACK_SERIES));
}
