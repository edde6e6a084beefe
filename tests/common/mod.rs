#![allow(dead_code)]

use futures::channel::oneshot;
use market_terminal_wasm::config::TerminalConfig;
use market_terminal_wasm::domain::errors::{TerminalError, TerminalResult};
use market_terminal_wasm::domain::market_data::{
    Asset, Candle, MarketDataSource, PeriodId, Price, Symbol, Timestamp, Volume,
};
use market_terminal_wasm::time_utils::LabelClock;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

/// In-memory market API. Clones share their tables, so a test can keep a
/// handle after passing one to the coordinator.
#[derive(Clone, Default)]
pub struct FakeSource {
    inner: Rc<Inner>,
}

#[derive(Default)]
struct Inner {
    assets: RefCell<Option<Vec<Asset>>>,
    prices: RefCell<HashMap<String, f64>>,
    ohlcv: RefCell<HashMap<(String, PeriodId), Vec<Candle>>>,
    gates: RefCell<VecDeque<oneshot::Receiver<()>>>,
    calls: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assets(self, assets: Vec<Asset>) -> Self {
        *self.inner.assets.borrow_mut() = Some(assets);
        self
    }

    pub fn with_price(self, base: &str, price: f64) -> Self {
        self.set_price(base, price);
        self
    }

    pub fn with_ohlcv(self, base: &str, period: PeriodId, closes: &[f64]) -> Self {
        self.set_ohlcv(base, period, closes);
        self
    }

    pub fn set_price(&self, base: &str, price: f64) {
        self.inner.prices.borrow_mut().insert(base.to_string(), price);
    }

    pub fn set_ohlcv(&self, base: &str, period: PeriodId, closes: &[f64]) {
        self.set_candles(base, period, candles(closes));
    }

    pub fn set_candles(&self, base: &str, period: PeriodId, rows: Vec<Candle>) {
        self.inner.ohlcv.borrow_mut().insert((base.to_string(), period), rows);
    }

    /// The next request waits until the returned sender fires or drops.
    pub fn hold_next(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.inner.gates.borrow_mut().push_back(rx);
        tx
    }

    pub fn calls(&self) -> Vec<String> {
        self.inner.calls.borrow().clone()
    }

    async fn enter(&self, call: String) {
        self.inner.calls.borrow_mut().push(call);
        let gate = self.inner.gates.borrow_mut().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }
}

impl MarketDataSource for FakeSource {
    async fn fetch_top_assets(&self) -> TerminalResult<Vec<Asset>> {
        self.enter("top-assets".to_string()).await;
        self.inner.assets.borrow().clone().ok_or_else(|| TerminalError::fetch("top assets fetch failed"))
    }

    async fn fetch_price(&self, base: &Symbol) -> TerminalResult<Price> {
        self.enter(format!("price {}", base)).await;
        self.inner
            .prices
            .borrow()
            .get(base.value())
            .map(|p| Price::new(*p))
            .ok_or_else(|| TerminalError::fetch("price fetch failed"))
    }

    async fn fetch_ohlcv(&self, base: &Symbol, period: PeriodId, limit: u32) -> TerminalResult<Vec<Candle>> {
        self.enter(format!("ohlcv {} {} {}", base, period, limit)).await;
        self.inner
            .ohlcv
            .borrow()
            .get(&(base.value().to_string(), period))
            .cloned()
            .ok_or_else(|| TerminalError::fetch("ohlcv fetch failed"))
    }
}

/// One-minute candles starting at the epoch.
pub fn candles(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, close)| {
            Candle::new(Some(Timestamp::from_millis(60_000 * i as u64)), Price::new(*close), Volume::new(10.0))
        })
        .collect()
}

pub fn utc_config() -> TerminalConfig {
    TerminalConfig { clock: LabelClock::Utc, ..TerminalConfig::default() }
}

pub fn eth() -> Asset {
    Asset::new("ETH", "Ethereum", "")
}
