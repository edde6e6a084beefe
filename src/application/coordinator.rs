use super::state::{RefreshKind, RefreshOutcome, TerminalState};
use crate::config::TerminalConfig;
use crate::domain::{
    logging::{LogComponent, get_logger},
    market_data::{Asset, MarketDataSource, PeriodId},
};
use futures::future::{AbortHandle, Abortable};
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

type ChangeListener = Rc<dyn Fn()>;

/// Drives the terminal: issues refreshes against a `MarketDataSource`,
/// applies their results to the shared `TerminalState` and aborts requests
/// left over from a previous asset selection.
///
/// Cheap to clone; clones share state, source and in-flight requests.
pub struct TerminalCoordinator<S> {
    state: Rc<RefCell<TerminalState>>,
    source: Rc<S>,
    period: PeriodId,
    limit: u32,
    in_flight: Rc<RefCell<HashMap<u64, AbortHandle>>>,
    listener: Rc<RefCell<Option<ChangeListener>>>,
}

impl<S> Clone for TerminalCoordinator<S> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            source: Rc::clone(&self.source),
            period: self.period,
            limit: self.limit,
            in_flight: Rc::clone(&self.in_flight),
            listener: Rc::clone(&self.listener),
        }
    }
}

impl<S: MarketDataSource> TerminalCoordinator<S> {
    pub fn new(source: S, config: &TerminalConfig) -> Self {
        get_logger().info(
            LogComponent::Application("TerminalCoordinator"),
            &format!("Creating terminal for {}", config.default_asset.symbol),
        );
        Self {
            state: Rc::new(RefCell::new(TerminalState::new(config))),
            source: Rc::new(source),
            period: config.ohlcv_period,
            limit: config.ohlcv_limit,
            in_flight: Rc::new(RefCell::new(HashMap::new())),
            listener: Rc::new(RefCell::new(None)),
        }
    }

    /// Called after every state change, e.g. to bump a view signal.
    pub fn set_listener(&self, listener: impl Fn() + 'static) {
        *self.listener.borrow_mut() = Some(Rc::new(listener));
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&TerminalState) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Mutates the state and notifies the listener.
    pub fn update<R>(&self, f: impl FnOnce(&mut TerminalState) -> R) -> R {
        let result = f(&mut self.state.borrow_mut());
        self.notify();
        result
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.borrow().len()
    }

    fn notify(&self) {
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener();
        }
    }

    /// Runs `fut` under an abort handle keyed by `sequence`; `None` if aborted.
    async fn run_abortable<F: Future>(&self, sequence: u64, fut: F) -> Option<F::Output> {
        let (handle, registration) = AbortHandle::new_pair();
        self.in_flight.borrow_mut().insert(sequence, handle);
        let result = Abortable::new(fut, registration).await;
        self.in_flight.borrow_mut().remove(&sequence);
        result.ok()
    }

    /// Candles, chart, live price and change for the selected asset.
    pub async fn refresh_market(&self) -> RefreshOutcome {
        let ticket = self.state.borrow_mut().begin_refresh(RefreshKind::Full);
        crate::log_trace!(
            LogComponent::Application("TerminalCoordinator"),
            "Full refresh #{} for {}",
            ticket.sequence,
            ticket.symbol
        );

        let request = self.source.fetch_ohlcv(&ticket.symbol, self.period, self.limit);
        let Some(result) = self.run_abortable(ticket.sequence, request).await else {
            return RefreshOutcome::Aborted;
        };
        let outcome = self.state.borrow_mut().apply_candles(&ticket, result);
        self.log_outcome(&ticket.kind, ticket.sequence, outcome);
        self.notify();
        outcome
    }

    /// Live price only.
    pub async fn refresh_price(&self) -> RefreshOutcome {
        let ticket = self.state.borrow_mut().begin_refresh(RefreshKind::Price);
        let request = self.source.fetch_price(&ticket.symbol);
        let Some(result) = self.run_abortable(ticket.sequence, request).await else {
            return RefreshOutcome::Aborted;
        };
        let outcome = self.state.borrow_mut().apply_price(&ticket, result);
        self.log_outcome(&ticket.kind, ticket.sequence, outcome);
        self.notify();
        outcome
    }

    /// Fetches the search catalog once; failure only sets the feedback line.
    pub async fn load_catalog(&self) {
        match self.source.fetch_top_assets().await {
            Ok(assets) => {
                get_logger().info(
                    LogComponent::Application("TerminalCoordinator"),
                    &format!("Loaded {} assets", assets.len()),
                );
                self.state.borrow_mut().set_catalog(assets);
            }
            Err(e) => self.state.borrow_mut().catalog_failed(&e),
        }
        self.notify();
    }

    /// Aborts every in-flight request and switches the selection.
    pub fn select_asset(&self, asset: Asset) {
        let aborted: Vec<AbortHandle> = self.in_flight.borrow_mut().drain().map(|(_, h)| h).collect();
        if !aborted.is_empty() {
            get_logger().info(
                LogComponent::Application("TerminalCoordinator"),
                &format!("Aborting {} in-flight requests", aborted.len()),
            );
        }
        for handle in aborted {
            handle.abort();
        }
        self.update(|state| state.select_asset(asset));
    }

    /// Selection from the search dropdown: switch, then refresh the new pair.
    pub async fn switch_asset(&self, asset: Asset) -> RefreshOutcome {
        self.select_asset(asset);
        self.refresh_market().await
    }

    fn log_outcome(&self, kind: &RefreshKind, sequence: u64, outcome: RefreshOutcome) {
        if outcome == RefreshOutcome::Stale {
            crate::log_debug!(
                LogComponent::Application("TerminalCoordinator"),
                "Dropped stale {} result #{}",
                kind,
                sequence
            );
        }
    }
}
