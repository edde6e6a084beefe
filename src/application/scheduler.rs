use super::coordinator::TerminalCoordinator;
use crate::domain::{logging::LogComponent, market_data::MarketDataSource};
use gloo_timers::callback::Interval;
use wasm_bindgen_futures::spawn_local;

/// The two polling timers of the terminal. Dropping it stops both.
pub struct RefreshScheduler {
    _full: Interval,
    _price: Interval,
}

impl RefreshScheduler {
    /// Runs a full refresh right away, then every `full_ms`; price-only
    /// refreshes every `price_ms`. Completions may overlap; the coordinator's
    /// ticket check decides which ones land.
    pub fn start<S>(coordinator: TerminalCoordinator<S>, full_ms: u32, price_ms: u32) -> Self
    where
        S: MarketDataSource + 'static,
    {
        crate::log_info!(
            LogComponent::Application("RefreshScheduler"),
            "Polling every {} ms (full) and {} ms (price)",
            full_ms,
            price_ms
        );

        spawn_full_refresh(coordinator.clone());

        let full_target = coordinator.clone();
        let full = Interval::new(full_ms, move || spawn_full_refresh(full_target.clone()));

        let price = Interval::new(price_ms, move || {
            let coordinator = coordinator.clone();
            spawn_local(async move {
                coordinator.refresh_price().await;
            });
        });

        Self { _full: full, _price: price }
    }
}

pub fn spawn_full_refresh<S>(coordinator: TerminalCoordinator<S>)
where
    S: MarketDataSource + 'static,
{
    spawn_local(async move {
        coordinator.refresh_market().await;
    });
}
