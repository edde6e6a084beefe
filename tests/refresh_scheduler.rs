#[cfg(target_arch = "wasm32")]
mod common;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::common::{FakeSource, utc_config};
    use gloo_timers::future::sleep;
    use market_terminal_wasm::application::{RefreshScheduler, TerminalCoordinator};
    use market_terminal_wasm::domain::market_data::PeriodId;
    use std::time::Duration;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const FULL: &str = "ohlcv BTC 1MIN 90";
    const PRICE: &str = "price BTC";

    #[wasm_bindgen_test(async)]
    async fn full_refresh_first_then_both_cadences_until_dropped() {
        let source = FakeSource::new()
            .with_ohlcv("BTC", PeriodId::OneMinute, &[100.0, 101.0])
            .with_price("BTC", 102.0);
        let coordinator = TerminalCoordinator::new(source.clone(), &utc_config());

        let scheduler = RefreshScheduler::start(coordinator.clone(), 60, 10);
        sleep(Duration::from_millis(3)).await;
        assert_eq!(source.calls(), vec![FULL]);

        sleep(Duration::from_millis(150)).await;
        let calls = source.calls();
        assert_eq!(calls[0], FULL);
        assert!(calls.iter().filter(|c| *c == PRICE).count() >= 3);
        assert!(calls.iter().skip(1).any(|c| c == FULL));
        assert_eq!(coordinator.with_state(|s| s.chart().values().len()), 2);

        drop(scheduler);
        sleep(Duration::from_millis(5)).await;
        let stopped_at = source.calls().len();
        sleep(Duration::from_millis(100)).await;
        assert_eq!(source.calls().len(), stopped_at);
    }
}
