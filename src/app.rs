use leptos::html::{Canvas, Div};
use leptos::*;

use crate::{
    application::{RefreshScheduler, TerminalCoordinator, TerminalState},
    config::TerminalConfig,
    domain::{
        chart::{ChartArea, OverlaySize, Point},
        logging::{LogComponent, get_logger},
        market_data::Asset,
        wallet::TradeSide,
    },
    infrastructure::{MarketApiClient, rendering::draw},
};

type Terminal = TerminalCoordinator<MarketApiClient>;

/// Reads terminal state inside a reactive closure, re-running on every change.
fn read<T>(terminal: StoredValue<Terminal>, version: RwSignal<u64>, f: impl FnOnce(&TerminalState) -> T) -> T {
    version.get();
    terminal.with_value(|t| t.with_state(f))
}

fn write<T>(terminal: StoredValue<Terminal>, f: impl FnOnce(&mut TerminalState) -> T) -> T {
    terminal.with_value(|t| t.update(f))
}

/// Live market terminal: pair header, line chart with overlay, asset search
/// and the simulated trade panel.
#[component]
pub fn TerminalApp(config: TerminalConfig) -> impl IntoView {
    let coordinator = TerminalCoordinator::new(MarketApiClient::new(config.api_base_url.clone()), &config);
    let version = create_rw_signal(0u64);
    coordinator.set_listener(move || version.update(|v| *v += 1));

    {
        let coordinator = coordinator.clone();
        spawn_local(async move { coordinator.load_catalog().await });
    }
    let scheduler = RefreshScheduler::start(coordinator.clone(), config.full_refresh_ms, config.price_refresh_ms);
    let _scheduler = store_value(scheduler);

    let terminal = store_value(coordinator);
    get_logger().info(LogComponent::Presentation("TerminalApp"), "Terminal mounted");

    view! {
        <style>{TERMINAL_CSS}</style>
        <div class="market-terminal">
            <PairHeader terminal=terminal version=version />
            <div class="terminal-body">
                <PriceChart terminal=terminal version=version />
                <div class="terminal-side">
                    <AssetSearch terminal=terminal version=version />
                    <TradePanel terminal=terminal version=version />
                </div>
            </div>
        </div>
    }
}

#[component]
fn PairHeader(terminal: StoredValue<Terminal>, version: RwSignal<u64>) -> impl IntoView {
    view! {
        <div class="pair-header">
            <img
                class="pair-logo"
                src=move || read(terminal, version, |s| s.selected().logo_url())
                alt=move || read(terminal, version, |s| s.selected().logo_alt().to_string())
            />
            <div>
                <div class="pair-base">{move || read(terminal, version, |s| s.selected().symbol.to_string())}</div>
                <div class="pair-name">{move || read(terminal, version, |s| s.selected().name.clone())}</div>
            </div>
            <div class="live-price">{move || read(terminal, version, |s| s.live_price_text())}</div>
            <div
                class="live-change"
                class:positive=move || read(terminal, version, |s| s.is_change_positive())
                class:negative=move || !read(terminal, version, |s| s.is_change_positive())
            >
                {move || read(terminal, version, |s| s.live_change_text())}
            </div>
        </div>
    }
}

#[component]
fn PriceChart(terminal: StoredValue<Terminal>, version: RwSignal<u64>) -> impl IntoView {
    let canvas_ref = create_node_ref::<Canvas>();
    let overlay_ref = create_node_ref::<Div>();

    // redraw on every state change; hover and data swaps both land here
    create_effect(move |_| {
        version.get();
        if let Some(canvas) = canvas_ref.get() {
            terminal.with_value(|t| t.with_state(|s| draw(&canvas, s.chart())));
        }
    });

    let handle_mouse_move = move |event: web_sys::MouseEvent| {
        let Some(canvas) = canvas_ref.get_untracked() else {
            return;
        };
        let width = canvas.client_width() as f64;
        let area = ChartArea::for_canvas(width, canvas.client_height() as f64);
        let size = overlay_ref
            .get_untracked()
            .filter(|el| el.offset_width() > 0)
            .map(|el| OverlaySize { width: el.offset_width() as f64, height: el.offset_height() as f64 })
            .unwrap_or(OverlaySize::ESTIMATE);
        let cursor = Point::new(event.offset_x() as f64, event.offset_y() as f64);
        write(terminal, |s| s.hover(cursor, &area, size, width));
    };

    let handle_mouse_leave = move |_event: web_sys::MouseEvent| {
        write(terminal, |s| s.leave_chart());
    };

    view! {
        <div class="chart-wrapper">
            <canvas
                class="price-chart"
                node_ref=canvas_ref
                on:mousemove=handle_mouse_move
                on:mouseleave=handle_mouse_leave
            />
            <div
                class="chart-position-tooltip"
                node_ref=overlay_ref
                style:opacity=move || read(terminal, version, |s| s.overlay().opacity.to_string())
                style:left=move || read(terminal, version, |s| format!("{}px", s.overlay().left))
                style:top=move || read(terminal, version, |s| format!("{}px", s.overlay().top))
            >
                <div class="tooltip-time">{move || read(terminal, version, |s| s.overlay().content.time.clone())}</div>
                <div>"Price: " {move || read(terminal, version, |s| s.overlay().content.price.clone())}</div>
                <div>"Vol: " {move || read(terminal, version, |s| s.overlay().content.volume.clone())}</div>
            </div>
        </div>
    }
}

#[component]
fn AssetSearch(terminal: StoredValue<Terminal>, version: RwSignal<u64>) -> impl IntoView {
    let search_text = create_rw_signal(String::new());
    let open = create_rw_signal(false);

    // once the catalog lands the box shows the current pair
    create_effect(move |_| {
        let (loaded, label) = read(terminal, version, |s| (s.catalog_len() > 0, s.search_label()));
        if loaded && search_text.get_untracked().is_empty() {
            search_text.set(label);
        }
    });

    let results = move || {
        let term = search_text.get();
        read(terminal, version, |s| s.search(&term))
    };

    let choose = move |asset: Asset| {
        search_text.set(asset.search_label());
        open.set(false);
        let coordinator = terminal.get_value();
        spawn_local(async move {
            coordinator.switch_asset(asset).await;
        });
    };

    view! {
        <div class="asset-search">
            <input
                class="asset-search-input"
                placeholder="Search assets"
                prop:value=move || search_text.get()
                on:focus=move |_| open.set(true)
                on:input=move |ev| {
                    search_text.set(event_target_value(&ev));
                    open.set(true);
                }
                on:blur=move |_| open.set(false)
            />
            <div class="asset-search-dropdown" class:show=move || open.get() && !results().is_empty()>
                {move || {
                    results()
                        .into_iter()
                        .map(|asset| {
                            let symbol = asset.symbol.to_string();
                            let name = asset.name.clone();
                            view! {
                                <div class="asset-option" on:mousedown=move |_| choose(asset.clone())>
                                    <span class="asset-symbol">{symbol}</span>
                                    <span class="asset-name">{name}</span>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

#[component]
fn TradePanel(terminal: StoredValue<Terminal>, version: RwSignal<u64>) -> impl IntoView {
    view! {
        <div class="trade-panel">
            <label>"Price (USDT)"</label>
            <input class="trade-price" readonly=true prop:value=move || read(terminal, version, |s| s.trade_price_text()) />

            <label>"Amount"</label>
            <input
                class="trade-amount"
                inputmode="decimal"
                prop:value=move || read(terminal, version, |s| s.trade_amount().to_string())
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    write(terminal, |s| s.set_trade_amount(text));
                }
            />

            <input
                class="trade-range"
                type="range"
                min="0"
                max="100"
                step="1"
                prop:value=move || read(terminal, version, |s| s.trade_fraction().to_string())
                on:input=move |ev| {
                    let percent = event_target_value(&ev).parse::<f64>().unwrap_or(0.0);
                    write(terminal, |s| s.set_trade_fraction(percent));
                }
            />

            <div class="available">
                "Available: " {move || read(terminal, version, |s| s.available_text())}
            </div>

            <div class="trade-buttons">
                <button class="buy-btn" on:click=move |_| write(terminal, |s| s.place_order(TradeSide::Buy))>"Buy"</button>
                <button class="sell-btn" on:click=move |_| write(terminal, |s| s.place_order(TradeSide::Sell))>"Sell"</button>
            </div>

            <div
                class="trade-feedback"
                style:color=move || read(terminal, version, |s| s.feedback().map(|f| f.kind.color()).unwrap_or("#848e9c"))
            >
                {move || read(terminal, version, |s| s.feedback().map(|f| f.message.clone()).unwrap_or_default())}
            </div>
        </div>
    }
}

const TERMINAL_CSS: &str = r#"
.market-terminal {
    font-family: 'Inter', -apple-system, BlinkMacSystemFont, sans-serif;
    background: #0b0e11;
    color: #eaecef;
    padding: 16px;
}
.pair-header { display: flex; align-items: center; gap: 16px; margin-bottom: 12px; }
.pair-logo { width: 32px; height: 32px; border-radius: 50%; }
.pair-base { font-weight: 700; font-size: 18px; }
.pair-name { font-size: 12px; color: #848e9c; }
.live-price { font-size: 22px; font-weight: 700; }
.live-change.positive { color: #32d74b; }
.live-change.negative { color: #ff453a; }
.terminal-body { display: flex; gap: 16px; }
.terminal-side { width: 300px; display: flex; flex-direction: column; gap: 16px; }
.chart-wrapper { position: relative; flex: 1; min-height: 360px; }
.price-chart { width: 100%; height: 360px; cursor: crosshair; display: block; }
.chart-position-tooltip {
    position: absolute;
    pointer-events: none;
    opacity: 0;
    background: rgba(24, 26, 32, 0.95);
    border: 1px solid rgba(255, 95, 95, 0.5);
    border-radius: 6px;
    padding: 6px 10px;
    font-size: 12px;
    line-height: 1.5;
    white-space: nowrap;
    transition: opacity 0.1s;
}
.tooltip-time { color: #848e9c; }
.asset-search { position: relative; }
.asset-search-input { width: 100%; padding: 8px; background: #181a20; color: inherit; border: 1px solid #2b3139; border-radius: 6px; }
.asset-search-dropdown { display: none; position: absolute; top: 100%; left: 0; right: 0; max-height: 280px; overflow-y: auto; background: #181a20; border: 1px solid #2b3139; z-index: 10; }
.asset-search-dropdown.show { display: block; }
.asset-option { display: flex; justify-content: space-between; padding: 6px 10px; cursor: pointer; }
.asset-option:hover { background: #2b3139; }
.asset-name { color: #848e9c; }
.trade-panel { display: flex; flex-direction: column; gap: 8px; }
.trade-panel input { padding: 8px; background: #181a20; color: inherit; border: 1px solid #2b3139; border-radius: 6px; }
.trade-buttons { display: flex; gap: 8px; }
.buy-btn, .sell-btn { flex: 1; padding: 10px; border: none; border-radius: 6px; color: #fff; cursor: pointer; }
.buy-btn { background: #0ecb81; }
.sell-btn { background: #f6465d; }
.available, .trade-feedback { font-size: 12px; }
"#;
