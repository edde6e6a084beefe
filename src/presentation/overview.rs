use leptos::*;

use crate::{
    application::{OverviewSnapshot, hydrate_overview},
    config::OverviewConfig,
    domain::{
        logging::{LogComponent, get_logger},
        portfolio::{HoldingRow, SummaryTexts, balance_display, default_holdings, next_payout_text},
    },
    infrastructure::MarketApiClient,
    number_format::{format_currency, format_pct},
};

/// Portfolio overview: balance cards, holdings table and BTC sparkline.
#[component]
pub fn OverviewApp(config: OverviewConfig) -> impl IntoView {
    let snapshot = create_rw_signal::<Option<OverviewSnapshot>>(None);
    let hidden = create_rw_signal(false);
    let payout = next_payout_text(config.clock.today());

    let client = MarketApiClient::new(config.api_base_url.clone());
    spawn_local(async move {
        let loaded = hydrate_overview(&client, &default_holdings()).await;
        get_logger().info(
            LogComponent::Presentation("OverviewApp"),
            &format!("Overview hydrated (live: {})", loaded.is_live()),
        );
        snapshot.set(Some(loaded));
    });

    let texts = move || snapshot.with(|s| s.as_ref().map(|s| s.texts.clone()));
    let balance = move || {
        let text = texts().map(|t| t.balance).unwrap_or_else(|| "$0.00".to_string());
        balance_display(&text, hidden.get())
    };
    let summary_field = move |pick: fn(SummaryTexts) -> String| texts().map(pick).unwrap_or_default();

    view! {
        <div class="portfolio-overview">
            <div class="balance-card">
                <div class="balance-row">
                    <span class="balance-amount">{balance}</span>
                    <button
                        class="toggle-balance"
                        aria-label="Toggle balance"
                        on:click=move |_| hidden.update(|h| *h = !*h)
                    >
                        {move || if hidden.get() { "Show" } else { "Hide" }}
                    </button>
                </div>
                <div class="balance-pnl">{move || summary_field(|t| t.pnl)}</div>
            </div>
            <div class="profit-card">
                <div class="monthly-profit">{move || summary_field(|t| t.monthly)}</div>
                <div class="next-payout">{payout}</div>
            </div>
            <svg class="overview-chart" viewBox="0 0 1000 200" preserveAspectRatio="none">
                <path
                    class="overview-chart-fill"
                    fill="rgba(155,81,224,0.15)"
                    d=move || snapshot.with(|s| s.as_ref().map(|s| s.sparkline.fill.clone()).unwrap_or_default())
                />
                <path
                    class="overview-chart-line"
                    fill="none"
                    stroke="#9b51e0"
                    stroke-width="3"
                    d=move || snapshot.with(|s| s.as_ref().map(|s| s.sparkline.line.clone()).unwrap_or_default())
                />
            </svg>
            <table class="asset-table">
                <tbody>
                    {move || {
                        snapshot
                            .with(|s| s.as_ref().map(|s| s.rows.clone()).unwrap_or_default())
                            .into_iter()
                            .map(holding_row)
                            .collect_view()
                    }}
                </tbody>
            </table>
        </div>
    }
}

fn holding_row(row: HoldingRow) -> impl IntoView {
    let change_color = if row.is_up() { "var(--success)" } else { "#ff453a" };
    view! {
        <tr>
            <td>
                <div class="asset-info">
                    <div class="asset-icon" style=format!("color:{}", row.holding.color)>{row.icon()}</div>
                    <div>
                        <div>{row.holding.name}</div>
                        <div class="asset-ticker">{row.holding.symbol.to_string()}</div>
                    </div>
                </div>
            </td>
            <td>{format_currency(row.price.value())}</td>
            <td>{format_currency(row.value)}</td>
            <td style=format!("color:{}", change_color)>{format_pct(row.change)}</td>
            <td class="trade-link"><a class="btn-trade" href="/dashboard/">"Trade"</a></td>
        </tr>
    }
}
