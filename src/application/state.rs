use crate::config::TerminalConfig;
use crate::domain::{
    chart::{ChartArea, LineChart, OverlaySize, Point, TooltipContent, TooltipOverlay},
    errors::{TerminalError, TerminalResult, ValidationError},
    logging::{LogComponent, get_logger},
    market_data::{Asset, AssetCatalog, Candle, CandleSeries, Price, Symbol},
    wallet::{TradeFill, TradeSide, Wallet, format_amount_input, parse_amount_input},
};
use crate::number_format::{format_fixed, format_pct, format_usd};
use crate::time_utils::{LabelClock, format_time_label};
use strum::Display;

pub const CATALOG_UNAVAILABLE: &str = "Top-100 list unavailable right now.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FeedbackKind {
    Info,
    Success,
    Error,
}

impl FeedbackKind {
    pub fn color(&self) -> &'static str {
        match self {
            Self::Info => "#848e9c",
            Self::Success => "#32d74b",
            Self::Error => "#ff453a",
        }
    }
}

/// The status line under the trade panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub message: String,
    pub kind: FeedbackKind,
}

impl Feedback {
    pub fn new(message: impl Into<String>, kind: FeedbackKind) -> Self {
        Self { message: message.into(), kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum RefreshKind {
    Full,
    Price,
}

/// Issued before a refresh request goes out; checked when it comes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTicket {
    pub kind: RefreshKind,
    pub sequence: u64,
    /// Selection epoch at issue time; bumped on every asset switch.
    pub epoch: u64,
    pub symbol: Symbol,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RefreshOutcome {
    Applied,
    /// Superseded by a newer result or issued for a previous selection.
    Stale,
    Aborted,
    Failed,
}

/// All mutable widget state, owned by one coordinator.
///
/// Results are only applied through a `RefreshTicket`: a ticket from a
/// previous selection, or one older than the last applied result of the
/// same kind, is dropped.
#[derive(Debug, Clone)]
pub struct TerminalState {
    clock: LabelClock,
    selected: Asset,
    epoch: u64,
    next_sequence: u64,
    applied_chart_sequence: u64,
    applied_price_sequence: u64,
    chart: LineChart,
    series: Option<CandleSeries>,
    live_price: Option<Price>,
    live_change: Option<f64>,
    wallet: Wallet,
    catalog: AssetCatalog,
    feedback: Option<Feedback>,
    trade_amount: String,
    trade_fraction: f64,
    overlay: TooltipOverlay,
    hover_geometry: Option<HoverGeometry>,
}

/// Layout measured at the last pointer move, reused when data changes
/// under a visible overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
struct HoverGeometry {
    area: ChartArea,
    size: OverlaySize,
    chart_width: f64,
}

impl TerminalState {
    pub fn new(config: &TerminalConfig) -> Self {
        Self {
            clock: config.clock,
            selected: config.default_asset.clone(),
            epoch: 0,
            next_sequence: 0,
            applied_chart_sequence: 0,
            applied_price_sequence: 0,
            chart: LineChart::new(),
            series: None,
            live_price: None,
            live_change: None,
            wallet: config.initial_wallet(),
            catalog: AssetCatalog::default(),
            feedback: None,
            trade_amount: String::new(),
            trade_fraction: 0.0,
            overlay: TooltipOverlay::default(),
            hover_geometry: None,
        }
    }

    pub fn selected(&self) -> &Asset {
        &self.selected
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn chart(&self) -> &LineChart {
        &self.chart
    }

    pub fn series(&self) -> Option<&CandleSeries> {
        self.series.as_ref()
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn overlay(&self) -> &TooltipOverlay {
        &self.overlay
    }

    pub fn trade_amount(&self) -> &str {
        &self.trade_amount
    }

    pub fn trade_fraction(&self) -> f64 {
        self.trade_fraction
    }

    pub fn live_price(&self) -> Option<Price> {
        self.live_price
    }

    pub fn live_change(&self) -> Option<f64> {
        self.live_change
    }

    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }

    pub fn set_feedback(&mut self, message: impl Into<String>, kind: FeedbackKind) {
        self.feedback = Some(Feedback::new(message, kind));
    }

    // -- refresh guard --

    pub fn begin_refresh(&mut self, kind: RefreshKind) -> RefreshTicket {
        self.next_sequence += 1;
        RefreshTicket { kind, sequence: self.next_sequence, epoch: self.epoch, symbol: self.selected.symbol.clone() }
    }

    /// Still issued for the current selection.
    pub fn is_current(&self, ticket: &RefreshTicket) -> bool {
        ticket.epoch == self.epoch && ticket.symbol == self.selected.symbol
    }

    /// Applies a full refresh result: chart data, live price and change.
    ///
    /// An empty row set is a failure and leaves the chart untouched.
    pub fn apply_candles(&mut self, ticket: &RefreshTicket, result: TerminalResult<Vec<Candle>>) -> RefreshOutcome {
        if !self.is_current(ticket) || ticket.sequence <= self.applied_chart_sequence {
            return RefreshOutcome::Stale;
        }
        let base = ticket.symbol.clone();
        let series = match result.and_then(CandleSeries::from_candles) {
            Ok(series) => series,
            Err(e) => {
                get_logger().error(
                    LogComponent::Application("TerminalState"),
                    &format!("Full refresh #{} for {} failed: {}", ticket.sequence, base, e),
                );
                self.set_feedback(format!("Live chart unavailable for {}.", base), FeedbackKind::Error);
                return RefreshOutcome::Failed;
            }
        };

        let labels = series.get_candles().iter().map(|c| format_time_label(c.timestamp, self.clock)).collect();
        self.chart.replace_data(labels, series.closes());
        self.live_change = Some(series.change_pct());
        if ticket.sequence > self.applied_price_sequence {
            self.set_price(series.latest_close(), ticket.sequence);
        }
        self.applied_chart_sequence = ticket.sequence;
        self.series = Some(series);
        self.refresh_overlay();
        self.set_feedback(format!("Market data live for {}.", base), FeedbackKind::Success);
        RefreshOutcome::Applied
    }

    /// Applies a price-only refresh; failures are logged, not shown.
    pub fn apply_price(&mut self, ticket: &RefreshTicket, result: TerminalResult<Price>) -> RefreshOutcome {
        if !self.is_current(ticket) || ticket.sequence <= self.applied_price_sequence {
            return RefreshOutcome::Stale;
        }
        match result {
            Ok(price) if self.set_price(price, ticket.sequence) => RefreshOutcome::Applied,
            Ok(price) => {
                get_logger().warn(
                    LogComponent::Application("TerminalState"),
                    &format!("Ignoring unusable price {} for {}", price.value(), ticket.symbol),
                );
                RefreshOutcome::Failed
            }
            Err(e) => {
                get_logger().error(
                    LogComponent::Application("TerminalState"),
                    &format!("Price refresh #{} for {} failed: {}", ticket.sequence, ticket.symbol, e),
                );
                RefreshOutcome::Failed
            }
        }
    }

    fn set_price(&mut self, price: Price, sequence: u64) -> bool {
        if !self.wallet.set_last_price(price) {
            return false;
        }
        self.live_price = Some(price);
        self.applied_price_sequence = sequence;
        true
    }

    // -- selection and search --

    /// Switches the displayed pair. Tickets issued before this call go stale.
    pub fn select_asset(&mut self, asset: Asset) {
        self.epoch += 1;
        self.wallet.set_base_asset(asset.symbol.clone());
        get_logger().info(
            LogComponent::Application("TerminalState"),
            &format!("Selected {} (epoch {})", asset.symbol, self.epoch),
        );
        self.selected = asset;
    }

    pub fn set_catalog(&mut self, assets: Vec<Asset>) {
        self.catalog.replace(assets);
    }

    pub fn catalog_failed(&mut self, error: &TerminalError) {
        get_logger().error(LogComponent::Application("TerminalState"), &format!("Top assets failed: {}", error));
        self.set_feedback(CATALOG_UNAVAILABLE, FeedbackKind::Error);
    }

    pub fn search(&self, term: &str) -> Vec<Asset> {
        self.catalog.filter(term)
    }

    pub fn search_label(&self) -> String {
        self.selected.search_label()
    }

    // -- trade panel --

    /// Slider moved: fills the amount input with the affordable base amount.
    pub fn set_trade_fraction(&mut self, percent: f64) {
        self.trade_fraction = if percent.is_finite() { percent.clamp(0.0, 100.0) } else { 0.0 };
        self.trade_amount = format_amount_input(self.wallet.amount_for_fraction(self.trade_fraction));
    }

    pub fn set_trade_amount(&mut self, text: impl Into<String>) {
        self.trade_amount = text.into();
    }

    pub fn buy(&mut self) -> Result<TradeFill, ValidationError> {
        let amount = parse_amount_input(&self.trade_amount);
        let result = self.wallet.buy(amount);
        self.finish_trade(result)
    }

    pub fn sell(&mut self) -> Result<TradeFill, ValidationError> {
        let amount = parse_amount_input(&self.trade_amount);
        let result = self.wallet.sell(amount);
        self.finish_trade(result)
    }

    /// Buy or Sell button: the outcome is reported through the feedback line.
    pub fn place_order(&mut self, side: TradeSide) {
        let filled = match side {
            TradeSide::Buy => self.buy(),
            TradeSide::Sell => self.sell(),
        };
        if let Err(e) = filled {
            get_logger().info(LogComponent::Application("TerminalState"), &format!("{} rejected: {}", side, e));
        }
    }

    fn finish_trade(&mut self, result: Result<TradeFill, ValidationError>) -> Result<TradeFill, ValidationError> {
        match &result {
            Ok(fill) => {
                self.trade_amount.clear();
                self.trade_fraction = 0.0;
                self.set_feedback(fill.confirmation(), FeedbackKind::Success);
                get_logger().info(
                    LogComponent::Application("TerminalState"),
                    &format!("{} {} @ {}", fill.side, fill.amount, fill.price.value()),
                );
            }
            Err(e) => self.set_feedback(e.to_string(), FeedbackKind::Error),
        }
        result
    }

    // -- chart pointer --

    /// Pointer moved over the chart: activates the nearest point and moves
    /// the overlay next to it. Hides the overlay when there is no point.
    pub fn hover(&mut self, cursor: Point, area: &ChartArea, size: OverlaySize, chart_width: f64) {
        self.hover_geometry = Some(HoverGeometry { area: *area, size, chart_width });
        let Some(index) = self.chart.hover(cursor, area) else {
            self.overlay.hide();
            return;
        };
        match (self.chart.point_at(index, area), self.tooltip_content(index)) {
            (Some(caret), Some(content)) => self.overlay.show(content, caret, size, chart_width),
            _ => self.overlay.hide(),
        }
    }

    pub fn leave_chart(&mut self) {
        self.hover_geometry = None;
        self.chart.clear_active();
        self.overlay.hide();
    }

    pub fn tooltip_content(&self, index: usize) -> Option<TooltipContent> {
        let value = *self.chart.values().get(index)?;
        let row = self.series.as_ref().and_then(|s| s.get(index));
        Some(TooltipContent::for_row(row, value, self.clock))
    }

    // new data under a visible overlay: same index, new text and position
    fn refresh_overlay(&mut self) {
        if !self.overlay.is_visible() {
            return;
        }
        let target = self.chart.active_index().zip(self.hover_geometry).and_then(|(index, geometry)| {
            let caret = self.chart.point_at(index, &geometry.area)?;
            let content = self.tooltip_content(index)?;
            Some((content, caret, geometry))
        });
        match target {
            Some((content, caret, geometry)) => self.overlay.show(content, caret, geometry.size, geometry.chart_width),
            None => self.overlay.hide(),
        }
    }

    // -- display strings --

    pub fn live_price_text(&self) -> String {
        format!("${}", format_usd(self.wallet.last_price().value()))
    }

    /// Value for the read-only price input, two decimals.
    pub fn trade_price_text(&self) -> String {
        format_fixed(self.wallet.last_price().value(), 2)
    }

    pub fn live_change_text(&self) -> String {
        format_pct(self.live_change.unwrap_or(0.0))
    }

    pub fn is_change_positive(&self) -> bool {
        self.live_change.unwrap_or(0.0) >= 0.0
    }

    pub fn available_text(&self) -> String {
        format!("{} {}", format_usd(self.wallet.quote_balance()), self.wallet.quote_asset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::overlay_position;
    use crate::domain::market_data::{Timestamp, Volume};

    fn state() -> TerminalState {
        TerminalState::new(&TerminalConfig { clock: LabelClock::Utc, ..TerminalConfig::default() })
    }

    fn candles(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, c)| Candle::new(Some(Timestamp::from_millis(60_000 * i as u64)), Price::new(*c), Volume::new(5.0)))
            .collect()
    }

    #[test]
    fn full_refresh_sets_chart_price_and_change() {
        let mut s = state();
        let ticket = s.begin_refresh(RefreshKind::Full);
        assert_eq!(s.apply_candles(&ticket, Ok(candles(&[100.0, 110.0]))), RefreshOutcome::Applied);
        assert_eq!(s.chart().values(), &[100.0, 110.0]);
        assert_eq!(s.chart().labels(), &["00:00".to_string(), "00:01".to_string()]);
        assert_eq!(s.live_change_text(), "+10.00%");
        assert_eq!(s.live_price_text(), "$110.00");
        assert_eq!(s.trade_price_text(), "110.00");
        assert_eq!(s.feedback().unwrap().message, "Market data live for BTC.");
    }

    #[test]
    fn empty_rows_keep_previous_chart() {
        let mut s = state();
        let first = s.begin_refresh(RefreshKind::Full);
        s.apply_candles(&first, Ok(candles(&[1.0, 2.0])));
        let revision = s.chart().revision();

        let second = s.begin_refresh(RefreshKind::Full);
        assert_eq!(s.apply_candles(&second, Ok(Vec::new())), RefreshOutcome::Failed);
        assert_eq!(s.chart().values(), &[1.0, 2.0]);
        assert_eq!(s.chart().revision(), revision);
        let feedback = s.feedback().unwrap();
        assert_eq!(feedback.kind, FeedbackKind::Error);
        assert_eq!(feedback.message, "Live chart unavailable for BTC.");
    }

    #[test]
    fn older_full_refresh_does_not_override_newer_price() {
        let mut s = state();
        let full = s.begin_refresh(RefreshKind::Full);
        let price = s.begin_refresh(RefreshKind::Price);
        assert_eq!(s.apply_price(&price, Ok(Price::new(70_000.0))), RefreshOutcome::Applied);
        assert_eq!(s.apply_candles(&full, Ok(candles(&[60_000.0, 65_000.0]))), RefreshOutcome::Applied);
        assert_eq!(s.live_price(), Some(Price::new(70_000.0)));
        assert_eq!(s.chart().len(), 2);
    }

    #[test]
    fn tickets_from_previous_selection_are_stale() {
        let mut s = state();
        let ticket = s.begin_refresh(RefreshKind::Price);
        s.select_asset(Asset::new("ETH", "Ethereum", ""));
        assert_eq!(s.apply_price(&ticket, Ok(Price::new(1.0))), RefreshOutcome::Stale);
        assert_eq!(s.wallet().base_asset().value(), "ETH");
    }

    #[test]
    fn failed_price_keeps_last_value() {
        let mut s = state();
        let ticket = s.begin_refresh(RefreshKind::Price);
        let outcome = s.apply_price(&ticket, Err(TerminalError::fetch("price fetch failed")));
        assert_eq!(outcome, RefreshOutcome::Failed);
        assert_eq!(s.live_price_text(), "$64,321.00");
        assert!(s.feedback().is_none());
    }

    #[test]
    fn slider_fills_amount_and_trade_resets_inputs() {
        let mut s = state();
        s.set_trade_fraction(100.0);
        assert_eq!(s.trade_amount(), "0.000777");
        let fill = s.buy().unwrap();
        assert!(fill.notional <= 50.0);
        assert_eq!(s.trade_amount(), "");
        assert_eq!(s.trade_fraction(), 0.0);
        assert_eq!(s.feedback().unwrap().message, "Buy order executed (simulation).");

        s.set_trade_amount("1");
        assert!(s.sell().is_err());
        assert_eq!(s.feedback().unwrap().message, "Not enough BTC for this sell.");
        assert_eq!(s.trade_amount(), "1");
    }

    #[test]
    fn order_buttons_report_through_feedback() {
        let mut s = state();
        s.place_order(TradeSide::Buy);
        let feedback = s.feedback().unwrap();
        assert_eq!(feedback.kind, FeedbackKind::Error);
        assert_eq!(feedback.message, "Enter a valid buy amount.");

        s.set_trade_amount("0.0001");
        s.place_order(TradeSide::Buy);
        assert_eq!(s.feedback().unwrap().kind, FeedbackKind::Success);
        assert!((s.wallet().base_balance() - 0.0001).abs() < 1e-12);

        s.set_trade_amount("0.0001");
        s.place_order(TradeSide::Sell);
        assert_eq!(s.feedback().unwrap().message, "Sell order executed (simulation).");
        assert_eq!(s.wallet().base_balance(), 0.0);
    }

    #[test]
    fn catalog_failure_message() {
        let mut s = state();
        s.catalog_failed(&TerminalError::fetch("top assets fetch failed"));
        assert_eq!(s.feedback().unwrap().message, CATALOG_UNAVAILABLE);
    }

    #[test]
    fn hover_shows_and_leave_hides_overlay() {
        let mut s = state();
        let ticket = s.begin_refresh(RefreshKind::Full);
        s.apply_candles(&ticket, Ok(candles(&[100.0, 110.0, 105.0])));
        let area = ChartArea::for_canvas(600.0, 300.0);
        s.hover(Point::new(area.left, 100.0), &area, OverlaySize::ESTIMATE, 600.0);
        assert!(s.overlay().is_visible());
        assert_eq!(s.overlay().content.price, "$100.00");

        s.leave_chart();
        assert_eq!(s.overlay().opacity, 0.0);
        assert_eq!(s.chart().active_index(), None);
    }

    #[test]
    fn visible_overlay_follows_point_when_data_changes() {
        let mut s = state();
        let ticket = s.begin_refresh(RefreshKind::Full);
        s.apply_candles(&ticket, Ok(candles(&[100.0, 110.0, 105.0])));
        let area = ChartArea::for_canvas(600.0, 300.0);
        let middle = s.chart().point_at(1, &area).unwrap();
        s.hover(Point::new(middle.x, 0.0), &area, OverlaySize::ESTIMATE, 600.0);
        let before = (s.overlay().left, s.overlay().top);

        let ticket = s.begin_refresh(RefreshKind::Full);
        s.apply_candles(&ticket, Ok(candles(&[100.0, 90.0, 105.0])));

        let moved = s.chart().point_at(1, &area).unwrap();
        let expected = overlay_position(moved, OverlaySize::ESTIMATE, 600.0);
        assert!(s.overlay().is_visible());
        assert_eq!(s.overlay().content.price, "$90.00");
        assert_eq!((s.overlay().left, s.overlay().top), expected);
        assert_ne!((s.overlay().left, s.overlay().top), before);
    }
}
