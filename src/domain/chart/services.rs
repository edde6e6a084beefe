use super::entities::LineChart;
use super::value_objects::{ChartArea, OverlaySize, Point, series_style};
use crate::domain::market_data::Candle;
use crate::number_format::{format_usd, format_volume};
use crate::time_utils::{LabelClock, format_tooltip_time};

pub const TOOLTIP_OFFSET_X: f64 = 14.0;
pub const TOOLTIP_OFFSET_Y: f64 = 40.0;
pub const TOOLTIP_MIN_TOP: f64 = 8.0;

/// Text lines of the tooltip overlay.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipContent {
    pub time: String,
    pub price: String,
    pub volume: String,
}

impl TooltipContent {
    /// Builds the lines for the hovered row; `fallback_value` is the plotted y
    /// used when the row is unknown.
    pub fn for_row(row: Option<&Candle>, fallback_value: f64, clock: LabelClock) -> Self {
        let time = format_tooltip_time(row.and_then(|r| r.timestamp), clock);
        let price = row.map(|r| r.close.value()).filter(|p| *p != 0.0).unwrap_or(fallback_value);
        let volume = row.map(|r| r.volume.value()).unwrap_or(0.0);
        Self {
            time,
            price: format!("${}", format_usd(price)),
            volume: format!("${}", format_volume(volume)),
        }
    }
}

/// Overlay element state. Hiding only zeroes opacity so the element stays
/// in the layout with its last content and position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipOverlay {
    pub opacity: f64,
    pub left: f64,
    pub top: f64,
    pub content: TooltipContent,
}

impl TooltipOverlay {
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    pub fn hide(&mut self) {
        self.opacity = 0.0;
    }

    /// Shows `content` anchored at `caret`, flipping left on right overflow.
    pub fn show(&mut self, content: TooltipContent, caret: Point, size: OverlaySize, chart_width: f64) {
        let (left, top) = overlay_position(caret, size, chart_width);
        self.content = content;
        self.left = left;
        self.top = top;
        self.opacity = 1.0;
    }
}

/// Anchors 14px right of the caret, or 14px left of it when the overlay
/// would cross the chart's right edge; top never goes above 8px.
pub fn overlay_position(caret: Point, size: OverlaySize, chart_width: f64) -> (f64, f64) {
    let mut left = caret.x + TOOLTIP_OFFSET_X;
    if left + size.width > chart_width {
        left = caret.x - size.width - TOOLTIP_OFFSET_X;
    }
    let top = (caret.y - TOOLTIP_OFFSET_Y).max(TOOLTIP_MIN_TOP);
    (left, top)
}

/// Drawn on every frame while a point is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crosshair {
    pub x: f64,
    pub top: f64,
    pub bottom: f64,
    pub point: Point,
}

pub fn crosshair(chart: &LineChart, area: &ChartArea) -> Option<Crosshair> {
    let index = chart.active_index()?;
    let point = chart.point_at(index, area)?;
    Some(Crosshair { x: point.x, top: area.top, bottom: area.bottom, point })
}

/// Evenly spaced value-axis ticks, `count` of them including both ends.
pub fn y_ticks(chart: &LineChart, count: usize) -> Vec<f64> {
    let range = chart.value_range();
    match count {
        0 => Vec::new(),
        1 => vec![range.min],
        n => (0..n).map(|i| range.min + range.span() * i as f64 / (n - 1) as f64).collect(),
    }
}

/// Indices that get an x-axis label, at most `series_style::MAX_X_TICKS`.
pub fn x_tick_indices(len: usize) -> Vec<usize> {
    let max = series_style::MAX_X_TICKS;
    if len <= max {
        return (0..len).collect();
    }
    let step = len.div_ceil(max);
    (0..len).step_by(step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market_data::{Price, Timestamp, Volume};

    #[test]
    fn anchors_right_of_cursor() {
        let (left, top) = overlay_position(Point::new(100.0, 200.0), OverlaySize { width: 150.0, height: 60.0 }, 800.0);
        assert_eq!((left, top), (114.0, 160.0));
    }

    #[test]
    fn flips_left_on_right_overflow() {
        let (left, _) = overlay_position(Point::new(700.0, 200.0), OverlaySize { width: 150.0, height: 60.0 }, 800.0);
        assert_eq!(left, 700.0 - 150.0 - 14.0);
    }

    #[test]
    fn top_clamps_to_eight() {
        let (_, top) = overlay_position(Point::new(10.0, 20.0), OverlaySize::ESTIMATE, 800.0);
        assert_eq!(top, 8.0);
    }

    #[test]
    fn hide_keeps_content_and_position() {
        let mut overlay = TooltipOverlay::default();
        let content = TooltipContent { time: "t".into(), price: "$1.00".into(), volume: "$0".into() };
        overlay.show(content.clone(), Point::new(50.0, 100.0), OverlaySize::ESTIMATE, 800.0);
        assert!(overlay.is_visible());
        overlay.hide();
        assert_eq!(overlay.opacity, 0.0);
        assert_eq!(overlay.content, content);
        assert_eq!(overlay.left, 64.0);
    }

    #[test]
    fn tooltip_lines() {
        let candle = Candle::new(Some(Timestamp::from_millis(1_700_000_000_000)), Price::new(37012.5), Volume::new(1520.7));
        let content = TooltipContent::for_row(Some(&candle), 0.0, LabelClock::Utc);
        assert_eq!(content.time, "11/14/2023, 10:13:20 PM");
        assert_eq!(content.price, "$37,012.50");
        assert_eq!(content.volume, "$1,521");

        let unknown = TooltipContent::for_row(None, 12.0, LabelClock::Utc);
        assert_eq!(unknown.time, "--");
        assert_eq!(unknown.price, "$12.00");
        assert_eq!(unknown.volume, "$0");
    }

    #[test]
    fn crosshair_only_when_active() {
        let mut chart = LineChart::new();
        chart.replace_data(vec!["a".into(), "b".into()], vec![1.0, 2.0]);
        let area = ChartArea::for_canvas(400.0, 300.0);
        assert!(crosshair(&chart, &area).is_none());
        chart.hover(Point::new(area.right, 0.0), &area);
        let cross = crosshair(&chart, &area).unwrap();
        assert_eq!(cross.x, area.right);
        assert_eq!((cross.top, cross.bottom), (area.top, area.bottom));
    }

    #[test]
    fn tick_helpers() {
        assert_eq!(x_tick_indices(5), vec![0, 1, 2, 3, 4]);
        let idx = x_tick_indices(90);
        assert!(idx.len() <= 8);
        assert_eq!(idx[0], 0);

        let mut chart = LineChart::new();
        chart.replace_data(vec!["a".into(), "b".into()], vec![100.0, 200.0]);
        let ticks = y_ticks(&chart, 5);
        assert_eq!(ticks.len(), 5);
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    }
}
