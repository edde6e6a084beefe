/// Value Object - point in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Value Object - plotting rectangle inside the canvas, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ChartArea {
    /// Leaves room on the right for price ticks and below for time labels.
    pub const PADDING_LEFT: f64 = 8.0;
    pub const PADDING_TOP: f64 = 12.0;
    pub const AXIS_RIGHT: f64 = 72.0;
    pub const AXIS_BOTTOM: f64 = 26.0;

    pub fn for_canvas(width: f64, height: f64) -> Self {
        let right = (width - Self::AXIS_RIGHT).max(Self::PADDING_LEFT + 1.0);
        let bottom = (height - Self::AXIS_BOTTOM).max(Self::PADDING_TOP + 1.0);
        Self { left: Self::PADDING_LEFT, top: Self::PADDING_TOP, right, bottom }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Value Object - measured size of the tooltip overlay element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlaySize {
    pub width: f64,
    pub height: f64,
}

impl OverlaySize {
    /// Used until the element has been laid out once.
    pub const ESTIMATE: OverlaySize = OverlaySize { width: 160.0, height: 64.0 };
}

/// Value Object - min/max of the value axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Pads by 5% each side; flat series get a unit-wide band.
    pub fn padded(min: f64, max: f64) -> Self {
        if !min.is_finite() || !max.is_finite() {
            return Self { min: 0.0, max: 1.0 };
        }
        let span = max - min;
        if span <= 0.0 {
            return Self { min: min - 0.5, max: max + 0.5 };
        }
        Self { min: min - span * 0.05, max: max + span * 0.05 }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Styling of the crosshair drawn over the active point.
pub mod crosshair_style {
    pub const LINE_COLOR: &str = "rgba(255, 95, 95, 0.7)";
    pub const LINE_WIDTH: f64 = 1.0;
    pub const DASH: [f64; 2] = [5.0, 5.0];
    pub const POINT_COLOR: &str = "#ff5f5f";
    pub const POINT_RADIUS: f64 = 5.0;
    pub const HALO_COLOR: &str = "rgba(255,95,95,0.35)";
    pub const HALO_RADIUS: f64 = 8.0;
    pub const HALO_WIDTH: f64 = 8.0;
}

/// Styling of the line series.
pub mod series_style {
    pub const LINE_COLOR: &str = "#ff3b30";
    pub const LINE_WIDTH: f64 = 2.5;
    pub const FILL_TOP: &str = "rgba(255,95,95,0.30)";
    pub const FILL_BOTTOM: &str = "rgba(255,95,95,0.02)";
    pub const TICK_COLOR: &str = "#848e9c";
    pub const GRID_COLOR: &str = "rgba(255,255,255,0.03)";
    pub const MAX_X_TICKS: usize = 8;
    pub const Y_TICKS: usize = 5;
}
