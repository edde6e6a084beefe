//! SVG area path for the portfolio sparkline (viewBox `0 0 1000 200`).

pub const VIEW_WIDTH: f64 = 1000.0;
pub const VIEW_HEIGHT: f64 = 200.0;
const BASELINE_Y: f64 = 170.0;
const PLOT_HEIGHT: f64 = 120.0;

/// Shown when the BTC series cannot be fetched.
pub const FALLBACK_SERIES: [f64; 10] = [80.0, 82.0, 79.0, 87.0, 84.0, 92.0, 96.0, 94.0, 99.0, 105.0];

#[derive(Debug, Clone, PartialEq)]
pub struct SparklinePath {
    /// Stroke path, `M x,y L x,y ...`
    pub line: String,
    /// Line closed down to the bottom edge.
    pub fill: String,
}

/// Min/max normalization of `values` into the view box. `None` for no data.
pub fn build_path(values: &[f64]) -> Option<SparklinePath> {
    let first = *values.first()?;
    let (min, max) = values.iter().fold((first, first), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let range = if max - min == 0.0 { 1.0 } else { max - min };
    let x_step = if values.len() > 1 { VIEW_WIDTH / (values.len() - 1) as f64 } else { 0.0 };

    let mut line = String::new();
    for (i, v) in values.iter().enumerate() {
        let x = i as f64 * x_step;
        let y = BASELINE_Y - (v - min) / range * PLOT_HEIGHT;
        let cmd = if i == 0 { "M" } else { " L" };
        line.push_str(&format!("{cmd}{x},{y}"));
    }
    let fill = format!("{line} L{VIEW_WIDTH},{VIEW_HEIGHT} L0,{VIEW_HEIGHT} Z");
    Some(SparklinePath { line, fill })
}
