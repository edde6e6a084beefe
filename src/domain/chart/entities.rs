use super::value_objects::{ChartArea, Point, ValueRange};

/// Persistent line chart.
///
/// Created once per page; refreshes swap its label/value arrays in place so
/// the canvas is redrawn without recreating the instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineChart {
    labels: Vec<String>,
    values: Vec<f64>,
    active_index: Option<usize>,
    revision: u64,
}

impl LineChart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the data arrays. The active point is dropped if it no longer exists.
    pub fn replace_data(&mut self, labels: Vec<String>, values: Vec<f64>) {
        debug_assert_eq!(labels.len(), values.len());
        self.labels = labels;
        self.values = values;
        if self.active_index.is_some_and(|i| i >= self.values.len()) {
            self.active_index = None;
        }
        self.revision += 1;
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bumped on every data swap.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn value_range(&self) -> ValueRange {
        let (lo, hi) = self
            .values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
        ValueRange::padded(lo, hi)
    }

    /// x of data index `index`, spread evenly across the area.
    pub fn index_to_x(&self, index: usize, area: &ChartArea) -> f64 {
        match self.values.len() {
            0 | 1 => area.left + area.width() / 2.0,
            n => area.left + area.width() * index as f64 / (n - 1) as f64,
        }
    }

    pub fn value_to_y(&self, value: f64, range: &ValueRange, area: &ChartArea) -> f64 {
        area.bottom - (value - range.min) / range.span() * area.height()
    }

    pub fn point_at(&self, index: usize, area: &ChartArea) -> Option<Point> {
        let value = *self.values.get(index)?;
        let range = self.value_range();
        Some(Point::new(self.index_to_x(index, area), self.value_to_y(value, &range, area)))
    }

    /// Index-mode hit test: the nearest index by x, regardless of y.
    pub fn nearest_index(&self, x: f64, area: &ChartArea) -> Option<usize> {
        match self.values.len() {
            0 => None,
            1 => Some(0),
            n => {
                let step = area.width() / (n - 1) as f64;
                let raw = ((x - area.left) / step).round();
                Some(raw.clamp(0.0, (n - 1) as f64) as usize)
            }
        }
    }

    /// Activates the point nearest to the cursor; returns the new active index.
    pub fn hover(&mut self, cursor: Point, area: &ChartArea) -> Option<usize> {
        self.active_index = self.nearest_index(cursor.x, area);
        self.active_index
    }

    pub fn clear_active(&mut self) {
        self.active_index = None;
    }
}
