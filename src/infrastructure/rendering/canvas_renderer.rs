use crate::domain::{
    chart::{
        ChartArea, Crosshair, LineChart, crosshair_style, series_style,
        services::{crosshair, x_tick_indices, y_ticks},
    },
    logging::LogComponent,
};
use crate::number_format::format_usd;
use js_sys::Array;
use std::f64::consts::PI;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const TICK_FONT: &str = "11px Inter, Arial, sans-serif";

/// Canvas 2D renderer for the price line chart
pub struct CanvasRenderer {
    context: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    /// Binds to `canvas`, sizing the bitmap to its laid-out box.
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let width = canvas.client_width().max(1) as u32;
        let height = canvas.client_height().max(1) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2D context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("Failed to cast to 2D context"))?;

        Ok(Self { context, width: width as f64, height: height as f64 })
    }

    pub fn area(&self) -> ChartArea {
        ChartArea::for_canvas(self.width, self.height)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Full redraw: grid, ticks, gradient area, line, then the crosshair
    /// when a point is active.
    pub fn render(&self, chart: &LineChart) -> Result<(), JsValue> {
        let ctx = &self.context;
        ctx.clear_rect(0.0, 0.0, self.width, self.height);
        if chart.is_empty() {
            return Ok(());
        }

        let area = self.area();
        self.render_grid_and_ticks(chart, &area)?;
        self.render_series(chart, &area)?;
        if let Some(cross) = crosshair(chart, &area) {
            self.render_crosshair(&cross)?;
        }
        Ok(())
    }

    fn render_grid_and_ticks(&self, chart: &LineChart, area: &ChartArea) -> Result<(), JsValue> {
        let ctx = &self.context;
        let range = chart.value_range();
        ctx.set_font(TICK_FONT);
        ctx.set_line_width(1.0);

        ctx.set_text_align("left");
        ctx.set_text_baseline("middle");
        for tick in y_ticks(chart, series_style::Y_TICKS) {
            let y = chart.value_to_y(tick, &range, area);
            ctx.set_stroke_style(&JsValue::from(series_style::GRID_COLOR));
            ctx.begin_path();
            ctx.move_to(area.left, y);
            ctx.line_to(area.right, y);
            ctx.stroke();
            ctx.set_fill_style(&JsValue::from(series_style::TICK_COLOR));
            ctx.fill_text(&format_usd(tick), area.right + 8.0, y)?;
        }

        ctx.set_text_align("center");
        ctx.set_text_baseline("top");
        for index in x_tick_indices(chart.len()) {
            let x = chart.index_to_x(index, area);
            ctx.set_stroke_style(&JsValue::from(series_style::GRID_COLOR));
            ctx.begin_path();
            ctx.move_to(x, area.top);
            ctx.line_to(x, area.bottom);
            ctx.stroke();
            if let Some(label) = chart.labels().get(index) {
                ctx.set_fill_style(&JsValue::from(series_style::TICK_COLOR));
                ctx.fill_text(label, x, area.bottom + 8.0)?;
            }
        }
        Ok(())
    }

    fn render_series(&self, chart: &LineChart, area: &ChartArea) -> Result<(), JsValue> {
        let ctx = &self.context;
        let range = chart.value_range();
        let points: Vec<(f64, f64)> = chart
            .values()
            .iter()
            .enumerate()
            .map(|(i, v)| (chart.index_to_x(i, area), chart.value_to_y(*v, &range, area)))
            .collect();
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Ok(());
        };

        let gradient = ctx.create_linear_gradient(0.0, area.top, 0.0, area.bottom);
        gradient.add_color_stop(0.0, series_style::FILL_TOP)?;
        gradient.add_color_stop(1.0, series_style::FILL_BOTTOM)?;
        ctx.begin_path();
        ctx.move_to(first.0, area.bottom);
        for (x, y) in &points {
            ctx.line_to(*x, *y);
        }
        ctx.line_to(last.0, area.bottom);
        ctx.close_path();
        ctx.set_fill_style(&gradient);
        ctx.fill();

        ctx.begin_path();
        ctx.move_to(first.0, first.1);
        for (x, y) in points.iter().skip(1) {
            ctx.line_to(*x, *y);
        }
        ctx.set_stroke_style(&JsValue::from(series_style::LINE_COLOR));
        ctx.set_line_width(series_style::LINE_WIDTH);
        ctx.stroke();
        Ok(())
    }

    fn render_crosshair(&self, cross: &Crosshair) -> Result<(), JsValue> {
        let ctx = &self.context;
        ctx.save();

        let dash = Array::of2(&crosshair_style::DASH[0].into(), &crosshair_style::DASH[1].into());
        ctx.set_line_dash(&dash)?;
        ctx.set_stroke_style(&JsValue::from(crosshair_style::LINE_COLOR));
        ctx.set_line_width(crosshair_style::LINE_WIDTH);
        ctx.begin_path();
        ctx.move_to(cross.x, cross.top);
        ctx.line_to(cross.x, cross.bottom);
        ctx.stroke();
        ctx.set_line_dash(&Array::new())?;

        ctx.set_fill_style(&JsValue::from(crosshair_style::POINT_COLOR));
        ctx.begin_path();
        ctx.arc(cross.point.x, cross.point.y, crosshair_style::POINT_RADIUS, 0.0, PI * 2.0)?;
        ctx.fill();

        ctx.set_stroke_style(&JsValue::from(crosshair_style::HALO_COLOR));
        ctx.set_line_width(crosshair_style::HALO_WIDTH);
        ctx.begin_path();
        ctx.arc(cross.point.x, cross.point.y, crosshair_style::HALO_RADIUS, 0.0, PI * 2.0)?;
        ctx.stroke();

        ctx.restore();
        Ok(())
    }
}

/// Draws `chart` onto `canvas`, logging instead of failing.
pub fn draw(canvas: &HtmlCanvasElement, chart: &LineChart) -> Option<CanvasRenderer> {
    let result = CanvasRenderer::from_canvas(canvas).and_then(|renderer| renderer.render(chart).map(|_| renderer));
    match result {
        Ok(renderer) => Some(renderer),
        Err(e) => {
            crate::log_error!(LogComponent::Infrastructure("CanvasRenderer"), "Chart render failed: {:?}", e);
            None
        }
    }
}
