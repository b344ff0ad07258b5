use std::path::Path;

use plotters::prelude::*;
use plotters::style::FontTransform;
use rust_decimal::prelude::ToPrimitive;

use crate::error::ChartError;
use crate::series::CloseSeries;

// Wide-aspect figure, close prices over calendar days.
const CHART_WIDTH: u32 = 1600;
const CHART_HEIGHT: u32 = 400;

/// Render a line chart of closing prices and save it as a PNG at `path`,
/// overwriting any existing file.
///
/// One blue line through the points in series order, a filled circle at
/// each point, grid lines, and the calendar-day strings as rotated x-axis
/// tick labels. An empty series is an error; nothing is written.
pub fn render_close_chart(
    series: &CloseSeries,
    symbol: &str,
    path: &Path,
) -> Result<(), ChartError> {
    if series.is_empty() {
        return Err(ChartError::EmptySeries);
    }

    let closes = series
        .closes
        .iter()
        .map(|c| {
            c.to_f64()
                .ok_or_else(|| ChartError::InvalidData(format!("close {c} not representable")))
        })
        .collect::<Result<Vec<f64>, _>>()?;

    let min_close = closes.iter().copied().fold(f64::INFINITY, f64::min);
    let max_close = closes.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // Pad the y range so the line does not sit on the chart border; the
    // floor keeps the range non-degenerate when all closes are equal.
    let padding = ((max_close - min_close) * 0.1).max(1e-8);
    let y_min = min_close - padding;
    let y_max = max_close + padding;

    // Points are plotted against their series index; tick labels carry
    // the calendar-day strings. A single point still needs a non-empty
    // x range.
    let x_max = (series.len() - 1).max(1);

    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::Backend(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{symbol} Closing Prices (Marketstack)"),
            ("sans-serif", 30),
        )
        .margin(15)
        .x_label_area_size(90)
        .y_label_area_size(60)
        .build_cartesian_2d(0..x_max, y_min..y_max)
        .map_err(|e| ChartError::Backend(e.to_string()))?;

    chart
        .configure_mesh()
        .x_labels(series.len().min(30))
        .x_label_formatter(&|i: &usize| series.dates.get(*i).cloned().unwrap_or_default())
        .x_label_style(("sans-serif", 14).into_font().transform(FontTransform::Rotate90))
        .x_desc("Date")
        .y_desc("Close Price (USD)")
        .draw()
        .map_err(|e| ChartError::Backend(e.to_string()))?;

    let points: Vec<(usize, f64)> = closes.iter().copied().enumerate().collect();

    chart
        .draw_series(LineSeries::new(points.iter().copied(), &BLUE))
        .map_err(|e| ChartError::Backend(e.to_string()))?;
    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, BLUE.filled())),
        )
        .map_err(|e| ChartError::Backend(e.to_string()))?;

    root.present()
        .map_err(|e| ChartError::Backend(e.to_string()))?;

    Ok(())
}
