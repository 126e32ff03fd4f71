//! SVG markup for the forecast and history views.
//!
//! The markup uses a `viewBox` over the logical layout size, so the embedding
//! page decides the physical size.

use std::fmt::Write;

use crate::error::ChartError;
use crate::forecast::{ForecastView, Placeholder};
use crate::history::{HistoryView, MARKER_RADIUS};
use crate::layout::ChartLayout;
use crate::ticks::ValueTick;

const LABEL_COLOR: &str = "#6b7280";
const FORECAST_LINE_COLOR: &str = "#4f46e5";
const HISTORY_LINE_COLOR: &str = "#2563eb";
const GRID_COLOR: &str = "#e5e7eb";

/// Escape text for use in element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn open_svg(out: &mut String, layout: &ChartLayout) -> Result<(), ChartError> {
    writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100%\" height=\"100%\" viewBox=\"0 0 {} {}\" preserveAspectRatio=\"none\">",
        layout.width, layout.height
    )?;
    Ok(())
}

fn placeholder_svg(layout: &ChartLayout, placeholder: &Placeholder) -> Result<String, ChartError> {
    let mut out = String::new();
    open_svg(&mut out, layout)?;
    let cx = layout.width / 2.0;
    let cy = layout.height / 2.0;
    writeln!(
        out,
        "<text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"{}\" text-anchor=\"middle\">{}</text>",
        cx,
        cy - 8.0,
        LABEL_COLOR,
        escape(placeholder.title)
    )?;
    writeln!(
        out,
        "<text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"{}\" text-anchor=\"middle\">{}</text>",
        cx,
        cy + 12.0,
        LABEL_COLOR,
        escape(placeholder.detail)
    )?;
    writeln!(out, "</svg>")?;
    Ok(out)
}

/// Horizontal grid lines across the inner area with labels in the left margin
fn value_grid(
    out: &mut String,
    layout: &ChartLayout,
    ticks: &[ValueTick],
    label_dy: f64,
) -> Result<(), ChartError> {
    let left = layout.margins.left;
    let right = layout.width - layout.margins.right;
    for tick in ticks {
        let y = tick.y + layout.margins.top;
        writeln!(
            out,
            "<g><line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"0.5\"/><text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"{}\" text-anchor=\"end\">{}</text></g>",
            left,
            y,
            right,
            y,
            GRID_COLOR,
            left - 8.0,
            y + label_dy,
            LABEL_COLOR,
            escape(&tick.label)
        )?;
    }
    Ok(())
}

/// Render the forecast view (placeholder or chart) as an SVG document
pub fn forecast_svg(view: &ForecastView, layout: &ChartLayout) -> Result<String, ChartError> {
    let chart = match view {
        ForecastView::Placeholder(p) => return placeholder_svg(layout, p),
        ForecastView::Chart(chart) => chart,
    };

    let mut out = String::new();
    open_svg(&mut out, layout)?;
    writeln!(
        out,
        "<defs><linearGradient id=\"forecastGradient\" x1=\"0\" x2=\"0\" y1=\"0\" y2=\"1\"><stop offset=\"0%\" stop-color=\"{c}\" stop-opacity=\"0.3\"/><stop offset=\"100%\" stop-color=\"{c}\" stop-opacity=\"0\"/></linearGradient></defs>",
        c = FORECAST_LINE_COLOR
    )?;

    value_grid(&mut out, layout, &chart.value_ticks, 3.0)?;

    let label_y = layout.height - layout.margins.bottom + 15.0;
    for tick in &chart.position_ticks {
        writeln!(
            out,
            "<text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"{}\" text-anchor=\"middle\">{}</text>",
            tick.x + layout.margins.left,
            label_y,
            LABEL_COLOR,
            escape(&tick.label)
        )?;
    }

    writeln!(
        out,
        "<g transform=\"translate({}, {})\">",
        layout.margins.left, layout.margins.top
    )?;
    if chart.line.is_drawable() {
        writeln!(
            out,
            "<polyline fill=\"none\" stroke=\"{}\" stroke-width=\"2\" stroke-linecap=\"round\" stroke-linejoin=\"round\" points=\"{}\"/>",
            FORECAST_LINE_COLOR,
            chart.line.points_attr()
        )?;
    } else if let Some(p) = chart.line.first() {
        writeln!(
            out,
            "<circle cx=\"{}\" cy=\"{}\" r=\"3\" fill=\"{}\"/>",
            p.x, p.y, FORECAST_LINE_COLOR
        )?;
    }
    if let Some(area) = &chart.area {
        writeln!(
            out,
            "<path fill=\"url(#forecastGradient)\" d=\"{}\"/>",
            area.svg_d()
        )?;
    }
    writeln!(out, "</g>")?;
    writeln!(out, "</svg>")?;
    Ok(out)
}

/// Render the history view (placeholder or chart) as an SVG document
pub fn history_svg(view: &HistoryView, layout: &ChartLayout) -> Result<String, ChartError> {
    let chart = match view {
        HistoryView::Placeholder(p) => return placeholder_svg(layout, p),
        HistoryView::Chart(chart) => chart,
    };

    let mut out = String::new();
    open_svg(&mut out, layout)?;
    value_grid(&mut out, layout, &chart.value_ticks, 4.0)?;

    writeln!(
        out,
        "<g transform=\"translate({}, {})\">",
        layout.margins.left, layout.margins.top
    )?;
    if let Some(line) = &chart.line {
        writeln!(
            out,
            "<polyline fill=\"none\" stroke=\"{}\" stroke-width=\"2\" stroke-linecap=\"round\" stroke-linejoin=\"round\" points=\"{}\"/>",
            HISTORY_LINE_COLOR,
            line.points_attr()
        )?;
    }
    for marker in &chart.markers {
        writeln!(
            out,
            "<g data-risk=\"{}\"><circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" stroke=\"white\" stroke-width=\"2\"/><title>{}</title></g>",
            escape(marker.class.label()),
            marker.point.x,
            marker.point.y,
            MARKER_RADIUS,
            marker.color,
            escape(&marker.title)
        )?;
    }
    writeln!(out, "</g>")?;
    writeln!(out, "</svg>")?;
    Ok(out)
}
