//! Chart export (SVG, PNG, PDF).
//!
//! All three formats draw the same geometry from the view builders. PNG
//! output is geometry only (grid, fill, line, markers); labels are carried by
//! the SVG and PDF outputs.

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference,
    Point as PdfPoint, Polygon, Rgb,
};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::str::FromStr;
use strum::{AsRefStr, EnumString};

use ::image::{ImageFormat, Rgba, RgbaImage};

use crate::error::ChartError;
use crate::forecast::{ForecastView, Placeholder};
use crate::history::{HistoryView, MARKER_RADIUS};
use crate::layout::ChartLayout;
use crate::render;
use crate::scale::Point;
use crate::ticks::ValueTick;

const BACKGROUND: Rgba<u8> = Rgba([249, 250, 251, 255]);
const GRID: Rgba<u8> = Rgba([229, 231, 235, 255]);
const FORECAST_LINE: [u8; 3] = [79, 70, 229];
const HISTORY_LINE: [u8; 3] = [37, 99, 235];

/// Largest accepted PNG scale factor
pub const MAX_PNG_SCALE: u32 = 16;

/// Largest raster the PNG exporter will allocate
const MAX_PNG_PIXELS: u64 = 1 << 26;

/// Output file format
#[derive(AsRefStr, Clone, Copy, Debug, Default, EnumString, PartialEq, Eq, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
    #[default]
    Svg,
    Png,
    Pdf,
}

impl ExportFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ExportFormat::from_str(ext).ok())
    }
}

/// Format and raster settings for one export
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Pixels per logical unit (PNG only)
    pub png_scale: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Svg,
            png_scale: 4,
        }
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Write the forecast view to `path` in the requested format
pub fn export_forecast(
    view: &ForecastView,
    layout: &ChartLayout,
    path: &Path,
    options: ExportOptions,
) -> Result<(), ChartError> {
    match options.format {
        ExportFormat::Svg => std::fs::write(path, render::forecast_svg(view, layout)?)?,
        ExportFormat::Png => {
            forecast_png(view, layout, options.png_scale)?.save_with_format(path, ImageFormat::Png)?
        }
        ExportFormat::Pdf => forecast_pdf(view, layout, path)?,
    }
    tracing::info!("Exported forecast chart as {} to {:?}", options.format.as_ref(), path);
    Ok(())
}

/// Write the history view to `path` in the requested format
pub fn export_history(
    view: &HistoryView,
    layout: &ChartLayout,
    path: &Path,
    options: ExportOptions,
) -> Result<(), ChartError> {
    match options.format {
        ExportFormat::Svg => std::fs::write(path, render::history_svg(view, layout)?)?,
        ExportFormat::Png => {
            history_png(view, layout, options.png_scale)?.save_with_format(path, ImageFormat::Png)?
        }
        ExportFormat::Pdf => history_pdf(view, layout, path)?,
    }
    tracing::info!("Exported history chart as {} to {:?}", options.format.as_ref(), path);
    Ok(())
}

// ============================================================================
// PNG
// ============================================================================

/// Logical-to-pixel mapping for a raster canvas
struct Raster {
    img: RgbaImage,
    scale: f64,
}

impl Raster {
    fn new(layout: &ChartLayout, scale: u32) -> Result<Self, ChartError> {
        if scale == 0 || scale > MAX_PNG_SCALE {
            return Err(ChartError::InvalidLayout(format!(
                "PNG scale must be between 1 and {}, got {}",
                MAX_PNG_SCALE, scale
            )));
        }
        let width = (layout.width * scale as f64).round().max(1.0);
        let height = (layout.height * scale as f64).round().max(1.0);
        let pixels = width * height;
        if !pixels.is_finite() || pixels > MAX_PNG_PIXELS as f64 {
            return Err(ChartError::InvalidLayout(format!(
                "PNG of {}x{} pixels exceeds the {} pixel limit",
                width, height, MAX_PNG_PIXELS
            )));
        }
        let img = RgbaImage::from_pixel(width as u32, height as u32, BACKGROUND);
        Ok(Self {
            img,
            scale: scale as f64,
        })
    }

    fn px(&self, v: f64) -> i64 {
        (v * self.scale).round() as i64
    }

    fn put(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        let (w, h) = self.img.dimensions();
        if x >= 0 && y >= 0 && x < w as i64 && y < h as i64 {
            self.img.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Alpha-blend `rgb` over the existing pixel
    fn blend(&mut self, x: i64, y: i64, rgb: [u8; 3], alpha: f64) {
        let (w, h) = self.img.dimensions();
        if x < 0 || y < 0 || x >= w as i64 || y >= h as i64 {
            return;
        }
        let dst = self.img.get_pixel(x as u32, y as u32).0;
        let mix = |s: u8, d: u8| (s as f64 * alpha + d as f64 * (1.0 - alpha)).round() as u8;
        self.img.put_pixel(
            x as u32,
            y as u32,
            Rgba([mix(rgb[0], dst[0]), mix(rgb[1], dst[1]), mix(rgb[2], dst[2]), 255]),
        );
    }

    fn line(&mut self, a: Point, b: Point, rgb: [u8; 3], thickness: i64) {
        let color = Rgba([rgb[0], rgb[1], rgb[2], 255]);
        let (w, h) = self.img.dimensions();
        let half = thickness / 2;
        for offset in -half..=half {
            let from = Point::new(a.x * self.scale, a.y * self.scale + offset as f64);
            let to = Point::new(b.x * self.scale, b.y * self.scale + offset as f64);
            let Some((from, to)) = clip_segment(from, to, w as f64 - 1.0, h as f64 - 1.0) else {
                continue;
            };
            draw_line(
                self,
                from.x.round() as i64,
                from.y.round() as i64,
                to.x.round() as i64,
                to.y.round() as i64,
                color,
            );
        }
    }

    fn disc(&mut self, center: Point, radius: f64, fill: [u8; 3]) {
        let cx = center.x * self.scale;
        let cy = center.y * self.scale;
        let r = radius * self.scale;
        let ring = 2.0 * self.scale;
        let fill = Rgba([fill[0], fill[1], fill[2], 255]);
        let white = Rgba([255, 255, 255, 255]);
        let outer = r + ring / 2.0;
        for y in (cy - outer).floor() as i64..=(cy + outer).ceil() as i64 {
            for x in (cx - outer).floor() as i64..=(cx + outer).ceil() as i64 {
                let d = ((x as f64 - cx).powi(2) + (y as f64 - cy).powi(2)).sqrt();
                if d <= r - ring / 2.0 {
                    self.put(x, y, fill);
                } else if d <= outer {
                    self.put(x, y, white);
                }
            }
        }
    }
}

fn png_grid(raster: &mut Raster, layout: &ChartLayout, ticks: &[ValueTick]) {
    let x0 = raster.px(layout.margins.left);
    let x1 = raster.px(layout.width - layout.margins.right);
    for tick in ticks {
        let y = raster.px(tick.y + layout.margins.top);
        for x in x0..=x1 {
            raster.put(x, y, GRID);
        }
    }
}

/// Rasterize the forecast view
pub fn forecast_png(
    view: &ForecastView,
    layout: &ChartLayout,
    scale: u32,
) -> Result<RgbaImage, ChartError> {
    let mut raster = Raster::new(layout, scale)?;
    let Some(chart) = view.chart() else {
        return Ok(raster.img);
    };

    png_grid(&mut raster, layout, &chart.value_ticks);

    let points: Vec<Point> = chart
        .line
        .points
        .iter()
        .map(|&p| layout.to_canvas(p))
        .collect();

    // Area fill fading from 0.3 opacity at the top of the inner area to 0 at the baseline
    let top = layout.margins.top;
    let baseline = layout.margins.top + layout.inner_height();
    let height = raster.img.height() as i64;
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let start = raster.px(a.x);
        let end = raster.px(b.x);
        for px in start..end {
            let x = px as f64 / raster.scale;
            let t = if b.x == a.x {
                0.0
            } else {
                ((x - a.x) / (b.x - a.x)).clamp(0.0, 1.0)
            };
            let y = a.y + t * (b.y - a.y);
            let rows = raster.px(y).max(0)..raster.px(baseline).min(height);
            for py in rows {
                let ly = py as f64 / raster.scale;
                let alpha = 0.3 * (1.0 - ((ly - top) / layout.inner_height()).clamp(0.0, 1.0));
                raster.blend(px, py, FORECAST_LINE, alpha);
            }
        }
    }

    for pair in points.windows(2) {
        raster.line(pair[0], pair[1], FORECAST_LINE, raster.scale as i64);
    }
    if let [single] = points.as_slice() {
        raster.disc(*single, 3.0, FORECAST_LINE);
    }

    Ok(raster.img)
}

/// Rasterize the history view
pub fn history_png(
    view: &HistoryView,
    layout: &ChartLayout,
    scale: u32,
) -> Result<RgbaImage, ChartError> {
    let mut raster = Raster::new(layout, scale)?;
    let Some(chart) = view.chart() else {
        return Ok(raster.img);
    };

    png_grid(&mut raster, layout, &chart.value_ticks);

    if let Some(line) = &chart.line {
        let points: Vec<Point> = line.points.iter().map(|&p| layout.to_canvas(p)).collect();
        for pair in points.windows(2) {
            raster.line(pair[0], pair[1], HISTORY_LINE, raster.scale as i64);
        }
    }
    for marker in &chart.markers {
        raster.disc(layout.to_canvas(marker.point), MARKER_RADIUS, marker.class.rgb());
    }

    Ok(raster.img)
}

/// Clip a pixel-space segment to `[0, max_x] x [0, max_y]` (Liang-Barsky).
/// Returns `None` when the segment misses the rectangle.
fn clip_segment(a: Point, b: Point, max_x: f64, max_y: f64) -> Option<(Point, Point)> {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;

    for (p, q) in [
        (-dx, a.x),
        (dx, max_x - a.x),
        (-dy, a.y),
        (dy, max_y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }

    let at = |t: f64| Point::new(a.x + t * dx, a.y + t * dy);
    let from = if t0 == 0.0 { a } else { at(t0) };
    let to = if t1 == 1.0 { b } else { at(t1) };
    if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
        return None;
    }
    Some((from, to))
}

/// Draw a line between two points using Bresenham's algorithm
fn draw_line(raster: &mut Raster, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgba<u8>) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx: i64 = if x0 < x1 { 1 } else { -1 };
    let sy: i64 = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        raster.put(x, y, color);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

// ============================================================================
// PDF
// ============================================================================

/// A4 landscape page with the logical chart space mapped into it
struct PdfPage {
    layer: PdfLayerReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    /// mm per logical unit
    scale: f64,
    left: f64,
    top: f64,
}

const PAGE_WIDTH: f64 = 297.0;
const PAGE_HEIGHT: f64 = 210.0;
const PAGE_MARGIN: f64 = 20.0;
const CHART_TOP: f64 = 180.0;

fn rgb(c: [u8; 3]) -> Color {
    Color::Rgb(Rgb::new(
        c[0] as f32 / 255.0,
        c[1] as f32 / 255.0,
        c[2] as f32 / 255.0,
        None,
    ))
}

fn pdf_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Pdf(e.to_string())
}

impl PdfPage {
    fn point(&self, layout: &ChartLayout, p: Point) -> PdfPoint {
        let canvas = layout.to_canvas(p);
        self.canvas_point(canvas)
    }

    fn canvas_point(&self, canvas: Point) -> PdfPoint {
        PdfPoint::new(
            Mm((self.left + canvas.x * self.scale) as f32),
            Mm((self.top - canvas.y * self.scale) as f32),
        )
    }

    fn text(&self, text: &str, size: f32, canvas: Point, bold: bool) {
        let font = if bold { &self.font_bold } else { &self.font };
        let x = self.left + canvas.x * self.scale;
        let y = self.top - canvas.y * self.scale;
        self.layer
            .use_text(text, size, Mm(x as f32), Mm(y as f32), font);
    }

    fn text_mm(&self, text: &str, size: f32, x: f64, y: f64) {
        self.layer
            .use_text(text, size, Mm(x as f32), Mm(y as f32), &self.font);
    }

    fn grid(&self, layout: &ChartLayout, ticks: &[ValueTick]) {
        self.layer.set_outline_color(rgb([229, 231, 235]));
        self.layer.set_outline_thickness(0.5);
        self.layer.set_fill_color(rgb([107, 114, 128]));
        for tick in ticks {
            let y = tick.y + layout.margins.top;
            let line = Line {
                points: vec![
                    (self.canvas_point(Point::new(layout.margins.left, y)), false),
                    (
                        self.canvas_point(Point::new(layout.width - layout.margins.right, y)),
                        false,
                    ),
                ],
                is_closed: false,
            };
            self.layer.add_line(line);
            self.text(&tick.label, 7.0, Point::new(layout.margins.left - 30.0, y + 3.0), false);
        }
    }

    fn polyline(&self, layout: &ChartLayout, points: &[Point], color: [u8; 3]) {
        if points.len() < 2 {
            return;
        }
        self.layer.set_outline_color(rgb(color));
        self.layer.set_outline_thickness(1.0);
        let line = Line {
            points: points.iter().map(|&p| (self.point(layout, p), false)).collect(),
            is_closed: false,
        };
        self.layer.add_line(line);
    }

    fn filled(&self, layout: &ChartLayout, outline: &[Point], color: [u8; 3]) {
        self.layer.set_fill_color(rgb(color));
        let polygon = Polygon {
            rings: vec![outline.iter().map(|&p| (self.point(layout, p), false)).collect()],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        };
        self.layer.add_polygon(polygon);
    }

    fn square_marker(&self, layout: &ChartLayout, center: Point, half: f64, color: [u8; 3]) {
        let corners = [
            Point::new(center.x - half, center.y - half),
            Point::new(center.x + half, center.y - half),
            Point::new(center.x + half, center.y + half),
            Point::new(center.x - half, center.y + half),
        ];
        self.filled(layout, &corners, color);
    }
}

fn new_pdf(
    title: &str,
    layout: &ChartLayout,
) -> Result<(printpdf::PdfDocumentReference, PdfPage), ChartError> {
    let (doc, page1, layer1) = PdfDocument::new(title, Mm(297.0), Mm(210.0), "Chart");
    let layer = doc.get_page(page1).get_layer(layer1);
    let font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_err)?;

    let page = PdfPage {
        layer,
        font,
        font_bold,
        scale: (PAGE_WIDTH - 2.0 * PAGE_MARGIN) / layout.width,
        left: PAGE_MARGIN,
        top: CHART_TOP,
    };
    page.layer.use_text(
        title,
        16.0,
        Mm(PAGE_MARGIN as f32),
        Mm((PAGE_HEIGHT - 10.0) as f32),
        &page.font_bold,
    );
    Ok((doc, page))
}

fn save_pdf(doc: printpdf::PdfDocumentReference, path: &Path) -> Result<(), ChartError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer).map_err(pdf_err)?;
    Ok(())
}

fn pdf_placeholder(page: &PdfPage, placeholder: &Placeholder) {
    page.text_mm(placeholder.title, 14.0, PAGE_MARGIN, CHART_TOP - 20.0);
    page.text_mm(placeholder.detail, 10.0, PAGE_MARGIN, CHART_TOP - 28.0);
}

/// Write the forecast view as a one-page PDF
pub fn forecast_pdf(
    view: &ForecastView,
    layout: &ChartLayout,
    path: &Path,
) -> Result<(), ChartError> {
    let (doc, page) = new_pdf("Risk Forecast", layout)?;

    match view {
        ForecastView::Placeholder(p) => pdf_placeholder(&page, p),
        ForecastView::Chart(chart) => {
            page.grid(layout, &chart.value_ticks);

            if let Some(area) = &chart.area {
                page.filled(layout, &area.outline, [224, 222, 250]);
            }
            page.polyline(layout, &chart.line.points, FORECAST_LINE);
            if !chart.line.is_drawable() {
                if let Some(p) = chart.line.first() {
                    page.square_marker(layout, p, 2.0, FORECAST_LINE);
                }
            }

            page.layer.set_fill_color(rgb([107, 114, 128]));
            let label_y = layout.height - layout.margins.bottom + 15.0;
            for tick in &chart.position_ticks {
                page.text(
                    &tick.label,
                    7.0,
                    Point::new(tick.x + layout.margins.left - 8.0, label_y),
                    false,
                );
            }

            // Summary panel below the chart
            let summary_y = page.top - layout.height * page.scale - 15.0;
            let mut x = PAGE_MARGIN;
            for card in chart.summary.cards() {
                page.text_mm(&format!("{}: {}", card.label, card.value), 10.0, x, summary_y);
                x += 65.0;
            }
            page.text_mm(chart.legend, 8.0, PAGE_MARGIN, summary_y - 10.0);
        }
    }

    save_pdf(doc, path)
}

/// Write the history view as a one-page PDF, including the recent list
pub fn history_pdf(
    view: &HistoryView,
    layout: &ChartLayout,
    path: &Path,
) -> Result<(), ChartError> {
    let (doc, page) = new_pdf("Prediction History", layout)?;

    match view {
        HistoryView::Placeholder(p) => pdf_placeholder(&page, p),
        HistoryView::Chart(chart) => {
            page.grid(layout, &chart.value_ticks);
            if let Some(line) = &chart.line {
                page.polyline(layout, &line.points, HISTORY_LINE);
            }
            for marker in &chart.markers {
                page.square_marker(layout, marker.point, 2.5, marker.class.rgb());
            }

            let mut y = page.top - layout.height * page.scale - 15.0;
            for row in &chart.recent {
                page.layer.set_fill_color(rgb(row.class.rgb()));
                let sensor = row
                    .sensor
                    .map(|s| format!("  {} C  {} mm", s.temperature, s.rainfall))
                    .unwrap_or_default();
                page.text_mm(
                    &format!(
                        "{}%  {}  [{}]{}",
                        row.premise_index,
                        row.timestamp,
                        row.class.label(),
                        sensor
                    ),
                    9.0,
                    PAGE_MARGIN,
                    y,
                );
                y -= 6.0;
            }
        }
    }

    save_pdf(doc, path)
}
