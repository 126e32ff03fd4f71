//! Forecast chart: line, area fill, axis ticks and the summary panel.

use serde::Serialize;

use crate::layout::{classify_input, ChartLayout, InputShape};
use crate::path::{AreaPath, LinePath};
use crate::samples::ForecastSample;
use crate::scale::ScaleMapper;
use crate::stats::{RiskAccumulator, RiskSummary};
use crate::ticks::{position_ticks, value_ticks, PositionTick, ValueTick};

/// Text shown below the forecast chart
pub const FORECAST_LEGEND: &str = "Predicted forecast for the next 90 days • \
Higher values indicate increased dengue breeding risk";

/// "No data" state shown in place of a chart
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Placeholder {
    pub title: &'static str,
    pub detail: &'static str,
}

impl Placeholder {
    pub const FORECAST: Placeholder = Placeholder {
        title: "No forecast data available",
        detail: "Backend connection may be unavailable",
    };

    pub const HISTORY: Placeholder = Placeholder {
        title: "No prediction history available",
        detail: "Generate predictions to see trends",
    };
}

/// Geometry and statistics for a non-empty forecast
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ForecastChart {
    pub shape: InputShape,
    pub line: LinePath,
    pub area: Option<AreaPath>,
    pub value_ticks: Vec<ValueTick>,
    pub position_ticks: Vec<PositionTick>,
    pub summary: RiskSummary,
    pub legend: &'static str,
}

/// Either the placeholder or a full chart
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ForecastView {
    Placeholder(Placeholder),
    Chart(ForecastChart),
}

impl ForecastView {
    pub fn shape(&self) -> InputShape {
        match self {
            ForecastView::Placeholder(_) => InputShape::Empty,
            ForecastView::Chart(chart) => chart.shape,
        }
    }

    pub fn chart(&self) -> Option<&ForecastChart> {
        match self {
            ForecastView::Placeholder(_) => None,
            ForecastView::Chart(chart) => Some(chart),
        }
    }
}

/// Build the forecast view. Empty input short-circuits to the placeholder.
pub fn build_forecast(
    samples: &[ForecastSample],
    layout: &ChartLayout,
    high_risk_threshold: f64,
) -> ForecastView {
    let shape = classify_input(samples.len());
    if shape.is_empty() {
        tracing::debug!("Forecast is empty, rendering placeholder");
        return ForecastView::Placeholder(Placeholder::FORECAST);
    }

    let mapper = ScaleMapper::new(layout);
    let values: Vec<f64> = samples.iter().map(|s| s.premise_index).collect();

    let line = LinePath::new(mapper.map_all(&values));
    let area = AreaPath::close(&line, mapper.baseline());

    let mut acc = RiskAccumulator::with_threshold(high_risk_threshold);
    acc.extend(values.iter().copied());

    ForecastView::Chart(ForecastChart {
        shape,
        line,
        area,
        value_ticks: value_ticks(&mapper),
        position_ticks: position_ticks(samples, &mapper),
        summary: acc.finish(),
        legend: FORECAST_LEGEND,
    })
}
