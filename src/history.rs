//! Prediction history chart and the recent-predictions list.
//!
//! Predictions arrive newest first. The chart plots them left to right in
//! chronological order; the list keeps the delivered order.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classify::PointClass;
use crate::forecast::Placeholder;
use crate::layout::{classify_input, ChartLayout, InputShape};
use crate::path::LinePath;
use crate::samples::{Prediction, SensorReadings};
use crate::scale::{Point, ScaleMapper};
use crate::ticks::{value_ticks, ValueTick};

/// Number of rows shown in the recent-predictions list
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Marker radius in logical units
pub const MARKER_RADIUS: f64 = 5.0;

/// Human-readable timestamp for hover text and list rows
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y %H:%M").to_string()
}

/// One plotted prediction
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Marker {
    pub id: String,
    /// Inner-area position
    pub point: Point,
    pub class: PointClass,
    pub color: &'static str,
    /// Static hover text
    pub title: String,
}

/// One row of the recent-predictions list
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRow {
    pub id: String,
    pub premise_index: f64,
    pub timestamp: String,
    pub class: PointClass,
    pub badge_class: &'static str,
    pub sensor: Option<SensorReadings>,
}

/// Geometry for a non-empty history
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistoryChart {
    pub shape: InputShape,
    /// Chronological polyline, absent for a single prediction
    pub line: Option<LinePath>,
    pub markers: Vec<Marker>,
    pub value_ticks: Vec<ValueTick>,
    /// Newest first
    pub recent: Vec<ListRow>,
}

impl HistoryChart {
    /// Markers whose risk tag could not be classified
    pub fn unknown_risk_count(&self) -> usize {
        self.markers.iter().filter(|m| m.class.is_unknown()).count()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HistoryView {
    Placeholder(Placeholder),
    Chart(HistoryChart),
}

impl HistoryView {
    pub fn shape(&self) -> InputShape {
        match self {
            HistoryView::Placeholder(_) => InputShape::Empty,
            HistoryView::Chart(chart) => chart.shape,
        }
    }

    pub fn chart(&self) -> Option<&HistoryChart> {
        match self {
            HistoryView::Placeholder(_) => None,
            HistoryView::Chart(chart) => Some(chart),
        }
    }
}

/// Build the history view from newest-first predictions
pub fn build_history(
    predictions: &[Prediction],
    layout: &ChartLayout,
    recent_limit: usize,
) -> HistoryView {
    let shape = classify_input(predictions.len());
    if shape.is_empty() {
        tracing::debug!("History is empty, rendering placeholder");
        return HistoryView::Placeholder(Placeholder::HISTORY);
    }

    let mapper = ScaleMapper::new(layout);
    let len = predictions.len();

    let markers: Vec<Marker> = predictions
        .iter()
        .rev()
        .enumerate()
        .map(|(index, p)| Marker {
            id: p.id.clone(),
            point: mapper.map(index, p.premise_index, len),
            class: p.risk.clone(),
            color: p.risk.color(),
            title: format!("{}: {}%", format_timestamp(&p.timestamp), p.premise_index),
        })
        .collect();

    let line = shape
        .has_line()
        .then(|| LinePath::new(markers.iter().map(|m| m.point).collect()));

    let recent = predictions
        .iter()
        .take(recent_limit)
        .map(|p| ListRow {
            id: p.id.clone(),
            premise_index: p.premise_index,
            timestamp: format_timestamp(&p.timestamp),
            class: p.risk.clone(),
            badge_class: p.risk.badge_class(),
            sensor: p.sensor,
        })
        .collect();

    let chart = HistoryChart {
        shape,
        line,
        markers,
        value_ticks: value_ticks(&mapper),
        recent,
    };

    let unknown = chart.unknown_risk_count();
    if unknown > 0 {
        tracing::warn!("History chart has {} markers with unknown risk level", unknown);
    }

    HistoryView::Chart(chart)
}
