//! Axis tick generation.

use chrono::NaiveDate;
use serde::Serialize;

use crate::samples::ForecastSample;
use crate::scale::ScaleMapper;

/// Fixed value-axis tick positions (percent)
pub const VALUE_TICKS: [f64; 5] = [0.0, 25.0, 50.0, 75.0, 100.0];

/// Upper bound on the number of date labels along the position axis
pub const MAX_POSITION_TICKS: usize = 5;

/// A labelled mark on the value (vertical) axis
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValueTick {
    pub value: f64,
    /// Inner-area y coordinate
    pub y: f64,
    pub label: String,
}

/// A labelled mark on the position (horizontal) axis
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PositionTick {
    /// Index of the sample the tick labels
    pub index: usize,
    /// Inner-area x coordinate
    pub x: f64,
    pub label: String,
}

pub fn value_ticks(mapper: &ScaleMapper) -> Vec<ValueTick> {
    VALUE_TICKS
        .iter()
        .map(|&value| ValueTick {
            value,
            y: mapper.y(value),
            label: format!("{}%", value),
        })
        .collect()
}

/// Distance between labelled samples: at most ~5 labels for any length
#[inline]
pub fn tick_stride(len: usize) -> usize {
    (len / MAX_POSITION_TICKS).max(1)
}

/// Abbreviated month and day, e.g. "Jan 5"
pub fn format_tick_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Date ticks for every `tick_stride`-th sample, starting at the first.
///
/// The final sample is only labelled when it falls on the stride.
pub fn position_ticks(samples: &[ForecastSample], mapper: &ScaleMapper) -> Vec<PositionTick> {
    let len = samples.len();
    let stride = tick_stride(len);
    samples
        .iter()
        .enumerate()
        .step_by(stride)
        .map(|(index, sample)| PositionTick {
            index,
            x: mapper.x(index, len),
            label: format_tick_date(sample.date),
        })
        .collect()
}
