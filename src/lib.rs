//! riskchart - Risk forecast and prediction history charts
//!
//! This library turns ordered premise index samples into chart geometry
//! (points, area fills, axis ticks), summary statistics and per-point risk
//! classes, and exports the result as SVG, PNG or PDF.
//!
//! ## Module Structure
//!
//! - [`layout`] - Chart layout record, presets and input shape classification
//! - [`samples`] - Raw input records and boundary validation
//! - [`scale`] - Index/value to drawing-area coordinate mapping
//! - [`ticks`] - Value and date axis ticks
//! - [`path`] - Polyline and closed area geometry
//! - [`stats`] - Online summary statistics
//! - [`classify`] - Risk level classification and colors
//! - [`forecast`] - Forecast chart view
//! - [`history`] - Prediction history chart and recent list
//! - [`render`] - SVG markup
//! - [`export`] - SVG, PNG and PDF file export
//! - [`settings`] - User settings
//! - [`error`] - Error types

pub mod classify;
pub mod error;
pub mod export;
pub mod forecast;
pub mod history;
pub mod layout;
pub mod path;
pub mod render;
pub mod samples;
pub mod scale;
pub mod settings;
pub mod stats;
pub mod ticks;

pub use error::ChartError;
pub use forecast::{build_forecast, ForecastView};
pub use history::{build_history, HistoryView};
pub use layout::{classify_input, ChartLayout, InputShape};
