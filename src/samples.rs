//! Input records and their validation.
//!
//! Upstream data arrives as JSON with camelCase fields. Raw records keep every
//! field optional so that older or partial payloads still deserialize; the
//! `validate_*` functions turn them into typed samples once, at the boundary,
//! and report exactly which record and field was wrong.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::PointClass;
use crate::error::ChartError;

// ============================================================================
// Raw Records
// ============================================================================

/// One forecast day as delivered by the predictor
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawForecastSample {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub premise_index: Option<f64>,
}

/// One stored prediction as delivered by the history store
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPrediction {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub premise_index: Option<f64>,
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub rainfall: Option<f64>,
}

// ============================================================================
// Validated Samples
// ============================================================================

/// A validated forecast day
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSample {
    pub date: NaiveDate,
    pub premise_index: f64,
}

impl ForecastSample {
    pub fn new(date: NaiveDate, premise_index: f64) -> Self {
        Self {
            date,
            premise_index,
        }
    }
}

/// Weather readings stored alongside a prediction.
///
/// Records written before sensor capture was added carry none.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SensorReadings {
    /// Degrees Celsius
    pub temperature: f64,
    /// Millimetres
    pub rainfall: f64,
}

/// A validated historical prediction
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub premise_index: f64,
    pub risk: PointClass,
    pub sensor: Option<SensorReadings>,
}

// ============================================================================
// Validation
// ============================================================================

fn require<T>(value: Option<T>, index: usize, field: &'static str) -> Result<T, ChartError> {
    value.ok_or(ChartError::MissingField { index, field })
}

fn require_finite(value: f64, index: usize, field: &'static str) -> Result<f64, ChartError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ChartError::InvalidValue { index, field })
    }
}

/// Parse a calendar date from `YYYY-MM-DD` or the date part of an RFC 3339 instant
pub fn parse_date(value: &str, index: usize) -> Result<NaiveDate, ChartError> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .map_err(|_| ChartError::InvalidDate {
            index,
            value: value.to_string(),
        })
}

/// Parse an RFC 3339 instant, accepting a bare date as midnight UTC
pub fn parse_timestamp(value: &str, index: usize) -> Result<DateTime<Utc>, ChartError> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ChartError::InvalidDate {
            index,
            value: value.to_string(),
        })
}

impl RawForecastSample {
    pub fn validate(self, index: usize) -> Result<ForecastSample, ChartError> {
        let date = require(self.date, index, "date")?;
        let date = parse_date(&date, index)?;
        let premise_index = require(self.premise_index, index, "premiseIndex")?;
        let premise_index = require_finite(premise_index, index, "premiseIndex")?;
        Ok(ForecastSample::new(date, premise_index))
    }
}

impl RawPrediction {
    /// Validate one record. Unknown risk tags are kept as a flagged
    /// [`PointClass::Unknown`] so the record still renders.
    pub fn validate(self, index: usize) -> Result<Prediction, ChartError> {
        let id = require(self.id, index, "id")?;
        let timestamp = require(self.timestamp, index, "timestamp")?;
        let timestamp = parse_timestamp(&timestamp, index)?;
        let premise_index = require(self.premise_index, index, "premiseIndex")?;
        let premise_index = require_finite(premise_index, index, "premiseIndex")?;
        let risk_tag = require(self.risk_level, index, "riskLevel")?;

        let sensor = match (self.temperature, self.rainfall) {
            (Some(temperature), Some(rainfall)) => Some(SensorReadings {
                temperature,
                rainfall,
            }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ChartError::MissingField {
                    index,
                    field: "rainfall",
                })
            }
            (None, Some(_)) => {
                return Err(ChartError::MissingField {
                    index,
                    field: "temperature",
                })
            }
        };

        Ok(Prediction {
            id,
            timestamp,
            premise_index,
            risk: PointClass::from_tag(&risk_tag),
            sensor,
        })
    }
}

/// Validate a forecast sequence, keeping its order
pub fn validate_forecast(raw: Vec<RawForecastSample>) -> Result<Vec<ForecastSample>, ChartError> {
    let samples = raw
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.validate(i))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!("Validated {} forecast samples", samples.len());
    Ok(samples)
}

/// Validate a prediction history, keeping its newest-first order
pub fn validate_history(raw: Vec<RawPrediction>) -> Result<Vec<Prediction>, ChartError> {
    let predictions = raw
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.validate(i))
        .collect::<Result<Vec<_>, _>>()?;

    let unknown = predictions.iter().filter(|p| p.risk.is_unknown()).count();
    if unknown > 0 {
        tracing::warn!(
            "{} of {} predictions carry an unknown risk level",
            unknown,
            predictions.len()
        );
    }
    tracing::debug!("Validated {} predictions", predictions.len());
    Ok(predictions)
}

/// Parse and validate a forecast JSON array
pub fn forecast_from_json(content: &str) -> Result<Vec<ForecastSample>, ChartError> {
    let raw: Vec<RawForecastSample> = serde_json::from_str(content)?;
    validate_forecast(raw)
}

/// Parse and validate a prediction history JSON array
pub fn history_from_json(content: &str) -> Result<Vec<Prediction>, ChartError> {
    let raw: Vec<RawPrediction> = serde_json::from_str(content)?;
    validate_history(raw)
}
