//! Summary statistics over premise index values.
//!
//! Computed through an online accumulator so values can be pushed one at a
//! time or partial accumulators merged; the result does not depend on the
//! order values arrive in.

use serde::Serialize;

/// Values strictly above this count as high risk
pub const HIGH_RISK_THRESHOLD: f64 = 60.0;

/// Round half toward positive infinity (2.5 -> 3, -2.5 -> -2)
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Streaming reducer for the forecast summary panel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiskAccumulator {
    threshold: f64,
    count: usize,
    sum: f64,
    max: Option<f64>,
    min: Option<f64>,
    high_risk_count: usize,
}

impl Default for RiskAccumulator {
    fn default() -> Self {
        Self::with_threshold(HIGH_RISK_THRESHOLD)
    }
}

impl RiskAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            count: 0,
            sum: 0.0,
            max: None,
            min: None,
            high_risk_count: 0,
        }
    }

    /// Fold one value in
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        if value > self.threshold {
            self.high_risk_count += 1;
        }
    }

    /// Combine with an accumulator built over a disjoint set of values.
    ///
    /// Both sides are expected to share the same threshold; `self`'s is kept.
    pub fn merge(mut self, other: RiskAccumulator) -> Self {
        self.count += other.count;
        self.sum += other.sum;
        self.max = match (self.max, other.max) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        self.min = match (self.min, other.min) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.high_risk_count += other.high_risk_count;
        self
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn finish(&self) -> RiskSummary {
        let average = if self.count == 0 {
            0.0
        } else {
            round_half_up(self.sum / self.count as f64)
        };
        RiskSummary {
            count: self.count,
            average,
            max: self.max,
            min: self.min,
            high_risk_count: self.high_risk_count,
        }
    }
}

impl Extend<f64> for RiskAccumulator {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

/// Aggregate statistics for a value sequence
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSummary {
    pub count: usize,
    /// Mean rounded to a whole percent; 0 for an empty sequence
    pub average: f64,
    /// Absent for an empty sequence
    pub max: Option<f64>,
    /// Absent for an empty sequence
    pub min: Option<f64>,
    pub high_risk_count: usize,
}

/// One entry of the summary panel
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryCard {
    pub label: &'static str,
    pub value: String,
}

impl RiskSummary {
    /// The four summary panel entries with display text
    pub fn cards(&self) -> Vec<SummaryCard> {
        let percent = |v: Option<f64>| match v {
            Some(v) => format!("{}%", round_half_up(v)),
            None => "–".to_string(),
        };
        vec![
            SummaryCard {
                label: "Average Risk",
                value: format!("{}%", self.average),
            },
            SummaryCard {
                label: "Peak Risk",
                value: percent(self.max),
            },
            SummaryCard {
                label: "Lowest Risk",
                value: percent(self.min),
            },
            SummaryCard {
                label: "High Risk Days",
                value: self.high_risk_count.to_string(),
            },
        ]
    }
}

/// Summarize with the default high-risk threshold
pub fn summarize(values: &[f64]) -> RiskSummary {
    summarize_with_threshold(values, HIGH_RISK_THRESHOLD)
}

pub fn summarize_with_threshold(values: &[f64], threshold: f64) -> RiskSummary {
    let mut acc = RiskAccumulator::with_threshold(threshold);
    acc.extend(values.iter().copied());
    acc.finish()
}
