//! Chart layout configuration and input shape classification.
//!
//! Every geometry function takes a [`ChartLayout`] instead of relying on fixed
//! canvas constants, so the same math works at any logical size.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::error::ChartError;
use crate::scale::Point;

// ============================================================================
// Constants
// ============================================================================

/// Logical width of both charts
pub const CHART_WIDTH: f64 = 500.0;

/// Logical height of both charts
pub const CHART_HEIGHT: f64 = 200.0;

/// Premise index domain (percent)
pub const VALUE_DOMAIN: (f64, f64) = (0.0, 100.0);

// ============================================================================
// Core Types
// ============================================================================

/// Space reserved around the inner drawing area
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// What the scale does with values outside the value domain
#[derive(
    AsRefStr, Clone, Copy, Debug, Default, EnumString, PartialEq, Eq, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum OutOfRange {
    /// Clamp into the domain before mapping
    #[default]
    Clamp,
    /// Map the raw value; geometry may leave the drawing area
    Overflow,
}

/// Logical canvas size, margins and value domain for one chart
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub value_domain: (f64, f64),
    #[serde(default)]
    pub out_of_range: OutOfRange,
}

impl ChartLayout {
    /// Forecast chart: room for value labels on the left and dates below
    pub fn forecast() -> Self {
        Self {
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
            margins: Margins::new(20.0, 20.0, 30.0, 40.0),
            value_domain: VALUE_DOMAIN,
            out_of_range: OutOfRange::default(),
        }
    }

    /// History chart: only a left gutter for value labels
    pub fn history() -> Self {
        Self {
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
            margins: Margins::new(0.0, 0.0, 0.0, 35.0),
            value_domain: VALUE_DOMAIN,
            out_of_range: OutOfRange::default(),
        }
    }

    pub fn with_out_of_range(mut self, policy: OutOfRange) -> Self {
        self.out_of_range = policy;
        self
    }

    /// Width of the drawing area after margins
    #[inline]
    pub fn inner_width(&self) -> f64 {
        self.width - self.margins.left - self.margins.right
    }

    /// Height of the drawing area after margins
    #[inline]
    pub fn inner_height(&self) -> f64 {
        self.height - self.margins.top - self.margins.bottom
    }

    /// Reject layouts that leave no drawing area or have an empty domain
    pub fn validate(&self) -> Result<(), ChartError> {
        if self.inner_width().is_nan() || self.inner_width() <= 0.0 {
            return Err(ChartError::InvalidLayout(format!(
                "inner width must be positive, got {}",
                self.inner_width()
            )));
        }
        if self.inner_height().is_nan() || self.inner_height() <= 0.0 {
            return Err(ChartError::InvalidLayout(format!(
                "inner height must be positive, got {}",
                self.inner_height()
            )));
        }
        let (lo, hi) = self.value_domain;
        if lo.is_nan() || hi.is_nan() || hi <= lo {
            return Err(ChartError::InvalidLayout(format!(
                "value domain [{}, {}] is empty",
                lo, hi
            )));
        }
        Ok(())
    }

    /// Translate an inner-area point into canvas coordinates
    #[inline]
    pub fn to_canvas(&self, point: Point) -> Point {
        Point::new(point.x + self.margins.left, point.y + self.margins.top)
    }
}

/// Shape of an input sequence, shared by geometry builders and renderers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputShape {
    /// No samples: render the placeholder
    Empty,
    /// One sample: a point, no line segment
    Singleton,
    /// Two or more samples
    Normal,
}

impl InputShape {
    pub fn is_empty(&self) -> bool {
        matches!(self, InputShape::Empty)
    }

    /// A polyline needs at least two points
    pub fn has_line(&self) -> bool {
        matches!(self, InputShape::Normal)
    }
}

/// Classify a sequence by its length
pub fn classify_input(len: usize) -> InputShape {
    match len {
        0 => InputShape::Empty,
        1 => InputShape::Singleton,
        _ => InputShape::Normal,
    }
}
