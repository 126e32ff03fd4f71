//! Index/value to drawing-area coordinate mapping.
//!
//! The scale is the only place that divides by `len - 1`; tick and path
//! builders go through it rather than repeating the guard.

use serde::Serialize;

use crate::layout::{ChartLayout, OutOfRange};

/// A point in the inner drawing area (origin top-left, y grows downward)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Maps sample positions and values onto the inner drawing area
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleMapper {
    inner_width: f64,
    inner_height: f64,
    domain: (f64, f64),
    policy: OutOfRange,
}

impl ScaleMapper {
    pub fn new(layout: &ChartLayout) -> Self {
        Self {
            inner_width: layout.inner_width(),
            inner_height: layout.inner_height(),
            domain: layout.value_domain,
            policy: layout.out_of_range,
        }
    }

    #[inline]
    pub fn inner_width(&self) -> f64 {
        self.inner_width
    }

    #[inline]
    pub fn inner_height(&self) -> f64 {
        self.inner_height
    }

    /// Horizontal position of sample `index` in a sequence of `len` samples.
    ///
    /// Sequences of zero or one sample place everything at `x = 0`.
    #[inline]
    pub fn x(&self, index: usize, len: usize) -> f64 {
        if len <= 1 {
            return 0.0;
        }
        (index as f64 / (len - 1) as f64) * self.inner_width
    }

    /// Vertical position of `value`; the top of the domain maps to `y = 0`
    #[inline]
    pub fn y(&self, value: f64) -> f64 {
        let (lo, hi) = self.domain;
        let value = match self.policy {
            OutOfRange::Clamp => value.clamp(lo, hi),
            OutOfRange::Overflow => value,
        };
        self.inner_height - ((value - lo) / (hi - lo)) * self.inner_height
    }

    /// Map one sample to a point
    #[inline]
    pub fn map(&self, index: usize, value: f64, len: usize) -> Point {
        Point::new(self.x(index, len), self.y(value))
    }

    /// Map a whole value sequence, preserving order
    pub fn map_all(&self, values: &[f64]) -> Vec<Point> {
        let len = values.len();
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| self.map(i, v, len))
            .collect()
    }

    /// The `y` coordinate of the domain floor, used to close area fills
    #[inline]
    pub fn baseline(&self) -> f64 {
        self.inner_height
    }
}
