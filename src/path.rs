//! Polyline and filled-area geometry.

use serde::Serialize;
use std::fmt::Write;

use crate::scale::Point;

/// Ordered data points joined into a polyline
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LinePath {
    pub points: Vec<Point>,
}

impl LinePath {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// A visible segment needs two points
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// SVG `points` attribute: `"x,y x,y ..."`
    pub fn points_attr(&self) -> String {
        let mut out = String::with_capacity(self.points.len() * 12);
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            // Writing to a String cannot fail
            let _ = write!(out, "{},{}", p.x, p.y);
        }
        out
    }
}

/// Region between the data curve and the baseline
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AreaPath {
    /// Closed outline: baseline under the first point, the data points, then
    /// baseline under the last point
    pub outline: Vec<Point>,
}

impl AreaPath {
    /// Close `line` against `baseline`. Returns `None` for an empty line.
    pub fn close(line: &LinePath, baseline: f64) -> Option<Self> {
        let first = line.first()?;
        let last = line.last()?;

        let mut outline = Vec::with_capacity(line.points.len() + 2);
        outline.push(Point::new(first.x, baseline));
        outline.extend(line.points.iter().copied());
        outline.push(Point::new(last.x, baseline));
        Some(Self { outline })
    }

    /// SVG path data: `M x,base L ... L x,base Z`
    pub fn svg_d(&self) -> String {
        let mut out = String::with_capacity(self.outline.len() * 14);
        for (i, p) in self.outline.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{}{},{}", cmd, p.x, p.y);
        }
        out.push_str(" Z");
        out
    }
}
