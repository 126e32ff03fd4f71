//! Tests for line and area path construction

use riskchart::layout::ChartLayout;
use riskchart::path::{AreaPath, LinePath};
use riskchart::scale::{Point, ScaleMapper};

#[test]
fn test_line_preserves_sample_order() {
    let mapper = ScaleMapper::new(&ChartLayout::history());
    let line = LinePath::new(mapper.map_all(&[20.0, 80.0, 50.0]));
    assert_eq!(line.points_attr(), "0,160 232.5,40 465,100");
}

#[test]
fn test_area_profile_matches_line() {
    let mapper = ScaleMapper::new(&ChartLayout::forecast());
    let line = LinePath::new(mapper.map_all(&[10.0, 90.0, 40.0, 70.0]));
    let area = AreaPath::close(&line, mapper.baseline()).unwrap();

    assert_eq!(&area.outline[1..area.outline.len() - 1], line.points.as_slice());
    assert_eq!(area.outline[0], Point::new(0.0, 150.0));
    assert_eq!(*area.outline.last().unwrap(), Point::new(440.0, 150.0));
}

#[test]
fn test_area_svg_is_closed() {
    let mapper = ScaleMapper::new(&ChartLayout::forecast());
    let line = LinePath::new(mapper.map_all(&[0.0, 100.0]));
    let area = AreaPath::close(&line, mapper.baseline()).unwrap();
    let d = area.svg_d();
    assert!(d.starts_with("M0,150 "));
    assert!(d.ends_with("L440,150 Z"));
    assert_eq!(d, "M0,150 L0,150 L440,0 L440,150 Z");
}

#[test]
fn test_degenerate_lines() {
    let mapper = ScaleMapper::new(&ChartLayout::forecast());

    let single = LinePath::new(mapper.map_all(&[42.0]));
    assert!(!single.is_drawable());
    let area = AreaPath::close(&single, mapper.baseline()).unwrap();
    assert!(area.outline.iter().all(|p| p.x == 0.0));

    let empty = LinePath::new(mapper.map_all(&[]));
    assert!(!empty.is_drawable());
    assert_eq!(empty.points_attr(), "");
    assert!(AreaPath::close(&empty, mapper.baseline()).is_none());
}
