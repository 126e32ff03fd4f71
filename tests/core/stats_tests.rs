//! Tests for the statistics reducer
//!
//! Tests cover:
//! - Empty and singleton sequences
//! - Ordering laws (min <= average <= max)
//! - The strict high-risk threshold
//! - Streaming and merge equivalence

use riskchart::stats::{summarize, summarize_with_threshold, RiskAccumulator};

#[test]
fn test_empty_sequence() {
    let summary = summarize(&[]);
    assert_eq!(summary.count, 0);
    assert_eq!(summary.average, 0.0);
    assert!(summary.max.is_none());
    assert!(summary.min.is_none());
    assert_eq!(summary.high_risk_count, 0);
}

#[test]
fn test_singleton_sequence() {
    let summary = summarize(&[42.0]);
    assert_eq!(summary.average, 42.0);
    assert_eq!(summary.max, Some(42.0));
    assert_eq!(summary.min, Some(42.0));
    assert_eq!(summary.high_risk_count, 0);
}

#[test]
fn test_min_average_max_ordering() {
    let series: Vec<Vec<f64>> = vec![
        vec![10.0, 90.0],
        vec![0.0, 0.0, 0.0],
        vec![100.0],
        vec![12.0, 45.0, 61.0, 87.0, 3.0],
        (0..90).map(|i| (i as f64 * 7.3) % 100.0).collect(),
    ];
    for values in series {
        let s = summarize(&values);
        let (min, max) = (s.min.unwrap(), s.max.unwrap());
        // The rounded average stays within the rounded range
        assert!(min.floor() <= s.average && s.average <= max.ceil());
    }
}

#[test]
fn test_high_risk_boundary_excluded() {
    let base = summarize(&[10.0, 70.0]);
    let with_boundary = summarize(&[10.0, 70.0, 60.0]);
    assert_eq!(base.high_risk_count, 1);
    assert_eq!(with_boundary.high_risk_count, 1);
    assert_eq!(summarize(&[60.0001]).high_risk_count, 1);
}

#[test]
fn test_custom_threshold() {
    let values = [40.0, 50.0, 60.0, 70.0];
    assert_eq!(summarize_with_threshold(&values, 45.0).high_risk_count, 3);
    assert_eq!(summarize_with_threshold(&values, 70.0).high_risk_count, 0);
}

#[test]
fn test_reducer_does_not_clamp() {
    let summary = summarize(&[-10.0, 130.0]);
    assert_eq!(summary.min, Some(-10.0));
    assert_eq!(summary.max, Some(130.0));
    assert_eq!(summary.average, 60.0);
    assert_eq!(summary.high_risk_count, 1);
}

#[test]
fn test_order_independence() {
    let values = [12.0, 45.0, 61.0, 87.0, 3.0, 60.0];
    let mut reversed = values;
    reversed.reverse();
    assert_eq!(summarize(&values), summarize(&reversed));
}

#[test]
fn test_streaming_matches_batch() {
    let values = [33.0, 71.5, 64.0, 8.0, 59.5, 99.0, 60.0];
    let mut acc = RiskAccumulator::new();
    for &v in &values {
        acc.push(v);
    }
    assert_eq!(acc.count(), values.len());
    assert_eq!(acc.finish(), summarize(&values));

    let chunks: Vec<RiskAccumulator> = values
        .chunks(3)
        .map(|chunk| {
            let mut a = RiskAccumulator::new();
            a.extend(chunk.iter().copied());
            a
        })
        .collect();
    let merged = chunks
        .into_iter()
        .fold(RiskAccumulator::new(), |acc, part| acc.merge(part));
    assert_eq!(merged.finish(), summarize(&values));
}

#[test]
fn test_summary_is_idempotent() {
    let values = [5.0, 95.0, 50.0];
    assert_eq!(summarize(&values), summarize(&values));
}
