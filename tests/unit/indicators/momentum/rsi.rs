//! Unit tests for the RSI indicator

use dukatrix::indicators::momentum::rsi;

#[test]
fn too_short_input_yields_empty_sequence() {
    assert!(rsi(&[1.0, 2.0, 3.0], 14).is_empty());
    assert!(rsi(&[], 14).is_empty());
}

#[test]
fn output_is_shorter_than_input_by_the_period() {
    let values: Vec<f64> = (0..60).map(|i| 100.0 + (i % 7) as f64).collect();
    assert_eq!(rsi(&values, 14).len(), values.len() - 14);
}

#[test]
fn wilder_smoothing_matches_hand_computed_values() {
    // deltas: +1, -0.5, +1.5
    // seed: avg_gain = 0.5, avg_loss = 0.25 -> RS = 2 -> RSI = 66.666..
    // next: avg_gain = 1.0, avg_loss = 0.125 -> RS = 8 -> RSI = 88.888..
    let out = rsi(&[1.0, 2.0, 1.5, 3.0], 2);
    assert_eq!(out.len(), 2);
    assert!((out[0] - 100.0 / 1.5).abs() < 1e-9);
    assert!((out[1] - 800.0 / 9.0).abs() < 1e-9);
}

#[test]
fn all_gains_saturate_at_one_hundred() {
    let values: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
    let out = rsi(&values, 14);
    assert!(out.iter().all(|&v| v == 100.0));
}

#[test]
fn all_losses_approach_zero() {
    let values: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
    let out = rsi(&values, 14);
    assert!(out.iter().all(|&v| v < 1.0));
}

#[test]
fn stays_within_bounds_on_mixed_data() {
    let values: Vec<f64> = (0..80)
        .map(|i| 100.0 + ((i * 13) % 11) as f64 - 5.0)
        .collect();
    for v in rsi(&values, 14) {
        assert!((0.0..=100.0).contains(&v), "RSI out of bounds: {}", v);
    }
}
