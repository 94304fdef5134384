//! Unit tests for the moving averages

use dukatrix::indicators::trend::{ema, sma};

#[test]
fn sma_windows_are_arithmetic_means() {
    assert_eq!(sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3), vec![2.0, 3.0, 4.0]);
}

#[test]
fn sma_of_exact_period_has_one_value() {
    assert_eq!(sma(&[2.0, 4.0, 6.0], 3), vec![4.0]);
}

#[test]
fn sma_too_short_is_empty() {
    assert!(sma(&[1.0, 2.0], 3).is_empty());
    assert!(sma(&[1.0, 2.0], 0).is_empty());
}

#[test]
fn ema_is_seeded_with_the_simple_average() {
    // seed = sma([1,2,3]) = 2, multiplier = 0.5
    // next: (4-2)*0.5+2 = 3, then (5-3)*0.5+3 = 4
    assert_eq!(ema(&[1.0, 2.0, 3.0, 4.0, 5.0], 3), vec![2.0, 3.0, 4.0]);
}

#[test]
fn ema_of_constant_series_is_constant() {
    let out = ema(&[7.5; 20], 5);
    assert_eq!(out.len(), 16);
    assert!(out.iter().all(|&v| v == 7.5));
}

#[test]
fn ema_too_short_is_empty() {
    assert!(ema(&[1.0], 2).is_empty());
}

#[test]
fn sequences_align_to_the_tail() {
    let values: Vec<f64> = (0..50).map(|i| i as f64).collect();
    assert_eq!(sma(&values, 20).len(), 31);
    assert_eq!(ema(&values, 20).len(), 31);
    // last SMA window is the mean of 30..49
    let last = *sma(&values, 20).last().unwrap();
    assert!((last - 39.5).abs() < 1e-9);
}
