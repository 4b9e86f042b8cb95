//! Helper functions for integration tests

use orange_drum::solver::Domain;

/// Relative error |a - b| / |b|, absolute when `b` is zero
pub fn relative_error(value: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        value.abs()
    } else {
        (value - reference).abs() / reference.abs()
    }
}

/// Domain `[0, high]` split into exactly `steps` steps
pub fn uniform_domain(high: f64, steps: usize) -> Domain {
    Domain::new(0.0, high, high / steps as f64).unwrap()
}

/// Assert every sample from `start` onward is NaN and every one before is finite
pub fn assert_nan_tail(values: &[f64], start: usize) {
    for (i, value) in values.iter().enumerate() {
        if i < start {
            assert!(value.is_finite(), "sample {} should be finite, got {}", i, value);
        } else {
            assert!(value.is_nan(), "sample {} should be NaN, got {}", i, value);
        }
    }
}

/// Parse a saved solution, one value per line
pub fn parse_lines(text: &str) -> Vec<f64> {
    text.lines()
        .map(|line| line.parse().expect("saved line is not a number"))
        .collect()
}
