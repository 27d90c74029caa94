//! Test utility functions for integration tests

use tracing_subscriber::{fmt, EnvFilter};

/// Absolute tolerance used when comparing costs
pub const COST_TOLERANCE: f64 = 1e-9;

/// Initialize logging for tests
///
/// Uses RUST_LOG environment variable if set, otherwise defaults to "info"
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
}

/// Asserts that two costs are equal within [`COST_TOLERANCE`]
#[track_caller]
pub fn assert_cost_eq(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < COST_TOLERANCE,
        "cost mismatch: actual={actual}, expected={expected}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_cost_eq_accepts_rounding() {
        assert_cost_eq(0.1 + 0.2, 0.3);
    }

    #[test]
    #[should_panic(expected = "cost mismatch")]
    fn test_assert_cost_eq_rejects_difference() {
        assert_cost_eq(1.0, 1.1);
    }
}
