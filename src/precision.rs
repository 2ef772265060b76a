//! Precision constants for numeric comparisons.
//!
//! Every tolerance used by the crate lives here so that a comparison in one
//! module never drifts from the same comparison in another.

/// Vectors shorter than this cannot be normalized.
/// Value: 1.0e-12
pub const DEGENERATE_LENGTH: f64 = 1.0e-12;

/// Tolerance used when refreshing the identity flag of a `Matrix4`.
/// Value: 1.0e-12
pub const IDENTITY: f64 = 1.0e-12;

/// Below this absolute determinant a matrix is treated as singular
/// and inversion returns `None`.
/// Value: 1.0e-12
pub const SINGULAR: f64 = 1.0e-12;

/// Default epsilon for approximate equality (`approx` impls).
pub const COMPUTATIONAL: f64 = f64::EPSILON;

/// Returns true if `value` is within `tolerance` of zero.
#[inline]
pub fn is_zero(value: f64, tolerance: f64) -> bool {
    value.abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_values() {
        assert_eq!(DEGENERATE_LENGTH, 1.0e-12);
        assert_eq!(IDENTITY, 1.0e-12);
        assert_eq!(SINGULAR, 1.0e-12);
    }

    #[test]
    fn test_is_zero() {
        assert!(is_zero(0.0, IDENTITY));
        assert!(is_zero(-1.0e-13, IDENTITY));
        assert!(!is_zero(1.0e-6, IDENTITY));
    }
}
