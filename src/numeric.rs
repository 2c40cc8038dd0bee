use num_traits::{cast::ToPrimitive, Float};
use std::fmt::Display;

/// Base pairs per megabase, used for axis tick labels.
pub const BP_PER_MBP: f64 = 1e6;

/// Assert two float values are the same up to `eps`.
#[allow(dead_code)]
pub fn assert_float_eq<T>(left: T, right: T, eps: T)
where
    T: Float + Display,
{
    if left.is_nan() {
        assert!(right.is_nan(), "left is NaN, but right is not");
    } else {
        let diff = (left - right).abs();
        assert!(
            diff < eps,
            "values |{} - {}| ≥ {} (diff: {})",
            left,
            right,
            eps,
            diff
        );
    }
}

/// Assert two float slices are the same up to `eps`.
#[allow(dead_code)]
pub fn assert_floats_eq<T>(left: &[T], right: &[T], eps: T)
where
    T: Float + Display,
{
    assert_eq!(left.len(), right.len());
    for (l, r) in left.iter().zip(right.iter()) {
        assert_float_eq(*l, *r, eps)
    }
}

/// Convert a position in base pairs to whole megabases, truncating toward zero.
///
/// Returns `None` if the value cannot be represented as an `f64`.
pub fn bp_to_mbp<T: ToPrimitive>(bp: T) -> Option<i64> {
    let bp = bp.to_f64()?;
    if !bp.is_finite() {
        return None;
    }
    (bp / BP_PER_MBP).trunc().to_i64()
}

/// The tight `(min, max)` range over some numeric values, as `f64`.
///
/// Returns `None` for an empty slice or values that do not convert.
pub fn tight_range<T: ToPrimitive>(values: &[T]) -> Option<(f64, f64)> {
    let mut iter = values.iter();
    let first = iter.next()?.to_f64()?;
    iter.try_fold((first, first), |(lo, hi), x| {
        let x = x.to_f64()?;
        Some((lo.min(x), hi.max(x)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bp_to_mbp_truncates() {
        assert_eq!(bp_to_mbp(0u64), Some(0));
        assert_eq!(bp_to_mbp(999_999u64), Some(0));
        assert_eq!(bp_to_mbp(248_956_422u64), Some(248));
        assert_eq!(bp_to_mbp(150_000_000.0f64), Some(150));
    }

    #[test]
    fn test_bp_to_mbp_non_finite() {
        assert_eq!(bp_to_mbp(f64::NAN), None);
        assert_eq!(bp_to_mbp(f64::INFINITY), None);
    }

    #[test]
    fn test_tight_range() {
        assert_eq!(tight_range::<u64>(&[]), None);
        assert_eq!(tight_range(&[5u64]), Some((5.0, 5.0)));
        let range = tight_range(&[3.5f64, -1.0, 10.25]).unwrap();
        assert_float_eq(range.0, -1.0, 1e-12);
        assert_float_eq(range.1, 10.25, 1e-12);
    }
}
