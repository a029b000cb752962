// =============================================================================
// Series primitives
// =============================================================================
//
// A series is a plain `Vec<T>` / `&[T]` aligned 1:1 with the bar index.  The
// undefined sentinel is NaN: it marks warm-up positions and numerically
// degenerate results, and it poisons any arithmetic it takes part in.
//
// Validation helpers live here so every kernel rejects bad input the same way
// (and logs it the same way) before computing anything.
// =============================================================================

use std::fmt::Debug;

use num_traits::NumCast;
use tracing::debug;

use crate::error::{Result, TaError};

/// Floating-point element type accepted by every kernel (`f32` or `f64`).
pub trait Float: num_traits::Float + Debug + Default + Send + Sync + 'static {}

impl Float for f32 {}
impl Float for f64 {}

/// Convert an `f64` literal into `T`.
#[inline]
pub(crate) fn lit<T: Float>(value: f64) -> T {
    <T as NumCast>::from(value).unwrap_or_else(T::nan)
}

/// Convert a count (period, window length, weight) into `T`.
#[inline]
pub(crate) fn count<T: Float>(value: usize) -> T {
    <T as NumCast>::from(value).unwrap_or_else(T::nan)
}

/// A series of `len` undefined positions.
pub fn undefined<T: Float>(len: usize) -> Vec<T> {
    vec![T::nan(); len]
}

/// Length of the run of undefined values at the start of `values`.
pub fn leading_undefined<T: Float>(values: &[T]) -> usize {
    values.iter().take_while(|v| v.is_nan()).count()
}

/// Index of the first defined value, if any.
pub fn first_defined<T: Float>(values: &[T]) -> Option<usize> {
    values.iter().position(|v| !v.is_nan())
}

/// Element-wise combination of two aligned series. Any undefined operand
/// yields an undefined result through NaN propagation.
pub(crate) fn zip_with<T: Float>(a: &[T], b: &[T], f: impl Fn(T, T) -> T) -> Vec<T> {
    a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect()
}

/// `num / den`, or undefined when `den` is zero.
#[inline]
pub(crate) fn ratio<T: Float>(num: T, den: T) -> T {
    if den == T::zero() {
        T::nan()
    } else {
        num / den
    }
}

// =============================================================================
// Boundary validation
// =============================================================================

pub(crate) fn ensure_non_empty<T>(kernel: &'static str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        debug!(kernel, "rejected input: empty series");
        return Err(TaError::EmptyInput);
    }
    Ok(())
}

pub(crate) fn ensure_same_len<T>(
    kernel: &'static str,
    name: &'static str,
    expected: usize,
    values: &[T],
) -> Result<()> {
    if values.len() != expected {
        debug!(
            kernel,
            series = name,
            expected,
            actual = values.len(),
            "rejected input: length mismatch"
        );
        return Err(TaError::LengthMismatch {
            name,
            expected,
            actual: values.len(),
        });
    }
    Ok(())
}

/// Require `1 <= period <= max`.
pub(crate) fn ensure_period(
    kernel: &'static str,
    name: &'static str,
    period: usize,
    max: usize,
    len: usize,
) -> Result<()> {
    if period == 0 {
        debug!(kernel, parameter = name, period, "rejected input: zero period");
        return Err(TaError::InvalidPeriod { name, value: period });
    }
    if period > max {
        debug!(kernel, parameter = name, period, len, "rejected input: period too long");
        return Err(TaError::PeriodTooLong { name, period, len });
    }
    Ok(())
}

/// A window that needs `period` observations: `period <= len`.
pub(crate) fn ensure_window(
    kernel: &'static str,
    name: &'static str,
    period: usize,
    len: usize,
) -> Result<()> {
    ensure_period(kernel, name, period, len, len)
}

/// A lookback that needs `period` prior observations: `period < len`.
pub(crate) fn ensure_lookback(
    kernel: &'static str,
    name: &'static str,
    period: usize,
    len: usize,
) -> Result<()> {
    ensure_period(kernel, name, period, len.saturating_sub(1), len)
}

pub(crate) fn ensure_finite<T: Float>(kernel: &'static str, name: &'static str, value: T) -> Result<()> {
    if !value.is_finite() {
        debug!(kernel, parameter = name, "rejected input: non-finite threshold");
        return Err(TaError::InvalidParameter {
            name,
            reason: "must be finite".to_string(),
        });
    }
    Ok(())
}
