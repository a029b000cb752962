// =============================================================================
// Linear Weighted Moving Average (LWMA) and Weighted Close
// =============================================================================
//
// LWMA weights the window linearly, 1 for the oldest observation up to
// `period` for the most recent one:
//   LWMA_i = sum_{w=1..p} x[i-p+w] * w  /  (p * (p + 1) / 2)
//
// Weighted Close is a per-bar price with no warm-up:
//   WC = (2 * close + high + low) / 4
// =============================================================================

use crate::error::Result;
use crate::series::{
    count, ensure_non_empty, ensure_same_len, ensure_window, leading_undefined, lit, undefined,
    Float,
};

/// Compute the LWMA series of `values` over `period`.
///
/// Positions before `period - 1` (plus any leading undefined run) are
/// undefined.
pub fn calculate_lwma<T: Float>(values: &[T], period: usize) -> Result<Vec<T>> {
    ensure_non_empty("lwma", values)?;
    ensure_window("lwma", "period", period, values.len())?;

    let n = values.len();
    let mut out = undefined(n);
    let skip = leading_undefined(values);
    if n - skip < period {
        return Ok(out);
    }

    let weight_sum = count::<T>(period * (period + 1) / 2);
    for end in (skip + period - 1)..n {
        let window = &values[end + 1 - period..=end];
        let weighted = window
            .iter()
            .enumerate()
            .fold(T::zero(), |acc, (w, &x)| acc + x * count::<T>(w + 1));
        out[end] = weighted / weight_sum;
    }
    Ok(out)
}

/// Compute the Weighted Close price `(2 * close + high + low) / 4`.
pub fn calculate_weighted_close<T: Float>(close: &[T], high: &[T], low: &[T]) -> Result<Vec<T>> {
    ensure_non_empty("weighted_close", close)?;
    ensure_same_len("weighted_close", "high", close.len(), high)?;
    ensure_same_len("weighted_close", "low", close.len(), low)?;

    let two = lit::<T>(2.0);
    let four = lit::<T>(4.0);
    Ok(close
        .iter()
        .zip(high)
        .zip(low)
        .map(|((&c, &h), &l)| (c * two + h + l) / four)
        .collect())
}
