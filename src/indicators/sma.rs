// =============================================================================
// Simple, Triangular and Smoothed Moving Averages
// =============================================================================
//
// SMA keeps a running sum over the window:
//   sum += x[i];  if i >= period: sum -= x[i - period]
//   SMA_i = sum / period
//
// TMA is an SMA of an SMA:
//   even period:  windows (period / 2, period / 2 + 1)
//   odd period:   both windows (period + 1) / 2
//
// SMMA (Wilder-style smoothed average):
//   SMMA_seed = SMA of the first `period` values
//   SMMA_i    = (SMMA_{i-1} * (period - 1) + x[i]) / period
//
// All three skip a leading run of undefined input (the output of an upstream
// kernel's warm-up) and shift their own warm-up forward by its length.
// =============================================================================

use crate::error::Result;
use crate::series::{count, ensure_non_empty, ensure_window, leading_undefined, undefined, Float};

/// Unchecked SMA kernel, shared with every cascade built on it.
pub(crate) fn sma_series<T: Float>(values: &[T], period: usize) -> Vec<T> {
    let n = values.len();
    let mut out = undefined(n);
    let skip = leading_undefined(values);
    if period == 0 || n - skip < period {
        return out;
    }

    let p = count::<T>(period);
    let mut sum = T::zero();
    for i in skip..n {
        sum = sum + values[i];
        if i >= period + skip {
            sum = sum - values[i - period];
        }
        if i + 1 >= period + skip {
            out[i] = sum / p;
        }
    }
    out
}

/// Window lengths of the two cascaded SMAs of a TMA.
pub(crate) fn tma_windows(period: usize) -> (usize, usize) {
    if period % 2 == 0 {
        (period / 2, period / 2 + 1)
    } else {
        let w = (period + 1) / 2;
        (w, w)
    }
}

/// Compute the SMA series of `values` over `period`.
///
/// Positions before `period - 1` (plus any leading undefined run of the
/// input) are undefined.
///
/// # Errors
/// - empty input
/// - `period == 0` or `period > values.len()`
pub fn calculate_sma<T: Float>(values: &[T], period: usize) -> Result<Vec<T>> {
    ensure_non_empty("sma", values)?;
    ensure_window("sma", "period", period, values.len())?;
    Ok(sma_series(values, period))
}

/// Compute the Triangular Moving Average: `SMA(SMA(values, w1), w2)`.
pub fn calculate_tma<T: Float>(values: &[T], period: usize) -> Result<Vec<T>> {
    ensure_non_empty("tma", values)?;
    ensure_window("tma", "period", period, values.len())?;
    let (first, second) = tma_windows(period);
    Ok(sma_series(&sma_series(values, first), second))
}

/// Unchecked SMMA kernel.
pub(crate) fn smma_series<T: Float>(values: &[T], period: usize) -> Vec<T> {
    let n = values.len();
    let mut out = undefined(n);
    let skip = leading_undefined(values);
    if period == 0 || n - skip < period {
        return out;
    }

    let p = count::<T>(period);
    let seed_end = skip + period;
    let mut prev = values[skip..seed_end]
        .iter()
        .fold(T::zero(), |acc, &x| acc + x)
        / p;
    out[seed_end - 1] = prev;

    let weight = count::<T>(period - 1);
    for i in seed_end..n {
        prev = (prev * weight + values[i]) / p;
        out[i] = prev;
    }
    out
}

/// Compute the Smoothed Moving Average of `values` over `period`.
pub fn calculate_smma<T: Float>(values: &[T], period: usize) -> Result<Vec<T>> {
    ensure_non_empty("smma", values)?;
    ensure_window("smma", "period", period, values.len())?;
    Ok(smma_series(values, period))
}
