// =============================================================================
// Average True Range (ATR) — Wilder's Smoothing Method
// =============================================================================
//
// ATR measures market volatility by decomposing the entire range of a bar.
//
// True Range (TR) for each bar after the first:
//   TR = max(H - L, |H - prevClose|, |L - prevClose|)
//
// ATR is then the smoothed average of TR using Wilder's method:
//   ATR_p   = mean of TR_1 .. TR_p
//   ATR_t   = (ATR_{t-1} * (period - 1) + TR_t) / period
// =============================================================================

use crate::error::Result;
use crate::series::{
    count, ensure_lookback, ensure_non_empty, ensure_same_len, leading_undefined, undefined, Float,
};

/// True range of bar `i` (requires `i >= 1`).
#[inline]
fn true_range<T: Float>(high: &[T], low: &[T], close: &[T], i: usize) -> T {
    let prev_close = close[i - 1];
    let hl = high[i] - low[i];
    let hc = (high[i] - prev_close).abs();
    let lc = (low[i] - prev_close).abs();
    hl.max(hc).max(lc)
}

/// Unchecked ATR kernel. Bars up to the longest leading undefined run of
/// the three inputs are skipped; all-undefined when no more than `period`
/// bars remain.
pub(crate) fn atr_series<T: Float>(high: &[T], low: &[T], close: &[T], period: usize) -> Vec<T> {
    let n = close.len();
    let mut out = undefined(n);
    let skip = leading_undefined(high)
        .max(leading_undefined(low))
        .max(leading_undefined(close));
    if period == 0 || n - skip <= period {
        return out;
    }

    // --- Step 1: Seed ATR with the mean of the first `period` TR values -----
    let p = count::<T>(period);
    let first = skip + period;
    let mut atr = ((skip + 1)..=first)
        .fold(T::zero(), |acc, i| acc + true_range(high, low, close, i))
        / p;
    out[first] = atr;

    // --- Step 2: Wilder's smoothing for remaining TR values -----------------
    let keep = count::<T>(period - 1);
    for i in (first + 1)..n {
        atr = (atr * keep + true_range(high, low, close, i)) / p;
        out[i] = atr;
    }
    out
}

/// Compute the ATR series. The first defined value sits at index `period`,
/// shifted by any leading undefined run of the inputs.
///
/// # Errors
/// - empty input or mismatched lengths.
/// - `period == 0` or `period >= close.len()` (each TR needs a previous bar).
pub fn calculate_atr<T: Float>(high: &[T], low: &[T], close: &[T], period: usize) -> Result<Vec<T>> {
    ensure_non_empty("atr", close)?;
    ensure_same_len("atr", "high", close.len(), high)?;
    ensure_same_len("atr", "low", close.len(), low)?;
    ensure_lookback("atr", "period", period, close.len())?;
    Ok(atr_series(high, low, close, period))
}
