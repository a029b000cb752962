// =============================================================================
// Chaikin Volatility (CV)
// =============================================================================
//
// Rate of change of the smoothed high-low spread:
//   diff_i = high_i - low_i
//   e      = EMA(diff, p)
//   CV_i   = (e_i - e_{i-s+1}) / e_{i-s+1} * 100
//
// First defined index is p + s - 2.  A zero reference spread is undefined.
// =============================================================================

use crate::error::Result;
use crate::indicators::ema::ema_series;
use crate::series::{
    ensure_non_empty, ensure_period, ensure_same_len, ensure_window, lit, ratio, undefined, Float,
};

/// Calculate Chaikin Volatility with EMA `period` and ROC span `smoothing`.
pub fn calculate_chaikin_volatility<T: Float>(
    high: &[T],
    low: &[T],
    period: usize,
    smoothing: usize,
) -> Result<Vec<T>> {
    ensure_non_empty("chaikin_volatility", high)?;
    ensure_same_len("chaikin_volatility", "low", high.len(), low)?;
    ensure_window("chaikin_volatility", "period", period, high.len())?;
    ensure_period("chaikin_volatility", "smoothing", smoothing, high.len(), high.len())?;

    let diff: Vec<T> = high.iter().zip(low).map(|(&h, &l)| h - l).collect();
    let ema = ema_series(&diff, period);

    let hundred = lit::<T>(100.0);
    let mut out = undefined(high.len());
    for i in (smoothing - 1)..high.len() {
        let reference = ema[i + 1 - smoothing];
        out[i] = ratio(ema[i] - reference, reference) * hundred;
    }
    Ok(out)
}
