// =============================================================================
// Money Flow Index (MFI)
// =============================================================================
//
// A volume-weighted RSI computed on the typical price:
//   tp_i       = (high_i + low_i + close_i) / 3
//   raw_flow_i = tp_i * volume_i
//   positive flow when tp_i > tp_{i-1}, negative flow when tp_i < tp_{i-1}
//   MFI        = 100 - 100 / (1 + sum(positive) / sum(negative))
//
// Sums cover the last `period` bars.  A window with no negative flow leaves
// the position undefined.
// =============================================================================

use crate::error::Result;
use crate::series::{
    ensure_lookback, ensure_non_empty, ensure_same_len, leading_undefined, lit, undefined, Float,
};

/// Compute the MFI series. Defined from index `period`, shifted by any
/// leading run of bars whose typical price is undefined (and left undefined
/// where the window's negative flow is zero).
pub fn calculate_mfi<T: Float>(
    high: &[T],
    low: &[T],
    close: &[T],
    volume: &[T],
    period: usize,
) -> Result<Vec<T>> {
    ensure_non_empty("mfi", close)?;
    ensure_same_len("mfi", "high", close.len(), high)?;
    ensure_same_len("mfi", "low", close.len(), low)?;
    ensure_same_len("mfi", "volume", close.len(), volume)?;
    ensure_lookback("mfi", "period", period, close.len())?;

    let n = close.len();
    let three = lit::<T>(3.0);
    let hundred = lit::<T>(100.0);
    let tp: Vec<T> = (0..n).map(|i| (high[i] + low[i] + close[i]) / three).collect();

    let flow = |i: usize| {
        let raw = tp[i] * volume[i];
        if tp[i].is_nan() || tp[i - 1].is_nan() {
            (T::nan(), T::nan())
        } else if tp[i] > tp[i - 1] {
            (raw, T::zero())
        } else if tp[i] < tp[i - 1] {
            (T::zero(), raw)
        } else {
            (T::zero(), T::zero())
        }
    };

    let skip = leading_undefined(&tp);
    let mut pos_sum = T::zero();
    let mut neg_sum = T::zero();
    let mut out = undefined(n);
    for i in (skip + 1)..n {
        let (pos, neg) = flow(i);
        pos_sum = pos_sum + pos;
        neg_sum = neg_sum + neg;
        if i > skip + period {
            let (old_pos, old_neg) = flow(i - period);
            pos_sum = pos_sum - old_pos;
            neg_sum = neg_sum - old_neg;
        }
        if i >= skip + period && neg_sum != T::zero() {
            out[i] = hundred - hundred / (T::one() + pos_sum / neg_sum);
        }
    }
    Ok(out)
}
