// =============================================================================
// Range Oscillators — Williams %R, CCI, Aroon, BOP, CMO
// =============================================================================
//
// Williams %R (window of `p` bars ending at i):
//   %R = (HH - close) / (HH - LL) * -100
//
// Commodity Channel Index:
//   tp       = (high + low + close) / 3
//   mean_dev = sum_{j in window} |SMA(tp)_i - tp_j| / p
//   CCI      = (tp_i - SMA(tp)_i) / (0.015 * mean_dev)
//
// Aroon oscillator (window of `p + 1` bars ending at i):
//   up   = (p - bars_since_high) / p * 100
//   down = (p - bars_since_low)  / p * 100
//   out  = up - down
//
// Balance of Power:
//   BOP = (close - open) / (high - low),  0 when high <= low
//
// Chande Momentum Oscillator (running sums of the last `p` changes):
//   CMO = 100 * (up - down) / (up + down)
// =============================================================================

use crate::config::IndicatorConfig;
use crate::error::Result;
use crate::indicators::sma::sma_series;
use crate::series::{
    count, ensure_finite, ensure_lookback, ensure_non_empty, ensure_same_len, ensure_window,
    leading_undefined, lit, ratio, undefined, Float,
};

fn ensure_hlc<T>(kernel: &'static str, high: &[T], low: &[T], close: &[T]) -> Result<()> {
    ensure_non_empty(kernel, close)?;
    ensure_same_len(kernel, "high", close.len(), high)?;
    ensure_same_len(kernel, "low", close.len(), low)
}

// =============================================================================
// Williams %R
// =============================================================================

/// Williams %R over a `period`-bar window. Values lie in `[-100, 0]`.
/// Windows reaching into a leading undefined run are undefined.
///
/// # Edge cases
/// - a window where the highest high equals the lowest low is undefined.
pub fn calculate_willr<T: Float>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
) -> Result<Vec<T>> {
    ensure_hlc("willr", high, low, close)?;
    ensure_window("willr", "period", period, close.len())?;

    let skip = leading_undefined(high)
        .max(leading_undefined(low))
        .max(leading_undefined(close));
    let minus_hundred = lit::<T>(-100.0);
    let mut out = undefined(close.len());
    for i in (skip + period - 1)..close.len() {
        let start = i + 1 - period;
        let hh = high[start..=i].iter().fold(T::neg_infinity(), |m, &h| m.max(h));
        let ll = low[start..=i].iter().fold(T::infinity(), |m, &l| m.min(l));
        out[i] = ratio(hh - close[i], hh - ll) * minus_hundred;
    }
    Ok(out)
}

// =============================================================================
// Commodity Channel Index
// =============================================================================

/// CCI with the conventional 0.015 scaling constant.
pub fn calculate_cci<T: Float>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
) -> Result<Vec<T>> {
    calculate_cci_config(high, low, close, period, &IndicatorConfig::default())
}

/// CCI scaled by `config.cci_constant`.
pub fn calculate_cci_config<T: Float>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    config: &IndicatorConfig,
) -> Result<Vec<T>> {
    calculate_cci_scaled(high, low, close, period, lit(config.cci_constant))
}

/// CCI with an explicit scaling constant.
///
/// A window whose typical prices all equal their mean (mean deviation 0) is
/// undefined at that position.
pub fn calculate_cci_scaled<T: Float>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    constant: T,
) -> Result<Vec<T>> {
    ensure_hlc("cci", high, low, close)?;
    ensure_window("cci", "period", period, close.len())?;
    ensure_finite("cci", "constant", constant)?;

    let three = lit::<T>(3.0);
    let tp: Vec<T> = high
        .iter()
        .zip(low)
        .zip(close)
        .map(|((&h, &l), &c)| (h + l + c) / three)
        .collect();
    let tp_sma = sma_series(&tp, period);
    let p = count::<T>(period);

    let mut out = undefined(close.len());
    for i in (period - 1)..close.len() {
        let mean = tp_sma[i];
        let mean_dev = tp[i + 1 - period..=i]
            .iter()
            .fold(T::zero(), |acc, &x| acc + (mean - x).abs())
            / p;
        out[i] = ratio(tp[i] - mean, constant * mean_dev);
    }
    Ok(out)
}

// =============================================================================
// Aroon oscillator
// =============================================================================

/// Aroon Up minus Aroon Down. Defined from index `period`, shifted by any
/// leading undefined run of the inputs.
///
/// Ties resolve to the earliest bar of the window.
pub fn calculate_aroon<T: Float>(high: &[T], low: &[T], period: usize) -> Result<Vec<T>> {
    ensure_non_empty("aroon", high)?;
    ensure_same_len("aroon", "low", high.len(), low)?;
    ensure_lookback("aroon", "period", period, high.len())?;

    let skip = leading_undefined(high).max(leading_undefined(low));
    let p = count::<T>(period);
    let hundred = lit::<T>(100.0);
    let mut out = undefined(high.len());
    for i in (skip + period)..high.len() {
        let start = i - period;
        let mut hi_at = start;
        let mut lo_at = start;
        for j in start..=i {
            if high[j] > high[hi_at] {
                hi_at = j;
            }
            if low[j] < low[lo_at] {
                lo_at = j;
            }
        }
        let up = (p - count::<T>(i - hi_at)) / p * hundred;
        let down = (p - count::<T>(i - lo_at)) / p * hundred;
        out[i] = up - down;
    }
    Ok(out)
}

// =============================================================================
// Balance of Power
// =============================================================================

/// Balance of Power, no warm-up. A bar without range scores 0.
pub fn calculate_bop<T: Float>(open: &[T], high: &[T], low: &[T], close: &[T]) -> Result<Vec<T>> {
    ensure_hlc("bop", high, low, close)?;
    ensure_same_len("bop", "open", close.len(), open)?;

    Ok((0..close.len())
        .map(|i| {
            if high[i] > low[i] {
                (close[i] - open[i]) / (high[i] - low[i])
            } else {
                T::zero()
            }
        })
        .collect())
}

// =============================================================================
// Chande Momentum Oscillator
// =============================================================================

/// CMO over the last `period` one-bar changes. Defined from index `period`
/// (shifted by any leading undefined run of `closes`); a window with no
/// movement at all is undefined.
pub fn calculate_cmo<T: Float>(closes: &[T], period: usize) -> Result<Vec<T>> {
    ensure_non_empty("cmo", closes)?;
    ensure_lookback("cmo", "period", period, closes.len())?;

    let split = |i: usize| {
        let d = closes[i] - closes[i - 1];
        if d.is_nan() {
            (d, d)
        } else if d > T::zero() {
            (d, T::zero())
        } else {
            (T::zero(), -d)
        }
    };

    let skip = leading_undefined(closes);
    let hundred = lit::<T>(100.0);
    let mut up = T::zero();
    let mut down = T::zero();
    let mut out = undefined(closes.len());
    for i in (skip + 1)..closes.len() {
        let (u, d) = split(i);
        up = up + u;
        down = down + d;
        if i > skip + period {
            let (old_u, old_d) = split(i - period);
            up = up - old_u;
            down = down - old_d;
        }
        if i >= skip + period {
            out[i] = ratio(hundred * (up - down), up + down);
        }
    }
    Ok(out)
}
