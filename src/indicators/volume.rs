// =============================================================================
// Volume Indicators — ACDI, OBV, CMF, Chaikin Oscillator, PVI / NVI
// =============================================================================
//
// Money-flow multiplier of a bar (0 when the bar has no range):
//   mult = ((close - low) - (high - close)) / (high - low)
//
// ACDI  = running sum of mult * volume
// OBV   = running sum of +volume on up closes, -volume on down closes,
//         seeded with volume_0
// CMF   = sum(mult * volume) / sum(volume) over the last `p` bars
// CO    = EMA(ACDI, 3) - EMA(ACDI, 10)
// PVI   = 100 seed; on a volume increase
//           pvi_i = pvi_{i-1} + (close_i - close_{i-1}) / close_{i-1} * pvi_{i-1}
// NVI   = same update, applied on a volume decrease
// =============================================================================

use crate::error::Result;
use crate::indicators::ema::ema_series;
use crate::series::{
    ensure_non_empty, ensure_same_len, ensure_window, lit, ratio, undefined, zip_with, Float,
};

fn ensure_hlcv<T>(
    kernel: &'static str,
    high: &[T],
    low: &[T],
    close: &[T],
    volume: &[T],
) -> Result<()> {
    ensure_non_empty(kernel, close)?;
    ensure_same_len(kernel, "high", close.len(), high)?;
    ensure_same_len(kernel, "low", close.len(), low)?;
    ensure_same_len(kernel, "volume", close.len(), volume)
}

/// Money-flow volume of one bar; zero for a bar without range.
#[inline]
fn money_flow_volume<T: Float>(high: T, low: T, close: T, volume: T) -> T {
    if high > low {
        ((close - low) - (high - close)) / (high - low) * volume
    } else {
        T::zero()
    }
}

fn acdi_series<T: Float>(high: &[T], low: &[T], close: &[T], volume: &[T]) -> Vec<T> {
    let mut total = T::zero();
    (0..close.len())
        .map(|i| {
            total = total + money_flow_volume(high[i], low[i], close[i], volume[i]);
            total
        })
        .collect()
}

// =============================================================================
// Accumulation / Distribution
// =============================================================================

/// Accumulation/Distribution line. No warm-up.
pub fn calculate_acdi<T: Float>(
    high: &[T],
    low: &[T],
    close: &[T],
    volume: &[T],
) -> Result<Vec<T>> {
    ensure_hlcv("acdi", high, low, close, volume)?;
    Ok(acdi_series(high, low, close, volume))
}

/// Chaikin Oscillator `EMA(ACDI, 3) - EMA(ACDI, 10)`. Defined from index 9;
/// fewer than 10 bars give an all-undefined series.
pub fn calculate_chaikin_oscillator<T: Float>(
    high: &[T],
    low: &[T],
    close: &[T],
    volume: &[T],
) -> Result<Vec<T>> {
    ensure_hlcv("chaikin_oscillator", high, low, close, volume)?;
    let acdi = acdi_series(high, low, close, volume);
    let fast = ema_series(&acdi, 3);
    let slow = ema_series(&acdi, 10);
    Ok(zip_with(&fast, &slow, |f, s| f - s))
}

/// Chaikin Money Flow over `period` bars.
///
/// A window with zero total volume is undefined.
pub fn calculate_cmf<T: Float>(
    high: &[T],
    low: &[T],
    close: &[T],
    volume: &[T],
    period: usize,
) -> Result<Vec<T>> {
    ensure_hlcv("cmf", high, low, close, volume)?;
    ensure_window("cmf", "period", period, close.len())?;

    let n = close.len();
    let mfv: Vec<T> = (0..n)
        .map(|i| money_flow_volume(high[i], low[i], close[i], volume[i]))
        .collect();

    let mut out = undefined(n);
    for i in (period - 1)..n {
        let start = i + 1 - period;
        let flow = mfv[start..=i].iter().fold(T::zero(), |acc, &x| acc + x);
        let vol = volume[start..=i].iter().fold(T::zero(), |acc, &x| acc + x);
        out[i] = ratio(flow, vol);
    }
    Ok(out)
}

// =============================================================================
// On-Balance Volume
// =============================================================================

/// On-Balance Volume, seeded with the first bar's volume.
pub fn calculate_obv<T: Float>(closes: &[T], volume: &[T]) -> Result<Vec<T>> {
    ensure_non_empty("obv", closes)?;
    ensure_same_len("obv", "volume", closes.len(), volume)?;

    let mut total = volume[0];
    let mut out = Vec::with_capacity(closes.len());
    out.push(total);
    for i in 1..closes.len() {
        if closes[i] > closes[i - 1] {
            total = total + volume[i];
        } else if closes[i] < closes[i - 1] {
            total = total - volume[i];
        }
        out.push(total);
    }
    Ok(out)
}

// =============================================================================
// Positive / Negative Volume Index
// =============================================================================

#[derive(Clone, Copy)]
enum VolumeSide {
    Rising,
    Falling,
}

fn volume_index<T: Float>(closes: &[T], volume: &[T], side: VolumeSide) -> Vec<T> {
    let mut index = lit::<T>(100.0);
    let mut out = Vec::with_capacity(closes.len());
    out.push(index);
    for i in 1..closes.len() {
        let active = match side {
            VolumeSide::Rising => volume[i] > volume[i - 1],
            VolumeSide::Falling => volume[i] < volume[i - 1],
        };
        if !active {
            out.push(index);
            continue;
        }
        let change = ratio(closes[i] - closes[i - 1], closes[i - 1]);
        if change.is_nan() {
            out.push(T::nan());
            continue;
        }
        index = index + change * index;
        out.push(index);
    }
    out
}

/// Positive Volume Index: moves only on bars where volume rises.
///
/// A zero previous close leaves that bar undefined; the index carries over.
pub fn calculate_pvi<T: Float>(closes: &[T], volume: &[T]) -> Result<Vec<T>> {
    ensure_non_empty("pvi", closes)?;
    ensure_same_len("pvi", "volume", closes.len(), volume)?;
    Ok(volume_index(closes, volume, VolumeSide::Rising))
}

/// Negative Volume Index: moves only on bars where volume falls.
pub fn calculate_nvi<T: Float>(closes: &[T], volume: &[T]) -> Result<Vec<T>> {
    ensure_non_empty("nvi", closes)?;
    ensure_same_len("nvi", "volume", closes.len(), volume)?;
    Ok(volume_index(closes, volume, VolumeSide::Falling))
}
