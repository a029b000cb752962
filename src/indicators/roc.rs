// =============================================================================
// Rate of Change (ROC), Momentum and Volume Price Trend (VPT)
// =============================================================================
//
// ROC measures the percentage change in price over a look-back period:
//   ROC_i = ((close_i - close_{i-p}) / close_{i-p}) * 100
//
// Momentum is the absolute change over the same look-back:
//   MOM_i = close_i - close_{i-p}
//
// VPT accumulates volume weighted by the one-bar percentage change:
//   VPT_0 = volume_0
//   VPT_i = VPT_{i-1} + ((close_i - close_{i-1}) / close_{i-1}) * volume_i
//
// Positive ROC indicates upward momentum; negative indicates downward.

use crate::error::Result;
use crate::series::{
    ensure_lookback, ensure_non_empty, ensure_same_len, lit, ratio, undefined, Float,
};

/// Calculate the Rate of Change for the given closing prices and period.
///
/// Defined from index `period`; a zero reference close leaves that position
/// undefined.
pub fn calculate_roc<T: Float>(closes: &[T], period: usize) -> Result<Vec<T>> {
    ensure_non_empty("roc", closes)?;
    ensure_lookback("roc", "period", period, closes.len())?;

    let hundred = lit::<T>(100.0);
    let mut out = undefined(closes.len());
    for i in period..closes.len() {
        let prev = closes[i - period];
        out[i] = ratio(closes[i] - prev, prev) * hundred;
    }
    Ok(out)
}

/// Calculate Momentum: `close[i] - close[i - period]`.
pub fn calculate_momentum<T: Float>(closes: &[T], period: usize) -> Result<Vec<T>> {
    ensure_non_empty("momentum", closes)?;
    ensure_lookback("momentum", "period", period, closes.len())?;

    let mut out = undefined(closes.len());
    for i in period..closes.len() {
        out[i] = closes[i] - closes[i - period];
    }
    Ok(out)
}

/// Calculate the Volume Price Trend.
///
/// # Edge cases
/// - a zero previous close makes that step undefined; the running total
///   carries over unchanged to the next bar.
pub fn calculate_vpt<T: Float>(closes: &[T], volume: &[T]) -> Result<Vec<T>> {
    ensure_non_empty("vpt", closes)?;
    ensure_same_len("vpt", "volume", closes.len(), volume)?;

    let mut out = Vec::with_capacity(closes.len());
    let mut total = volume[0];
    out.push(total);
    for i in 1..closes.len() {
        let change = ratio(closes[i] - closes[i - 1], closes[i - 1]);
        if change.is_nan() {
            out.push(T::nan());
            continue;
        }
        total = total + change * volume[i];
        out.push(total);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaError;

    #[test]
    fn roc_basic() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let roc = calculate_roc(&closes, 14).unwrap();
        assert!(roc[13].is_nan());
        // From 1 to 15: ROC = (15-1)/1 * 100 = 1400%
        assert!((roc[14] - 1400.0).abs() < 1e-10);
    }

    #[test]
    fn roc_insufficient_data() {
        let closes = vec![1.0, 2.0, 3.0];
        assert!(matches!(
            calculate_roc(&closes, 14),
            Err(TaError::PeriodTooLong { .. })
        ));
    }

    #[test]
    fn roc_zero_reference_is_undefined() {
        let roc: Vec<f64> = calculate_roc(&[0.0, 1.0, 2.0], 1).unwrap();
        assert!(roc[1].is_nan());
        assert!((roc[2] - 100.0).abs() < 1e-10);
    }

    #[test]
    fn momentum_is_difference() {
        let mom: Vec<f64> = calculate_momentum(&[5.0, 7.0, 4.0, 10.0], 2).unwrap();
        assert!(mom[1].is_nan());
        assert!((mom[2] + 1.0).abs() < 1e-10);
        assert!((mom[3] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn vpt_accumulates() {
        let vpt: Vec<f64> = calculate_vpt(&[10.0, 11.0, 9.9], &[100.0, 200.0, 50.0]).unwrap();
        assert!((vpt[0] - 100.0).abs() < 1e-10);
        assert!((vpt[1] - 120.0).abs() < 1e-10);
        assert!((vpt[2] - 115.0).abs() < 1e-10);
    }

    #[test]
    fn vpt_zero_close_heals() {
        let vpt: Vec<f64> = calculate_vpt(&[10.0, 0.0, 1.0, 2.0], &[5.0, 5.0, 5.0, 5.0]).unwrap();
        assert!(vpt[1].abs() < 1e-10);
        assert!(vpt[2].is_nan());
        assert!((vpt[3] - 5.0).abs() < 1e-10);
    }

    #[test]
    fn vpt_rejects_mismatched_volume() {
        assert!(matches!(
            calculate_vpt(&[1.0, 2.0], &[1.0]),
            Err(TaError::LengthMismatch { name: "volume", .. })
        ));
    }
}
