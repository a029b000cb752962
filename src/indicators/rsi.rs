// =============================================================================
// Relative Strength Index (RSI)
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes.
//
// Step 1: gain_i = max(close_i - close_{i-1}, 0)
//         loss_i = max(close_{i-1} - close_i, 0)          (i >= 1)
// Step 2: Seed average gain / average loss with the mean of the first
//         `period` gains / losses (indices 1..=period).
// Step 3: Refresh the averages for every later bar:
//            smoothed:  avg = (avg * (period - 1) + x) / period     (Wilder)
//            standard:  avg = mean of the trailing `period` values
// Step 4: RS  = avg_gain / avg_loss
//         RSI = 100 - 100 / (1 + RS)
//
// avg_loss == 0 with avg_gain > 0 makes RS infinite and RSI saturates at 100;
// a completely flat window (0 / 0) is undefined at that position only.
// =============================================================================

use crate::error::Result;
use crate::series::{
    count, ensure_lookback, ensure_non_empty, leading_undefined, lit, undefined, Float,
};
use crate::types::RsiMode;

/// Compute the full RSI series for `closes`.
///
/// The first defined value sits at index `period` (the first `period`
/// price changes seed the averages), shifted by any leading undefined run
/// of `closes`. A step touching an undefined close is itself undefined.
///
/// # Errors
/// - empty input
/// - `period == 0` or `period >= closes.len()` (need `period` price changes)
pub fn calculate_rsi<T: Float>(closes: &[T], period: usize, mode: RsiMode) -> Result<Vec<T>> {
    ensure_non_empty("rsi", closes)?;
    ensure_lookback("rsi", "period", period, closes.len())?;

    let n = closes.len();
    let skip = leading_undefined(closes);
    let mut out = undefined(n);
    if n - skip <= period {
        return Ok(out);
    }

    // --- Per-bar gains / losses (the first defined close has no predecessor) -
    let mut gains = vec![T::zero(); n];
    let mut losses = vec![T::zero(); n];
    for i in (skip + 1)..n {
        let diff = closes[i] - closes[i - 1];
        if diff.is_nan() {
            gains[i] = diff;
            losses[i] = diff;
        } else if diff > T::zero() {
            gains[i] = diff;
        } else if diff < T::zero() {
            losses[i] = -diff;
        }
    }

    // --- Seed averages with the mean of the first `period` changes -----------
    let p = count::<T>(period);
    let first = skip + period;
    let mut sum_gain = gains[skip + 1..=first].iter().fold(T::zero(), |acc, &g| acc + g);
    let mut sum_loss = losses[skip + 1..=first].iter().fold(T::zero(), |acc, &l| acc + l);
    let mut avg_gain = sum_gain / p;
    let mut avg_loss = sum_loss / p;
    out[first] = rsi_from_averages(avg_gain, avg_loss);

    let keep = count::<T>(period - 1);
    for i in (first + 1)..n {
        match mode {
            RsiMode::Smoothed => {
                avg_gain = (avg_gain * keep + gains[i]) / p;
                avg_loss = (avg_loss * keep + losses[i]) / p;
            }
            RsiMode::Standard => {
                sum_gain = sum_gain + gains[i] - gains[i - period];
                sum_loss = sum_loss + losses[i] - losses[i - period];
                avg_gain = sum_gain / p;
                avg_loss = sum_loss / p;
            }
        }
        out[i] = rsi_from_averages(avg_gain, avg_loss);
    }

    Ok(out)
}

/// `100 - 100 / (1 + avg_gain / avg_loss)` evaluated in plain IEEE
/// arithmetic: a zero loss average saturates at 100, 0 / 0 is undefined.
fn rsi_from_averages<T: Float>(avg_gain: T, avg_loss: T) -> T {
    let hundred = lit::<T>(100.0);
    hundred - hundred / (T::one() + avg_gain / avg_loss)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaError;
    use crate::indicators::ema::ema_series;

    fn sample() -> Vec<f64> {
        vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03,
            44.18, 44.22, 44.57, 43.42, 42.66, 43.13, 43.90, 44.71, 45.02, 44.60,
        ]
    }

    // ---- calculate_rsi ---------------------------------------------------

    #[test]
    fn rsi_period_zero() {
        assert_eq!(
            calculate_rsi(&[1.0, 2.0, 3.0], 0, RsiMode::Smoothed),
            Err(TaError::InvalidPeriod { name: "period", value: 0 })
        );
    }

    #[test]
    fn rsi_insufficient_data() {
        // Need period + 1 closes (period deltas). 14 closes => 13 deltas < 14.
        let closes: Vec<f64> = (1..=14).map(|x| x as f64).collect();
        assert!(matches!(
            calculate_rsi(&closes, 14, RsiMode::Smoothed),
            Err(TaError::PeriodTooLong { .. })
        ));
    }

    #[test]
    fn rsi_warm_up_length() {
        let rsi = calculate_rsi(&sample(), 14, RsiMode::Smoothed).unwrap();
        assert_eq!(rsi.len(), sample().len());
        assert_eq!(leading_undefined(&rsi), 14);
    }

    #[test]
    fn rsi_all_gains_saturates_at_100() {
        // Strictly ascending prices => avg loss is zero => RSI is exactly 100.
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        for mode in [RsiMode::Smoothed, RsiMode::Standard] {
            let rsi = calculate_rsi(&closes, 14, mode).unwrap();
            for &v in &rsi[14..] {
                assert_eq!(v, 100.0, "mode {mode}");
            }
        }
    }

    #[test]
    fn rsi_all_losses() {
        let closes: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        let rsi = calculate_rsi(&closes, 14, RsiMode::Smoothed).unwrap();
        for &v in &rsi[14..] {
            assert!(v.abs() < 1e-10, "expected 0.0, got {v}");
        }
    }

    #[test]
    fn rsi_flat_market_is_undefined() {
        let closes = vec![100.0; 30];
        let rsi: Vec<f64> = calculate_rsi(&closes, 14, RsiMode::Smoothed).unwrap();
        assert!(rsi.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn rsi_flat_window_heals_once_prices_move() {
        let mut closes = vec![10.0; 6];
        closes.extend([11.0, 10.5, 11.5]);
        let rsi: Vec<f64> = calculate_rsi(&closes, 3, RsiMode::Standard).unwrap();
        assert!(rsi[3].is_nan() && rsi[5].is_nan());
        assert_eq!(rsi[6], 100.0);
        assert!(rsi[8].is_finite());
    }

    #[test]
    fn rsi_smoothed_matches_wilder_reference() {
        let closes = sample();
        let period = 14;
        let rsi = calculate_rsi(&closes, period, RsiMode::Smoothed).unwrap();

        let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
        let mut ag = deltas[..period].iter().map(|d| d.max(0.0)).sum::<f64>() / 14.0;
        let mut al = deltas[..period].iter().map(|d| (-d).max(0.0)).sum::<f64>() / 14.0;
        assert!((rsi[period] - (100.0 - 100.0 / (1.0 + ag / al))).abs() < 1e-9);
        for (j, d) in deltas[period..].iter().enumerate() {
            ag = (ag * 13.0 + d.max(0.0)) / 14.0;
            al = (al * 13.0 + (-d).max(0.0)) / 14.0;
            let want = 100.0 - 100.0 / (1.0 + ag / al);
            assert!((rsi[period + 1 + j] - want).abs() < 1e-9);
        }
    }

    #[test]
    fn rsi_standard_uses_trailing_window_mean() {
        let closes = sample();
        let period = 5;
        let rsi = calculate_rsi(&closes, period, RsiMode::Standard).unwrap();
        for i in period..closes.len() {
            let window = &closes[i - period..=i];
            let (g, l) = window.windows(2).fold((0.0, 0.0), |(g, l), w| {
                let d = w[1] - w[0];
                (g + d.max(0.0), l + (-d).max(0.0))
            });
            let want = 100.0 - 100.0 / (1.0 + (g / 5.0) / (l / 5.0));
            assert!((rsi[i] - want).abs() < 1e-8, "index {i}: got {}, want {want}", rsi[i]);
        }
    }

    #[test]
    fn rsi_range_check() {
        let rsi = calculate_rsi(&sample(), 6, RsiMode::Smoothed).unwrap();
        for &v in rsi.iter().filter(|v| !v.is_nan()) {
            assert!((0.0..=100.0).contains(&v), "RSI {v} out of range");
        }
    }

    #[test]
    fn rsi_shifts_past_leading_undefined() {
        // An upstream EMA(10) leaves 9 undefined closes; RSI(3) starts at 9 + 3.
        let ema = ema_series(&sample(), 10);
        assert_eq!(leading_undefined(&ema), 9);
        for mode in [RsiMode::Smoothed, RsiMode::Standard] {
            let rsi = calculate_rsi(&ema, 3, mode).unwrap();
            assert_eq!(leading_undefined(&rsi), 12, "mode {mode}");

            let tail = calculate_rsi(&ema[9..], 3, mode).unwrap();
            for i in 12..ema.len() {
                assert_eq!(rsi[i].to_bits(), tail[i - 9].to_bits(), "mode {mode}, index {i}");
            }
        }
    }

    #[test]
    fn rsi_short_defined_tail_is_undefined() {
        let closes = [f64::NAN, f64::NAN, f64::NAN, 1.0, 2.0, 3.0];
        let rsi = calculate_rsi(&closes, 3, RsiMode::Smoothed).unwrap();
        assert!(rsi.iter().all(|v| v.is_nan()));
    }
}
