// =============================================================================
// MACD, Absolute and Percentage Price Oscillators
// =============================================================================
//
// MACD   = EMA(close, 12) - EMA(close, 26)
// Signal = EMA(MACD, 9), seeded with the mean of the first 9 defined MACD
//          values (the EMA kernel's leading-undefined skip does exactly that).
//
// APO = MA_fast - MA_slow
// PPO = (MA_fast - MA_slow) / MA_slow * 100
//
// APO / PPO use the same moving-average kernel (SMA or EMA) for both legs and
// are defined wherever both legs are.
// =============================================================================

use crate::config::IndicatorConfig;
use crate::error::Result;
use crate::indicators::ema::ema_series;
use crate::indicators::sma::sma_series;
use crate::series::{ensure_non_empty, ensure_period, ensure_window, lit, ratio, zip_with, Float};
use crate::types::MaType;

/// Dispatch to the selected moving-average kernel.
pub(crate) fn ma_series<T: Float>(values: &[T], period: usize, ma: MaType) -> Vec<T> {
    match ma {
        MaType::Sma => sma_series(values, period),
        MaType::Ema => ema_series(values, period),
    }
}

/// MACD line and signal line with the classic 12 / 26 / 9 periods.
///
/// # Edge cases
/// - `closes.len() < 26` is rejected (the slow EMA can never seed).
/// - `closes.len() < 34` yields a fully undefined signal line.
pub fn calculate_macd<T: Float>(closes: &[T]) -> Result<(Vec<T>, Vec<T>)> {
    calculate_macd_config(closes, &IndicatorConfig::default())
}

/// MACD with the periods of `config`.
pub fn calculate_macd_config<T: Float>(
    closes: &[T],
    config: &IndicatorConfig,
) -> Result<(Vec<T>, Vec<T>)> {
    calculate_macd_with(closes, config.macd_fast, config.macd_slow, config.macd_signal)
}

/// MACD with explicit fast / slow / signal periods.
pub fn calculate_macd_with<T: Float>(
    closes: &[T],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<(Vec<T>, Vec<T>)> {
    ensure_non_empty("macd", closes)?;
    ensure_window("macd", "slow", slow, closes.len())?;
    ensure_window("macd", "fast", fast, closes.len())?;
    ensure_period("macd", "signal", signal, usize::MAX, closes.len())?;

    let fast_ema = ema_series(closes, fast);
    let slow_ema = ema_series(closes, slow);
    let macd = zip_with(&fast_ema, &slow_ema, |f, s| f - s);
    let signal_line = ema_series(&macd, signal);
    Ok((macd, signal_line))
}

/// Absolute Price Oscillator: `MA(values, fast) - MA(values, slow)`.
pub fn calculate_apo<T: Float>(
    values: &[T],
    slow: usize,
    fast: usize,
    ma: MaType,
) -> Result<Vec<T>> {
    ensure_non_empty("apo", values)?;
    ensure_window("apo", "slow", slow, values.len())?;
    ensure_window("apo", "fast", fast, values.len())?;

    let fast_ma = ma_series(values, fast, ma);
    let slow_ma = ma_series(values, slow, ma);
    Ok(zip_with(&fast_ma, &slow_ma, |f, s| f - s))
}

/// Percentage Price Oscillator: `(MA_fast - MA_slow) / MA_slow * 100`.
///
/// A zero slow average leaves that position undefined.
pub fn calculate_ppo<T: Float>(
    values: &[T],
    fast: usize,
    slow: usize,
    ma: MaType,
) -> Result<Vec<T>> {
    ensure_non_empty("ppo", values)?;
    ensure_window("ppo", "fast", fast, values.len())?;
    ensure_window("ppo", "slow", slow, values.len())?;

    let hundred = lit::<T>(100.0);
    let fast_ma = ma_series(values, fast, ma);
    let slow_ma = ma_series(values, slow, ma);
    Ok(zip_with(&fast_ma, &slow_ma, |f, s| ratio(f - s, s) * hundred))
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaError;
    use crate::series::first_defined;

    fn wavy(n: usize) -> Vec<f64> {
        (0..n).map(|i| 50.0 + (i as f64 * 0.25).sin() * 3.0 + i as f64 * 0.1).collect()
    }

    // ---- calculate_macd --------------------------------------------------

    #[test]
    fn macd_warm_up() {
        let (macd, signal) = calculate_macd(&wavy(60)).unwrap();
        assert_eq!(first_defined(&macd), Some(25));
        assert_eq!(first_defined(&signal), Some(33));
    }

    #[test]
    fn macd_line_is_ema_difference() {
        let xs = wavy(60);
        let (macd, _) = calculate_macd(&xs).unwrap();
        let e12 = ema_series(&xs, 12);
        let e26 = ema_series(&xs, 26);
        for i in 25..60 {
            assert!((macd[i] - (e12[i] - e26[i])).abs() < 1e-12);
        }
    }

    #[test]
    fn macd_signal_seeded_with_mean_of_first_nine() {
        let xs = wavy(60);
        let (macd, signal) = calculate_macd(&xs).unwrap();
        let seed = macd[25..34].iter().sum::<f64>() / 9.0;
        assert!((signal[33] - seed).abs() < 1e-12);
        let k = 2.0 / 10.0;
        assert!((signal[34] - ((macd[34] - seed) * k + seed)).abs() < 1e-12);
    }

    #[test]
    fn macd_short_series_has_undefined_signal() {
        let (macd, signal) = calculate_macd(&wavy(30)).unwrap();
        assert_eq!(first_defined(&macd), Some(25));
        assert!(signal.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn macd_rejects_too_short_input() {
        assert!(matches!(
            calculate_macd(&wavy(20)),
            Err(TaError::PeriodTooLong { name: "slow", .. })
        ));
    }

    #[test]
    fn macd_config_periods_are_applied() {
        let xs = wavy(60);
        let cfg = IndicatorConfig {
            macd_fast: 5,
            macd_slow: 10,
            macd_signal: 3,
            ..IndicatorConfig::default()
        };
        let (macd, signal) = calculate_macd_config(&xs, &cfg).unwrap();
        assert_eq!(first_defined(&macd), Some(9));
        assert_eq!(first_defined(&signal), Some(11));

        let (explicit, _) = calculate_macd_with(&xs, 5, 10, 3).unwrap();
        assert_eq!(macd[30].to_bits(), explicit[30].to_bits());
    }

    // ---- calculate_apo / calculate_ppo -----------------------------------

    #[test]
    fn apo_sma_legs() {
        let xs: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        let apo = calculate_apo(&xs, 10, 3, MaType::Sma).unwrap();
        assert_eq!(first_defined(&apo), Some(9));
        // Linear series: SMA(3) lags 1, SMA(10) lags 4.5 => difference 3.5
        for v in &apo[9..] {
            assert!((v - 3.5).abs() < 1e-10);
        }
    }

    #[test]
    fn ppo_is_apo_relative_to_slow_leg() {
        let xs = wavy(40);
        let apo = calculate_apo(&xs, 10, 4, MaType::Ema).unwrap();
        let ppo = calculate_ppo(&xs, 4, 10, MaType::Ema).unwrap();
        let slow = ema_series(&xs, 10);
        for i in 9..40 {
            assert!((ppo[i] - apo[i] / slow[i] * 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn ppo_zero_slow_leg_is_undefined() {
        let xs = vec![0.0; 12];
        let ppo: Vec<f64> = calculate_ppo(&xs, 2, 4, MaType::Sma).unwrap();
        assert!(ppo.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn apo_rejects_zero_fast() {
        assert_eq!(
            calculate_apo(&wavy(10), 5, 0, MaType::Sma),
            Err(TaError::InvalidPeriod { name: "fast", value: 0 })
        );
    }
}
