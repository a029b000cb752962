// =============================================================================
// Keltner Channels
// =============================================================================
//
//   middle = EMA(close, p)
//   upper  = middle + deviation * ATR(p_atr)
//   lower  = middle - deviation * ATR(p_atr)
//
// The bands exist only where both the EMA and the ATR have warmed up.
// =============================================================================

use crate::config::IndicatorConfig;
use crate::error::Result;
use crate::indicators::atr::atr_series;
use crate::indicators::bollinger::Bands;
use crate::indicators::ema::ema_series;
use crate::series::{
    ensure_finite, ensure_lookback, ensure_non_empty, ensure_same_len, ensure_window, lit, Float,
};

/// Calculate Keltner Channels.
///
/// The middle band is defined from `period - 1`; upper and lower from
/// `max(period - 1, atr_period)`.
pub fn calculate_keltner<T: Float>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    atr_period: usize,
    deviation: T,
) -> Result<Bands<T>> {
    ensure_non_empty("keltner", close)?;
    ensure_same_len("keltner", "high", close.len(), high)?;
    ensure_same_len("keltner", "low", close.len(), low)?;
    ensure_window("keltner", "period", period, close.len())?;
    ensure_lookback("keltner", "atr_period", atr_period, close.len())?;
    ensure_finite("keltner", "deviation", deviation)?;

    let middle = ema_series(close, period);
    let atr = atr_series(high, low, close, atr_period);

    let upper = middle.iter().zip(&atr).map(|(&m, &a)| m + deviation * a).collect();
    let lower = middle.iter().zip(&atr).map(|(&m, &a)| m - deviation * a).collect();
    Ok(Bands { upper, middle, lower })
}

/// Keltner Channels at `config.keltner_deviation` ATRs.
pub fn calculate_keltner_config<T: Float>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    atr_period: usize,
    config: &IndicatorConfig,
) -> Result<Bands<T>> {
    calculate_keltner(high, low, close, period, atr_period, lit(config.keltner_deviation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaError;
    use crate::series::first_defined;

    fn bars(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let close: Vec<f64> = (0..n).map(|i| 40.0 + (i as f64 * 0.2).sin() * 3.0).collect();
        let high = close.iter().map(|c| c + 1.0).collect();
        let low = close.iter().map(|c| c - 1.0).collect();
        (high, low, close)
    }

    #[test]
    fn keltner_warm_up() {
        let (h, l, c) = bars(40);
        let kc = calculate_keltner(&h, &l, &c, 20, 10, 2.0).unwrap();
        assert_eq!(first_defined(&kc.middle), Some(19));
        assert_eq!(first_defined(&kc.upper), Some(19));

        let kc = calculate_keltner(&h, &l, &c, 5, 10, 2.0).unwrap();
        assert_eq!(first_defined(&kc.middle), Some(4));
        assert_eq!(first_defined(&kc.lower), Some(10));
    }

    #[test]
    fn keltner_band_offset_is_scaled_atr() {
        let (h, l, c) = bars(40);
        let kc = calculate_keltner(&h, &l, &c, 10, 10, 1.5).unwrap();
        let atr = atr_series(&h, &l, &c, 10);
        for i in 10..40 {
            assert!((kc.upper[i] - kc.middle[i] - 1.5 * atr[i]).abs() < 1e-10);
            assert!((kc.middle[i] - kc.lower[i] - 1.5 * atr[i]).abs() < 1e-10);
        }
    }

    #[test]
    fn keltner_config_deviation_is_applied() {
        let (h, l, c) = bars(40);
        let cfg = IndicatorConfig { keltner_deviation: 0.5, ..IndicatorConfig::default() };
        let kc = calculate_keltner_config(&h, &l, &c, 10, 10, &cfg).unwrap();
        let atr = atr_series(&h, &l, &c, 10);
        for i in 10..40 {
            assert!((kc.upper[i] - kc.middle[i] - 0.5 * atr[i]).abs() < 1e-10);
        }
    }

    #[test]
    fn keltner_rejects_atr_period_equal_to_len() {
        let (h, l, c) = bars(10);
        assert!(matches!(
            calculate_keltner(&h, &l, &c, 5, 10, 2.0),
            Err(TaError::PeriodTooLong { name: "atr_period", .. })
        ));
    }
}
