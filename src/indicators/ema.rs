// =============================================================================
// Exponential Moving Average (EMA) and its cascades
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   k     = 2 / (period + 1)
//   EMA_i = (x_i - EMA_{i-1}) * k + EMA_{i-1}
//
// The very first EMA value is seeded with the SMA of the first `period`
// defined values.
//
// Cascades:
//   DEMA = 2*E1 - E2
//   TEMA = 3*E1 - 3*E2 + E3
//   T3   = c1*E6 + c2*E5 + c3*E4 + c4*E3     (a = volume factor)
//          c1 = -a^3
//          c2 = 3a^2 + 3a^3
//          c3 = -6a^2 - 3a - 3a^3
//          c4 = 1 + 3a + a^3 + 3a^2
// where E(n+1) = EMA(E(n), period).
// =============================================================================

use crate::config::IndicatorConfig;
use crate::error::Result;
use crate::series::{
    count, ensure_finite, ensure_non_empty, ensure_window, leading_undefined, lit, undefined,
    zip_with, Float,
};

/// Unchecked EMA kernel. Skips a leading undefined run of the input; returns
/// an all-undefined series when fewer than `period` defined values remain.
pub(crate) fn ema_series<T: Float>(values: &[T], period: usize) -> Vec<T> {
    let n = values.len();
    let mut out = undefined(n);
    let skip = leading_undefined(values);
    if period == 0 || n - skip < period {
        return out;
    }

    let seed_end = skip + period;
    let mut prev = values[skip..seed_end]
        .iter()
        .fold(T::zero(), |acc, &x| acc + x)
        / count::<T>(period);
    out[seed_end - 1] = prev;

    let k = lit::<T>(2.0) / count::<T>(period + 1);
    for i in seed_end..n {
        prev = (values[i] - prev) * k + prev;
        out[i] = prev;
    }
    out
}

/// `depth` EMAs applied in sequence; element `d` is the (d+1)-th EMA.
fn ema_cascade<T: Float>(values: &[T], period: usize, depth: usize) -> Vec<Vec<T>> {
    let mut levels: Vec<Vec<T>> = Vec::with_capacity(depth);
    for d in 0..depth {
        let next = match d {
            0 => ema_series(values, period),
            _ => ema_series(&levels[d - 1], period),
        };
        levels.push(next);
    }
    levels
}

/// Compute the EMA series for `values` and look-back `period`.
///
/// # Edge cases
/// - `period == 1` => the EMA reproduces the input (k = 1).
/// - a leading undefined run in `values` shifts the seed window forward.
///
/// # Errors
/// - empty input, `period == 0`, `period > values.len()`.
pub fn calculate_ema<T: Float>(values: &[T], period: usize) -> Result<Vec<T>> {
    ensure_non_empty("ema", values)?;
    ensure_window("ema", "period", period, values.len())?;
    Ok(ema_series(values, period))
}

/// Double EMA: `2 * EMA(x) - EMA(EMA(x))`. First defined index `2p - 2`.
pub fn calculate_dema<T: Float>(values: &[T], period: usize) -> Result<Vec<T>> {
    ensure_non_empty("dema", values)?;
    ensure_window("dema", "period", period, values.len())?;
    let levels = ema_cascade(values, period, 2);
    let two = lit::<T>(2.0);
    Ok(zip_with(&levels[0], &levels[1], |e1, e2| two * e1 - e2))
}

/// Triple EMA: `3*E1 - 3*E2 + E3`. First defined index `3p - 3`.
pub fn calculate_tema<T: Float>(values: &[T], period: usize) -> Result<Vec<T>> {
    ensure_non_empty("tema", values)?;
    ensure_window("tema", "period", period, values.len())?;
    let levels = ema_cascade(values, period, 3);
    let three = lit::<T>(3.0);
    Ok(levels[0]
        .iter()
        .zip(&levels[1])
        .zip(&levels[2])
        .map(|((&e1, &e2), &e3)| three * e1 - three * e2 + e3)
        .collect())
}

/// T3 coefficients `(c1, c2, c3, c4)` for volume factor `a`.
pub(crate) fn t3_coefficients<T: Float>(a: T) -> (T, T, T, T) {
    let a2 = a * a;
    let a3 = a2 * a;
    let three = lit::<T>(3.0);
    let c1 = -a3;
    let c2 = three * a2 + three * a3;
    let c3 = -lit::<T>(6.0) * a2 - three * a - three * a3;
    let c4 = T::one() + three * a + a3 + three * a2;
    (c1, c2, c3, c4)
}

/// T3 moving average over six cascaded EMAs.
///
/// Values are produced from index `5 * period - 1` (shifted by any leading
/// undefined run of the input); positions where the sixth EMA is still
/// warming up stay undefined, so the first defined index is
/// `max(5p - 1, 6p - 6)`.
pub fn calculate_t3<T: Float>(values: &[T], period: usize, volume_factor: T) -> Result<Vec<T>> {
    ensure_non_empty("t3", values)?;
    ensure_window("t3", "period", period, values.len())?;
    ensure_finite("t3", "volume_factor", volume_factor)?;

    let levels = ema_cascade(values, period, 6);
    let (c1, c2, c3, c4) = t3_coefficients(volume_factor);

    let n = values.len();
    let start = 5 * period - 1 + leading_undefined(values);
    let mut out = undefined(n);
    for i in start..n {
        out[i] = c1 * levels[5][i] + c2 * levels[4][i] + c3 * levels[3][i] + c4 * levels[2][i];
    }
    Ok(out)
}

/// T3 with the default volume factor of 0.7.
pub fn calculate_t3_default<T: Float>(values: &[T], period: usize) -> Result<Vec<T>> {
    calculate_t3_config(values, period, &IndicatorConfig::default())
}

/// T3 with `config.t3_volume_factor`.
pub fn calculate_t3_config<T: Float>(
    values: &[T],
    period: usize,
    config: &IndicatorConfig,
) -> Result<Vec<T>> {
    calculate_t3(values, period, lit(config.t3_volume_factor))
}
