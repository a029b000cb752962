// =============================================================================
// Rolling statistics — variance, standard deviation, covariance, beta
// =============================================================================
//
//   mean_i = SMA(x, p)_i
//   var_i  = sum_{j in window} (x_j - mean_i)^2 / d
//   std_i  = sqrt(var_i)
//   cov_i  = sum_{j in window} (x_j - mean_x_i) * (y_j - mean_y_i) / d
//
// where d = p - 1 when `normalize` (sample statistics) and d = p otherwise.
//
// Beta relates one-bar returns of an instrument to those of a market series:
//   r     = pct_change(., 1)
//   beta  = cov(r_x, r_m) / var(r_m)
// =============================================================================

use crate::error::Result;
use crate::indicators::sma::sma_series;
use crate::series::{
    count, ensure_lookback, ensure_non_empty, ensure_same_len, ensure_window, ratio, undefined,
    zip_with, Float,
};

fn divisor<T: Float>(period: usize, normalize: bool) -> T {
    if normalize {
        count(period - 1)
    } else {
        count(period)
    }
}

/// Unchecked rolling covariance; `var` is `cov(x, x)`.
pub(crate) fn cov_series<T: Float>(x: &[T], y: &[T], period: usize, normalize: bool) -> Vec<T> {
    let mean_x = sma_series(x, period);
    let mean_y = sma_series(y, period);
    let d = divisor::<T>(period, normalize);

    let mut out = undefined(x.len());
    for i in 0..x.len() {
        if mean_x[i].is_nan() || mean_y[i].is_nan() {
            continue;
        }
        let start = i + 1 - period;
        let cross = (start..=i).fold(T::zero(), |acc, j| {
            acc + (x[j] - mean_x[i]) * (y[j] - mean_y[i])
        });
        out[i] = ratio(cross, d);
    }
    out
}

pub(crate) fn var_series<T: Float>(values: &[T], period: usize, normalize: bool) -> Vec<T> {
    cov_series(values, values, period, normalize)
}

pub(crate) fn pct_change_series<T: Float>(values: &[T], period: usize) -> Vec<T> {
    let mut out = undefined(values.len());
    for i in period..values.len() {
        let prev = values[i - period];
        out[i] = ratio(values[i] - prev, prev);
    }
    out
}

/// Rolling variance over `period` bars.
///
/// With `normalize` and `period == 1` the divisor is zero and every position
/// is undefined.
pub fn calculate_var<T: Float>(values: &[T], period: usize, normalize: bool) -> Result<Vec<T>> {
    ensure_non_empty("var", values)?;
    ensure_window("var", "period", period, values.len())?;
    Ok(var_series(values, period, normalize))
}

/// Rolling standard deviation over `period` bars.
pub fn calculate_std<T: Float>(values: &[T], period: usize, normalize: bool) -> Result<Vec<T>> {
    ensure_non_empty("std", values)?;
    ensure_window("std", "period", period, values.len())?;
    Ok(var_series(values, period, normalize)
        .into_iter()
        .map(|v| v.sqrt())
        .collect())
}

/// Rolling covariance of two aligned series.
pub fn calculate_cov<T: Float>(x: &[T], y: &[T], period: usize, normalize: bool) -> Result<Vec<T>> {
    ensure_non_empty("cov", x)?;
    ensure_same_len("cov", "y", x.len(), y)?;
    ensure_window("cov", "period", period, x.len())?;
    Ok(cov_series(x, y, period, normalize))
}

/// Fractional change over `period` bars: `(x[i] - x[i-p]) / x[i-p]`.
pub fn calculate_pct_change<T: Float>(values: &[T], period: usize) -> Result<Vec<T>> {
    ensure_non_empty("pct_change", values)?;
    ensure_lookback("pct_change", "period", period, values.len())?;
    Ok(pct_change_series(values, period))
}

/// Rolling beta of `prices` against `market` over `period` one-bar returns.
///
/// First defined index is `period`. A window where the market return does
/// not vary is undefined.
pub fn calculate_beta<T: Float>(
    prices: &[T],
    market: &[T],
    period: usize,
    normalize: bool,
) -> Result<Vec<T>> {
    ensure_non_empty("beta", prices)?;
    ensure_same_len("beta", "market", prices.len(), market)?;
    ensure_lookback("beta", "period", period, prices.len())?;

    let r_prices = pct_change_series(prices, 1);
    let r_market = pct_change_series(market, 1);
    let cov = cov_series(&r_prices, &r_market, period, normalize);
    let var = var_series(&r_market, period, normalize);
    Ok(zip_with(&cov, &var, ratio))
}
