// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ), where σ is the population standard deviation
// of the same window. The Band Width (BBW) is the normalised distance:
// BBW = (upper - lower) / middle * 100.

use crate::config::IndicatorConfig;
use crate::error::Result;
use crate::indicators::sma::sma_series;
use crate::indicators::stats::var_series;
use crate::series::{ensure_finite, ensure_non_empty, ensure_window, lit, ratio, Float};

/// Three aligned band series. Shared by Bollinger Bands and Keltner Channels.
#[derive(Debug, Clone, PartialEq)]
pub struct Bands<T> {
    pub upper: Vec<T>,
    pub middle: Vec<T>,
    pub lower: Vec<T>,
}

impl<T: Float> Bands<T> {
    /// Band width `(upper - lower) / middle * 100`; undefined where the
    /// middle band is zero.
    pub fn width(&self) -> Vec<T> {
        let hundred = lit::<T>(100.0);
        (0..self.middle.len())
            .map(|i| ratio(self.upper[i] - self.lower[i], self.middle[i]) * hundred)
            .collect()
    }

    /// Consume into the `(upper, middle, lower)` tuple.
    pub fn into_tuple(self) -> (Vec<T>, Vec<T>, Vec<T>) {
        (self.upper, self.middle, self.lower)
    }
}

/// Calculate Bollinger Bands for the given closing prices.
///
/// - `upper`  = SMA + `deviation` * σ
/// - `middle` = SMA
/// - `lower`  = SMA - `deviation` * σ
///
/// All three bands share the SMA warm-up of `period - 1` positions.
pub fn calculate_bollinger<T: Float>(closes: &[T], period: usize, deviation: T) -> Result<Bands<T>> {
    ensure_non_empty("bollinger", closes)?;
    ensure_window("bollinger", "period", period, closes.len())?;
    ensure_finite("bollinger", "deviation", deviation)?;

    let middle = sma_series(closes, period);
    let spread: Vec<T> = var_series(closes, period, false)
        .into_iter()
        .map(|v| deviation * v.sqrt())
        .collect();

    let upper = middle.iter().zip(&spread).map(|(&m, &s)| m + s).collect();
    let lower = middle.iter().zip(&spread).map(|(&m, &s)| m - s).collect();
    Ok(Bands { upper, middle, lower })
}

/// Bollinger Bands at `config.bollinger_deviation` standard deviations.
pub fn calculate_bollinger_config<T: Float>(
    closes: &[T],
    period: usize,
    config: &IndicatorConfig,
) -> Result<Bands<T>> {
    calculate_bollinger(closes, period, lit(config.bollinger_deviation))
}
