// =============================================================================
// Candlestick Pattern Classifier
// =============================================================================
//
// Every pattern is a boolean composition of `Candlestick` predicates over one,
// two or three consecutive bars.  `CandleSeries` computes the two reference
// series every pattern needs exactly once:
//
//   body_avg = EMA(|close - open|, body_avg_period)
//   trend_ma = SMA(close, trend_period)
//
// A bar whose reference levels are still warming up has no `Candlestick`, and
// any pattern window touching such a bar evaluates to `false`.

pub mod candlestick;
pub mod single;
pub mod three_bar;
pub mod two_bar;

use tracing::debug;

use crate::config::PatternConfig;
use crate::error::Result;
use crate::indicators::ema::ema_series;
use crate::indicators::sma::sma_series;
use crate::ohlcv::Ohlc;
use crate::series::{ensure_non_empty, ensure_same_len, ensure_window, Float};

pub use candlestick::Candlestick;
pub use single::{belt_hold, doji, dragonfly_doji, hammer, marubozu, spinning_top_white};
pub use three_bar::{abandoned_baby, three_white_soldiers};
pub use two_bar::{engulfing, harami, kicking, piercing};

fn body_sizes<T: Float>(open: &[T], close: &[T]) -> Vec<T> {
    open.iter().zip(close).map(|(&o, &c)| (c - o).abs()).collect()
}

/// Average body size: `EMA(|close - open|, period)`.
pub fn body_average<T: Float>(open: &[T], close: &[T], period: usize) -> Result<Vec<T>> {
    ensure_non_empty("body_average", close)?;
    ensure_same_len("body_average", "open", close.len(), open)?;
    ensure_window("body_average", "period", period, close.len())?;
    Ok(ema_series(&body_sizes(open, close), period))
}

/// OHLC bars together with their pattern reference series and thresholds.
#[derive(Debug, Clone)]
pub struct CandleSeries<'a, T> {
    bars: Ohlc<'a, T>,
    body_avg: Vec<T>,
    trend_ma: Vec<T>,
    config: PatternConfig,
}

impl<'a, T: Float> CandleSeries<'a, T> {
    /// Validate `config` and compute the reference series.
    ///
    /// A series shorter than either reference period is accepted; every
    /// pattern then evaluates to `false` throughout.
    pub fn new(bars: Ohlc<'a, T>, config: &PatternConfig) -> Result<Self> {
        config.validate()?;
        let body_avg = ema_series(&body_sizes(bars.open, bars.close), config.body_avg_period);
        let trend_ma = sma_series(bars.close, config.trend_period);
        Ok(Self {
            bars,
            body_avg,
            trend_ma,
            config: config.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    pub fn body_avg(&self) -> &[T] {
        &self.body_avg
    }

    pub fn trend_ma(&self) -> &[T] {
        &self.trend_ma
    }

    /// The candlestick at bar `i`, or `None` while its reference levels are
    /// undefined.
    pub fn candle(&self, i: usize) -> Option<Candlestick<T>> {
        let body_avg = *self.body_avg.get(i)?;
        let trend_ma = *self.trend_ma.get(i)?;
        if body_avg.is_nan() || trend_ma.is_nan() {
            return None;
        }
        Some(Candlestick::new(
            self.bars.open[i],
            self.bars.high[i],
            self.bars.low[i],
            self.bars.close[i],
            body_avg,
            trend_ma,
        ))
    }

    /// Evaluate `matcher` on every window of `W` consecutive candlesticks
    /// (oldest first) ending at each bar.
    pub(crate) fn scan<const W: usize>(
        &self,
        pattern: &'static str,
        matcher: impl Fn(&[Candlestick<T>; W]) -> bool,
    ) -> Vec<bool> {
        let n = self.len();
        let mut out = vec![false; n];
        'bars: for i in W.saturating_sub(1)..n {
            let mut window = [Candlestick::default(); W];
            for (k, slot) in window.iter_mut().enumerate() {
                match self.candle(i + 1 + k - W) {
                    Some(c) => *slot = c,
                    None => continue 'bars,
                }
            }
            out[i] = matcher(&window);
        }
        debug!(
            pattern,
            bars = n,
            matches = out.iter().filter(|&&m| m).count(),
            "pattern scan complete"
        );
        out
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::TaError;

    /// Owned OHLC columns for building test fixtures.
    pub(crate) struct Bars {
        pub open: Vec<f64>,
        pub high: Vec<f64>,
        pub low: Vec<f64>,
        pub close: Vec<f64>,
    }

    impl Bars {
        /// `warm_up` neutral bars (body 1.2, shadows 0.3, drifting up by
        /// 0.1) followed by the given `(open, high, low, close)` bars.
        pub fn with_tail(warm_up: usize, tail: &[(f64, f64, f64, f64)]) -> Self {
            let mut bars = Self {
                open: Vec::new(),
                high: Vec::new(),
                low: Vec::new(),
                close: Vec::new(),
            };
            for i in 0..warm_up {
                let base = 10.0 + i as f64 * 0.1;
                let (open, close) = if i % 2 == 0 { (base, base + 1.2) } else { (base + 1.2, base) };
                bars.push(open, base + 1.5, base - 0.3, close);
            }
            for &(o, h, l, c) in tail {
                bars.push(o, h, l, c);
            }
            bars
        }

        fn push(&mut self, o: f64, h: f64, l: f64, c: f64) {
            self.open.push(o);
            self.high.push(h);
            self.low.push(l);
            self.close.push(c);
        }

        pub fn ohlc(&self) -> Ohlc<'_, f64> {
            Ohlc::new(&self.open, &self.high, &self.low, &self.close).unwrap()
        }
    }

    // ---- body_average ----------------------------------------------------

    #[test]
    fn body_average_is_ema_of_body() {
        let open = [1.0, 2.0, 3.0, 4.0];
        let close = [2.0, 1.0, 5.0, 4.0];
        let avg: Vec<f64> = body_average(&open, &close, 2).unwrap();
        assert!(avg[0].is_nan());
        assert!((avg[1] - 1.0).abs() < 1e-10);
        // k = 2/3: 1 + (2 - 1) * 2/3
        assert!((avg[2] - 5.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn body_average_rejects_mismatch() {
        assert!(matches!(
            body_average(&[1.0], &[1.0, 2.0], 1),
            Err(TaError::LengthMismatch { name: "open", .. })
        ));
    }

    // ---- CandleSeries ----------------------------------------------------

    #[test]
    fn candle_requires_reference_levels() {
        let bars = Bars::with_tail(20, &[]);
        let series = CandleSeries::new(bars.ohlc(), &PatternConfig::default()).unwrap();
        // body_avg defined from 13, trend_ma from 9
        assert!(series.candle(12).is_none());
        assert!(series.candle(13).is_some());
        assert!(series.candle(20).is_none());
    }

    #[test]
    fn short_series_never_matches() {
        let bars = Bars::with_tail(5, &[]);
        let series = CandleSeries::new(bars.ohlc(), &PatternConfig::default()).unwrap();
        assert!(series.scan::<1>("any", |_| true).iter().all(|m| !m));
    }

    #[test]
    fn scan_window_is_oldest_first() {
        let bars = Bars::with_tail(16, &[]);
        let series = CandleSeries::new(bars.ohlc(), &PatternConfig::default()).unwrap();
        // Even bars open at the low end of their body, odd bars at the top.
        let hits = series.scan::<2>("ordering", |&[prev, cur]| prev.open < cur.open);
        assert!(!hits[13]);
        assert!(!hits[14]);
        assert!(hits[15]);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let bars = Bars::with_tail(20, &[]);
        let cfg = PatternConfig { body_avg_period: 0, ..PatternConfig::default() };
        assert_eq!(
            CandleSeries::new(bars.ohlc(), &cfg).unwrap_err(),
            TaError::InvalidPeriod { name: "body_avg_period", value: 0 }
        );
    }
}
