// =============================================================================
// Candlestick — derived geometry of one bar plus its reference levels
// =============================================================================

use crate::series::{lit, Float};

/// One bar with its derived body/shadow geometry, the body-size average used
/// to grade it and the trend reference it is compared against.
///
/// Built only where both reference levels are defined.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Candlestick<T> {
    pub open: T,
    pub high: T,
    pub low: T,
    pub close: T,
    /// `|close - open|`
    pub body: T,
    /// `high - low`
    pub range: T,
    pub upper_shadow: T,
    pub lower_shadow: T,
    pub body_avg: T,
    pub trend_ma: T,
}

impl<T: Float> Candlestick<T> {
    pub fn new(open: T, high: T, low: T, close: T, body_avg: T, trend_ma: T) -> Self {
        let body_high = open.max(close);
        let body_low = open.min(close);
        Self {
            open,
            high,
            low,
            close,
            body: (close - open).abs(),
            range: high - low,
            upper_shadow: high - body_high,
            lower_shadow: body_low - low,
            body_avg,
            trend_ma,
        }
    }

    pub fn body_high(&self) -> T {
        self.open.max(self.close)
    }

    pub fn body_low(&self) -> T {
        self.open.min(self.close)
    }

    pub fn body_mid(&self) -> T {
        (self.open + self.close) / lit(2.0)
    }

    pub fn is_green(&self) -> bool {
        self.close > self.open
    }

    pub fn is_red(&self) -> bool {
        self.close < self.open
    }

    pub fn has_short_body(&self) -> bool {
        self.body < self.body_avg
    }

    pub fn has_long_body(&self) -> bool {
        self.body > self.body_avg
    }

    /// Body smaller than `pct` percent of the bar's range.
    pub fn has_doji_body(&self, pct: f64) -> bool {
        self.body < self.range * lit(pct / 100.0)
    }

    /// Upper shadow longer than `margin` percent of the body.
    pub fn has_upper_shadow(&self, margin: f64) -> bool {
        self.upper_shadow > self.body * lit(margin / 100.0)
    }

    /// Lower shadow longer than `margin` percent of the body.
    pub fn has_lower_shadow(&self, margin: f64) -> bool {
        self.lower_shadow > self.body * lit(margin / 100.0)
    }

    /// Shadows whose difference is within `tolerance` of their mean length.
    /// Two zero-length shadows are equal.
    pub fn has_equal_shadows(&self, tolerance: f64) -> bool {
        let diff = (self.upper_shadow - self.lower_shadow).abs();
        let mean = (self.upper_shadow + self.lower_shadow) / lit(2.0);
        diff <= mean * lit(tolerance)
    }

    /// No shadow on either side beyond `margin` percent of the body.
    pub fn is_marubozu(&self, margin: f64) -> bool {
        !self.has_upper_shadow(margin) && !self.has_lower_shadow(margin)
    }

    pub fn has_up_trend(&self) -> bool {
        self.close > self.trend_ma
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(open: f64, high: f64, low: f64, close: f64) -> Candlestick<f64> {
        Candlestick::new(open, high, low, close, 1.0, 10.0)
    }

    #[test]
    fn geometry() {
        let c = candle(10.0, 12.0, 9.0, 11.0);
        assert_eq!(c.body, 1.0);
        assert_eq!(c.range, 3.0);
        assert_eq!(c.upper_shadow, 1.0);
        assert_eq!(c.lower_shadow, 1.0);
        assert_eq!(c.body_high(), 11.0);
        assert_eq!(c.body_low(), 10.0);
        assert_eq!(c.body_mid(), 10.5);
        assert!(c.is_green() && !c.is_red());
        assert!(c.has_up_trend());
    }

    #[test]
    fn body_grading() {
        assert!(candle(10.0, 11.0, 9.0, 10.5).has_short_body());
        assert!(candle(10.0, 12.0, 9.0, 11.5).has_long_body());
        // Body equal to the average is neither short nor long.
        let even = candle(10.0, 12.0, 9.0, 11.0);
        assert!(!even.has_short_body() && !even.has_long_body());
    }

    #[test]
    fn doji_body_uses_range_percentage() {
        assert!(candle(10.0, 12.0, 8.0, 10.1).has_doji_body(5.0));
        assert!(!candle(10.0, 12.0, 8.0, 10.3).has_doji_body(5.0));
    }

    #[test]
    fn shadow_margin() {
        // body 2, upper shadow 0.05 (2.5% of body), lower shadow 0.5
        let c = candle(10.0, 12.05, 9.5, 12.0);
        assert!(!c.has_upper_shadow(5.0));
        assert!(c.has_lower_shadow(5.0));
        assert!(!c.is_marubozu(5.0));
        assert!(candle(10.0, 12.05, 9.95, 12.0).is_marubozu(5.0));
    }

    #[test]
    fn equal_shadows() {
        // 1.0 vs 0.5: |0.5| <= 2/3 * 0.75
        assert!(candle(10.0, 11.0, 9.5, 10.0).has_equal_shadows(2.0 / 3.0));
        // 1.0 vs 0.2: 0.8 > 2/3 * 0.6
        assert!(!candle(10.0, 11.0, 9.8, 10.0).has_equal_shadows(2.0 / 3.0));
        // no shadows at all
        assert!(candle(10.0, 11.0, 10.0, 11.0).has_equal_shadows(2.0 / 3.0));
    }
}
