// =============================================================================
// Two-bar patterns
// =============================================================================
//
// `p` is the previous bar, `c` the current one.
//
// Engulfing (bull)  p short red, c long green, c's body covers p's body with
//                   at least one strict edge
// Harami (bull)     p long red, c short non-doji body inside p's body with at
//                   least one strict edge
// Kicking (bull)    p long red marubozu, c long green marubozu gapping above
//                   p's high
// Piercing          p red, c green opening below p's low and closing inside
//                   the upper half of p's body
//
// Bear variants mirror the colours (and gaps / covering edges).
// =============================================================================

use crate::config::PatternConfig;
use crate::error::Result;
use crate::ohlcv::Ohlc;
use crate::patterns::{CandleSeries, Candlestick};
use crate::series::Float;
use crate::types::Direction;

impl<'a, T: Float> CandleSeries<'a, T> {
    pub fn engulfing(&self, direction: Direction) -> Vec<bool> {
        match direction {
            Direction::Bull => self.scan::<2>("engulfing_bull", |&[p, c]| {
                p.is_red()
                    && p.has_short_body()
                    && c.is_green()
                    && c.has_long_body()
                    && c.open <= p.close
                    && c.close >= p.open
                    && (c.open < p.close || c.close > p.open)
            }),
            Direction::Bear => self.scan::<2>("engulfing_bear", |&[p, c]| {
                p.is_green()
                    && p.has_short_body()
                    && c.is_red()
                    && c.has_long_body()
                    && c.open >= p.close
                    && c.close <= p.open
                    && (c.open > p.close || c.close < p.open)
            }),
        }
    }

    pub fn harami(&self, direction: Direction) -> Vec<bool> {
        let doji_pct = self.config().doji_pct;
        let inside = move |p: &Candlestick<T>, c: &Candlestick<T>| {
            p.has_long_body()
                && p.body_low() <= c.body_low()
                && p.body_high() >= c.body_high()
                && (p.body_low() < c.body_low() || p.body_high() > c.body_high())
                && c.has_short_body()
                && !c.has_doji_body(doji_pct)
        };
        match direction {
            Direction::Bull => self.scan::<2>("harami_bull", |[p, c]| p.is_red() && inside(p, c)),
            Direction::Bear => self.scan::<2>("harami_bear", |[p, c]| p.is_green() && inside(p, c)),
        }
    }

    pub fn kicking(&self, direction: Direction) -> Vec<bool> {
        let margin = self.config().shadow_margin;
        match direction {
            Direction::Bull => self.scan::<2>("kicking_bull", |&[p, c]| {
                c.has_long_body()
                    && c.is_green()
                    && c.is_marubozu(margin)
                    && c.low > p.high
                    && p.has_long_body()
                    && p.is_red()
                    && p.is_marubozu(margin)
            }),
            Direction::Bear => self.scan::<2>("kicking_bear", |&[p, c]| {
                c.has_long_body()
                    && c.is_red()
                    && c.is_marubozu(margin)
                    && c.high < p.low
                    && p.has_long_body()
                    && p.is_green()
                    && p.is_marubozu(margin)
            }),
        }
    }

    pub fn piercing(&self) -> Vec<bool> {
        self.scan::<2>("piercing", |&[p, c]| {
            p.is_red()
                && c.is_green()
                && p.low > c.open
                && c.close > p.body_mid()
                && c.close < p.body_high()
        })
    }
}

/// Bullish or bearish engulfing at every bar.
pub fn engulfing<T: Float>(
    bars: &Ohlc<T>,
    direction: Direction,
    config: &PatternConfig,
) -> Result<Vec<bool>> {
    Ok(CandleSeries::new(*bars, config)?.engulfing(direction))
}

pub fn harami<T: Float>(
    bars: &Ohlc<T>,
    direction: Direction,
    config: &PatternConfig,
) -> Result<Vec<bool>> {
    Ok(CandleSeries::new(*bars, config)?.harami(direction))
}

pub fn kicking<T: Float>(
    bars: &Ohlc<T>,
    direction: Direction,
    config: &PatternConfig,
) -> Result<Vec<bool>> {
    Ok(CandleSeries::new(*bars, config)?.kicking(direction))
}

pub fn piercing<T: Float>(bars: &Ohlc<T>, config: &PatternConfig) -> Result<Vec<bool>> {
    Ok(CandleSeries::new(*bars, config)?.piercing())
}
