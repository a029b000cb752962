// =============================================================================
// Single-bar patterns
// =============================================================================
//
// Hammer          short body, not a doji, no upper shadow,
//                 lower shadow >= long_shadow_ratio * body
// Inverted hammer mirror of the hammer (long upper shadow)
// Doji            doji body with roughly equal shadows
// Dragonfly doji  doji body, upper shadow no longer than the body
// Marubozu        long body without shadows
// Spinning top    green non-doji with both shadows >= ratio * range
// Belt hold       long body opening at its extreme against the prior trend
// =============================================================================

use crate::config::PatternConfig;
use crate::error::Result;
use crate::ohlcv::Ohlc;
use crate::patterns::CandleSeries;
use crate::series::{lit, Float};
use crate::types::{Direction, HammerKind};

impl<'a, T: Float> CandleSeries<'a, T> {
    pub fn hammer(&self, kind: HammerKind) -> Vec<bool> {
        let cfg = self.config();
        let margin = cfg.shadow_margin;
        let doji_pct = cfg.doji_pct;
        let ratio = lit::<T>(cfg.long_shadow_ratio);
        match kind {
            HammerKind::Hammer => self.scan::<1>("hammer", |&[c]| {
                c.has_short_body()
                    && !c.has_doji_body(doji_pct)
                    && !c.has_upper_shadow(margin)
                    && c.lower_shadow >= c.body * ratio
            }),
            HammerKind::InvertedHammer => self.scan::<1>("inverted_hammer", |&[c]| {
                c.has_short_body()
                    && !c.has_doji_body(doji_pct)
                    && !c.has_lower_shadow(margin)
                    && c.upper_shadow >= c.body * ratio
            }),
        }
    }

    pub fn doji(&self) -> Vec<bool> {
        let cfg = self.config();
        let (doji_pct, tolerance) = (cfg.doji_pct, cfg.equal_shadow_tolerance);
        self.scan::<1>("doji", |&[c]| c.has_doji_body(doji_pct) && c.has_equal_shadows(tolerance))
    }

    pub fn dragonfly_doji(&self) -> Vec<bool> {
        let doji_pct = self.config().doji_pct;
        self.scan::<1>("dragonfly_doji", |&[c]| {
            c.has_doji_body(doji_pct) && c.upper_shadow <= c.body
        })
    }

    pub fn marubozu(&self) -> Vec<bool> {
        let margin = self.config().shadow_margin;
        self.scan::<1>("marubozu", |&[c]| c.has_long_body() && c.is_marubozu(margin))
    }

    pub fn spinning_top_white(&self) -> Vec<bool> {
        let cfg = self.config();
        let doji_pct = cfg.doji_pct;
        let ratio = lit::<T>(cfg.spinning_top_shadow_ratio);
        self.scan::<1>("spinning_top_white", |&[c]| {
            !c.has_doji_body(doji_pct)
                && c.is_green()
                && c.upper_shadow >= c.range * ratio
                && c.lower_shadow >= c.range * ratio
        })
    }

    /// Belt hold. The bar before the belt must sit against the pattern's
    /// direction relative to the trend reference.
    pub fn belt_hold(&self, direction: Direction) -> Vec<bool> {
        let margin = self.config().shadow_margin;
        match direction {
            Direction::Bull => self.scan::<2>("belt_hold_bull", |&[prev, c]| {
                c.is_green()
                    && c.has_long_body()
                    && !c.has_lower_shadow(margin)
                    && !prev.has_up_trend()
            }),
            Direction::Bear => self.scan::<2>("belt_hold_bear", |&[prev, c]| {
                c.is_red() && c.has_long_body() && !c.has_upper_shadow(margin) && prev.has_up_trend()
            }),
        }
    }
}

/// Hammer or inverted hammer at every bar.
pub fn hammer<T: Float>(bars: &Ohlc<T>, kind: HammerKind, config: &PatternConfig) -> Result<Vec<bool>> {
    Ok(CandleSeries::new(*bars, config)?.hammer(kind))
}

pub fn doji<T: Float>(bars: &Ohlc<T>, config: &PatternConfig) -> Result<Vec<bool>> {
    Ok(CandleSeries::new(*bars, config)?.doji())
}

pub fn dragonfly_doji<T: Float>(bars: &Ohlc<T>, config: &PatternConfig) -> Result<Vec<bool>> {
    Ok(CandleSeries::new(*bars, config)?.dragonfly_doji())
}

pub fn marubozu<T: Float>(bars: &Ohlc<T>, config: &PatternConfig) -> Result<Vec<bool>> {
    Ok(CandleSeries::new(*bars, config)?.marubozu())
}

pub fn spinning_top_white<T: Float>(bars: &Ohlc<T>, config: &PatternConfig) -> Result<Vec<bool>> {
    Ok(CandleSeries::new(*bars, config)?.spinning_top_white())
}

pub fn belt_hold<T: Float>(
    bars: &Ohlc<T>,
    direction: Direction,
    config: &PatternConfig,
) -> Result<Vec<bool>> {
    Ok(CandleSeries::new(*bars, config)?.belt_hold(direction))
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::tests::Bars;

    const WARM_UP: usize = 16;

    fn last(hits: Vec<bool>) -> bool {
        *hits.last().unwrap()
    }

    fn cfg() -> PatternConfig {
        PatternConfig::default()
    }

    // ---- hammer ----------------------------------------------------------

    #[test]
    fn hammer_detected() {
        // body 0.4, no upper shadow, lower shadow 1.2
        let bars = Bars::with_tail(WARM_UP, &[(11.6, 12.0, 10.4, 12.0)]);
        assert!(last(hammer(&bars.ohlc(), HammerKind::Hammer, &cfg()).unwrap()));
        assert!(!last(hammer(&bars.ohlc(), HammerKind::InvertedHammer, &cfg()).unwrap()));
    }

    #[test]
    fn inverted_hammer_detected() {
        let bars = Bars::with_tail(WARM_UP, &[(11.6, 13.2, 11.6, 12.0)]);
        assert!(last(hammer(&bars.ohlc(), HammerKind::InvertedHammer, &cfg()).unwrap()));
        assert!(!last(hammer(&bars.ohlc(), HammerKind::Hammer, &cfg()).unwrap()));
    }

    #[test]
    fn hammer_needs_long_lower_shadow() {
        let bars = Bars::with_tail(WARM_UP, &[(11.6, 12.0, 11.0, 12.0)]);
        assert!(!last(hammer(&bars.ohlc(), HammerKind::Hammer, &cfg()).unwrap()));
    }

    #[test]
    fn hammer_false_during_warm_up() {
        let bars = Bars::with_tail(WARM_UP, &[]);
        let hits = hammer(&bars.ohlc(), HammerKind::Hammer, &cfg()).unwrap();
        assert_eq!(hits.len(), WARM_UP);
        assert!(hits[..13].iter().all(|m| !m));
    }

    // ---- doji / dragonfly_doji -------------------------------------------

    #[test]
    fn doji_detected() {
        let bars = Bars::with_tail(WARM_UP, &[(12.0, 13.0, 11.0, 12.02)]);
        assert!(last(doji(&bars.ohlc(), &cfg()).unwrap()));
        assert!(!last(dragonfly_doji(&bars.ohlc(), &cfg()).unwrap()));
    }

    #[test]
    fn dragonfly_doji_detected() {
        let bars = Bars::with_tail(WARM_UP, &[(12.0, 12.0, 10.5, 12.0)]);
        assert!(last(dragonfly_doji(&bars.ohlc(), &cfg()).unwrap()));
        // shadows 0 and 1.5 are not equal
        assert!(!last(doji(&bars.ohlc(), &cfg()).unwrap()));
    }

    // ---- marubozu --------------------------------------------------------

    #[test]
    fn marubozu_detected() {
        let bars = Bars::with_tail(WARM_UP, &[(11.0, 13.0, 11.0, 13.0)]);
        assert!(last(marubozu(&bars.ohlc(), &cfg()).unwrap()));
        // A red bar qualifies as well.
        let bars = Bars::with_tail(WARM_UP, &[(13.0, 13.0, 11.0, 11.0)]);
        assert!(last(marubozu(&bars.ohlc(), &cfg()).unwrap()));
    }

    #[test]
    fn marubozu_rejects_shadow() {
        let bars = Bars::with_tail(WARM_UP, &[(11.0, 13.5, 11.0, 13.0)]);
        assert!(!last(marubozu(&bars.ohlc(), &cfg()).unwrap()));
    }

    // ---- spinning_top_white ----------------------------------------------

    #[test]
    fn spinning_top_detected() {
        // range 3, body 0.6, shadows 1.2 each
        let bars = Bars::with_tail(WARM_UP, &[(11.2, 13.0, 10.0, 11.8)]);
        assert!(last(spinning_top_white(&bars.ohlc(), &cfg()).unwrap()));
        let red = Bars::with_tail(WARM_UP, &[(11.8, 13.0, 10.0, 11.2)]);
        assert!(!last(spinning_top_white(&red.ohlc(), &cfg()).unwrap()));
    }

    // ---- belt_hold -------------------------------------------------------

    #[test]
    fn belt_hold_bull_after_weak_bar() {
        // The bar before closes well below the trend reference.
        let bars = Bars::with_tail(WARM_UP, &[(10.0, 10.2, 9.0, 9.0), (9.0, 11.6, 9.0, 11.5)]);
        assert!(last(belt_hold(&bars.ohlc(), Direction::Bull, &cfg()).unwrap()));
        assert!(!last(belt_hold(&bars.ohlc(), Direction::Bear, &cfg()).unwrap()));
    }

    #[test]
    fn belt_hold_bear_after_strong_bar() {
        let bars = Bars::with_tail(WARM_UP, &[(12.0, 14.2, 12.0, 14.0), (14.0, 14.0, 11.5, 11.6)]);
        assert!(last(belt_hold(&bars.ohlc(), Direction::Bear, &cfg()).unwrap()));
        assert!(!last(belt_hold(&bars.ohlc(), Direction::Bull, &cfg()).unwrap()));
    }
}
