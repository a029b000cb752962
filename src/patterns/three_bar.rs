// =============================================================================
// Three-bar patterns
// =============================================================================
//
// Bars are named c3 (two back), c2 (previous), c1 (current).
//
// Three white soldiers  three long green bodies, each opening inside the
//                       previous body and closing above it, none with an
//                       upper shadow
// Abandoned baby (bull) red c3, doji c2 gapping below c3's low, green c1
//                       gapping above c2's high
// Abandoned baby (bear) green c3, doji c2 gapping above c3's high, red c1
//                       gapping below c2's low
// =============================================================================

use crate::config::PatternConfig;
use crate::error::Result;
use crate::ohlcv::Ohlc;
use crate::patterns::{CandleSeries, Candlestick};
use crate::series::Float;
use crate::types::Direction;

/// `later` opens inside `earlier`'s body and closes above it.
fn advances<T: Float>(earlier: &Candlestick<T>, later: &Candlestick<T>) -> bool {
    later.open > earlier.open && later.open < earlier.close && later.close > earlier.close
}

impl<'a, T: Float> CandleSeries<'a, T> {
    pub fn three_white_soldiers(&self) -> Vec<bool> {
        let margin = self.config().shadow_margin;
        self.scan::<3>("three_white_soldiers", |window| {
            let [c3, c2, c1] = window;
            window
                .iter()
                .all(|c| c.is_green() && c.has_long_body() && !c.has_upper_shadow(margin))
                && advances(c2, c1)
                && advances(c3, c2)
        })
    }

    pub fn abandoned_baby(&self, direction: Direction) -> Vec<bool> {
        let doji_pct = self.config().doji_pct;
        match direction {
            Direction::Bull => self.scan::<3>("abandoned_baby_bull", |&[c3, c2, c1]| {
                c3.is_red()
                    && c2.has_doji_body(doji_pct)
                    && c2.high < c3.low
                    && c1.is_green()
                    && c1.low > c2.high
            }),
            Direction::Bear => self.scan::<3>("abandoned_baby_bear", |&[c3, c2, c1]| {
                c3.is_green()
                    && c2.has_doji_body(doji_pct)
                    && c2.low > c3.high
                    && c1.is_red()
                    && c1.high < c2.low
            }),
        }
    }
}

pub fn three_white_soldiers<T: Float>(bars: &Ohlc<T>, config: &PatternConfig) -> Result<Vec<bool>> {
    Ok(CandleSeries::new(*bars, config)?.three_white_soldiers())
}

pub fn abandoned_baby<T: Float>(
    bars: &Ohlc<T>,
    direction: Direction,
    config: &PatternConfig,
) -> Result<Vec<bool>> {
    Ok(CandleSeries::new(*bars, config)?.abandoned_baby(direction))
}
