// =============================================================================
// Borrowed OHLC input
// =============================================================================

use crate::error::Result;
use crate::series::{ensure_non_empty, ensure_same_len, Float};

/// Four aligned price series borrowed from the caller.
///
/// Construction is the validation point: all four slices must be non-empty
/// and of identical length.
#[derive(Debug, Clone, Copy)]
pub struct Ohlc<'a, T> {
    pub open: &'a [T],
    pub high: &'a [T],
    pub low: &'a [T],
    pub close: &'a [T],
}

impl<'a, T: Float> Ohlc<'a, T> {
    pub fn new(open: &'a [T], high: &'a [T], low: &'a [T], close: &'a [T]) -> Result<Self> {
        ensure_non_empty("ohlc", close)?;
        let len = close.len();
        ensure_same_len("ohlc", "open", len, open)?;
        ensure_same_len("ohlc", "high", len, high)?;
        ensure_same_len("ohlc", "low", len, low)?;
        Ok(Self {
            open,
            high,
            low,
            close,
        })
    }

    /// Number of bars.
    pub fn len(&self) -> usize {
        self.close.len()
    }

    /// Whether the container holds no bars; `false` once validated.
    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaError;

    #[test]
    fn accepts_equal_lengths() {
        let o = [1.0, 2.0];
        let h = [1.5, 2.5];
        let l = [0.5, 1.5];
        let c = [1.2, 2.2];
        let bars = Ohlc::new(&o, &h, &l, &c).unwrap();
        assert_eq!(bars.len(), 2);
        assert!(!bars.is_empty());
    }

    #[test]
    fn rejects_mismatched_low() {
        let o = [1.0, 2.0];
        let l = [0.5];
        let err = Ohlc::new(&o, &o, &l, &o).unwrap_err();
        assert_eq!(
            err,
            TaError::LengthMismatch { name: "low", expected: 2, actual: 1 }
        );
    }

    #[test]
    fn rejects_empty() {
        let empty: [f64; 0] = [];
        assert_eq!(
            Ohlc::new(&empty, &empty, &empty, &empty).unwrap_err(),
            TaError::EmptyInput
        );
    }
}
