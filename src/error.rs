// =============================================================================
// Error taxonomy
// =============================================================================
//
// Every public kernel validates its inputs before touching a single value.
// Division degeneracies inside a formula are NOT errors: they surface as the
// undefined sentinel (NaN) at the affected position only.
// =============================================================================

use thiserror::Error;

/// Result alias used by every public kernel.
pub type Result<T> = std::result::Result<T, TaError>;

/// Failures raised at the kernel boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TaError {
    /// An input series has no elements.
    #[error("input series is empty")]
    EmptyInput,

    /// Two input series of the same call differ in length.
    #[error("series `{name}` has length {actual}, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A period or window parameter is zero.
    #[error("parameter `{name}` must be at least 1, got {value}")]
    InvalidPeriod { name: &'static str, value: usize },

    /// A period that a series of this length can never satisfy.
    #[error("parameter `{name}` = {period} exceeds what a series of length {len} supports")]
    PeriodTooLong {
        name: &'static str,
        period: usize,
        len: usize,
    },

    /// A numeric threshold outside its admissible range.
    #[error("parameter `{name}` is invalid: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A mode string that names no implemented variant.
    #[error("unsupported value `{value}` for `{name}`")]
    UnknownMode { name: &'static str, value: String },
}

impl TaError {
    /// `true` for a well-formed but unimplemented request (e.g. an unknown
    /// moving-average name); everything else is plain invalid input.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnknownMode { .. })
    }
}
