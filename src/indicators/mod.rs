// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free series kernels.  Every public function validates its
// inputs up front and returns `Result<Vec<T>>` (or a tuple / `Bands` of
// series) aligned 1:1 with the input; warm-up and numerically degenerate
// positions hold NaN.

pub mod atr;
pub mod bollinger;
pub mod chaikin_volatility;
pub mod ema;
pub mod keltner;
pub mod lwma;
pub mod macd;
pub mod mfi;
pub mod oscillators;
pub mod roc;
pub mod rsi;
pub mod sma;
pub mod stats;
pub mod volume;

pub use atr::calculate_atr;
pub use bollinger::{calculate_bollinger, calculate_bollinger_config, Bands};
pub use chaikin_volatility::calculate_chaikin_volatility;
pub use ema::{
    calculate_dema, calculate_ema, calculate_t3, calculate_t3_config, calculate_t3_default,
    calculate_tema,
};
pub use keltner::{calculate_keltner, calculate_keltner_config};
pub use lwma::{calculate_lwma, calculate_weighted_close};
pub use macd::{
    calculate_apo, calculate_macd, calculate_macd_config, calculate_macd_with, calculate_ppo,
};
pub use mfi::calculate_mfi;
pub use oscillators::{
    calculate_aroon, calculate_bop, calculate_cci, calculate_cci_config, calculate_cci_scaled,
    calculate_cmo, calculate_willr,
};
pub use roc::{calculate_momentum, calculate_roc, calculate_vpt};
pub use rsi::calculate_rsi;
pub use sma::{calculate_sma, calculate_smma, calculate_tma};
pub use stats::{
    calculate_beta, calculate_cov, calculate_pct_change, calculate_std, calculate_var,
};
pub use volume::{
    calculate_acdi, calculate_chaikin_oscillator, calculate_cmf, calculate_nvi, calculate_obv,
    calculate_pvi,
};
