// =============================================================================
// ta-engine: technical-analysis kernels and candlestick pattern classifier
// =============================================================================
//
// Module layout:
//   error:       TaError taxonomy and the crate `Result` alias
//   series:      element trait, undefined sentinel, boundary validation
//   ohlcv:       borrowed OHLC input container
//   types:       enumerated mode parameters
//   config:      named thresholds with JSON persistence
//   indicators:  moving averages, momentum, volatility and volume kernels
//   patterns:    candlestick record and pattern predicates
//
// Every kernel is a stateless function of its inputs and may be called from
// any number of threads at once.

pub mod config;
pub mod error;
pub mod indicators;
pub mod ohlcv;
pub mod patterns;
pub mod series;
pub mod types;

pub use config::{EngineConfig, IndicatorConfig, PatternConfig};
pub use error::{Result, TaError};
pub use ohlcv::Ohlc;
pub use patterns::{body_average, CandleSeries, Candlestick};
pub use series::Float;
pub use types::{Direction, HammerKind, MaType, RsiMode};
