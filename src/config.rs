// =============================================================================
// Engine Configuration — named thresholds with JSON persistence
// =============================================================================
//
// Every tunable constant the kernels and pattern predicates rely on lives here
// instead of being embedded as a literal.  All fields carry
// `#[serde(default = "...")]` so a partial JSON document fills in the rest.
//
// Persistence uses an atomic tmp + rename pattern.
//
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::TaError;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_cci_constant() -> f64 {
    0.015
}

fn default_t3_volume_factor() -> f64 {
    0.7
}

fn default_band_deviation() -> f64 {
    2.0
}

fn default_macd_fast() -> usize {
    12
}

fn default_macd_slow() -> usize {
    26
}

fn default_macd_signal() -> usize {
    9
}

fn default_body_avg_period() -> usize {
    14
}

fn default_trend_period() -> usize {
    10
}

fn default_shadow_margin() -> f64 {
    5.0
}

fn default_doji_pct() -> f64 {
    5.0
}

fn default_equal_shadow_tolerance() -> f64 {
    2.0 / 3.0
}

fn default_long_shadow_ratio() -> f64 {
    2.0
}

fn default_spinning_top_shadow_ratio() -> f64 {
    1.0 / 3.0
}

// =============================================================================
// IndicatorConfig
// =============================================================================

/// Constants used by the numeric indicator kernels.
///
/// The `calculate_*_config` entry points read these; the plain
/// `calculate_*` forms use `IndicatorConfig::default()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// CCI divisor scale: `cci = (tp - sma) / (cci_constant * mean_dev)`.
    #[serde(default = "default_cci_constant")]
    pub cci_constant: f64,

    /// T3 volume factor `a`.
    #[serde(default = "default_t3_volume_factor")]
    pub t3_volume_factor: f64,

    /// Standard-deviation multiplier for Bollinger Bands.
    #[serde(default = "default_band_deviation")]
    pub bollinger_deviation: f64,

    /// ATR multiplier for Keltner Channels.
    #[serde(default = "default_band_deviation")]
    pub keltner_deviation: f64,

    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,

    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,

    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            cci_constant: default_cci_constant(),
            t3_volume_factor: default_t3_volume_factor(),
            bollinger_deviation: default_band_deviation(),
            keltner_deviation: default_band_deviation(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
        }
    }
}

// =============================================================================
// PatternConfig
// =============================================================================

/// Thresholds for the candlestick predicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternConfig {
    /// EMA period of the body-size average that separates short from long
    /// bodies.
    #[serde(default = "default_body_avg_period")]
    pub body_avg_period: usize,

    /// SMA period of the close used as trend reference.
    #[serde(default = "default_trend_period")]
    pub trend_period: usize,

    /// A shadow counts as present when it exceeds this percentage of the body.
    #[serde(default = "default_shadow_margin")]
    pub shadow_margin: f64,

    /// A body is a doji body when smaller than this percentage of the range.
    #[serde(default = "default_doji_pct")]
    pub doji_pct: f64,

    /// Maximum relative difference (against their mean) for two shadows to
    /// count as equal. 2/3 lets one shadow be twice the other.
    #[serde(default = "default_equal_shadow_tolerance")]
    pub equal_shadow_tolerance: f64,

    /// Hammer family: the long shadow must be at least this multiple of the
    /// body.
    #[serde(default = "default_long_shadow_ratio")]
    pub long_shadow_ratio: f64,

    /// Spinning top: each shadow must cover at least this fraction of the
    /// range.
    #[serde(default = "default_spinning_top_shadow_ratio")]
    pub spinning_top_shadow_ratio: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            body_avg_period: default_body_avg_period(),
            trend_period: default_trend_period(),
            shadow_margin: default_shadow_margin(),
            doji_pct: default_doji_pct(),
            equal_shadow_tolerance: default_equal_shadow_tolerance(),
            long_shadow_ratio: default_long_shadow_ratio(),
            spinning_top_shadow_ratio: default_spinning_top_shadow_ratio(),
        }
    }
}

impl PatternConfig {
    /// Reject zero periods and negative or non-finite thresholds.
    pub fn validate(&self) -> Result<(), TaError> {
        for (name, period) in [
            ("body_avg_period", self.body_avg_period),
            ("trend_period", self.trend_period),
        ] {
            if period == 0 {
                return Err(TaError::InvalidPeriod { name, value: period });
            }
        }
        for (name, value) in [
            ("shadow_margin", self.shadow_margin),
            ("doji_pct", self.doji_pct),
            ("equal_shadow_tolerance", self.equal_shadow_tolerance),
            ("long_shadow_ratio", self.long_shadow_ratio),
            ("spinning_top_shadow_ratio", self.spinning_top_shadow_ratio),
        ] {
            non_negative(name, value)?;
        }
        Ok(())
    }
}

impl IndicatorConfig {
    /// Reject zero MACD periods and negative or non-finite constants.
    pub fn validate(&self) -> Result<(), TaError> {
        for (name, period) in [
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
        ] {
            if period == 0 {
                return Err(TaError::InvalidPeriod { name, value: period });
            }
        }
        for (name, value) in [
            ("cci_constant", self.cci_constant),
            ("t3_volume_factor", self.t3_volume_factor),
            ("bollinger_deviation", self.bollinger_deviation),
            ("keltner_deviation", self.keltner_deviation),
        ] {
            non_negative(name, value)?;
        }
        Ok(())
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), TaError> {
    if !value.is_finite() || value < 0.0 {
        return Err(TaError::InvalidParameter {
            name,
            reason: format!("expected a finite non-negative number, got {value}"),
        });
    }
    Ok(())
}

// =============================================================================
// EngineConfig
// =============================================================================

/// Top-level configuration: indicator constants plus pattern thresholds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub indicators: IndicatorConfig,

    #[serde(default)]
    pub patterns: PatternConfig,
}

impl EngineConfig {
    /// Check both sections.
    pub fn validate(&self) -> Result<(), TaError> {
        self.indicators.validate()?;
        self.patterns.validate()
    }

    /// Load configuration from a JSON file at `path`.
    ///
    /// Missing files and malformed JSON are errors so the caller can fall
    /// back to defaults with a warning.  A document that parses but carries
    /// invalid thresholds is rejected as well.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read engine config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse engine config from {}", path.display()))?;

        if let Err(e) = config.validate() {
            warn!(path = %path.display(), error = %e, "engine config rejected");
            return Err(e).with_context(|| format!("invalid engine config in {}", path.display()));
        }

        info!(
            path = %path.display(),
            body_avg_period = config.patterns.body_avg_period,
            trend_period = config.patterns.trend_period,
            "engine config loaded"
        );

        Ok(config)
    }

    /// Persist the configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise engine config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "engine config saved (atomic)");
        Ok(())
    }
}
