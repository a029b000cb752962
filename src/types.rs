// =============================================================================
// Enumerated mode parameters shared across kernels
// =============================================================================
//
// Each enum parses from the lowercase mode strings the adapter layer passes
// through (`"smoothed"`, `"ema"`, `"bull"`, `"inverted_hammer"`, ...).  An
// unrecognised string is an `UnknownMode` error, never a silent default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TaError;

/// How RSI refreshes its average gain / average loss after the seed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiMode {
    /// Fresh mean of the trailing `period` gains/losses at every step.
    Standard,
    /// Wilder smoothing: `avg = (avg * (period - 1) + x) / period`.
    Smoothed,
}

impl Default for RsiMode {
    fn default() -> Self {
        Self::Smoothed
    }
}

impl fmt::Display for RsiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Smoothed => write!(f, "smoothed"),
        }
    }
}

impl FromStr for RsiMode {
    type Err = TaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "smoothed" => Ok(Self::Smoothed),
            other => Err(TaError::UnknownMode {
                name: "rsi_type",
                value: other.to_string(),
            }),
        }
    }
}

/// Moving-average kernel used for both legs of APO / PPO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaType {
    Sma,
    Ema,
}

impl fmt::Display for MaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sma => write!(f, "sma"),
            Self::Ema => write!(f, "ema"),
        }
    }
}

impl FromStr for MaType {
    type Err = TaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sma" => Ok(Self::Sma),
            "ema" => Ok(Self::Ema),
            other => Err(TaError::UnknownMode {
                name: "ma",
                value: other.to_string(),
            }),
        }
    }
}

/// Bullish or bearish flavour of a two-sided pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Bull,
    Bear,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bull => write!(f, "bull"),
            Self::Bear => write!(f, "bear"),
        }
    }
}

impl FromStr for Direction {
    type Err = TaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bull" => Ok(Self::Bull),
            "bear" => Ok(Self::Bear),
            other => Err(TaError::UnknownMode {
                name: "type",
                value: other.to_string(),
            }),
        }
    }
}

/// Which side of the body the long shadow of a hammer sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HammerKind {
    Hammer,
    InvertedHammer,
}

impl fmt::Display for HammerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hammer => write!(f, "hammer"),
            Self::InvertedHammer => write!(f, "inverted_hammer"),
        }
    }
}

impl FromStr for HammerKind {
    type Err = TaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hammer" => Ok(Self::Hammer),
            "inverted_hammer" => Ok(Self::InvertedHammer),
            other => Err(TaError::UnknownMode {
                name: "hammer_type",
                value: other.to_string(),
            }),
        }
    }
}
