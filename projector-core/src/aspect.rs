//! Aspect ratio classification.
//!
//! A mode's aspect ratio is never stored; it is recomputed from the mode's
//! width and height every time it is needed. Only two shapes are recognised,
//! 4:3 and 16:9, and everything else falls into [`AspectRatio::Other`].

use crate::errors::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse classification of a mode's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 4:3
    #[serde(rename = "4:3")]
    Standard,
    /// 16:9
    #[serde(rename = "16:9")]
    Widescreen,
    /// Any other ratio
    #[serde(rename = "other")]
    Other,
}

impl AspectRatio {
    /// Numerator and denominator of the ratio, if it is a recognised one.
    pub const fn terms(self) -> Option<(u64, u64)> {
        match self {
            Self::Standard => Some((4, 3)),
            Self::Widescreen => Some((16, 9)),
            Self::Other => None,
        }
    }

    /// The canonical `W:H` spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "4:3",
            Self::Widescreen => "16:9",
            Self::Other => "other",
        }
    }

    /// Normalise a command-line selector: exactly `"4:3"` picks 4:3, anything
    /// else (including no selector at all) picks 16:9.
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            Some("4:3") => Self::Standard,
            _ => Self::Widescreen,
        }
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::Widescreen
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "4:3" => Ok(Self::Standard),
            "16:9" => Ok(Self::Widescreen),
            "other" => Ok(Self::Other),
            _ => Err(CoreError::UnknownAspectRatio(s.to_string())),
        }
    }
}

/// How strictly a mode's ratio must match a recognised category.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AspectMatch {
    /// The ratio must be exactly 4/3 or 16/9. 1366x768 is "other".
    #[default]
    Exact,
    /// The ratio may deviate from the target by at most the given amount.
    Tolerance(f64),
}

impl AspectMatch {
    /// Build a matcher from an optional tolerance; zero or absent means exact.
    pub fn from_tolerance(tolerance: Option<f64>) -> Self {
        match tolerance {
            Some(eps) if eps > 0.0 => Self::Tolerance(eps),
            _ => Self::Exact,
        }
    }

    /// Classify `width`x`height` under this policy.
    ///
    /// Zero dimensions classify as [`AspectRatio::Other`]; use
    /// [`try_classify`] to reject them instead.
    pub fn classify(&self, width: u32, height: u32) -> AspectRatio {
        if width == 0 || height == 0 {
            return AspectRatio::Other;
        }

        for candidate in [AspectRatio::Standard, AspectRatio::Widescreen] {
            if self.matches(width, height, candidate) {
                return candidate;
            }
        }
        AspectRatio::Other
    }

    fn matches(&self, width: u32, height: u32, category: AspectRatio) -> bool {
        let Some((num, den)) = category.terms() else {
            return false;
        };

        match *self {
            // w/h == num/den  <=>  w*den == h*num, with no float rounding
            Self::Exact => width as u64 * den == height as u64 * num,
            Self::Tolerance(eps) => {
                let ratio = width as f64 / height as f64;
                (ratio - num as f64 / den as f64).abs() <= eps
            }
        }
    }
}

/// Classify a mode's shape with exact ratio matching.
pub fn classify(width: u32, height: u32) -> AspectRatio {
    AspectMatch::Exact.classify(width, height)
}

/// Classify a mode's shape, failing on zero dimensions.
///
/// # Errors
///
/// Returns [`CoreError::InvalidDimension`] if either dimension is zero.
pub fn try_classify(width: u32, height: u32) -> Result<AspectRatio, CoreError> {
    if width == 0 || height == 0 {
        return Err(CoreError::InvalidDimension { width, height });
    }
    Ok(classify(width, height))
}
