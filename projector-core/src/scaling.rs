//! Mirror scale factor between the external mode and the laptop resolution.
//!
//! When the external output is mirrored onto the laptop (`--same-as`), xrandr
//! scales its framebuffer by this factor so both displays show the same
//! logical area.

use crate::errors::CoreError;
use projector_common::Resolution;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Formula used for the vertical factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScalePolicy {
    /// Both factors are `reference.width / mode.width`.
    ///
    /// This is the historical behaviour of the tool: the vertical factor is
    /// computed from widths too, so the two factors are always equal.
    WidthOnly,
    /// Horizontal from widths, vertical from heights; the larger one wins.
    PerAxis,
}

impl Default for ScalePolicy {
    fn default() -> Self {
        Self::WidthOnly
    }
}

impl fmt::Display for ScalePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WidthOnly => write!(f, "width-only"),
            Self::PerAxis => write!(f, "per-axis"),
        }
    }
}

impl FromStr for ScalePolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "width-only" | "width_only" | "width" => Ok(Self::WidthOnly),
            "per-axis" | "per_axis" | "axis" => Ok(Self::PerAxis),
            _ => Err(CoreError::UnknownScalePolicy(s.to_string())),
        }
    }
}

/// Computed scale factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactor {
    /// Factor for the X axis
    pub horizontal: f64,
    /// Factor for the Y axis
    pub vertical: f64,
}

impl ScaleFactor {
    /// The factor handed to xrandr: the larger of the two axes.
    pub fn value(&self) -> f64 {
        if self.horizontal > self.vertical {
            self.horizontal
        } else {
            self.vertical
        }
    }

    /// Check if the two axes agree.
    pub fn is_uniform(&self) -> bool {
        (self.horizontal - self.vertical).abs() < f64::EPSILON
    }

    /// Check if any scaling is applied at all.
    pub fn requires_scaling(&self) -> bool {
        (self.value() - 1.0).abs() > f64::EPSILON
    }
}

impl fmt::Display for ScaleFactor {
    /// Shortest round-trip decimal with a trailing `.0` for whole numbers
    /// (`1.0`, `2.0`, `1.3714285714285714`). xrandr takes the value unrounded.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.value())
    }
}

/// Computes the mirror scale factor for a chosen mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScaleCalculator {
    policy: ScalePolicy,
}

impl ScaleCalculator {
    /// Create a calculator using the given policy.
    pub fn new(policy: ScalePolicy) -> Self {
        Self { policy }
    }

    /// Policy in use.
    pub fn policy(&self) -> ScalePolicy {
        self.policy
    }

    /// Compute the factor that scales `mode` to `reference`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDimension`] if a dimension used as a
    /// divisor is zero.
    pub fn compute(&self, mode: Resolution, reference: Resolution) -> Result<ScaleFactor, CoreError> {
        let divisor_is_zero = match self.policy {
            ScalePolicy::WidthOnly => mode.width == 0,
            ScalePolicy::PerAxis => !mode.is_valid(),
        };
        if divisor_is_zero {
            return Err(CoreError::InvalidDimension {
                width: mode.width,
                height: mode.height,
            });
        }

        let horizontal = reference.width as f64 / mode.width as f64;
        let vertical = match self.policy {
            ScalePolicy::WidthOnly => reference.width as f64 / mode.width as f64,
            ScalePolicy::PerAxis => reference.height as f64 / mode.height as f64,
        };

        Ok(ScaleFactor {
            horizontal,
            vertical,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAPTOP_WIDE: Resolution = Resolution::new(1920, 1080);

    #[test]
    fn test_identity_scale() {
        let calc = ScaleCalculator::default();
        let scale = calc.compute(Resolution::new(1920, 1080), LAPTOP_WIDE).unwrap();

        assert_eq!(scale.value(), 1.0);
        assert!(!scale.requires_scaling());
        assert!(scale.is_uniform());
    }

    #[test]
    fn test_half_size_mode_doubles() {
        let calc = ScaleCalculator::default();
        let scale = calc.compute(Resolution::new(960, 540), LAPTOP_WIDE).unwrap();

        assert_eq!(scale.value(), 2.0);
        assert!(scale.requires_scaling());
    }

    #[test]
    fn test_width_only_ignores_height() {
        // 1280x1024 against 1400x1050: the vertical factor is still width based
        let calc = ScaleCalculator::new(ScalePolicy::WidthOnly);
        let scale = calc
            .compute(Resolution::new(1280, 1024), Resolution::new(1400, 1050))
            .unwrap();

        assert_eq!(scale.horizontal, 1400.0 / 1280.0);
        assert_eq!(scale.vertical, 1400.0 / 1280.0);
        assert!(scale.is_uniform());
        assert_eq!(scale.value(), 1.09375);
    }

    #[test]
    fn test_per_axis_uses_heights() {
        let calc = ScaleCalculator::new(ScalePolicy::PerAxis);
        let scale = calc
            .compute(Resolution::new(1280, 1024), Resolution::new(1400, 1050))
            .unwrap();

        assert_eq!(scale.horizontal, 1400.0 / 1280.0);
        assert_eq!(scale.vertical, 1050.0 / 1024.0);
        assert!(!scale.is_uniform());
        // horizontal is the larger one here
        assert_eq!(scale.value(), 1.09375);

        let scale = calc
            .compute(Resolution::new(1280, 800), LAPTOP_WIDE)
            .unwrap();
        assert_eq!(scale.value(), 1080.0 / 800.0);
    }

    #[test]
    fn test_zero_width_rejected() {
        let calc = ScaleCalculator::default();
        assert_eq!(
            calc.compute(Resolution::new(0, 1080), LAPTOP_WIDE),
            Err(CoreError::InvalidDimension {
                width: 0,
                height: 1080
            })
        );
    }

    #[test]
    fn test_zero_height_only_matters_per_axis() {
        let mode = Resolution::new(1920, 0);
        assert!(ScaleCalculator::new(ScalePolicy::WidthOnly)
            .compute(mode, LAPTOP_WIDE)
            .is_ok());
        assert!(ScaleCalculator::new(ScalePolicy::PerAxis)
            .compute(mode, LAPTOP_WIDE)
            .is_err());
    }

    #[test]
    fn test_scale_display() {
        let calc = ScaleCalculator::default();

        let scale = calc.compute(Resolution::new(1920, 1080), LAPTOP_WIDE).unwrap();
        assert_eq!(scale.to_string(), "1.0");

        let scale = calc.compute(Resolution::new(960, 540), LAPTOP_WIDE).unwrap();
        assert_eq!(scale.to_string(), "2.0");

        let scale = calc
            .compute(Resolution::new(1024, 768), Resolution::new(1400, 1050))
            .unwrap();
        assert_eq!(scale.to_string(), "1.3671875");

        let scale = calc
            .compute(Resolution::new(1400, 1050), LAPTOP_WIDE)
            .unwrap();
        assert_eq!(scale.to_string(), "1.3714285714285714");
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("width-only".parse::<ScalePolicy>().unwrap(), ScalePolicy::WidthOnly);
        assert_eq!("per-axis".parse::<ScalePolicy>().unwrap(), ScalePolicy::PerAxis);
        assert_eq!("PER_AXIS".parse::<ScalePolicy>().unwrap(), ScalePolicy::PerAxis);
        assert!("diagonal".parse::<ScalePolicy>().is_err());
        assert_eq!(ScalePolicy::default().to_string(), "width-only");
    }
}
