//! Error types for the selection core.

use thiserror::Error;

/// Errors raised by the pure selection and scaling functions.
///
/// "No eligible mode" is deliberately absent: an empty selection is a
/// normal outcome and is reported as `None` by the selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A mode or resolution with a zero dimension reached the core.
    #[error("Invalid dimension: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// An aspect ratio selector string that names no known category.
    #[error("Unknown aspect ratio: {0}")]
    UnknownAspectRatio(String),

    /// A scale policy name that is not recognised.
    #[error("Unknown scale policy: {0} (expected width-only or per-axis)")]
    UnknownScalePolicy(String),
}

impl CoreError {
    /// Returns true if the error comes from a malformed mode or table entry
    /// rather than from user input.
    #[must_use]
    pub fn is_dimension_error(&self) -> bool {
        matches!(self, Self::InvalidDimension { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::InvalidDimension {
            width: 0,
            height: 1080,
        };
        assert_eq!(err.to_string(), "Invalid dimension: 0x1080");
        assert!(err.is_dimension_error());

        let err = CoreError::UnknownScalePolicy("diagonal".to_string());
        assert!(err.to_string().contains("diagonal"));
        assert!(!err.is_dimension_error());
    }
}
