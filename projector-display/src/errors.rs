//! Error types for display discovery and mirroring.

use projector_core::{AspectRatio, CoreError};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering displays or applying a mirror plan.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// Could not open a connection to the display server.
    #[error("Could not connect to display server: {0}")]
    Connect(String),

    /// A display server request failed.
    #[error("Display server query failed: {0}")]
    Query(String),

    /// Fewer than two displays are connected.
    #[error("External display is not connected ({found} display(s) found)")]
    ExternalNotConnected { found: usize },

    /// More than two displays are connected.
    #[error("Too many displays connected ({found} found, expected 2)")]
    TooManyDisplays { found: usize },

    /// The configured laptop output is not among the connected displays.
    #[error("Laptop output {name} is not connected")]
    LaptopNotConnected { name: String },

    /// Both connected displays carry the laptop output's name.
    #[error("Could not get external display")]
    NoExternalDisplay,

    /// The external display offers no mode matching the request.
    #[error("Could not get appropriate mode for {output} ({})", aspect_label(.aspect))]
    NoEligibleMode {
        output: String,
        aspect: Option<AspectRatio>,
    },

    /// The selection core rejected its input.
    #[error("Mode computation failed")]
    Core(#[from] CoreError),

    /// A topology file could not be read.
    #[error("Failed to read topology file '{}'", .path.display())]
    TopologyRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed topology file.
    #[error("Invalid topology")]
    Topology(#[from] serde_json::Error),

    /// xrandr could not be started.
    #[error("Failed to run xrandr")]
    Spawn(#[source] io::Error),

    /// xrandr ran but reported failure.
    #[error("xrandr exited with {}", exit_label(.status))]
    CommandFailed { status: Option<i32> },
}

fn aspect_label(aspect: &Option<AspectRatio>) -> &'static str {
    aspect.map_or("any aspect ratio", AspectRatio::as_str)
}

fn exit_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

impl DisplayError {
    /// Process exit code the command-line tool reports for this error.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ExternalNotConnected { .. } => 3,
            Self::TooManyDisplays { .. } => 4,
            Self::NoExternalDisplay => 5,
            Self::LaptopNotConnected { .. } => 6,
            Self::NoEligibleMode { .. } => 7,
            Self::Connect(_)
            | Self::Query(_)
            | Self::TopologyRead { .. }
            | Self::Topology(_) => 8,
            Self::Spawn(_) | Self::CommandFailed { .. } => 9,
            Self::Core(_) => 1,
        }
    }

    /// Returns true if the display topology does not allow mirroring.
    ///
    /// These are the caller's preconditions (exactly two displays, one of
    /// them the laptop) rather than failures of the tool itself.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::ExternalNotConnected { .. }
                | Self::TooManyDisplays { .. }
                | Self::LaptopNotConnected { .. }
                | Self::NoExternalDisplay
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = [
            DisplayError::ExternalNotConnected { found: 1 },
            DisplayError::TooManyDisplays { found: 3 },
            DisplayError::NoExternalDisplay,
            DisplayError::LaptopNotConnected {
                name: "eDP1".to_string(),
            },
            DisplayError::NoEligibleMode {
                output: "HDMI1".to_string(),
                aspect: None,
            },
            DisplayError::Query("bad reply".to_string()),
            DisplayError::CommandFailed { status: Some(1) },
        ];

        let mut codes: Vec<u8> = errors.iter().map(DisplayError::exit_code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(codes.iter().all(|&c| c > 2));
    }

    #[test]
    fn test_precondition_categorization() {
        assert!(DisplayError::ExternalNotConnected { found: 0 }.is_precondition());
        assert!(DisplayError::TooManyDisplays { found: 4 }.is_precondition());
        assert!(DisplayError::NoExternalDisplay.is_precondition());

        assert!(!DisplayError::CommandFailed { status: None }.is_precondition());
        assert!(!DisplayError::NoEligibleMode {
            output: "DP1".to_string(),
            aspect: Some(AspectRatio::Standard)
        }
        .is_precondition());
    }

    #[test]
    fn test_error_display() {
        let err = DisplayError::ExternalNotConnected { found: 1 };
        assert!(err.to_string().starts_with("External display is not connected"));

        let err = DisplayError::NoEligibleMode {
            output: "HDMI1".to_string(),
            aspect: Some(AspectRatio::Standard),
        };
        assert_eq!(err.to_string(), "Could not get appropriate mode for HDMI1 (4:3)");

        let err = DisplayError::CommandFailed { status: None };
        assert_eq!(err.to_string(), "xrandr exited with a signal");
    }

    #[test]
    fn test_wrapped_errors_leave_cause_to_source() {
        use std::error::Error as _;

        let err = DisplayError::Spawn(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        assert_eq!(err.to_string(), "Failed to run xrandr");
        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("no such file"));

        let err = DisplayError::TopologyRead {
            path: PathBuf::from("/tmp/room.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(err.to_string(), "Failed to read topology file '/tmp/room.json'");
        assert_eq!(err.exit_code(), 8);
        assert!(err.source().is_some());
    }
}
