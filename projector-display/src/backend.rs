//! Display enumeration backends.
//!
//! The selection core never talks to a display server. It is fed by a
//! [`DisplayBackend`], which reports the outputs the server knows about and
//! the modes each of them supports.

use crate::errors::DisplayError;
use projector_common::Mode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// One physical output and the modes it can be driven at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOutput {
    /// Connector name, e.g. `eDP1` or `HDMI1`
    pub name: String,
    /// Whether a display is plugged into the connector
    #[serde(default = "default_connected")]
    pub connected: bool,
    /// Supported modes, in the order the server reports them
    #[serde(default)]
    pub modes: Vec<Mode>,
}

fn default_connected() -> bool {
    true
}

impl DisplayOutput {
    /// Create a connected output.
    pub fn connected(name: impl Into<String>, modes: Vec<Mode>) -> Self {
        Self {
            name: name.into(),
            connected: true,
            modes,
        }
    }

    /// Create a disconnected output.
    pub fn disconnected(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            connected: false,
            modes: Vec::new(),
        }
    }
}

impl fmt::Display for DisplayOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.connected {
            "connected"
        } else {
            "disconnected"
        };
        write!(f, "{} {} ({} modes)", self.name, state, self.modes.len())
    }
}

/// Source of display topology.
pub trait DisplayBackend {
    /// Every output the display server knows about, connected or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the display server cannot be queried.
    fn outputs(&self) -> Result<Vec<DisplayOutput>, DisplayError>;

    /// Only the outputs with a display attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the display server cannot be queried.
    fn connected_displays(&self) -> Result<Vec<DisplayOutput>, DisplayError> {
        let outputs = self.outputs()?;
        let total = outputs.len();
        let connected: Vec<DisplayOutput> = outputs.into_iter().filter(|o| o.connected).collect();

        debug!(
            "{}: {} of {} outputs connected",
            self.backend_name(),
            connected.len(),
            total
        );
        Ok(connected)
    }

    /// Short name for log messages.
    fn backend_name(&self) -> &'static str;
}

/// Collapse modes that share a `<W>x<H>` label.
///
/// xrandr addresses modes by label, so only one mode per size is useful. A
/// later duplicate replaces the earlier one but keeps its position.
pub fn unique_modes(modes: impl IntoIterator<Item = Mode>) -> Vec<Mode> {
    let mut unique: Vec<Mode> = Vec::new();
    for mode in modes {
        match unique
            .iter_mut()
            .find(|m| m.resolution() == mode.resolution())
        {
            Some(existing) => *existing = mode,
            None => unique.push(mode),
        }
    }
    unique
}

/// Fixed, in-memory topology.
///
/// Used for tests and for replaying a topology captured with
/// `display-projector --list --json`.
#[derive(Debug, Clone, Default)]
pub struct StaticBackend {
    outputs: Vec<DisplayOutput>,
}

impl StaticBackend {
    /// Create a backend reporting the given outputs.
    pub fn new(outputs: Vec<DisplayOutput>) -> Self {
        Self { outputs }
    }

    /// Add an output.
    #[must_use]
    pub fn with_output(mut self, output: DisplayOutput) -> Self {
        self.outputs.push(output);
        self
    }

    /// Parse a JSON array of outputs.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::Topology`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, DisplayError> {
        let outputs: Vec<DisplayOutput> = serde_json::from_str(json)?;
        Ok(Self::new(outputs))
    }

    /// Load a JSON topology file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, DisplayError> {
        let json = std::fs::read_to_string(path).map_err(|source| DisplayError::TopologyRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

impl DisplayBackend for StaticBackend {
    fn outputs(&self) -> Result<Vec<DisplayOutput>, DisplayError> {
        Ok(self.outputs.clone())
    }

    fn backend_name(&self) -> &'static str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use projector_common::ModeId;

    #[test]
    fn test_connected_filter() {
        let backend = StaticBackend::default()
            .with_output(DisplayOutput::connected(
                "eDP1",
                vec![Mode::new(ModeId(1), 1920, 1080)],
            ))
            .with_output(DisplayOutput::disconnected("VGA1"))
            .with_output(DisplayOutput::connected(
                "HDMI1",
                vec![Mode::new(ModeId(2), 1280, 720)],
            ));

        assert_eq!(backend.outputs().unwrap().len(), 3);

        let names: Vec<String> = backend
            .connected_displays()
            .unwrap()
            .into_iter()
            .map(|o| o.name)
            .collect();
        assert_eq!(names, vec!["eDP1".to_string(), "HDMI1".to_string()]);
    }

    #[test]
    fn test_unique_modes_keeps_position_of_first() {
        let modes = vec![
            Mode::new(ModeId(1), 1920, 1080),
            Mode::new(ModeId(2), 1280, 720),
            Mode::new(ModeId(3), 1920, 1080),
        ];

        assert_eq!(
            unique_modes(modes),
            vec![
                Mode::new(ModeId(3), 1920, 1080),
                Mode::new(ModeId(2), 1280, 720),
            ]
        );
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"name": "eDP1", "modes": [{"id": 71, "width": 1920, "height": 1080}]},
            {"name": "DP1", "connected": false}
        ]"#;

        let backend = StaticBackend::from_json(json).unwrap();
        let outputs = backend.outputs().unwrap();
        assert_eq!(outputs.len(), 2);
        assert!(outputs[0].connected);
        assert_eq!(outputs[0].modes[0], Mode::new(ModeId(71), 1920, 1080));
        assert!(!outputs[1].connected);
        assert!(outputs[1].modes.is_empty());
    }

    #[test]
    fn test_from_json_invalid() {
        let err = StaticBackend::from_json("{not json").unwrap_err();
        assert!(matches!(err, DisplayError::Topology(_)));
    }

    #[test]
    fn test_from_file_missing() {
        let err = StaticBackend::from_file(Path::new("/nonexistent/topology.json")).unwrap_err();
        assert!(matches!(err, DisplayError::TopologyRead { .. }));
        assert_eq!(err.exit_code(), 8);
    }

    #[test]
    fn test_output_display() {
        let output = DisplayOutput::connected("HDMI1", vec![Mode::new(ModeId(2), 1280, 720)]);
        assert_eq!(output.to_string(), "HDMI1 connected (1 modes)");
    }
}
