//! Configuration for the display-projector tool.
//!
//! Settings are read from a TOML file (by default
//! `~/.config/display-projector/config.toml`) and then overridden by
//! command-line flags:
//!
//! ```toml
//! [displays]
//! laptop_output = "eDP1"
//!
//! [xrandr]
//! program = "xrandr"
//!
//! [selection]
//! aspect_tolerance = 0.01
//! scale_policy = "per-axis"
//!
//! [profiles.standard]
//! limit = { width = 1400, height = 1050 }
//! reference = { width = 1400, height = 1050 }
//! ```

use crate::args::Args;
use projector_core::{AspectMatch, CoreError, ResolutionTable, ScalePolicy};
use projector_display::DEFAULT_XRANDR;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Largest accepted aspect tolerance; beyond it 4:3 and 16:9 start to blur.
pub const MAX_ASPECT_TOLERANCE: f64 = 0.1;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file '{}'", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse config file '{}'", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A setting is out of range.
    #[error("Configuration error: {0}")]
    Invalid(String),

    /// The resolution table is unusable.
    #[error("Invalid resolution profiles")]
    Core(#[from] CoreError),
}

/// Complete tool configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Output naming.
    #[serde(default)]
    pub displays: DisplaysConfig,
    /// xrandr invocation.
    #[serde(default)]
    pub xrandr: XrandrConfig,
    /// Selection policy.
    #[serde(default)]
    pub selection: SelectionConfig,
    /// Limits and reference resolutions.
    #[serde(default)]
    pub profiles: ResolutionTable,
}

/// Display naming configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaysConfig {
    /// RandR name of the laptop panel.
    #[serde(default = "default_laptop_output")]
    pub laptop_output: String,
    /// X display to connect to (defaults to `$DISPLAY`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_display: Option<String>,
}

fn default_laptop_output() -> String {
    "eDP1".to_string()
}

impl Default for DisplaysConfig {
    fn default() -> Self {
        Self {
            laptop_output: default_laptop_output(),
            x_display: None,
        }
    }
}

/// xrandr configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XrandrConfig {
    /// Program to run.
    #[serde(default = "default_xrandr_program")]
    pub program: String,
}

fn default_xrandr_program() -> String {
    DEFAULT_XRANDR.to_string()
}

impl Default for XrandrConfig {
    fn default() -> Self {
        Self {
            program: default_xrandr_program(),
        }
    }
}

/// Selection policy configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Allowed deviation from an exact 4:3 or 16:9 ratio (absent = exact).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_tolerance: Option<f64>,
    /// Scale factor formula.
    #[serde(default)]
    pub scale_policy: ScalePolicy,
}

impl Config {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Default config file location, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "display-projector")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this schema.
    pub fn from_toml_str(path: &Path, text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config file {}", path.display());
        Self::from_toml_str(path, &text)
    }

    /// Build the effective configuration for a command line.
    ///
    /// An explicit `--config` file must exist; the default file is used
    /// only when present. Flags then override file values.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file cannot be loaded or the result
    /// fails validation.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let base = match &args.config {
            Some(path) => Self::load(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load(&path)?,
                _ => Self::default(),
            },
        };

        let mut builder = ConfigBuilder { config: base };
        if let Some(name) = &args.laptop_output {
            builder = builder.laptop_output(name);
        }
        if let Some(policy) = args.scale_policy {
            builder = builder.scale_policy(policy);
        }
        if let Some(eps) = args.aspect_tolerance {
            builder = builder.aspect_tolerance(eps);
        }

        builder.build()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.displays.laptop_output.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Laptop output name cannot be empty".to_string(),
            ));
        }

        if self.xrandr.program.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "xrandr program cannot be empty".to_string(),
            ));
        }

        if let Some(eps) = self.selection.aspect_tolerance {
            if !(0.0..=MAX_ASPECT_TOLERANCE).contains(&eps) {
                return Err(ConfigError::Invalid(format!(
                    "Aspect tolerance must be between 0.0 and {}",
                    MAX_ASPECT_TOLERANCE
                )));
            }
        }

        self.profiles.validate()?;
        Ok(())
    }

    /// Aspect matching policy derived from the tolerance setting.
    #[must_use]
    pub fn aspect_match(&self) -> AspectMatch {
        AspectMatch::from_tolerance(self.selection.aspect_tolerance)
    }
}

/// Builder for creating a `Config`.
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Sets the laptop output name.
    #[must_use]
    pub fn laptop_output(mut self, name: impl Into<String>) -> Self {
        self.config.displays.laptop_output = name.into();
        self
    }

    /// Sets the scale factor formula.
    #[must_use]
    pub fn scale_policy(mut self, policy: ScalePolicy) -> Self {
        self.config.selection.scale_policy = policy;
        self
    }

    /// Sets the aspect ratio tolerance.
    #[must_use]
    pub fn aspect_tolerance(mut self, eps: f64) -> Self {
        self.config.selection.aspect_tolerance = Some(eps);
        self
    }

    /// Sets the xrandr program.
    #[must_use]
    pub fn xrandr_program(mut self, program: impl Into<String>) -> Self {
        self.config.xrandr.program = program.into();
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> Result<Config, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
