//! Command-line front end for mirroring a laptop display onto a projector.
//!
//! The binary reads its configuration, discovers the two connected displays,
//! asks the selection core for the projector mode and scale factor, and
//! applies the result with `xrandr`.

pub mod app;
pub mod args;
pub mod config;

pub use app::{exit_code, ProjectorApp};
pub use args::Args;
pub use config::{Config, ConfigBuilder, ConfigError};
