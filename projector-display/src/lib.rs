//! # projector-display: topology discovery and xrandr mirroring
//!
//! This crate wraps the selection core with the I/O around it:
//!
//! - **Backends** report which outputs are connected and which modes they
//!   support ([`RandrBackend`] for a live X server, [`StaticBackend`] for
//!   fixtures and captured topologies)
//! - **[`DisplayPairResolver`]** checks that exactly two displays are
//!   connected, tells the laptop from the external one, and turns the core's
//!   decision into a [`MirrorPlan`]
//! - **[`XrandrCommand`]** renders and runs the xrandr call for a plan
//!
//! ## Example
//!
//! ```rust
//! use projector_common::{Mode, ModeId};
//! use projector_core::{AspectRatio, DecisionEngine, ResolutionTable};
//! use projector_display::{DisplayOutput, DisplayPairResolver, StaticBackend, XrandrCommand};
//!
//! let backend = StaticBackend::default()
//!     .with_output(DisplayOutput::connected("eDP1", vec![Mode::new(ModeId(1), 1920, 1080)]))
//!     .with_output(DisplayOutput::connected("HDMI1", vec![Mode::new(ModeId(2), 960, 540)]));
//!
//! let table = ResolutionTable::default();
//! let resolver = DisplayPairResolver::new("eDP1", DecisionEngine::new(&table));
//! let plan = resolver.resolve_from(&backend, Some(AspectRatio::Widescreen))?;
//!
//! assert_eq!(
//!     XrandrCommand::mirror("xrandr", &plan).to_string(),
//!     "xrandr --output eDP1 --mode 1920x1080 --output HDMI1 --mode 960x540 \
//!      --scale 2.0x2.0 --same-as eDP1"
//! );
//! # Ok::<(), projector_display::DisplayError>(())
//! ```

mod backend;
mod command;
mod errors;
#[cfg(feature = "randr")]
mod randr;
mod resolver;

pub use backend::{unique_modes, DisplayBackend, DisplayOutput, StaticBackend};
pub use command::{XrandrCommand, DEFAULT_XRANDR};
pub use errors::DisplayError;
#[cfg(feature = "randr")]
pub use randr::RandrBackend;
pub use resolver::{DisplayPair, DisplayPairResolver, MirrorPlan};

/// Common result type for display operations
pub type DisplayResult<T> = Result<T, DisplayError>;
