//! # projector-core: mode selection for mirrored projector output
//!
//! Given the modes an external output supports and the aspect ratio the
//! laptop will run at, this crate picks the mode to drive the external
//! output with and the factor xrandr must scale it by so that both screens
//! show the same picture at the same size.
//!
//! Everything here is pure: no I/O, no logging, no global state. Limits and
//! reference resolutions come from a [`ResolutionTable`] passed in by the
//! caller.
//!
//! ## Example
//!
//! ```rust
//! use projector_common::{Mode, ModeId};
//! use projector_core::{AspectRatio, DecisionEngine, ResolutionTable};
//!
//! let table = ResolutionTable::default();
//! let modes = [
//!     Mode::new(ModeId(1), 1920, 1080),
//!     Mode::new(ModeId(2), 3840, 2160),
//! ];
//!
//! let decision = DecisionEngine::new(&table)
//!     .decide(&modes, Some(AspectRatio::Widescreen))?
//!     .expect("1920x1080 fits the 16:9 limit");
//! assert_eq!(decision.mode.label(), "1920x1080");
//! assert_eq!(decision.scale.to_string(), "1.0");
//! # Ok::<(), projector_core::CoreError>(())
//! ```

mod aspect;
mod decision;
mod errors;
mod scaling;
mod selector;
mod table;

pub use aspect::{classify, try_classify, AspectMatch, AspectRatio};
pub use decision::{Decision, DecisionEngine};
pub use errors::CoreError;
pub use scaling::{ScaleCalculator, ScaleFactor, ScalePolicy};
pub use selector::{ModeSelector, Selection, SelectionStep, SkipReason};
pub use table::{
    Profile, ResolutionTable, STANDARD_RESOLUTION, UNCONSTRAINED_LIMIT, WIDESCREEN_RESOLUTION,
};

/// Common result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;
