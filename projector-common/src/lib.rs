//! Common types shared by the display-projector crates.
//!
//! This crate provides the plain value types every layer agrees on:
//! - [`Resolution`] - a width/height pair used for limits and reference sizes
//! - [`Mode`] - one resolution an output can be driven at, tagged with an opaque id
//! - [`ModeId`] - the opaque mode token handed out by the display server

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a display mode (a RandR mode XID on X11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModeId(pub u32);

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Create a new resolution.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check whether both dimensions are non-zero.
    pub const fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Check whether `other` fits inside this resolution on both axes.
    pub const fn contains(&self, other: Resolution) -> bool {
        other.width <= self.width && other.height <= self.height
    }

    /// Get the pixel count.
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One resolution a physical output can be driven at.
///
/// Modes are immutable once enumerated; the aspect ratio is never stored on
/// the mode and is always derived from `width`/`height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mode {
    pub id: ModeId,
    pub width: u32,
    pub height: u32,
}

impl Mode {
    /// Create a new mode.
    pub const fn new(id: ModeId, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    /// Get the mode's size as a [`Resolution`].
    pub const fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    /// The `<W>x<H>` label used by xrandr's `--mode` argument.
    pub fn label(&self) -> String {
        self.resolution().to_string()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} ({})", self.width, self.height, self.id)
    }
}
