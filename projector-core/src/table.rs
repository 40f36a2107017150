//! Resolution limits and reference resolutions per aspect ratio.
//!
//! The table is built once at startup (from defaults or a config file) and
//! passed by reference into the selector and the scale calculation.

use crate::aspect::AspectRatio;
use crate::errors::CoreError;
use projector_common::Resolution;
use serde::{Deserialize, Serialize};

/// Laptop resolution used for 16:9 output.
pub const WIDESCREEN_RESOLUTION: Resolution = Resolution::new(1920, 1080);

/// Laptop resolution used for 4:3 output. Anything larger makes the KDE
/// panel disappear.
pub const STANDARD_RESOLUTION: Resolution = Resolution::new(1400, 1050);

/// Ceiling applied when no aspect ratio is requested.
pub const UNCONSTRAINED_LIMIT: Resolution = Resolution::new(100_000, 100_000);

/// Limit and reference resolution for one aspect ratio category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Largest mode the external output may be driven at.
    pub limit: Resolution,
    /// Resolution the laptop runs at; the denominator of the scale factor.
    pub reference: Resolution,
}

impl Profile {
    /// Profile whose limit and reference are the same laptop resolution.
    pub const fn laptop(resolution: Resolution) -> Self {
        Self {
            limit: resolution,
            reference: resolution,
        }
    }
}

/// Per-category limits and references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionTable {
    /// 4:3 profile.
    #[serde(default = "default_standard")]
    pub standard: Profile,
    /// 16:9 profile.
    #[serde(default = "default_widescreen")]
    pub widescreen: Profile,
    /// Limit used when no category (or "other") is requested.
    #[serde(default = "default_unconstrained_limit")]
    pub unconstrained_limit: Resolution,
}

fn default_standard() -> Profile {
    Profile::laptop(STANDARD_RESOLUTION)
}

fn default_widescreen() -> Profile {
    Profile::laptop(WIDESCREEN_RESOLUTION)
}

fn default_unconstrained_limit() -> Resolution {
    UNCONSTRAINED_LIMIT
}

impl Default for ResolutionTable {
    fn default() -> Self {
        Self {
            standard: default_standard(),
            widescreen: default_widescreen(),
            unconstrained_limit: default_unconstrained_limit(),
        }
    }
}

impl ResolutionTable {
    /// Limit a chosen mode must fit inside for the requested category.
    pub fn limit_for(&self, requested: Option<AspectRatio>) -> Resolution {
        match requested {
            Some(AspectRatio::Standard) => self.standard.limit,
            Some(AspectRatio::Widescreen) => self.widescreen.limit,
            Some(AspectRatio::Other) | None => self.unconstrained_limit,
        }
    }

    /// Reference resolution for the requested category. Only 4:3 has its
    /// own reference; every other request scales against 16:9.
    pub fn reference_for(&self, requested: Option<AspectRatio>) -> Resolution {
        match requested {
            Some(AspectRatio::Standard) => self.standard.reference,
            _ => self.widescreen.reference,
        }
    }

    /// Validates the table.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDimension`] for the first entry with a
    /// zero width or height.
    pub fn validate(&self) -> Result<(), CoreError> {
        let entries = [
            self.standard.limit,
            self.standard.reference,
            self.widescreen.limit,
            self.widescreen.reference,
            self.unconstrained_limit,
        ];

        match entries.iter().find(|r| !r.is_valid()) {
            Some(bad) => Err(CoreError::InvalidDimension {
                width: bad.width,
                height: bad.height,
            }),
            None => Ok(()),
        }
    }
}
