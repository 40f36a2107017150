//! Laptop/external role assignment and mirror planning.

use crate::backend::{DisplayBackend, DisplayOutput};
use crate::errors::DisplayError;
use projector_common::{Mode, Resolution};
use projector_core::{AspectRatio, DecisionEngine, ScaleFactor, SelectionStep};
use std::fmt;
use tracing::{debug, info, trace};

/// The two connected displays, with their roles assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayPair {
    /// The fixed laptop panel
    pub laptop: DisplayOutput,
    /// The projector or monitor being mirrored to
    pub external: DisplayOutput,
}

/// Everything needed to mirror the laptop onto the external display.
#[derive(Debug, Clone, PartialEq)]
pub struct MirrorPlan {
    /// Laptop output name
    pub laptop: String,
    /// Mode the laptop is set to
    pub laptop_mode: Resolution,
    /// External output name
    pub external: String,
    /// Mode the external output is set to
    pub external_mode: Mode,
    /// Factor the external framebuffer is scaled by
    pub scale: ScaleFactor,
    /// Aspect ratio that was requested (`None` = any)
    pub aspect: Option<AspectRatio>,
}

impl fmt::Display for MirrorPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {} mirrored to {} @ {}x{} (scale {})",
            self.laptop,
            self.laptop_mode,
            self.external,
            self.external_mode.width,
            self.external_mode.height,
            self.scale
        )
    }
}

/// Maps a discovered topology onto laptop/external roles and plans the
/// mirror configuration.
#[derive(Debug, Clone)]
pub struct DisplayPairResolver<'a> {
    laptop_output: String,
    engine: DecisionEngine<'a>,
}

impl<'a> DisplayPairResolver<'a> {
    /// Create a resolver treating `laptop_output` as the fixed display.
    pub fn new(laptop_output: impl Into<String>, engine: DecisionEngine<'a>) -> Self {
        Self {
            laptop_output: laptop_output.into(),
            engine,
        }
    }

    /// Name of the laptop output.
    pub fn laptop_output(&self) -> &str {
        &self.laptop_output
    }

    /// Assign roles to exactly two connected displays.
    ///
    /// # Errors
    ///
    /// Fails if there are not exactly two displays, if none of them is the
    /// laptop output, or if both of them are.
    pub fn pair(&self, mut displays: Vec<DisplayOutput>) -> Result<DisplayPair, DisplayError> {
        match displays.len() {
            n if n < 2 => return Err(DisplayError::ExternalNotConnected { found: n }),
            n if n > 2 => return Err(DisplayError::TooManyDisplays { found: n }),
            _ => {}
        }

        let laptop_index = displays
            .iter()
            .position(|d| d.name == self.laptop_output)
            .ok_or_else(|| DisplayError::LaptopNotConnected {
                name: self.laptop_output.clone(),
            })?;
        let laptop = displays.remove(laptop_index);

        let external = displays
            .into_iter()
            .find(|d| d.name != self.laptop_output)
            .ok_or(DisplayError::NoExternalDisplay)?;

        info!("Using output {} for projector display", external.name);
        Ok(DisplayPair { laptop, external })
    }

    /// Pick the external mode and scale factor for a display pair.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::NoEligibleMode`] if the external display has
    /// no mode matching the request.
    pub fn plan(
        &self,
        pair: &DisplayPair,
        requested: Option<AspectRatio>,
    ) -> Result<MirrorPlan, DisplayError> {
        let decision = self
            .engine
            .decide(&pair.external.modes, requested)?
            .ok_or_else(|| DisplayError::NoEligibleMode {
                output: pair.external.name.clone(),
                aspect: requested,
            })?;

        for step in &decision.selection.steps {
            match step {
                SelectionStep::Seed(mode) => trace!("seed {}", mode),
                SelectionStep::Replace { previous, next } => trace!("{} replaces {}", next, previous),
                SelectionStep::Skip { mode, reason } => trace!("skip {}: {:?}", mode, reason),
            }
        }
        debug!(
            "Selected {} for {} under limit {} ({} candidates, {} replacements)",
            decision.mode,
            pair.external.name,
            decision.selection.limit,
            pair.external.modes.len(),
            decision.selection.replacements()
        );

        Ok(MirrorPlan {
            laptop: pair.laptop.name.clone(),
            laptop_mode: decision.reference,
            external: pair.external.name.clone(),
            external_mode: decision.mode,
            scale: decision.scale,
            aspect: requested,
        })
    }

    /// Assign roles and plan in one step.
    ///
    /// # Errors
    ///
    /// See [`pair`](Self::pair) and [`plan`](Self::plan).
    pub fn resolve(
        &self,
        displays: Vec<DisplayOutput>,
        requested: Option<AspectRatio>,
    ) -> Result<MirrorPlan, DisplayError> {
        let pair = self.pair(displays)?;
        self.plan(&pair, requested)
    }

    /// Query a backend for connected displays, then resolve.
    ///
    /// # Errors
    ///
    /// Propagates backend failures and everything [`resolve`](Self::resolve) reports.
    pub fn resolve_from(
        &self,
        backend: &dyn DisplayBackend,
        requested: Option<AspectRatio>,
    ) -> Result<MirrorPlan, DisplayError> {
        let displays = backend.connected_displays()?;
        self.resolve(displays, requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use projector_common::ModeId;
    use projector_core::ResolutionTable;

    fn laptop() -> DisplayOutput {
        DisplayOutput::connected("eDP1", vec![Mode::new(ModeId(1), 1920, 1080)])
    }

    fn projector(name: &str) -> DisplayOutput {
        DisplayOutput::connected(
            name,
            vec![
                Mode::new(ModeId(0x40), 1024, 768),
                Mode::new(ModeId(0x41), 1280, 720),
                Mode::new(ModeId(0x42), 1920, 1080),
            ],
        )
    }

    #[test]
    fn test_pair_assigns_roles_in_any_order() {
        let table = ResolutionTable::default();
        let resolver = DisplayPairResolver::new("eDP1", DecisionEngine::new(&table));

        let pair = resolver.pair(vec![projector("HDMI1"), laptop()]).unwrap();
        assert_eq!(pair.laptop.name, "eDP1");
        assert_eq!(pair.external.name, "HDMI1");

        let pair = resolver.pair(vec![laptop(), projector("DP1")]).unwrap();
        assert_eq!(pair.external.name, "DP1");
    }

    #[test]
    fn test_pair_requires_two_displays() {
        let table = ResolutionTable::default();
        let resolver = DisplayPairResolver::new("eDP1", DecisionEngine::new(&table));

        assert!(matches!(
            resolver.pair(vec![laptop()]),
            Err(DisplayError::ExternalNotConnected { found: 1 })
        ));
        assert!(matches!(
            resolver.pair(vec![]),
            Err(DisplayError::ExternalNotConnected { found: 0 })
        ));
        assert!(matches!(
            resolver.pair(vec![laptop(), projector("HDMI1"), projector("DP1")]),
            Err(DisplayError::TooManyDisplays { found: 3 })
        ));
    }

    #[test]
    fn test_pair_requires_laptop() {
        let table = ResolutionTable::default();
        let resolver = DisplayPairResolver::new("eDP1", DecisionEngine::new(&table));

        match resolver.pair(vec![projector("HDMI1"), projector("DP1")]) {
            Err(DisplayError::LaptopNotConnected { name }) => assert_eq!(name, "eDP1"),
            other => panic!("expected LaptopNotConnected, got {:?}", other),
        }
    }

    #[test]
    fn test_pair_duplicate_laptop_name() {
        let table = ResolutionTable::default();
        let resolver = DisplayPairResolver::new("eDP1", DecisionEngine::new(&table));

        assert!(matches!(
            resolver.pair(vec![laptop(), laptop()]),
            Err(DisplayError::NoExternalDisplay)
        ));
    }

    #[test]
    fn test_plan_widescreen() {
        let table = ResolutionTable::default();
        let resolver = DisplayPairResolver::new("eDP1", DecisionEngine::new(&table));

        let plan = resolver
            .resolve(
                vec![laptop(), projector("HDMI1")],
                Some(AspectRatio::Widescreen),
            )
            .unwrap();

        assert_eq!(plan.laptop, "eDP1");
        assert_eq!(plan.laptop_mode, Resolution::new(1920, 1080));
        assert_eq!(plan.external, "HDMI1");
        assert_eq!(plan.external_mode, Mode::new(ModeId(0x42), 1920, 1080));
        assert_eq!(plan.scale.value(), 1.0);
        assert_eq!(plan.aspect, Some(AspectRatio::Widescreen));
    }

    #[test]
    fn test_plan_standard() {
        let table = ResolutionTable::default();
        let resolver = DisplayPairResolver::new("eDP1", DecisionEngine::new(&table));

        let plan = resolver
            .resolve(vec![laptop(), projector("VGA1")], Some(AspectRatio::Standard))
            .unwrap();

        assert_eq!(plan.laptop_mode, Resolution::new(1400, 1050));
        assert_eq!(plan.external_mode.label(), "1024x768");
        assert_eq!(plan.scale.to_string(), "1.3671875");
    }

    #[test]
    fn test_plan_no_eligible_mode() {
        let table = ResolutionTable::default();
        let resolver = DisplayPairResolver::new("eDP1", DecisionEngine::new(&table));
        let odd = DisplayOutput::connected("HDMI1", vec![Mode::new(ModeId(9), 1280, 1024)]);

        match resolver.resolve(vec![laptop(), odd], Some(AspectRatio::Standard)) {
            Err(DisplayError::NoEligibleMode { output, aspect }) => {
                assert_eq!(output, "HDMI1");
                assert_eq!(aspect, Some(AspectRatio::Standard));
            }
            other => panic!("expected NoEligibleMode, got {:?}", other),
        }
    }

    #[test]
    fn test_plan_display() {
        let table = ResolutionTable::default();
        let resolver = DisplayPairResolver::new("eDP1", DecisionEngine::new(&table));

        let plan = resolver
            .resolve(vec![laptop(), projector("HDMI1")], None)
            .unwrap();
        assert_eq!(
            plan.to_string(),
            "eDP1 @ 1920x1080 mirrored to HDMI1 @ 1920x1080 (scale 1.0)"
        );
    }
}
