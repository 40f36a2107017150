//! Selection followed by scaling, as one call.

use crate::aspect::{AspectMatch, AspectRatio};
use crate::errors::CoreError;
use crate::scaling::{ScaleCalculator, ScaleFactor, ScalePolicy};
use crate::selector::{ModeSelector, Selection};
use crate::table::ResolutionTable;
use projector_common::{Mode, Resolution};

/// Chosen external mode and the factor it must be scaled by.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    /// Mode for the external output.
    pub mode: Mode,
    /// Resolution the laptop is set to; also the scale reference.
    pub reference: Resolution,
    /// Mirror scale factor.
    pub scale: ScaleFactor,
    /// The walk that chose `mode`.
    pub selection: Selection,
}

/// Combines a [`ModeSelector`] and a [`ScaleCalculator`] over one table.
#[derive(Debug, Clone, Copy)]
pub struct DecisionEngine<'a> {
    table: &'a ResolutionTable,
    matcher: AspectMatch,
    calculator: ScaleCalculator,
}

impl<'a> DecisionEngine<'a> {
    /// Create an engine with exact matching and the default scale policy.
    pub fn new(table: &'a ResolutionTable) -> Self {
        Self {
            table,
            matcher: AspectMatch::Exact,
            calculator: ScaleCalculator::default(),
        }
    }

    /// Use a different aspect matching policy.
    #[must_use]
    pub fn with_matcher(mut self, matcher: AspectMatch) -> Self {
        self.matcher = matcher;
        self
    }

    /// Use a different scale policy.
    #[must_use]
    pub fn with_scale_policy(mut self, policy: ScalePolicy) -> Self {
        self.calculator = ScaleCalculator::new(policy);
        self
    }

    /// Table the engine reads limits and references from.
    pub fn table(&self) -> &ResolutionTable {
        self.table
    }

    /// Pick a mode and compute its scale factor.
    ///
    /// Returns `Ok(None)` when no candidate is eligible.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDimension`] if the chosen mode cannot be
    /// used as a divisor.
    pub fn decide(
        &self,
        modes: &[Mode],
        requested: Option<AspectRatio>,
    ) -> Result<Option<Decision>, CoreError> {
        let selection = ModeSelector::new(self.table)
            .with_matcher(self.matcher)
            .select_traced(modes, requested);

        let Some(mode) = selection.chosen else {
            return Ok(None);
        };

        let reference = self.table.reference_for(requested);
        let scale = self.calculator.compute(mode.resolution(), reference)?;

        Ok(Some(Decision {
            mode,
            reference,
            scale,
            selection,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use projector_common::ModeId;

    #[test]
    fn test_decide_standard() {
        let table = ResolutionTable::default();
        let engine = DecisionEngine::new(&table);
        let modes = [
            Mode::new(ModeId(1), 1024, 768),
            Mode::new(ModeId(2), 1280, 1024),
            Mode::new(ModeId(3), 1920, 1080),
        ];

        let decision = engine
            .decide(&modes, Some(AspectRatio::Standard))
            .unwrap()
            .unwrap();
        assert_eq!(decision.mode, Mode::new(ModeId(1), 1024, 768));
        assert_eq!(decision.reference, Resolution::new(1400, 1050));
        assert_eq!(decision.scale.value(), 1400.0 / 1024.0);
    }

    #[test]
    fn test_decide_none() {
        let table = ResolutionTable::default();
        let engine = DecisionEngine::new(&table);
        let modes = [Mode::new(ModeId(1), 1280, 1024)];

        assert_eq!(engine.decide(&modes, Some(AspectRatio::Widescreen)), Ok(None));
    }

    #[test]
    fn test_decide_unconstrained_uses_widescreen_reference() {
        let table = ResolutionTable::default();
        let engine = DecisionEngine::new(&table).with_scale_policy(ScalePolicy::PerAxis);
        let modes = [Mode::new(ModeId(7), 3840, 2160)];

        let decision = engine.decide(&modes, None).unwrap().unwrap();
        assert_eq!(decision.reference, Resolution::new(1920, 1080));
        assert_eq!(decision.scale.value(), 0.5);
    }
}
