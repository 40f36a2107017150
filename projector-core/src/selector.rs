//! Mode selection for the external output.
//!
//! The selector walks the candidate modes in the order given and keeps a
//! running best. The first mode that passes both the aspect filter and the
//! resolution limit seeds the best; after that a candidate takes over when it
//! is larger in *either* dimension and still fits the limit.
//!
//! That comparison is not a total order. With modes that differ in shape
//! (only possible when no aspect ratio is requested) the result depends on
//! the walk order: for A=100x50, B=90x60, C=80x70 the order A,B,C ends at C
//! while C,B,A ends at A. When every eligible mode has the same exact ratio
//! the eligible modes form a chain and the walk always ends at the largest.

use crate::aspect::{AspectMatch, AspectRatio};
use crate::table::ResolutionTable;
use projector_common::{Mode, Resolution};

/// Why a candidate did not become the running best.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Its aspect ratio differs from the requested one.
    AspectMismatch(AspectRatio),
    /// It is wider or taller than the limit.
    ExceedsLimit,
    /// It is neither wider nor taller than the current best.
    NotLarger,
}

/// One step of the selection walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStep {
    /// The first eligible mode became the running best.
    Seed(Mode),
    /// A larger mode replaced the running best.
    Replace { previous: Mode, next: Mode },
    /// The mode was passed over.
    Skip { mode: Mode, reason: SkipReason },
}

/// Selection outcome with the walk that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Chosen mode, or `None` if nothing was eligible.
    pub chosen: Option<Mode>,
    /// Aspect ratio that was requested.
    pub requested: Option<AspectRatio>,
    /// Limit that was applied.
    pub limit: Resolution,
    /// Every decision taken, in walk order.
    pub steps: Vec<SelectionStep>,
}

impl Selection {
    /// Number of times the running best changed after being seeded.
    pub fn replacements(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step, SelectionStep::Replace { .. }))
            .count()
    }
}

/// Picks the best mode for a requested aspect ratio.
#[derive(Debug, Clone, Copy)]
pub struct ModeSelector<'a> {
    table: &'a ResolutionTable,
    matcher: AspectMatch,
}

impl<'a> ModeSelector<'a> {
    /// Create a selector with exact aspect matching.
    pub fn new(table: &'a ResolutionTable) -> Self {
        Self {
            table,
            matcher: AspectMatch::Exact,
        }
    }

    /// Use a different aspect matching policy.
    #[must_use]
    pub fn with_matcher(mut self, matcher: AspectMatch) -> Self {
        self.matcher = matcher;
        self
    }

    /// Select the best mode, or `None` if no candidate is eligible.
    pub fn select(&self, modes: &[Mode], requested: Option<AspectRatio>) -> Option<Mode> {
        self.walk(modes, requested, |_| {})
    }

    /// Same as [`select`](Self::select) but also records every step.
    pub fn select_traced(&self, modes: &[Mode], requested: Option<AspectRatio>) -> Selection {
        let mut steps = Vec::with_capacity(modes.len());
        let chosen = self.walk(modes, requested, |step| steps.push(step));

        Selection {
            chosen,
            requested,
            limit: self.table.limit_for(requested),
            steps,
        }
    }

    fn walk(
        &self,
        modes: &[Mode],
        requested: Option<AspectRatio>,
        mut record: impl FnMut(SelectionStep),
    ) -> Option<Mode> {
        let limit = self.table.limit_for(requested);
        let mut best: Option<Mode> = None;

        for &mode in modes {
            if let Some(wanted) = requested {
                let actual = self.matcher.classify(mode.width, mode.height);
                if actual != wanted {
                    record(SelectionStep::Skip {
                        mode,
                        reason: SkipReason::AspectMismatch(actual),
                    });
                    continue;
                }
            }

            if !limit.contains(mode.resolution()) {
                record(SelectionStep::Skip {
                    mode,
                    reason: SkipReason::ExceedsLimit,
                });
                continue;
            }

            match best {
                None => {
                    record(SelectionStep::Seed(mode));
                    best = Some(mode);
                }
                Some(current) if mode.width > current.width || mode.height > current.height => {
                    record(SelectionStep::Replace {
                        previous: current,
                        next: mode,
                    });
                    best = Some(mode);
                }
                Some(_) => record(SelectionStep::Skip {
                    mode,
                    reason: SkipReason::NotLarger,
                }),
            }
        }

        best
    }
}
