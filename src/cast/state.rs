//! Where a cast is in its lifecycle, derived from the records it has.
//!
//! Nothing here gates a write. Operators at sea re-save and back-fill phases
//! in whatever order conditions allow, so the state is read off the set of
//! recorded stages (furthest one wins) and gaps are reported as warnings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use utoipa::ToSchema;

/// Operational stages in their expected order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    PreCast,
    Beginning,
    AtDepth,
    CaptureStart,
    BottomDepth,
    Samples,
    Ending,
    OnDeck,
    PostCast,
}

impl Stage {
    pub const ALL: [Self; 9] = [
        Self::PreCast,
        Self::Beginning,
        Self::AtDepth,
        Self::CaptureStart,
        Self::BottomDepth,
        Self::Samples,
        Self::Ending,
        Self::OnDeck,
        Self::PostCast,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::PreCast => "pre-cast checks",
            Self::Beginning => "beginning position",
            Self::AtDepth => "at-depth position",
            Self::CaptureStart => "capture start",
            Self::BottomDepth => "bottom depth",
            Self::Samples => "sample pressures",
            Self::Ending => "ending position",
            Self::OnDeck => "on-deck position",
            Self::PostCast => "post-cast checks",
        }
    }

    /// State a cast is in once this is its furthest stage.
    #[must_use]
    pub fn reached(self) -> CastState {
        match self {
            Self::PreCast => CastState::PreCastRecorded,
            Self::Beginning => CastState::BeginningPositionRecorded,
            Self::AtDepth => CastState::AtDepthRecorded,
            Self::CaptureStart => CastState::CaptureStarted,
            Self::BottomDepth => CastState::BottomDepthRecorded,
            Self::Samples => CastState::SamplesInProgress,
            Self::Ending => CastState::EndingPositionRecorded,
            Self::OnDeck => CastState::OnDeckRecorded,
            Self::PostCast => CastState::PostCastRecorded,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CastState {
    Created,
    PreCastRecorded,
    BeginningPositionRecorded,
    AtDepthRecorded,
    CaptureStarted,
    BottomDepthRecorded,
    SamplesInProgress,
    EndingPositionRecorded,
    OnDeckRecorded,
    PostCastRecorded,
}

impl CastState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Self::PostCastRecorded
    }
}

/// Stages recorded for one cast.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Progress {
    recorded: BTreeSet<Stage>,
}

impl Progress {
    pub fn from_stages(stages: impl IntoIterator<Item = Stage>) -> Self {
        Self {
            recorded: stages.into_iter().collect(),
        }
    }

    pub fn record(&mut self, stage: Stage) {
        self.recorded.insert(stage);
    }

    #[must_use]
    pub fn has(&self, stage: Stage) -> bool {
        self.recorded.contains(&stage)
    }

    #[must_use]
    pub fn state(&self) -> CastState {
        self.recorded
            .last()
            .map_or(CastState::Created, |stage| stage.reached())
    }

    /// Earlier stages still missing when `stage` is saved. Sample captures
    /// are optional and never reported.
    #[must_use]
    pub fn missing_before(&self, stage: Stage) -> Vec<Stage> {
        Stage::ALL
            .into_iter()
            .take_while(|s| *s < stage)
            .filter(|s| *s != Stage::Samples && !self.has(*s))
            .collect()
    }

    /// Human-readable advisories for saving `stage` now.
    #[must_use]
    pub fn warnings_for(&self, stage: Stage) -> Vec<String> {
        self.missing_before(stage)
            .into_iter()
            .map(|missing| {
                format!(
                    "{} saved before {} was recorded",
                    stage.label(),
                    missing.label()
                )
            })
            .collect()
    }

    /// First stage not yet recorded after the furthest one present.
    #[must_use]
    pub fn next_stage(&self) -> Option<Stage> {
        let furthest = self.recorded.last().copied();
        Stage::ALL
            .into_iter()
            .find(|s| furthest.is_none_or(|f| *s > f) && *s != Stage::Samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cast_is_created() {
        let progress = Progress::default();
        assert_eq!(progress.state(), CastState::Created);
        assert_eq!(progress.next_stage(), Some(Stage::PreCast));
    }

    #[test]
    fn furthest_stage_wins() {
        let progress = Progress::from_stages([Stage::PreCast, Stage::Ending, Stage::Beginning]);
        assert_eq!(progress.state(), CastState::EndingPositionRecorded);
        assert_eq!(progress.next_stage(), Some(Stage::OnDeck));
    }

    #[test]
    fn samples_put_cast_in_progress() {
        let progress = Progress::from_stages([Stage::BottomDepth, Stage::Samples]);
        assert_eq!(progress.state(), CastState::SamplesInProgress);
    }

    #[test]
    fn post_cast_is_terminal() {
        let progress = Progress::from_stages(Stage::ALL);
        assert!(progress.state().is_terminal());
        assert_eq!(progress.next_stage(), None);
    }

    #[test]
    fn out_of_order_save_is_reported_not_refused() {
        let progress = Progress::from_stages([Stage::PreCast]);
        assert_eq!(
            progress.missing_before(Stage::CaptureStart),
            vec![Stage::Beginning, Stage::AtDepth]
        );

        let warnings = progress.warnings_for(Stage::CaptureStart);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("beginning position"));
    }

    #[test]
    fn missing_samples_never_warn() {
        let progress = Progress::from_stages([
            Stage::PreCast,
            Stage::Beginning,
            Stage::AtDepth,
            Stage::CaptureStart,
            Stage::BottomDepth,
        ]);
        assert!(progress.missing_before(Stage::Ending).is_empty());
    }

    #[test]
    fn first_stage_has_no_predecessors() {
        assert!(Progress::default().warnings_for(Stage::PreCast).is_empty());
    }
}
