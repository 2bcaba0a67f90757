//! RenderReport - 1 回の描画サイクルの結果

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{OutcomeKind, ResolutionOutcome, Selection, SessionId};

/// OutcomeCounts は結果の種類ごとの件数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub found: usize,
    pub store_unavailable: usize,
    pub artifact_not_found: usize,
    pub artifact_corrupt: usize,
}

impl OutcomeCounts {
    pub fn tally(outcomes: &[ResolutionOutcome]) -> Self {
        let mut counts = Self::default();
        for outcome in outcomes {
            match outcome.kind {
                OutcomeKind::Found => counts.found += 1,
                OutcomeKind::StoreUnavailable => counts.store_unavailable += 1,
                OutcomeKind::ArtifactNotFound => counts.artifact_not_found += 1,
                OutcomeKind::ArtifactCorrupt => counts.artifact_corrupt += 1,
            }
        }
        counts
    }

    pub fn failed(&self) -> usize {
        self.store_unavailable + self.artifact_not_found + self.artifact_corrupt
    }
}

/// RenderReport は 1 つの選択に対する全カテゴリの結果（カテゴリ順）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderReport {
    pub session: SessionId,
    pub selection: Selection,
    pub rendered_at: DateTime<Utc>,
    pub outcomes: Vec<ResolutionOutcome>,
    pub counts: OutcomeCounts,
}

impl RenderReport {
    pub fn new(
        session: SessionId,
        selection: Selection,
        rendered_at: DateTime<Utc>,
        outcomes: Vec<ResolutionOutcome>,
    ) -> Self {
        let counts = OutcomeCounts::tally(&outcomes);
        Self {
            session,
            selection,
            rendered_at,
            outcomes,
            counts,
        }
    }
}
