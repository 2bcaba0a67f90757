//! Outcome model: the result of resolving one category.
//!
//! Outcomes are computed fresh on every render and never persisted. Every
//! failure ends up here as a `kind` plus a reason, so the shell can always
//! render something and move on to the next category.

use serde::{Deserialize, Serialize};

use super::category::{ArtifactId, Category};
use super::errors::ResolveError;

/// OutcomeKind は解決結果の分類
///
/// SCREAMING_SNAKE_CASE でシリアライズ（FOUND / STORE_UNAVAILABLE / ...）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeKind {
    Found,
    StoreUnavailable,
    ArtifactNotFound,
    ArtifactCorrupt,
}

/// Figure はデコード済みで表示できる図
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    /// Bundle entry name or URL/path the bytes were read from.
    pub entry: String,

    /// Image format name, e.g. `png`.
    pub format: String,

    pub width: u32,
    pub height: u32,

    #[serde(skip)]
    pub bytes: Vec<u8>,

    /// `"{model} - {scenario}"`.
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// ResolutionOutcome はカテゴリ 1 つ分の `FigureResolver::resolve` の結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionOutcome {
    pub category: Category,
    pub artifact: ArtifactId,
    pub kind: OutcomeKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub figure: Option<Figure>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ResolutionOutcome {
    pub fn found(category: Category, artifact: ArtifactId, figure: Figure) -> Self {
        Self {
            category,
            artifact,
            kind: OutcomeKind::Found,
            figure: Some(figure),
            reason: None,
        }
    }

    pub fn failed(category: Category, artifact: ArtifactId, error: &ResolveError) -> Self {
        Self {
            category,
            artifact,
            kind: error.kind(),
            figure: None,
            reason: Some(error.to_string()),
        }
    }

    pub fn is_found(&self) -> bool {
        self.kind == OutcomeKind::Found
    }

    pub fn caption(&self) -> Option<&str> {
        self.figure.as_ref()?.caption.as_deref()
    }
}
