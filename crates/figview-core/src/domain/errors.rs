//! Errors - エラー型と分類
//!
//! # 分類
//! - ResolveError: カテゴリ単位で回復し、ResolutionOutcome に変換される
//! - SelectionLoadError: 起動時の致命的エラー（ドロップダウンを作れない）
//! - TemplateError / SelectionError: 設定・入力の検証エラー

use crate::ports::FetchError;

use super::category::ArtifactId;
use super::outcome::OutcomeKind;

/// ResolveError は図を表示できなかった理由
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("store unavailable: {location}: {reason}")]
    StoreUnavailable { location: String, reason: String },

    #[error("no figure named '{artifact}' in {location}: {reason}")]
    ArtifactNotFound {
        artifact: ArtifactId,
        location: String,
        reason: String,
    },

    #[error("figure '{artifact}' could not be decoded: {reason}")]
    ArtifactCorrupt { artifact: ArtifactId, reason: String },
}

impl ResolveError {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            ResolveError::StoreUnavailable { .. } => OutcomeKind::StoreUnavailable,
            ResolveError::ArtifactNotFound { .. } => OutcomeKind::ArtifactNotFound,
            ResolveError::ArtifactCorrupt { .. } => OutcomeKind::ArtifactCorrupt,
        }
    }
}

/// SelectionLoadError は一覧の読み込み失敗（起動時は致命的）
#[derive(Debug, thiserror::Error)]
pub enum SelectionLoadError {
    #[error("cannot fetch workbook: {0}")]
    Fetch(#[from] FetchError),

    #[error("cannot open workbook: {0}")]
    Workbook(String),

    #[error("workbook has no sheet '{sheet}': {reason}")]
    MissingSheet { sheet: String, reason: String },

    #[error("sheet '{0}' has no values")]
    EmptySheet(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("template '{pattern}' lacks the {placeholder} placeholder")]
    MissingPlaceholder {
        pattern: String,
        placeholder: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("{field} '{value}' is not offered; choose one of: {}", offered.join(", "))]
    NotOffered {
        field: &'static str,
        value: String,
        offered: Vec<String>,
    },
}
