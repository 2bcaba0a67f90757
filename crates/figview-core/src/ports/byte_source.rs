//! ByteSource port - バイト列の取得（HTTP / ローカルファイル）
//!
//! 図・バンドル・ワークブックはすべてこの port 経由で読みます。

use async_trait::async_trait;

use crate::domain::Location;

/// FetchError は `Location` の読み込み失敗
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("HTTP {status} for {location}")]
    Status { location: String, status: u16 },

    /// No response at all (DNS, connection, timeout, body read).
    #[error("request to {location} failed: {reason}")]
    Transport { location: String, reason: String },

    #[error("cannot read {location}: {reason}")]
    Io { location: String, reason: String },

    /// This source cannot serve this kind of location.
    #[error("{location} is not served by this source")]
    Unsupported { location: String },

    /// Nothing registered under this location (in-memory source).
    #[error("nothing at {location}")]
    Missing { location: String },
}

/// ByteSource は Location の中身をまるごと読み込む
///
/// # 設計原則
/// - 読み込みのみ（書き込み・共有状態の変更なし）
/// - 失敗はすべて FetchError で返す（panic しない）
/// - `Send + Sync` を要求（Arc で共有するため）
#[async_trait]
pub trait ByteSource: Send + Sync {
    async fn fetch(&self, location: &Location) -> Result<Vec<u8>, FetchError>;
}
