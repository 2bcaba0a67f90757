//! Bundle - tar.gz バンドルからの図の検索
//!
//! エントリは tar 内の並び順に走査し、最初に一致したものを返します。
//! Windows で作られたバンドルは `\` 区切りのことがあるため、
//! 名前は正規化してから比較します（`ArtifactId::matches_entry`）。

use flate2::read::GzDecoder;
use std::io::Read;
use tar::Archive;
use tracing::debug;

use crate::domain::ArtifactId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BundleError {
    #[error("cannot open bundle: {0}")]
    Open(String),
}

/// A matched entry with its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleEntry {
    /// Entry name as stored in the archive (not normalized).
    pub name: String,
    pub bytes: Vec<u8>,
}

/// tar.gz を先頭から走査し、`artifact` に一致する最初の通常ファイルを返す
///
/// 最後まで読んで一致がなければ `Ok(None)`。
pub fn find_entry(
    bundle: &[u8],
    artifact: &ArtifactId,
) -> Result<Option<BundleEntry>, BundleError> {
    let open = |e: std::io::Error| BundleError::Open(e.to_string());

    let mut archive = Archive::new(GzDecoder::new(bundle));
    for entry in archive.entries().map_err(open)? {
        let mut entry = entry.map_err(open)?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
        if artifact.matches_entry(&name) {
            debug!(entry = %name, %artifact, "bundle entry matched");
            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes).map_err(open)?;
            return Ok(Some(BundleEntry { name, bytes }));
        }
    }
    Ok(None)
}
