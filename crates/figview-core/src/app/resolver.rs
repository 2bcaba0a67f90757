//! FigureResolver - (category, selection) から図を探す
//!
//! # 手順
//! 1. カテゴリの保存先とテンプレートを Catalog から引く
//! 2. テンプレートから ArtifactId を組み立てる
//! 3. 保存先からバイト列を取得（単体ファイル or バンドル）
//! 4. バンドルなら区切り文字を正規化してエントリを検索
//! 5. 画像としてデコード（失敗は ARTIFACT_CORRUPT）
//! 6. キャプションを完全一致で付与
//!
//! どの失敗も ResolutionOutcome に変換し、呼び出し側には返しません。

use image::GenericImageView;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::bundle::{self, BundleEntry, BundleError};
use crate::domain::{
    ArtifactId, CaptionTable, Catalog, Category, Figure, Location, ResolutionOutcome,
    ResolveError, Selection, StoreDescriptor,
};
use crate::ports::ByteSource;

/// FigureResolver はカテゴリと選択から図を探してデコードする
///
/// 可変状態は持たない。バイト列は呼び出しごとに取得して破棄する。
pub struct FigureResolver {
    catalog: Catalog,
    captions: CaptionTable,
    source: Arc<dyn ByteSource>,
}

impl FigureResolver {
    /// Prefer `ViewerBuilder`, which checks the catalog covers every category.
    pub fn new(catalog: Catalog, captions: CaptionTable, source: Arc<dyn ByteSource>) -> Self {
        Self {
            catalog,
            captions,
            source,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolve one category. Never fails; failures come back as outcomes.
    pub async fn resolve(&self, category: Category, selection: &Selection) -> ResolutionOutcome {
        let Some(entry) = self.catalog.get(category) else {
            let artifact = category.canonical_template().render(selection);
            let error = ResolveError::StoreUnavailable {
                location: category.to_string(),
                reason: "no store configured".to_string(),
            };
            warn!(%category, %artifact, %error, "figure unavailable");
            return ResolutionOutcome::failed(category, artifact, &error);
        };

        let artifact = entry.template.render(selection);
        let decoded = match self.locate(&entry.store, &artifact).await {
            Ok((name, bytes)) => decode_blocking(&artifact, name, bytes).await,
            Err(error) => Err(error),
        };
        match decoded {
            Ok(mut figure) => {
                figure.label = selection.label();
                figure.caption = self.captions.get(category).map(str::to_string);
                debug!(%category, %artifact, entry = %figure.entry, "figure found");
                ResolutionOutcome::found(category, artifact, figure)
            }
            Err(error) => {
                warn!(%category, %artifact, %error, "figure unavailable");
                ResolutionOutcome::failed(category, artifact, &error)
            }
        }
    }

    /// Raw bytes of the artifact and the name they were found under.
    async fn locate(
        &self,
        store: &StoreDescriptor,
        artifact: &ArtifactId,
    ) -> Result<(String, Vec<u8>), ResolveError> {
        let location = store.locate(artifact);
        match store {
            StoreDescriptor::RemoteFile { .. } => {
                // Existence is decided by the fetch alone.
                let bytes = self.source.fetch(&location).await.map_err(|e| {
                    ResolveError::ArtifactNotFound {
                        artifact: artifact.clone(),
                        location: location.to_string(),
                        reason: e.to_string(),
                    }
                })?;
                Ok((location.to_string(), bytes))
            }
            StoreDescriptor::RemoteBundle { .. } | StoreDescriptor::LocalBundle { .. } => {
                let entry = self.search_bundle(&location, artifact).await?;
                Ok((entry.name, entry.bytes))
            }
        }
    }

    async fn search_bundle(
        &self,
        location: &Location,
        artifact: &ArtifactId,
    ) -> Result<BundleEntry, ResolveError> {
        let unavailable = |reason: String| ResolveError::StoreUnavailable {
            location: location.to_string(),
            reason,
        };

        let data = self
            .source
            .fetch(location)
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        let wanted = artifact.clone();
        let found = tokio::task::spawn_blocking(move || bundle::find_entry(&data, &wanted))
            .await
            .map_err(|e| unavailable(format!("bundle scan failed: {e}")))?
            .map_err(|BundleError::Open(reason)| unavailable(reason))?;

        found.ok_or_else(|| ResolveError::ArtifactNotFound {
            artifact: artifact.clone(),
            location: location.to_string(),
            reason: "no matching entry in bundle".to_string(),
        })
    }
}

/// デコードはブロッキングスレッドで行う（バンドル走査と同じ扱い）
async fn decode_blocking(
    artifact: &ArtifactId,
    entry: String,
    bytes: Vec<u8>,
) -> Result<Figure, ResolveError> {
    let wanted = artifact.clone();
    tokio::task::spawn_blocking(move || decode(&wanted, entry, bytes))
        .await
        .unwrap_or_else(|e| {
            Err(ResolveError::ArtifactCorrupt {
                artifact: artifact.clone(),
                reason: format!("decoder task failed: {e}"),
            })
        })
}

/// バイト列を画像としてデコードし、形式とサイズを読む
///
/// `label` と `caption` は呼び出し側で埋める。
fn decode(artifact: &ArtifactId, entry: String, bytes: Vec<u8>) -> Result<Figure, ResolveError> {
    let corrupt = |reason: String| ResolveError::ArtifactCorrupt {
        artifact: artifact.clone(),
        reason,
    };

    let format = image::guess_format(&bytes).map_err(|e| corrupt(e.to_string()))?;
    let decoded =
        image::load_from_memory_with_format(&bytes, format).map_err(|e| corrupt(e.to_string()))?;
    let (width, height) = decoded.dimensions();

    Ok(Figure {
        entry,
        format: format
            .extensions_str()
            .first()
            .copied()
            .unwrap_or("unknown")
            .to_string(),
        width,
        height,
        bytes,
        label: String::new(),
        caption: None,
    })
}
