//! ViewerBuilder - FigureResolver の構築とワイヤリング
//!
//! # Fail-fast 設計
//! - expect_categories() で描画するカテゴリを設定（既定は全カテゴリ）
//! - build() 時に「期待集合 ⊆ Catalog のカテゴリ」をチェック
//! - 不足があれば BuildError を返す

use std::sync::Arc;

use crate::domain::{CaptionTable, Catalog, Category};
use crate::ports::ByteSource;

use super::resolver::FigureResolver;

/// ViewerBuilder は FigureResolver を構築
///
/// # 使用例
/// ```ignore
/// let resolver = ViewerBuilder::new()
///     .catalog(Catalog::canonical(base_url))
///     .source(Arc::new(RoutingSource::new(None)))
///     .build()?;
/// ```
pub struct ViewerBuilder {
    catalog: Catalog,
    captions: CaptionTable,
    source: Option<Arc<dyn ByteSource>>,
    expected: Vec<Category>,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing stores for categories: {0:?}. These categories are rendered but have no catalog entry.")]
    MissingStores(Vec<Category>),

    #[error("No byte source configured")]
    MissingSource,
}

impl ViewerBuilder {
    /// Empty catalog, standard captions, every category expected.
    pub fn new() -> Self {
        Self {
            catalog: Catalog::new(),
            captions: CaptionTable::standard(),
            source: None,
            expected: Category::ALL.to_vec(),
        }
    }

    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn captions(mut self, captions: CaptionTable) -> Self {
        self.captions = captions;
        self
    }

    pub fn source(mut self, source: Arc<dyn ByteSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn expect_categories(mut self, categories: &[Category]) -> Self {
        self.expected = categories.to_vec();
        self
    }

    pub fn build(self) -> Result<FigureResolver, BuildError> {
        let missing = self.catalog.missing(&self.expected);
        if !missing.is_empty() {
            return Err(BuildError::MissingStores(missing));
        }
        let source = self.source.ok_or(BuildError::MissingSource)?;
        Ok(FigureResolver::new(self.catalog, self.captions, source))
    }
}

impl Default for ViewerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
