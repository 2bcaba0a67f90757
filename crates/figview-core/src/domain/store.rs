//! Store - 図の保存先（backing store）の記述
//!
//! # 保存先の種類
//! - **remote_file**: 図を 1 枚ずつ HTTP で取得
//! - **remote_bundle**: HTTP で取得する tar.gz バンドル
//! - **local_bundle**: ローカルに置いた tar.gz バンドル（大きすぎてリモートに置けないもの）

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use super::category::{ArtifactId, Category, NamingTemplate};

/// Location はバイト列の取得元（HTTP(S) の URL かファイルパス）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Location {
    Remote(String),
    Local(PathBuf),
}

impl Location {
    /// `http://` and `https://` are remote, anything else is a path.
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Location::Remote(value.to_string())
        } else {
            Location::Local(PathBuf::from(value))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Location::Remote(_))
    }
}

impl From<String> for Location {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.to_string()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Remote(url) => f.write_str(url),
            Location::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Flat classification of a store, for logs and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    RemoteFile,
    RemoteBundle,
    LocalBundle,
}

/// StoreDescriptor はカテゴリ 1 つ分の保存先
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreDescriptor {
    /// One request per figure: `base_url/<artifact>`.
    RemoteFile { base_url: String },

    /// A tar.gz bundle downloaded over HTTP.
    RemoteBundle { url: String },

    /// A tar.gz bundle read from disk.
    LocalBundle { path: PathBuf },
}

impl StoreDescriptor {
    pub fn kind(&self) -> StoreKind {
        match self {
            StoreDescriptor::RemoteFile { .. } => StoreKind::RemoteFile,
            StoreDescriptor::RemoteBundle { .. } => StoreKind::RemoteBundle,
            StoreDescriptor::LocalBundle { .. } => StoreKind::LocalBundle,
        }
    }

    /// Location of the bundle, or of the figure itself for single-file stores.
    pub fn locate(&self, artifact: &ArtifactId) -> Location {
        match self {
            StoreDescriptor::RemoteFile { base_url } => {
                Location::Remote(join_url(base_url, artifact.as_str()))
            }
            StoreDescriptor::RemoteBundle { url } => Location::Remote(url.clone()),
            StoreDescriptor::LocalBundle { path } => Location::Local(path.clone()),
        }
    }
}

/// Join a base URL and a relative path with exactly one `/`.
pub fn join_url(base: &str, relative: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        relative.trim_start_matches('/')
    )
}

/// Store and naming template of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub store: StoreDescriptor,
    pub template: NamingTemplate,
}

impl CatalogEntry {
    pub fn new(store: StoreDescriptor, template: NamingTemplate) -> Self {
        Self { store, template }
    }
}

/// Catalog はカテゴリごとの保存先とテンプレートの表
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: BTreeMap<Category, CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every category served file by file from `<base_url>/<Folder>_images`,
    /// with its canonical template.
    pub fn canonical(base_url: &str) -> Self {
        Category::ALL
            .into_iter()
            .fold(Self::new(), |catalog, category| {
                catalog.with_entry(
                    category,
                    CatalogEntry::new(
                        StoreDescriptor::RemoteFile {
                            base_url: join_url(base_url, category.folder()),
                        },
                        category.canonical_template(),
                    ),
                )
            })
    }

    pub fn with_entry(mut self, category: Category, entry: CatalogEntry) -> Self {
        self.insert(category, entry);
        self
    }

    pub fn insert(&mut self, category: Category, entry: CatalogEntry) {
        self.entries.insert(category, entry);
    }

    pub fn get(&self, category: Category) -> Option<&CatalogEntry> {
        self.entries.get(&category)
    }

    /// Expected categories with no entry, in the order given.
    pub fn missing(&self, expected: &[Category]) -> Vec<Category> {
        expected
            .iter()
            .copied()
            .filter(|c| !self.entries.contains_key(c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_parse_distinguishes_remote_and_local() {
        assert!(Location::parse("https://example.org/a.xlsx").is_remote());
        assert!(Location::parse("http://example.org/a.xlsx").is_remote());
        assert_eq!(
            Location::parse("data/Scope of the study.xlsx"),
            Location::Local(PathBuf::from("data/Scope of the study.xlsx"))
        );
    }

    #[test]
    fn join_url_uses_a_single_separator() {
        assert_eq!(
            join_url("https://h/main/", "/Resource_images"),
            "https://h/main/Resource_images"
        );
        assert_eq!(join_url("https://h/main", "x.png"), "https://h/main/x.png");
    }

    #[test]
    fn canonical_catalog_covers_all_categories() {
        let catalog = Catalog::canonical("https://h/main");
        assert!(catalog.missing(&Category::ALL).is_empty());

        let entry = catalog.get(Category::MotorComparison).unwrap();
        assert_eq!(
            entry.store,
            StoreDescriptor::RemoteFile {
                base_url: "https://h/main/Motor_images".to_string()
            }
        );
        let id = ArtifactId::new("Fig_MotorComparison_X - Y.png");
        assert_eq!(
            entry.store.locate(&id),
            Location::Remote("https://h/main/Motor_images/Fig_MotorComparison_X - Y.png".into())
        );
    }

    #[test]
    fn bundle_stores_locate_the_bundle() {
        let id = ArtifactId::new("Fig.png");
        let local = StoreDescriptor::LocalBundle {
            path: PathBuf::from("bundles/Battery_images.tar.gz"),
        };
        assert_eq!(local.kind(), StoreKind::LocalBundle);
        assert_eq!(
            local.locate(&id),
            Location::Local(PathBuf::from("bundles/Battery_images.tar.gz"))
        );
    }

    #[test]
    fn missing_reports_uncovered_categories() {
        let catalog = Catalog::new().with_entry(
            Category::Mining,
            CatalogEntry::new(
                StoreDescriptor::RemoteBundle {
                    url: "https://h/Mining_images.tar.gz".into(),
                },
                Category::Mining.canonical_template(),
            ),
        );
        assert_eq!(
            catalog.missing(&[Category::Resource, Category::Mining, Category::BatteryComparison]),
            vec![Category::Resource, Category::BatteryComparison]
        );
    }
}
