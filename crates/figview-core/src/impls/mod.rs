//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **HttpSource**: reqwest による HTTP 取得
//! - **FileSource**: ローカルファイルの読み込み
//! - **RoutingSource**: Location に応じて HttpSource / FileSource に振り分け（既定）
//! - **InMemorySource**: テスト・オフライン用の決定的なソース
//! - **WorkbookSelections**: ワークブックからモデル・シナリオ一覧を読む

pub mod http;
pub mod file;
pub mod routing;
pub mod memory;
pub mod workbook;

// 主要な型を再エクスポート
pub use self::http::HttpSource;
pub use self::file::FileSource;
pub use self::routing::RoutingSource;
pub use self::memory::InMemorySource;
pub use self::workbook::WorkbookSelections;
