//! App - アプリケーション層
//!
//! ports を組み合わせてビューアの処理を実装します。
//!
//! # 主要コンポーネント
//! - **FigureResolver**: カテゴリ 1 つ分の図の解決
//! - **ViewerBuilder**: 構築とワイヤリング（起動時検証）
//! - **Session**: セッション単位の状態と描画サイクル
//! - **RenderReport**: 1 回の描画結果

pub mod resolver;
pub mod builder;
pub mod session;
pub mod report;

// 主要な型を再エクスポート
pub use self::resolver::FigureResolver;
pub use self::builder::{BuildError, ViewerBuilder};
pub use self::session::Session;
pub use self::report::{OutcomeCounts, RenderReport};
