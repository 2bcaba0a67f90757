//! figview-core
//!
//! Figure lookup for the model/scenario results viewer.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（category, selection, store, caption, outcome, errors, ids）
//! - **ports**: 抽象化レイヤー（ByteSource, SelectionProvider, Clock）
//! - **impls**: ports の実装（HTTP, ローカルファイル, InMemory, ワークブック）
//! - **bundle**: 圧縮バンドル内のエントリ検索
//! - **app**: FigureResolver, ViewerBuilder, Session
//! - **config**: TOML 設定ファイル

pub mod domain;
pub mod ports;
pub mod impls;
pub mod bundle;
pub mod app;
pub mod config;

#[cfg(test)]
pub(crate) mod test_support;
