//! Ports - 抽象化レイヤー
//!
//! 各 trait は外部システム（HTTP, ファイルシステム, ワークブック, 時刻）への
//! インターフェースを提供し、実装の詳細を隠蔽します。
//! テストでは InMemorySource や FixedClock に差し替えます。

pub mod byte_source;
pub mod selection_provider;
pub mod clock;

// 主要な trait を再エクスポート
pub use self::byte_source::{ByteSource, FetchError};
pub use self::selection_provider::SelectionProvider;
pub use self::clock::{Clock, FixedClock, SystemClock};
