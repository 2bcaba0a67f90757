//! SelectionProvider port - モデル・シナリオ一覧の取得

use async_trait::async_trait;

use crate::domain::{SelectionLists, SelectionLoadError};

/// SelectionProvider はドロップダウンに出す一覧を返す
///
/// セッション開始時に一度だけ呼ばれます。失敗は致命的です。
#[async_trait]
pub trait SelectionProvider: Send + Sync {
    async fn load_selections(&self) -> Result<SelectionLists, SelectionLoadError>;
}
