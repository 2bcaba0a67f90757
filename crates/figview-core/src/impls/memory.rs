//! InMemorySource - 決定的なバイトソース（テスト・オフライン用）
//!
//! Location の文字列表現をキーに、バイト列または FetchError を返します。
//! 受け取った要求は順番に記録されます。

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::domain::Location;
use crate::ports::{ByteSource, FetchError};

/// InMemorySource はメモリ上のバイト列を返す
///
/// # 使用例
/// ```ignore
/// let source = InMemorySource::new()
///     .with_bytes("https://h/Resource_images/Fig.png", png)
///     .with_failure("https://h/Motor_images.tar.gz", FetchError::Status { .. });
/// ```
#[derive(Default)]
pub struct InMemorySource {
    entries: Mutex<HashMap<String, Result<Vec<u8>, FetchError>>>,
    requests: Mutex<Vec<String>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bytes(self, location: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(location, Ok(bytes));
        self
    }

    pub fn with_failure(self, location: impl Into<String>, error: FetchError) -> Self {
        self.insert(location, Err(error));
        self
    }

    pub fn insert(&self, location: impl Into<String>, result: Result<Vec<u8>, FetchError>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(location.into(), result);
    }

    /// Locations requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ByteSource for InMemorySource {
    async fn fetch(&self, location: &Location) -> Result<Vec<u8>, FetchError> {
        let key = location.to_string();
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(key.clone());

        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.get(&key) {
            Some(result) => result.clone(),
            None => Err(FetchError::Missing { location: key }),
        }
    }
}
