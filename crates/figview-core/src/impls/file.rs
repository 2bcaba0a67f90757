//! FileSource - local files (large bundles kept out of remote storage).

use async_trait::async_trait;
use tracing::debug;

use crate::domain::Location;
use crate::ports::{ByteSource, FetchError};

#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

#[async_trait]
impl ByteSource for FileSource {
    async fn fetch(&self, location: &Location) -> Result<Vec<u8>, FetchError> {
        let Location::Local(path) = location else {
            return Err(FetchError::Unsupported {
                location: location.to_string(),
            });
        };

        debug!(path = %path.display(), "read");
        tokio::fs::read(path).await.map_err(|e| FetchError::Io {
            location: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
