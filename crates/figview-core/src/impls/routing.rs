//! RoutingSource - the default source: remote to HTTP, local to disk.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::Location;
use crate::ports::{ByteSource, FetchError};

use super::file::FileSource;
use super::http::HttpSource;

#[derive(Default)]
pub struct RoutingSource {
    http: HttpSource,
    file: FileSource,
}

impl RoutingSource {
    pub fn new(http_timeout: Option<Duration>) -> Self {
        Self {
            http: HttpSource::with_timeout(http_timeout),
            file: FileSource,
        }
    }
}

#[async_trait]
impl ByteSource for RoutingSource {
    async fn fetch(&self, location: &Location) -> Result<Vec<u8>, FetchError> {
        match location {
            Location::Remote(_) => self.http.fetch(location).await,
            Location::Local(_) => self.file.fetch(location).await,
        }
    }
}
