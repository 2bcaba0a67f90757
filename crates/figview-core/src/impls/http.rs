//! HttpSource - remote figures, bundles and workbooks over HTTP(S).

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::domain::Location;
use crate::ports::{ByteSource, FetchError};

/// HttpSource はリモートの Location を GET で取得
///
/// ローカルパスは `Unsupported`。タイムアウトは指定した場合のみ。
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new() -> Self {
        Self::with_timeout(None)
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|_| Client::new());
        Self { client }
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ByteSource for HttpSource {
    async fn fetch(&self, location: &Location) -> Result<Vec<u8>, FetchError> {
        let Location::Remote(url) = location else {
            return Err(FetchError::Unsupported {
                location: location.to_string(),
            });
        };

        debug!(%url, "GET");
        let transport = |e: reqwest::Error| FetchError::Transport {
            location: url.clone(),
            reason: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                location: url.clone(),
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(transport)?;
        debug!(%url, len = bytes.len(), "fetched");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// 1 回だけ応答するローカルサーバを立て、その URL を返す
    async fn serve_once(status_line: &'static str, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let head = format!(
                "{status_line}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
                body.len()
            );
            stream.write_all(head.as_bytes()).await.unwrap();
            stream.write_all(body).await.unwrap();
        });
        format!("http://{addr}/Resource_images/Fig_Resource_IMAGE%20-%20SSP2.png")
    }

    #[tokio::test]
    async fn non_success_status_is_a_status_error() {
        let url = serve_once("HTTP/1.1 404 Not Found", b"").await;
        let err = HttpSource::new()
            .fetch(&Location::Remote(url.clone()))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            FetchError::Status {
                location: url,
                status: 404
            }
        );
    }

    #[tokio::test]
    async fn success_returns_the_body() {
        let url = serve_once("HTTP/1.1 200 OK", b"png-bytes").await;
        let bytes = HttpSource::new()
            .fetch(&Location::Remote(url))
            .await
            .unwrap();
        assert_eq!(bytes, b"png-bytes");
    }

    #[tokio::test]
    async fn local_locations_are_unsupported() {
        let source = HttpSource::new();
        let err = source
            .fetch(&Location::Local(PathBuf::from("bundles/x.tar.gz")))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Unsupported { .. }));
    }

    #[tokio::test]
    async fn refused_connection_is_a_transport_error() {
        let source = HttpSource::with_timeout(Some(Duration::from_secs(5)));
        let err = source
            .fetch(&Location::Remote("http://127.0.0.1:1/Fig.png".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }
}
