//! HTTP GET with status checking.
//!
//! A failed request or a non-2xx status is returned to the caller as-is;
//! there is no retry loop.

use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::error::{IngestionError, Result};

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(30))
            .user_agent(concat!("hdwx-forecast-products/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(IngestionError::Client)?;
        Ok(Self { client })
    }

    /// Fetch a resource as raw bytes.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_bytes(&self, url: &str) -> Result<Bytes> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| IngestionError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestionError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| IngestionError::Http {
            url: url.to_string(),
            source,
        })?;
        debug!(bytes = body.len(), "Fetched");
        Ok(body)
    }

    /// Fetch a resource as text, replacing invalid UTF-8.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let body = self.get_bytes(url).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        format!("http://{}/product", addr)
    }

    #[tokio::test]
    async fn test_get_text_success() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 10\r\nConnection: close\r\n\r\nHIGHS 1030",
        )
        .await;
        let fetcher = HttpFetcher::new().unwrap();
        let body = fetcher.get_text(&url).await.unwrap();
        assert!(body.starts_with("HIGHS 1030"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let url =
            serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                .await;
        let fetcher = HttpFetcher::new().unwrap();
        match fetcher.get_bytes(&url).await {
            Err(IngestionError::Status { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_error() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = HttpFetcher::with_timeout(Duration::from_secs(5)).unwrap();
        let result = fetcher.get_bytes(&format!("http://{}/x", addr)).await;
        assert!(matches!(result, Err(IngestionError::Http { .. })));
    }
}
