//! Frame acquisition
//!
//! One request, one complete frame: `fetch` suspends until the whole
//! payload is in memory or fails with a [`TransportError`]. There is no
//! chunked or streaming decode of an in-progress response; the playback
//! loop issues the next request only after the previous one has finished.

use crate::config::Config;
use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;

/// Failure of a single frame request.
///
/// Never fatal: the playback loop logs it, skips the cycle and keeps going.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status: {0}")]
    Status(StatusCode),
}

/// A source of complete binary frames.
///
/// The seam between the playback loop and the camera service; tests drive
/// the loop with in-memory sources.
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Fetch one complete frame.
    async fn fetch(&self) -> Result<Bytes, TransportError>;
}

/// Pulls JPEG stills from the camera service, one GET per frame.
pub struct HttpFrameSource {
    client: Client,
    url: Url,
}

impl HttpFrameSource {
    /// Build the source with a single reusable client.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("http client build failed")?;

        Ok(Self {
            client,
            url: config.stream_url.clone(),
        })
    }
}

#[async_trait]
impl FrameSource for HttpFrameSource {
    async fn fetch(&self) -> Result<Bytes, TransportError> {
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        Ok(response.bytes().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response on a local port.
    async fn serve_once(status_line: &'static str, body: &'static [u8]) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            // Drain the request head before answering.
            let mut head = Vec::new();
            let mut buf = [0u8; 512];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                head.extend_from_slice(&buf[..n]);
                if n == 0 || head.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }

            let header = format!(
                "{}\r\nContent-Type: image/jpeg\r\nContent-Length: {}\r\n\r\n",
                status_line,
                body.len()
            );
            socket.write_all(header.as_bytes()).await.unwrap();
            socket.write_all(body).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}/video_stream", addr).parse().unwrap()
    }

    fn test_config(url: Url) -> Config {
        Config {
            stream_url: url,
            frame_delay: Duration::from_millis(100),
            request_timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn test_fetch_returns_complete_body() {
        let body: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];
        let url = serve_once("HTTP/1.1 200 OK", body).await;

        let source = HttpFrameSource::new(&test_config(url)).unwrap();
        let frame = source.fetch().await.unwrap();

        assert_eq!(&frame[..], body);
    }

    #[tokio::test]
    async fn test_fetch_reports_non_success_status() {
        let url = serve_once("HTTP/1.1 503 Service Unavailable", b"camera offline").await;

        let source = HttpFrameSource::new(&test_config(url)).unwrap();
        let err = source.fetch().await.unwrap_err();

        match err {
            TransportError::Status(status) => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE)
            }
            other => panic!("expected status error, got {}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_reports_connection_failure() {
        // Nothing listens here; bind-then-drop frees the port.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url: Url = format!("http://{}/video_stream", listener.local_addr().unwrap())
            .parse()
            .unwrap();
        drop(listener);

        let source = HttpFrameSource::new(&test_config(url)).unwrap();
        assert!(matches!(
            source.fetch().await,
            Err(TransportError::Request(_))
        ));
    }
}
