//! Display sink boundary
//!
//! The scheduler hands each encoded frame to a [`DisplaySink`] and depends
//! on nothing beyond that one call. The sink side owns the resource
//! locator format the surface expects.

use crate::assets::JPEG_DATA_URI_PREFIX;
use async_trait::async_trait;
use log::warn;
use tokio::io::AsyncWriteExt;

/// Build the locator a display element can use as its source attribute.
pub fn jpeg_data_uri(encoded: &str) -> String {
    let mut uri = String::with_capacity(JPEG_DATA_URI_PREFIX.len() + encoded.len());
    uri.push_str(JPEG_DATA_URI_PREFIX);
    uri.push_str(encoded);
    uri
}

/// Consumer of encoded frames.
///
/// Implementations schedule the actual visual update themselves; the
/// scheduler only guarantees frames arrive one at a time, in fetch
/// completion order.
#[async_trait]
pub trait DisplaySink: Send + Sync {
    /// Hand one encoded frame to the surface.
    async fn show(&self, encoded: &str);
}

/// Writes one `data:image/jpeg;base64,...` locator per line to stdout,
/// for piping into whatever drives the actual image element.
pub struct ConsoleSink;

#[async_trait]
impl DisplaySink for ConsoleSink {
    async fn show(&self, encoded: &str) {
        let mut line = jpeg_data_uri(encoded);
        line.push('\n');

        let mut stdout = tokio::io::stdout();
        if let Err(e) = stdout.write_all(line.as_bytes()).await {
            warn!("display write failed: {}", e);
            return;
        }
        if let Err(e) = stdout.flush().await {
            warn!("display flush failed: {}", e);
        }
    }
}
