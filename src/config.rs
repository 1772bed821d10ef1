use crate::assets::{DEFAULT_STREAM_URL, FRAME_DELAY_MS, REQUEST_TIMEOUT_SECS};
use anyhow::Context;
use reqwest::Url;
use std::time::Duration;

/// Runtime configuration for the frame feed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Endpoint serving one complete JPEG frame per GET.
    pub stream_url: Url,
    /// Pause between a completed cycle and the next request.
    pub frame_delay: Duration,
    /// Per-request client timeout.
    pub request_timeout: Duration,
}

impl Config {
    /// Configuration with the stock timing against the given endpoint.
    pub fn new(stream_url: Url) -> Self {
        Config {
            stream_url,
            frame_delay: Duration::from_millis(FRAME_DELAY_MS),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }

    /// Configuration against the stock endpoint.
    pub fn with_default_url() -> anyhow::Result<Self> {
        let url = DEFAULT_STREAM_URL
            .parse()
            .context("default stream url is malformed")?;
        Ok(Self::new(url))
    }

    /// Override the inter-cycle delay.
    pub fn with_frame_delay(mut self, delay: Duration) -> Self {
        self.frame_delay = delay;
        self
    }

    /// Override the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Returns a version as specified in Cargo.toml
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub fn app_name() -> &'static str {
    env!("CARGO_PKG_NAME")
}
