use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::client::{build_http, get_json};
use crate::endpoint;
use crate::error::ApiError;
use crate::traits::StreamSource;
use crate::types::StreamInfo;

/// Public Piped instance used when the config does not name one.
pub const DEFAULT_STREAMS_BASE: &str = "https://pipedapi.kavin.rocks";

/// Client for a Piped-compatible stream-info service (`/streams/{videoId}`).
#[derive(Debug, Clone)]
pub struct PipedClient {
    base: Url,
    http: Client,
}

impl PipedClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self {
            base: endpoint::parse_base(base_url)?,
            http: build_http(timeout)?,
        })
    }

    /// Full URL of the stream-info resource for a video id.
    pub fn streams_url(&self, trailer_id: &str) -> Result<Url, ApiError> {
        endpoint::join(&self.base, &endpoint::streams_path(trailer_id))
    }
}

impl StreamSource for PipedClient {
    type Error = ApiError;

    async fn streams(&self, trailer_id: &str) -> Result<StreamInfo, ApiError> {
        let url = self.streams_url(trailer_id)?;
        tracing::debug!(trailer_id, url = %url, "Stream info request");
        get_json(&self.http, url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streams_url() {
        let client = PipedClient::new(DEFAULT_STREAMS_BASE, Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.streams_url("qgQXH2pjcN0").unwrap().as_str(),
            "https://pipedapi.kavin.rocks/streams/qgQXH2pjcN0"
        );
    }
}
