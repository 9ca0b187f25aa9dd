use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::endpoint::{self, Endpoint};
use crate::error::ApiError;
use crate::traits::{DiscoveryService, ListKind};
use crate::types::{AnimeData, AnimeInfo};

const USER_AGENT: &str = concat!("kaiten/", env!("CARGO_PKG_VERSION"));

/// Client for the discovery backend (`/api/trending`, `/api/popular`, `/api/info`).
#[derive(Debug, Clone)]
pub struct DiscoveryClient {
    base: Url,
    http: Client,
}

impl DiscoveryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self {
            base: endpoint::parse_base(base_url)?,
            http: build_http(timeout)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, ApiError> {
        let url = endpoint.resolve(&self.base)?;
        tracing::debug!(endpoint = %endpoint, "Discovery request");
        get_json(&self.http, url).await
    }
}

impl DiscoveryService for DiscoveryClient {
    type Error = ApiError;

    async fn list(&self, kind: ListKind, per_page: u32) -> Result<AnimeInfo, ApiError> {
        self.get(&Endpoint::list(kind, per_page)).await
    }

    async fn info(&self, id: &str) -> Result<AnimeData, ApiError> {
        self.get(&Endpoint::info(id)).await
    }
}

/// Shared HTTP client construction for both services.
pub(crate) fn build_http(timeout: Duration) -> Result<Client, ApiError> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?)
}

/// GET a URL and decode the JSON body, mapping non-2xx into [`ApiError::Api`].
pub(crate) async fn get_json<T: DeserializeOwned>(http: &Client, url: Url) -> Result<T, ApiError> {
    let resp = http
        .get(url.clone())
        .header("Accept", "application/json")
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let status_code = status.as_u16();
        let body = resp.text().await.unwrap_or_default();
        tracing::warn!(url = %url, status = status_code, "API error");
        return Err(ApiError::Api {
            status: status_code,
            message: body,
        });
    }

    tracing::debug!(url = %url, status = %status, "Response received");
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}
