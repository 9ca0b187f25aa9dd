//! Cloneable handle to the network backends, passed into async tasks.

use std::time::Duration;

use url::Url;

use kaiten_api::{endpoint, ApiError, DiscoveryClient, PipedClient};
use kaiten_core::config::{AppConfig, TrailerConfig};

#[derive(Debug, Clone)]
pub struct Services {
    pub discovery: DiscoveryClient,
    pub streams: PipedClient,
    pub trailer: TrailerConfig,
    pub hover_delay: Duration,
    pub per_page: u32,
    site: Url,
}

impl Services {
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        let timeout = config.request_timeout();
        Ok(Self {
            discovery: DiscoveryClient::new(&config.api.base_url, timeout)?,
            streams: PipedClient::new(&config.trailer.streams_base_url, timeout)?,
            trailer: config.trailer.clone(),
            hover_delay: config.hover_delay(),
            per_page: config.api.per_page,
            site: endpoint::parse_base(&config.site.base_url)?,
        })
    }

    /// Absolute URL of a site route such as `/info/5`.
    pub fn site_url(&self, route: &str) -> Result<Url, ApiError> {
        endpoint::join(&self.site, route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_config() {
        let services = Services::from_config(&AppConfig::default()).unwrap();
        assert_eq!(services.per_page, 30);
        assert_eq!(services.hover_delay, Duration::from_secs(3));
        assert_eq!(services.trailer.format, "WEBM");
    }

    #[test]
    fn test_site_url_keeps_base_path() {
        let mut config = AppConfig::default();
        config.site.base_url = "https://anime.example/app".into();
        let services = Services::from_config(&config).unwrap();
        assert_eq!(
            services.site_url("/info/5").unwrap().as_str(),
            "https://anime.example/app/info/5"
        );
    }

    #[test]
    fn test_bad_backend_url() {
        let mut config = AppConfig::default();
        config.api.base_url = "not a url".into();
        assert!(Services::from_config(&config).is_err());
    }
}
