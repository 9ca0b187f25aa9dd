//! Async steps of the page: list loads, detail loads, trailer resolution
//! and the hover delay. Each returns plain values so the front end can
//! ship them across its message boundary.

use std::time::Duration;

use kaiten_api::types::{AnimeData, AnimeResult};
use kaiten_api::{DiscoveryService, ListKind, StreamSource};

use crate::config::TrailerConfig;

/// Fetch one list page and keep only its results.
pub async fn load_list<S: DiscoveryService>(
    service: &S,
    kind: ListKind,
    per_page: u32,
) -> Result<Vec<AnimeResult>, String> {
    service
        .list(kind, per_page)
        .await
        .map(|page| page.results)
        .map_err(|e| e.to_string())
}

pub async fn load_detail<S: DiscoveryService>(service: &S, id: &str) -> Result<AnimeData, String> {
    service.info(id).await.map_err(|e| e.to_string())
}

/// Look up the configured quality/format variant of a trailer.
///
/// Never fails: lookup errors are logged and yield `None`, which keeps the
/// cover on screen.
pub async fn resolve_trailer<T: StreamSource>(
    source: &T,
    trailer_id: &str,
    prefs: &TrailerConfig,
) -> Option<String> {
    if trailer_id.is_empty() {
        return None;
    }
    match source.streams(trailer_id).await {
        Ok(info) => {
            let url = info
                .select(&prefs.quality, &prefs.format)
                .map(str::to_string);
            if url.is_none() {
                tracing::debug!(
                    trailer_id,
                    quality = %prefs.quality,
                    format = %prefs.format,
                    "No matching trailer stream"
                );
            }
            url
        }
        Err(e) => {
            tracing::error!(trailer_id, error = %e, "Error fetching trailer");
            None
        }
    }
}

/// Sleep for the hover delay.
pub async fn hover_delay(delay: Duration) {
    tokio::time::sleep(delay).await;
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use kaiten_api::types::{AnimeInfo, StreamInfo};

    use super::*;
    use crate::cache::DetailCache;
    use crate::carousel::Effect;
    use crate::config::AppConfig;
    use crate::home::Home;
    use crate::hover::Media;

    #[derive(Debug, thiserror::Error)]
    #[error("fake failure")]
    struct FakeError;

    #[derive(Default)]
    struct FakeBackend {
        info_calls: AtomicUsize,
        fail_popular: bool,
    }

    impl DiscoveryService for FakeBackend {
        type Error = FakeError;

        async fn list(&self, kind: ListKind, per_page: u32) -> Result<AnimeInfo, FakeError> {
            if self.fail_popular && kind == ListKind::Popular {
                return Err(FakeError);
            }
            let results = (1..=per_page)
                .map(|i| {
                    serde_json::from_value(serde_json::json!({
                        "id": i.to_string(),
                        "cover": format!("https://img/{i}.jpg"),
                        "title": { "english": format!("Anime {i}") },
                        "trailer": { "id": format!("yt{i}") }
                    }))
                    .unwrap()
                })
                .collect();
            Ok(AnimeInfo {
                current_page: Some(1),
                has_next_page: Some(false),
                results,
            })
        }

        async fn info(&self, id: &str) -> Result<AnimeData, FakeError> {
            self.info_calls.fetch_add(1, Ordering::SeqCst);
            Ok(serde_json::from_value(serde_json::json!({
                "id": id,
                "totalEpisodes": 24,
                "type": "TV",
                "status": "Completed",
                "duration": 24
            }))
            .unwrap())
        }
    }

    struct FakeStreams {
        calls: AtomicUsize,
        streams: serde_json::Value,
        fail: bool,
    }

    impl FakeStreams {
        fn with(streams: serde_json::Value) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                streams,
                fail: false,
            }
        }
    }

    impl StreamSource for FakeStreams {
        type Error = FakeError;

        async fn streams(&self, _trailer_id: &str) -> Result<StreamInfo, FakeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FakeError);
            }
            Ok(serde_json::from_value(self.streams.clone()).unwrap())
        }
    }

    fn webm_1080() -> serde_json::Value {
        serde_json::json!({
            "videoStreams": [
                { "url": "https://cdn/720.webm", "quality": "720p", "format": "WEBM" },
                { "url": "https://cdn/1080.webm", "quality": "1080p", "format": "WEBM" }
            ]
        })
    }

    /// Drive every effect a carousel emits to completion, the way the front
    /// end does.
    async fn drive(
        home: &mut Home,
        kind: ListKind,
        mut effect: Effect,
        backend: &FakeBackend,
        streams: &FakeStreams,
        cache: &mut DetailCache,
        prefs: &TrailerConfig,
    ) {
        loop {
            let carousel = home.carousel_mut(kind).unwrap();
            effect = match effect {
                Effect::StartDelay { index, token } => {
                    hover_delay(Duration::from_millis(3000)).await;
                    carousel.delay_elapsed(index, token, cache)
                }
                Effect::FetchDetail { index, token, id } => {
                    let result = load_detail(backend, &id).await;
                    carousel.detail_loaded(index, token, result, cache)
                }
                Effect::FetchTrailer {
                    index,
                    token,
                    trailer_id,
                } => {
                    let url = resolve_trailer(streams, &trailer_id, prefs).await;
                    carousel.trailer_resolved(index, token, url);
                    Effect::None
                }
                Effect::Navigate(_) | Effect::None => return,
            };
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_to_end_hover_plays_trailer() {
        let config = AppConfig::default();
        let backend = FakeBackend::default();
        let streams = FakeStreams::with(webm_1080());
        let mut cache = DetailCache::new(config.cache.detail_capacity);
        let mut home = Home::new();

        for kind in ListKind::ALL {
            let result = load_list(&backend, *kind, config.api.per_page).await;
            home.list_loaded(*kind, result);
        }
        assert!(home.is_ready());
        assert!(home.carousels().iter().all(|c| c.len() == 30));

        // Slide with id=5 sits at index 4.
        let kind = ListKind::Trending;
        let effect = home.carousel_mut(kind).unwrap().hover_start(4);
        drive(&mut home, kind, effect, &backend, &streams, &mut cache, &config.trailer).await;

        assert_eq!(backend.info_calls.load(Ordering::SeqCst), 1);
        assert_eq!(streams.calls.load(Ordering::SeqCst), 1);
        let slide = home.carousel(kind).unwrap().slide(4).unwrap();
        assert_eq!(slide.item.id, "5");
        assert_eq!(slide.media(), Media::Trailer("https://cdn/1080.webm"));

        home.carousel_mut(kind).unwrap().hover_end(4);
        let slide = home.carousel(kind).unwrap().slide(4).unwrap();
        assert_eq!(slide.media(), Media::Cover);
        assert!(!slide.hover.is_hovered());
        assert!(slide.hover.detail().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_hover_uses_cached_detail() {
        let config = AppConfig::default();
        let backend = FakeBackend::default();
        let streams = FakeStreams::with(webm_1080());
        let mut cache = DetailCache::new(1);
        let mut home = Home::new();
        home.list_loaded(ListKind::Trending, load_list(&backend, ListKind::Trending, 3).await);

        for _ in 0..2 {
            let effect = home
                .carousel_mut(ListKind::Trending)
                .unwrap()
                .hover_start(0);
            drive(
                &mut home,
                ListKind::Trending,
                effect,
                &backend,
                &streams,
                &mut cache,
                &config.trailer,
            )
            .await;
            home.carousel_mut(ListKind::Trending).unwrap().hover_end(0);
        }

        assert_eq!(backend.info_calls.load(Ordering::SeqCst), 1);
        assert_eq!(streams.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_missing_stream_keeps_cover() {
        let config = AppConfig::default();
        let streams = FakeStreams::with(serde_json::json!({
            "videoStreams": [
                { "url": "https://cdn/1080.mp4", "quality": "1080p", "format": "MPEG_4" }
            ]
        }));
        assert_eq!(resolve_trailer(&streams, "yt1", &config.trailer).await, None);
    }

    #[tokio::test]
    async fn test_trailer_error_is_none() {
        let config = AppConfig::default();
        let mut streams = FakeStreams::with(webm_1080());
        streams.fail = true;
        assert_eq!(resolve_trailer(&streams, "yt1", &config.trailer).await, None);
        assert_eq!(streams.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_trailer_id_skips_lookup() {
        let config = AppConfig::default();
        let streams = FakeStreams::with(webm_1080());
        assert_eq!(resolve_trailer(&streams, "", &config.trailer).await, None);
        assert_eq!(streams.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_list_is_error_string() {
        let backend = FakeBackend {
            fail_popular: true,
            ..Default::default()
        };
        let mut home = Home::new();
        for kind in ListKind::ALL {
            home.list_loaded(*kind, load_list(&backend, *kind, 30).await);
        }
        assert!(!home.is_ready());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hover_delay_waits_full_duration() {
        let done = Arc::new(AtomicUsize::new(0));
        let flag = done.clone();
        let handle = tokio::spawn(async move {
            hover_delay(Duration::from_secs(3)).await;
            flag.store(1, Ordering::SeqCst);
        });

        tokio::time::advance(Duration::from_millis(2900)).await;
        tokio::task::yield_now().await;
        assert_eq!(done.load(Ordering::SeqCst), 0);

        tokio::time::advance(Duration::from_millis(100)).await;
        handle.await.unwrap();
        assert_eq!(done.load(Ordering::SeqCst), 1);
    }
}
