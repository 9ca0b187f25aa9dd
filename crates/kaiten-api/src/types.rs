use serde::{Deserialize, Deserializer, Serialize};

// ── List responses ──────────────────────────────────────────────

/// A page of list results (`/api/trending`, `/api/popular`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeInfo {
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub has_next_page: Option<bool>,
    pub results: Vec<AnimeResult>,
}

/// One list entry, rendered as a single slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeResult {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub title: AnimeTitle,
    #[serde(default, deserialize_with = "lenient_year")]
    pub release_date: Option<u32>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub trailer: Option<Trailer>,
    #[serde(default)]
    pub total_episodes: Option<u32>,
    #[serde(default, rename = "type")]
    pub media_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub rating: Option<u32>,
}

impl AnimeResult {
    /// Best image to show on the slide: the wide cover, then the poster.
    pub fn cover_url(&self) -> Option<&str> {
        self.cover.as_deref().or(self.image.as_deref())
    }

    /// Trailer video id, if the entry carries a non-empty one.
    pub fn trailer_id(&self) -> Option<&str> {
        self.trailer
            .as_ref()
            .and_then(|t| t.id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// A single title with language variants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimeTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
}

impl AnimeTitle {
    /// Heading title: English first, as the slide caption shows it.
    pub fn display(&self) -> &str {
        self.english
            .as_deref()
            .or(self.romaji.as_deref())
            .or(self.native.as_deref())
            .unwrap_or("Unknown")
    }
}

/// Trailer reference attached to a list entry or detail record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trailer {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

// ── Detail response ─────────────────────────────────────────────

/// Detailed record from `/api/info?id={id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeData {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: Option<AnimeTitle>,
    #[serde(default)]
    pub total_episodes: Option<u32>,
    #[serde(default, rename = "type")]
    pub media_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub rating: Option<u32>,
    #[serde(default)]
    pub trailer: Option<Trailer>,
}

// ── Stream info (trailer) ───────────────────────────────────────

/// Response of the stream-info service for one video id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub video_streams: Vec<VideoStream>,
}

/// One encoded variant of a video.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStream {
    pub url: String,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub video_only: Option<bool>,
}

impl StreamInfo {
    /// URL of the first stream matching both `quality` and `format` exactly.
    pub fn select(&self, quality: &str, format: &str) -> Option<&str> {
        self.video_streams
            .iter()
            .find(|s| s.quality.as_deref() == Some(quality) && s.format.as_deref() == Some(format))
            .map(|s| s.url.as_str())
    }
}

// ── Lenient field decoding ──────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}

/// Release year arrives as `2023`, `"2023"`, or null depending on the backend.
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<StringOrNumber>::deserialize(deserializer)? {
        Some(StringOrNumber::String(s)) => s.trim().parse().ok(),
        Some(StringOrNumber::Number(n)) => n.as_u64().and_then(|y| u32::try_from(y).ok()),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_trending_page() {
        let json = r##"{
            "currentPage": 1,
            "hasNextPage": true,
            "results": [
                {
                    "id": "154587",
                    "malId": 52991,
                    "title": {
                        "romaji": "Sousou no Frieren",
                        "english": "Frieren: Beyond Journey's End",
                        "native": "葬送のフリーレン"
                    },
                    "image": "https://s4.anilist.co/file/anilistcdn/media/anime/cover/large/bx154587.jpg",
                    "cover": "https://s4.anilist.co/file/anilistcdn/media/anime/banner/154587.jpg",
                    "trailer": { "id": "qgQXH2pjcN0", "site": "youtube", "thumbnail": "https://i.ytimg.com/vi/qgQXH2pjcN0/hqdefault.jpg" },
                    "color": "#e4a15d",
                    "releaseDate": 2023,
                    "totalEpisodes": 28,
                    "rating": 91,
                    "duration": 24,
                    "type": "TV",
                    "status": "Completed"
                }
            ]
        }"##;

        let page: AnimeInfo = serde_json::from_str(json).unwrap();
        assert_eq!(page.current_page, Some(1));
        assert_eq!(page.results.len(), 1);

        let item = &page.results[0];
        assert_eq!(item.id, "154587");
        assert_eq!(item.title.display(), "Frieren: Beyond Journey's End");
        assert_eq!(item.release_date, Some(2023));
        assert_eq!(item.trailer_id(), Some("qgQXH2pjcN0"));
        assert_eq!(item.media_type.as_deref(), Some("TV"));
        assert_eq!(
            item.cover_url(),
            Some("https://s4.anilist.co/file/anilistcdn/media/anime/banner/154587.jpg")
        );
    }

    #[test]
    fn test_numeric_id_and_string_year() {
        let json = r#"{ "id": 5, "title": { "romaji": "Cowboy Bebop" }, "releaseDate": "1998" }"#;
        let item: AnimeResult = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "5");
        assert_eq!(item.release_date, Some(1998));
        assert_eq!(item.title.display(), "Cowboy Bebop");
        assert!(item.trailer_id().is_none());
        assert!(item.cover_url().is_none());
    }

    #[test]
    fn test_empty_trailer_id_is_none() {
        let json = r#"{ "id": "1", "trailer": { "id": "" } }"#;
        let item: AnimeResult = serde_json::from_str(json).unwrap();
        assert!(item.trailer_id().is_none());
        assert_eq!(item.title.display(), "Unknown");
    }

    #[test]
    fn test_deserialize_detail() {
        let json = r#"{
            "id": "5",
            "title": { "romaji": "Cowboy Bebop", "english": "Cowboy Bebop", "native": null },
            "totalEpisodes": 26,
            "type": "TV",
            "status": "Completed",
            "duration": 24,
            "genres": ["Action", "Sci-Fi"],
            "trailer": { "id": "qig4KOK2R2g", "site": "youtube" }
        }"#;
        let data: AnimeData = serde_json::from_str(json).unwrap();
        assert_eq!(data.total_episodes, Some(26));
        assert_eq!(data.media_type.as_deref(), Some("TV"));
        assert_eq!(data.genres.len(), 2);
    }

    #[test]
    fn test_select_stream_requires_quality_and_format() {
        let json = r#"{
            "title": "Trailer",
            "videoStreams": [
                { "url": "https://cdn/720.webm", "quality": "720p", "format": "WEBM" },
                { "url": "https://cdn/1080.mp4", "quality": "1080p", "format": "MPEG_4" },
                { "url": "https://cdn/1080.webm", "quality": "1080p", "format": "WEBM", "videoOnly": true }
            ]
        }"#;
        let info: StreamInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.select("1080p", "WEBM"), Some("https://cdn/1080.webm"));
        assert_eq!(info.select("1440p", "WEBM"), None);
    }

    #[test]
    fn test_select_stream_missing_list() {
        let info: StreamInfo = serde_json::from_str("{}").unwrap();
        assert!(info.select("1080p", "WEBM").is_none());
    }
}
