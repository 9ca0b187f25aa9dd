//! Service seams between the page logic and the network.
//!
//! The HTTP clients implement these traits; tests substitute in-memory
//! fakes so the hover sequence can be exercised without a server.

use std::fmt;
use std::future::Future;

use crate::types::{AnimeData, AnimeInfo, StreamInfo};

/// Which list a carousel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Trending,
    Popular,
}

impl ListKind {
    pub const ALL: &[ListKind] = &[Self::Trending, Self::Popular];

    /// Path segment under `/api/`.
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Trending => "trending",
            Self::Popular => "popular",
        }
    }

    /// Section heading on the discovery page.
    pub fn heading(self) -> &'static str {
        match self {
            Self::Trending => "Trending Now",
            Self::Popular => "All Time Popular",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Read-only access to the discovery backend.
pub trait DiscoveryService: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch one page of a list.
    fn list(
        &self,
        kind: ListKind,
        per_page: u32,
    ) -> impl Future<Output = Result<AnimeInfo, Self::Error>> + Send;

    /// Fetch the detail record for one anime.
    fn info(&self, id: &str) -> impl Future<Output = Result<AnimeData, Self::Error>> + Send;
}

/// Lookup of encoded video variants for a trailer id.
pub trait StreamSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn streams(
        &self,
        trailer_id: &str,
    ) -> impl Future<Output = Result<StreamInfo, Self::Error>> + Send;
}
