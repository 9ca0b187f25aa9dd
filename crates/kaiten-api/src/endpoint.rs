//! Request paths for the discovery backend.
//!
//! The string form of an [`Endpoint`] doubles as the detail cache key, so
//! two requests for the same resource always render identically.

use std::fmt;

use url::Url;

use crate::error::ApiError;
use crate::traits::ListKind;

/// A backend resource addressed by a relative path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    List { kind: ListKind, per_page: u32 },
    Info { id: String },
}

impl Endpoint {
    pub fn list(kind: ListKind, per_page: u32) -> Self {
        Self::List { kind, per_page }
    }

    pub fn info(id: impl Into<String>) -> Self {
        Self::Info { id: id.into() }
    }

    /// Resolve the relative path against a base URL.
    pub fn resolve(&self, base: &Url) -> Result<Url, ApiError> {
        join(base, &self.to_string())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List { kind, per_page } => {
                write!(f, "/api/{}?perPage={per_page}", kind.path_segment())
            }
            Self::Info { id } => write!(f, "/api/info?id={id}"),
        }
    }
}

/// Site route of the detail page for an anime.
pub fn info_route(id: &str) -> String {
    format!("/info/{id}")
}

/// Path of the stream-info resource for a trailer video id.
pub fn streams_path(trailer_id: &str) -> String {
    format!("/streams/{trailer_id}")
}

/// Parse a base URL, making sure relative joins keep any path prefix.
pub fn parse_base(raw: &str) -> Result<Url, ApiError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&with_slash).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))
}

/// Join a root-relative path (`/x/y`) onto a base, keeping the base's path.
pub fn join(base: &Url, path: &str) -> Result<Url, ApiError> {
    base.join(path.trim_start_matches('/'))
        .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
}
