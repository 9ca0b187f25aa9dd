//! HTTP clients and wire types for the anime discovery backend and the
//! trailer stream-info service.

pub mod client;
pub mod endpoint;
pub mod error;
pub mod piped;
pub mod traits;
pub mod types;

pub use client::DiscoveryClient;
pub use endpoint::Endpoint;
pub use error::ApiError;
pub use piped::PipedClient;
pub use traits::{DiscoveryService, ListKind, StreamSource};
