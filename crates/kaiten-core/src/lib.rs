//! Page logic for the anime discovery carousel: configuration, the bounded
//! detail cache, per-slide hover state machines, carousel paging and the
//! page controller. Nothing here touches the UI toolkit.

pub mod cache;
pub mod carousel;
pub mod config;
pub mod discover;
pub mod error;
pub mod home;
pub mod hover;
pub mod layout;
