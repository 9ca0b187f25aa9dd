pub mod home;

use iced::Task;

use crate::app;

/// Actions a screen can request from the app router.
///
/// Screens return these from `update()` instead of touching shared state;
/// the app interprets them in one place.
pub enum Action {
    None,
    /// Run an async task that eventually produces an `app::Message`.
    RunTask(Task<app::Message>),
    /// Open a URL with the system handler.
    OpenUrl(String),
    /// Make sure covers are downloaded: `(anime_id, cover_url)` pairs.
    RequestCovers(Vec<(String, Option<String>)>),
}
