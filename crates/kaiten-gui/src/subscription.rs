use std::time::Duration;

use iced::{window, Subscription};

use kaiten_core::config::ThemeMode;

use crate::app::Message;
use crate::theme;

/// How often the OS appearance is polled while following the system.
const APPEARANCE_POLL: Duration = Duration::from_secs(5);

/// All app-level subscriptions.
pub fn subscriptions(mode: ThemeMode) -> Subscription<Message> {
    let mut subs = vec![window_events()];
    if mode == ThemeMode::System {
        subs.push(appearance_poll());
    }
    Subscription::batch(subs)
}

/// Window geometry changes, for the carousel breakpoints and for
/// persisting size and position, plus close so a playing trailer stops.
fn window_events() -> Subscription<Message> {
    iced::event::listen_with(|event, _status, _id| match event {
        iced::Event::Window(
            event @ (window::Event::Opened { .. }
            | window::Event::Resized(_)
            | window::Event::Moved(_)
            | window::Event::CloseRequested
            | window::Event::Closed),
        ) => Some(Message::WindowEvent(event)),
        _ => None,
    })
}

fn appearance_poll() -> Subscription<Message> {
    iced::time::every(APPEARANCE_POLL)
        .map(|_| Message::AppearanceChanged(theme::resolve_mode(ThemeMode::System)))
}
