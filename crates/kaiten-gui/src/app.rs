use std::path::PathBuf;

use iced::window;
use iced::{Element, Subscription, Task, Theme};

use kaiten_core::config::{AppConfig, ThemeMode};

use crate::cover_cache::{self, CoverCache};
use crate::player::TrailerPlayer;
use crate::screen::{home, Action};
use crate::services::Services;
use crate::subscription;
use crate::theme::{self, KaitenTheme};
use crate::window_state::WindowState;

/// Application state: a single discovery page plus app-level chrome.
pub struct Kaiten {
    config: AppConfig,
    services: Option<Services>,
    home: home::Home,
    cover_cache: CoverCache,
    trailer_player: TrailerPlayer,
    current_theme: KaitenTheme,
    active_mode: ThemeMode,
    window_state: WindowState,
}

#[derive(Debug, Clone)]
pub enum Message {
    Home(home::Message),
    CoverLoaded {
        anime_id: String,
        result: Result<PathBuf, String>,
    },
    AppearanceChanged(ThemeMode),
    WindowEvent(window::Event),
}

impl Kaiten {
    pub fn new(config: AppConfig, window_state: WindowState) -> (Self, Task<Message>) {
        let services = match Services::from_config(&config) {
            Ok(services) => Some(services),
            Err(e) => {
                tracing::error!(error = %e, "Invalid service configuration, page will not load");
                None
            }
        };

        let current_theme = theme::find_theme(&config.appearance.theme)
            .unwrap_or_else(KaitenTheme::default_theme);
        let active_mode = theme::resolve_mode(config.appearance.mode);
        let home = home::Home::new(config.cache.detail_capacity, window_state.size().width);
        let trailer_player = TrailerPlayer::new(config.trailer.player.clone());

        let mut app = Self {
            config,
            services,
            home,
            cover_cache: CoverCache::default(),
            trailer_player,
            current_theme,
            active_mode,
            window_state,
        };

        let task = match app.services.as_ref().map(|s| app.home.load(s)) {
            Some(action) => app.handle_action(action),
            None => Task::none(),
        };
        (app, task)
    }

    pub fn title(&self) -> String {
        String::from("Kaiten")
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Home(msg) => {
                let action = self.home.update(msg, self.services.as_ref());
                let task = self.handle_action(action);
                self.trailer_player.sync(self.home.playing_trailer());
                task
            }
            Message::CoverLoaded { anime_id, result } => {
                self.cover_cache.finish(anime_id, result);
                Task::none()
            }
            Message::AppearanceChanged(mode) => {
                if self.config.appearance.mode == ThemeMode::System && mode != self.active_mode {
                    tracing::debug!(?mode, "System appearance changed");
                    self.active_mode = mode;
                }
                Task::none()
            }
            Message::WindowEvent(event) => {
                match event {
                    window::Event::Opened { size, .. } => {
                        self.home.set_viewport_width(size.width);
                    }
                    window::Event::Resized(size) => {
                        self.home.set_viewport_width(size.width);
                        self.trailer_player.sync(self.home.playing_trailer());
                        self.window_state.width = size.width;
                        self.window_state.height = size.height;
                        self.window_state.save();
                    }
                    window::Event::Moved(pos) => {
                        self.window_state.x = pos.x;
                        self.window_state.y = pos.y;
                        self.window_state.save();
                    }
                    window::Event::CloseRequested | window::Event::Closed => {
                        self.trailer_player.stop();
                    }
                    _ => {}
                }
                Task::none()
            }
        }
    }

    fn handle_action(&mut self, action: Action) -> Task<Message> {
        match action {
            Action::None => Task::none(),
            Action::RunTask(task) => task,
            Action::OpenUrl(url) => {
                tracing::info!(url = %url, "Opening");
                if let Err(e) = open::that(&url) {
                    tracing::warn!(url = %url, "Failed to open URL: {e}");
                }
                Task::none()
            }
            Action::RequestCovers(items) => self.batch_request_covers(items),
        }
    }

    fn batch_request_covers(&mut self, items: Vec<(String, Option<String>)>) -> Task<Message> {
        let tasks: Vec<Task<Message>> = items
            .into_iter()
            .filter_map(|(anime_id, url)| {
                let path = self.cover_cache.begin(&anime_id, url.as_deref())?;
                let url = url?;
                Some(Task::perform(
                    cover_cache::fetch_cover(url, path),
                    move |result| Message::CoverLoaded { anime_id, result },
                ))
            })
            .collect();
        if tasks.is_empty() {
            Task::none()
        } else {
            Task::batch(tasks)
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let cs = self.current_theme.colors(self.active_mode);
        self.home.view(cs, &self.cover_cache).map(Message::Home)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        subscription::subscriptions(self.config.appearance.mode)
    }

    pub fn theme(&self) -> Theme {
        self.current_theme.iced_theme(self.active_mode)
    }
}
