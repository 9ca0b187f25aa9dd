mod app;
mod cli;
mod cover_cache;
mod logging;
mod player;
mod screen;
mod services;
mod style;
mod subscription;
mod theme;
mod widgets;
mod window_state;

use clap::Parser;

use kaiten_core::config::AppConfig;

fn main() -> iced::Result {
    let cli = cli::Cli::parse();
    let _log_guard = logging::init(cli.log_level.as_deref(), &AppConfig::data_dir().join("logs"));

    let config = cli.load_config();
    tracing::info!(
        api = %config.api.base_url,
        site = %config.site.base_url,
        hover_delay_ms = config.hover.delay_ms,
        "Starting"
    );

    let ws = window_state::WindowState::load();
    let mut win = iced::window::Settings {
        size: ws.size(),
        min_size: Some(iced::Size::new(400.0, 300.0)),
        ..Default::default()
    };
    win.position = match ws.position() {
        Some(pos) => iced::window::Position::Specific(pos),
        None => iced::window::Position::Centered,
    };

    iced::application(
        move || app::Kaiten::new(config.clone(), ws.clone()),
        app::Kaiten::update,
        app::Kaiten::view,
    )
    .title(app::Kaiten::title)
    .subscription(app::Kaiten::subscription)
    .theme(app::Kaiten::theme)
    .font(lucide_icons::LUCIDE_FONT_BYTES)
    .window(win)
    .run()
}
