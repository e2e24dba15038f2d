mod app;
mod config;
mod menu;
mod session;
mod views;
mod widgets;

use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            error!("invalid configuration: {err:#}");
            std::process::exit(2);
        }
    };

    iced::application(
        move || app::App::new(config.clone()),
        app::App::update,
        app::App::view,
    )
    .subscription(app::App::subscription)
    .title(app::App::title)
    .theme(app::App::theme)
    .window(iced::window::Settings {
        size: iced::Size::new(1400.0, 900.0),
        ..Default::default()
    })
    .antialiasing(true)
    .run()
}
