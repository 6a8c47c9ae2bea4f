use tracing_subscriber::EnvFilter;

mod app;
mod client;
mod config;
mod preview;
mod state;
mod ui;

use app::SceneBreakdown;

fn main() -> iced::Result {
    // RUST_LOG overrides the default filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("scene_breakdown=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    iced::application(
        "Scene Breakdown",
        SceneBreakdown::update,
        SceneBreakdown::view,
    )
    .theme(SceneBreakdown::theme)
    .subscription(SceneBreakdown::subscription)
    .exit_on_close_request(false)
    .centered()
    .run_with(SceneBreakdown::new)
}
