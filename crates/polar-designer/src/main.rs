//! Polar Designer - editor for a multi-band polar pattern processor
//!
//! This is the entry point of the standalone editor. It:
//! 1. Loads the editor config (window size, poll period, preset directory)
//! 2. Creates the in-process engine the editor talks to
//! 3. Launches the iced application
//!
//! Set `RUST_LOG=debug` to follow transitions and flag reconciliation.

mod config;
mod ui;

use std::sync::Arc;

use iced::{Size, Task};

use polar_core::{PolarEngine, SimulatedEngine};
use ui::{message::Message, DesignerApp};

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("polar-designer starting up");

    let config_path = config::default_config_path();
    let config = config::load_config(&config_path);

    let engine: Arc<dyn PolarEngine> = Arc::new(SimulatedEngine::new(config.band_count()));
    if let Some(dir) = &config.last_preset_dir {
        engine.set_last_preset_dir(dir.clone());
    }
    log::info!(
        "Engine ready: {} bands, polling every {:?}",
        engine.active_band_count(),
        config.poll_interval()
    );

    let window_size = Size::new(config.window.width, config.window.height);

    let result = iced::application(
        move || {
            let app = DesignerApp::new(Arc::clone(&engine), config.clone(), config_path.clone());
            (app, Task::none())
        },
        update,
        view,
    )
    .subscription(subscription)
    .theme(theme)
    .title("Polar Designer")
    .window_size(window_size)
    .run();

    log::info!("polar-designer stopped");
    result
}

/// Update function for iced
fn update(app: &mut DesignerApp, message: Message) -> Task<Message> {
    app.update(message)
}

/// View function for iced
fn view(app: &DesignerApp) -> iced::Element<'_, Message> {
    app.view()
}

/// Subscription function for iced
fn subscription(app: &DesignerApp) -> iced::Subscription<Message> {
    app.subscription()
}

/// Theme function for iced
fn theme(app: &DesignerApp) -> iced::Theme {
    app.theme()
}
