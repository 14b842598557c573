//! Tick message handler
//!
//! Runs every poll interval (30 ms by default):
//! - Test-and-clear the engine's dirty flags through the `SyncPoller`
//! - Mirror the engine's global controls after a repaint request
//! - Reset the sync channel when the band count changed

use iced::Task;

use polar_widgets::Toggleable;

use crate::ui::app::DesignerApp;
use crate::ui::message::Message;

/// Handle the tick message
pub fn handle(app: &mut DesignerApp) -> Task<Message> {
    let previous_count = app.bands.active_count();
    let report = app.poller.poll(app.engine.as_ref(), &mut app.bands);
    if report.is_empty() {
        return Task::none();
    }

    if report.repaint {
        app.read_global_controls();
    }

    if let Some(active) = report.zero_delay {
        app.zero_delay.set_on(active);
        if active {
            app.dragging_crossover = None;
        }
    }

    if let Some(mode) = report.eq_mode {
        app.eq_mode = mode;
    }

    if let Some(count) = report.band_count {
        if count != previous_count {
            log::info!("Band count {} -> {}", previous_count, count);
            // Sync selection only covers channels up to the band count
            app.sync_channel = 0;
            app.engine.set_sync_channel_index(0);
            if app.dragging_crossover.is_some_and(|i| i + 1 >= count) {
                app.dragging_crossover = None;
            }
        }
    }

    if report.needs_relayout() {
        log::debug!(
            "Relayout: {} of {} bands laid out",
            app.bands.effective_active_count(),
            app.bands.active_count()
        );
    }

    Task::none()
}
