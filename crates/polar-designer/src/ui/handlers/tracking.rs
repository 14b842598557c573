//! Tracking workflow handlers
//!
//! Rejected transitions are logged and otherwise ignored; the overlay that
//! would have been affected stays as it is.

use iced::Task;

use polar_widgets::{OverlayMessage, TransitionError};

use crate::ui::app::DesignerApp;
use crate::ui::message::Message;

pub fn start_disturber(app: &mut DesignerApp) -> Task<Message> {
    if app.side_area_enabled() {
        let result = app.tracking.start_disturber_tracking(&mut app.bands);
        report("start disturber tracking", result);
    }
    Task::none()
}

pub fn start_signal(app: &mut DesignerApp) -> Task<Message> {
    if app.side_area_enabled() {
        let result = app.tracking.start_signal_tracking(&mut app.bands);
        report("start signal tracking", result);
    }
    Task::none()
}

/// Handle a button on the open overlay
pub fn handle_overlay(app: &mut DesignerApp, overlay_msg: OverlayMessage) -> Task<Message> {
    let result = match overlay_msg {
        OverlayMessage::Apply => app.tracking.apply(&mut app.bands),
        OverlayMessage::Cancel => app.tracking.cancel(&mut app.bands),
        OverlayMessage::MaximizeRatio => app.tracking.maximize_ratio(&mut app.bands),
        OverlayMessage::Acknowledge => app.tracking.acknowledge(&mut app.bands),
    };
    report(&format!("{:?}", overlay_msg), result);
    Task::none()
}

fn report(action: &str, result: Result<(), TransitionError>) {
    match result {
        Ok(()) => log::debug!("Tracking: {} ok", action),
        Err(e) => log::warn!("Tracking: {} rejected: {}", action, e),
    }
}
