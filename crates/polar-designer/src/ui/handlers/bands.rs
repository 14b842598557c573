//! Band message handler
//!
//! Band strips, crossover handles and the trim control all live in the main
//! area. The controller ignores edits to disabled bands on its own; the
//! checks here only cover gestures that outlive a single message.

use iced::Task;

use polar_widgets::{control_parameter_index, BandMessage, TRIM_STEP};

use crate::ui::app::DesignerApp;
use crate::ui::message::Message;

/// Handle band strip and directivity bar messages
pub fn handle(app: &mut DesignerApp, band_msg: BandMessage) -> Task<Message> {
    use BandMessage::*;

    match band_msg {
        DirectionChanged(band, value) => {
            app.bands.set_direction_weight(band, value);
        }
        GainChanged(band, gain_db) => {
            app.bands.set_gain(band, gain_db);
        }
        ToggleSolo(band) => {
            app.bands.toggle_solo(band);
        }
        ToggleMute(band) => {
            app.bands.toggle_mute(band);
        }
        StartDragCrossover(index) => {
            if app.bands.is_interaction_enabled() && app.bands.crossover(index).is_some() {
                app.dragging_crossover = Some(index);
            }
        }
        DragCrossover(freq) => {
            if let Some(index) = app.dragging_crossover {
                if let Some(applied) = app.bands.set_crossover(index, freq) {
                    log::trace!("crossover {} -> {:.1} Hz", index, applied);
                }
            }
        }
        EndDragCrossover => {
            app.dragging_crossover = None;
        }
        ShowParameterIndex(control) => {
            let label = control.label();
            app.status = match control_parameter_index(control, app.bands.active_count()) {
                Some(index) => format!("{}: parameter {}", label, index),
                None => format!("{}: inactive", label),
            };
        }
    }
    Task::none()
}

/// Trim dragged; `distance` from the press point, positive downwards
pub fn handle_trim_drag(app: &mut DesignerApp, distance: f32) -> Task<Message> {
    if app.main_area_enabled() {
        if let Some(event) = app.trim.on_drag(distance) {
            app.bands.apply_trim(event, TRIM_STEP);
        }
    }
    Task::none()
}

/// Trim wheel notch
pub fn handle_trim_scroll(app: &mut DesignerApp, delta: f32, height: f32) -> Task<Message> {
    if app.main_area_enabled() {
        if let Some(event) = app.trim.on_wheel(delta, height) {
            app.bands.apply_trim(event, TRIM_STEP);
        }
    }
    Task::none()
}
