//! Global control handlers
//!
//! Every control here except zero-latency sits in the side area. Values are
//! written to the engine; anything the engine reports back arrives with the
//! next tick.

use iced::Task;

use polar_core::{AbLayer, EqualizationMode, MAX_BANDS, PROXIMITY_MAX, PROXIMITY_MIN};
use polar_widgets::Toggleable;

use crate::ui::app::DesignerApp;
use crate::ui::message::Message;

/// Zero-latency toggle (main area)
pub fn toggle_zero_delay(app: &mut DesignerApp) -> Task<Message> {
    if app.main_area_enabled() {
        let active = !app.zero_delay.is_on();
        log::info!("Zero latency mode: {}", active);
        app.engine.set_zero_delay_mode(active);
    }
    Task::none()
}

pub fn set_band_count(app: &mut DesignerApp, count: usize) -> Task<Message> {
    if app.side_area_enabled() && (1..=MAX_BANDS).contains(&count) {
        app.engine.set_active_band_count(count);
    }
    Task::none()
}

/// Only channels up to the current band count can be selected
pub fn set_sync_channel(app: &mut DesignerApp, index: usize) -> Task<Message> {
    if app.side_area_enabled() && index <= app.bands.active_count() {
        app.sync_channel = index;
        app.engine.set_sync_channel_index(index);
    }
    Task::none()
}

pub fn set_eq_mode(app: &mut DesignerApp, mode: EqualizationMode) -> Task<Message> {
    if app.side_area_enabled() {
        app.eq_mode = mode;
        app.engine.set_equalization_mode(mode);
    }
    Task::none()
}

pub fn set_proximity(app: &mut DesignerApp, value: f32) -> Task<Message> {
    if app.side_area_enabled() {
        app.proximity = value.clamp(PROXIMITY_MIN, PROXIMITY_MAX);
        app.engine.set_proximity(app.proximity);
    }
    Task::none()
}

pub fn toggle_allow_reverse(app: &mut DesignerApp) -> Task<Message> {
    if app.side_area_enabled() {
        let allow = app.allow_reverse.toggle();
        app.engine.set_allow_backwards_pattern(allow);
    }
    Task::none()
}

/// Switching layers swaps every parameter; the tick re-reads them
pub fn set_ab_layer(app: &mut DesignerApp, layer: AbLayer) -> Task<Message> {
    if app.side_area_enabled() && layer != app.ab_layer {
        log::info!("Switching to layer {:?}", layer);
        app.ab_layer = layer;
        app.engine.set_ab_layer(layer);
    }
    Task::none()
}
