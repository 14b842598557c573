//! Application messages for polar-designer

use std::path::PathBuf;

use iced::Size;

use polar_core::{AbLayer, EqualizationMode};
use polar_widgets::{BandMessage, OverlayMessage};

/// Messages that can be sent to the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Engine flag poll
    Tick,
    WindowResized(Size),

    // Main area
    /// Band strip or directivity bar message
    Band(BandMessage),
    /// Trim drag, distance from the press point
    TrimDragged(f32),
    /// Trim wheel: delta, control height
    TrimScrolled(f32, f32),
    ToggleZeroDelay,

    // Side area
    SetBandCount(usize),
    /// 0 = none, 1-4 = channel
    SetSyncChannel(usize),
    SetEqMode(EqualizationMode),
    SetProximity(f32),
    ToggleAllowReverse,
    SetAbLayer(AbLayer),

    // Tracking
    StartDisturberTracking,
    StartSignalTracking,
    /// Button pressed on the open overlay
    Overlay(OverlayMessage),

    // Presets
    /// Open the load dialog
    LoadPreset,
    /// Open the save dialog
    SavePreset,
    /// Load dialog closed (None = cancelled)
    PresetLoadPicked(Option<PathBuf>),
    /// Save dialog closed (None = cancelled)
    PresetSavePicked(Option<PathBuf>),
}
