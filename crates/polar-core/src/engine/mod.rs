//! Audio engine contract consumed by the editor
//!
//! All methods take `&self`: an engine is shared (`Arc`) between the editor
//! and whatever drives it from the processing side, and keeps its own
//! interior synchronization. None of these calls may block for long; the
//! editor calls them from its update loop.

mod error;
mod flags;
mod simulated;

use std::path::{Path, PathBuf};

use crate::types::{AbLayer, EqualizationMode, TrackingResult, TrackingTarget};

pub use error::{PresetError, PresetResult};
pub use flags::{DirtyFlag, EngineFlag, EngineFlags};
pub use simulated::SimulatedEngine;

/// Snapshot of one band's engine parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandParams {
    /// Polar pattern weight
    pub direction: f32,
    /// Band gain in dB
    pub gain_db: f32,
    pub solo: bool,
    pub mute: bool,
}

impl Default for BandParams {
    fn default() -> Self {
        Self {
            direction: 0.0,
            gain_db: 0.0,
            solo: false,
            mute: false,
        }
    }
}

/// The engine collaborator
pub trait PolarEngine: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────
    // Band configuration
    // ─────────────────────────────────────────────────────────────────────

    /// Authoritative number of active bands (1-5)
    fn active_band_count(&self) -> usize;

    /// Request a new band count; the engine raises `band_count_changed`
    fn set_active_band_count(&self, count: usize);

    fn band_params(&self, band: usize) -> BandParams;
    fn set_direction_weight(&self, band: usize, value: f32);
    fn set_band_gain(&self, band: usize, gain_db: f32);
    fn set_band_solo(&self, band: usize, solo: bool);
    fn set_band_mute(&self, band: usize, mute: bool);

    /// Crossover between band `index` and `index + 1` (Hz)
    fn crossover_frequency(&self, index: usize) -> f32;
    fn set_crossover_frequency(&self, index: usize, freq: f32);

    // ─────────────────────────────────────────────────────────────────────
    // Global controls
    // ─────────────────────────────────────────────────────────────────────

    /// Sync channel (0 = none, 1-4 = channel)
    fn sync_channel_index(&self) -> usize;
    fn set_sync_channel_index(&self, index: usize);

    fn is_zero_delay_mode_active(&self) -> bool;
    fn set_zero_delay_mode(&self, active: bool);

    fn equalization_mode(&self) -> EqualizationMode;
    fn set_equalization_mode(&self, mode: EqualizationMode);

    fn proximity(&self) -> f32;
    fn set_proximity(&self, value: f32);

    fn allow_backwards_pattern(&self) -> bool;
    fn set_allow_backwards_pattern(&self, allow: bool);

    fn ab_layer(&self) -> AbLayer;
    fn set_ab_layer(&self, layer: AbLayer);

    // ─────────────────────────────────────────────────────────────────────
    // Tracking
    // ─────────────────────────────────────────────────────────────────────

    fn start_tracking(&self, target: TrackingTarget);
    fn stop_tracking(&self, result: TrackingResult);
    fn is_signal_recorded(&self) -> bool;
    fn is_disturber_recorded(&self) -> bool;

    // ─────────────────────────────────────────────────────────────────────
    // Presets
    // ─────────────────────────────────────────────────────────────────────

    fn load_preset(&self, path: &Path) -> PresetResult<()>;
    fn save_preset(&self, path: &Path) -> PresetResult<()>;

    /// Directory of the last loaded/saved preset
    fn last_preset_dir(&self) -> Option<PathBuf>;
    fn set_last_preset_dir(&self, dir: PathBuf);

    // ─────────────────────────────────────────────────────────────────────
    // Change notification
    // ─────────────────────────────────────────────────────────────────────

    fn flags(&self) -> &EngineFlags;
}
