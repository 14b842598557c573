//! Shared value types for the editor and the engine

use serde::{Deserialize, Serialize};

/// Maximum number of frequency bands
pub const MAX_BANDS: usize = 5;

/// Number of crossovers (one less than bands)
pub const NUM_CROSSOVERS: usize = MAX_BANDS - 1;

/// Number of sync channel choices ("none" plus channels 1-4)
pub const NUM_SYNC_CHANNELS: usize = 5;

/// Direction weight range (-0.5 = figure-of-eight rear lobe, 0 = omni, 1 = figure-of-eight)
pub const DIR_WEIGHT_MIN: f32 = -0.5;
pub const DIR_WEIGHT_MAX: f32 = 1.0;

/// Band gain range in dB
pub const BAND_GAIN_MIN_DB: f32 = -24.0;
pub const BAND_GAIN_MAX_DB: f32 = 18.0;

/// Frequency range for crossover display (Hz)
pub const FREQ_MIN: f32 = 20.0;
pub const FREQ_MAX: f32 = 20000.0;

/// Proximity compensation range
pub const PROXIMITY_MIN: f32 = -1.0;
pub const PROXIMITY_MAX: f32 = 1.0;

/// Default crossover frequencies for a full five-band split (Hz)
pub const DEFAULT_CROSSOVERS: [f32; NUM_CROSSOVERS] = [150.0, 600.0, 2400.0, 8000.0];

/// Convert frequency to position (0.0-1.0) on log scale
pub fn freq_to_position(freq: f32) -> f32 {
    let log_min = FREQ_MIN.log10();
    let log_max = FREQ_MAX.log10();
    let log_freq = freq.clamp(FREQ_MIN, FREQ_MAX).log10();
    (log_freq - log_min) / (log_max - log_min)
}

/// Convert position (0.0-1.0) to frequency on log scale
pub fn position_to_freq(pos: f32) -> f32 {
    let log_min = FREQ_MIN.log10();
    let log_max = FREQ_MAX.log10();
    let log_freq = log_min + pos.clamp(0.0, 1.0) * (log_max - log_min);
    10.0_f32.powf(log_freq)
}

/// Format frequency for display
pub fn format_freq(freq: f32) -> String {
    if freq >= 1000.0 {
        format!("{:.1}kHz", freq / 1000.0)
    } else {
        format!("{:.0}Hz", freq)
    }
}

/// Diffuse/free-field equalization applied after the polar pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EqualizationMode {
    #[default]
    Off,
    FreeField,
    DiffuseField,
}

impl EqualizationMode {
    pub const ALL: [EqualizationMode; 3] = [Self::Off, Self::FreeField, Self::DiffuseField];

    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::FreeField => "free field",
            Self::DiffuseField => "diffuse field",
        }
    }
}

impl std::fmt::Display for EqualizationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Which target the engine records while tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingTarget {
    /// Undesired spill signal (minimize its energy)
    Disturber,
    /// Desired target signal (maximize its energy)
    Signal,
}

/// How a tracking session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingResult {
    /// Discard what was recorded
    Cancel,
    /// Apply the patterns computed from the recorded target
    Apply,
    /// Apply patterns maximizing the signal-to-spill ratio (needs both targets)
    MaximizeRatio,
}

impl TrackingResult {
    /// Wire code understood by the engine
    pub fn code(self) -> u8 {
        match self {
            Self::Cancel => 0,
            Self::Apply => 1,
            Self::MaximizeRatio => 2,
        }
    }
}

/// A/B comparison layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AbLayer {
    #[default]
    A,
    B,
}

impl AbLayer {
    /// Button alpha for a layer: active layers are opaque, the other is faded
    pub fn button_alpha(active: bool) -> f32 {
        f32::from(u8::from(active)) * 0.7 + 0.3
    }
}
