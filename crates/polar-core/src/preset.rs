//! Preset documents written by the in-process engine
//!
//! Presets are JSON (`*.json`), matching the file filter of the editor's
//! load/save dialogs. The layout is owned by the engine; the editor only
//! passes paths around and shows the error text on failure.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::{BandParams, PresetError, PresetResult};
use crate::types::{
    EqualizationMode, BAND_GAIN_MAX_DB, BAND_GAIN_MIN_DB, DEFAULT_CROSSOVERS, DIR_WEIGHT_MAX,
    DIR_WEIGHT_MIN, FREQ_MAX, FREQ_MIN, MAX_BANDS, NUM_CROSSOVERS, NUM_SYNC_CHANNELS,
};

/// Current document version
pub const PRESET_VERSION: u32 = 1;

/// File extension used by the dialogs
pub const PRESET_EXTENSION: &str = "json";

/// One band inside a preset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PresetBand {
    pub direction: f32,
    pub gain_db: f32,
    #[serde(default)]
    pub solo: bool,
    #[serde(default)]
    pub mute: bool,
}

impl From<BandParams> for PresetBand {
    fn from(p: BandParams) -> Self {
        Self {
            direction: p.direction,
            gain_db: p.gain_db,
            solo: p.solo,
            mute: p.mute,
        }
    }
}

impl From<PresetBand> for BandParams {
    fn from(p: PresetBand) -> Self {
        Self {
            direction: p.direction,
            gain_db: p.gain_db,
            solo: p.solo,
            mute: p.mute,
        }
    }
}

/// A complete engine parameter snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub version: u32,
    pub band_count: usize,
    pub crossovers: Vec<f32>,
    pub bands: Vec<PresetBand>,
    #[serde(default)]
    pub equalization: EqualizationMode,
    #[serde(default)]
    pub proximity: f32,
    #[serde(default)]
    pub allow_backwards_pattern: bool,
    #[serde(default)]
    pub sync_channel: usize,
    #[serde(default)]
    pub zero_delay: bool,
}

impl Default for Preset {
    fn default() -> Self {
        Self {
            version: PRESET_VERSION,
            band_count: MAX_BANDS,
            crossovers: DEFAULT_CROSSOVERS.to_vec(),
            bands: vec![PresetBand::from(BandParams::default()); MAX_BANDS],
            equalization: EqualizationMode::Off,
            proximity: 0.0,
            allow_backwards_pattern: false,
            sync_channel: 0,
            zero_delay: false,
        }
    }
}

impl Preset {
    /// Read and validate a preset file
    pub fn read(path: &Path) -> PresetResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| PresetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let preset: Preset = serde_json::from_str(&contents)?;
        preset.validate()?;
        log::debug!("Preset::read: {:?} ({} bands)", path, preset.band_count);
        Ok(preset)
    }

    /// Write the preset as pretty JSON
    pub fn write(&self, path: &Path) -> PresetResult<()> {
        self.validate()?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| PresetError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Check every value against the engine's ranges
    pub fn validate(&self) -> PresetResult<()> {
        if self.version > PRESET_VERSION {
            return Err(PresetError::Invalid(format!(
                "preset version {} is newer than supported version {}",
                self.version, PRESET_VERSION
            )));
        }
        if !(1..=MAX_BANDS).contains(&self.band_count) {
            return Err(PresetError::Invalid(format!(
                "band count {} outside 1-{}",
                self.band_count, MAX_BANDS
            )));
        }
        if self.bands.len() != MAX_BANDS {
            return Err(PresetError::Invalid(format!(
                "expected {} bands, found {}",
                MAX_BANDS,
                self.bands.len()
            )));
        }
        if self.crossovers.len() != NUM_CROSSOVERS {
            return Err(PresetError::Invalid(format!(
                "expected {} crossovers, found {}",
                NUM_CROSSOVERS,
                self.crossovers.len()
            )));
        }
        if self
            .crossovers
            .iter()
            .any(|f| !(FREQ_MIN..=FREQ_MAX).contains(f))
        {
            return Err(PresetError::Invalid(
                "crossover frequency outside 20Hz-20kHz".to_string(),
            ));
        }
        if self.crossovers.windows(2).any(|w| w[0] >= w[1]) {
            return Err(PresetError::Invalid(
                "crossover frequencies must be strictly increasing".to_string(),
            ));
        }
        for (i, band) in self.bands.iter().enumerate() {
            if !(DIR_WEIGHT_MIN..=DIR_WEIGHT_MAX).contains(&band.direction) {
                return Err(PresetError::Invalid(format!(
                    "band {} direction {} out of range",
                    i + 1,
                    band.direction
                )));
            }
            if !(BAND_GAIN_MIN_DB..=BAND_GAIN_MAX_DB).contains(&band.gain_db) {
                return Err(PresetError::Invalid(format!(
                    "band {} gain {}dB out of range",
                    i + 1,
                    band.gain_db
                )));
            }
        }
        if self.sync_channel >= NUM_SYNC_CHANNELS {
            return Err(PresetError::Invalid(format!(
                "sync channel {} out of range",
                self.sync_channel
            )));
        }
        Ok(())
    }
}
