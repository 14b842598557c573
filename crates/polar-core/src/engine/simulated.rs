//! In-process engine used by the standalone editor and tests
//!
//! Holds the full parameter set behind a `RwLock` and raises the same dirty
//! flags a plugin host build would. It does no audio processing: tracking
//! only records which targets were captured, so the ratio option and the
//! editor's workflow behave as they would against a real engine.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{BandParams, EngineFlag, EngineFlags, PolarEngine, PresetResult};
use crate::preset::{Preset, PresetBand, PRESET_VERSION};
use crate::types::{
    AbLayer, EqualizationMode, TrackingResult, TrackingTarget, BAND_GAIN_MAX_DB,
    BAND_GAIN_MIN_DB, DEFAULT_CROSSOVERS, DIR_WEIGHT_MAX, DIR_WEIGHT_MIN, FREQ_MAX, FREQ_MIN,
    MAX_BANDS, NUM_CROSSOVERS, NUM_SYNC_CHANNELS, PROXIMITY_MAX, PROXIMITY_MIN,
};

/// Parameter set of one A/B layer
#[derive(Debug, Clone, PartialEq)]
struct LayerParams {
    band_count: usize,
    bands: [BandParams; MAX_BANDS],
    crossovers: [f32; NUM_CROSSOVERS],
    sync_channel: usize,
    zero_delay: bool,
    eq_mode: EqualizationMode,
    proximity: f32,
    allow_backwards: bool,
}

impl LayerParams {
    fn new(band_count: usize) -> Self {
        Self {
            band_count: band_count.clamp(1, MAX_BANDS),
            bands: [BandParams::default(); MAX_BANDS],
            crossovers: DEFAULT_CROSSOVERS,
            sync_channel: 0,
            zero_delay: false,
            eq_mode: EqualizationMode::Off,
            proximity: 0.0,
            allow_backwards: false,
        }
    }

    fn to_preset(&self) -> Preset {
        Preset {
            version: PRESET_VERSION,
            band_count: self.band_count,
            crossovers: self.crossovers.to_vec(),
            bands: self.bands.iter().copied().map(PresetBand::from).collect(),
            equalization: self.eq_mode,
            proximity: self.proximity,
            allow_backwards_pattern: self.allow_backwards,
            sync_channel: self.sync_channel,
            zero_delay: self.zero_delay,
        }
    }

    /// Caller validates the preset first
    fn apply_preset(&mut self, preset: &Preset) {
        self.band_count = preset.band_count;
        for (dst, src) in self.bands.iter_mut().zip(&preset.bands) {
            *dst = BandParams::from(*src);
        }
        for (dst, src) in self.crossovers.iter_mut().zip(&preset.crossovers) {
            *dst = *src;
        }
        self.eq_mode = preset.equalization;
        self.proximity = preset.proximity.clamp(PROXIMITY_MIN, PROXIMITY_MAX);
        self.allow_backwards = preset.allow_backwards_pattern;
        self.sync_channel = preset.sync_channel;
        self.zero_delay = preset.zero_delay;
    }
}

#[derive(Debug)]
struct EngineState {
    current: LayerParams,
    /// Stored parameters of the inactive layer
    other: LayerParams,
    layer: AbLayer,
    last_preset_dir: Option<PathBuf>,
}

/// Engine without DSP, for running the editor standalone
#[derive(Debug)]
pub struct SimulatedEngine {
    state: RwLock<EngineState>,
    tracking: Mutex<Option<TrackingTarget>>,
    last_result: Mutex<Option<TrackingResult>>,
    signal_recorded: AtomicBool,
    disturber_recorded: AtomicBool,
    flags: EngineFlags,
}

impl Default for SimulatedEngine {
    fn default() -> Self {
        Self::new(MAX_BANDS)
    }
}

impl SimulatedEngine {
    /// Create an engine with `band_count` active bands (clamped to 1-5)
    pub fn new(band_count: usize) -> Self {
        let params = LayerParams::new(band_count);
        Self {
            state: RwLock::new(EngineState {
                current: params.clone(),
                other: params,
                layer: AbLayer::A,
                last_preset_dir: None,
            }),
            tracking: Mutex::new(None),
            last_result: Mutex::new(None),
            signal_recorded: AtomicBool::new(false),
            disturber_recorded: AtomicBool::new(false),
            flags: EngineFlags::new(),
        }
    }

    /// Target currently being tracked, if any
    pub fn tracking_target(&self) -> Option<TrackingTarget> {
        *self.tracking.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Result passed to the most recent effective `stop_tracking`
    pub fn last_tracking_result(&self) -> Option<TrackingResult> {
        *self
            .last_result
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> RwLockReadGuard<'_, EngineState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, EngineState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mutate the active layer and raise `repaint_requested` if anything changed
    fn update_params(&self, f: impl FnOnce(&mut LayerParams)) -> bool {
        let changed = {
            let mut state = self.write();
            let before = state.current.clone();
            f(&mut state.current);
            state.current != before
        };
        if changed {
            self.flags.raise(EngineFlag::RepaintRequested);
        }
        changed
    }

    fn raise_all(&self) {
        for flag in EngineFlag::ALL {
            self.flags.raise(flag);
        }
    }
}

impl PolarEngine for SimulatedEngine {
    fn active_band_count(&self) -> usize {
        self.read().current.band_count
    }

    fn set_active_band_count(&self, count: usize) {
        let count = count.clamp(1, MAX_BANDS);
        if self.update_params(|p| p.band_count = count) {
            log::debug!("SimulatedEngine: band count -> {}", count);
            self.flags.raise(EngineFlag::BandCountChanged);
        }
    }

    fn band_params(&self, band: usize) -> BandParams {
        self.read()
            .current
            .bands
            .get(band)
            .copied()
            .unwrap_or_default()
    }

    fn set_direction_weight(&self, band: usize, value: f32) {
        let value = value.clamp(DIR_WEIGHT_MIN, DIR_WEIGHT_MAX);
        self.update_params(|p| {
            if let Some(b) = p.bands.get_mut(band) {
                b.direction = value;
            }
        });
    }

    fn set_band_gain(&self, band: usize, gain_db: f32) {
        let gain_db = gain_db.clamp(BAND_GAIN_MIN_DB, BAND_GAIN_MAX_DB);
        self.update_params(|p| {
            if let Some(b) = p.bands.get_mut(band) {
                b.gain_db = gain_db;
            }
        });
    }

    fn set_band_solo(&self, band: usize, solo: bool) {
        self.update_params(|p| {
            if let Some(b) = p.bands.get_mut(band) {
                b.solo = solo;
            }
        });
    }

    fn set_band_mute(&self, band: usize, mute: bool) {
        self.update_params(|p| {
            if let Some(b) = p.bands.get_mut(band) {
                b.mute = mute;
            }
        });
    }

    fn crossover_frequency(&self, index: usize) -> f32 {
        self.read()
            .current
            .crossovers
            .get(index)
            .copied()
            .unwrap_or(FREQ_MAX)
    }

    fn set_crossover_frequency(&self, index: usize, freq: f32) {
        let freq = freq.clamp(FREQ_MIN, FREQ_MAX);
        self.update_params(|p| {
            if let Some(x) = p.crossovers.get_mut(index) {
                *x = freq;
            }
        });
    }

    fn sync_channel_index(&self) -> usize {
        self.read().current.sync_channel
    }

    fn set_sync_channel_index(&self, index: usize) {
        let index = index.min(NUM_SYNC_CHANNELS - 1);
        self.update_params(|p| p.sync_channel = index);
    }

    fn is_zero_delay_mode_active(&self) -> bool {
        self.read().current.zero_delay
    }

    fn set_zero_delay_mode(&self, active: bool) {
        if self.update_params(|p| p.zero_delay = active) {
            log::debug!("SimulatedEngine: zero delay mode -> {}", active);
            self.flags.raise(EngineFlag::ZeroDelayModeChanged);
        }
    }

    fn equalization_mode(&self) -> EqualizationMode {
        self.read().current.eq_mode
    }

    fn set_equalization_mode(&self, mode: EqualizationMode) {
        if self.update_params(|p| p.eq_mode = mode) {
            self.flags.raise(EngineFlag::EqModeChanged);
        }
    }

    fn proximity(&self) -> f32 {
        self.read().current.proximity
    }

    fn set_proximity(&self, value: f32) {
        let value = value.clamp(PROXIMITY_MIN, PROXIMITY_MAX);
        self.update_params(|p| p.proximity = value);
    }

    fn allow_backwards_pattern(&self) -> bool {
        self.read().current.allow_backwards
    }

    fn set_allow_backwards_pattern(&self, allow: bool) {
        self.update_params(|p| p.allow_backwards = allow);
    }

    fn ab_layer(&self) -> AbLayer {
        self.read().layer
    }

    fn set_ab_layer(&self, layer: AbLayer) {
        {
            let mut state = self.write();
            if state.layer == layer {
                return;
            }
            let state = &mut *state;
            std::mem::swap(&mut state.current, &mut state.other);
            state.layer = layer;
        }
        log::info!("SimulatedEngine: switched to layer {:?}", layer);
        self.raise_all();
    }

    fn start_tracking(&self, target: TrackingTarget) {
        let mut tracking = self.tracking.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(current) = *tracking {
            log::warn!(
                "SimulatedEngine: start_tracking({:?}) while tracking {:?}, restarting",
                target,
                current
            );
        }
        *tracking = Some(target);
        log::info!("SimulatedEngine: tracking {:?}", target);
    }

    fn stop_tracking(&self, result: TrackingResult) {
        let target = self
            .tracking
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(target) = target else {
            log::warn!("SimulatedEngine: stop_tracking({:?}) without active tracking", result);
            return;
        };

        *self
            .last_result
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(result);

        if result != TrackingResult::Cancel {
            match target {
                TrackingTarget::Disturber => self.disturber_recorded.store(true, Ordering::Release),
                TrackingTarget::Signal => self.signal_recorded.store(true, Ordering::Release),
            }
            if result == TrackingResult::MaximizeRatio
                && !(self.is_signal_recorded() && self.is_disturber_recorded())
            {
                log::warn!("SimulatedEngine: ratio requested without both targets recorded");
            }
            self.flags.raise(EngineFlag::RepaintRequested);
        }
        log::info!(
            "SimulatedEngine: stopped tracking {:?} with code {}",
            target,
            result.code()
        );
    }

    fn is_signal_recorded(&self) -> bool {
        self.signal_recorded.load(Ordering::Acquire)
    }

    fn is_disturber_recorded(&self) -> bool {
        self.disturber_recorded.load(Ordering::Acquire)
    }

    fn load_preset(&self, path: &Path) -> PresetResult<()> {
        let preset = Preset::read(path)?;
        self.write().current.apply_preset(&preset);
        log::info!("SimulatedEngine: loaded preset {:?}", path);
        self.raise_all();
        Ok(())
    }

    fn save_preset(&self, path: &Path) -> PresetResult<()> {
        let preset = self.read().current.to_preset();
        preset.write(path)?;
        log::info!("SimulatedEngine: saved preset {:?}", path);
        Ok(())
    }

    fn last_preset_dir(&self) -> Option<PathBuf> {
        self.read().last_preset_dir.clone()
    }

    fn set_last_preset_dir(&self, dir: PathBuf) {
        self.write().last_preset_dir = Some(dir);
    }

    fn flags(&self) -> &EngineFlags {
        &self.flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_count_change_raises_flag_once() {
        let engine = SimulatedEngine::new(5);
        engine.set_active_band_count(3);
        assert_eq!(engine.active_band_count(), 3);
        assert!(engine.flags().take(EngineFlag::BandCountChanged));

        // Same value: no new notification
        engine.set_active_band_count(3);
        assert!(!engine.flags().take(EngineFlag::BandCountChanged));
    }

    #[test]
    fn test_band_count_clamped() {
        let engine = SimulatedEngine::new(9);
        assert_eq!(engine.active_band_count(), 5);
        engine.set_active_band_count(0);
        assert_eq!(engine.active_band_count(), 1);
    }

    #[test]
    fn test_param_change_requests_repaint() {
        let engine = SimulatedEngine::new(2);
        engine.set_direction_weight(1, 0.4);
        assert!(engine.flags().take(EngineFlag::RepaintRequested));
        assert!((engine.band_params(1).direction - 0.4).abs() < f32::EPSILON);

        engine.set_direction_weight(1, 5.0);
        assert_eq!(engine.band_params(1).direction, DIR_WEIGHT_MAX);
    }

    #[test]
    fn test_tracking_records_target_only_when_not_cancelled() {
        let engine = SimulatedEngine::new(5);

        engine.start_tracking(TrackingTarget::Signal);
        assert_eq!(engine.tracking_target(), Some(TrackingTarget::Signal));
        engine.stop_tracking(TrackingResult::Cancel);
        assert_eq!(engine.last_tracking_result(), Some(TrackingResult::Cancel));
        assert!(!engine.is_signal_recorded());
        assert_eq!(engine.tracking_target(), None);

        engine.start_tracking(TrackingTarget::Disturber);
        engine.stop_tracking(TrackingResult::Apply);
        assert!(engine.is_disturber_recorded());
        assert!(!engine.is_signal_recorded());
    }

    #[test]
    fn test_eq_and_zero_delay_flags() {
        let engine = SimulatedEngine::new(5);
        engine.set_equalization_mode(EqualizationMode::FreeField);
        engine.set_zero_delay_mode(true);
        assert!(engine.flags().take(EngineFlag::EqModeChanged));
        assert!(engine.flags().take(EngineFlag::ZeroDelayModeChanged));
        assert_eq!(engine.equalization_mode(), EqualizationMode::FreeField);
        assert!(engine.is_zero_delay_mode_active());
    }

    #[test]
    fn test_ab_layers_keep_separate_params() {
        let engine = SimulatedEngine::new(5);
        engine.set_active_band_count(2);
        engine.set_ab_layer(AbLayer::B);
        assert_eq!(engine.active_band_count(), 5);
        assert!(engine.flags().take(EngineFlag::BandCountChanged));

        engine.set_ab_layer(AbLayer::A);
        assert_eq!(engine.active_band_count(), 2);
    }

    #[test]
    fn test_preset_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("three-bands.json");

        let engine = SimulatedEngine::new(3);
        engine.set_band_gain(0, -6.0);
        engine.save_preset(&path).unwrap();

        let other = SimulatedEngine::new(5);
        other.load_preset(&path).unwrap();
        assert_eq!(other.active_band_count(), 3);
        assert_eq!(other.band_params(0).gain_db, -6.0);
        assert!(other.flags().take(EngineFlag::BandCountChanged));
        assert!(other.flags().take(EngineFlag::EqModeChanged));
    }

    #[test]
    fn test_failed_load_leaves_params_untouched() {
        let engine = SimulatedEngine::new(4);
        let result = engine.load_preset(Path::new("/nonexistent/preset.json"));
        assert!(result.is_err());
        assert_eq!(engine.active_band_count(), 4);
        assert!(!engine.flags().take(EngineFlag::BandCountChanged));
    }
}
