//! Band data owned by the band controller

use polar_core::{
    BandParams, BAND_GAIN_MAX_DB, BAND_GAIN_MIN_DB, DEFAULT_CROSSOVERS, DIR_WEIGHT_MAX,
    DIR_WEIGHT_MIN, MAX_BANDS, NUM_CROSSOVERS,
};

use crate::controls::{BandToggle, RangedParam, RangedValue, ToggleKind, Toggleable};

/// UI state of one frequency band
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    /// Fixed identity, 0 is the lowest band
    pub index: usize,
    /// Accepts user input
    pub enabled: bool,
    /// Part of the active set
    pub visible: bool,
    pub solo: BandToggle,
    pub mute: BandToggle,
    /// Polar pattern weight, slider drawn reversed
    pub direction: RangedParam,
    pub gain: RangedParam,
    /// Whether the polar visualizer of this band takes part in layout
    pub visualizer_active: bool,
    /// Mirrors "some band is soloed"
    pub solo_highlight: bool,
}

impl Band {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            enabled: true,
            visible: true,
            solo: BandToggle::new(ToggleKind::Solo),
            mute: BandToggle::new(ToggleKind::Mute),
            direction: RangedParam::new(DIR_WEIGHT_MIN, DIR_WEIGHT_MAX, 0.0).reversed(),
            gain: RangedParam::new(BAND_GAIN_MIN_DB, BAND_GAIN_MAX_DB, 0.0),
            visualizer_active: true,
            solo_highlight: false,
        }
    }

    pub fn is_soloed(&self) -> bool {
        self.solo.is_on()
    }

    pub fn is_muted(&self) -> bool {
        self.mute.is_on()
    }

    /// Silent because another band is soloed
    pub fn is_silenced_by_solo(&self) -> bool {
        self.solo_highlight && !self.is_soloed()
    }

    /// Current values as engine parameters
    pub fn params(&self) -> BandParams {
        BandParams {
            direction: self.direction.value(),
            gain_db: self.gain.value(),
            solo: self.is_soloed(),
            mute: self.is_muted(),
        }
    }
}

/// The five bands plus the active count
#[derive(Debug, Clone, PartialEq)]
pub struct BandSet {
    pub bands: [Band; MAX_BANDS],
    /// Crossover `i` separates band `i` from band `i + 1` (Hz)
    pub crossovers: [f32; NUM_CROSSOVERS],
    pub active_count: usize,
}

impl BandSet {
    pub fn new(active_count: usize) -> Self {
        Self {
            bands: std::array::from_fn(Band::new),
            crossovers: DEFAULT_CROSSOVERS,
            active_count: active_count.clamp(1, MAX_BANDS),
        }
    }

    /// Crossover above band `index`, absent for the last active band
    pub fn crossover(&self, index: usize) -> Option<f32> {
        if index + 1 < self.active_count {
            self.crossovers.get(index).copied()
        } else {
            None
        }
    }

    /// Crossovers between the active bands, lowest first
    pub fn active_crossovers(&self) -> &[f32] {
        &self.crossovers[..self.active_count - 1]
    }

    /// OR of every band's solo flag
    pub fn any_soloed(&self) -> bool {
        self.bands.iter().any(Band::is_soloed)
    }
}

/// A change made through the controller that the engine must hear about
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BandEvent {
    SoloChanged { band: usize, solo: bool },
    MuteChanged { band: usize, mute: bool },
    DirectionChanged { band: usize, value: f32 },
    GainChanged { band: usize, gain_db: f32 },
    CrossoverChanged { index: usize, freq: f32 },
}

impl BandEvent {
    /// Forward the change to the engine
    pub fn apply_to<E: polar_core::PolarEngine + ?Sized>(&self, engine: &E) {
        match *self {
            Self::SoloChanged { band, solo } => engine.set_band_solo(band, solo),
            Self::MuteChanged { band, mute } => engine.set_band_mute(band, mute),
            Self::DirectionChanged { band, value } => engine.set_direction_weight(band, value),
            Self::GainChanged { band, gain_db } => engine.set_band_gain(band, gain_db),
            Self::CrossoverChanged { index, freq } => engine.set_crossover_frequency(index, freq),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_active_band_has_no_crossover() {
        let set = BandSet::new(3);
        assert_eq!(set.crossover(0), Some(DEFAULT_CROSSOVERS[0]));
        assert_eq!(set.crossover(1), Some(DEFAULT_CROSSOVERS[1]));
        assert_eq!(set.crossover(2), None);
        assert_eq!(set.active_crossovers().len(), 2);
    }

    #[test]
    fn test_single_band_has_no_crossovers() {
        let set = BandSet::new(1);
        assert!(set.active_crossovers().is_empty());
        assert_eq!(set.crossover(0), None);
    }

    #[test]
    fn test_silenced_by_solo() {
        let mut band = Band::new(1);
        band.solo_highlight = true;
        assert!(band.is_silenced_by_solo());
        band.solo.set_on(true);
        assert!(!band.is_silenced_by_solo());
    }
}
