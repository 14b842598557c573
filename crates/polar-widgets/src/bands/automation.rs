//! Host parameter indices of the editor's controls
//!
//! Hosts address parameters by a flat index. Right-clicking a control shows
//! its index so the user can find it in the host's automation lanes.

use polar_core::{MAX_BANDS, NUM_CROSSOVERS};

const CROSSOVER_BASE: usize = 0;
const DIRECTION_BASE: usize = 4;
const SOLO_BASE: usize = 9;
const MUTE_BASE: usize = 14;
const GAIN_BASE: usize = 19;
const PROXIMITY_INDEX: usize = 26;

/// An automatable editor control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlId {
    Crossover(usize),
    Direction(usize),
    Solo(usize),
    Mute(usize),
    Gain(usize),
    Proximity,
}

impl ControlId {
    pub fn label(self) -> String {
        match self {
            Self::Crossover(i) => format!("crossover {}", i + 1),
            Self::Direction(i) => format!("band {} pattern", i + 1),
            Self::Solo(i) => format!("band {} solo", i + 1),
            Self::Mute(i) => format!("band {} mute", i + 1),
            Self::Gain(i) => format!("band {} gain", i + 1),
            Self::Proximity => "proximity".to_string(),
        }
    }
}

/// Host parameter index of `control`, or `None` if it belongs to an
/// inactive band
pub fn control_parameter_index(control: ControlId, active_count: usize) -> Option<usize> {
    let band_slot =
        |base: usize, band: usize| (band < active_count.min(MAX_BANDS)).then_some(base + band);
    match control {
        ControlId::Crossover(i) => {
            (i < NUM_CROSSOVERS && i + 1 < active_count).then_some(CROSSOVER_BASE + i)
        }
        ControlId::Direction(i) => band_slot(DIRECTION_BASE, i),
        ControlId::Solo(i) => band_slot(SOLO_BASE, i),
        ControlId::Mute(i) => band_slot(MUTE_BASE, i),
        ControlId::Gain(i) => band_slot(GAIN_BASE, i),
        ControlId::Proximity => Some(PROXIMITY_INDEX),
    }
}
