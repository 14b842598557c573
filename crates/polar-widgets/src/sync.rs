//! Engine-to-editor reconciliation
//!
//! The engine raises dirty flags from whatever thread changed something. The
//! editor's tick calls [`SyncPoller::poll`], which test-and-clears each flag
//! once and brings the band controller back in line:
//!
//! | flag                       | reconciliation                               |
//! |----------------------------|----------------------------------------------|
//! | `repaint_requested`        | re-read band values and crossovers           |
//! | `band_count_changed`       | `set_active_count`, re-read everything       |
//! | `zero_delay_mode_changed`  | `apply_zero_delay_mode`                      |
//! | `eq_mode_changed`          | report the mode for the exclusive choice     |
//!
//! Two raises of one flag between ticks are seen as one.

use std::time::Duration;

use polar_core::{EngineFlag, EqualizationMode, PolarEngine, MAX_BANDS, NUM_CROSSOVERS};

use crate::bands::BandStateController;

/// Poll period of the editor tick
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(30);

/// What one poll reconciled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncReport {
    pub repaint: bool,
    /// New band count, if the engine announced one
    pub band_count: Option<usize>,
    pub zero_delay: Option<bool>,
    pub eq_mode: Option<EqualizationMode>,
}

impl SyncReport {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Band widths must be recomputed
    pub fn needs_relayout(&self) -> bool {
        self.band_count.is_some() || self.repaint || self.zero_delay.is_some()
    }
}

/// Fixed-interval poller of the engine's dirty flags
#[derive(Debug, Clone, Copy)]
pub struct SyncPoller {
    interval: Duration,
}

impl Default for SyncPoller {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl SyncPoller {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Test-and-clear every flag and reconcile `bands` with `engine`
    pub fn poll<E: PolarEngine + ?Sized>(
        &self,
        engine: &E,
        bands: &mut BandStateController,
    ) -> SyncReport {
        let flags = engine.flags();
        let mut report = SyncReport::default();

        if flags.take(EngineFlag::RepaintRequested) {
            report.repaint = true;
        }

        if flags.take(EngineFlag::BandCountChanged) {
            let count = engine.active_band_count();
            if bands.set_active_count(count) {
                report.band_count = Some(count);
            } else {
                log::warn!("sync: engine reported invalid band count {}", count);
            }
        }

        if report.repaint || report.band_count.is_some() {
            read_band_values(engine, bands);
        }
        if report.band_count.is_some() {
            // Engine values may leave a revealed crossover out of order
            bands.spread_active_crossovers();
        }

        if flags.take(EngineFlag::ZeroDelayModeChanged) {
            let active = engine.is_zero_delay_mode_active();
            bands.apply_zero_delay_mode(active);
            report.zero_delay = Some(active);
        }

        if flags.take(EngineFlag::EqModeChanged) {
            report.eq_mode = Some(engine.equalization_mode());
        }

        if report.band_count.is_some() || report.zero_delay.is_some() || report.eq_mode.is_some() {
            log::debug!("sync: {:?}", report);
        }
        report
    }
}

fn read_band_values<E: PolarEngine + ?Sized>(engine: &E, bands: &mut BandStateController) {
    for index in 0..MAX_BANDS {
        bands.sync_band(index, engine.band_params(index));
    }
    for index in 0..NUM_CROSSOVERS {
        bands.sync_crossover(index, engine.crossover_frequency(index));
    }
}
