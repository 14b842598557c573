//! Band state controller
//!
//! Owns the [`BandSet`] and keeps its invariants:
//!
//! - bands `[0, active_count)` are visible, the rest hidden with solo and
//!   mute cleared
//! - only bands `[0, effective_active_count)` accept input, and only while
//!   interaction is enabled
//! - every band's `solo_highlight` equals the solo aggregate
//!
//! User edits queue a [`BandEvent`]; the application drains them and
//! forwards them to the engine. Values adopted from the engine
//! (`sync_*`) queue nothing.

use polar_core::{BandParams, FREQ_MAX, FREQ_MIN, MAX_BANDS, NUM_CROSSOVERS};

use super::state::{Band, BandEvent, BandSet};
use crate::controls::{RangedValue, Toggleable};
use crate::trim::TrimEvent;

/// Minimum distance kept between neighbouring crossovers (Hz)
const CROSSOVER_MIN_GAP: f32 = 10.0;

#[derive(Debug, Clone)]
pub struct BandStateController {
    set: BandSet,
    zero_delay: bool,
    interaction_enabled: bool,
    solo_aggregate: bool,
    events: Vec<BandEvent>,
}

impl Default for BandStateController {
    fn default() -> Self {
        Self::new(MAX_BANDS)
    }
}

impl BandStateController {
    pub fn new(active_count: usize) -> Self {
        let mut controller = Self {
            set: BandSet::new(active_count),
            zero_delay: false,
            interaction_enabled: true,
            solo_aggregate: false,
            events: Vec::new(),
        };
        controller.refresh_interactivity();
        controller
    }

    // ─────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────

    pub fn active_count(&self) -> usize {
        self.set.active_count
    }

    /// Bands that accept input: 1 in zero-delay mode, else the active count
    pub fn effective_active_count(&self) -> usize {
        if self.zero_delay {
            1
        } else {
            self.set.active_count
        }
    }

    pub fn band(&self, index: usize) -> Option<&Band> {
        self.set.bands.get(index)
    }

    pub fn bands(&self) -> &[Band] {
        &self.set.bands
    }

    pub fn band_set(&self) -> &BandSet {
        &self.set
    }

    pub fn crossover(&self, index: usize) -> Option<f32> {
        self.set.crossover(index)
    }

    pub fn active_crossovers(&self) -> &[f32] {
        self.set.active_crossovers()
    }

    /// SoloAggregate: whether any band is soloed
    pub fn any_soloed(&self) -> bool {
        self.solo_aggregate
    }

    pub fn is_zero_delay_mode(&self) -> bool {
        self.zero_delay
    }

    pub fn is_interaction_enabled(&self) -> bool {
        self.interaction_enabled
    }

    /// Which visible bands take part in layout
    pub fn visualizer_mask(&self) -> [bool; MAX_BANDS] {
        std::array::from_fn(|i| self.set.bands[i].visible && self.set.bands[i].visualizer_active)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Active set
    // ─────────────────────────────────────────────────────────────────────

    /// Change the number of active bands; out-of-range counts are ignored
    ///
    /// Returns whether the count was accepted.
    pub fn set_active_count(&mut self, count: usize) -> bool {
        if !(1..=MAX_BANDS).contains(&count) {
            log::debug!("set_active_count: ignoring out-of-range count {}", count);
            return false;
        }

        self.set.active_count = count;
        for index in count..MAX_BANDS {
            self.clear_solo_and_mute(index);
        }
        self.spread_active_crossovers();
        self.refresh_interactivity();
        self.recompute_solo_aggregate();
        log::debug!("set_active_count: {} active bands", count);
        true
    }

    /// Restrict input to band 0 while the engine runs without latency
    ///
    /// Bands above 0 stay visible; their solo and mute are cleared.
    pub fn apply_zero_delay_mode(&mut self, active: bool) {
        self.zero_delay = active;
        if active {
            for index in 1..MAX_BANDS {
                self.clear_solo_and_mute(index);
            }
            self.recompute_solo_aggregate();
        }
        self.refresh_interactivity();
        log::debug!(
            "apply_zero_delay_mode({}): {} interactive bands",
            active,
            self.effective_active_count()
        );
    }

    /// Block input on every band; flags and counts are untouched
    pub fn disable_all(&mut self) {
        self.interaction_enabled = false;
        self.refresh_interactivity();
    }

    /// Restore input on bands `[0, effective_active_count)`
    pub fn enable_all(&mut self) {
        self.interaction_enabled = true;
        self.refresh_interactivity();
    }

    // ─────────────────────────────────────────────────────────────────────
    // User edits
    // ─────────────────────────────────────────────────────────────────────

    /// Flip band `index`'s solo; ignored for bands that don't accept input
    pub fn toggle_solo(&mut self, index: usize) -> bool {
        if !self.accepts_input(index) {
            return false;
        }
        let solo = self.set.bands[index].solo.toggle();
        self.events.push(BandEvent::SoloChanged { band: index, solo });
        self.recompute_solo_aggregate();
        true
    }

    /// Flip band `index`'s mute; ignored for bands that don't accept input
    pub fn toggle_mute(&mut self, index: usize) -> bool {
        if !self.accepts_input(index) {
            return false;
        }
        let mute = self.set.bands[index].mute.toggle();
        self.events.push(BandEvent::MuteChanged { band: index, mute });
        self.recompute_solo_aggregate();
        true
    }

    pub fn set_direction_weight(&mut self, index: usize, value: f32) -> bool {
        if !self.accepts_input(index) {
            return false;
        }
        let band = &mut self.set.bands[index];
        band.direction.set_value(value);
        let value = band.direction.value();
        self.events.push(BandEvent::DirectionChanged { band: index, value });
        true
    }

    pub fn set_gain(&mut self, index: usize, gain_db: f32) -> bool {
        if !self.accepts_input(index) {
            return false;
        }
        let band = &mut self.set.bands[index];
        band.gain.set_value(gain_db);
        let gain_db = band.gain.value();
        self.events.push(BandEvent::GainChanged { band: index, gain_db });
        true
    }

    /// Move crossover `index`, clamped between its neighbours
    ///
    /// Returns the stored frequency, or `None` if the crossover is not
    /// between two active bands or input is blocked.
    pub fn set_crossover(&mut self, index: usize, freq: f32) -> Option<f32> {
        if index + 1 >= self.set.active_count || !self.interaction_enabled || self.zero_delay {
            return None;
        }

        let crossovers = &mut self.set.crossovers;
        let lower = if index == 0 {
            FREQ_MIN
        } else {
            crossovers[index - 1]
        } + CROSSOVER_MIN_GAP;
        // The last active crossover has no upper neighbour
        let upper = if index + 2 >= self.set.active_count || index + 1 == NUM_CROSSOVERS {
            FREQ_MAX
        } else {
            crossovers[index + 1]
        } - CROSSOVER_MIN_GAP;

        let freq = if lower <= upper {
            freq.clamp(lower, upper)
        } else {
            // Neighbours closer than the gap: keep the current value
            crossovers[index]
        };
        crossovers[index] = freq;
        self.events.push(BandEvent::CrossoverChanged { index, freq });
        Some(freq)
    }

    /// Restore a strictly increasing sequence among the active crossovers
    ///
    /// A crossover revealed by a larger band count may sit at or below its
    /// lower neighbour, which could move freely while it was hidden. Such a
    /// crossover is moved to the log midpoint between that neighbour and
    /// `FREQ_MAX`, queueing a change for the engine.
    pub fn spread_active_crossovers(&mut self) {
        let active = self.set.active_count.saturating_sub(1).min(NUM_CROSSOVERS);
        for index in 1..active {
            let lower = self.set.crossovers[index - 1];
            if self.set.crossovers[index] > lower + CROSSOVER_MIN_GAP {
                continue;
            }
            let freq = (lower * FREQ_MAX).sqrt();
            log::debug!(
                "spread_active_crossovers: crossover {} {:.1} -> {:.1} Hz",
                index,
                self.set.crossovers[index],
                freq
            );
            self.set.crossovers[index] = freq;
            self.events.push(BandEvent::CrossoverChanged { index, freq });
        }
    }

    /// Apply one trim step to every interactive band
    pub fn apply_trim(&mut self, event: TrimEvent, step: f32) {
        if !self.interaction_enabled {
            return;
        }
        let delta = event.signed(step);
        for index in 0..self.effective_active_count() {
            let value = self.set.bands[index].direction.nudge(delta);
            self.events
                .push(BandEvent::DirectionChanged { band: index, value });
        }
    }

    /// Take the queued changes for forwarding to the engine
    pub fn drain_events(&mut self) -> Vec<BandEvent> {
        std::mem::take(&mut self.events)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Engine sync
    // ─────────────────────────────────────────────────────────────────────

    /// Adopt the engine's values for band `index`
    pub fn sync_band(&mut self, index: usize, params: BandParams) {
        let Some(band) = self.set.bands.get_mut(index) else {
            return;
        };
        band.direction.set_value(params.direction);
        band.gain.set_value(params.gain_db);
        // Inactive bands never carry solo or mute
        let active = index < self.set.active_count;
        band.solo.set_on(active && params.solo);
        band.mute.set_on(active && params.mute);
        self.recompute_solo_aggregate();
    }

    /// Adopt the engine's crossover `index`
    pub fn sync_crossover(&mut self, index: usize, freq: f32) {
        if let Some(x) = self.set.crossovers.get_mut(index) {
            *x = freq;
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────

    fn accepts_input(&self, index: usize) -> bool {
        self.set.bands.get(index).is_some_and(|b| b.enabled)
    }

    fn clear_solo_and_mute(&mut self, index: usize) {
        let band = &mut self.set.bands[index];
        if band.solo.is_on() {
            band.solo.set_on(false);
            self.events
                .push(BandEvent::SoloChanged { band: index, solo: false });
        }
        if band.mute.is_on() {
            band.mute.set_on(false);
            self.events
                .push(BandEvent::MuteChanged { band: index, mute: false });
        }
    }

    fn refresh_interactivity(&mut self) {
        let active = self.set.active_count;
        let interactive = self.effective_active_count();
        let enabled = self.interaction_enabled;
        for band in self.set.bands.iter_mut() {
            band.visible = band.index < active;
            band.enabled = enabled && band.index < interactive;
        }
    }

    fn recompute_solo_aggregate(&mut self) {
        self.solo_aggregate = self.set.any_soloed();
        let aggregate = self.solo_aggregate;
        for band in self.set.bands.iter_mut() {
            band.solo_highlight = aggregate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trim::TRIM_STEP;
    use approx::assert_relative_eq;

    fn assert_cascade(controller: &BandStateController, n: usize) {
        for band in controller.bands() {
            if band.index < n {
                assert!(band.enabled && band.visible, "band {} should be active", band.index);
            } else {
                assert!(!band.enabled && !band.visible, "band {} should be inactive", band.index);
                assert!(!band.is_soloed() && !band.is_muted());
            }
        }
    }

    #[test]
    fn test_set_active_count_cascade() {
        for n in 1..=MAX_BANDS {
            let mut controller = BandStateController::new(MAX_BANDS);
            for i in 0..MAX_BANDS {
                controller.toggle_solo(i);
                controller.toggle_mute(i);
            }
            assert!(controller.set_active_count(n));
            assert_eq!(controller.active_count(), n);
            assert_cascade(&controller, n);
        }
    }

    #[test]
    fn test_out_of_range_count_ignored() {
        let mut controller = BandStateController::new(3);
        assert!(!controller.set_active_count(0));
        assert!(!controller.set_active_count(6));
        assert_eq!(controller.active_count(), 3);
        assert_cascade(&controller, 3);
    }

    #[test]
    fn test_deactivation_clears_flags_with_events() {
        let mut controller = BandStateController::new(5);
        controller.toggle_solo(4);
        controller.drain_events();

        controller.set_active_count(2);
        let events = controller.drain_events();
        assert_eq!(events, vec![BandEvent::SoloChanged { band: 4, solo: false }]);
        assert!(!controller.any_soloed());
        assert!(controller.bands().iter().all(|b| !b.solo_highlight));
    }

    #[test]
    fn test_solo_aggregate_propagates() {
        let mut controller = BandStateController::new(3);
        assert!(controller.toggle_solo(1));
        assert!(controller.any_soloed());
        assert!(controller.bands().iter().all(|b| b.solo_highlight));

        controller.toggle_solo(1);
        assert!(!controller.any_soloed());
    }

    #[test]
    fn test_toggle_ignored_on_disabled_band() {
        let mut controller = BandStateController::new(2);
        assert!(!controller.toggle_solo(3));
        assert!(!controller.toggle_mute(3));
        assert!(controller.drain_events().is_empty());

        controller.disable_all();
        assert!(!controller.toggle_solo(0));
    }

    #[test]
    fn test_zero_delay_round_trip_restores_interactivity() {
        for n in 1..=MAX_BANDS {
            let mut controller = BandStateController::new(n);
            let before: Vec<_> = controller.bands().iter().map(|b| b.enabled).collect();

            controller.apply_zero_delay_mode(true);
            assert_eq!(controller.effective_active_count(), 1);
            assert_eq!(controller.active_count(), n);
            assert!(controller.bands()[1..].iter().all(|b| !b.enabled));
            assert!(controller.bands().iter().take(n).all(|b| b.visible));

            controller.apply_zero_delay_mode(false);
            let after: Vec<_> = controller.bands().iter().map(|b| b.enabled).collect();
            assert_eq!(before, after);
        }
    }

    #[test]
    fn test_zero_delay_clears_upper_band_flags() {
        let mut controller = BandStateController::new(4);
        controller.toggle_mute(2);
        controller.toggle_solo(0);
        controller.apply_zero_delay_mode(true);
        assert!(!controller.bands()[2].is_muted());
        assert!(controller.bands()[0].is_soloed());
    }

    #[test]
    fn test_disable_enable_keeps_state() {
        let mut controller = BandStateController::new(3);
        controller.toggle_solo(2);
        controller.disable_all();
        assert!(controller.bands().iter().all(|b| !b.enabled));
        assert_eq!(controller.active_count(), 3);
        assert!(controller.bands()[2].is_soloed());

        controller.enable_all();
        assert_cascade(&controller, 3);
        assert!(controller.bands()[2].is_soloed());
    }

    #[test]
    fn test_enable_all_honours_zero_delay() {
        let mut controller = BandStateController::new(4);
        controller.apply_zero_delay_mode(true);
        controller.disable_all();
        controller.enable_all();
        assert!(controller.bands()[0].enabled);
        assert!(!controller.bands()[1].enabled);
    }

    #[test]
    fn test_trim_moves_all_interactive_bands() {
        let mut controller = BandStateController::new(3);
        for _ in 0..4 {
            controller.apply_trim(TrimEvent::Increment, TRIM_STEP);
        }
        for band in &controller.bands()[..3] {
            assert_relative_eq!(band.direction.value(), 4.0 * TRIM_STEP, epsilon = 1e-6);
        }
        assert_relative_eq!(controller.bands()[3].direction.value(), 0.0);
        assert_eq!(controller.drain_events().len(), 12);
    }

    #[test]
    fn test_trim_in_zero_delay_moves_band_zero_only() {
        let mut controller = BandStateController::new(3);
        controller.apply_zero_delay_mode(true);
        controller.apply_trim(TrimEvent::Decrement, TRIM_STEP);
        assert_relative_eq!(controller.bands()[0].direction.value(), -TRIM_STEP);
        assert_relative_eq!(controller.bands()[1].direction.value(), 0.0);
    }

    #[test]
    fn test_crossover_clamped_between_neighbours() {
        let mut controller = BandStateController::new(5);
        let stored = controller.set_crossover(1, 50.0).unwrap();
        assert_relative_eq!(stored, 160.0);
        let stored = controller.set_crossover(1, 30_000.0).unwrap();
        assert_relative_eq!(stored, 2390.0);
        assert!(controller
            .band_set()
            .crossovers
            .windows(2)
            .all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_last_active_crossover_reaches_top_of_axis() {
        let mut two = BandStateController::new(2);
        let stored = two.set_crossover(0, 5000.0).unwrap();
        assert_relative_eq!(stored, 5000.0);
        let stored = two.set_crossover(0, 30_000.0).unwrap();
        assert_relative_eq!(stored, FREQ_MAX - CROSSOVER_MIN_GAP);

        let mut three = BandStateController::new(3);
        let stored = three.set_crossover(1, 10_000.0).unwrap();
        assert_relative_eq!(stored, 10_000.0);
        // Lower neighbour still bounds it
        let stored = three.set_crossover(1, 20.0).unwrap();
        assert_relative_eq!(stored, 160.0);
    }

    #[test]
    fn test_growing_band_count_respreads_crossovers() {
        let mut controller = BandStateController::new(2);
        controller.set_crossover(0, 5000.0);
        controller.drain_events();

        assert!(controller.set_active_count(4));
        let active = controller.active_crossovers().to_vec();
        assert_eq!(active.len(), 3);
        assert!(active.windows(2).all(|w| w[0] < w[1]));
        assert!(active.iter().all(|&f| f < FREQ_MAX));
        assert_relative_eq!(active[1], 10_000.0, epsilon = 1e-2);

        let moved: Vec<usize> = controller
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                BandEvent::CrossoverChanged { index, .. } => Some(index),
                _ => None,
            })
            .collect();
        assert_eq!(moved, vec![1, 2]);
    }

    #[test]
    fn test_shrinking_band_count_keeps_crossovers() {
        let mut controller = BandStateController::new(5);
        controller.set_active_count(2);
        assert!(controller.drain_events().is_empty());
        assert_eq!(controller.crossover(0), Some(150.0));
    }

    #[test]
    fn test_crossover_of_last_active_band_rejected() {
        let mut controller = BandStateController::new(2);
        assert!(controller.set_crossover(0, 300.0).is_some());
        assert!(controller.set_crossover(1, 3000.0).is_none());
    }

    #[test]
    fn test_sync_band_queues_nothing() {
        let mut controller = BandStateController::new(2);
        controller.sync_band(
            1,
            BandParams {
                direction: 0.5,
                gain_db: -3.0,
                solo: true,
                mute: false,
            },
        );
        assert!(controller.drain_events().is_empty());
        assert!(controller.any_soloed());
        assert_relative_eq!(controller.bands()[1].gain.value(), -3.0);

        // Inactive band cannot be soloed from the engine side
        controller.sync_band(
            4,
            BandParams {
                solo: true,
                ..BandParams::default()
            },
        );
        assert!(!controller.bands()[4].is_soloed());
    }
}
