//! Tracking workflow state machine
//!
//! ```text
//!            start disturber / start signal
//!   Idle ──────────────────────────────────────▶ Tracking*
//!    ▲ │                                           │
//!    │ │ load/save failed        apply / cancel /  │
//!    │ ▼                         maximize ratio    │
//!   Error ◀─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ┘ (back to Idle)
//!    │  acknowledge
//!    └──────────────▶ Idle
//! ```
//!
//! Every overlay disables both interaction areas while it is open; closing
//! it re-enables them. The controller is the only place that changes
//! overlay visibility.

use std::sync::Arc;

use polar_core::{PolarEngine, TrackingResult, TrackingTarget};

use super::error::{TransitionError, TransitionResult};
use super::overlay::{Overlay, PresetOperation};
use crate::bands::BandStateController;

/// Recording phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingMode {
    #[default]
    Idle,
    TrackingDisturber,
    TrackingSignal,
}

impl TrackingMode {
    fn target(self) -> Option<TrackingTarget> {
        match self {
            Self::Idle => None,
            Self::TrackingDisturber => Some(TrackingTarget::Disturber),
            Self::TrackingSignal => Some(TrackingTarget::Signal),
        }
    }
}

/// Inputs of the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingEvent {
    StartDisturberTracking,
    StartSignalTracking,
    Apply,
    Cancel,
    MaximizeRatio,
    LoadOrSaveFailed,
    Acknowledge,
}

/// Per-editor tracking state, never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackingSession {
    pub mode: TrackingMode,
    pub disturber_recorded: bool,
    pub signal_recorded: bool,
}

/// Which parts of the editor accept input
///
/// The main area holds the band controls, the visualizers and the zero
/// latency toggle. The side area holds band count, presets, equalization,
/// proximity, tracking and sync controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionAreas {
    pub main: bool,
    pub side: bool,
}

impl Default for InteractionAreas {
    fn default() -> Self {
        Self {
            main: true,
            side: true,
        }
    }
}

/// Drives the two-phase recording workflow and its overlays
///
/// Dropping the controller while tracking cancels the recording.
pub struct TrackingWorkflowController<E: PolarEngine + ?Sized> {
    engine: Arc<E>,
    session: TrackingSession,
    overlay: Overlay,
    areas: InteractionAreas,
}

impl<E: PolarEngine + ?Sized> TrackingWorkflowController<E> {
    pub fn new(engine: Arc<E>) -> Self {
        let session = TrackingSession {
            mode: TrackingMode::Idle,
            disturber_recorded: engine.is_disturber_recorded(),
            signal_recorded: engine.is_signal_recorded(),
        };
        Self {
            engine,
            session,
            overlay: Overlay::None,
            areas: InteractionAreas::default(),
        }
    }

    pub fn session(&self) -> TrackingSession {
        self.session
    }

    pub fn mode(&self) -> TrackingMode {
        self.session.mode
    }

    pub fn is_tracking(&self) -> bool {
        self.session.mode != TrackingMode::Idle
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn areas(&self) -> InteractionAreas {
        self.areas
    }

    // ─────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────

    pub fn start_disturber_tracking(
        &mut self,
        bands: &mut BandStateController,
    ) -> TransitionResult {
        self.start(TrackingTarget::Disturber, bands)
    }

    pub fn start_signal_tracking(&mut self, bands: &mut BandStateController) -> TransitionResult {
        self.start(TrackingTarget::Signal, bands)
    }

    /// Stop tracking and apply the captured target
    pub fn apply(&mut self, bands: &mut BandStateController) -> TransitionResult {
        self.stop(TrackingEvent::Apply, TrackingResult::Apply, bands)
    }

    /// Stop tracking and discard the capture
    pub fn cancel(&mut self, bands: &mut BandStateController) -> TransitionResult {
        self.stop(TrackingEvent::Cancel, TrackingResult::Cancel, bands)
    }

    /// Stop tracking and optimise the target-to-spill ratio
    pub fn maximize_ratio(&mut self, bands: &mut BandStateController) -> TransitionResult {
        if self.is_tracking() && !self.overlay.ratio_enabled() {
            log::warn!("maximize_ratio: ratio option not enabled");
            return Err(TransitionError::RatioUnavailable);
        }
        self.stop(
            TrackingEvent::MaximizeRatio,
            TrackingResult::MaximizeRatio,
            bands,
        )
    }

    /// Show the error overlay for a failed preset load or save
    pub fn load_or_save_failed(
        &mut self,
        operation: PresetOperation,
        message: impl Into<String>,
        bands: &mut BandStateController,
    ) -> TransitionResult {
        self.check_idle(TrackingEvent::LoadOrSaveFailed)?;
        let overlay = Overlay::error(operation, message);
        log::error!("{}: {}", overlay.title(), overlay.message());
        self.overlay = overlay;
        self.disable_areas(bands);
        Ok(())
    }

    /// Close the error overlay
    pub fn acknowledge(&mut self, bands: &mut BandStateController) -> TransitionResult {
        if !matches!(self.overlay, Overlay::Error { .. }) {
            return Err(TransitionError::InvalidInMode {
                event: TrackingEvent::Acknowledge,
                mode: self.session.mode,
            });
        }
        self.close_overlay(bands);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────

    fn check_idle(&self, event: TrackingEvent) -> TransitionResult {
        if self.is_tracking() {
            return Err(TransitionError::InvalidInMode {
                event,
                mode: self.session.mode,
            });
        }
        if matches!(self.overlay, Overlay::Error { .. }) {
            return Err(TransitionError::ErrorShown { event });
        }
        Ok(())
    }

    fn start(
        &mut self,
        target: TrackingTarget,
        bands: &mut BandStateController,
    ) -> TransitionResult {
        let (event, mode) = match target {
            TrackingTarget::Disturber => (
                TrackingEvent::StartDisturberTracking,
                TrackingMode::TrackingDisturber,
            ),
            TrackingTarget::Signal => (
                TrackingEvent::StartSignalTracking,
                TrackingMode::TrackingSignal,
            ),
        };
        self.check_idle(event)?;

        self.session.disturber_recorded = self.engine.is_disturber_recorded();
        self.session.signal_recorded = self.engine.is_signal_recorded();
        // The ratio needs the other target already captured
        let ratio_enabled = match target {
            TrackingTarget::Disturber => self.session.signal_recorded,
            TrackingTarget::Signal => self.session.disturber_recorded,
        };

        self.engine.start_tracking(target);
        self.session.mode = mode;
        self.overlay = Overlay::tracking(target, ratio_enabled);
        self.disable_areas(bands);
        log::info!("tracking: started {:?} (ratio {})", target, ratio_enabled);
        Ok(())
    }

    fn stop(
        &mut self,
        event: TrackingEvent,
        result: TrackingResult,
        bands: &mut BandStateController,
    ) -> TransitionResult {
        let Some(target) = self.session.mode.target() else {
            return Err(TransitionError::InvalidInMode {
                event,
                mode: self.session.mode,
            });
        };

        self.engine.stop_tracking(result);
        if result != TrackingResult::Cancel {
            match target {
                TrackingTarget::Disturber => self.session.disturber_recorded = true,
                TrackingTarget::Signal => self.session.signal_recorded = true,
            }
        }
        self.session.mode = TrackingMode::Idle;
        self.close_overlay(bands);
        log::info!("tracking: {:?} stopped with {:?}", target, result);
        Ok(())
    }

    fn disable_areas(&mut self, bands: &mut BandStateController) {
        self.areas = InteractionAreas {
            main: false,
            side: false,
        };
        bands.disable_all();
    }

    fn close_overlay(&mut self, bands: &mut BandStateController) {
        self.overlay = Overlay::None;
        bands.enable_all();
        self.areas = InteractionAreas::default();
    }
}

impl<E: PolarEngine + ?Sized> Drop for TrackingWorkflowController<E> {
    fn drop(&mut self) {
        if self.is_tracking() {
            log::info!("tracking: controller dropped while tracking, cancelling");
            self.engine.stop_tracking(TrackingResult::Cancel);
            self.session.mode = TrackingMode::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polar_core::SimulatedEngine;

    fn setup() -> (
        Arc<SimulatedEngine>,
        TrackingWorkflowController<SimulatedEngine>,
        BandStateController,
    ) {
        let engine = Arc::new(SimulatedEngine::new(3));
        let workflow = TrackingWorkflowController::new(Arc::clone(&engine));
        (engine, workflow, BandStateController::new(3))
    }

    fn assert_idle_and_open(
        workflow: &TrackingWorkflowController<SimulatedEngine>,
        bands: &BandStateController,
    ) {
        assert_eq!(workflow.mode(), TrackingMode::Idle);
        assert!(!workflow.overlay().is_visible());
        assert_eq!(workflow.areas(), InteractionAreas::default());
        assert!(bands.bands()[..3].iter().all(|b| b.enabled));
    }

    #[test]
    fn test_start_disturber_disables_areas() {
        let (engine, mut workflow, mut bands) = setup();
        workflow.start_disturber_tracking(&mut bands).unwrap();

        assert_eq!(workflow.mode(), TrackingMode::TrackingDisturber);
        assert_eq!(
            workflow.overlay(),
            &Overlay::Disturber {
                ratio_enabled: false
            }
        );
        assert!(!workflow.areas().main && !workflow.areas().side);
        assert!(bands.bands().iter().all(|b| !b.enabled));
        assert_eq!(engine.tracking_target(), Some(TrackingTarget::Disturber));
    }

    #[test]
    fn test_ratio_enabled_after_other_target_recorded() {
        let (_engine, mut workflow, mut bands) = setup();
        workflow.start_signal_tracking(&mut bands).unwrap();
        workflow.apply(&mut bands).unwrap();
        assert!(workflow.session().signal_recorded);

        workflow.start_disturber_tracking(&mut bands).unwrap();
        assert!(workflow.overlay().ratio_enabled());
        workflow.maximize_ratio(&mut bands).unwrap();
        assert_idle_and_open(&workflow, &bands);
    }

    #[test]
    fn test_stop_transitions_return_to_idle() {
        for result in [TrackingResult::Apply, TrackingResult::Cancel] {
            let (engine, mut workflow, mut bands) = setup();
            workflow.start_signal_tracking(&mut bands).unwrap();
            match result {
                TrackingResult::Apply => workflow.apply(&mut bands).unwrap(),
                _ => workflow.cancel(&mut bands).unwrap(),
            }
            assert_idle_and_open(&workflow, &bands);
            assert_eq!(engine.last_tracking_result(), Some(result));
        }
    }

    #[test]
    fn test_ratio_rejected_when_disabled() {
        let (_engine, mut workflow, mut bands) = setup();
        workflow.start_disturber_tracking(&mut bands).unwrap();
        assert_eq!(
            workflow.maximize_ratio(&mut bands),
            Err(TransitionError::RatioUnavailable)
        );
        assert!(workflow.is_tracking());
    }

    #[test]
    fn test_invalid_events_leave_state_unchanged() {
        let (_engine, mut workflow, mut bands) = setup();
        assert!(workflow.apply(&mut bands).is_err());
        assert!(workflow.acknowledge(&mut bands).is_err());

        workflow.start_signal_tracking(&mut bands).unwrap();
        let err = workflow.start_disturber_tracking(&mut bands).unwrap_err();
        assert!(matches!(err, TransitionError::InvalidInMode { .. }));
        assert_eq!(workflow.mode(), TrackingMode::TrackingSignal);
        assert!(workflow
            .load_or_save_failed(PresetOperation::Load, "x", &mut bands)
            .is_err());
        assert!(matches!(workflow.overlay(), Overlay::Signal { .. }));
    }

    #[test]
    fn test_error_overlay_round_trip() {
        let (_engine, mut workflow, mut bands) = setup();
        workflow
            .load_or_save_failed(PresetOperation::Save, "disk full", &mut bands)
            .unwrap();
        assert_eq!(workflow.overlay().title(), "preset save error!");
        assert!(!workflow.areas().side);
        assert!(workflow.start_signal_tracking(&mut bands).is_err());

        workflow.acknowledge(&mut bands).unwrap();
        assert_idle_and_open(&workflow, &bands);
    }

    #[test]
    fn test_drop_while_tracking_cancels() {
        let (engine, mut workflow, mut bands) = setup();
        workflow.start_disturber_tracking(&mut bands).unwrap();
        drop(workflow);
        assert_eq!(engine.last_tracking_result(), Some(TrackingResult::Cancel));
        assert_eq!(engine.tracking_target(), None);
        assert!(!engine.is_disturber_recorded());
    }

    #[test]
    fn test_drop_while_idle_does_nothing() {
        let (engine, workflow, _bands) = setup();
        drop(workflow);
        assert_eq!(engine.last_tracking_result(), None);
    }
}
