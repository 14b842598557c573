//! Main application state and message dispatch

use std::path::PathBuf;
use std::sync::Arc;

use iced::{time, window, Size, Subscription, Task, Theme};

use polar_core::config::default_preset_dir;
use polar_core::{AbLayer, EqualizationMode, PolarEngine, MAX_BANDS, NUM_CROSSOVERS};
use polar_widgets::{
    BandStateController, DesignerStyle, Switch, SyncPoller, Toggleable, TrackingWorkflowController,
    TrimGesture,
};

use super::handlers;
use super::message::Message;
use crate::config::DesignerConfig;

/// Editor application state
pub struct DesignerApp {
    /// Engine the editor controls
    pub(crate) engine: Arc<dyn PolarEngine>,
    pub(crate) config: DesignerConfig,
    pub(crate) config_path: PathBuf,
    pub(crate) style: DesignerStyle,

    pub(crate) bands: BandStateController,
    pub(crate) tracking: TrackingWorkflowController<dyn PolarEngine>,
    pub(crate) poller: SyncPoller,
    pub(crate) trim: TrimGesture,

    pub(crate) window_size: Size,
    /// Crossover handle being dragged
    pub(crate) dragging_crossover: Option<usize>,

    // Mirrors of the engine's global controls
    pub(crate) sync_channel: usize,
    pub(crate) eq_mode: EqualizationMode,
    pub(crate) zero_delay: Switch,
    pub(crate) proximity: f32,
    pub(crate) allow_reverse: Switch,
    pub(crate) ab_layer: AbLayer,

    /// Status line (parameter indices, preset results)
    pub(crate) status: String,
}

impl DesignerApp {
    pub fn new(engine: Arc<dyn PolarEngine>, config: DesignerConfig, config_path: PathBuf) -> Self {
        let bands = BandStateController::new(engine.active_band_count());
        let tracking = TrackingWorkflowController::new(Arc::clone(&engine));
        let window_size = Size::new(config.window.width, config.window.height);

        let mut app = Self {
            poller: SyncPoller::new(config.poll_interval()),
            engine,
            config,
            config_path,
            style: DesignerStyle::default(),
            bands,
            tracking,
            trim: TrimGesture::new(),
            window_size,
            dragging_crossover: None,
            sync_channel: 0,
            eq_mode: EqualizationMode::default(),
            zero_delay: Switch::default(),
            proximity: 0.0,
            allow_reverse: Switch::default(),
            ab_layer: AbLayer::A,
            status: String::new(),
        };
        app.read_engine_state();
        app
    }

    /// Adopt every value the engine currently holds
    pub(crate) fn read_engine_state(&mut self) {
        for index in 0..MAX_BANDS {
            self.bands.sync_band(index, self.engine.band_params(index));
        }
        for index in 0..NUM_CROSSOVERS {
            self.bands
                .sync_crossover(index, self.engine.crossover_frequency(index));
        }
        self.zero_delay
            .set_on(self.engine.is_zero_delay_mode_active());
        self.bands.apply_zero_delay_mode(self.zero_delay.is_on());
        self.eq_mode = self.engine.equalization_mode();
        self.read_global_controls();
    }

    pub(crate) fn read_global_controls(&mut self) {
        self.sync_channel = self.engine.sync_channel_index();
        self.proximity = self.engine.proximity();
        self.allow_reverse
            .set_on(self.engine.allow_backwards_pattern());
        self.ab_layer = self.engine.ab_layer();
    }

    /// Main area: band strips, directivity bar, trim, zero-latency toggle
    pub fn main_area_enabled(&self) -> bool {
        self.tracking.areas().main
    }

    /// Side area: global controls, tracking and presets
    ///
    /// Also disabled while zero-latency mode is active.
    pub fn side_area_enabled(&self) -> bool {
        self.tracking.areas().side && !self.zero_delay.is_on()
    }

    /// Directory preset dialogs open in
    pub(crate) fn preset_dir(&self) -> PathBuf {
        self.engine
            .last_preset_dir()
            .or_else(|| self.config.last_preset_dir.clone())
            .unwrap_or_else(default_preset_dir)
    }

    /// Send queued band edits to the engine
    fn forward_band_events(&mut self) {
        for event in self.bands.drain_events() {
            log::trace!("band event: {:?}", event);
            event.apply_to(self.engine.as_ref());
        }
    }

    /// Update application state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        let task = match message {
            Message::Tick => handlers::tick::handle(self),
            Message::WindowResized(size) => {
                self.window_size = size;
                Task::none()
            }

            Message::Band(band_msg) => handlers::bands::handle(self, band_msg),
            Message::TrimDragged(distance) => handlers::bands::handle_trim_drag(self, distance),
            Message::TrimScrolled(delta, height) => {
                handlers::bands::handle_trim_scroll(self, delta, height)
            }
            Message::ToggleZeroDelay => handlers::controls::toggle_zero_delay(self),

            Message::SetBandCount(count) => handlers::controls::set_band_count(self, count),
            Message::SetSyncChannel(index) => handlers::controls::set_sync_channel(self, index),
            Message::SetEqMode(mode) => handlers::controls::set_eq_mode(self, mode),
            Message::SetProximity(value) => handlers::controls::set_proximity(self, value),
            Message::ToggleAllowReverse => handlers::controls::toggle_allow_reverse(self),
            Message::SetAbLayer(layer) => handlers::controls::set_ab_layer(self, layer),

            Message::StartDisturberTracking => handlers::tracking::start_disturber(self),
            Message::StartSignalTracking => handlers::tracking::start_signal(self),
            Message::Overlay(overlay_msg) => handlers::tracking::handle_overlay(self, overlay_msg),

            Message::LoadPreset => handlers::preset::open_load_dialog(self),
            Message::SavePreset => handlers::preset::open_save_dialog(self),
            Message::PresetLoadPicked(path) => handlers::preset::load_picked(self, path),
            Message::PresetSavePicked(path) => handlers::preset::save_picked(self, path),
        };

        self.forward_band_events();
        task
    }

    /// Engine poll and window size tracking
    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            time::every(self.poller.interval()).map(|_| Message::Tick),
            window::resize_events().map(|(_id, size)| Message::WindowResized(size)),
        ])
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use polar_core::SimulatedEngine;
    use polar_widgets::{BandMessage, ControlId, OverlayMessage, TRIM_STEP};

    struct Harness {
        engine: Arc<SimulatedEngine>,
        app: DesignerApp,
        dir: tempfile::TempDir,
    }

    fn harness(band_count: usize) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let engine = Arc::new(SimulatedEngine::new(band_count));
        let shared: Arc<dyn PolarEngine> = engine.clone();
        let app = DesignerApp::new(
            shared,
            DesignerConfig::default(),
            dir.path().join("config.yaml"),
        );
        Harness {
            engine,
            app,
            dir,
        }
    }

    #[test]
    fn test_new_reads_engine_state() {
        let engine = Arc::new(SimulatedEngine::new(3));
        engine.set_band_gain(2, 4.5);
        engine.set_proximity(0.25);
        let app = DesignerApp::new(
            engine.clone(),
            DesignerConfig::default(),
            PathBuf::from("unused.yaml"),
        );

        assert_eq!(app.bands.active_count(), 3);
        assert_relative_eq!(app.bands.bands()[2].params().gain_db, 4.5);
        assert_relative_eq!(app.proximity, 0.25);
        assert!(app.side_area_enabled());
    }

    #[test]
    fn test_solo_is_forwarded_to_engine() {
        let mut h = harness(3);
        let _ = h.app.update(Message::Band(BandMessage::ToggleSolo(1)));
        assert!(h.engine.band_params(1).solo);
    }

    #[test]
    fn test_trim_drag_moves_all_bands() {
        let mut h = harness(2);
        let _ = h.app.update(Message::TrimDragged(-3.0));
        assert_relative_eq!(h.engine.band_params(0).direction, TRIM_STEP);
        assert_relative_eq!(h.engine.band_params(1).direction, TRIM_STEP);
    }

    #[test]
    fn test_band_count_change_resets_sync_channel() {
        let mut h = harness(5);
        let _ = h.app.update(Message::SetSyncChannel(3));
        assert_eq!(h.engine.sync_channel_index(), 3);

        h.engine.set_active_band_count(2);
        let _ = h.app.update(Message::Tick);

        assert_eq!(h.app.bands.active_count(), 2);
        assert_eq!(h.app.sync_channel, 0);
        assert_eq!(h.engine.sync_channel_index(), 0);
    }

    #[test]
    fn test_sync_channel_limited_by_band_count() {
        let mut h = harness(2);
        let _ = h.app.update(Message::SetSyncChannel(3));
        assert_eq!(h.app.sync_channel, 0);
        let _ = h.app.update(Message::SetSyncChannel(2));
        assert_eq!(h.app.sync_channel, 2);
    }

    #[test]
    fn test_zero_delay_disables_side_area() {
        let mut h = harness(4);
        let _ = h.app.update(Message::ToggleZeroDelay);
        let _ = h.app.update(Message::Tick);
        assert!(h.app.zero_delay.is_on());
        assert!(!h.app.side_area_enabled());
        assert_eq!(h.app.bands.effective_active_count(), 1);

        let _ = h.app.update(Message::SetBandCount(2));
        assert_eq!(h.engine.active_band_count(), 4);
    }

    #[test]
    fn test_tracking_overlay_blocks_main_area() {
        let mut h = harness(3);
        let _ = h.app.update(Message::StartDisturberTracking);
        assert!(!h.app.main_area_enabled());
        assert!(!h.app.side_area_enabled());

        let _ = h.app.update(Message::TrimDragged(-4.0));
        let _ = h.app.update(Message::ToggleZeroDelay);
        assert_relative_eq!(h.engine.band_params(0).direction, 0.0);
        assert!(!h.engine.is_zero_delay_mode_active());

        let _ = h.app.update(Message::Overlay(OverlayMessage::Cancel));
        assert!(h.app.main_area_enabled());
        assert!(!h.engine.is_disturber_recorded());
    }

    #[test]
    fn test_ab_switch_rereads_controls() {
        let mut h = harness(5);
        let _ = h.app.update(Message::SetProximity(0.5));
        let _ = h.app.update(Message::SetAbLayer(AbLayer::B));
        let _ = h.app.update(Message::Tick);

        assert_eq!(h.app.ab_layer, AbLayer::B);
        assert_relative_eq!(h.app.proximity, 0.0);

        let _ = h.app.update(Message::SetAbLayer(AbLayer::A));
        let _ = h.app.update(Message::Tick);
        assert_relative_eq!(h.app.proximity, 0.5);
    }

    #[test]
    fn test_parameter_index_status() {
        let mut h = harness(2);
        let _ = h.app.update(Message::Band(BandMessage::ShowParameterIndex(
            ControlId::Gain(1),
        )));
        assert_eq!(h.app.status, "band 2 gain: parameter 20");

        let _ = h.app.update(Message::Band(BandMessage::ShowParameterIndex(
            ControlId::Gain(3),
        )));
        assert_eq!(h.app.status, "band 4 gain: inactive");
    }

    #[test]
    fn test_crossover_drag() {
        let mut h = harness(3);
        let _ = h.app.update(Message::Band(BandMessage::StartDragCrossover(0)));
        let _ = h.app.update(Message::Band(BandMessage::DragCrossover(300.0)));
        let _ = h.app.update(Message::Band(BandMessage::EndDragCrossover));

        assert_relative_eq!(h.engine.crossover_frequency(0), 300.0);
        assert!(h.app.dragging_crossover.is_none());

        // Ignored once released
        let _ = h.app.update(Message::Band(BandMessage::DragCrossover(400.0)));
        assert_relative_eq!(h.engine.crossover_frequency(0), 300.0);
    }

    #[test]
    fn test_failed_preset_load_shows_error() {
        let mut h = harness(3);
        let path = h.dir.path().join("broken.json");
        std::fs::write(&path, "{").unwrap();

        let _ = h.app.update(Message::PresetLoadPicked(Some(path)));
        assert_eq!(h.app.tracking.overlay().title(), "preset load error!");
        assert!(!h.app.main_area_enabled());

        let _ = h.app.update(Message::Overlay(OverlayMessage::Acknowledge));
        assert!(h.app.main_area_enabled());
    }

    #[test]
    fn test_preset_save_and_load_remember_directory() {
        let mut h = harness(3);
        let preset_dir = h.dir.path().join("presets");
        std::fs::create_dir_all(&preset_dir).unwrap();

        let _ = h.app.update(Message::SetEqMode(EqualizationMode::DiffuseField));
        let _ = h
            .app
            .update(Message::PresetSavePicked(Some(preset_dir.join("vocal"))));
        let saved = preset_dir.join("vocal.json");
        assert!(saved.exists());
        assert_eq!(h.app.preset_dir(), preset_dir);

        let reloaded = crate::config::load_config(&h.app.config_path);
        assert_eq!(reloaded.last_preset_dir, Some(preset_dir.clone()));

        let _ = h.app.update(Message::SetEqMode(EqualizationMode::Off));
        let _ = h.app.update(Message::PresetLoadPicked(Some(saved)));
        assert_eq!(h.app.eq_mode, EqualizationMode::DiffuseField);
        assert!(!h.app.tracking.overlay().is_visible());
    }

    #[test]
    fn test_cancelled_dialog_changes_nothing() {
        let mut h = harness(3);
        let _ = h.app.update(Message::PresetLoadPicked(None));
        let _ = h.app.update(Message::PresetSavePicked(None));
        assert!(!h.app.tracking.overlay().is_visible());
        assert!(h.engine.last_preset_dir().is_none());
    }
}
