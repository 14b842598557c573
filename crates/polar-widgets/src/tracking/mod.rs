//! Target tracking workflow
//!
//! Recording a target is modal: while the engine tracks, an overlay explains
//! what to play and offers apply / cancel / maximize ratio, and the rest of
//! the editor is disabled. Preset failures reuse the same overlay surface.

mod controller;
mod error;
mod overlay;
mod view;

pub use controller::{
    InteractionAreas, TrackingEvent, TrackingMode, TrackingSession, TrackingWorkflowController,
};
pub use error::{TransitionError, TransitionResult};
pub use overlay::{Overlay, PresetOperation, DISTURBER_MESSAGE, SIGNAL_MESSAGE, TRACKING_TITLE};
pub use view::{overlay_view, with_overlay, OverlayMessage};
