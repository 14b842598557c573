//! Editor logic and views for Polar Designer
//!
//! ## Architecture (iced 0.14 patterns)
//!
//! - **Controllers**: plain structs that own state and enforce its
//!   invariants ([`BandStateController`], [`TrackingWorkflowController`])
//! - **Pure functions**: layout and gesture math with no UI dependency
//!   ([`compute_band_widths`], [`TrimGesture`])
//! - **View functions**: take state plus a [`DesignerStyle`] and return an
//!   `Element` of this crate's message types
//!
//! Data flow:
//!
//! ```text
//! gesture ─▶ TrimGesture ─▶ BandStateController ─▶ LayoutFrame ─▶ view
//!                                ▲      │ BandEvent
//!                   SyncPoller ──┘      ▼
//!                        ▲           PolarEngine
//!                        └── dirty flags ┘
//! ```

pub mod bands;
pub mod button_styles;
pub mod controls;
pub mod layout;
pub mod sync;
pub mod theme;
pub mod tracking;
pub mod trim;

pub use bands::{
    band_strips, control_parameter_index, directivity_bar, toggle_button, Band, BandEvent,
    BandMessage, BandSet, BandStateController, ControlId,
};
pub use controls::{BandToggle, RangedParam, RangedValue, Switch, ToggleKind, Toggleable};
pub use layout::{
    compute_band_widths, crossover_positions, dir_eq_size, middle_column_width, BandWidth,
    LayoutFrame,
};
pub use sync::{SyncPoller, SyncReport, DEFAULT_POLL_INTERVAL};
pub use theme::{DesignerStyle, BAND_COLORS};
pub use tracking::{
    overlay_view, with_overlay, InteractionAreas, Overlay, OverlayMessage, PresetOperation,
    TrackingMode, TrackingSession, TrackingWorkflowController, TransitionError,
};
pub use trim::{trim_control, TrimEvent, TrimGesture, TRIM_STEP};
