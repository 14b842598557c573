//! Rejected workflow transitions

use thiserror::Error;

use super::controller::{TrackingEvent, TrackingMode};

/// An event that is not valid in the current workflow state
///
/// Nothing changes when a transition is rejected; callers log and move on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("{event:?} is not valid while {mode:?}")]
    InvalidInMode {
        event: TrackingEvent,
        mode: TrackingMode,
    },

    #[error("{event:?} is not valid while an error is shown")]
    ErrorShown { event: TrackingEvent },

    #[error("maximize ratio needs both targets recorded")]
    RatioUnavailable,
}

/// Result type for workflow transitions
pub type TransitionResult = Result<(), TransitionError>;
