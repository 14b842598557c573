//! The modal overlays of the tracking workflow

use polar_core::TrackingTarget;

/// Title of both tracking overlays
pub const TRACKING_TITLE: &str = "acquiring target!";

pub const DISTURBER_MESSAGE: &str = "Make sure playback of an undesired target signal (spill) \
    is active. Terminate to apply polar patterns with minimum spill energy. Also track a \
    desired signal to be able to maximize the target-to-spill ratio.";

pub const SIGNAL_MESSAGE: &str = "Make sure playback of a desired target signal is active. \
    Stop signal tracking to apply polar patterns with maximum signal energy. Also track an \
    undesired spill target to be able to maximize the target-to-spill ratio.";

/// Preset operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetOperation {
    Load,
    Save,
}

impl PresetOperation {
    pub fn error_title(self) -> &'static str {
        match self {
            Self::Load => "preset load error!",
            Self::Save => "preset save error!",
        }
    }
}

/// Which overlay is on screen; at most one at a time
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Error {
        title: String,
        message: String,
    },
    Disturber {
        ratio_enabled: bool,
    },
    Signal {
        ratio_enabled: bool,
    },
}

impl Overlay {
    pub fn error(operation: PresetOperation, message: impl Into<String>) -> Self {
        Self::Error {
            title: operation.error_title().to_string(),
            message: message.into(),
        }
    }

    pub fn tracking(target: TrackingTarget, ratio_enabled: bool) -> Self {
        match target {
            TrackingTarget::Disturber => Self::Disturber { ratio_enabled },
            TrackingTarget::Signal => Self::Signal { ratio_enabled },
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::None)
    }

    pub fn title(&self) -> &str {
        match self {
            Self::None => "",
            Self::Error { title, .. } => title,
            Self::Disturber { .. } | Self::Signal { .. } => TRACKING_TITLE,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::None => "",
            Self::Error { message, .. } => message,
            Self::Disturber { .. } => DISTURBER_MESSAGE,
            Self::Signal { .. } => SIGNAL_MESSAGE,
        }
    }

    /// Whether the maximize-ratio button is offered
    pub fn ratio_enabled(&self) -> bool {
        matches!(
            self,
            Self::Disturber {
                ratio_enabled: true
            } | Self::Signal {
                ratio_enabled: true
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_overlay_titles() {
        let load = Overlay::error(PresetOperation::Load, "bad file");
        assert_eq!(load.title(), "preset load error!");
        assert_eq!(load.message(), "bad file");
        assert_eq!(
            Overlay::error(PresetOperation::Save, "").title(),
            "preset save error!"
        );
    }

    #[test]
    fn test_tracking_overlay_texts() {
        let overlay = Overlay::tracking(TrackingTarget::Disturber, false);
        assert_eq!(overlay.title(), TRACKING_TITLE);
        assert!(overlay.message().contains("spill"));
        assert!(!overlay.ratio_enabled());
        assert!(Overlay::tracking(TrackingTarget::Signal, true).ratio_enabled());
    }

    #[test]
    fn test_none_is_hidden() {
        assert!(!Overlay::None.is_visible());
        assert!(Overlay::tracking(TrackingTarget::Signal, false).is_visible());
    }
}
