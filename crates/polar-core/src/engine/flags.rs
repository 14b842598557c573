//! Test-and-clear dirty flags shared between the engine and the editor
//!
//! The processing side raises a flag whenever something the editor mirrors
//! has changed. The editor's tick swaps it back to `false`, so each raise
//! triggers exactly one reconciliation. Two raises of the same flag between
//! ticks coalesce into one.

use std::sync::atomic::{AtomicBool, Ordering};

/// A single lock-free dirty flag
#[derive(Debug, Default)]
pub struct DirtyFlag(AtomicBool);

impl DirtyFlag {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Mark as dirty (processing side)
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Read and clear in one step (editor side)
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

/// Names of the individual flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineFlag {
    RepaintRequested,
    BandCountChanged,
    ZeroDelayModeChanged,
    EqModeChanged,
}

impl EngineFlag {
    /// Poll order used by the editor tick
    pub const ALL: [EngineFlag; 4] = [
        Self::RepaintRequested,
        Self::BandCountChanged,
        Self::ZeroDelayModeChanged,
        Self::EqModeChanged,
    ];
}

/// The four flags the editor polls
#[derive(Debug, Default)]
pub struct EngineFlags {
    pub repaint_requested: DirtyFlag,
    pub band_count_changed: DirtyFlag,
    pub zero_delay_mode_changed: DirtyFlag,
    pub eq_mode_changed: DirtyFlag,
}

impl EngineFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, flag: EngineFlag) -> &DirtyFlag {
        match flag {
            EngineFlag::RepaintRequested => &self.repaint_requested,
            EngineFlag::BandCountChanged => &self.band_count_changed,
            EngineFlag::ZeroDelayModeChanged => &self.zero_delay_mode_changed,
            EngineFlag::EqModeChanged => &self.eq_mode_changed,
        }
    }

    pub fn raise(&self, flag: EngineFlag) {
        self.get(flag).raise();
    }

    pub fn take(&self, flag: EngineFlag) -> bool {
        self.get(flag).take()
    }
}
