//! Polar Designer Core - engine contract and shared types for the editor
//!
//! The editor never talks to DSP code directly. Everything it needs from the
//! audio side goes through the [`PolarEngine`] trait:
//!
//! - **Parameters**: band count, per-band direction/gain/solo/mute, crossovers
//! - **Tracking**: start/stop of the disturber/signal recording workflow
//! - **Presets**: load/save, reported as [`PresetError`] on failure
//! - **Dirty flags**: [`EngineFlags`], set by the processing side and
//!   test-and-cleared by the editor's 30 ms tick
//!
//! [`SimulatedEngine`] is an in-process implementation used by the standalone
//! editor and by tests.

pub mod config;
pub mod engine;
pub mod preset;
pub mod types;

pub use engine::{
    BandParams, DirtyFlag, EngineFlag, EngineFlags, PolarEngine, PresetError, PresetResult,
    SimulatedEngine,
};
pub use types::*;
