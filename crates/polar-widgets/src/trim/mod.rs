//! Endless trim control
//!
//! A vertical strip without a position. Dragging or scrolling it produces a
//! stream of [`TrimEvent`]s; each one nudges the direction weight of every
//! interactive band by [`TRIM_STEP`].
//!
//! - [`TrimGesture`]: displacement bookkeeping, input to events
//! - [`tick_marks`]: scrolling tick geometry for the view
//! - [`trim_control`]: canvas view publishing raw drag/wheel measurements

mod canvas;
mod gesture;

pub use canvas::{trim_control, TrimCanvas, TrimInteraction};
pub use gesture::{tick_marks, TickMark, TrimEvent, TrimGesture, TRIM_STEP, TRIM_TICK_COUNT};
