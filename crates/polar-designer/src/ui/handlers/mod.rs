//! Message handlers for DesignerApp
//!
//! Each handler module is responsible for a specific category of messages.
//! Handlers receive `&mut DesignerApp` and return `Task<Message>`.

pub mod bands;
pub mod controls;
pub mod preset;
pub mod tick;
pub mod tracking;
