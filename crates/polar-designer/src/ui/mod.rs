//! UI module for Polar Designer
//!
//! Built with iced. The application owns the band and tracking controllers
//! from `polar-widgets` and talks to the engine only through `PolarEngine`.

pub mod app;
pub mod handlers;
pub mod message;
mod view;

pub use app::DesignerApp;
