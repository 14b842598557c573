//! Band state and band views
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │ directivity bar:  band 1 │ band 2 │   band 3   │   band 4     │
//! │                       150Hz    600Hz       2.4kHz   (drag)    │
//! ├───────────────────────────────────────────────────────────────┤
//! │ pattern        [────●──] [──●────] [─────●────] [───●──────]  │
//! │ mute/solo      [M]   [S] [M]   [S] [M]      [S] [M]      [S]  │
//! │ gain           [──●────] [────●──] [──●───────] [─────●────]  │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Strip columns take the pixel widths of a [`crate::layout::LayoutFrame`]
//! so they stay under their band's segment of the directivity bar.

mod automation;
mod controller;
mod message;
mod state;
mod view;

pub use automation::{control_parameter_index, ControlId};
pub use controller::BandStateController;
pub use message::BandMessage;
pub use state::{Band, BandEvent, BandSet};
pub use view::{
    band_strips, directivity_bar, toggle_button, DIRECTIVITY_BAR_HEIGHT, STRIP_ROW_HEIGHT,
};
