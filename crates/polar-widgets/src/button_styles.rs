//! Raised/pressed button styling for the editor
//!
//! - Momentary buttons (load, save, tracking): pressed look while held
//! - Toggles and exclusive choices: stay pressed in while selected
//! - A/B layer buttons: fixed look, faded by the layer alpha

use iced::widget::button::{Status, Style};
use iced::{Background, Border, Color, Shadow, Vector};

/// Background of unselected buttons
pub const DEFAULT_BG: Color = Color::from_rgb(0.25, 0.25, 0.25);

const SHADOW_OFFSET: Vector = Vector::new(2.0, 2.0);
const SHADOW_BLUR: f32 = 3.0;
const RADIUS: f32 = 4.0;

fn lighten(color: Color, amount: f32) -> Color {
    Color {
        r: (color.r + amount).min(1.0),
        g: (color.g + amount).min(1.0),
        b: (color.b + amount).min(1.0),
        ..color
    }
}

fn darken(color: Color, amount: f32) -> Color {
    Color {
        r: (color.r * (1.0 - amount)).max(0.0),
        g: (color.g * (1.0 - amount)).max(0.0),
        b: (color.b * (1.0 - amount)).max(0.0),
        ..color
    }
}

fn raised(base: Color) -> Style {
    Style {
        background: Some(Background::Color(base)),
        text_color: Color::WHITE,
        border: Border {
            color: lighten(base, 0.1),
            width: 1.0,
            radius: RADIUS.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.4),
            offset: SHADOW_OFFSET,
            blur_radius: SHADOW_BLUR,
        },
        snap: false,
    }
}

fn pressed(base: Color) -> Style {
    Style {
        background: Some(Background::Color(darken(base, 0.15))),
        text_color: Color::WHITE,
        border: Border {
            color: darken(base, 0.2),
            width: 1.0,
            radius: RADIUS.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.2),
            offset: Vector::new(0.5, 0.5),
            blur_radius: 1.0,
        },
        snap: false,
    }
}

fn disabled() -> Style {
    Style {
        background: Some(Background::Color(Color::from_rgb(0.2, 0.2, 0.2))),
        text_color: Color::from_rgb(0.5, 0.5, 0.5),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: RADIUS.into(),
        },
        shadow: Shadow::default(),
        snap: false,
    }
}

/// Momentary button in `base` colour
pub fn momentary_style(status: Status, base: Color) -> Style {
    match status {
        Status::Active => raised(base),
        Status::Hovered => raised(lighten(base, 0.08)),
        Status::Pressed => pressed(base),
        Status::Disabled => disabled(),
    }
}

/// Toggle or exclusive-choice button
///
/// Selected: pressed in with `active_color`. Unselected: raised grey.
pub fn toggle_style(status: Status, is_active: bool, active_color: Color) -> Style {
    let base = if is_active { active_color } else { DEFAULT_BG };
    match (status, is_active) {
        (Status::Disabled, _) => disabled(),
        (Status::Active, true) => pressed(base),
        (Status::Hovered, true) => pressed(lighten(base, 0.08)),
        (Status::Pressed, true) => pressed(darken(base, 0.1)),
        (Status::Active, false) => raised(base),
        (Status::Hovered, false) => raised(lighten(base, 0.08)),
        (Status::Pressed, false) => pressed(base),
    }
}

/// A/B layer button; `alpha` comes from [`polar_core::AbLayer::button_alpha`]
pub fn layer_style(status: Status, alpha: f32, base: Color) -> Style {
    let mut style = momentary_style(status, base);
    if let Some(Background::Color(color)) = style.background {
        style.background = Some(Background::Color(Color { a: alpha, ..color }));
    }
    style.text_color = Color {
        a: alpha,
        ..style.text_color
    };
    style
}
