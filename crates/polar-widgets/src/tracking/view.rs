//! Overlay views
//!
//! The overlay sits on an opaque scrim, so nothing behind it can be clicked
//! while it is open. There is no click-outside-to-close; only the overlay's
//! own buttons leave it.

use iced::widget::{button, center, column, container, opaque, row, stack, text, Space};
use iced::{Alignment, Border, Element, Length};

use super::overlay::Overlay;
use crate::button_styles::momentary_style;
use crate::theme::DesignerStyle;

const OVERLAY_WIDTH: f32 = 420.0;

/// Buttons of the overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayMessage {
    Apply,
    Cancel,
    MaximizeRatio,
    Acknowledge,
}

/// Content of the visible overlay, or `None` when nothing is shown
pub fn overlay_view<'a>(
    overlay: &'a Overlay,
    style: &'a DesignerStyle,
) -> Option<Element<'a, OverlayMessage>> {
    let buttons: Element<'a, OverlayMessage> = match overlay {
        Overlay::None => return None,
        Overlay::Error { .. } => {
            row![overlay_button("okay", Some(OverlayMessage::Acknowledge), style)].into()
        }
        Overlay::Disturber { ratio_enabled } | Overlay::Signal { ratio_enabled } => row![
            overlay_button("cancel", Some(OverlayMessage::Cancel), style),
            Space::new().width(Length::Fill),
            overlay_button(
                "maximize ratio",
                ratio_enabled.then_some(OverlayMessage::MaximizeRatio),
                style,
            ),
            overlay_button("apply", Some(OverlayMessage::Apply), style),
        ]
        .spacing(8)
        .into(),
    };

    let content = container(
        column![
            text(overlay.title()).size(16).color(style.text),
            text(overlay.message()).size(12).color(style.text_dim),
            buttons,
        ]
        .spacing(12)
        .align_x(Alignment::Start),
    )
    .padding(16)
    .width(Length::Fixed(OVERLAY_WIDTH))
    .style(move |_| container::Style {
        background: Some(style.overlay_background.into()),
        border: Border {
            color: style.border,
            width: 1.0,
            radius: 6.0.into(),
        },
        ..Default::default()
    });

    Some(content.into())
}

fn overlay_button<'a>(
    label: &'a str,
    on_press: Option<OverlayMessage>,
    style: &DesignerStyle,
) -> Element<'a, OverlayMessage> {
    let base = style.overlay_button;
    button(text(label).size(12))
        .padding([4, 12])
        .on_press_maybe(on_press)
        .style(move |_, status| momentary_style(status, base))
        .into()
}

/// Stack `modal` over `base` behind a scrim that swallows input
pub fn with_overlay<'a, Message: 'a>(
    base: Element<'a, Message>,
    modal: Element<'a, Message>,
    style: &DesignerStyle,
) -> Element<'a, Message> {
    let scrim = style.scrim;
    let backdrop = opaque(
        container(Space::new())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_| container::Style {
                background: Some(scrim.into()),
                ..Default::default()
            }),
    );
    let modal = center(opaque(modal))
        .width(Length::Fill)
        .height(Length::Fill);

    stack![base, backdrop, modal].into()
}
