//! Band views: directivity bar with crossover handles and band strips
//!
//! Both views read band state by index from the controller. Disabled bands
//! are still drawn; the controller ignores their input.

use iced::widget::{button, column, container, mouse_area, row, slider, text, Row, Space};
use iced::{Alignment, Border, Color, Element, Length, Point};

use polar_core::{format_freq, position_to_freq, FREQ_MAX, FREQ_MIN};

use super::automation::ControlId;
use super::controller::BandStateController;
use super::message::BandMessage;
use super::state::Band;
use crate::button_styles::toggle_style;
use crate::controls::{RangedValue, Toggleable};
use crate::layout::{
    crossover_positions, dir_eq_size, segment_widths, LayoutFrame, DIR_EQ_OFFSET, HANDLE_WIDTH,
    VISUALIZER_OFFSET,
};
use crate::theme::DesignerStyle;

/// Height of the directivity bar
pub const DIRECTIVITY_BAR_HEIGHT: f32 = 140.0;

/// Height of one band strip row
pub const STRIP_ROW_HEIGHT: f32 = 32.0;

// ─────────────────────────────────────────────────────────────────────────────
// Directivity bar
// ─────────────────────────────────────────────────────────────────────────────

/// Band segments on a log frequency axis with draggable crossover handles
///
/// `eq_width` is the width the bar is laid out at. Segments are sized in
/// pixels for it so the handles sit on the crossover positions the band
/// strips are laid out from; it also converts cursor positions back to
/// frequencies while a handle is dragged.
pub fn directivity_bar<'a>(
    controller: &'a BandStateController,
    style: &'a DesignerStyle,
    eq_width: f32,
    dragging: Option<usize>,
) -> Element<'a, BandMessage> {
    let active = controller.active_count();
    let positions = crossover_positions(controller.active_crossovers(), eq_width);
    let widths = segment_widths(active, &positions, eq_width);
    let mut segments: Vec<Element<'a, BandMessage>> = Vec::with_capacity(2 * active + 1);
    segments.push(Space::new().width(Length::Fixed(VISUALIZER_OFFSET)).into());

    for (band, &width) in controller.bands().iter().take(active).zip(&widths) {
        let low = if band.index == 0 {
            FREQ_MIN
        } else {
            controller.crossover(band.index - 1).unwrap_or(FREQ_MIN)
        };
        let high = controller.crossover(band.index).unwrap_or(FREQ_MAX);
        segments.push(band_segment(band, low, high, width, style));

        if let Some(freq) = controller.crossover(band.index) {
            segments.push(crossover_handle(
                band.index,
                freq,
                dragging == Some(band.index),
                band.enabled,
                style,
            ));
        }
    }
    segments.push(
        Space::new()
            .width(Length::Fixed(DIR_EQ_OFFSET - VISUALIZER_OFFSET))
            .into(),
    );

    let bar = container(Row::with_children(segments).height(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fixed(DIRECTIVITY_BAR_HEIGHT))
        .style(move |_| container::Style {
            background: Some(style.panel.into()),
            border: Border {
                color: style.border,
                width: 1.0,
                radius: 4.0.into(),
            },
            ..Default::default()
        });

    let mut area = mouse_area(bar).on_release(BandMessage::EndDragCrossover);
    if dragging.is_some() {
        let plot = dir_eq_size(eq_width).max(1.0);
        area = area.on_move(move |point: Point| {
            let position = (point.x - VISUALIZER_OFFSET) / plot;
            BandMessage::DragCrossover(position_to_freq(position))
        });
    }
    area.into()
}

fn band_segment<'a>(
    band: &Band,
    low: f32,
    high: f32,
    width: f32,
    style: &DesignerStyle,
) -> Element<'a, BandMessage> {
    let mut color = style.band_color_for(band.index, band.is_silenced_by_solo());
    if !band.enabled {
        color = color.scale_alpha(0.5);
    }
    let text_color = style.text;
    let dim = style.text_dim;

    container(
        column![
            text(format!("band {}", band.index + 1))
                .size(11)
                .color(text_color),
            text(format!("{} - {}", format_freq(low), format_freq(high)))
                .size(9)
                .color(dim),
            text(format!("pattern {:+.2}", band.direction.value()))
                .size(9)
                .color(dim),
        ]
        .spacing(2)
        .align_x(Alignment::Center),
    )
    .width(Length::Fixed(width))
    .height(Length::Fill)
    .center_x(Length::Fixed(width))
    .center_y(Length::Fill)
    .style(move |_| container::Style {
        background: Some(color.into()),
        ..Default::default()
    })
    .into()
}

fn crossover_handle<'a>(
    index: usize,
    freq: f32,
    is_dragging: bool,
    enabled: bool,
    style: &DesignerStyle,
) -> Element<'a, BandMessage> {
    let color = if is_dragging { style.accent } else { style.text };

    let content = container(
        column![
            container(Space::new())
                .width(Length::Fixed(2.0))
                .height(Length::Fill)
                .style(move |_| container::Style {
                    background: Some(color.into()),
                    ..Default::default()
                }),
            text(format_freq(freq)).size(8).color(color),
        ]
        .spacing(2)
        .align_x(Alignment::Center),
    )
    .width(Length::Fixed(HANDLE_WIDTH))
    .height(Length::Fill)
    .center_x(Length::Fixed(HANDLE_WIDTH));

    let area = mouse_area(content)
        .on_right_press(BandMessage::ShowParameterIndex(ControlId::Crossover(index)));
    if enabled {
        area.on_press(BandMessage::StartDragCrossover(index))
            .on_release(BandMessage::EndDragCrossover)
            .into()
    } else {
        area.into()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Band strips
// ─────────────────────────────────────────────────────────────────────────────

/// Direction sliders, mute/solo buttons and gain sliders, one column per
/// laid-out band
pub fn band_strips<'a>(
    controller: &'a BandStateController,
    style: &'a DesignerStyle,
    frame: &LayoutFrame,
) -> Element<'a, BandMessage> {
    column![
        strip_row(controller, frame, |band| direction_slider(band)),
        strip_row(controller, frame, |band| mute_solo_pair(band, style)),
        strip_row(controller, frame, |band| gain_slider(band, style)),
    ]
    .spacing(4)
    .into()
}

fn strip_row<'a>(
    controller: &'a BandStateController,
    frame: &LayoutFrame,
    cell: impl Fn(&'a Band) -> Element<'a, BandMessage>,
) -> Element<'a, BandMessage> {
    let mut cells: Vec<Element<'a, BandMessage>> = Vec::with_capacity(frame.bands.len() + 2);
    cells.push(Space::new().width(Length::Fixed(frame.left_margin)).into());
    for &(index, px) in &frame.bands {
        let Some(band) = controller.band(index) else {
            continue;
        };
        cells.push(
            container(cell(band))
                .width(Length::Fixed(px.max(0.0)))
                .padding([0, 4])
                .center_y(Length::Fixed(STRIP_ROW_HEIGHT))
                .into(),
        );
    }
    cells.push(Space::new().width(Length::Fixed(frame.right_margin)).into());
    Row::with_children(cells)
        .height(Length::Fixed(STRIP_ROW_HEIGHT))
        .into()
}

fn direction_slider<'a>(band: &'a Band) -> Element<'a, BandMessage> {
    let index = band.index;
    let direction = band.direction;
    let control = slider(0.0..=1.0, direction.normalized(), move |n| {
        BandMessage::DirectionChanged(index, direction.value_at(n))
    })
    .step(0.001);
    mouse_area(control)
        .on_right_press(BandMessage::ShowParameterIndex(ControlId::Direction(index)))
        .into()
}

fn gain_slider<'a>(band: &'a Band, style: &DesignerStyle) -> Element<'a, BandMessage> {
    let index = band.index;
    let control = slider(band.gain.range(), band.gain.value(), move |v| {
        BandMessage::GainChanged(index, v)
    })
    .step(0.1);
    let label = text(format!("{:+.1} dB", band.gain.value()))
        .size(9)
        .color(style.text_dim);
    mouse_area(row![control, label].spacing(4).align_y(Alignment::Center))
        .on_right_press(BandMessage::ShowParameterIndex(ControlId::Gain(index)))
        .into()
}

fn mute_solo_pair<'a>(band: &'a Band, style: &DesignerStyle) -> Element<'a, BandMessage> {
    let index = band.index;
    let mute = toggle_button(
        &band.mute,
        band.mute.kind.label(),
        style.mute,
        band.enabled.then_some(BandMessage::ToggleMute(index)),
    );
    let solo_color = if band.solo_highlight {
        style.solo
    } else {
        Color::from_rgb(0.6, 0.6, 0.3)
    };
    let solo = toggle_button(
        &band.solo,
        band.solo.kind.label(),
        solo_color,
        band.enabled.then_some(BandMessage::ToggleSolo(index)),
    );

    row![
        mouse_area(mute).on_right_press(BandMessage::ShowParameterIndex(ControlId::Mute(index))),
        Space::new().width(Length::Fill),
        mouse_area(solo).on_right_press(BandMessage::ShowParameterIndex(ControlId::Solo(index))),
    ]
    .align_y(Alignment::Center)
    .into()
}

/// Button for any [`Toggleable`] control
pub fn toggle_button<'a, T, Message>(
    toggle: &T,
    label: &'a str,
    active_color: Color,
    on_press: Option<Message>,
) -> Element<'a, Message>
where
    T: Toggleable,
    Message: Clone + 'a,
{
    let is_on = toggle.is_on();
    button(text(label).size(11))
        .padding([2, 8])
        .on_press_maybe(on_press)
        .style(move |_, status| toggle_style(status, is_on, active_color))
        .into()
}
