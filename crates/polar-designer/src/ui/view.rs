//! Editor view
//!
//! Columns, left to right, as shares of 96:
//!
//! ```text
//! | 1 | side 15 | 1 | middle 75 | 1 | trim 2 | 1 |
//! ```
//!
//! The middle column holds the directivity bar, the band strips and the
//! zero-latency toggle. Band widths inside it come from a `LayoutFrame`
//! computed for the estimated middle column width.

use iced::widget::{button, column, container, row, slider, text, Row, Space};
use iced::{Alignment, Border, Color, Element, Length};

use polar_core::{
    AbLayer, EqualizationMode, MAX_BANDS, NUM_SYNC_CHANNELS, PROXIMITY_MAX, PROXIMITY_MIN,
};
use polar_widgets::button_styles::{layer_style, momentary_style, toggle_style};
use polar_widgets::{
    band_strips, control_parameter_index, directivity_bar, middle_column_width, overlay_view,
    toggle_button, trim_control, with_overlay, ControlId, DesignerStyle, LayoutFrame,
};

use super::app::DesignerApp;
use super::message::Message;

const SECTION_SPACING: f32 = 10.0;

impl DesignerApp {
    /// Build the view
    pub fn view(&self) -> Element<'_, Message> {
        let style = &self.style;
        let middle_width = middle_column_width(self.window_size.width);

        let columns = row![
            spacer(1),
            container(self.view_side_panel())
                .width(Length::FillPortion(15))
                .height(Length::Fill),
            spacer(1),
            container(self.view_main_area(middle_width))
                .width(Length::FillPortion(75))
                .height(Length::Fill),
            spacer(1),
            container(trim_control(
                self.trim.displacement(),
                self.main_area_enabled(),
                style,
                Message::TrimDragged,
                Message::TrimScrolled,
            ))
            .width(Length::FillPortion(2))
            .height(Length::Fill)
            .padding([8, 0]),
            spacer(1),
        ]
        .height(Length::Fill);

        let background = style.background;
        let base: Element<'_, Message> = container(columns)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding([8, 0])
            .style(move |_| container::Style {
                background: Some(background.into()),
                ..Default::default()
            })
            .into();

        match overlay_view(self.tracking.overlay(), style) {
            Some(modal) => with_overlay(base, modal.map(Message::Overlay), style),
            None => base,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Main area
    // ─────────────────────────────────────────────────────────────────────

    fn view_main_area(&self, middle_width: f32) -> Element<'_, Message> {
        let style = &self.style;
        let frame = LayoutFrame::for_controller(&self.bands, middle_width);

        let zero_latency = toggle_button(
            &self.zero_delay,
            "zero latency",
            style.accent,
            self.main_area_enabled().then_some(Message::ToggleZeroDelay),
        );

        let footer = row![
            zero_latency,
            Space::new().width(Length::Fill),
            text(&self.status).size(11).color(style.text_dim),
        ]
        .align_y(Alignment::Center);

        column![
            directivity_bar(&self.bands, style, middle_width, self.dragging_crossover)
                .map(Message::Band),
            band_strips(&self.bands, style, &frame).map(Message::Band),
            Space::new().height(Length::Fill),
            footer,
        ]
        .spacing(SECTION_SPACING)
        .into()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Side area
    // ─────────────────────────────────────────────────────────────────────

    fn view_side_panel(&self) -> Element<'_, Message> {
        let style = &self.style;
        let enabled = self.side_area_enabled();
        let active_count = self.bands.active_count();

        let band_count = choice_row((1..=MAX_BANDS).map(|count| {
            choice_button(
                count.to_string(),
                count == active_count,
                enabled.then_some(Message::SetBandCount(count)),
                style.accent,
            )
        }));

        let sync = choice_row((0..NUM_SYNC_CHANNELS).map(|index| {
            let label = if index == 0 {
                "-".to_string()
            } else {
                index.to_string()
            };
            choice_button(
                label,
                index == self.sync_channel,
                (enabled && index <= active_count).then_some(Message::SetSyncChannel(index)),
                style.accent,
            )
        }));

        let eq_mode = choice_row(EqualizationMode::ALL.into_iter().map(|mode| {
            choice_button(
                mode.label().to_string(),
                mode == self.eq_mode,
                enabled.then_some(Message::SetEqMode(mode)),
                style.accent,
            )
        }));

        let proximity = slider(PROXIMITY_MIN..=PROXIMITY_MAX, self.proximity, Message::SetProximity)
            .step(0.01);

        let allow_reverse = toggle_button(
            &self.allow_reverse,
            "allow reverse",
            style.accent,
            enabled.then_some(Message::ToggleAllowReverse),
        );

        let ab = choice_row([AbLayer::A, AbLayer::B].into_iter().map(|layer| {
            let alpha = AbLayer::button_alpha(layer == self.ab_layer);
            let base = style.accent;
            button(text(format!("{:?}", layer)).size(12))
                .width(Length::Fill)
                .on_press_maybe(enabled.then_some(Message::SetAbLayer(layer)))
                .style(move |_, status| layer_style(status, alpha, base))
                .into()
        }));

        let session = self.tracking.session();
        let tracking = column![
            momentary_button(
                recorded_label("learn spill", session.disturber_recorded),
                enabled.then_some(Message::StartDisturberTracking),
                style,
            ),
            momentary_button(
                recorded_label("learn signal", session.signal_recorded),
                enabled.then_some(Message::StartSignalTracking),
                style,
            ),
        ]
        .spacing(4);

        let presets = row![
            momentary_button("load".to_string(), enabled.then_some(Message::LoadPreset), style),
            momentary_button("save".to_string(), enabled.then_some(Message::SavePreset), style),
        ]
        .spacing(4);

        let proximity_label = match control_parameter_index(ControlId::Proximity, active_count) {
            Some(index) => format!("proximity ({})", index),
            None => "proximity".to_string(),
        };

        let panel = column![
            text("POLAR DESIGNER").size(14).color(style.text),
            section("bands", band_count, style),
            section("sync", sync, style),
            section("equalization", eq_mode, style),
            section(&proximity_label, proximity.into(), style),
            allow_reverse,
            section("layer", ab, style),
            section("tracking", tracking.into(), style),
            section("preset", presets.into(), style),
        ]
        .spacing(SECTION_SPACING)
        .padding(8);

        let panel_color = style.panel;
        let border = style.border;
        container(panel)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_| container::Style {
                background: Some(panel_color.into()),
                border: Border {
                    color: border,
                    width: 1.0,
                    radius: 4.0.into(),
                },
                ..Default::default()
            })
            .into()
    }
}

fn spacer<'a>(portion: u16) -> Element<'a, Message> {
    Space::new().width(Length::FillPortion(portion)).into()
}

fn section<'a>(
    label: &str,
    content: Element<'a, Message>,
    style: &DesignerStyle,
) -> Element<'a, Message> {
    column![text(label.to_string()).size(11).color(style.text_dim), content]
        .spacing(4)
        .into()
}

fn choice_row<'a>(buttons: impl IntoIterator<Item = Element<'a, Message>>) -> Element<'a, Message> {
    Row::with_children(buttons).spacing(2).into()
}

/// Exclusive choice or toggle button
fn choice_button<'a>(
    label: String,
    selected: bool,
    on_press: Option<Message>,
    color: Color,
) -> Element<'a, Message> {
    button(text(label).size(12))
        .width(Length::Fill)
        .on_press_maybe(on_press)
        .style(move |_, status| toggle_style(status, selected, color))
        .into()
}

fn momentary_button<'a>(
    label: String,
    on_press: Option<Message>,
    style: &DesignerStyle,
) -> Element<'a, Message> {
    let base = style.overlay_button;
    button(text(label).size(12))
        .width(Length::Fill)
        .on_press_maybe(on_press)
        .style(move |_, status| momentary_style(status, base))
        .into()
}

fn recorded_label(label: &str, recorded: bool) -> String {
    if recorded {
        format!("{} \u{2713}", label)
    } else {
        label.to_string()
    }
}
