//! Canvas view of the trim control
//!
//! The canvas only measures: drag distance from the press point and wheel
//! deltas. Turning those into events is [`super::TrimGesture`]'s job, which
//! the application owns.

use iced::widget::canvas::{self, Event, Frame, Geometry, Program};
use iced::widget::Canvas;
use iced::{mouse, Element, Length, Point, Rectangle, Size, Theme};

use super::gesture::tick_marks;
use crate::theme::DesignerStyle;

/// Pixel scroll deltas per wheel line
const PIXELS_PER_LINE: f32 = 40.0;

/// Inset of the background strip
const INSET: f32 = 5.0;

/// Drag state kept by iced between events
#[derive(Debug, Clone, Copy, Default)]
pub struct TrimInteraction {
    /// Absolute y where the current drag started
    pub drag_start_y: Option<f32>,
}

/// Canvas program for the endless trim control
pub struct TrimCanvas<'a, Message, D, W>
where
    D: Fn(f32) -> Message,
    W: Fn(f32, f32) -> Message,
{
    pub displacement: f32,
    pub enabled: bool,
    pub style: &'a DesignerStyle,
    /// Called with the distance from the press point (positive downwards)
    pub on_drag: D,
    /// Called with the wheel delta and the control height
    pub on_wheel: W,
}

impl<'a, Message, D, W> Program<Message> for TrimCanvas<'a, Message, D, W>
where
    Message: Clone,
    D: Fn(f32) -> Message,
    W: Fn(f32, f32) -> Message,
{
    type State = TrimInteraction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        if !self.enabled {
            interaction.drag_start_y = None;
            return None;
        }

        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(position) = cursor.position_over(bounds) {
                    interaction.drag_start_y = Some(position.y);
                }
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                interaction.drag_start_y = None;
            }
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                // Keeps tracking outside the bounds until release
                if let Some(start_y) = interaction.drag_start_y {
                    return Some(canvas::Action::publish((self.on_drag)(position.y - start_y)));
                }
            }
            Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                if cursor.is_over(bounds) {
                    let delta_y = match delta {
                        mouse::ScrollDelta::Lines { y, .. } => *y,
                        mouse::ScrollDelta::Pixels { y, .. } => *y / PIXELS_PER_LINE,
                    };
                    return Some(canvas::Action::publish((self.on_wheel)(
                        delta_y,
                        bounds.height,
                    )));
                }
            }
            _ => {}
        }

        None
    }

    fn mouse_interaction(
        &self,
        interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if !self.enabled {
            mouse::Interaction::default()
        } else if interaction.drag_start_y.is_some() {
            mouse::Interaction::ResizingVertically
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }

    fn draw(
        &self,
        _interaction: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let style = self.style;

        frame.fill_rectangle(Point::ORIGIN, bounds.size(), iced::Color::BLACK);
        frame.fill_rectangle(
            Point::new(INSET, INSET),
            Size::new(
                (bounds.width - 2.0 * INSET).max(0.0),
                (bounds.height - 2.0 * INSET).max(0.0),
            ),
            style.trim_background,
        );

        let alpha = if self.enabled { 1.0 } else { 0.4 };
        for tick in tick_marks(self.displacement, bounds.width, bounds.height) {
            let color = if tick.highlighted {
                style.trim_center_tick
            } else {
                style.trim_tick
            };
            frame.fill_rectangle(
                Point::new(tick.x, tick.y - tick.thickness / 2.0),
                Size::new(tick.width, tick.thickness),
                color.scale_alpha(alpha),
            );
        }

        vec![frame.into_geometry()]
    }
}

/// Trim control element, filling its container
///
/// ```ignore
/// let trim = trim_control(
///     self.trim.displacement(),
///     !self.areas_disabled,
///     &self.style,
///     Message::TrimDragged,
///     Message::TrimScrolled,
/// );
/// ```
pub fn trim_control<'a, Message>(
    displacement: f32,
    enabled: bool,
    style: &'a DesignerStyle,
    on_drag: impl Fn(f32) -> Message + 'a,
    on_wheel: impl Fn(f32, f32) -> Message + 'a,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    Canvas::new(TrimCanvas {
        displacement,
        enabled,
        style,
        on_drag,
        on_wheel,
    })
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}
