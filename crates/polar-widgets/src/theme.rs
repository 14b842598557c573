//! Immutable style value handed to every view function
//!
//! Views never reach for global colours: the application builds one
//! [`DesignerStyle`] at boot and passes it by reference.

use iced::Color;
use polar_core::MAX_BANDS;

/// Band colours, lowest band first (`#BA4949` to `#49BA64`)
pub const BAND_COLORS: [Color; MAX_BANDS] = [
    Color::from_rgba(0.729, 0.286, 0.286, 0.992), // red
    Color::from_rgba(0.729, 0.435, 0.286, 0.992), // orange
    Color::from_rgba(0.729, 0.686, 0.286, 0.992), // yellow
    Color::from_rgba(0.549, 0.729, 0.286, 0.992), // lime
    Color::from_rgba(0.286, 0.729, 0.392, 0.992), // green
];

/// Colours and alphas used by the editor's views
#[derive(Debug, Clone, PartialEq)]
pub struct DesignerStyle {
    pub band_colors: [Color; MAX_BANDS],
    pub background: Color,
    pub panel: Color,
    pub border: Color,
    pub text: Color,
    pub text_dim: Color,
    /// Selected state of exclusive choice buttons
    pub accent: Color,
    pub solo: Color,
    pub mute: Color,
    /// Dimming layer behind an open overlay
    pub scrim: Color,
    pub overlay_background: Color,
    pub overlay_button: Color,
    pub trim_background: Color,
    pub trim_tick: Color,
    /// Colour of the middle tick of the trim control
    pub trim_center_tick: Color,
    /// Alpha applied to a band that is silenced by another band's solo
    pub silenced_alpha: f32,
}

impl Default for DesignerStyle {
    fn default() -> Self {
        Self {
            band_colors: BAND_COLORS,
            background: Color::from_rgb(0.11, 0.11, 0.12),
            panel: Color::from_rgb(0.16, 0.16, 0.18),
            border: Color::from_rgb(0.3, 0.3, 0.35),
            text: Color::from_rgb(0.85, 0.85, 0.85),
            text_dim: Color::from_rgb(0.55, 0.55, 0.58),
            accent: Color::from_rgb(0.3, 0.6, 0.9),
            solo: Color::from_rgb(0.95, 0.75, 0.2),
            mute: Color::from_rgb(0.85, 0.3, 0.3),
            scrim: Color::from_rgba(0.0, 0.0, 0.0, 0.6),
            overlay_background: Color::from_rgb(0.2, 0.2, 0.22),
            overlay_button: Color::from_rgb(0.729, 0.286, 0.286),
            trim_background: Color::from_rgb(0.08, 0.08, 0.09),
            trim_tick: Color::from_rgb(0.85, 0.85, 0.85),
            trim_center_tick: Color::from_rgb(0.5, 0.5, 0.5),
            silenced_alpha: 0.35,
        }
    }
}

impl DesignerStyle {
    /// Colour of band `index`, wrapping if out of range
    pub fn band_color(&self, index: usize) -> Color {
        self.band_colors[index % MAX_BANDS]
    }

    /// Colour of band `index` with the solo dimming applied
    pub fn band_color_for(&self, index: usize, silenced: bool) -> Color {
        let color = self.band_color(index);
        if silenced {
            Color {
                a: color.a * self.silenced_alpha,
                ..color
            }
        } else {
            color
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_color_wraps() {
        let style = DesignerStyle::default();
        assert_eq!(style.band_color(0), style.band_color(MAX_BANDS));
    }

    #[test]
    fn test_silenced_band_is_dimmed() {
        let style = DesignerStyle::default();
        let normal = style.band_color_for(2, false);
        let silenced = style.band_color_for(2, true);
        assert!(silenced.a < normal.a);
        assert_eq!(silenced.r, normal.r);
    }
}
