//! Displacement tracking for the endless trim control

/// Direction-weight change applied per event
pub const TRIM_STEP: f32 = 0.012725;

/// Number of tick marks drawn on the control
pub const TRIM_TICK_COUNT: usize = 34;

/// Tick drawn in the highlight colour
const CENTER_TICK: usize = TRIM_TICK_COUNT / 2;

/// One discrete step of the trim control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimEvent {
    Increment,
    Decrement,
}

impl TrimEvent {
    /// `+step` or `-step`
    pub fn signed(self, step: f32) -> f32 {
        match self {
            Self::Increment => step,
            Self::Decrement => -step,
        }
    }
}

/// Converts drag and wheel input into [`TrimEvent`]s
///
/// Every sample is compared with the previous one, whatever gesture produced
/// it. Nothing is reset when a new drag starts, so the first sample of a drag
/// is compared with the last sample of the previous gesture.
#[derive(Debug, Clone, Default)]
pub struct TrimGesture {
    last_displacement: f32,
    current_displacement: f32,
    wheel_accumulator: u32,
}

impl TrimGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer drag; `distance_from_start` is positive downwards
    pub fn on_drag(&mut self, distance_from_start: f32) -> Option<TrimEvent> {
        self.current_displacement = distance_from_start;
        self.compare()
    }

    /// Wheel notch; `delta_y` as reported by the platform
    pub fn on_wheel(&mut self, delta_y: f32, container_height: f32) -> Option<TrimEvent> {
        self.wheel_accumulator = self.wheel_accumulator.saturating_add(1);
        self.current_displacement = delta_y * container_height * self.wheel_accumulator as f32;
        self.compare()
    }

    /// Displacement the tick marks are drawn at
    pub fn displacement(&self) -> f32 {
        self.current_displacement
    }

    fn compare(&mut self) -> Option<TrimEvent> {
        let event = if self.current_displacement > self.last_displacement {
            Some(TrimEvent::Decrement)
        } else if self.current_displacement < self.last_displacement {
            Some(TrimEvent::Increment)
        } else {
            None
        };
        self.last_displacement = self.current_displacement;
        event
    }
}

/// A tick mark in control-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickMark {
    /// Vertical centre
    pub y: f32,
    pub x: f32,
    pub width: f32,
    pub thickness: f32,
    pub highlighted: bool,
}

/// Tick marks for a control of `width` x `height` at `displacement`
///
/// Ticks are evenly spaced, the first half a spacing from the top, and wrap
/// around the control's height. Thickness follows a circle so ticks near
/// the edges look like they turn away.
pub fn tick_marks(displacement: f32, width: f32, height: f32) -> Vec<TickMark> {
    if height <= 0.0 {
        return Vec::new();
    }
    let spacing = height / TRIM_TICK_COUNT as f32;
    let radius_sq = height * height / 2.0;
    let half = height / 2.0;

    (0..TRIM_TICK_COUNT)
        .map(|i| {
            let y = (displacement + spacing / 2.0 + i as f32 * spacing).rem_euclid(height);
            let from_center = y - half;
            let chord = (radius_sq - from_center * from_center).max(0.0).sqrt();
            TickMark {
                y,
                x: width * 0.22,
                width: width * 0.55,
                thickness: chord / (TRIM_TICK_COUNT * 2) as f32,
                highlighted: i == CENTER_TICK,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_drag_sequence() {
        let mut gesture = TrimGesture::new();
        let events: Vec<_> = [0.0, 5.0, 5.0, 2.0]
            .into_iter()
            .map(|d| gesture.on_drag(d))
            .collect();
        assert_eq!(
            events,
            vec![
                None,
                Some(TrimEvent::Decrement),
                None,
                Some(TrimEvent::Increment)
            ]
        );
    }

    #[test]
    fn test_new_drag_compares_with_previous_gesture() {
        let mut gesture = TrimGesture::new();
        gesture.on_drag(40.0);
        // Second drag starts near zero again: reads as moving up
        assert_eq!(gesture.on_drag(1.0), Some(TrimEvent::Increment));
    }

    #[test]
    fn test_wheel_accumulates() {
        let mut gesture = TrimGesture::new();
        assert_eq!(gesture.on_wheel(0.5, 100.0), Some(TrimEvent::Decrement));
        assert_relative_eq!(gesture.displacement(), 50.0);
        assert_eq!(gesture.on_wheel(0.5, 100.0), Some(TrimEvent::Decrement));
        assert_relative_eq!(gesture.displacement(), 100.0);
        assert_eq!(gesture.on_wheel(-0.5, 100.0), Some(TrimEvent::Increment));
    }

    #[test]
    fn test_signed_step() {
        assert_relative_eq!(TrimEvent::Increment.signed(TRIM_STEP), 0.012725);
        assert_relative_eq!(TrimEvent::Decrement.signed(TRIM_STEP), -0.012725);
    }

    #[test]
    fn test_tick_marks_wrap_inside_height() {
        let ticks = tick_marks(-1234.5, 40.0, 340.0);
        assert_eq!(ticks.len(), TRIM_TICK_COUNT);
        assert!(ticks.iter().all(|t| (0.0..340.0).contains(&t.y)));
        assert_eq!(ticks.iter().filter(|t| t.highlighted).count(), 1);
    }

    #[test]
    fn test_first_tick_half_spacing_from_top() {
        let ticks = tick_marks(0.0, 40.0, 340.0);
        assert_relative_eq!(ticks[0].y, 5.0);
        assert_relative_eq!(ticks[1].y, 15.0);
    }

    #[test]
    fn test_center_ticks_are_thickest() {
        let ticks = tick_marks(0.0, 40.0, 340.0);
        let edge = ticks[0].thickness;
        let middle = ticks[CENTER_TICK].thickness;
        assert!(middle > edge);
    }
}
