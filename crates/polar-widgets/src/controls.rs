//! Capability traits for band controls
//!
//! Controls are described by what they can do instead of by a widget
//! hierarchy. A mute or solo button is [`Toggleable`]; a direction or gain
//! slider is a [`RangedValue`], optionally drawn with its range reversed.

use std::ops::RangeInclusive;

/// An on/off control
pub trait Toggleable {
    fn is_on(&self) -> bool;
    fn set_on(&mut self, on: bool);

    /// Flip the state and return the new value
    fn toggle(&mut self) -> bool {
        let on = !self.is_on();
        self.set_on(on);
        on
    }
}

/// A bounded continuous control
pub trait RangedValue {
    fn range(&self) -> RangeInclusive<f32>;
    fn value(&self) -> f32;

    /// Store `value` clamped into [`range`](Self::range)
    fn set_value(&mut self, value: f32);

    /// Whether the control is drawn with its maximum at the start
    fn is_reversed(&self) -> bool {
        false
    }

    /// Position 0.0-1.0 along the drawn control
    fn normalized(&self) -> f32 {
        let (min, max) = (*self.range().start(), *self.range().end());
        let span = max - min;
        if span <= 0.0 {
            return 0.0;
        }
        let n = ((self.value() - min) / span).clamp(0.0, 1.0);
        if self.is_reversed() {
            1.0 - n
        } else {
            n
        }
    }

    /// Value at drawn position `n` (0.0-1.0)
    fn value_at(&self, n: f32) -> f32 {
        let (min, max) = (*self.range().start(), *self.range().end());
        let n = n.clamp(0.0, 1.0);
        let n = if self.is_reversed() { 1.0 - n } else { n };
        min + n * (max - min)
    }

    /// Add `delta` (clamped) and return the stored value
    fn nudge(&mut self, delta: f32) -> f32 {
        self.set_value(self.value() + delta);
        self.value()
    }
}

/// Plain ranged parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangedParam {
    min: f32,
    max: f32,
    value: f32,
    reversed: bool,
}

impl RangedParam {
    pub fn new(min: f32, max: f32, value: f32) -> Self {
        Self {
            min,
            max,
            value: value.clamp(min, max),
            reversed: false,
        }
    }

    pub fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }
}

impl RangedValue for RangedParam {
    fn range(&self) -> RangeInclusive<f32> {
        self.min..=self.max
    }

    fn value(&self) -> f32 {
        self.value
    }

    fn set_value(&mut self, value: f32) {
        self.value = value.clamp(self.min, self.max);
    }

    fn is_reversed(&self) -> bool {
        self.reversed
    }
}

/// Which per-band flag a toggle controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleKind {
    Solo,
    Mute,
}

impl ToggleKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Solo => "S",
            Self::Mute => "M",
        }
    }
}

/// Solo or mute flag of one band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandToggle {
    pub kind: ToggleKind,
    on: bool,
}

impl BandToggle {
    pub fn new(kind: ToggleKind) -> Self {
        Self { kind, on: false }
    }
}

impl Toggleable for BandToggle {
    fn is_on(&self) -> bool {
        self.on
    }

    fn set_on(&mut self, on: bool) {
        self.on = on;
    }
}

/// Global on/off switch (zero latency, allow reverse patterns)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Switch(pub bool);

impl Toggleable for Switch {
    fn is_on(&self) -> bool {
        self.0
    }

    fn set_on(&mut self, on: bool) {
        self.0 = on;
    }
}
