//! Messages emitted by the band views

use super::automation::ControlId;

#[derive(Debug, Clone)]
pub enum BandMessage {
    /// Band index, new direction weight
    DirectionChanged(usize, f32),
    /// Band index, new gain (dB)
    GainChanged(usize, f32),
    ToggleSolo(usize),
    ToggleMute(usize),

    // Crossover dragging on the directivity bar
    StartDragCrossover(usize),
    /// Frequency under the cursor
    DragCrossover(f32),
    EndDragCrossover,

    /// Right click on a control
    ShowParameterIndex(ControlId),
}
