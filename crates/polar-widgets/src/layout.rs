//! Band width layout
//!
//! The band strips under the directivity EQ line up with its crossover
//! handles. Widths therefore come from the crossover x positions, not from
//! an even split.
//!
//! ```text
//!  |<-33->|<- band 0 ->|<- band 1 ->|<---- band 2 ---->|<-10->|
//!         ^            ^            ^                  ^
//!         b[0] = 0     x0 - 29      x1 - 29            dir EQ size
//! ```

use polar_core::{freq_to_position, MAX_BANDS};

use crate::bands::BandStateController;

/// Fixed left margin of the band strip rows (px)
pub const LEFT_MARGIN: f32 = 33.0;

/// Fixed right margin of the band strip rows (px)
pub const RIGHT_MARGIN: f32 = 10.0;

/// Directivity EQ width minus its plotting area (px)
pub const DIR_EQ_OFFSET: f32 = 42.0;

/// X of the plotting area's left edge inside the directivity EQ (px)
pub const VISUALIZER_OFFSET: f32 = 29.0;

/// Middle column share of the window width (flex 75 out of 96)
pub const MIDDLE_COLUMN_SHARE: f32 = 75.0 / 96.0;

/// Width of a crossover handle in the directivity bar (px)
pub const HANDLE_WIDTH: f32 = 8.0;

/// Width fraction of one laid-out band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandWidth {
    pub band: usize,
    pub fraction: f32,
}

/// Width fractions for the bands whose mask entry is true
///
/// `crossover_positions` are x coordinates inside the directivity EQ; entry
/// `i - 1` bounds band `i` from the left. Boundaries run from 0 to
/// `total_width`, and a missing crossover falls back to `total_width`.
/// Missing mask entries count as active. Out-of-order crossovers are not
/// corrected and can produce negative widths.
pub fn compute_band_widths(
    active_count: usize,
    crossover_positions: &[f32],
    total_width: f32,
    visualizer_mask: &[bool],
) -> Vec<BandWidth> {
    let active_count = active_count.clamp(1, MAX_BANDS);
    let is_masked_in = |band: usize| visualizer_mask.get(band).copied().unwrap_or(true);

    if active_count == 1 {
        return if is_masked_in(0) {
            vec![BandWidth {
                band: 0,
                fraction: if total_width > 0.0 { 1.0 } else { 0.0 },
            }]
        } else {
            Vec::new()
        };
    }

    let boundary = |i: usize| -> f32 {
        if i == 0 {
            0.0
        } else if i == active_count {
            total_width
        } else {
            crossover_positions
                .get(i - 1)
                .map(|x| x - VISUALIZER_OFFSET)
                .unwrap_or(total_width)
        }
    };

    (0..active_count)
        .filter(|&band| is_masked_in(band))
        .map(|band| {
            let width = boundary(band + 1) - boundary(band);
            let fraction = if total_width > 0.0 {
                width / total_width
            } else {
                0.0
            };
            BandWidth { band, fraction }
        })
        .collect()
}

/// Plotting width of a directivity EQ that is `eq_width` wide
pub fn dir_eq_size(eq_width: f32) -> f32 {
    (eq_width - DIR_EQ_OFFSET).max(0.0)
}

/// X positions of the crossover handles inside the directivity EQ
pub fn crossover_positions(freqs: &[f32], eq_width: f32) -> Vec<f32> {
    let size = dir_eq_size(eq_width);
    freqs
        .iter()
        .map(|&f| VISUALIZER_OFFSET + freq_to_position(f) * size)
        .collect()
}

/// Pixel widths of the directivity bar's band segments
///
/// Handles are centred on their crossover x, so each segment gives up half a
/// handle on every side that has a neighbour. Segments plus the
/// `active_count - 1` handles fill the plotting area exactly.
pub fn segment_widths(
    active_count: usize,
    crossover_positions: &[f32],
    eq_width: f32,
) -> Vec<f32> {
    let size = dir_eq_size(eq_width);
    let last = active_count.clamp(1, MAX_BANDS) - 1;
    compute_band_widths(active_count, crossover_positions, size, &[])
        .iter()
        .map(|w| {
            let handles = [w.band > 0, w.band < last]
                .iter()
                .filter(|&&shared| shared)
                .count() as f32;
            (w.fraction * size - handles * HANDLE_WIDTH / 2.0).max(0.0)
        })
        .collect()
}

/// Estimated middle column width for a window `window_width` wide
pub fn middle_column_width(window_width: f32) -> f32 {
    window_width * MIDDLE_COLUMN_SHARE
}

/// Pixel widths of one band row
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutFrame {
    pub container_width: f32,
    pub left_margin: f32,
    pub right_margin: f32,
    /// Band index and pixel width, lowest band first
    pub bands: Vec<(usize, f32)>,
}

impl LayoutFrame {
    /// Distribute the space between the margins by `widths`' fractions
    ///
    /// Fractions are normalised by their sum, so a masked-out band's share
    /// goes to the others.
    pub fn compute(widths: &[BandWidth], container_width: f32) -> Self {
        let content = (container_width - LEFT_MARGIN - RIGHT_MARGIN).max(0.0);
        let sum: f32 = widths.iter().map(|w| w.fraction).sum();
        let bands = widths
            .iter()
            .map(|w| {
                let px = if sum > 0.0 {
                    content * w.fraction / sum
                } else {
                    0.0
                };
                (w.band, px)
            })
            .collect();
        Self {
            container_width,
            left_margin: LEFT_MARGIN,
            right_margin: RIGHT_MARGIN,
            bands,
        }
    }

    /// Layout of the controller's active bands in a middle column
    /// `container_width` wide (the directivity EQ spans the same column)
    pub fn for_controller(controller: &BandStateController, container_width: f32) -> Self {
        let positions = crossover_positions(controller.active_crossovers(), container_width);
        let widths = compute_band_widths(
            controller.active_count(),
            &positions,
            dir_eq_size(container_width),
            &controller.visualizer_mask(),
        );
        Self::compute(&widths, container_width)
    }

    /// Pixel width of `band`, if laid out
    pub fn width_of(&self, band: usize) -> Option<f32> {
        self.bands
            .iter()
            .find(|(b, _)| *b == band)
            .map(|(_, px)| *px)
    }

    /// Margins plus band widths
    pub fn total_width(&self) -> f32 {
        self.left_margin + self.right_margin + self.bands.iter().map(|(_, px)| px).sum::<f32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use polar_core::DEFAULT_CROSSOVERS;

    #[test]
    fn test_even_boundaries_give_equal_thirds() {
        // Boundaries [0, 300, 600, 900]
        let positions = [300.0 + VISUALIZER_OFFSET, 600.0 + VISUALIZER_OFFSET];
        let widths = compute_band_widths(3, &positions, 900.0, &[true; 5]);
        assert_eq!(widths.len(), 3);
        for w in &widths {
            assert_relative_eq!(w.fraction, 1.0 / 3.0, epsilon = 1e-6);
        }
        let total: f32 = widths.iter().map(|w| w.fraction * 900.0).sum();
        assert_relative_eq!(total, 900.0, epsilon = 1e-3);
    }

    #[test]
    fn test_single_band_takes_full_width() {
        let widths = compute_band_widths(1, &[], 500.0, &[true]);
        assert_eq!(widths, vec![BandWidth { band: 0, fraction: 1.0 }]);
    }

    #[test]
    fn test_mask_skips_bands() {
        let positions = [129.0, 429.0];
        let widths = compute_band_widths(3, &positions, 600.0, &[true, false, true]);
        assert_eq!(widths.iter().map(|w| w.band).collect::<Vec<_>>(), vec![0, 2]);
        assert_relative_eq!(widths[1].fraction, 200.0 / 600.0, epsilon = 1e-6);
    }

    #[test]
    fn test_missing_crossover_falls_back_to_total() {
        let widths = compute_band_widths(3, &[329.0], 900.0, &[true; 3]);
        assert_relative_eq!(widths[1].fraction, 600.0 / 900.0, epsilon = 1e-6);
        assert_relative_eq!(widths[2].fraction, 0.0);
    }

    #[test]
    fn test_unordered_crossovers_are_not_corrected() {
        let positions = [629.0, 329.0];
        let widths = compute_band_widths(3, &positions, 900.0, &[true; 3]);
        assert!(widths[1].fraction < 0.0);
    }

    #[test]
    fn test_crossover_positions_span_plot_area() {
        let xs = crossover_positions(&[20.0, 20_000.0], 442.0);
        assert_relative_eq!(xs[0], VISUALIZER_OFFSET);
        assert_relative_eq!(xs[1], VISUALIZER_OFFSET + 400.0, epsilon = 1e-3);
    }

    #[test]
    fn test_frame_widths_plus_margins_fill_container() {
        let positions = crossover_positions(&DEFAULT_CROSSOVERS, 942.0);
        let widths = compute_band_widths(5, &positions, dir_eq_size(942.0), &[true; 5]);
        let frame = LayoutFrame::compute(&widths, 942.0);
        assert_eq!(frame.bands.len(), 5);
        assert_relative_eq!(frame.total_width(), 942.0, epsilon = 1e-3);
    }

    #[test]
    fn test_fractions_fill_width_for_every_band_count() {
        let crossover_sets: [[f32; 4]; 4] = [
            DEFAULT_CROSSOVERS,
            [20.0, 21.0, 22.0, 23.0],
            [100.0, 1_000.0, 10_000.0, 19_999.0],
            [50.0, 200.0, 2_000.0, 8_000.0],
        ];
        let eq_width = 942.0;
        let size = dir_eq_size(eq_width);

        for freqs in &crossover_sets {
            for active_count in 1..=MAX_BANDS {
                let positions = crossover_positions(&freqs[..active_count - 1], eq_width);
                let widths = compute_band_widths(active_count, &positions, size, &[true; 5]);
                assert_eq!(widths.len(), active_count);

                let fractions: f32 = widths.iter().map(|w| w.fraction).sum();
                assert_relative_eq!(fractions, 1.0, epsilon = 1e-4);
                let pixels: f32 = widths.iter().map(|w| w.fraction * size).sum();
                assert_relative_eq!(pixels, size, epsilon = 1e-2);

                let frame = LayoutFrame::compute(&widths, eq_width);
                assert_relative_eq!(frame.total_width(), eq_width, epsilon = 1e-2);
            }
        }
    }

    #[test]
    fn test_segments_and_handles_fill_plot_area() {
        let eq_width = 942.0;
        for active_count in 1..=MAX_BANDS {
            let positions =
                crossover_positions(&DEFAULT_CROSSOVERS[..active_count - 1], eq_width);
            let segments = segment_widths(active_count, &positions, eq_width);
            assert_eq!(segments.len(), active_count);

            let handles = (active_count - 1) as f32 * HANDLE_WIDTH;
            let total: f32 = segments.iter().sum::<f32>() + handles;
            assert_relative_eq!(total, dir_eq_size(eq_width), epsilon = 1e-2);
        }
    }

    #[test]
    fn test_handles_sit_on_crossover_positions() {
        let eq_width = 942.0;
        let positions = crossover_positions(&DEFAULT_CROSSOVERS, eq_width);
        let segments = segment_widths(MAX_BANDS, &positions, eq_width);

        let mut x = VISUALIZER_OFFSET;
        for (segment, crossover) in segments.iter().zip(&positions) {
            x += segment;
            assert_relative_eq!(x + HANDLE_WIDTH / 2.0, *crossover, epsilon = 1e-2);
            x += HANDLE_WIDTH;
        }
    }

    #[test]
    fn test_frame_for_controller_follows_active_count() {
        let controller = BandStateController::new(2);
        let frame = LayoutFrame::for_controller(&controller, 800.0);
        assert_eq!(frame.bands.len(), 2);
        assert!(frame.width_of(2).is_none());
        assert_relative_eq!(frame.total_width(), 800.0, epsilon = 1e-3);
    }
}
