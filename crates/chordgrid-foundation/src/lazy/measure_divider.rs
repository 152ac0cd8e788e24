//! Measure bar dividers.
//!
//! Draws a divider line in front of every measure boundary of the attached
//! cells. Nothing is cached: the dividers are recomputed from the current
//! placements on every draw.

use chordgrid_ui_graphics::Rect;

use super::grid_placement::Placement;
use super::grid_spec::{GridSpec, Orientation};

/// Divider stride used when lines are not split into measures: one bar per
/// four beats. Applies both without grouping and when a measure spans a whole
/// line.
pub const DEFAULT_DIVIDER_STRIDE: usize = 4;

/// Receives divider rectangles for one draw.
pub trait DividerSink {
    /// Pixel thickness of the divider graphic.
    fn divider_intrinsic_width(&self) -> i32;

    fn emit_divider(&mut self, rect: Rect);
}

/// Computes divider rectangles at measure boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeasureDivider {
    span_count: usize,
    stride: usize,
    gap_width: i32,
    orientation: Orientation,
}

impl MeasureDivider {
    pub fn new(spec: &GridSpec) -> Self {
        let (stride, gap_width) = match spec.grouping {
            Some(grouping) if grouping.beats_per_group == spec.span_count => {
                (DEFAULT_DIVIDER_STRIDE, grouping.gap_width)
            }
            Some(grouping) => (grouping.beats_per_group, grouping.gap_width),
            None => (DEFAULT_DIVIDER_STRIDE, 0),
        };
        Self {
            span_count: spec.span_count.max(1),
            stride: stride.max(1),
            gap_width,
            orientation: spec.orientation,
        }
    }

    /// Attached indices that get a divider when `attached_count` cells are attached.
    ///
    /// An index qualifies when it starts a measure but not a line, and is not
    /// the last attached cell.
    pub fn divider_indices(&self, attached_count: usize) -> impl Iterator<Item = usize> + '_ {
        (0..attached_count.saturating_sub(1))
            .filter(move |&index| index % self.span_count != 0 && index % self.stride == 0)
    }

    /// Divider rectangles for `placements`, given in attached order.
    pub fn compute(&self, placements: &[Placement], intrinsic_width: i32) -> Vec<Rect> {
        self.divider_indices(placements.len())
            .map(|index| self.divider_rect(&placements[index], intrinsic_width))
            .collect()
    }

    /// Computes the dividers for `placements` and emits them into `sink`.
    ///
    /// Returns the number of dividers emitted.
    pub fn draw_over<S>(&self, placements: &[Placement], sink: &mut S) -> usize
    where
        S: DividerSink + ?Sized,
    {
        let dividers = self.compute(placements, sink.divider_intrinsic_width());
        let count = dividers.len();
        for rect in dividers {
            sink.emit_divider(rect);
        }
        count
    }

    /// Divider centred in the gap in front of `placement`.
    fn divider_rect(&self, placement: &Placement, intrinsic_width: i32) -> Rect {
        let content = placement.content_rect();
        let half = (self.gap_width + intrinsic_width) / 2;
        match self.orientation {
            Orientation::Vertical => {
                let left = content.left - placement.margin - half;
                Rect::new(left, content.top, left + intrinsic_width, content.bottom)
            }
            Orientation::Horizontal => {
                let top = content.top - placement.margin - half;
                Rect::new(content.left, top, content.right, top + intrinsic_width)
            }
        }
    }
}
