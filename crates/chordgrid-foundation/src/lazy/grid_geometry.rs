//! Span geometry for windowed grids.
//!
//! Everything the layout derives from a [`GridSpec`] and the item count: cell
//! size, number of lines, how many lines fit in the viewport, how far the grid
//! can scroll, and where each position lands for a given scroll offset.

use std::ops::Range;

use chordgrid_ui_graphics::Rect;

use super::grid_error::GridConfigError;
use super::grid_spec::{GridSpec, MeasureGrouping, Orientation};

/// Derived, immutable geometry of a grid for one configuration and item count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridGeometry {
    /// Cells per line.
    pub span_count: usize,

    /// Side of every (square) cell slot, in pixels.
    pub cell_size: i32,

    /// Total addressable positions.
    pub item_count: usize,

    /// Lines needed to hold `item_count` cells; the last one may be partial.
    pub line_count: usize,

    /// Lines materialized per pass: the ones fitting the viewport plus one for
    /// partially visible lines at the edges.
    pub visible_line_capacity: usize,

    /// Largest valid scroll offset.
    pub max_scroll_offset: i32,

    pub orientation: Orientation,
    pub grouping: Option<MeasureGrouping>,
}

impl GridGeometry {
    /// Computes the geometry for `spec` holding `item_count` positions.
    ///
    /// Fails when the spec is invalid or when the cross axis is too small to
    /// give each cell at least one pixel.
    pub fn compute(spec: &GridSpec, item_count: usize) -> Result<Self, GridConfigError> {
        spec.validate()?;

        let span = i32::try_from(spec.span_count).unwrap_or(i32::MAX);
        let available = spec
            .cross_axis_available()
            .saturating_sub(spec.total_gap());
        let cell_size = available / span;
        if cell_size <= 0 {
            return Err(GridConfigError::NonPositiveCellSize {
                available,
                span: spec.span_count,
                cell_size,
            });
        }
        if spec.cell_margin.saturating_mul(2) >= cell_size {
            return Err(GridConfigError::MarginExceedsCell {
                margin: spec.cell_margin,
                cell_size,
            });
        }

        let line_count = item_count.div_ceil(spec.span_count);
        let main_extent = spec.main_axis_extent().max(0);
        // cell_size > 0 and main_extent >= 0, so the quotient is non-negative.
        let visible_line_capacity = (main_extent / cell_size) as usize + 1;

        let hidden_lines = line_count.saturating_sub(visible_line_capacity);
        let max_scroll_offset = saturate_i32(i64::from(cell_size) * to_i64(hidden_lines));

        Ok(Self {
            span_count: spec.span_count,
            cell_size,
            item_count,
            line_count,
            visible_line_capacity,
            max_scroll_offset,
            orientation: spec.orientation,
            grouping: spec.grouping,
        })
    }

    /// Line holding `position`.
    pub fn line_of(&self, position: usize) -> usize {
        position / self.span_count
    }

    /// Lines to materialize at `scroll_offset`.
    pub fn line_window(&self, scroll_offset: i32) -> Range<usize> {
        let first = (scroll_offset.max(0) / self.cell_size) as usize;
        let last = first
            .saturating_add(self.visible_line_capacity)
            .min(self.line_count);
        first.min(last)..last
    }

    /// Scroll offset that puts `line` at the leading edge of the viewport.
    pub fn line_start(&self, line: usize) -> i32 {
        saturate_i32(i64::from(self.cell_size) * to_i64(line))
    }

    /// Positions on `line`, excluding those past the end of the data.
    pub fn positions_in_line(&self, line: usize) -> Range<usize> {
        let start = line.saturating_mul(self.span_count).min(self.item_count);
        let end = start.saturating_add(self.span_count).min(self.item_count);
        start..end
    }

    /// Positions materialized at `scroll_offset`, in order.
    pub fn visible_positions(&self, scroll_offset: i32) -> Range<usize> {
        let lines = self.line_window(scroll_offset);
        if lines.is_empty() {
            return 0..0;
        }
        let start = self.positions_in_line(lines.start).start;
        let end = self.positions_in_line(lines.end - 1).end;
        start..end
    }

    /// Slot rectangle of `position` at `scroll_offset`.
    pub fn slot_rect(&self, position: usize, scroll_offset: i32) -> Rect {
        let line = self.line_of(position);
        let column = position % self.span_count;

        let main = saturate_i32(
            i64::from(self.cell_size) * to_i64(line) - i64::from(scroll_offset),
        );
        let gap = self.grouping.map_or(0, |grouping| grouping.gap_before(column));
        let cross = saturate_i32(i64::from(self.cell_size) * to_i64(column) + i64::from(gap));

        match self.orientation {
            Orientation::Vertical => Rect::square(cross, main, self.cell_size),
            Orientation::Horizontal => Rect::square(main, cross, self.cell_size),
        }
    }
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn saturate_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chordgrid_ui_graphics::Insets;

    fn chord_spec() -> GridSpec {
        GridSpec::new(8).viewport(800, 400)
    }

    #[test]
    fn test_chord_diagram_geometry() {
        let geometry = GridGeometry::compute(&chord_spec(), 200).unwrap();
        assert_eq!(geometry.cell_size, 100);
        assert_eq!(geometry.line_count, 25);
        assert_eq!(geometry.visible_line_capacity, 5);
        assert_eq!(geometry.max_scroll_offset, 2000);
    }

    #[test]
    fn test_partial_last_line() {
        let geometry = GridGeometry::compute(&chord_spec(), 10).unwrap();
        assert_eq!(geometry.line_count, 2);
        assert_eq!(geometry.positions_in_line(1), 8..10);
        assert_eq!(geometry.visible_positions(0), 0..10);
        assert_eq!(geometry.max_scroll_offset, 0);
    }

    #[test]
    fn test_empty_grid() {
        let geometry = GridGeometry::compute(&chord_spec(), 0).unwrap();
        assert_eq!(geometry.line_count, 0);
        assert!(geometry.line_window(0).is_empty());
        assert_eq!(geometry.visible_positions(0), 0..0);
    }

    #[test]
    fn test_padding_and_gaps_shrink_cells() {
        let spec = chord_spec()
            .padding(Insets::horizontal(20, 20))
            .measure_grouping(4, 40);
        let geometry = GridGeometry::compute(&spec, 200).unwrap();
        // (800 - 40 - 40) / 8
        assert_eq!(geometry.cell_size, 90);
    }

    #[test]
    fn test_cell_size_uses_floor_division() {
        let spec = GridSpec::new(3).viewport(100, 100);
        let geometry = GridGeometry::compute(&spec, 9).unwrap();
        assert_eq!(geometry.cell_size, 33);
        assert_eq!(geometry.visible_line_capacity, 4);
    }

    #[test]
    fn test_non_positive_cell_size_is_an_error() {
        let spec = GridSpec::new(8).viewport(7, 400);
        assert_eq!(
            GridGeometry::compute(&spec, 200),
            Err(GridConfigError::NonPositiveCellSize {
                available: 7,
                span: 8,
                cell_size: 0,
            })
        );

        let spec = GridSpec::new(8)
            .viewport(100, 400)
            .measure_grouping(4, 200);
        assert!(matches!(
            GridGeometry::compute(&spec, 200),
            Err(GridConfigError::NonPositiveCellSize { .. })
        ));
    }

    #[test]
    fn test_margin_must_leave_content() {
        let spec = chord_spec().cell_margin(50);
        assert_eq!(
            GridGeometry::compute(&spec, 200),
            Err(GridConfigError::MarginExceedsCell {
                margin: 50,
                cell_size: 100,
            })
        );
    }

    #[test]
    fn test_line_window_at_offsets() {
        let geometry = GridGeometry::compute(&chord_spec(), 200).unwrap();
        assert_eq!(geometry.line_window(0), 0..5);
        assert_eq!(geometry.line_window(150), 1..6);
        assert_eq!(geometry.line_window(2000), 20..25);
        assert_eq!(geometry.visible_positions(150), 8..48);
        assert_eq!(geometry.line_start(3), 300);
    }

    #[test]
    fn test_slot_rect_without_grouping() {
        let geometry = GridGeometry::compute(&chord_spec(), 200).unwrap();
        assert_eq!(geometry.slot_rect(0, 0), Rect::new(0, 0, 100, 100));
        assert_eq!(geometry.slot_rect(11, 150), Rect::new(300, -50, 400, 50));
    }

    #[test]
    fn test_slot_rect_with_grouping() {
        let spec = chord_spec().measure_grouping(4, 16);
        let geometry = GridGeometry::compute(&spec, 200).unwrap();
        // (800 - 16) / 8 = 98
        assert_eq!(geometry.cell_size, 98);
        assert_eq!(geometry.slot_rect(3, 0).left, 3 * 98);
        assert_eq!(geometry.slot_rect(4, 0).left, 4 * 98 + 16);
        assert_eq!(geometry.slot_rect(12, 0), Rect::square(4 * 98 + 16, 98, 98));
    }

    #[test]
    fn test_horizontal_swaps_axes() {
        let spec = GridSpec::new(4)
            .orientation(Orientation::Horizontal)
            .viewport(1000, 400);
        let geometry = GridGeometry::compute(&spec, 40).unwrap();
        assert_eq!(geometry.cell_size, 100);
        assert_eq!(geometry.line_count, 10);
        assert_eq!(geometry.visible_line_capacity, 11);
        assert_eq!(geometry.max_scroll_offset, 0);
        // Position 5 is the second cell of the second column.
        assert_eq!(geometry.slot_rect(5, 0), Rect::square(100, 100, 100));
    }

    #[test]
    fn test_huge_item_count_saturates() {
        let geometry = GridGeometry::compute(&chord_spec(), usize::MAX).unwrap();
        assert_eq!(geometry.max_scroll_offset, i32::MAX);
        let window = geometry.line_window(i32::MAX);
        assert_eq!(window.len(), geometry.visible_line_capacity);
    }
}
