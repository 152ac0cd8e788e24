//! Configuration for windowed grid layouts.
//!
//! A [`GridSpec`] is plain data: how many cells sit on a line, which way the grid
//! scrolls, how big the viewport is, and how cells are grouped into measures.
//! It is validated every time geometry is computed.

use chordgrid_ui_graphics::{Insets, IntSize};

use super::grid_error::GridConfigError;
use super::recycle_pool::ReusePolicy;

/// Default number of cells per line. One bar of eight beats in the chord diagram.
pub const DEFAULT_SPAN_COUNT: usize = 8;

/// Scroll direction of the grid.
///
/// Vertical grids stack rows top to bottom and scroll vertically; horizontal grids
/// stack columns left to right and scroll horizontally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// How a scroll delta is turned into a new window of cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollStrategy {
    /// Offset the cells already placed and only add or drop whole lines at the edges.
    #[default]
    Incremental,
    /// Scrap everything and lay out the window again from scratch.
    FullRelayout,
}

/// Groups the cells of a line into measures separated by a fixed gap.
///
/// With a span of 8 and `beats_per_group` of 4 every line holds two measures of
/// four beats, with `gap_width` pixels between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeasureGrouping {
    /// Cells per measure.
    pub beats_per_group: usize,
    /// Pixels inserted between neighbouring measures.
    pub gap_width: i32,
}

impl MeasureGrouping {
    pub fn new(beats_per_group: usize, gap_width: i32) -> Self {
        Self {
            beats_per_group,
            gap_width,
        }
    }

    /// Number of measures on a line of `span_count` cells.
    pub fn groups_per_line(&self, span_count: usize) -> usize {
        span_count / self.beats_per_group.max(1)
    }

    /// Pixels taken by all gaps on one line.
    pub fn total_gap(&self, span_count: usize) -> i32 {
        let gaps = self.groups_per_line(span_count).saturating_sub(1);
        i32::try_from(gaps)
            .unwrap_or(i32::MAX)
            .saturating_mul(self.gap_width)
    }

    /// Gap pixels accumulated before the cell at `column`.
    ///
    /// One gap per group boundary crossed so far: columns `0..beats` get none,
    /// `beats..2*beats` get one, and so on.
    pub fn gap_before(&self, column: usize) -> i32 {
        let crossed = column / self.beats_per_group.max(1);
        i32::try_from(crossed)
            .unwrap_or(i32::MAX)
            .saturating_mul(self.gap_width)
    }
}

/// Configuration of a [`WindowedGridLayout`](super::WindowedGridLayout).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridSpec {
    /// Cells per line (row for vertical grids, column for horizontal ones).
    pub span_count: usize,
    pub orientation: Orientation,
    /// Size of the host viewport.
    pub viewport: IntSize,
    /// Host padding. Only the cross-axis pair shrinks the space shared by the cells.
    pub padding: Insets,
    /// Optional measure grouping with gaps between groups.
    pub grouping: Option<MeasureGrouping>,
    /// Inset of the cell content inside its slot, on every side.
    pub cell_margin: i32,
    pub scroll_strategy: ScrollStrategy,
    pub reuse_policy: ReusePolicy,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            span_count: DEFAULT_SPAN_COUNT,
            orientation: Orientation::Vertical,
            viewport: IntSize::default(),
            padding: Insets::ZERO,
            grouping: None,
            cell_margin: 0,
            scroll_strategy: ScrollStrategy::Incremental,
            reuse_policy: ReusePolicy::default(),
        }
    }
}

impl GridSpec {
    pub fn new(span_count: usize) -> Self {
        Self {
            span_count,
            ..Self::default()
        }
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn viewport(mut self, width: i32, height: i32) -> Self {
        self.viewport = IntSize::new(width, height);
        self
    }

    pub fn padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Groups every `beats_per_group` cells into a measure, `gap_width` pixels apart.
    pub fn measure_grouping(mut self, beats_per_group: usize, gap_width: i32) -> Self {
        self.grouping = Some(MeasureGrouping::new(beats_per_group, gap_width));
        self
    }

    pub fn cell_margin(mut self, margin: i32) -> Self {
        self.cell_margin = margin;
        self
    }

    pub fn scroll_strategy(mut self, strategy: ScrollStrategy) -> Self {
        self.scroll_strategy = strategy;
        self
    }

    pub fn reuse_policy(mut self, policy: ReusePolicy) -> Self {
        self.reuse_policy = policy;
        self
    }

    /// Checks the invariants that do not depend on the viewport size.
    pub fn validate(&self) -> Result<(), GridConfigError> {
        if self.span_count == 0 {
            return Err(GridConfigError::ZeroSpanCount);
        }
        if let Some(grouping) = self.grouping {
            if grouping.beats_per_group == 0 || self.span_count % grouping.beats_per_group != 0 {
                return Err(GridConfigError::InvalidBeatsPerGroup {
                    beats: grouping.beats_per_group,
                    span: self.span_count,
                });
            }
            if grouping.gap_width < 0 {
                return Err(GridConfigError::NegativeGapWidth(grouping.gap_width));
            }
        }
        if self.cell_margin < 0 {
            return Err(GridConfigError::NegativeCellMargin(self.cell_margin));
        }
        Ok(())
    }

    /// Pixels along the cross axis available to cells and gaps, after padding.
    pub fn cross_axis_available(&self) -> i32 {
        match self.orientation {
            Orientation::Vertical => self.viewport.width - self.padding.horizontal_sum(),
            Orientation::Horizontal => self.viewport.height - self.padding.vertical_sum(),
        }
    }

    /// Viewport extent along the scroll axis.
    pub fn main_axis_extent(&self) -> i32 {
        match self.orientation {
            Orientation::Vertical => self.viewport.height,
            Orientation::Horizontal => self.viewport.width,
        }
    }

    /// Pixels taken by measure gaps on one line, zero without grouping.
    pub fn total_gap(&self) -> i32 {
        self.grouping
            .map_or(0, |grouping| grouping.total_gap(self.span_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let spec = GridSpec::new(8)
            .viewport(800, 400)
            .padding(Insets::horizontal(10, 10))
            .measure_grouping(4, 16)
            .cell_margin(2)
            .scroll_strategy(ScrollStrategy::FullRelayout);

        assert_eq!(spec.span_count, 8);
        assert_eq!(spec.viewport, IntSize::new(800, 400));
        assert_eq!(spec.grouping, Some(MeasureGrouping::new(4, 16)));
        assert_eq!(spec.cell_margin, 2);
        assert_eq!(spec.scroll_strategy, ScrollStrategy::FullRelayout);
        assert_eq!(spec.cross_axis_available(), 780);
        assert_eq!(spec.main_axis_extent(), 400);
    }

    #[test]
    fn test_zero_span_is_rejected() {
        assert_eq!(
            GridSpec::new(0).validate(),
            Err(GridConfigError::ZeroSpanCount)
        );
    }

    #[test]
    fn test_beats_must_divide_span() {
        let spec = GridSpec::new(8).measure_grouping(3, 10);
        assert_eq!(
            spec.validate(),
            Err(GridConfigError::InvalidBeatsPerGroup { beats: 3, span: 8 })
        );

        let spec = GridSpec::new(8).measure_grouping(0, 10);
        assert!(spec.validate().is_err());

        assert!(GridSpec::new(8).measure_grouping(4, 10).validate().is_ok());
        assert!(GridSpec::new(8).measure_grouping(8, 10).validate().is_ok());
    }

    #[test]
    fn test_negative_gap_and_margin_are_rejected() {
        assert_eq!(
            GridSpec::new(8).measure_grouping(4, -1).validate(),
            Err(GridConfigError::NegativeGapWidth(-1))
        );
        assert_eq!(
            GridSpec::new(8).cell_margin(-2).validate(),
            Err(GridConfigError::NegativeCellMargin(-2))
        );
    }

    #[test]
    fn test_gap_accumulates_per_group_boundary() {
        let grouping = MeasureGrouping::new(4, 20);
        assert_eq!(grouping.gap_before(0), 0);
        assert_eq!(grouping.gap_before(3), 0);
        assert_eq!(grouping.gap_before(4), 20);
        assert_eq!(grouping.gap_before(7), 20);
        assert_eq!(grouping.total_gap(8), 20);
        assert_eq!(grouping.total_gap(16), 60);
    }

    #[test]
    fn test_horizontal_uses_vertical_padding_for_cross_axis() {
        let spec = GridSpec::new(4)
            .orientation(Orientation::Horizontal)
            .viewport(1000, 420)
            .padding(Insets::new(5, 10, 5, 10));
        assert_eq!(spec.cross_axis_available(), 400);
        assert_eq!(spec.main_axis_extent(), 1000);
    }
}
