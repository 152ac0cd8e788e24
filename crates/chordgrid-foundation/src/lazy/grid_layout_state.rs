//! Windowed grid state management.
//!
//! Provides [`LayoutState`], the mutable bookkeeping a
//! [`WindowedGridLayout`](super::WindowedGridLayout) carries between passes,
//! plus the read-only snapshots it hands out.

use std::ops::Range;

use chordgrid_ui_graphics::IntSize;

use super::grid_geometry::GridGeometry;
use super::grid_placement::Placement;
use crate::scroll::ScrollPosition;

/// Statistics about cell lifecycle.
///
/// Used for testing and debugging recycling behavior.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridLayoutStats {
    /// Number of cells currently materialized.
    pub cells_in_use: usize,

    /// Total number of cells requested from the provider.
    pub total_materialized: usize,

    /// Number of requests that were offered a detached cell.
    pub reuse_count: usize,

    /// Number of cells given back to the provider.
    pub released_count: usize,

    /// Number of full layout passes run.
    pub full_passes: usize,

    /// Number of scrolls handled by offsetting the existing window.
    pub incremental_passes: usize,
}

/// State carried by a windowed grid between passes.
///
/// Geometry is recomputed only when `needs_geometry_recompute` is set; the flag
/// is raised explicitly on configuration changes and when the provider reports a
/// different item count, never inferred from an empty window.
#[derive(Clone, Debug)]
pub struct LayoutState {
    geometry: Option<GridGeometry>,
    scroll: ScrollPosition,
    item_count: usize,
    needs_geometry_recompute: bool,
    first_visible_position: Option<usize>,
    last_visible_position: Option<usize>,
    stats: GridLayoutStats,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutState {
    pub fn new() -> Self {
        Self {
            geometry: None,
            scroll: ScrollPosition::new(0),
            item_count: 0,
            needs_geometry_recompute: true,
            first_visible_position: None,
            last_visible_position: None,
            stats: GridLayoutStats::default(),
        }
    }

    /// Geometry from the last successful recompute.
    pub fn geometry(&self) -> Option<&GridGeometry> {
        self.geometry.as_ref()
    }

    pub fn scroll_offset(&self) -> i32 {
        self.scroll.value()
    }

    pub fn max_scroll_offset(&self) -> i32 {
        self.geometry.map_or(0, |geometry| geometry.max_scroll_offset)
    }

    /// Item count seen by the last successful geometry recompute.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn needs_geometry_recompute(&self) -> bool {
        self.needs_geometry_recompute || self.geometry.is_none()
    }

    pub fn first_visible_position(&self) -> Option<usize> {
        self.first_visible_position
    }

    pub fn last_visible_position(&self) -> Option<usize> {
        self.last_visible_position
    }

    pub fn stats(&self) -> &GridLayoutStats {
        &self.stats
    }

    /// Forces the next pass to recompute geometry.
    pub(crate) fn invalidate_geometry(&mut self) {
        self.needs_geometry_recompute = true;
    }

    /// Installs freshly computed geometry and clamps the scroll offset into it.
    pub(crate) fn apply_geometry(&mut self, geometry: GridGeometry) {
        self.item_count = geometry.item_count;
        self.scroll.set_max_value(geometry.max_scroll_offset);
        self.geometry = Some(geometry);
        self.needs_geometry_recompute = false;
    }

    pub(crate) fn scroll_mut(&mut self) -> &mut ScrollPosition {
        &mut self.scroll
    }

    pub(crate) fn stats_mut(&mut self) -> &mut GridLayoutStats {
        &mut self.stats
    }

    /// Records the window produced by the last pass.
    pub(crate) fn record_window(&mut self, positions: Option<Range<usize>>, cells_in_use: usize) {
        match positions {
            Some(range) if !range.is_empty() => {
                self.first_visible_position = Some(range.start);
                self.last_visible_position = Some(range.end - 1);
            }
            _ => {
                self.first_visible_position = None;
                self.last_visible_position = None;
            }
        }
        self.stats.cells_in_use = cells_in_use;
    }
}

/// Information about the current window of a grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridLayoutInfo {
    /// Placements of every materialized position, in position order.
    pub visible_items_info: Vec<Placement>,

    /// Total number of positions in the grid.
    pub total_items_count: usize,

    pub first_visible_position: Option<usize>,
    pub last_visible_position: Option<usize>,

    /// Current scroll offset along the scroll axis.
    pub scroll_offset: i32,
    pub max_scroll_offset: i32,

    /// Side of a cell slot.
    pub cell_size: i32,

    /// Number of lines in the grid.
    pub line_count: usize,

    pub viewport: IntSize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lazy::GridSpec;

    #[test]
    fn test_initial_state_needs_geometry() {
        let state = LayoutState::new();
        assert!(state.needs_geometry_recompute());
        assert_eq!(state.scroll_offset(), 0);
        assert_eq!(state.max_scroll_offset(), 0);
        assert_eq!(state.first_visible_position(), None);
    }

    #[test]
    fn test_apply_geometry_clamps_offset() {
        let mut state = LayoutState::new();
        state.scroll_mut().scroll_to(5000);
        assert_eq!(state.scroll_offset(), 5000);

        let geometry = GridGeometry::compute(&GridSpec::new(8).viewport(800, 400), 200).unwrap();
        state.apply_geometry(geometry);

        assert!(!state.needs_geometry_recompute());
        assert_eq!(state.item_count(), 200);
        assert_eq!(state.scroll_offset(), 2000);
        assert_eq!(state.max_scroll_offset(), 2000);

        state.invalidate_geometry();
        assert!(state.needs_geometry_recompute());
    }

    #[test]
    fn test_record_window() {
        let mut state = LayoutState::new();
        state.record_window(Some(8..48), 40);
        assert_eq!(state.first_visible_position(), Some(8));
        assert_eq!(state.last_visible_position(), Some(47));
        assert_eq!(state.stats().cells_in_use, 40);

        state.record_window(None, 0);
        assert_eq!(state.first_visible_position(), None);
        assert_eq!(state.last_visible_position(), None);
    }
}
