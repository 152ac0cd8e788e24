//! Cell provider trait for windowed grids.
//!
//! This module defines the [`CellProvider`] trait through which the layout
//! obtains, places and releases the cells backing visible positions.

use super::grid_placement::Placement;
use super::recycle_pool::Recycled;

/// Supplies and receives the cells of a windowed grid.
///
/// The layout never creates cells itself. For every position entering the
/// window it calls [`get_cell_at`](Self::get_cell_at), optionally offering a
/// detached cell for reuse, then reports the cell's rectangle through
/// [`place_cell`](Self::place_cell). Cells leaving the window and scrap left
/// over at the end of a pass come back through
/// [`release_cell`](Self::release_cell).
///
/// A cell handed to `release_cell` is never touched again by the layout, and a
/// position is never backed by two cells at once.
pub trait CellProvider {
    /// Handle to a renderable cell.
    type Cell;

    /// The total number of positions in the grid (visible or not).
    ///
    /// Read at the start of every layout and scroll call. A change forces the
    /// geometry to be recomputed.
    fn item_count(&self) -> usize;

    /// Returns a cell showing `position`.
    ///
    /// `recycled` is a detached cell the provider may rebind instead of creating
    /// a new one. When [`Recycled::is_bound_to`] holds for `position` the cell is
    /// already showing it. Dropping `recycled` unused is allowed.
    fn get_cell_at(&mut self, position: usize, recycled: Option<Recycled<Self::Cell>>)
        -> Self::Cell;

    /// Takes back a cell that is no longer part of the window.
    fn release_cell(&mut self, cell: Self::Cell);

    /// Records the final rectangle of a materialized cell.
    ///
    /// Called when the cell enters the window and again whenever an incremental
    /// scroll moves it.
    fn place_cell(&mut self, cell: &mut Self::Cell, placement: &Placement);
}
