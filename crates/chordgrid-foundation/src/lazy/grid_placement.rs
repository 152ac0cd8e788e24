//! Placed cell representation for windowed grids.
//!
//! Contains the result of laying out a single position during a pass.

use chordgrid_ui_graphics::Rect;

/// Where a materialized position sits on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Index in the data source.
    pub position: usize,

    /// Slot rectangle in viewport coordinates, margins included.
    pub rect: Rect,

    /// Inset of the cell content inside `rect`.
    pub margin: i32,
}

impl Placement {
    pub fn new(position: usize, rect: Rect, margin: i32) -> Self {
        Self {
            position,
            rect,
            margin,
        }
    }

    /// Rectangle of the cell content, the slot minus its margin.
    pub fn content_rect(&self) -> Rect {
        self.rect.inset(self.margin)
    }
}

/// A cell currently in the window together with its placement.
#[derive(Debug)]
pub(crate) struct MaterializedCell<C> {
    pub(crate) placement: Placement,
    pub(crate) cell: C,
}
