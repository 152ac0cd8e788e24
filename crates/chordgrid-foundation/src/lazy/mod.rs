//! Windowed grid layout for chord diagrams.
//!
//! This module provides a virtualized grid that only materializes the cells
//! backing currently visible positions, recycling detached cells as the grid
//! scrolls.
//!
//! # Architecture
//!
//! - [`GridSpec`] - Span count, viewport, grouping and scroll configuration
//! - [`GridGeometry`] - Cell size, line count and scroll range derived from a spec
//! - [`CellProvider`] - Cell factory trait implemented by the host
//! - [`WindowedGridLayout`] - Full and incremental layout passes
//! - [`MeasureDivider`] - Divider decoration drawn between measures
//!
//! # Example
//!
//! ```rust,ignore
//! let mut grid = WindowedGridLayout::new(
//!     GridSpec::new(8).viewport(800, 400).measure_grouping(4, 16),
//! );
//! grid.layout(&mut provider)?;
//! let consumed = grid.scroll_vertically_by(150, &mut provider)?;
//! grid.draw_measure_dividers(&mut canvas);
//! ```

mod cell_provider;
mod grid_error;
mod grid_geometry;
mod grid_layout_state;
mod grid_placement;
mod grid_spec;
mod measure_divider;
mod recycle_pool;
mod windowed_grid_layout;

pub use cell_provider::*;
pub use grid_error::*;
pub use grid_geometry::*;
pub use grid_layout_state::*;
pub use grid_placement::Placement;
pub use grid_spec::*;
pub use measure_divider::*;
pub use recycle_pool::*;
pub use windowed_grid_layout::*;
