//! Pure math/data for pixel geometry in chordgrid.
//!
//! Everything here is integer pixels, matching how a host view system lays out
//! decorated children. No allocation, no dependencies.

mod geometry;

pub use geometry::*;
