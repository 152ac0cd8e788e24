//! Foundation elements for chordgrid: the windowed grid layout, its recycling
//! pool, measure dividers and scroll clamping.

pub mod lazy;
pub mod scroll;

pub use chordgrid_ui_graphics::{Insets, IntSize, Rect};
pub use scroll::ScrollPosition;

pub mod prelude {
    pub use crate::lazy::*;
    pub use crate::scroll::*;
    pub use chordgrid_ui_graphics::{Insets, IntSize, Rect};
}
