//! Configuration errors for grid layouts.

use thiserror::Error;

/// A grid configuration that cannot be laid out.
///
/// Returned by [`GridSpec::validate`](super::GridSpec::validate) and by every
/// layout or scroll call that needs to (re)compute geometry. The failing pass is
/// aborted; the previously computed layout stays as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridConfigError {
    #[error("span count must be at least 1")]
    ZeroSpanCount,

    #[error("beats per group ({beats}) must be at least 1 and evenly divide the span count ({span})")]
    InvalidBeatsPerGroup { beats: usize, span: usize },

    #[error("measure gap width must not be negative (got {0})")]
    NegativeGapWidth(i32),

    #[error("cell margin must not be negative (got {0})")]
    NegativeCellMargin(i32),

    #[error("cell size would be {cell_size}px ({available}px of usable space across {span} cells)")]
    NonPositiveCellSize {
        available: i32,
        span: usize,
        cell_size: i32,
    },

    #[error("cell margin {margin}px leaves no content inside a {cell_size}px cell")]
    MarginExceedsCell { margin: i32, cell_size: i32 },
}
