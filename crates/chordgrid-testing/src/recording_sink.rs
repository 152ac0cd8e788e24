//! A [`DividerSink`] that keeps every divider it receives.

use chordgrid_foundation::lazy::DividerSink;
use chordgrid_ui_graphics::Rect;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingDividerSink {
    intrinsic_width: i32,
    dividers: Vec<Rect>,
}

impl RecordingDividerSink {
    pub fn new(intrinsic_width: i32) -> Self {
        Self {
            intrinsic_width,
            dividers: Vec::new(),
        }
    }

    /// Dividers emitted since the last [`clear`](Self::clear), in draw order.
    pub fn dividers(&self) -> &[Rect] {
        &self.dividers
    }

    pub fn clear(&mut self) {
        self.dividers.clear();
    }
}

impl DividerSink for RecordingDividerSink {
    fn divider_intrinsic_width(&self) -> i32 {
        self.intrinsic_width
    }

    fn emit_divider(&mut self, rect: Rect) {
        self.dividers.push(rect);
    }
}
