//! Shared fixtures and assertions for grid tests.

use chordgrid_foundation::lazy::{GridSpec, Placement, WindowedGridLayout};

use crate::recording_provider::{RecordingCellProvider, TestCell};

/// Eight cells per line in an 800x400 viewport: 100px cells, five lines per window.
pub fn chord_diagram_spec() -> GridSpec {
    GridSpec::new(8).viewport(800, 400)
}

/// A chord diagram grid together with a provider holding `item_count` items.
pub fn chord_diagram_fixture(item_count: usize) -> (WindowedGridLayout<TestCell>, RecordingCellProvider) {
    (
        WindowedGridLayout::new(chord_diagram_spec()),
        RecordingCellProvider::new(item_count),
    )
}

pub fn positions(placements: &[Placement]) -> Vec<usize> {
    placements.iter().map(|placement| placement.position).collect()
}

/// Asserts that the provider's view of the grid matches the attached window:
/// exactly the attached positions are live, they are the positions of the
/// visible lines, and each cell sits where the layout placed it.
pub fn assert_window_consistent(grid: &WindowedGridLayout<TestCell>, provider: &RecordingCellProvider) {
    let attached = positions(&grid.placements());
    assert_eq!(provider.live_positions(), attached, "live cells differ from the window");
    if let Some(geometry) = grid.state().geometry() {
        let expected: Vec<usize> = geometry.visible_positions(grid.scroll_offset()).collect();
        assert_eq!(attached, expected, "window differs from the visible lines");
    }

    for (placement, cell) in grid.cells() {
        assert_eq!(cell.position, placement.position);
        assert_eq!(cell.rect, placement.rect, "cell {} was not moved", cell.id);
        assert_eq!(provider.placed_rect(placement.position), Some(placement.rect));
    }
}
