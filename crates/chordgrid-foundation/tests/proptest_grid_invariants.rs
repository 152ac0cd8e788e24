//! Property-based invariant tests for the windowed grid.
//!
//! These tests verify invariants that must hold for any valid configuration,
//! vertical or horizontal, with or without measure gaps and cell margins:
//!
//! 1. The attached window is exactly the lines from `offset / cell` on,
//!    capped by the line count, each cell at its slot rectangle.
//! 2. Incremental scrolling produces the same placements as full relayout.
//! 3. Many small scrolls land where one big scroll of the same total lands.
//! 4. Consumed deltas never exceed the request and keep its sign.
//! 5. Laying out twice in a row changes nothing.
//! 6. No position is ever backed by two cells, and released cells never come back.

use chordgrid_foundation::prelude::*;
use chordgrid_testing::prelude::*;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

/// A valid grid configuration and item count.
///
/// Covers both orientations, measure grouping with any beats count dividing
/// the span, and cell margins. The cross axis is sized so every cell is at
/// least 7px, which keeps any generated margin valid.
fn grid_config() -> impl Strategy<Value = (GridSpec, usize)> {
    (1usize..=12)
        .prop_flat_map(|span| {
            let beats: Vec<usize> = (1..=span).filter(|beats| span % beats == 0).collect();
            (
                Just(span),
                proptest::option::of((proptest::sample::select(beats), 0i32..=24)),
                0i32..=3,
                7i32..=150,
                0i32..=span as i32 - 1,
                0i32..=900,
                any::<bool>(),
                0usize..=600,
            )
        })
        .prop_map(|(span, grouping, margin, cell, slack, main, horizontal, items)| {
            let mut spec = GridSpec::new(span).cell_margin(margin);
            if let Some((beats, gap)) = grouping {
                spec = spec.measure_grouping(beats, gap);
            }
            let cross = cell * span as i32 + spec.total_gap() + slack;
            let spec = if horizontal {
                spec.orientation(Orientation::Horizontal).viewport(main, cross)
            } else {
                spec.viewport(cross, main)
            };
            (spec, items)
        })
}

fn deltas() -> impl Strategy<Value = Vec<i32>> {
    proptest::collection::vec(-700i32..=700, 0..24)
}

/// Scrolls along whichever axis `grid` scrolls on.
fn scroll_main_axis(
    grid: &mut WindowedGridLayout<TestCell>,
    delta: i32,
    provider: &mut RecordingCellProvider,
) -> i32 {
    if grid.can_scroll_horizontally() {
        grid.scroll_horizontally_by(delta, provider).unwrap()
    } else {
        grid.scroll_vertically_by(delta, provider).unwrap()
    }
}

fn run(
    spec: GridSpec,
    item_count: usize,
    deltas: &[i32],
) -> (WindowedGridLayout<TestCell>, RecordingCellProvider, Vec<i32>) {
    let mut grid = WindowedGridLayout::new(spec);
    let mut provider = RecordingCellProvider::new(item_count);
    grid.layout(&mut provider).unwrap();
    let consumed = deltas
        .iter()
        .map(|&delta| scroll_main_axis(&mut grid, delta, &mut provider))
        .collect();
    (grid, provider, consumed)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Window formula
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn window_matches_line_formula(
        (spec, items) in grid_config(),
        deltas in deltas(),
    ) {
        let spec = spec.clone().scroll_strategy(ScrollStrategy::Incremental);
        let span = spec.span_count;
        let geometry = GridGeometry::compute(&spec, items).unwrap();
        let (grid, provider, _) = run(spec, items, &deltas);

        let offset = grid.scroll_offset();
        prop_assert!(offset >= 0 && offset <= geometry.max_scroll_offset);

        let first_line = (offset / geometry.cell_size) as usize;
        let last_line = (first_line + geometry.visible_line_capacity).min(geometry.line_count);
        let expected: Vec<usize> =
            (first_line.min(last_line) * span..(last_line * span).min(items)).collect();
        let placements = grid.placements();
        prop_assert_eq!(positions(&placements), expected);

        for placement in &placements {
            prop_assert_eq!(placement.rect, geometry.slot_rect(placement.position, offset));
        }
        assert_window_consistent(&grid, &provider);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Incremental == full relayout
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn incremental_matches_full_relayout(
        (spec, items) in grid_config(),
        deltas in deltas(),
    ) {
        let (incremental, _, consumed_incremental) =
            run(spec.clone().scroll_strategy(ScrollStrategy::Incremental), items, &deltas);
        let (full, _, consumed_full) =
            run(spec.clone().scroll_strategy(ScrollStrategy::FullRelayout), items, &deltas);

        prop_assert_eq!(consumed_incremental, consumed_full);
        prop_assert_eq!(incremental.scroll_offset(), full.scroll_offset());
        prop_assert_eq!(incremental.placements(), full.placements());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Path independence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn small_steps_match_one_big_step(
        (spec, items) in grid_config(),
        steps in proptest::collection::vec(1i32..=250, 1..20),
        backwards in any::<bool>(),
    ) {
        let steps: Vec<i32> = if backwards {
            steps.iter().map(|step| -step).collect()
        } else {
            steps
        };
        let total: i32 = steps.iter().sum();
        let start = if backwards { vec![i32::MAX / 2] } else { Vec::new() };

        let spec = spec.clone().scroll_strategy(ScrollStrategy::Incremental);
        let mut small = start.clone();
        small.extend(&steps);
        let mut big = start;
        big.push(total);

        let (small_grid, _, _) = run(spec.clone(), items, &small);
        let (big_grid, _, _) = run(spec, items, &big);

        prop_assert_eq!(small_grid.scroll_offset(), big_grid.scroll_offset());
        prop_assert_eq!(small_grid.placements(), big_grid.placements());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Consumed delta is bounded by the request
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn consumed_never_exceeds_request(
        (spec, items) in grid_config(),
        deltas in deltas(),
    ) {
        let spec = spec.clone().scroll_strategy(ScrollStrategy::Incremental);
        let (grid, _, consumed) = run(spec, items, &deltas);

        for (&delta, &used) in deltas.iter().zip(&consumed) {
            prop_assert!(used.abs() <= delta.abs());
            prop_assert!(used == 0 || used.signum() == delta.signum());
        }
        prop_assert_eq!(consumed.iter().sum::<i32>(), grid.scroll_offset());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Idempotent layout
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_is_idempotent(
        (spec, items) in grid_config(),
        deltas in deltas(),
    ) {
        let spec = spec.clone().scroll_strategy(ScrollStrategy::Incremental);
        let (mut grid, mut provider, _) = run(spec, items, &deltas);
        let before = grid.placements();

        grid.layout(&mut provider).unwrap();
        prop_assert_eq!(grid.placements(), before.clone());
        grid.layout(&mut provider).unwrap();
        prop_assert_eq!(grid.placements(), before);
        assert_window_consistent(&grid, &provider);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Recycling contract under item count changes
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn recycling_contract_survives_data_changes(
        (spec, items) in grid_config(),
        deltas in deltas(),
        new_items in 0usize..=600,
        max_scrap in 0usize..=64,
    ) {
        let spec = spec.clone().scroll_strategy(ScrollStrategy::Incremental)
            .reuse_policy(ReusePolicy::new(max_scrap));
        let (mut grid, mut provider, _) = run(spec, items, &deltas);

        provider.set_item_count(new_items);
        for &delta in &deltas {
            scroll_main_axis(&mut grid, delta, &mut provider);
        }
        grid.layout(&mut provider).unwrap();

        prop_assert!(provider.requested_positions().iter().all(|&p| p < items.max(new_items)));
        prop_assert!(grid.placements().iter().all(|p| p.position < new_items));
        prop_assert_eq!(grid.stats().cells_in_use, grid.attached_count());
        assert_window_consistent(&grid, &provider);
    }
}
