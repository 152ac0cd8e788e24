mod chord_diagram;

use anyhow::Context;
use chord_diagram::{ChordCellProvider, TextCanvas};
use chordgrid_foundation::prelude::*;

const DEFAULT_CHORD_COUNT: usize = 200;
const DEFAULT_BEATS_PER_LINE: usize = 8;
const BEATS_PER_MEASURE: usize = 4;
const MEASURE_GAP: i32 = 16;
const DIVIDER_WIDTH: i32 = 4;

/// Pixel deltas of a drag down the progression, a fling past the end and a
/// drag back to the top.
const GESTURES: &[(&str, &[i32])] = &[
    ("drag", &[40, 60, 50, 120, 90]),
    ("fling", &[600, 450, 300, 200, 120, 60, 30]),
    ("overscroll", &[500, 500]),
    ("drag back", &[-250, -400, -800, -900]),
];

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    let _ = env_logger::try_init();

    let mut args = std::env::args().skip(1);
    let chord_count = parse_arg(args.next(), "chord count")?.unwrap_or(DEFAULT_CHORD_COUNT);
    let beats_per_line = parse_arg(args.next(), "beats per line")?.unwrap_or(DEFAULT_BEATS_PER_LINE);

    let spec = GridSpec::new(beats_per_line)
        .viewport(800, 400)
        .measure_grouping(BEATS_PER_MEASURE, MEASURE_GAP)
        .cell_margin(2);
    let mut grid = WindowedGridLayout::new(spec);
    let mut provider = ChordCellProvider::with_progression(chord_count);
    let mut canvas = TextCanvas::new(DIVIDER_WIDTH);

    grid.layout(&mut provider)?;
    print_window("initial", &grid);

    for (name, deltas) in GESTURES {
        let mut consumed = 0;
        for &delta in deltas.iter() {
            consumed += grid.scroll_vertically_by(delta, &mut provider)?;
        }
        log::info!("{name}: requested {}, consumed {consumed}", deltas.iter().sum::<i32>());
        print_window(name, &grid);
    }

    grid.scroll_to_position(chord_count / 2, &mut provider)?;
    print_window("jump to middle", &grid);

    let drawn = grid.draw_measure_dividers(&mut canvas);
    println!("{drawn} measure dividers:");
    for rect in canvas.dividers() {
        println!("  {rect:?}");
    }

    println!("first line: {}", provider.render_line(&grid, beats_per_line));
    if let Some((_, cell)) = grid.cells().next() {
        println!("beat {} drawn in {:?}", cell.position, cell.bounds);
    }

    let stats = grid.stats().clone();
    grid.detach(&mut provider);
    println!(
        "materialized {} times ({} reused) with {} cells created, {} released",
        stats.total_materialized,
        stats.reuse_count,
        provider.created_count(),
        provider.released_count()
    );
    Ok(())
}

fn parse_arg(arg: Option<String>, name: &str) -> anyhow::Result<Option<usize>> {
    arg.map(|value| {
        value
            .parse()
            .with_context(|| format!("invalid {name}: {value:?}"))
    })
    .transpose()
}

fn print_window(label: &str, grid: &WindowedGridLayout<chord_diagram::ChordCell>) {
    let info = grid.layout_info();
    match (info.first_visible_position, info.last_visible_position) {
        (Some(first), Some(last)) => println!(
            "{label:>15}: offset {:>4}/{} showing beats {first}..={last}",
            info.scroll_offset, info.max_scroll_offset
        ),
        _ => println!("{label:>15}: nothing attached"),
    }
}
