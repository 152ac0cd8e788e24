//! Chord cells and a text canvas standing in for a real renderer.

use chordgrid_foundation::prelude::*;

const PROGRESSION: &[&str] = &["C", "Am", "F", "G", "Em", "Am", "Dm7", "G7"];

/// One beat of the progression, rendered as a chord label.
#[derive(Debug)]
pub struct ChordCell {
    pub position: usize,
    pub label: String,
    pub bounds: Rect,
}

/// Serves chord cells for a repeating progression, rebinding recycled cells.
#[derive(Debug, Default)]
pub struct ChordCellProvider {
    chords: Vec<&'static str>,
    created: usize,
    released: usize,
}

impl ChordCellProvider {
    pub fn with_progression(beats: usize) -> Self {
        Self {
            chords: PROGRESSION.iter().copied().cycle().take(beats).collect(),
            ..Self::default()
        }
    }

    pub fn created_count(&self) -> usize {
        self.created
    }

    pub fn released_count(&self) -> usize {
        self.released
    }

    /// Labels of the first attached line, separated by bar lines at measure starts.
    pub fn render_line(&self, grid: &WindowedGridLayout<ChordCell>, span: usize) -> String {
        let beats = grid
            .spec()
            .grouping
            .map_or(span, |grouping| grouping.beats_per_group);
        grid.cells()
            .take(span)
            .enumerate()
            .map(|(index, (_, cell))| {
                if index > 0 && index % beats == 0 {
                    format!("| {}", cell.label)
                } else {
                    cell.label.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn chord_at(&self, position: usize) -> &'static str {
        self.chords.get(position).copied().unwrap_or("?")
    }
}

impl CellProvider for ChordCellProvider {
    type Cell = ChordCell;

    fn item_count(&self) -> usize {
        self.chords.len()
    }

    fn get_cell_at(&mut self, position: usize, recycled: Option<Recycled<ChordCell>>) -> ChordCell {
        match recycled {
            Some(recycled) if recycled.is_bound_to(position) => recycled.into_inner(),
            Some(recycled) => {
                let mut cell = recycled.into_inner();
                log::trace!("rebinding cell from beat {} to {position}", cell.position);
                cell.position = position;
                cell.label.clear();
                cell.label.push_str(self.chord_at(position));
                cell
            }
            None => {
                self.created += 1;
                ChordCell {
                    position,
                    label: self.chord_at(position).to_string(),
                    bounds: Rect::ZERO,
                }
            }
        }
    }

    fn release_cell(&mut self, cell: ChordCell) {
        log::trace!("released cell for beat {}", cell.position);
        self.released += 1;
    }

    fn place_cell(&mut self, cell: &mut ChordCell, placement: &Placement) {
        cell.bounds = placement.content_rect();
    }
}

/// Collects measure dividers instead of painting them.
#[derive(Debug)]
pub struct TextCanvas {
    divider_width: i32,
    dividers: Vec<Rect>,
}

impl TextCanvas {
    pub fn new(divider_width: i32) -> Self {
        Self {
            divider_width,
            dividers: Vec::new(),
        }
    }

    pub fn dividers(&self) -> &[Rect] {
        &self.dividers
    }
}

impl DividerSink for TextCanvas {
    fn divider_intrinsic_width(&self) -> i32 {
        self.divider_width
    }

    fn emit_divider(&mut self, rect: Rect) {
        self.dividers.push(rect);
    }
}
