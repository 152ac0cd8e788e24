//! A [`CellProvider`] that records every call and checks the recycling contract.

use chordgrid_foundation::lazy::{CellProvider, Placement, Recycled};
use chordgrid_ui_graphics::Rect;
use rustc_hash::{FxHashMap, FxHashSet};

/// Identifier of a cell created by [`RecordingCellProvider`].
pub type CellId = usize;

/// Cell handed out by [`RecordingCellProvider`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestCell {
    pub id: CellId,
    /// Position the cell currently shows.
    pub position: usize,
    /// Last rectangle reported through `place_cell`.
    pub rect: Rect,
    /// Number of times the cell was bound to a position.
    pub bind_count: usize,
}

/// One provider call, as observed by the harness.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellEvent {
    Created { id: CellId, position: usize },
    Rebound { id: CellId, from: usize, to: usize },
    Placed { id: CellId, position: usize, rect: Rect },
    Released { id: CellId, position: usize },
}

/// Provider that hands out [`TestCell`]s and panics on contract violations.
///
/// Panics when a position outside the data is requested, when a position is
/// backed by two unreleased cells, when a cell is placed at a position it does
/// not show, or when a cell is released twice.
#[derive(Debug, Default)]
pub struct RecordingCellProvider {
    item_count: usize,
    next_id: CellId,
    /// Unreleased cells by the position they show.
    live: FxHashMap<usize, CellId>,
    placed: FxHashMap<usize, Rect>,
    requested: FxHashSet<usize>,
    released: FxHashSet<CellId>,
    events: Vec<CellEvent>,
}

impl RecordingCellProvider {
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            ..Self::default()
        }
    }

    /// Changes the reported item count. Takes effect on the next layout call.
    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
    }

    pub fn events(&self) -> &[CellEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Number of cells created from scratch.
    pub fn created_count(&self) -> usize {
        self.next_id
    }

    pub fn rebind_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, CellEvent::Rebound { .. }))
            .count()
    }

    pub fn release_count(&self) -> usize {
        self.released.len()
    }

    /// Positions backed by an unreleased cell, in order.
    pub fn live_positions(&self) -> Vec<usize> {
        let mut positions: Vec<_> = self.live.keys().copied().collect();
        positions.sort_unstable();
        positions
    }

    /// Every position ever requested, in order.
    pub fn requested_positions(&self) -> Vec<usize> {
        let mut positions: Vec<_> = self.requested.iter().copied().collect();
        positions.sort_unstable();
        positions
    }

    pub fn was_requested(&self, position: usize) -> bool {
        self.requested.contains(&position)
    }

    /// Last rectangle placed for `position`.
    pub fn placed_rect(&self, position: usize) -> Option<Rect> {
        self.placed.get(&position).copied()
    }
}

impl CellProvider for RecordingCellProvider {
    type Cell = TestCell;

    fn item_count(&self) -> usize {
        self.item_count
    }

    fn get_cell_at(&mut self, position: usize, recycled: Option<Recycled<TestCell>>) -> TestCell {
        assert!(
            position < self.item_count,
            "position {position} requested from a grid of {} items",
            self.item_count
        );
        self.requested.insert(position);

        let mut cell = match recycled {
            Some(recycled) if recycled.is_bound_to(position) => {
                let cell = recycled.into_inner();
                self.live.remove(&position);
                cell
            }
            Some(recycled) => {
                let mut cell = recycled.into_inner();
                if self.live.get(&cell.position) == Some(&cell.id) {
                    self.live.remove(&cell.position);
                }
                self.events.push(CellEvent::Rebound {
                    id: cell.id,
                    from: cell.position,
                    to: position,
                });
                cell.position = position;
                cell
            }
            None => {
                let id = self.next_id;
                self.next_id += 1;
                self.events.push(CellEvent::Created { id, position });
                TestCell {
                    id,
                    position,
                    rect: Rect::ZERO,
                    bind_count: 0,
                }
            }
        };

        if let Some(existing) = self.live.get(&position) {
            panic!("position {position} materialized twice (cells {existing} and {})", cell.id);
        }
        self.live.insert(position, cell.id);
        cell.bind_count += 1;
        log::trace!("cell {} bound to position {position}", cell.id);
        cell
    }

    fn release_cell(&mut self, cell: TestCell) {
        assert!(self.released.insert(cell.id), "cell {} released twice", cell.id);
        if self.live.get(&cell.position) == Some(&cell.id) {
            self.live.remove(&cell.position);
        }
        self.events.push(CellEvent::Released {
            id: cell.id,
            position: cell.position,
        });
    }

    fn place_cell(&mut self, cell: &mut TestCell, placement: &Placement) {
        assert_eq!(
            cell.position, placement.position,
            "cell {} placed at a position it does not show",
            cell.id
        );
        cell.rect = placement.rect;
        self.placed.insert(placement.position, placement.rect);
        self.events.push(CellEvent::Placed {
            id: cell.id,
            position: placement.position,
            rect: placement.rect,
        });
    }
}
