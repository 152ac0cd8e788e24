//! Windowed grid layout.
//!
//! [`WindowedGridLayout`] keeps exactly the cells whose lines intersect the
//! viewport (plus one partially visible line) attached, in position order. A
//! full pass rebuilds that window from scratch; an incremental pass shifts the
//! surviving cells by the consumed scroll delta and only fills or trims whole
//! lines at the edges. Both passes derive the window from the same
//! [`GridGeometry::line_window`], so they always agree on the placements.

use std::collections::VecDeque;
use std::ops::Range;

use chordgrid_ui_graphics::{Insets, IntSize};
use smallvec::SmallVec;
use web_time::Instant;

use super::cell_provider::CellProvider;
use super::grid_error::GridConfigError;
use super::grid_geometry::GridGeometry;
use super::grid_layout_state::{GridLayoutInfo, GridLayoutStats, LayoutState};
use super::grid_placement::{MaterializedCell, Placement};
use super::grid_spec::{GridSpec, Orientation, ScrollStrategy};
use super::measure_divider::{DividerSink, MeasureDivider};
use super::recycle_pool::RecyclePool;

/// Window size past which every pass logs a warning.
///
/// The window is never truncated: a grid with tiny cells in a huge viewport
/// still gets every visible cell.
const LARGE_WINDOW_WARNING: usize = 4096;

/// Cells of a single line, collected before they join the window.
type LineCells<C> = SmallVec<[MaterializedCell<C>; 16]>;

/// A virtualized grid laying out square cells in lines of `span_count`.
///
/// The layout owns the geometry, the scroll offset and the window of attached
/// cells. Cells themselves come from, and go back to, a [`CellProvider`]
/// passed to every operation.
#[derive(Debug)]
pub struct WindowedGridLayout<C> {
    spec: GridSpec,
    state: LayoutState,
    window: VecDeque<MaterializedCell<C>>,
    pool: RecyclePool<C>,
    /// Whether `window` reflects the current geometry and offset.
    has_layout: bool,
}

impl<C> WindowedGridLayout<C> {
    pub fn new(spec: GridSpec) -> Self {
        let pool = RecyclePool::with_policy(spec.reuse_policy);
        Self {
            spec,
            state: LayoutState::new(),
            window: VecDeque::new(),
            pool,
            has_layout: false,
        }
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Replaces the configuration. Takes effect on the next layout or scroll.
    pub fn set_spec(&mut self, spec: GridSpec) {
        if spec == self.spec {
            return;
        }
        if spec.reuse_policy != self.spec.reuse_policy {
            // Scrap never outlives a pass, so the old pool is empty.
            self.pool = RecyclePool::with_policy(spec.reuse_policy);
        }
        log::debug!("WindowedGrid: configuration changed, geometry marked dirty");
        self.spec = spec;
        self.state.invalidate_geometry();
    }

    pub fn set_viewport(&mut self, width: i32, height: i32) {
        let viewport = IntSize::new(width, height);
        if viewport != self.spec.viewport {
            self.spec.viewport = viewport;
            self.state.invalidate_geometry();
        }
    }

    pub fn set_padding(&mut self, padding: Insets) {
        if padding != self.spec.padding {
            self.spec.padding = padding;
            self.state.invalidate_geometry();
        }
    }

    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    pub fn stats(&self) -> &GridLayoutStats {
        self.state.stats()
    }

    pub fn scroll_offset(&self) -> i32 {
        self.state.scroll_offset()
    }

    /// Number of attached cells.
    pub fn attached_count(&self) -> usize {
        self.window.len()
    }

    /// Placements of the attached cells, in position order.
    pub fn placements(&self) -> Vec<Placement> {
        self.window.iter().map(|m| m.placement).collect()
    }

    /// Attached cells with their placements, in position order.
    pub fn cells(&self) -> impl Iterator<Item = (&Placement, &C)> + '_ {
        self.window.iter().map(|m| (&m.placement, &m.cell))
    }

    pub fn can_scroll_vertically(&self) -> bool {
        self.spec.orientation == Orientation::Vertical
    }

    pub fn can_scroll_horizontally(&self) -> bool {
        self.spec.orientation == Orientation::Horizontal
    }

    /// Whether a positive delta would move the grid.
    pub fn can_scroll_forward(&self) -> bool {
        self.state.scroll_offset() < self.state.max_scroll_offset()
    }

    /// Whether a negative delta would move the grid.
    pub fn can_scroll_backward(&self) -> bool {
        self.state.scroll_offset() > 0
    }

    /// Snapshot of the current window.
    pub fn layout_info(&self) -> GridLayoutInfo {
        let geometry = self.state.geometry();
        GridLayoutInfo {
            visible_items_info: self.placements(),
            total_items_count: self.state.item_count(),
            first_visible_position: self.state.first_visible_position(),
            last_visible_position: self.state.last_visible_position(),
            scroll_offset: self.state.scroll_offset(),
            max_scroll_offset: self.state.max_scroll_offset(),
            cell_size: geometry.map_or(0, |geometry| geometry.cell_size),
            line_count: geometry.map_or(0, |geometry| geometry.line_count),
            viewport: self.spec.viewport,
        }
    }

    /// Runs a full layout pass at the current scroll offset.
    ///
    /// Recomputes the geometry first when it is dirty. On a configuration
    /// error nothing is touched and the previous window stays attached.
    pub fn layout<P>(&mut self, provider: &mut P) -> Result<(), GridConfigError>
    where
        P: CellProvider<Cell = C> + ?Sized,
    {
        let (geometry, _) = self.ensure_geometry(provider)?;
        self.full_pass(&geometry, provider);
        Ok(())
    }

    /// Scrolls a vertical grid by `dy` pixels and returns the delta consumed.
    ///
    /// The consumed delta is the difference between the clamped new offset and
    /// the old one; it is zero at either boundary. Horizontal grids ignore
    /// vertical scrolls.
    pub fn scroll_vertically_by<P>(&mut self, dy: i32, provider: &mut P) -> Result<i32, GridConfigError>
    where
        P: CellProvider<Cell = C> + ?Sized,
    {
        if !self.can_scroll_vertically() {
            log::trace!("WindowedGrid: vertical scroll of {dy} ignored by a horizontal grid");
            return Ok(0);
        }
        self.scroll_main_axis_by(dy, provider)
    }

    /// Scrolls a horizontal grid by `dx` pixels and returns the delta consumed.
    pub fn scroll_horizontally_by<P>(&mut self, dx: i32, provider: &mut P) -> Result<i32, GridConfigError>
    where
        P: CellProvider<Cell = C> + ?Sized,
    {
        if !self.can_scroll_horizontally() {
            log::trace!("WindowedGrid: horizontal scroll of {dx} ignored by a vertical grid");
            return Ok(0);
        }
        self.scroll_main_axis_by(dx, provider)
    }

    /// Scrolls so the line holding `position` starts at the leading edge,
    /// clamped to the scroll range, then runs a full pass.
    ///
    /// Positions past the end snap to the last one.
    pub fn scroll_to_position<P>(&mut self, position: usize, provider: &mut P) -> Result<(), GridConfigError>
    where
        P: CellProvider<Cell = C> + ?Sized,
    {
        let (geometry, _) = self.ensure_geometry(provider)?;
        let clamped = position.min(geometry.item_count.saturating_sub(1));
        let target = geometry.line_start(geometry.line_of(clamped));
        self.state.scroll_mut().scroll_to(target);
        log::debug!(
            "WindowedGrid: scroll to position {position} -> offset {}",
            self.state.scroll_offset()
        );
        self.full_pass(&geometry, provider);
        Ok(())
    }

    /// Releases every attached cell and forgets the scroll offset.
    ///
    /// The next layout starts from offset zero with freshly computed geometry.
    pub fn detach<P>(&mut self, provider: &mut P)
    where
        P: CellProvider<Cell = C> + ?Sized,
    {
        let released = self.window.len();
        while let Some(materialized) = self.window.pop_front() {
            provider.release_cell(materialized.cell);
        }
        for cell in self.pool.drain() {
            provider.release_cell(cell);
        }
        self.state = LayoutState::new();
        self.has_layout = false;
        log::debug!("WindowedGrid: detached, released {released} cells");
    }

    /// Draws measure dividers over the attached cells into `sink`.
    ///
    /// Returns the number of dividers emitted.
    pub fn draw_measure_dividers<S>(&self, sink: &mut S) -> usize
    where
        S: DividerSink + ?Sized,
    {
        MeasureDivider::new(&self.spec).draw_over(&self.placements(), sink)
    }

    fn scroll_main_axis_by<P>(&mut self, delta: i32, provider: &mut P) -> Result<i32, GridConfigError>
    where
        P: CellProvider<Cell = C> + ?Sized,
    {
        let (geometry, recomputed) = self.ensure_geometry(provider)?;
        let consumed = self.state.scroll_mut().consume_scroll_delta(delta);
        if consumed == 0 && delta != 0 {
            log::trace!(
                "WindowedGrid: scroll of {delta} stopped at offset {}",
                self.state.scroll_offset()
            );
        }

        if recomputed || !self.has_layout {
            self.full_pass(&geometry, provider);
        } else if consumed != 0 {
            match self.spec.scroll_strategy {
                ScrollStrategy::Incremental => self.incremental_pass(consumed, &geometry, provider),
                ScrollStrategy::FullRelayout => self.full_pass(&geometry, provider),
            }
        }
        Ok(consumed)
    }

    /// Returns the current geometry, recomputing it when dirty or when the
    /// provider's item count changed. The flag is `true` after a recompute.
    fn ensure_geometry<P>(&mut self, provider: &P) -> Result<(GridGeometry, bool), GridConfigError>
    where
        P: CellProvider<Cell = C> + ?Sized,
    {
        let item_count = provider.item_count();
        if let Some(geometry) = self.state.geometry().copied() {
            if item_count != geometry.item_count {
                log::debug!(
                    "WindowedGrid: item count changed from {} to {item_count}",
                    geometry.item_count
                );
                self.state.invalidate_geometry();
            } else if !self.state.needs_geometry_recompute() {
                return Ok((geometry, false));
            }
        }

        let geometry = GridGeometry::compute(&self.spec, item_count)
            .inspect_err(|err| log::error!("WindowedGrid: layout aborted: {err}"))?;
        log::debug!(
            "WindowedGrid: {} items in {} lines of {}, cell {}px, {} lines per window, max offset {}",
            geometry.item_count,
            geometry.line_count,
            geometry.span_count,
            geometry.cell_size,
            geometry.visible_line_capacity,
            geometry.max_scroll_offset
        );
        self.state.apply_geometry(geometry);
        Ok((geometry, true))
    }

    /// Detaches everything and materializes the window for the current offset.
    fn full_pass<P>(&mut self, geometry: &GridGeometry, provider: &mut P)
    where
        P: CellProvider<Cell = C> + ?Sized,
    {
        let started = Instant::now();
        while let Some(materialized) = self.window.pop_front() {
            self.scrap(materialized, provider);
        }

        let offset = self.state.scroll_offset();
        for line in geometry.line_window(offset) {
            let cells = self.materialize_line(line, geometry, offset, provider);
            self.window.extend(cells);
        }

        self.release_scrap(provider);
        self.finish_pass();
        self.state.stats_mut().full_passes += 1;
        log::trace!(
            "WindowedGrid: full pass at offset {offset}, {} cells in {:?}",
            self.window.len(),
            started.elapsed()
        );
    }

    /// Moves the attached cells by `consumed` and adjusts the window edges.
    ///
    /// Expects the scroll offset to already include `consumed`.
    fn incremental_pass<P>(&mut self, consumed: i32, geometry: &GridGeometry, provider: &mut P)
    where
        P: CellProvider<Cell = C> + ?Sized,
    {
        let offset = self.state.scroll_offset();
        let target = geometry.line_window(offset);

        while self
            .window
            .front()
            .is_some_and(|m| geometry.line_of(m.placement.position) < target.start)
        {
            if let Some(materialized) = self.window.pop_front() {
                self.scrap(materialized, provider);
            }
        }
        while self
            .window
            .back()
            .is_some_and(|m| geometry.line_of(m.placement.position) >= target.end)
        {
            if let Some(materialized) = self.window.pop_back() {
                self.scrap(materialized, provider);
            }
        }

        let (dx, dy) = match geometry.orientation {
            Orientation::Vertical => (0, -consumed),
            Orientation::Horizontal => (-consumed, 0),
        };
        for materialized in self.window.iter_mut() {
            materialized.placement.rect = materialized.placement.rect.translate(dx, dy);
            provider.place_cell(&mut materialized.cell, &materialized.placement);
        }

        match self.attached_lines(geometry) {
            Some(kept) => {
                for line in (target.start..kept.start).rev() {
                    let cells = self.materialize_line(line, geometry, offset, provider);
                    for cell in cells.into_iter().rev() {
                        self.window.push_front(cell);
                    }
                }
                for line in kept.end..target.end {
                    let cells = self.materialize_line(line, geometry, offset, provider);
                    self.window.extend(cells);
                }
            }
            None => {
                for line in target {
                    let cells = self.materialize_line(line, geometry, offset, provider);
                    self.window.extend(cells);
                }
            }
        }

        self.release_scrap(provider);
        self.finish_pass();
        self.state.stats_mut().incremental_passes += 1;
    }

    /// Lines currently covered by the window.
    fn attached_lines(&self, geometry: &GridGeometry) -> Option<Range<usize>> {
        let first = self.window.front()?;
        let last = self.window.back()?;
        Some(geometry.line_of(first.placement.position)..geometry.line_of(last.placement.position) + 1)
    }

    fn materialize_line<P>(
        &mut self,
        line: usize,
        geometry: &GridGeometry,
        offset: i32,
        provider: &mut P,
    ) -> LineCells<C>
    where
        P: CellProvider<Cell = C> + ?Sized,
    {
        geometry
            .positions_in_line(line)
            .map(|position| self.materialize(position, geometry, offset, provider))
            .collect()
    }

    fn materialize<P>(
        &mut self,
        position: usize,
        geometry: &GridGeometry,
        offset: i32,
        provider: &mut P,
    ) -> MaterializedCell<C>
    where
        P: CellProvider<Cell = C> + ?Sized,
    {
        let recycled = self.pool.checkout(position);
        let stats = self.state.stats_mut();
        stats.total_materialized += 1;
        if recycled.is_some() {
            stats.reuse_count += 1;
        }

        let mut cell = provider.get_cell_at(position, recycled);
        let placement = Placement::new(
            position,
            geometry.slot_rect(position, offset),
            self.spec.cell_margin,
        );
        provider.place_cell(&mut cell, &placement);
        MaterializedCell { placement, cell }
    }

    /// Parks a detached cell for reuse within the current pass.
    fn scrap<P>(&mut self, materialized: MaterializedCell<C>, provider: &mut P)
    where
        P: CellProvider<Cell = C> + ?Sized,
    {
        let position = materialized.placement.position;
        if let Some(rejected) = self.pool.return_to_pool(position, materialized.cell) {
            provider.release_cell(rejected);
            self.state.stats_mut().released_count += 1;
        }
    }

    /// Hands scrap nobody picked up back to the provider.
    fn release_scrap<P>(&mut self, provider: &mut P)
    where
        P: CellProvider<Cell = C> + ?Sized,
    {
        let mut released = 0;
        for cell in self.pool.drain() {
            provider.release_cell(cell);
            released += 1;
        }
        self.state.stats_mut().released_count += released;
    }

    fn finish_pass(&mut self) {
        debug_assert!(self.pool.is_empty());
        debug_assert!(
            self.window
                .iter()
                .zip(self.window.iter().skip(1))
                .all(|(a, b)| a.placement.position < b.placement.position),
            "window must hold each position once, in order"
        );

        let positions = match (self.window.front(), self.window.back()) {
            (Some(first), Some(last)) => Some(first.placement.position..last.placement.position + 1),
            _ => None,
        };
        self.state.record_window(positions, self.window.len());
        self.has_layout = true;

        if self.window.len() > LARGE_WINDOW_WARNING {
            log::warn!(
                "WindowedGrid: {} cells attached. Consider a larger cell size or a smaller viewport.",
                self.window.len()
            );
        }
    }
}
