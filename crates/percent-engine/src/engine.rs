// crates/percent-engine/src/engine.rs

use glam::IVec2;
use percent_core::{
    parse_cell_list, Axis, CellAlignment, CellConstraints, CellGroup, NumberWithUnit, PercentData,
    PercentError, Result,
};
use tracing::{debug, trace};

use crate::axis::{AxisItem, AxisSolver};
use crate::{Bounds, LayoutAdapter, LayoutResult};

#[derive(Debug, Clone)]
struct LayoutEntry<C> {
    component: C,
    data: PercentData,
}

/// Results that stay valid until the layout is modified.
#[derive(Debug, Clone, Default)]
struct LayoutCache {
    preferred: Option<IVec2>,
    minimum: Option<IVec2>,
    arrangement: Option<(Bounds, LayoutResult)>,
}

/// A table-like layout of columns and rows.
///
/// Each column and row is described by [`CellConstraints`]. Cells derive
/// their size from a fixed minimum, from the components they contain, or
/// both. Space that is left over after all cells got their share is divided
/// among the weighted cells, so every weighted cell receives a certain
/// percentage of the remaining space.
///
/// Columns or rows that should always have the same size can be combined in
/// a [`CellGroup`].
///
/// Computed sizes are cached. Every modification through this type drops the
/// cache; if the size of a component changes behind the back of the layout,
/// call [`invalidate`](Self::invalidate).
///
/// The layout is not synchronized. Callers sharing it between threads must
/// serialize access themselves.
#[derive(Debug, Clone)]
pub struct PercentLayout<C> {
    columns: Vec<CellConstraints>,
    rows: Vec<CellConstraints>,
    column_groups: Vec<CellGroup>,
    row_groups: Vec<CellGroup>,
    column_gap: NumberWithUnit,
    row_gap: NumberWithUnit,
    can_shrink: bool,
    components: Vec<LayoutEntry<C>>,
    dirty: bool,
    cache: LayoutCache,
}

impl<C> PercentLayout<C> {
    /// A grid of the given dimensions using default column and row constraints.
    pub fn with_dimensions(columns: usize, rows: usize) -> Result<Self> {
        if columns < 1 || rows < 1 {
            return Err(PercentError::EmptyConstraints);
        }
        Self::from_constraints(
            vec![CellConstraints::default_column(); columns],
            vec![CellConstraints::default_row(); rows],
        )
    }

    pub fn from_constraints(columns: Vec<CellConstraints>, rows: Vec<CellConstraints>) -> Result<Self> {
        if columns.is_empty() || rows.is_empty() {
            return Err(PercentError::EmptyConstraints);
        }
        Ok(Self {
            columns,
            rows,
            column_groups: Vec::new(),
            row_groups: Vec::new(),
            column_gap: NumberWithUnit::ZERO,
            row_gap: NumberWithUnit::ZERO,
            can_shrink: true,
            components: Vec::new(),
            dirty: true,
            cache: LayoutCache::default(),
        })
    }

    /// Parses column and row definitions like `"3dlu, preferred, 3dlu"`.
    ///
    /// Columns default to `FULL` alignment, rows to `CENTER`.
    pub fn from_spec_strings(columns: &str, rows: &str) -> Result<Self> {
        let columns = parse_cell_list(columns, CellAlignment::Full)?;
        let rows = parse_cell_list(rows, CellAlignment::Center)?;
        Self::from_constraints(columns, rows)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn count(&self, axis: Axis) -> usize {
        axis.select(self.columns.len(), self.rows.len())
    }

    pub fn column_constraints(&self, index: usize) -> Option<&CellConstraints> {
        self.columns.get(index)
    }

    pub fn row_constraints(&self, index: usize) -> Option<&CellConstraints> {
        self.rows.get(index)
    }

    pub fn all_constraints(&self, axis: Axis) -> &[CellConstraints] {
        axis.select(&self.columns, &self.rows)
    }

    pub fn set_column_constraints(&mut self, index: usize, constraints: CellConstraints) -> Result<()> {
        let count = self.columns.len();
        let slot = self
            .columns
            .get_mut(index)
            .ok_or(PercentError::IndexOutOfBounds { index, count })?;
        *slot = constraints;
        self.invalidate();
        Ok(())
    }

    pub fn set_row_constraints(&mut self, index: usize, constraints: CellConstraints) -> Result<()> {
        let count = self.rows.len();
        let slot = self
            .rows
            .get_mut(index)
            .ok_or(PercentError::IndexOutOfBounds { index, count })?;
        *slot = constraints;
        self.invalidate();
        Ok(())
    }

    pub fn column_groups(&self) -> &[CellGroup] {
        &self.column_groups
    }

    pub fn row_groups(&self) -> &[CellGroup] {
        &self.row_groups
    }

    pub fn add_column_group(&mut self, group: CellGroup) -> Result<()> {
        Self::check_group(&group, self.columns.len())?;
        self.column_groups.push(group);
        self.invalidate();
        Ok(())
    }

    pub fn add_row_group(&mut self, group: CellGroup) -> Result<()> {
        Self::check_group(&group, self.rows.len())?;
        self.row_groups.push(group);
        self.invalidate();
        Ok(())
    }

    pub fn gaps(&self) -> (NumberWithUnit, NumberWithUnit) {
        (self.column_gap, self.row_gap)
    }

    /// Space inserted between adjacent columns and rows, respectively.
    pub fn set_gaps(&mut self, column_gap: NumberWithUnit, row_gap: NumberWithUnit) {
        self.column_gap = column_gap;
        self.row_gap = row_gap;
        self.invalidate();
    }

    pub fn can_shrink(&self) -> bool {
        self.can_shrink
    }

    /// Whether cells may fall back to minimum component sizes when the
    /// preferred sizes do not fit. Enabled by default.
    pub fn set_can_shrink(&mut self, can_shrink: bool) {
        self.can_shrink = can_shrink;
        self.invalidate();
    }

    /// Places a component. Its span must fit into the grid and its start
    /// cell must not be used by another component.
    pub fn add_component(&mut self, component: C, data: PercentData) -> Result<()> {
        self.check_placement(&data)?;
        debug!("Adding component at {}", data);
        self.components.push(LayoutEntry { component, data });
        self.invalidate();
        Ok(())
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// All components with their placement, in insertion order.
    pub fn components(&self) -> impl Iterator<Item = (&C, &PercentData)> {
        self.components.iter().map(|entry| (&entry.component, &entry.data))
    }

    /// The component whose start cell is `(column, row)`.
    pub fn component_at(&self, column: usize, row: usize) -> Option<&C> {
        self.entry_at(column, row).map(|entry| &entry.component)
    }

    pub fn constraints_at(&self, column: usize, row: usize) -> Option<&PercentData> {
        self.entry_at(column, row).map(|entry| &entry.data)
    }

    /// Drops all cached sizes. The next query recomputes everything.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Size needed to give every cell its preferred size.
    pub fn preferred_size<A>(&mut self, adapter: &A) -> IVec2
    where
        A: LayoutAdapter<Component = C>,
    {
        self.refresh();
        if let Some(size) = self.cache.preferred {
            return size;
        }
        let size = self.content_size(adapter, false);
        self.cache.preferred = Some(size);
        size
    }

    /// Size below which the layout cannot shrink any further.
    ///
    /// Equal to the preferred size if shrinking is disabled.
    pub fn minimum_size<A>(&mut self, adapter: &A) -> IVec2
    where
        A: LayoutAdapter<Component = C>,
    {
        self.refresh();
        if let Some(size) = self.cache.minimum {
            return size;
        }
        let size = self.content_size(adapter, self.can_shrink);
        self.cache.minimum = Some(size);
        size
    }

    /// Computes cell sizes and component bounds for the given area.
    ///
    /// Calling this again with the same area returns the cached result until
    /// the layout is modified or invalidated. The cache is not keyed by the
    /// adapter: after switching to an adapter that reports other component
    /// sizes or unit metrics, call [`invalidate`](Self::invalidate) first.
    pub fn layout<A>(&mut self, adapter: &A, area: Bounds) -> &LayoutResult
    where
        A: LayoutAdapter<Component = C>,
    {
        self.refresh();
        let area = Bounds {
            origin: area.origin,
            size: area.size.max(IVec2::ZERO),
        };

        let arrangement = match self.cache.arrangement.take() {
            Some(cached) if cached.0 == area => cached,
            _ => (area, self.compute_layout(adapter, area)),
        };
        &self.cache.arrangement.insert(arrangement).1
    }

    /// Bounds of a component from the last layout pass, if it is still valid.
    pub fn bounds_of(&self, component: &C) -> Option<Bounds>
    where
        C: PartialEq,
    {
        if self.dirty {
            return None;
        }
        let (_, result) = self.cache.arrangement.as_ref()?;
        let index = self.components.iter().position(|entry| entry.component == *component)?;
        result.bounds.get(index).copied()
    }

    /// Removes a component. Returns `false` if it was not part of the layout.
    pub fn remove_component(&mut self, component: &C) -> bool
    where
        C: PartialEq,
    {
        match self.components.iter().position(|entry| entry.component == *component) {
            Some(index) => {
                self.components.remove(index);
                self.invalidate();
                true
            }
            None => false,
        }
    }

    fn entry_at(&self, column: usize, row: usize) -> Option<&LayoutEntry<C>> {
        self.components
            .iter()
            .find(|entry| entry.data.column() == column && entry.data.row() == row)
    }

    fn refresh(&mut self) {
        if self.dirty {
            trace!("Layout modified, dropping cached sizes");
            self.cache = LayoutCache::default();
            self.dirty = false;
        }
    }

    fn check_group(group: &CellGroup, count: usize) -> Result<()> {
        if group.max_index() >= count {
            return Err(PercentError::GroupOutOfBounds {
                index: group.max_index(),
                count,
            });
        }
        Ok(())
    }

    fn check_placement(&self, data: &PercentData) -> Result<()> {
        let (columns, rows) = (self.columns.len(), self.rows.len());
        let fits = |start: usize, span: usize, count: usize| start.checked_add(span).is_some_and(|end| end <= count);
        if !fits(data.column(), data.span_x(), columns) || !fits(data.row(), data.span_y(), rows) {
            return Err(PercentError::SpanOutOfBounds {
                column: data.column(),
                row: data.row(),
                span_x: data.span_x(),
                span_y: data.span_y(),
                columns,
                rows,
            });
        }
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let target = data.target(axis);
            let count = self.count(axis);
            if target >= count {
                return Err(PercentError::IndexOutOfBounds { index: target, count });
            }
        }
        if self.entry_at(data.column(), data.row()).is_some() {
            return Err(PercentError::CellOccupied {
                column: data.column(),
                row: data.row(),
            });
        }
        Ok(())
    }

    fn solver<A>(&self, adapter: &A, axis: Axis) -> AxisSolver<'_>
    where
        A: LayoutAdapter<Component = C>,
    {
        let handler = adapter.size_handler();
        let cells = self.all_constraints(axis);
        let groups = axis.select(&self.column_groups, &self.row_groups);
        let gap = axis.select(self.column_gap, self.row_gap).to_pixels(handler, axis);
        let floors = cells.iter().map(|cc| cc.min_size().to_pixels(handler, axis)).collect();

        let items = self
            .components
            .iter()
            .map(|entry| {
                let constraints = entry
                    .data
                    .constraints(axis)
                    .or_else(|| cells.get(entry.data.target(axis)))
                    .copied()
                    .unwrap_or_else(|| axis.select(CellConstraints::default_column(), CellConstraints::default_row()));
                AxisItem {
                    start: entry.data.start(axis),
                    span: entry.data.span(axis),
                    cell_size: constraints.cell_size(),
                    alignment: constraints.alignment(),
                    floor: constraints.min_size().to_pixels(handler, axis),
                    minimum: adapter.minimum_size(&entry.component, axis),
                    preferred: adapter.preferred_size(&entry.component, axis),
                }
            })
            .collect();

        AxisSolver::new(cells, floors, groups, gap, items)
    }

    fn content_size<A>(&self, adapter: &A, minimum: bool) -> IVec2
    where
        A: LayoutAdapter<Component = C>,
    {
        let horizontal = self.solver(adapter, Axis::Horizontal);
        let vertical = self.solver(adapter, Axis::Vertical);
        let size = IVec2::new(
            horizontal.total(&horizontal.cell_sizes(minimum)),
            vertical.total(&vertical.cell_sizes(minimum)),
        );
        debug!("Computed {} layout size {:?}", if minimum { "minimum" } else { "preferred" }, size);
        size
    }

    fn compute_layout<A>(&self, adapter: &A, area: Bounds) -> LayoutResult
    where
        A: LayoutAdapter<Component = C>,
    {
        let horizontal = self.solver(adapter, Axis::Horizontal);
        let vertical = self.solver(adapter, Axis::Vertical);
        let columns = horizontal.layout(area.width(), area.x(), self.can_shrink);
        let rows = vertical.layout(area.height(), area.y(), self.can_shrink);

        let bounds = horizontal
            .items()
            .iter()
            .zip(vertical.items())
            .map(|(column_item, row_item)| {
                let (x, width) = horizontal.place(column_item, &columns);
                let (y, height) = vertical.place(row_item, &rows);
                Bounds::new(x, y, width, height)
            })
            .collect();

        debug!(
            "Layout of {} components in {:?}: columns {:?}, rows {:?}",
            self.components.len(),
            area,
            columns.sizes,
            rows.sizes
        );

        LayoutResult {
            column_sizes: columns.sizes,
            row_sizes: rows.sizes,
            column_positions: columns.positions,
            row_positions: rows.positions,
            bounds,
        }
    }
}
