use percent_engine::percent_core::{
    Axis, CellAlignment, CellConstraints, CellGroup, CellSize, FixedSizeHandler, NumberWithUnit, PercentData,
    UnitSizeHandler,
};
use percent_engine::{Bounds, LayoutAdapter, PercentLayout};
use proptest::prelude::*;

/// Component `i` has the preferred width `widths[i]` and half of it as minimum.
struct WidthAdapter {
    widths: Vec<i32>,
    handler: FixedSizeHandler,
}

impl WidthAdapter {
    fn new(widths: Vec<i32>) -> Self {
        Self {
            widths,
            handler: FixedSizeHandler::default(),
        }
    }
}

impl LayoutAdapter for WidthAdapter {
    type Component = usize;

    fn minimum_size(&self, component: &usize, axis: Axis) -> i32 {
        self.preferred_size(component, axis) / 2
    }

    fn preferred_size(&self, component: &usize, axis: Axis) -> i32 {
        axis.select(self.widths[*component], 10)
    }

    fn size_handler(&self) -> &dyn UnitSizeHandler {
        &self.handler
    }
}

fn fixed(pixels: i32) -> CellConstraints {
    CellConstraints::new(CellAlignment::Full, CellSize::None, NumberWithUnit::pixels(pixels), 0).unwrap()
}

fn weighted(weight: u32) -> CellConstraints {
    CellConstraints::new(CellAlignment::Full, CellSize::Preferred, NumberWithUnit::ZERO, weight).unwrap()
}

/// One row with a component in every column.
fn single_row(columns: Vec<CellConstraints>) -> PercentLayout<usize> {
    let count = columns.len();
    let mut layout = PercentLayout::from_constraints(columns, vec![CellConstraints::default_row()]).unwrap();
    for idx in 0..count {
        layout.add_component(idx, PercentData::at(idx, 0)).unwrap();
    }
    layout
}

fn arb_unweighted_columns() -> impl Strategy<Value = Vec<(Option<i32>, i32)>> {
    prop::collection::vec((prop::option::of(0..100i32), 0..200i32), 1..7)
}

proptest! {
    #[test]
    fn prop_unweighted_preferred_size_is_sum(columns in arb_unweighted_columns(), gap in 0..10i32, width in 0..2000i32) {
        let cells = columns
            .iter()
            .map(|&(fixed_size, _)| fixed_size.map_or_else(CellConstraints::default_column, fixed))
            .collect();
        let adapter = WidthAdapter::new(columns.iter().map(|&(_, w)| w).collect());
        let mut layout = single_row(cells);
        layout.set_gaps(NumberWithUnit::pixels(gap), NumberWithUnit::ZERO);
        layout.set_can_shrink(false);

        let preferred = layout.preferred_size(&adapter).x;
        let result = layout.layout(&adapter, Bounds::new(0, 0, width, 10));
        let gaps = (columns.len() as i32 - 1) * gap;
        prop_assert_eq!(result.column_sizes.iter().sum::<i32>() + gaps, preferred);
    }

    #[test]
    fn prop_percent_cells_fill_available_space(weights in prop::collection::vec(1..100u32, 1..7), width in 0..2000i32) {
        let cells = weights.iter().map(|&w| weighted(w)).collect();
        let mut layout: PercentLayout<usize> =
            PercentLayout::from_constraints(cells, vec![CellConstraints::default_row()]).unwrap();
        let adapter = WidthAdapter::new(Vec::new());

        let result = layout.layout(&adapter, Bounds::new(0, 0, width, 10));
        prop_assert_eq!(result.column_sizes.iter().sum::<i32>(), width);
        prop_assert!(result.column_sizes.iter().all(|&size| size >= 0));
    }

    #[test]
    fn prop_grouped_cells_are_equal(widths in prop::collection::vec(0..200i32, 2..7), width in 0..2000i32) {
        let last = widths.len() - 1;
        let cells = vec![CellConstraints::default_column(); widths.len()];
        let adapter = WidthAdapter::new(widths);
        let mut layout = single_row(cells);
        layout.add_column_group(CellGroup::new([0, last]).unwrap()).unwrap();

        let result = layout.layout(&adapter, Bounds::new(0, 0, width, 10));
        prop_assert_eq!(result.column_sizes[0], result.column_sizes[last]);
    }

    #[test]
    fn prop_weighted_groups_are_equal(
        columns in prop::collection::vec((0..200i32, 0..100u32), 2..7),
        width in 0..2000i32,
    ) {
        let last = columns.len() - 1;
        let middle = last / 2;
        let cells = columns.iter().map(|&(_, weight)| weighted(weight)).collect();
        let adapter = WidthAdapter::new(columns.iter().map(|&(w, _)| w).collect());
        let mut layout = single_row(cells);
        layout.add_column_group(CellGroup::new([0, last]).unwrap()).unwrap();
        layout.add_column_group(CellGroup::new([middle, last]).unwrap()).unwrap();
        let preferred = layout.preferred_size(&adapter).x;

        let result = layout.layout(&adapter, Bounds::new(0, 0, width, 10));
        prop_assert_eq!(result.column_sizes[0], result.column_sizes[last]);
        prop_assert_eq!(result.column_sizes[middle], result.column_sizes[last]);
        prop_assert!(result.column_sizes.iter().sum::<i32>() <= width.max(preferred));
    }

    #[test]
    fn prop_layout_is_idempotent(columns in arb_unweighted_columns(), weight in 0..100u32, width in 0..2000i32) {
        let mut cells: Vec<CellConstraints> = columns
            .iter()
            .map(|&(fixed_size, _)| fixed_size.map_or_else(CellConstraints::default_column, fixed))
            .collect();
        cells[0] = weighted(weight);
        let adapter = WidthAdapter::new(columns.iter().map(|&(_, w)| w).collect());
        let mut layout = single_row(cells);

        let area = Bounds::new(3, 4, width, 10);
        let first = layout.layout(&adapter, area).clone();
        layout.invalidate();
        let second = layout.layout(&adapter, area).clone();
        prop_assert_eq!(first, second);
    }
}
