// crates/percent-engine/src/presets/button.rs

use percent_core::{
    CellAlignment, CellConstraintsBuilder, CellGroup, CellSize, NumberWithUnit, PercentData, Result, Unit,
};
use tracing::debug;

use crate::PercentLayout;

const ROW_COUNT: usize = 3;
const WEIGHT_FULL: u32 = 100;
const WEIGHT_HALF: u32 = 50;
const WEIGHT_NONE: u32 = 0;

/// Horizontal position of the button bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonAlignment {
    Left,
    #[default]
    Right,
    Center,
}

/// A single row of equally sized buttons, as found at the bottom of dialogs.
///
/// The buttons end up in the odd columns of the generated grid, separated
/// by gap columns and surrounded by margins. All buttons share one column
/// group, so they are as wide as the widest of them.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonLayout {
    pub top_margin: NumberWithUnit,
    pub bottom_margin: NumberWithUnit,
    pub left_margin: NumberWithUnit,
    pub right_margin: NumberWithUnit,
    pub gap: NumberWithUnit,
    pub alignment: ButtonAlignment,
}

impl Default for ButtonLayout {
    fn default() -> Self {
        let margin = NumberWithUnit::new(2.0, Unit::Dlu);
        Self {
            top_margin: margin,
            bottom_margin: margin,
            left_margin: margin,
            right_margin: margin,
            gap: NumberWithUnit::new(1.0, Unit::Dlu),
            alignment: ButtonAlignment::Right,
        }
    }
}

impl ButtonLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alignment(mut self, alignment: ButtonAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Builds the grid for the given buttons, in display order.
    pub fn build<C>(&self, buttons: impl IntoIterator<Item = C>) -> Result<PercentLayout<C>> {
        let buttons: Vec<C> = buttons.into_iter().collect();
        let count = buttons.len();
        let last = 2 * count;

        let mut layout = PercentLayout::with_dimensions(last + 1, ROW_COUNT)?;
        let mut builder = CellConstraintsBuilder::new();

        layout.set_row_constraints(0, builder.with_min_size(self.top_margin).create()?)?;
        layout.set_row_constraints(1, builder.default_row().create()?)?;
        layout.set_row_constraints(2, builder.with_min_size(self.bottom_margin).create()?)?;

        layout.set_column_constraints(
            0,
            builder
                .with_alignment(CellAlignment::Full)
                .with_min_size(self.left_margin)
                .with_weight(self.margin_weight(ButtonAlignment::Left))
                .create()?,
        )?;
        layout.set_column_constraints(
            last,
            builder
                .with_alignment(CellAlignment::Full)
                .with_min_size(self.right_margin)
                .with_weight(self.margin_weight(ButtonAlignment::Right))
                .create()?,
        )?;

        let gap = builder.with_min_size(self.gap).create()?;
        for idx in (2..last.saturating_sub(1)).step_by(2) {
            layout.set_column_constraints(idx, gap)?;
        }

        let button = builder
            .with_alignment(CellAlignment::Full)
            .with_cell_size(CellSize::Preferred)
            .create()?;
        let button_columns: Vec<usize> = (0..count).map(|idx| 2 * idx + 1).collect();
        for &idx in &button_columns {
            layout.set_column_constraints(idx, button)?;
        }
        if count > 1 {
            layout.add_column_group(CellGroup::new(button_columns.iter().copied())?)?;
        }

        for (idx, component) in buttons.into_iter().enumerate() {
            layout.add_component(component, PercentData::at(2 * idx + 1, 1))?;
        }

        debug!("Created button layout for {} buttons, aligned {:?}", count, self.alignment);
        Ok(layout)
    }

    /// The margin on the side the buttons are aligned to stays at its
    /// minimum, the other one takes all remaining space.
    fn margin_weight(&self, side: ButtonAlignment) -> u32 {
        if self.alignment == ButtonAlignment::Center {
            WEIGHT_HALF
        } else if self.alignment != side {
            WEIGHT_FULL
        } else {
            WEIGHT_NONE
        }
    }
}
