// crates/percent-engine/src/presets/border.rs

use std::str::FromStr;

use percent_core::{
    CellAlignment, CellConstraintsBuilder, CellSize, NumberWithUnit, PercentDataBuilder, PercentError, Result,
};
use tracing::debug;

use crate::PercentLayout;

const SIZE: usize = 7;
const FIRST: usize = 1;
const CENTER: usize = 3;
const LAST: usize = 5;
const WEIGHT_FULL: u32 = 100;

/// The five areas of a [`BorderLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderRegion {
    North,
    East,
    South,
    West,
    Center,
}

impl FromStr for BorderRegion {
    type Err = PercentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "NORTH" => Ok(BorderRegion::North),
            "EAST" => Ok(BorderRegion::East),
            "SOUTH" => Ok(BorderRegion::South),
            "WEST" => Ok(BorderRegion::West),
            "CENTER" => Ok(BorderRegion::Center),
            _ => Err(PercentError::InvalidBorderRegion(s.to_string())),
        }
    }
}

/// Components along the four edges of a container plus one in the middle,
/// which receives all remaining space.
///
/// The generated grid has 7 columns and rows: margin, west/north, gap,
/// center, gap, east/south, margin. Edge components stretch over the cells
/// of regions that are not used.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BorderLayout {
    pub top_margin: NumberWithUnit,
    pub bottom_margin: NumberWithUnit,
    pub left_margin: NumberWithUnit,
    pub right_margin: NumberWithUnit,
    pub north_gap: NumberWithUnit,
    pub east_gap: NumberWithUnit,
    pub south_gap: NumberWithUnit,
    pub west_gap: NumberWithUnit,
}

#[derive(Debug, Clone, Copy, Default)]
struct UsedRegions {
    north: bool,
    east: bool,
    south: bool,
    west: bool,
}

impl BorderLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the grid for the given components. Each region may be used once.
    pub fn build<C>(&self, components: impl IntoIterator<Item = (C, BorderRegion)>) -> Result<PercentLayout<C>> {
        let components: Vec<(C, BorderRegion)> = components.into_iter().collect();
        let used = components.iter().fold(UsedRegions::default(), |mut used, (_, region)| {
            match region {
                BorderRegion::North => used.north = true,
                BorderRegion::East => used.east = true,
                BorderRegion::South => used.south = true,
                BorderRegion::West => used.west = true,
                BorderRegion::Center => {}
            }
            used
        });

        let mut layout = PercentLayout::with_dimensions(SIZE, SIZE)?;
        self.init_constraints(&mut layout, used)?;

        let mut pcb = PercentDataBuilder::new();
        for (component, region) in components {
            let data = match region {
                BorderRegion::North | BorderRegion::South => {
                    let row = if region == BorderRegion::North { FIRST } else { LAST };
                    pcb.xy(position(used.west), row)
                        .span_x(span(used.west, used.east))?
                        .with_target_column(CENTER)
                        .create()?
                }
                BorderRegion::West | BorderRegion::East => {
                    let column = if region == BorderRegion::West { FIRST } else { LAST };
                    pcb.xy(column, position(used.north))
                        .span_y(span(used.north, used.south))?
                        .with_target_row(CENTER)
                        .create()?
                }
                BorderRegion::Center => pcb
                    .xy(position(used.west), position(used.north))
                    .span(span(used.west, used.east), span(used.north, used.south))?
                    .with_target_column(CENTER)
                    .with_target_row(CENTER)
                    .create()?,
            };
            debug!("Placing {:?} region at {}", region, data);
            layout.add_component(component, data)?;
        }
        Ok(layout)
    }

    fn init_constraints<C>(&self, layout: &mut PercentLayout<C>, used: UsedRegions) -> Result<()> {
        let mut cb = CellConstraintsBuilder::new();
        let gap = |enabled: bool, gap: NumberWithUnit| if enabled { gap } else { NumberWithUnit::ZERO };

        layout.set_column_constraints(0, cb.with_min_size(self.left_margin).create()?)?;
        layout.set_column_constraints(FIRST, cb.with_cell_size(CellSize::Preferred).create()?)?;
        layout.set_column_constraints(2, cb.with_min_size(gap(used.west, self.west_gap)).create()?)?;
        layout.set_column_constraints(
            CENTER,
            cb.with_cell_size(CellSize::Preferred).with_weight(WEIGHT_FULL).create()?,
        )?;
        layout.set_column_constraints(4, cb.with_min_size(gap(used.east, self.east_gap)).create()?)?;
        layout.set_column_constraints(LAST, cb.with_cell_size(CellSize::Preferred).create()?)?;
        layout.set_column_constraints(6, cb.with_min_size(self.right_margin).create()?)?;

        layout.set_row_constraints(0, cb.with_min_size(self.top_margin).create()?)?;
        layout.set_row_constraints(
            FIRST,
            cb.with_alignment(CellAlignment::Full).with_cell_size(CellSize::Preferred).create()?,
        )?;
        layout.set_row_constraints(2, cb.with_min_size(gap(used.north, self.north_gap)).create()?)?;
        layout.set_row_constraints(
            CENTER,
            cb.with_alignment(CellAlignment::Full)
                .with_cell_size(CellSize::Preferred)
                .with_weight(WEIGHT_FULL)
                .create()?,
        )?;
        layout.set_row_constraints(4, cb.with_min_size(gap(used.south, self.south_gap)).create()?)?;
        layout.set_row_constraints(
            LAST,
            cb.with_alignment(CellAlignment::Full).with_cell_size(CellSize::Preferred).create()?,
        )?;
        layout.set_row_constraints(6, cb.with_min_size(self.bottom_margin).create()?)?;
        Ok(())
    }
}

/// Start index for a component that begins after an optional leading region.
fn position(leading_used: bool) -> usize {
    if leading_used {
        CENTER
    } else {
        FIRST
    }
}

/// Number of cells covered when the regions before and after may be absent.
fn span(leading_used: bool, trailing_used: bool) -> usize {
    let mut span = 1;
    if !leading_used {
        span += 2;
    }
    if !trailing_used {
        span += 2;
    }
    span
}
