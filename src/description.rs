// src/description.rs
//! JSON layout descriptions loaded by the command line tool.

use std::path::Path;

use anyhow::{bail, Context, Result};
use percent_core::{
    Axis, CellAlignment, CellConstraints, CellGroup, FixedSizeHandler, NumberWithUnit, PercentDataBuilder,
    UnitSizeHandler,
};
use percent_engine::{LayoutAdapter, PercentLayout};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A complete grid with its components, as stored in a description file.
///
/// ```json
/// {
///   "columns": "3dlu, preferred, 3dlu, preferred/100",
///   "rows": "preferred, 2dlu, preferred",
///   "components": [
///     { "name": "label", "column": 1, "row": 0, "preferred": [40, 12] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDescription {
    pub columns: String,
    pub rows: String,
    #[serde(default)]
    pub column_groups: Vec<CellGroup>,
    #[serde(default)]
    pub row_groups: Vec<CellGroup>,
    #[serde(default)]
    pub gaps: Gaps,
    #[serde(default = "default_can_shrink")]
    pub can_shrink: bool,
    #[serde(default)]
    pub components: Vec<ComponentDescription>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Gaps {
    #[serde(default)]
    pub column: NumberWithUnit,
    #[serde(default)]
    pub row: NumberWithUnit,
}

/// A component is just a name plus the sizes a toolkit would report for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDescription {
    pub name: String,
    pub column: usize,
    pub row: usize,
    #[serde(default = "default_span")]
    pub span_x: usize,
    #[serde(default = "default_span")]
    pub span_y: usize,
    pub preferred: [i32; 2],
    /// Falls back to the preferred size
    #[serde(default)]
    pub minimum: Option<[i32; 2]>,
    #[serde(default)]
    pub target_column: Option<usize>,
    #[serde(default)]
    pub target_row: Option<usize>,
    #[serde(default)]
    pub column_spec: Option<String>,
    #[serde(default)]
    pub row_spec: Option<String>,
}

fn default_can_shrink() -> bool {
    true
}

fn default_span() -> usize {
    1
}

impl ComponentDescription {
    pub fn minimum_size(&self) -> [i32; 2] {
        self.minimum.unwrap_or(self.preferred)
    }
}

impl LayoutDescription {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid layout description")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout description {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Creates the layout. Components are identified by their index in
    /// [`components`](Self::components).
    pub fn build(&self) -> Result<PercentLayout<usize>> {
        let mut layout = PercentLayout::from_spec_strings(&self.columns, &self.rows)
            .context("Invalid column or row definitions")?;

        for group in &self.column_groups {
            layout
                .add_column_group(group.clone())
                .with_context(|| format!("Invalid column group {}", group))?;
        }
        for group in &self.row_groups {
            layout
                .add_row_group(group.clone())
                .with_context(|| format!("Invalid row group {}", group))?;
        }
        layout.set_gaps(self.gaps.column, self.gaps.row);
        layout.set_can_shrink(self.can_shrink);

        let mut names = std::collections::HashSet::new();
        let mut pcb = PercentDataBuilder::new();
        for (idx, component) in self.components.iter().enumerate() {
            if !names.insert(component.name.as_str()) {
                bail!("Duplicate component name: {}", component.name);
            }
            if component.preferred.iter().chain(&component.minimum_size()).any(|&size| size < 0) {
                bail!("Component {} has a negative size", component.name);
            }

            let data = component_data(&mut pcb, component)
                .with_context(|| format!("Invalid placement of component {}", component.name))?;
            layout
                .add_component(idx, data)
                .with_context(|| format!("Cannot add component {}", component.name))?;
        }

        debug!(
            "Built layout with {} columns, {} rows and {} components",
            layout.column_count(),
            layout.row_count(),
            layout.component_count()
        );
        Ok(layout)
    }
}

fn component_data(
    pcb: &mut PercentDataBuilder,
    component: &ComponentDescription,
) -> percent_core::Result<percent_core::PercentData> {
    pcb.xy(component.column, component.row)
        .span(component.span_x, component.span_y)?;
    if let Some(column) = component.target_column {
        pcb.with_target_column(column);
    }
    if let Some(row) = component.target_row {
        pcb.with_target_row(row);
    }
    if let Some(spec) = &component.column_spec {
        pcb.with_column_constraints(CellConstraints::parse(spec, CellAlignment::Full)?);
    }
    if let Some(spec) = &component.row_spec {
        pcb.with_row_constraints(CellConstraints::parse(spec, CellAlignment::Center)?);
    }
    pcb.create()
}

/// Serves the sizes recorded in a description.
pub struct DescriptionAdapter<'a> {
    components: &'a [ComponentDescription],
    handler: FixedSizeHandler,
}

impl<'a> DescriptionAdapter<'a> {
    pub fn new(description: &'a LayoutDescription, handler: FixedSizeHandler) -> Self {
        Self {
            components: &description.components,
            handler,
        }
    }

    pub fn name(&self, component: usize) -> &str {
        self.components.get(component).map_or("", |c| c.name.as_str())
    }
}

impl LayoutAdapter for DescriptionAdapter<'_> {
    type Component = usize;

    fn minimum_size(&self, component: &usize, axis: Axis) -> i32 {
        self.components
            .get(*component)
            .map_or(0, |c| axis.select(c.minimum_size()[0], c.minimum_size()[1]))
    }

    fn preferred_size(&self, component: &usize, axis: Axis) -> i32 {
        self.components
            .get(*component)
            .map_or(0, |c| axis.select(c.preferred[0], c.preferred[1]))
    }

    fn size_handler(&self) -> &dyn UnitSizeHandler {
        &self.handler
    }
}
