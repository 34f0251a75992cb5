// crates/percent-core/src/placement.rs

use std::fmt;

use crate::{Axis, CellConstraints, PercentError, Result};

/// Placement of a single component in the grid.
///
/// Besides the start cell and the span, a component may name a target
/// column or row whose constraints should be used instead of those of its
/// start cell, or carry its own constraints which take precedence over both.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentData {
    column: usize,
    row: usize,
    span_x: usize,
    span_y: usize,
    target_column: Option<usize>,
    target_row: Option<usize>,
    column_constraints: Option<CellConstraints>,
    row_constraints: Option<CellConstraints>,
}

impl PercentData {
    /// A component occupying the single cell at `(column, row)`.
    pub fn at(column: usize, row: usize) -> Self {
        Self {
            column,
            row,
            span_x: 1,
            span_y: 1,
            target_column: None,
            target_row: None,
            column_constraints: None,
            row_constraints: None,
        }
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn span_x(&self) -> usize {
        self.span_x
    }

    pub fn span_y(&self) -> usize {
        self.span_y
    }

    pub fn target_column(&self) -> Option<usize> {
        self.target_column
    }

    pub fn target_row(&self) -> Option<usize> {
        self.target_row
    }

    pub fn column_constraints(&self) -> Option<&CellConstraints> {
        self.column_constraints.as_ref()
    }

    pub fn row_constraints(&self) -> Option<&CellConstraints> {
        self.row_constraints.as_ref()
    }

    pub fn start(&self, axis: Axis) -> usize {
        axis.select(self.column, self.row)
    }

    pub fn span(&self, axis: Axis) -> usize {
        axis.select(self.span_x, self.span_y)
    }

    /// The index of the column or row whose constraints apply to this
    /// component if it has no constraints of its own.
    pub fn target(&self, axis: Axis) -> usize {
        axis.select(self.target_column, self.target_row)
            .unwrap_or_else(|| self.start(axis))
    }

    pub fn constraints(&self, axis: Axis) -> Option<&CellConstraints> {
        axis.select(self.column_constraints.as_ref(), self.row_constraints.as_ref())
    }
}

impl fmt::Display for PercentData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "COL = {} ROW = {} SPANX = {} SPANY = {}",
            self.column, self.row, self.span_x, self.span_y
        )?;
        if let Some(tc) = self.target_column {
            write!(f, " TARGETCOL = {}", tc)?;
        }
        if let Some(tr) = self.target_row {
            write!(f, " TARGETROW = {}", tr)?;
        }
        if let Some(cc) = &self.column_constraints {
            write!(f, " COLCONSTR = {}", cc)?;
        }
        if let Some(cc) = &self.row_constraints {
            write!(f, " ROWCONSTR = {}", cc)?;
        }
        Ok(())
    }
}

/// Builder for [`PercentData`]; resets itself after each `create`.
#[derive(Debug, Clone, Default)]
pub struct PercentDataBuilder {
    position: Option<(usize, usize)>,
    span_x: Option<usize>,
    span_y: Option<usize>,
    target_column: Option<usize>,
    target_row: Option<usize>,
    column_constraints: Option<CellConstraints>,
    row_constraints: Option<CellConstraints>,
}

impl PercentDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn xy(&mut self, column: usize, row: usize) -> &mut Self {
        self.position = Some((column, row));
        self
    }

    pub fn span_x(&mut self, span: usize) -> Result<&mut Self> {
        if span < 1 {
            return Err(PercentError::InvalidSpan(span));
        }
        self.span_x = Some(span);
        Ok(self)
    }

    pub fn span_y(&mut self, span: usize) -> Result<&mut Self> {
        if span < 1 {
            return Err(PercentError::InvalidSpan(span));
        }
        self.span_y = Some(span);
        Ok(self)
    }

    pub fn span(&mut self, span_x: usize, span_y: usize) -> Result<&mut Self> {
        self.span_x(span_x)?;
        self.span_y(span_y)
    }

    pub fn with_target_column(&mut self, column: usize) -> &mut Self {
        self.target_column = Some(column);
        self
    }

    pub fn with_target_row(&mut self, row: usize) -> &mut Self {
        self.target_row = Some(row);
        self
    }

    pub fn with_column_constraints(&mut self, constraints: CellConstraints) -> &mut Self {
        self.column_constraints = Some(constraints);
        self
    }

    pub fn with_row_constraints(&mut self, constraints: CellConstraints) -> &mut Self {
        self.row_constraints = Some(constraints);
        self
    }

    pub fn create(&mut self) -> Result<PercentData> {
        let builder = std::mem::take(self);
        let (column, row) = builder.position.ok_or(PercentError::MissingPosition)?;
        Ok(PercentData {
            column,
            row,
            span_x: builder.span_x.unwrap_or(1),
            span_y: builder.span_y.unwrap_or(1),
            target_column: builder.target_column,
            target_row: builder.target_row,
            column_constraints: builder.column_constraints,
            row_constraints: builder.row_constraints,
        })
    }

    /// Shortcut for a single cell component at the given position.
    pub fn pos(&mut self, column: usize, row: usize) -> Result<PercentData> {
        self.xy(column, row).create()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CellAlignment;

    #[test]
    fn test_pos_defaults() {
        let pd = PercentDataBuilder::new().pos(2, 3).unwrap();
        assert_eq!(pd, PercentData::at(2, 3));
        assert_eq!(pd.span_x(), 1);
        assert_eq!(pd.span_y(), 1);
        assert_eq!(pd.target(Axis::Horizontal), 2);
        assert_eq!(pd.target(Axis::Vertical), 3);
        assert!(pd.constraints(Axis::Horizontal).is_none());
    }

    #[test]
    fn test_builder_full() {
        let cc = CellConstraints::parse("end/preferred", CellAlignment::Full).unwrap();
        let mut builder = PercentDataBuilder::new();
        let pd = builder
            .xy(1, 1)
            .with_target_column(3)
            .with_row_constraints(cc)
            .span(3, 2)
            .unwrap()
            .create()
            .unwrap();
        assert_eq!(pd.span(Axis::Horizontal), 3);
        assert_eq!(pd.span(Axis::Vertical), 2);
        assert_eq!(pd.target(Axis::Horizontal), 3);
        assert_eq!(pd.target(Axis::Vertical), 1);
        assert_eq!(pd.constraints(Axis::Vertical), Some(&cc));
        assert_eq!(
            pd.to_string(),
            "COL = 1 ROW = 1 SPANX = 3 SPANY = 2 TARGETCOL = 3 ROWCONSTR = END/PREFERRED(0px)/0"
        );

        // builder was reset
        assert_eq!(builder.create(), Err(PercentError::MissingPosition));
    }

    #[test]
    fn test_invalid_span() {
        let mut builder = PercentDataBuilder::new();
        assert_eq!(builder.span_x(0).err(), Some(PercentError::InvalidSpan(0)));
        assert!(builder.span_y(0).is_err());
    }
}
