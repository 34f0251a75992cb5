// crates/percent-core/src/cell.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{NumberWithUnit, PercentError, Result};

const MIN_SIZE_START: char = '(';
const MIN_SIZE_END: char = ')';
const PART_DELIMITER: char = '/';
const LIST_DELIMITERS: &[char] = &[' ', ',', ';'];

/// How the content of a cell determines its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellSize {
    /// Use the minimum size of the contained components
    Minimum,
    /// Use the preferred size of the contained components
    Preferred,
    /// Ignore the components; only the minimum size of the cell counts
    None,
}

impl CellSize {
    pub fn name(self) -> &'static str {
        match self {
            CellSize::Minimum => "MINIMUM",
            CellSize::Preferred => "PREFERRED",
            CellSize::None => "NONE",
        }
    }
}

impl FromStr for CellSize {
    type Err = PercentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "MINIMUM" => Ok(CellSize::Minimum),
            "PREFERRED" => Ok(CellSize::Preferred),
            "NONE" => Ok(CellSize::None),
            _ => Err(PercentError::InvalidCellSpec(s.to_string())),
        }
    }
}

/// Placement of a component inside the area of its cell(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellAlignment {
    Start,
    Center,
    End,
    /// The component is stretched to fill the whole area
    Full,
}

impl CellAlignment {
    pub fn name(self) -> &'static str {
        match self {
            CellAlignment::Start => "START",
            CellAlignment::Center => "CENTER",
            CellAlignment::End => "END",
            CellAlignment::Full => "FULL",
        }
    }
}

impl FromStr for CellAlignment {
    type Err = PercentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "START" => Ok(CellAlignment::Start),
            "CENTER" => Ok(CellAlignment::Center),
            "END" => Ok(CellAlignment::End),
            "FULL" => Ok(CellAlignment::Full),
            _ => Err(PercentError::InvalidCellSpec(s.to_string())),
        }
    }
}

/// Summary of the sizing policy of a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellPolicy {
    /// Fixed size; the cell does not look at its components
    Fixed(NumberWithUnit),
    Preferred,
    Minimum,
    /// Receives a share of the remaining space proportional to its weight
    Percent(u32),
}

/// The definition of a single column or row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellConstraints {
    alignment: CellAlignment,
    size: CellSize,
    min_size: NumberWithUnit,
    weight: u32,
}

impl CellConstraints {
    pub fn new(alignment: CellAlignment, size: CellSize, min_size: NumberWithUnit, weight: u32) -> Result<Self> {
        if min_size.value() < 0.0 {
            return Err(PercentError::NegativeMinSize(min_size.to_unit_string()));
        }
        Ok(Self {
            alignment,
            size,
            min_size,
            weight,
        })
    }

    /// Constraints used for columns when nothing else is specified.
    pub fn default_column() -> Self {
        Self {
            alignment: CellAlignment::Full,
            size: CellSize::Preferred,
            min_size: NumberWithUnit::ZERO,
            weight: 0,
        }
    }

    /// Constraints used for rows when nothing else is specified.
    pub fn default_row() -> Self {
        Self {
            alignment: CellAlignment::Center,
            size: CellSize::Preferred,
            min_size: NumberWithUnit::ZERO,
            weight: 0,
        }
    }

    pub fn alignment(&self) -> CellAlignment {
        self.alignment
    }

    pub fn cell_size(&self) -> CellSize {
        self.size
    }

    pub fn min_size(&self) -> NumberWithUnit {
        self.min_size
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn policy(&self) -> CellPolicy {
        if self.weight > 0 {
            CellPolicy::Percent(self.weight)
        } else {
            match self.size {
                CellSize::None => CellPolicy::Fixed(self.min_size),
                CellSize::Preferred => CellPolicy::Preferred,
                CellSize::Minimum => CellPolicy::Minimum,
            }
        }
    }

    /// Parses a single cell definition of the form `[ALIGN/]SIZE[(MIN)][/WEIGHT]`.
    pub fn parse(spec: &str, default_alignment: CellAlignment) -> Result<Self> {
        if spec.trim().is_empty() {
            return Err(PercentError::InvalidCellSpec("undefined specification string".into()));
        }

        let mut parts: Vec<&str> = spec.split(PART_DELIMITER).collect();
        // trailing delimiters are ignored, so "preferred/" is "preferred"
        while parts.len() > 1 && parts.last().is_some_and(|part| part.is_empty()) {
            parts.pop();
        }
        let (alignment, (size, min_size), weight) = match parts.as_slice() {
            [size] => (default_alignment, parse_size_ex(size)?, 0),
            [first, second] => match parse_size(first) {
                Some(size) => (default_alignment, size, parse_weight(second)?),
                None => (first.parse::<CellAlignment>()?, parse_size_ex(second)?, 0),
            },
            [align, size, weight] => (
                align.parse::<CellAlignment>()?,
                parse_size_ex(size)?,
                parse_weight(weight)?,
            ),
            _ => {
                return Err(PercentError::InvalidCellSpec(format!(
                    "invalid number of components in '{}'",
                    spec
                )))
            }
        };

        let constraints = Self::new(alignment, size, min_size, weight)?;
        trace!("Parsed cell spec '{}' as {}", spec, constraints);
        Ok(constraints)
    }

    /// The canonical form, which parses back to an equal value.
    pub fn to_spec_string(&self) -> String {
        format!(
            "{}{PART_DELIMITER}{}{MIN_SIZE_START}{}{MIN_SIZE_END}{PART_DELIMITER}{}",
            self.alignment.name(),
            self.size.name(),
            self.min_size.to_unit_string(),
            self.weight
        )
    }
}

impl fmt::Display for CellConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_spec_string())
    }
}

/// Tries to interpret a part as size, optionally followed by a minimum size
/// in parentheses. A bare number is a fixed cell with that minimum size.
fn parse_size(part: &str) -> Option<(CellSize, NumberWithUnit)> {
    let s = part.trim();
    match s.find(MIN_SIZE_START) {
        Some(pos) if pos > 0 => {
            let inner = s.strip_suffix(MIN_SIZE_END)?;
            let size = inner[..pos].parse::<CellSize>().ok()?;
            let min_size = inner[pos + 1..].parse::<NumberWithUnit>().ok()?;
            Some((size, min_size))
        }
        Some(_) => None,
        None => match s.parse::<CellSize>() {
            Ok(size) => Some((size, NumberWithUnit::ZERO)),
            Err(_) => s
                .parse::<NumberWithUnit>()
                .ok()
                .map(|min_size| (CellSize::None, min_size)),
        },
    }
}

fn parse_size_ex(part: &str) -> Result<(CellSize, NumberWithUnit)> {
    parse_size(part).ok_or_else(|| PercentError::InvalidCellSpec(format!("invalid size declaration '{}'", part)))
}

fn parse_weight(part: &str) -> Result<u32> {
    let trimmed = part.trim();
    match trimmed.parse::<i64>() {
        Ok(weight) if weight < 0 => Err(PercentError::InvalidWeight(format!("weight must be positive: {}", trimmed))),
        Ok(weight) => u32::try_from(weight).map_err(|_| PercentError::InvalidWeight(trimmed.to_string())),
        Err(_) => Err(PercentError::InvalidWeight(trimmed.to_string())),
    }
}

/// Parses a list of cell definitions separated by blanks, commas or
/// semicolons. Fails if the list is empty.
pub fn parse_cell_list(spec: &str, default_alignment: CellAlignment) -> Result<Vec<CellConstraints>> {
    let cells = spec
        .split(LIST_DELIMITERS)
        .filter(|token| !token.is_empty())
        .map(|token| CellConstraints::parse(token, default_alignment))
        .collect::<Result<Vec<_>>>()?;

    if cells.is_empty() {
        return Err(PercentError::EmptyConstraints);
    }
    Ok(cells)
}

/// Stepwise construction of [`CellConstraints`].
///
/// The builder resets itself after each [`create`](Self::create), so one
/// instance can produce a whole set of column or row definitions.
#[derive(Debug, Clone)]
pub struct CellConstraintsBuilder {
    default_alignment: CellAlignment,
    alignment: CellAlignment,
    size: Option<CellSize>,
    min_size: Option<NumberWithUnit>,
    weight: u32,
}

impl CellConstraintsBuilder {
    pub fn new() -> Self {
        Self::with_default_alignment(CellAlignment::Full)
    }

    pub fn with_default_alignment(default_alignment: CellAlignment) -> Self {
        Self {
            default_alignment,
            alignment: default_alignment,
            size: None,
            min_size: None,
            weight: 0,
        }
    }

    pub fn default_alignment(&self) -> CellAlignment {
        self.default_alignment
    }

    pub fn with_cell_size(&mut self, size: CellSize) -> &mut Self {
        self.size = Some(size);
        self
    }

    pub fn with_min_size(&mut self, min_size: NumberWithUnit) -> &mut Self {
        self.min_size = Some(min_size);
        self
    }

    pub fn with_alignment(&mut self, alignment: CellAlignment) -> &mut Self {
        self.alignment = alignment;
        self
    }

    pub fn with_weight(&mut self, weight: u32) -> &mut Self {
        self.weight = weight;
        self
    }

    pub fn default_column(&mut self) -> &mut Self {
        self.alignment = CellAlignment::Full;
        self.size = Some(CellSize::Preferred);
        self.min_size = Some(NumberWithUnit::ZERO);
        self.weight = 0;
        self
    }

    pub fn default_row(&mut self) -> &mut Self {
        self.alignment = CellAlignment::Center;
        self.size = Some(CellSize::Preferred);
        self.min_size = Some(NumberWithUnit::ZERO);
        self.weight = 0;
        self
    }

    pub fn create(&mut self) -> Result<CellConstraints> {
        if self.size.is_none() && self.min_size.is_none() {
            self.reset();
            return Err(PercentError::UnspecifiedCellSize);
        }
        let result = CellConstraints::new(
            self.alignment,
            self.size.unwrap_or(CellSize::None),
            self.min_size.unwrap_or(NumberWithUnit::ZERO),
            self.weight,
        );
        self.reset();
        result
    }

    pub fn reset(&mut self) {
        self.alignment = self.default_alignment;
        self.size = None;
        self.min_size = None;
        self.weight = 0;
    }
}

impl Default for CellConstraintsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Unit;

    fn parse(spec: &str) -> CellConstraints {
        CellConstraints::parse(spec, CellAlignment::Full).unwrap()
    }

    #[test]
    fn test_parse_size_only() {
        let cc = parse("preferred");
        assert_eq!(cc.cell_size(), CellSize::Preferred);
        assert_eq!(cc.alignment(), CellAlignment::Full);
        assert_eq!(cc.min_size(), NumberWithUnit::ZERO);
        assert_eq!(cc.weight(), 0);
        assert_eq!(cc.policy(), CellPolicy::Preferred);
    }

    #[test]
    fn test_parse_fixed() {
        let cc = parse("3dlu");
        assert_eq!(cc.cell_size(), CellSize::None);
        assert_eq!(cc.min_size(), NumberWithUnit::new(3.0, Unit::Dlu));
        assert_eq!(cc.policy(), CellPolicy::Fixed(NumberWithUnit::new(3.0, Unit::Dlu)));
    }

    #[test]
    fn test_parse_full_definition() {
        let cc = parse("end/minimum(1in)/50");
        assert_eq!(cc.alignment(), CellAlignment::End);
        assert_eq!(cc.cell_size(), CellSize::Minimum);
        assert_eq!(cc.min_size(), NumberWithUnit::new(1.0, Unit::Inch));
        assert_eq!(cc.weight(), 50);
        assert_eq!(cc.policy(), CellPolicy::Percent(50));
    }

    #[test]
    fn test_parse_two_parts() {
        let weighted = parse("preferred/25");
        assert_eq!(weighted.cell_size(), CellSize::Preferred);
        assert_eq!(weighted.weight(), 25);

        let aligned = parse("center/10px");
        assert_eq!(aligned.alignment(), CellAlignment::Center);
        assert_eq!(aligned.cell_size(), CellSize::None);
        assert_eq!(aligned.min_size(), NumberWithUnit::pixels(10));
    }

    #[test]
    fn test_parse_default_alignment() {
        let cc = CellConstraints::parse("preferred", CellAlignment::Center).unwrap();
        assert_eq!(cc.alignment(), CellAlignment::Center);
    }

    #[test]
    fn test_parse_invalid() {
        for spec in [
            "",
            "invalid",
            "preferred(10",
            "(10)",
            "full/preferred/-1",
            "full/preferred/abc",
            "sideways/preferred",
            "full/preferred/10/5",
        ] {
            assert!(
                CellConstraints::parse(spec, CellAlignment::Full).is_err(),
                "'{}' should be rejected",
                spec
            );
        }
    }

    #[test]
    fn test_parse_trailing_delimiter() {
        assert_eq!(parse("preferred/"), parse("preferred"));
        assert_eq!(parse("end/preferred//"), parse("end/preferred"));
        assert_eq!(parse("preferred/20/").weight(), 20);
    }

    #[test]
    fn test_spec_string_round_trip() {
        let cc = parse("START/PREFERRED(1.5cm)/20");
        assert_eq!(cc.to_spec_string(), "START/PREFERRED(1.5cm)/20");
        assert_eq!(parse(&cc.to_spec_string()), cc);
        assert_eq!(parse("10").to_spec_string(), "FULL/NONE(10px)/0");
    }

    #[test]
    fn test_parse_cell_list() {
        let cells = parse_cell_list("3dlu, preferred;3dlu  full/preferred(1in)/50,3dlu", CellAlignment::Full).unwrap();
        assert_eq!(cells.len(), 5);
        assert_eq!(cells[3].weight(), 50);
        assert!(matches!(parse_cell_list(" ,; ", CellAlignment::Full), Err(PercentError::EmptyConstraints)));
    }

    #[test]
    fn test_builder() {
        let mut builder = CellConstraintsBuilder::new();
        let cc = builder
            .with_alignment(CellAlignment::End)
            .with_cell_size(CellSize::Minimum)
            .with_weight(10)
            .create()
            .unwrap();
        assert_eq!(cc, parse("END/MINIMUM/10"));

        let fixed = builder.with_min_size(NumberWithUnit::pixels(5)).create().unwrap();
        assert_eq!(fixed.alignment(), CellAlignment::Full);
        assert_eq!(fixed.cell_size(), CellSize::None);

        assert_eq!(builder.create(), Err(PercentError::UnspecifiedCellSize));
        assert_eq!(builder.default_row().create().unwrap(), CellConstraints::default_row());
        assert_eq!(builder.default_column().create().unwrap(), CellConstraints::default_column());
    }

    #[test]
    fn test_builder_negative_min_size() {
        let mut builder = CellConstraintsBuilder::new();
        let result = builder.with_min_size(NumberWithUnit::new(-1.0, Unit::Pixel)).create();
        assert!(matches!(result, Err(PercentError::NegativeMinSize(_))));
    }
}
