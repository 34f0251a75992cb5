// crates/percent-core/src/units.rs
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{PercentError, Result};

static UNIT_STRING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]*\.?[0-9]*)\s*(\S*)$").expect("unit pattern is valid")
});

const DLU_X_FACTOR: f64 = 4.0;
const DLU_Y_FACTOR: f64 = 8.0;
const CM_PER_INCH: f64 = 2.54;

/// One of the two layout directions. Most calculations are done per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Columns, widths, x coordinates
    Horizontal,
    /// Rows, heights, y coordinates
    Vertical,
}

impl Axis {
    /// Picks the value belonging to this axis.
    pub fn select<T>(self, horizontal: T, vertical: T) -> T {
        match self {
            Axis::Horizontal => horizontal,
            Axis::Vertical => vertical,
        }
    }

    pub fn is_vertical(self) -> bool {
        self == Axis::Vertical
    }
}

/// Converts toolkit dependent units into pixels.
///
/// Implemented by whatever hosts the layout; the engine itself has no notion
/// of fonts or screens.
pub trait UnitSizeHandler {
    /// Average character size of the reference font on the given axis.
    fn font_size(&self, axis: Axis) -> f64;

    /// Screen resolution in dots per inch.
    fn screen_resolution(&self) -> u32;
}

/// A size handler with constant metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSizeHandler {
    pub font_size: f64,
    pub screen_resolution: u32,
}

impl FixedSizeHandler {
    pub fn new(font_size: f64, screen_resolution: u32) -> Self {
        Self {
            font_size,
            screen_resolution,
        }
    }
}

impl Default for FixedSizeHandler {
    fn default() -> Self {
        Self::new(12.0, 96)
    }
}

impl UnitSizeHandler for FixedSizeHandler {
    fn font_size(&self, _axis: Axis) -> f64 {
        self.font_size
    }

    fn screen_resolution(&self) -> u32 {
        self.screen_resolution
    }
}

/// Units a length can be specified in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Plain pixels
    Pixel,
    /// Inches, converted via the screen resolution
    Inch,
    /// Centimeters, converted via the screen resolution
    Centimeter,
    /// Dialog units, relative to the reference font size
    Dlu,
}

impl Unit {
    pub const ALL: [Unit; 4] = [Unit::Pixel, Unit::Inch, Unit::Centimeter, Unit::Dlu];

    pub fn name(self) -> &'static str {
        match self {
            Unit::Pixel => "px",
            Unit::Inch => "in",
            Unit::Centimeter => "cm",
            Unit::Dlu => "dlu",
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        let lower = name.to_lowercase();
        Unit::ALL
            .into_iter()
            .find(|unit| unit.name() == lower)
            .ok_or_else(|| PercentError::InvalidUnit(format!("unknown unit '{}'", name)))
    }

    /// Converts a value in this unit to pixels, rounding to the nearest pixel.
    pub fn to_pixels(self, value: f64, handler: &dyn UnitSizeHandler, axis: Axis) -> i32 {
        let pixels = match self {
            Unit::Pixel => value,
            Unit::Inch => value * f64::from(handler.screen_resolution()),
            Unit::Centimeter => value / CM_PER_INCH * f64::from(handler.screen_resolution()),
            Unit::Dlu => {
                let factor = axis.select(DLU_X_FACTOR, DLU_Y_FACTOR);
                value * handler.font_size(axis) / factor
            }
        };
        pixels.round() as i32
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A length together with its unit, e.g. `3dlu` or `1.5in`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NumberWithUnit {
    value: f64,
    unit: Unit,
}

impl NumberWithUnit {
    pub const ZERO: NumberWithUnit = NumberWithUnit {
        value: 0.0,
        unit: Unit::Pixel,
    };

    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn pixels(value: i32) -> Self {
        Self::new(f64::from(value), Unit::Pixel)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn to_pixels(&self, handler: &dyn UnitSizeHandler, axis: Axis) -> i32 {
        self.unit.to_pixels(self.value, handler, axis)
    }

    /// Canonical textual form. Pixels are always written as integers.
    pub fn to_unit_string(&self) -> String {
        match self.unit {
            Unit::Pixel => format!("{}{}", self.value.round() as i64, self.unit.name()),
            _ => format!("{}{}", self.value, self.unit.name()),
        }
    }
}

impl Default for NumberWithUnit {
    fn default() -> Self {
        Self::ZERO
    }
}

impl FromStr for NumberWithUnit {
    type Err = PercentError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let captures = UNIT_STRING
            .captures(trimmed)
            .ok_or_else(|| PercentError::InvalidUnit(s.to_string()))?;
        let number = &captures[1];
        let value = number
            .parse::<f64>()
            .map_err(|_| PercentError::InvalidUnit(format!("{}: not a valid number", s)))?;
        let unit = match &captures[2] {
            "" => Unit::Pixel,
            name => Unit::from_name(name).map_err(|_| PercentError::InvalidUnit(s.to_string()))?,
        };
        Ok(Self::new(value, unit))
    }
}

impl fmt::Display for NumberWithUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_unit_string())
    }
}

impl TryFrom<String> for NumberWithUnit {
    type Error = PercentError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<NumberWithUnit> for String {
    fn from(value: NumberWithUnit) -> Self {
        value.to_unit_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HANDLER: FixedSizeHandler = FixedSizeHandler {
        font_size: 20.0,
        screen_resolution: 96,
    };

    #[test]
    fn test_unit_parsing() {
        assert_eq!("10".parse::<NumberWithUnit>().unwrap(), NumberWithUnit::pixels(10));
        assert_eq!(
            "1.5in".parse::<NumberWithUnit>().unwrap(),
            NumberWithUnit::new(1.5, Unit::Inch)
        );
        assert_eq!(
            " 3 DLU ".parse::<NumberWithUnit>().unwrap(),
            NumberWithUnit::new(3.0, Unit::Dlu)
        );
        assert_eq!(
            ".5cm".parse::<NumberWithUnit>().unwrap(),
            NumberWithUnit::new(0.5, Unit::Centimeter)
        );
    }

    #[test]
    fn test_invalid_unit_strings() {
        for input in ["", "px", "10 furlongs", "-5", "1.2.3in", "abc"] {
            assert!(
                input.parse::<NumberWithUnit>().is_err(),
                "'{}' should not parse",
                input
            );
        }
    }

    #[test]
    fn test_to_pixels() {
        assert_eq!(NumberWithUnit::new(10.4, Unit::Pixel).to_pixels(&HANDLER, Axis::Horizontal), 10);
        assert_eq!(NumberWithUnit::new(1.0, Unit::Inch).to_pixels(&HANDLER, Axis::Vertical), 96);
        assert_eq!(NumberWithUnit::new(2.54, Unit::Centimeter).to_pixels(&HANDLER, Axis::Horizontal), 96);
        assert_eq!(NumberWithUnit::new(2.0, Unit::Dlu).to_pixels(&HANDLER, Axis::Horizontal), 10);
        assert_eq!(NumberWithUnit::new(2.0, Unit::Dlu).to_pixels(&HANDLER, Axis::Vertical), 5);
    }

    #[test]
    fn test_unit_string() {
        assert_eq!(NumberWithUnit::new(10.6, Unit::Pixel).to_unit_string(), "11px");
        assert_eq!(NumberWithUnit::new(1.5, Unit::Inch).to_unit_string(), "1.5in");
        assert_eq!(NumberWithUnit::new(3.0, Unit::Dlu).to_unit_string(), "3dlu");
        let parsed: NumberWithUnit = "1.5in".parse().unwrap();
        assert_eq!(parsed.to_unit_string().parse::<NumberWithUnit>().unwrap(), parsed);
    }

    #[test]
    fn test_axis_select() {
        assert_eq!(Axis::Horizontal.select(1, 2), 1);
        assert_eq!(Axis::Vertical.select(1, 2), 2);
    }
}
