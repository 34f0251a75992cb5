// crates/percent-core/src/group.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{PercentError, Result};

const SEPARATORS: &[char] = &[' ', ',', ';', '/'];

/// A set of columns or rows that must end up with the same size.
///
/// When applied, every member takes the largest size found among the members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellGroup {
    indices: Vec<usize>,
}

impl CellGroup {
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Result<Self> {
        let mut indices: Vec<usize> = indices.into_iter().collect();
        if indices.len() < 2 {
            return Err(PercentError::InvalidGroup(
                "group must contain at least 2 indices".into(),
            ));
        }
        indices.sort_unstable();
        Ok(Self { indices })
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn group_size(&self) -> usize {
        self.indices.len()
    }

    /// Largest index in this group, used for bounds checks.
    pub fn max_index(&self) -> usize {
        self.indices.last().copied().unwrap_or_default()
    }

    /// Sets all member sizes to the maximum member size.
    ///
    /// Indices outside of `sizes` are ignored; groups are validated against
    /// the grid when they are added to a layout.
    pub fn apply(&self, sizes: &mut [i32]) {
        let max = self
            .indices
            .iter()
            .filter_map(|&idx| sizes.get(idx).copied())
            .max()
            .unwrap_or(0)
            .max(0);
        for &idx in &self.indices {
            if let Some(size) = sizes.get_mut(idx) {
                *size = max;
            }
        }
    }
}

impl FromStr for CellGroup {
    type Err = PercentError;

    fn from_str(s: &str) -> Result<Self> {
        let indices = s
            .split(SEPARATORS)
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<usize>()
                    .map_err(|_| PercentError::InvalidGroup(format!("invalid specification string '{}'", s)))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(indices)
    }
}

impl fmt::Display for CellGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.indices.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join(","))
    }
}

impl TryFrom<String> for CellGroup {
    type Error = PercentError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<CellGroup> for String {
    fn from(value: CellGroup) -> Self {
        value.to_string()
    }
}
