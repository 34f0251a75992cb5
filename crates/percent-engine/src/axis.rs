// crates/percent-engine/src/axis.rs
//! Size resolution along a single axis.
//!
//! Everything in here is a pure function of the cell definitions, the
//! groups, the gap and the measured components. The engine measures the
//! components once per pass and hands the numbers to an [`AxisSolver`].

use percent_core::{CellAlignment, CellConstraints, CellGroup, CellSize};
use tracing::trace;

/// A component as seen from one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisItem {
    pub start: usize,
    pub span: usize,
    /// Cell size of the constraints that apply to this component
    pub cell_size: CellSize,
    pub alignment: CellAlignment,
    /// Minimum size of the applying constraints, in pixels
    pub floor: i32,
    pub minimum: i32,
    pub preferred: i32,
}

impl AxisItem {
    /// The space this component asks for.
    pub fn size(&self, minimum: bool) -> i32 {
        let size = match self.cell_size {
            CellSize::None => 0,
            CellSize::Minimum => self.minimum,
            CellSize::Preferred if minimum => self.minimum,
            CellSize::Preferred => self.preferred,
        };
        size.max(self.floor)
    }

    fn end(&self) -> usize {
        self.start + self.span
    }
}

/// Resolved sizes and positions of all cells on one axis.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AxisLayout {
    pub sizes: Vec<i32>,
    pub positions: Vec<i32>,
}

#[derive(Debug, Clone)]
pub struct AxisSolver<'a> {
    cells: &'a [CellConstraints],
    floors: Vec<i32>,
    /// Disjoint, in range; overlapping groups are merged
    groups: Vec<CellGroup>,
    gap: i32,
    items: Vec<AxisItem>,
}

impl<'a> AxisSolver<'a> {
    /// `floors` holds the minimum size of each cell converted to pixels.
    pub fn new(
        cells: &'a [CellConstraints],
        floors: Vec<i32>,
        groups: &[CellGroup],
        gap: i32,
        items: Vec<AxisItem>,
    ) -> Self {
        debug_assert_eq!(cells.len(), floors.len());
        Self {
            groups: merge_groups(groups, cells.len()),
            cells,
            floors,
            gap: gap.max(0),
            items,
        }
    }

    pub fn items(&self) -> &[AxisItem] {
        &self.items
    }

    /// Cell sizes derived from the content, before any remaining space is
    /// handed out. Groups are already applied.
    pub fn cell_sizes(&self, minimum: bool) -> Vec<i32> {
        let mut sizes = self.floors.clone();

        for item in self.items.iter().filter(|item| item.span == 1) {
            if let Some(size) = sizes.get_mut(item.start) {
                *size = (*size).max(item.size(minimum));
            }
        }

        for item in self.items.iter().filter(|item| item.span > 1) {
            if item.end() > sizes.len() {
                continue;
            }
            let needed = item.size(minimum);
            let available = self.span_extent(&sizes, item.start, item.span);
            if needed > available {
                self.enlarge(&mut sizes, item.start, item.end(), needed - available);
            }
        }

        for group in &self.groups {
            group.apply(&mut sizes);
        }
        sizes
    }

    /// Total space occupied by the given sizes including the gaps between them.
    pub fn total(&self, sizes: &[i32]) -> i32 {
        let gaps = sizes.len().saturating_sub(1) as i32 * self.gap;
        sizes.iter().sum::<i32>() + gaps
    }

    /// Computes the final cell sizes for the given amount of space.
    ///
    /// If the preferred sizes do not fit and shrinking is allowed, the
    /// minimum sizes are used instead. Space that is left over goes to the
    /// weighted cells, see [`shares`](Self::shares).
    pub fn solve(&self, available: i32, can_shrink: bool) -> Vec<i32> {
        let available = available.max(0);
        let mut sizes = self.cell_sizes(false);
        if can_shrink && self.total(&sizes) > available {
            trace!("Preferred sizes exceed {} pixels, using minimum sizes", available);
            sizes = self.cell_sizes(true);
        }

        let remaining = available - self.total(&sizes);
        if remaining > 0 {
            for (size, share) in sizes.iter_mut().zip(self.shares(remaining)) {
                *size += share;
            }
        }
        trace!("Resolved cell sizes {:?} for {} pixels", sizes, available);
        sizes
    }

    /// Splits `remaining` pixels over the weighted cells by weight.
    ///
    /// The members of a group then share what the group received evenly, so
    /// they keep the same size. Pixels that cannot be split evenly go to the
    /// weighted cells outside of all groups, or stay unused if there are none.
    pub fn shares(&self, remaining: i32) -> Vec<i32> {
        let mut shares = vec![0; self.cells.len()];
        self.distribute_weighted(&mut shares, remaining, |_| true);

        let mut spare = 0;
        for group in &self.groups {
            let members = group.indices();
            let count = members.len() as i32;
            let total: i32 = members.iter().map(|&idx| shares[idx]).sum();
            for &idx in members {
                shares[idx] = total / count;
            }
            spare += total % count;
        }

        if spare > 0 {
            let grouped = |idx: usize| self.groups.iter().any(|group| group.indices().contains(&idx));
            if !self.distribute_weighted(&mut shares, spare, |idx| !grouped(idx)) {
                trace!("{} pixels left unused to keep groups equal", spare);
            }
        }
        shares
    }

    /// Adds `amount` to the weighted cells accepted by `eligible`. Returns
    /// `false` if there is no such cell.
    fn distribute_weighted(&self, shares: &mut [i32], amount: i32, eligible: impl Fn(usize) -> bool) -> bool {
        let weighted: Vec<(usize, u32)> = self
            .cells
            .iter()
            .enumerate()
            .filter(|&(idx, cc)| cc.weight() > 0 && eligible(idx))
            .map(|(idx, cc)| (idx, cc.weight()))
            .collect();
        let weights: Vec<u32> = weighted.iter().map(|&(_, w)| w).collect();
        for (&(idx, _), share) in weighted.iter().zip(distribute(amount, &weights)) {
            shares[idx] += share;
        }
        !weighted.is_empty()
    }

    /// Start position of each cell, beginning at `origin`.
    pub fn positions(&self, sizes: &[i32], origin: i32) -> Vec<i32> {
        let mut position = origin;
        sizes
            .iter()
            .map(|size| {
                let current = position;
                position += size + self.gap;
                current
            })
            .collect()
    }

    pub fn layout(&self, available: i32, origin: i32, can_shrink: bool) -> AxisLayout {
        let sizes = self.solve(available, can_shrink);
        let positions = self.positions(&sizes, origin);
        AxisLayout { sizes, positions }
    }

    /// Position and extent of an item within the resolved cells.
    pub fn place(&self, item: &AxisItem, layout: &AxisLayout) -> (i32, i32) {
        let start = layout.positions.get(item.start).copied().unwrap_or_default();
        let available = self.span_extent(&layout.sizes, item.start, item.span);
        if item.alignment == CellAlignment::Full {
            return (start, available);
        }

        let size = item.size(false).min(available).max(0);
        let offset = match item.alignment {
            CellAlignment::Center => (available - size) / 2,
            CellAlignment::End => available - size,
            CellAlignment::Start | CellAlignment::Full => 0,
        };
        (start + offset, size)
    }

    fn span_extent(&self, sizes: &[i32], start: usize, span: usize) -> i32 {
        let end = (start + span).min(sizes.len());
        let cells = sizes.get(start..end).unwrap_or_default();
        self.total(cells)
    }

    /// Hands out `amount` additional pixels to the cells in `start..end`.
    ///
    /// Cells with size `None` never grow. If some of the others are weighted,
    /// only those grow, in proportion to their weight; otherwise all eligible
    /// cells grow evenly.
    fn enlarge(&self, sizes: &mut [i32], start: usize, end: usize, amount: i32) {
        let eligible: Vec<usize> = (start..end)
            .filter(|&idx| self.cells[idx].cell_size() != CellSize::None)
            .collect();
        if eligible.is_empty() {
            return;
        }

        let weighted: Vec<usize> = eligible
            .iter()
            .copied()
            .filter(|&idx| self.cells[idx].weight() > 0)
            .collect();
        let (targets, weights): (Vec<usize>, Vec<u32>) = if weighted.is_empty() {
            (eligible.clone(), vec![1; eligible.len()])
        } else {
            let weights = weighted.iter().map(|&idx| self.cells[idx].weight()).collect();
            (weighted, weights)
        };

        for (idx, share) in targets.into_iter().zip(distribute(amount, &weights)) {
            sizes[idx] += share;
        }
    }
}

/// Combines groups sharing a cell, since all of their members have to end up
/// equal. Indices outside of `count` cells are dropped.
fn merge_groups(groups: &[CellGroup], count: usize) -> Vec<CellGroup> {
    let mut sets: Vec<Vec<usize>> = Vec::new();
    for group in groups {
        let mut merged: Vec<usize> = group.indices().iter().copied().filter(|&idx| idx < count).collect();
        sets.retain(|set| {
            if set.iter().any(|idx| merged.contains(idx)) {
                merged.extend(set.iter().copied());
                false
            } else {
                true
            }
        });
        merged.sort_unstable();
        merged.dedup();
        sets.push(merged);
    }
    sets.into_iter().filter_map(|set| CellGroup::new(set).ok()).collect()
}

/// Splits `amount` into integer parts proportional to `weights`.
///
/// Uses the largest remainder method, so the parts always sum up to `amount`.
/// Ties are resolved in favor of the lower index.
pub fn distribute(amount: i32, weights: &[u32]) -> Vec<i32> {
    let total: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    if amount <= 0 || total == 0 {
        return vec![0; weights.len()];
    }

    let amount = i64::from(amount);
    let mut shares: Vec<i64> = weights.iter().map(|&w| amount * i64::from(w) / total).collect();
    let mut remainders: Vec<(usize, i64)> = weights
        .iter()
        .enumerate()
        .map(|(idx, &w)| (idx, amount * i64::from(w) % total))
        .collect();
    remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let leftover = amount - shares.iter().sum::<i64>();
    for &(idx, _) in remainders.iter().take(leftover as usize) {
        shares[idx] += 1;
    }
    shares.into_iter().map(|share| share as i32).collect()
}
