// crates/percent-engine/src/lib.rs

use glam::IVec2;
use percent_core::{Axis, UnitSizeHandler};

pub mod axis;
pub mod engine;
pub mod presets;

pub use engine::*;
pub use presets::*;
pub use percent_core;

/// The bridge between the layout engine and the toolkit owning the components.
///
/// The engine only ever asks for sizes; it never touches a component otherwise.
/// Implementations are expected to return non-negative pixel values.
pub trait LayoutAdapter {
    type Component;

    fn minimum_size(&self, component: &Self::Component, axis: Axis) -> i32;

    fn preferred_size(&self, component: &Self::Component, axis: Axis) -> i32;

    /// Converts non-pixel units of cell definitions and gaps.
    fn size_handler(&self) -> &dyn UnitSizeHandler;
}

/// An axis aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bounds {
    pub origin: IVec2,
    pub size: IVec2,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    /// A rectangle of the given size at the origin.
    pub fn from_size(size: IVec2) -> Self {
        Self {
            origin: IVec2::ZERO,
            size,
        }
    }

    pub fn x(&self) -> i32 {
        self.origin.x
    }

    pub fn y(&self) -> i32 {
        self.origin.y
    }

    pub fn width(&self) -> i32 {
        self.size.x
    }

    pub fn height(&self) -> i32 {
        self.size.y
    }

    pub fn start(&self, axis: Axis) -> i32 {
        axis.select(self.origin.x, self.origin.y)
    }

    pub fn extent(&self, axis: Axis) -> i32 {
        axis.select(self.size.x, self.size.y)
    }
}

/// Space reserved at the borders of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Insets {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn uniform(inset: i32) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    /// The area left for the grid inside a container of the given size.
    pub fn content_area(&self, container: IVec2) -> Bounds {
        Bounds {
            origin: IVec2::new(self.left, self.top),
            size: (container - IVec2::new(self.left + self.right, self.top + self.bottom)).max(IVec2::ZERO),
        }
    }

    /// The container size needed for content of the given size.
    pub fn outer_size(&self, content: IVec2) -> IVec2 {
        content + IVec2::new(self.left + self.right, self.top + self.bottom)
    }
}

/// The outcome of a layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutResult {
    pub column_sizes: Vec<i32>,
    pub row_sizes: Vec<i32>,
    pub column_positions: Vec<i32>,
    pub row_positions: Vec<i32>,
    /// Component bounds, in the order the components were added
    pub bounds: Vec<Bounds>,
}

impl LayoutResult {
    pub fn sizes(&self, axis: Axis) -> &[i32] {
        axis.select(&self.column_sizes, &self.row_sizes)
    }

    pub fn positions(&self, axis: Axis) -> &[i32] {
        axis.select(&self.column_positions, &self.row_positions)
    }
}
