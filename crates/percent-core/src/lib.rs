// crates/percent-core/src/lib.rs
pub mod units;
pub mod cell;
pub mod group;
pub mod placement;

pub use units::*;
pub use cell::*;
pub use group::*;
pub use placement::*;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PercentError {
    #[error("Not a valid unit string: {0}")]
    InvalidUnit(String),

    #[error("Invalid cell specification: {0}")]
    InvalidCellSpec(String),

    #[error("Invalid weight factor: {0}")]
    InvalidWeight(String),

    #[error("Minimum size must be non-negative: {0}")]
    NegativeMinSize(String),

    #[error("Undefined cell constraints")]
    EmptyConstraints,

    #[error("Cell size is unspecified; set a cell size or a minimum size")]
    UnspecifiedCellSize,

    #[error("Invalid cell group: {0}")]
    InvalidGroup(String),

    #[error("Cell group index {index} exceeds the number of cells ({count})")]
    GroupOutOfBounds { index: usize, count: usize },

    #[error("Span must be greater than 0: {0}")]
    InvalidSpan(usize),

    #[error(
        "Component at ({column}, {row}) with span {span_x}x{span_y} exceeds grid of {columns}x{rows}"
    )]
    SpanOutOfBounds {
        column: usize,
        row: usize,
        span_x: usize,
        span_y: usize,
        columns: usize,
        rows: usize,
    },

    #[error("Cell ({column}, {row}) is already occupied")]
    CellOccupied { column: usize, row: usize },

    #[error("Index {index} out of bounds (count {count})")]
    IndexOutOfBounds { index: usize, count: usize },

    #[error("A position must be set before creating placement data")]
    MissingPosition,

    #[error("Invalid border layout region: {0}")]
    InvalidBorderRegion(String),
}

pub type Result<T> = std::result::Result<T, PercentError>;
