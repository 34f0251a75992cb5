// crates/percent-engine/src/presets/mod.rs
//! Ready-made grids for common container arrangements.

pub mod border;
pub mod button;

pub use border::*;
pub use button::*;
