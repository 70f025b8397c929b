//! Grid hierarchy: per-level storage and the shared solver parameters.

pub mod hierarchy;
pub mod level;

pub use hierarchy::{CoarseningPolicy, FieldKind, GridHierarchy, MIN_COARSE_DIM};
pub use level::LevelData;
