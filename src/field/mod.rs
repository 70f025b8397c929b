//! Field storage: dense rank-3 arrays with halo-aware helpers.

pub mod dense3d;
pub use dense3d::{Dense3D, Field};
