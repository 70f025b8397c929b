//! Multigrid engine kernels and the V-cycle that sequences them.
//!
//! - [`residual`]: `r = f - A(v)` and its Euclidean norm.
//! - [`smoother`]: weighted Jacobi, linear and nonlinear.
//! - [`transfer`]: full-weighting restriction, trilinear interpolation.
//! - [`vcycle`]: one downward/upward traversal of the hierarchy.
//!
//! All kernels except interpolation split their output field by z-plane
//! across threads; interpolation runs its four passes in order.

pub mod residual;
pub mod smoother;
pub mod transfer;
pub mod vcycle;

pub use residual::{apply_stencil, residual};
pub use smoother::jacobi;
pub use transfer::{interpolate, restrict};
pub use vcycle::vcycle;
