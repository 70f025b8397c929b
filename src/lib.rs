//! gmg3d: geometric multigrid for elliptic problems on regular 3D grids
//!
//! This crate solves `A(v) = f` on a cube with Dirichlet-zero boundaries, where
//! `A` is a fixed short-range stencil scaled by `1/h²`, optionally plus the
//! semilinear term `γ·v·exp(v)`. Linear problems use the correction scheme;
//! semilinear ones use the Full Approximation Scheme. Hot kernels run in
//! parallel over z-planes with rayon.

pub mod parallel;

pub mod config;
pub mod error;
pub mod field;
pub mod grid;
pub mod multigrid;
pub mod operator;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use error::*;
pub use field::*;
pub use grid::*;
pub use operator::*;
pub use solver::*;
pub use utils::*;

// Re-export SolveStats at the crate root for convenience
pub use utils::convergence::SolveStats;
