//! Utilities shared by the solver drivers.

pub mod convergence;
pub use convergence::{Convergence, SolveStats};
