//! Discrete operator: a fixed stencil plus an optional pointwise nonlinearity.

pub mod nonlinear;
pub mod stencil;

pub use nonlinear::Nonlinearity;
pub use stencil::Stencil;
