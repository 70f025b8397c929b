// Pointwise reaction term added to the stencil operator.

/// Pointwise term `N(v)` of the operator `A(v) = L v / h² + N(v)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Nonlinearity {
    /// `N(v) = 0`: purely linear problem.
    Linear,
    /// `N(v) = γ·v·exp(v)`.
    Exponential { gamma: f64 },
}

impl Nonlinearity {
    pub fn is_linear(&self) -> bool {
        matches!(self, Nonlinearity::Linear)
    }

    #[inline(always)]
    pub fn value(&self, v: f64) -> f64 {
        match *self {
            Nonlinearity::Linear => 0.0,
            Nonlinearity::Exponential { gamma } => gamma * v * v.exp(),
        }
    }

    /// `dN/dv`, used as the extra diagonal term in the nonlinear Jacobi update.
    #[inline(always)]
    pub fn derivative(&self, v: f64) -> f64 {
        match *self {
            Nonlinearity::Linear => 0.0,
            Nonlinearity::Exponential { gamma } => gamma * (1.0 + v) * v.exp(),
        }
    }
}
