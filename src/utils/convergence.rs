//! Convergence reporting for the outer V-cycle loop.

/// Reporting tolerance & iteration cap.
pub struct Convergence<T> {
    pub tol: T,
    pub max_iters: usize,
}

#[derive(Clone, Debug)]
pub struct SolveStats<T> {
    pub iterations: usize,
    pub initial_residual: T,
    pub final_residual: T,
    /// Residual norm after every cycle, in order.
    pub history: Vec<T>,
    /// `final_residual <= tol`. Reported only; the loop never stops early.
    pub converged: bool,
}

impl<T: Copy + num_traits::Float> Convergence<T> {
    /// True once `res_norm` is within the tolerance.
    pub fn reached(&self, res_norm: T) -> bool {
        res_norm <= self.tol
    }

    /// Assemble stats for a finished run.
    pub fn finish(&self, initial_residual: T, history: Vec<T>) -> SolveStats<T> {
        let final_residual = history.last().copied().unwrap_or(initial_residual);
        SolveStats {
            iterations: history.len(),
            initial_residual,
            final_residual,
            converged: self.reached(final_residual),
            history,
        }
    }
}

impl<T: Copy + num_traits::Float> SolveStats<T> {
    /// Geometric-mean reduction factor per cycle.
    pub fn mean_contraction(&self) -> Option<T> {
        if self.iterations == 0 || self.initial_residual <= T::zero() {
            return None;
        }
        let n = <T as num_traits::NumCast>::from(self.iterations)?;
        Some((self.final_residual / self.initial_residual).powf(T::one() / n))
    }
}
