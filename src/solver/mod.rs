//! Outer multigrid driver.
//!
//! [`MultigridEngine`] owns everything a solve needs beyond the hierarchy
//! itself: the coarse solver (with its cached factorization), the worker
//! pool, and the reporting tolerance. [`MultigridEngine::solve`] runs exactly
//! `maxiter` V-cycles and logs the finest residual norm after each one.

use crate::error::MgError;
use crate::grid::GridHierarchy;
use crate::multigrid;
use crate::parallel::SolverPool;
use crate::utils::convergence::{Convergence, SolveStats};
use std::time::Instant;

pub mod coarse;
pub use coarse::CoarseSolver;

/// Common interface for drivers that iterate on a grid hierarchy in place.
pub trait GridSolver {
    type Error;
    /// Iterate on `grid`, leaving the result in the finest level's `v`.
    fn solve(&mut self, grid: &mut GridHierarchy) -> Result<SolveStats<f64>, Self::Error>;
}

pub struct MultigridEngine {
    pub conv: Convergence<f64>,
    coarse: CoarseSolver,
    pool: SolverPool,
}

impl MultigridEngine {
    /// Engine configured from the parameters stored in `grid`.
    pub fn new(grid: &GridHierarchy) -> Result<Self, MgError> {
        Ok(MultigridEngine {
            conv: Convergence { tol: grid.tol, max_iters: grid.maxiter },
            coarse: CoarseSolver::new(grid.coarse_solve),
            pool: SolverPool::new(grid.num_threads)?,
        })
    }

    pub fn num_threads(&self) -> usize {
        self.pool.num_threads()
    }

    /// Recompute the finest residual and return its norm.
    pub fn residual_norm(&self, grid: &mut GridHierarchy) -> f64 {
        let GridHierarchy { levels, stencil, nonlinearity, .. } = grid;
        let (level, stencil, op) = (&mut levels[0], &*stencil, *nonlinearity);
        self.pool.install(|| multigrid::residual(level, stencil, op))
    }

    /// One V-cycle inside the engine's pool.
    pub fn vcycle(&mut self, grid: &mut GridHierarchy) -> Result<f64, MgError> {
        let coarse = &mut self.coarse;
        self.pool.install(|| multigrid::vcycle(grid, coarse))
    }
}

impl GridSolver for MultigridEngine {
    type Error = MgError;

    fn solve(&mut self, grid: &mut GridHierarchy) -> Result<SolveStats<f64>, MgError> {
        let initial = self.residual_norm(grid);
        log::info!(
            "multigrid: {} levels, finest {:?}, {} threads, initial residual {:.6e}",
            grid.num_levels(),
            grid.finest().level_dim(),
            self.num_threads(),
            initial
        );

        let mut history = Vec::with_capacity(self.conv.max_iters);
        for i in 0..self.conv.max_iters {
            let start = Instant::now();
            let res = self.vcycle(grid)?;
            log::info!(
                "iter: {} residual: {:.6e} ({:.3} ms)",
                i,
                res,
                start.elapsed().as_secs_f64() * 1e3
            );
            history.push(res);
        }

        let stats = self.conv.finish(initial, history);
        if !stats.converged {
            log::debug!(
                "final residual {:.6e} above reporting tolerance {:.1e}",
                stats.final_residual,
                self.conv.tol
            );
        }
        Ok(stats)
    }
}

/// Run `grid.maxiter` V-cycles on a fully initialized hierarchy.
pub fn solve(grid: &mut GridHierarchy) -> Result<SolveStats<f64>, MgError> {
    MultigridEngine::new(grid)?.solve(grid)
}
