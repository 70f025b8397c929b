//! Coarsest-level solve.
//!
//! By default the coarsest level gets `pre + post` Jacobi sweeps instead of
//! an exact solve, which is adequate while that level stays tiny. With
//! [`CoarseSolve::DirectLu`] the linear coarse operator is assembled as a
//! dense matrix and factored once with Faer's full-pivoting LU; later cycles
//! reuse the cached factorization.
//!
//! # References
//! - Faer documentation: https://github.com/sarah-ek/faer-rs

use crate::config::CoarseSolve;
use crate::error::MgError;
use crate::grid::LevelData;
use crate::multigrid::smoother::jacobi;
use crate::operator::{Nonlinearity, Stencil};
use faer::linalg::solvers::{FullPivLu, SolveCore};
use faer::{Conj, Mat, MatMut};

/// Largest coarse level the dense path accepts.
pub const MAX_DIRECT_UNKNOWNS: usize = 4096;

pub struct CoarseSolver {
    kind: CoarseSolve,
    /// Cached factorization and the interior extent it was built for.
    factor: Option<(FullPivLu<f64>, [usize; 3])>,
    rhs: Vec<f64>,
}

impl CoarseSolver {
    pub fn new(kind: CoarseSolve) -> Self {
        CoarseSolver { kind, factor: None, rhs: Vec::new() }
    }

    pub fn kind(&self) -> CoarseSolve {
        self.kind
    }

    /// Solve (or approximately solve) `A(v) = f` on `level`.
    pub fn solve(
        &mut self,
        level: &mut LevelData,
        stencil: &Stencil,
        op: Nonlinearity,
        omega: f64,
        sweeps: usize,
    ) -> Result<(), MgError> {
        match self.kind {
            CoarseSolve::Smoothing => {
                jacobi(level, stencil, op, omega, sweeps);
                Ok(())
            }
            CoarseSolve::DirectLu => {
                if !op.is_linear() {
                    return Err(MgError::Unsupported("direct coarse solve of a nonlinear operator"));
                }
                self.solve_direct(level, stencil)
            }
        }
    }

    fn solve_direct(&mut self, level: &mut LevelData, stencil: &Stencil) -> Result<(), MgError> {
        let dim = level.level_dim();
        let stale = !matches!(&self.factor, Some((_, d)) if *d == dim);
        if stale {
            let a = assemble(level, stencil)?;
            self.factor = Some((FullPivLu::new(a.as_ref()), dim));
        }
        let (factor, _) = self
            .factor
            .as_ref()
            .ok_or_else(|| MgError::FactorError("coarse operator not factored".into()))?;

        let [nx, ny, nz] = dim;
        self.rhs.clear();
        for z in 1..=nz {
            for y in 1..=ny {
                for x in 1..=nx {
                    self.rhs.push(level.f.get(x, y, z));
                }
            }
        }
        let n = self.rhs.len();
        let x_mat = MatMut::from_column_major_slice_mut(&mut self.rhs, n, 1);
        factor.solve_in_place_with_conj(Conj::No, x_mat);

        if self.rhs.iter().any(|v| !v.is_finite()) {
            self.factor = None;
            return Err(MgError::FactorError("singular coarse operator".into()));
        }
        let mut values = self.rhs.iter();
        for z in 1..=nz {
            for y in 1..=ny {
                for x in 1..=nx {
                    if let Some(&val) = values.next() {
                        level.v.set(x, y, z, val);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Dense matrix of the stencil operator on the interior of `level`.
/// Neighbours in the halo are Dirichlet zero and drop out.
fn assemble(level: &LevelData, stencil: &Stencil) -> Result<Mat<f64>, MgError> {
    let [nx, ny, nz] = level.level_dim();
    let n = level.num_interior();
    if n > MAX_DIRECT_UNKNOWNS {
        return Err(MgError::InvalidParameter(format!(
            "coarsest level has {n} unknowns, direct solve limit is {MAX_DIRECT_UNKNOWNS}"
        )));
    }
    let inv_h2 = 1.0 / (level.h() * level.h());
    let row_of = |x: i64, y: i64, z: i64| -> Option<usize> {
        let inside = (1..=nx as i64).contains(&x)
            && (1..=ny as i64).contains(&y)
            && (1..=nz as i64).contains(&z);
        inside.then(|| (((z - 1) as usize * ny) + (y - 1) as usize) * nx + (x - 1) as usize)
    };

    let mut a = Mat::<f64>::zeros(n, n);
    for z in 1..=nz as i64 {
        for y in 1..=ny as i64 {
            for x in 1..=nx as i64 {
                let Some(i) = row_of(x, y, z) else { continue };
                for k in 0..stencil.len() {
                    let nb = row_of(
                        x + stencil.x_offset(k),
                        y + stencil.y_offset(k),
                        z + stencil.z_offset(k),
                    );
                    if let Some(j) = nb {
                        a[(i, j)] += stencil.weight(k) * inv_h2;
                    }
                }
            }
        }
    }
    Ok(a)
}
