//! Weighted (damped) Jacobi smoother.
//!
//! Each sweep recomputes the residual first, so the iterate a sweep leaves
//! behind is consistent with the residual it last reported. Linear update:
//!
//! `v ← v + ω (h² / w₀) r`
//!
//! Nonlinear update, one pointwise Newton step on the diagonal:
//!
//! `v ← v + ω r / (w₀ / h² + γ (1 + v) eᵛ)`

use crate::grid::LevelData;
use crate::multigrid::residual::residual;
use crate::operator::{Nonlinearity, Stencil};
use crate::parallel;

/// Run `sweeps` Jacobi sweeps on the interior of `level`.
pub fn jacobi(level: &mut LevelData, stencil: &Stencil, op: Nonlinearity, omega: f64, sweeps: usize) {
    let h2 = level.h * level.h;
    let pre_fac = stencil.center() / h2;
    let alpha = h2 / stencil.center();

    for _ in 0..sweeps {
        residual(level, stencil, op);

        let LevelData { v, r, level_dim, .. } = &mut *level;
        let [nx, ny, nz] = *level_dim;
        let row = nx + 2;
        let plane_len = v.plane_len();
        let r = r.as_slice();

        parallel::for_each_plane(v.as_mut_slice(), plane_len, |z, v_plane| {
            if z == 0 || z > nz {
                return;
            }
            let base = z * plane_len;
            for y in 1..=ny {
                for x in 1..=nx {
                    let local = y * row + x;
                    let old = v_plane[local];
                    let res = r[base + local];
                    v_plane[local] = match op {
                        Nonlinearity::Linear => old + omega * (alpha * res),
                        Nonlinearity::Exponential { .. } => {
                            old + omega * (res / (pre_fac + op.derivative(old)))
                        }
                    };
                }
            }
        });
    }
}
