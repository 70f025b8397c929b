//! Residual and operator application kernels.
//!
//! Both kernels evaluate `A(v) = (Σᵢ wᵢ v[p + oᵢ]) / h² + N(v[p])` at every
//! interior point `p`, reading the halo through the stencil offsets. They
//! write one output field, split into z-planes across threads.

use crate::field::Field;
use crate::grid::LevelData;
use crate::operator::{Nonlinearity, Stencil};
use crate::parallel;

const STENCIL_MISMATCH: &str = "stencil does not match the level's tap offsets";

#[inline(always)]
pub(crate) fn stencil_sum(weights: &[f64], taps: &[isize], v: &[f64], id: usize) -> f64 {
    let mut sum = 0.0;
    for (&w, &off) in weights.iter().zip(taps) {
        sum += w * v[(id as isize + off) as usize];
    }
    sum
}

/// Store `r = f - A(v)` on the interior of `level` and return `‖r‖₂`.
pub fn residual(level: &mut LevelData, stencil: &Stencil, op: Nonlinearity) -> f64 {
    let LevelData { v, f, r, taps, shards, level_dim, h, .. } = level;
    assert_eq!(taps.len(), stencil.len(), "{}", STENCIL_MISMATCH);
    let [nx, ny, nz] = *level_dim;
    let row = nx + 2;
    let plane_len = r.plane_len();
    let inv_h2 = 1.0 / (*h * *h);
    let weights = stencil.values();
    let taps: &[isize] = taps;
    let (v, f) = (v.as_slice(), f.as_slice());

    let sum = parallel::for_each_plane_sum(r.as_mut_slice(), plane_len, shards, |z, r_plane| {
        if z == 0 || z > nz {
            return 0.0;
        }
        let base = z * plane_len;
        let mut acc = 0.0;
        for y in 1..=ny {
            for x in 1..=nx {
                let local = y * row + x;
                let id = base + local;
                let mut s = stencil_sum(weights, taps, v, id) * inv_h2;
                if !op.is_linear() {
                    s += op.value(v[id]);
                }
                let res = f[id] - s;
                r_plane[local] = res;
                acc += res * res;
            }
        }
        acc
    });
    sum.sqrt()
}

/// `out = A(v_in)` on the interior points of a level with the given geometry.
pub(crate) fn apply_into(
    out: &mut Field,
    v_in: &Field,
    weights: &[f64],
    taps: &[isize],
    level_dim: [usize; 3],
    h: f64,
    op: Nonlinearity,
) {
    assert_eq!(out.dims(), v_in.dims(), "extent mismatch in apply_stencil");
    assert_eq!(taps.len(), weights.len(), "{}", STENCIL_MISMATCH);
    let [nx, ny, nz] = level_dim;
    let row = nx + 2;
    let plane_len = out.plane_len();
    let inv_h2 = 1.0 / (h * h);
    let v = v_in.as_slice();

    parallel::for_each_plane(out.as_mut_slice(), plane_len, |z, out_plane| {
        if z == 0 || z > nz {
            return;
        }
        let base = z * plane_len;
        for y in 1..=ny {
            for x in 1..=nx {
                let local = y * row + x;
                let id = base + local;
                out_plane[local] = stencil_sum(weights, taps, v, id) * inv_h2 + op.value(v[id]);
            }
        }
    });
}

/// Write `A(v_in)` into `level.r`. FAS uses this to build the coarse right-hand side.
pub fn apply_stencil(level: &mut LevelData, stencil: &Stencil, op: Nonlinearity, v_in: &Field) {
    let LevelData { r, taps, level_dim, h, .. } = level;
    apply_into(r, v_in, stencil.values(), taps, *level_dim, *h, op);
}
