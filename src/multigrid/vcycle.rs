//! V-cycle orchestration, linear correction scheme and FAS.

use crate::error::MgError;
use crate::grid::{GridHierarchy, LevelData};
use crate::multigrid::residual::{apply_into, residual};
use crate::multigrid::smoother::jacobi;
use crate::multigrid::transfer::{interpolate, restrict};
use crate::solver::CoarseSolver;

const MISSING_REST_V: MgError = MgError::Unsupported("FAS on a level allocated without rest_v");

/// One V-cycle over `grid`. Returns the finest residual norm afterwards.
///
/// Downward leg, for every level but the coarsest: pre-smooth, compute the
/// residual, restrict it into the next level's `f`. The linear scheme then
/// zeroes the coarse iterate; FAS restricts the fine iterate into both `v`
/// and `rest_v` and adds `A(rest_v)` to the coarse `f`.
///
/// Upward leg: FAS first turns the coarse iterate into a correction by
/// subtracting `rest_v`; the correction is interpolated into the finer `e`,
/// added to `v`, and post-smoothed.
pub fn vcycle(grid: &mut GridHierarchy, coarse: &mut CoarseSolver) -> Result<f64, MgError> {
    let GridHierarchy {
        levels,
        stencil,
        omega,
        nonlinearity: op,
        pre_smoothing: pre,
        post_smoothing: post,
        ..
    } = grid;
    let (op, omega, pre, post) = (*op, *omega, *pre, *post);
    let n = levels.len();
    assert!(n > 0, "grid hierarchy has no levels");

    for l in 0..n - 1 {
        jacobi(&mut levels[l], stencil, op, omega, pre);
        residual(&mut levels[l], stencil, op);

        let (head, tail) = levels.split_at_mut(l + 1);
        let (fine, next) = (&head[l], &mut tail[0]);

        restrict(&fine.r, &mut next.f);

        if op.is_linear() {
            next.v.fill(0.0);
        } else {
            let LevelData { v, f, r, rest_v, taps, level_dim, h, .. } = next;
            let rest_v = rest_v.as_mut().ok_or(MISSING_REST_V)?;
            restrict(&fine.v, rest_v);
            restrict(&fine.v, v);
            // tau correction: f += A(rest_v), r serves as scratch
            apply_into(r, rest_v, stencil.values(), taps, *level_dim, *h, op);
            *f += &*r;
        }
    }

    coarse.solve(&mut levels[n - 1], stencil, op, omega, pre + post)?;

    for l in (1..n).rev() {
        let (head, tail) = levels.split_at_mut(l);
        let (fine, level) = (&mut head[l - 1], &mut tail[0]);

        if !op.is_linear() {
            let rest_v = level.rest_v.as_ref().ok_or(MISSING_REST_V)?;
            level.v -= rest_v;
        }

        interpolate(&level.v, &mut fine.e);
        fine.v += &fine.e;

        jacobi(fine, stencil, op, omega, post);
    }

    Ok(residual(&mut levels[0], stencil, op))
}
