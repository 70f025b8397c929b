//! Inter-grid transfer: full-weighting restriction and trilinear interpolation.
//!
//! Coarse interior point `X` sits on fine point `2X`; the halos at `0` and
//! `N + 1` line up when the fine extent is odd.

use crate::field::Field;
use crate::parallel;

/// Per-axis hat weights `(2 - |t|) / 2` for `t = -1, 0, 1`.
const HAT: [f64; 3] = [0.5, 1.0, 0.5];
/// Normalization making the 27 weights sum to one.
const NORM: f64 = 0.125;

/// Full-weighting restriction of `fine` onto the interior of `coarse`.
/// Coarse halo cells are not written.
pub fn restrict(fine: &Field, coarse: &mut Field) {
    let [cx, cy, cz] = coarse.dims();
    debug_assert!(
        2 * (cx - 1) <= fine.xdim() && 2 * (cy - 1) <= fine.ydim() && 2 * (cz - 1) <= fine.zdim(),
        "coarse extent {:?} does not fit fine extent {:?}",
        coarse.dims(),
        fine.dims()
    );
    let row = cx;
    let plane_len = coarse.plane_len();

    parallel::for_each_plane(coarse.as_mut_slice(), plane_len, |zc, plane| {
        if zc == 0 || zc + 1 >= cz {
            return;
        }
        let zf = 2 * zc;
        for yc in 1..cy - 1 {
            let yf = 2 * yc;
            for xc in 1..cx - 1 {
                let xf = 2 * xc;
                let mut value = 0.0;
                for (k, wk) in HAT.iter().enumerate() {
                    for (j, wj) in HAT.iter().enumerate() {
                        for (i, wi) in HAT.iter().enumerate() {
                            let fac = NORM * wi * wj * wk;
                            value += fac * fine.get(xf + i - 1, yf + j - 1, zf + k - 1);
                        }
                    }
                }
                plane[yc * row + xc] = value;
            }
        }
    });
}

/// Trilinear interpolation of `coarse` into `fine`.
///
/// Runs four dependent passes in order: injection at even fine indices,
/// then midpoints along x, y and z. Each pass reads values the previous
/// ones wrote, so the passes stay sequential. Only interior cells of `fine`
/// are written; its halo is read as the Dirichlet zero and must be zero.
pub fn interpolate(coarse: &Field, fine: &mut Field) {
    let [fx, fy, fz] = fine.dims();
    debug_assert!(
        (fx - 2) / 2 < coarse.xdim() && (fy - 2) / 2 < coarse.ydim() && (fz - 2) / 2 < coarse.zdim(),
        "fine extent {:?} reaches past coarse extent {:?}",
        fine.dims(),
        coarse.dims()
    );

    // injection
    for z in (2..fz - 1).step_by(2) {
        for y in (2..fy - 1).step_by(2) {
            for x in (2..fx - 1).step_by(2) {
                fine.set(x, y, z, coarse.get(x / 2, y / 2, z / 2));
            }
        }
    }

    // x-direction
    for z in (2..fz - 1).step_by(2) {
        for y in (2..fy - 1).step_by(2) {
            for x in (0..fx.saturating_sub(2)).step_by(2) {
                let val = 0.5 * fine.get(x, y, z) + 0.5 * fine.get(x + 2, y, z);
                fine.set(x + 1, y, z, val);
            }
        }
    }

    // y-direction
    for z in (2..fz - 1).step_by(2) {
        for y in (0..fy.saturating_sub(2)).step_by(2) {
            for x in 1..fx - 1 {
                let val = 0.5 * fine.get(x, y, z) + 0.5 * fine.get(x, y + 2, z);
                fine.set(x, y + 1, z, val);
            }
        }
    }

    // z-direction
    for z in (0..fz.saturating_sub(2)).step_by(2) {
        for y in 1..fy - 1 {
            for x in 1..fx - 1 {
                let val = 0.5 * fine.get(x, y, z) + 0.5 * fine.get(x, y, z + 2);
                fine.set(x, y, z + 1, val);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn hat_weights_sum_to_one() {
        let total: f64 = HAT.iter().sum::<f64>().powi(3) * NORM;
        assert_eq!(total, 1.0);
    }

    #[test]
    fn restriction_of_a_point_spreads_hat_weights() {
        let mut fine = Field::new(9, 9, 9);
        fine.set(4, 4, 4, 1.0);
        let mut coarse = Field::new(5, 5, 5);
        restrict(&fine, &mut coarse);
        assert_abs_diff_eq!(coarse.get(2, 2, 2), 0.125, epsilon = 1e-15);
        // coarse (2,2,1) gathers fine z in 1..=3 only
        assert_eq!(coarse.get(2, 2, 1), 0.0);
        assert_eq!(coarse.halo_max_abs(), 0.0);
    }

    #[test]
    fn injection_copies_coarse_nodes() {
        let coarse = Field::from_fn(5, 5, 5, |x, y, z| {
            if (1..4).contains(&x) && (1..4).contains(&y) && (1..4).contains(&z) {
                (x + 10 * y + 100 * z) as f64
            } else {
                0.0
            }
        });
        let mut fine = Field::new(9, 9, 9);
        interpolate(&coarse, &mut fine);
        assert_eq!(fine.get(2, 4, 6), coarse.get(1, 2, 3));
        assert_abs_diff_eq!(fine.get(3, 4, 6), 0.5 * (coarse.get(1, 2, 3) + coarse.get(2, 2, 3)), epsilon = 1e-12);
        assert_eq!(fine.halo_max_abs(), 0.0);
    }

    #[test]
    fn interpolation_never_writes_the_fine_halo() {
        // nonzero coarse halo would leak into the fine halo through injection
        let coarse = Field::from_fn(5, 5, 5, |x, y, z| 1.0 + (x + y + z) as f64);
        let mut fine = Field::new(9, 9, 9);
        interpolate(&coarse, &mut fine);
        assert_eq!(fine.halo_max_abs(), 0.0);
        assert_eq!(fine.get(2, 2, 2), coarse.get(1, 1, 1));
        // next to the halo the zero boundary value enters the average
        assert_abs_diff_eq!(fine.get(1, 2, 2), 0.5 * coarse.get(1, 1, 1), epsilon = 1e-12);
    }
}
