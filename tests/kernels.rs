//! Kernel-level checks for residual, restriction and interpolation.
//!
//! The residual kernel is compared against a direct cell-by-cell evaluation
//! of the stencil on random data; the transfer operators are checked on
//! fields they must reproduce exactly (constants and affine functions).

use approx::{assert_abs_diff_eq, assert_relative_eq};
use gmg3d::multigrid::{apply_stencil, interpolate, residual, restrict};
use gmg3d::{Field, LevelData, Nonlinearity, Stencil};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A 27-point stencil with distinct weights, so a transposed offset would show up.
fn box_stencil() -> Stencil {
    let mut entries = vec![(30.0, (0, 0, 0))];
    for dz in -1..=1i64 {
        for dy in -1..=1i64 {
            for dx in -1..=1i64 {
                if (dx, dy, dz) != (0, 0, 0) {
                    let w = -1.0 - 0.1 * (dx + 3 * dy + 9 * dz) as f64;
                    entries.push((w, (dx, dy, dz)));
                }
            }
        }
    }
    Stencil::new(entries)
}

/// Random interior values, zero halo.
fn random_interior(dim: [usize; 3], rng: &mut StdRng) -> Field {
    let [nx, ny, nz] = dim;
    Field::from_fn(nx + 2, ny + 2, nz + 2, |x, y, z| {
        let inside = (1..=nx).contains(&x) && (1..=ny).contains(&y) && (1..=nz).contains(&z);
        if inside { rng.gen_range(-1.0..1.0) } else { 0.0 }
    })
}

/// `A(v)` at one interior cell, evaluated straight from the stencil entries.
fn reference_apply(stencil: &Stencil, op: Nonlinearity, v: &Field, h: f64, (x, y, z): (usize, usize, usize)) -> f64 {
    let mut sum = 0.0;
    for k in 0..stencil.len() {
        let xi = (x as i64 + stencil.x_offset(k)) as usize;
        let yi = (y as i64 + stencil.y_offset(k)) as usize;
        let zi = (z as i64 + stencil.z_offset(k)) as usize;
        sum += stencil.weight(k) * v.get(xi, yi, zi);
    }
    sum / (h * h) + op.value(v.get(x, y, z))
}

/// Residual on an anisotropic level matches the direct evaluation, for both
/// the linear and the exponential operator.
#[test]
fn residual_matches_direct_evaluation() {
    let mut rng = StdRng::seed_from_u64(7);
    let dim = [13, 9, 11];
    let h = 0.1;
    for (stencil, op) in [
        (Stencil::seven_point_laplacian(), Nonlinearity::Linear),
        (box_stencil(), Nonlinearity::Exponential { gamma: 0.5 }),
    ] {
        let mut level = LevelData::new(dim, h, &stencil, !op.is_linear());
        level.v = random_interior(dim, &mut rng);
        level.f = random_interior(dim, &mut rng);
        let norm = residual(&mut level, &stencil, op);

        let mut sq = 0.0;
        for z in 1..=dim[2] {
            for y in 1..=dim[1] {
                for x in 1..=dim[0] {
                    let expected = level.f.get(x, y, z) - reference_apply(&stencil, op, &level.v, h, (x, y, z));
                    assert_relative_eq!(level.r.get(x, y, z), expected, epsilon = 1e-9, max_relative = 1e-12);
                    sq += expected * expected;
                }
            }
        }
        assert_relative_eq!(norm, sq.sqrt(), max_relative = 1e-12);
        assert!(level.halos_are_zero());
    }
}

/// Residual of `f = A(v)` vanishes when `f` comes from `apply_stencil`.
#[test]
fn apply_stencil_is_consistent_with_residual() {
    let mut rng = StdRng::seed_from_u64(11);
    let stencil = box_stencil();
    let op = Nonlinearity::Exponential { gamma: 1.0 };
    let dim = [7, 7, 7];
    let mut level = LevelData::new(dim, 0.125, &stencil, true);
    let v = random_interior(dim, &mut rng);
    apply_stencil(&mut level, &stencil, op, &v);
    level.f.copy_from(&level.r);
    level.v = v;
    let norm = residual(&mut level, &stencil, op);
    assert_abs_diff_eq!(norm, 0.0, epsilon = 1e-9);
}

/// Restricting a constant fine field reproduces the constant on every
/// coarse interior cell and leaves the coarse halo untouched.
#[test]
fn restriction_preserves_constants() {
    let mut fine = Field::new(17, 17, 17);
    fine.fill(3.5);
    let mut coarse = Field::new(9, 9, 9);
    restrict(&fine, &mut coarse);
    for z in 1..8 {
        for y in 1..8 {
            for x in 1..8 {
                assert_abs_diff_eq!(coarse.get(x, y, z), 3.5, epsilon = 1e-12);
            }
        }
    }
    assert_eq!(coarse.halo_max_abs(), 0.0);
}

/// Interior-only constant: nested sizes keep the restriction stencil off the
/// fine halo, so the result is still exact.
#[test]
fn restriction_of_interior_constant_on_nested_grids() {
    let fine = Field::from_fn(33, 33, 33, |x, y, z| {
        if (1..=31).contains(&x) && (1..=31).contains(&y) && (1..=31).contains(&z) { 3.5 } else { 0.0 }
    });
    let mut coarse = Field::new(17, 17, 17);
    restrict(&fine, &mut coarse);
    assert_abs_diff_eq!(coarse.interior_max_abs(), 3.5, epsilon = 1e-12);
    assert_abs_diff_eq!(coarse.get(1, 1, 1), 3.5, epsilon = 1e-12);
    assert_abs_diff_eq!(coarse.get(15, 15, 15), 3.5, epsilon = 1e-12);
}

/// Trilinear interpolation of an affine coarse field is exact at every fine
/// cell enclosed by coarse interior nodes. Cells next to the halo average
/// against the zero boundary instead.
#[test]
fn interpolation_reproduces_affine_fields() {
    let coarse = Field::from_fn(9, 9, 9, |i, j, k| (i + 2 * j + 3 * k) as f64);
    let mut fine = Field::new(17, 17, 17);
    interpolate(&coarse, &mut fine);
    for z in 2..15 {
        for y in 2..15 {
            for x in 2..15 {
                let expected = (x + 2 * y + 3 * z) as f64 / 2.0;
                assert_abs_diff_eq!(fine.get(x, y, z), expected, epsilon = 1e-12);
            }
        }
    }
}

/// A coarse field with a zero halo interpolates to a fine field with a zero halo.
#[test]
fn interpolation_keeps_zero_halo() {
    let mut rng = StdRng::seed_from_u64(3);
    let coarse = random_interior([7, 7, 7], &mut rng);
    let mut fine = Field::new(17, 17, 17);
    interpolate(&coarse, &mut fine);
    assert_eq!(fine.halo_max_abs(), 0.0);
    assert_eq!(fine.get(4, 6, 8), coarse.get(2, 3, 4));
}

/// Even with a nonzero coarse halo the fine halo stays untouched.
#[test]
fn interpolation_leaves_fine_halo_alone() {
    let coarse = Field::from_fn(9, 9, 9, |i, j, k| (1 + i + 2 * j + 3 * k) as f64);
    let mut fine = Field::new(17, 17, 17);
    interpolate(&coarse, &mut fine);
    assert_eq!(fine.halo_max_abs(), 0.0);
    assert!(fine.interior_max_abs() > 0.0);
}
