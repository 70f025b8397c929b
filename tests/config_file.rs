//! Reading solver parameters from config files on disk.

use gmg3d::{GridHierarchy, GridParams, MgError, Mode, Nonlinearity, Stencil};
use std::fs;
use std::path::PathBuf;

/// Write `contents` to a fresh file under the system temp dir.
fn write_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("gmg3d-{}-{name}.conf", std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

const NONLINEAR: &str = "\
20 1e-10
15 15 15
1
3 1 0.8 2.5
6 -1 -1 -1 -1 -1 -1
0 -1 1 0 0 0 0
0 0 0 -1 1 0 0
0 0 0 0 0 -1 1
";

#[test]
fn reads_a_nonlinear_config() {
    let path = write_config("nonlinear", NONLINEAR);
    let params = GridParams::from_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(params.maxiter, 20);
    assert_eq!(params.tol, 1e-10);
    assert_eq!(params.grid_dim, [15, 15, 15]);
    assert_eq!(params.mode, Mode::Nonlinear);
    assert_eq!((params.pre_smoothing, params.post_smoothing), (3, 1));
    assert_eq!(params.omega, 0.8);
    assert_eq!(params.nonlinearity(), Nonlinearity::Exponential { gamma: 2.5 });
    assert_eq!(params.stencil, Stencil::seven_point_laplacian());
    assert_eq!(params.h, 1.0 / 16.0);

    let grid = GridHierarchy::new(&params).unwrap();
    assert_eq!(grid.num_levels(), 4);
    assert!(grid.levels().iter().all(|l| l.rest_v.is_some()));
}

/// Newton mode parses, and the hierarchy it implies is linear.
#[test]
fn newton_mode_builds_a_linear_hierarchy() {
    let text = NONLINEAR.replacen("\n1\n", "\n2\n", 1);
    let path = write_config("newton", &text);
    let params = GridParams::from_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(params.mode, Mode::Newton);
    let grid = GridHierarchy::new(&params).unwrap();
    assert!(grid.is_linear());
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("gmg3d-no-such-config.conf");
    assert!(matches!(GridParams::from_file(path), Err(MgError::Io(_))));
}

#[test]
fn stencil_with_bad_center_is_rejected() {
    let text = NONLINEAR.replacen("0 -1 1 0 0 0 0", "1 -1 0 0 0 0 0", 1);
    let path = write_config("bad-center", &text);
    let res = GridParams::from_file(&path);
    fs::remove_file(&path).unwrap();
    assert!(matches!(res, Err(MgError::InvalidStencil(_))));
}

#[test]
fn offsets_past_the_halo_are_rejected() {
    let text = NONLINEAR.replacen("0 0 0 0 0 -1 1", "0 0 0 0 0 -1 2", 1);
    let path = write_config("wide", &text);
    let res = GridParams::from_file(&path);
    fs::remove_file(&path).unwrap();
    assert!(matches!(res, Err(MgError::InvalidStencil(_))));
}
