//! Command-line front end: `gmg3d path/to/config.conf`
//!
//! Solves with `f ≡ 1` and a zero initial guess on the finest interior and
//! logs the residual of every V-cycle. Set `RUST_LOG=debug` for the level
//! layout.

use gmg3d::{FieldKind, GridHierarchy, GridParams, MgError, Mode};
use std::path::PathBuf;
use std::process::ExitCode;

fn run(path: PathBuf) -> Result<(), MgError> {
    let params = GridParams::from_file(&path)?;
    log::info!("Using config file {}", path.display());

    match params.mode {
        Mode::Linear => log::info!("Solving linear problem"),
        Mode::Nonlinear => log::info!("Solving nonlinear problem"),
        Mode::Newton => return Err(MgError::Unsupported("newton mode needs an outer newton driver")),
    }

    let mut grid = GridHierarchy::new(&params)?;
    grid.fill_interior(FieldKind::Rhs, |_, _, _| 1.0);

    let stats = gmg3d::solve(&mut grid)?;
    println!(
        "iterations: {} initial residual: {:.6e} final residual: {:.6e} converged: {}",
        stats.iterations, stats.initial_residual, stats.final_residual, stats.converged
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(arg) = std::env::args_os().nth(1) else {
        eprintln!("Missing config file. Usage: gmg3d path/to/config.conf");
        return ExitCode::FAILURE;
    };
    let path = PathBuf::from(arg);
    if !path.is_file() {
        eprintln!("{} does not exist or is not a file", path.display());
        return ExitCode::FAILURE;
    }

    match run(path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
