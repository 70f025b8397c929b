//! Solver parameters and the plain-text config format.
//!
//! The config file is a sequence of whitespace-separated scalars in a fixed
//! order:
//!
//! ```text
//! maxiter tol nx ny nz mode pre post omega gamma
//! w_0 .. w_{N-1}  dx_0 .. dx_{N-1}  dy_0 .. dy_{N-1}  dz_0 .. dz_{N-1}
//! ```
//!
//! `mode` is 0 (linear), 1 (nonlinear) or 2 (newton). The stencil length `N`
//! is whatever the remaining token count divided by four gives. The mesh
//! spacing is derived as `h = 1 / (ny + 1)`.

use crate::error::MgError;
use crate::operator::{Nonlinearity, Stencil};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Problem mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `A v = f` with the stencil operator alone.
    Linear,
    /// `A v + γ v exp(v) = f`, solved with FAS.
    Nonlinear,
    /// Linear multigrid driven by an outer Newton loop supplied by the caller.
    Newton,
}

impl Mode {
    pub fn from_code(code: i64) -> Result<Self, MgError> {
        match code {
            0 => Ok(Mode::Linear),
            1 => Ok(Mode::Nonlinear),
            2 => Ok(Mode::Newton),
            other => Err(MgError::InvalidMode(other)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Linear => write!(f, "linear"),
            Mode::Nonlinear => write!(f, "nonlinear"),
            Mode::Newton => write!(f, "newton"),
        }
    }
}

/// How the coarsest level is treated inside a V-cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoarseSolve {
    /// `pre + post` Jacobi sweeps.
    #[default]
    Smoothing,
    /// Dense LU of the coarsest operator (linear operators only).
    DirectLu,
}

#[derive(Debug, Clone)]
pub struct GridParams {
    /// Number of V-cycles the outer loop runs.
    pub maxiter: usize,
    /// Reporting tolerance on the finest residual norm. Never ends a solve early.
    pub tol: f64,
    /// Interior extents of the finest level.
    pub grid_dim: [usize; 3],
    pub mode: Mode,
    pub pre_smoothing: usize,
    pub post_smoothing: usize,
    /// Jacobi relaxation factor ω.
    pub omega: f64,
    /// Coupling γ of the `γ v exp(v)` term.
    pub gamma: f64,
    pub stencil: Stencil,
    /// Finest mesh spacing.
    pub h: f64,
    pub coarse_solve: CoarseSolve,
    /// Upper bound on the hierarchy depth; `None` coarsens as far as possible.
    pub max_levels: Option<usize>,
    /// Worker threads for the kernels; `None` uses every logical core.
    pub num_threads: Option<usize>,
}

impl GridParams {
    /// Linear defaults: 10 cycles, ν₁ = ν₂ = 2, ω = 1, γ = 0.
    pub fn new(grid_dim: [usize; 3], stencil: Stencil) -> Self {
        Self {
            maxiter: 10,
            tol: 1e-8,
            grid_dim,
            mode: Mode::Linear,
            pre_smoothing: 2,
            post_smoothing: 2,
            omega: 1.0,
            gamma: 0.0,
            stencil,
            h: 1.0 / (grid_dim[1] as f64 + 1.0),
            coarse_solve: CoarseSolve::Smoothing,
            max_levels: None,
            num_threads: None,
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = maxiter;
        self
    }

    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    pub fn with_smoothing(mut self, pre: usize, post: usize) -> Self {
        self.pre_smoothing = pre;
        self.post_smoothing = post;
        self
    }

    pub fn with_omega(mut self, omega: f64) -> Self {
        self.omega = omega;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_coarse_solve(mut self, coarse_solve: CoarseSolve) -> Self {
        self.coarse_solve = coarse_solve;
        self
    }

    pub fn with_max_levels(mut self, max_levels: usize) -> Self {
        self.max_levels = Some(max_levels);
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Pointwise term implied by the mode. Newton steps are linear solves.
    pub fn nonlinearity(&self) -> Nonlinearity {
        match self.mode {
            Mode::Nonlinear => Nonlinearity::Exponential { gamma: self.gamma },
            Mode::Linear | Mode::Newton => Nonlinearity::Linear,
        }
    }

    pub fn validate(&self) -> Result<(), MgError> {
        if self.grid_dim.iter().any(|&n| n == 0) {
            return Err(MgError::InvalidGrid(format!(
                "grid extents must be positive, got {:?}",
                self.grid_dim
            )));
        }
        if !(self.h.is_finite() && self.h > 0.0) {
            return Err(MgError::InvalidParameter(format!("mesh spacing h = {}", self.h)));
        }
        if !(self.omega.is_finite() && self.omega > 0.0) {
            return Err(MgError::InvalidParameter(format!("omega = {}", self.omega)));
        }
        if !self.gamma.is_finite() {
            return Err(MgError::InvalidParameter(format!("gamma = {}", self.gamma)));
        }
        if self.max_levels == Some(0) {
            return Err(MgError::InvalidParameter("max_levels must be at least 1".into()));
        }
        if self.num_threads == Some(0) {
            return Err(MgError::InvalidParameter("thread count must be positive".into()));
        }
        if self.coarse_solve == CoarseSolve::DirectLu && self.mode == Mode::Nonlinear {
            return Err(MgError::Unsupported("direct coarse solve of a nonlinear operator"));
        }
        // Stencil invariants are enforced by its constructors.
        Ok(())
    }

    /// Read and parse a config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MgError> {
        let text = std::fs::read_to_string(path)?;
        text.parse()
    }
}

struct Tokens<I> {
    inner: I,
}

impl<'a, I: Iterator<Item = &'a str>> Tokens<I> {
    fn next<T: FromStr>(&mut self, field: &'static str) -> Result<T, MgError> {
        let token = self.inner.next().ok_or_else(|| MgError::Parse {
            field,
            token: "<end of input>".into(),
        })?;
        token.parse().map_err(|_| MgError::Parse {
            field,
            token: token.to_string(),
        })
    }
}

impl FromStr for GridParams {
    type Err = MgError;

    fn from_str(text: &str) -> Result<Self, MgError> {
        let mut tok = Tokens { inner: text.split_whitespace() };
        let maxiter = tok.next("maxiter")?;
        let tol = tok.next("tol")?;
        let grid_dim = [tok.next("gridDim[0]")?, tok.next("gridDim[1]")?, tok.next("gridDim[2]")?];
        let mode = Mode::from_code(tok.next("mode")?)?;
        let pre_smoothing = tok.next("preSmoothing")?;
        let post_smoothing = tok.next("postSmoothing")?;
        let omega = tok.next("omega")?;
        let gamma = tok.next("gamma")?;

        let rest: Vec<&str> = tok.inner.by_ref().collect();
        if rest.is_empty() || rest.len() % 4 != 0 {
            return Err(MgError::InvalidStencil(format!(
                "expected 4*N stencil tokens, found {}",
                rest.len()
            )));
        }
        let n = rest.len() / 4;
        let mut tok = Tokens { inner: rest.into_iter() };
        let values = (0..n).map(|_| tok.next("stencil value")).collect::<Result<Vec<f64>, _>>()?;
        let dx = (0..n).map(|_| tok.next("stencil dx")).collect::<Result<Vec<i64>, _>>()?;
        let dy = (0..n).map(|_| tok.next("stencil dy")).collect::<Result<Vec<i64>, _>>()?;
        let dz = (0..n).map(|_| tok.next("stencil dz")).collect::<Result<Vec<i64>, _>>()?;
        let stencil = Stencil::from_parts(values, dx, dy, dz)?;

        let params = GridParams::new(grid_dim, stencil)
            .with_maxiter(maxiter)
            .with_tol(tol)
            .with_mode(mode)
            .with_smoothing(pre_smoothing, post_smoothing)
            .with_omega(omega)
            .with_gamma(gamma);
        params.validate()?;
        Ok(params)
    }
}
