//! The ordered level sequence plus the parameters shared by every level.
//!
//! Level 0 is the finest grid. Each coarser level has `(N - 1) / 2` interior
//! points per axis and twice the mesh spacing, so a fine extent of `2^k - 1`
//! yields perfectly nested grids down to a single interior point.

use crate::config::{CoarseSolve, GridParams, Mode};
use crate::error::MgError;
use crate::grid::LevelData;
use crate::operator::{Nonlinearity, Stencil};

/// Smallest interior extent a coarse level may have along any axis.
pub const MIN_COARSE_DIM: usize = 1;

/// Rule deciding how deep the hierarchy goes. Fixed once the hierarchy is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoarseningPolicy {
    pub min_dim: usize,
    pub max_levels: Option<usize>,
}

impl Default for CoarseningPolicy {
    fn default() -> Self {
        Self { min_dim: MIN_COARSE_DIM, max_levels: None }
    }
}

impl CoarseningPolicy {
    /// Interior extents of every level, finest first.
    pub fn level_dims(&self, finest: [usize; 3]) -> Vec<[usize; 3]> {
        let mut dims = vec![finest];
        loop {
            if self.max_levels.is_some_and(|max| dims.len() >= max) {
                break;
            }
            let next = dims[dims.len() - 1].map(|n| n.saturating_sub(1) / 2);
            if next.iter().any(|&n| n < self.min_dim.max(1)) {
                break;
            }
            dims.push(next);
        }
        dims
    }
}

/// Which finest-level field [`GridHierarchy::fill_interior`] writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Solution,
    Rhs,
}

#[derive(Debug, Clone)]
pub struct GridHierarchy {
    pub(crate) levels: Vec<LevelData>,
    /// Fixed at construction: every level's tap offsets are built from it.
    pub(crate) stencil: Stencil,
    pub omega: f64,
    pub nonlinearity: Nonlinearity,
    pub pre_smoothing: usize,
    pub post_smoothing: usize,
    pub maxiter: usize,
    pub tol: f64,
    pub mode: Mode,
    pub coarse_solve: CoarseSolve,
    pub num_threads: Option<usize>,
    policy: CoarseningPolicy,
}

impl GridHierarchy {
    /// Allocate every level for `params`. All fields start at zero.
    pub fn new(params: &GridParams) -> Result<Self, MgError> {
        params.validate()?;
        let policy = CoarseningPolicy {
            max_levels: params.max_levels,
            ..CoarseningPolicy::default()
        };
        let nonlinearity = params.nonlinearity();
        let levels: Vec<LevelData> = policy
            .level_dims(params.grid_dim)
            .into_iter()
            .enumerate()
            .map(|(i, dim)| {
                let h = params.h * (1u64 << i) as f64;
                log::debug!("level {i}: interior {dim:?}, h = {h:.6e}");
                LevelData::new(dim, h, &params.stencil, !nonlinearity.is_linear())
            })
            .collect();

        Ok(GridHierarchy {
            levels,
            stencil: params.stencil.clone(),
            omega: params.omega,
            nonlinearity,
            pre_smoothing: params.pre_smoothing,
            post_smoothing: params.post_smoothing,
            maxiter: params.maxiter,
            tol: params.tol,
            mode: params.mode,
            coarse_solve: params.coarse_solve,
            num_threads: params.num_threads,
            policy,
        })
    }

    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn stencil(&self) -> &Stencil {
        &self.stencil
    }

    pub fn is_linear(&self) -> bool {
        self.nonlinearity.is_linear()
    }

    pub fn policy(&self) -> CoarseningPolicy {
        self.policy
    }

    pub fn levels(&self) -> &[LevelData] {
        &self.levels
    }

    pub fn level(&self, i: usize) -> &LevelData {
        &self.levels[i]
    }

    pub fn level_mut(&mut self, i: usize) -> &mut LevelData {
        &mut self.levels[i]
    }

    pub fn finest(&self) -> &LevelData {
        &self.levels[0]
    }

    pub fn finest_mut(&mut self) -> &mut LevelData {
        &mut self.levels[0]
    }

    /// Level `i` and level `i + 1`, both mutable.
    pub fn pair_mut(&mut self, i: usize) -> (&mut LevelData, &mut LevelData) {
        let (head, tail) = self.levels.split_at_mut(i + 1);
        (&mut head[i], &mut tail[0])
    }

    /// Set the finest-level `v` or `f` at every interior cell to `g(x·h, y·h, z·h)`.
    /// Halo cells keep their zero value.
    pub fn fill_interior<G>(&mut self, kind: FieldKind, mut g: G)
    where
        G: FnMut(f64, f64, f64) -> f64,
    {
        let level = &mut self.levels[0];
        let h = level.h;
        let [nx, ny, nz] = level.level_dim;
        let field = match kind {
            FieldKind::Solution => &mut level.v,
            FieldKind::Rhs => &mut level.f,
        };
        for z in 1..=nz {
            for y in 1..=ny {
                for x in 1..=nx {
                    field.set(x, y, z, g(x as f64 * h, y as f64 * h, z as f64 * h));
                }
            }
        }
    }

    /// True when every halo cell of every field on every level is zero.
    pub fn halos_are_zero(&self) -> bool {
        self.levels.iter().all(LevelData::halos_are_zero)
    }
}
