//! One level of the grid hierarchy.

use crate::field::Field;
use crate::operator::Stencil;
use crate::parallel::ReductionShards;

/// Fields and geometry of a single grid level.
///
/// Every field has extent `level_dim + 2` per axis; the outer layer is a
/// Dirichlet-zero halo that no kernel writes.
#[derive(Debug, Clone)]
pub struct LevelData {
    /// Current iterate.
    pub v: Field,
    /// Right-hand side.
    pub f: Field,
    /// Residual, also used as workspace by the FAS assembly.
    pub r: Field,
    /// Correction interpolated from the next coarser level.
    pub e: Field,
    /// Restriction of the finer iterate (FAS only).
    pub rest_v: Option<Field>,
    pub(crate) level_dim: [usize; 3],
    pub(crate) h: f64,
    pub(crate) taps: Vec<isize>,
    pub(crate) shards: ReductionShards,
}

impl LevelData {
    pub fn new(level_dim: [usize; 3], h: f64, stencil: &Stencil, nonlinear: bool) -> Self {
        let [nx, ny, nz] = level_dim.map(|n| n + 2);
        let field = Field::new(nx, ny, nz);
        LevelData {
            v: field.clone(),
            f: field.clone(),
            r: field.clone(),
            rest_v: nonlinear.then(|| field.clone()),
            e: field,
            level_dim,
            h,
            taps: stencil.flat_offsets(nx, ny),
            shards: ReductionShards::new(nz),
        }
    }

    /// Interior extents `(Nx, Ny, Nz)`.
    pub fn level_dim(&self) -> [usize; 3] {
        self.level_dim
    }

    /// Padded extents `(Nx + 2, Ny + 2, Nz + 2)`.
    pub fn padded_dim(&self) -> [usize; 3] {
        self.level_dim.map(|n| n + 2)
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn num_interior(&self) -> usize {
        self.level_dim.iter().product()
    }

    /// True when the halo of every field is exactly zero.
    pub fn halos_are_zero(&self) -> bool {
        [&self.v, &self.f, &self.r, &self.e]
            .into_iter()
            .chain(self.rest_v.as_ref())
            .all(|field| field.halo_max_abs() == 0.0)
    }
}
