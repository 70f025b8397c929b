//! Fixed short-range stencils defining the discrete operator.
//!
//! A stencil is an ordered list of `(weight, (dx, dy, dz))` entries. Entry 0
//! is the center `(0, 0, 0)`; its weight is the diagonal coefficient the
//! Jacobi smoother divides by. Offsets may not reach past the one-cell halo.

use crate::error::MgError;
use std::fmt;

/// Halo width every level carries; stencil offsets are bounded by it.
pub const HALO: i64 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct Stencil {
    values: Vec<f64>,
    offsets: Vec<(i64, i64, i64)>,
}

impl Stencil {
    /// Build from `(weight, offset)` entries.
    ///
    /// # Panics
    /// Panics if the list is empty, entry 0 is not the center, or an offset
    /// exceeds the halo width. Use [`Stencil::from_parts`] for untrusted input.
    pub fn new(entries: Vec<(f64, (i64, i64, i64))>) -> Self {
        let (values, offsets): (Vec<_>, Vec<_>) = entries.into_iter().unzip();
        let stencil = Self { values, offsets };
        if let Err(e) = stencil.check() {
            panic!("{e}");
        }
        stencil
    }

    /// Build from the four parallel arrays of the config format.
    pub fn from_parts(
        values: Vec<f64>,
        dx: Vec<i64>,
        dy: Vec<i64>,
        dz: Vec<i64>,
    ) -> Result<Self, MgError> {
        let n = values.len();
        if dx.len() != n || dy.len() != n || dz.len() != n {
            return Err(MgError::InvalidStencil(format!(
                "{} weights but {}/{}/{} offsets",
                n,
                dx.len(),
                dy.len(),
                dz.len()
            )));
        }
        let offsets = dx
            .into_iter()
            .zip(dy)
            .zip(dz)
            .map(|((x, y), z)| (x, y, z))
            .collect();
        let stencil = Self { values, offsets };
        stencil.check()?;
        Ok(stencil)
    }

    /// Standard 7-point Laplacian `-Δ`: 6 at the center, -1 on each face neighbour.
    pub fn seven_point_laplacian() -> Self {
        Self::new(vec![
            (6.0, (0, 0, 0)),
            (-1.0, (-1, 0, 0)),
            (-1.0, (1, 0, 0)),
            (-1.0, (0, -1, 0)),
            (-1.0, (0, 1, 0)),
            (-1.0, (0, 0, -1)),
            (-1.0, (0, 0, 1)),
        ])
    }

    fn check(&self) -> Result<(), MgError> {
        if self.values.is_empty() {
            return Err(MgError::InvalidStencil("stencil has no entries".into()));
        }
        if self.offsets[0] != (0, 0, 0) {
            return Err(MgError::InvalidStencil(format!(
                "entry 0 must be the center, found offset {:?}",
                self.offsets[0]
            )));
        }
        if self.values[0] == 0.0 {
            return Err(MgError::InvalidStencil("center weight is zero".into()));
        }
        if let Some(off) = self
            .offsets
            .iter()
            .find(|(x, y, z)| x.abs() > HALO || y.abs() > HALO || z.abs() > HALO)
        {
            return Err(MgError::InvalidStencil(format!(
                "offset {off:?} reaches past the halo"
            )));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn weight(&self, i: usize) -> f64 {
        self.values[i]
    }

    /// Diagonal coefficient (entry 0).
    pub fn center(&self) -> f64 {
        self.values[0]
    }

    pub fn x_offset(&self, i: usize) -> i64 {
        self.offsets[i].0
    }

    pub fn y_offset(&self, i: usize) -> i64 {
        self.offsets[i].1
    }

    pub fn z_offset(&self, i: usize) -> i64 {
        self.offsets[i].2
    }

    /// Offsets flattened for a padded field of x-extent `nx` and y-extent `ny`.
    pub fn flat_offsets(&self, nx: usize, ny: usize) -> Vec<isize> {
        let (nx, plane) = (nx as isize, (nx * ny) as isize);
        self.offsets
            .iter()
            .map(|&(dx, dy, dz)| dz as isize * plane + dy as isize * nx + dx as isize)
            .collect()
    }
}

impl fmt::Display for Stencil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stencil(n={}, center={})", self.len(), self.center())
    }
}
