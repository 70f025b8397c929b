//! Owned rank-3 array with a flat, x-fastest layout.
//!
//! `Dense3D` stores `nx * ny * nz` values in one contiguous buffer indexed as
//! `idx = z * nx * ny + y * nx + x`. Extents are fixed at construction. The
//! multigrid levels allocate every field with a one-cell halo on each face,
//! so a level with `N` interior points per axis owns a `Dense3D` of extent
//! `N + 2` along that axis.

use num_traits::Float;
use std::ops::{AddAssign, Index, IndexMut, SubAssign};

#[derive(Clone, Debug, PartialEq)]
pub struct Dense3D<T> {
    dims: [usize; 3],
    values: Vec<T>,
}

/// Double precision field, the type every grid level stores.
pub type Field = Dense3D<f64>;

impl<T: Float> Dense3D<T> {
    /// Zero-filled field of extent `(nx, ny, nz)`.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self {
            dims: [nx, ny, nz],
            values: vec![T::zero(); nx * ny * nz],
        }
    }

    /// Build a field by evaluating `f(x, y, z)` at every cell.
    pub fn from_fn<F>(nx: usize, ny: usize, nz: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> T,
    {
        let mut field = Self::new(nx, ny, nz);
        for z in 0..nz {
            for y in 0..ny {
                for x in 0..nx {
                    field.set(x, y, z, f(x, y, z));
                }
            }
        }
        field
    }

    #[inline(always)]
    pub fn flat_index(&self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(
            x < self.dims[0] && y < self.dims[1] && z < self.dims[2],
            "index ({x}, {y}, {z}) out of range for extent {:?}",
            self.dims
        );
        (z * self.dims[0] * self.dims[1]) + (y * self.dims[0]) + x
    }

    #[inline(always)]
    pub fn get(&self, x: usize, y: usize, z: usize) -> T {
        self.values[self.flat_index(x, y, z)]
    }

    #[inline(always)]
    pub fn set(&mut self, x: usize, y: usize, z: usize, val: T) {
        let idx = self.flat_index(x, y, z);
        self.values[idx] = val;
    }

    pub fn fill(&mut self, val: T) {
        self.values.iter_mut().for_each(|v| *v = val);
    }

    pub fn xdim(&self) -> usize {
        self.dims[0]
    }

    pub fn ydim(&self) -> usize {
        self.dims[1]
    }

    pub fn zdim(&self) -> usize {
        self.dims[2]
    }

    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    pub fn flat_size(&self) -> usize {
        self.values.len()
    }

    /// Number of values in one z-plane (`nx * ny`).
    pub fn plane_len(&self) -> usize {
        self.dims[0] * self.dims[1]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Copy every value (halo included) from `other`.
    pub fn copy_from(&mut self, other: &Self) {
        assert_eq!(self.dims, other.dims, "extent mismatch in copy_from");
        self.values.copy_from_slice(&other.values);
    }

    /// Euclidean norm over the interior cells, halo excluded.
    pub fn interior_norm(&self) -> T {
        let mut sum = T::zero();
        self.for_each_interior(|_, _, _, v| sum = sum + v * v);
        sum.sqrt()
    }

    /// Largest absolute value over the interior cells.
    pub fn interior_max_abs(&self) -> T {
        let mut max = T::zero();
        self.for_each_interior(|_, _, _, v| max = max.max(v.abs()));
        max
    }

    /// Largest absolute value over the one-cell boundary layer.
    pub fn halo_max_abs(&self) -> T {
        let [nx, ny, nz] = self.dims;
        let mut max = T::zero();
        for z in 0..nz {
            for y in 0..ny {
                for x in 0..nx {
                    let on_halo = x == 0
                        || y == 0
                        || z == 0
                        || x + 1 == nx
                        || y + 1 == ny
                        || z + 1 == nz;
                    if on_halo {
                        max = max.max(self.get(x, y, z).abs());
                    }
                }
            }
        }
        max
    }

    fn for_each_interior<F: FnMut(usize, usize, usize, T)>(&self, mut f: F) {
        let [nx, ny, nz] = self.dims;
        for z in 1..nz.saturating_sub(1) {
            for y in 1..ny.saturating_sub(1) {
                for x in 1..nx.saturating_sub(1) {
                    f(x, y, z, self.get(x, y, z));
                }
            }
        }
    }
}

impl<T: Float> Index<(usize, usize, usize)> for Dense3D<T> {
    type Output = T;

    fn index(&self, (x, y, z): (usize, usize, usize)) -> &T {
        &self.values[self.flat_index(x, y, z)]
    }
}

impl<T: Float> IndexMut<(usize, usize, usize)> for Dense3D<T> {
    fn index_mut(&mut self, (x, y, z): (usize, usize, usize)) -> &mut T {
        let idx = self.flat_index(x, y, z);
        &mut self.values[idx]
    }
}

impl<T: Float> AddAssign<&Dense3D<T>> for Dense3D<T> {
    fn add_assign(&mut self, rhs: &Dense3D<T>) {
        assert_eq!(self.dims, rhs.dims, "extent mismatch in +=");
        for (a, &b) in self.values.iter_mut().zip(&rhs.values) {
            *a = *a + b;
        }
    }
}

impl<T: Float> SubAssign<&Dense3D<T>> for Dense3D<T> {
    fn sub_assign(&mut self, rhs: &Dense3D<T>) {
        assert_eq!(self.dims, rhs.dims, "extent mismatch in -=");
        for (a, &b) in self.values.iter_mut().zip(&rhs.values) {
            *a = *a - b;
        }
    }
}
