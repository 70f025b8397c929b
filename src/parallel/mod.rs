//! Shared-memory loop helpers for the grid kernels.
//!
//! Every hot kernel writes one output field and reads others, so the output
//! is split into disjoint z-planes and each plane is handed to one task.
//! With the `rayon` feature the planes run on the current rayon pool in
//! blocks of at least [`PLANES_PER_TASK`]; without it they run in order on
//! the calling thread. Both paths produce bitwise identical results.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

pub mod shards;
pub use shards::{ReductionShards, SHARD_STRIDE};

#[cfg(feature = "rayon")]
pub mod rayon_pool;
#[cfg(feature = "rayon")]
pub use rayon_pool::SolverPool;

#[cfg(not(feature = "rayon"))]
mod serial_pool;
#[cfg(not(feature = "rayon"))]
pub use serial_pool::SolverPool;

/// Minimum number of z-planes a task takes.
pub const PLANES_PER_TASK: usize = 8;

/// Run `op(z, plane)` on every z-plane of `out`.
pub fn for_each_plane<F>(out: &mut [f64], plane_len: usize, op: F)
where
    F: Fn(usize, &mut [f64]) + Send + Sync,
{
    #[cfg(feature = "rayon")]
    out.par_chunks_mut(plane_len)
        .enumerate()
        .with_min_len(PLANES_PER_TASK)
        .for_each(|(z, plane)| op(z, plane));
    #[cfg(not(feature = "rayon"))]
    out.chunks_mut(plane_len)
        .enumerate()
        .for_each(|(z, plane)| op(z, plane));
}

/// Run `op(z, plane)` on every z-plane of `out`, store each plane's partial
/// result in its own padded shard and return the in-order sum.
pub fn for_each_plane_sum<F>(
    out: &mut [f64],
    plane_len: usize,
    shards: &mut ReductionShards,
    op: F,
) -> f64
where
    F: Fn(usize, &mut [f64]) -> f64 + Send + Sync,
{
    assert_eq!(
        out.len() / plane_len,
        shards.len(),
        "reduction shards do not match plane count"
    );
    #[cfg(feature = "rayon")]
    out.par_chunks_mut(plane_len)
        .zip(shards.slots_mut().par_chunks_mut(SHARD_STRIDE))
        .enumerate()
        .with_min_len(PLANES_PER_TASK)
        .for_each(|(z, (plane, slot))| slot[0] = op(z, plane));
    #[cfg(not(feature = "rayon"))]
    out.chunks_mut(plane_len)
        .zip(shards.slots_mut().chunks_mut(SHARD_STRIDE))
        .enumerate()
        .for_each(|(z, (plane, slot))| slot[0] = op(z, plane));
    shards.sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planes_are_visited_once() {
        let plane_len = 6;
        let mut out = vec![0.0; plane_len * 20];
        for_each_plane(&mut out, plane_len, |z, plane| {
            plane.iter_mut().for_each(|v| *v += z as f64);
        });
        for (i, v) in out.iter().enumerate() {
            assert_eq!(*v, (i / plane_len) as f64);
        }
    }

    #[test]
    fn plane_sum_is_ordered() {
        let plane_len = 4;
        let mut out = vec![1.0; plane_len * 17];
        let mut shards = ReductionShards::new(17);
        let total = for_each_plane_sum(&mut out, plane_len, &mut shards, |z, plane| {
            plane.iter().sum::<f64>() * z as f64
        });
        assert_eq!(total, 4.0 * (0..17).sum::<usize>() as f64);
    }
}
