//! Padded partial-sum buffer for parallel reductions.
//!
//! One contiguous array, one slot per z-plane, slots `SHARD_STRIDE` doubles
//! apart so no two writers ever share a cache line. Summation walks the
//! slots in plane order, which keeps the result independent of how planes
//! were distributed over threads.

pub const CACHE_LINE_SIZE: usize = 64;
pub const SHARD_STRIDE: usize = CACHE_LINE_SIZE / std::mem::size_of::<f64>();

#[derive(Debug, Clone)]
pub struct ReductionShards {
    slots: Vec<f64>,
}

impl ReductionShards {
    pub fn new(count: usize) -> Self {
        Self { slots: vec![0.0; count * SHARD_STRIDE] }
    }

    /// Number of shards.
    pub fn len(&self) -> usize {
        self.slots.len() / SHARD_STRIDE
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [f64] {
        &mut self.slots
    }

    pub fn sum(&self) -> f64 {
        self.slots.iter().step_by(SHARD_STRIDE).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_is_one_cache_line() {
        assert_eq!(SHARD_STRIDE * std::mem::size_of::<f64>(), 64);
        let mut s = ReductionShards::new(3);
        assert_eq!(s.len(), 3);
        s.slots_mut()[SHARD_STRIDE] = 2.0;
        s.slots_mut()[1] = 100.0; // padding, never summed
        assert_eq!(s.sum(), 2.0);
    }
}
