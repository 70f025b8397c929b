// rayon-backed pool that bounds the parallel regions of a solve

use crate::error::MgError;

/// Dedicated rayon pool. Kernels called inside [`SolverPool::install`] use
/// exactly `num_threads` workers.
pub struct SolverPool {
    pool: rayon::ThreadPool,
    threads: usize,
}

impl SolverPool {
    /// Build a pool with `threads` workers, or one per logical core.
    pub fn new(threads: Option<usize>) -> Result<Self, MgError> {
        let threads = threads.unwrap_or_else(num_cpus::get);
        if threads == 0 {
            return Err(MgError::InvalidParameter("thread count must be positive".into()));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| MgError::InvalidParameter(e.to_string()))?;
        Ok(SolverPool { pool, threads })
    }

    pub fn num_threads(&self) -> usize {
        self.threads
    }

    pub fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        self.pool.install(op)
    }
}
