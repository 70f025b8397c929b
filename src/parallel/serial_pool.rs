// Single-threaded stand-in used when the `rayon` feature is off

use crate::error::MgError;

pub struct SolverPool;

impl SolverPool {
    pub fn new(threads: Option<usize>) -> Result<Self, MgError> {
        match threads {
            Some(0) => Err(MgError::InvalidParameter("thread count must be positive".into())),
            _ => Ok(SolverPool),
        }
    }

    pub fn num_threads(&self) -> usize {
        1
    }

    pub fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        op()
    }
}
